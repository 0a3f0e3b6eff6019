use {
    std::{fs::{self, OpenOptions}, io::{self, Write}, path::{Path, PathBuf}},
    chrono::{DateTime, Utc},
    tracing::debug,
    crate::{config::HandlerConfig, error::HandlerError},
};

const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Counter and execution log stored on a mounted network volume.
///
/// There is no locking here: invocations running concurrently against the same
/// mount race on read-increment-write and may lose increments.
pub struct MountVolume {
    mount_path: PathBuf,
    counter_file: PathBuf,
    log_file: PathBuf,
}

impl MountVolume {
    pub fn new(config: &HandlerConfig) -> Self {
        Self {
            mount_path: config.mount_path.clone(),
            counter_file: config.counter_file_path(),
            log_file: config.log_file_path(),
        }
    }

    pub fn mount_path(&self) -> &Path {
        &self.mount_path
    }

    pub fn counter_file(&self) -> &Path {
        &self.counter_file
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn is_mounted(&self) -> bool {
        self.mount_path.exists()
    }

    /// Returns `None` if the counter was never written.
    pub fn read_counter(&self) -> Result<Option<u64>, HandlerError> {
        let content = match fs::read_to_string(&self.counter_file) {
            Ok(v) => v,
            Err(err) => {
                if err.kind() == io::ErrorKind::NotFound {
                    return Ok(None);
                } else {
                    return Err(HandlerError::FailedToReadCounter(err));
                }
            }
        };

        parse_counter(&content).map(Some)
    }

    pub fn ensure_counter_dir(&self) -> Result<(), HandlerError> {
        if let Some(parent) = self.counter_file.parent() {
            if !parent.exists() {
                debug!(path = ?parent, "creating directory for counter file");
                fs::create_dir_all(parent)
                    .map_err(|err| HandlerError::FailedToCreateDirectory(err))?;
            }
        }
        Ok(())
    }

    pub fn write_counter(&self, counter: u64) -> Result<(), HandlerError> {
        fs::write(&self.counter_file, counter.to_string())
            .map_err(|err| HandlerError::FailedToWriteCounter(err))
    }

    pub fn append_log(&self, line: &str) -> Result<(), HandlerError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .map_err(|err| HandlerError::FailedToAppendLog(err))?;
        // single write so that a line from another instance can't end up in the middle of this one
        file.write_all(format!("{line}\n").as_bytes())
            .map_err(|err| HandlerError::FailedToAppendLog(err))
    }

    pub fn counter_file_size(&self) -> Result<u64, HandlerError> {
        fs::metadata(&self.counter_file)
            .map(|v| v.len())
            .map_err(|err| HandlerError::FailedToReadMetadata(err))
    }

    pub fn log_file_size(&self) -> Result<u64, HandlerError> {
        match fs::metadata(&self.log_file) {
            Ok(v) => Ok(v.len()),
            Err(err) => {
                if err.kind() == io::ErrorKind::NotFound {
                    Ok(0)
                } else {
                    Err(HandlerError::FailedToReadMetadata(err))
                }
            }
        }
    }
}

pub fn parse_counter(content: &str) -> Result<u64, HandlerError> {
    let value = content.trim();
    if value.is_empty() {
        return Ok(0);
    }

    value.parse::<u64>()
        .map_err(|err| HandlerError::InvalidCounterValue {
            value: value.to_owned(),
            reason: err.to_string(),
        })
}

pub fn format_log_line(timestamp: DateTime<Utc>, counter: u64) -> String {
    format!("{} - Function executed (count: {counter})", timestamp.format(LOG_TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod tests {
    use {
        chrono::TimeZone,
        super::*,
    };

    #[test]
    fn parse_counter_values() {
        assert_eq!(0, parse_counter("").unwrap());
        assert_eq!(0, parse_counter("  \n").unwrap());
        assert_eq!(41, parse_counter("41").unwrap());
        assert_eq!(7, parse_counter(" 7\n").unwrap());
        assert_eq!(u64::MAX, parse_counter(&u64::MAX.to_string()).unwrap());
    }

    #[test]
    fn parse_counter_rejects_garbage() {
        for value in ["-1", "abc", "4 2", "1.5"] {
            match parse_counter(value) {
                Err(HandlerError::InvalidCounterValue { .. }) => {},
                other => panic!("expected invalid counter value error for {value:?}, got: {other:?}"),
            }
        }
    }

    #[test]
    fn log_line_format() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!("2024-03-09 07:05:01 - Function executed (count: 12)", format_log_line(timestamp, 12));
    }
}
