use {
    std::{fs, io, path::{Path, PathBuf}},
    serde::Deserialize,
    thiserror::Error,
};

pub const DEFAULT_MOUNT_PATH: &str = "/mnt/db";
pub const DEFAULT_COUNTER_FILE_NAME: &str = "counter.txt";
pub const DEFAULT_LOG_FILE_NAME: &str = "execution_log.txt";

#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
#[serde(default)]
pub struct HandlerConfig {
    pub mount_path: PathBuf,
    pub counter_file_name: String,
    pub log_file_name: String,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            mount_path: PathBuf::from(DEFAULT_MOUNT_PATH),
            counter_file_name: DEFAULT_COUNTER_FILE_NAME.to_owned(),
            log_file_name: DEFAULT_LOG_FILE_NAME.to_owned(),
        }
    }
}

impl HandlerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Used to point the handler at a different volume, for example a temporary directory in tests.
    pub fn with_mount_path(mut self, mount_path: impl Into<PathBuf>) -> Self {
        self.mount_path = mount_path.into();
        self
    }

    pub fn with_counter_file_name(mut self, counter_file_name: impl Into<String>) -> Self {
        self.counter_file_name = counter_file_name.into();
        self
    }

    pub fn with_log_file_name(mut self, log_file_name: impl Into<String>) -> Self {
        self.log_file_name = log_file_name.into();
        self
    }

    pub fn counter_file_path(&self) -> PathBuf {
        self.mount_path.join(&self.counter_file_name)
    }

    pub fn log_file_path(&self) -> PathBuf {
        self.mount_path.join(&self.log_file_name)
    }

    pub fn load(file_path: impl AsRef<Path>) -> Result<Self, ConfigLoadError> {
        let content = fs::read(file_path.as_ref())
            .map_err(|err| ConfigLoadError::FailedToRead(err))?;
        Self::parse(&content)
    }

    pub fn parse(content: &[u8]) -> Result<Self, ConfigLoadError> {
        serde_yml::from_slice(content)
            .map_err(|err| ConfigLoadError::FailedToParse { reason: err.to_string() })
    }
}

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0:?}")]
    FailedToRead(io::Error),

    #[error("failed to parse config file: {reason}")]
    FailedToParse {
        reason: String,
    },
}
