use {
    serde_json::Value,
    chrono::Utc,
    tracing::{info, warn, error, info_span},
    fx_counter_common::{
        StatusCode,
        InvocationContext,
        FunctionResponse,
        CounterResponseBody,
        FilesystemInfo,
        ErrorResponseBody,
    },
    crate::{
        config::HandlerConfig,
        error::HandlerError,
        volume::{MountVolume, format_log_line},
    },
};

pub const GREETING_MESSAGE: &str = "Hello from AWS Lambda with EFS persistence!";
pub const MOUNT_NOT_PRESENT_MESSAGE: &str = "Please configure the Lambda function with an EFS volume";
pub const VOLUME_ACCESS_ERROR_MESSAGE: &str = "Error accessing EFS volume";

/// Result of a single successful invocation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CounterOutcome {
    pub counter: u64,
    pub is_first_execution: bool,
    pub counter_file_size_bytes: u64,
    pub log_file_size_bytes: u64,
}

pub struct CounterHandler {
    volume: MountVolume,
}

impl CounterHandler {
    pub fn new(config: HandlerConfig) -> Self {
        Self {
            volume: MountVolume::new(&config),
        }
    }

    pub fn volume(&self) -> &MountVolume {
        &self.volume
    }

    /// Runs a single invocation and converts any failure into an error envelope.
    /// Platform always gets a well-formed response back, this never fails.
    pub fn handle(&self, _event: &Value, ctx: &InvocationContext) -> FunctionResponse {
        let span = info_span!("invocation", request_id = %ctx.request_id);
        let _guard = span.enter();

        match self.execute() {
            Ok(outcome) => {
                info!(counter = outcome.counter, is_first_execution = outcome.is_first_execution, "function executed");
                FunctionResponse::json(StatusCode::OK, &CounterResponseBody {
                    message: GREETING_MESSAGE.to_owned(),
                    counter: outcome.counter,
                    is_first_execution: outcome.is_first_execution,
                    filesystem_info: FilesystemInfo {
                        counter_file_size_bytes: outcome.counter_file_size_bytes,
                        log_file_size_bytes: outcome.log_file_size_bytes,
                        efs_mounted: true,
                    },
                    request_id: ctx.request_id.clone(),
                })
            },
            Err(err @ HandlerError::MountNotPresent { .. }) => {
                warn!("volume is not mounted: {err}");
                FunctionResponse::json_without_headers(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &ErrorResponseBody::new(err.to_string(), MOUNT_NOT_PRESENT_MESSAGE),
                )
            },
            Err(err) => {
                error!("failed to access volume: {err:?}");
                FunctionResponse::json(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &ErrorResponseBody::new(err.to_string(), VOLUME_ACCESS_ERROR_MESSAGE),
                )
            },
        }
    }

    pub fn execute(&self) -> Result<CounterOutcome, HandlerError> {
        if !self.volume.is_mounted() {
            return Err(HandlerError::MountNotPresent {
                path: self.volume.mount_path().to_path_buf(),
            });
        }

        let (previous, is_first_execution) = match self.volume.read_counter()? {
            Some(v) => (v, false),
            None => {
                self.volume.ensure_counter_dir()?;
                (0, true)
            }
        };

        let counter = previous.checked_add(1)
            .ok_or_else(|| HandlerError::InvalidCounterValue {
                value: previous.to_string(),
                reason: "counter overflow".to_owned(),
            })?;

        self.volume.write_counter(counter)?;
        self.volume.append_log(&format_log_line(Utc::now(), counter))?;

        Ok(CounterOutcome {
            counter,
            is_first_execution,
            counter_file_size_bytes: self.volume.counter_file_size()?,
            log_file_size_bytes: self.volume.log_file_size()?,
        })
    }
}
