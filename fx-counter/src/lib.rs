pub use {
    fx_counter_common::{
        InvocationContext,
        FunctionResponse,
        CounterResponseBody,
        FilesystemInfo,
        ErrorResponseBody,
        StatusCode,
    },
    crate::{
        config::{HandlerConfig, ConfigLoadError},
        error::HandlerError,
        handler::{CounterHandler, CounterOutcome},
        volume::MountVolume,
    },
};

pub mod config;
pub mod handler;
pub mod logging;
pub mod volume;

mod error;
