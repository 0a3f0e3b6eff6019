// a crashed bootstrap means a failed invocation instead of an error envelope
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::panic)]

use {
    std::{path::PathBuf, sync::Arc, process::exit},
    clap::{Parser, Subcommand},
    serde_json::json,
    thiserror::Error,
    tracing::{info, error},
    fx_counter::{
        CounterHandler,
        HandlerConfig,
        ConfigLoadError,
        InvocationContext,
        StatusCode,
        logging::init_logger,
    },
};

mod lambda;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// yaml file with handler config, defaults are used when not set
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve invocations from the lambda runtime api
    Serve,
    /// Run the handler once and print the response
    Invoke {
        #[arg(long, default_value = "local-invoke")]
        request_id: String,
    },
}

#[derive(Error, Debug)]
enum RuntimeError {
    #[error("failed to load config: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("lambda runtime failed: {0}")]
    Lambda(lambda_runtime::Error),

    #[error("failed to print response: {0}")]
    Output(#[from] serde_json::Error),

    #[error("invocation failed with status {0}")]
    InvocationFailed(StatusCode),
}

#[tokio::main]
async fn main() {
    init_logger();
    let args = Args::parse();

    if let Err(err) = run(args).await {
        error!("{err}");
        exit(-1);
    }
}

async fn run(args: Args) -> Result<(), RuntimeError> {
    let config = match &args.config {
        Some(path) => {
            info!("loading config from {path:?}");
            HandlerConfig::load(path)?
        },
        None => HandlerConfig::default(),
    };
    let handler = Arc::new(CounterHandler::new(config));

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!(mount_path = ?handler.volume().mount_path(), "serving invocations");
            lambda::serve(handler).await.map_err(RuntimeError::Lambda)
        },
        Command::Invoke { request_id } => {
            let response = handler.handle(&json!({}), &InvocationContext::new(request_id));
            println!("{}", serde_json::to_string_pretty(&response)?);

            if response.status() == StatusCode::OK {
                Ok(())
            } else {
                Err(RuntimeError::InvocationFailed(response.status()))
            }
        },
    }
}
