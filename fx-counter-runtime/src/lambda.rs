use {
    std::sync::Arc,
    serde_json::Value,
    lambda_runtime::{service_fn, LambdaEvent},
    fx_counter::{CounterHandler, InvocationContext, FunctionResponse},
};

/// Runs the lambda runtime api loop until the platform shuts the instance down.
pub async fn serve(handler: Arc<CounterHandler>) -> Result<(), lambda_runtime::Error> {
    lambda_runtime::run(service_fn(move |event| handle_event(handler.clone(), event))).await
}

pub async fn handle_event(handler: Arc<CounterHandler>, event: LambdaEvent<Value>) -> Result<FunctionResponse, lambda_runtime::Error> {
    let (payload, ctx) = (event.payload, InvocationContext::new(event.context.request_id));

    // file io on the mount is blocking
    let response = tokio::task::spawn_blocking(move || handler.handle(&payload, &ctx)).await?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use {
        serde_json::json,
        lambda_runtime::Context,
        fx_counter::{HandlerConfig, CounterResponseBody, ErrorResponseBody, StatusCode},
        super::*,
    };

    fn event(request_id: &str) -> LambdaEvent<Value> {
        let mut context = Context::default();
        context.request_id = request_id.to_owned();
        LambdaEvent::new(json!({"httpMethod": "GET"}), context)
    }

    #[tokio::test]
    async fn lambda_event_is_handled() {
        let mount = tempfile::tempdir().unwrap();
        let handler = Arc::new(CounterHandler::new(HandlerConfig::new().with_mount_path(mount.path())));

        let response = handle_event(handler.clone(), event("request-1")).await.unwrap();
        assert_eq!(StatusCode::OK, response.status());
        let body: CounterResponseBody = response.parse_body().unwrap();
        assert_eq!(1, body.counter);
        assert_eq!("request-1", body.request_id);

        let response = handle_event(handler, event("request-2")).await.unwrap();
        let body: CounterResponseBody = response.parse_body().unwrap();
        assert_eq!(2, body.counter);
        assert_eq!("request-2", body.request_id);
    }

    #[tokio::test]
    async fn missing_mount_is_not_a_runtime_error() {
        let root = tempfile::tempdir().unwrap();
        let handler = Arc::new(CounterHandler::new(HandlerConfig::new().with_mount_path(root.path().join("missing"))));

        let response = handle_event(handler, event("request-1")).await.unwrap();
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
        let body: ErrorResponseBody = response.parse_body().unwrap();
        assert!(body.error.starts_with("EFS volume not mounted at "));
    }
}
