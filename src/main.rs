use event_ack::clock::SystemClock;
use event_ack::config::Config;
use event_ack::logging::{init_tracing, TracingLog};
use event_ack::{Error, EventHandler};
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // the config is read once per container, not per invocation
    let config = Config::from_env()?;
    init_tracing(&config)?;
    debug!("Config: {:?}", config);

    let handler = EventHandler::new(config, TracingLog, SystemClock);
    let handler = &handler;

    if let Err(e) = lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler.handle(event).await
    }))
    .await
    {
        debug!("Runtime error: {:?}", e);
        return Err(e);
    }

    Ok(())
}
