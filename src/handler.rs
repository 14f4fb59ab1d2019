use crate::clock::{elapsed_ms, Clock};
use crate::config::Config;
use crate::logging::{CompletedEntry, InvocationLog, StartedEntry};
use crate::payload::{format_duration, ResponsePayload, RUNTIME_VERSION};
use crate::Error;
use lambda_runtime::{Context, LambdaEvent};
use serde_json::Value;

/// Turns one invocation into one acknowledgment, logging before and after.
/// Holds no per-invocation state, so a single instance serves every invocation of the container.
pub struct EventHandler<L, C> {
    config: Config,
    log: L,
    clock: C,
}

impl<L: InvocationLog, C: Clock> EventHandler<L, C> {
    pub fn new(config: Config, log: L, clock: C) -> Self {
        Self { config, log, clock }
    }

    #[cfg(test)]
    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn log(&self) -> &L {
        &self.log
    }

    /// The entry point for `lambda_runtime`. The event is echoed back in the response.
    pub async fn handle(&self, event: LambdaEvent<Value>) -> Result<ResponsePayload, Error> {
        let (payload, ctx) = event.into_parts();
        self.handle_parts(payload, &ctx)
    }

    /// Does the actual work of `handle` without the runtime wrapper.
    /// Fails only if the log sink does.
    pub fn handle_parts(&self, event: Value, ctx: &Context) -> Result<ResponsePayload, Error> {
        let started_at = self.clock.now();
        let environment = &self.config.environment;

        self.log.started(&StartedEntry {
            request_id: &ctx.request_id,
            event: &event,
            deadline_ms: ctx.deadline,
            environment,
            runtime_version: RUNTIME_VERSION,
        })?;

        let finished_at = self.clock.now();
        let duration = format_duration(elapsed_ms(started_at, finished_at));

        self.log.completed(&CompletedEntry {
            request_id: &ctx.request_id,
            duration: &duration,
            environment,
            runtime_version: RUNTIME_VERSION,
        })?;

        Ok(ResponsePayload::ok(&ctx.request_id, duration, event, finished_at))
    }
}
