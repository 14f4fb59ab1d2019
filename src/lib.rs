//! A single Lambda function that logs the incoming event, times itself and returns an acknowledgment.
//!
//! The handler is built from three injected parts: the [`config::Config`] read once at start-up,
//! an [`logging::InvocationLog`] sink and a [`clock::Clock`]. Production wiring lives in `main.rs`.

pub mod clock;
pub mod config;
pub mod handler;
pub mod logging;
pub mod payload;

#[cfg(test)]
pub(crate) mod test_support;

pub use handler::EventHandler;

/// Same boxed error type the Lambda runtime uses, so handler errors pass through unchanged.
pub use lambda_runtime::Error;
