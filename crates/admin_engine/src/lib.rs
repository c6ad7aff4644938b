//! Admin engine: runs the effects of the page state against the admin server.
mod client;
mod engine;
mod timers;
mod types;

pub use client::{AdminClient, ClientSettings, ReqwestClient};
pub use engine::{EngineError, EngineHandle};
pub use types::{into_outcome, EngineEvent, FailureKind, RequestFailure};
