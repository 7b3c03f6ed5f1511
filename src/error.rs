//! Error types for EchoTrace

use crate::emitter::EmitterId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EchoTraceError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown emitter: {0}")]
    UnknownEmitter(EmitterId),
}

pub type Result<T> = std::result::Result<T, EchoTraceError>;
