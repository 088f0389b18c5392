use std::pin::Pin;

use futures_core::Stream;

pub use tonic::{Code, Response, Status};

/// Server-streaming response body.
///
/// Transports adapt their native stream (a tonic `Streaming<T>`, an emulator socket, an
/// in-memory script) into this boxed form so callers never depend on the wire stack.
pub type Streaming<T> = Pin<Box<dyn Stream<Item = Result<T, Status>> + Send>>;

/// Builds a status for a request rejected locally before it reaches the transport.
pub fn invalid_argument(message: impl Into<String>) -> Status {
    Status::new(Code::InvalidArgument, message)
}

/// Builds a status for a response that breaks the framing rules of the protocol.
pub fn protocol_violation(message: impl std::fmt::Display) -> Status {
    Status::new(Code::Internal, format!("protocol violation: {message}"))
}

/// Status returned when a call is abandoned through its cancellation token.
pub fn cancelled() -> Status {
    Status::new(Code::Cancelled, "client cancel")
}
