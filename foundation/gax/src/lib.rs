//! Shared call vocabulary for the spanwire crates.
//!
//! * [`grpc`] re-exports the status types every RPC reports and names the server-stream type.
//! * [`cancel`] is the cancellation token handed to long-running calls and streams.
//! * [`call`] races a call against cancellation.

pub mod call;
pub mod cancel;
pub mod grpc;
