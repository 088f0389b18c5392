//! Protocol messages for the `google.spanner.v1` API.
//!
//! The types are `prost` messages, so encoding and decoding are provided by the
//! `prost` runtime. No RPC client is generated here; the transport contract lives
//! in the `spanwire` crate.

#[path = "google.rpc.rs"]
pub mod rpc;

#[cfg(feature = "spanner")]
#[path = ""]
pub mod spanner {
    #[path = "google.spanner.v1.rs"]
    pub mod v1;
}
