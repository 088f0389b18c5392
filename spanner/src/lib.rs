//! # spanwire
//!
//! Session, transaction and streaming query protocol core for Cloud Spanner.
//!
//! The crate is transport-agnostic: every RPC goes through the
//! [`apiv1::spanner_client::Spanner`] trait, which a gRPC channel, an emulator adaptor or an
//! in-process fake implements. On top of it the crate provides
//!
//! * session lifecycle with a background-refreshed multiplexed session,
//! * read-only, batch read-only (partitioned) and read-write transactions,
//! * the `single-use` / `begin` / `id` transaction selector protocol,
//! * precommit token tracking for read-write transactions on multiplexed sessions,
//! * reassembly of chunked streaming results with resume-token based continuation,
//! * commits with mutation buffering, and batch writes with per-group outcomes.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use spanwire::client::Client;
//! use spanwire::mutation::insert;
//! use spanwire::statement::Statement;
//!
//! async fn run(transport: Arc<dyn spanwire::apiv1::spanner_client::Spanner>) -> Result<(), spanwire::client::Error> {
//!     const DATABASE: &str = "projects/p/instances/i/databases/d";
//!     let client = Client::new(DATABASE, transport, None).await?;
//!
//!     client.apply(vec![insert("Guild", &["GuildId", "OwnerUserId"], &[&"guild1", &"user1"])], None).await?;
//!
//!     let mut tx = client.single().await?;
//!     let mut iter = tx.query(Statement::new("SELECT GuildId FROM Guild")).await?;
//!     while let Some(row) = iter.next().await? {
//!         let guild_id: String = row.column_by_name("GuildId")?;
//!         println!("{guild_id}");
//!     }
//!     drop(iter);
//!     client.close().await;
//!     Ok(())
//! }
//! ```
pub mod apiv1;
pub mod batch_write;
pub mod client;
pub mod key;
pub mod mutation;
pub mod reader;
pub mod row;
pub mod session;
pub mod statement;
pub mod transaction;
pub mod transaction_ro;
pub mod transaction_rw;
pub mod value;
