use std::collections::HashMap;
use std::sync::Arc;

use spanwire_gax::call::TryAs;
use spanwire_gax::grpc::Status;
use spanwire_googleapis::spanner::v1::commit_request;
use spanwire_googleapis::spanner::v1::{transaction_options, Mutation, TransactionOptions};

use crate::apiv1::spanner_client::{Client as SpannerClient, Spanner};
use crate::batch_write::{batch_write, BatchWriteIterator, BatchWriteOptions};
use crate::mutation::MutationGroup;
use crate::reader::StreamConfig;
use crate::row;
use crate::session::{SessionConfig, SessionError, SessionHandle, SessionManager, SessionTemplate};
use crate::statement::Statement;
use crate::transaction::{CallOptions, QueryOptions};
use crate::transaction_ro::{BatchReadOnlyTransaction, BatchTransactionId, ReadOnlyTransaction};
use crate::transaction_rw::{commit, CommitOptions, CommitResult, ReadWriteOptions, ReadWriteTransaction};
use crate::value::TimestampBound;

#[derive(Clone, Default)]
pub struct PartitionedUpdateOption {
    pub begin_options: CallOptions,
    pub query_options: Option<QueryOptions>,
}

#[derive(Clone, Default)]
pub struct ReadOnlyTransactionOption {
    pub timestamp_bound: TimestampBound,
    pub call_options: CallOptions,
}

#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    pub session_config: SessionConfig,
    pub stream_config: StreamConfig,
    /// Labels attached to every session the client creates.
    pub session_labels: HashMap<String, String>,
    /// Database role the sessions act as. Empty means the default role.
    pub database_role: String,
}

impl ClientConfig {
    fn validate(&self) -> Result<(), Error> {
        if self.session_config.refresh_interval.is_zero() {
            return Err(Error::InvalidConfig("refresh_interval must be positive".to_string()));
        }
        if self.session_config.multiplexed_session_max_age.is_zero() {
            return Err(Error::InvalidConfig(
                "multiplexed_session_max_age must be positive".to_string(),
            ));
        }
        if self.stream_config.max_bytes_between_resume_tokens == 0 {
            return Err(Error::InvalidConfig(
                "max_bytes_between_resume_tokens must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    GRPC(#[from] Status),

    #[error(transparent)]
    InvalidSession(#[from] SessionError),

    #[error(transparent)]
    ParseError(#[from] row::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl TryAs<Status> for Error {
    fn try_as(&self) -> Option<&Status> {
        match self {
            Error::GRPC(e) => Some(e),
            Error::InvalidSession(e) => e.try_as(),
            _ => None,
        }
    }
}

/// Client is a client for reading and writing data to a Cloud Spanner database.
///
/// Transactions run on one multiplexed session kept alive by the client. A client is safe to
/// clone and use concurrently.
#[derive(Clone)]
pub struct Client {
    sessions: Arc<SessionManager>,
}

impl Client {
    /// new creates a client to a database. A valid database name has the
    /// form projects/PROJECT_ID/instances/INSTANCE_ID/databases/DATABASE_ID.
    pub async fn new(
        database: impl Into<String>,
        transport: Arc<dyn Spanner>,
        config: Option<ClientConfig>,
    ) -> Result<Self, Error> {
        let database = database.into();
        let config = config.unwrap_or_default();
        if !is_database_name(&database) {
            return Err(Error::InvalidConfig(format!("invalid database name {database}")));
        }
        config.validate()?;

        let spanner_client = SpannerClient::new(transport).with_stream_config(config.stream_config);
        let template = SessionTemplate {
            labels: config.session_labels,
            creator_role: config.database_role,
        };
        let sessions = SessionManager::new(database, spanner_client, template, config.session_config).await?;
        Ok(Client { sessions })
    }

    /// close stops the background tasks of the client.
    pub async fn close(self) {
        self.sessions.close().await;
    }

    pub fn database(&self) -> &str {
        self.sessions.database()
    }

    /// A dedicated regular session. Use it to run a transaction outside the multiplexed session.
    pub async fn session(&self) -> Result<SessionHandle, Error> {
        Ok(self.sessions.create_regular().await?)
    }

    /// single provides a read-only snapshot transaction optimized for the case
    /// where only a single read or query is needed.  This is more efficient than
    /// using read_only_transaction for a single read or query.
    pub async fn single(&self) -> Result<ReadOnlyTransaction, Error> {
        self.single_with_timestamp_bound(TimestampBound::strong_read()).await
    }

    pub async fn single_with_timestamp_bound(&self, tb: TimestampBound) -> Result<ReadOnlyTransaction, Error> {
        let session = self.sessions.get().await?;
        Ok(ReadOnlyTransaction::single(session, tb))
    }

    /// read_only_transaction returns a ReadOnlyTransaction that can be used for
    /// multiple reads from the database.
    pub async fn read_only_transaction(
        &self,
        options: Option<ReadOnlyTransactionOption>,
    ) -> Result<ReadOnlyTransaction, Error> {
        let opts = options.unwrap_or_default();
        let session = self.sessions.get().await?;
        Ok(ReadOnlyTransaction::begin(session, opts.timestamp_bound, opts.call_options).await?)
    }

    /// Like read_only_transaction, but the transaction is begun by its first query or read.
    pub async fn read_only_transaction_inline(&self, tb: Option<TimestampBound>) -> Result<ReadOnlyTransaction, Error> {
        let session = self.sessions.get().await?;
        Ok(ReadOnlyTransaction::begin_inline(session, tb.unwrap_or_default())?)
    }

    /// batch_read_only_transaction returns a BatchReadOnlyTransaction that can be used
    /// for partitioned reads or queries from a snapshot of the database. This is
    /// useful in batch processing pipelines where one wants to divide the work of
    /// reading from the database across multiple machines.
    pub async fn batch_read_only_transaction(
        &self,
        options: Option<ReadOnlyTransactionOption>,
    ) -> Result<BatchReadOnlyTransaction, Error> {
        let opts = options.unwrap_or_default();
        let session = self.sessions.get().await?;
        Ok(BatchReadOnlyTransaction::begin(session, opts.timestamp_bound, opts.call_options).await?)
    }

    /// Re-attaches to a batch transaction begun by another client of the same database.
    pub async fn batch_read_only_transaction_from_id(
        &self,
        id: BatchTransactionId,
    ) -> Result<BatchReadOnlyTransaction, Error> {
        let session = self.sessions.get().await?;
        Ok(BatchReadOnlyTransaction::from_id(session, id))
    }

    /// read_write_transaction begins a read-write transaction. Finish it with
    /// ReadWriteTransaction::end, and start over with a new transaction when it
    /// ends with ABORTED.
    pub async fn read_write_transaction(
        &self,
        options: Option<ReadWriteOptions>,
    ) -> Result<ReadWriteTransaction, Error> {
        let session = self.sessions.get().await?;
        ReadWriteTransaction::begin_with_options(session, options.unwrap_or_default())
            .await
            .map_err(|e| Error::GRPC(e.status))
    }

    /// apply applies a list of mutations atomically to the database in one
    /// single-use read-write transaction.
    pub async fn apply(&self, ms: Vec<Mutation>, options: Option<CommitOptions>) -> Result<CommitResult, Error> {
        let mut session = self.sessions.get().await?;
        let tx = commit_request::Transaction::SingleUseTransaction(TransactionOptions {
            exclude_txn_from_change_streams: false,
            mode: Some(transaction_options::Mode::ReadWrite(transaction_options::ReadWrite::default())),
        });
        let session_name = session.session.name.clone();
        Ok(commit(&mut session, session_name, ms, tx, None, options.unwrap_or_default()).await?)
    }

    /// partitioned_update executes a DML statement in parallel across the database,
    /// using separate, internal transactions that commit independently. The DML
    /// statement must be fully partitionable: it must be expressible as the union
    /// of many statements each of which accesses only a single row of the table. The
    /// statement should also be idempotent, because it may be applied more than once.
    ///
    /// partitioned_update returns an estimated count of the number of rows affected.
    /// The actual number of affected rows may be greater than the estimate.
    pub async fn partitioned_update(
        &self,
        stmt: Statement,
        options: Option<PartitionedUpdateOption>,
    ) -> Result<i64, Error> {
        let opts = options.unwrap_or_default();
        let session = self.sessions.get().await?;
        let mut tx = ReadWriteTransaction::begin_partitioned_dml(session, opts.begin_options)
            .await
            .map_err(|e| Error::GRPC(e.status))?;
        let qo = opts.query_options.unwrap_or_default();
        Ok(tx.update_with_option(stmt, qo).await?)
    }

    /// batch_write applies mutation groups non-atomically: every group commits on
    /// its own. The returned iterator reports the outcome of each group.
    pub async fn batch_write(
        &self,
        groups: Vec<MutationGroup>,
        options: Option<BatchWriteOptions>,
    ) -> Result<BatchWriteIterator, Error> {
        let mut session = self.sessions.get().await?;
        Ok(batch_write(&mut session, groups, options.unwrap_or_default()).await?)
    }
}

fn is_database_name(database: &str) -> bool {
    let parts: Vec<&str> = database.split('/').collect();
    parts.len() == 6
        && parts[0] == "projects"
        && parts[2] == "instances"
        && parts[4] == "databases"
        && parts.iter().all(|p| !p.is_empty())
}
