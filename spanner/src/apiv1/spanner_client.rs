use std::sync::Arc;

use async_trait::async_trait;

use spanwire_gax::call::invoke;
use spanwire_gax::cancel::CancellationToken;
use spanwire_gax::grpc::{Response, Status, Streaming};
use spanwire_googleapis::spanner::v1::{
    BatchCreateSessionsRequest, BatchCreateSessionsResponse, BatchWriteRequest, BatchWriteResponse,
    BeginTransactionRequest, CommitRequest, CommitResponse, CreateSessionRequest, DeleteSessionRequest,
    ExecuteBatchDmlRequest, ExecuteBatchDmlResponse, ExecuteSqlRequest, GetSessionRequest, ListSessionsRequest,
    ListSessionsResponse, PartialResultSet, PartitionQueryRequest, PartitionReadRequest, PartitionResponse,
    ReadRequest, ResultSet, RollbackRequest, Session, Transaction,
};

use crate::apiv1::verify;
use crate::reader::StreamConfig;

/// The Spanner data API.
///
/// This is the whole contract between the protocol logic of this crate and the wire.
/// Implementations only move messages: they are not expected to validate, retry or
/// reassemble anything.
#[async_trait]
pub trait Spanner: Send + Sync {
    async fn create_session(&self, req: CreateSessionRequest) -> Result<Response<Session>, Status>;

    async fn batch_create_sessions(
        &self,
        req: BatchCreateSessionsRequest,
    ) -> Result<Response<BatchCreateSessionsResponse>, Status>;

    async fn get_session(&self, req: GetSessionRequest) -> Result<Response<Session>, Status>;

    async fn list_sessions(&self, req: ListSessionsRequest) -> Result<Response<ListSessionsResponse>, Status>;

    async fn delete_session(&self, req: DeleteSessionRequest) -> Result<Response<()>, Status>;

    async fn execute_sql(&self, req: ExecuteSqlRequest) -> Result<Response<ResultSet>, Status>;

    async fn execute_streaming_sql(
        &self,
        req: ExecuteSqlRequest,
    ) -> Result<Response<Streaming<PartialResultSet>>, Status>;

    async fn execute_batch_dml(&self, req: ExecuteBatchDmlRequest) -> Result<Response<ExecuteBatchDmlResponse>, Status>;

    async fn read(&self, req: ReadRequest) -> Result<Response<ResultSet>, Status>;

    async fn streaming_read(&self, req: ReadRequest) -> Result<Response<Streaming<PartialResultSet>>, Status>;

    async fn begin_transaction(&self, req: BeginTransactionRequest) -> Result<Response<Transaction>, Status>;

    async fn commit(&self, req: CommitRequest) -> Result<Response<CommitResponse>, Status>;

    async fn rollback(&self, req: RollbackRequest) -> Result<Response<()>, Status>;

    async fn partition_query(&self, req: PartitionQueryRequest) -> Result<Response<PartitionResponse>, Status>;

    async fn partition_read(&self, req: PartitionReadRequest) -> Result<Response<PartitionResponse>, Status>;

    async fn batch_write(&self, req: BatchWriteRequest) -> Result<Response<Streaming<BatchWriteResponse>>, Status>;
}

/// Client used by sessions and transactions.
///
/// Every request is checked by [`verify`] before it is handed to the transport, so a
/// malformed request fails with `INVALID_ARGUMENT` without a round trip. Each call can be
/// abandoned with a [`CancellationToken`].
#[derive(Clone)]
pub struct Client {
    inner: Arc<dyn Spanner>,
    stream_config: StreamConfig,
}

impl Client {
    /// create new spanner client
    pub fn new(inner: Arc<dyn Spanner>) -> Client {
        Client {
            inner,
            stream_config: StreamConfig::default(),
        }
    }

    pub fn with_stream_config(mut self, stream_config: StreamConfig) -> Client {
        self.stream_config = stream_config;
        self
    }

    pub(crate) fn stream_config(&self) -> &StreamConfig {
        &self.stream_config
    }

    /// create_session creates a new session. A session can be used to perform
    /// transactions that read and/or modify data in a Cloud Spanner database.
    ///
    /// A non-multiplexed session executes one transaction at a time. A multiplexed
    /// session can be shared by any number of concurrent transactions.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn create_session(
        &self,
        req: CreateSessionRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<Session>, Status> {
        verify::create_session(&req)?;
        invoke(cancel, || self.inner.create_session(req)).await
    }

    /// batch_create_sessions creates multiple new sessions.
    /// The server may return fewer sessions than requested.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn batch_create_sessions(
        &self,
        req: BatchCreateSessionsRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<BatchCreateSessionsResponse>, Status> {
        verify::batch_create_sessions(&req)?;
        invoke(cancel, || self.inner.batch_create_sessions(req)).await
    }

    /// get_session gets a session. Returns NOT_FOUND if the session does not exist.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn get_session(
        &self,
        req: GetSessionRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<Session>, Status> {
        verify::name("name", &req.name)?;
        invoke(cancel, || self.inner.get_session(req)).await
    }

    /// list_sessions lists one page of the sessions in a given database.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn list_sessions(
        &self,
        req: ListSessionsRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<ListSessionsResponse>, Status> {
        verify::name("database", &req.database)?;
        invoke(cancel, || self.inner.list_sessions(req)).await
    }

    /// delete_session ends a session, releasing server resources associated with it.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn delete_session(
        &self,
        req: DeleteSessionRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<()>, Status> {
        verify::name("name", &req.name)?;
        invoke(cancel, || self.inner.delete_session(req)).await
    }

    /// execute_sql executes an SQL statement, returning all results in a single reply.
    /// Used for DML statements; queries go through execute_streaming_sql.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn execute_sql(
        &self,
        req: ExecuteSqlRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<ResultSet>, Status> {
        verify::execute_sql(&req)?;
        invoke(cancel, || self.inner.execute_sql(req)).await
    }

    /// execute_streaming_sql is like execute_sql, except returns the result set as a
    /// stream of partial result sets.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn execute_streaming_sql(
        &self,
        req: ExecuteSqlRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<Streaming<PartialResultSet>>, Status> {
        verify::execute_sql(&req)?;
        invoke(cancel, || self.inner.execute_streaming_sql(req)).await
    }

    /// execute_batch_dml executes a batch of DML statements in order.
    /// Execution stops at the first failing statement; the response then carries the
    /// result sets of the statements that ran and the failing status.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn execute_batch_dml(
        &self,
        req: ExecuteBatchDmlRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<ExecuteBatchDmlResponse>, Status> {
        verify::execute_batch_dml(&req)?;
        invoke(cancel, || self.inner.execute_batch_dml(req)).await
    }

    /// read reads rows from the database using key lookups and scans, as a simple key/value
    /// style alternative to execute_sql.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn read(&self, req: ReadRequest, cancel: Option<&CancellationToken>) -> Result<Response<ResultSet>, Status> {
        verify::read(&req)?;
        invoke(cancel, || self.inner.read(req)).await
    }

    /// streaming_read is like read, except returns the result set as a stream.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn streaming_read(
        &self,
        req: ReadRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<Streaming<PartialResultSet>>, Status> {
        verify::read(&req)?;
        invoke(cancel, || self.inner.streaming_read(req)).await
    }

    /// begin_transaction begins a new transaction.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn begin_transaction(
        &self,
        req: BeginTransactionRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<Transaction>, Status> {
        verify::begin_transaction(&req)?;
        invoke(cancel, || self.inner.begin_transaction(req)).await
    }

    /// commit commits a transaction. The request includes the mutations to be
    /// applied to rows in the database.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn commit(
        &self,
        req: CommitRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<CommitResponse>, Status> {
        verify::commit(&req)?;
        invoke(cancel, || self.inner.commit(req)).await
    }

    /// rollback rolls back a transaction, releasing any locks it holds.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn rollback(&self, req: RollbackRequest, cancel: Option<&CancellationToken>) -> Result<Response<()>, Status> {
        verify::rollback(&req)?;
        invoke(cancel, || self.inner.rollback(req)).await
    }

    /// partition_query creates a set of partition tokens that can be used to execute a query
    /// operation in parallel.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn partition_query(
        &self,
        req: PartitionQueryRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<PartitionResponse>, Status> {
        verify::partition_query(&req)?;
        invoke(cancel, || self.inner.partition_query(req)).await
    }

    /// partition_read creates a set of partition tokens that can be used to execute a read
    /// operation in parallel.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn partition_read(
        &self,
        req: PartitionReadRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<PartitionResponse>, Status> {
        verify::partition_read(&req)?;
        invoke(cancel, || self.inner.partition_read(req)).await
    }

    /// batch_write applies groups of mutations, each group in its own transaction.
    /// The groups are not applied atomically with respect to each other.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all))]
    pub async fn batch_write(
        &self,
        req: BatchWriteRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<Response<Streaming<BatchWriteResponse>>, Status> {
        verify::batch_write(&req)?;
        invoke(cancel, || self.inner.batch_write(req)).await
    }
}
