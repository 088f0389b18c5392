use std::ops::Deref;
use std::ops::DerefMut;
use std::time::Duration;

use time::OffsetDateTime;

use spanwire_gax::call::TryAs;
use spanwire_gax::cancel::CancellationToken;
use spanwire_gax::grpc::{protocol_violation, Code, Status};
use spanwire_googleapis::spanner::v1::commit_request::Transaction::TransactionId;
use spanwire_googleapis::spanner::v1::commit_response::MultiplexedSessionRetry;
use spanwire_googleapis::spanner::v1::transaction_options::read_write::ReadLockMode;
use spanwire_googleapis::spanner::v1::transaction_selector::Selector;
use spanwire_googleapis::spanner::v1::{
    commit_request, execute_batch_dml_request, result_set_stats, transaction_options, BeginTransactionRequest,
    CommitRequest, ExecuteBatchDmlRequest, ExecuteSqlRequest, MultiplexedSessionPrecommitToken, Mutation,
    ResultSetStats, RollbackRequest, TransactionOptions,
};

use crate::session::SessionHandle;
use crate::statement::Statement;
use crate::transaction::{CallOptions, QueryOptions, Transaction, TransactionContext};
use crate::value::{from_timestamp, to_duration};

#[derive(Clone, Default, Debug)]
pub struct CommitOptions {
    pub return_commit_stats: bool,
    /// How long the server may delay the commit to batch it with others.
    pub max_commit_delay: Option<Duration>,
    pub call_options: CallOptions,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CommitResult {
    pub timestamp: Option<OffsetDateTime>,
    /// Present when `CommitOptions::return_commit_stats` was set.
    pub mutation_count: Option<i64>,
}

#[derive(Clone, Default, Debug)]
pub struct ReadWriteOptions {
    pub read_lock_mode: Option<ReadLockMode>,
    /// Id of the aborted attempt this transaction retries. Keeps the lock priority of the
    /// previous attempt on a multiplexed session.
    pub previous_transaction_id: Vec<u8>,
    pub exclude_txn_from_change_streams: bool,
    pub call_options: CallOptions,
}

/// ReadWriteTransaction provides a locking read-write transaction.
///
/// This type of transaction is the only way to write data into Cloud Spanner;
/// Client::apply and Client::partitioned_update use transactions internally.
/// These transactions rely on pessimistic locking and, if necessary, two-phase
/// commit. Locking read-write transactions may abort, requiring the application
/// to retry the whole transaction.
///
/// Locking transactions may be used to atomically read-modify-write data
/// anywhere in a database. This type of transaction is externally consistent.
///
/// Reads performed within a transaction acquire locks on the data being
/// read. Writes can only be done at commit time, after all reads have been
/// completed. Conceptually, a read-write transaction consists of zero or more
/// reads or SQL queries followed by a commit.
///
/// Aborted transactions
///
/// Cloud Spanner can abort the transaction for any reason. If a commit attempt
/// returns ABORTED, Cloud Spanner guarantees that the transaction has not
/// modified any user data. On a multiplexed session pass the aborted
/// transaction id as `ReadWriteOptions::previous_transaction_id` when retrying.
pub struct ReadWriteTransaction {
    base_tx: Transaction,
    tx_id: Vec<u8>,
    wb: Vec<Mutation>,
}

impl Deref for ReadWriteTransaction {
    type Target = Transaction;

    fn deref(&self) -> &Self::Target {
        &self.base_tx
    }
}

impl DerefMut for ReadWriteTransaction {
    fn deref_mut(&mut self) -> &mut Transaction {
        &mut self.base_tx
    }
}

pub struct BeginError {
    pub status: Status,
    pub session: SessionHandle,
}

/// A batch DML request stopped at a failing statement.
///
/// `row_counts` holds the counts of the statements that succeeded before it.
#[derive(thiserror::Error, Debug)]
#[error("batch update failed after {} statements: {status}", .row_counts.len())]
pub struct BatchUpdateError {
    pub row_counts: Vec<i64>,
    pub status: Status,
}

impl From<Status> for BatchUpdateError {
    fn from(status: Status) -> Self {
        BatchUpdateError {
            row_counts: vec![],
            status,
        }
    }
}

impl TryAs<Status> for BatchUpdateError {
    fn try_as(&self) -> Option<&Status> {
        Some(&self.status)
    }
}

impl ReadWriteTransaction {
    pub async fn begin(session: SessionHandle, options: CallOptions) -> Result<ReadWriteTransaction, BeginError> {
        ReadWriteTransaction::begin_with_options(
            session,
            ReadWriteOptions {
                call_options: options,
                ..Default::default()
            },
        )
        .await
    }

    pub async fn begin_with_options(
        session: SessionHandle,
        options: ReadWriteOptions,
    ) -> Result<ReadWriteTransaction, BeginError> {
        let mode = transaction_options::Mode::ReadWrite(transaction_options::ReadWrite {
            read_lock_mode: options.read_lock_mode.unwrap_or(ReadLockMode::Unspecified).into(),
            multiplexed_session_previous_transaction_id: options.previous_transaction_id,
        });
        let tx_options = TransactionOptions {
            exclude_txn_from_change_streams: options.exclude_txn_from_change_streams,
            mode: Some(mode),
        };
        ReadWriteTransaction::begin_internal(session, tx_options, options.call_options).await
    }

    pub async fn begin_partitioned_dml(
        session: SessionHandle,
        options: CallOptions,
    ) -> Result<ReadWriteTransaction, BeginError> {
        let tx_options = TransactionOptions {
            exclude_txn_from_change_streams: false,
            mode: Some(transaction_options::Mode::PartitionedDml(transaction_options::PartitionedDml {})),
        };
        ReadWriteTransaction::begin_internal(session, tx_options, options).await
    }

    async fn begin_internal(
        mut session: SessionHandle,
        tx_options: TransactionOptions,
        options: CallOptions,
    ) -> Result<ReadWriteTransaction, BeginError> {
        let request = BeginTransactionRequest {
            session: session.session.name.to_string(),
            options: Some(tx_options),
            request_options: Transaction::create_request_options(options.priority),
            mutation_key: None,
        };
        let result = session
            .spanner_client
            .begin_transaction(request, options.cancel.as_ref())
            .await;
        let response = match session.invalidate_if_needed(result) {
            Ok(response) => response,
            Err(err) => {
                return Err(BeginError { status: err, session });
            }
        };
        let tx = response.into_inner();
        if tx.id.is_empty() {
            return Err(BeginError {
                status: protocol_violation("begin transaction returned no transaction id"),
                session,
            });
        }
        let base_tx = Transaction::new(session, Selector::Id(tx.id.clone()));
        base_tx.context.observe_transaction(&tx);
        Ok(ReadWriteTransaction {
            base_tx,
            tx_id: tx.id,
            wb: vec![],
        })
    }

    pub fn transaction_id(&self) -> &[u8] {
        &self.tx_id
    }

    /// Newest precommit token seen by this transaction.
    pub fn precommit_token(&self) -> Option<MultiplexedSessionPrecommitToken> {
        self.base_tx.context.precommit_token()
    }

    /// Buffers mutations to be applied atomically at commit, after all DML of the transaction.
    pub fn buffer_write(&mut self, ms: Vec<Mutation>) {
        self.wb.extend(ms)
    }

    pub async fn update(&mut self, stmt: Statement) -> Result<i64, Status> {
        self.update_with_option(stmt, QueryOptions::default()).await
    }

    pub async fn update_with_option(&mut self, stmt: Statement, options: QueryOptions) -> Result<i64, Status> {
        let params = stmt.params();
        let request = ExecuteSqlRequest {
            session: self.session_name().to_string(),
            transaction: Some(self.selector()),
            sql: stmt.sql,
            params,
            param_types: stmt.param_types,
            resume_token: vec![],
            query_mode: options.mode.into(),
            partition_token: vec![],
            seqno: self.next_seqno(),
            query_options: options.optimizer_options,
            request_options: Transaction::create_request_options(options.call_options.priority),
            data_boost_enabled: false,
            last_statement: false,
        };

        let session = &mut self.base_tx.session;
        let result = session
            .spanner_client
            .execute_sql(request, options.call_options.cancel.as_ref())
            .await;
        let response = session.invalidate_if_needed(result)?.into_inner();
        self.base_tx.context.observe_precommit_token(response.precommit_token.as_ref());
        Ok(extract_row_count(response.stats))
    }

    pub async fn batch_update(&mut self, stmt: Vec<Statement>) -> Result<Vec<i64>, BatchUpdateError> {
        self.batch_update_with_option(stmt, QueryOptions::default()).await
    }

    /// Runs the statements in order in one round trip. A failing statement stops the batch:
    /// the error carries the row counts of the statements before it.
    pub async fn batch_update_with_option(
        &mut self,
        stmt: Vec<Statement>,
        options: QueryOptions,
    ) -> Result<Vec<i64>, BatchUpdateError> {
        let request = ExecuteBatchDmlRequest {
            session: self.session_name().to_string(),
            transaction: Some(self.selector()),
            seqno: self.next_seqno(),
            request_options: Transaction::create_request_options(options.call_options.priority),
            statements: stmt
                .into_iter()
                .map(|x| execute_batch_dml_request::Statement {
                    params: x.params(),
                    sql: x.sql,
                    param_types: x.param_types,
                })
                .collect(),
            last_statements: false,
        };

        let session = &mut self.base_tx.session;
        let result = session
            .spanner_client
            .execute_batch_dml(request, options.call_options.cancel.as_ref())
            .await;
        let response = session.invalidate_if_needed(result)?.into_inner();
        self.base_tx.context.observe_precommit_token(response.precommit_token.as_ref());
        let row_counts: Vec<i64> = response
            .result_sets
            .into_iter()
            .map(|x| {
                self.base_tx.context.observe_precommit_token(x.precommit_token.as_ref());
                extract_row_count(x.stats)
            })
            .collect();
        match response.status {
            Some(status) if status.code != Code::Ok as i32 => {
                tracing::debug!("batch update stopped after {} statements: {}", row_counts.len(), status.message);
                Err(BatchUpdateError {
                    row_counts,
                    status: Status::new(Code::from(status.code), status.message),
                })
            }
            _ => Ok(row_counts),
        }
    }

    /// Commits the transaction on Ok, rolls it back on Err unless the error is ABORTED.
    /// An aborted transaction can not be rolled back and must be retried from the start.
    pub async fn end<S, E>(
        &mut self,
        result: Result<S, E>,
        options: Option<CommitOptions>,
    ) -> Result<(CommitResult, S), E>
    where
        E: TryAs<Status> + From<Status>,
    {
        let opt = options.unwrap_or_default();
        match result {
            Ok(success) => {
                let cr = self.commit(opt).await?;
                Ok((cr, success))
            }
            Err(err) => {
                if let Some(status) = err.try_as() {
                    // can't rollback. should retry
                    if status.code() == Code::Aborted {
                        return Err(err);
                    }
                }
                let _ = self.rollback(opt.call_options.cancel.as_ref()).await;
                Err(err)
            }
        }
    }

    pub async fn commit(&mut self, options: CommitOptions) -> Result<CommitResult, Status> {
        let tx_id = self.tx_id.clone();
        let mutations = self.wb.to_vec();
        let session_name = self.session_name().to_string();
        let context = self.base_tx.context.clone();
        commit(
            &mut self.base_tx.session,
            session_name,
            mutations,
            TransactionId(tx_id),
            Some(&context),
            options,
        )
        .await
    }

    pub async fn rollback(&mut self, cancel: Option<&CancellationToken>) -> Result<(), Status> {
        let request = RollbackRequest {
            transaction_id: self.tx_id.clone(),
            session: self.session_name().to_string(),
        };
        let session = &mut self.base_tx.session;
        let result = session.spanner_client.rollback(request, cancel).await;
        session.invalidate_if_needed(result)?.into_inner();
        Ok(())
    }

    pub fn into_session(self) -> SessionHandle {
        self.base_tx.session
    }
}

/// Sends a commit. The request carries the newest precommit token of `context`. When the
/// server answers with a newer token instead of a timestamp the commit is sent once more with it.
pub(crate) async fn commit(
    session: &mut SessionHandle,
    session_name: String,
    ms: Vec<Mutation>,
    tx: commit_request::Transaction,
    context: Option<&TransactionContext>,
    commit_options: CommitOptions,
) -> Result<CommitResult, Status> {
    let mut request = CommitRequest {
        session: session_name,
        mutations: ms,
        transaction: Some(tx),
        request_options: Transaction::create_request_options(commit_options.call_options.priority),
        return_commit_stats: commit_options.return_commit_stats,
        max_commit_delay: commit_options.max_commit_delay.map(to_duration),
        precommit_token: context.and_then(|c| c.precommit_token()),
    };
    let cancel = commit_options.call_options.cancel.as_ref();
    let mut retried = false;
    loop {
        let result = session.spanner_client.commit(request.clone(), cancel).await;
        let response = session.invalidate_if_needed(result)?.into_inner();
        match response.multiplexed_session_retry {
            Some(MultiplexedSessionRetry::PrecommitToken(token)) => {
                if retried {
                    return Err(Status::new(Code::Aborted, "commit requested a precommit token retry twice"));
                }
                tracing::debug!("commit retry with precommit token seq_num={}", token.seq_num);
                if let Some(context) = context {
                    context.observe_precommit_token(Some(&token));
                }
                retried = true;
                request.precommit_token = Some(token);
            }
            None => {
                return Ok(CommitResult {
                    timestamp: response.commit_timestamp.as_ref().and_then(from_timestamp),
                    mutation_count: response.commit_stats.map(|s| s.mutation_count),
                })
            }
        }
    }
}

fn extract_row_count(rs: Option<ResultSetStats>) -> i64 {
    match rs {
        Some(o) => match o.row_count {
            Some(o) => match o {
                result_set_stats::RowCount::RowCountExact(v) => v,
                result_set_stats::RowCount::RowCountLowerBound(v) => v,
            },
            None => 0,
        },
        None => 0,
    }
}
