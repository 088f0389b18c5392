use std::ops::{Deref, DerefMut};

use time::OffsetDateTime;

use spanwire_gax::grpc::{invalid_argument, protocol_violation, Status};
use spanwire_googleapis::spanner::v1::transaction_selector::Selector;
use spanwire_googleapis::spanner::v1::{
    transaction_options, BeginTransactionRequest, ExecuteSqlRequest, PartitionOptions, PartitionQueryRequest,
    PartitionReadRequest, ReadRequest, Transaction as InternalTransaction, TransactionOptions,
};

use crate::key::KeySet;
use crate::reader::{Reader, RowIterator, StatementReader, TableReader};
use crate::session::SessionHandle;
use crate::statement::Statement;
use crate::transaction::{CallOptions, QueryOptions, ReadOptions, Transaction, TransactionContext};
use crate::value::{to_timestamp, TimestampBound};

fn read_only_options(tb: TimestampBound) -> TransactionOptions {
    TransactionOptions {
        exclude_txn_from_change_streams: false,
        mode: Some(transaction_options::Mode::ReadOnly(tb.into())),
    }
}

fn check_multi_use(tb: &TimestampBound) -> Result<(), Status> {
    if tb.is_single_use_only() {
        return Err(invalid_argument(format!(
            "{tb:?} can only be used in a single-use transaction"
        )));
    }
    Ok(())
}

/// ReadOnlyTransaction provides a snapshot transaction with guaranteed
/// consistency across reads, but does not allow writes.  Read-only transactions
/// can be configured to read at timestamps in the past.
///
/// Read-only transactions do not take locks. Instead, they work by choosing a
/// Cloud Spanner timestamp, then executing all reads at that timestamp. Since
/// they do not acquire locks, they do not block concurrent read-write
/// transactions.
///
/// Unlike locking read-write transactions, read-only transactions never abort.
/// They can fail if the chosen read timestamp is garbage collected; however, the
/// default garbage collection policy is generous enough that most applications
/// do not need to worry about this in practice. See the documentation of
/// TimestampBound for more details.
pub struct ReadOnlyTransaction {
    base_tx: Transaction,
}

impl Deref for ReadOnlyTransaction {
    type Target = Transaction;

    fn deref(&self) -> &Self::Target {
        &self.base_tx
    }
}

impl DerefMut for ReadOnlyTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base_tx
    }
}

impl ReadOnlyTransaction {
    /// A transaction that lives for exactly one query or read.
    pub fn single(session: SessionHandle, tb: TimestampBound) -> ReadOnlyTransaction {
        ReadOnlyTransaction {
            base_tx: Transaction::new(session, Selector::SingleUse(read_only_options(tb))),
        }
    }

    /// begin starts a snapshot read-only Transaction on Cloud Spanner.
    pub async fn begin(
        mut session: SessionHandle,
        tb: TimestampBound,
        options: CallOptions,
    ) -> Result<ReadOnlyTransaction, Status> {
        check_multi_use(&tb)?;
        let request = BeginTransactionRequest {
            session: session.session.name.to_string(),
            options: Some(read_only_options(tb)),
            request_options: Transaction::create_request_options(options.priority),
            mutation_key: None,
        };

        let result = session
            .spanner_client
            .begin_transaction(request, options.cancel.as_ref())
            .await;
        let tx = session.invalidate_if_needed(result)?.into_inner();
        if tx.id.is_empty() {
            return Err(protocol_violation("begin transaction returned no transaction id"));
        }
        let base_tx = Transaction::new(session, Selector::Id(tx.id.clone()));
        base_tx.context.observe_transaction(&tx);
        Ok(ReadOnlyTransaction { base_tx })
    }

    /// A multi-use transaction begun by its first query or read instead of a separate round trip.
    pub fn begin_inline(session: SessionHandle, tb: TimestampBound) -> Result<ReadOnlyTransaction, Status> {
        check_multi_use(&tb)?;
        Ok(ReadOnlyTransaction {
            base_tx: Transaction::new(session, Selector::Begin(read_only_options(tb))),
        })
    }

    /// The timestamp all reads of the transaction observe. Known after begin, or after the first
    /// response of a single-use or inline-begun transaction.
    pub fn read_timestamp(&self) -> Option<OffsetDateTime> {
        self.base_tx.context.read_timestamp()
    }

    /// None until the transaction has been begun.
    pub fn transaction_id(&self) -> Option<Vec<u8>> {
        self.base_tx.context.transaction_id()
    }

    pub fn into_session(self) -> SessionHandle {
        self.base_tx.session
    }
}

/// One piece of a partitioned read or query.
///
/// A partition can be sent to another task and executed through any session handle of the same
/// database.
#[derive(Clone, Debug)]
pub struct Partition<T: Reader + Clone> {
    pub reader: T,
    transaction_id: Vec<u8>,
}

impl<T: Reader + Clone> Partition<T> {
    pub async fn execute<'a>(
        &self,
        session: &'a mut SessionHandle,
        option: Option<CallOptions>,
    ) -> Result<RowIterator<'a, T>, Status> {
        let context = TransactionContext::new(Selector::Id(self.transaction_id.clone()));
        RowIterator::new(session, self.reader.clone(), context, option).await
    }
}

/// Everything another worker needs to re-attach to a batch read-only transaction.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchTransactionId {
    pub session_name: String,
    pub transaction_id: Vec<u8>,
    pub read_timestamp: Option<OffsetDateTime>,
}

/// BatchReadOnlyTransaction is a ReadOnlyTransaction that allows for exporting
/// arbitrarily large amounts of data from Cloud Spanner databases.
/// BatchReadOnlyTransaction partitions a read/query request. Read/query request
/// can then be executed independently over each partition while observing the
/// same snapshot of the database.
pub struct BatchReadOnlyTransaction {
    base_tx: ReadOnlyTransaction,
    transaction_id: Vec<u8>,
}

impl Deref for BatchReadOnlyTransaction {
    type Target = ReadOnlyTransaction;

    fn deref(&self) -> &Self::Target {
        &self.base_tx
    }
}

impl DerefMut for BatchReadOnlyTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base_tx
    }
}

impl BatchReadOnlyTransaction {
    pub async fn begin(
        session: SessionHandle,
        tb: TimestampBound,
        options: CallOptions,
    ) -> Result<BatchReadOnlyTransaction, Status> {
        let tx = ReadOnlyTransaction::begin(session, tb, options).await?;
        let transaction_id = tx.transaction_id().unwrap_or_default();
        Ok(BatchReadOnlyTransaction {
            base_tx: tx,
            transaction_id,
        })
    }

    /// Re-attaches to a transaction begun elsewhere. Requests keep naming the session the
    /// transaction was begun on.
    pub fn from_id(session: SessionHandle, id: BatchTransactionId) -> BatchReadOnlyTransaction {
        let mut base_tx = Transaction::new(session, Selector::Id(id.transaction_id.clone()));
        base_tx.session_name = id.session_name;
        if let Some(ts) = id.read_timestamp {
            base_tx.context.observe_transaction(&InternalTransaction {
                id: id.transaction_id.clone(),
                read_timestamp: Some(to_timestamp(ts)),
                precommit_token: None,
            });
        }
        BatchReadOnlyTransaction {
            base_tx: ReadOnlyTransaction { base_tx },
            transaction_id: id.transaction_id,
        }
    }

    pub fn transaction_id(&self) -> BatchTransactionId {
        BatchTransactionId {
            session_name: self.base_tx.session_name().to_string(),
            transaction_id: self.transaction_id.clone(),
            read_timestamp: self.base_tx.read_timestamp(),
        }
    }

    /// partition_read returns a list of Partitions that can be used to read rows from
    /// the database. These partitions can be executed across multiple processes,
    /// even across different machines. The partition size and count hints can be
    /// configured using PartitionOptions.
    pub async fn partition_read(
        &mut self,
        table: &str,
        columns: &[&str],
        keys: impl Into<KeySet>,
        po: PartitionOptions,
        ro: Option<ReadOptions>,
    ) -> Result<Vec<Partition<TableReader>>, Status> {
        let opt = ro.unwrap_or_default();
        let columns: Vec<String> = columns.iter().map(|x| x.to_string()).collect();
        let key_set: KeySet = keys.into();

        let request = PartitionReadRequest {
            session: self.session_name().to_string(),
            transaction: Some(self.selector()),
            table: table.to_string(),
            index: opt.index.clone(),
            columns: columns.clone(),
            key_set: Some(key_set.clone().into()),
            partition_options: Some(po),
        };
        let session = &mut self.base_tx.base_tx.session;
        let result = session
            .spanner_client
            .partition_read(request, opt.call_options.cancel.as_ref())
            .await;
        let response = session.invalidate_if_needed(result)?.into_inner();
        tracing::debug!("partition_read table={} partitions={}", table, response.partitions.len());

        Ok(response
            .partitions
            .into_iter()
            .map(|x| Partition {
                reader: TableReader {
                    request: ReadRequest {
                        session: self.session_name().to_string(),
                        transaction: Some(self.selector()),
                        table: table.to_string(),
                        index: opt.index.clone(),
                        columns: columns.clone(),
                        key_set: Some(key_set.clone().into()),
                        limit: 0,
                        resume_token: vec![],
                        partition_token: x.partition_token,
                        request_options: Transaction::create_request_options(opt.call_options.priority),
                        data_boost_enabled: false,
                    },
                },
                transaction_id: self.transaction_id.clone(),
            })
            .collect())
    }

    /// partition_query returns a list of Partitions that can be used to execute a query against the database.
    pub async fn partition_query(
        &mut self,
        stmt: Statement,
        po: PartitionOptions,
        qo: Option<QueryOptions>,
    ) -> Result<Vec<Partition<StatementReader>>, Status> {
        let opt = qo.unwrap_or_default();
        let params = stmt.params();

        let request = PartitionQueryRequest {
            session: self.session_name().to_string(),
            transaction: Some(self.selector()),
            sql: stmt.sql.clone(),
            params: params.clone(),
            param_types: stmt.param_types.clone(),
            partition_options: Some(po),
        };
        let session = &mut self.base_tx.base_tx.session;
        let result = session
            .spanner_client
            .partition_query(request, opt.call_options.cancel.as_ref())
            .await;
        let response = session.invalidate_if_needed(result)?.into_inner();
        tracing::debug!("partition_query partitions={}", response.partitions.len());

        Ok(response
            .partitions
            .into_iter()
            .map(|x| Partition {
                reader: StatementReader {
                    enable_resume: opt.enable_resume,
                    request: ExecuteSqlRequest {
                        session: self.session_name().to_string(),
                        transaction: Some(self.selector()),
                        sql: stmt.sql.clone(),
                        params: params.clone(),
                        param_types: stmt.param_types.clone(),
                        resume_token: vec![],
                        query_mode: opt.mode.into(),
                        partition_token: x.partition_token,
                        seqno: 0,
                        query_options: opt.optimizer_options.clone(),
                        request_options: Transaction::create_request_options(opt.call_options.priority),
                        data_boost_enabled: false,
                        last_statement: false,
                    },
                },
                transaction_id: self.transaction_id.clone(),
            })
            .collect())
    }

    /// execute runs a single Partition obtained from partition_read or partition_query.
    pub async fn execute<T: Reader + Clone>(
        &mut self,
        partition: &Partition<T>,
        option: Option<CallOptions>,
    ) -> Result<RowIterator<'_, T>, Status> {
        partition.execute(&mut self.base_tx.base_tx.session, option).await
    }
}
