use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use time::OffsetDateTime;

use spanwire_gax::cancel::CancellationToken;
use spanwire_gax::grpc::Status;
use spanwire_googleapis::spanner::v1::execute_sql_request::{QueryMode, QueryOptions as ExecuteQueryOptions};
use spanwire_googleapis::spanner::v1::request_options::Priority;
use spanwire_googleapis::spanner::v1::transaction_selector::Selector;
use spanwire_googleapis::spanner::v1::{
    ExecuteSqlRequest, MultiplexedSessionPrecommitToken, ReadRequest, RequestOptions,
    Transaction as InternalTransaction, TransactionSelector,
};

use crate::key::{Key, KeySet};
use crate::reader::{RowIterator, StatementReader, TableReader};
use crate::row::Row;
use crate::session::SessionHandle;
use crate::statement::Statement;
use crate::value::from_timestamp;

#[derive(Clone, Default, Debug)]
pub struct CallOptions {
    /// Priority is the RPC priority to use for the operation.
    pub priority: Option<Priority>,
    /// Abandons the call, or the stream it opens, once cancelled.
    pub cancel: Option<CancellationToken>,
}

#[derive(Clone, Default, Debug)]
pub struct ReadOptions {
    /// The index to use for reading. If non-empty, you can only read columns
    /// that are part of the index key, part of the primary key, or stored in the
    /// index due to a STORING clause in the index definition.
    pub index: String,

    /// The maximum number of rows to read. A limit value less than 1 means no limit.
    pub limit: i64,

    pub call_options: CallOptions,
}

#[derive(Clone, Debug)]
pub struct QueryOptions {
    pub mode: QueryMode,
    pub optimizer_options: Option<ExecuteQueryOptions>,
    pub call_options: CallOptions,
    /// Resume the stream from the last resume token after a transport error.
    pub enable_resume: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        QueryOptions {
            mode: QueryMode::Normal,
            optimizer_options: None,
            call_options: CallOptions::default(),
            enable_resume: true,
        }
    }
}

/// Keeps the precommit token with the highest sequence number seen so far.
///
/// Responses of a read-write transaction on a multiplexed session can arrive in any order,
/// and the commit must carry the newest token. Safe to share between concurrent requests.
#[derive(Debug, Default)]
pub struct PrecommitTokenTracker {
    latest: Mutex<Option<MultiplexedSessionPrecommitToken>>,
}

impl PrecommitTokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a token. It replaces the retained one only when its `seq_num` is strictly greater.
    pub fn observe(&self, token: Option<&MultiplexedSessionPrecommitToken>) {
        let token = match token {
            Some(token) => token,
            None => return,
        };
        let mut latest = self.latest.lock();
        match latest.as_ref() {
            Some(current) if current.seq_num >= token.seq_num => {}
            _ => {
                tracing::trace!("precommit token seq_num={}", token.seq_num);
                *latest = Some(token.clone());
            }
        }
    }

    pub fn latest(&self) -> Option<MultiplexedSessionPrecommitToken> {
        self.latest.lock().clone()
    }
}

#[derive(Debug)]
struct TransactionState {
    selector: TransactionSelector,
    read_timestamp: Option<OffsetDateTime>,
}

/// Transaction state shared by the transaction and the streams it opened.
///
/// A `Begin` selector is replaced by `Id` as soon as any response reports the new
/// transaction, so every later request joins the same transaction.
#[derive(Clone, Debug)]
pub(crate) struct TransactionContext {
    state: Arc<Mutex<TransactionState>>,
    precommit: Arc<PrecommitTokenTracker>,
}

impl TransactionContext {
    pub(crate) fn new(selector: Selector) -> Self {
        Self {
            state: Arc::new(Mutex::new(TransactionState {
                selector: TransactionSelector {
                    selector: Some(selector),
                },
                read_timestamp: None,
            })),
            precommit: Arc::new(PrecommitTokenTracker::new()),
        }
    }

    pub(crate) fn selector(&self) -> TransactionSelector {
        self.state.lock().selector.clone()
    }

    pub(crate) fn is_begin(&self) -> bool {
        matches!(self.state.lock().selector.selector, Some(Selector::Begin(_)))
    }

    pub(crate) fn observe_transaction(&self, tx: &InternalTransaction) {
        {
            let mut state = self.state.lock();
            if !tx.id.is_empty() && matches!(state.selector.selector, Some(Selector::Begin(_))) {
                tracing::debug!("transaction begun inline");
                state.selector.selector = Some(Selector::Id(tx.id.clone()));
            }
            if let Some(ts) = tx.read_timestamp.as_ref() {
                state.read_timestamp = from_timestamp(ts);
            }
        }
        self.precommit.observe(tx.precommit_token.as_ref());
    }

    pub(crate) fn observe_precommit_token(&self, token: Option<&MultiplexedSessionPrecommitToken>) {
        self.precommit.observe(token)
    }

    pub(crate) fn precommit_token(&self) -> Option<MultiplexedSessionPrecommitToken> {
        self.precommit.latest()
    }

    pub(crate) fn transaction_id(&self) -> Option<Vec<u8>> {
        match &self.state.lock().selector.selector {
            Some(Selector::Id(id)) => Some(id.clone()),
            _ => None,
        }
    }

    pub(crate) fn read_timestamp(&self) -> Option<OffsetDateTime> {
        self.state.lock().read_timestamp
    }
}

pub struct Transaction {
    pub(crate) session: SessionHandle,
    /// Session named in requests. Differs from `session` only for a re-attached batch transaction.
    pub(crate) session_name: String,
    pub(crate) sequence_number: AtomicI64,
    pub(crate) context: TransactionContext,
}

impl Transaction {
    pub(crate) fn new(session: SessionHandle, selector: Selector) -> Self {
        Transaction {
            session_name: session.session.name.clone(),
            session,
            sequence_number: AtomicI64::new(0),
            context: TransactionContext::new(selector),
        }
    }

    pub(crate) fn create_request_options(priority: Option<Priority>) -> Option<RequestOptions> {
        priority.map(|s| RequestOptions {
            priority: s.into(),
            request_tag: "".to_string(),
            transaction_tag: "".to_string(),
        })
    }

    /// Next value of the per-transaction DML sequence number.
    pub(crate) fn next_seqno(&self) -> i64 {
        self.sequence_number.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    pub(crate) fn selector(&self) -> TransactionSelector {
        self.context.selector()
    }

    /// query executes a query against the database. It returns a RowIterator for retrieving the resulting rows.
    pub async fn query(&mut self, statement: Statement) -> Result<RowIterator<'_, StatementReader>, Status> {
        self.query_with_option(statement, QueryOptions::default()).await
    }

    /// query_with_option executes a query against the database with the given options.
    pub async fn query_with_option(
        &mut self,
        statement: Statement,
        options: QueryOptions,
    ) -> Result<RowIterator<'_, StatementReader>, Status> {
        let params = statement.params();
        let request = ExecuteSqlRequest {
            session: self.session_name().to_string(),
            transaction: Some(self.selector()),
            sql: statement.sql,
            params,
            param_types: statement.param_types,
            resume_token: vec![],
            query_mode: options.mode.into(),
            partition_token: vec![],
            seqno: 0,
            query_options: options.optimizer_options,
            request_options: Transaction::create_request_options(options.call_options.priority),
            data_boost_enabled: false,
            last_statement: false,
        };
        let reader = StatementReader {
            enable_resume: options.enable_resume,
            request,
        };
        RowIterator::new(&mut self.session, reader, self.context.clone(), Some(options.call_options)).await
    }

    /// read returns a RowIterator for reading multiple rows from the database.
    pub async fn read(
        &mut self,
        table: &str,
        columns: &[&str],
        key_set: impl Into<KeySet>,
    ) -> Result<RowIterator<'_, TableReader>, Status> {
        self.read_with_option(table, columns, key_set, ReadOptions::default()).await
    }

    /// read_with_option returns a RowIterator for reading multiple rows from the database.
    pub async fn read_with_option(
        &mut self,
        table: &str,
        columns: &[&str],
        key_set: impl Into<KeySet>,
        options: ReadOptions,
    ) -> Result<RowIterator<'_, TableReader>, Status> {
        let request = ReadRequest {
            session: self.session_name().to_string(),
            transaction: Some(self.selector()),
            table: table.to_string(),
            index: options.index,
            columns: columns.iter().map(|x| x.to_string()).collect(),
            key_set: Some(key_set.into().into()),
            limit: options.limit,
            resume_token: vec![],
            partition_token: vec![],
            request_options: Transaction::create_request_options(options.call_options.priority),
            data_boost_enabled: false,
        };
        let reader = TableReader { request };
        RowIterator::new(&mut self.session, reader, self.context.clone(), Some(options.call_options)).await
    }

    /// read_row reads a single row from the database.
    ///
    /// If the row does not exist, read_row returns Ok(None).
    pub async fn read_row(&mut self, table: &str, columns: &[&str], key: Key) -> Result<Option<Row>, Status> {
        self.read_row_with_option(table, columns, key, ReadOptions::default()).await
    }

    /// read_row_with_option reads a single row from the database.
    pub async fn read_row_with_option(
        &mut self,
        table: &str,
        columns: &[&str],
        key: Key,
        options: ReadOptions,
    ) -> Result<Option<Row>, Status> {
        let mut reader = self.read_with_option(table, columns, key, options).await?;
        reader.next().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use spanwire_googleapis::spanner::v1::transaction_options::{Mode, ReadWrite};
    use spanwire_googleapis::spanner::v1::transaction_selector::Selector;
    use spanwire_googleapis::spanner::v1::{
        MultiplexedSessionPrecommitToken, Transaction as InternalTransaction, TransactionOptions,
    };

    use crate::transaction::{PrecommitTokenTracker, TransactionContext};

    fn token(seq_num: i32) -> MultiplexedSessionPrecommitToken {
        MultiplexedSessionPrecommitToken {
            precommit_token: format!("token-{seq_num}").into_bytes(),
            seq_num,
        }
    }

    #[test]
    fn test_tracker_keeps_highest_seq_num() {
        let tracker = PrecommitTokenTracker::new();
        assert!(tracker.latest().is_none());
        for seq in [3, 1, 5, 2] {
            tracker.observe(Some(&token(seq)));
        }
        tracker.observe(None);
        let latest = tracker.latest().unwrap();
        assert_eq!(latest.seq_num, 5);
        assert_eq!(latest.precommit_token, b"token-5".to_vec());

        // equal seq_num does not replace
        tracker.observe(Some(&MultiplexedSessionPrecommitToken {
            precommit_token: b"other".to_vec(),
            seq_num: 5,
        }));
        assert_eq!(tracker.latest().unwrap().precommit_token, b"token-5".to_vec());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_tracker_concurrent() {
        let tracker = Arc::new(PrecommitTokenTracker::new());
        let mut tasks = vec![];
        for seq in (1..=200).rev() {
            let tracker = tracker.clone();
            tasks.push(tokio::spawn(async move {
                tracker.observe(Some(&token(seq)));
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(tracker.latest().unwrap().seq_num, 200);
    }

    #[test]
    fn test_begin_selector_resolves_to_id() {
        let options = TransactionOptions {
            exclude_txn_from_change_streams: false,
            mode: Some(Mode::ReadWrite(ReadWrite::default())),
        };
        let context = TransactionContext::new(Selector::Begin(options));
        assert!(context.is_begin());
        assert!(context.transaction_id().is_none());

        context.observe_transaction(&InternalTransaction {
            id: vec![],
            read_timestamp: None,
            precommit_token: None,
        });
        assert!(context.is_begin());

        context.observe_transaction(&InternalTransaction {
            id: b"tx1".to_vec(),
            read_timestamp: Some(prost_types::Timestamp { seconds: 10, nanos: 0 }),
            precommit_token: Some(token(1)),
        });
        assert!(!context.is_begin());
        assert_eq!(context.transaction_id().unwrap(), b"tx1".to_vec());
        assert_eq!(context.read_timestamp().unwrap().unix_timestamp(), 10);
        assert_eq!(context.precommit_token().unwrap().seq_num, 1);

        // later transactions never replace the resolved id
        context.observe_transaction(&InternalTransaction {
            id: b"tx2".to_vec(),
            read_timestamp: None,
            precommit_token: None,
        });
        assert_eq!(context.transaction_id().unwrap(), b"tx1".to_vec());
        assert!(matches!(context.selector().selector, Some(Selector::Id(_))));
    }
}
