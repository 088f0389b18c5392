#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use prost_types::value::Kind;
use prost_types::{Timestamp, Value};

use spanwire::apiv1::spanner_client::Spanner;
use spanwire::client::Client;
use spanwire::reader::{Reader, RowIterator};
use spanwire::row::Row;
use spanwire_gax::grpc::{Code, Response, Status, Streaming};
use spanwire_googleapis::rpc::Status as RpcStatus;
use spanwire_googleapis::spanner::v1::commit_request;
use spanwire_googleapis::spanner::v1::commit_response::{CommitStats, MultiplexedSessionRetry};
use spanwire_googleapis::spanner::v1::mutation::{Operation, Write};
use spanwire_googleapis::spanner::v1::result_set_stats::RowCount;
use spanwire_googleapis::spanner::v1::struct_type::Field;
use spanwire_googleapis::spanner::v1::transaction_options::Mode;
use spanwire_googleapis::spanner::v1::transaction_selector::Selector;
use spanwire_googleapis::spanner::v1::{
    BatchCreateSessionsRequest, BatchCreateSessionsResponse, BatchWriteRequest, BatchWriteResponse,
    BeginTransactionRequest, CommitRequest, CommitResponse, CreateSessionRequest, DeleteSessionRequest,
    ExecuteBatchDmlRequest, ExecuteBatchDmlResponse, ExecuteSqlRequest, GetSessionRequest, KeySet,
    ListSessionsRequest, ListSessionsResponse, MultiplexedSessionPrecommitToken, Mutation, PartialResultSet,
    Partition, PartitionQueryRequest, PartitionReadRequest, PartitionResponse, ReadRequest, ResultSet,
    ResultSetMetadata, ResultSetStats, RollbackRequest, Session, StructType, Transaction, TransactionOptions,
    TransactionSelector, Type, TypeCode,
};

pub const DATABASE: &str = "projects/local-project/instances/test-instance/databases/local-database";
pub const READ_TIMESTAMP_SECONDS: i64 = 1_700_000_000;
pub const COMMIT_TIMESTAMP_SECONDS: i64 = 1_800_000_000;
pub const PARTITION_COUNT: usize = 3;
const BATCH_CREATE_LIMIT: usize = 2;
const LIST_PAGE_SIZE: usize = 2;

#[ctor::ctor]
fn init() {
    let filter = tracing_subscriber::filter::EnvFilter::from_default_env()
        .add_directive("spanwire=trace".parse().unwrap());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub fn string_value(v: impl Into<String>) -> Value {
    Value {
        kind: Some(Kind::StringValue(v.into())),
    }
}

fn null_value() -> Value {
    Value {
        kind: Some(Kind::NullValue(0)),
    }
}

pub fn column_type(code: TypeCode) -> Type {
    Type {
        code: code as i32,
        array_element_type: None,
        struct_type: None,
        type_annotation: 0,
        proto_type_fqn: String::new(),
    }
}

pub fn field(name: &str, ty: Type) -> Field {
    Field {
        name: name.to_string(),
        r#type: Some(ty),
    }
}

pub fn metadata(fields: Vec<Field>) -> ResultSetMetadata {
    ResultSetMetadata {
        row_type: Some(StructType { fields }),
        transaction: None,
        undeclared_parameters: None,
    }
}

/// One response frame of a scripted stream.
pub fn frame(values: Vec<Value>, chunked_value: bool, resume_token: &str) -> PartialResultSet {
    PartialResultSet {
        values,
        chunked_value,
        resume_token: resume_token.as_bytes().to_vec(),
        ..Default::default()
    }
}

fn token(seq_num: i32) -> MultiplexedSessionPrecommitToken {
    MultiplexedSessionPrecommitToken {
        precommit_token: format!("token-{seq_num}").into_bytes(),
        seq_num,
    }
}

fn read_timestamp() -> Timestamp {
    Timestamp {
        seconds: READ_TIMESTAMP_SECONDS,
        nanos: 0,
    }
}

fn to_rpc_status(status: &Status) -> RpcStatus {
    RpcStatus {
        code: status.code() as i32,
        message: status.message().to_string(),
        details: vec![],
    }
}

fn stats(row_count: RowCount) -> ResultSetStats {
    ResultSetStats {
        query_plan: None,
        query_stats: None,
        row_count: Some(row_count),
    }
}

fn stream<T: Send + 'static>(frames: Vec<Result<T, Status>>) -> Streaming<T> {
    Box::pin(async_stream::stream! {
        for frame in frames {
            yield frame;
        }
    })
}

fn not_found(message: String) -> Status {
    Status::new(Code::NotFound, message)
}

fn matches_keys(key_set: &KeySet, row: &[Value]) -> bool {
    key_set.all || key_set.keys.iter().any(|k| k.values.first() == row.first())
}

fn partition_index(partition_token: &[u8]) -> Option<usize> {
    if partition_token.is_empty() {
        return None;
    }
    String::from_utf8_lossy(partition_token)
        .trim_start_matches('p')
        .parse()
        .ok()
}

/// `SELECT * FROM table [WHERE column = @param]`
fn parse_query(sql: &str) -> Option<(String, Option<(String, String)>)> {
    let words: Vec<&str> = sql.split_whitespace().collect();
    match words.as_slice() {
        ["SELECT", "*", "FROM", table] => Some((table.to_string(), None)),
        ["SELECT", "*", "FROM", table, "WHERE", column, "=", param] => Some((
            table.to_string(),
            Some((column.to_string(), param.trim_start_matches('@').to_string())),
        )),
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub struct Table {
    pub columns: Vec<(String, TypeCode)>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    fn column_index(&self, column: &str) -> Result<usize, Status> {
        self.columns
            .iter()
            .position(|(name, _)| name == column)
            .ok_or_else(|| not_found(format!("Column not found: {column}")))
    }

    /// Upserts by the first column.
    fn write(&mut self, write: &Write) -> Result<(), Status> {
        let indexes = write
            .columns
            .iter()
            .map(|c| self.column_index(c))
            .collect::<Result<Vec<usize>, Status>>()?;
        let key_position = indexes
            .iter()
            .position(|i| *i == 0)
            .ok_or_else(|| Status::new(Code::InvalidArgument, "primary key column is required"))?;
        for values in &write.values {
            let key = values
                .values
                .get(key_position)
                .cloned()
                .ok_or_else(|| Status::new(Code::InvalidArgument, "primary key value is required"))?;
            let position = match self.rows.iter().position(|r| r[0] == key) {
                Some(position) => position,
                None => {
                    self.rows.push(vec![null_value(); self.columns.len()]);
                    self.rows.len() - 1
                }
            };
            for (index, value) in indexes.iter().zip(values.values.iter()) {
                self.rows[position][*index] = value.clone();
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum TxKind {
    ReadOnly,
    ReadWrite,
    PartitionedDml,
}

#[derive(Debug)]
struct Tx {
    kind: TxKind,
    multiplexed: bool,
    seq: i32,
    retry_issued: bool,
    finished: bool,
}

/// Requests received by the fake, in arrival order.
#[derive(Clone, Debug, Default)]
pub struct Requests {
    pub create_sessions: Vec<CreateSessionRequest>,
    pub sql: Vec<ExecuteSqlRequest>,
    pub reads: Vec<ReadRequest>,
    pub begins: Vec<BeginTransactionRequest>,
    pub commits: Vec<CommitRequest>,
    pub rollbacks: Vec<RollbackRequest>,
    pub batch_dml: Vec<ExecuteBatchDmlRequest>,
    pub batch_writes: Vec<BatchWriteRequest>,
}

#[derive(Default)]
struct State {
    next_id: u64,
    commit_count: i64,
    sessions: BTreeMap<String, Session>,
    transactions: HashMap<Vec<u8>, Tx>,
    tables: HashMap<String, Table>,
    scripts: HashMap<String, VecDeque<Vec<Result<PartialResultSet, Status>>>>,
    stream_failures: VecDeque<usize>,
    reopen_failures: usize,
    regular_only: bool,
    commit_retry: bool,
    create_delay: Duration,
    requests: Requests,
}

impl State {
    fn session(&self, name: &str) -> Result<&Session, Status> {
        self.sessions
            .get(name)
            .ok_or_else(|| not_found(format!("Session not found: {name}")))
    }

    fn new_session(&mut self, database: &str, template: Option<Session>, multiplexed: bool) -> Session {
        self.next_id += 1;
        let template = template.unwrap_or_default();
        let session = Session {
            name: format!("{database}/sessions/{:04}", self.next_id),
            labels: template.labels,
            create_time: Some(read_timestamp()),
            approximate_last_use_time: None,
            creator_role: template.creator_role,
            multiplexed,
        };
        self.sessions.insert(session.name.clone(), session.clone());
        session
    }

    fn table(&self, name: &str) -> Result<&Table, Status> {
        self.tables
            .get(name)
            .ok_or_else(|| not_found(format!("Table not found: {name}")))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table, Status> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| not_found(format!("Table not found: {name}")))
    }

    fn begin(&mut self, options: &TransactionOptions, multiplexed: bool) -> Transaction {
        self.next_id += 1;
        let id = format!("tx-{}", self.next_id).into_bytes();
        let kind = match options.mode {
            Some(Mode::ReadWrite(_)) => TxKind::ReadWrite,
            Some(Mode::PartitionedDml(_)) => TxKind::PartitionedDml,
            _ => TxKind::ReadOnly,
        };
        let mut tx = Tx {
            kind,
            multiplexed,
            seq: 0,
            retry_issued: false,
            finished: false,
        };
        let precommit_token = if kind == TxKind::ReadWrite && multiplexed {
            tx.seq = 1;
            Some(token(1))
        } else {
            None
        };
        self.transactions.insert(id.clone(), tx);
        Transaction {
            id,
            read_timestamp: (kind == TxKind::ReadOnly).then(read_timestamp),
            precommit_token,
        }
    }

    fn live_transaction(&mut self, id: &[u8]) -> Result<&mut Tx, Status> {
        match self.transactions.get_mut(id) {
            Some(tx) if !tx.finished => Ok(tx),
            _ => Err(not_found("Transaction not found".to_string())),
        }
    }

    /// The transaction a request runs in, and the transaction to report in the response metadata.
    fn resolve(
        &mut self,
        selector: &Option<TransactionSelector>,
        multiplexed: bool,
    ) -> Result<(Option<Vec<u8>>, Option<Transaction>), Status> {
        match selector.as_ref().and_then(|s| s.selector.as_ref()) {
            Some(Selector::Begin(options)) => {
                let tx = self.begin(options, multiplexed);
                Ok((Some(tx.id.clone()), Some(tx)))
            }
            Some(Selector::Id(id)) => {
                self.live_transaction(id)?;
                Ok((Some(id.clone()), None))
            }
            _ => Ok((
                None,
                Some(Transaction {
                    id: vec![],
                    read_timestamp: Some(read_timestamp()),
                    precommit_token: None,
                }),
            )),
        }
    }

    fn next_token(&mut self, tx_id: Option<&Vec<u8>>) -> Option<MultiplexedSessionPrecommitToken> {
        let tx = self.transactions.get_mut(tx_id?)?;
        if tx.kind != TxKind::ReadWrite || !tx.multiplexed {
            return None;
        }
        tx.seq += 1;
        Some(token(tx.seq))
    }

    fn require_dml(&self, tx_id: Option<&Vec<u8>>) -> Result<TxKind, Status> {
        match tx_id.and_then(|id| self.transactions.get(id)).map(|tx| tx.kind) {
            Some(kind) if kind != TxKind::ReadOnly => Ok(kind),
            _ => Err(Status::new(
                Code::FailedPrecondition,
                "DML requires a read-write transaction",
            )),
        }
    }

    fn dml(&mut self, sql: &str) -> Result<i64, Status> {
        if sql.contains("FAIL") {
            return Err(Status::new(Code::InvalidArgument, format!("statement failed: {sql}")));
        }
        let words: Vec<&str> = sql.split_whitespace().collect();
        match words.as_slice() {
            ["DELETE", "FROM", table, ..] => {
                let table = self.table_mut(table)?;
                let count = table.rows.len() as i64;
                table.rows.clear();
                Ok(count)
            }
            ["UPDATE", table, ..] => Ok(self.table(table)?.rows.len() as i64),
            _ => Err(Status::new(Code::InvalidArgument, format!("unsupported statement: {sql}"))),
        }
    }

    /// Applies every mutation or none of them.
    fn apply(&mut self, mutations: &[Mutation]) -> Result<(), Status> {
        for mutation in mutations {
            let table = match &mutation.operation {
                Some(
                    Operation::Insert(w) | Operation::Update(w) | Operation::InsertOrUpdate(w) | Operation::Replace(w),
                ) => &w.table,
                Some(Operation::Delete(d)) => &d.table,
                None => return Err(Status::new(Code::InvalidArgument, "empty mutation")),
            };
            self.table(table)?;
        }
        for mutation in mutations {
            match &mutation.operation {
                Some(
                    Operation::Insert(w) | Operation::Update(w) | Operation::InsertOrUpdate(w) | Operation::Replace(w),
                ) => self.table_mut(&w.table)?.write(w)?,
                Some(Operation::Delete(d)) => {
                    let key_set = d.key_set.clone().unwrap_or_default();
                    self.table_mut(&d.table)?
                        .rows
                        .retain(|row| !matches_keys(&key_set, row));
                }
                None => {}
            }
        }
        Ok(())
    }

    /// One frame per row, each with a resume token naming the rows delivered so far.
    #[allow(clippy::too_many_arguments)]
    fn scan(
        &mut self,
        table_name: &str,
        columns: &[String],
        keys: Option<&KeySet>,
        filter: Option<(String, Value)>,
        partition_token: &[u8],
        resume_token: &[u8],
        tx_id: Option<Vec<u8>>,
        begun: Option<Transaction>,
    ) -> Result<Vec<Result<PartialResultSet, Status>>, Status> {
        let (fields, rows) = {
            let table = self.table(table_name)?;
            let projection = if columns.is_empty() {
                (0..table.columns.len()).collect()
            } else {
                columns
                    .iter()
                    .map(|c| table.column_index(c))
                    .collect::<Result<Vec<usize>, Status>>()?
            };
            let filter = match filter {
                Some((column, value)) => Some((table.column_index(&column)?, value)),
                None => None,
            };
            let partition = partition_index(partition_token);
            let fields: Vec<Field> = projection
                .iter()
                .map(|i| field(&table.columns[*i].0, column_type(table.columns[*i].1)))
                .collect();
            let rows: Vec<Vec<Value>> = table
                .rows
                .iter()
                .enumerate()
                .filter(|(i, _)| partition.map(|p| i % PARTITION_COUNT == p).unwrap_or(true))
                .filter(|(_, row)| keys.map(|k| matches_keys(k, row)).unwrap_or(true))
                .filter(|(_, row)| filter.as_ref().map(|(i, v)| row[*i] == *v).unwrap_or(true))
                .map(|(_, row)| projection.iter().map(|i| row[*i].clone()).collect())
                .collect();
            (fields, rows)
        };

        let start: usize = if resume_token.is_empty() {
            0
        } else {
            String::from_utf8_lossy(resume_token).parse().unwrap_or(0)
        };
        let mut first_metadata = if resume_token.is_empty() {
            let mut metadata = metadata(fields);
            metadata.transaction = begun;
            Some(metadata)
        } else {
            None
        };

        let mut frames = vec![];
        for (i, row) in rows.into_iter().enumerate().skip(start) {
            frames.push(Ok(PartialResultSet {
                metadata: first_metadata.take(),
                values: row,
                resume_token: (i + 1).to_string().into_bytes(),
                precommit_token: self.next_token(tx_id.as_ref()),
                ..Default::default()
            }));
        }
        if frames.is_empty() {
            frames.push(Ok(PartialResultSet {
                metadata: first_metadata.take(),
                precommit_token: self.next_token(tx_id.as_ref()),
                ..Default::default()
            }));
        }
        if let Some(after) = self.stream_failures.pop_front() {
            frames.truncate(after);
            frames.push(Err(Status::new(Code::Unavailable, "connection reset")));
        }
        Ok(frames)
    }

    fn refuse_reopen(&mut self, resume_token: &[u8]) -> Result<(), Status> {
        if !resume_token.is_empty() && self.reopen_failures > 0 {
            self.reopen_failures -= 1;
            return Err(Status::new(Code::Unavailable, "connection refused"));
        }
        Ok(())
    }

    fn partitions(&mut self, session: &str, selector: &Option<TransactionSelector>) -> Result<PartitionResponse, Status> {
        self.session(session)?;
        match selector.as_ref().and_then(|s| s.selector.as_ref()) {
            Some(Selector::Id(id)) => {
                if self.live_transaction(id)?.kind != TxKind::ReadOnly {
                    return Err(Status::new(Code::FailedPrecondition, "partitions require a read-only transaction"));
                }
            }
            _ => {
                return Err(Status::new(
                    Code::InvalidArgument,
                    "partitions require a read-only transaction id",
                ))
            }
        }
        Ok(PartitionResponse {
            partitions: (0..PARTITION_COUNT)
                .map(|i| Partition {
                    partition_token: format!("p{i}").into_bytes(),
                })
                .collect(),
            transaction: None,
        })
    }

    fn commit_timestamp(&mut self) -> Timestamp {
        self.commit_count += 1;
        Timestamp {
            seconds: COMMIT_TIMESTAMP_SECONDS + self.commit_count,
            nanos: 0,
        }
    }
}

/// In-memory Spanner.
///
/// Tables use their first column as the primary key. Queries of the form
/// `SELECT * FROM table [WHERE column = @param]` scan tables, any other query must be scripted.
/// DML understands `UPDATE table ...` (counts the rows) and `DELETE FROM table ...` (clears the
/// table). A statement containing `FAIL` fails.
#[derive(Default)]
pub struct FakeSpanner {
    state: Mutex<State>,
}

impl FakeSpanner {
    pub fn new() -> Arc<FakeSpanner> {
        Arc::new(FakeSpanner::default())
    }

    pub fn create_table(&self, name: &str, columns: &[(&str, TypeCode)]) {
        self.state.lock().tables.insert(
            name.to_string(),
            Table {
                columns: columns.iter().map(|(n, t)| (n.to_string(), *t)).collect(),
                rows: vec![],
            },
        );
    }

    pub fn insert_row(&self, table: &str, values: Vec<Value>) {
        if let Some(table) = self.state.lock().tables.get_mut(table) {
            table.rows.push(values);
        }
    }

    pub fn rows(&self, table: &str) -> Vec<Vec<Value>> {
        self.state
            .lock()
            .tables
            .get(table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }

    /// The next execution of `sql` streams `frames`. Scripts for the same statement are used in order.
    pub fn script(&self, sql: &str, frames: Vec<Result<PartialResultSet, Status>>) {
        self.state
            .lock()
            .scripts
            .entry(sql.to_string())
            .or_default()
            .push_back(frames);
    }

    /// The next table scans break with UNAVAILABLE after the given number of rows, one entry per stream.
    pub fn fail_streams(&self, after: Vec<usize>) {
        self.state.lock().stream_failures.extend(after);
    }

    /// The next `count` requests that carry a resume token are refused with UNAVAILABLE.
    pub fn fail_reopens(&self, count: usize) {
        self.state.lock().reopen_failures = count;
    }

    /// Sessions are created regular even when multiplexed ones are requested.
    pub fn set_regular_only(&self, regular_only: bool) {
        self.state.lock().regular_only = regular_only;
    }

    /// The first commit of every multiplexed read-write transaction answers with a newer precommit token.
    pub fn set_commit_retry(&self, commit_retry: bool) {
        self.state.lock().commit_retry = commit_retry;
    }

    /// Every CreateSession call takes `delay` before it answers.
    pub fn set_create_delay(&self, delay: Duration) {
        self.state.lock().create_delay = delay;
    }

    /// Forgets a session as if the server had garbage collected it.
    pub fn expire_session(&self, name: &str) {
        self.state.lock().sessions.remove(name);
    }

    pub fn session_names(&self) -> Vec<String> {
        self.state.lock().sessions.keys().cloned().collect()
    }

    pub fn requests(&self) -> Requests {
        self.state.lock().requests.clone()
    }
}

#[async_trait]
impl Spanner for FakeSpanner {
    async fn create_session(&self, req: CreateSessionRequest) -> Result<Response<Session>, Status> {
        let delay = self.state.lock().create_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.state.lock();
        state.requests.create_sessions.push(req.clone());
        let multiplexed = req.session.as_ref().map(|s| s.multiplexed).unwrap_or(false) && !state.regular_only;
        Ok(Response::new(state.new_session(&req.database, req.session, multiplexed)))
    }

    async fn batch_create_sessions(
        &self,
        req: BatchCreateSessionsRequest,
    ) -> Result<Response<BatchCreateSessionsResponse>, Status> {
        let mut state = self.state.lock();
        let count = (req.session_count as usize).min(BATCH_CREATE_LIMIT);
        let session = (0..count)
            .map(|_| state.new_session(&req.database, req.session_template.clone(), false))
            .collect();
        Ok(Response::new(BatchCreateSessionsResponse { session }))
    }

    async fn get_session(&self, req: GetSessionRequest) -> Result<Response<Session>, Status> {
        let state = self.state.lock();
        Ok(Response::new(state.session(&req.name)?.clone()))
    }

    async fn list_sessions(&self, req: ListSessionsRequest) -> Result<Response<ListSessionsResponse>, Status> {
        let state = self.state.lock();
        let offset: usize = req.page_token.parse().unwrap_or(0);
        let all: Vec<&Session> = state
            .sessions
            .values()
            .filter(|s| s.name.starts_with(&req.database))
            .collect();
        let sessions = all.iter().skip(offset).take(LIST_PAGE_SIZE).map(|s| (*s).clone()).collect();
        let next = offset + LIST_PAGE_SIZE;
        Ok(Response::new(ListSessionsResponse {
            sessions,
            next_page_token: if next < all.len() { next.to_string() } else { String::new() },
        }))
    }

    async fn delete_session(&self, req: DeleteSessionRequest) -> Result<Response<()>, Status> {
        let mut state = self.state.lock();
        match state.sessions.remove(&req.name) {
            Some(_) => Ok(Response::new(())),
            None => Err(not_found(format!("Session not found: {}", req.name))),
        }
    }

    async fn execute_sql(&self, req: ExecuteSqlRequest) -> Result<Response<ResultSet>, Status> {
        let mut state = self.state.lock();
        state.requests.sql.push(req.clone());
        state.refuse_reopen(&req.resume_token)?;
        let multiplexed = state.session(&req.session)?.multiplexed;
        let (tx_id, begun) = state.resolve(&req.transaction, multiplexed)?;
        let kind = state.require_dml(tx_id.as_ref())?;
        let count = state.dml(&req.sql)?;
        let row_count = if kind == TxKind::PartitionedDml {
            RowCount::RowCountLowerBound(count)
        } else {
            RowCount::RowCountExact(count)
        };
        Ok(Response::new(ResultSet {
            metadata: begun.map(|tx| ResultSetMetadata {
                row_type: Some(StructType::default()),
                transaction: Some(tx),
                undeclared_parameters: None,
            }),
            rows: vec![],
            stats: Some(stats(row_count)),
            precommit_token: state.next_token(tx_id.as_ref()),
        }))
    }

    async fn execute_streaming_sql(
        &self,
        req: ExecuteSqlRequest,
    ) -> Result<Response<Streaming<PartialResultSet>>, Status> {
        let mut state = self.state.lock();
        state.requests.sql.push(req.clone());
        state.refuse_reopen(&req.resume_token)?;
        let multiplexed = state.session(&req.session)?.multiplexed;
        let (tx_id, begun) = state.resolve(&req.transaction, multiplexed)?;

        if let Some(mut frames) = state.scripts.get_mut(&req.sql).and_then(|s| s.pop_front()) {
            if let Some(Ok(first)) = frames.first_mut() {
                if let Some(metadata) = first.metadata.as_mut() {
                    if metadata.transaction.is_none() {
                        metadata.transaction = begun;
                    }
                }
            }
            return Ok(Response::new(stream(frames)));
        }

        let (table, filter) = parse_query(&req.sql)
            .ok_or_else(|| Status::new(Code::InvalidArgument, format!("unsupported query: {}", req.sql)))?;
        let filter = match filter {
            Some((column, param)) => {
                let value = req
                    .params
                    .as_ref()
                    .and_then(|p| p.fields.get(&param))
                    .cloned()
                    .ok_or_else(|| Status::new(Code::InvalidArgument, format!("missing parameter {param}")))?;
                Some((column, value))
            }
            None => None,
        };
        let frames = state.scan(
            &table,
            &[],
            None,
            filter,
            &req.partition_token,
            &req.resume_token,
            tx_id,
            begun,
        )?;
        Ok(Response::new(stream(frames)))
    }

    async fn execute_batch_dml(&self, req: ExecuteBatchDmlRequest) -> Result<Response<ExecuteBatchDmlResponse>, Status> {
        let mut state = self.state.lock();
        state.requests.batch_dml.push(req.clone());
        let multiplexed = state.session(&req.session)?.multiplexed;
        let (tx_id, _) = state.resolve(&req.transaction, multiplexed)?;
        state.require_dml(tx_id.as_ref())?;

        let mut result_sets = vec![];
        let mut status = RpcStatus {
            code: Code::Ok as i32,
            message: String::new(),
            details: vec![],
        };
        for statement in &req.statements {
            match state.dml(&statement.sql) {
                Ok(count) => result_sets.push(ResultSet {
                    metadata: None,
                    rows: vec![],
                    stats: Some(stats(RowCount::RowCountExact(count))),
                    precommit_token: None,
                }),
                Err(e) => {
                    status = to_rpc_status(&e);
                    break;
                }
            }
        }
        Ok(Response::new(ExecuteBatchDmlResponse {
            result_sets,
            status: Some(status),
            precommit_token: state.next_token(tx_id.as_ref()),
        }))
    }

    async fn read(&self, _req: ReadRequest) -> Result<Response<ResultSet>, Status> {
        Err(Status::new(Code::Unimplemented, "use streaming_read"))
    }

    async fn streaming_read(&self, req: ReadRequest) -> Result<Response<Streaming<PartialResultSet>>, Status> {
        let mut state = self.state.lock();
        state.requests.reads.push(req.clone());
        state.refuse_reopen(&req.resume_token)?;
        let multiplexed = state.session(&req.session)?.multiplexed;
        let (tx_id, begun) = state.resolve(&req.transaction, multiplexed)?;
        let frames = state.scan(
            &req.table,
            &req.columns,
            req.key_set.as_ref(),
            None,
            &req.partition_token,
            &req.resume_token,
            tx_id,
            begun,
        )?;
        Ok(Response::new(stream(frames)))
    }

    async fn begin_transaction(&self, req: BeginTransactionRequest) -> Result<Response<Transaction>, Status> {
        let mut state = self.state.lock();
        state.requests.begins.push(req.clone());
        let multiplexed = state.session(&req.session)?.multiplexed;
        let options = req.options.unwrap_or_default();
        Ok(Response::new(state.begin(&options, multiplexed)))
    }

    async fn commit(&self, req: CommitRequest) -> Result<Response<CommitResponse>, Status> {
        let mut state = self.state.lock();
        state.requests.commits.push(req.clone());
        state.session(&req.session)?;
        match &req.transaction {
            Some(commit_request::Transaction::TransactionId(id)) => {
                let commit_retry = state.commit_retry;
                let tx = state.live_transaction(id)?;
                if tx.kind != TxKind::ReadWrite {
                    return Err(Status::new(Code::FailedPrecondition, "transaction is not read-write"));
                }
                if tx.multiplexed {
                    if commit_retry && !tx.retry_issued {
                        tx.retry_issued = true;
                        tx.seq += 1;
                        return Ok(Response::new(CommitResponse {
                            commit_timestamp: None,
                            commit_stats: None,
                            snapshot_timestamp: None,
                            multiplexed_session_retry: Some(MultiplexedSessionRetry::PrecommitToken(token(tx.seq))),
                        }));
                    }
                    let seq = req.precommit_token.as_ref().map(|t| t.seq_num).unwrap_or(0);
                    if seq < tx.seq {
                        tx.finished = true;
                        return Err(Status::new(
                            Code::Aborted,
                            format!("stale precommit token {seq} < {}", tx.seq),
                        ));
                    }
                }
                tx.finished = true;
            }
            Some(commit_request::Transaction::SingleUseTransaction(_)) => {}
            None => return Err(Status::new(Code::InvalidArgument, "transaction is required")),
        }
        state.apply(&req.mutations)?;
        Ok(Response::new(CommitResponse {
            commit_timestamp: Some(state.commit_timestamp()),
            commit_stats: req.return_commit_stats.then(|| CommitStats {
                mutation_count: req.mutations.len() as i64,
            }),
            snapshot_timestamp: None,
            multiplexed_session_retry: None,
        }))
    }

    async fn rollback(&self, req: RollbackRequest) -> Result<Response<()>, Status> {
        let mut state = self.state.lock();
        state.requests.rollbacks.push(req.clone());
        state.session(&req.session)?;
        state.live_transaction(&req.transaction_id)?.finished = true;
        Ok(Response::new(()))
    }

    async fn partition_query(&self, req: PartitionQueryRequest) -> Result<Response<PartitionResponse>, Status> {
        let mut state = self.state.lock();
        if parse_query(&req.sql).is_none() {
            return Err(Status::new(Code::InvalidArgument, format!("query is not partitionable: {}", req.sql)));
        }
        Ok(Response::new(state.partitions(&req.session, &req.transaction)?))
    }

    async fn partition_read(&self, req: PartitionReadRequest) -> Result<Response<PartitionResponse>, Status> {
        let mut state = self.state.lock();
        state.table(&req.table)?;
        Ok(Response::new(state.partitions(&req.session, &req.transaction)?))
    }

    async fn batch_write(&self, req: BatchWriteRequest) -> Result<Response<Streaming<BatchWriteResponse>>, Status> {
        let mut state = self.state.lock();
        state.requests.batch_writes.push(req.clone());
        state.session(&req.session)?;
        let mut committed = vec![];
        let mut frames = vec![];
        for (i, group) in req.mutation_groups.iter().enumerate() {
            match state.apply(&group.mutations) {
                Ok(()) => committed.push(i as i32),
                Err(e) => frames.push(Ok(BatchWriteResponse {
                    indexes: vec![i as i32],
                    status: Some(to_rpc_status(&e)),
                    commit_timestamp: None,
                })),
            }
        }
        if !committed.is_empty() {
            let commit_timestamp = state.commit_timestamp();
            frames.insert(
                0,
                Ok(BatchWriteResponse {
                    indexes: committed,
                    status: Some(RpcStatus {
                        code: Code::Ok as i32,
                        message: String::new(),
                        details: vec![],
                    }),
                    commit_timestamp: Some(commit_timestamp),
                }),
            );
        }
        Ok(Response::new(stream(frames)))
    }
}

pub const USER_COLUMNS: [&str; 3] = ["UserId", "Name", "Score"];

/// Creates `User(UserId STRING, Name STRING, Score INT64)` with users `user00`.. and scores 0..
pub fn user_table(fake: &FakeSpanner, count: usize) {
    fake.create_table(
        "User",
        &[
            ("UserId", TypeCode::String),
            ("Name", TypeCode::String),
            ("Score", TypeCode::Int64),
        ],
    );
    for i in 0..count {
        fake.insert_row(
            "User",
            vec![
                string_value(user_id(i)),
                string_value(format!("name-{i}")),
                string_value(i.to_string()),
            ],
        );
    }
}

pub fn user_id(i: usize) -> String {
    format!("user{i:02}")
}

pub async fn new_client(fake: &Arc<FakeSpanner>) -> Client {
    Client::new(DATABASE, fake.clone(), None).await.unwrap()
}

pub async fn all_rows<T: Reader>(mut iter: RowIterator<'_, T>) -> Result<Vec<Row>, Status> {
    let mut rows = vec![];
    while let Some(row) = iter.next().await? {
        rows.push(row);
    }
    Ok(rows)
}

pub fn user_ids(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .map(|row| row.column_by_name::<String>("UserId").unwrap())
        .collect()
}
