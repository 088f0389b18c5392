use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use futures_util::StreamExt;
use prost::Message;
use prost_types::{value::Kind, ListValue, Value};
use tokio::select;

use spanwire_gax::cancel::CancellationToken;
use spanwire_gax::grpc::{cancelled, protocol_violation, Code, Response, Status, Streaming};
use spanwire_googleapis::spanner::v1::result_set_stats::RowCount;
use spanwire_googleapis::spanner::v1::struct_type::Field;
use spanwire_googleapis::spanner::v1::{
    ExecuteSqlRequest, PartialResultSet, ReadRequest, ResultSetMetadata, ResultSetStats, TransactionSelector, Type,
    TypeCode,
};

use crate::row::Row;
use crate::session::SessionHandle;
use crate::transaction::{CallOptions, TransactionContext};

const DEFAULT_MAX_BYTES_BETWEEN_RESUME_TOKENS: usize = 128 * 1024 * 1024;
const DEFAULT_MAX_RESUME_ATTEMPTS: usize = 5;

/// Limits applied to every streaming read and query.
#[derive(Clone, Debug)]
pub struct StreamConfig {
    /// Frames received after the last resume token are held back until this many bytes
    /// accumulate. Past it the stream can no longer be resumed and frames flow through.
    pub max_bytes_between_resume_tokens: usize,
    /// Consecutive resumes allowed without a new resume token in between.
    pub max_resume_attempts: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            max_bytes_between_resume_tokens: DEFAULT_MAX_BYTES_BETWEEN_RESUME_TOKENS,
            max_resume_attempts: DEFAULT_MAX_RESUME_ATTEMPTS,
        }
    }
}

pub trait Reader: Send + Sync {
    fn read(
        &self,
        session: &mut SessionHandle,
        option: Option<CallOptions>,
    ) -> impl std::future::Future<Output = Result<Response<Streaming<PartialResultSet>>, Status>> + Send;

    fn update_token(&mut self, resume_token: Vec<u8>);

    /// Replaces the selector sent when the stream is re-opened.
    fn update_transaction(&mut self, selector: TransactionSelector);

    fn can_resume(&self) -> bool;
}

#[derive(Clone, Debug)]
pub struct StatementReader {
    pub enable_resume: bool,
    pub request: ExecuteSqlRequest,
}

impl Reader for StatementReader {
    async fn read(
        &self,
        session: &mut SessionHandle,
        option: Option<CallOptions>,
    ) -> Result<Response<Streaming<PartialResultSet>>, Status> {
        let option = option.unwrap_or_default();
        let result = session
            .spanner_client
            .execute_streaming_sql(self.request.clone(), option.cancel.as_ref())
            .await;
        session.invalidate_if_needed(result)
    }

    fn update_token(&mut self, resume_token: Vec<u8>) {
        self.request.resume_token = resume_token;
    }

    fn update_transaction(&mut self, selector: TransactionSelector) {
        self.request.transaction = Some(selector);
    }

    fn can_resume(&self) -> bool {
        self.enable_resume && !self.request.resume_token.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct TableReader {
    pub request: ReadRequest,
}

impl Reader for TableReader {
    async fn read(
        &self,
        session: &mut SessionHandle,
        option: Option<CallOptions>,
    ) -> Result<Response<Streaming<PartialResultSet>>, Status> {
        let option = option.unwrap_or_default();
        let result = session
            .spanner_client
            .streaming_read(self.request.clone(), option.cancel.as_ref())
            .await;
        session.invalidate_if_needed(result)
    }

    fn update_token(&mut self, resume_token: Vec<u8>) {
        self.request.resume_token = resume_token;
    }

    fn update_transaction(&mut self, selector: TransactionSelector) {
        self.request.transaction = Some(selector);
    }

    fn can_resume(&self) -> bool {
        !self.request.resume_token.is_empty()
    }
}

/// Values received so far, waiting to be grouped into rows.
pub struct ResultSet {
    fields: Arc<Vec<Field>>,
    index: Arc<HashMap<String, usize>>,
    rows: VecDeque<Value>,
    chunked_value: bool,
}

impl ResultSet {
    fn new() -> Self {
        ResultSet {
            fields: Arc::new(vec![]),
            index: Arc::new(HashMap::new()),
            rows: VecDeque::new(),
            chunked_value: false,
        }
    }

    fn next(&mut self) -> Option<Row> {
        let column_length = self.fields.len();
        if column_length == 0 {
            return None;
        }
        // the last value is incomplete while a chunk is pending
        let complete = if self.chunked_value {
            self.rows.len().saturating_sub(1)
        } else {
            self.rows.len()
        };
        if complete < column_length {
            return None;
        }
        let values: Vec<Value> = self.rows.drain(..column_length).collect();
        Some(Row::new(Arc::clone(&self.index), Arc::clone(&self.fields), values))
    }

    /// Merges the incomplete last value of a frame with the first value of the next frame.
    ///
    /// `ty` is the column type when known. Values carried as strings concatenate, lists merge
    /// their boundary elements using the element type (ARRAY) or the type of the boundary
    /// field (STRUCT).
    fn merge(ty: Option<&Type>, previous_last: Value, current_first: Value) -> Result<Value, Status> {
        if is_unchunkable(ty) {
            return Err(protocol_violation(format!(
                "values of type {} are never chunked",
                ty.map(|t| t.code().as_str_name()).unwrap_or_default()
            )));
        }
        match (previous_last.kind, current_first.kind) {
            (Some(Kind::StringValue(last)), Some(Kind::StringValue(first))) => {
                tracing::trace!("merge chunk previous_last={}, current_first={}", &last, &first);
                Ok(Value {
                    kind: Some(Kind::StringValue(last + &first)),
                })
            }
            (Some(Kind::ListValue(last)), Some(Kind::ListValue(first))) => Ok(Value {
                kind: Some(Kind::ListValue(ResultSet::merge_list(ty, last, first)?)),
            }),
            (last, first) => Err(protocol_violation(format!(
                "chunked value can not be merged: previous_last={last:?}, current_first={first:?}"
            ))),
        }
    }

    fn merge_list(ty: Option<&Type>, mut last: ListValue, mut first: ListValue) -> Result<ListValue, Status> {
        if last.values.is_empty() {
            return Ok(first);
        }
        if first.values.is_empty() {
            return Ok(last);
        }
        let boundary = last.values.len() - 1;
        let boundary_type = ty.and_then(|t| match t.code() {
            TypeCode::Array => t.array_element_type.as_deref(),
            TypeCode::Struct => t
                .struct_type
                .as_ref()
                .and_then(|s| s.fields.get(boundary))
                .and_then(|f| f.r#type.as_ref()),
            _ => None,
        });
        let mergeable = !is_unchunkable(boundary_type)
            && matches!(
                (last.values[boundary].kind.as_ref(), first.values[0].kind.as_ref()),
                (Some(Kind::StringValue(_)), Some(Kind::StringValue(_)))
                    | (Some(Kind::ListValue(_)), Some(Kind::ListValue(_)))
            );
        if mergeable {
            if let Some(previous_last) = last.values.pop() {
                let current_first = first.values.remove(0);
                last.values.push(ResultSet::merge(boundary_type, previous_last, current_first)?);
            }
        }
        last.values.extend(first.values);
        Ok(last)
    }

    fn add(
        &mut self,
        metadata: Option<ResultSetMetadata>,
        mut values: Vec<Value>,
        chunked_value: bool,
    ) -> Result<(), Status> {
        // get metadata only once.
        if self.fields.is_empty() {
            if let Some(metadata) = metadata {
                self.fields = metadata
                    .row_type
                    .map(|e| Arc::new(e.fields))
                    .ok_or_else(|| protocol_violation("no field metadata found"))?;
                // create index for Row::column_by_name("column_name")
                let mut index = HashMap::new();
                for (i, f) in self.fields.iter().enumerate() {
                    index.insert(f.name.clone(), i);
                }
                self.index = Arc::new(index);
            }
        }

        if values.is_empty() {
            if chunked_value {
                return Err(protocol_violation("chunked frame without values"));
            }
            return Ok(());
        }
        if self.fields.is_empty() {
            return Err(protocol_violation("values received before metadata"));
        }

        if self.chunked_value {
            tracing::trace!("now chunked value found previous={}, current={}", self.rows.len(), values.len());
            let column = (self.rows.len().saturating_sub(1)) % self.fields.len();
            let ty = self.fields.get(column).and_then(|f| f.r#type.as_ref());
            let previous_last = self
                .rows
                .pop_back()
                .ok_or_else(|| protocol_violation("no value to merge the chunk into"))?;
            let merged = ResultSet::merge(ty, previous_last, values.remove(0))?;
            self.rows.push_back(merged);
        }
        self.rows.extend(values);
        self.chunked_value = chunked_value;
        Ok(())
    }
}

fn is_unchunkable(ty: Option<&Type>) -> bool {
    matches!(
        ty.map(|t| t.code()),
        Some(TypeCode::Bool | TypeCode::Float64 | TypeCode::Float32)
    )
}

/// Errors after which the stream is re-opened from the last resume token.
fn is_resumable(status: &Status) -> bool {
    match status.code() {
        Code::Unavailable => true,
        Code::Internal => {
            status.message().contains("stream terminated by RST_STREAM")
                || status
                    .message()
                    .contains("Received unexpected EOS on DATA frame from server")
        }
        _ => false,
    }
}

/// Holds frames back until a resume token proves they will not be replayed.
///
/// The leading `durable` frames of `held` are covered by `resume_token`: a stream re-opened
/// from that token continues right after them, so they survive a resumption.
#[derive(Debug)]
struct ResumablePartialResultSetBuffer {
    held: VecDeque<PartialResultSet>,
    durable: usize,
    resume_token: Vec<u8>,
    bytes_since_token: usize,
    max_bytes_between_tokens: usize,
    unretryable: bool,
}

impl ResumablePartialResultSetBuffer {
    fn new(max_bytes_between_tokens: usize) -> Self {
        Self {
            held: VecDeque::new(),
            durable: 0,
            resume_token: Vec::new(),
            bytes_since_token: 0,
            max_bytes_between_tokens,
            unretryable: false,
        }
    }

    /// Returns true when the frame carried a new resume token.
    fn push(&mut self, frame: PartialResultSet) -> bool {
        let tokened = !frame.resume_token.is_empty();
        if tokened {
            self.resume_token = frame.resume_token.clone();
            self.bytes_since_token = 0;
            self.unretryable = false;
        } else if !self.unretryable {
            self.bytes_since_token = self.bytes_since_token.saturating_add(frame.encoded_len());
            if self.bytes_since_token >= self.max_bytes_between_tokens {
                tracing::debug!(
                    "{} bytes without resume token, stream is no longer resumable",
                    self.bytes_since_token
                );
                self.unretryable = true;
            }
        }
        self.held.push_back(frame);
        if tokened {
            self.durable = self.held.len();
        }
        tokened
    }

    fn pop_ready(&mut self, end_of_stream: bool) -> Option<PartialResultSet> {
        if self.durable == 0 && !self.unretryable && !end_of_stream {
            return None;
        }
        let frame = self.held.pop_front()?;
        self.durable = self.durable.saturating_sub(1);
        Some(frame)
    }

    /// Drops the frames the re-opened stream will send again.
    fn on_resumption(&mut self) {
        self.held.truncate(self.durable);
        self.bytes_since_token = 0;
    }
}

/// Rows of a streaming query or read.
///
/// Transport errors are healed by re-opening the stream from the last resume token, at most
/// `StreamConfig::max_resume_attempts` times in a row. The transaction embedded in the first
/// frame and every precommit token are reported to the owning transaction as they arrive.
pub struct RowIterator<'a, T>
where
    T: Reader,
{
    streaming: Streaming<PartialResultSet>,
    session: &'a mut SessionHandle,
    reader: T,
    context: TransactionContext,
    rs: ResultSet,
    reader_option: Option<CallOptions>,
    stats: Option<ResultSetStats>,
    prs_buffer: ResumablePartialResultSetBuffer,
    end_of_stream: bool,
    resume_attempts: usize,
    max_resume_attempts: usize,
    cancel: Option<CancellationToken>,
}

impl<'a, T> RowIterator<'a, T>
where
    T: Reader,
{
    pub(crate) async fn new(
        session: &'a mut SessionHandle,
        reader: T,
        context: TransactionContext,
        option: Option<CallOptions>,
    ) -> Result<RowIterator<'a, T>, Status> {
        let config = session.spanner_client.stream_config().clone();
        let streaming = reader.read(session, option.clone()).await?.into_inner();
        let cancel = option.as_ref().and_then(|o| o.cancel.clone());
        let mut iter = Self {
            streaming,
            session,
            reader,
            context,
            rs: ResultSet::new(),
            reader_option: option,
            stats: None,
            prs_buffer: ResumablePartialResultSetBuffer::new(config.max_bytes_between_resume_tokens),
            end_of_stream: false,
            resume_attempts: 0,
            max_resume_attempts: config.max_resume_attempts,
            cancel,
        };
        // The transaction begun by this request must be known before the iterator is handed out.
        if iter.context.is_begin() {
            iter.receive().await?;
        }
        Ok(iter)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().map(|c| c.is_cancelled()).unwrap_or(false)
    }

    /// Receives one frame, or re-opens the stream after a resumable error.
    async fn receive(&mut self) -> Result<(), Status> {
        let received = match &self.cancel {
            Some(cancel) => select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled()),
                v = self.streaming.next() => v,
            },
            None => self.streaming.next().await,
        };
        match received {
            Some(Ok(result_set)) => {
                if let Some(tx) = result_set.metadata.as_ref().and_then(|m| m.transaction.as_ref()) {
                    self.context.observe_transaction(tx);
                }
                self.context.observe_precommit_token(result_set.precommit_token.as_ref());
                if result_set.last {
                    self.end_of_stream = true;
                }
                if self.prs_buffer.push(result_set) {
                    self.reader.update_token(self.prs_buffer.resume_token.clone());
                    self.resume_attempts = 0;
                }
                Ok(())
            }
            Some(Err(e)) => self.resume(e).await,
            None => {
                self.end_of_stream = true;
                Ok(())
            }
        }
    }

    async fn resume(&mut self, mut e: Status) -> Result<(), Status> {
        loop {
            if self.prs_buffer.unretryable
                || !self.reader.can_resume()
                || !is_resumable(&e)
                || self.resume_attempts >= self.max_resume_attempts
            {
                return Err(e);
            }
            self.resume_attempts += 1;
            tracing::debug!(
                "streaming error: {}. resume reading by resume_token attempt={}",
                e,
                self.resume_attempts
            );
            self.prs_buffer.on_resumption();
            self.reader.update_transaction(self.context.selector());
            match self.reader.read(self.session, self.reader_option.clone()).await {
                Ok(result) => {
                    self.streaming = result.into_inner();
                    return Ok(());
                }
                Err(reopen) => e = reopen,
            }
        }
    }

    async fn try_recv(&mut self) -> Result<bool, Status> {
        loop {
            if let Some(result_set) = self.prs_buffer.pop_ready(self.end_of_stream) {
                // stats are only sent with the last response
                if result_set.stats.is_some() {
                    self.stats = result_set.stats;
                }
                self.rs
                    .add(result_set.metadata, result_set.values, result_set.chunked_value)?;
                return Ok(true);
            }

            if self.end_of_stream {
                if self.rs.chunked_value {
                    return Err(protocol_violation("stream ended inside a chunked value"));
                }
                return Ok(false);
            }

            self.receive().await?;
        }
    }

    /// Return metadata for all columns
    pub fn columns_metadata(&self) -> &Arc<Vec<Field>> {
        &self.rs.fields
    }

    pub fn column_metadata(&self, column_name: &str) -> Option<(usize, Field)> {
        for (i, val) in self.rs.fields.iter().enumerate() {
            if val.name == column_name {
                return Some((i, val.clone()));
            }
        }
        None
    }

    /// Returns query execution statistics if available.
    /// Stats are only available after all rows have been consumed and only when
    /// the query was executed with a QueryMode that includes stats (Profile, WithStats, or WithPlanAndStats).
    pub fn stats(&self) -> Option<&ResultSetStats> {
        self.stats.as_ref()
    }

    /// Exact or lower-bound row count reported in the stats.
    pub fn row_count(&self) -> Option<i64> {
        match self.stats.as_ref()?.row_count.as_ref()? {
            RowCount::RowCountExact(v) => Some(*v),
            RowCount::RowCountLowerBound(v) => Some(*v),
        }
    }

    /// Drains the rows that are already complete without touching the stream.
    /// Useful after cancellation.
    pub fn take_buffered(&mut self) -> Vec<Row> {
        std::iter::from_fn(|| self.rs.next()).collect()
    }

    /// next returns the next result.
    /// Its second return value is None if there are no more results.
    pub async fn next(&mut self) -> Result<Option<Row>, Status> {
        loop {
            if self.is_cancelled() {
                return Err(cancelled());
            }
            if let Some(row) = self.rs.next() {
                return Ok(Some(row));
            }
            // no data found or record chunked.
            if !self.try_recv().await? {
                return Ok(None);
            }
        }
    }
}
