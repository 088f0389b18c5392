use futures_util::StreamExt;
use time::OffsetDateTime;
use tokio::select;

use spanwire_gax::cancel::CancellationToken;
use spanwire_gax::grpc::{cancelled, protocol_violation, Code, Status, Streaming};
use spanwire_googleapis::spanner::v1::{BatchWriteRequest, BatchWriteResponse};

use crate::mutation::MutationGroup;
use crate::session::SessionHandle;
use crate::transaction::{CallOptions, Transaction};
use crate::value::from_timestamp;

#[derive(Clone, Default, Debug)]
pub struct BatchWriteOptions {
    pub exclude_txn_from_change_streams: bool,
    pub call_options: CallOptions,
}

/// Outcome of one mutation group of a batch write.
#[derive(Clone, Debug)]
pub enum GroupResult {
    /// Applied atomically at the timestamp, when the server reported one.
    Committed(Option<OffsetDateTime>),
    Failed(Status),
    /// The stream ended without mentioning the group.
    Unreported,
}

impl GroupResult {
    pub fn is_committed(&self) -> bool {
        matches!(self, GroupResult::Committed(_))
    }
}

/// Response frames of a batch write. Each frame reports the outcome of one or more groups,
/// identified by their position in the request.
pub struct BatchWriteIterator {
    streaming: Streaming<BatchWriteResponse>,
    group_count: usize,
    cancel: Option<CancellationToken>,
}

impl BatchWriteIterator {
    /// next returns the next response frame, or None at the end of the stream.
    pub async fn next(&mut self) -> Result<Option<BatchWriteResponse>, Status> {
        let received = match &self.cancel {
            Some(cancel) => select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled()),
                v = self.streaming.next() => v,
            },
            None => self.streaming.next().await,
        };
        let response = match received {
            Some(response) => response?,
            None => return Ok(None),
        };
        if let Some(index) = response
            .indexes
            .iter()
            .find(|i| **i < 0 || **i as usize >= self.group_count)
        {
            return Err(protocol_violation(format!(
                "batch write reported group {} of {}",
                index, self.group_count
            )));
        }
        Ok(Some(response))
    }

    /// Drains the stream into one result per request group, in request order.
    pub async fn collect_results(mut self) -> Result<Vec<GroupResult>, Status> {
        let mut results = vec![GroupResult::Unreported; self.group_count];
        while let Some(response) = self.next().await? {
            let result = match response.status {
                Some(status) if status.code != Code::Ok as i32 => {
                    GroupResult::Failed(Status::new(Code::from(status.code), status.message))
                }
                _ => GroupResult::Committed(response.commit_timestamp.as_ref().and_then(from_timestamp)),
            };
            for index in response.indexes {
                results[index as usize] = result.clone();
            }
        }
        Ok(results)
    }
}

/// Applies every group atomically and independently of the others. A failing group does not
/// fail the call: its outcome is reported in the stream. Groups are never retried.
pub async fn batch_write(
    session: &mut SessionHandle,
    groups: Vec<MutationGroup>,
    options: BatchWriteOptions,
) -> Result<BatchWriteIterator, Status> {
    let group_count = groups.len();
    let request = BatchWriteRequest {
        session: session.session.name.to_string(),
        request_options: Transaction::create_request_options(options.call_options.priority),
        mutation_groups: groups.into_iter().map(|g| g.into()).collect(),
        exclude_txn_from_change_streams: options.exclude_txn_from_change_streams,
    };
    tracing::debug!("batch write groups={}", group_count);
    let result = session
        .spanner_client
        .batch_write(request, options.call_options.cancel.as_ref())
        .await;
    let streaming = session.invalidate_if_needed(result)?.into_inner();
    Ok(BatchWriteIterator {
        streaming,
        group_count,
        cancel: options.call_options.cancel,
    })
}
