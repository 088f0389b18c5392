use std::future::Future;

use tokio::select;

use crate::cancel::CancellationToken;
use crate::grpc::{cancelled, Status};

/// Exposes the gRPC status carried by an error type, if it carries one.
pub trait TryAs<T> {
    fn try_as(&self) -> Option<&T>;
}

impl TryAs<Status> for Status {
    fn try_as(&self) -> Option<&Status> {
        Some(self)
    }
}

/// Runs `f` until it completes or `cancel` fires, whichever comes first.
///
/// A cancelled call resolves to `Code::Cancelled`. The future of `f` is dropped at that
/// point, which abandons the underlying RPC.
pub async fn invoke<R, E, A>(cancel: Option<&CancellationToken>, f: impl FnOnce() -> A) -> Result<R, E>
where
    E: From<Status>,
    A: Future<Output = Result<R, E>>,
{
    match cancel {
        Some(cancel) => {
            if cancel.is_cancelled() {
                tracing::trace!("call cancelled before start");
                return Err(cancelled().into());
            }
            select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!("call cancelled while running");
                    Err(cancelled().into())
                }
                v = f() => v,
            }
        }
        None => f().await,
    }
}
