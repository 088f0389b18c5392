use tokio_util::sync;

/// Cancellation handle passed to calls and streams.
///
/// Wraps the tokio-util token so dependents do not have to pin the same tokio-util version.
#[derive(Clone, Default, Debug)]
pub struct CancellationToken(sync::CancellationToken);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token cancelled together with this one. Cancelling the child leaves the parent untouched.
    pub fn child_token(&self) -> Self {
        Self(self.0.child_token())
    }

    pub fn cancel(&self) {
        self.0.cancel()
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }

    /// Resolves once `cancel` has been called on this token or one of its parents.
    pub async fn cancelled(&self) {
        self.0.cancelled().await
    }
}

impl From<sync::CancellationToken> for CancellationToken {
    fn from(token: sync::CancellationToken) -> Self {
        Self(token)
    }
}

#[cfg(test)]
mod tests {
    use super::CancellationToken;

    #[test]
    fn test_child_follows_parent_only() {
        let parent = CancellationToken::new();
        let child = parent.child_token();
        let sibling = parent.child_token();
        child.cancel();
        assert!(!parent.is_cancelled());
        assert!(!sibling.is_cancelled());
        parent.cancel();
        assert!(sibling.is_cancelled());
    }
}
