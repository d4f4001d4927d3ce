/// Explicit request state for a single remote query. Every fetch the UI
/// issues moves through this machine: Idle until first requested, Pending
/// while in flight, then Success or Error once the call settles.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteQuery<T> {
    Idle,
    Pending,
    Success(T),
    Error(String),
}

impl<T> RemoteQuery<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// A query is settled once it has produced a terminal result,
    /// successful or not.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

impl<T> Default for RemoteQuery<T> {
    fn default() -> Self {
        Self::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let query: RemoteQuery<u32> = RemoteQuery::default();
        assert!(query.is_idle());
        assert!(!query.is_settled());
        assert_eq!(query.data(), None);
    }

    #[test]
    fn test_success_is_settled() {
        let query = RemoteQuery::Success(vec![1, 2, 3]);
        assert!(query.is_settled());
        assert!(query.is_success());
        assert_eq!(query.data(), Some(&vec![1, 2, 3]));
        assert_eq!(query.error(), None);
    }

    #[test]
    fn test_error_is_settled_but_carries_no_data() {
        let query: RemoteQuery<u32> = RemoteQuery::Error("boom".to_string());
        assert!(query.is_settled());
        assert!(query.is_error());
        assert_eq!(query.data(), None);
        assert_eq!(query.error(), Some("boom"));
    }

    #[test]
    fn test_pending_is_not_settled() {
        let query: RemoteQuery<u32> = RemoteQuery::Pending;
        assert!(query.is_pending());
        assert!(!query.is_settled());
    }
}
