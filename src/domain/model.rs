use serde::{Deserialize, Serialize};
use std::fmt;

/// Process-enablement flags carried on a service. Values are passed through
/// exactly as the instance returns them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpmFlags {
    pub incident: String,
    pub service: String,
    pub change: String,
    pub problem: String,
    pub known_error: String,
}

/// A service resolved on the instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub name: String,
    pub id: u64,
    pub flags: BpmFlags,
}

impl ServiceRecord {
    pub fn new(name: impl Into<String>, id: u64, flags: BpmFlags) -> Self {
        Self {
            name: name.into(),
            id,
            flags,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    EmptyName,
    NoMapping,
    Transport(String),
    MalformedResponse(String),
    RemoteFailure(String),
    NotFound,
    NameMismatch { returned: String },
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::EmptyName => write!(f, "empty service name"),
            UnresolvedReason::NoMapping => write!(f, "no service mapping"),
            UnresolvedReason::Transport(e) => write!(f, "transport failure: {}", e),
            UnresolvedReason::MalformedResponse(e) => write!(f, "malformed response: {}", e),
            UnresolvedReason::RemoteFailure(e) => write!(f, "remote failure: {}", e),
            UnresolvedReason::NotFound => write!(f, "service not found"),
            UnresolvedReason::NameMismatch { returned } => {
                write!(f, "search returned a different service: {}", returned)
            }
        }
    }
}

/// Outcome of a service resolution. Callers that only need the legacy
/// "empty string means unresolved" contract use [`Resolution::into_id_string`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    Unresolved(UnresolvedReason),
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(id) => Some(id),
            Resolution::Unresolved(_) => None,
        }
    }

    pub fn reason(&self) -> Option<&UnresolvedReason> {
        match self {
            Resolution::Resolved(_) => None,
            Resolution::Unresolved(reason) => Some(reason),
        }
    }

    pub fn into_id_string(self) -> String {
        match self {
            Resolution::Resolved(id) => id,
            Resolution::Unresolved(_) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_collapses_to_empty_string() {
        let reasons = vec![
            UnresolvedReason::EmptyName,
            UnresolvedReason::NoMapping,
            UnresolvedReason::Transport("connection refused".to_string()),
            UnresolvedReason::RemoteFailure("no rights".to_string()),
            UnresolvedReason::NotFound,
        ];

        for reason in reasons {
            let resolution = Resolution::Unresolved(reason.clone());
            assert_eq!(resolution.reason(), Some(&reason));
            assert_eq!(resolution.into_id_string(), "");
        }
    }

    #[test]
    fn test_resolved_keeps_id() {
        let resolution = Resolution::Resolved("42".to_string());
        assert!(resolution.is_resolved());
        assert_eq!(resolution.id(), Some("42"));
        assert_eq!(resolution.into_id_string(), "42");
    }
}
