use serde::{Deserialize, Serialize};

/// Lifecycle of a swap request. `Pending` moves to exactly one of the two
/// terminal states and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
}

impl SwapStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SwapStatus::Pending => "Pending",
            SwapStatus::Accepted => "Accepted",
            SwapStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Pending" => Some(SwapStatus::Pending),
            "Accepted" => Some(SwapStatus::Accepted),
            "Rejected" => Some(SwapStatus::Rejected),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != SwapStatus::Pending
    }

    /// The single legal transition: a pending request resolves to the
    /// action's terminal state. Terminal states stay put.
    pub fn respond(self, action: SwapAction) -> Result<SwapStatus, SwapStatus> {
        match self {
            SwapStatus::Pending => Ok(match action {
                SwapAction::Accept => SwapStatus::Accepted,
                SwapAction::Reject => SwapStatus::Rejected,
            }),
            terminal => Err(terminal),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapAction {
    Accept,
    Reject,
}

impl SwapAction {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "accept" => Some(SwapAction::Accept),
            "reject" => Some(SwapAction::Reject),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        for status in [SwapStatus::Pending, SwapStatus::Accepted, SwapStatus::Rejected] {
            assert_eq!(SwapStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(SwapStatus::parse("pending"), None);
        assert_eq!(SwapStatus::parse(""), None);
    }

    #[test]
    fn pending_resolves_once() {
        assert_eq!(
            SwapStatus::Pending.respond(SwapAction::Accept),
            Ok(SwapStatus::Accepted)
        );
        assert_eq!(
            SwapStatus::Pending.respond(SwapAction::Reject),
            Ok(SwapStatus::Rejected)
        );
    }

    #[test]
    fn terminal_states_refuse_further_transitions() {
        for terminal in [SwapStatus::Accepted, SwapStatus::Rejected] {
            for action in [SwapAction::Accept, SwapAction::Reject] {
                assert_eq!(terminal.respond(action), Err(terminal));
            }
        }
    }

    #[test]
    fn action_parsing_is_strict() {
        assert_eq!(SwapAction::parse("accept"), Some(SwapAction::Accept));
        assert_eq!(SwapAction::parse("reject"), Some(SwapAction::Reject));
        assert_eq!(SwapAction::parse("Accept"), None);
        assert_eq!(SwapAction::parse("cancel"), None);
    }

    #[test]
    fn terminality() {
        assert!(!SwapStatus::Pending.is_terminal());
        assert!(SwapStatus::Accepted.is_terminal());
        assert!(SwapStatus::Rejected.is_terminal());
    }
}
