use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestType {
    Positive,
    NegativeControl,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionCategory {
    Read,
    Write,
}

/// The four independently named checks of the verdict pipeline, in their
/// contractual evaluation order.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    Transport,
    Semantic,
    State,
    Data,
}

/// Closed set of final failure reasons. `Unverified` is the unset sentinel
/// and must never survive into validated output.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    MissingEndpoint,
    AuthFailed,
    ValidationFailed,
    WrongAction,
    NoDbMutation,
    NoDataReturned,
    Redirected,
    UnhandledException,
    Unverified,
    GateATransport,
    GateBSemantic,
    None,
}

impl Default for FailureReason {
    fn default() -> Self {
        FailureReason::Unverified
    }
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::MissingEndpoint => "MISSING_ENDPOINT",
            FailureReason::AuthFailed => "AUTH_FAILED",
            FailureReason::ValidationFailed => "VALIDATION_FAILED",
            FailureReason::WrongAction => "WRONG_ACTION",
            FailureReason::NoDbMutation => "NO_DB_MUTATION",
            FailureReason::NoDataReturned => "NO_DATA_RETURNED",
            FailureReason::Redirected => "REDIRECTED",
            FailureReason::UnhandledException => "UNHANDLED_EXCEPTION",
            FailureReason::Unverified => "UNVERIFIED",
            FailureReason::GateATransport => "GATE_A_TRANSPORT",
            FailureReason::GateBSemantic => "GATE_B_SEMANTIC",
            FailureReason::None => "NONE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_log_schema() {
        let j = serde_json::to_string(&TestType::NegativeControl).unwrap();
        assert_eq!(j, "\"NEGATIVE_CONTROL\"");
        let j = serde_json::to_string(&ActionCategory::Write).unwrap();
        assert_eq!(j, "\"WRITE\"");
        let j = serde_json::to_string(&FailureReason::NoDbMutation).unwrap();
        assert_eq!(j, "\"NO_DB_MUTATION\"");
        let back: FailureReason = serde_json::from_str("\"GATE_B_SEMANTIC\"").unwrap();
        assert_eq!(back, FailureReason::GateBSemantic);
    }

    #[test]
    fn as_str_agrees_with_serde() {
        for r in [
            FailureReason::MissingEndpoint,
            FailureReason::AuthFailed,
            FailureReason::ValidationFailed,
            FailureReason::WrongAction,
            FailureReason::NoDbMutation,
            FailureReason::NoDataReturned,
            FailureReason::Redirected,
            FailureReason::UnhandledException,
            FailureReason::Unverified,
            FailureReason::GateATransport,
            FailureReason::GateBSemantic,
            FailureReason::None,
        ] {
            let j = serde_json::to_string(&r).unwrap();
            assert_eq!(j, format!("\"{}\"", r.as_str()));
        }
    }
}
