use bosun_core::{ActionCategory, CaseRecord, FailureReason, GateKind, MutationMap};

use crate::gate::{Gate, GateFinding};

/// Fixed status -> reason table for non-success transport outcomes.
pub fn reason_for_status(status: u16) -> FailureReason {
    match status {
        401 | 403 => FailureReason::AuthFailed,
        404 => FailureReason::MissingEndpoint,
        400 | 422 => FailureReason::ValidationFailed,
        500..=599 => FailureReason::UnhandledException,
        307 | 308 => FailureReason::Redirected,
        _ => FailureReason::GateATransport,
    }
}

/// Gate A: the request must have landed as a success at the HTTP layer.
pub struct TransportGate;

impl Gate for TransportGate {
    fn kind(&self) -> GateKind {
        GateKind::Transport
    }

    fn eval(&self, rec: &CaseRecord, _mutations: &MutationMap) -> GateFinding {
        match rec.status_code {
            200 | 201 => GateFinding::Pass,
            other => GateFinding::Fail(reason_for_status(other)),
        }
    }
}

/// Gate B: the server must prove it executed the intended action. A
/// mismatched response action name is reported before a missing
/// correlation token.
pub struct SemanticGate;

impl Gate for SemanticGate {
    fn kind(&self) -> GateKind {
        GateKind::Semantic
    }

    fn eval(&self, rec: &CaseRecord, _mutations: &MutationMap) -> GateFinding {
        if let Some(name) = rec.response_action_name.as_deref() {
            if !name.is_empty() && name != rec.expected_action {
                return GateFinding::Fail(FailureReason::WrongAction);
            }
        }
        if !rec.has_execution_id() {
            return GateFinding::Fail(FailureReason::GateBSemantic);
        }
        GateFinding::Pass
    }
}

/// Gate C: WRITE actions must carry a verified state mutation.
pub struct StateGate;

impl Gate for StateGate {
    fn kind(&self) -> GateKind {
        GateKind::State
    }

    fn eval(&self, rec: &CaseRecord, _mutations: &MutationMap) -> GateFinding {
        if rec.action_category != ActionCategory::Write {
            return GateFinding::Skip;
        }
        match &rec.db_proof {
            Some(proof) if proof.mutation_verified => GateFinding::Pass,
            _ => GateFinding::Fail(FailureReason::NoDbMutation),
        }
    }
}

/// Gate D: READ actions must actually return data.
pub struct DataGate;

impl Gate for DataGate {
    fn kind(&self) -> GateKind {
        GateKind::Data
    }

    fn eval(&self, rec: &CaseRecord, _mutations: &MutationMap) -> GateFinding {
        if rec.action_category != ActionCategory::Read {
            return GateFinding::Skip;
        }
        if rec.has_response_data() {
            GateFinding::Pass
        } else {
            GateFinding::Fail(FailureReason::NoDataReturned)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bosun_core::{CaseId, DbProof, ExecutionId, TestType, Verdict};

    fn rec(category: ActionCategory, status: u16) -> CaseRecord {
        CaseRecord {
            case_id: CaseId::from_str("c"),
            test_type: TestType::Positive,
            action_category: category,
            expected_action: "create_work_order".into(),
            status_code: status,
            response_action_name: None,
            execution_id: ExecutionId::from_str("ex"),
            response: serde_json::Value::Null,
            db_proof: None,
            verdict: Verdict::default(),
        }
    }

    #[test]
    fn status_reason_table_is_fixed() {
        assert_eq!(reason_for_status(401), FailureReason::AuthFailed);
        assert_eq!(reason_for_status(403), FailureReason::AuthFailed);
        assert_eq!(reason_for_status(404), FailureReason::MissingEndpoint);
        assert_eq!(reason_for_status(400), FailureReason::ValidationFailed);
        assert_eq!(reason_for_status(422), FailureReason::ValidationFailed);
        assert_eq!(reason_for_status(500), FailureReason::UnhandledException);
        assert_eq!(reason_for_status(503), FailureReason::UnhandledException);
        assert_eq!(reason_for_status(307), FailureReason::Redirected);
        assert_eq!(reason_for_status(308), FailureReason::Redirected);
        assert_eq!(reason_for_status(204), FailureReason::GateATransport);
        assert_eq!(reason_for_status(301), FailureReason::GateATransport);
    }

    #[test]
    fn semantic_gate_prefers_wrong_action_over_missing_token() {
        let mut r = rec(ActionCategory::Write, 200);
        r.response_action_name = Some("delete_work_order".into());
        r.execution_id = ExecutionId::empty();
        let finding = SemanticGate.eval(&r, &MutationMap::new());
        assert_eq!(finding, GateFinding::Fail(FailureReason::WrongAction));
    }

    #[test]
    fn semantic_gate_accepts_matching_action_name() {
        let mut r = rec(ActionCategory::Write, 200);
        r.response_action_name = Some("create_work_order".into());
        assert_eq!(SemanticGate.eval(&r, &MutationMap::new()), GateFinding::Pass);
    }

    #[test]
    fn state_gate_skips_reads() {
        let r = rec(ActionCategory::Read, 200);
        assert_eq!(StateGate.eval(&r, &MutationMap::new()), GateFinding::Skip);
    }

    #[test]
    fn state_gate_requires_verified_proof() {
        let mut r = rec(ActionCategory::Write, 200);
        assert_eq!(
            StateGate.eval(&r, &MutationMap::new()),
            GateFinding::Fail(FailureReason::NoDbMutation)
        );
        r.db_proof = Some(DbProof {
            table: "work_orders".into(),
            row_ids: vec![],
            before_count: 4,
            after_count: 5,
            mutation_verified: false,
        });
        assert_eq!(
            StateGate.eval(&r, &MutationMap::new()),
            GateFinding::Fail(FailureReason::NoDbMutation)
        );
    }

    #[test]
    fn data_gate_skips_writes() {
        let r = rec(ActionCategory::Write, 200);
        assert_eq!(DataGate.eval(&r, &MutationMap::new()), GateFinding::Skip);
    }
}
