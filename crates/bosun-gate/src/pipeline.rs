use bosun_core::{
    counts_unchanged, CaseRecord, FailureReason, GateKind, MutationMap, TestType, Verdict,
};

use crate::gate::{Gate, GateFinding};
use crate::gates::{reason_for_status, DataGate, SemanticGate, StateGate, TransportGate};

/// Negative-control transport: the action must have been rejected by
/// validation. A 200/201 means the rejection contract itself failed.
pub struct RejectionGate;

impl Gate for RejectionGate {
    fn kind(&self) -> GateKind {
        GateKind::Transport
    }

    fn eval(&self, rec: &CaseRecord, _mutations: &MutationMap) -> GateFinding {
        match rec.status_code {
            400 | 422 => GateFinding::Pass,
            200 | 201 => GateFinding::Fail(FailureReason::GateATransport),
            other => GateFinding::Fail(reason_for_status(other)),
        }
    }
}

/// Negative-control state: when the attempted action has a mutation
/// mapping, the rejection must have left the target table untouched. A
/// missing proof for a mapped action cannot be certified and fails.
pub struct NoMutationGate;

impl Gate for NoMutationGate {
    fn kind(&self) -> GateKind {
        GateKind::State
    }

    fn eval(&self, rec: &CaseRecord, mutations: &MutationMap) -> GateFinding {
        if mutations.target(&rec.expected_action).is_none() {
            return GateFinding::Skip;
        }
        match &rec.db_proof {
            Some(proof) if counts_unchanged(proof) => GateFinding::Pass,
            _ => GateFinding::Fail(FailureReason::NoDbMutation),
        }
    }
}

/// The gatekeeper: applies the ordered gate list for a case's test type and
/// fills its verdict. Evaluation short-circuits at the first failing gate,
/// so `failure_reason` always names the earliest blocking gate.
pub struct Gatekeeper {
    mutations: MutationMap,
}

impl Gatekeeper {
    pub fn new(mutations: MutationMap) -> Self {
        Self { mutations }
    }

    pub fn mutations(&self) -> &MutationMap {
        &self.mutations
    }

    fn gates_for(test_type: TestType) -> Vec<Box<dyn Gate>> {
        match test_type {
            TestType::Positive => vec![
                Box::new(TransportGate),
                Box::new(SemanticGate),
                Box::new(StateGate),
                Box::new(DataGate),
            ],
            TestType::NegativeControl => vec![Box::new(RejectionGate), Box::new(NoMutationGate)],
        }
    }

    pub fn verdict(&self, rec: &CaseRecord) -> Verdict {
        let mut verdict = Verdict::default();
        for gate in Self::gates_for(rec.test_type) {
            match gate.eval(rec, &self.mutations) {
                GateFinding::Pass | GateFinding::Skip => match gate.kind() {
                    GateKind::Transport => verdict.gate_a_transport = true,
                    GateKind::Semantic => verdict.gate_b_semantic = true,
                    GateKind::State => verdict.gate_c_state = true,
                    GateKind::Data => verdict.gate_d_data = true,
                },
                GateFinding::Fail(reason) => {
                    verdict.passed = false;
                    verdict.failure_reason = reason;
                    return verdict;
                }
            }
        }
        Verdict::pass()
    }

    /// Produce the authoritative copy of a record with verdict fields filled.
    /// The input record is never mutated.
    pub fn validate(&self, rec: &CaseRecord) -> CaseRecord {
        let mut out = rec.clone();
        out.verdict = self.verdict(rec);
        out
    }
}
