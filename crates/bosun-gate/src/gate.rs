use bosun_core::{CaseRecord, FailureReason, GateKind, MutationMap};

/// Outcome of one gate against one case.
///
/// `Skip` means the gate does not apply to this case's category and counts
/// as satisfied; `Fail` stops the pipeline and names the blocking reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateFinding {
    Pass,
    Skip,
    Fail(FailureReason),
}

pub trait Gate: Send + Sync {
    fn kind(&self) -> GateKind;
    fn eval(&self, rec: &CaseRecord, mutations: &MutationMap) -> GateFinding;
}
