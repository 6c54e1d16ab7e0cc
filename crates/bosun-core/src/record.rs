use serde::{Deserialize, Serialize};

use crate::{ActionCategory, CaseId, ExecutionId, FailureReason, TestType};

/// Before/after database observation attached to WRITE cases by the harness.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DbProof {
    pub table: String,
    #[serde(default)]
    pub row_ids: Vec<String>,
    pub before_count: u64,
    pub after_count: u64,
    pub mutation_verified: bool,
}

impl DbProof {
    /// Build a proof from a before/after observation, deriving
    /// `mutation_verified` from the action's declared strategy.
    pub fn observe(
        table: impl Into<String>,
        row_ids: Vec<String>,
        before_count: u64,
        after_count: u64,
        kind: crate::MutationKind,
    ) -> Self {
        let mut proof = DbProof {
            table: table.into(),
            row_ids,
            before_count,
            after_count,
            mutation_verified: false,
        };
        proof.mutation_verified = kind.verified(&proof);
        proof
    }
}

/// Verdict fields. Absent in the raw log; filled only by the gatekeeper.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Verdict {
    #[serde(default)]
    pub gate_a_transport: bool,
    #[serde(default)]
    pub gate_b_semantic: bool,
    #[serde(default)]
    pub gate_c_state: bool,
    #[serde(default)]
    pub gate_d_data: bool,
    #[serde(default)]
    pub passed: bool,
    #[serde(default)]
    pub failure_reason: FailureReason,
}

impl Verdict {
    pub fn pass() -> Self {
        Verdict {
            gate_a_transport: true,
            gate_b_semantic: true,
            gate_c_state: true,
            gate_d_data: true,
            passed: true,
            failure_reason: FailureReason::None,
        }
    }
}

/// One line of the newline-delimited results log.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CaseRecord {
    pub case_id: CaseId,
    pub test_type: TestType,
    pub action_category: ActionCategory,
    pub expected_action: String,

    pub status_code: u16,
    #[serde(default)]
    pub response_action_name: Option<String>,
    #[serde(default = "ExecutionId::empty")]
    pub execution_id: ExecutionId,
    #[serde(default)]
    pub response: serde_json::Value,
    #[serde(default)]
    pub db_proof: Option<DbProof>,

    #[serde(flatten)]
    pub verdict: Verdict,
}

impl CaseRecord {
    pub fn has_execution_id(&self) -> bool {
        !self.execution_id.as_str().trim().is_empty()
    }

    /// Known response shapes carrying the payload of a READ action.
    pub const DATA_FIELDS: [&'static str; 4] = ["worklist", "data", "result", "items"];

    /// True when the response body carries a recognizable non-empty data field.
    pub fn has_response_data(&self) -> bool {
        let obj = match self.response.as_object() {
            Some(o) => o,
            None => return false,
        };
        Self::DATA_FIELDS.iter().any(|f| match obj.get(*f) {
            Some(serde_json::Value::Null) | None => false,
            Some(serde_json::Value::Array(a)) => !a.is_empty(),
            Some(serde_json::Value::Object(m)) => !m.is_empty(),
            Some(serde_json::Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        })
    }
}
