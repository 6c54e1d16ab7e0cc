use bosun_core::BundleId;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A declarative claim about a test step, independent of the harness's own
/// assert calls.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assertion {
    pub name: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Assertion {
    pub fn new(name: impl Into<String>, passed: bool) -> Self {
        Self { name: name.into(), passed, message: None }
    }

    pub fn with_message(name: impl Into<String>, passed: bool, message: impl Into<String>) -> Self {
        Self { name: name.into(), passed, message: Some(message.into()) }
    }
}

/// Entry in the bundle's artifact listing; doubles as an integrity manifest.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactEntry {
    pub name: String,
    pub sha256: String,
    pub bytes: u64,
}

impl ArtifactEntry {
    pub fn for_bytes(name: impl Into<String>, content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        Self {
            name: name.into(),
            sha256: hex::encode(hasher.finalize()),
            bytes: content.len() as u64,
        }
    }
}

/// Aggregated, human-inspectable record of one test step: the named
/// artifacts written for it and the claims made about it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvidenceBundle {
    pub bundle_id: BundleId,
    pub case_name: String,
    pub created_at_unix: i64,
    pub artifacts: Vec<ArtifactEntry>,
    pub assertions: Vec<Assertion>,
    pub passed: bool,
}

impl EvidenceBundle {
    /// Overall pass is the logical AND of all assertions. An empty list is
    /// vacuously true; callers who want a stronger claim must assert one.
    pub fn new(
        case_name: impl Into<String>,
        created_at_unix: i64,
        artifacts: Vec<ArtifactEntry>,
        assertions: Vec<Assertion>,
    ) -> Self {
        let passed = assertions.iter().all(|a| a.passed);
        Self {
            bundle_id: BundleId::new(),
            case_name: case_name.into(),
            created_at_unix,
            artifacts,
            assertions,
            passed,
        }
    }
}
