use std::path::{Component, Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::warn;

use crate::bundle::{ArtifactEntry, Assertion, EvidenceBundle};

pub trait EvidenceStore: Send + Sync {
    fn create_case_dir(&self, case_name: &str) -> Result<PathBuf>;
    fn save_artifact(&self, case_name: &str, filename: &str, bytes: &[u8]) -> Result<PathBuf>;
    fn save_json(&self, case_name: &str, filename: &str, value: &serde_json::Value) -> Result<PathBuf>;
    fn write_bundle(&self, bundle: &EvidenceBundle) -> Result<PathBuf>;
}

/// Filesystem store with the layout `<root>/artifacts/<case_name>/...`.
/// Hierarchical case names become nested directories. Writes overwrite on
/// name collision; last write wins.
#[derive(Clone)]
pub struct FsEvidenceStore {
    pub root: PathBuf,
}

impl FsEvidenceStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn artifacts_root(&self) -> PathBuf {
        self.root.join("artifacts")
    }

    fn case_path(&self, case_name: &str) -> Result<PathBuf> {
        let rel = Path::new(case_name);
        let safe = rel.components().all(|c| matches!(c, Component::Normal(_)));
        if case_name.is_empty() || !safe {
            return Err(anyhow!("invalid case name: {:?}", case_name));
        }
        Ok(self.artifacts_root().join(rel))
    }

    /// Only case names may nest; a filename must be a single path component.
    fn checked_filename(filename: &str) -> Result<&Path> {
        let rel = Path::new(filename);
        let mut components = rel.components();
        let single = matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none();
        if filename.is_empty() || !single {
            return Err(anyhow!("invalid artifact filename: {:?}", filename));
        }
        Ok(rel)
    }
}

impl EvidenceStore for FsEvidenceStore {
    fn create_case_dir(&self, case_name: &str) -> Result<PathBuf> {
        let dir = self.case_path(case_name)?;
        std::fs::create_dir_all(&dir).with_context(|| format!("create case dir {}", dir.display()))?;
        Ok(dir)
    }

    fn save_artifact(&self, case_name: &str, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let name = Self::checked_filename(filename)?;
        let dir = self.create_case_dir(case_name)?;
        let path = dir.join(name);
        std::fs::write(&path, bytes).with_context(|| format!("write artifact {}", path.display()))?;
        Ok(path)
    }

    fn save_json(&self, case_name: &str, filename: &str, value: &serde_json::Value) -> Result<PathBuf> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.save_artifact(case_name, filename, &bytes)
    }

    fn write_bundle(&self, bundle: &EvidenceBundle) -> Result<PathBuf> {
        let bytes = serde_json::to_vec_pretty(bundle)?;
        self.save_artifact(&bundle.case_name, "evidence_bundle.json", &bytes)
    }
}

/// Per-case capture session: writes artifacts through the store, tracks
/// their digests, and assembles the final bundle. One case owns one
/// collector; nothing is shared across cases.
pub struct EvidenceCollector<'a, S: EvidenceStore + ?Sized> {
    store: &'a S,
    case_name: String,
    artifacts: Vec<ArtifactEntry>,
    assertions: Vec<Assertion>,
}

impl<'a, S: EvidenceStore + ?Sized> EvidenceCollector<'a, S> {
    pub fn new(store: &'a S, case_name: impl Into<String>) -> Self {
        Self {
            store,
            case_name: case_name.into(),
            artifacts: Vec::new(),
            assertions: Vec::new(),
        }
    }

    pub fn save_artifact(&mut self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.store.save_artifact(&self.case_name, filename, bytes)?;
        self.record_entry(filename, bytes);
        Ok(path)
    }

    pub fn save_json(&mut self, filename: &str, value: &serde_json::Value) -> Result<PathBuf> {
        let bytes = serde_json::to_vec_pretty(value)?;
        let path = self.store.save_artifact(&self.case_name, filename, &bytes)?;
        self.record_entry(filename, &bytes);
        Ok(path)
    }

    /// Best-effort screenshot persistence. Capture failures are logged and
    /// swallowed; instrumentation must never perturb the test itself.
    pub fn capture_screenshot(&mut self, name: &str, png_bytes: &[u8]) {
        let filename = format!("{}.png", name);
        match self.store.save_artifact(&self.case_name, &filename, png_bytes) {
            Ok(_) => self.record_entry(&filename, png_bytes),
            Err(err) => {
                warn!(case = %self.case_name, screenshot = %name, error = %err, "screenshot capture failed");
            }
        }
    }

    pub fn assert_that(&mut self, assertion: Assertion) {
        self.assertions.push(assertion);
    }

    /// Persist a before/after database observation and derive the proof for
    /// the action's declared mutation strategy.
    pub fn record_db_proof(
        &mut self,
        table: &str,
        row_ids: Vec<String>,
        before_count: u64,
        after_count: u64,
        kind: bosun_core::MutationKind,
    ) -> Result<bosun_core::DbProof> {
        let proof = bosun_core::DbProof::observe(table, row_ids, before_count, after_count, kind);
        self.save_json("db_proof.json", &serde_json::to_value(&proof)?)?;
        self.assert_that(Assertion::new(
            format!("mutation_verified:{}", table),
            proof.mutation_verified,
        ));
        Ok(proof)
    }

    /// Write `evidence_bundle.json` and return the finished bundle.
    pub fn finish(self, created_at_unix: i64) -> Result<EvidenceBundle> {
        let bundle = EvidenceBundle::new(self.case_name, created_at_unix, self.artifacts, self.assertions);
        self.store.write_bundle(&bundle)?;
        Ok(bundle)
    }

    /// `finish` stamped with the current wall clock.
    pub fn finish_now(self) -> Result<EvidenceBundle> {
        self.finish(crate::util::now_unix())
    }

    fn record_entry(&mut self, filename: &str, bytes: &[u8]) {
        // Collisions keep only the surviving content.
        self.artifacts.retain(|a| a.name != filename);
        self.artifacts.push(ArtifactEntry::for_bytes(filename, bytes));
    }
}
