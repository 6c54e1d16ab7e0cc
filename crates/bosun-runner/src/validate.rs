use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::info;

use bosun_core::{FailureReason, Summary};
use bosun_evidence::FsEvidenceStore;
use bosun_gate::Gatekeeper;

use crate::doctor::doctor;
use crate::log::{read_raw_log, write_validated_log};
use crate::Config;

/// The validation pass output: the summary plus where the authoritative log
/// was written.
#[derive(Clone, Debug)]
pub struct ValidationRun {
    pub summary: Summary,
    pub validated_log: PathBuf,
}

/// Imperative shell around the gatekeeper: owns config, paths, and the
/// single sequential pass over a completed run's raw log.
pub struct Validator {
    pub repo_root: PathBuf,
    pub cfg: Config,
    keeper: Gatekeeper,
}

impl Validator {
    pub fn open(repo_root: PathBuf) -> Result<Self> {
        let cfg_path = Config::config_path(&repo_root);
        let cfg = if cfg_path.exists() {
            Config::load_from(&cfg_path)?
        } else {
            let project_id = repo_root.file_name().and_then(|s| s.to_str()).unwrap_or("repo");
            let cfg = Config::default_for_repo(project_id);
            cfg.save_to(&cfg_path)?;
            cfg
        };
        let keeper = Gatekeeper::new(cfg.mutation_map());
        Ok(Self { repo_root, cfg, keeper })
    }

    pub fn init_repo(repo_root: &Path) -> Result<()> {
        let cfg_path = Config::config_path(repo_root);
        if !cfg_path.exists() {
            let project_id = repo_root.file_name().and_then(|s| s.to_str()).unwrap_or("repo");
            Config::default_for_repo(project_id).save_to(&cfg_path)?;
        }
        let cfg = Config::load_from(&cfg_path)?;
        std::fs::create_dir_all(cfg.results_root(repo_root))?;
        Ok(())
    }

    pub fn doctor(&self) -> Result<()> {
        doctor(&self.repo_root, &self.cfg)
    }

    pub fn evidence_store(&self) -> FsEvidenceStore {
        FsEvidenceStore::new(self.cfg.results_root(&self.repo_root))
    }

    /// Remove prior result files so a fresh run starts from nothing.
    pub fn clean(&self) -> Result<()> {
        for path in [
            self.cfg.raw_log_path(&self.repo_root),
            self.cfg.validated_log_path(&self.repo_root),
        ] {
            if path.exists() {
                std::fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
            }
        }
        let artifacts = self.evidence_store().artifacts_root();
        if artifacts.exists() {
            std::fs::remove_dir_all(&artifacts)
                .with_context(|| format!("remove {}", artifacts.display()))?;
        }
        Ok(())
    }

    /// The gatekeeper pass: read the raw log in full, evaluate every case,
    /// write the validated log, and summarize. The raw log is never
    /// modified; re-running over identical input is byte-identical.
    pub fn run(&self, raw_log: Option<&Path>, validated_log: Option<&Path>) -> Result<ValidationRun> {
        let raw_path = raw_log
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cfg.raw_log_path(&self.repo_root));
        let out_path = validated_log
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cfg.validated_log_path(&self.repo_root));
        if out_path == raw_path {
            return Err(anyhow!("validated log must not overwrite the raw log: {}", raw_path.display()));
        }

        let raw = read_raw_log(&raw_path)?;
        info!(cases = raw.len(), log = %raw_path.display(), "validating results log");

        let validated: Vec<_> = raw.iter().map(|rec| self.keeper.validate(rec)).collect();

        // An unset sentinel in the output means an unhandled evaluation
        // path; refuse to certify the run.
        if let Some(rec) = validated
            .iter()
            .find(|r| r.verdict.failure_reason == FailureReason::Unverified)
        {
            return Err(anyhow!(
                "case {} left UNVERIFIED by the gate pipeline",
                rec.case_id.as_str()
            ));
        }

        write_validated_log(&out_path, &validated)?;
        let summary = Summary::from_records(&validated);
        info!(
            total = summary.total,
            passed = summary.passed,
            failed = summary.failed,
            "validation pass complete"
        );
        Ok(ValidationRun { summary, validated_log: out_path })
    }
}
