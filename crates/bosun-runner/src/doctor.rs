use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::Config;

/// Environment checks before touching result files: the results root must
/// exist (or be creatable) and be writable.
pub fn doctor(repo_root: &Path, cfg: &Config) -> Result<()> {
    let root = cfg.results_root(repo_root);
    std::fs::create_dir_all(&root)
        .with_context(|| format!("results root not creatable: {}", root.display()))?;

    let probe = root.join(".bosun-doctor");
    std::fs::write(&probe, b"ok")
        .map_err(|e| anyhow!("results root not writable: {} ({})", root.display(), e))?;
    std::fs::remove_file(&probe).ok();

    if cfg.results.raw_log == cfg.results.validated_log {
        return Err(anyhow!("raw_log and validated_log must be distinct files"));
    }
    Ok(())
}
