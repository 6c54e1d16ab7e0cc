use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use bosun_core::{MutationKind, MutationMap};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub project: ProjectConfig,
    pub results: ResultsConfig,
    #[serde(default)]
    pub mutations: Vec<MutationEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResultsConfig {
    /// Root directory for logs and evidence artifacts; `~` is expanded.
    pub root: String,
    pub raw_log: String,
    pub validated_log: String,
}

/// One row of the action -> table -> strategy mapping, as configured.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MutationEntry {
    pub action: String,
    pub table: String,
    pub kind: MutationKind,
}

impl Config {
    pub fn default_for_repo(project_id: &str) -> Self {
        Self {
            project: ProjectConfig { id: project_id.to_string() },
            results: ResultsConfig {
                root: ".bosun/results".to_string(),
                raw_log: "results.jsonl".to_string(),
                validated_log: "results.validated.jsonl".to_string(),
            },
            mutations: vec![
                MutationEntry {
                    action: "create_work_order".into(),
                    table: "work_orders".into(),
                    kind: MutationKind::Insert,
                },
                MutationEntry {
                    action: "add_part".into(),
                    table: "parts".into(),
                    kind: MutationKind::Insert,
                },
                MutationEntry {
                    action: "update_work_order_status".into(),
                    table: "work_orders".into(),
                    kind: MutationKind::Update,
                },
                MutationEntry {
                    action: "update_equipment_status".into(),
                    table: "equipment".into(),
                    kind: MutationKind::Update,
                },
            ],
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| "parse bosun.toml")?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn mutation_map(&self) -> MutationMap {
        self.mutations.iter().fold(MutationMap::new(), |map, e| {
            map.with(e.action.clone(), e.table.clone(), e.kind)
        })
    }

    pub fn results_root(&self, repo_root: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(&self.results.root).to_string();
        let p = PathBuf::from(expanded);
        if p.is_absolute() {
            p
        } else {
            repo_root.join(p)
        }
    }

    pub fn raw_log_path(&self, repo_root: &Path) -> PathBuf {
        self.results_root(repo_root).join(&self.results.raw_log)
    }

    pub fn validated_log_path(&self, repo_root: &Path) -> PathBuf {
        self.results_root(repo_root).join(&self.results.validated_log)
    }

    pub fn config_path(repo_root: &Path) -> PathBuf {
        repo_root.join(".bosun").join("bosun.toml")
    }
}
