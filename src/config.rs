//! Settings for one run over a data directory.
//!
//! Layers apply in order: built-in defaults, `<data_dir>/okr.toml`,
//! `<data_dir>/.okr/local.toml`, then command-line overrides. Each file is
//! parsed into an [`OkrConfig`] on its own and overlaid key by key, so a
//! layer only replaces what it sets.

use crate::error::{OkrError, Result};
use crate::types::config::OkrConfig;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "okr.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".okr/local.toml";

/// Values given on the command line. They win over every file layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub store: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub data_dir: PathBuf,
    pub config: OkrConfig,
    /// `--store` as given, else `store.path` resolved against the data dir.
    pub store_path: PathBuf,
    /// Config files that contributed, in the order they were applied.
    pub layers: Vec<PathBuf>,
}

pub fn resolve(data_dir: &Path, overrides: &Overrides) -> Result<RunConfig> {
    if !data_dir.is_dir() {
        return Err(OkrError::PathNotFound(data_dir.display().to_string()));
    }

    let mut config = OkrConfig::default();
    let mut layers = Vec::new();
    for name in [DEFAULT_CONFIG_FILE, DEFAULT_LOCAL_FILE] {
        let path = data_dir.join(name);
        if let Some(layer) = read_layer(&path)? {
            config.overlay(layer);
            layers.push(path);
        }
    }
    config.validate()?;

    let store_path = match &overrides.store {
        Some(path) => path.clone(),
        None => data_dir.join(config.store_path()),
    };

    if layers.is_empty() {
        tracing::info!(
            "no {} found in {}; using defaults",
            DEFAULT_CONFIG_FILE,
            data_dir.display()
        );
    } else {
        tracing::debug!(?layers, store = %store_path.display(), "config resolved");
    }

    Ok(RunConfig {
        data_dir: data_dir.to_path_buf(),
        config,
        store_path,
        layers,
    })
}

fn read_layer(path: &Path) -> Result<Option<OkrConfig>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    toml::from_str(&content)
        .map(Some)
        .map_err(|e| OkrError::ConfigParse(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, name: &str, content: &str) {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("config dir should create");
        }
        fs::write(path, content).expect("config should write");
    }

    #[test]
    fn defaults_when_no_config_files() {
        let dir = TempDir::new().expect("temp dir should be created");
        let run = resolve(dir.path(), &Overrides::default()).expect("resolve should work");

        assert!(run.layers.is_empty());
        assert_eq!(run.store_path, dir.path().join("snapshots.json"));
        assert_eq!(run.config.min_distinct_weeks(), 3);
    }

    #[test]
    fn local_layer_overrides_only_the_keys_it_sets() {
        let dir = TempDir::new().expect("temp dir should be created");
        write(
            dir.path(),
            DEFAULT_CONFIG_FILE,
            r#"
[checkin]
min_distinct_weeks = 4

[sources]
accounts = "users.json"
goals = "cycle.json"
"#,
        );
        write(
            dir.path(),
            DEFAULT_LOCAL_FILE,
            "[sources]\ngoals = \"cycle-local.json\"\n",
        );

        let run = resolve(dir.path(), &Overrides::default()).expect("resolve should work");
        let files = run.config.source_files();

        assert_eq!(run.layers.len(), 2);
        assert_eq!(run.config.min_distinct_weeks(), 4);
        assert_eq!(files.accounts, "users.json");
        assert_eq!(files.goals, "cycle-local.json");
        assert_eq!(files.checkins, "checkins.json");
    }

    #[test]
    fn local_layer_applies_without_data_dir_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        write(dir.path(), DEFAULT_LOCAL_FILE, "[checkin]\nmin_distinct_weeks = 2\n");

        let run = resolve(dir.path(), &Overrides::default()).expect("resolve should work");
        assert_eq!(run.layers, vec![dir.path().join(DEFAULT_LOCAL_FILE)]);
        assert_eq!(run.config.min_distinct_weeks(), 2);
    }

    #[test]
    fn relative_store_path_is_under_data_dir_and_flag_wins() {
        let dir = TempDir::new().expect("temp dir should be created");
        write(dir.path(), DEFAULT_CONFIG_FILE, "[store]\npath = \"history/okr.json\"\n");

        let run = resolve(dir.path(), &Overrides::default()).expect("resolve should work");
        assert_eq!(run.store_path, dir.path().join("history/okr.json"));

        let flag = PathBuf::from("/tmp/elsewhere.json");
        let run = resolve(
            dir.path(),
            &Overrides {
                store: Some(flag.clone()),
            },
        )
        .expect("resolve should work");
        assert_eq!(run.store_path, flag);
    }

    #[test]
    fn absolute_store_path_is_kept() {
        let dir = TempDir::new().expect("temp dir should be created");
        write(
            dir.path(),
            DEFAULT_CONFIG_FILE,
            "[store]\npath = \"/srv/okr/snapshots.json\"\n",
        );

        let run = resolve(dir.path(), &Overrides::default()).expect("resolve should work");
        assert_eq!(run.store_path, PathBuf::from("/srv/okr/snapshots.json"));
    }

    #[test]
    fn missing_data_dir_is_rejected() {
        let dir = TempDir::new().expect("temp dir should be created");
        let err = resolve(&dir.path().join("absent"), &Overrides::default())
            .expect_err("resolve should fail");
        assert!(matches!(err, OkrError::PathNotFound(_)));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn merged_config_is_validated() {
        let dir = TempDir::new().expect("temp dir should be created");
        write(dir.path(), DEFAULT_CONFIG_FILE, "[checkin]\nmin_distinct_weeks = 3\n");
        write(dir.path(), DEFAULT_LOCAL_FILE, "[checkin]\nmin_distinct_weeks = 0\n");

        let err = resolve(dir.path(), &Overrides::default()).expect_err("resolve should fail");
        assert!(matches!(err, OkrError::ConfigParse(_)));
    }

    #[test]
    fn syntax_errors_name_the_layer() {
        let dir = TempDir::new().expect("temp dir should be created");
        write(dir.path(), DEFAULT_LOCAL_FILE, "[store\n");

        let err = resolve(dir.path(), &Overrides::default()).expect_err("resolve should fail");
        assert!(err.to_string().contains("local.toml"));
    }
}
