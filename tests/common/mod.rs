//! Common test utilities and helpers

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A data root, a config file and a state location inside one temp dir.
pub struct TestContext {
    temp_dir: TempDir,
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub state_path: PathBuf,
}

impl TestContext {
    /// Context with a single job `tmp` over `root`.
    pub fn new(days: u64, exclusions: &[&str]) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("data");
        fs::create_dir_all(&root).unwrap();

        let ctx = Self {
            config_path: temp_dir.path().join("config.json"),
            state_path: temp_dir.path().join("state").join("state.json"),
            root,
            temp_dir,
        };
        ctx.write_config(&serde_json::json!({
            "tmp": {
                "path": ctx.root.to_str().unwrap(),
                "days": days,
                "Exceptions": exclusions,
            }
        }));
        ctx
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_config(&self, config: &serde_json::Value) {
        fs::write(&self.config_path, config.to_string()).unwrap();
    }

    pub fn touch(&self, rel: &str) -> PathBuf {
        let path = self.root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "x").unwrap();
        path
    }

    /// Overwrite the state document with the given first-seen entries.
    pub fn write_state(&self, entries: &[(&Path, f64)]) {
        let files: serde_json::Map<String, serde_json::Value> = entries
            .iter()
            .map(|(path, ts)| (path.to_str().unwrap().to_string(), serde_json::json!(ts)))
            .collect();
        fs::create_dir_all(self.state_path.parent().unwrap()).unwrap();
        fs::write(
            &self.state_path,
            serde_json::json!({ "files": files }).to_string(),
        )
        .unwrap();
    }

    pub fn read_state(&self) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(&self.state_path).unwrap()).unwrap()
    }

    pub fn tracked(&self, path: &Path) -> Option<f64> {
        self.read_state()["files"][path.to_str().unwrap()].as_f64()
    }

    /// The binary with `--config` and `--state-file` pointed at this context.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("folder-janitor").unwrap();
        cmd.arg("--config")
            .arg(&self.config_path)
            .arg("--state-file")
            .arg(&self.state_path);
        cmd
    }
}
