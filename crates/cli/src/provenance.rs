use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Metadata recorded next to a search artifact.
pub struct Payload {
    pub params: Value,
    /// Files written alongside the primary artifact.
    pub extra_outputs: Vec<PathBuf>,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            extra_outputs: Vec::new(),
        }
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.extra_outputs.push(path.into());
        self
    }
}

/// Provenance block without outputs, as printed by `report`.
pub fn block(params: Value) -> Value {
    json!({
        "code_rev": current_git_rev(),
        "version": packing::VERSION,
        "params": params,
        "outputs": []
    })
}

/// Write `<artifact>.provenance.json` with the git commit, crate version,
/// callsite, params, and outputs.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let outputs: Vec<String> = std::iter::once(artifact)
        .chain(payload.extra_outputs.iter().map(PathBuf::as_path))
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    let doc = json!({
        "code_rev": current_git_rev(),
        "version": packing::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "params": payload.params,
        "outputs": outputs
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return from_env.to_string();
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_replaces_extension() {
        let base = Path::new("/tmp/runs/p2.parquet");
        assert_eq!(
            provenance_path(base),
            Path::new("/tmp/runs/p2.provenance.json")
        );
    }

    #[test]
    fn sidecar_lists_every_output() {
        let dir = tempdir().unwrap();
        let trace = dir.path().join("trace.csv");
        let summary = dir.path().join("trace.summary.json");
        fs::write(&trace, "step\n").unwrap();
        let payload = Payload::new(json!({"group": "p2"})).with_output(&summary);
        let prov_path = write_sidecar(&trace, payload).unwrap();
        assert!(prov_path.exists());
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], trace.to_string_lossy().as_ref());
        assert_eq!(parsed["outputs"][1], summary.to_string_lossy().as_ref());
        assert_eq!(parsed["params"]["group"], "p2");
        assert_eq!(parsed["version"], packing::VERSION);
    }

    #[test]
    fn block_has_no_outputs() {
        let doc = block(json!({}));
        assert_eq!(doc["outputs"], json!([]));
        assert!(doc["code_rev"].is_string());
    }
}
