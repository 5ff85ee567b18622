//! Output placement and formatting: where a rendered artifact lands on
//! disk, and the post-processing pass that runs before it does.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::GenerateError;

/// For input `dir/name.ext`, a generated artifact named `artifact` is
/// written to `dir/gen/name.gen.<artifact>`. `artifact` already carries
/// its own extension, e.g. `"gateway.rs"`.
pub fn artifact_path(input_path: &Path, artifact: &str) -> PathBuf {
    let dir = input_path.parent().unwrap_or_else(|| Path::new("."));
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "module".to_string());
    dir.join("gen").join(format!("{stem}.gen.{artifact}"))
}

/// Write `source` to `path`, creating `path`'s parent directory (the
/// `gen/` subdirectory) if absent, recreating the file if it already
/// exists, and running the host formatter first when one is recognized
/// for the artifact's extension.
pub fn write_artifact(path: &Path, source: &str) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| GenerateError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }
    let formatted = format_source(path, source);
    std::fs::write(path, formatted.as_bytes()).map_err(|source| GenerateError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Run the host language's formatter over `source` when `path`'s
/// extension identifies a language this generator knows how to format.
/// Any formatter failure (binary missing, non-zero exit) is swallowed:
/// an unformatted artifact is still a valid one.
fn format_source(path: &Path, source: &str) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some("rs") => format_with_rustfmt(source).unwrap_or_else(|| source.to_string()),
        _ => source.to_string(),
    }
}

fn format_with_rustfmt(source: &str) -> Option<String> {
    use std::io::Write;

    let mut child = Command::new("rustfmt")
        .arg("--edition=2021")
        .arg("--emit=stdout")
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::null())
        .spawn()
        .ok()?;

    child.stdin.take()?.write_all(source.as_bytes()).ok()?;
    let output = child.wait_with_output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}
