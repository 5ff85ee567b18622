//! Module discovery: find the manifest that owns a source file by
//! walking parent directories, the way `cargo` itself resolves a
//! package root.

use std::fs;
use std::path::{Path, PathBuf};

use truss_core::model::Module;

use crate::error::ExtractError;

#[derive(serde::Deserialize)]
struct CargoManifest {
    package: Option<CargoPackage>,
}

#[derive(serde::Deserialize)]
struct CargoPackage {
    name: String,
}

/// Walk upward from `source_path`'s directory until a `Cargo.toml` is
/// found, and return the [`Module`] it describes.
pub fn discover_module(source_path: &Path) -> Result<Module, ExtractError> {
    let start = source_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let mut dir = start.as_path();
    loop {
        let candidate = dir.join("Cargo.toml");
        if candidate.is_file() {
            let raw = fs::read_to_string(&candidate).map_err(|source| ExtractError::Io {
                path: candidate.display().to_string(),
                source,
            })?;
            let manifest: CargoManifest =
                toml::from_str(&raw).map_err(|source| ExtractError::ManifestSyntax {
                    path: candidate.display().to_string(),
                    source,
                })?;
            let name = manifest
                .package
                .map(|p| p.name)
                .ok_or_else(|| ExtractError::ManifestMissingName {
                    path: candidate.display().to_string(),
                })?;
            return Ok(Module {
                name,
                root_dir: dir.to_path_buf(),
            });
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => {
                return Err(ExtractError::ModuleNotFound {
                    path: source_path.display().to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn finds_manifest_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("Cargo.toml"),
            "[package]\nname = \"widgets\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();
        let src_dir = dir.path().join("src");
        fs::create_dir(&src_dir).unwrap();
        let file = src_dir.join("lib.rs");
        fs::write(&file, "").unwrap();

        let module = discover_module(&file).unwrap();
        assert_eq!(module.name, "widgets");
        assert_eq!(module.root_dir, dir.path());
    }

    #[test]
    fn reports_not_found_with_no_manifest_anywhere_above() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("orphan.rs");
        fs::write(&file, "").unwrap();

        // tempdir roots are not under a Cargo.toml, so this should fail
        // walking up to the filesystem root. Skip on systems where a
        // stray Cargo.toml happens to sit above the temp directory.
        if discover_module(&file).is_ok() {
            return;
        }
        assert!(matches!(
            discover_module(&file),
            Err(ExtractError::ModuleNotFound { .. })
        ));
    }
}
