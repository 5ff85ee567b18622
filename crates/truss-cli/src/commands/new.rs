//! `truss new <name>`: scaffold a brand-new service's source file and
//! crate manifest, using the same embedded-template mechanism as
//! artifact generation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use truss_codegen::{build_view, ContextView, Renderer};
use truss_core::naming;

pub fn run(name: &str, dir: Option<&Path>) -> Result<String> {
    if !name.ends_with("Service") {
        bail!("service name '{name}' should end with 'Service', e.g. 'PricingService'");
    }

    let dir: PathBuf = dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(naming::to_kebab_case(name)));
    if dir.exists() {
        bail!("{} already exists", dir.display());
    }

    let renderer = Renderer::new().context("failed to initialize the template engine")?;
    let view = ContextView {
        module_name: naming::to_snake_case(name),
        services: Vec::new(),
        records: Vec::new(),
    };
    let cargo_toml = renderer
        .render("rust.scaffold.cargo_toml", &view)
        .context("failed to render the scaffold Cargo.toml template")?;

    let src_dir = dir.join("src");
    fs::create_dir_all(&src_dir).with_context(|| format!("failed to create {}", src_dir.display()))?;
    fs::write(dir.join("Cargo.toml"), cargo_toml).context("failed to write Cargo.toml")?;
    fs::write(src_dir.join("lib.rs"), skeleton_source(name)).context("failed to write src/lib.rs")?;

    Ok(format!("scaffolded {} in {}", name, dir.display()))
}

fn skeleton_source(name: &str) -> String {
    let base = name.strip_suffix("Service").unwrap_or(name);
    let example = format!("{base}Example");
    format!(
        r#"struct {example}Request {{
    pub id: String,
}}

struct {example}Response {{
    pub ok: bool,
}}

impl {name} {{
    /// GET /{snake}/:id
    pub async fn example(&self, req: {example}Request) -> Result<{example}Response, Error> {{
        unimplemented!()
    }}
}}
"#,
        name = name,
        example = example,
        snake = naming::to_kebab_case(name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_names_not_ending_in_service() {
        let dir = tempfile::tempdir().unwrap();
        let err = run("Pricing", Some(&dir.path().join("out"))).unwrap_err();
        assert!(err.to_string().contains("should end with 'Service'"));
    }

    #[test]
    fn scaffolds_a_manifest_and_source_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("pricing-service");
        run("PricingService", Some(&target)).unwrap();
        assert!(target.join("Cargo.toml").is_file());
        assert!(target.join("src/lib.rs").is_file());
    }
}
