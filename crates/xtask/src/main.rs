use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    manifest_path: PathBuf,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    kind: Option<String>,
}

/// Workspace crates each crate may depend on. Anything `sheetkeeper-*` not
/// listed here is a layering violation.
fn allowed_internal_deps() -> BTreeMap<&'static str, BTreeSet<&'static str>> {
    BTreeMap::from([
        ("sheetkeeper-domain", BTreeSet::new()),
        ("sheetkeeper-shared", BTreeSet::from(["sheetkeeper-domain"])),
        (
            "sheetkeeper-engine",
            BTreeSet::from(["sheetkeeper-domain", "sheetkeeper-shared"]),
        ),
        (
            "sheetkeeper-player",
            BTreeSet::from(["sheetkeeper-domain", "sheetkeeper-shared"]),
        ),
    ])
}

/// Crates whose names must never show up in the pure domain crate's sources.
const DOMAIN_FORBIDDEN_IMPORTS: &[&str] = &["tokio", "axum", "sqlx", "reqwest", "dioxus"];

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata output")?;

    let mut violations = dependency_violations(&metadata);

    if let Some(domain) = metadata
        .packages
        .iter()
        .find(|p| p.name == "sheetkeeper-domain")
    {
        let src = domain
            .manifest_path
            .parent()
            .map(|dir| dir.join("src"))
            .context("domain manifest has no parent directory")?;
        violations.extend(forbidden_imports(&src, DOMAIN_FORBIDDEN_IMPORTS)?);
    }

    if violations.is_empty() {
        println!("arch-check: OK ({} packages)", metadata.packages.len());
        return Ok(());
    }

    for violation in &violations {
        eprintln!("arch-check: {violation}");
    }
    anyhow::bail!("arch-check found {} violation(s)", violations.len())
}

fn dependency_violations(metadata: &Metadata) -> Vec<String> {
    let rules = allowed_internal_deps();
    let mut violations = Vec::new();

    for package in &metadata.packages {
        let Some(allowed) = rules.get(package.name.as_str()) else {
            continue;
        };
        for dep in &package.dependencies {
            // dev-dependencies may reach across layers for test fixtures
            if dep.kind.as_deref() == Some("dev") {
                continue;
            }
            if dep.name.starts_with("sheetkeeper-") && !allowed.contains(dep.name.as_str()) {
                violations.push(format!("{} must not depend on {}", package.name, dep.name));
            }
        }
    }

    violations
}

fn forbidden_imports(src: &Path, crates: &[&str]) -> anyhow::Result<Vec<String>> {
    let pattern = format!(r"\b(?:use\s+|::)?({})::", crates.join("|"));
    let re = regex_lite::Regex::new(&pattern).context("building import pattern")?;

    let mut violations = Vec::new();
    for file in rust_files(src)? {
        let text = std::fs::read_to_string(&file)
            .with_context(|| format!("reading {}", file.display()))?;
        for (line_no, line) in text.lines().enumerate() {
            if line.trim_start().starts_with("//") {
                continue;
            }
            if let Some(caps) = re.captures(line) {
                violations.push(format!(
                    "{}:{}: domain code imports `{}`",
                    file.display(),
                    line_no + 1,
                    &caps[1]
                ));
            }
        }
    }
    Ok(violations)
}

fn rust_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).with_context(|| format!("listing {}", dir.display()))? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}
