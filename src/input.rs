use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::Package;

/// TOML layout: a list of `[[package]]` tables.
#[derive(Debug, Deserialize)]
struct PackageList {
    #[serde(default)]
    package: Vec<Package>,
}

/// Load the packages to evaluate.
///
/// `.json` files hold an array of `{ "id", "declared_licenses" }` objects;
/// anything else is read as TOML with `[[package]]` entries.
pub fn load_packages(path: &Path) -> Result<Vec<Package>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading packages from {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let packages = if is_json {
        serde_json::from_str::<Vec<Package>>(&content)
            .with_context(|| format!("parsing JSON packages in {}", path.display()))?
    } else {
        toml::from_str::<PackageList>(&content)
            .with_context(|| format!("parsing TOML packages in {}", path.display()))?
            .package
    };

    tracing::debug!(count = packages.len(), path = %path.display(), "loaded packages");
    Ok(packages)
}
