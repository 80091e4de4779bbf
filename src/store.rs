use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::CaseError;
use crate::parser::Case;

const INDENT: &[u8] = b"    ";

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))
}

pub fn case_path(dir: &Path, case: &Case) -> PathBuf {
    dir.join(format!("{}.json", case.dataserno))
}

/// Pretty JSON, four-space indent, non-ASCII kept as-is.
pub fn encode(case: &Case) -> Result<Vec<u8>, CaseError> {
    let mut out = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    case.serialize(&mut ser).map_err(|source| CaseError::Encode {
        id: case.dataserno.clone(),
        source,
    })?;
    Ok(out)
}

/// Write the case document, replacing any earlier one for the same id.
pub fn save(dir: &Path, case: &Case) -> Result<PathBuf, CaseError> {
    let bytes = encode(case)?;
    let path = case_path(dir, case);
    fs::write(&path, bytes).map_err(|source| CaseError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

pub fn load(path: &Path) -> Result<Case> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Case documents in `dir`, sorted by file name.
pub fn list(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read {}", dir.display()))?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    Ok(paths)
}
