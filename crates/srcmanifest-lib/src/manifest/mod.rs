mod directive;
mod model;
mod parser;

pub use directive::{
    BundleSource, Directive, FileSource, Keyword, MemberSource, directives_to_string,
    write_directives,
};
pub use model::{BundleGroup, Manifest, ManifestWarning, Source};
pub use parser::{MalformedReason, ParseError, Parser, parse_str};

use crate::error::SrcManifestError;
use sha2::{Digest, Sha256};
use std::path::Path;

pub fn read_manifest_file(path: &Path) -> Result<String, SrcManifestError> {
    std::fs::read_to_string(path).map_err(|e| SrcManifestError::ManifestLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Parses already-read manifest text, attributing errors to `path`.
pub fn parse_manifest(path: &Path, content: &str) -> Result<Manifest, SrcManifestError> {
    let directives = parse_str(content).map_err(|source| SrcManifestError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Manifest::from_directives(directives))
}

pub fn load_manifest(path: &Path) -> Result<Manifest, SrcManifestError> {
    let content = read_manifest_file(path)?;
    parse_manifest(path, &content)
}

pub fn hash_manifest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

pub fn hash_manifest_file(path: &Path) -> Result<String, SrcManifestError> {
    let content = std::fs::read(path).map_err(|e| SrcManifestError::ManifestFileHash {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(hash_manifest(&content))
}
