//! Hash manifests for generated scripts.
//!
//! A generated `login.t` is written together with `login.t.manifest.json`,
//! which records a blake3 hash of the script and where it came from. Editing
//! the script by hand makes [`verify`] fail with the regenerate command.

use crate::error::{GenError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where a generated file came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    /// Tool that generated the file
    pub tool: String,
    /// Tool version
    pub version: String,
    /// Blake3 hash of the recorded input
    pub input_hash: String,
    /// RFC 3339 generation time
    pub timestamp: String,
    /// Command to regenerate
    pub regenerate_cmd: String,
}

impl GenerationMetadata {
    /// Metadata for output generated now from `input`.
    #[must_use]
    pub fn for_input(input: &str, regenerate_cmd: impl Into<String>) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            input_hash: hash_contents(input),
            timestamp: chrono::Utc::now().to_rfc3339(),
            regenerate_cmd: regenerate_cmd.into(),
        }
    }
}

/// Manifest stored next to a generated file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileManifest {
    /// Version of manifest format
    pub manifest_version: u32,
    /// Generated file name
    pub output_path: String,
    /// Blake3 hash of the generated contents
    pub output_hash: String,
    /// Generation metadata
    pub generation: GenerationMetadata,
}

impl FileManifest {
    /// Current manifest format version.
    pub const VERSION: u32 = 1;

    #[must_use]
    pub fn new(
        output_path: impl Into<String>,
        output_hash: impl Into<String>,
        generation: GenerationMetadata,
    ) -> Self {
        Self {
            manifest_version: Self::VERSION,
            output_path: output_path.into(),
            output_hash: output_hash.into(),
            generation,
        }
    }

    /// `<file>.manifest.json` beside `generated_path`.
    #[must_use]
    pub fn manifest_path(generated_path: &Path) -> PathBuf {
        let mut filename = generated_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        filename.push_str(".manifest.json");
        generated_path.with_file_name(filename)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Blake3 hex digest of `contents`.
#[must_use]
pub fn hash_contents(contents: &str) -> String {
    blake3::hash(contents.as_bytes()).to_hex().to_string()
}

/// Check a generated file against its manifest.
pub fn verify(generated_path: &Path) -> Result<()> {
    let manifest_path = FileManifest::manifest_path(generated_path);
    let manifest = FileManifest::read(&manifest_path).map_err(|_| GenError::ManifestError {
        path: generated_path.display().to_string(),
        reason: format!("manifest not found at {}", manifest_path.display()),
    })?;

    let contents = std::fs::read_to_string(generated_path)?;
    let actual = hash_contents(&contents);
    if actual != manifest.output_hash {
        tracing::warn!(
            path = %generated_path.display(),
            regenerate = %manifest.generation.regenerate_cmd,
            "generated script was edited by hand"
        );
        return Err(GenError::HashMismatch {
            path: generated_path.display().to_string(),
            expected: manifest.output_hash,
            actual,
        });
    }
    Ok(())
}

/// Write `contents` to `path` plus its manifest.
pub fn write_with_manifest(path: &Path, contents: &str, metadata: GenerationMetadata) -> Result<()> {
    std::fs::write(path, contents)?;
    let manifest = FileManifest::new(
        path.file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default(),
        hash_contents(contents),
        metadata,
    );
    manifest.write(&FileManifest::manifest_path(path))
}
