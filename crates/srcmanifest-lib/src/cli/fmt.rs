use crate::cli::{FmtParams, FmtTarget};
use crate::error::SrcManifestError;
use std::io::Write;

pub fn run_fmt(params: FmtParams) -> Result<(), SrcManifestError> {
    let FmtParams {
        manifest_path,
        original,
        manifest,
        target,
    } = params;

    let canonical = manifest.to_string();

    match target {
        FmtTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(canonical.as_bytes())?;
            stdout.flush()?;
        }
        FmtTarget::File(output_path) => {
            std::fs::write(&output_path, &canonical).map_err(|e| {
                SrcManifestError::ManifestSave {
                    path: output_path.clone(),
                    reason: e.to_string(),
                }
            })?;
            tracing::info!("Canonical manifest written to {}", output_path.display());
        }
        FmtTarget::Check => {
            if original != canonical {
                return Err(SrcManifestError::ManifestNotCanonical {
                    path: manifest_path,
                });
            }
            tracing::info!("{} is in canonical form", manifest_path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;
    use std::path::PathBuf;

    fn params(original: &str, target: FmtTarget) -> FmtParams {
        FmtParams {
            manifest_path: PathBuf::from("sources"),
            original: original.to_string(),
            manifest: original.parse::<Manifest>().unwrap(),
            target,
        }
    }

    #[test]
    fn test_check_accepts_canonical_manifest() {
        let original = "bundle: https://example.org/b.gz\nmember: m\nfile: https://example.org/a\n";

        run_fmt(params(original, FmtTarget::Check)).unwrap();
    }

    #[test]
    fn test_check_rejects_comments_and_spacing() {
        let original = "# sources\nfile:   https://example.org/a\n";

        let err = run_fmt(params(original, FmtTarget::Check)).unwrap_err();

        assert!(matches!(err, SrcManifestError::ManifestNotCanonical { .. }));
    }

    #[test]
    fn test_writes_canonical_file() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("canonical");
        let original = "bundle: https://example.org/b.gz\nfile: https://example.org/a\nmember: m\n";

        run_fmt(params(original, FmtTarget::File(output_path.clone()))).unwrap();

        assert_eq!(
            std::fs::read_to_string(&output_path).unwrap(),
            "bundle: https://example.org/b.gz\nmember: m\nfile: https://example.org/a\n"
        );
    }
}
