use crate::cli::CheckParams;
use crate::error::SrcManifestError;
use crate::plan::FetchPlan;
use tracing;

pub fn run_check(params: CheckParams) -> Result<(), SrcManifestError> {
    let CheckParams {
        manifest_path,
        manifest,
    } = params;

    for warning in manifest.warnings() {
        tracing::warn!("{}: {}", manifest_path.display(), warning);
    }

    if manifest.is_empty() {
        tracing::warn!("{} declares no sources", manifest_path.display());
    }

    // A manifest that cannot be planned is not valid either.
    let plan = FetchPlan::from_manifest(String::new(), &manifest)?;

    tracing::info!(
        files = manifest.files().count(),
        bundles = manifest.bundles().count(),
        members = manifest.member_count(),
        planned = plan.entries.len(),
        "Manifest {} is valid",
        manifest_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;
    use std::path::PathBuf;

    fn check(input: &str) -> Result<(), SrcManifestError> {
        let manifest: Manifest = input.parse().unwrap();
        run_check(CheckParams {
            manifest_path: PathBuf::from("sources"),
            manifest,
        })
    }

    #[test]
    fn test_check_accepts_plannable_manifest() {
        check("bundle: https://example.org/b.tar.gz\nmember: x/a.dat\nfile: https://example.org/b.dat\n")
            .unwrap();
    }

    #[test]
    fn test_check_rejects_duplicate_file() {
        let err = check("file: https://example.org/a.dat\nfile: https://example.org/a.dat\n")
            .unwrap_err();

        assert!(matches!(err, SrcManifestError::PlanValidation { .. }));
    }

    #[test]
    fn test_check_rejects_colliding_output_names() {
        let err = check("file: https://a.org/v4.inv\nfile: https://b.org/v4.inv\n").unwrap_err();

        assert!(matches!(err, SrcManifestError::PlanValidation { .. }));
    }
}
