use crate::cli::StatusParams;
use crate::error::SrcManifestError;
use crate::status::inspect_input_dir;
use tracing;

pub fn run_status(params: StatusParams) -> Result<(), SrcManifestError> {
    let StatusParams {
        plan,
        plan_path,
        input_dir,
        manifest_hash,
    } = params;

    if let Some(manifest_hash) = manifest_hash
        && manifest_hash != plan.manifest_hash
    {
        tracing::warn!(
            "Manifest has changed since {} was created. \
             Consider regenerating it with 'srcmanifest plan'",
            plan_path.display()
        );
    }

    let report = inspect_input_dir(&plan, &input_dir);
    for status in report.missing() {
        match &status.entry.member {
            Some(member) => tracing::warn!(
                "Missing {} (member {} of {})",
                status.path.display(),
                member,
                status.entry.url
            ),
            None => tracing::warn!(
                "Missing {} (from {})",
                status.path.display(),
                status.entry.url
            ),
        }
    }

    tracing::info!(
        "{} of {} planned files present in {}",
        report.present_count(),
        report.entries.len(),
        input_dir.display()
    );

    if report.is_complete() {
        Ok(())
    } else {
        Err(SrcManifestError::MissingInputs {
            input_dir,
            missing: report.missing_count(),
            total: report.entries.len(),
        })
    }
}
