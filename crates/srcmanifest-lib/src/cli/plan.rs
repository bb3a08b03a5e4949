use crate::cli::PlanParams;
use crate::error::SrcManifestError;
use crate::plan::FetchPlan;
use tracing;

pub fn run_plan(params: PlanParams) -> Result<(), SrcManifestError> {
    let PlanParams {
        manifest_path,
        manifest,
        manifest_hash,
        plan_path,
    } = params;

    for warning in manifest.warnings() {
        tracing::warn!("{}: {}", manifest_path.display(), warning);
    }

    tracing::info!("Deriving fetch plan from {}", manifest_path.display());
    let plan = FetchPlan::from_manifest(manifest_hash, &manifest)?;

    tracing::info!("Saving fetch plan to {}", plan_path.display());
    plan.save_to_file(&plan_path)?;

    tracing::info!(
        "Fetch plan with {} entries created successfully at {}",
        plan.entries.len(),
        plan_path.display()
    );
    Ok(())
}
