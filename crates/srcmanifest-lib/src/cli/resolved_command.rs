use crate::cli::args::Command;
use crate::cli::params::{CheckParams, FmtParams, FmtTarget, PlanParams, StatusParams};
use crate::config::{Config, load_config};
use crate::error::SrcManifestError;
use crate::manifest::{
    hash_manifest, hash_manifest_file, load_manifest, parse_manifest, read_manifest_file,
};
use crate::plan::FetchPlan;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    Check(CheckParams),
    Fmt(FmtParams),
    Plan(PlanParams),
    Status(StatusParams),
}

fn resolve_path(
    name: &str,
    explicit: Option<String>,
    fallback: &Path,
) -> Result<PathBuf, SrcManifestError> {
    let path = explicit.map(PathBuf::from).unwrap_or_else(|| fallback.to_path_buf());
    if path.as_os_str().is_empty() {
        return Err(SrcManifestError::CliArgumentValidation {
            details: format!("{name} must not be empty."),
        });
    }
    Ok(path)
}

pub fn resolve_command(
    config_path: Option<&str>,
    command: Command,
) -> Result<ResolvedCommand, SrcManifestError> {
    let app_config: Config = load_config(config_path)?;

    match command {
        Command::Check { manifest_path } => {
            let manifest_path = resolve_path("manifest", manifest_path, &app_config.manifest)?;
            let manifest = load_manifest(&manifest_path)?;

            Ok(ResolvedCommand::Check(CheckParams {
                manifest_path,
                manifest,
            }))
        }
        Command::Fmt {
            manifest_path,
            output_path,
            check,
        } => {
            let manifest_path = resolve_path("manifest", manifest_path, &app_config.manifest)?;
            let original = read_manifest_file(&manifest_path)?;
            let manifest = parse_manifest(&manifest_path, &original)?;

            let target = match (output_path, check) {
                (Some(_), true) => {
                    return Err(SrcManifestError::CliArgumentValidation {
                        details: "--output and --check cannot be combined.".to_string(),
                    });
                }
                (Some(output_path), false) => {
                    FmtTarget::File(resolve_path("output", Some(output_path), Path::new(""))?)
                }
                (None, true) => FmtTarget::Check,
                (None, false) => FmtTarget::Stdout,
            };

            Ok(ResolvedCommand::Fmt(FmtParams {
                manifest_path,
                original,
                manifest,
                target,
            }))
        }
        Command::Plan {
            manifest_path,
            plan_path,
        } => {
            let manifest_path = resolve_path("manifest", manifest_path, &app_config.manifest)?;
            let plan_path = resolve_path("plan", plan_path, &app_config.plan)?;

            let content = read_manifest_file(&manifest_path)?;
            let manifest = parse_manifest(&manifest_path, &content)?;

            Ok(ResolvedCommand::Plan(PlanParams {
                manifest_path,
                manifest,
                manifest_hash: hash_manifest(content.as_bytes()),
                plan_path,
            }))
        }
        Command::Status {
            manifest_path,
            plan_path,
            input_dir,
        } => {
            let plan_path = resolve_path("plan", plan_path, &app_config.plan)?;
            let input_dir = resolve_path("input-dir", input_dir, &app_config.input_dir)?;
            let plan = FetchPlan::load_from_file(&plan_path)?;

            // An explicitly named manifest must be readable; the configured one is optional.
            let manifest_hash = match manifest_path {
                Some(manifest_path) => {
                    let manifest_path =
                        resolve_path("manifest", Some(manifest_path), &app_config.manifest)?;
                    Some(hash_manifest_file(&manifest_path)?)
                }
                None => match hash_manifest_file(&app_config.manifest) {
                    Ok(hash) => Some(hash),
                    Err(err) => {
                        tracing::debug!("Not comparing plan against manifest: {}", err);
                        None
                    }
                },
            };

            Ok(ResolvedCommand::Status(StatusParams {
                plan,
                plan_path,
                input_dir,
                manifest_hash,
            }))
        }
    }
}
