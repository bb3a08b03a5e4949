use crate::manifest::Manifest;
use crate::plan::FetchPlan;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CheckParams {
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FmtTarget {
    Stdout,
    File(PathBuf),
    /// Only compare against the manifest as written
    Check,
}

#[derive(Debug, Clone)]
pub struct FmtParams {
    pub manifest_path: PathBuf,
    pub original: String,
    pub manifest: Manifest,
    pub target: FmtTarget,
}

#[derive(Debug, Clone)]
pub struct PlanParams {
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
    pub manifest_hash: String,
    pub plan_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct StatusParams {
    pub plan: FetchPlan,
    pub plan_path: PathBuf,
    pub input_dir: PathBuf,
    /// Hash of the manifest as it is now, when the manifest could be read
    pub manifest_hash: Option<String>,
}
