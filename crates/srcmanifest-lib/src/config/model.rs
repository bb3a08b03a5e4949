use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Source manifest listing the datasets to fetch
    pub manifest: PathBuf,
    /// Directory the fetch process stores downloaded datasets in
    pub input_dir: PathBuf,
    /// Where the derived fetch plan is written and read
    pub plan: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from(Config::DEFAULT_MANIFEST),
            input_dir: PathBuf::from(Config::DEFAULT_INPUT_DIR),
            plan: PathBuf::from(Config::DEFAULT_PLAN),
        }
    }
}

impl Config {
    pub const DEFAULT_MANIFEST: &'static str = "config/sources";
    pub const DEFAULT_INPUT_DIR: &'static str = "input";
    pub const DEFAULT_PLAN: &'static str = "srcmanifest.plan.json";
}
