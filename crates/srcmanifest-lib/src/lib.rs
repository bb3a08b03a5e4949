pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod plan;
pub mod status;

pub use crate::config::Config;
pub use crate::error::SrcManifestError;
pub use crate::manifest::{Directive, Manifest, ParseError, Parser};
pub use crate::plan::FetchPlan;
