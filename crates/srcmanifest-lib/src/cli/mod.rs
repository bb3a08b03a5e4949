mod args;
mod check;
mod fmt;
mod params;
mod plan;
mod resolved_command;
mod status;

pub use args::{Args, Command, parse_args};
pub use check::run_check;
pub use fmt::run_fmt;
pub use params::{CheckParams, FmtParams, FmtTarget, PlanParams, StatusParams};
pub use plan::run_plan;
pub use resolved_command::{ResolvedCommand, resolve_command};
pub use status::run_status;
