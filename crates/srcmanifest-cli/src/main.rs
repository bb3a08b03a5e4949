use srcmanifest_lib::cli::{
    ResolvedCommand, parse_args, resolve_command, run_check, run_fmt, run_plan, run_status,
};
use srcmanifest_lib::error::SrcManifestError;

fn main() -> Result<(), SrcManifestError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.config_path.as_deref(), args.command)?;

    match command {
        ResolvedCommand::Check(params) => run_check(params)?,
        ResolvedCommand::Fmt(params) => run_fmt(params)?,
        ResolvedCommand::Plan(params) => run_plan(params)?,
        ResolvedCommand::Status(params) => run_status(params)?,
    }

    Ok(())
}
