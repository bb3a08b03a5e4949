use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Check {
        manifest_path: Option<String>,
    },
    Fmt {
        manifest_path: Option<String>,
        output_path: Option<String>,
        check: bool,
    },
    Plan {
        manifest_path: Option<String>,
        plan_path: Option<String>,
    },
    Status {
        manifest_path: Option<String>,
        plan_path: Option<String>,
        input_dir: Option<String>,
    },
}

pub struct Args {
    pub config_path: Option<String>,
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "srcmanifest",
    version,
    author = "Nick Guletskii",
    about = "Validate dataset source manifests and derive fetch plans from them"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count,
        global = true
    )]
    verbose: u8,

    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Sets a custom config file (YAML or TOML)",
        global = true
    )]
    config: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Parse the manifest and report problems
    Check {
        #[arg(
            short = 'm',
            long = "manifest",
            value_name = "FILE",
            help = "Sets the manifest path (default: <config.manifest>)"
        )]
        manifest: Option<String>,
    },

    /// Print the manifest in canonical form
    Fmt {
        #[arg(
            short = 'm',
            long = "manifest",
            value_name = "FILE",
            help = "Sets the manifest path (default: <config.manifest>)"
        )]
        manifest: Option<String>,

        #[arg(
            short = 'o',
            long = "output",
            value_name = "FILE",
            help = "Writes the canonical manifest to a file instead of stdout",
            conflicts_with = "check"
        )]
        output: Option<String>,

        #[arg(
            long = "check",
            help = "Fails if the manifest is not already in canonical form"
        )]
        check: bool,
    },

    /// Derive a fetch plan from the manifest
    Plan {
        #[arg(
            short = 'm',
            long = "manifest",
            value_name = "FILE",
            help = "Sets the manifest path (default: <config.manifest>)"
        )]
        manifest: Option<String>,

        #[arg(
            short = 'o',
            long = "output",
            value_name = "FILE",
            help = "Sets the output plan path (default: <config.plan>)"
        )]
        output: Option<String>,
    },

    /// Report which planned files are present in the input directory
    Status {
        #[arg(
            short = 'm',
            long = "manifest",
            value_name = "FILE",
            help = "Manifest to compare the plan's hash against (default: <config.manifest>)"
        )]
        manifest: Option<String>,

        #[arg(
            short = 'p',
            long = "plan",
            value_name = "FILE",
            help = "Sets the input plan path (default: <config.plan>)"
        )]
        plan: Option<String>,

        #[arg(
            short = 'i',
            long = "input-dir",
            value_name = "DIR",
            help = "Sets the input directory (default: <config.input_dir>)"
        )]
        input_dir: Option<String>,
    },
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    let command = match cli.command {
        CliCommand::Check { manifest } => Command::Check {
            manifest_path: manifest,
        },
        CliCommand::Fmt {
            manifest,
            output,
            check,
        } => Command::Fmt {
            manifest_path: manifest,
            output_path: output,
            check,
        },
        CliCommand::Plan { manifest, output } => Command::Plan {
            manifest_path: manifest,
            plan_path: output,
        },
        CliCommand::Status {
            manifest,
            plan,
            input_dir,
        } => Command::Status {
            manifest_path: manifest,
            plan_path: plan,
            input_dir,
        },
    };

    Args {
        config_path: cli.config,
        command,
        log_level,
    }
}
