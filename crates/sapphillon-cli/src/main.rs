use clap::{CommandFactory, Parser, Subcommand};
use sapphillon::{
    commands::{
        build::{self, BuildCommand},
        config::{self, ConfigAction},
        init::{self, InitCommand},
    },
    errors::CliError,
    init_tracing, logger, GlobalOpts,
};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sapphillon")]
#[command(version = env!("CARGO_PKG_VERSION"), disable_version_flag = true)]
#[command(
    about = "Sapphillon plugin package builder",
    long_about = "Sapphillon builds plugin projects (package.toml plus a documented \
                  JavaScript/TypeScript entry module) into a single package.js."
)]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,

    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build package.js from a plugin project
    Build(BuildCommand),
    /// Create a new plugin project
    Init(InitCommand),
    /// Show the user configuration
    #[command(subcommand_required = false, arg_required_else_help = false)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version requests are reported through the same path
            let code = if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            if let Err(print_err) = e.print() {
                eprintln!("{}", print_err);
            }
            return code;
        }
    };

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    init_tracing();

    let Some(command) = cli.command else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("{}", e);
        }
        return ExitCode::SUCCESS;
    };

    match run(command, &cli.global) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CliError>() {
                Some(cli_err) => logger::error(&cli_err.to_string()),
                None => logger::error(&format!("{:?}", err)),
            }
            logger::show_log_path();
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, global: &GlobalOpts) -> anyhow::Result<()> {
    match command {
        Commands::Build(cmd) => build::handle_build(cmd, global)?,
        Commands::Init(cmd) => init::handle_init(cmd, global)?,
        Commands::Config { action } => config::handle_config(action, global)?,
    }
    Ok(())
}
