use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::{
    self,
    answer::{LocationArgs, SetArgs, ToggleArgs},
    export::{EmailArgs, ExportArgs},
    schema::SchemaArgs,
    show::ShowArgs,
};
use crate::config::{Overrides, Settings};
use crate::session::Session;

#[derive(Parser, Debug)]
#[command(
    name = "sre-readiness",
    about = "Fill in, track and export SRE readiness assessments",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Start from this shareable link (query string or full URL)
    #[arg(long = "link", value_name = "QUERY|URL", global = true)]
    link: Option<String>,

    #[arg(long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Where links and names are kept between runs
    #[arg(long = "state-dir", value_name = "PATH", global = true)]
    state_dir: Option<PathBuf>,

    /// Separates assessments sharing one state directory
    #[arg(long = "origin", value_name = "NAME", global = true)]
    origin: Option<String>,

    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show progress, onboarding stats and open sections
    Show(ShowArgs),
    /// Set a metadata field or answer a question
    Set(SetArgs),
    /// Select or clear the deployment location
    Location(LocationArgs),
    /// Toggle one checklist item
    Toggle(ToggleArgs),
    /// Clear every answer and the stored names
    Reset,
    /// Write the completed assessment as CSV or JSON
    Export(ExportArgs),
    /// Print the hand-off e-mail and its mailto link
    Email(EmailArgs),
    /// Print the effective questionnaire schema
    Schema(SchemaArgs),
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let settings = Settings::resolve(&Overrides {
        config: cli.config.clone(),
        state_dir: cli.state_dir.clone(),
        origin: cli.origin.clone(),
    })?;

    let open = || Session::open(&settings, cli.link.as_deref());
    match &cli.command {
        Commands::Show(args) => cmd::show::run(args, &open()?, &settings),
        Commands::Set(args) => cmd::answer::run_set(args, &mut open()?, &settings),
        Commands::Location(args) => cmd::answer::run_location(args, &mut open()?, &settings),
        Commands::Toggle(args) => cmd::answer::run_toggle(args, &mut open()?, &settings),
        Commands::Reset => cmd::answer::run_reset(&mut open()?),
        Commands::Export(args) => cmd::export::run_export(args, &open()?),
        Commands::Email(args) => cmd::export::run_email(args, &open()?, &settings),
        Commands::Schema(args) => cmd::schema::run(args, &settings),
    }
}

/// Logs go to stderr. `RUST_LOG` wins unless `--verbose` asks for debug.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
