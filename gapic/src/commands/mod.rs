mod check;
mod completions;
mod explain;
mod generate;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use explain::ExplainCommand;
use gapic_core::Transport;
use generate::GenerateCommand;

use crate::ops::{Inputs, Protos};

/// Extension trait for exiting on descriptor errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for gapic_descriptor::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "gapic")]
#[command(version)]
#[command(about = "Generate Rust client libraries from annotated protobuf APIs")]
pub(crate) struct Cli {
    /// Log at debug level (overridden by GAPIC_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a client library
    Generate(GenerateCommand),

    /// Load and validate an API without generating code
    Check(CheckCommand),

    /// Show the pipeline and how every method will be exposed
    Explain(ExplainCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// The API to load, shared by every command that reads protos.
#[derive(Args)]
pub(crate) struct InputArgs {
    /// Proto files to generate, as import paths
    #[arg(required = true)]
    pub protos: Vec<String>,

    /// Directory imports are resolved against (repeatable)
    #[arg(short = 'I', long = "include")]
    pub includes: Vec<PathBuf>,

    /// Read a binary FileDescriptorSet instead of compiling sources
    #[arg(long, conflicts_with = "includes")]
    pub descriptor_set: Option<PathBuf>,

    /// gRPC service config with retry and timeout defaults
    #[arg(long)]
    pub service_config: Option<PathBuf>,

    /// Path to gapic.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Transports to generate (overrides gapic.toml)
    #[arg(long)]
    pub transport: Option<Transport>,
}

impl InputArgs {
    pub fn load(&self) -> Inputs {
        let protos = match &self.descriptor_set {
            Some(path) => Protos::DescriptorSet(path),
            None => Protos::Sources(&self.includes),
        };
        Inputs::load(
            &self.protos,
            protos,
            self.service_config.as_deref(),
            self.config.as_deref(),
            self.transport,
        )
        .unwrap_or_exit()
    }
}
