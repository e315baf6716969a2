use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use super::InputArgs;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Write a JSON snapshot of the model after each phase to <OUTPUT>/.gapic/debug
    #[arg(long)]
    pub visualize: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let inputs = self.inputs.load();
        let report = ops::generate(
            inputs,
            GenerateOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
                visualize: self.visualize,
            },
        )?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
