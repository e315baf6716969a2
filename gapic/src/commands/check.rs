use clap::Args;
use eyre::Result;

use super::InputArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub inputs: InputArgs,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let report = ops::check(self.inputs.load())?;
        report.render(&mut TerminalOutput::new());
        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
