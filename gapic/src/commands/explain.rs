use clap::Args;
use eyre::Result;

use super::InputArgs;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct ExplainCommand {
    #[command(flatten)]
    pub inputs: InputArgs,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let report = ops::explain(self.inputs.load())?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
