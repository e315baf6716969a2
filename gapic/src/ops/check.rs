//! Check operation - loading and model building without generation.

use eyre::Result;
use gapic_codegen::{ModelBuildError, pipeline::Pipeline};

use super::Inputs;
use crate::reports::{ApiSummary, CheckReport, diagnostic_line};

/// Execute the check operation.
///
/// A model build failure is part of the report rather than an error, so every
/// offending construct gets printed.
pub fn check(inputs: Inputs) -> Result<CheckReport> {
    let files = inputs.descriptors.files_to_generate.clone();
    match inputs.run(&Pipeline::new()) {
        Ok(mut ctx) => {
            let warnings = ctx.warnings().map(diagnostic_line).collect();
            let model = ctx.take_model()?;
            Ok(CheckReport {
                files,
                errors: Vec::new(),
                warnings,
                api: Some(ApiSummary::of(&model)),
            })
        }
        Err(report) => match report.downcast_ref::<ModelBuildError>() {
            Some(error) => Ok(CheckReport {
                files,
                errors: error.diagnostics().iter().map(diagnostic_line).collect(),
                warnings: Vec::new(),
                api: None,
            }),
            None => Err(report),
        },
    }
}
