//! Explain operation - pipeline explanation.

use eyre::{Context, Result};
use gapic_codegen::pipeline::{Pipeline, method_location};

use super::Inputs;
use crate::reports::{ExplainReport, MethodInfo, StepInfo};

/// Execute the explain operation.
///
/// Runs the pipeline and returns its phases, its lints and the call shape
/// resolved for every method.
pub fn explain(inputs: Inputs) -> Result<ExplainReport> {
    let pipeline = Pipeline::new();
    let phases = pipeline
        .phase_info()
        .into_iter()
        .map(|p| StepInfo {
            name: p.name.to_string(),
            description: p.description.to_string(),
        })
        .collect();
    let lints = pipeline
        .lint_info()
        .into_iter()
        .map(|l| StepInfo {
            name: l.name.to_string(),
            description: l.description.to_string(),
        })
        .collect();

    let mut ctx = inputs.run(&pipeline).wrap_err("Pipeline failed")?;
    let model = ctx.take_model()?;
    let methods = model
        .services()
        .iter()
        .flat_map(|service| {
            service.methods.iter().map(|method| MethodInfo {
                location: method_location(&service.full_name, &method.name),
                shape: method.shape.name().to_string(),
                http: method
                    .http
                    .as_ref()
                    .map(|http| format!("{} {}", http.method.as_str(), http.template)),
                signatures: method
                    .signatures
                    .iter()
                    .map(|signature| {
                        let fields: Vec<&str> =
                            signature.args.iter().map(|arg| arg.field.as_str()).collect();
                        fields.join(",")
                    })
                    .collect(),
            })
        })
        .collect();

    Ok(ExplainReport {
        package: model.api().package.clone(),
        crate_name: model.api().crate_name.clone(),
        transport: model.transport().to_string(),
        phases,
        lints,
        methods,
    })
}
