//! Generate operation - client library generation from protos.

use std::path::Path;

use eyre::{Context, Result};
use gapic_codegen::pipeline::{Pipeline, SnapshotPlugin};
use gapic_codegen_rust::{Generator, LanguageCodegen};

use super::Inputs;
use crate::reports::{
    ApiSummary, GenerateReport, GenerationResult, PreviewFile, WrittenResult, diagnostic_line,
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Root of the generated crate.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Whether to output debug snapshots.
    pub visualize: bool,
}

/// Execute the generate operation.
///
/// Builds the model, renders every file in memory and only then writes them,
/// so a failure leaves the output directory untouched.
pub fn generate(inputs: Inputs, opts: GenerateOptions) -> Result<GenerateReport> {
    let debug_dir = opts.output_dir.join(".gapic/debug");
    let mut pipeline = Pipeline::new();
    if opts.visualize {
        pipeline = pipeline.plugin(SnapshotPlugin::with_output_dir(&debug_dir));
    }
    let mut ctx = inputs.run(&pipeline).wrap_err("Failed to build the API model")?;
    let warnings = ctx.warnings().map(diagnostic_line).collect();
    let model = ctx.take_model()?;

    let generator = Generator::new();
    let result = if opts.dry_run {
        let files = generator
            .render(&model)?
            .into_iter()
            .map(|file| PreviewFile {
                path: file.path().display().to_string(),
                content: file.content().to_string(),
            })
            .collect();
        GenerationResult::Preview(files)
    } else {
        let written = generator
            .generate(&model, opts.output_dir)
            .wrap_err("Failed to generate code")?;
        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            written: written.written,
            unchanged: written.unchanged.len(),
            debug_dir: opts.visualize.then_some(debug_dir),
        })
    };

    Ok(GenerateReport {
        api: ApiSummary::of(&model),
        warnings,
        result,
    })
}
