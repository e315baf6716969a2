//! Pipeline orchestrator.

use eyre::Result;
use gapic_descriptor::{DescriptorSet, GeneratorConfig, ServiceConfig};

use super::{
    CompilationContext, Phase, Plugin,
    phase::PhaseInfo,
    phases::{BuildPhase, Lint, LintInfo, ValidatePhase},
};
use crate::ModelBuildError;

/// The model-building pipeline orchestrator.
///
/// Runs the built-in phases (validate, build) followed by any user phases,
/// calling plugin hooks before and after each one. Diagnostics from every
/// phase are collected first; the run only fails once all phases are done.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new()
///     .plugin(SnapshotPlugin::new())
///     .lint(MyLint);
///
/// let mut ctx = pipeline.run(descriptors, service_config, config)?;
/// let model = ctx.take_model()?;
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Create a new pipeline with the built-in phases and lints.
    pub fn new() -> Self {
        Self {
            validate: ValidatePhase::new(),
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a lint to the validate phase.
    pub fn lint(mut self, lint: impl Lint + 'static) -> Self {
        self.validate = self.validate.with_lint(lint);
        self
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Every phase in execution order.
    pub fn phase_info(&self) -> Vec<PhaseInfo> {
        let mut info = vec![self.validate.info(), BuildPhase.info()];
        info.extend(self.phases.iter().map(|p| p.info()));
        info
    }

    /// Every lint the validate phase runs.
    pub fn lint_info(&self) -> Vec<LintInfo> {
        self.validate.lint_info()
    }

    /// Run the pipeline over loaded inputs.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelBuildError`] (inside the report) listing every error
    /// diagnostic when any phase recorded one, or the error of a phase or
    /// plugin that failed outright.
    pub fn run(
        &self,
        descriptors: DescriptorSet,
        service_config: ServiceConfig,
        config: GeneratorConfig,
    ) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(descriptors, service_config, config);

        let builtin: [&dyn Phase; 2] = [&self.validate, &BuildPhase];
        let custom = self.phases.iter().map(|phase| phase.as_ref());
        for phase in builtin.into_iter().chain(custom) {
            self.run_phase(phase, &mut ctx)?;
        }

        for warning in ctx.warnings() {
            tracing::warn!(
                rule = warning.rule.as_deref().unwrap_or_default(),
                location = warning.location.as_deref().unwrap_or_default(),
                "{}",
                warning.message
            );
        }

        if ctx.has_errors() {
            let errors = ctx.errors().cloned().collect();
            return Err(ModelBuildError::new(errors).into());
        }

        if let Some(model) = &ctx.model {
            tracing::info!(
                services = model.services().len(),
                messages = model.messages().len(),
                warnings = ctx.warning_count(),
                "model built"
            );
        }
        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut CompilationContext) -> Result<()> {
        let phase_name = phase.name();
        tracing::debug!(phase = phase_name, "running phase");

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
