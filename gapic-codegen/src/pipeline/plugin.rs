//! Pipeline plugin trait for extensibility.

use eyre::Result;

use super::CompilationContext;

/// A plugin that can hook into the pipeline.
///
/// Plugins see the context before and after each phase and may change it.
///
/// # Example
///
/// A plugin that turns missing documentation into a hard failure:
///
/// ```ignore
/// struct RequireDocs;
///
/// impl Plugin for RequireDocs {
///     fn name(&self) -> &'static str { "require-docs" }
///
///     fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
///         if phase != "validate" {
///             return Ok(());
///         }
///         let undocumented = ctx
///             .warnings()
///             .filter(|d| d.rule.as_deref() == Some("missing-documentation"))
///             .count();
///         eyre::ensure!(undocumented == 0, "{undocumented} undocumented element(s)");
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// The name of this plugin, used in logs.
    fn name(&self) -> &'static str;

    /// Called before a phase runs.
    ///
    /// # Errors
    ///
    /// Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes.
    ///
    /// # Errors
    ///
    /// Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut CompilationContext) -> Result<()> {
        Ok(())
    }
}
