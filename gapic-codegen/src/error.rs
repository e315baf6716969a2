//! Errors raised after loading: model building, composition and rendering.

use std::fmt;

use thiserror::Error;

use crate::pipeline::Diagnostic;

/// Every error diagnostic collected over one model-building run.
///
/// Travels through the pipeline as an [`eyre::Report`] and can be recovered
/// with `report.downcast_ref::<ModelBuildError>()`.
#[derive(Debug, Clone, Error)]
pub struct ModelBuildError {
    diagnostics: Vec<Diagnostic>,
}

impl ModelBuildError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Rules violated at least once, in first-seen order.
    pub fn rules(&self) -> Vec<&str> {
        let mut rules: Vec<&str> = Vec::new();
        for rule in self.diagnostics.iter().filter_map(|d| d.rule.as_deref()) {
            if !rules.contains(&rule) {
                rules.push(rule);
            }
        }
        rules
    }
}

impl fmt::Display for ModelBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "model build failed with {} error(s)",
            self.diagnostics.len()
        )?;
        for diagnostic in &self.diagnostics {
            write!(f, "\n  [{}]", diagnostic.rule.as_deref().unwrap_or(&diagnostic.phase))?;
            if let Some(location) = &diagnostic.location {
                write!(f, " {location}:")?;
            }
            write!(f, " {}", diagnostic.message)?;
        }
        Ok(())
    }
}

/// A model construct a composer cannot express in the target language.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    #[error(
        "{method}: path variable '{variable}' is bound to a {kind} field; only singular scalar \
         fields can appear in a URL"
    )]
    UnsupportedPathField {
        method: String,
        variable: String,
        kind: &'static str,
    },

    #[error("{method}: HTTP body field '{field}' is not a message")]
    BodyNotMessage { method: String, field: String },

    #[error("{method}: field '{field}' does not exist on '{message}'")]
    UnknownField {
        method: String,
        field: String,
        message: String,
    },

    #[error("unknown message type '{0}'")]
    UnknownMessage(String),
}

/// An AST node the renderer cannot turn into valid source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriterError {
    #[error("'{0}' is not a valid identifier")]
    InvalidIdentifier(String),

    #[error("method '{0}' has no body outside a trait")]
    MissingBody(String),

    #[error("tail expression is not the last statement of its block in '{0}'")]
    MisplacedTail(String),

    #[error("field '{0}' uses `impl Trait`, which is not allowed in field position")]
    ImplTraitInField(String),
}

/// Any failure after descriptors have loaded.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    ModelBuild(#[from] ModelBuildError),

    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error(transparent)]
    Writer(#[from] WriterError),
}
