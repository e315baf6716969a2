use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for descriptor loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<DescriptorError>>;

/// Source context for error reporting.
///
/// Pairs a file's content with its name so errors can point into it.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Convert a `SourceCodeInfo` span (zero-based line and column of the
    /// start, then the end line when it differs, then the end column) to bytes.
    pub fn span_of(&self, span: &[i32]) -> SourceSpan {
        let position = |line: i32, column: i32| {
            let line = usize::try_from(line).unwrap_or_default() + 1;
            let column = usize::try_from(column).unwrap_or_default() + 1;
            offset_of(&self.src, line, column).unwrap_or_default()
        };
        let (start, end) = match *span {
            [line, column, end_column] => (position(line, column), position(line, end_column)),
            [line, column, end_line, end_column, ..] => {
                (position(line, column), position(end_line, end_column))
            }
            _ => return SourceSpan::from((0, 0)),
        };
        SourceSpan::from((start, end.saturating_sub(start)))
    }

    pub fn unresolved_type(
        &self,
        name: impl Into<String>,
        context: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<DescriptorError> {
        Box::new(DescriptorError::UnresolvedType {
            src: self.named_source(),
            span: span.into(),
            name: name.into(),
            context: context.into(),
        })
    }

    pub fn missing_extension(
        &self,
        method: impl Into<String>,
        extension: impl Into<String>,
        reason: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<DescriptorError> {
        Box::new(DescriptorError::MissingExtension {
            src: self.named_source(),
            span: span.into(),
            method: method.into(),
            extension: extension.into(),
            reason: reason.into(),
        })
    }

    pub fn invalid_option(
        &self,
        name: impl Into<String>,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<DescriptorError> {
        Box::new(DescriptorError::InvalidOption {
            src: self.named_source(),
            span: span.into(),
            name: name.into(),
            message: message.into(),
        })
    }

    /// Create a generator config parse error from a toml error.
    pub fn config_error(&self, source: toml::de::Error) -> Box<DescriptorError> {
        let span = source.span().map(SourceSpan::from);
        Box::new(DescriptorError::Config {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a service config parse error from a JSON error.
    pub fn service_config_error(&self, source: serde_json::Error) -> Box<DescriptorError> {
        let span = offset_of(&self.src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 1)));
        Box::new(DescriptorError::ServiceConfig {
            src: self.named_source(),
            span,
            source,
        })
    }
}

/// Byte offset of a 1-based line and column.
fn offset_of(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src.split_inclusive('\n').take(line - 1).map(str::len).sum();
    Some((line_start + column.saturating_sub(1)).min(src.len().saturating_sub(1)))
}

#[derive(Debug, Error, Diagnostic)]
pub enum DescriptorError {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(gapic::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file '{name}' was not found")]
    #[diagnostic(
        code(gapic::file_not_found),
        help("add the directory that contains it with -I/--include")
    )]
    FileNotFound { name: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Compile(#[from] protox::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    DescriptorSet(#[from] prost_reflect::DescriptorError),

    #[error("unresolved type '{name}' in {context}")]
    #[diagnostic(
        code(gapic::unresolved_type),
        help("check the spelling and that the defining file is imported")
    )]
    UnresolvedType {
        #[source_code]
        src: NamedSource<String>,
        #[label("referenced here")]
        span: SourceSpan,
        name: String,
        context: String,
    },

    #[error("method '{method}' is missing the required '{extension}' option")]
    #[diagnostic(code(gapic::missing_extension), help("{reason}"))]
    MissingExtension {
        #[source_code]
        src: NamedSource<String>,
        #[label("declared here")]
        span: SourceSpan,
        method: String,
        extension: String,
        reason: String,
    },

    #[error("invalid '{name}' option: {message}")]
    #[diagnostic(code(gapic::invalid_option))]
    InvalidOption {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        name: String,
        message: String,
    },

    #[error("failed to parse service config")]
    #[diagnostic(code(gapic::service_config))]
    ServiceConfig {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse generator config")]
    #[diagnostic(code(gapic::config))]
    Config {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },
}

impl DescriptorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Self::Io {
            path: path.into(),
            source,
        })
    }
}
