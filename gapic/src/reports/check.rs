//! Check command report data structures.

use super::{
    ApiSummary,
    output::{Output, Report},
};

/// Report data from loading and validating an API.
#[derive(Debug)]
pub struct CheckReport {
    /// Proto files the API was loaded from.
    pub files: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// The built model, present only when there were no errors.
    pub api: Option<ApiSummary>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.warning(&format!("error: {error}"));
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if let Some(api) = &self.api {
            api.render(out);
            out.newline();
        }

        let files = self.files.join(", ");
        if self.is_valid() {
            out.preformatted(&format!("✓ {files} is valid"));
        } else {
            out.preformatted(&format!("✗ {files}: {} error(s)", self.errors.len()));
        }
    }
}
