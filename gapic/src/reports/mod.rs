//! Report data structures for commands.
//!
//! Operations collect what happened into a report; commands render the report
//! to an [`Output`].

mod check;
mod explain;
mod generate;
mod output;

use gapic_codegen::pipeline::Diagnostic;
use gapic_model::GapicContext;

pub use check::CheckReport;
pub use explain::{ExplainReport, MethodInfo, StepInfo};
pub use generate::{GenerateReport, GenerationResult, PreviewFile, WrittenResult};
pub use output::{Output, Report, TerminalOutput};

/// What a built model contains, for the report headers.
#[derive(Debug)]
pub struct ApiSummary {
    /// Proto package of the services.
    pub package: String,
    /// Name of the generated crate.
    pub crate_name: String,
    /// Transport the clients are generated for.
    pub transport: String,
    /// Short names of the services.
    pub services: Vec<String>,
    /// Number of methods across every service.
    pub method_count: usize,
}

impl ApiSummary {
    pub fn of(model: &GapicContext) -> Self {
        Self {
            package: model.api().package.clone(),
            crate_name: model.api().crate_name.clone(),
            transport: model.transport().to_string(),
            services: model.services().iter().map(|s| s.name.clone()).collect(),
            method_count: model.services().iter().map(|s| s.methods.len()).sum(),
        }
    }

    fn render(&self, out: &mut dyn Output) {
        out.key_value("API", &self.package);
        out.key_value_indented("Crate", &self.crate_name);
        out.key_value_indented("Transport", &self.transport);
        out.key_value_indented(
            "Services",
            &format!("{} ({} methods)", self.services.join(", "), self.method_count),
        );
    }
}

/// `[rule] location: message`, with the phase standing in for a missing rule.
pub fn diagnostic_line(diagnostic: &Diagnostic) -> String {
    let rule = diagnostic.rule.as_deref().unwrap_or(&diagnostic.phase);
    match &diagnostic.location {
        Some(location) => format!("[{rule}] {location}: {}", diagnostic.message),
        None => format!("[{rule}] {}", diagnostic.message),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Output;

    /// An [`Output`] that keeps every call as a line, for assertions.
    #[derive(Default)]
    pub struct RecordingOutput {
        pub lines: Vec<String>,
    }

    impl RecordingOutput {
        pub fn text(&self) -> String {
            self.lines.join("\n")
        }
    }

    impl Output for RecordingOutput {
        fn title(&mut self, text: &str) {
            self.lines.push(format!("# {text}"));
        }

        fn section(&mut self, name: &str) {
            self.lines.push(format!("## {name}"));
        }

        fn key_value(&mut self, key: &str, value: &str) {
            self.lines.push(format!("{key}: {value}"));
        }

        fn key_value_indented(&mut self, key: &str, value: &str) {
            self.lines.push(format!("  {key}: {value}"));
        }

        fn numbered_item(&mut self, index: usize, text: &str) {
            self.lines.push(format!("{index}. {text}"));
        }

        fn list_item(&mut self, text: &str) {
            self.lines.push(format!("- {text}"));
        }

        fn added_item(&mut self, text: &str) {
            self.lines.push(format!("+ {text}"));
        }

        fn warning(&mut self, msg: &str) {
            self.lines.push(format!("warning: {msg}"));
        }

        fn divider(&mut self, label: &str) {
            self.lines.push(format!("-- {label} --"));
        }

        fn preformatted(&mut self, text: &str) {
            self.lines.push(text.to_string());
        }

        fn newline(&mut self) {
            self.lines.push(String::new());
        }
    }
}
