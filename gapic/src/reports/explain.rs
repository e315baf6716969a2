//! Explain command report data structures.

use super::output::{Output, Report};

/// Report data from pipeline explanation.
#[derive(Debug)]
pub struct ExplainReport {
    pub package: String,
    pub crate_name: String,
    pub transport: String,
    /// Pipeline phases, in run order.
    pub phases: Vec<StepInfo>,
    /// Validation lints.
    pub lints: Vec<StepInfo>,
    /// How every method was resolved.
    pub methods: Vec<MethodInfo>,
}

/// A named pipeline phase or lint.
#[derive(Debug)]
pub struct StepInfo {
    pub name: String,
    pub description: String,
}

/// A method as the model resolved it.
#[derive(Debug)]
pub struct MethodInfo {
    /// `package.Service/Method`.
    pub location: String,
    /// Call shape name, `paged` or `server-streaming`.
    pub shape: String,
    /// `POST /v1/{parent=shelves/*}/books`, when the method has an HTTP rule.
    pub http: Option<String>,
    /// Each signature as its comma-joined field paths.
    pub signatures: Vec<String>,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("Gapic Pipeline Explanation");
        out.newline();

        out.key_value("API", &self.package);
        out.key_value_indented("Crate", &self.crate_name);
        out.key_value_indented("Transport", &self.transport);
        out.newline();

        out.section("Pipeline Phases");
        for (i, phase) in self.phases.iter().enumerate() {
            out.numbered_item(i + 1, &format!("{} - {}", phase.name, phase.description));
        }
        out.newline();

        out.section("Validation Lints");
        for lint in &self.lints {
            out.list_item(&format!("{}: {}", lint.name, lint.description));
        }
        out.newline();

        out.section(&format!("Methods ({})", self.methods.len()));
        for method in &self.methods {
            out.list_item(&format!("{} [{}]", method.location, method.shape));
            if let Some(http) = &method.http {
                out.key_value_indented("http", http);
            }
            for signature in &method.signatures {
                out.key_value_indented("signature", signature);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::RecordingOutput;

    #[test]
    fn test_render_methods() {
        let report = ExplainReport {
            package: "google.showcase.v1beta1".to_string(),
            crate_name: "google-showcase-v1beta1".to_string(),
            transport: "grpc".to_string(),
            phases: vec![StepInfo {
                name: "validate".to_string(),
                description: "Run lints".to_string(),
            }],
            lints: Vec::new(),
            methods: vec![MethodInfo {
                location: "google.showcase.v1beta1.Echo/Expand".to_string(),
                shape: "server-streaming".to_string(),
                http: Some("POST /v1beta1/echo:expand".to_string()),
                signatures: vec!["content,error".to_string()],
            }],
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);
        let text = out.text();
        assert!(text.starts_with("# Gapic Pipeline Explanation\n"));
        assert!(text.contains("## Pipeline Phases\n1. validate - Run lints\n"));
        assert!(text.contains(
            "## Methods (1)\n\
             - google.showcase.v1beta1.Echo/Expand [server-streaming]\n  \
             http: POST /v1beta1/echo:expand\n  \
             signature: content,error"
        ));
    }
}
