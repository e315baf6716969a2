//! Generate command report data structures.

use std::path::PathBuf;

use super::{
    ApiSummary,
    output::{Output, Report},
};

/// Report data from client library generation.
#[derive(Debug)]
pub struct GenerateReport {
    pub api: ApiSummary,
    /// Warning lines from the pipeline.
    pub warnings: Vec<String>,
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview of every file.
    Preview(Vec<PreviewFile>),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    /// Files created or changed, relative to the output directory.
    pub written: Vec<String>,
    /// Number of files whose content was already up to date.
    pub unchanged: usize,
    /// Path to debug snapshots, if visualization was enabled.
    pub debug_dir: Option<PathBuf>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(files) => self.render_preview(out, files),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        if let Some(debug_dir) = &written.debug_dir {
            out.key_value("Pipeline snapshots written to", &debug_dir.display().to_string());
            out.newline();
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        self.api.render(out);
        out.newline();

        out.key_value("Generated", &written.output_dir.display().to_string());
        if written.written.is_empty() {
            out.preformatted(&format!("All {} files are up to date", written.unchanged));
            return;
        }
        for path in &written.written {
            out.added_item(path);
        }
        if written.unchanged > 0 {
            out.preformatted(&format!("{} unchanged", written.unchanged));
        }
    }

    fn render_preview(&self, out: &mut dyn Output, files: &[PreviewFile]) {
        for file in files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", files.len()));
    }
}
