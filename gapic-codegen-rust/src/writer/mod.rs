//! Render compilation units to Rust source.
//!
//! The writer owns every formatting decision: import placement, blank lines,
//! line breaking and doc wrapping. Given the same unit it always produces the
//! same bytes.

mod expr;
mod names;
mod render;

use gapic_codegen::{
    WriterError,
    ast::{CompilationUnit, Item},
    builder::CodeBuilder,
};
use gapic_core::File;

use names::NameTable;
use render::ItemRenderer;

/// Generated lines are kept within this many columns where the writer controls breaking.
const MAX_WIDTH: usize = 100;

const GENERATED_MARKER: &str = "// This file is @generated by gapic. Do not edit.";

/// Writes [`CompilationUnit`]s as Rust files.
#[derive(Debug, Clone, Default)]
pub struct RustWriter {
    copyright: Option<String>,
}

impl RustWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every file with `copyright` as line comments.
    pub fn with_copyright(mut self, copyright: Option<String>) -> Self {
        self.copyright = copyright;
        self
    }

    pub fn write(&self, unit: &CompilationUnit) -> Result<File, WriterError> {
        let names = NameTable::build(unit);
        let items = ItemRenderer::new(&names);
        let mut b = CodeBuilder::rust();

        if let Some(copyright) = &self.copyright {
            for line in copyright.trim_end().lines() {
                b.push_line(&comment(line));
            }
            b.push_blank();
        }
        b.push_line(GENERATED_MARKER);
        for line in &unit.notice {
            b.push_line(&comment(line));
        }
        b.push_blank();

        if let Some(doc) = unit.doc.as_deref().filter(|d| !d.trim().is_empty()) {
            b.push_doc("//!", doc, MAX_WIDTH);
            b.push_blank();
        }
        if let Some(tag) = &unit.region_tag {
            b.push_line(&format!("// [START {tag}]"));
        }

        let imports = names.imports();
        if !imports.is_empty() {
            b.push_raw(&imports.render());
            b.push_blank();
        }

        let mut previous: Option<&Item> = None;
        for item in &unit.items {
            if previous.is_some_and(|p| !same_group(p, item)) {
                b.push_blank();
            }
            items.item(&mut b, item)?;
            previous = Some(item);
        }

        if let Some(tag) = &unit.region_tag {
            b.push_line(&format!("// [END {tag}]"));
        }

        let mut content = b.build();
        let trimmed = content.trim_end_matches('\n').len();
        content.truncate(trimmed);
        content.push('\n');
        Ok(File::new(unit.path.clone(), content))
    }
}

fn comment(line: &str) -> String {
    let line = line.trim_end();
    if line.is_empty() {
        "//".to_string()
    } else {
        format!("// {line}")
    }
}

/// `block` rendered on its own, names unqualified.
#[cfg(test)]
pub(crate) fn render_block(block: &gapic_codegen::ast::Block) -> String {
    let unit = CompilationUnit::new("src/lib.rs", ["crate"]);
    let names = NameTable::build(&unit);
    expr::ExprRenderer::new(&names, "test").block(block).unwrap()
}

/// Consecutive `mod` declarations, and consecutive re-exports, are not separated.
fn same_group(previous: &Item, next: &Item) -> bool {
    matches!(
        (previous, next),
        (Item::Module(_), Item::Module(_)) | (Item::ReExport(_), Item::ReExport(_))
    )
}
