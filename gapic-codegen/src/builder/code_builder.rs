//! Code builder utility for generating properly indented code.

use super::Indent;

/// Mutable builder for indented source text.
///
/// # Example
///
/// ```
/// use gapic_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::rust();
/// builder
///     .push_line("fn main() {")
///     .push_indent()
///     .push_line("println!(\"Hello\");")
///     .push_dedent()
///     .push_line("}");
/// assert_eq!(builder.build(), "fn main() {\n    println!(\"Hello\");\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 4-space indentation (Rust default).
    pub fn rust() -> Self {
        Self::new(Indent::RUST)
    }

    /// Add `s` at the current indentation.
    ///
    /// Each line of a multi-line string is indented on its own; empty lines
    /// stay empty.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        for line in s.split('\n') {
            if line.is_empty() {
                self.buffer.push('\n');
            } else {
                self.write_indent();
                self.buffer.push_str(line);
                self.buffer.push('\n');
            }
        }
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add raw text without indentation or newline.
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add `header`, the lines `body` pushes one level deeper, then `close`.
    pub fn push_block(
        &mut self,
        header: &str,
        close: &str,
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.push_line(header);
        self.push_indent();
        body(self);
        self.push_dedent();
        self.push_line(close)
    }

    /// Add a comment block with `prefix` (`///`, `//!` or `//`), wrapping
    /// each line so it fits in `width` columns.
    ///
    /// Lines inside ```` ``` ```` fences are kept as they are.
    pub fn push_doc(&mut self, prefix: &str, text: &str, width: usize) -> &mut Self {
        let available = width
            .saturating_sub(self.column() + prefix.len() + 1)
            .max(20);
        let mut fenced = false;
        for line in text.trim_end().lines() {
            let line = line.trim_end();
            if line.trim_start().starts_with("```") {
                fenced = !fenced;
                self.push_comment_line(prefix, line);
            } else if fenced || line.len() <= available {
                self.push_comment_line(prefix, line);
            } else {
                for wrapped in wrap(line, available) {
                    self.push_comment_line(prefix, &wrapped);
                }
            }
        }
        self
    }

    /// The column where the next indented line starts.
    pub fn column(&self) -> usize {
        self.indent_level * self.indent.width()
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn push_comment_line(&mut self, prefix: &str, line: &str) {
        self.write_indent();
        self.buffer.push_str(prefix);
        if !line.is_empty() {
            self.buffer.push(' ');
            self.buffer.push_str(line);
        }
        self.buffer.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::rust()
    }
}

/// Greedy word wrap keeping the line's leading whitespace on the first piece.
fn wrap(line: &str, width: usize) -> Vec<String> {
    let lead = &line[..line.len() - line.trim_start().len()];
    let mut lines = Vec::new();
    let mut current = lead.to_string();
    for word in line.split_whitespace() {
        let separator = usize::from(current.len() > lead.len());
        if current.len() > lead.len() && current.len() + separator + word.len() > width {
            lines.push(std::mem::replace(&mut current, lead.to_string()));
        }
        if current.len() > lead.len() {
            current.push(' ');
        }
        current.push_str(word);
    }
    lines.push(current);
    lines
}
