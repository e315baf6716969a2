//! Output trait for rendering reports.

/// Target output for reports.
///
/// Reports describe *what* to output using these semantic methods.
/// Implementations decide *how* to render it.
pub trait Output {
    /// Render a title.
    fn title(&mut self, text: &str);

    /// Start a new section with a heading.
    fn section(&mut self, name: &str);

    fn key_value(&mut self, key: &str, value: &str);

    fn key_value_indented(&mut self, key: &str, value: &str);

    fn numbered_item(&mut self, index: usize, text: &str);

    fn list_item(&mut self, text: &str);

    /// Render an added item, such as a newly written file.
    fn added_item(&mut self, text: &str);

    /// Render a warning message, on stderr for terminals.
    fn warning(&mut self, msg: &str);

    /// Render a separator with a label.
    fn divider(&mut self, label: &str);

    /// Render a block of text as is.
    fn preformatted(&mut self, text: &str);

    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Plain terminal output.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn title(&mut self, text: &str) {
        println!("{text}");
        println!("{}", "=".repeat(text.chars().count()));
    }

    fn section(&mut self, name: &str) {
        println!("{name}:");
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{key}: {value}");
    }

    fn key_value_indented(&mut self, key: &str, value: &str) {
        println!("  {key}: {value}");
    }

    fn numbered_item(&mut self, index: usize, text: &str) {
        println!("  {index}. {text}");
    }

    fn list_item(&mut self, text: &str) {
        println!("  - {text}");
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {text}");
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {msg}");
    }

    fn divider(&mut self, label: &str) {
        println!("── {label} ──");
    }

    fn preformatted(&mut self, text: &str) {
        println!("{text}");
    }

    fn newline(&mut self) {
        println!();
    }
}
