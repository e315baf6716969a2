//! Import collection and canonical ordering.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// The three blocks a `use` section is split into, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImportGroup {
    /// `std`, `core`, `alloc`.
    Std,
    /// Any other crate.
    External,
    /// `crate`, `super`, `self`.
    Local,
}

impl ImportGroup {
    /// The group a module path belongs to, judged by its first segment.
    pub fn of(module: &str) -> Self {
        match module.split("::").next().unwrap_or_default() {
            "std" | "core" | "alloc" => Self::Std,
            "crate" | "super" | "self" => Self::Local,
            _ => Self::External,
        }
    }
}

/// Tracks imports and deduplicates them.
///
/// Modules keep insertion order while collecting; [`ImportCollector::groups`]
/// gives the canonical order used in output.
///
/// # Example
///
/// ```
/// use gapic_codegen::generation::ImportCollector;
///
/// let mut imports = ImportCollector::new();
/// imports.add("std::sync", "Arc");
/// imports.add("gapic_gax", "Result");
/// imports.add("gapic_gax", "CallOptions");
///
/// assert_eq!(imports.render(), "use std::sync::Arc;\n\nuse gapic_gax::{CallOptions, Result};\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    /// Module path -> set of symbols (sorted for deterministic output)
    imports: IndexMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol import from a module.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    /// Merge another collector into this one.
    pub fn merge(&mut self, other: &ImportCollector) {
        for (module, symbols) in &other.imports {
            let entry = self.imports.entry(module.clone()).or_default();
            entry.extend(symbols.iter().cloned());
        }
    }

    /// Check if a specific symbol is imported from a module.
    pub fn has_symbol(&self, module: &str, symbol: &str) -> bool {
        self.imports
            .get(module)
            .is_some_and(|symbols| symbols.contains(symbol))
    }

    /// Iterate over all imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Modules split into non-empty groups, each sorted by module path.
    pub fn groups(&self) -> Vec<Vec<(&str, &BTreeSet<String>)>> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_by_key(|(module, _)| (ImportGroup::of(module), *module));

        let mut groups: Vec<Vec<(&str, &BTreeSet<String>)>> = Vec::new();
        let mut current = None;
        for (module, symbols) in sorted {
            let group = ImportGroup::of(module);
            if current != Some(group) {
                groups.push(Vec::new());
                current = Some(group);
            }
            if let Some(last) = groups.last_mut() {
                last.push((module, symbols));
            }
        }
        groups
    }

    /// Rust `use` declarations, one per module, groups separated by a blank line.
    pub fn render(&self) -> String {
        self.groups()
            .iter()
            .map(|group| {
                group
                    .iter()
                    .map(|(module, symbols)| render_use(module, symbols))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Get the number of modules.
    pub fn len(&self) -> usize {
        self.imports.len()
    }
}

/// Lines of a `use` block are kept within this many columns.
const MAX_WIDTH: usize = 100;

fn render_use(module: &str, symbols: &BTreeSet<String>) -> String {
    let names: Vec<&str> = symbols.iter().map(String::as_str).collect();
    let line = match names.as_slice() {
        [name] => format!("use {module}::{name};"),
        _ => format!("use {module}::{{{}}};", names.join(", ")),
    };
    if names.len() == 1 || line.len() <= MAX_WIDTH {
        return line + "\n";
    }

    // Too wide: one name list per line, filled greedily.
    let mut out = format!("use {module}::{{\n");
    let mut current = String::new();
    for name in names {
        if !current.is_empty() && 4 + current.len() + 1 + name.len() + 1 > MAX_WIDTH {
            out.push_str(&format!("    {current}\n"));
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(name);
        current.push(',');
    }
    out.push_str(&format!("    {current}\n}};\n"));
    out
}
