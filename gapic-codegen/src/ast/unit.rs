//! One generated source file.

use serde::Serialize;

use super::Item;

/// A composed source file, ready for the writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompilationUnit {
    /// Path relative to the generated crate root: `src/echo_client.rs`.
    pub path: String,
    /// Module path of the file: `["crate", "echo_client"]`.
    pub module: Vec<String>,
    /// Inner documentation (`//!`).
    pub doc: Option<String>,
    /// Line comments placed right after the generated-file marker.
    pub notice: Vec<String>,
    /// When set, imports and items are wrapped in `[START tag]`/`[END tag]` markers.
    pub region_tag: Option<String>,
    pub items: Vec<Item>,
}

impl CompilationUnit {
    pub fn new<I, S>(path: impl Into<String>, module: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into(),
            module: module.into_iter().map(Into::into).collect(),
            doc: None,
            notice: Vec::new(),
            region_tag: None,
            items: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn notice(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.notice.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn region_tag(mut self, tag: impl Into<String>) -> Self {
        self.region_tag = Some(tag.into());
        self
    }

    pub fn item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    /// Names declared at the top level of this unit.
    pub fn declared_names(&self) -> Vec<&str> {
        self.items.iter().filter_map(Item::declared_name).collect()
    }
}
