//! Path templates shared by HTTP bindings and resource-name patterns.
//!
//! ```text
//! Template = [ "/" ] Segments [ ":" Verb ]
//! Segment  = "*" | "**" | LITERAL | "{" FieldPath [ "=" Segments ] "}"
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid path template '{template}': {message}")]
pub struct TemplateError {
    pub template: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Literal(String),
    /// `*`: exactly one path segment.
    Wildcard,
    /// `**`: any number of path segments.
    MultiWildcard,
    Variable(Variable),
}

/// A `{field.path=pattern}` capture. A bare `{name}` captures a single segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub field_path: Vec<String>,
    pub segments: Vec<Segment>,
}

impl Variable {
    /// The dotted field path, `shelf.name`.
    pub fn field_name(&self) -> String {
        self.field_path.join(".")
    }

    /// The captured pattern, `shelves/*`.
    pub fn pattern(&self) -> String {
        join_segments(&self.segments)
    }

    /// Whether the capture is a single `*`.
    pub fn is_single_segment(&self) -> bool {
        self.segments == [Segment::Wildcard]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathTemplate {
    raw: String,
    leading_slash: bool,
    segments: Vec<Segment>,
    verb: Option<String>,
}

impl PathTemplate {
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut parser = TemplateParser {
            template,
            chars: template.char_indices().peekable(),
        };
        let leading_slash = parser.eat('/');
        let segments = parser.segments(false)?;
        let verb = if parser.eat(':') {
            let verb = parser.literal();
            if verb.is_empty() {
                return Err(parser.error("empty verb after ':'"));
            }
            Some(verb)
        } else {
            None
        };
        if let Some(&(_, c)) = parser.chars.peek() {
            return Err(parser.error(format!("unexpected '{c}'")));
        }

        let parsed = Self {
            raw: template.to_string(),
            leading_slash,
            segments,
            verb,
        };
        let mut seen = Vec::new();
        for variable in parsed.variables() {
            let name = variable.field_name();
            if seen.contains(&name) {
                return Err(parser.error(format!("variable '{name}' appears twice")));
            }
            seen.push(name);
        }
        Ok(parsed)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn verb(&self) -> Option<&str> {
        self.verb.as_deref()
    }

    pub fn has_leading_slash(&self) -> bool {
        self.leading_slash
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Variable(variable) => Some(variable),
            _ => None,
        })
    }

    /// Variable names in order of appearance.
    pub fn variable_names(&self) -> Vec<String> {
        self.variables().map(Variable::field_name).collect()
    }

    /// Whether every segment is a literal or a single-segment variable.
    ///
    /// Resource-name types can only be generated for such templates.
    pub fn is_simple(&self) -> bool {
        self.segments.iter().all(|segment| match segment {
            Segment::Literal(_) => true,
            Segment::Variable(variable) => variable.is_single_segment(),
            Segment::Wildcard | Segment::MultiWildcard => false,
        })
    }

    /// Match `path` against a simple template, returning captured values in order.
    pub fn captures<'p>(&self, path: &'p str) -> Option<Vec<&'p str>> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut values = Vec::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Variable(variable) if variable.is_single_segment() && !part.is_empty() => {
                    values.push(part)
                }
                _ => return None,
            }
        }
        Some(values)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.write_str(literal),
            Self::Wildcard => f.write_str("*"),
            Self::MultiWildcard => f.write_str("**"),
            Self::Variable(variable) if variable.is_single_segment() => {
                write!(f, "{{{}}}", variable.field_name())
            }
            Self::Variable(variable) => {
                write!(f, "{{{}={}}}", variable.field_name(), variable.pattern())
            }
        }
    }
}

fn join_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(Segment::to_string)
        .collect::<Vec<_>>()
        .join("/")
}

struct TemplateParser<'a> {
    template: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl TemplateParser<'_> {
    fn error(&self, message: impl Into<String>) -> TemplateError {
        TemplateError {
            template: self.template.to_string(),
            message: message.into(),
        }
    }

    fn eat(&mut self, c: char) -> bool {
        if self.chars.peek().is_some_and(|(_, next)| *next == c) {
            self.chars.next();
            true
        } else {
            false
        }
    }

    fn literal(&mut self) -> String {
        let mut literal = String::new();
        while let Some((_, c)) = self.chars.peek() {
            if matches!(c, '/' | ':' | '{' | '}' | '=' | '*') {
                break;
            }
            literal.push(*c);
            self.chars.next();
        }
        literal
    }

    fn segments(&mut self, in_variable: bool) -> Result<Vec<Segment>, TemplateError> {
        let mut segments = vec![self.segment(in_variable)?];
        while self.eat('/') {
            segments.push(self.segment(in_variable)?);
        }
        Ok(segments)
    }

    fn segment(&mut self, in_variable: bool) -> Result<Segment, TemplateError> {
        if self.eat('*') {
            return Ok(if self.eat('*') {
                Segment::MultiWildcard
            } else {
                Segment::Wildcard
            });
        }
        if self.eat('{') {
            if in_variable {
                return Err(self.error("nested variables are not allowed"));
            }
            return self.variable().map(Segment::Variable);
        }
        let literal = self.literal();
        if literal.is_empty() {
            return Err(self.error("empty path segment"));
        }
        Ok(Segment::Literal(literal))
    }

    fn variable(&mut self) -> Result<Variable, TemplateError> {
        let path = self.literal();
        let field_path: Vec<String> = path.split('.').map(str::to_string).collect();
        let valid = |name: &String| {
            let mut chars = name.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        };
        if !field_path.iter().all(valid) {
            return Err(self.error(format!("invalid variable name '{path}'")));
        }
        let segments = if self.eat('=') {
            self.segments(true)?
        } else {
            vec![Segment::Wildcard]
        };
        if !self.eat('}') {
            return Err(self.error(format!("unterminated variable '{path}'")));
        }
        Ok(Variable {
            field_path,
            segments,
        })
    }
}
