//! URL template parsing and classification.
//!
//! # Responsibilities
//! - Classify a declared template as static (exact match only) or dynamic
//! - Split dynamic templates into literal and variable segments
//! - Reject malformed dynamic templates before they reach the tree
//!
//! # Design Decisions
//! - Structural scan, no regex: each segment is checked for brace balance
//! - A template without any brace is static and is never validated further
//! - Only whole-segment variables (`{name}`) are supported
//! - The first segment must be a literal; it keys the tree in the forest

use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Errors produced while parsing a dynamic URL template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Template string was empty (or only `/`).
    #[error("template is empty")]
    Empty,

    /// A `{` without a matching `}` (or the reverse) inside a segment.
    #[error("unbalanced braces in segment {segment} `{text}`")]
    UnbalancedBrace { segment: usize, text: String },

    /// Braces mixed with literal text inside one segment, e.g. `item{id}.html`.
    #[error("segment {segment} `{text}` mixes literal text with a variable")]
    MixedSegment { segment: usize, text: String },

    /// `{}` with no name.
    #[error("empty variable name in segment {segment}")]
    EmptyVariable { segment: usize },

    /// Variable name is not made of letters, digits or `_`.
    #[error("invalid variable name `{name}` in segment {segment}")]
    InvalidVariableName { segment: usize, name: String },

    /// The same variable name appears twice.
    #[error("variable `{0}` is declared more than once")]
    DuplicateVariable(String),

    /// Character outside the path-legal set in a literal segment.
    #[error("illegal character {ch:?} in segment {segment}")]
    IllegalCharacter { segment: usize, ch: char },

    /// Empty segment (`//` or trailing `/`).
    #[error("empty segment at position {segment}")]
    EmptySegment { segment: usize },

    /// First segment is a variable; trees are keyed by a literal root.
    #[error("first segment `{0}` must be a literal")]
    VariableRoot(String),

    /// Dynamic template with nothing beyond the root segment.
    #[error("dynamic template needs at least two segments")]
    SingleSegment,
}

/// One `/`-separated position of a dynamic template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Literal(String),
    Variable(String),
}

impl Segment {
    /// Returns the variable name, if this is a variable segment.
    pub fn variable(&self) -> Option<&str> {
        match self {
            Segment::Variable(name) => Some(name),
            Segment::Literal(_) => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Segment::Variable(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Variable(name) => write!(f, "{{{}}}", name),
        }
    }
}

/// A dynamic template that passed validation.
///
/// Guarantees: at least two segments, a literal root, at least one variable,
/// no duplicate variable names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicTemplate {
    raw: String,
    root: String,
    rest: Vec<Segment>,
}

impl DynamicTemplate {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Literal text of the first segment (the forest key).
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Everything below the root segment.
    pub fn rest(&self) -> &[Segment] {
        &self.rest
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.rest.iter().filter_map(Segment::variable)
    }

    /// Template with variable names erased, e.g. `/order/{}/item/{}`.
    ///
    /// Two templates with the same shape land on the same tree leaf.
    pub fn shape(&self) -> String {
        let mut shape = format!("/{}", self.root);
        for segment in &self.rest {
            shape.push('/');
            match segment {
                Segment::Literal(text) => shape.push_str(text),
                Segment::Variable(_) => shape.push_str("{}"),
            }
        }
        shape
    }
}

/// A declared URL template, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlTemplate {
    /// No variable segments: exact-match registry only.
    Static(String),
    /// At least one `{name}` segment: path-variable tree.
    Dynamic(DynamicTemplate),
}

impl UrlTemplate {
    /// Classify and validate a template string.
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        if raw.is_empty() || raw == "/" {
            return Err(TemplateError::Empty);
        }

        if !raw.contains(['{', '}']) {
            return Ok(UrlTemplate::Static(raw.to_string()));
        }

        let mut segments = Vec::new();
        let mut seen = HashSet::new();
        for (index, text) in split_path(raw).enumerate() {
            let segment = parse_segment(index, text)?;
            if let Segment::Variable(name) = &segment {
                if !seen.insert(name.clone()) {
                    return Err(TemplateError::DuplicateVariable(name.clone()));
                }
            }
            segments.push(segment);
        }

        if segments.len() < 2 {
            return Err(TemplateError::SingleSegment);
        }
        let rest = segments.split_off(1);
        let root = match segments.pop() {
            Some(Segment::Literal(text)) => text,
            Some(Segment::Variable(name)) => return Err(TemplateError::VariableRoot(name)),
            None => return Err(TemplateError::SingleSegment),
        };

        Ok(UrlTemplate::Dynamic(DynamicTemplate {
            raw: raw.to_string(),
            root,
            rest,
        }))
    }

    pub fn as_str(&self) -> &str {
        match self {
            UrlTemplate::Static(raw) => raw,
            UrlTemplate::Dynamic(template) => template.as_str(),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, UrlTemplate::Dynamic(_))
    }
}

/// Split a template or request path into segments, dropping one leading `/`.
pub fn split_path(path: &str) -> std::str::Split<'_, char> {
    path.strip_prefix('/').unwrap_or(path).split('/')
}

fn parse_segment(index: usize, text: &str) -> Result<Segment, TemplateError> {
    if text.is_empty() {
        return Err(TemplateError::EmptySegment { segment: index });
    }

    let mut depth = 0usize;
    let mut braces = 0usize;
    for ch in text.chars() {
        match ch {
            '{' => {
                if depth > 0 {
                    return Err(unbalanced(index, text));
                }
                depth += 1;
                braces += 1;
            }
            '}' => {
                if depth == 0 {
                    return Err(unbalanced(index, text));
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(unbalanced(index, text));
    }

    if braces == 0 {
        if let Some(ch) = text.chars().find(|c| !is_path_char(*c)) {
            return Err(TemplateError::IllegalCharacter { segment: index, ch });
        }
        return Ok(Segment::Literal(text.to_string()));
    }

    if braces > 1 || !(text.starts_with('{') && text.ends_with('}')) {
        return Err(TemplateError::MixedSegment {
            segment: index,
            text: text.to_string(),
        });
    }

    let name = &text[1..text.len() - 1];
    if name.is_empty() {
        return Err(TemplateError::EmptyVariable { segment: index });
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(TemplateError::InvalidVariableName {
            segment: index,
            name: name.to_string(),
        });
    }
    Ok(Segment::Variable(name.to_string()))
}

fn unbalanced(segment: usize, text: &str) -> TemplateError {
    TemplateError::UnbalancedBrace {
        segment,
        text: text.to_string(),
    }
}

fn is_path_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}
