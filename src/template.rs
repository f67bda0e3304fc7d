//! Minimal text templates for the bucket manifest.
//!
//! Supported actions:
//! - `{{ .Field }}` inserts a field verbatim, without escaping
//! - `{{/* ... */}}` is a comment and renders nothing
//! - `{{- ` and ` -}}` trim whitespace before or after the action
//!
//! Anything else between `{{` and `}}` is rejected at parse time.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("cannot read template: {0}")]
    Read(#[from] std::io::Error),
    #[error("line {line}: unclosed action")]
    Unclosed { line: usize },
    #[error("line {line}: unsupported action {action:?}")]
    UnsupportedAction { line: usize, action: String },
    #[error("field {name:?} is not defined")]
    UndefinedField { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

static FIELD_RE: OnceLock<Regex> = OnceLock::new();

fn field_regex() -> &'static Regex {
    FIELD_RE.get_or_init(|| {
        Regex::new(r"^\.(?<field>[A-Za-z_][A-Za-z0-9_]*)$").expect("Failed to compile regex")
    })
}

/// Whitespace removed by trim markers. Other Unicode spaces are kept.
fn is_trim_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn starts_with_space(s: &str) -> bool {
    s.starts_with(is_trim_space)
}

fn ends_with_space(s: &str) -> bool {
    s.ends_with(is_trim_space)
}

/// Offset of the `}}` closing the action that starts at `after_open`.
/// A comment runs to its `*/`, so `}}` inside it does not end the action.
fn action_end(after_open: &str) -> Option<usize> {
    let body = after_open
        .strip_prefix('-')
        .unwrap_or(after_open)
        .trim_start_matches(is_trim_space);
    let skip = if body.starts_with("/*") {
        let comment_start = after_open.len() - body.len();
        comment_start + body.find("*/")? + 2
    } else {
        0
    };
    after_open[skip..].find("}}").map(|close| skip + close)
}

impl Template {
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut line = 1;
        let mut trim_next = false;

        while let Some(open) = rest.find("{{") {
            let mut text = &rest[..open];
            if trim_next {
                text = text.trim_start_matches(is_trim_space);
            }
            let action_line = line + rest[..open].matches('\n').count();

            let after_open = &rest[open + 2..];
            let close =
                action_end(after_open).ok_or(TemplateError::Unclosed { line: action_line })?;
            let mut action = &after_open[..close];

            if let Some(stripped) = action.strip_prefix('-').filter(|a| starts_with_space(a)) {
                text = text.trim_end_matches(is_trim_space);
                action = stripped;
            }
            trim_next = false;
            if let Some(stripped) = action.strip_suffix('-').filter(|a| ends_with_space(a)) {
                trim_next = true;
                action = stripped;
            }

            if !text.is_empty() {
                segments.push(Segment::Text(text.to_string()));
            }

            let action = action.trim_matches(is_trim_space);
            let is_comment =
                action.len() >= 4 && action.starts_with("/*") && action.ends_with("*/");
            if !is_comment {
                let captures = field_regex().captures(action).ok_or_else(|| {
                    TemplateError::UnsupportedAction {
                        line: action_line,
                        action: action.to_string(),
                    }
                })?;
                segments.push(Segment::Field(captures["field"].to_string()));
            }

            line += rest[..open + 2 + close + 2].matches('\n').count();
            rest = &after_open[close + 2..];
        }

        let text = if trim_next {
            rest.trim_start_matches(is_trim_space)
        } else {
            rest
        };
        if !text.is_empty() {
            segments.push(Segment::Text(text.to_string()));
        }

        Ok(Self { segments })
    }

    /// Field names referenced by the template, in order of appearance.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Field(name) => Some(name.as_str()),
            Segment::Text(_) => None,
        })
    }

    pub fn render(&self, context: &BTreeMap<String, String>) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field(name) => {
                    let value = context
                        .get(name)
                        .ok_or_else(|| TemplateError::UndefinedField { name: name.clone() })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}
