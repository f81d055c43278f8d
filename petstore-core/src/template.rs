use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use crate::args::stringify;
use crate::error::{Issue, IssueKind, IssuePath, ValidationError};
use crate::types::ParameterLocation;

const PLACEHOLDER_STR: &str = r"^:([A-Za-z_][A-Za-z0-9_]*)$";

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(PLACEHOLDER_STR).unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Literal(&'static str),
    Placeholder(&'static str),
}

/// A URL path template such as `/pet/:petId/uploadImage`, where segments
/// starting with ':' are placeholders for path parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathTemplate(&'static str);

impl PathTemplate {
    pub const fn new(template: &'static str) -> Self {
        PathTemplate(template)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> {
        self.0.split('/').filter(|s| !s.is_empty()).map(|s| {
            match PLACEHOLDER.captures(s).and_then(|c| c.get(1)) {
                Some(name) => Segment::Placeholder(name.as_str()),
                None => Segment::Literal(s),
            }
        })
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &'static str> {
        self.segments().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name),
            Segment::Literal(_) => None,
        })
    }

    /// Substitutes the placeholders with the stringified parameter values.
    /// Returns the raw (not yet encoded) segments; every placeholder must have a value.
    pub fn expand(&self, params: &Map<String, Value>) -> Result<Vec<String>, ValidationError> {
        let mut segments = Vec::new();
        let mut issues = Vec::new();
        for segment in self.segments() {
            match segment {
                Segment::Literal(s) => segments.push(s.to_string()),
                Segment::Placeholder(name) => match params.get(name) {
                    Some(value) => segments.push(stringify(value)),
                    None => {
                        let mut path = IssuePath::root();
                        path.push_key(ParameterLocation::Path.as_str());
                        path.push_key(name);
                        issues.push(Issue {
                            path,
                            kind: IssueKind::Required,
                        });
                    }
                },
            }
        }
        if !issues.is_empty() {
            return Err(ValidationError::new(issues));
        }
        Ok(segments)
    }

    /// Expanded path for display, e.g. `/pet/1`
    pub fn render(&self, params: &Map<String, Value>) -> Result<String, ValidationError> {
        Ok(format!("/{}", self.expand(params)?.join("/")))
    }
}
