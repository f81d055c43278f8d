use std::fmt::Display;

use crate::file_like::BinaryKind;
use crate::types::Type;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location of an offending item inside the validated value,
/// rendered like `body.tags[1].name`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuePath {
    segments: Vec<PathSegment>,
}

impl IssuePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub(crate) fn push_key(&mut self, key: &str) {
        self.segments.push(PathSegment::Key(key.to_string()));
    }

    pub(crate) fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }
}

impl Display for IssuePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("(root)");
        }
        for (n, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if n == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// The reason a single item failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    Required,
    InvalidType {
        expected: Type,
        received: Type,
    },
    NotInteger,
    InvalidEnumValue {
        options: Vec<String>,
        received: String,
    },
    InvalidDateTime {
        received: String,
    },
    /// a binary payload showed up where structured data was expected
    UnexpectedBinary {
        expected: Type,
    },
    NotFileLike {
        expected: BinaryKind,
        received: String,
    },
}

impl Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueKind::Required => f.write_str("required field is missing"),
            IssueKind::InvalidType { expected, received } => {
                write!(f, "expected {expected}, received {received}")
            }
            IssueKind::NotInteger => f.write_str("expected integer, received non-integral number"),
            IssueKind::InvalidEnumValue { options, received } => write!(
                f,
                "invalid enum value '{received}', expected one of {}",
                options
                    .iter()
                    .map(|o| format!("'{o}'"))
                    .collect::<Vec<_>>()
                    .join(" | ")
            ),
            IssueKind::InvalidDateTime { received } => write!(
                f,
                "'{received}' is not an ISO-8601 datetime with timezone offset"
            ),
            IssueKind::UnexpectedBinary { expected } => {
                write!(f, "expected {expected}, received binary payload")
            }
            IssueKind::NotFileLike { expected, received } => {
                write!(f, "data is not {expected}, received {received}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: IssuePath,
    pub kind: IssueKind,
}

impl Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.kind)
    }
}

/// A local shape-check failure. Lists every offending item found in one pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed with {} issue(s): {}", .issues.len(), join_issues(.issues))]
pub struct ValidationError {
    issues: Vec<Issue>,
}

fn join_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(Issue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub(crate) fn new(issues: Vec<Issue>) -> Self {
        debug_assert!(!issues.is_empty());
        ValidationError { issues }
    }

    pub(crate) fn single(path: IssuePath, kind: IssueKind) -> Self {
        Self::new(vec![Issue { path, kind }])
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// Finds the first issue reported for the given rendered path, e.g. `"tags[0].id"`
    pub fn issue_at(&self, path: &str) -> Option<&Issue> {
        self.issues.iter().find(|i| i.path.to_string() == path)
    }

    /// Multi-line report, one issue per line
    pub fn report(&self) -> String {
        self.issues
            .iter()
            .map(|i| format!("  at {}: {}", i.path, i.kind))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaBuilderError {
    #[error("a field named '{0}' already exists")]
    DuplicateFieldName(String),
}
