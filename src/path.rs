//! Field path representation for locating values in nested records.
//!
//! This module provides [`FieldPath`] and [`PathSegment`] for building, parsing
//! and rendering paths such as `projects.0.projectName`, and for looking those
//! paths up inside a record.

use std::fmt::{self, Display};

use serde_json::Value;

/// A segment of a field path.
///
/// Paths are built from segments that represent either field access or
/// sequence indexing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field access (e.g., `address`, `projectName`)
    Field(String),
    /// A sequence index (e.g., the `0` in `projects.0`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    fn parse(raw: &str) -> Self {
        match raw.parse::<usize>() {
            Ok(idx) => PathSegment::Index(idx),
            Err(_) => PathSegment::Field(raw.to_string()),
        }
    }
}

/// A path to a value in a nested record.
///
/// `FieldPath` renders in dot notation, with sequence indices written as plain
/// segments, so a UI collaborator can key error messages by the same string it
/// used to register the input.
///
/// # Example
///
/// ```rust
/// use fieldguard::FieldPath;
///
/// let path = FieldPath::root()
///     .push_field("projects")
///     .push_index(0)
///     .push_field("projectName");
///
/// assert_eq!(path.to_string(), "projects.0.projectName");
/// assert_eq!(FieldPath::parse("projects[0].projectName"), path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Creates an empty path representing the record itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Parses a dot/bracket path such as `address.city`, `projects.0.name`
    /// or `projects[0].name`.
    ///
    /// Purely numeric segments become index segments. Empty segments are
    /// ignored, so `""` parses to the root path.
    pub fn parse(path: &str) -> Self {
        let mut segments = Vec::new();

        for part in path.split('.').filter(|p| !p.is_empty()) {
            let Some(open) = part.find('[') else {
                segments.push(PathSegment::parse(part));
                continue;
            };

            let (name, mut rest) = part.split_at(open);
            if !name.is_empty() {
                segments.push(PathSegment::parse(name));
            }
            while let Some(inner) = rest.strip_prefix('[') {
                match inner.find(']') {
                    Some(close) => {
                        segments.push(PathSegment::parse(&inner[..close]));
                        rest = &inner[close + 1..];
                    }
                    None => break,
                }
            }
            if !rest.is_empty() {
                segments.push(PathSegment::Field(rest.to_string()));
            }
        }

        Self { segments }
    }

    /// Returns a new path with a field segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    ///
    /// This method does not modify the original path; it returns a new one.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns a new path with all of `other`'s segments appended.
    pub fn join(&self, other: &FieldPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the parent path (all segments except the last), or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(Self {
                segments: self.segments[..self.segments.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Looks up the value this path points at inside `record`.
    ///
    /// Returns `None` when any segment is missing or when a segment does not fit
    /// the shape it is applied to. An index segment applied to a nested record
    /// falls back to the key with the same digits.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldguard::FieldPath;
    /// use serde_json::json;
    ///
    /// let record = json!({"projects": [{"projectName": "Atlas"}]});
    /// let path = FieldPath::parse("projects.0.projectName");
    ///
    /// assert_eq!(path.lookup(&record), Some(&json!("Atlas")));
    /// assert_eq!(FieldPath::parse("projects.1").lookup(&record), None);
    /// ```
    pub fn lookup<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(record, |current, segment| match (segment, current) {
                (PathSegment::Field(name), Value::Object(map)) => map.get(name),
                (PathSegment::Index(idx), Value::Array(items)) => items.get(*idx),
                (PathSegment::Index(idx), Value::Object(map)) => map.get(&idx.to_string()),
                _ => None,
            })
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            match segment {
                PathSegment::Field(name) => write!(f, "{}", name)?,
                PathSegment::Index(idx) => write!(f, "{}", idx)?,
            }
        }
        Ok(())
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath::parse(path)
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        FieldPath::parse(&path)
    }
}
