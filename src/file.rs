//! Binary-file descriptors carried inside records.
//!
//! A record never holds file contents. A file input is represented by a
//! descriptor object shaped like a browser `File`:
//!
//! ```json
//! { "name": "cv.pdf", "type": "application/pdf", "size": 48213 }
//! ```
//!
//! Only the declared `type` is required; `name` and `size` are optional. A
//! non-empty sequence of descriptors (a file list) is also accepted; its first
//! element is the one inspected.

use serde_json::{json, Map, Value};

/// A declared file: its MIME type, and optionally its name and size in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: Option<String>,
    pub mime: String,
    pub size: Option<u64>,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, mime: impl Into<String>) -> Self {
        Self::of_type(mime).with_name(name)
    }

    /// Creates a nameless descriptor carrying only a MIME type.
    pub fn of_type(mime: impl Into<String>) -> Self {
        Self {
            name: None,
            mime: mime.into(),
            size: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Reads a descriptor from a record value.
    ///
    /// Returns `None` if the value is neither an object with a string `type`
    /// nor a non-empty sequence whose first element is one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fieldguard::FileDescriptor;
    /// use serde_json::json;
    ///
    /// let single = json!({"name": "cv.pdf", "type": "application/pdf"});
    /// let list = json!([{"name": "cv.doc", "type": "application/msword"}]);
    ///
    /// assert_eq!(FileDescriptor::from_value(&single).unwrap().mime, "application/pdf");
    /// assert_eq!(FileDescriptor::from_value(&list).unwrap().name.as_deref(), Some("cv.doc"));
    /// assert!(FileDescriptor::from_value(&json!({"type": "application/pdf"})).is_some());
    /// assert!(FileDescriptor::from_value(&json!("cv.pdf")).is_none());
    /// ```
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            Value::Array(items) => items.first().and_then(|first| match first {
                Value::Object(map) => Self::from_map(map),
                _ => None,
            }),
            _ => None,
        }
    }

    fn from_map(map: &Map<String, Value>) -> Option<Self> {
        let mime = map.get("type")?.as_str()?;
        Some(Self {
            name: map.get("name").and_then(Value::as_str).map(str::to_string),
            mime: mime.to_string(),
            size: map.get("size").and_then(Value::as_u64),
        })
    }

    /// Converts the descriptor into the object form placed in records.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        if let Some(name) = &self.name {
            map.insert("name".to_string(), json!(name));
        }
        map.insert("type".to_string(), json!(self.mime));
        if let Some(size) = self.size {
            map.insert("size".to_string(), json!(size));
        }
        Value::Object(map)
    }
}

impl From<FileDescriptor> for Value {
    fn from(file: FileDescriptor) -> Self {
        file.to_value()
    }
}
