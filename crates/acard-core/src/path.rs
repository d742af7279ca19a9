//! Document paths in JSON Pointer form (RFC 6901), used to locate defects.

use std::fmt;

/// Location of a node inside a document, e.g. `/body/2/columns/0/items/1`.
///
/// The root is the empty pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocPath(String);

impl DocPath {
    /// The document root.
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Path of a named field below this path.
    pub fn field(&self, name: &str) -> Self {
        let escaped = name.replace('~', "~0").replace('/', "~1");
        Self(format!("{}/{}", self.0, escaped))
    }

    /// Path of a sequence item below this path.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}/{}", self.0, index))
    }

    /// Returns true for the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw pointer string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The final segment, unescaped. `None` at the root.
    pub fn last_segment(&self) -> Option<String> {
        if self.is_root() {
            return None;
        }
        self.0
            .rsplit('/')
            .next()
            .map(|s| s.replace("~1", "/").replace("~0", "~"))
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("(root)")
        } else {
            f.write_str(&self.0)
        }
    }
}
