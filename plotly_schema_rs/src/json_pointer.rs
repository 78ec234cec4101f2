//! JSON Pointer (RFC 6901) paths into the input schema document.
//!
//! Every error the generator reports names the offending node with one of these,
//! e.g. `/traces/scatter/marker/size`. Segments are `/`-separated, with `~`
//! escaped as `~0` and `/` escaped as `~1`.

use std::fmt;

/// Location of a node inside the schema document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SchemaPath(String);

impl SchemaPath {
    /// The document root (the empty pointer).
    #[must_use]
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Returns a new path with `segment` appended, applying RFC 6901 escaping.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut pointer: String = self.0.clone();
        push_segment(&mut pointer, segment);
        Self(pointer)
    }

    /// Unescaped segments, outermost first.
    #[must_use]
    pub fn segments(&self) -> Vec<String> {
        if self.0.is_empty() {
            return Vec::new();
        }
        self.0
            .split('/')
            .skip(1)
            .map(|raw| raw.replace("~1", "/").replace("~0", "~"))
            .collect()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("/")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl From<SchemaPath> for String {
    fn from(path: SchemaPath) -> Self {
        path.0
    }
}

fn push_segment(pointer: &mut String, segment: &str) {
    pointer.push('/');
    for c in segment.chars() {
        match c {
            '~' => pointer.push_str("~0"),
            '/' => pointer.push_str("~1"),
            other => pointer.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_empty_pointer() {
        let root: SchemaPath = SchemaPath::root();
        assert_eq!("", root.as_str());
        assert_eq!("/", root.to_string(), "root displays as a single slash");
    }

    #[test]
    fn child_appends_segments() {
        let path: SchemaPath = SchemaPath::root()
            .child("traces")
            .child("scatter")
            .child("marker");
        assert_eq!("/traces/scatter/marker", path.as_str());
    }

    #[test]
    fn child_escapes_slash_and_tilde() {
        let path: SchemaPath = SchemaPath::root().child("a/b").child("c~d");
        assert_eq!("/a~1b/c~0d", path.as_str());
    }

    #[test]
    fn escaped_tilde_one_is_not_confused_with_slash() {
        let path: SchemaPath = SchemaPath::root().child("~1");
        assert_eq!("/~01", path.as_str());
        assert_eq!(vec!["~1".to_string()], path.segments());
    }

    #[test]
    fn segments_unescape_in_order() {
        let path: SchemaPath = SchemaPath::root().child("frames").child("a/b").child("");
        let expected: Vec<String> = vec!["frames".to_string(), "a/b".to_string(), String::new()];
        assert_eq!(expected, path.segments());
    }

    #[test]
    fn root_has_no_segments() {
        assert!(SchemaPath::root().segments().is_empty());
    }
}
