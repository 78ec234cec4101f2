use std::collections::BTreeMap;

/// Identity of an axis or subplot. Index 1 is the unsuffixed first subplot:
/// with base `"x"`, index 1 encodes as `"x"` and index 2 as `"x2"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubplotId(u32);

impl SubplotId {
    /// Index 0 is clamped to 1; there is no subplot 0.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        if index == 0 { Self(1) } else { Self(index) }
    }

    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// The wire string for this subplot under `base` (`"x"`, `"geo"`, `"scene"`).
    #[must_use]
    pub fn to_wire(self, base: &str) -> String {
        if self.0 == 1 {
            base.to_string()
        } else {
            format!("{base}{}", self.0)
        }
    }

    /// Parses `"x"` or `"x3"` back into an id; `None` when `wire` does not
    /// start with `base` or carries a malformed index.
    #[must_use]
    pub fn from_wire(base: &str, wire: &str) -> Option<Self> {
        let suffix: &str = wire.strip_prefix(base)?;
        if suffix.is_empty() {
            return Some(Self(1));
        }
        if suffix.starts_with('0') {
            return None;
        }
        let index: u32 = suffix.parse().ok()?;
        (index >= 2).then_some(Self(index))
    }
}

impl Default for SubplotId {
    fn default() -> Self {
        Self(1)
    }
}

impl From<u32> for SubplotId {
    fn from(index: u32) -> Self {
        Self::new(index)
    }
}

/// Numbered instances of one subplot object (`xaxis`, `xaxis2`, ...), kept in
/// index order.
#[derive(Debug, Clone, PartialEq)]
pub struct Subplots<T>(BTreeMap<SubplotId, T>);

impl<T> Subplots<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set instance `id`, returning the one it replaces.
    pub fn insert(&mut self, id: SubplotId, value: T) -> Option<T> {
        self.0.insert(id, value)
    }

    #[must_use]
    pub fn get(&self, id: SubplotId) -> Option<&T> {
        self.0.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SubplotId, &T)> {
        self.0.iter().map(|(id, value)| (*id, value))
    }
}

impl<T> Default for Subplots<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_subplot_has_no_suffix() {
        assert_eq!("x", SubplotId::default().to_wire("x"));
        assert_eq!("x2", SubplotId::new(2).to_wire("x"));
        assert_eq!("scene12", SubplotId::new(12).to_wire("scene"));
    }

    #[test]
    fn zero_is_clamped() {
        assert_eq!(1, SubplotId::new(0).index());
    }

    #[test]
    fn from_wire_inverts_to_wire() {
        assert_eq!(Some(SubplotId::new(1)), SubplotId::from_wire("y", "y"));
        assert_eq!(Some(SubplotId::new(7)), SubplotId::from_wire("y", "y7"));
        assert_eq!(None, SubplotId::from_wire("y", "x2"));
        assert_eq!(None, SubplotId::from_wire("y", "y1"));
        assert_eq!(None, SubplotId::from_wire("y", "y02"));
    }

    #[test]
    fn subplots_iterate_in_index_order() {
        let mut axes: Subplots<&str> = Subplots::new();
        axes.insert(SubplotId::new(3), "third");
        axes.insert(SubplotId::new(1), "first");
        assert_eq!(None, axes.insert(SubplotId::new(2), "second"));
        assert_eq!(Some("first"), axes.insert(SubplotId::new(1), "primary"));

        let wires: Vec<(String, &str)> = axes
            .iter()
            .map(|(id, value)| (id.to_wire("xaxis"), *value))
            .collect();
        let expected: Vec<(String, &str)> = vec![
            ("xaxis".to_string(), "primary"),
            ("xaxis2".to_string(), "second"),
            ("xaxis3".to_string(), "third"),
        ];
        assert_eq!(expected, wires);
        assert_eq!(Some(&"second"), axes.get(SubplotId::new(2)));
        assert_eq!(3, axes.len());
    }
}
