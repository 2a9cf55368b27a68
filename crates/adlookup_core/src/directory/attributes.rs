use std::collections::BTreeMap;

/// Raw attribute values of one directory entry.
///
/// Keys are stored lowercased; lookups ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    values: BTreeMap<String, Vec<String>>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces all values of `name`.
    pub fn insert(&mut self, name: impl AsRef<str>, values: Vec<String>) {
        self.values.insert(name.as_ref().to_ascii_lowercase(), values);
    }

    /// Builder-style variant of [`AttributeSet::insert`] for a single value.
    pub fn with(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(name, vec![value.into()]);
        self
    }

    /// Returns every value of `name`, empty when absent.
    pub fn values(&self, name: &str) -> &[String] {
        self.values
            .get(name.to_ascii_lowercase().as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the first value of `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }
}

impl<K: AsRef<str>> FromIterator<(K, Vec<String>)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, values) in iter {
            set.insert(name, values);
        }
        set
    }
}
