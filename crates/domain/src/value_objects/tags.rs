//! Character tags

use serde::{Deserialize, Serialize};

/// Ordered set of free-form labels on a character.
///
/// Each tag is trimmed; blank tags and repeats are dropped while first-seen order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for tag in tags {
            let tag = tag.as_ref().trim();
            if !tag.is_empty() && !out.iter().any(|t| t == tag) {
                out.push(tag.to_string());
            }
        }
        Self(out)
    }

    /// Parse a comma separated filter string ("a, b,,c").
    pub fn parse_csv(input: &str) -> Self {
        Self::new(input.split(','))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// True when every tag in `required` is present.
    pub fn contains_all(&self, required: &Tags) -> bool {
        required.iter().all(|t| self.contains(t))
    }

    /// Adds a tag; returns false when it was blank or already present.
    pub fn push(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    pub fn remove(&mut self, tag: &str) {
        self.0.retain(|t| t != tag);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for Tags {
    fn from(value: Vec<String>) -> Self {
        Self::new(value)
    }
}

impl From<Tags> for Vec<String> {
    fn from(value: Tags) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_drops_blanks_and_dedupes() {
        let tags = Tags::new([" horror ", "", "horror", "  ", "campaign"]);
        assert_eq!(tags.as_slice(), ["horror", "campaign"]);
    }

    #[test]
    fn parse_csv_splits_on_commas() {
        let tags = Tags::parse_csv("a, b,,c ,a");
        assert_eq!(tags.as_slice(), ["a", "b", "c"]);
    }

    #[test]
    fn contains_all_requires_every_tag() {
        let tags = Tags::new(["a", "b", "c"]);
        assert!(tags.contains_all(&Tags::new(["a", "c"])));
        assert!(!tags.contains_all(&Tags::new(["a", "d"])));
        assert!(tags.contains_all(&Tags::default()));
    }

    #[test]
    fn push_and_remove() {
        let mut tags = Tags::default();
        assert!(tags.push(" new "));
        assert!(!tags.push("new"));
        assert!(!tags.push("  "));
        tags.remove("new");
        assert!(tags.is_empty());
    }

    #[test]
    fn deserializing_normalizes() {
        let tags: Tags = serde_json::from_str(r#"["x", " x ", ""]"#).expect("json");
        assert_eq!(tags.len(), 1);
    }
}
