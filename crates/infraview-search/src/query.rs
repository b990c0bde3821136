/// A case-insensitive substring query over node labels.
///
/// Blank input (empty or whitespace only) never produces a query, so callers
/// treat `None` as "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
    needle: String,
}

impl SearchQuery {
    pub fn parse(term: &str) -> Option<Self> {
        if term.trim().is_empty() {
            return None;
        }
        Some(Self {
            term: term.to_string(),
            needle: term.to_lowercase(),
        })
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn matches(&self, label: &str) -> bool {
        if label.is_ascii() && self.needle.is_ascii() {
            let needle = self.needle.as_bytes();
            return label.len() >= needle.len()
                && label
                    .as_bytes()
                    .windows(needle.len())
                    .any(|window| window.eq_ignore_ascii_case(needle));
        }
        label.to_lowercase().contains(&self.needle)
    }
}
