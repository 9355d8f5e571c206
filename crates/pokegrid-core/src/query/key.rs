use std::fmt;

/// Cache key: operation name followed by its parameters,
/// e.g. `["pokemon", "single", "25"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    /// Prefix match on whole parts; used for invalidating a family of keys
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matching() {
        let single = QueryKey::new(["pokemon", "single", "25"]);
        assert!(single.starts_with(&QueryKey::new(["pokemon"])));
        assert!(single.starts_with(&QueryKey::new(["pokemon", "single"])));
        assert!(!single.starts_with(&QueryKey::new(["pokemon", "list"])));
        // Whole parts only
        assert!(!single.starts_with(&QueryKey::new(["poke"])));
    }

    #[test]
    fn test_display() {
        assert_eq!(QueryKey::new(["pokemon", "list"]).to_string(), "pokemon/list");
    }
}
