//! Configuration options for schema transformation

use crate::types::StringFormat;

/// Configuration options for the constraint transformer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformerConfig {
    /// Maximum nesting depth of collection/each-element constraints
    ///
    /// `None` (the default) leaves nesting unbounded.
    pub max_depth: Option<usize>,

    /// Format emitted for URL constraints
    pub url_format: StringFormat,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            url_format: StringFormat::UriReference,
        }
    }
}

impl TransformerConfig {
    /// Create a new transformer config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject constraints nested deeper than `depth`
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Remove the nesting limit
    pub fn unbounded_depth(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Set the format emitted for URL constraints
    pub fn url_format(mut self, format: StringFormat) -> Self {
        self.url_format = format;
        self
    }

    /// Emit absolute `uri` instead of `uri-reference` for URL constraints
    pub fn absolute_urls(mut self) -> Self {
        self.url_format = StringFormat::Uri;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransformerConfig::default();
        assert_eq!(config.max_depth, None);
        assert_eq!(config.url_format, StringFormat::UriReference);
    }

    #[test]
    fn test_builder() {
        let config = TransformerConfig::new().max_depth(3).absolute_urls();
        assert_eq!(config.max_depth, Some(3));
        assert_eq!(config.url_format, StringFormat::Uri);
        assert_eq!(config.clone().unbounded_depth().max_depth, None);

        let config = config.url_format(StringFormat::UriReference);
        assert_eq!(config.url_format, StringFormat::UriReference);
    }
}
