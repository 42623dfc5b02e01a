//! Conversion settings.

/// Default limit on how deeply nested a value may be.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration shared by the forward and reverse converters.
///
/// # Example
///
/// ```rust
/// use pojo_types::ConversionConfig;
///
/// let config = ConversionConfig::new().with_max_depth(64);
/// assert_eq!(config.max_depth, 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionConfig {
    /// Deepest container nesting a converter will descend into before
    /// failing with `DepthExceeded`. The top-level value is depth 0.
    pub max_depth: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ConversionConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_depth() {
        assert_eq!(ConversionConfig::new().max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_builder() {
        let config = ConversionConfig::new().with_max_depth(3);
        assert_eq!(config, ConversionConfig { max_depth: 3 });
    }
}
