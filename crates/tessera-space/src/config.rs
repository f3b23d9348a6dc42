//! Cell decomposer configuration parameters.

/// Configuration for a [`CellDecomposer`](crate::CellDecomposer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecomposerConfig {
    /// Width of the guard ring in cells, on each side of every axis.
    ///
    /// Default: 1. Every axis must have more than `2 * padding` cells.
    pub padding: usize,
}

impl DecomposerConfig {
    /// Default guard ring width.
    pub const DEFAULT_PADDING: usize = 1;

    /// Config with the given guard ring width.
    pub fn new(padding: usize) -> Self {
        Self { padding }
    }

    /// Cells consumed by the guard ring on one axis (both sides).
    pub fn guard_cells(&self) -> usize {
        2 * self.padding
    }
}

impl Default for DecomposerConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PADDING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_padding_is_one() {
        let config = DecomposerConfig::default();
        assert_eq!(config.padding, 1);
        assert_eq!(config.guard_cells(), 2);
    }
}
