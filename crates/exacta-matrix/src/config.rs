//! Configuration for determinant computation.

/// Which determinant algorithm to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetStrategy {
    /// Pick by ring: Gauss over fields, Bareiss over other integral
    /// domains.
    #[default]
    Auto,
    /// Gaussian elimination, over the fraction field when necessary.
    Gauss,
    /// Fraction-free Bareiss elimination.
    Bareiss,
    /// Cofactor expansion along the first row. Works over any
    /// commutative ring but takes factorial time.
    Laplace,
}

/// Configuration for [`crate::det_with_config`].
#[derive(Clone, Debug)]
pub struct DetConfig {
    /// Algorithm selection.
    pub strategy: DetStrategy,
    /// Use the closed forms for 2x2 and 3x3 matrices under `Auto`.
    pub closed_form: bool,
    /// Run Bareiss on raw big integers for matrices over ZZ.
    pub integer_fast_path: bool,
}

impl Default for DetConfig {
    fn default() -> Self {
        Self {
            strategy: DetStrategy::Auto,
            closed_form: true,
            integer_fast_path: true,
        }
    }
}

impl DetConfig {
    /// The default configuration with a fixed strategy.
    #[must_use]
    pub fn with_strategy(strategy: DetStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}
