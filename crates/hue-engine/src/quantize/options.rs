//! Quantizer options.

use super::DEFAULT_SEED;

/// Configuration for [`super::Quantizer`].
///
/// # Defaults
///
/// - `max_colors`: 10 dominant colors per image
/// - `max_iterations`: 20 Lloyd refinement passes
/// - `convergence`: stop once no centroid moves more than 0.5 RGB units
/// - `seed`: [`DEFAULT_SEED`]
///
/// # Example
///
/// ```
/// use hue_engine::QuantizeOptions;
///
/// let options = QuantizeOptions::new().max_colors(6).seed(7);
/// assert_eq!(options.max_colors, 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizeOptions {
    /// Upper bound on samples returned per image (K).
    pub max_colors: usize,
    /// Upper bound on refinement passes.
    pub max_iterations: u32,
    /// Largest centroid movement (RGB units) still counted as "moved".
    pub convergence: f32,
    /// Seed for k-means++ initialization.
    pub seed: u64,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            max_colors: 10,
            max_iterations: 20,
            convergence: 0.5,
            seed: DEFAULT_SEED,
        }
    }
}

impl QuantizeOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn max_colors(mut self, k: usize) -> Self {
        self.max_colors = k;
        self
    }

    #[inline]
    pub fn max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = iterations;
        self
    }

    #[inline]
    pub fn convergence(mut self, threshold: f32) -> Self {
        self.convergence = threshold;
        self
    }

    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let opts = QuantizeOptions::default();
        assert_eq!(opts.max_colors, 10);
        assert_eq!(opts.max_iterations, 20);
        assert_eq!(opts.convergence, 0.5);
        assert_eq!(opts.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_builder_chain() {
        let opts = QuantizeOptions::new()
            .max_colors(4)
            .max_iterations(5)
            .convergence(1.0)
            .seed(42);
        assert_eq!(
            opts,
            QuantizeOptions {
                max_colors: 4,
                max_iterations: 5,
                convergence: 1.0,
                seed: 42,
            }
        );
    }
}
