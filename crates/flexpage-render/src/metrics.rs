//! Deterministic font metrics for the recording renderer.

/// Fixed-advance metrics: every character is `advance * size` wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    /// Advance of one character as a fraction of the font size
    pub advance: f64,
    /// Distance from the top of a line to the baseline, as a fraction of
    /// the font size
    pub ascent: f64,
}

impl FixedMetrics {
    pub fn new(advance: f64) -> Self {
        Self {
            advance,
            ..Default::default()
        }
    }

    pub fn with_ascent(mut self, ascent: f64) -> Self {
        self.ascent = ascent;
        self
    }

    /// Width of `text` at `size`.
    pub fn measure(&self, text: &str, size: f64) -> f64 {
        text.chars().count() as f64 * self.advance * size
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self {
            advance: 0.5,
            ascent: 0.8,
        }
    }
}
