//! Four-sided values (margin, padding, border widths).

/// A value per side, in CSS order: top, right, bottom, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trbl<T> {
    pub top: T,
    pub right: T,
    pub bottom: T,
    pub left: T,
}

impl<T> Trbl<T> {
    pub const fn new(top: T, right: T, bottom: T, left: T) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Apply `f` to every side.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Trbl<U> {
        Trbl {
            top: f(&self.top),
            right: f(&self.right),
            bottom: f(&self.bottom),
            left: f(&self.left),
        }
    }
}

impl<T: Clone> Trbl<T> {
    /// Same value on every side.
    pub fn uniform(value: T) -> Self {
        Self {
            top: value.clone(),
            right: value.clone(),
            bottom: value.clone(),
            left: value,
        }
    }

    /// `horizontal` on left/right, `vertical` on top/bottom.
    pub fn symmetric(horizontal: T, vertical: T) -> Self {
        Self {
            top: vertical.clone(),
            right: horizontal.clone(),
            bottom: vertical,
            left: horizontal,
        }
    }
}

/// Margin, padding and border widths.
pub type Spacing = Trbl<f64>;

impl Trbl<f64> {
    pub const ZERO: Spacing = Trbl::new(0.0, 0.0, 0.0, 0.0);

    /// Total of the left and right sides.
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total of the top and bottom sides.
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    /// Sum of two spacings side by side.
    pub fn combine(&self, other: &Spacing) -> Spacing {
        Spacing::new(
            self.top + other.top,
            self.right + other.right,
            self.bottom + other.bottom,
            self.left + other.left,
        )
    }
}

impl From<f64> for Spacing {
    fn from(value: f64) -> Self {
        Spacing::uniform(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_and_symmetric() {
        let s = Spacing::uniform(3.0);
        assert_eq!(s.horizontal(), 6.0);
        assert_eq!(s.vertical(), 6.0);

        let s = Spacing::symmetric(10.0, 2.0);
        assert_eq!(s.left, 10.0);
        assert_eq!(s.top, 2.0);
        assert_eq!(s.horizontal(), 20.0);
        assert_eq!(s.vertical(), 4.0);
    }

    #[test]
    fn test_combine() {
        let a = Spacing::new(1.0, 2.0, 3.0, 4.0);
        let b = Spacing::uniform(1.0);
        assert_eq!(a.combine(&b), Spacing::new(2.0, 3.0, 4.0, 5.0));
    }

    #[test]
    fn test_map() {
        let names = Trbl::new("t", "r", "b", "l").map(|s| s.len());
        assert_eq!(names, Trbl::uniform(1));
    }
}
