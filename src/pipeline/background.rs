//! Classification of pixels as scene background

use crate::color::Color;

/// The clear color of the upstream renderer's scene (`#0d1117`)
pub const DEFAULT_BACKGROUND: Color = Color::rgb(13, 17, 23);

/// Default per-channel matching tolerance.
///
/// Chosen empirically: wide enough to swallow anti-aliasing halos around the
/// foreground, narrow enough to keep dim foreground colors.
pub const DEFAULT_TOLERANCE: u8 = 20;

/// Decides whether a sampled color belongs to the scene background
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BackgroundClassifier {
    /// The reference background color that pixels are compared against
    pub reference: Color,
    /// Maximum absolute per-channel difference (exclusive) under which a pixel
    /// still counts as background
    pub tolerance: u8,
}

impl BackgroundClassifier {
    /// Create a classifier for the given reference color and tolerance
    pub fn new(reference: Color, tolerance: u8) -> Self {
        Self { reference, tolerance }
    }

    /// Whether the given color belongs to the scene background.
    ///
    /// True iff every RGB channel differs from the reference by strictly less than
    /// the tolerance. Fully transparent pixels always count as background since only
    /// the transparency pass itself produces them from cells it classified as such.
    pub fn is_background(&self, color: Color) -> bool {
        if color.is_transparent() {
            return true;
        }
        color.0.abs_diff(self.reference.0) < self.tolerance
            && color.1.abs_diff(self.reference.1) < self.tolerance
            && color.2.abs_diff(self.reference.2) < self.tolerance
    }
}

impl Default for BackgroundClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_BACKGROUND, DEFAULT_TOLERANCE)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_reference_color_is_background() {
        let classifier = BackgroundClassifier::default();
        assert!(classifier.is_background(DEFAULT_BACKGROUND));
    }

    #[test]
    fn test_tolerance_is_exclusive() {
        let classifier = BackgroundClassifier::default();
        // one channel exactly at the tolerance boundary is already foreground
        assert!(!classifier.is_background(Color::rgb(13 + DEFAULT_TOLERANCE, 17, 23)));
        assert!(classifier.is_background(Color::rgb(13 + DEFAULT_TOLERANCE - 1, 17, 23)));
    }

    #[test]
    fn test_foreground_is_not_background() {
        let classifier = BackgroundClassifier::default();
        assert!(!classifier.is_background(Color::rgb(200, 40, 40)));
        // dim foreground close to but outside the tolerance window
        assert!(!classifier.is_background(Color::rgb(13, 17, 23 + DEFAULT_TOLERANCE)));
    }

    #[test]
    fn test_transparent_pixels_stay_background() {
        let classifier = BackgroundClassifier::default();
        assert!(classifier.is_background(Color::TRANSPARENT));
    }
}
