//!
//! Named color ramps for coloring structure elements by sequence position
//!
//! All palettes live in a fixed, process-wide registry that is fully constructed at compile
//! time and never mutated, so it can be read from any number of threads without
//! synchronization.
//!

mod builtin;

use crate::color::Color;
use thiserror::Error;

/// Classification of a palette after the kind of data it is suited for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteKind {
    /// Sequential ramps are suited to ordered data that progress from low to high.
    /// Lightness steps dominate the look of these schemes.
    Sequential,
    /// Diverging ramps put equal emphasis on mid-range values and the extremes
    /// at both ends of the data range.
    Diverging,
    /// Qualitative ramps use hue to create visual differences between classes
    /// without implying magnitude.
    Qualitative,
}

/// The closed-form interpolation rule of a palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ramp {
    /// A single linear blend between two anchor colors
    Linear(Color, Color),
    /// Two linear segments between three anchor colors, split at `t = 0.5`
    Piecewise(Color, Color, Color),
    /// A hue sweep from 0° to 300° at fixed saturation 0.8 and lightness 0.6
    HueSweep,
}

/// A named, registered color ramp mapping a normalized scalar to a color
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    id: &'static str,
    name: &'static str,
    kind: PaletteKind,
    ramp: Ramp,
}

/// An error which indicates that no palette is registered under a requested id
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("no palette is registered under the id {id:?}")]
pub struct UnknownPaletteError {
    id: String,
}

impl Palette {
    /// The identifier under which this palette is registered
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// The human readable display name of this palette
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Which kind of data this palette is suited for
    pub fn kind(&self) -> PaletteKind {
        self.kind
    }

    /// The anchor colors of this palette, usable as preview swatches.
    ///
    /// `sample(0.0)` and `sample(1.0)` are always equal to the first and last anchor.
    pub fn anchors(&self) -> Vec<Color> {
        match self.ramp {
            Ramp::Linear(a, b) => vec![a, b],
            Ramp::Piecewise(a, b, c) => vec![a, b, c],
            Ramp::HueSweep => vec![self.sample(0.0), self.sample(0.5), self.sample(1.0)],
        }
    }

    /// Map a normalized scalar `t` to a color.
    ///
    /// `t` is expected to lie in `[0, 1]`; callers must clamp out-of-range values themselves.
    pub fn sample(&self, t: f64) -> Color {
        match self.ramp {
            Ramp::Linear(a, b) => lerp(a, b, t),
            Ramp::Piecewise(a, b, c) => {
                if t < 0.5 {
                    lerp(a, b, t * 2.0)
                } else {
                    lerp(b, c, (t - 0.5) * 2.0)
                }
            }
            Ramp::HueSweep => hue_sweep(t),
        }
    }
}

/// Linearly interpolate every channel between two anchor colors
fn lerp(a: Color, b: Color, t: f64) -> Color {
    Color::rgb(
        lerp_channel(a.0, b.0, t),
        lerp_channel(a.1, b.1, t),
        lerp_channel(a.2, b.2, t),
    )
}

fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + t * (f64::from(b) - f64::from(a))).round() as u8
}

/// Map `t` to a hue sweep over 0°–300° at fixed saturation and lightness (HSL→RGB)
fn hue_sweep(t: f64) -> Color {
    const SATURATION: f64 = 0.8;
    const LIGHTNESS: f64 = 0.6;

    let hue = t * 300.0;
    let c = (1.0 - (2.0 * LIGHTNESS - 1.0).abs()) * SATURATION;
    let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = LIGHTNESS - c / 2.0;

    let (r, g, b) = if hue < 60.0 {
        (c, x, 0.0)
    } else if hue < 120.0 {
        (x, c, 0.0)
    } else if hue < 180.0 {
        (0.0, c, x)
    } else if hue < 240.0 {
        (0.0, x, c)
    } else if hue < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Color::rgb(
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}

/// All registered palettes in registration order
pub fn registry() -> &'static [Palette] {
    builtin::BUILTIN
}

/// Look a palette up by its identifier
pub fn lookup(id: &str) -> Result<&'static Palette, UnknownPaletteError> {
    registry()
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| UnknownPaletteError { id: id.to_owned() })
}

/// Map a normalized scalar to a color through the palette registered under `id`
pub fn interpolate(id: &str, t: f64) -> Result<Color, UnknownPaletteError> {
    Ok(lookup(id)?.sample(t))
}

/// The identifiers of all palettes of the given kind, in registration order
pub fn list_by_kind(kind: PaletteKind) -> Vec<&'static str> {
    registry()
        .iter()
        .filter(|p| p.kind == kind)
        .map(|p| p.id)
        .collect()
}

/// Color a residue by its position within its chain's residue index span.
///
/// A residue at index `resi` of a chain spanning `min_resi..=max_resi` maps to
/// `t = (resi - min_resi) / max(1, max_resi - min_resi)`.
/// A chain consisting of a single residue index maps every residue to `t = 0`.
pub fn residue_color(palette: &Palette, resi: i32, min_resi: i32, max_resi: i32) -> Color {
    let span = i64::from(max_resi) - i64::from(min_resi);
    let t = f64::from(resi - min_resi) / span.max(1) as f64;
    palette.sample(t)
}

#[cfg(test)]
mod test {
    use super::*;

    /// The sub-intervals of `[0, 1]` on which a palette's interpolation is a single
    /// linear segment per channel
    fn segments(palette: &Palette) -> Vec<(f64, f64)> {
        match palette.ramp {
            Ramp::Linear(_, _) => vec![(0.0, 1.0)],
            Ramp::Piecewise(_, _, _) => vec![(0.0, 0.5), (0.5, 1.0)],
            // one segment per 60° hue band of the 300° sweep
            Ramp::HueSweep => (0..5).map(|i| (i as f64 * 0.2, (i + 1) as f64 * 0.2)).collect(),
        }
    }

    #[test]
    fn test_registry_is_large_enough() {
        assert!(registry().len() >= 20);
        for kind in [
            PaletteKind::Sequential,
            PaletteKind::Diverging,
            PaletteKind::Qualitative,
        ] {
            assert!(!list_by_kind(kind).is_empty(), "no palettes of kind {kind:?}");
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = registry().iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), registry().len());
    }

    #[test]
    fn test_endpoints_match_anchors() {
        for palette in registry() {
            let anchors = palette.anchors();
            assert_eq!(
                palette.sample(0.0),
                anchors[0],
                "palette {} starts off its first anchor",
                palette.id
            );
            assert_eq!(
                palette.sample(1.0),
                *anchors.last().unwrap(),
                "palette {} ends off its last anchor",
                palette.id
            );
        }
    }

    #[test]
    fn test_piecewise_midpoint_hits_middle_anchor() {
        for palette in registry() {
            if let Ramp::Piecewise(_, b, _) = palette.ramp {
                assert_eq!(palette.sample(0.5), b, "palette {}", palette.id);
            }
        }
    }

    #[test]
    fn test_channels_are_monotonic_within_segments() {
        const STEPS: usize = 32;
        for palette in registry() {
            for (lo, hi) in segments(palette) {
                let samples: Vec<Color> = (0..=STEPS)
                    .map(|i| palette.sample(lo + (hi - lo) * i as f64 / STEPS as f64))
                    .collect();
                for channel in 0..3 {
                    let values: Vec<i16> = samples
                        .iter()
                        .map(|c| i16::from(<[u8; 4]>::from(*c)[channel]))
                        .collect();
                    let rising = values.windows(2).any(|w| w[1] > w[0]);
                    let falling = values.windows(2).any(|w| w[1] < w[0]);
                    assert!(
                        !(rising && falling),
                        "palette {} channel {} reverses within segment {:?}",
                        palette.id,
                        channel,
                        (lo, hi)
                    );
                }
            }
        }
    }

    #[test]
    fn test_viridis_quarter_point() {
        // halfway into the first segment between anchors (68,1,84) and (33,145,140)
        assert_eq!(
            interpolate("viridis", 0.25).unwrap(),
            Color::rgb(51, 73, 112)
        );
    }

    #[test]
    fn test_unknown_palette_is_reported() {
        assert!(interpolate("no-such-palette", 0.5).is_err());
    }

    #[test]
    fn test_default_palette_is_registered() {
        assert!(lookup(crate::orchestrator::DEFAULT_PALETTE).is_ok());
    }

    #[test]
    fn test_residue_color_degenerate_chain() {
        let palette = lookup("blues").unwrap();
        // a chain whose residues all share one index must not divide by zero
        assert_eq!(
            residue_color(palette, 17, 17, 17),
            palette.sample(0.0)
        );
    }

    #[test]
    fn test_residue_color_spans_chain() {
        let palette = lookup("viridis").unwrap();
        assert_eq!(residue_color(palette, 1, 1, 100), palette.sample(0.0));
        assert_eq!(residue_color(palette, 100, 1, 100), palette.sample(1.0));
    }
}
