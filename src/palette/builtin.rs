//! The fixed set of registered palettes
//!
//! Anchor constants are the interpolation endpoints, so `sample(0.0)`/`sample(1.0)`
//! reproduce them exactly after rounding.

use super::{Palette, PaletteKind, Ramp};
use crate::color::Color;

use PaletteKind::{Diverging, Qualitative, Sequential};
use Ramp::{HueSweep, Linear, Piecewise};

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::rgb(r, g, b)
}

const fn linear(id: &'static str, name: &'static str, kind: PaletteKind, a: Color, b: Color) -> Palette {
    Palette {
        id,
        name,
        kind,
        ramp: Linear(a, b),
    }
}

const fn piecewise(
    id: &'static str,
    name: &'static str,
    kind: PaletteKind,
    a: Color,
    b: Color,
    c: Color,
) -> Palette {
    Palette {
        id,
        name,
        kind,
        ramp: Piecewise(a, b, c),
    }
}

pub(super) const BUILTIN: &[Palette] = &[
    // sequential, single hue
    linear("blues", "Blues", Sequential, rgb(222, 235, 247), rgb(49, 130, 189)),
    linear("greens", "Greens", Sequential, rgb(229, 245, 224), rgb(49, 163, 84)),
    linear("oranges", "Oranges", Sequential, rgb(254, 237, 222), rgb(230, 85, 13)),
    linear("purples", "Purples", Sequential, rgb(239, 237, 245), rgb(117, 107, 177)),
    linear("reds", "Reds", Sequential, rgb(254, 224, 210), rgb(222, 45, 38)),
    linear("greys", "Greys", Sequential, rgb(240, 240, 240), rgb(99, 99, 99)),
    // sequential, multi hue
    piecewise("viridis", "Viridis", Sequential, rgb(68, 1, 84), rgb(33, 145, 140), rgb(253, 231, 37)),
    piecewise("plasma", "Plasma", Sequential, rgb(13, 8, 135), rgb(204, 71, 120), rgb(240, 249, 33)),
    piecewise("inferno", "Inferno", Sequential, rgb(0, 0, 4), rgb(188, 55, 84), rgb(252, 255, 164)),
    piecewise("magma", "Magma", Sequential, rgb(0, 0, 4), rgb(182, 54, 121), rgb(252, 253, 191)),
    piecewise("cividis", "Cividis", Sequential, rgb(0, 34, 78), rgb(125, 135, 0), rgb(255, 233, 69)),
    linear("bupu", "BuPu", Sequential, rgb(224, 236, 244), rgb(136, 86, 167)),
    linear("ylgn", "YlGn", Sequential, rgb(255, 255, 204), rgb(49, 163, 84)),
    linear("ylorbr", "YlOrBr", Sequential, rgb(255, 255, 212), rgb(204, 76, 2)),
    linear("ocean", "Ocean", Sequential, rgb(0, 76, 109), rgb(136, 208, 209)),
    piecewise("sunset", "Sunset", Sequential, rgb(255, 107, 107), rgb(255, 202, 87), rgb(255, 159, 243)),
    linear("mint", "Mint", Sequential, rgb(212, 252, 121), rgb(150, 230, 161)),
    linear("cherry", "Cherry", Sequential, rgb(255, 175, 204), rgb(164, 19, 60)),
    linear("forest", "Forest", Sequential, rgb(19, 78, 94), rgb(113, 178, 128)),
    linear("lavender", "Lavender", Sequential, rgb(224, 195, 252), rgb(142, 197, 252)),
    linear("gold", "Gold", Sequential, rgb(255, 236, 210), rgb(252, 182, 159)),
    piecewise("earth", "Earth", Sequential, rgb(139, 69, 19), rgb(222, 184, 135), rgb(34, 139, 34)),
    // diverging
    piecewise("rdbu", "RdBu", Diverging, rgb(178, 24, 43), rgb(247, 247, 247), rgb(33, 102, 172)),
    piecewise("rdylgn", "RdYlGn", Diverging, rgb(215, 48, 39), rgb(255, 255, 191), rgb(26, 152, 80)),
    piecewise("spectral", "Spectral", Diverging, rgb(213, 62, 79), rgb(255, 255, 191), rgb(50, 136, 189)),
    piecewise("coolwarm", "Coolwarm", Diverging, rgb(59, 76, 192), rgb(247, 247, 247), rgb(180, 4, 38)),
    // qualitative / special
    Palette {
        id: "rainbow",
        name: "Rainbow",
        kind: Qualitative,
        ramp: HueSweep,
    },
    piecewise("twilight", "Twilight", Qualitative, rgb(226, 217, 226), rgb(94, 79, 162), rgb(226, 217, 226)),
    piecewise("cyber", "Cyber", Qualitative, rgb(0, 245, 212), rgb(123, 44, 191), rgb(247, 37, 133)),
    piecewise("neon", "Neon", Qualitative, rgb(57, 255, 20), rgb(255, 7, 58), rgb(0, 255, 247)),
];
