use rand::Rng;

use super::{Argb, Pixel};
use crate::math::rng;

/// Colors as the scene describes them. Converted to packed ARGB
/// only when a shape is rasterized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    /// Channels plus an opacity in `[0, 1]`; out-of-range opacity is clamped.
    Rgba(u8, u8, u8, f32),
    /// Hue in degrees, saturation and lightness in `[0, 1]`.
    Hsl(f32, f32, f32),
}

impl Color {
    pub const SILVER: Color = Color::Rgba(192, 192, 192, 1.0);
    pub const RED: Color = Color::Rgba(255, 0, 0, 1.0);
    pub const LIGHT_BLUE: Color = Color::Rgba(173, 216, 230, 1.0);

    pub fn white_alpha(alpha: f32) -> Color {
        Color::Rgba(255, 255, 255, alpha)
    }

    /// Fully saturated, mid-lightness color of a random hue.
    pub fn random_hue<R: Rng + ?Sized>(rng: &mut R) -> Color {
        Color::Hsl(rng::unit(rng) * 360.0, 1.0, 0.5)
    }

    pub fn to_argb(self) -> Argb {
        match self {
            Color::Rgba(r, g, b, a) => {
                let a = (a.clamp(0.0, 1.0) * 255.0).round() as u8;
                Argb::compose([a, r, g, b])
            }

            Color::Hsl(h, s, l) => {
                let [r, g, b] = hsl_to_rgb(h, s, l);
                Argb::compose([0xFF, r, g, b])
            }
        }
    }
}

fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [u8; 3] {
    let h = h.rem_euclid(360.0) / 60.0;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_u8 = |v: f32| ((v + m) * 255.0).round() as u8;

    [to_u8(r), to_u8(g), to_u8(b)]
}
