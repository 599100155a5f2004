// src/render/colors.rs
//! Named sequential color scales and hex conversion.

use std::f64::consts::PI;
use std::str::FromStr;

use crate::error::ModgraphError;

/// How strongly node fills are pulled toward white (lower = whiter).
pub const LIGHTEN_ADJUSTER: f64 = 3.0;

/// An RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    #[must_use]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    fn from_bytes([r, g, b]: [u8; 3]) -> Self {
        Self::new(f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0)
    }

    /// Moves each channel `1/adjuster` of the way toward white.
    #[must_use]
    pub fn lighten(self, adjuster: f64) -> Self {
        let up = |c: f64| c + (1.0 - c) / adjuster;
        Self::new(up(self.r), up(self.g), up(self.b))
    }

    /// `#rrggbb`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_hex(self) -> String {
        let byte = |c: f64| (c * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    Plasma,
    Viridis,
    Inferno,
    Magma,
    Gnuplot,
    Greys,
}

impl ColorScale {
    pub const ALL: [Self; 6] = [
        Self::Plasma,
        Self::Viridis,
        Self::Inferno,
        Self::Magma,
        Self::Gnuplot,
        Self::Greys,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Plasma => "plasma",
            Self::Viridis => "viridis",
            Self::Inferno => "inferno",
            Self::Magma => "magma",
            Self::Gnuplot => "gnuplot",
            Self::Greys => "greys",
        }
    }

    /// Color at position `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn sample(self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Plasma => interpolate(&PLASMA, t),
            Self::Viridis => interpolate(&VIRIDIS, t),
            Self::Inferno => interpolate(&INFERNO, t),
            Self::Magma => interpolate(&MAGMA, t),
            Self::Greys => interpolate(&GREYS, t),
            Self::Gnuplot => Rgb::new(t.sqrt(), t.powi(3), (2.0 * PI * t).sin()),
        }
    }

    /// Node fill for a normalized value: sampled, lightened, hex-encoded.
    #[must_use]
    pub fn node_fill(self, t: f64) -> String {
        self.sample(t).lighten(LIGHTEN_ADJUSTER).to_hex()
    }
}

impl FromStr for ColorScale {
    type Err = ModgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|scale| scale.name() == wanted)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|c| c.name()).collect();
                ModgraphError::InvalidInput(format!(
                    "unknown color scale `{s}` (known: {})",
                    known.join(", ")
                ))
            })
    }
}

/// Evenly spaced control points, linearly interpolated.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn interpolate(stops: &[[u8; 3]], t: f64) -> Rgb {
    let Some(last) = stops.len().checked_sub(1) else {
        return Rgb::new(0.0, 0.0, 0.0);
    };
    if last == 0 {
        return Rgb::from_bytes(stops[0]);
    }
    let pos = t * last as f64;
    let lower = (pos.floor() as usize).min(last - 1);
    let frac = pos - lower as f64;

    let a = Rgb::from_bytes(stops[lower]);
    let b = Rgb::from_bytes(stops[lower + 1]);
    let mix = |x: f64, y: f64| x + (y - x) * frac;
    Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

const PLASMA: [[u8; 3]; 9] = [
    [13, 8, 135],
    [76, 2, 161],
    [126, 3, 168],
    [169, 35, 149],
    [204, 71, 120],
    [230, 108, 92],
    [248, 149, 64],
    [253, 197, 39],
    [240, 249, 33],
];

const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [72, 40, 120],
    [62, 73, 137],
    [49, 104, 142],
    [38, 130, 142],
    [31, 158, 137],
    [53, 183, 121],
    [110, 206, 88],
    [253, 231, 37],
];

const INFERNO: [[u8; 3]; 9] = [
    [0, 0, 4],
    [27, 12, 65],
    [74, 12, 107],
    [120, 28, 109],
    [165, 44, 96],
    [207, 68, 70],
    [237, 105, 37],
    [251, 155, 6],
    [252, 255, 164],
];

const MAGMA: [[u8; 3]; 9] = [
    [0, 0, 4],
    [28, 16, 68],
    [79, 18, 123],
    [129, 37, 129],
    [181, 54, 122],
    [229, 80, 100],
    [251, 135, 97],
    [254, 194, 135],
    [252, 253, 191],
];

const GREYS: [[u8; 3]; 2] = [[255, 255, 255], [0, 0, 0]];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_match_stops() {
        assert_eq!(ColorScale::Plasma.sample(0.0).to_hex(), "#0d0887");
        assert_eq!(ColorScale::Plasma.sample(1.0).to_hex(), "#f0f921");
        assert_eq!(ColorScale::Greys.sample(0.5).to_hex(), "#808080");
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(ColorScale::Viridis.sample(-3.0), ColorScale::Viridis.sample(0.0));
        assert_eq!(ColorScale::Viridis.sample(7.0), ColorScale::Viridis.sample(1.0));
        assert_eq!(ColorScale::Viridis.sample(f64::NAN), ColorScale::Viridis.sample(0.0));
    }

    #[test]
    fn test_lighten_moves_toward_white() {
        let black = Rgb::new(0.0, 0.0, 0.0).lighten(LIGHTEN_ADJUSTER);
        assert_eq!(black.to_hex(), "#555555");
        let white = Rgb::new(1.0, 1.0, 1.0).lighten(LIGHTEN_ADJUSTER);
        assert_eq!(white.to_hex(), "#ffffff");
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Plasma".parse::<ColorScale>().ok(), Some(ColorScale::Plasma));
        assert_eq!(" gnuplot ".parse::<ColorScale>().ok(), Some(ColorScale::Gnuplot));
        assert!("jet".parse::<ColorScale>().is_err());
    }

    #[test]
    fn test_gnuplot_is_bounded() {
        for step in 0..=20 {
            let c = ColorScale::Gnuplot.sample(f64::from(step) / 20.0);
            assert!((0.0..=1.0).contains(&c.b));
        }
    }
}
