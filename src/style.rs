// Depth-based coloring: read-only helpers the renderer uses to paint
// boxes by nesting level. Never consulted by the structural core.

use std::fmt;

/// How box colors are derived from depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMethod {
    /// Lighten the primary color as depth increases.
    Shade,
    /// Flip between primary and secondary by depth parity.
    Alternate,
}

impl ColorMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMethod::Shade => "shade",
            ColorMethod::Alternate => "alternate",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "shade" => Some(ColorMethod::Shade),
            "alternate" => Some(ColorMethod::Alternate),
            _ => None,
        }
    }
}

/// RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS `rgb(r, g, b)` string.
    pub fn parse(s: &str) -> Option<Self> {
        let inner = s.trim().strip_prefix("rgb(")?.strip_suffix(')')?;
        let mut channels = inner.split(',').map(|c| c.trim().parse::<u8>().ok());
        let rgb = Self {
            r: channels.next()??,
            g: channels.next()??,
            b: channels.next()??,
        };
        if channels.next().is_some() {
            return None;
        }
        Some(rgb)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// HSL color: hue in degrees, saturation and lightness in percent,
/// rounded to integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

/// Convert an RGB color to HSL.
pub fn rgb_to_hsl(color: Rgb) -> Hsl {
    let r = color.r as f32 / 255.0;
    let g = color.g as f32 / 255.0;
    let b = color.b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        // Achromatic.
        return Hsl {
            h: 0,
            s: 0,
            l: (l * 100.0).round() as u8,
        };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let sextant = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    let h = sextant / 6.0;

    Hsl {
        h: (h * 360.0).round() as u16,
        s: (s * 100.0).round() as u8,
        l: (l * 100.0).round() as u8,
    }
}

/// Compute the CSS color for a box at the given depth.
pub fn depth_color(depth: usize, method: ColorMethod, primary: Rgb, secondary: Rgb) -> String {
    match method {
        ColorMethod::Alternate => {
            if depth % 2 == 0 {
                primary.to_string()
            } else {
                secondary.to_string()
            }
        }
        ColorMethod::Shade => {
            // Lighten by 10 percentage points per nesting level.
            let base = rgb_to_hsl(primary);
            let lightness = (base.l as usize + depth * 10).min(100);
            format!("hsl({}, {}%, {}%)", base.h, base.s, lightness)
        }
    }
}
