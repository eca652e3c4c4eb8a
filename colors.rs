/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Color picker state: hex conversions and the recent-colors ring.

/// The ring keeps this many most-recent saved colors.
pub const COLOR_HISTORY_CAP: usize = 4;
pub const COLOR_SAVED_NOTICE: &str = "Color saved!";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColorFormat {
    Hex,
    Rgb,
    Hsl,
}

impl ColorFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ColorFormat::Hex => "HEX",
            ColorFormat::Rgb => "RGB",
            ColorFormat::Hsl => "HSL",
        }
    }

    pub fn copied_notice(&self) -> String {
        format!("{} value copied to clipboard!", self.label())
    }
}

/// `#rrggbb` → channel triple. Strict: exactly six hex digits behind a
/// leading `#`.
fn parse_hex_channels(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some((
        ((value >> 16) & 0xff) as u8,
        ((value >> 8) & 0xff) as u8,
        (value & 0xff) as u8,
    ))
}

/// `#rrggbb` → `rgb(r, g, b)`.
pub fn hex_to_rgb(hex: &str) -> Option<String> {
    let (r, g, b) = parse_hex_channels(hex)?;
    Some(format!("rgb({r}, {g}, {b})"))
}

/// `#rrggbb` → `hsl(h, s%, l%)` with hue in degrees and all three
/// components rounded to integers.
pub fn hex_to_hsl(hex: &str) -> Option<String> {
    let (r8, g8, b8) = parse_hex_channels(hex)?;
    let r = r8 as f64 / 255.0;
    let g = g8 as f64 / 255.0;
    let b = b8 as f64 / 255.0;

    let max8 = r8.max(g8).max(b8);
    let min8 = r8.min(g8).min(b8);
    let max = max8 as f64 / 255.0;
    let min = min8 as f64 / 255.0;
    let l = (max + min) / 2.0;

    // Achromatic when all channels match; hue picks the first maximal
    // channel in r, g, b order.
    let (h, s) = if max8 == min8 {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max8 == r8 {
            (g - b) / d + if g8 < b8 { 6.0 } else { 0.0 }
        } else if max8 == g8 {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h / 6.0, s)
    };

    let h = (h * 360.0).round() as i64;
    let s = (s * 100.0).round() as i64;
    let l = (l * 100.0).round() as i64;
    Some(format!("hsl({h}, {s}%, {l}%)"))
}

/// Render a hex color in the requested copy format. `None` when the hex
/// string is malformed.
pub fn format_color(hex: &str, format: ColorFormat) -> Option<String> {
    match format {
        ColorFormat::Hex => parse_hex_channels(hex).map(|_| hex.to_string()),
        ColorFormat::Rgb => hex_to_rgb(hex),
        ColorFormat::Hsl => hex_to_hsl(hex),
    }
}

/// Recently saved colors, newest first, capped at [`COLOR_HISTORY_CAP`].
/// Duplicates are kept; only an explicit erase clears the ring.
#[derive(Clone, Debug, Default)]
pub struct ColorHistory {
    colors: Vec<String>,
}

impl ColorHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self, color: impl Into<String>) {
        self.colors.insert(0, color.into());
        self.colors.truncate(COLOR_HISTORY_CAP);
    }

    pub fn erase(&mut self) {
        self.colors.clear();
    }

    /// Whether the erase control is offered; a single entry is not worth
    /// a button.
    pub fn shows_erase_control(&self) -> bool {
        self.colors.len() > 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.colors.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
