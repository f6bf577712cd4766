use std::fmt;

use serde::{Serialize, Serializer};

pub const NEUTRAL_COLOR: &str = "#94a3b8";

/// Block color for a subject. Every class of the same subject gets the same
/// color on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectColor {
    Neutral,
    Hsl {
        hue: u32,
        saturation: u32,
        lightness: u32,
    },
}

impl SubjectColor {
    #[must_use]
    pub fn for_subject(subject: Option<&str>) -> Self {
        match subject {
            Some(subject) if !subject.is_empty() => Self::from_hash(subject_hash(subject)),
            _ => Self::Neutral,
        }
    }

    fn from_hash(hash: i32) -> Self {
        Self::Hsl {
            hue: (hash % 360).unsigned_abs(),
            saturation: 65 + hash.unsigned_abs() % 15,
            lightness: 55 + (hash >> 8).unsigned_abs() % 15,
        }
    }

    /// ANSI 24-bit foreground escape code for terminal output.
    #[must_use]
    pub fn ansi_code(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("38;2;{r};{g};{b}")
    }

    #[must_use]
    pub fn rgb(&self) -> (u8, u8, u8) {
        match *self {
            Self::Neutral => (0x94, 0xa3, 0xb8),
            Self::Hsl {
                hue,
                saturation,
                lightness,
            } => hsl_to_rgb(hue, saturation, lightness),
        }
    }
}

/// 32-bit string hash over UTF-16 code units: `unit + (hash * 31)` with
/// signed wraparound after every step.
#[must_use]
pub fn subject_hash(subject: &str) -> i32 {
    subject.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add((hash << 5).wrapping_sub(hash))
    })
}

fn hsl_to_rgb(hue: u32, saturation: u32, lightness: u32) -> (u8, u8, u8) {
    let h = f64::from(hue % 360) / 60.0;
    let s = f64::from(saturation.min(100)) / 100.0;
    let l = f64::from(lightness.min(100)) / 100.0;

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = l - chroma / 2.0;
    let channel = |value: f64| ((value + m) * 255.0).round().clamp(0.0, 255.0) as u8;

    (channel(r), channel(g), channel(b))
}

impl fmt::Display for SubjectColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neutral => f.write_str(NEUTRAL_COLOR),
            Self::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({hue}, {saturation}%, {lightness}%)"),
        }
    }
}

impl Serialize for SubjectColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
