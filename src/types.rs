// Core value types shared by the generators, the asset sink and the preview.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Screen buffer for the preview window.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the window is (pixels)
    pub height: usize,     // how tall the window is (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// RGBA color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Erase value and background fill.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build from normalized channels; values are clamped to [0,1] and rounded.
    pub fn from_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgba(q(r), q(g), q(b), q(a))
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

/// Accepts `#RRGGBB`, `#RRGGBBAA` (the `#` is optional) or four
/// comma-separated channels in [0,1] such as `1,0.5,0,1`.
impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(',') {
            let channels = s
                .split(',')
                .map(|c| c.trim().parse::<f32>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| Error::InvalidParameter(format!("color {s:?}: {e}")))?;
            return match channels[..] {
                [r, g, b, a] => Ok(Self::from_f32(r, g, b, a)),
                _ => Err(Error::InvalidParameter(format!("color {s:?}: expected 4 channels"))),
            };
        }
        let hex = s.trim().trim_start_matches('#');
        if !matches!(hex.len(), 6 | 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidParameter(format!(
                "color {s:?}: expected #RRGGBB or #RRGGBBAA"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| Error::InvalidParameter(format!("color {s:?}: {e}")))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl TryFrom<String> for Color {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_string()
    }
}

/// The texture sizes offered by the generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TextureSize {
    S32 = 32,
    S64 = 64,
    S128 = 128,
    S256 = 256,
    #[default]
    S512 = 512,
    S1024 = 1024,
    S2048 = 2048,
    S4096 = 4096,
    S8192 = 8192,
}

impl TextureSize {
    pub const ALL: [TextureSize; 9] = [
        TextureSize::S32,
        TextureSize::S64,
        TextureSize::S128,
        TextureSize::S256,
        TextureSize::S512,
        TextureSize::S1024,
        TextureSize::S2048,
        TextureSize::S4096,
        TextureSize::S8192,
    ];

    pub fn pixels(self) -> u32 {
        self as u32
    }

    /// Upper bound for the outline width and corner radius sliders.
    pub fn half(self) -> u32 {
        self.pixels() / 2
    }

    pub fn from_pixels(px: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.pixels() == px)
    }

    /// Next larger size, saturating at the largest.
    pub fn larger(self) -> Self {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + 1).min(Self::ALL.len() - 1)]
    }

    /// Next smaller size, saturating at the smallest.
    pub fn smaller(self) -> Self {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[i.saturating_sub(1)]
    }
}

impl fmt::Display for TextureSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

impl TryFrom<u32> for TextureSize {
    type Error = Error;
    fn try_from(px: u32) -> Result<Self, Self::Error> {
        Self::from_pixels(px).ok_or_else(|| {
            Error::InvalidParameter(format!(
                "texture size {px}: expected one of 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192"
            ))
        })
    }
}

impl From<TextureSize> for u32 {
    fn from(s: TextureSize) -> u32 {
        s.pixels()
    }
}

impl FromStr for TextureSize {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let px: u32 = s
            .trim()
            .parse()
            .map_err(|e| Error::InvalidParameter(format!("texture size {s:?}: {e}")))?;
        Self::try_from(px)
    }
}

/// Which generator a request goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    OutlinedCircle,
    RoundedRect,
}

impl ShapeKind {
    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::OutlinedCircle => "Outlined Circle",
            ShapeKind::RoundedRect => "Rounded Rectangle",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ShapeKind::OutlinedCircle => ShapeKind::RoundedRect,
            ShapeKind::RoundedRect => ShapeKind::OutlinedCircle,
        }
    }
}

/// 9-slice border inset in pixels, in (left, bottom, right, top) order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteBorder {
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
    pub top: u32,
}

impl SpriteBorder {
    pub const ZERO: SpriteBorder = SpriteBorder { left: 0, bottom: 0, right: 0, top: 0 };

    pub fn uniform(px: u32) -> Self {
        Self { left: px, bottom: px, right: px, top: px }
    }
}
