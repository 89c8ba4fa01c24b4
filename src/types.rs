// Core types shared by the capture state, the renderer and the window.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// A position in surface-local pixels (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// One straight piece of a stroke, captured from a single pointer movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Persisted form: `[start x, start y, end x, end y]`.
    pub fn to_tuple(&self) -> [f32; 4] {
        [self.start.x, self.start.y, self.end.x, self.end.y]
    }

    pub fn from_tuple(t: [f32; 4]) -> Self {
        Self::new(Point::new(t[0], t[1]), Point::new(t[2], t[3]))
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// 8-bit straight-alpha color. Serializes as `#RRGGBB` (or `#RRGGBBAA` when not opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(0x88, 0x88, 0x88);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Pack as 0x00RRGGBB for minifb (alpha dropped).
    pub fn to_u32(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub fn to_skia(&self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&value).ok_or_else(|| format!("invalid color {value:?}, expected #RRGGBB or #RRGGBBAA"))
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_string()
    }
}

/// What the window shows each frame.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Self { width, height, pixels: vec![fill; width * height] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_form_keeps_exact_coordinates() {
        let seg = Segment::new(Point::new(1.5, 2.7), Point::new(100.123, 200.456));
        assert_eq!(seg.to_tuple(), [1.5, 2.7, 100.123, 200.456]);
        assert_eq!(Segment::from_tuple(seg.to_tuple()), seg);
    }

    #[test]
    fn segments_compare_by_both_points() {
        let a = Segment::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        assert_eq!(a, Segment::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0)));
        assert_ne!(a, Segment::new(Point::new(5.0, 6.0), Point::new(3.0, 4.0)));
        assert_ne!(a, Segment::new(Point::new(1.0, 2.0), Point::new(7.0, 8.0)));
    }

    #[test]
    fn color_hex_parsing() {
        assert_eq!(Color::parse_hex("#000000"), Some(Color::BLACK));
        assert_eq!(Color::parse_hex("#ff000080"), Some(Color::rgba(255, 0, 0, 128)));
        assert_eq!(Color::parse_hex("ffffff"), None);
        assert_eq!(Color::parse_hex("#fff"), None);
        assert_eq!(Color::parse_hex("#gg0000"), None);
        assert_eq!(Color::WHITE.to_string(), "#FFFFFF");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");
    }

    #[test]
    fn color_packs_for_window() {
        assert_eq!(Color::rgb(0x12, 0x34, 0x56).to_u32(), 0x00_12_34_56);
    }
}
