//! Colors and per-line drawing options.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An opaque RGB color, written as `#rrggbb`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    /// Color of lines that don't have an assigned color.
    pub const GRAY: Color = Color::rgb(0xb0, 0xb0, 0xb0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("Expected a color of the form #rrggbb, got {src:?}.")]
pub struct ColorParseError {
    pub src: String,
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError {
            src: src.to_string(),
        };

        let hex = src.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());

        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// The official colors of the Chicago 'L' lines.
pub mod palette {
    use super::Color;

    pub const RED: Color = Color::rgb(0xc6, 0x0c, 0x30);
    pub const BLUE: Color = Color::rgb(0x00, 0xa1, 0xde);
    pub const BROWN: Color = Color::rgb(0x62, 0x36, 0x1b);
    pub const GREEN: Color = Color::rgb(0x00, 0x9b, 0x3a);
    pub const ORANGE: Color = Color::rgb(0xf9, 0x46, 0x1c);
    pub const PINK: Color = Color::rgb(0xe2, 0x7e, 0xa6);
    pub const PURPLE: Color = Color::rgb(0x52, 0x23, 0x98);
    pub const YELLOW: Color = Color::rgb(0xf9, 0xe3, 0x00);

    /// Looks a line color up by name (case insensitive), e.g. `"pink"`.
    pub fn by_name(name: &str) -> Option<Color> {
        let color = match name.to_ascii_lowercase().as_str() {
            "red" => RED,
            "blue" => BLUE,
            "brown" => BROWN,
            "green" => GREEN,
            "orange" => ORANGE,
            "pink" => PINK,
            "purple" => PURPLE,
            "yellow" => YELLOW,
            _ => return None,
        };

        Some(color)
    }
}

/// Stroke parameters attached to every emitted primitive.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Stroke {
    pub color: Color,
    /// Stroke width in view units (pixels).
    pub thickness: f64,
}

impl Stroke {
    pub fn new(color: Color, thickness: f64) -> Self {
        Stroke { color, thickness }
    }
}

/// Parameters of a train line.
///
/// `default_turn_radius` is expressed in blocks (address units) and scaled like addresses.
/// `station_radius` and the thicknesses are expressed in view units.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineStyle {
    pub stroke_color: Color,
    pub stroke_thickness: f64,
    pub station_radius: f64,
    pub default_turn_radius: f64,
    pub station_color: Color,
    pub station_thickness: f64,
}

impl LineStyle {
    pub const DEFAULT: LineStyle = LineStyle {
        stroke_color: Color::GRAY,
        stroke_thickness: 20.0,
        station_radius: 8.0,
        default_turn_radius: 200.0,
        station_color: Color::BLACK,
        station_thickness: 2.0,
    };

    /// The default style with a different line color.
    pub fn with_color(color: Color) -> Self {
        LineStyle {
            stroke_color: color,
            ..LineStyle::DEFAULT
        }
    }

    pub fn line_stroke(&self) -> Stroke {
        Stroke::new(self.stroke_color, self.stroke_thickness)
    }

    pub fn station_stroke(&self) -> Stroke {
        Stroke::new(self.station_color, self.station_thickness)
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle::DEFAULT
    }
}

#[test]
fn parse_colors() {
    assert_eq!("#c60c30".parse::<Color>(), Ok(palette::RED));
    assert_eq!("#00A1DE".parse::<Color>(), Ok(palette::BLUE));
    assert_eq!(palette::PINK.to_string(), "#e27ea6");
    assert_eq!(Color::GRAY.to_string(), "#b0b0b0");

    for src in &["c60c30", "#c60c3", "#c60c300", "#g60c30", "", "#"] {
        assert_eq!(
            src.parse::<Color>(),
            Err(ColorParseError {
                src: src.to_string()
            })
        );
    }
}

#[test]
fn palette_names() {
    assert_eq!(palette::by_name("Pink"), Some(palette::PINK));
    assert_eq!(palette::by_name("YELLOW"), Some(palette::YELLOW));
    assert_eq!(palette::by_name("teal"), None);
}

#[test]
fn styles() {
    let style = LineStyle::with_color(palette::GREEN);
    assert_eq!(style.line_stroke(), Stroke::new(palette::GREEN, 20.0));
    assert_eq!(style.station_stroke(), Stroke::new(Color::BLACK, 2.0));
    assert_eq!(LineStyle::default().default_turn_radius, 200.0);
}
