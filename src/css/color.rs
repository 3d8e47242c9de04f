use std::fmt;

use anyhow::{bail, ensure, Result};

use crate::css::component::{trim_whitespace, ComponentValue};
use crate::css::token::CssToken;

/// A resolved sRGB color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

/// Serializes the way CSSOM reads colors back.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// The result of parsing `<color>`.
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    CurrentColor,
    Rgba(Rgba),
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::CurrentColor => write!(f, "currentcolor"),
            Color::Rgba(rgba) => write!(f, "{}", rgba),
        }
    }
}

// <color> =
//   <hex-color>       |
//   <color-function>  |
//   <named-color>     |
//   currentColor      |
//   transparent
pub fn parse_color(value: &ComponentValue) -> Result<Color> {
    match value {
        ComponentValue::PreservedToken(CssToken::Ident(name)) => {
            match name.to_ascii_lowercase().as_str() {
                "currentcolor" => Ok(Color::CurrentColor),
                "transparent" => Ok(Color::Rgba(Rgba {
                    r: 0,
                    g: 0,
                    b: 0,
                    a: 0.0,
                })),
                lower => match name_to_rgb(lower) {
                    Some((r, g, b)) => Ok(Color::Rgba(Rgba { r, g, b, a: 1.0 })),
                    None => bail!("Unknown color name: {}", name),
                },
            }
        }
        ComponentValue::PreservedToken(CssToken::Hash(hex)) => {
            let (r, g, b, a) = hex_to_rgba(hex)?;
            Ok(Color::Rgba(Rgba {
                r,
                g,
                b,
                a: round_alpha(a as f32 / 255.0),
            }))
        }
        ComponentValue::Function { name, values } => {
            match name.to_ascii_lowercase().as_str() {
                "rgb" | "rgba" => Ok(Color::Rgba(parse_rgb_arguments(values)?)),
                _ => bail!("Unsupported color function: {}", name),
            }
        }
        _ => bail!("Invalid color value: {}", value),
    }
}

// rgb( <number>{3} [ / <alpha> ]? ) and the legacy comma-separated form,
// with percentages allowed for every channel.
fn parse_rgb_arguments(values: &[ComponentValue]) -> Result<Rgba> {
    let args = trim_whitespace(values)
        .iter()
        .filter(|v| {
            !matches!(
                v,
                ComponentValue::PreservedToken(
                    CssToken::Whitespace | CssToken::Comma | CssToken::Delim('/')
                )
            )
        })
        .collect::<Vec<_>>();
    ensure!(
        args.len() == 3 || args.len() == 4,
        "rgb() takes 3 or 4 arguments, found {}",
        args.len()
    );

    let mut channels = [0u8; 3];
    for (channel, arg) in channels.iter_mut().zip(&args) {
        *channel = match arg {
            ComponentValue::PreservedToken(CssToken::Number(n)) => n.round().clamp(0.0, 255.0) as u8,
            ComponentValue::PreservedToken(CssToken::Percentage(p)) => {
                (p * 2.55).round().clamp(0.0, 255.0) as u8
            }
            _ => bail!("Invalid rgb() channel: {}", arg),
        };
    }
    let a = match args.get(3) {
        None => 1.0,
        Some(ComponentValue::PreservedToken(CssToken::Number(n))) => {
            round_alpha(n.clamp(0.0, 1.0))
        }
        Some(ComponentValue::PreservedToken(CssToken::Percentage(p))) => {
            round_alpha((p / 100.0).clamp(0.0, 1.0))
        }
        Some(arg) => bail!("Invalid rgb() alpha: {}", arg),
    };

    let [r, g, b] = channels;
    Ok(Rgba { r, g, b, a })
}

/// Alpha is read back with at most three decimals.
fn round_alpha(a: f32) -> f32 {
    (a * 1000.0).round() / 1000.0
}

fn hex_to_rgba(hex: &str) -> Result<(u8, u8, u8, u8)> {
    ensure!(
        hex.chars().all(|c| c.is_ascii_hexdigit()),
        "Invalid hex color: #{}",
        hex
    );
    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1].repeat(2), 16);
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
    match hex.len() {
        3 => Ok((digit(0)?, digit(1)?, digit(2)?, 255)),
        4 => Ok((digit(0)?, digit(1)?, digit(2)?, digit(3)?)),
        6 => Ok((pair(0)?, pair(2)?, pair(4)?, 255)),
        8 => Ok((pair(0)?, pair(2)?, pair(4)?, pair(6)?)),
        _ => bail!("Invalid hex color: #{}", hex),
    }
}

fn name_to_rgb(name: &str) -> Option<(u8, u8, u8)> {
    match name {
        "black" => Some((0, 0, 0)),
        "silver" => Some((192, 192, 192)),
        "gray" | "grey" => Some((128, 128, 128)),
        "white" => Some((255, 255, 255)),
        "maroon" => Some((128, 0, 0)),
        "red" => Some((255, 0, 0)),
        "purple" => Some((128, 0, 128)),
        "fuchsia" | "magenta" => Some((255, 0, 255)),
        "blueviolet" => Some((138, 43, 226)),
        "green" => Some((0, 128, 0)),
        "lime" => Some((0, 255, 0)),
        "olive" => Some((128, 128, 0)),
        "yellowgreen" => Some((154, 205, 50)),
        "yellow" => Some((255, 255, 0)),
        "navy" => Some((0, 0, 128)),
        "blue" => Some((0, 0, 255)),
        "teal" => Some((0, 128, 128)),
        "aqua" | "cyan" => Some((0, 255, 255)),
        "orange" => Some((255, 165, 0)),
        "brown" => Some((165, 42, 42)),
        "rebeccapurple" => Some((102, 51, 153)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::component::parse_value;

    fn color(css: &str) -> Result<Color> {
        parse_color(&parse_value(css)?[0])
    }

    #[test]
    fn named() {
        assert_eq!(color("Red").unwrap().to_string(), "rgb(255, 0, 0)");
        assert_eq!(color("transparent").unwrap().to_string(), "rgba(0, 0, 0, 0)");
        assert_eq!(color("currentColor").unwrap(), Color::CurrentColor);
    }

    #[test]
    fn hex() {
        assert_eq!(color("#f00").unwrap().to_string(), "rgb(255, 0, 0)");
        assert_eq!(color("#375e97").unwrap().to_string(), "rgb(55, 94, 151)");
        assert_eq!(color("#00000000").unwrap().to_string(), "rgba(0, 0, 0, 0)");
        assert_eq!(color("#00000080").unwrap().to_string(), "rgba(0, 0, 0, 0.502)");
    }

    #[test]
    fn rgb_functions() {
        assert_eq!(color("rgb(1, 2, 3)").unwrap().to_string(), "rgb(1, 2, 3)");
        assert_eq!(color("rgb(1 2 3 / 50%)").unwrap().to_string(), "rgba(1, 2, 3, 0.5)");
        assert_eq!(
            color("rgba(0, 0, 0, 0.33333)").unwrap().to_string(),
            "rgba(0, 0, 0, 0.333)"
        );
        assert_eq!(color("rgba(100%, 0%, 0%, 1)").unwrap().to_string(), "rgb(255, 0, 0)");
    }

    #[test]
    #[should_panic]
    fn unknown_name() {
        color("notacolor").unwrap();
    }

    #[test]
    #[should_panic]
    fn bad_hex() {
        color("#12345").unwrap();
    }

    #[test]
    #[should_panic]
    fn too_few_arguments() {
        color("rgb(1, 2)").unwrap();
    }
}
