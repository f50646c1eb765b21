//! Input events understood by the engine, and parsing of typed coordinates.

use crate::coords::{Axis, Device, Point2D, World};
use crate::error::{Error, Result};
use crate::report::ConversionResult;

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer hovering over the canvas. Preview only.
    PointerMoved(Point2D<Device>),
    /// Pointer pressed on the canvas.
    Clicked(Point2D<Device>),
    /// Raw contents of the two world-coordinate fields.
    SetWorldPoint { x: String, y: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Preview(ConversionResult),
    Selected(ConversionResult),
}

impl Outcome {
    pub fn result(&self) -> &ConversionResult {
        match self {
            Outcome::Preview(result) | Outcome::Selected(result) => result,
        }
    }
}

/// Parses the two world-coordinate fields. Range checking is left to the engine.
pub fn parse_world_point(x: &str, y: &str) -> Result<Point2D<World>> {
    Ok(Point2D::new(
        parse_coordinate(Axis::X, x)?,
        parse_coordinate(Axis::Y, y)?,
    ))
}

/// Reads the leading number of a field and ignores whatever follows it, so
/// `"12abc"` is 12 and `"3px"` is 3. Fails only when there is no number.
fn parse_coordinate(axis: Axis, input: &str) -> Result<f64> {
    match float_prefix(input.trim_start()).parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(Error::InvalidInput {
            axis,
            input: input.to_owned(),
        }),
    }
}

/// Longest prefix of `input` shaped like a decimal float: optional sign,
/// digits with an optional fraction and exponent, or `Infinity`.
fn float_prefix(input: &str) -> &str {
    let bytes = input.as_bytes();
    let digits = |from: usize| {
        bytes
            .get(from..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if input[end..].starts_with("Infinity") {
        return &input[..end + "Infinity".len()];
    }

    let int = digits(end);
    end += int;
    let mut frac = 0;
    if bytes.get(end) == Some(&b'.') {
        frac = digits(end + 1);
        if int + frac > 0 {
            end += 1 + frac;
        }
    }
    if int + frac == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    &input[..end]
}

/// Splits a single typed line such as `"12.5, 40"` or `"12.5 40"` into the
/// x and y fields. Anything after the second field stays attached to y,
/// where the parser ignores it like any other trailing text.
pub fn split_world_input(line: &str) -> (String, String) {
    let mut fields = line
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|field| !field.is_empty());
    let x = fields.next().unwrap_or_default().to_owned();
    let y = fields.collect::<Vec<_>>().join(" ");
    (x, y)
}
