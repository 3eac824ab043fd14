//! Slice grammar parser using nom
//!
//! Grammar (one token per axis, fixed x, y, z order):
//! ```text
//! spec  := axis ',' axis ',' axis
//! axis  := ':'              (wildcard, the whole axis)
//!        | int ':' int      ([from, to))
//!        | ':' int          ([0, to))
//!        | int ':'          ([from, from+1))
//!        | int              ([from, from+1))
//! ```
//!
//! A bare start with no end selects exactly one cell. That shorthand is what
//! makes `":,10,:"` pick out a single plane, and it is kept deliberately.

use crate::ast::{Axis, AxisRange, SliceSpec};
use nom::{
    branch::alt,
    character::complete::{char, digit1},
    combinator::{map, map_res, opt},
    sequence::{preceded, tuple},
    IResult,
};
use thiserror::Error;

/// Parse errors, identifying the offending axis token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SliceParseError {
    #[error("expected 3 comma-separated axis tokens, found {found}")]
    WrongAxisCount { found: usize },

    #[error("empty token for {axis} axis")]
    EmptyAxis { axis: Axis },

    #[error("invalid bound '{token}' for {axis} axis")]
    InvalidBound { axis: Axis, token: String },

    #[error("{axis} axis range {start}:{stop} is empty")]
    EmptyRange {
        axis: Axis,
        start: usize,
        stop: usize,
    },
}

/// Parse a slice specification such as `":,10,:"` against a grid of side
/// length `dim`.
///
/// The wildcard expands to `[0, dim)`. Bounds are not clamped to `dim`;
/// use [`SliceSpec::validate`] before indexing.
pub fn parse_slice_spec(input: &str, dim: usize) -> Result<SliceSpec, SliceParseError> {
    let tokens: Vec<&str> = input.trim().split(',').collect();
    if tokens.len() != 3 {
        return Err(SliceParseError::WrongAxisCount {
            found: tokens.len(),
        });
    }

    let mut ranges = [AxisRange::full(dim); 3];
    for (axis, token) in Axis::ALL.iter().zip(tokens) {
        ranges[axis.index()] = axis_token(*axis, token.trim(), dim)?;
    }
    Ok(SliceSpec::new(ranges))
}

/// Parse one axis token into a concrete range
fn axis_token(axis: Axis, token: &str, dim: usize) -> Result<AxisRange, SliceParseError> {
    if token.is_empty() {
        return Err(SliceParseError::EmptyAxis { axis });
    }
    if token == ":" {
        return Ok(AxisRange::full(dim));
    }

    let (from, to) = match bounds(token) {
        Ok(("", bounds)) => bounds,
        _ => {
            return Err(SliceParseError::InvalidBound {
                axis,
                token: token.to_string(),
            })
        }
    };

    let start = from.unwrap_or(0);
    // A missing end selects the single cell at `start`.
    let stop = to.unwrap_or(start + 1);

    AxisRange::new(start, stop).ok_or(SliceParseError::EmptyRange { axis, start, stop })
}

/// Parse the optional-from/optional-to body of an axis token
fn bounds(input: &str) -> IResult<&str, (Option<usize>, Option<usize>)> {
    alt((
        // from ':' to?
        map(tuple((integer, char(':'), opt(integer))), |(from, _, to)| {
            (Some(from), to)
        }),
        // ':' to
        map(preceded(char(':'), integer), |to| (None, Some(to))),
        // bare from
        map(integer, |from| (Some(from), None)),
    ))(input)
}

/// Parse an unsigned decimal integer
fn integer(input: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse)(input)
}
