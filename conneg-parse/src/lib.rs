//! Internal types for the `conneg` crate.
//!
//! Splits an `Accept`-style preference header into borrowed clauses.
//! Nothing in here knows about scoring; it only enforces the grammar.

use thiserror::Error;

mod rfc7231;

/// The shape every main token of a header must have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// `type/subtype`, as in `Accept`.
    Media,
    /// A single language tag, as in `Accept-Language`.
    Language,
}

#[derive(Clone, Debug)]
pub struct Parser {
    shape: Shape,
}

/// One comma separated clause of a preference header.
#[derive(Clone, Debug, PartialEq)]
pub struct Clause<'a> {
    pub primary: &'a str,
    /// Always `None` for language clauses.
    pub secondary: Option<&'a str>,
    pub quality: Option<f32>,
    /// Every parameter except `q`, values in their raw (possibly quoted) form.
    pub params: Vec<(&'a str, &'a str)>,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("a slash (/) was missing between the type and subtype at position {pos}")]
    MissingSlash { pos: usize },
    #[error("an equals sign (=) was missing between a parameter and its value at position {pos}")]
    MissingEqual { pos: usize },
    #[error("a quote (\") was missing from a parameter value")]
    MissingQuote,
    #[error("an empty token at position {pos}")]
    EmptyToken { pos: usize },
    #[error("invalid token, {byte:X} at position {pos}")]
    InvalidToken { pos: usize, byte: u8 },
    #[error("unexpected asterisk at position {pos}")]
    InvalidRange { pos: usize },
    #[error("the quality value at position {pos} is not a number between 0 and 1")]
    InvalidQuality { pos: usize },
    #[error("a second quality value at position {pos}")]
    DuplicateQuality { pos: usize },
}

// ===== impl Parser =====

impl Parser {
    #[inline]
    pub fn media() -> Parser {
        Parser { shape: Shape::Media }
    }

    #[inline]
    pub fn language() -> Parser {
        Parser {
            shape: Shape::Language,
        }
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Parse a whole header value.
    ///
    /// An empty header, or one made only of whitespace and commas, yields
    /// no clauses.
    pub fn parse<'a>(&self, src: &'a str) -> Result<Vec<Clause<'a>>, ParseError> {
        rfc7231::parse(self, src)
    }
}

// ===== impl Clause =====

impl<'a> Clause<'a> {
    #[inline]
    pub fn quality(&self) -> f32 {
        self.quality.unwrap_or(1.0)
    }
}

// ===== impl ParseError =====

impl ParseError {
    /// The byte offset into the header where parsing failed, if known.
    pub fn position(&self) -> Option<usize> {
        match *self {
            ParseError::MissingSlash { pos }
            | ParseError::MissingEqual { pos }
            | ParseError::EmptyToken { pos }
            | ParseError::InvalidToken { pos, .. }
            | ParseError::InvalidRange { pos }
            | ParseError::InvalidQuality { pos }
            | ParseError::DuplicateQuality { pos } => Some(pos),
            ParseError::MissingQuote => None,
        }
    }
}
