use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use conneg_parse::{Clause, Parser};

use crate::{InvalidHeader, InvalidKind};

/// Which family of preference header is being negotiated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `Accept`, where ranges look like `type/subtype`.
    Media,
    /// `Accept-Language`, where ranges are language tags.
    Language,
}

impl Kind {
    /// The lowercase name of this kind.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match *self {
            Kind::Media => "media",
            Kind::Language => "language",
        }
    }

    fn parser(self) -> Parser {
        match self {
            Kind::Media => Parser::media(),
            Kind::Language => Parser::language(),
        }
    }
}

impl fmt::Display for Kind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = InvalidKind;

    fn from_str(s: &str) -> Result<Kind, Self::Err> {
        if s.eq_ignore_ascii_case("media") {
            Ok(Kind::Media)
        } else if s.eq_ignore_ascii_case("language") {
            Ok(Kind::Language)
        } else {
            Err(InvalidKind(s.to_owned()))
        }
    }
}

/// One clause of a parsed preference header.
///
/// Commonly parsed from an `Accept` or `Accept-Language` header with
/// [`parse`], but a `Range` can also be put together by hand.
///
/// # Example
///
/// ```
/// use conneg::{Kind, Range};
///
/// let ranges = conneg::parse(Kind::Media, "text/html, text/*;q=0.7").unwrap();
///
/// assert_eq!(ranges[1].primary(), "text");
/// assert_eq!(ranges[1].secondary(), Some("*"));
/// assert_eq!(ranges[1].quality(), 0.7);
/// assert_eq!(ranges[1].position(), 1);
///
/// assert_eq!(ranges[0], Range::media("text", "html"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Range {
    primary: String,
    secondary: Option<String>,
    quality: f32,
    position: usize,
    params: Vec<(String, String)>,
}

impl Range {
    /// A media range, `type/subtype`, with quality 1 at position 0.
    pub fn media(type_: impl Into<String>, subtype: impl Into<String>) -> Range {
        Range {
            primary: type_.into(),
            secondary: Some(subtype.into()),
            quality: 1.0,
            position: 0,
            params: Vec::new(),
        }
    }

    /// A language range, with quality 1 at position 0.
    pub fn language(tag: impl Into<String>) -> Range {
        Range {
            primary: tag.into(),
            secondary: None,
            quality: 1.0,
            position: 0,
            params: Vec::new(),
        }
    }

    /// Set the quality, clamped into `0..=1`.
    ///
    /// ```
    /// let range = conneg::Range::language("fr").with_quality(1.5);
    /// assert_eq!(range.quality(), 1.0);
    /// ```
    pub fn with_quality(mut self, quality: f32) -> Range {
        // `!(q > 0)` also catches NaN and -0.0
        self.quality = if !(quality > 0.0) {
            0.0
        } else if quality > 1.0 {
            1.0
        } else {
            quality
        };
        self
    }

    /// Set the position used to break ties between equal ranges.
    pub fn with_position(mut self, position: usize) -> Range {
        self.position = position;
        self
    }

    /// Add a parameter, with `value` in its header form (quoted if needed).
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Range {
        self.params.push((name.into(), value.into()));
        self
    }

    /// The media type, or the whole language tag.
    #[inline]
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// The media subtype. Language ranges have none.
    #[inline]
    pub fn secondary(&self) -> Option<&str> {
        self.secondary.as_deref()
    }

    /// The `q` value, 1 when the header didn't give one.
    #[inline]
    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// The zero-based index of this clause among the header's clauses.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Whether this range came from, or belongs in, an `Accept` header or an
    /// `Accept-Language` header.
    #[inline]
    pub fn kind(&self) -> Kind {
        if self.secondary.is_some() {
            Kind::Media
        } else {
            Kind::Language
        }
    }

    /// Whether this is `*/*` or the language `*`.
    pub fn is_wildcard(&self) -> bool {
        self.primary == "*" && self.secondary.as_deref().map_or(true, |sub| sub == "*")
    }

    /// Look up a parameter by name, returning its unquoted content.
    ///
    /// The `q` parameter is never kept here; see [`quality`](Range::quality).
    ///
    /// # Example
    ///
    /// ```
    /// let ranges = conneg::parse(
    ///     conneg::Kind::Media,
    ///     r#"text/html;level=1;title="a \"b\"";q=0.4"#,
    /// ).unwrap();
    ///
    /// assert_eq!(ranges[0].param("level").unwrap(), "1");
    /// assert_eq!(ranges[0].param("TITLE").unwrap(), r#"a "b""#);
    /// assert!(ranges[0].param("q").is_none());
    /// ```
    pub fn param(&self, name: &str) -> Option<Cow<'_, str>> {
        self.params
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, value)| {
                if value.starts_with('"') {
                    quoted_string::unquote_unchecked(value)
                } else {
                    Cow::Borrowed(value.as_str())
                }
            })
    }

    /// Returns an iterator over the parameters, values in header form.
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    fn from_clause(clause: Clause<'_>, position: usize) -> Range {
        Range {
            primary: clause.primary.to_owned(),
            secondary: clause.secondary.map(str::to_owned),
            quality: clause.quality(),
            position,
            params: clause
                .params
                .into_iter()
                .map(|(n, v)| (n.to_owned(), v.to_owned()))
                .collect(),
        }
    }
}

/// Writes the range back out as a header clause. The `q` parameter goes
/// last and is left off when it is 1.
impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.primary)?;
        if let Some(ref secondary) = self.secondary {
            write!(f, "/{}", secondary)?;
        }
        for (name, value) in &self.params {
            write!(f, ";{}={}", name, value)?;
        }
        if self.quality < 1.0 {
            write!(f, ";q={}", self.quality)?;
        }
        Ok(())
    }
}

/// Parse a preference header into its ranges, in header order.
///
/// An empty header, or one of only commas and whitespace, parses to no
/// ranges at all.
///
/// # Example
///
/// ```
/// use conneg::Kind;
///
/// let ranges = conneg::parse(Kind::Language, "da, en-gb;q=0.8, en;q=0.7").unwrap();
/// assert_eq!(ranges.len(), 3);
/// assert_eq!(ranges[1].primary(), "en-gb");
/// assert_eq!(ranges[1].secondary(), None);
///
/// assert!(conneg::parse(Kind::Media, " , ").unwrap().is_empty());
/// assert!(conneg::parse(Kind::Media, "text/html;q=abc").is_err());
/// ```
///
/// # Errors
///
/// Returns an error if any clause breaks the header grammar.
pub fn parse(kind: Kind, header: &str) -> Result<Vec<Range>, InvalidHeader> {
    let clauses = kind
        .parser()
        .parse(header)
        .map_err(|inner| InvalidHeader { inner })?;

    Ok(clauses
        .into_iter()
        .enumerate()
        .map(|(position, clause)| Range::from_clause(clause, position))
        .collect())
}

/// Join ranges back into a header value.
///
/// Parsing the result gives back equal ranges.
///
/// ```
/// use conneg::Kind;
///
/// let ranges = conneg::parse(Kind::Media, "text/html;q=0.5 ,  image/*").unwrap();
/// let header = conneg::to_header(&ranges);
///
/// assert_eq!(header, "text/html;q=0.5, image/*");
/// assert_eq!(conneg::parse(Kind::Media, &header).unwrap(), ranges);
/// ```
pub fn to_header(ranges: &[Range]) -> String {
    ranges
        .iter()
        .map(Range::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
