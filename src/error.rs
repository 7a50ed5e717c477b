use conneg_parse::ParseError;
use thiserror::Error;

/// A preference header that doesn't follow the header grammar.
///
/// Raised before any matching happens, so a malformed header is never
/// partially applied.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid preference header: {inner}")]
pub struct InvalidHeader {
    pub(crate) inner: ParseError,
}

impl InvalidHeader {
    /// The byte offset into the header where parsing failed, if known.
    ///
    /// # Example
    ///
    /// ```
    /// let err = conneg::parse(conneg::Kind::Media, "text/html, text").unwrap_err();
    /// assert_eq!(err.position(), Some(15));
    /// ```
    pub fn position(&self) -> Option<usize> {
        self.inner.position()
    }
}

/// The ways a negotiation can fail.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NegotiationError {
    /// The header failed to parse.
    #[error("{0}")]
    MalformedHeader(#[from] InvalidHeader),
    /// The header parsed, but no candidate is acceptable to it.
    #[error("no acceptable representation")]
    NotAcceptable,
}

impl NegotiationError {
    /// The HTTP status an HTTP layer should answer with.
    ///
    /// # Example
    ///
    /// ```
    /// let err = conneg::negotiate_media("text/plain", &["text/html"]).unwrap_err();
    /// assert_eq!(err, conneg::NegotiationError::NotAcceptable);
    /// assert_eq!(err.status_code(), 406);
    /// ```
    pub fn status_code(&self) -> u16 {
        match *self {
            NegotiationError::MalformedHeader(_) => 400,
            NegotiationError::NotAcceptable => 406,
        }
    }

    /// Whether the header itself was rejected.
    #[inline]
    pub fn is_malformed(&self) -> bool {
        matches!(*self, NegotiationError::MalformedHeader(_))
    }

    /// Whether the header was fine but nothing matched it.
    #[inline]
    pub fn is_not_acceptable(&self) -> bool {
        matches!(*self, NegotiationError::NotAcceptable)
    }
}

/// A string that doesn't name a [`Kind`](crate::Kind).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown negotiation kind {0:?}, expected \"media\" or \"language\"")]
pub struct InvalidKind(pub(crate) String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display() {
        let err = NegotiationError::from(InvalidHeader {
            inner: ParseError::MissingSlash { pos: 4 },
        });
        assert!(err.is_malformed());
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.to_string(),
            "invalid preference header: a slash (/) was missing between the type and subtype at position 4"
        );
    }

    #[test]
    fn not_acceptable() {
        let err = NegotiationError::NotAcceptable;
        assert!(err.is_not_acceptable());
        assert!(!err.is_malformed());
        assert_eq!(err.to_string(), "no acceptable representation");
    }
}
