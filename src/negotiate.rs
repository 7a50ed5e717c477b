use tracing::{debug, trace};

use crate::score::{self, MatchScore};
use crate::{language, media, Kind, NegotiationError, NoAliases, Registry};

/// The representation a negotiation picked.
#[derive(Clone, Debug, PartialEq)]
pub struct Negotiated {
    identifier: String,
    name: String,
    score: MatchScore,
    index: usize,
}

impl Negotiated {
    /// The concrete identifier, such as `text/html` or `en-US`.
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The alias the registry knows the identifier by, or `""`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// How the winning range matched.
    #[inline]
    pub fn score(&self) -> MatchScore {
        self.score
    }

    /// Where the winner sat in the caller's candidate list.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Picks the best of a list of candidates for a preference header.
///
/// Candidates may be concrete identifiers or aliases known to the
/// injected [`Registry`].
///
/// # Example
///
/// ```
/// use conneg::{Aliases, Negotiator};
///
/// let negotiator = Negotiator::new(
///     Aliases::new()
///         .with("html", "text/html")
///         .with("rdf", "application/rdf+xml"),
/// );
///
/// let chosen = negotiator
///     .media("application/rdf+xml;q=0.5,text/html;q=.3", &["rdf"])
///     .unwrap();
///
/// assert_eq!(chosen.identifier(), "application/rdf+xml");
/// assert_eq!(chosen.name(), "rdf");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Negotiator<R = NoAliases> {
    registry: R,
}

struct Resolved<'a> {
    identifier: &'a str,
    alias: Option<&'a str>,
}

impl<R: Registry> Negotiator<R> {
    /// A negotiator resolving aliases through `registry`.
    pub fn new(registry: R) -> Negotiator<R> {
        Negotiator { registry }
    }

    /// The registry aliases resolve through.
    #[inline]
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Choose the candidate that best satisfies `header`.
    ///
    /// The header is parsed before anything else, so a malformed header is
    /// an error even if `candidates` is empty.
    ///
    /// # Errors
    ///
    /// - [`NegotiationError::MalformedHeader`] if the header doesn't parse.
    /// - [`NegotiationError::NotAcceptable`] if no candidate is acceptable,
    ///   which is always the case for an empty header.
    pub fn negotiate<S: AsRef<str>>(
        &self,
        kind: Kind,
        header: &str,
        candidates: &[S],
    ) -> Result<Negotiated, NegotiationError> {
        let ranges = match crate::parse(kind, header) {
            Ok(ranges) => ranges,
            Err(err) => {
                debug!(%kind, header, error = %err, "rejected malformed preference header");
                return Err(err.into());
            }
        };
        debug!(%kind, ranges = ranges.len(), candidates = candidates.len(), "negotiating");

        let resolved = candidates
            .iter()
            .map(|candidate| self.resolve(candidate.as_ref()))
            .collect::<Vec<_>>();

        let scores = resolved.iter().map(|candidate| {
            let score = match kind {
                Kind::Media => media::score(candidate.identifier, &ranges),
                Kind::Language => language::score(candidate.identifier, &ranges),
            };
            trace!(candidate = candidate.identifier, ?score, "scored candidate");
            score
        });

        let (index, score) = match score::select(scores) {
            Some(winner) => winner,
            None => {
                debug!(%kind, header, "no acceptable representation");
                return Err(NegotiationError::NotAcceptable);
            }
        };

        let winner = &resolved[index];
        let name = self
            .registry
            .resolve_display_name(winner.identifier)
            .or(winner.alias)
            .unwrap_or("");

        debug!(%kind, identifier = winner.identifier, name, index, "negotiated");

        Ok(Negotiated {
            identifier: winner.identifier.to_owned(),
            name: name.to_owned(),
            score,
            index,
        })
    }

    /// Negotiate against an `Accept` header.
    ///
    /// ```
    /// let negotiator = conneg::Negotiator::new(conneg::NoAliases);
    /// let chosen = negotiator
    ///     .media("text/html, application/xml;q=0.9", &["application/xml", "text/html"])
    ///     .unwrap();
    /// assert_eq!(chosen.identifier(), "text/html");
    /// assert_eq!(chosen.index(), 1);
    /// ```
    pub fn media<S: AsRef<str>>(
        &self,
        header: &str,
        candidates: &[S],
    ) -> Result<Negotiated, NegotiationError> {
        self.negotiate(Kind::Media, header, candidates)
    }

    /// Negotiate against an `Accept-Language` header.
    pub fn language<S: AsRef<str>>(
        &self,
        header: &str,
        candidates: &[S],
    ) -> Result<Negotiated, NegotiationError> {
        self.negotiate(Kind::Language, header, candidates)
    }

    fn resolve<'a>(&'a self, candidate: &'a str) -> Resolved<'a> {
        match self.registry.resolve_alias(candidate) {
            Some(identifier) => Resolved {
                identifier,
                alias: Some(candidate),
            },
            None => Resolved {
                identifier: candidate,
                alias: None,
            },
        }
    }
}

/// Negotiate an `Accept` header without any aliases.
///
/// # Example
///
/// ```
/// let header = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
///
/// let chosen = conneg::negotiate_media(header, &["image/png", "application/xml"]).unwrap();
/// assert_eq!(chosen.identifier(), "application/xml");
/// assert_eq!(chosen.name(), "");
/// ```
pub fn negotiate_media<S: AsRef<str>>(
    header: &str,
    candidates: &[S],
) -> Result<Negotiated, NegotiationError> {
    Negotiator::new(NoAliases).media(header, candidates)
}

/// Negotiate an `Accept-Language` header without any aliases.
///
/// # Example
///
/// ```
/// let chosen = conneg::negotiate_language("da, en-gb;q=0.8, en;q=0.7", &["en", "da"]).unwrap();
/// assert_eq!(chosen.identifier(), "da");
/// ```
pub fn negotiate_language<S: AsRef<str>>(
    header: &str,
    candidates: &[S],
) -> Result<Negotiated, NegotiationError> {
    Negotiator::new(NoAliases).language(header, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Aliases, Specificity};

    fn aliases() -> Aliases {
        Aliases::new()
            .with("html", "text/html")
            .with("txt", "text/plain")
    }

    #[test]
    fn malformed_even_without_candidates() {
        let err = negotiate_media::<&str>("text", &[]).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn no_candidates() {
        let err = negotiate_media::<&str>("*/*", &[]).unwrap_err();
        assert_eq!(err, NegotiationError::NotAcceptable);
    }

    #[test]
    fn alias_resolves_before_scoring() {
        let negotiator = Negotiator::new(aliases());
        let chosen = negotiator
            .media("text/plain;q=0.5, text/html;q=0.4", &["html", "txt"])
            .unwrap();
        assert_eq!(chosen.identifier(), "text/plain");
        assert_eq!(chosen.name(), "txt");
        assert_eq!(chosen.index(), 1);
    }

    #[test]
    fn concrete_candidate_gets_display_name() {
        let negotiator = Negotiator::new(aliases());
        let chosen = negotiator.media("text/html", &["text/html"]).unwrap();
        assert_eq!(chosen.name(), "html");
    }

    #[test]
    fn alias_is_the_fallback_name() {
        let mut table = Aliases::new();
        table.insert("html", "text/html");
        table.insert("htm", "text/html");
        let negotiator = Negotiator::new(NoAliasNames(table));

        let chosen = negotiator.media("*/*", &["htm"]).unwrap();
        assert_eq!(chosen.identifier(), "text/html");
        assert_eq!(chosen.name(), "htm");
    }

    // resolves aliases but never names an identifier
    struct NoAliasNames(Aliases);

    impl Registry for NoAliasNames {
        fn resolve_alias(&self, alias: &str) -> Option<&str> {
            self.0.resolve_alias(alias)
        }

        fn resolve_display_name(&self, _: &str) -> Option<&str> {
            None
        }
    }

    #[test]
    fn unknown_alias_used_verbatim() {
        let negotiator = Negotiator::new(aliases());
        let err = negotiator.media("*/*", &["atom"]).unwrap_err();
        assert_eq!(err, NegotiationError::NotAcceptable);

        let chosen = negotiator.language("*", &["atom"]).unwrap();
        assert_eq!(chosen.identifier(), "atom");
        assert_eq!(chosen.name(), "");
    }

    #[test]
    fn zero_quality_exact_match_beats_wildcard() {
        let chosen = negotiate_media("*/*, text/html;q=0", &["image/png", "text/html"]).unwrap();
        assert_eq!(chosen.identifier(), "text/html");
        assert_eq!(chosen.score().specificity(), Specificity::Exact);
        assert_eq!(chosen.score().quality(), 0.0);

        let chosen = negotiate_media("text/html;q=0", &["text/html"]).unwrap();
        assert_eq!(chosen.index(), 0);
    }

    #[test]
    fn winner_score() {
        let chosen = negotiate_language("en;q=0.5, fr", &["en-GB"]).unwrap();
        assert_eq!(chosen.score().specificity(), Specificity::Partial { depth: 1 });
        assert_eq!(chosen.score().quality(), 0.5);
    }

    #[test]
    fn works_with_owned_candidates() {
        let candidates = vec!["text/plain".to_owned(), "text/html".to_owned()];
        let chosen = Negotiator::new(&aliases()).media("text/html", &candidates).unwrap();
        assert_eq!(chosen.identifier(), "text/html");
        assert_eq!(chosen.name(), "html");
    }

    #[test]
    fn default_negotiator() {
        let negotiator: Negotiator = Negotiator::default();
        let chosen = negotiator.language("fr", &["fr"]).unwrap();
        assert_eq!(chosen.identifier(), "fr");
    }
}
