//! Matching language tags against `Accept-Language` ranges.
//!
//! A range accepts a tag when they are equal, when one is a prefix of the
//! other ending at a `-` in the longer one, or when the range is `*`. All
//! comparisons ignore ASCII case.

use crate::score::{self, MatchScore, Specificity};
use crate::Range;

/// Score a language tag against every range, keeping the best.
///
/// # Example
///
/// ```
/// use conneg::{Kind, Specificity};
///
/// let ranges = conneg::parse(Kind::Language, "fr-FR, en-US;q=0.6, en;q=0.4").unwrap();
///
/// let fr = conneg::language::score("fr", &ranges).unwrap();
/// assert_eq!(fr.specificity(), Specificity::Partial { depth: 1 });
///
/// let en = conneg::language::score("en", &ranges).unwrap();
/// assert_eq!(en.specificity(), Specificity::Exact);
/// assert_eq!(en.quality(), 0.4);
///
/// assert!(conneg::language::score("de", &ranges).is_none());
/// ```
pub fn score(candidate: &str, ranges: &[Range]) -> Option<MatchScore> {
    let tag = candidate.trim();
    if tag.is_empty() {
        return None;
    }
    score::best(ranges, |range| specificity(range, tag))
}

/// How specifically a single range accepts `tag`, if at all.
///
/// Partial matches carry the number of subtags the two share, so the
/// longer shared prefix is the more specific one.
///
/// ```
/// use conneg::language::specificity;
/// use conneg::{Range, Specificity};
///
/// let tag = "en-US-x-custom";
///
/// assert_eq!(specificity(&Range::language("en-us-x-custom"), tag), Some(Specificity::Exact));
/// assert_eq!(specificity(&Range::language("en-US"), tag), Some(Specificity::Partial { depth: 2 }));
/// assert_eq!(specificity(&Range::language("en"), tag), Some(Specificity::Partial { depth: 1 }));
/// assert_eq!(specificity(&Range::language("*"), tag), Some(Specificity::Any));
///
/// // `e` is a prefix, but not at a subtag boundary
/// assert_eq!(specificity(&Range::language("e"), tag), None);
/// ```
pub fn specificity(range: &Range, tag: &str) -> Option<Specificity> {
    if range.secondary().is_some() {
        return None;
    }

    let pattern = range.primary();
    if pattern == "*" {
        return Some(Specificity::Any);
    }
    if pattern.eq_ignore_ascii_case(tag) {
        return Some(Specificity::Exact);
    }

    let (shorter, longer) = if pattern.len() < tag.len() {
        (pattern, tag)
    } else {
        (tag, pattern)
    };

    if shorter.is_empty() || longer.as_bytes().get(shorter.len()) != Some(&b'-') {
        return None;
    }

    if longer.as_bytes()[..shorter.len()].eq_ignore_ascii_case(shorter.as_bytes()) {
        Some(Specificity::Partial {
            depth: shorter.split('-').count(),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, Kind};

    #[test]
    fn exact_beats_wildcard_regardless_of_quality() {
        let ranges = parse(Kind::Language, "da, en-gb;q=0.8, en;q=0.7, *").unwrap();
        let en = score("en", &ranges).unwrap();
        assert_eq!(en.specificity(), Specificity::Exact);
        assert_eq!(en.quality(), 0.7);
        assert_eq!(en.position(), 2);
    }

    #[test]
    fn range_shorter_than_tag() {
        let ranges = parse(Kind::Language, "en").unwrap();
        let score = score("en-US", &ranges).unwrap();
        assert_eq!(score.specificity(), Specificity::Partial { depth: 1 });
    }

    #[test]
    fn range_longer_than_tag() {
        let ranges = parse(Kind::Language, "fr-FR").unwrap();
        assert!(score("fr", &ranges).is_some());
    }

    #[test]
    fn case_insensitive() {
        let ranges = parse(Kind::Language, "EN-us").unwrap();
        assert_eq!(score("en-US", &ranges).unwrap().specificity(), Specificity::Exact);
        assert!(score("En", &ranges).is_some());
    }

    #[test]
    fn prefix_must_end_at_hyphen() {
        let ranges = parse(Kind::Language, "en").unwrap();
        assert!(score("eng", &ranges).is_none());

        let ranges = parse(Kind::Language, "eng").unwrap();
        assert!(score("en", &ranges).is_none());
    }

    #[test]
    fn siblings_dont_match() {
        let ranges = parse(Kind::Language, "en-GB").unwrap();
        assert!(score("en-US", &ranges).is_none());
    }

    #[test]
    fn deeper_prefix_is_more_specific() {
        let ranges = parse(Kind::Language, "en;q=0.9, en-US;q=0.5").unwrap();
        let score = score("en-US-x-custom", &ranges).unwrap();
        assert_eq!(score.specificity(), Specificity::Partial { depth: 2 });
        assert_eq!(score.position(), 1);
    }

    #[test]
    fn empty_candidate() {
        let ranges = parse(Kind::Language, "*").unwrap();
        assert!(score("", &ranges).is_none());
        assert!(score("  ", &ranges).is_none());
    }

    #[test]
    fn media_range_never_matches() {
        assert_eq!(specificity(&Range::media("en", "us"), "en"), None);
    }

    #[test]
    fn non_ascii_tag_does_not_panic() {
        let ranges = parse(Kind::Language, "en-US").unwrap();
        assert!(score("éé", &ranges).is_none());
        assert!(score("e\u{301}-US", &ranges).is_none());
    }
}
