//! Matching media types against `Accept` ranges.
//!
//! ```
//! use conneg::{Kind, Specificity};
//!
//! let ranges = conneg::parse(Kind::Media, "text/*;q=0.7, */*").unwrap();
//!
//! let score = conneg::media::score("text/plain", &ranges).unwrap();
//! assert_eq!(score.specificity(), Specificity::Partial { depth: 1 });
//! assert_eq!(score.quality(), 0.7);
//! ```

use crate::score::{self, MatchScore, Specificity};
use crate::Range;

/// Score a `type/subtype` candidate against every range, keeping the best.
///
/// Parameters on the candidate (`text/html; charset=utf-8`) are ignored.
/// Returns `None` when no range accepts the candidate, or when the
/// candidate isn't shaped like a media type.
pub fn score(candidate: &str, ranges: &[Range]) -> Option<MatchScore> {
    let (type_, subtype) = essence(candidate)?;
    score::best(ranges, |range| specificity(range, type_, subtype))
}

/// How specifically a single range accepts `type_/subtype`, if at all.
///
/// Type and subtype compare case-insensitively. Range parameters other
/// than `q` don't take part.
///
/// # Example
///
/// ```
/// use conneg::media::specificity;
/// use conneg::{Range, Specificity};
///
/// let html = Range::media("text", "html");
/// let text = Range::media("text", "*");
/// let any = Range::media("*", "*");
///
/// assert_eq!(specificity(&html, "TEXT", "html"), Some(Specificity::Exact));
/// assert_eq!(specificity(&text, "text", "html"), Some(Specificity::Partial { depth: 1 }));
/// assert_eq!(specificity(&any, "text", "html"), Some(Specificity::Any));
///
/// assert_eq!(specificity(&text, "image", "png"), None);
/// ```
pub fn specificity(range: &Range, type_: &str, subtype: &str) -> Option<Specificity> {
    let secondary = range.secondary()?;

    match (range.primary(), secondary) {
        ("*", "*") => Some(Specificity::Any),
        // sanity check there's no `*/plain` or whatever
        ("*", _) => None,
        (primary, "*") if primary.eq_ignore_ascii_case(type_) => {
            Some(Specificity::Partial { depth: 1 })
        }
        (primary, secondary)
            if primary.eq_ignore_ascii_case(type_) && secondary.eq_ignore_ascii_case(subtype) =>
        {
            Some(Specificity::Exact)
        }
        _ => None,
    }
}

fn essence(candidate: &str) -> Option<(&str, &str)> {
    let essence = match candidate.find(';') {
        Some(semicolon) => &candidate[..semicolon],
        None => candidate,
    };
    let essence = essence.trim();

    let slash = essence.find('/')?;
    let (type_, subtype) = (&essence[..slash], &essence[slash + 1..]);
    if type_.is_empty() || subtype.is_empty() {
        return None;
    }
    Some((type_, subtype))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, Kind};

    const PEAR: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,text/*;q=0.7,*/*,image/gif; q=0.8, image/jpeg; q=0.6, image/*";

    fn pear() -> Vec<Range> {
        parse(Kind::Media, PEAR).unwrap()
    }

    #[test]
    fn exact_wins_over_wildcards() {
        let score = score("image/gif", &pear()).unwrap();
        assert_eq!(score.specificity(), Specificity::Exact);
        assert_eq!(score.quality(), 0.8);
        assert_eq!(score.position(), 5);
    }

    #[test]
    fn partial_wins_over_any() {
        let score = score("image/png", &pear()).unwrap();
        assert_eq!(score.specificity(), Specificity::Partial { depth: 1 });
        assert_eq!(score.quality(), 1.0);
        assert_eq!(score.position(), 7);
    }

    #[test]
    fn any_catches_the_rest() {
        let score = score("audio/midi", &pear()).unwrap();
        assert_eq!(score.specificity(), Specificity::Any);
        assert_eq!(score.position(), 4);
    }

    #[test]
    fn no_match() {
        let ranges = parse(Kind::Media, "text/*").unwrap();
        assert!(score("image/png", &ranges).is_none());
        assert!(score("text/plain", &[]).is_none());
    }

    #[test]
    fn candidate_params_ignored() {
        let ranges = parse(Kind::Media, "text/html;level=1").unwrap();
        let score = score("Text/HTML; charset=utf-8", &ranges).unwrap();
        assert_eq!(score.specificity(), Specificity::Exact);
    }

    #[test]
    fn malformed_candidates_never_match() {
        let ranges = parse(Kind::Media, "*/*").unwrap();
        assert!(score("html", &ranges).is_none());
        assert!(score("text/", &ranges).is_none());
        assert!(score("/plain", &ranges).is_none());
        assert!(score("", &ranges).is_none());
    }

    #[test]
    fn wildcard_candidate() {
        let ranges = parse(Kind::Media, "text/html, */*;q=0.8").unwrap();
        let score = score("*/*", &ranges).unwrap();
        assert_eq!(score.specificity(), Specificity::Any);
        assert_eq!(score.quality(), 0.8);
    }

    #[test]
    fn invalid_range_never_matches() {
        let range = Range::media("*", "html");
        assert_eq!(specificity(&range, "text", "html"), None);
    }

    #[test]
    fn language_range_never_matches() {
        let range = Range::language("text");
        assert_eq!(specificity(&range, "text", "html"), None);
    }
}
