use std::cmp::{Ordering, Reverse};

use crate::Range;

/// How closely a range's pattern fits a candidate.
///
/// Ordered from least to most specific, so the derived `Ord` ranks
/// `Exact > Partial > Any`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Specificity {
    /// `*/*`, or the language `*`.
    Any,
    /// `type/*`, or a language tag sharing a `-` bounded prefix.
    ///
    /// `depth` counts the shared components, so `en-US` against
    /// `en-US-x-custom` (depth 2) outranks `en` against it (depth 1).
    Partial {
        /// Number of shared components.
        depth: usize,
    },
    /// The range names the candidate exactly.
    Exact,
}

/// The result of matching one range against one candidate.
///
/// Scores order by specificity, then quality, then header position
/// (earlier is better). The greatest score wins.
///
/// # Example
///
/// ```
/// use conneg::{Kind, Specificity};
///
/// let ranges = conneg::parse(Kind::Media, "*/*, text/plain;q=0.1").unwrap();
///
/// let plain = conneg::media::score("text/plain", &ranges).unwrap();
/// let png = conneg::media::score("image/png", &ranges).unwrap();
///
/// assert_eq!(plain.specificity(), Specificity::Exact);
/// assert_eq!(png.specificity(), Specificity::Any);
/// assert!(plain > png);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MatchScore {
    specificity: Specificity,
    quality: f32,
    position: usize,
}

impl MatchScore {
    pub(crate) fn new(specificity: Specificity, range: &Range) -> MatchScore {
        MatchScore {
            specificity,
            quality: range.quality(),
            position: range.position(),
        }
    }

    /// How closely the winning range fit.
    #[inline]
    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// The quality of the winning range.
    #[inline]
    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// The header position of the winning range.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Ord for MatchScore {
    fn cmp(&self, other: &MatchScore) -> Ordering {
        self.specificity
            .cmp(&other.specificity)
            .then_with(|| self.quality.total_cmp(&other.quality))
            .then_with(|| other.position.cmp(&self.position))
    }
}

impl PartialOrd for MatchScore {
    #[inline]
    fn partial_cmp(&self, other: &MatchScore) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for MatchScore {
    #[inline]
    fn eq(&self, other: &MatchScore) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MatchScore {}

/// The best score among all ranges that accept a candidate.
pub(crate) fn best<F>(ranges: &[Range], mut specificity: F) -> Option<MatchScore>
where
    F: FnMut(&Range) -> Option<Specificity>,
{
    ranges
        .iter()
        .filter_map(|range| specificity(range).map(|s| MatchScore::new(s, range)))
        .max()
}

/// Pick the winning candidate from per-candidate scores, in caller order.
///
/// Unscored candidates drop out. A quality of 0 is only a low score, so
/// an exact `q=0` match still beats a `*/*` one. Among equal scores, the
/// candidate listed first wins.
pub(crate) fn select<I>(scores: I) -> Option<(usize, MatchScore)>
where
    I: IntoIterator<Item = Option<MatchScore>>,
{
    scores
        .into_iter()
        .enumerate()
        .filter_map(|(index, score)| score.map(|score| (index, score)))
        .max_by_key(|&(index, score)| (score, Reverse(index)))
}
