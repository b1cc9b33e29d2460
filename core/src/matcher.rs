//! Diff / matcher: aligns a query fingerprint suffix against an alias's
//! fingerprints, producing the statistics the scorer needs.
//!
//! Reference: spec §4.3. Two variants are provided: [`ExactPrefixMatcher`]
//! (the longest common prefix, unchanged, or nothing) and [`ApproxMatcher`]
//! (an edit-distance alignment that refuses to spend insert moves on
//! downstream/opaque query terms).

use std::collections::HashSet;
use std::fmt;

use crate::term::Hash;

/// Statistics produced by aligning a query suffix against an alias's
/// fingerprints. `rightmost_a = None` means no usable alignment was found
/// at all (the matcher never panics on this; callers simply skip the
/// edge).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffResults {
    /// The fingerprint sequence selected as the common alignment (both
    /// exact matches and substitutions; insertions/deletions excluded).
    pub matched: Vec<Hash>,
    /// Integer edit cost: substitutions + inserts + deletes.
    pub cost: i32,
    /// Leftmost query index covered by the alignment.
    pub leftmost_a: usize,
    /// Rightmost query index covered by the alignment, or `None` if no
    /// alignment exists.
    pub rightmost_a: Option<usize>,
    /// Count of exact per-position alignments (position-for-position
    /// fingerprint equality), counted with multiplicity.
    pub alignments: usize,
    /// De-duplicated set of the fingerprints that matched exactly.
    pub common_terms: HashSet<Hash>,
}

impl DiffResults {
    pub fn is_empty_match(&self) -> bool {
        self.rightmost_a.is_none()
    }
}

/// A diff function producing alignment statistics between a query suffix
/// and an alias's fingerprints.
pub trait Matcher: fmt::Debug {
    fn diff(
        &self,
        query: &[Hash],
        prefix: &[Hash],
        is_downstream: &dyn Fn(Hash) -> bool,
        is_opaque: &dyn Fn(Hash) -> bool,
    ) -> DiffResults;
}

/// Returns the longest common prefix unchanged: either the whole of
/// `prefix` matches `query` element-for-element from position 0, or
/// nothing matches at all. No partial credit for a prefix that starts
/// matching then diverges.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactPrefixMatcher;

impl ExactPrefixMatcher {
    /// Convenience used directly by tests and by `diff`: returns
    /// `(alignments, length)` where both equal `prefix.len()` on a full
    /// match, or `(0, 0)` otherwise.
    pub fn match_prefix(query: &[Hash], prefix: &[Hash]) -> (usize, usize) {
        if prefix.len() <= query.len() && query[..prefix.len()] == *prefix {
            (prefix.len(), prefix.len())
        } else {
            (0, 0)
        }
    }
}

impl Matcher for ExactPrefixMatcher {
    fn diff(
        &self,
        query: &[Hash],
        prefix: &[Hash],
        _is_downstream: &dyn Fn(Hash) -> bool,
        _is_opaque: &dyn Fn(Hash) -> bool,
    ) -> DiffResults {
        let (count, length) = Self::match_prefix(query, prefix);
        if length == 0 {
            return DiffResults::default();
        }
        DiffResults {
            matched: prefix.to_vec(),
            cost: 0,
            leftmost_a: 0,
            rightmost_a: Some(length - 1),
            alignments: count,
            common_terms: prefix.iter().copied().collect(),
        }
    }
}

/// An edit-distance alignment (Wagner-Fischer DP) between a bounded window
/// of the query and the alias's fingerprints. Deletions (skipping an alias
/// fingerprint) are always allowed; insertions (skipping a query
/// fingerprint) are refused when that fingerprint is downstream or opaque
/// — those terms must either align or end the match, never be silently
/// absorbed as noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMatcher {
    /// Extra query fingerprints considered beyond `prefix.len()` when
    /// bounding the alignment window.
    pub slack: usize,
}

impl ApproxMatcher {
    pub fn new(slack: usize) -> Self {
        Self { slack }
    }
}

const BLOCKED: i32 = i32::MAX / 4;

impl Matcher for ApproxMatcher {
    fn diff(
        &self,
        query: &[Hash],
        prefix: &[Hash],
        is_downstream: &dyn Fn(Hash) -> bool,
        is_opaque: &dyn Fn(Hash) -> bool,
    ) -> DiffResults {
        let window = (prefix.len() + self.slack).min(query.len());
        let q = &query[..window];
        let n = q.len();
        let m = prefix.len();

        let blocked = |h: Hash| is_downstream(h) || is_opaque(h);

        // dp[i][j] = min cost aligning q[..i] with prefix[..j].
        let mut dp = vec![vec![0i32; m + 1]; n + 1];
        for i in 1..=n {
            dp[i][0] = if dp[i - 1][0] >= BLOCKED || blocked(q[i - 1]) {
                BLOCKED
            } else {
                dp[i - 1][0] + 1
            };
        }
        for j in 1..=m {
            dp[0][j] = dp[0][j - 1] + 1;
        }
        for i in 1..=n {
            for j in 1..=m {
                let match_cost = if q[i - 1] == prefix[j - 1] { 0 } else { 1 };
                let diag = dp[i - 1][j - 1].saturating_add(match_cost);
                let del = dp[i][j - 1].saturating_add(1);
                let ins = if blocked(q[i - 1]) {
                    BLOCKED
                } else {
                    dp[i - 1][j].saturating_add(1)
                };
                dp[i][j] = diag.min(del).min(ins);
            }
        }

        if n == 0 && m == 0 {
            return DiffResults::default();
        }
        if dp[n][m] >= BLOCKED {
            return DiffResults::default();
        }

        // Backtrack, preferring diagonal, then deletion, then insertion.
        let (mut i, mut j) = (n, m);
        let mut matched = Vec::new();
        let mut alignments = 0usize;
        let mut common_terms = HashSet::new();
        let (mut leftmost, mut rightmost): (Option<usize>, Option<usize>) = (None, None);
        let mut touch = |idx: usize, leftmost: &mut Option<usize>, rightmost: &mut Option<usize>| {
            *leftmost = Some(leftmost.map_or(idx, |l| l.min(idx)));
            *rightmost = Some(rightmost.map_or(idx, |r| r.max(idx)));
        };

        while i > 0 || j > 0 {
            if i > 0 && j > 0 {
                let match_cost = if q[i - 1] == prefix[j - 1] { 0 } else { 1 };
                if dp[i][j] == dp[i - 1][j - 1] + match_cost {
                    matched.push(q[i - 1]);
                    if match_cost == 0 {
                        alignments += 1;
                        common_terms.insert(q[i - 1]);
                    }
                    touch(i - 1, &mut leftmost, &mut rightmost);
                    i -= 1;
                    j -= 1;
                    continue;
                }
            }
            if j > 0 && dp[i][j] == dp[i][j - 1] + 1 {
                j -= 1;
                continue;
            }
            if i > 0 && dp[i][j] == dp[i - 1][j] + 1 {
                touch(i - 1, &mut leftmost, &mut rightmost);
                i -= 1;
                continue;
            }
            // Dead end: dp table was inconsistent (shouldn't happen).
            break;
        }
        matched.reverse();

        DiffResults {
            matched,
            cost: dp[n][m],
            leftmost_a: leftmost.unwrap_or(0),
            rightmost_a: rightmost,
            alignments,
            common_terms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never(_h: Hash) -> bool {
        false
    }

    #[test]
    fn exact_prefix_vectors_from_spec() {
        let query = [1u32, 2, 3, 4, 5];
        assert_eq!(ExactPrefixMatcher::match_prefix(&query, &[1, 2]), (2, 2));
        assert_eq!(ExactPrefixMatcher::match_prefix(&query, &[1, 2, 4]), (0, 0));
        assert_eq!(ExactPrefixMatcher::match_prefix(&query, &[2]), (0, 0));
        assert_eq!(
            ExactPrefixMatcher::match_prefix(&query, &[1, 2, 3, 4, 5, 6, 7]),
            (0, 0)
        );
    }

    #[test]
    fn exact_prefix_diff_reports_full_prefix() {
        let m = ExactPrefixMatcher;
        let res = m.diff(&[1, 2, 3, 4, 5], &[1, 2], &never, &never);
        assert_eq!(res.matched, vec![1, 2]);
        assert_eq!(res.cost, 0);
        assert_eq!(res.leftmost_a, 0);
        assert_eq!(res.rightmost_a, Some(1));
        assert_eq!(res.alignments, 2);
        assert_eq!(res.common_terms.len(), 2);
    }

    #[test]
    fn exact_prefix_diff_empty_on_mismatch() {
        let m = ExactPrefixMatcher;
        let res = m.diff(&[1, 2, 3], &[1, 2, 4], &never, &never);
        assert!(res.is_empty_match());
    }

    #[test]
    fn approx_matches_identical_sequences_at_zero_cost() {
        let m = ApproxMatcher::new(2);
        let res = m.diff(&[10, 20, 30], &[10, 20, 30], &never, &never);
        assert_eq!(res.cost, 0);
        assert_eq!(res.alignments, 3);
        assert_eq!(res.common_terms.len(), 3);
        assert_eq!(res.rightmost_a, Some(2));
    }

    #[test]
    fn approx_tolerates_single_substitution() {
        let m = ApproxMatcher::new(2);
        let res = m.diff(&[10, 99, 30], &[10, 20, 30], &never, &never);
        assert_eq!(res.cost, 1);
        assert_eq!(res.alignments, 2);
        assert!(res.common_terms.contains(&10));
        assert!(res.common_terms.contains(&30));
    }

    #[test]
    fn approx_refuses_to_insert_over_downstream_terms() {
        let m = ApproxMatcher::new(2);
        let is_downstream = |h: Hash| h == 777;
        // query has an extra downstream term wedged in the middle; without
        // the restriction this would be a free insertion.
        let res = m.diff(&[10, 777, 30], &[10, 30], &is_downstream, &never);
        // The downstream term must be aligned (as a substitution) rather
        // than skipped, so cost reflects a substitution, not a clean
        // 1-edit insertion-then-match.
        assert!(res.cost >= 1);
        assert!(res.common_terms.contains(&10));
    }
}
