// Symmetric pairwise similarity matrix.
//
// Row/column k always corresponds to the k-th input document. Each unordered
// pair is scored once (lower index as the first argument) and written to both
// cells, so symmetry holds bit-for-bit even though the matcher itself is
// order-sensitive. The diagonal goes through the same scoring routine.

use serde::Serialize;

use super::matcher::{MatcherOptions, SequenceMatcher};

/// n×n scores in [0, 100], two decimal places.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SimilarityMatrix {
    scores: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    /// Score every pair of `texts`.
    pub fn compute<S: AsRef<str>>(texts: &[S], options: MatcherOptions) -> Self {
        let chars: Vec<Vec<char>> = texts.iter().map(|t| t.as_ref().chars().collect()).collect();
        let n = chars.len();
        let mut scores = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in i..n {
                let ratio = SequenceMatcher::new(&chars[i], &chars[j], options).ratio();
                let score = to_score(ratio);
                scores[i][j] = score;
                scores[j][i] = score;
            }
        }

        Self { scores }
    }

    #[cfg(test)]
    pub(crate) fn from_rows(scores: Vec<Vec<f64>>) -> Self {
        Self { scores }
    }

    /// Number of documents (rows).
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.scores.get(i).and_then(|row| row.get(j)).copied()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.scores
    }

    /// True when the matrix is square and `m[i][j] == m[j][i]` everywhere.
    pub fn is_symmetric(&self) -> bool {
        let n = self.len();
        self.scores.iter().all(|row| row.len() == n)
            && (0..n).all(|i| (i + 1..n).all(|j| self.scores[i][j] == self.scores[j][i]))
    }
}

/// Convert a [0, 1] ratio to a percentage rounded to two decimals.
///
/// Rounds on the exact binary value with ties to even, so 3.125 becomes
/// 3.12 and 9.375 becomes 9.38. Scaling by 10000 and calling `round` would
/// send every tie upward instead.
pub fn to_score(ratio: f64) -> f64 {
    format!("{:.2}", ratio * 100.0).parse().unwrap_or(0.0)
}
