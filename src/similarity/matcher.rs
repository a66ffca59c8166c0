// Sequence-matching similarity ratio.
//
// The ratio is the classic Ratcliff/Obershelp "gestalt" measure:
//
//   1. Find the longest contiguous block common to both texts.
//   2. Recurse on the pieces to the left and to the right of that block.
//   3. ratio = 2 * (characters in all blocks) / (len(a) + len(b))
//
// Ties in step 1 go to the block that starts earliest in `a`, then earliest
// in `b`. Because of that tie-breaking the ratio is NOT symmetric in its
// arguments ("tide"/"diet" = 0.25, "diet"/"tide" = 0.5), so callers that need
// a symmetric matrix must score each pair once and mirror the result.
//
// Texts are compared per Unicode scalar value, not per byte.

use std::collections::HashMap;

/// Texts at least this long are subject to the autojunk heuristic.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Tuning knobs for the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherOptions {
    /// Ignore "popular" characters of `b` when seeding blocks: if `b` has
    /// 200+ characters, any character occurring more than `len / 100 + 1`
    /// times is not used to start a match (it can still extend one).
    /// Speeds up long comparisons at some cost in precision. On by default.
    pub autojunk: bool,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self { autojunk: true }
    }
}

/// A matching block: `a[a..a + size] == b[b..b + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Compares two character sequences.
pub struct SequenceMatcher<'s> {
    a: &'s [char],
    b: &'s [char],
    /// Positions of each (non-popular) character of `b`, ascending.
    b2j: HashMap<char, Vec<usize>>,
}

impl<'s> SequenceMatcher<'s> {
    pub fn new(a: &'s [char], b: &'s [char], options: MatcherOptions) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        if options.autojunk && b.len() >= AUTOJUNK_MIN_LEN {
            let ntest = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= ntest);
        }

        Self { a, b, b2j }
    }

    /// Longest matching block within `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Returns a zero-size match at `(alo, blo)` when nothing matches.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // j2len[j] = length of the match ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut new_j2len = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let prev = match j.checked_sub(1) {
                        Some(pj) => j2len.get(&pj).copied().unwrap_or(0),
                        None => 0,
                    };
                    let k = prev + 1;
                    new_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = new_j2len;
        }

        // Grow the block over characters excluded by autojunk
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        Match {
            a: best_i,
            b: best_j,
            size: best_size,
        }
    }

    /// All matching blocks, ordered by position, adjacent blocks merged.
    pub fn matching_blocks(&self) -> Vec<Match> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let m = self.find_longest_match(alo, ahi, blo, bhi);
            if m.size == 0 {
                continue;
            }
            blocks.push(m);
            if alo < m.a && blo < m.b {
                queue.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
        }
        blocks.sort_by_key(|m| (m.a, m.b));

        let mut merged: Vec<Match> = Vec::with_capacity(blocks.len());
        for m in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.size == m.a && last.b + last.size == m.b => {
                    last.size += m.size;
                }
                _ => merged.push(m),
            }
        }
        merged
    }

    /// Similarity in [0, 1]. Two empty sequences are identical (1.0).
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        let matches: usize = self.matching_blocks().iter().map(|m| m.size).sum();
        2.0 * matches as f64 / total as f64
    }
}

/// Similarity of two strings in [0, 1].
pub fn ratio(a: &str, b: &str, options: MatcherOptions) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    SequenceMatcher::new(&a, &b, options).ratio()
}
