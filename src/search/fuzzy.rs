//! Approximate substring scoring.
//!
//! A field is scored by the cheapest edit-distance alignment of the pattern
//! against any substring of the field (Sellers' algorithm), plus a penalty for
//! how far into the field that alignment starts. Scores run from `0.0`
//! (exact match at the very start) to `1.0`.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMatch {
    pub score: f64,
    pub errors: usize,
    pub start: usize,
}

/// Scores `pattern` against `text`. Both are expected to be lowercased.
/// Returns `None` when no alignment scores within `threshold`.
pub fn score_field(
    pattern: &[char],
    text: &[char],
    threshold: f64,
    distance: usize,
) -> Option<FieldMatch> {
    let m = pattern.len();
    if m == 0 {
        return None;
    }

    // (cost, start) for the previous and current pattern row.
    let mut prev: Vec<(usize, usize)> = (0..=text.len()).map(|j| (0, j)).collect();
    let mut curr = vec![(0usize, 0usize); text.len() + 1];

    for (i, &pc) in pattern.iter().enumerate() {
        curr[0] = (i + 1, 0);
        for (j, &tc) in text.iter().enumerate() {
            let (diag_cost, diag_start) = prev[j];
            let substitute = (diag_cost + usize::from(pc != tc), diag_start);
            let skip_pattern = (prev[j + 1].0 + 1, prev[j + 1].1);
            let skip_text = (curr[j].0 + 1, curr[j].1);

            let mut best = substitute;
            if skip_pattern.0 < best.0 {
                best = skip_pattern;
            }
            if skip_text.0 < best.0 {
                best = skip_text;
            }
            curr[j + 1] = best;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let proximity = |start: usize| {
        if distance == 0 {
            if start == 0 {
                0.0
            } else {
                1.0
            }
        } else {
            start as f64 / distance as f64
        }
    };

    prev.iter()
        .skip(1)
        .filter_map(|&(errors, start)| {
            let accuracy = errors as f64 / m as f64;
            if accuracy > threshold {
                return None;
            }
            let score = (accuracy + proximity(start)).min(1.0);
            (score <= threshold).then_some(FieldMatch {
                score,
                errors,
                start,
            })
        })
        .min_by(|a, b| a.score.total_cmp(&b.score))
}
