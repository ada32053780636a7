use super::model::{Coerced, MovieDataset};

/// One bar of the rating distribution. The last bin is closed on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Distribution of `vote_average` over movies with at least `min_votes`
/// votes, in `bins` equal-width bins spanning the observed scores.
pub fn rating_histogram(
    dataset: &MovieDataset,
    indices: &[usize],
    min_votes: f64,
    bins: usize,
) -> Vec<HistogramBin> {
    let scores: Vec<f64> = indices
        .iter()
        .map(|&i| &dataset.movies[i])
        .filter(|m| matches!(m.vote_count, Coerced::Known(c) if c >= min_votes))
        .filter_map(|m| m.vote_average.known())
        .collect();

    if scores.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut lo = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|b| HistogramBin {
            start: lo + b as f64 * width,
            end: lo + (b + 1) as f64 * width,
            count: 0,
        })
        .collect();
    for s in scores {
        let b = (((s - lo) / width) as usize).min(bins - 1);
        out[b].count += 1;
    }
    out
}

/// `(budget, revenue)` in millions for movies where both exceed
/// `min_amount`. Zero and unknown amounts are therefore left out.
pub fn budget_vs_revenue(dataset: &MovieDataset, indices: &[usize], min_amount: f64) -> Vec<[f64; 2]> {
    indices
        .iter()
        .map(|&i| &dataset.movies[i])
        .filter_map(|m| match (m.budget, m.revenue) {
            (Coerced::Known(b), Coerced::Known(r)) if b > min_amount && r > min_amount => {
                Some([b / 1_000_000.0, r / 1_000_000.0])
            }
            _ => None,
        })
        .collect()
}
