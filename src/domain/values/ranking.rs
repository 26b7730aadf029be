/// Maps raw relevance scores (already in engine order, best first) to dense
/// rank positions starting at 1. Order-preserving: equal consecutive scores
/// share a rank, each distinct score bumps the rank by one.
pub fn normalize_ranks(scores: &[f64]) -> Vec<usize> {
    let mut ranks = Vec::with_capacity(scores.len());
    let mut rank = 0usize;
    let mut prev: Option<f64> = None;
    for &score in scores {
        if prev != Some(score) {
            rank += 1;
            prev = Some(score);
        }
        ranks.push(rank);
    }
    ranks
}
