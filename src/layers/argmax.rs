/// Index of the maximum class score; on ties the first maximum in index
/// order wins (index 0 seeds the running maximum, later equal scores do not
/// overwrite it).
pub fn argmax(scores: &[i32]) -> usize {
    let mut best = 0;
    for (i, &s) in scores.iter().enumerate().skip(1) {
        if s > scores[best] {
            best = i;
        }
    }
    best
}
