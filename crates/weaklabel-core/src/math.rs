//! Shared math utilities.

/// Floor applied to every term-frequency weight so no token is ever
/// scored as exactly zero-relevance.
pub const WEIGHT_FLOOR: f32 = 0.0001;

/// Multiplier applied to a source factor when two lemmas are identical.
pub const EXACT_MATCH_BOOST: f32 = 10.0;

/// L2-normalize a vector in place so its magnitude is 1.
///
/// Zero vectors are left untouched. Components large enough to overflow the
/// squared norm are rescaled by the largest magnitude first.
pub fn l2_normalize_in_place(v: &mut [f32]) {
    let mut norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if !norm.is_finite() {
        let max = v.iter().fold(0.0f32, |m, x| m.max(x.abs()));
        if !max.is_finite() || max == 0.0 {
            return;
        }
        for x in v.iter_mut() {
            *x /= max;
        }
        norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    }
    if norm > f32::EPSILON {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// Descending order on scores, falling back to ascending label name on ties.
///
/// Used everywhere a ranking is cut to top-k so the output never depends on
/// hash-map iteration or sort stability.
pub fn rank_order(a: (&str, f32), b: (&str, f32)) -> std::cmp::Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}
