//! Knot vector utilities for NURBS curves and surfaces.

/// Multiplicity of knot value `u` in the knot vector.
pub fn knot_multiplicity(u: f64, knots: &[f64], tol: f64) -> usize {
    knots.iter().filter(|&&k| (k - u).abs() < tol).count()
}

/// A knot vector is valid when it is non-decreasing, has length
/// `n_ctrl + degree + 1`, and spans a domain of positive length.
pub fn validate_knot_vector(knots: &[f64], degree: usize, n_ctrl: usize) -> bool {
    if knots.len() != n_ctrl + degree + 1 {
        return false;
    }
    if knots.windows(2).any(|w| w[1] < w[0] || !w[0].is_finite()) {
        return false;
    }
    knots[knots.len() - degree - 1] > knots[degree]
}

/// Clamped knot vector on `[0, 1]` with uniformly spaced interior knots.
///
/// Requires `n_ctrl > degree`.
pub fn uniform_knots(degree: usize, n_ctrl: usize) -> Vec<f64> {
    let m = n_ctrl + degree + 1;
    let n_interior = n_ctrl - degree - 1;
    let mut knots = vec![0.0; m];
    for k in knots.iter_mut().skip(m - degree - 1) {
        *k = 1.0;
    }
    for i in 1..=n_interior {
        knots[degree + i] = i as f64 / (n_interior + 1) as f64;
    }
    knots
}

/// Parameter domain `[knots[degree], knots[len - degree - 1]]`.
pub fn domain(knots: &[f64], degree: usize) -> (f64, f64) {
    (knots[degree], knots[knots.len() - degree - 1])
}
