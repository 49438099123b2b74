//! Cox–de Boor B-spline basis functions.
//!
//! Basis values come from the recursive definition
//!
//! ```text
//! N(i,0)(u) = 1 if u lies in span i, else 0
//! N(i,p)(u) = (u - k[i]) / (k[i+p] - k[i]) · N(i,p-1)(u)
//!           + (k[i+p+1] - u) / (k[i+p+1] - k[i+1]) · N(i+1,p-1)(u)
//! ```
//!
//! with 0/0 taken as 0. Degree-zero membership is decided by [`find_span`], so
//! the end of a clamped domain belongs to the last non-empty span and the
//! curve interpolates its final control point.

/// Find the knot span index such that `knots[span] <= u < knots[span+1]`.
///
/// `n` is the index of the last control point (= num_control_points - 1),
/// `p` the degree. Parameters outside the domain clamp to the first/last span.
pub fn find_span(n: usize, p: usize, u: f64, knots: &[f64]) -> usize {
    if u >= knots[n + 1] {
        // Last span with non-zero length.
        let mut span = n;
        while span > p && knots[span] >= knots[span + 1] {
            span -= 1;
        }
        return span;
    }
    if u <= knots[p] {
        return p;
    }

    let mut lo = p;
    let mut hi = n + 1;
    let mut mid = (lo + hi) / 2;
    while u < knots[mid] || u >= knots[mid + 1] {
        if u < knots[mid] {
            hi = mid;
        } else {
            lo = mid;
        }
        mid = (lo + hi) / 2;
    }
    mid
}

/// Value of basis function `N(i,p)` at `u`, given the active `span`.
pub fn basis(i: usize, p: usize, u: f64, span: usize, knots: &[f64]) -> f64 {
    if p == 0 {
        return if i == span { 1.0 } else { 0.0 };
    }

    let mut value = 0.0;
    let d1 = knots[i + p] - knots[i];
    if d1 != 0.0 {
        value += (u - knots[i]) / d1 * basis(i, p - 1, u, span, knots);
    }
    let d2 = knots[i + p + 1] - knots[i + 1];
    if d2 != 0.0 {
        value += (knots[i + p + 1] - u) / d2 * basis(i + 1, p - 1, u, span, knots);
    }
    value
}

/// First derivative of `N(i,p)` with respect to `u`.
///
/// `N'(i,p) = p / (k[i+p] - k[i]) · N(i,p-1) - p / (k[i+p+1] - k[i+1]) · N(i+1,p-1)`
pub fn basis_derivative(i: usize, p: usize, u: f64, span: usize, knots: &[f64]) -> f64 {
    if p == 0 {
        return 0.0;
    }

    let pf = p as f64;
    let mut value = 0.0;
    let d1 = knots[i + p] - knots[i];
    if d1 != 0.0 {
        value += pf / d1 * basis(i, p - 1, u, span, knots);
    }
    let d2 = knots[i + p + 1] - knots[i + 1];
    if d2 != 0.0 {
        value -= pf / d2 * basis(i + 1, p - 1, u, span, knots);
    }
    value
}

/// Values and first derivatives of the `p+1` basis functions that are
/// non-zero in `span`, indexed from `span - p`.
pub fn nonzero_basis(span: usize, p: usize, u: f64, knots: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let first = span - p;
    let values = (first..=span).map(|i| basis(i, p, u, span, knots)).collect();
    let ders = (first..=span)
        .map(|i| basis_derivative(i, p, u, span, knots))
        .collect();
    (values, ders)
}
