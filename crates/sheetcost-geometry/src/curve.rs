use std::borrow::Cow;

use crate::point::Point;
use crate::{GeometryError, Result};

/// Number of polyline segments a curve is flattened into unless the caller
/// asks for something else
pub const DEFAULT_CURVE_SEGMENTS: usize = 100;

/// Free-form curve given as a (possibly rational) B-spline
///
/// `knots` may be left empty, in which case a clamped uniform knot vector is
/// used. `weights` empty means a non-rational spline. A curve with no control
/// points but with `fit_points` is the B-spline of the same degree (3 when
/// unset) that interpolates the fit points at chord-length parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
    pub degree: usize,
    pub control_points: Vec<Point>,
    pub knots: Vec<f64>,
    pub weights: Vec<f64>,
    pub fit_points: Vec<Point>,
}

impl Curve {
    pub fn from_control_points(degree: usize, control_points: Vec<Point>) -> Self {
        Self {
            degree,
            control_points,
            ..Default::default()
        }
    }

    pub fn from_fit_points(fit_points: Vec<Point>) -> Self {
        Self {
            fit_points,
            ..Default::default()
        }
    }

    pub fn with_knots(mut self, knots: Vec<f64>) -> Self {
        self.knots = knots;
        self
    }

    pub fn with_weights(mut self, weights: Vec<f64>) -> Self {
        self.weights = weights;
        self
    }

    /// Flatten the curve into `segments + 1` points sampled uniformly over its
    /// parameter domain
    ///
    /// `segments` below one is treated as one.
    pub fn approximate(&self, segments: usize) -> Result<Vec<Point>> {
        if self.control_points.is_empty() {
            return self.interpolate_fit_points()?.approximate(segments);
        }

        self.validate()?;
        let knots = self.knot_vector();
        let segments = segments.max(1);
        let last = self.control_points.len() - 1;
        let (t0, t1) = (knots[self.degree], knots[last + 1]);

        let points = (0..=segments)
            .map(|i| {
                let t = if i == segments {
                    t1
                } else {
                    t0 + (t1 - t0) * (i as f64 / segments as f64)
                };
                self.evaluate(&knots, t)
            })
            .collect();
        Ok(points)
    }

    /// Global interpolation through the fit points: chord-length parameters,
    /// averaged clamped knots, control points from the collocation system
    fn interpolate_fit_points(&self) -> Result<Curve> {
        let fit = &self.fit_points;
        if fit.is_empty() {
            return Err(GeometryError::InvalidCurve(
                "curve has neither control points nor fit points".to_string(),
            ));
        }
        if fit.len() < 2 {
            return Err(GeometryError::InvalidCurve(
                "at least 2 fit points are needed".to_string(),
            ));
        }
        if !fit.iter().all(Point::is_finite) {
            return Err(GeometryError::NonFinite("curve fit point"));
        }

        let last = fit.len() - 1;
        let requested = if self.degree == 0 { 3 } else { self.degree };
        let degree = requested.min(last);
        let params = chord_parameters(fit)?;
        let knots = averaged_knots(&params, degree);

        let mut matrix = vec![vec![0.0; fit.len()]; fit.len()];
        for (row, &u) in matrix.iter_mut().zip(&params) {
            let span = find_span(&knots, degree, last, u);
            for (j, n) in basis_functions(&knots, span, u, degree).into_iter().enumerate() {
                row[span - degree + j] = n;
            }
        }
        let control_points = solve(matrix, fit)?;

        Ok(Curve::from_control_points(degree, control_points).with_knots(knots))
    }

    fn validate(&self) -> Result<()> {
        let count = self.control_points.len();
        if self.degree == 0 {
            return Err(GeometryError::InvalidCurve(
                "degree must be at least 1".to_string(),
            ));
        }
        if count <= self.degree {
            return Err(GeometryError::InvalidCurve(format!(
                "degree {} needs at least {} control points, got {}",
                self.degree,
                self.degree + 1,
                count
            )));
        }
        if !self.control_points.iter().all(Point::is_finite) {
            return Err(GeometryError::NonFinite("curve control point"));
        }

        if !self.knots.is_empty() {
            let expected = count + self.degree + 1;
            if self.knots.len() != expected {
                return Err(GeometryError::InvalidCurve(format!(
                    "expected {} knots, got {}",
                    expected,
                    self.knots.len()
                )));
            }
            if !self.knots.iter().all(|k| k.is_finite()) {
                return Err(GeometryError::NonFinite("curve knot"));
            }
            if self.knots.windows(2).any(|w| w[1] < w[0]) {
                return Err(GeometryError::InvalidCurve(
                    "knot vector is not non-decreasing".to_string(),
                ));
            }
            if self.knots[self.degree] >= self.knots[count] {
                return Err(GeometryError::InvalidCurve(
                    "empty parameter domain".to_string(),
                ));
            }
        }

        if !self.weights.is_empty() {
            if self.weights.len() != count {
                return Err(GeometryError::InvalidCurve(format!(
                    "expected {} weights, got {}",
                    count,
                    self.weights.len()
                )));
            }
            if !self.weights.iter().all(|w| w.is_finite() && *w > 0.0) {
                return Err(GeometryError::InvalidCurve(
                    "weights must be positive".to_string(),
                ));
            }
        }

        Ok(())
    }

    fn knot_vector(&self) -> Cow<'_, [f64]> {
        if self.knots.is_empty() {
            Cow::Owned(clamped_uniform_knots(
                self.control_points.len(),
                self.degree,
            ))
        } else {
            Cow::Borrowed(&self.knots)
        }
    }

    fn weight(&self, index: usize) -> f64 {
        self.weights.get(index).copied().unwrap_or(1.0)
    }

    /// de Boor evaluation in homogeneous coordinates
    fn evaluate(&self, knots: &[f64], t: f64) -> Point {
        let p = self.degree;
        let span = find_span(knots, p, self.control_points.len() - 1, t);

        let mut d: Vec<[f64; 3]> = (0..=p)
            .map(|j| {
                let i = span - p + j;
                let w = self.weight(i);
                let cp = self.control_points[i];
                [cp.x * w, cp.y * w, w]
            })
            .collect();

        for r in 1..=p {
            for j in (r..=p).rev() {
                let i = span - p + j;
                let denom = knots[i + p + 1 - r] - knots[i];
                let alpha = if denom == 0.0 {
                    0.0
                } else {
                    (t - knots[i]) / denom
                };
                let (prev, cur) = (d[j - 1], d[j]);
                d[j] = [
                    (1.0 - alpha) * prev[0] + alpha * cur[0],
                    (1.0 - alpha) * prev[1] + alpha * cur[1],
                    (1.0 - alpha) * prev[2] + alpha * cur[2],
                ];
            }
        }

        let [x, y, w] = d[p];
        Point::new(x / w, y / w)
    }
}

/// Index `k` of the non-empty knot span `[knots[k], knots[k + 1])` holding
/// `t`; the domain end maps to the last non-empty span
fn find_span(knots: &[f64], degree: usize, last: usize, t: f64) -> usize {
    (degree..=last)
        .rev()
        .find(|&k| knots[k] <= t && knots[k] < knots[k + 1])
        .unwrap_or(degree)
}

/// Non-zero basis functions `N[span - degree ..= span]` at `t`
fn basis_functions(knots: &[f64], span: usize, t: f64, degree: usize) -> Vec<f64> {
    let mut n = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    n[0] = 1.0;

    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;
        for r in 0..j {
            let denom = right[r + 1] + left[j - r];
            let temp = if denom == 0.0 { 0.0 } else { n[r] / denom };
            n[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        n[j] = saved;
    }
    n
}

/// Cumulative chord length normalized to `[0, 1]`
fn chord_parameters(points: &[Point]) -> Result<Vec<f64>> {
    let chords: Vec<f64> = points.windows(2).map(|w| w[0].distance_to(w[1])).collect();
    let total: f64 = chords.iter().sum();
    if total <= 0.0 {
        return Err(GeometryError::InvalidCurve(
            "fit points are all coincident".to_string(),
        ));
    }

    let mut params = Vec::with_capacity(points.len());
    let mut acc = 0.0;
    params.push(0.0);
    for chord in &chords[..chords.len() - 1] {
        acc += chord;
        params.push(acc / total);
    }
    params.push(1.0);
    Ok(params)
}

/// Clamped knots whose interior values average `degree` consecutive parameters
fn averaged_knots(params: &[f64], degree: usize) -> Vec<f64> {
    let last = params.len() - 1;
    let mut knots = Vec::with_capacity(params.len() + degree + 1);
    knots.extend(std::iter::repeat_n(0.0, degree + 1));
    knots.extend((1..=last - degree).map(|j| {
        params[j..j + degree].iter().sum::<f64>() / degree as f64
    }));
    knots.extend(std::iter::repeat_n(1.0, degree + 1));
    knots
}

/// Gaussian elimination with partial pivoting, one solve for both coordinates
fn solve(mut matrix: Vec<Vec<f64>>, rhs: &[Point]) -> Result<Vec<Point>> {
    let size = rhs.len();
    let mut b: Vec<[f64; 2]> = rhs.iter().map(|p| [p.x, p.y]).collect();

    for col in 0..size {
        let pivot = (col..size)
            .max_by(|&i, &j| matrix[i][col].abs().total_cmp(&matrix[j][col].abs()))
            .unwrap_or(col);
        if matrix[pivot][col].abs() < 1e-12 {
            return Err(GeometryError::InvalidCurve(
                "fit points do not determine a curve".to_string(),
            ));
        }
        matrix.swap(col, pivot);
        b.swap(col, pivot);

        for row in col + 1..size {
            let factor = matrix[row][col] / matrix[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..size {
                matrix[row][k] -= factor * matrix[col][k];
            }
            b[row][0] -= factor * b[col][0];
            b[row][1] -= factor * b[col][1];
        }
    }

    let mut solution = vec![[0.0; 2]; size];
    for row in (0..size).rev() {
        let mut acc = b[row];
        for k in row + 1..size {
            acc[0] -= matrix[row][k] * solution[k][0];
            acc[1] -= matrix[row][k] * solution[k][1];
        }
        solution[row] = [acc[0] / matrix[row][row], acc[1] / matrix[row][row]];
    }
    Ok(solution.into_iter().map(|[x, y]| Point::new(x, y)).collect())
}

fn clamped_uniform_knots(count: usize, degree: usize) -> Vec<f64> {
    let interior = count - degree - 1;
    let step = (interior + 1) as f64;

    let mut knots = Vec::with_capacity(count + degree + 1);
    knots.extend(std::iter::repeat_n(0.0, degree + 1));
    knots.extend((1..=interior).map(|i| i as f64 / step));
    knots.extend(std::iter::repeat_n(1.0, degree + 1));
    knots
}
