//! Track-fit primitives shared by the reconstruction components.
//!
//! - [`circle_fit_by_taubin`]: algebraic circle fit over transverse hit
//!   positions (Taubin method, Newton iteration on the characteristic
//!   polynomial).
//! - [`line_fit`]: unweighted least squares of z against transverse radius,
//!   describing the longitudinal trajectory as `z = slope * r + intercept`.
//! - [`circle_circle_intersection`]: closed-form intersection of the fitted
//!   circle with a circle of given radius centered on the origin.
//!
//! All routines work in double precision and never panic; geometric
//! degeneracy surfaces as `None` from the intersection, while the fits
//! return best-effort parameters that may be non-finite for pathological
//! input (e.g. perfectly collinear points), which downstream intersection
//! checks reject per hit.

use nalgebra::Vector3;

/// Circle fitted to transverse positions: radius and center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleFit {
    pub r: f64,
    pub x0: f64,
    pub y0: f64,
}

/// Straight line `z = slope * r + intercept` fitted to (radius, z) pairs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

/// The two candidate solutions of a circle-circle intersection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleIntersections {
    pub xplus: f64,
    pub yplus: f64,
    pub xminus: f64,
    pub yminus: f64,
}

/// Fits a circle to the (x, y) components of the given positions with the
/// Taubin algebraic method.
///
/// The method minimizes the algebraic distance normalized by the gradient
/// norm and is exact for points lying on a circle. At least three points
/// are required for the result to be meaningful; the caller enforces that.
pub fn circle_fit_by_taubin(positions: &[Vector3<f64>]) -> CircleFit {
    let weight = positions.len() as f64;

    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    for pos in positions {
        mean_x += pos.x;
        mean_y += pos.y;
    }
    mean_x /= weight;
    mean_y /= weight;

    // moments of the centered coordinates, with zi = xi^2 + yi^2
    let mut mxx = 0.0;
    let mut myy = 0.0;
    let mut mxy = 0.0;
    let mut mxz = 0.0;
    let mut myz = 0.0;
    let mut mzz = 0.0;
    for pos in positions {
        let xi = pos.x - mean_x;
        let yi = pos.y - mean_y;
        let zi = xi * xi + yi * yi;
        mxx += xi * xi;
        myy += yi * yi;
        mxy += xi * yi;
        mxz += xi * zi;
        myz += yi * zi;
        mzz += zi * zi;
    }
    mxx /= weight;
    myy /= weight;
    mxy /= weight;
    mxz /= weight;
    myz /= weight;
    mzz /= weight;

    let mz = mxx + myy;
    let cov_xy = mxx * myy - mxy * mxy;
    let var_z = mzz - mz * mz;

    let a3 = 4.0 * mz;
    let a2 = -3.0 * mz * mz - mzz;
    let a1 = var_z * mz + 4.0 * cov_xy * mz - mxz * mxz - myz * myz;
    let a0 = mxz * (mxz * myy - myz * mxy) + myz * (myz * mxx - mxz * mxy) - var_z * cov_xy;
    let a22 = a2 + a2;
    let a33 = a3 + a3 + a3;

    // Newton iteration on the characteristic polynomial, seeded at zero.
    // The root of interest is the smallest positive one.
    let mut x = 0.0;
    let mut y = a0;
    for _ in 0..99 {
        let dy = a1 + x * (a22 + a33 * x);
        let x_new = x - y / dy;
        if x_new == x || !x_new.is_finite() {
            break;
        }
        let y_new = a0 + x_new * (a1 + x_new * (a2 + x_new * a3));
        if y_new.abs() >= y.abs() {
            break;
        }
        x = x_new;
        y = y_new;
    }

    let det = x * x - x * mz + cov_xy;
    let x_center = (mxz * (myy - x) - myz * mxy) / det / 2.0;
    let y_center = (myz * (mxx - x) - mxz * mxy) / det / 2.0;

    CircleFit {
        r: (x_center * x_center + y_center * y_center + mz).sqrt(),
        x0: x_center + mean_x,
        y0: y_center + mean_y,
    }
}

/// Fits `z = slope * r + intercept` over the given positions, where `r` is
/// the per-point transverse radius.
pub fn line_fit(positions: &[Vector3<f64>]) -> LineFit {
    let n = positions.len() as f64;
    let mut r_sum = 0.0;
    let mut r2_sum = 0.0;
    let mut z_sum = 0.0;
    let mut rz_sum = 0.0;
    for pos in positions {
        let r = (pos.x * pos.x + pos.y * pos.y).sqrt();
        r_sum += r;
        r2_sum += r * r;
        z_sum += pos.z;
        rz_sum += r * pos.z;
    }

    LineFit {
        slope: (n * rz_sum - r_sum * z_sum) / (n * r2_sum - r_sum * r_sum),
        intercept: (r2_sum * z_sum - r_sum * rz_sum) / (n * r2_sum - r_sum * r_sum),
    }
}

/// Intersects the circle of radius `target_radius` centered on the origin
/// with the circle of radius `r` centered at `(x0, y0)`.
///
/// Returns the two candidate solutions, or `None` when the circles do not
/// intersect (negative discriminant) or the geometry is degenerate
/// (center on the x axis makes the closed form blow up).
pub fn circle_circle_intersection(
    target_radius: f64,
    r: f64,
    x0: f64,
    y0: f64,
) -> Option<CircleIntersections> {
    let d = target_radius * target_radius - r * r + x0 * x0 + y0 * y0;
    let a = 1.0 + (x0 / y0) * (x0 / y0);
    let b = -d * x0 / (y0 * y0);
    let c = (d / (2.0 * y0)) * (d / (2.0 * y0)) - target_radius * target_radius;

    let delta = b * b - 4.0 * a * c;
    let sq_delta = delta.sqrt();

    let xplus = (-b + sq_delta) / (2.0 * a);
    let xminus = (-b - sq_delta) / (2.0 * a);
    let yplus = -(2.0 * x0 * xplus - d) / (2.0 * y0);
    let yminus = -(2.0 * x0 * xminus - d) / (2.0 * y0);

    if !xplus.is_finite() || !yplus.is_finite() {
        return None;
    }

    Some(CircleIntersections {
        xplus,
        yplus,
        xminus,
        yminus,
    })
}
