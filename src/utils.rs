extern crate nalgebra as na;
use self::na::Vector3;

/// Returns the provided angle bounded between -180.0 and +180.0 degrees.
pub fn between_pm_180(angle_deg: f64) -> f64 {
    let bounded = angle_deg % 360.0;
    if bounded > 180.0 {
        bounded - 360.0
    } else if bounded < -180.0 {
        bounded + 360.0
    } else {
        bounded
    }
}

/// Returns whether every component of the provided vector is finite.
pub fn is_finite_vector(v: &Vector3<f64>) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Returns a vector whose components are all NaN, used as the position of a failed sample.
pub fn nan_vector() -> Vector3<f64> {
    Vector3::from_element(f64::NAN)
}
