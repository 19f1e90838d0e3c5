/// Frame-rate independent exponential approach of `current` towards `target`.
///
/// `rate` is per second: after `1 / rate` seconds about 63% of the gap is closed.
pub fn exp_smooth(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    target + (current - target) * (-rate * dt).exp()
}

/// Wraps an angle in degrees into [-180, 180]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && angle > 0.0 { 180.0 } else { wrapped }
}
