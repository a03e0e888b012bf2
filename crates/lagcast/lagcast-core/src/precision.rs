//! Decimal rounding and display formatting

/// Round `value` to `decimals` digits after the point, half away from zero
///
/// Values too large to scale are returned unchanged; they already carry no
/// fractional digits at that magnitude.
///
/// # Example
///
/// ```rust
/// use lagcast_core::precision::round_to;
///
/// assert_eq!(round_to(1.23456, 4), 1.2346);
/// assert_eq!(round_to(-2.5, 0), -3.0);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Render an observation with a fixed number of decimals
pub fn format_observation(value: f64, decimals: u32) -> String {
    format!("{:.*}", decimals as usize, value)
}
