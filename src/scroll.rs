/// Frame interval of the timed scroll animation.
pub const FRAME_MS: i32 = 16;

/// Cubic ease-in-out over `t` in 0..=1.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Scroll offset `elapsed_ms` into an animation from `start` to `target`.
pub fn position_at(start: f64, target: f64, elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return target;
    }
    start + (target - start) * ease_in_out_cubic(elapsed_ms / duration_ms)
}

pub fn is_finished(elapsed_ms: f64, duration_ms: f64) -> bool {
    elapsed_ms >= duration_ms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints_and_midpoint() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-9);
        assert_eq!(ease_in_out_cubic(-1.0), 0.0);
        assert_eq!(ease_in_out_cubic(3.0), 1.0);
    }

    #[test]
    fn test_easing_is_monotonic() {
        let samples: Vec<f64> = (0..=20).map(|i| ease_in_out_cubic(i as f64 / 20.0)).collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_position_reaches_target() {
        assert_eq!(position_at(100.0, 900.0, 0.0, 2000.0), 100.0);
        assert_eq!(position_at(100.0, 900.0, 2000.0, 2000.0), 900.0);
        assert_eq!(position_at(100.0, 900.0, 2500.0, 2000.0), 900.0);
        assert_eq!(position_at(100.0, 900.0, 10.0, 0.0), 900.0);

        let upward = position_at(900.0, 100.0, 1000.0, 2000.0);
        assert!((upward - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_finished() {
        assert!(!is_finished(1999.0, 2000.0));
        assert!(is_finished(2000.0, 2000.0));
    }
}
