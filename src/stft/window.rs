//! Amplitude windows applied to frames before the spectral transform
//!
//! A rectangular (no) window keeps bin edges sharp but smears energy into
//! neighboring bins (spectral leakage). Hann and Hamming taper the frame
//! edges, trading a little frequency resolution for much less leakage.
//!
//! The default is [`WindowKind::None`]; whether a taper is worth the
//! resolution cost depends on the material, so callers choose explicitly.

use std::fmt;
use std::str::FromStr;

/// Which amplitude taper to apply to each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowKind {
    /// Rectangular window: every coefficient is 1.0.
    #[default]
    None,
    /// Hann: `0.5 * (1 - cos(2*pi*i / (N-1)))`, zero at both edges.
    Hann,
    /// Hamming: `0.54 - 0.46 * cos(2*pi*i / (N-1))`, 0.08 at the edges.
    Hamming,
}

impl WindowKind {
    /// Coefficient table for a frame of `size` samples.
    ///
    /// Always returns exactly `size` coefficients; `None` yields all ones so
    /// application is uniform across kinds.
    pub fn coefficients(self, size: usize) -> Vec<f64> {
        if size < 2 {
            return vec![1.0; size];
        }
        let denom = (size - 1) as f64;
        match self {
            WindowKind::None => vec![1.0; size],
            WindowKind::Hann => (0..size)
                .map(|i| 0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / denom).cos()))
                .collect(),
            WindowKind::Hamming => (0..size)
                .map(|i| 0.54 - 0.46 * (2.0 * std::f64::consts::PI * i as f64 / denom).cos())
                .collect(),
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindowKind::None => "none",
            WindowKind::Hann => "hann",
            WindowKind::Hamming => "hamming",
        };
        f.write_str(name)
    }
}

impl FromStr for WindowKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(WindowKind::None),
            "hann" => Ok(WindowKind::Hann),
            "hamming" => Ok(WindowKind::Hamming),
            other => Err(format!(
                "unknown window '{}' (expected none, hann, or hamming)",
                other
            )),
        }
    }
}

/// Multiply a frame pointwise by a coefficient table.
///
/// `frame` and `coefficients` must be the same length; the result always is.
pub fn apply(frame: &[f64], coefficients: &[f64]) -> Vec<f64> {
    debug_assert_eq!(frame.len(), coefficients.len());
    frame
        .iter()
        .zip(coefficients.iter())
        .map(|(&s, &w)| s * w)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // WINDOW COEFFICIENT TESTS
    // ==========================================================================
    //
    // Hann: w(n) = 0.5 * (1 - cos(2*pi*n/(N-1)))
    //   - zero at both edges, 1.0 at the center, symmetric
    // Hamming: w(n) = 0.54 - 0.46 * cos(2*pi*n/(N-1))
    //   - 0.08 at both edges, 1.0 at the center, symmetric
    // None: all ones (identity)
    // ==========================================================================

    #[test]
    fn test_none_is_identity() {
        let coeffs = WindowKind::None.coefficients(64);
        assert_eq!(coeffs.len(), 64);
        assert!(coeffs.iter().all(|&w| w == 1.0));
    }

    #[test]
    fn test_hann_edges() {
        let coeffs = WindowKind::Hann.coefficients(100);
        assert!(coeffs[0] < 0.001, "Hann should start near zero, got {}", coeffs[0]);
        assert!(coeffs[99] < 0.001, "Hann should end near zero, got {}", coeffs[99]);
    }

    #[test]
    fn test_hann_center() {
        // Odd size for an exact center point
        let coeffs = WindowKind::Hann.coefficients(101);
        assert!(
            (coeffs[50] - 1.0).abs() < 0.001,
            "Hann center should be 1.0, got {}",
            coeffs[50]
        );
    }

    #[test]
    fn test_hann_symmetry() {
        let coeffs = WindowKind::Hann.coefficients(100);
        for i in 0..50 {
            assert!(
                (coeffs[i] - coeffs[99 - i]).abs() < 1e-12,
                "Hann should be symmetric at index {}",
                i
            );
        }
    }

    #[test]
    fn test_hamming_edges() {
        let coeffs = WindowKind::Hamming.coefficients(100);
        assert!(
            (coeffs[0] - 0.08).abs() < 0.001,
            "Hamming edge should be 0.08, got {}",
            coeffs[0]
        );
        assert!((coeffs[99] - 0.08).abs() < 0.001);
    }

    #[test]
    fn test_hamming_center() {
        let coeffs = WindowKind::Hamming.coefficients(101);
        assert!((coeffs[50] - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_tiny_sizes() {
        // Degenerate sizes must not divide by zero
        assert_eq!(WindowKind::Hann.coefficients(0).len(), 0);
        assert_eq!(WindowKind::Hann.coefficients(1), vec![1.0]);
    }

    // ==========================================================================
    // APPLICATION TESTS
    // ==========================================================================

    #[test]
    fn test_apply_identity() {
        let frame = vec![0.25, -0.5, 1.0, -1.0];
        let coeffs = WindowKind::None.coefficients(4);
        assert_eq!(apply(&frame, &coeffs), frame);
    }

    #[test]
    fn test_apply_pointwise() {
        let frame = vec![1.0, 2.0, 3.0];
        let coeffs = vec![0.5, 0.5, 0.0];
        assert_eq!(apply(&frame, &coeffs), vec![0.5, 1.0, 0.0]);
    }

    #[test]
    fn test_apply_deterministic() {
        let frame: Vec<f64> = (0..256).map(|i| ((i as f64) * 0.1).sin()).collect();
        let coeffs = WindowKind::Hann.coefficients(256);
        assert_eq!(apply(&frame, &coeffs), apply(&frame, &coeffs));
    }

    // ==========================================================================
    // PARSING TESTS
    // ==========================================================================

    #[test]
    fn test_from_str() {
        assert_eq!("none".parse::<WindowKind>().unwrap(), WindowKind::None);
        assert_eq!("hann".parse::<WindowKind>().unwrap(), WindowKind::Hann);
        assert_eq!("HAMMING".parse::<WindowKind>().unwrap(), WindowKind::Hamming);
        assert!("blackman".parse::<WindowKind>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for kind in [WindowKind::None, WindowKind::Hann, WindowKind::Hamming] {
            assert_eq!(kind.to_string().parse::<WindowKind>().unwrap(), kind);
        }
    }
}
