//! The spectral transform: windowed frame in, magnitude spectrum out
//!
//! Magnitudes are computed with a fast O(N log N) transform but carry the
//! exact semantics of direct summation:
//!
//! ```text
//! X_k  = sum_{n=0}^{N-1} x[n] * exp(-2*pi*i*k*n/N)
//! mag[k] = sqrt(Re(X_k)^2 + Im(X_k)^2)
//! ```
//!
//! Only the first `N/2` bins are kept; bins at and above Nyquist mirror the
//! lower half for real input and carry no extra information. No `1/N`
//! scaling is applied, so outputs are raw magnitude sums. A full-scale sine
//! that lands exactly on a bin peaks at about `N/2` there.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// A planned forward FFT for one frame length.
///
/// Planning is done once per spectrogram run; the planned transform is
/// immutable and shared by all frame workers.
pub struct SpectralTransform {
    fft: Arc<dyn Fft<f64>>,
    fft_size: usize,
}

impl SpectralTransform {
    pub fn new(fft_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        Self { fft, fft_size }
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of output bins: `fft_size / 2`.
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2
    }

    /// Magnitude spectrum of one windowed frame.
    ///
    /// `frame` must be exactly `fft_size` samples long.
    pub fn magnitudes(&self, frame: &[f64]) -> Vec<f64> {
        debug_assert_eq!(frame.len(), self.fft_size);

        let mut buffer: Vec<Complex<f64>> =
            frame.iter().map(|&s| Complex::new(s, 0.0)).collect();
        self.fft.process(&mut buffer);

        buffer[..self.num_bins()].iter().map(|c| c.norm()).collect()
    }
}
