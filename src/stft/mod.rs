//! Short-time Fourier transform spectrogram generation
//!
//! Turns a decoded mono signal into a time-frequency magnitude matrix:
//!
//! ```text
//! AudioBuffer --> frames --> window --> FFT magnitudes --> SpectrogramMatrix
//! ```
//!
//! # How It Works
//!
//! The signal is sliced into overlapping frames of `fft_size` samples,
//! `hop_size` apart. Each frame is optionally tapered by a window function
//! and transformed to a magnitude spectrum of `fft_size / 2` bins (up to the
//! Nyquist frequency). Collected in time order, the spectra form a matrix
//! whose columns are moments in time and rows are frequency bands.
//!
//! Frames are independent of each other, so the per-frame transforms fan out
//! across a rayon worker pool and are merged back in strict time order. A
//! [`CancellationToken`](crate::cancel::CancellationToken) is checked once
//! per frame; on cancellation the call returns
//! [`SpectrogramError::Cancelled`] and no partial matrix escapes.
//!
//! # Example
//!
//! ```no_run
//! use chirpgram::{generate, AnalysisConfig, AudioBuffer, CancellationToken};
//!
//! let buffer = AudioBuffer::new(vec![0.0; 44100], 44100);
//! let matrix = generate(&buffer, &AnalysisConfig::default(), &CancellationToken::new())?;
//!
//! println!("{} frames, {:.1} Hz per bin", matrix.frame_count(), matrix.frequency_resolution());
//! # Ok::<(), chirpgram::SpectrogramError>(())
//! ```

pub mod frame;
pub mod matrix;
pub mod transform;
pub mod window;

pub use frame::{frame_count, AudioBuffer, Frames};
pub use matrix::SpectrogramMatrix;
pub use transform::SpectralTransform;
pub use window::WindowKind;

use crate::cancel::CancellationToken;
use crate::error::SpectrogramError;
use rayon::prelude::*;

/// Default frame length in samples.
pub const DEFAULT_FFT_SIZE: usize = 2048;

/// Analysis parameters for one spectrogram run.
///
/// Defaults: 2048-sample frames, 75% overlap, no window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Frame length in samples; must be a power of two.
    pub fft_size: usize,
    /// Stride between frame starts; `0 < hop_size <= fft_size`.
    pub hop_size: usize,
    /// Amplitude taper applied to each frame.
    pub window: WindowKind,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::with_fft_size(DEFAULT_FFT_SIZE)
    }
}

impl AnalysisConfig {
    /// Config with the conventional `fft_size / 4` hop and no window.
    pub fn with_fft_size(fft_size: usize) -> Self {
        Self {
            fft_size,
            hop_size: fft_size / 4,
            window: WindowKind::None,
        }
    }

    fn validate(&self, sample_rate: u32) -> Result<(), SpectrogramError> {
        if self.fft_size < 2 || !self.fft_size.is_power_of_two() {
            return Err(SpectrogramError::InvalidConfig {
                reason: format!("fft_size {} is not a supported power of two", self.fft_size),
            });
        }
        if self.hop_size == 0 {
            return Err(SpectrogramError::InvalidConfig {
                reason: "hop_size must be greater than zero".to_string(),
            });
        }
        if self.hop_size > self.fft_size {
            return Err(SpectrogramError::InvalidConfig {
                reason: format!(
                    "hop_size {} exceeds fft_size {}",
                    self.hop_size, self.fft_size
                ),
            });
        }
        if sample_rate == 0 {
            return Err(SpectrogramError::InvalidConfig {
                reason: "sample rate must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Generate a spectrogram for a whole buffer.
///
/// Pure and stateless: identical inputs always produce an identical matrix,
/// and nothing persists between calls. Returns
/// [`SpectrogramError::EmptyAudio`] when the buffer is shorter than one
/// frame, [`SpectrogramError::InvalidConfig`] for rejected parameters (never
/// silently clamped), and [`SpectrogramError::Cancelled`] when `cancel` fires
/// mid-run.
pub fn generate(
    buffer: &AudioBuffer,
    config: &AnalysisConfig,
    cancel: &CancellationToken,
) -> Result<SpectrogramMatrix, SpectrogramError> {
    config.validate(buffer.sample_rate())?;

    let raw_frames: Vec<&[f64]> = buffer.frames(config.fft_size, config.hop_size).collect();
    if raw_frames.is_empty() {
        return Err(SpectrogramError::EmptyAudio);
    }

    log::debug!(
        "spectrogram: {} frames, fft_size={}, hop_size={}, window={}",
        raw_frames.len(),
        config.fft_size,
        config.hop_size,
        config.window
    );

    let coefficients = config.window.coefficients(config.fft_size);
    let transform = SpectralTransform::new(config.fft_size);

    // Indexed parallel collect merges results back in input order, so the
    // matrix is in strict time order no matter which worker finishes first.
    // A Cancelled error short-circuits the collect and discards all frames.
    let spectra = raw_frames
        .par_iter()
        .map(|raw| {
            if cancel.is_cancelled() {
                return Err(SpectrogramError::Cancelled);
            }
            let windowed = window::apply(raw, &coefficients);
            Ok(transform.magnitudes(&windowed))
        })
        .collect::<Result<Vec<Vec<f64>>, SpectrogramError>>()?;

    Ok(SpectrogramMatrix::new(
        spectra,
        buffer.sample_rate(),
        config.fft_size,
        config.hop_size,
    ))
}
