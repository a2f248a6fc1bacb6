//! The assembled time-frequency matrix
//!
//! One [`SpectrogramMatrix`] is produced per analysis call. It is immutable:
//! renderers, exporters, and stats displays all read the same data and derive
//! axis labels from the same metadata, so nothing is recomputed independently
//! downstream.

use serde::Serialize;

/// Time-ordered magnitude spectra plus the metadata needed to label them.
///
/// Every frame holds exactly `fft_size / 2` non-negative magnitudes, indexed
/// from the lowest frequency bin upward; the invariant is checked when the
/// matrix is built and cannot be violated afterward since all fields are
/// private.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrogramMatrix {
    frames: Vec<Vec<f64>>,
    sample_rate: u32,
    fft_size: usize,
    hop_size: usize,
    /// Seconds per frame step: `hop_size / sample_rate`.
    time_resolution: f64,
    /// Hz per bin: `sample_rate / fft_size`.
    frequency_resolution: f64,
}

impl SpectrogramMatrix {
    pub(crate) fn new(
        frames: Vec<Vec<f64>>,
        sample_rate: u32,
        fft_size: usize,
        hop_size: usize,
    ) -> Self {
        let bins = fft_size / 2;
        assert!(
            frames.iter().all(|f| f.len() == bins),
            "all spectrogram frames must have {} bins",
            bins
        );
        Self {
            frames,
            sample_rate,
            fft_size,
            hop_size,
            time_resolution: hop_size as f64 / sample_rate as f64,
            frequency_resolution: sample_rate as f64 / fft_size as f64,
        }
    }

    /// All frames in time order.
    pub fn frames(&self) -> &[Vec<f64>] {
        &self.frames
    }

    /// Magnitudes of one time slice.
    pub fn frame(&self, index: usize) -> &[f64] {
        &self.frames[index]
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Bins per frame: `fft_size / 2`.
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Seconds between the starts of consecutive frames.
    pub fn time_resolution(&self) -> f64 {
        self.time_resolution
    }

    /// Width of one frequency bin in Hz.
    pub fn frequency_resolution(&self) -> f64 {
        self.frequency_resolution
    }

    /// Time span covered by the matrix: `frame_count * time_resolution`.
    pub fn duration_secs(&self) -> f64 {
        self.frames.len() as f64 * self.time_resolution
    }

    /// Highest representable frequency (Nyquist): `sample_rate / 2`.
    pub fn max_frequency(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }

    /// Center frequency of a bin in Hz.
    pub fn bin_frequency(&self, bin: usize) -> f64 {
        bin as f64 * self.frequency_resolution
    }

    /// Start time of a frame in seconds.
    pub fn frame_time(&self, frame: usize) -> f64 {
        frame as f64 * self.time_resolution
    }
}
