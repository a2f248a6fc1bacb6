//! Audio buffers and analysis-frame extraction
//!
//! The first stage of the pipeline: slicing a decoded mono signal into
//! fixed-size, overlapping frames. Frames start at offsets
//! `0, hop, 2*hop, ...` and a trailing partial frame is dropped rather than
//! zero-padded, so every frame carries the same number of real samples.

/// A decoded mono audio signal.
///
/// Samples are floating point, nominally in `[-1.0, 1.0]`. Stereo material
/// must be downmixed before construction; [`crate::decode`] does this for
/// file input. The buffer is read-only once built and can be shared across
/// frame workers without locking.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length of the signal in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Iterate over analysis frames of `fft_size` samples, `hop_size` apart.
    ///
    /// The iterator borrows the buffer and can be recreated at any time;
    /// extraction itself allocates nothing.
    pub fn frames(&self, fft_size: usize, hop_size: usize) -> Frames<'_> {
        Frames {
            samples: &self.samples,
            fft_size,
            hop_size,
            next: 0,
            total: frame_count(self.samples.len(), fft_size, hop_size),
        }
    }
}

/// Number of full frames a signal of `total_samples` yields.
///
/// `floor((total - fft_size) / hop) + 1` when at least one frame fits,
/// otherwise 0. The trailing partial frame is never counted.
pub fn frame_count(total_samples: usize, fft_size: usize, hop_size: usize) -> usize {
    if total_samples < fft_size || fft_size == 0 || hop_size == 0 {
        return 0;
    }
    (total_samples - fft_size) / hop_size + 1
}

/// Lazy iterator over fixed-size sample frames.
///
/// Yields `&[f64]` slices of exactly `fft_size` samples each, in time order.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    samples: &'a [f64],
    fft_size: usize,
    hop_size: usize,
    next: usize,
    total: usize,
}

impl<'a> Iterator for Frames<'a> {
    type Item = &'a [f64];

    fn next(&mut self) -> Option<&'a [f64]> {
        if self.next >= self.total {
            return None;
        }
        let start = self.next * self.hop_size;
        self.next += 1;
        Some(&self.samples[start..start + self.fft_size])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}
