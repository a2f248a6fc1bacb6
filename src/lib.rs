//! Chirpgram - spectrogram generation for wildlife sound recordings
//!
//! Chirpgram turns a captured audio waveform into a time-frequency magnitude
//! matrix: the picture of a bird call that field apps display and acoustic
//! feature extractors consume. The engine is a pure library call over an
//! in-memory buffer; decoding files and writing images are thin layers
//! around it.
//!
//! # Pipeline
//!
//! ```text
//! file --(decode)--> AudioBuffer --(generate)--> SpectrogramMatrix --(export)--> .png / .json
//! ```
//!
//! Per-frame spectral transforms are independent and run across a rayon
//! worker pool; results are merged back in strict time order. Generation is
//! stateless and deterministic, accepts a cooperative cancellation token,
//! and returns explicit error variants:
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | `Ok(matrix)` | Complete, immutable time-frequency matrix |
//! | `EmptyAudio` | Recording shorter than one analysis frame |
//! | `InvalidConfig` | Rejected parameters, never silently clamped |
//! | `Cancelled` | Cancellation observed; no partial matrix |
//!
//! # Quick Start
//!
//! ```no_run
//! use chirpgram::{decode, generate, AnalysisConfig, CancellationToken, SpectrogramError};
//!
//! let buffer = decode::decode_file("robin.wav")?;
//! let token = CancellationToken::new();
//!
//! match generate(&buffer, &AnalysisConfig::default(), &token) {
//!     Ok(matrix) => {
//!         println!("{:.1}s of audio, {} Hz resolution",
//!             matrix.duration_secs(), matrix.frequency_resolution());
//!         chirpgram::export::write("robin.png", &matrix)?;
//!     }
//!     Err(SpectrogramError::EmptyAudio) => println!("recording too short"),
//!     Err(e) => eprintln!("analysis failed: {}", e),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`stft`]: the core - frame extraction, windowing, spectral transform,
//!   matrix assembly
//! - [`decode`]: audio file to mono [`AudioBuffer`] via symphonia
//! - [`render`] / [`export`]: matrix to PNG heat map or JSON
//! - [`cancel`]: cooperative cancellation token

pub mod cancel;
pub mod decode;
pub mod error;
pub mod export;
pub mod render;
pub mod stft;

pub use cancel::CancellationToken;
pub use error::SpectrogramError;
pub use stft::{generate, AnalysisConfig, AudioBuffer, SpectrogramMatrix, WindowKind};
