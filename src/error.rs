//! Error taxonomy for spectrogram generation
//!
//! All three variants come back as explicit `Result` values from
//! [`generate`](crate::stft::generate). Nothing is logged-and-swallowed and
//! there is no fallback to synthetic data; the caller decides what each
//! outcome means for the user.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpectrogramError {
    /// The buffer holds fewer samples than a single analysis frame.
    ///
    /// Recoverable: typically surfaced as "recording too short", distinct
    /// from a decode failure.
    #[error("audio shorter than one analysis frame")]
    EmptyAudio,

    /// A rejected analysis parameter. Parameters are never silently clamped.
    #[error("invalid analysis config: {reason}")]
    InvalidConfig { reason: String },

    /// Cooperative cancellation was observed mid-computation.
    ///
    /// A distinct outcome rather than a failure; no partial matrix is
    /// produced.
    #[error("spectrogram generation cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            SpectrogramError::EmptyAudio.to_string(),
            "audio shorter than one analysis frame"
        );
        assert_eq!(
            SpectrogramError::InvalidConfig {
                reason: "hop_size must be greater than zero".to_string()
            }
            .to_string(),
            "invalid analysis config: hop_size must be greater than zero"
        );
        assert_eq!(
            SpectrogramError::Cancelled.to_string(),
            "spectrogram generation cancelled"
        );
    }

    #[test]
    fn test_variants_distinguishable() {
        // Callers match on the variant to pick user-visible behavior
        assert_ne!(SpectrogramError::EmptyAudio, SpectrogramError::Cancelled);
    }
}
