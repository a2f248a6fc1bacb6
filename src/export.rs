//! Writing spectrograms to disk
//!
//! Picks the output format from the file extension:
//!
//! - `.png`: rendered heat map (see [`crate::render`])
//! - `.json`: full matrix with metadata, machine-readable
//!
//! Anything else defaults to PNG, which is what people share.

use crate::render;
use crate::stft::SpectrogramMatrix;
use std::io::{self, BufWriter};
use std::path::Path;

/// Write a spectrogram in the format implied by `path`'s extension.
pub fn write<P: AsRef<Path>>(path: P, matrix: &SpectrogramMatrix) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "json" => {
            let file = std::fs::File::create(path)?;
            serde_json::to_writer(BufWriter::new(file), matrix)?;
            Ok(())
        }
        _ => render::render(matrix)
            .save(path)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancellationToken;
    use crate::stft::{generate, AnalysisConfig, AudioBuffer};

    fn small_matrix() -> SpectrogramMatrix {
        let samples = (0..6000)
            .map(|i| (2.0 * std::f64::consts::PI * 2000.0 * i as f64 / 44100.0).sin())
            .collect();
        let buffer = AudioBuffer::new(samples, 44100);
        generate(&buffer, &AnalysisConfig::default(), &CancellationToken::new()).unwrap()
    }

    #[test]
    fn test_json_round_trips_metadata() {
        let matrix = small_matrix();
        let path = std::env::temp_dir().join("chirpgram_export_test.json");

        write(&path, &matrix).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_reader(std::fs::File::open(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(parsed["sample_rate"], 44100);
        assert_eq!(parsed["fft_size"], 2048);
        assert_eq!(parsed["hop_size"], 512);
        assert_eq!(
            parsed["frames"].as_array().unwrap().len(),
            matrix.frame_count()
        );
    }

    #[test]
    fn test_png_written() {
        let matrix = small_matrix();
        let path = std::env::temp_dir().join("chirpgram_export_test.png");

        write(&path, &matrix).unwrap();
        let meta = std::fs::metadata(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(meta.len() > 0, "PNG file should not be empty");
    }
}
