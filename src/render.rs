//! Rendering a spectrogram matrix to an RGB image
//!
//! One pixel column per frame, one row per frequency bin, low frequencies at
//! the bottom. Magnitudes are converted to dB with a -96 dB floor, normalized
//! against the loudest bin in the matrix, and mapped through an HSL ramp from
//! blue (quiet) to red (loud).
//!
//! The matrix is read-only here; rendering can be repeated (for zoom or
//! re-export) without touching the analysis.

use crate::stft::SpectrogramMatrix;
use image::{Rgb, RgbImage};

/// Quietest representable level in dB; zero magnitudes clamp here.
const DB_FLOOR: f64 = -96.0;

/// Convert linear magnitude to dB, flooring silence at [`DB_FLOOR`].
fn to_db(value: f64) -> f64 {
    if value <= 0.0 {
        DB_FLOOR
    } else {
        (20.0 * value.log10()).max(DB_FLOOR)
    }
}

/// Render the full matrix at one pixel per cell.
pub fn render(matrix: &SpectrogramMatrix) -> RgbImage {
    let width = matrix.frame_count() as u32;
    let height = matrix.num_bins() as u32;

    // Normalize against the matrix peak so the hottest cell is full red
    let peak_db = matrix
        .frames()
        .iter()
        .flat_map(|frame| frame.iter())
        .map(|&m| to_db(m))
        .fold(DB_FLOOR, f64::max);
    let range = peak_db - DB_FLOOR;

    let mut img = RgbImage::new(width, height);
    for (t, frame) in matrix.frames().iter().enumerate() {
        for (f, &mag) in frame.iter().enumerate() {
            let intensity = if range > 0.0 {
                ((to_db(mag) - DB_FLOOR) / range).clamp(0.0, 1.0)
            } else {
                0.0
            };
            // Row 0 is the top of the image; bin 0 belongs at the bottom
            let y = height - 1 - f as u32;
            img.put_pixel(t as u32, y, colorize(intensity));
        }
    }
    img
}

/// Map a normalized intensity to the blue-to-red heat scale.
fn colorize(intensity: f64) -> Rgb<u8> {
    let hue = (1.0 - intensity) * 240.0;
    let lightness = intensity * 0.5 + 0.10;
    hsl_to_rgb(hue, 1.0, lightness)
}

/// Standard HSL to RGB conversion; `h` in degrees, `s` and `l` in [0, 1].
fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb<u8> {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = (h / 60.0) % 6.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    Rgb([
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancellationToken;
    use crate::stft::{generate, AnalysisConfig, AudioBuffer};

    fn tone_matrix() -> SpectrogramMatrix {
        let samples = (0..10000)
            .map(|i| (2.0 * std::f64::consts::PI * 1000.0 * i as f64 / 44100.0).sin())
            .collect();
        let buffer = AudioBuffer::new(samples, 44100);
        generate(&buffer, &AnalysisConfig::default(), &CancellationToken::new()).unwrap()
    }

    // ==========================================================================
    // DECIBEL CONVERSION TESTS
    // ==========================================================================

    #[test]
    fn test_to_db_unity() {
        assert!((to_db(1.0) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_to_db_half() {
        assert!((to_db(0.5) - (-6.02)).abs() < 0.1);
    }

    #[test]
    fn test_to_db_zero_floors() {
        assert_eq!(to_db(0.0), DB_FLOOR);
        assert_eq!(to_db(-1.0), DB_FLOOR);
    }

    #[test]
    fn test_to_db_tiny_value_floors() {
        // Below the floor, still clamped
        assert_eq!(to_db(1e-10), DB_FLOOR);
    }

    // ==========================================================================
    // IMAGE GEOMETRY TESTS
    // ==========================================================================

    #[test]
    fn test_dimensions_match_matrix() {
        let matrix = tone_matrix();
        let img = render(&matrix);
        assert_eq!(img.width(), matrix.frame_count() as u32);
        assert_eq!(img.height(), matrix.num_bins() as u32);
    }

    #[test]
    fn test_low_frequencies_at_bottom() {
        // The 1 kHz tone sits near bin 46 of 1024, so the hot row must be
        // near the bottom of the image, not the top
        let matrix = tone_matrix();
        let img = render(&matrix);
        let height = img.height();

        let hottest_row = (0..height)
            .max_by_key(|&y| {
                (0..img.width())
                    .map(|x| {
                        let p = img.get_pixel(x, y);
                        p.0[0] as u32 // red channel tracks intensity
                    })
                    .sum::<u32>()
            })
            .unwrap();

        let expected = height - 1 - 46;
        assert!(
            hottest_row.abs_diff(expected) <= 1,
            "hottest row {} should be near {}",
            hottest_row,
            expected
        );
    }

    #[test]
    fn test_silence_renders_uniform() {
        let buffer = AudioBuffer::new(vec![0.0; 4096], 44100);
        let matrix =
            generate(&buffer, &AnalysisConfig::default(), &CancellationToken::new()).unwrap();
        let img = render(&matrix);

        let first = *img.get_pixel(0, 0);
        for pixel in img.pixels() {
            assert_eq!(*pixel, first, "silent matrix should render uniformly");
        }
    }

    // ==========================================================================
    // COLOR SCALE TESTS
    // ==========================================================================

    #[test]
    fn test_colorize_endpoints() {
        // Quiet end is dark blue, loud end is pure-ish red
        let quiet = colorize(0.0);
        assert!(quiet.0[2] > quiet.0[0], "quiet should lean blue: {:?}", quiet);

        let loud = colorize(1.0);
        assert!(loud.0[0] > 200, "loud should be red: {:?}", loud);
        assert!(loud.0[2] < 50);
    }

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Rgb([255, 0, 0]));
        assert_eq!(hsl_to_rgb(120.0, 1.0, 0.5), Rgb([0, 255, 0]));
        assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), Rgb([0, 0, 255]));
    }

    #[test]
    fn test_hsl_grayscale() {
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.0), Rgb([0, 0, 0]));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), Rgb([255, 255, 255]));
    }
}
