//! Decoding audio files into mono analysis buffers
//!
//! Thin glue between the filesystem and the spectrogram core: symphonia
//! probes the container, decodes whatever codec it finds (WAV, FLAC, MP3,
//! OGG, ...), and interleaved channels are averaged down to mono. The core
//! itself never touches a file; it only ever sees the returned
//! [`AudioBuffer`].

use crate::stft::AudioBuffer;
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to open file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unrecognized or unsupported audio format")]
    UnknownFormat,

    #[error("no decodable audio track in file")]
    NoTrack,

    #[error("stream does not declare a sample rate")]
    UnknownSampleRate,

    #[error("no audio samples could be decoded")]
    NoSamples,
}

/// Decode an audio file into a mono buffer at its native sample rate.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<AudioBuffer, DecodeError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|_| DecodeError::UnknownFormat)?;

    let mut format = probed.format;
    let track = format.default_track().ok_or(DecodeError::NoTrack)?;
    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or(DecodeError::UnknownSampleRate)?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|_| DecodeError::NoTrack)?;

    let mut samples: Vec<f64> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(_) => break, // end of stream
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(e) => {
                log::debug!("skipping undecodable packet: {}", e);
                continue;
            }
        };

        if sample_buf.is_none() {
            let spec = *decoded.spec();
            let duration = decoded.capacity() as u64;
            sample_buf = Some(SampleBuffer::new(duration, spec));
        }

        if let Some(ref mut buf) = sample_buf {
            let channels = decoded.spec().channels.count();
            buf.copy_interleaved_ref(decoded);
            downmix_into(&mut samples, buf.samples(), channels);
        }
    }

    if samples.is_empty() {
        return Err(DecodeError::NoSamples);
    }

    log::debug!(
        "decoded {}: {} samples at {} Hz",
        path.display(),
        samples.len(),
        sample_rate
    );

    Ok(AudioBuffer::new(samples, sample_rate))
}

/// Average interleaved channel groups into mono and append to `out`.
fn downmix_into(out: &mut Vec<f64>, interleaved: &[f32], channels: usize) {
    if channels == 0 {
        return;
    }
    for group in interleaved.chunks(channels) {
        let mono: f64 = group.iter().map(|&s| s as f64).sum::<f64>() / channels as f64;
        out.push(mono);
    }
}
