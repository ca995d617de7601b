//! WAV request-body encoding

use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;
use vocaleval_audio::AudioClip;

use crate::error::{Result, TranscribeError};

/// Encode a captured clip as a mono 16-bit PCM WAV in memory.
pub fn encode_wav(clip: &AudioClip) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| TranscribeError::encode(e.to_string()))?;

        for &sample in &clip.samples {
            let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer
                .write_sample(value)
                .map_err(|e| TranscribeError::encode(e.to_string()))?;
        }

        writer
            .finalize()
            .map_err(|e| TranscribeError::encode(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_riff_header_and_payload() {
        let clip = AudioClip::new(vec![0.0, 0.5, -0.5, 1.0], 16000);
        let bytes = encode_wav(&clip).unwrap();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        // 44-byte canonical header plus 2 bytes per sample.
        assert_eq!(bytes.len(), 44 + clip.samples.len() * 2);
    }

    #[test]
    fn clamps_out_of_range_samples() {
        let clip = AudioClip::new(vec![2.0, -2.0], 8000);
        let bytes = encode_wav(&clip).unwrap();

        let first = i16::from_le_bytes([bytes[44], bytes[45]]);
        let second = i16::from_le_bytes([bytes[46], bytes[47]]);
        assert_eq!(first, i16::MAX);
        assert_eq!(second, -i16::MAX);
    }

    #[test]
    fn empty_clip_encodes_header_only() {
        let clip = AudioClip::new(Vec::new(), 16000);
        let bytes = encode_wav(&clip).unwrap();
        assert_eq!(bytes.len(), 44);
    }
}
