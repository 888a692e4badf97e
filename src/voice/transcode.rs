//! PCM transcoding
//!
//! Converts the raw float32 stream returned by speech synthesis into a
//! playable WAV container (16-bit signed little-endian PCM). Pure and
//! deterministic: the same input always yields byte-identical output.

/// Sample rate of the synthesis output (Hz)
pub const SYNTH_SAMPLE_RATE: u32 = 24000;

/// Size of the RIFF/WAVE container header in bytes
pub const WAV_HEADER_LEN: usize = 44;

/// Transcode raw f32 LE PCM into a WAV container with i16 LE samples
///
/// Each 4-byte little-endian float sample is clamped to `[-1.0, 1.0]` and
/// scaled asymmetrically: negative values by 32768, non-negative values by
/// 32767, matching the asymmetric range of signed 16-bit audio. A trailing
/// partial sample (when `raw.len() % 4 != 0`) is dropped, never read.
///
/// Zero-length input yields a valid header-only container.
#[must_use]
pub fn transcode(raw: &[u8], sample_rate: u32, channels: u16) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(raw.len() / 4 * 2);
    for bytes in raw.chunks_exact(4) {
        let f = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let clamped = f.clamp(-1.0, 1.0);
        let scaled = if clamped < 0.0 {
            clamped * 32768.0
        } else {
            clamped * 32767.0
        };
        #[allow(clippy::cast_possible_truncation)]
        let sample = scaled.round() as i16;
        pcm.extend_from_slice(&sample.to_le_bytes());
    }

    #[allow(clippy::cast_possible_truncation)]
    let data_len = pcm.len() as u32;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + pcm.len());
    out.extend_from_slice(&wav_header(data_len, sample_rate, channels));
    out.extend_from_slice(&pcm);
    out
}

/// Build the fixed 44-byte RIFF/WAVE header for uncompressed 16-bit PCM
#[must_use]
pub fn wav_header(data_len: u32, sample_rate: u32, channels: u16) -> [u8; WAV_HEADER_LEN] {
    let byte_rate = sample_rate * u32::from(channels) * 2;
    let block_align = channels * 2;

    let mut header = [0u8; WAV_HEADER_LEN];
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&(36 + data_len).to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes()); // fmt chunk size (PCM)
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // audio format: linear PCM
    header[22..24].copy_from_slice(&channels.to_le_bytes());
    header[24..28].copy_from_slice(&sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&byte_rate.to_le_bytes());
    header[32..34].copy_from_slice(&block_align.to_le_bytes());
    header[34..36].copy_from_slice(&16u16.to_le_bytes()); // bits per sample
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_len.to_le_bytes());
    header
}
