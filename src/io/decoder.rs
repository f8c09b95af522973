//! Audio decoding using Symphonia
//!
//! Thin front-end over the Symphonia demuxer/decoder stack that turns a
//! media file into a [`SampleBuffer`] for analysis. The analysis core never
//! parses containers or codecs itself; this adapter (or any other PCM
//! source) feeds it.

use crate::error::AnalysisError;
use crate::io::SampleBuffer;
use std::path::Path;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decode an audio file into a [`SampleBuffer`].
///
/// Supports whatever the enabled Symphonia codecs support (MP3, AAC, FLAC,
/// WAV, OGG/Vorbis). Channels are kept separate; downmixing happens at
/// analysis time.
///
/// # Errors
///
/// Returns [`AnalysisError::Decode`] for unreadable files, unsupported
/// formats, or streams without an audio track.
pub fn decode_file(path: &Path) -> Result<SampleBuffer, AnalysisError> {
    let file = std::fs::File::open(path)
        .map_err(|e| AnalysisError::Decode(format!("failed to open {}: {}", path.display(), e)))?;

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
        .map_err(|e| AnalysisError::Decode(format!("failed to probe format: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AnalysisError::Decode("no audio track found".to_string()))?;

    let track_id = track.id;
    let channel_count = track.codec_params.channels.map_or(1, |c| c.count());
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| AnalysisError::Decode("unknown sample rate".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AnalysisError::Decode(format!("failed to create decoder: {}", e)))?;

    let mut interleaved: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(AnalysisError::Decode(format!("demux error: {}", e))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            // Recoverable bitstream glitches: skip the packet, keep going.
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => return Err(AnalysisError::Decode(format!("decode error: {}", e))),
        };

        let spec = *decoded.spec();
        let mut sample_buf =
            symphonia::core::audio::SampleBuffer::<f32>::new(decoded.frames() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        interleaved.extend_from_slice(sample_buf.samples());
    }

    let buffer = SampleBuffer::from_interleaved(&interleaved, channel_count, sample_rate)?;

    log::info!(
        "decoded {}: {} samples/channel x {} channels at {} Hz ({:.1}s)",
        path.display(),
        buffer.samples_per_channel(),
        buffer.channel_count(),
        sample_rate,
        buffer.duration_seconds()
    );

    Ok(buffer)
}
