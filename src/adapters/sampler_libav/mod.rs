// Sampler LibAV adapter - Decoded luminance frames via libav

use std::path::Path;

use ffmpeg_next::format::Pixel;
use ffmpeg_next::software::scaling;
use ffmpeg_next::util::frame;
use ffmpeg_next::{codec, media, Rational};
use image::GrayImage;
use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// Packets read after a seek before giving up on a timestamp
const MAX_PACKETS_PER_SEEK: usize = 500;

/// LibAV-based frame sampler
pub struct LibavFrameSampler;

impl LibavFrameSampler {
    /// Initialize libav; fails when the shared libraries cannot be set up
    pub fn new() -> Result<Self, DomainError> {
        ffmpeg_next::init()
            .map_err(|e| DomainError::NotAvailable(format!("FFmpeg initialization failed: {}", e)))?;
        ffmpeg_next::util::log::set_level(ffmpeg_next::util::log::Level::Error);
        Ok(Self)
    }
}

impl FrameSamplerPort for LibavFrameSampler {
    fn open(&self, file_path: &Path) -> Result<Box<dyn FrameCapture>, DomainError> {
        let input = ffmpeg_next::format::input(file_path)
            .map_err(|e| DomainError::SamplerFail(format!("Failed to open input: {}", e)))?;

        let (stream_index, time_base, start_secs, decoder) = {
            let stream = input
                .streams()
                .best(media::Type::Video)
                .ok_or_else(|| DomainError::SamplerFail("No video stream found".to_string()))?;
            let context = codec::context::Context::from_parameters(stream.parameters())
                .map_err(|e| DomainError::SamplerFail(format!("Failed to create decoder context: {}", e)))?;
            let decoder = context
                .decoder()
                .video()
                .map_err(|e| DomainError::SamplerFail(format!("Failed to open video decoder: {}", e)))?;
            let start_secs = start_seconds(stream.start_time(), stream.time_base());
            (stream.index(), stream.time_base(), start_secs, decoder)
        };

        let scaler = scaling::Context::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::GRAY8,
            decoder.width(),
            decoder.height(),
            scaling::Flags::BILINEAR,
        )
        .map_err(|e| DomainError::SamplerFail(format!("Failed to create scaler: {}", e)))?;

        debug!(
            "Opened capture for {} ({}x{})",
            file_path.display(),
            decoder.width(),
            decoder.height()
        );

        Ok(Box::new(LibavCapture {
            input,
            decoder,
            scaler,
            stream_index,
            time_base,
            start_secs,
        }))
    }
}

/// Open demuxer, decoder and scaler for one file; all are freed on drop
struct LibavCapture {
    input: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: scaling::Context,
    stream_index: usize,
    time_base: Rational,
    /// First pts of the video stream, in seconds; requested offsets are relative to it
    start_secs: f64,
}

/// Stream start in seconds; streams without a start time begin at zero
fn start_seconds(start_time: i64, time_base: Rational) -> f64 {
    if start_time == ffmpeg_next::ffi::AV_NOPTS_VALUE {
        0.0
    } else {
        start_time as f64 * f64::from(time_base)
    }
}

/// Container seek target in `AV_TIME_BASE` units for an offset into the stream
fn seek_position(offset: f64, start_secs: f64) -> i64 {
    ((offset + start_secs) * ffmpeg_next::ffi::AV_TIME_BASE as f64).round() as i64
}

/// Seconds from the stream start to a frame's pts
fn frame_offset(pts: i64, time_base: Rational, start_secs: f64) -> f64 {
    pts as f64 * f64::from(time_base) - start_secs
}

/// Whether a decoded frame is at or after `target` seconds into the stream;
/// frames without a pts count as reached
fn reached(frame: &frame::Video, time_base: Rational, start_secs: f64, target: f64) -> bool {
    frame
        .timestamp()
        .map_or(true, |pts| frame_offset(pts, time_base, start_secs) >= target - 1e-3)
}

impl FrameCapture for LibavCapture {
    fn read_at(&mut self, timestamp: f64) -> Option<GrayImage> {
        if !timestamp.is_finite() || timestamp < 0.0 {
            return None;
        }

        let position = seek_position(timestamp, self.start_secs);
        if let Err(e) = self.input.seek(position, ..position) {
            debug!("Seek to {:.3}s failed: {}", timestamp, e);
            return None;
        }
        self.decoder.flush();

        let (time_base, start_secs) = (self.time_base, self.start_secs);
        let mut decoded = frame::Video::empty();
        let mut packets_read = 0;
        for (stream, packet) in self.input.packets() {
            if stream.index() != self.stream_index {
                continue;
            }
            packets_read += 1;
            if packets_read > MAX_PACKETS_PER_SEEK {
                break;
            }
            if self.decoder.send_packet(&packet).is_err() {
                continue;
            }
            while self.decoder.receive_frame(&mut decoded).is_ok() {
                if reached(&decoded, time_base, start_secs, timestamp) {
                    return to_gray(&mut self.scaler, &decoded);
                }
            }
        }

        // End of stream: the last buffered frames may still reach the target
        if self.decoder.send_eof().is_ok() {
            while self.decoder.receive_frame(&mut decoded).is_ok() {
                if reached(&decoded, time_base, start_secs, timestamp) {
                    return to_gray(&mut self.scaler, &decoded);
                }
            }
        }
        None
    }
}

/// Convert a decoded frame to an 8-bit luminance image
fn to_gray(scaler: &mut scaling::Context, decoded: &frame::Video) -> Option<GrayImage> {
    let mut gray = frame::Video::empty();
    scaler.run(decoded, &mut gray).ok()?;

    let (width, height) = (gray.width(), gray.height());
    let stride = gray.stride(0);
    if stride == 0 || width == 0 || height == 0 {
        return None;
    }

    let row_len = width as usize;
    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for row in gray.data(0).chunks(stride).take(height as usize) {
        pixels.extend_from_slice(row.get(..row_len)?);
    }
    GrayImage::from_raw(width, height, pixels)
}
