// SPDX-License-Identifier: MPL-2.0
//! `image` crate adapters for still images and frame sequences.
//!
//! Every frame is decoded up front into RGBA. GIF and WebP animations come
//! out of the `image` decoders already composited onto the full canvas, so
//! each frame can be drawn as-is.

use crate::application::port::{FrameSequence, MediaError, SequenceDecoder, StillDecoder};
use crate::config::DEFAULT_FRAME_DELAY_MS;
use crate::domain::media::{Dimensions, RawImage};
use image_rs::codecs::gif::GifDecoder;
use image_rs::codecs::webp::WebPDecoder;
use image_rs::{AnimationDecoder, Frame, GenericImageView, ImageError};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

impl From<ImageError> for MediaError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::IoError(io) => MediaError::IoError(io.to_string()),
            ImageError::Unsupported(_) => MediaError::UnsupportedFormat,
            other => MediaError::CorruptedData(other.to_string()),
        }
    }
}

// =============================================================================
// Still images
// =============================================================================

/// Decodes any raster format the `image` crate was built with.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

impl StillDecoder for ImageDecoder {
    fn decode(&self, path: &Path) -> Result<RawImage, MediaError> {
        let bytes = fs::read(path)?;
        let img = image_rs::load_from_memory(&bytes)?;

        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(MediaError::InvalidDimensions { width, height });
        }

        Ok(RawImage::from_rgba(width, height, img.to_rgba8().into_vec()))
    }
}

// =============================================================================
// Frame sequences
// =============================================================================

/// Opens GIF and WebP files as frame sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageSequenceDecoder;

impl SequenceDecoder for ImageSequenceDecoder {
    fn open(&self, path: &Path) -> Result<Box<dyn FrameSequence>, MediaError> {
        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        let reader = BufReader::new(File::open(path)?);

        let frames = match extension.as_str() {
            "gif" => GifDecoder::new(reader)?.into_frames().collect_frames()?,
            "webp" => WebPDecoder::new(reader)?.into_frames().collect_frames()?,
            _ => return Err(MediaError::UnsupportedFormat),
        };

        DecodedFrames::new(frames).map(|seq| Box::new(seq) as Box<dyn FrameSequence>)
    }
}

/// An animation held fully in memory.
#[derive(Debug)]
pub struct DecodedFrames {
    frames: Vec<RawImage>,
    delays: Vec<Duration>,
    rect: Dimensions,
    current: usize,
}

impl DecodedFrames {
    /// Converts decoded frames, substituting a default for zero delays.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::CorruptedData`] if there are no frames, and
    /// [`MediaError::InvalidDimensions`] if the canvas is empty.
    pub fn new(frames: Vec<Frame>) -> Result<Self, MediaError> {
        let Some(first) = frames.first() else {
            return Err(MediaError::CorruptedData("no frames".into()));
        };
        let (width, height) = first.buffer().dimensions();
        if width == 0 || height == 0 {
            return Err(MediaError::InvalidDimensions { width, height });
        }

        let mut images = Vec::with_capacity(frames.len());
        let mut delays = Vec::with_capacity(frames.len());
        for frame in frames {
            let delay = Duration::from(frame.delay());
            delays.push(if delay.is_zero() {
                Duration::from_millis(DEFAULT_FRAME_DELAY_MS)
            } else {
                delay
            });

            let buffer = frame.into_buffer();
            images.push(RawImage::from_rgba(
                buffer.width(),
                buffer.height(),
                buffer.into_raw(),
            ));
        }

        Ok(Self {
            frames: images,
            delays,
            rect: Dimensions::new(width, height),
            current: 0,
        })
    }
}

impl FrameSequence for DecodedFrames {
    fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn frame_rect(&self) -> Dimensions {
        self.rect
    }

    fn current_frame(&self) -> usize {
        self.current
    }

    fn advance_frame(&mut self) {
        if self.current + 1 < self.frames.len() {
            self.current += 1;
        }
    }

    fn jump_to_frame(&mut self, index: usize) -> bool {
        if index < self.frames.len() {
            self.current = index;
            true
        } else {
            false
        }
    }

    fn frame(&self) -> &RawImage {
        &self.frames[self.current]
    }

    fn frame_delay(&self) -> Duration {
        self.delays[self.current]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::codecs::gif::GifEncoder;
    use image_rs::{Delay, Rgba, RgbaImage};
    use tempfile::tempdir;

    fn write_gif(path: &Path, frames: usize, delay_ms: u32) {
        let file = File::create(path).expect("failed to create gif");
        let mut encoder = GifEncoder::new(file);
        let frames = (0..frames).map(|i| {
            let shade = u8::try_from(i * 60).unwrap_or(u8::MAX);
            Frame::from_parts(
                RgbaImage::from_pixel(6, 4, Rgba([shade, 0, 0, 255])),
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms, 1),
            )
        });
        encoder.encode_frames(frames).expect("failed to encode gif");
    }

    #[test]
    fn decodes_png_to_rgba() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("sample.png");
        RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]))
            .save(&path)
            .expect("failed to write temporary png");

        let image = ImageDecoder.decode(&path).expect("png should load");

        assert_eq!(image.dimensions(), Dimensions::new(4, 2));
        assert_eq!(&image.rgba_bytes()[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let err = ImageDecoder
            .decode(&temp_dir.path().join("does_not_exist.png"))
            .unwrap_err();
        assert!(matches!(err, MediaError::IoError(_)));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("invalid.png");
        fs::write(&path, b"not a png").expect("failed to write invalid data");

        let err = ImageDecoder.decode(&path).unwrap_err();

        assert!(matches!(
            err,
            MediaError::UnsupportedFormat | MediaError::CorruptedData(_)
        ));
    }

    #[test]
    fn gif_frames_and_rect_are_reported() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("anim.gif");
        write_gif(&path, 3, 80);

        let mut seq = ImageSequenceDecoder.open(&path).expect("gif should open");

        assert_eq!(seq.frame_count(), 3);
        assert_eq!(seq.frame_rect(), Dimensions::new(6, 4));
        assert_eq!(seq.current_frame(), 0);
        assert_eq!(seq.frame_delay(), Duration::from_millis(80));

        seq.advance_frame();
        seq.advance_frame();
        seq.advance_frame();
        assert_eq!(seq.current_frame(), 2);

        assert!(seq.jump_to_frame(0));
        assert!(!seq.jump_to_frame(3));
        assert_eq!(seq.current_frame(), 0);
    }

    #[test]
    fn single_frame_gif_has_one_frame() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("still.gif");
        write_gif(&path, 1, 0);

        let seq = ImageSequenceDecoder.open(&path).expect("gif should open");

        assert_eq!(seq.frame_count(), 1);
        assert_eq!(
            seq.frame_delay(),
            Duration::from_millis(DEFAULT_FRAME_DELAY_MS)
        );
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("x.png");
        RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]))
            .save(&path)
            .expect("failed to write png");

        let err = ImageSequenceDecoder.open(&path).err();

        assert_eq!(err, Some(MediaError::UnsupportedFormat));
    }

    #[test]
    fn empty_frame_list_is_corrupt() {
        let err = DecodedFrames::new(Vec::new()).unwrap_err();
        assert!(matches!(err, MediaError::CorruptedData(_)));
    }
}
