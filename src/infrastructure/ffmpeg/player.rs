// SPDX-License-Identifier: MPL-2.0
//! In-process video decoding with `ffmpeg-next`, implementing [`VideoPlayer`].
//!
//! Each [`FfmpegPlayer`] drives one decoder task on Tokio's blocking pool,
//! since FFmpeg contexts are not `Send`. Commands go in over an unbounded
//! channel; decoded RGBA frames come back over a bounded one, so a UI that
//! stops polling stalls the decoder instead of growing a queue.
//!
//! Every seek starts a new generation. Events tagged with an older
//! generation are dropped on receipt, so an end-of-stream raced against a
//! rewind never ends the fresh run.

use crate::application::port::{VideoBackend, VideoError, VideoPlayer};
use crate::domain::media::{Dimensions, RawImage};
use ffmpeg_next::format::Pixel;
use ffmpeg_next::software::scaling;
use ffmpeg_next::{codec, format, frame, media};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Decoded frames buffered between the decoder task and the UI.
const EVENT_QUEUE_DEPTH: usize = 2;

/// Sleep between command checks while paused or finished.
const IDLE_POLL: Duration = Duration::from_millis(10);

/// Initializes FFmpeg once per process and quiets its logging.
///
/// # Errors
///
/// Returns [`VideoError::DecodingFailed`] if the libraries fail to
/// initialize. The failure is remembered for later calls.
pub fn init_ffmpeg() -> Result<(), VideoError> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();

    INIT.get_or_init(|| {
        ffmpeg_next::init().map_err(|err| err.to_string())?;
        ffmpeg_next::util::log::set_level(ffmpeg_next::util::log::Level::Error);
        Ok(())
    })
    .clone()
    .map_err(|reason| VideoError::DecodingFailed(format!("FFmpeg initialization failed: {reason}")))
}

/// Opens videos with the FFmpeg libraries.
///
/// Must be used from inside a Tokio runtime; the decoder task is spawned on
/// the current one.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfmpegBackend;

impl VideoBackend for FfmpegBackend {
    fn load(&self, path: &Path, native: Dimensions) -> Result<Box<dyn VideoPlayer>, VideoError> {
        if native.is_empty() {
            return Err(VideoError::DecodingFailed(format!(
                "invalid frame size {native}"
            )));
        }

        init_ffmpeg()?;
        let runtime = Handle::try_current()
            .map_err(|err| VideoError::DecodingFailed(format!("no async runtime: {err}")))?;

        let duration = container_duration(path)?;
        tracing::debug!(path = %path.display(), ?duration, "video opened");

        Ok(Box::new(FfmpegPlayer::spawn(
            &runtime,
            path.to_path_buf(),
            native,
            duration,
        )))
    }
}

/// Checks that `path` holds a video stream and reads the container length.
fn container_duration(path: &Path) -> Result<Option<Duration>, VideoError> {
    let input = format::input(path)
        .map_err(|err| VideoError::DecodingFailed(format!("cannot open video: {err}")))?;

    if input.streams().best(media::Type::Video).is_none() {
        return Err(VideoError::DecodingFailed("no video stream found".into()));
    }

    Ok(duration_from_micros(input.duration()))
}

/// Converts FFmpeg's `AV_TIME_BASE` duration; unknown or negative is `None`.
#[must_use]
pub fn duration_from_micros(micros: i64) -> Option<Duration> {
    u64::try_from(micros)
        .ok()
        .filter(|&micros| micros > 0)
        .map(Duration::from_micros)
}

// =============================================================================
// Decoder task protocol
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderCommand {
    Play,
    Pause,
    Seek { target: Duration, generation: u64 },
    Stop,
}

#[derive(Debug)]
enum DecoderEvent {
    Frame {
        generation: u64,
        pts: Duration,
        image: RawImage,
    },
    EndOfStream {
        generation: u64,
    },
    Error(String),
}

// =============================================================================
// FfmpegPlayer
// =============================================================================

pub struct FfmpegPlayer {
    path: PathBuf,
    commands: mpsc::UnboundedSender<DecoderCommand>,
    events: mpsc::Receiver<DecoderEvent>,
    duration: Option<Duration>,
    /// Timestamp of the newest frame received, or the last seek target.
    position: Duration,
    generation: u64,
    /// Frames received since the last seek.
    frames_in_run: usize,
    playing: bool,
    finished: bool,
    failure: Option<VideoError>,
}

impl FfmpegPlayer {
    fn spawn(runtime: &Handle, path: PathBuf, native: Dimensions, duration: Option<Duration>) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);

        let task_path = path.clone();
        runtime.spawn_blocking(move || {
            if let Err(reason) = decode_loop(&task_path, native, command_rx, &event_tx) {
                tracing::warn!(path = %task_path.display(), %reason, "video decoder stopped");
                let _ = event_tx.blocking_send(DecoderEvent::Error(reason));
            }
        });

        Self::with_channels(path, duration, command_tx, event_rx)
    }

    fn with_channels(
        path: PathBuf,
        duration: Option<Duration>,
        commands: mpsc::UnboundedSender<DecoderCommand>,
        events: mpsc::Receiver<DecoderEvent>,
    ) -> Self {
        Self {
            path,
            commands,
            events,
            duration,
            position: Duration::ZERO,
            generation: 0,
            frames_in_run: 0,
            playing: false,
            finished: false,
            failure: None,
        }
    }

    fn send(&self, command: DecoderCommand) -> Result<(), VideoError> {
        self.commands
            .send(command)
            .map_err(|_| VideoError::DecodingFailed("decoder task is not running".into()))
    }

    /// Records a terminal failure; every later poll reports it again.
    fn fail(&mut self, reason: impl Into<String>) -> VideoError {
        let err = VideoError::DecodingFailed(reason.into());
        tracing::debug!(path = %self.path.display(), %err, "video player failed");
        self.failure = Some(err.clone());
        self.playing = false;
        err
    }
}

impl VideoPlayer for FfmpegPlayer {
    fn play(&mut self) -> Result<(), VideoError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.send(DecoderCommand::Play)?;
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) {
        if self.playing {
            let _ = self.send(DecoderCommand::Pause);
            self.playing = false;
            tracing::debug!(path = %self.path.display(), "video stopped");
        }
    }

    fn set_position(&mut self, position: Duration) -> Result<(), VideoError> {
        let generation = self.generation.wrapping_add(1);
        self.send(DecoderCommand::Seek {
            target: position,
            generation,
        })?;
        self.generation = generation;
        self.position = position;
        self.frames_in_run = 0;
        self.finished = false;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.duration
            .map_or(self.position, |duration| self.position.min(duration))
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn poll_frame(&mut self) -> Result<Option<RawImage>, VideoError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let mut latest = None;
        loop {
            match self.events.try_recv() {
                Ok(DecoderEvent::Frame {
                    generation,
                    pts,
                    image,
                }) if generation == self.generation => {
                    self.position = pts;
                    self.frames_in_run += 1;
                    latest = Some(image);
                }
                Ok(DecoderEvent::EndOfStream { generation }) if generation == self.generation => {
                    if self.frames_in_run == 0 {
                        return Err(self.fail("stream ended before its first frame"));
                    }
                    self.finished = true;
                }
                Ok(DecoderEvent::Frame { .. } | DecoderEvent::EndOfStream { .. }) => {}
                Ok(DecoderEvent::Error(reason)) => return Err(self.fail(reason)),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    return Err(self.fail("decoder task exited"));
                }
            }
        }

        Ok(latest)
    }

    fn at_end(&self) -> bool {
        self.finished
    }
}

impl Drop for FfmpegPlayer {
    fn drop(&mut self) {
        // Dropping `events` also unblocks a decoder waiting on a full queue.
        let _ = self.commands.send(DecoderCommand::Stop);
    }
}

// =============================================================================
// Decoder task
// =============================================================================

/// Demuxer, decoder and RGBA scaler for one video stream.
struct FrameReader {
    input: format::context::Input,
    stream_index: usize,
    decoder: codec::decoder::Video,
    scaler: scaling::Context,
    time_base: f64,
    eof_sent: bool,
}

impl FrameReader {
    fn open(path: &Path, native: Dimensions) -> Result<Self, String> {
        let input =
            format::input(path).map_err(|err| format!("cannot open {}: {err}", path.display()))?;

        let (stream_index, time_base, decoder) = {
            let stream = input
                .streams()
                .best(media::Type::Video)
                .ok_or_else(|| "no video stream found".to_string())?;
            let time_base = stream.time_base();
            let decoder = codec::context::Context::from_parameters(stream.parameters())
                .and_then(|context| context.decoder().video())
                .map_err(|err| format!("cannot create decoder: {err}"))?;
            (
                stream.index(),
                f64::from(time_base.numerator()) / f64::from(time_base.denominator()),
                decoder,
            )
        };

        // Frames are scaled to the probed size so they match what was laid out.
        let scaler = scaling::Context::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGBA,
            native.width,
            native.height,
            scaling::Flags::BILINEAR,
        )
        .map_err(|err| format!("cannot create scaler: {err}"))?;

        Ok(Self {
            input,
            stream_index,
            decoder,
            scaler,
            time_base,
            eof_sent: false,
        })
    }

    fn seek(&mut self, target: Duration) -> Result<(), String> {
        let timestamp = i64::try_from(target.as_micros()).unwrap_or(i64::MAX);
        self.input
            .seek(timestamp, ..timestamp)
            .map_err(|err| format!("seek to {target:?} failed: {err}"))?;
        self.decoder.flush();
        self.eof_sent = false;
        Ok(())
    }

    /// Decodes the next frame; `None` once the stream is drained.
    fn next_frame(&mut self) -> Result<Option<(Duration, RawImage)>, String> {
        let mut decoded = frame::Video::empty();

        loop {
            if self.decoder.receive_frame(&mut decoded).is_ok() {
                return self.convert(&decoded).map(Some);
            }
            if self.eof_sent {
                return Ok(None);
            }

            let index = self.stream_index;
            let packet = self
                .input
                .packets()
                .find_map(|(stream, packet)| (stream.index() == index).then_some(packet));

            match packet {
                Some(packet) => {
                    if let Err(err) = self.decoder.send_packet(&packet) {
                        tracing::trace!(%err, "skipping undecodable packet");
                    }
                }
                None => {
                    // Flushes the frames the decoder still holds back.
                    self.decoder
                        .send_eof()
                        .map_err(|err| format!("cannot drain decoder: {err}"))?;
                    self.eof_sent = true;
                }
            }
        }
    }

    fn convert(&mut self, decoded: &frame::Video) -> Result<(Duration, RawImage), String> {
        let mut rgba = frame::Video::empty();
        self.scaler
            .run(decoded, &mut rgba)
            .map_err(|err| format!("scaling failed: {err}"))?;

        #[allow(clippy::cast_precision_loss)]
        let pts = decoded
            .timestamp()
            .and_then(|ts| Duration::try_from_secs_f64(ts as f64 * self.time_base).ok())
            .unwrap_or_default();

        let image = RawImage::from_rgba(rgba.width(), rgba.height(), packed_rows(&rgba));
        Ok((pts, image))
    }
}

/// Copies plane 0 of an RGBA frame without its row padding.
fn packed_rows(frame: &frame::Video) -> Vec<u8> {
    let row_len = frame.width() as usize * 4;
    let height = frame.height() as usize;
    let stride = frame.stride(0).max(row_len);

    let mut bytes = Vec::with_capacity(row_len * height);
    for row in frame.data(0).chunks(stride).take(height) {
        bytes.extend_from_slice(&row[..row_len]);
    }
    bytes
}

/// Sleeps until `pts` is due, measured from the first frame of the run.
fn pace(clock: &mut Option<(Instant, Duration)>, pts: Duration) {
    let (started, first_pts) = *clock.get_or_insert_with(|| (Instant::now(), pts));
    if let Some(due) = started.checked_add(pts.saturating_sub(first_pts)) {
        let now = Instant::now();
        if due > now {
            std::thread::sleep(due - now);
        }
    }
}

/// Body of the blocking decoder task.
///
/// Returns `Ok` when the player goes away and `Err` on a decoding failure.
fn decode_loop(
    path: &Path,
    native: Dimensions,
    mut commands: mpsc::UnboundedReceiver<DecoderCommand>,
    events: &mpsc::Sender<DecoderEvent>,
) -> Result<(), String> {
    let mut reader = FrameReader::open(path, native)?;

    let mut playing = false;
    let mut drained = false;
    let mut generation = 0;
    let mut clock = None;

    loop {
        loop {
            match commands.try_recv() {
                Ok(DecoderCommand::Play) => {
                    playing = true;
                    clock = None;
                }
                Ok(DecoderCommand::Pause) => {
                    playing = false;
                    clock = None;
                }
                Ok(DecoderCommand::Seek {
                    target,
                    generation: next,
                }) => {
                    reader.seek(target)?;
                    generation = next;
                    drained = false;
                    clock = None;
                }
                Ok(DecoderCommand::Stop) | Err(TryRecvError::Disconnected) => return Ok(()),
                Err(TryRecvError::Empty) => break,
            }
        }

        if !playing || drained {
            std::thread::sleep(IDLE_POLL);
            continue;
        }

        let event = match reader.next_frame()? {
            Some((pts, image)) => {
                pace(&mut clock, pts);
                DecoderEvent::Frame {
                    generation,
                    pts,
                    image,
                }
            }
            None => {
                drained = true;
                DecoderEvent::EndOfStream { generation }
            }
        };

        if events.blocking_send(event).is_err() {
            return Ok(());
        }
    }
}
