//! Fakes shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;

use image::{Rgb, RgbImage};
use termcam::camera::{CameraError, Frame, FrameSource, Resolution};
use termcam::pipeline::ShutdownSignal;
use termcam::terminal::{ColorProfile, TerminalOutput};

/// Solid-color frame.
pub fn solid_frame(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
    Frame::new(RgbImage::from_pixel(width, height, Rgb(rgb)))
}

/// Replays queued frames. Once they run out it requests shutdown (if a
/// signal was given) and reports the frame as unavailable.
pub struct FakeSource {
    frames: VecDeque<Result<Frame, CameraError>>,
    shutdown: Option<ShutdownSignal>,
    pub reads: usize,
}

impl FakeSource {
    pub fn new(frames: Vec<Result<Frame, CameraError>>) -> Self {
        Self {
            frames: frames.into(),
            shutdown: None,
            reads: 0,
        }
    }

    pub fn frames(frames: Vec<Frame>) -> Self {
        Self::new(frames.into_iter().map(Ok).collect())
    }

    pub fn stop_when_empty(mut self, shutdown: &ShutdownSignal) -> Self {
        self.shutdown = Some(shutdown.clone());
        self
    }
}

impl FrameSource for FakeSource {
    fn read_frame(&mut self) -> Result<Frame, CameraError> {
        self.reads += 1;
        match self.frames.pop_front() {
            Some(next) => next,
            None => {
                if let Some(signal) = &self.shutdown {
                    signal.request();
                }
                Err(CameraError::FrameUnavailable("no more frames".to_string()))
            }
        }
    }

    fn resolution(&self) -> Resolution {
        Resolution::new(640, 480)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Write(String),
    Home,
    ClearFromCursor,
    ClearScreen,
    MoveTo(u16, u16),
    Flush,
}

/// Records every terminal call.
pub struct FakeTerminal {
    pub ops: Vec<Op>,
    pub size: Option<(u16, u16)>,
    pub profile: ColorProfile,
}

impl FakeTerminal {
    pub fn new(size: Option<(u16, u16)>) -> Self {
        Self {
            ops: Vec::new(),
            size,
            profile: ColorProfile::Ascii,
        }
    }

    /// All written text, concatenated.
    pub fn written(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Write(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text of the most recent write.
    pub fn last_write(&self) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            Op::Write(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn count(&self, wanted: &Op) -> usize {
        self.ops.iter().filter(|op| *op == wanted).count()
    }
}

impl TerminalOutput for FakeTerminal {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.ops.push(Op::Write(text.to_string()));
        Ok(())
    }

    fn move_cursor_home(&mut self) -> io::Result<()> {
        self.ops.push(Op::Home);
        Ok(())
    }

    fn clear_from_cursor(&mut self) -> io::Result<()> {
        self.ops.push(Op::ClearFromCursor);
        Ok(())
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.ops.push(Op::ClearScreen);
        Ok(())
    }

    fn move_cursor_to(&mut self, column: u16, row: u16) -> io::Result<()> {
        self.ops.push(Op::MoveTo(column, row));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.ops.push(Op::Flush);
        Ok(())
    }

    fn size(&self) -> Option<(u16, u16)> {
        self.size
    }

    fn color_profile(&self) -> ColorProfile {
        self.profile
    }
}
