//! Rasterizer doubles shared by the processing tests.

use std::io::{Read, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::processing::Rasterizer;
use crate::utils::RasterError;

/// Copies the input behind a `png:` prefix and records each width hint.
#[derive(Default)]
pub struct RecordingRasterizer {
    widths: Mutex<Vec<f32>>,
}

impl RecordingRasterizer {
    pub fn widths(&self) -> Vec<f32> {
        self.widths.lock().unwrap().clone()
    }
}

impl Rasterizer for RecordingRasterizer {
    fn rasterize(
        &self,
        input: &mut dyn Read,
        output: &mut dyn Write,
        width: f32,
    ) -> Result<(), RasterError> {
        self.widths.lock().unwrap().push(width);
        let mut data = Vec::new();
        input.read_to_end(&mut data).map_err(RasterError::Read)?;
        output.write_all(b"png:").map_err(RasterError::Write)?;
        output.write_all(&data).map_err(RasterError::Write)
    }
}

/// Fails on one call (1-based) or on every call.
pub struct FailingRasterizer {
    fail_on: Option<usize>,
    calls: AtomicUsize,
}

impl FailingRasterizer {
    pub fn always() -> Self {
        Self {
            fail_on: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn on_call(call: usize) -> Self {
        Self {
            fail_on: Some(call),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Rasterizer for FailingRasterizer {
    fn rasterize(
        &self,
        _input: &mut dyn Read,
        output: &mut dyn Write,
        _width: f32,
    ) -> Result<(), RasterError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        match self.fail_on {
            Some(n) if n != call => output.write_all(b"png").map_err(RasterError::Write),
            _ => Err(RasterError::Encode("forced failure".to_string())),
        }
    }
}
