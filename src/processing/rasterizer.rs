//! SVG → PNG rasterization backends.
//!
//! The transcoder only talks to the [`Rasterizer`] trait; [`ResvgRasterizer`]
//! is the production implementation built on `resvg`/`tiny-skia`.

use std::io::{Read, Write};
use std::path::PathBuf;

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use tracing::debug;

use crate::utils::RasterError;

/// Converts an SVG stream into a PNG stream.
pub trait Rasterizer {
    /// Reads an SVG document from `input` and writes a PNG `width` pixels wide
    /// (truncated toward zero) to `output`, keeping the document's aspect ratio.
    fn rasterize(
        &self,
        input: &mut dyn Read,
        output: &mut dyn Write,
        width: f32,
    ) -> Result<(), RasterError>;
}

/// Rasterizer backed by `resvg`.
pub struct ResvgRasterizer {
    options: Options<'static>,
}

impl ResvgRasterizer {
    /// Creates a rasterizer with system fonts loaded for `<text>` elements.
    pub fn new() -> Self {
        let mut options = Options::default();
        options.fontdb_mut().load_system_fonts();
        debug!("resvg initialized ({} font faces)", options.fontdb.len());
        Self { options }
    }

    /// Resolves relative `href`s in documents against `dir`.
    pub fn with_resources_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.resources_dir = Some(dir.into());
        self
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for ResvgRasterizer {
    fn rasterize(
        &self,
        input: &mut dyn Read,
        output: &mut dyn Write,
        width: f32,
    ) -> Result<(), RasterError> {
        let mut data = Vec::new();
        input.read_to_end(&mut data).map_err(RasterError::Read)?;

        let tree = Tree::from_data(&data, &self.options)?;
        let size = tree.size();
        let scale = width / size.width();
        let height = size.height() * scale;

        // Width truncates like the float hint does; height only needs to cover the drawing.
        let pixel_width = width as u32;
        let pixel_height = (height.round() as u32).max(1);

        let mut pixmap = Pixmap::new(pixel_width, pixel_height)
            .ok_or(RasterError::InvalidSize { width, height })?;
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

        let png = pixmap
            .encode_png()
            .map_err(|e| RasterError::Encode(e.to_string()))?;
        output.write_all(&png).map_err(RasterError::Write)
    }
}
