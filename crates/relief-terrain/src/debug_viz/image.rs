//! RGBA pixel buffer for debug renders.

/// One RGBA pixel.
pub type Rgba = [u8; 4];

/// Errors produced while PNG-encoding a [`DebugImage`].
#[derive(Debug, thiserror::Error)]
pub enum ImageEncodeError {
    #[error("png encoder failed: {0}")]
    Png(#[from] png::EncodingError),
}

/// Row-major RGBA image, one pixel per grid vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DebugImage {
    /// Transparent black image of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 4;
        Self {
            width,
            height,
            pixels: vec![0; len],
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Overwrite pixel `(x, y)`. Panics outside the image.
    pub fn put(&mut self, x: u32, y: u32, rgba: Rgba) {
        let at = self.offset(x, y);
        self.pixels[at..at + 4].copy_from_slice(&rgba);
    }

    /// Pixel `(x, y)`. Panics outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let at = self.offset(x, y);
        [
            self.pixels[at],
            self.pixels[at + 1],
            self.pixels[at + 2],
            self.pixels[at + 3],
        ]
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA bytes, `width * height * 4` long.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Encode as an 8-bit RGBA PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, ImageEncodeError> {
        let mut out = Vec::new();
        let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.pixels)?;
        writer.finish()?;
        Ok(out)
    }
}
