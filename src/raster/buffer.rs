use crate::foundation::core::{AnchorRect, Canvas};
use crate::foundation::error::{PartycamError, PartycamResult};

/// Interleaved channel layout of a [`PixelBuffer`].
///
/// Colour channels are always stored R,G,B with alpha last; every buffer that takes part in one
/// compositing call must share that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channels {
    /// Single channel (alpha masks).
    Gray,
    /// Opaque colour.
    Rgb,
    /// Colour plus straight (non-premultiplied) alpha.
    Rgba,
}

impl Channels {
    /// Bytes per pixel.
    pub fn count(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }

    pub fn from_count(n: usize) -> PartycamResult<Self> {
        match n {
            1 => Ok(Self::Gray),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            other => Err(PartycamError::validation(format!(
                "unsupported channel count {other}"
            ))),
        }
    }
}

/// Row-major 8-bit pixel grid.
///
/// Invariant: `data.len() == width * height * channels.count()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Zero-filled buffer.
    pub fn new(width: u32, height: u32, channels: Channels) -> Self {
        let len = width as usize * height as usize * channels.count();
        Self {
            width,
            height,
            channels,
            data: vec![0; len],
        }
    }

    /// Buffer where every pixel equals `px` (`px.len()` picks the channel layout).
    pub fn filled(width: u32, height: u32, px: &[u8]) -> PartycamResult<Self> {
        let channels = Channels::from_count(px.len())?;
        let data = px.repeat(width as usize * height as usize);
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Wrap raw interleaved bytes, checking the length invariant.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: Channels,
        data: Vec<u8>,
    ) -> PartycamResult<Self> {
        let expected = width as usize * height as usize * channels.count();
        if data.len() != expected {
            return Err(PartycamError::validation(format!(
                "pixel data has {} bytes, expected {expected} for {width}x{height}x{}",
                data.len(),
                channels.count()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels.count()
    }

    pub fn same_size(&self, other: &PixelBuffer) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Bytes of the pixel at `(x, y)`, or `None` outside the grid.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let n = self.channels.count();
        let i = y as usize * self.stride() + x as usize * n;
        Some(&self.data[i..i + n])
    }

    /// Copy of the sub-rectangle `[x, x+w) × [y, y+h)`.
    pub fn extract_region(&self, x: u32, y: u32, w: u32, h: u32) -> PartycamResult<PixelBuffer> {
        let rect = AnchorRect::new(x, y, w, h);
        if !rect.fits_in(self.canvas()) {
            return Err(PartycamError::out_of_bounds(format!(
                "region ({x},{y}) {w}x{h} exceeds {}x{} buffer",
                self.width, self.height
            )));
        }

        if rect.is_empty() {
            return Ok(PixelBuffer::new(w, h, self.channels));
        }

        let n = self.channels.count();
        let row_bytes = w as usize * n;
        let mut data = Vec::with_capacity(row_bytes * h as usize);
        for row in self.data.chunks_exact(self.stride()).skip(y as usize).take(h as usize) {
            let start = x as usize * n;
            data.extend_from_slice(&row[start..start + row_bytes]);
        }
        Ok(PixelBuffer {
            width: w,
            height: h,
            channels: self.channels,
            data,
        })
    }

    /// Overwrite the sub-rectangle starting at `(x, y)` with `source`.
    pub fn write_region(&mut self, x: u32, y: u32, source: &PixelBuffer) -> PartycamResult<()> {
        if source.channels != self.channels {
            return Err(PartycamError::channel_mismatch(format!(
                "cannot write {:?} pixels into {:?} buffer",
                source.channels, self.channels
            )));
        }
        let rect = AnchorRect::new(x, y, source.width, source.height);
        if !rect.fits_in(self.canvas()) {
            return Err(PartycamError::out_of_bounds(format!(
                "source {}x{} at ({x},{y}) exceeds {}x{} buffer",
                source.width, source.height, self.width, self.height
            )));
        }
        if source.data.is_empty() {
            return Ok(());
        }

        let n = self.channels.count();
        let stride = self.stride();
        let start = x as usize * n;
        for (dst_row, src_row) in self
            .data
            .chunks_exact_mut(stride)
            .skip(y as usize)
            .zip(source.data.chunks_exact(source.stride()))
        {
            dst_row[start..start + src_row.len()].copy_from_slice(src_row);
        }
        Ok(())
    }

    /// Split an RGBA buffer into its colour planes and its alpha mask.
    pub fn split_alpha(&self) -> PartycamResult<(PixelBuffer, PixelBuffer)> {
        if self.channels != Channels::Rgba {
            return Err(PartycamError::no_alpha(format!(
                "split_alpha expects rgba, got {:?}",
                self.channels
            )));
        }
        let pixels = self.width as usize * self.height as usize;
        let mut rgb = Vec::with_capacity(pixels * 3);
        let mut alpha = Vec::with_capacity(pixels);
        for px in self.data.chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
            alpha.push(px[3]);
        }
        Ok((
            PixelBuffer {
                width: self.width,
                height: self.height,
                channels: Channels::Rgb,
                data: rgb,
            },
            PixelBuffer {
                width: self.width,
                height: self.height,
                channels: Channels::Gray,
                data: alpha,
            },
        ))
    }

    /// Inverse of [`PixelBuffer::split_alpha`].
    pub fn merge_alpha(rgb: &PixelBuffer, alpha: &PixelBuffer) -> PartycamResult<PixelBuffer> {
        if rgb.channels != Channels::Rgb || alpha.channels != Channels::Gray {
            return Err(PartycamError::channel_mismatch(
                "merge_alpha expects an rgb buffer and a gray mask",
            ));
        }
        if !rgb.same_size(alpha) {
            return Err(PartycamError::dimension_mismatch(format!(
                "rgb {}x{} vs alpha {}x{}",
                rgb.width, rgb.height, alpha.width, alpha.height
            )));
        }
        let mut data = Vec::with_capacity(alpha.data.len() * 4);
        for (px, &a) in rgb.data.chunks_exact(3).zip(&alpha.data) {
            data.extend_from_slice(px);
            data.push(a);
        }
        Ok(PixelBuffer {
            width: rgb.width,
            height: rgb.height,
            channels: Channels::Rgba,
            data,
        })
    }

    /// Opaque copy: drops alpha, or replicates a gray plane into three channels.
    pub fn to_rgb(&self) -> PixelBuffer {
        let data = match self.channels {
            Channels::Rgb => self.data.clone(),
            Channels::Rgba => self
                .data
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
            Channels::Gray => self.data.iter().flat_map(|&v| [v, v, v]).collect(),
        };
        PixelBuffer {
            width: self.width,
            height: self.height,
            channels: Channels::Rgb,
            data,
        }
    }

    /// Convert from a decoded image, keeping alpha only when the source carries it.
    pub fn from_dynamic(img: &image::DynamicImage) -> PixelBuffer {
        let (width, height) = (img.width(), img.height());
        let color = img.color();
        if color.has_alpha() {
            PixelBuffer {
                width,
                height,
                channels: Channels::Rgba,
                data: img.to_rgba8().into_raw(),
            }
        } else if color.has_color() {
            PixelBuffer {
                width,
                height,
                channels: Channels::Rgb,
                data: img.to_rgb8().into_raw(),
            }
        } else {
            PixelBuffer {
                width,
                height,
                channels: Channels::Gray,
                data: img.to_luma8().into_raw(),
            }
        }
    }

    /// Convert into the matching `image` buffer type.
    pub fn to_dynamic(&self) -> PartycamResult<image::DynamicImage> {
        let raw = self.data.clone();
        let err = || PartycamError::validation("pixel buffer does not match image dimensions");
        Ok(match self.channels {
            Channels::Gray => image::DynamicImage::ImageLuma8(
                image::GrayImage::from_raw(self.width, self.height, raw).ok_or_else(err)?,
            ),
            Channels::Rgb => image::DynamicImage::ImageRgb8(
                image::RgbImage::from_raw(self.width, self.height, raw).ok_or_else(err)?,
            ),
            Channels::Rgba => image::DynamicImage::ImageRgba8(
                image::RgbaImage::from_raw(self.width, self.height, raw).ok_or_else(err)?,
            ),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
