use std::sync::Arc;

use crate::compose::blend::crossfade_in_place;
use crate::effects::driver::{EffectStats, FrameContext, FrameEffect, ramp};
use crate::foundation::core::Canvas;
use crate::foundation::error::{PartycamError, PartycamResult};
use crate::raster::buffer::{Channels, PixelBuffer};
use crate::raster::resize::resize;

/// Host-provided text rasterizer used for the game-over caption.
pub trait TextOverlay {
    /// Rendered `(width, height)` of `text` in pixels.
    fn measure(&self, text: &str) -> (u32, u32);

    /// Draw `text` with its baseline-left corner at `origin`.
    fn draw(
        &self,
        frame: &mut PixelBuffer,
        text: &str,
        origin: (u32, u32),
        rgb: [u8; 3],
    ) -> PartycamResult<()>;
}

/// Baseline-left origin that centers a `text_size` caption on `canvas`.
pub fn caption_origin(canvas: Canvas, text_size: (u32, u32)) -> (u32, u32) {
    let x = canvas.width.saturating_sub(text_size.0) / 2;
    let y = ((u64::from(canvas.height) + u64::from(text_size.1)) / 2).min(u64::from(canvas.height));
    (x, y as u32)
}

/// Fade from the live camera image to a fixed backdrop over `steps` frames.
#[derive(Clone, Debug)]
pub struct CrossFade {
    backdrop: Arc<PixelBuffer>,
    steps: u32,
}

impl CrossFade {
    pub fn new(backdrop: Arc<PixelBuffer>, steps: u32) -> PartycamResult<Self> {
        if steps == 0 {
            return Err(PartycamError::validation("cross-fade steps must be > 0"));
        }
        Ok(Self { backdrop, steps })
    }

    /// Backdrop resized to `frame`'s size and channel layout.
    pub fn fitted_backdrop(&self, frame: &PixelBuffer) -> PartycamResult<PixelBuffer> {
        let fitted = resize(&self.backdrop, frame.width(), frame.height())?;
        match frame.channels() {
            c if c == fitted.channels() => Ok(fitted),
            Channels::Rgb => Ok(fitted.to_rgb()),
            other => Err(PartycamError::channel_mismatch(format!(
                "cross-fade needs an rgb frame, got {other:?}"
            ))),
        }
    }

    /// Blend `frame` toward the backdrop with `t = step / steps`.
    #[tracing::instrument(skip(self, frame))]
    pub fn blend(&self, frame: &mut PixelBuffer, step: u32) -> PartycamResult<()> {
        let t = ramp(step, self.steps)?;
        let target = self.fitted_backdrop(frame)?;
        crossfade_in_place(frame, &target, t)
    }

    /// The last frame: the backdrop at `canvas` size with `caption` centered on it.
    pub fn final_frame(
        &self,
        canvas: Canvas,
        caption: &str,
        text: &dyn TextOverlay,
        rgb: [u8; 3],
    ) -> PartycamResult<PixelBuffer> {
        if canvas.is_empty() {
            return Err(PartycamError::invalid_dimensions(
                "final frame canvas must be non-empty",
            ));
        }
        let mut out = resize(&self.backdrop, canvas.width, canvas.height)?.to_rgb();
        let origin = caption_origin(canvas, text.measure(caption));
        text.draw(&mut out, caption, origin, rgb)?;
        Ok(out)
    }
}

impl FrameEffect for CrossFade {
    fn name(&self) -> &'static str {
        "crossfade"
    }

    fn apply(
        &self,
        frame: &mut PixelBuffer,
        ctx: &FrameContext<'_>,
    ) -> PartycamResult<EffectStats> {
        self.blend(frame, ctx.step)?;
        Ok(EffectStats {
            composited: 1,
            skipped: 0,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transition.rs"]
mod tests;
