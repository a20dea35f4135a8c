use rayon::prelude::*;

use crate::foundation::core::AnchorRect;
use crate::foundation::error::{PartycamError, PartycamResult};
use crate::raster::buffer::{Channels, PixelBuffer};

/// How an overlay's alpha channel is applied to the frame underneath it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlendMode {
    /// Bitwise cutout: `(B & !A) + (F & A)`, saturating. Hard-edged.
    Mask,
    /// `a·F + (1 − a)·B` with `a = A/255 · opacity`.
    Linear {
        /// Global scalar in `[0, 1]` applied on top of per-pixel alpha.
        opacity: f32,
    },
}

impl BlendMode {
    /// Linear blend at full strength.
    pub const OPAQUE: Self = Self::Linear { opacity: 1.0 };
}

/// One channel of the bitwise mask blend.
pub fn mask_px(bg: u8, fg: u8, mask: u8) -> u8 {
    (bg & !mask).saturating_add(fg & mask)
}

/// One channel of the linear blend with an already-normalised alpha in `[0, 1]`.
pub fn lerp_px(bg: u8, fg: u8, a: f32) -> u8 {
    let v = a * f32::from(fg) + (1.0 - a) * f32::from(bg);
    v.round().clamp(0.0, 255.0) as u8
}

fn check_opacity(t: f32) -> PartycamResult<f32> {
    if !t.is_finite() {
        return Err(PartycamError::validation("blend opacity must be finite"));
    }
    Ok(t.clamp(0.0, 1.0))
}

/// Shared preconditions for the per-pixel blends. Nothing is mutated until these pass.
fn check_operands(bg: &PixelBuffer, fg: &PixelBuffer, alpha: &PixelBuffer) -> PartycamResult<()> {
    if !bg.same_size(fg) || !bg.same_size(alpha) {
        return Err(PartycamError::dimension_mismatch(format!(
            "background {}x{}, foreground {}x{}, alpha {}x{}",
            bg.width(),
            bg.height(),
            fg.width(),
            fg.height(),
            alpha.width(),
            alpha.height()
        )));
    }
    if bg.channels() == Channels::Gray {
        return Err(PartycamError::channel_mismatch(
            "background must carry colour channels",
        ));
    }
    if fg.channels() != Channels::Rgb {
        return Err(PartycamError::channel_mismatch(format!(
            "foreground must be rgb, got {:?}",
            fg.channels()
        )));
    }
    if alpha.channels() != Channels::Gray {
        return Err(PartycamError::channel_mismatch(format!(
            "alpha must be a single-channel mask, got {:?}",
            alpha.channels()
        )));
    }
    Ok(())
}

/// Hard-edged cutout of `fg` into `bg`, with `mask` broadcast to the three colour channels.
///
/// A background alpha channel, if present, is left untouched.
pub fn mask_blend_in_place(
    bg: &mut PixelBuffer,
    fg: &PixelBuffer,
    mask: &PixelBuffer,
) -> PartycamResult<()> {
    check_operands(bg, fg, mask)?;
    let n = bg.channels().count();
    for ((b, f), &m) in bg
        .data_mut()
        .chunks_exact_mut(n)
        .zip(fg.data().chunks_exact(3))
        .zip(mask.data())
    {
        for c in 0..3 {
            b[c] = mask_px(b[c], f[c], m);
        }
    }
    Ok(())
}

/// Straight-alpha blend of `fg` over `bg`, scaled by the global `opacity`.
pub fn linear_blend_in_place(
    bg: &mut PixelBuffer,
    fg: &PixelBuffer,
    alpha: &PixelBuffer,
    opacity: f32,
) -> PartycamResult<()> {
    check_operands(bg, fg, alpha)?;
    let opacity = check_opacity(opacity)?;
    if opacity <= 0.0 {
        return Ok(());
    }

    let n = bg.channels().count();
    for ((b, f), &a) in bg
        .data_mut()
        .chunks_exact_mut(n)
        .zip(fg.data().chunks_exact(3))
        .zip(alpha.data())
    {
        if a == 0 {
            continue;
        }
        let a = f32::from(a) / 255.0 * opacity;
        for c in 0..3 {
            b[c] = lerp_px(b[c], f[c], a);
        }
    }
    Ok(())
}

/// Blend an RGBA `overlay` into `frame` at `region`.
///
/// The overlay must already be exactly `region`-sized and the region must lie inside the frame;
/// both are guaranteed by the placement step and reported as errors otherwise. On error the frame
/// is left unchanged.
pub fn composite_at(
    frame: &mut PixelBuffer,
    region: AnchorRect,
    overlay: &PixelBuffer,
    mode: BlendMode,
) -> PartycamResult<()> {
    if overlay.width() != region.width || overlay.height() != region.height {
        return Err(PartycamError::dimension_mismatch(format!(
            "overlay {}x{} does not match region {}x{}",
            overlay.width(),
            overlay.height(),
            region.width,
            region.height
        )));
    }
    let (rgb, alpha) = overlay.split_alpha()?;
    let mut roi = frame.extract_region(region.x, region.y, region.width, region.height)?;

    match mode {
        BlendMode::Mask => mask_blend_in_place(&mut roi, &rgb, &alpha)?,
        BlendMode::Linear { opacity } => linear_blend_in_place(&mut roi, &rgb, &alpha, opacity)?,
    }
    frame.write_region(region.x, region.y, &roi)
}

/// Whole-frame cross-fade: `frame = (1 − t)·frame + t·target`, rows processed in parallel.
pub fn crossfade_in_place(
    frame: &mut PixelBuffer,
    target: &PixelBuffer,
    t: f32,
) -> PartycamResult<()> {
    if !frame.same_size(target) {
        return Err(PartycamError::dimension_mismatch(format!(
            "crossfade frame {}x{} vs target {}x{}",
            frame.width(),
            frame.height(),
            target.width(),
            target.height()
        )));
    }
    if frame.channels() != target.channels() {
        return Err(PartycamError::channel_mismatch(format!(
            "crossfade frame {:?} vs target {:?}",
            frame.channels(),
            target.channels()
        )));
    }
    let t = check_opacity(t)?;
    let stride = frame.stride();
    if stride == 0 || t <= 0.0 {
        return Ok(());
    }

    frame
        .data_mut()
        .par_chunks_exact_mut(stride)
        .zip(target.data().par_chunks_exact(stride))
        .for_each(|(dst, src)| {
            for (d, &s) in dst.iter_mut().zip(src) {
                *d = lerp_px(*d, s, t);
            }
        });
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compose/blend.rs"]
mod tests;
