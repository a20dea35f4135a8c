use crate::compose::blend::{BlendMode, composite_at};
use crate::compose::placement::{SizePolicy, place_overlay};
use crate::foundation::core::AnchorRect;
use crate::foundation::error::{PartycamError, PartycamResult};
use crate::raster::buffer::PixelBuffer;

/// Per-frame inputs shared by every effect driver.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameContext<'a> {
    /// Detector output for this frame.
    pub anchors: &'a [AnchorRect],
    /// Wrong guesses so far.
    pub mistakes: u32,
    /// Position in the running animation.
    pub step: u32,
    /// Length of the running animation; must be > 0 for animated effects.
    pub total_steps: u32,
}

impl FrameContext<'_> {
    /// `step / total_steps`, clamped to `[0, 1]`.
    pub fn progress(&self) -> PartycamResult<f32> {
        ramp(self.step, self.total_steps)
    }
}

pub(crate) fn ramp(step: u32, total_steps: u32) -> PartycamResult<f32> {
    if total_steps == 0 {
        return Err(PartycamError::validation("animation total_steps must be > 0"));
    }
    Ok((step as f32 / total_steps as f32).clamp(0.0, 1.0))
}

/// What one driver call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectStats {
    /// Overlays blended into the frame.
    pub composited: usize,
    /// Anchors dropped because their placement collapsed.
    pub skipped: usize,
}

impl EffectStats {
    pub fn merge(self, other: EffectStats) -> EffectStats {
        EffectStats {
            composited: self.composited + other.composited,
            skipped: self.skipped + other.skipped,
        }
    }
}

/// A stateless per-frame visual policy.
///
/// Drivers mutate only `frame`, and only inside the regions they composite.
pub trait FrameEffect {
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        frame: &mut PixelBuffer,
        ctx: &FrameContext<'_>,
    ) -> PartycamResult<EffectStats>;
}

/// Place and blend `asset` once per anchor. Collapsed placements are counted and skipped; any
/// other error aborts the remaining anchors.
pub(crate) fn composite_anchors(
    frame: &mut PixelBuffer,
    asset: &PixelBuffer,
    anchors: &[AnchorRect],
    policy: impl Fn(AnchorRect) -> SizePolicy,
    mode: BlendMode,
) -> PartycamResult<EffectStats> {
    let canvas = frame.canvas();
    let mut stats = EffectStats::default();
    for &anchor in anchors {
        match place_overlay(asset, anchor, canvas, policy(anchor))? {
            Some(placed) => {
                composite_at(frame, placed.region, &placed.overlay, mode)?;
                stats.composited += 1;
            }
            None => stats.skipped += 1,
        }
    }
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/driver.rs"]
mod tests;
