use std::borrow::Cow;

use crate::assets::overlay::OverlayAsset;
use crate::compose::blend::{BlendMode, composite_at};
use crate::compose::placement::{SizePolicy, resolve_placement};
use crate::effects::driver::{EffectStats, FrameContext, FrameEffect, ramp};
use crate::foundation::core::{AnchorRect, Canvas};
use crate::foundation::error::PartycamResult;
use crate::raster::buffer::PixelBuffer;
use crate::raster::resize::resize;

/// Quarter-size bursts in all four corners, fading in as the celebration runs.
#[derive(Clone, Debug)]
pub struct FireworksEffect {
    asset: OverlayAsset,
}

/// Top-left, top-right, bottom-left, bottom-right boxes of size `burst` inside `frame`.
pub fn corner_slots(frame: Canvas, burst: Canvas) -> [AnchorRect; 4] {
    let right = frame.width.saturating_sub(burst.width);
    let bottom = frame.height.saturating_sub(burst.height);
    let (w, h) = (burst.width, burst.height);
    [
        AnchorRect::new(0, 0, w, h),
        AnchorRect::new(right, 0, w, h),
        AnchorRect::new(0, bottom, w, h),
        AnchorRect::new(right, bottom, w, h),
    ]
}

impl FireworksEffect {
    pub fn new(asset: OverlayAsset) -> Self {
        Self { asset }
    }

    /// Draw frame `step` of a `total_steps`-long ramp (opacity `step / total_steps`).
    #[tracing::instrument(skip(self, frame))]
    pub fn burst(
        &self,
        frame: &mut PixelBuffer,
        step: u32,
        total_steps: u32,
    ) -> PartycamResult<EffectStats> {
        let opacity = ramp(step, total_steps)?;
        let canvas = frame.canvas();
        let burst = canvas.quarter();
        if burst.is_empty() {
            return Ok(EffectStats {
                composited: 0,
                skipped: 4,
            });
        }

        let overlay = resize(&self.asset, burst.width, burst.height)?;
        let mut stats = EffectStats::default();
        for slot in corner_slots(canvas, burst) {
            let Some(p) = resolve_placement(slot, canvas, SizePolicy::At(slot))? else {
                stats.skipped += 1;
                continue;
            };
            let fitted = if p.was_clipped() {
                Cow::Owned(resize(&self.asset, p.region.width, p.region.height)?)
            } else {
                Cow::Borrowed(&overlay)
            };
            composite_at(frame, p.region, &fitted, BlendMode::Linear { opacity })?;
            stats.composited += 1;
        }
        Ok(stats)
    }
}

impl FrameEffect for FireworksEffect {
    fn name(&self) -> &'static str {
        "fireworks"
    }

    fn apply(
        &self,
        frame: &mut PixelBuffer,
        ctx: &FrameContext<'_>,
    ) -> PartycamResult<EffectStats> {
        self.burst(frame, ctx.step, ctx.total_steps)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fireworks.rs"]
mod tests;
