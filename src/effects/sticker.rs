use crate::assets::overlay::OverlayAsset;
use crate::compose::blend::BlendMode;
use crate::compose::placement::SizePolicy;
use crate::effects::driver::{EffectStats, FrameContext, FrameEffect, composite_anchors};
use crate::foundation::core::AnchorRect;
use crate::foundation::error::PartycamResult;
use crate::raster::buffer::PixelBuffer;

/// Speech bubble pasted over every detected face, growing with each wrong guess.
#[derive(Clone, Debug)]
pub struct StickerEffect {
    asset: OverlayAsset,
    growth: f64,
}

impl StickerEffect {
    pub fn new(asset: OverlayAsset, growth: f64) -> Self {
        Self { asset, growth }
    }

    /// `1 + mistakes × growth`.
    pub fn scale_for(&self, mistakes: u32) -> f64 {
        1.0 + f64::from(mistakes) * self.growth
    }

    #[tracing::instrument(skip(self, frame), fields(faces = anchors.len()))]
    pub fn overlay_faces(
        &self,
        frame: &mut PixelBuffer,
        anchors: &[AnchorRect],
        mistakes: u32,
    ) -> PartycamResult<EffectStats> {
        let factor = self.scale_for(mistakes);
        composite_anchors(
            frame,
            &self.asset,
            anchors,
            |_| SizePolicy::Scaled { factor },
            BlendMode::Mask,
        )
    }
}

impl FrameEffect for StickerEffect {
    fn name(&self) -> &'static str {
        "sticker"
    }

    fn apply(
        &self,
        frame: &mut PixelBuffer,
        ctx: &FrameContext<'_>,
    ) -> PartycamResult<EffectStats> {
        self.overlay_faces(frame, ctx.anchors, ctx.mistakes)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/sticker.rs"]
mod tests;
