use crate::assets::overlay::OverlayAsset;
use crate::compose::blend::BlendMode;
use crate::compose::placement::SizePolicy;
use crate::effects::driver::{EffectStats, FrameContext, FrameEffect, composite_anchors};
use crate::foundation::core::AnchorRect;
use crate::foundation::error::PartycamResult;
use crate::raster::buffer::PixelBuffer;

/// Crown drawn on top of a face: anchor-wide, half the anchor tall, smoothly blended.
#[derive(Clone, Debug)]
pub struct CrownEffect {
    asset: OverlayAsset,
}

impl CrownEffect {
    pub fn new(asset: OverlayAsset) -> Self {
        Self { asset }
    }

    #[tracing::instrument(skip(self, frame), fields(faces = anchors.len()))]
    pub fn crown_faces(
        &self,
        frame: &mut PixelBuffer,
        anchors: &[AnchorRect],
    ) -> PartycamResult<EffectStats> {
        composite_anchors(
            frame,
            &self.asset,
            anchors,
            |_| SizePolicy::Above,
            BlendMode::OPAQUE,
        )
    }
}

impl FrameEffect for CrownEffect {
    fn name(&self) -> &'static str {
        "crown"
    }

    fn apply(
        &self,
        frame: &mut PixelBuffer,
        ctx: &FrameContext<'_>,
    ) -> PartycamResult<EffectStats> {
        self.crown_faces(frame, ctx.anchors)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/crown.rs"]
mod tests;
