use crate::foundation::core::{AnchorRect, Canvas};
use crate::foundation::error::{PartycamError, PartycamResult};
use crate::raster::buffer::PixelBuffer;
use crate::raster::resize::resize;

/// How an overlay is sized and positioned relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizePolicy {
    /// Anchor size times `factor` (floored), centered on the anchor.
    Scaled {
        /// Multiplier applied to both anchor dimensions.
        factor: f64,
    },
    /// Anchor width by half the anchor height, sitting directly above the anchor's top edge.
    Above,
    /// Absolute rectangle; the anchor is ignored.
    At(AnchorRect),
}

/// Destination geometry for one overlay, already clamped to the frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Size the policy asked for, after the frame-extent clamp but before edge clipping.
    pub target: (u32, u32),
    /// Final destination rectangle; always inside the frame and never empty.
    pub region: AnchorRect,
}

impl Placement {
    /// Whether edge clipping shrank the overlay below its requested size.
    pub fn was_clipped(&self) -> bool {
        self.target != (self.region.width, self.region.height)
    }
}

/// Overlay pixels resized to exactly match their destination region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementResult {
    pub region: AnchorRect,
    pub overlay: PixelBuffer,
}

/// Per-axis geometry before it is turned into a rectangle.
struct Axis {
    target: i64,
    origin: i64,
    extent: i64,
}

/// Resolve one axis: `scaled` is the policy's size, `reference` the origin the frame clamp is
/// measured from, `anchor` the extent the overlay is centered over.
///
/// The centering offset comes from the clamped target. When the clamp shrank the target below
/// `anchor` the offset is floored at 0, so the overlay keeps its near edge on the reference.
fn resolve_axis(scaled: i64, reference: i64, anchor: i64, frame: i64) -> Axis {
    let target = scaled.min(frame - reference);
    let offset = (target - anchor) / 2;
    let offset = if target < scaled { offset.max(0) } else { offset };
    let origin = (reference - offset).max(0);
    let end = (origin + target).min(frame);
    Axis {
        target,
        origin,
        extent: end - origin,
    }
}

/// Compute where an overlay goes. `Ok(None)` means the placement collapsed (fully off-frame or
/// zero-sized) and the anchor should be skipped.
pub fn resolve_placement(
    anchor: AnchorRect,
    frame: Canvas,
    policy: SizePolicy,
) -> PartycamResult<Option<Placement>> {
    let (ax, ay) = (i64::from(anchor.x), i64::from(anchor.y));
    let (aw, ah) = (i64::from(anchor.width), i64::from(anchor.height));
    let (fw, fh) = (i64::from(frame.width), i64::from(frame.height));

    let (x, y) = match policy {
        SizePolicy::Scaled { factor } => {
            if !factor.is_finite() || factor < 0.0 {
                return Err(PartycamError::validation(format!(
                    "scale factor must be finite and >= 0, got {factor}"
                )));
            }
            let sw = (aw as f64 * factor).floor() as i64;
            let sh = (ah as f64 * factor).floor() as i64;
            (resolve_axis(sw, ax, aw, fw), resolve_axis(sh, ay, ah, fh))
        }
        SizePolicy::Above => {
            let lift = ah / 2;
            let top = (ay - lift).max(0);
            (
                resolve_axis(aw, ax, aw, fw),
                resolve_axis(lift, top, lift, fh),
            )
        }
        SizePolicy::At(rect) => {
            let (rx, ry) = (i64::from(rect.x), i64::from(rect.y));
            (
                resolve_axis(i64::from(rect.width), rx, i64::from(rect.width), fw),
                resolve_axis(i64::from(rect.height), ry, i64::from(rect.height), fh),
            )
        }
    };

    if x.extent <= 0 || y.extent <= 0 || x.target <= 0 || y.target <= 0 {
        return Ok(None);
    }

    // All four values are within [0, frame] here, so the narrowing casts are lossless.
    Ok(Some(Placement {
        target: (x.target as u32, y.target as u32),
        region: AnchorRect::new(
            x.origin as u32,
            y.origin as u32,
            x.extent as u32,
            y.extent as u32,
        ),
    }))
}

/// Resolve a placement and resize `asset` to the resulting region.
pub fn place_overlay(
    asset: &PixelBuffer,
    anchor: AnchorRect,
    frame: Canvas,
    policy: SizePolicy,
) -> PartycamResult<Option<PlacementResult>> {
    let Some(placement) = resolve_placement(anchor, frame, policy)? else {
        tracing::debug!(?anchor, ?policy, "placement collapsed, skipping anchor");
        return Ok(None);
    };
    if placement.was_clipped() {
        tracing::debug!(
            target_size = ?placement.target,
            region = ?placement.region,
            "overlay clipped at frame edge"
        );
    }

    let region = placement.region;
    let overlay = resize(asset, region.width, region.height)?;
    Ok(Some(PlacementResult { region, overlay }))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/placement.rs"]
mod tests;
