//! partycam is the compositing core of a webcam word-guessing party game.
//!
//! Every visual effect in the game is the same three steps applied to a live video frame:
//!
//! 1. **Place**: turn a detected face rectangle (`AnchorRect`) into a destination region, scaled,
//!    centered and clipped to the frame ([`resolve_placement`]).
//! 2. **Fit**: resize the overlay image to exactly that region ([`resize`]).
//! 3. **Blend**: composite it into the frame in place, either as a hard bitwise cutout or as a
//!    straight-alpha blend with an optional global fade ([`composite_at`]).
//!
//! On top of that sit four stateless drivers (speech bubble, crown, corner fireworks, cross-fade)
//! and a [`GameSession`] that a host video loop drives one frame at a time.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No global state**: buffers and geometry are explicit arguments; the frame is borrowed
//!   mutably for a single call and never retained.
//! - **Fail loudly on broken invariants**: mismatched sizes and out-of-bounds regions are errors,
//!   never silent pixel corruption. A frame is only written once every check has passed.
//! - **8-bit R,G,B[,A]** everywhere, straight (non-premultiplied) alpha.
#![forbid(unsafe_code)]

mod assets;
mod compose;
mod config;
mod detect;
mod effects;
mod foundation;
mod game;
mod raster;
mod session;

pub use assets::overlay::{
    OverlayAsset, OverlaySet, decode_backdrop, decode_overlay, load_backdrop, load_overlay,
};
pub use compose::blend::{
    BlendMode, composite_at, crossfade_in_place, lerp_px, linear_blend_in_place,
    mask_blend_in_place, mask_px,
};
pub use compose::placement::{
    Placement, PlacementResult, SizePolicy, place_overlay, resolve_placement,
};
pub use config::{AssetPaths, GameConfig};
pub use detect::{FaceDetector, StaticDetector};
pub use effects::crown::CrownEffect;
pub use effects::driver::{EffectStats, FrameContext, FrameEffect};
pub use effects::fireworks::{FireworksEffect, corner_slots};
pub use effects::sticker::StickerEffect;
pub use effects::transition::{CrossFade, TextOverlay, caption_origin};
pub use foundation::core::{AnchorRect, Canvas};
pub use foundation::error::{PartycamError, PartycamResult};
pub use game::word::{GuessOutcome, RoundState, WordGame, pick_word};
pub use raster::buffer::{Channels, PixelBuffer};
pub use raster::resize::resize;
pub use session::{FrameReport, GameSession};
