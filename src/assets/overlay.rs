use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::config::AssetPaths;
use crate::foundation::error::{PartycamError, PartycamResult};
use crate::raster::buffer::PixelBuffer;

/// Immutable RGBA image shared by every frame that draws it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayAsset {
    pixels: Arc<PixelBuffer>,
}

impl OverlayAsset {
    /// Wrap an existing buffer; it must carry an alpha channel.
    pub fn new(pixels: PixelBuffer) -> PartycamResult<Self> {
        if !pixels.channels().has_alpha() {
            return Err(PartycamError::no_alpha(
                "overlay assets must carry an alpha channel",
            ));
        }
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(PartycamError::invalid_dimensions("overlay asset is empty"));
        }
        Ok(Self {
            pixels: Arc::new(pixels),
        })
    }
}

impl Deref for OverlayAsset {
    type Target = PixelBuffer;

    fn deref(&self) -> &PixelBuffer {
        &self.pixels
    }
}

/// Decode an in-memory image as an overlay. Images without alpha are rejected.
pub fn decode_overlay(bytes: &[u8]) -> PartycamResult<OverlayAsset> {
    let img = image::load_from_memory(bytes)
        .context("decode overlay from memory")
        .map_err(|e| PartycamError::asset(format!("{e:#}")))?;
    if !img.color().has_alpha() {
        return Err(PartycamError::no_alpha(format!(
            "overlay image is {:?}, expected a format with alpha",
            img.color()
        )));
    }
    OverlayAsset::new(PixelBuffer::from_dynamic(&img))
}

/// Load an overlay from disk. Failure here is fatal for the caller's setup.
pub fn load_overlay(path: &Path) -> PartycamResult<OverlayAsset> {
    let bytes = read_asset(path)?;
    let asset = decode_overlay(&bytes).map_err(|e| match e {
        PartycamError::NoAlphaChannel(msg) => {
            PartycamError::no_alpha(format!("'{}': {msg}", path.display()))
        }
        other => PartycamError::asset(format!("'{}': {other}", path.display())),
    })?;
    tracing::debug!(
        path = %path.display(),
        width = asset.width(),
        height = asset.height(),
        "loaded overlay"
    );
    Ok(asset)
}

/// Decode an opaque backdrop (alpha, if any, is dropped).
pub fn decode_backdrop(bytes: &[u8]) -> PartycamResult<Arc<PixelBuffer>> {
    let img = image::load_from_memory(bytes)
        .context("decode backdrop from memory")
        .map_err(|e| PartycamError::asset(format!("{e:#}")))?;
    Ok(Arc::new(PixelBuffer::from_dynamic(&img).to_rgb()))
}

pub fn load_backdrop(path: &Path) -> PartycamResult<Arc<PixelBuffer>> {
    let bytes = read_asset(path)?;
    decode_backdrop(&bytes)
        .map_err(|e| PartycamError::asset(format!("'{}': {e}", path.display())))
}

fn read_asset(path: &Path) -> PartycamResult<Vec<u8>> {
    std::fs::read(path)
        .with_context(|| format!("read asset '{}'", path.display()))
        .map_err(|e| PartycamError::asset(format!("{e:#}")))
}

/// Every image the game draws, loaded once at startup.
#[derive(Clone, Debug)]
pub struct OverlaySet {
    pub bubble: OverlayAsset,
    pub crown: OverlayAsset,
    pub firework: OverlayAsset,
    pub game_over: Arc<PixelBuffer>,
}

impl OverlaySet {
    /// Load all assets, resolving relative paths against `root`.
    pub fn load(paths: &AssetPaths, root: &Path) -> PartycamResult<Self> {
        Ok(Self {
            bubble: load_overlay(&root.join(&paths.bubble))?,
            crown: load_overlay(&root.join(&paths.crown))?,
            firework: load_overlay(&root.join(&paths.firework))?,
            game_over: load_backdrop(&root.join(&paths.game_over))?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/overlay.rs"]
mod tests;
