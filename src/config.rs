use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{PartycamError, PartycamResult};

/// File locations of the game's images, relative to the config file unless absolute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub bubble: PathBuf,
    pub crown: PathBuf,
    pub firework: PathBuf,
    pub game_over: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            bubble: PathBuf::from("bubble.png"),
            crown: PathBuf::from("crown.png"),
            firework: PathBuf::from("firework.png"),
            game_over: PathBuf::from("game_over.png"),
        }
    }
}

/// Game-wide tunables, loaded from JSON. Every field has a default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub assets: AssetPaths,
    /// Candidate secret words.
    pub words: Vec<String>,
    /// Misses allowed before the round is lost.
    pub max_mistakes: u32,
    /// Bubble scale added per mistake (`1 + mistakes * growth`).
    pub sticker_growth: f64,
    /// Frames in the winning fireworks ramp.
    pub firework_steps: u32,
    /// Display pacing for the fireworks ramp; used by the host loop.
    pub firework_delay_ms: u64,
    /// Frames in the game-over cross-fade.
    pub game_over_steps: u32,
    /// Caption colour on the game-over screen.
    pub caption_rgb: [u8; 3],

    #[serde(skip)]
    root: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            assets: AssetPaths::default(),
            words: ["python", "hangman", "computer", "game"]
                .into_iter()
                .map(String::from)
                .collect(),
            max_mistakes: 6,
            sticker_growth: 0.2,
            firework_steps: 60,
            firework_delay_ms: 100,
            game_over_steps: 30,
            caption_rgb: [255, 0, 0],
            root: PathBuf::from("."),
        }
    }
}

impl GameConfig {
    /// Read and validate a JSON config; relative asset paths resolve next to the file.
    pub fn from_json_file(path: &Path) -> PartycamResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let mut cfg: GameConfig = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config '{}'", path.display()))?;
        cfg.root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> PartycamResult<Self> {
        let cfg: GameConfig = serde_json::from_str(s).context("parse config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Directory that relative asset paths are resolved against.
    pub fn asset_root(&self) -> &Path {
        &self.root
    }

    pub fn validate(&self) -> PartycamResult<()> {
        if self.words.is_empty() {
            return Err(PartycamError::validation("config 'words' must be non-empty"));
        }
        if let Some(bad) = self
            .words
            .iter()
            .find(|w| w.is_empty() || !w.chars().all(|c| c.is_ascii_alphabetic()))
        {
            return Err(PartycamError::validation(format!(
                "config word '{bad}' must be non-empty ascii letters"
            )));
        }
        if self.max_mistakes == 0 {
            return Err(PartycamError::validation("config 'max_mistakes' must be > 0"));
        }
        if !self.sticker_growth.is_finite() || self.sticker_growth < 0.0 {
            return Err(PartycamError::validation(
                "config 'sticker_growth' must be finite and >= 0",
            ));
        }
        if self.firework_steps == 0 || self.game_over_steps == 0 {
            return Err(PartycamError::validation(
                "config step counts must be > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
