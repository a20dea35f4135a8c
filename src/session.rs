use std::time::Duration;

use crate::assets::overlay::OverlaySet;
use crate::config::GameConfig;
use crate::detect::FaceDetector;
use crate::effects::crown::CrownEffect;
use crate::effects::driver::EffectStats;
use crate::effects::fireworks::FireworksEffect;
use crate::effects::sticker::StickerEffect;
use crate::effects::transition::{CrossFade, TextOverlay};
use crate::foundation::core::Canvas;
use crate::foundation::error::PartycamResult;
use crate::game::word::{GuessOutcome, WordGame, pick_word};
use crate::raster::buffer::PixelBuffer;

/// Outcome of one per-frame call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Faces the detector reported for this frame.
    pub faces: usize,
    pub stats: EffectStats,
    /// Set when an effect failed and the frame was restored to its input.
    pub recovered: Option<String>,
}

/// One running game: assets, detector and round state, driven frame by frame by the host loop.
///
/// The session owns nothing video-related; the host captures a frame, hands it in mutably,
/// and displays it afterwards.
pub struct GameSession {
    config: GameConfig,
    detector: Box<dyn FaceDetector>,
    game: WordGame,
    sticker: StickerEffect,
    crown: CrownEffect,
    fireworks: FireworksEffect,
    fade: CrossFade,
}

impl GameSession {
    /// Build a session from already loaded assets. `seed` picks the secret word.
    pub fn new(
        config: GameConfig,
        assets: OverlaySet,
        detector: Box<dyn FaceDetector>,
        seed: u64,
    ) -> PartycamResult<Self> {
        config.validate()?;
        let game = WordGame::new(pick_word(&config.words, seed)?, config.max_mistakes)?;
        let fade = CrossFade::new(assets.game_over, config.game_over_steps)?;
        Ok(Self {
            sticker: StickerEffect::new(assets.bubble, config.sticker_growth),
            crown: CrownEffect::new(assets.crown),
            fireworks: FireworksEffect::new(assets.firework),
            fade,
            game,
            detector,
            config,
        })
    }

    /// Load assets named by `config` and build a session. Asset failures are fatal.
    pub fn open(
        config: GameConfig,
        detector: Box<dyn FaceDetector>,
        seed: u64,
    ) -> PartycamResult<Self> {
        let assets = OverlaySet::load(&config.assets, config.asset_root())?;
        Self::new(config, assets, detector, seed)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn game(&self) -> &WordGame {
        &self.game
    }

    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        let outcome = self.game.guess(letter);
        tracing::debug!(%letter, ?outcome, mistakes = self.game.mistakes(), "guess");
        outcome
    }

    /// Host-side pause between fireworks frames.
    pub fn firework_delay(&self) -> Duration {
        Duration::from_millis(self.config.firework_delay_ms)
    }

    /// Regular gameplay frame: a speech bubble on every face, sized by the mistake count.
    pub fn process_frame(&self, frame: &mut PixelBuffer) -> FrameReport {
        let faces = self.detector.detect(frame);
        let mistakes = self.game.mistakes();
        guarded("sticker", faces.len(), frame, |frame| {
            self.sticker.overlay_faces(frame, &faces, mistakes)
        })
    }

    /// Celebration frame `step` of `config.firework_steps`: corner fireworks, then a crown on
    /// the first detected face.
    pub fn win_frame(&self, frame: &mut PixelBuffer, step: u32) -> FrameReport {
        let faces = self.detector.detect(frame);
        let total = self.config.firework_steps;
        guarded("win", faces.len(), frame, |frame| {
            let mut stats = self.fireworks.burst(frame, step, total)?;
            if let Some(first) = faces.first() {
                stats = stats.merge(self.crown.crown_faces(frame, std::slice::from_ref(first))?);
            }
            Ok(stats)
        })
    }

    /// Game-over transition frame `step` of `config.game_over_steps`.
    pub fn game_over_frame(&self, frame: &mut PixelBuffer, step: u32) -> FrameReport {
        guarded("game_over", 0, frame, |frame| {
            self.fade.blend(frame, step)?;
            Ok(EffectStats {
                composited: 1,
                skipped: 0,
            })
        })
    }

    /// Still image shown after the transition, captioned with the secret word.
    pub fn game_over_final(
        &self,
        canvas: Canvas,
        text: &dyn TextOverlay,
    ) -> PartycamResult<PixelBuffer> {
        self.fade.final_frame(
            canvas,
            &self.game.loss_caption(),
            text,
            self.config.caption_rgb,
        )
    }
}

/// Run one effect; on failure put the frame back the way it came in and report instead of
/// propagating, so a single bad frame never stops the video loop.
fn guarded(
    effect: &'static str,
    faces: usize,
    frame: &mut PixelBuffer,
    f: impl FnOnce(&mut PixelBuffer) -> PartycamResult<EffectStats>,
) -> FrameReport {
    let backup = frame.clone();
    match f(frame) {
        Ok(stats) => FrameReport {
            faces,
            stats,
            recovered: None,
        },
        Err(err) => {
            tracing::warn!(effect, error = %err, "effect failed, showing unmodified frame");
            *frame = backup;
            FrameReport {
                faces,
                stats: EffectStats::default(),
                recovered: Some(err.to_string()),
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
