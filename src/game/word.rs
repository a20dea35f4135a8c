use std::collections::BTreeSet;

use crate::foundation::error::{PartycamError, PartycamResult};

/// Result of a single letter guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Letter is in the word and was not revealed before.
    Hit,
    /// Letter is not in the word; the mistake counter went up.
    Miss,
    /// Letter was already guessed; nothing changed.
    Repeat,
    /// This guess revealed the last hidden letter.
    Won,
    /// This guess used up the last allowed mistake.
    Lost,
    /// Not an ASCII letter.
    Invalid,
    /// The round is already over.
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundState {
    Playing,
    Won,
    Lost,
}

/// Turn-based word guessing: one secret word, a growing set of guesses, a mistake budget.
#[derive(Clone, Debug)]
pub struct WordGame {
    word: String,
    guessed: BTreeSet<char>,
    mistakes: u32,
    max_mistakes: u32,
    state: RoundState,
}

impl WordGame {
    pub fn new(word: &str, max_mistakes: u32) -> PartycamResult<Self> {
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PartycamError::validation(format!(
                "secret word '{word}' must be non-empty ascii letters"
            )));
        }
        if max_mistakes == 0 {
            return Err(PartycamError::validation("max_mistakes must be > 0"));
        }
        Ok(Self {
            word: word.to_ascii_lowercase(),
            guessed: BTreeSet::new(),
            mistakes: 0,
            max_mistakes,
            state: RoundState::Playing,
        })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn max_mistakes(&self) -> u32 {
        self.max_mistakes
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn guess(&mut self, letter: char) -> GuessOutcome {
        if self.state != RoundState::Playing {
            return GuessOutcome::Finished;
        }
        if !letter.is_ascii_alphabetic() {
            return GuessOutcome::Invalid;
        }
        let letter = letter.to_ascii_lowercase();
        if !self.guessed.insert(letter) {
            return GuessOutcome::Repeat;
        }

        if self.word.contains(letter) {
            if self.word.chars().all(|c| self.guessed.contains(&c)) {
                self.state = RoundState::Won;
                return GuessOutcome::Won;
            }
            GuessOutcome::Hit
        } else {
            self.mistakes += 1;
            if self.mistakes >= self.max_mistakes {
                self.state = RoundState::Lost;
                return GuessOutcome::Lost;
            }
            GuessOutcome::Miss
        }
    }

    /// Word with unrevealed letters as `_`, space separated: `"_ a _ _"`.
    pub fn masked_word(&self) -> String {
        self.word
            .chars()
            .map(|c| if self.guessed.contains(&c) { c } else { '_' })
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Caption shown over the game-over screen.
    pub fn loss_caption(&self) -> String {
        format!("You lost! The word was: {}", self.word)
    }
}

/// Deterministic word choice; hosts pass a time- or RNG-derived seed.
pub fn pick_word(words: &[String], seed: u64) -> PartycamResult<&str> {
    if words.is_empty() {
        return Err(PartycamError::validation("word list must be non-empty"));
    }
    let idx = (seed % words.len() as u64) as usize;
    Ok(&words[idx])
}

#[cfg(test)]
#[path = "../../tests/unit/game/word.rs"]
mod tests;
