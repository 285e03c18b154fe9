//! # Character Roster
//!
//! The selectable runners and the selection screen state.
//!
//! Characters differ only by colour and two small movement modifiers, so
//! no pick changes the rules of a run.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A selectable runner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Character {
    /// The mascot. Balanced.
    #[default]
    Lemmi,
    /// Quick on lane switches, lower jump.
    Winky,
    /// Higher jump. Requires the Gerbil NFT.
    Gerbil,
}

/// Movement modifiers and presentation of a character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterStats {
    /// Name shown on the selection screen.
    pub display_name: &'static str,
    /// Body colour (linear RGB).
    pub color: [f32; 3],
    /// Multiplier applied to the jump velocity.
    pub jump_multiplier: f32,
    /// Multiplier applied to the lane switch speed.
    pub lane_switch_multiplier: f32,
}

impl Character {
    /// Roster order on the selection screen.
    pub const ROSTER: [Character; 3] = [Character::Lemmi, Character::Winky, Character::Gerbil];

    /// Stats of this character.
    #[must_use]
    pub const fn stats(self) -> CharacterStats {
        match self {
            Self::Lemmi => CharacterStats {
                display_name: "Lemmi",
                color: [0.2, 0.45, 1.0],
                jump_multiplier: 1.0,
                lane_switch_multiplier: 1.0,
            },
            Self::Winky => CharacterStats {
                display_name: "Winky",
                color: [1.0, 0.8, 0.1],
                jump_multiplier: 0.95,
                lane_switch_multiplier: 1.2,
            },
            Self::Gerbil => CharacterStats {
                display_name: "Gerbil",
                color: [0.85, 0.55, 0.3],
                jump_multiplier: 1.1,
                lane_switch_multiplier: 1.05,
            },
        }
    }

    /// Whether this character needs the Gerbil NFT.
    #[inline]
    #[must_use]
    pub const fn requires_nft(self) -> bool {
        matches!(self, Self::Gerbil)
    }
}

/// State of the character-selection screen.
#[derive(Clone, Debug)]
pub struct CharacterSelect {
    index: usize,
    has_gerbil_nft: bool,
}

impl CharacterSelect {
    /// Opens the screen with the first character highlighted.
    #[must_use]
    pub const fn new(has_gerbil_nft: bool) -> Self {
        Self {
            index: 0,
            has_gerbil_nft,
        }
    }

    /// Currently highlighted character.
    #[must_use]
    pub const fn current(&self) -> Character {
        Character::ROSTER[self.index]
    }

    /// Highlights the next character, wrapping around.
    pub fn next(&mut self) -> Character {
        self.index = (self.index + 1) % Character::ROSTER.len();
        self.current()
    }

    /// Highlights the previous character, wrapping around.
    pub fn previous(&mut self) -> Character {
        self.index = (self.index + Character::ROSTER.len() - 1) % Character::ROSTER.len();
        self.current()
    }

    /// Highlights a specific character.
    pub fn highlight(&mut self, character: Character) {
        if let Some(i) = Character::ROSTER.iter().position(|c| *c == character) {
            self.index = i;
        }
    }

    /// Whether a character is shown with a lock.
    #[must_use]
    pub const fn is_locked(&self, character: Character) -> bool {
        character.requires_nft() && !self.has_gerbil_nft
    }

    /// Confirms the highlighted character.
    ///
    /// # Errors
    ///
    /// Returns `CharacterLocked` when the wallet lacks the unlock.
    pub fn confirm(&self) -> CoreResult<Character> {
        let character = self.current();
        if self.is_locked(character) {
            tracing::debug!(?character, "refused locked character");
            return Err(CoreError::CharacterLocked(character));
        }
        Ok(character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        let mut select = CharacterSelect::new(false);
        assert_eq!(select.current(), Character::Lemmi);
        assert_eq!(select.previous(), Character::Gerbil);
        assert_eq!(select.next(), Character::Lemmi);
        assert_eq!(select.next(), Character::Winky);
    }

    #[test]
    fn test_gerbil_locked_without_nft() {
        let mut select = CharacterSelect::new(false);
        select.highlight(Character::Gerbil);
        assert_eq!(
            select.confirm(),
            Err(CoreError::CharacterLocked(Character::Gerbil))
        );
    }

    #[test]
    fn test_gerbil_unlocked_with_nft() {
        let mut select = CharacterSelect::new(true);
        select.highlight(Character::Gerbil);
        assert_eq!(select.confirm(), Ok(Character::Gerbil));
    }
}
