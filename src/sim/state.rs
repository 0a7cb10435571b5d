//! Game phases, turn outcomes and bird slots

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use crate::consts::MAX_BIRDS;

/// Current phase of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Turns are being played
    #[default]
    Playing,
    /// Every bird was collected
    LevelComplete,
    /// No lives left
    GameOver,
    /// Time ran out with birds still on the board
    TimeUp,
    /// The player left the level from the session layer
    Quit,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        *self != GamePhase::Playing
    }
}

/// Result of one turn, returned by [`super::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Continue,
    LevelComplete,
    GameOver,
    TimeUp,
}

impl From<TurnOutcome> for GamePhase {
    fn from(outcome: TurnOutcome) -> Self {
        match outcome {
            TurnOutcome::Continue => GamePhase::Playing,
            TurnOutcome::LevelComplete => GamePhase::LevelComplete,
            TurnOutcome::GameOver => GamePhase::GameOver,
            TurnOutcome::TimeUp => GamePhase::TimeUp,
        }
    }
}

/// Something noteworthy that happened during the last turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player move refused (collision or border)
    PlayerBlocked { dir: Direction },
    /// Ball bounced off the border and now travels `dir`
    BallReflected { dir: Direction },
    BlockBroken { pos: IVec2 },
    TrapTriggered { pos: IVec2, lives_left: u32 },
    BirdCollected { pos: IVec2, score: u32 },
    /// The last bird was collected
    LevelCleared,
}

/// The four bird slots; `None` marks a collected (or never placed) bird
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BirdSlots {
    slots: [Option<IVec2>; MAX_BIRDS],
}

impl BirdSlots {
    /// Fill slots in order. Returns `None` if there are more than four.
    pub fn from_positions(positions: &[IVec2]) -> Option<Self> {
        if positions.len() > MAX_BIRDS {
            return None;
        }
        let mut slots = [None; MAX_BIRDS];
        for (slot, &pos) in slots.iter_mut().zip(positions) {
            *slot = Some(pos);
        }
        Some(Self { slots })
    }

    /// Deactivate the bird at `pos`. Returns true if one was there.
    pub fn collect(&mut self, pos: IVec2) -> bool {
        match self.slots.iter_mut().find(|s| **s == Some(pos)) {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    pub fn is_active_at(&self, pos: IVec2) -> bool {
        self.slots.contains(&Some(pos))
    }

    pub fn active(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// True once no slot holds a bird
    pub fn all_collected(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn slots(&self) -> &[Option<IVec2>; MAX_BIRDS] {
        &self.slots
    }
}
