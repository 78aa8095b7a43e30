//! Quests, experience and perks

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A perk granted by quests or level-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Perk {
    MaxHp,
}

impl Perk {
    pub fn label(&self) -> &'static str {
        match self {
            Perk::MaxHp => "+1 Max HP",
        }
    }
}

/// A counting quest with a one-time reward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub description: String,
    pub goal: u32,
    pub progress: u32,
    pub completed: bool,
    pub reward: Perk,
}

impl Quest {
    pub fn new(description: impl Into<String>, goal: u32, reward: Perk) -> Self {
        Self {
            description: description.into(),
            goal,
            progress: 0,
            completed: false,
            reward,
        }
    }

    /// Standard kill quest
    pub fn kill_quest() -> Self {
        Self::new(
            format!("Kill {QUEST_KILL_GOAL} enemies"),
            QUEST_KILL_GOAL,
            Perk::MaxHp,
        )
    }

    /// Count one unit of progress; yields the reward exactly once
    pub fn advance(&mut self) -> Option<Perk> {
        if self.completed {
            return None;
        }
        self.progress += 1;
        if self.progress >= self.goal {
            self.completed = true;
            log::info!("Quest complete: {}", self.description);
            return Some(self.reward);
        }
        None
    }
}

/// Experience and level tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    /// Granted perks, oldest first
    pub perks: Vec<Perk>,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            xp_to_next: XP_FIRST_LEVEL,
            perks: Vec::new(),
        }
    }
}

impl Progression {
    /// Add experience; returns the perk granted by a level-up, if any
    pub fn gain_xp(&mut self, amount: u32) -> Option<Perk> {
        self.xp += amount;
        if self.xp < self.xp_to_next {
            return None;
        }
        self.level += 1;
        self.xp -= self.xp_to_next;
        self.xp_to_next = (self.xp_to_next as f32 * XP_GROWTH) as u32;
        log::info!("Level up: {}", self.level);
        self.perks.push(Perk::MaxHp);
        Some(Perk::MaxHp)
    }
}
