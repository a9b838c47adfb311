//! League ladder and persisted progress

use crate::ai::AiConfig;
use crate::eval::Playstyle;
use crate::store::{KeyValueStore, StoreError};
use serde::{Deserialize, Serialize};

/// Storage key for the progress record
pub const PROGRESS_KEY: &str = "hexclash.progress";

/// A named opponent
#[derive(Clone, Debug)]
pub struct Rival {
    pub name: &'static str,
    pub playstyle: Playstyle,
    pub difficulty: u8,
}

impl Rival {
    const fn new(name: &'static str, playstyle: Playstyle, difficulty: u8) -> Self {
        Self {
            name,
            playstyle,
            difficulty,
        }
    }

    pub fn ai_config(&self) -> AiConfig {
        AiConfig::new(self.difficulty, self.playstyle)
    }
}

/// A tier of rivals, beaten in order
#[derive(Clone, Debug)]
pub struct League {
    pub name: &'static str,
    pub rivals: &'static [Rival],
}

pub static LEAGUES: [League; 5] = [
    League {
        name: "Pebble League",
        rivals: &[
            Rival::new("Pip", Playstyle::Sneaky, 1),
            Rival::new("Bramble", Playstyle::Defensive, 1),
            Rival::new("Nettle", Playstyle::Aggressive, 2),
        ],
    },
    League {
        name: "Cobble League",
        rivals: &[
            Rival::new("Slate", Playstyle::Defensive, 2),
            Rival::new("Flint", Playstyle::Aggressive, 2),
            Rival::new("Moss", Playstyle::Sneaky, 3),
        ],
    },
    League {
        name: "Quartz League",
        rivals: &[
            Rival::new("Opal", Playstyle::Sneaky, 3),
            Rival::new("Jasper", Playstyle::Aggressive, 3),
            Rival::new("Agate", Playstyle::Defensive, 4),
        ],
    },
    League {
        name: "Basalt League",
        rivals: &[
            Rival::new("Cinder", Playstyle::Aggressive, 4),
            Rival::new("Umber", Playstyle::Sneaky, 4),
            Rival::new("Tor", Playstyle::Defensive, 5),
        ],
    },
    League {
        name: "Crown League",
        rivals: &[
            Rival::new("Regent", Playstyle::Defensive, 5),
            Rival::new("Viper", Playstyle::Sneaky, 5),
            Rival::new("Monarch", Playstyle::Aggressive, 5),
        ],
    },
];

#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("no saved progress")]
    Missing,

    #[error("saved progress is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a win led to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advancement {
    /// Next rival in the same league
    NextRival,
    /// Moved up to a new league
    Promoted,
    /// Beat the last rival of the final league; its rivals start over
    Cycled,
}

/// Ladder position and counters; the only durable state
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Progress {
    pub league_index: usize,
    pub rival_index: usize,
    /// Wins in the current league
    pub wins: u32,
    /// Losses in the current league
    pub losses: u32,
    pub total_wins: u32,
    pub total_games: u32,
}

impl Progress {
    pub fn current_league(&self) -> &'static League {
        &LEAGUES[self.league_index.min(LEAGUES.len() - 1)]
    }

    pub fn current_rival(&self) -> &'static Rival {
        let rivals = self.current_league().rivals;
        &rivals[self.rival_index.min(rivals.len() - 1)]
    }

    pub fn record_win(&mut self) -> Advancement {
        self.wins = self.wins.saturating_add(1);
        self.total_wins = self.total_wins.saturating_add(1);
        self.total_games = self.total_games.saturating_add(1);

        let league = self.league_index.min(LEAGUES.len() - 1);
        let rival_count = LEAGUES[league].rivals.len();
        self.league_index = league;
        self.rival_index = self.rival_index.min(rival_count - 1) + 1;

        if self.rival_index < rival_count {
            return Advancement::NextRival;
        }

        self.rival_index = 0;
        if league + 1 < LEAGUES.len() {
            self.league_index = league + 1;
            self.wins = 0;
            self.losses = 0;
            tracing::info!("Promoted to {}", LEAGUES[self.league_index].name);
            Advancement::Promoted
        } else {
            Advancement::Cycled
        }
    }

    /// Rematch the same rival
    pub fn record_loss(&mut self) {
        self.losses = self.losses.saturating_add(1);
        self.total_games = self.total_games.saturating_add(1);
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    pub fn load(store: &impl KeyValueStore) -> Result<Self, ProgressError> {
        let content = store.get(PROGRESS_KEY)?.ok_or(ProgressError::Missing)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Saved progress, or a fresh start if it is absent or unreadable
    pub fn load_or_default(store: &impl KeyValueStore) -> Self {
        match Self::load(store) {
            Ok(progress) => progress,
            Err(ProgressError::Missing) => Self::default(),
            Err(e) => {
                tracing::warn!("Discarding saved progress: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), ProgressError> {
        let content = serde_json::to_string(self)?;
        store.set(PROGRESS_KEY, &content)?;
        Ok(())
    }

    pub fn reset(store: &mut impl KeyValueStore) -> Result<(), ProgressError> {
        store.remove(PROGRESS_KEY)?;
        Ok(())
    }
}
