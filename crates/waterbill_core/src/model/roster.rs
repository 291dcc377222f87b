//! Tower roster model.
//!
//! # Responsibility
//! - Define the canonical Tower -> Story -> Home tree.
//! - Generate the default roster layout.
//! - Validate rosters read back from persistence.
//!
//! # Invariants
//! - Story `floor` values are 1-based and match their position.
//! - Home ids are unique across the whole roster.
//! - Counts are unsigned, so `residents >= 0` and `days_stayed >= 0` hold by
//!   construction.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Floors per tower in the default layout.
pub const DEFAULT_FLOORS: u32 = 15;
/// Homes per floor in the default layout.
pub const DEFAULT_HOMES_PER_FLOOR: u32 = 4;
/// Tower names generated when no saved roster exists.
pub const DEFAULT_TOWER_NAMES: &[&str] = &["A", "B"];

/// One apartment unit and its occupancy for the billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Home {
    /// Stable id, e.g. `A-1-2`.
    pub id: String,
    /// Display number, e.g. `1B`.
    pub number: String,
    pub residents: u32,
    pub days_stayed: u32,
}

impl Home {
    /// Weighting unit for bill allocation.
    pub fn resident_days(&self) -> u64 {
        u64::from(self.residents) * u64::from(self.days_stayed)
    }
}

/// One floor of a tower.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// 1-based floor number.
    pub floor: u32,
    pub homes: Vec<Home>,
}

/// A named building made of stories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tower {
    /// Lowercase form of `name`, e.g. `a`.
    pub id: String,
    pub name: String,
    pub stories: Vec<Story>,
}

/// Fixed building dimensions used at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TowerLayout {
    pub floors: u32,
    pub homes_per_floor: u32,
}

impl Default for TowerLayout {
    fn default() -> Self {
        Self {
            floors: DEFAULT_FLOORS,
            homes_per_floor: DEFAULT_HOMES_PER_FLOOR,
        }
    }
}

impl Tower {
    /// Generates an empty tower with every home at zero occupancy.
    ///
    /// Home numbers are `{floor}{letter}` with letters cycling `A, B, C, ...`
    /// by position on the floor.
    pub fn generate(name: &str, layout: TowerLayout) -> Self {
        let stories = (1..=layout.floors)
            .map(|floor| Story {
                floor,
                homes: (0..layout.homes_per_floor)
                    .map(|index| Home {
                        id: format!("{name}-{floor}-{}", index + 1),
                        number: format!("{floor}{}", home_letter(index)),
                        residents: 0,
                        days_stayed: 0,
                    })
                    .collect(),
            })
            .collect();

        Self {
            id: tower_id_for(name),
            name: name.to_string(),
            stories,
        }
    }

    /// Iterates over every home in floor order.
    pub fn homes(&self) -> impl Iterator<Item = &Home> {
        self.stories.iter().flat_map(|story| story.homes.iter())
    }

    /// Returns the home at a structural position.
    pub fn home(&self, story_index: usize, home_index: usize) -> Option<&Home> {
        self.stories.get(story_index)?.homes.get(home_index)
    }

    pub(crate) fn home_mut(&mut self, story_index: usize, home_index: usize) -> Option<&mut Home> {
        self.stories.get_mut(story_index)?.homes.get_mut(home_index)
    }

    /// Checks structural invariants on a tower read from outside the process.
    pub fn validate(&self) -> Result<(), RosterValidationError> {
        if self.id.trim().is_empty() || self.name.trim().is_empty() {
            return Err(RosterValidationError::BlankTowerIdentity);
        }
        for (index, story) in self.stories.iter().enumerate() {
            let expected = index as u32 + 1;
            if story.floor != expected {
                return Err(RosterValidationError::FloorOutOfOrder {
                    tower_id: self.id.clone(),
                    expected,
                    found: story.floor,
                });
            }
        }
        Ok(())
    }
}

/// Returns the default roster: towers `A` and `B`, 15 floors x 4 homes.
pub fn default_towers() -> Vec<Tower> {
    DEFAULT_TOWER_NAMES
        .iter()
        .map(|name| Tower::generate(name, TowerLayout::default()))
        .collect()
}

/// Checks a full roster: at least one tower, valid towers, unique ids.
pub fn validate_roster(towers: &[Tower]) -> Result<(), RosterValidationError> {
    if towers.is_empty() {
        return Err(RosterValidationError::Empty);
    }

    let mut tower_ids = HashSet::new();
    let mut home_ids = HashSet::new();
    for tower in towers {
        tower.validate()?;
        if !tower_ids.insert(tower.id.as_str()) {
            return Err(RosterValidationError::DuplicateTowerId(tower.id.clone()));
        }
        for home in tower.homes() {
            if !home_ids.insert(home.id.as_str()) {
                return Err(RosterValidationError::DuplicateHomeId(home.id.clone()));
            }
        }
    }
    Ok(())
}

/// Total resident-days across every home of every tower.
pub fn total_resident_days(towers: &[Tower]) -> u128 {
    towers
        .iter()
        .flat_map(Tower::homes)
        .map(|home| u128::from(home.resident_days()))
        .sum()
}

pub(crate) fn tower_id_for(name: &str) -> String {
    name.to_lowercase()
}

/// Letter for a zero-based position on a floor (`0 -> A`).
pub fn home_letter(index: u32) -> char {
    char::from(b'A' + (index % 26) as u8)
}

/// Structural problems found in a roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterValidationError {
    Empty,
    BlankTowerIdentity,
    DuplicateTowerId(String),
    DuplicateHomeId(String),
    FloorOutOfOrder {
        tower_id: String,
        expected: u32,
        found: u32,
    },
}

impl Display for RosterValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "roster contains no towers"),
            Self::BlankTowerIdentity => write!(f, "tower id and name must not be blank"),
            Self::DuplicateTowerId(id) => write!(f, "duplicate tower id `{id}`"),
            Self::DuplicateHomeId(id) => write!(f, "duplicate home id `{id}`"),
            Self::FloorOutOfOrder {
                tower_id,
                expected,
                found,
            } => write!(
                f,
                "tower `{tower_id}` has floor {found} where floor {expected} was expected"
            ),
        }
    }
}

impl Error for RosterValidationError {}
