//! User-facing home references.
//!
//! # Responsibility
//! - Parse the home notations users type: `A-1-2` (tower, floor, 1-based
//!   home index) and `A1B` / `TA1B` (the label shown in results).
//! - Resolve a reference to the structural position the roster store uses.
//!
//! # Invariants
//! - Resolution never guesses: an unknown tower or a position outside the
//!   tower layout is an error.

use crate::model::roster::Tower;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static HOME_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)-(\d+)-(\d+)$").expect("valid home id regex"));
static HOME_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)(\d+)([A-Za-z])$").expect("valid home label regex"));

/// Position of a home on its floor, as written by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorSlot {
    /// 1-based index from the `A-1-2` form.
    Index(u32),
    /// Letter from the `A1B` form.
    Letter(char),
}

/// Parsed but unresolved home reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeRef {
    pub tower: String,
    pub floor: u32,
    pub slot: FloorSlot,
}

/// Structural position accepted by `RosterStore::update_home`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeLocation {
    pub tower_id: String,
    pub story_index: usize,
    pub home_index: usize,
}

impl HomeRef {
    pub fn parse(value: &str) -> Result<Self, HomeRefError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(HomeRefError::Empty);
        }

        if let Some(caps) = HOME_ID_RE.captures(trimmed) {
            return Ok(Self {
                tower: caps[1].to_string(),
                floor: parse_number(trimmed, &caps[2])?,
                slot: FloorSlot::Index(parse_number(trimmed, &caps[3])?),
            });
        }

        if let Some(caps) = HOME_LABEL_RE.captures(trimmed) {
            let letter = caps[3]
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase())
                .ok_or_else(|| HomeRefError::Malformed(trimmed.to_string()))?;
            return Ok(Self {
                tower: caps[1].to_string(),
                floor: parse_number(trimmed, &caps[2])?,
                slot: FloorSlot::Letter(letter),
            });
        }

        Err(HomeRefError::Malformed(trimmed.to_string()))
    }

    /// Resolves this reference against the current roster.
    ///
    /// Tower names match case-insensitively. For the label form a leading
    /// `T` is treated as the results prefix when no tower carries the full
    /// name.
    pub fn resolve(&self, towers: &[Tower]) -> Result<HomeLocation, HomeRefError> {
        let tower = find_tower(towers, &self.tower)
            .or_else(|| match self.slot {
                FloorSlot::Letter(_) => strip_label_prefix(&self.tower)
                    .and_then(|name| find_tower(towers, name)),
                FloorSlot::Index(_) => None,
            })
            .ok_or_else(|| HomeRefError::UnknownTower(self.tower.clone()))?;

        let story_index = usize::try_from(self.floor)
            .ok()
            .and_then(|floor| floor.checked_sub(1))
            .filter(|index| *index < tower.stories.len())
            .ok_or_else(|| self.out_of_range())?;

        let home_index = match self.slot {
            FloorSlot::Index(index) => usize::try_from(index).ok().and_then(|i| i.checked_sub(1)),
            FloorSlot::Letter(letter) => letter
                .is_ascii_uppercase()
                .then(|| usize::from(letter as u8 - b'A')),
        }
        .filter(|index| *index < tower.stories[story_index].homes.len())
        .ok_or_else(|| self.out_of_range())?;

        Ok(HomeLocation {
            tower_id: tower.id.clone(),
            story_index,
            home_index,
        })
    }

    fn out_of_range(&self) -> HomeRefError {
        HomeRefError::OutOfRange(self.to_string())
    }
}

impl Display for HomeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.slot {
            FloorSlot::Index(index) => write!(f, "{}-{}-{}", self.tower, self.floor, index),
            FloorSlot::Letter(letter) => write!(f, "{}{}{}", self.tower, self.floor, letter),
        }
    }
}

fn find_tower<'a>(towers: &'a [Tower], name: &str) -> Option<&'a Tower> {
    towers
        .iter()
        .find(|tower| tower.name.eq_ignore_ascii_case(name))
}

fn strip_label_prefix(name: &str) -> Option<&str> {
    let rest = name.strip_prefix('T').or_else(|| name.strip_prefix('t'))?;
    (!rest.is_empty()).then_some(rest)
}

fn parse_number(input: &str, digits: &str) -> Result<u32, HomeRefError> {
    digits
        .parse::<u32>()
        .map_err(|_| HomeRefError::Malformed(input.to_string()))
}

/// Home reference parse/resolve errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeRefError {
    Empty,
    Malformed(String),
    UnknownTower(String),
    OutOfRange(String),
}

impl Display for HomeRefError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "home reference cannot be empty"),
            Self::Malformed(value) => write!(
                f,
                "invalid home reference `{value}`; expected forms like `A-1-2` or `A1B`"
            ),
            Self::UnknownTower(name) => write!(f, "unknown tower `{name}`"),
            Self::OutOfRange(value) => write!(f, "home `{value}` is outside the tower layout"),
        }
    }
}

impl Error for HomeRefError {}
