//! Roster store: the single owner of tower occupancy state.
//!
//! # Responsibility
//! - Load the saved roster at startup, or generate the default one.
//! - Apply point updates (one home) and bulk updates (month length).
//! - Persist after every mutation and notify subscribers.
//!
//! # Invariants
//! - The set of homes never changes after load; only counts mutate.
//! - Every successful mutation is written through before returning.
//! - A corrupt saved roster is replaced by defaults, never partially used.

use crate::model::month::Month;
use crate::model::roster::{default_towers, total_resident_days, Home, Tower};
use crate::repo::roster_repo::{RepoError, RosterRepository};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RosterResult<T> = Result<T, RosterError>;

/// Roster store error.
#[derive(Debug)]
pub enum RosterError {
    /// Structural position does not exist in the roster.
    HomeNotFound {
        tower_id: String,
        story_index: usize,
        home_index: usize,
    },
    /// Persistence failure.
    Repo(RepoError),
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HomeNotFound {
                tower_id,
                story_index,
                home_index,
            } => write!(
                f,
                "home not found: tower `{tower_id}` story {story_index} home {home_index}"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::HomeNotFound { .. } => None,
        }
    }
}

impl From<RepoError> for RosterError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Where the roster came from when the store was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Restored from persisted state.
    Saved,
    /// Nothing was saved yet; defaults generated.
    DefaultMissing,
    /// Saved state was unparsable or invalid; defaults generated.
    DefaultCorrupt,
}

impl LoadSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::DefaultMissing => "default_missing",
            Self::DefaultCorrupt => "default_corrupt",
        }
    }
}

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    HomeUpdated {
        tower_id: String,
        story_index: usize,
        home_index: usize,
    },
    MonthApplied {
        day_count: u32,
    },
    Reset,
}

/// Handle returned by `subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&RosterEvent, &[Tower])>;

/// Owned, injectable roster state with write-through persistence.
pub struct RosterStore<R: RosterRepository> {
    repo: R,
    towers: Vec<Tower>,
    load_source: LoadSource,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<R: RosterRepository> RosterStore<R> {
    /// Loads the saved roster or falls back to the default towers.
    ///
    /// Generated defaults are saved immediately so the next start restores
    /// them.
    ///
    /// # Errors
    /// - Returns `Repo` when storage itself fails (not when the saved blob is
    ///   merely corrupt).
    pub fn open(repo: R) -> RosterResult<Self> {
        let (towers, load_source) = match repo.load_roster() {
            Ok(Some(towers)) => (towers, LoadSource::Saved),
            Ok(None) => (default_towers(), LoadSource::DefaultMissing),
            Err(RepoError::InvalidData(message)) => {
                warn!(
                    "event=roster_load module=roster status=fallback reason=corrupt detail={}",
                    message
                );
                (default_towers(), LoadSource::DefaultCorrupt)
            }
            Err(err) => {
                error!("event=roster_load module=roster status=error error={}", err);
                return Err(err.into());
            }
        };

        if load_source != LoadSource::Saved {
            repo.save_roster(&towers)?;
        }

        info!(
            "event=roster_load module=roster status=ok source={} towers={} homes={}",
            load_source.as_str(),
            towers.len(),
            towers.iter().map(|tower| tower.homes().count()).sum::<usize>()
        );

        Ok(Self {
            repo,
            towers,
            load_source,
            listeners: Vec::new(),
            next_subscription: 0,
        })
    }

    /// Current roster, in tower order.
    pub fn towers(&self) -> &[Tower] {
        &self.towers
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    pub fn tower(&self, tower_id: &str) -> Option<&Tower> {
        self.towers.iter().find(|tower| tower.id == tower_id)
    }

    pub fn home(&self, tower_id: &str, story_index: usize, home_index: usize) -> Option<&Home> {
        self.tower(tower_id)?.home(story_index, home_index)
    }

    pub fn total_resident_days(&self) -> u128 {
        total_resident_days(&self.towers)
    }

    /// Replaces `residents` and `days_stayed` of exactly one home.
    ///
    /// Values are stored as given; range checks belong to the caller.
    ///
    /// # Errors
    /// - `HomeNotFound` when the position does not exist; nothing changes.
    /// - `Repo` when the write-through save fails; the in-memory change is kept.
    pub fn update_home(
        &mut self,
        tower_id: &str,
        story_index: usize,
        home_index: usize,
        residents: u32,
        days: u32,
    ) -> RosterResult<()> {
        let home = self
            .towers
            .iter_mut()
            .find(|tower| tower.id == tower_id)
            .and_then(|tower| tower.home_mut(story_index, home_index))
            .ok_or_else(|| RosterError::HomeNotFound {
                tower_id: tower_id.to_string(),
                story_index,
                home_index,
            })?;

        home.residents = residents;
        home.days_stayed = days;
        debug!(
            "event=home_update module=roster home_id={} residents={} days={}",
            home.id, residents, days
        );

        self.commit(RosterEvent::HomeUpdated {
            tower_id: tower_id.to_string(),
            story_index,
            home_index,
        })
    }

    /// Sets `days_stayed = day_count` for every home, leaving residents as-is.
    pub fn apply_month(&mut self, day_count: u32) -> RosterResult<()> {
        self.towers
            .iter_mut()
            .flat_map(|tower| tower.stories.iter_mut())
            .flat_map(|story| story.homes.iter_mut())
            .for_each(|home| home.days_stayed = day_count);

        info!(
            "event=month_apply module=roster status=ok day_count={}",
            day_count
        );
        self.commit(RosterEvent::MonthApplied { day_count })
    }

    /// Applies the day count of a calendar month.
    pub fn apply_calendar_month(&mut self, month: Month) -> RosterResult<()> {
        self.apply_month(month.days())
    }

    /// Replaces the roster with freshly generated defaults.
    pub fn reset(&mut self) -> RosterResult<()> {
        self.towers = default_towers();
        info!("event=roster_reset module=roster status=ok");
        self.commit(RosterEvent::Reset)
    }

    /// Writes the current roster to the repository.
    pub fn save(&self) -> RosterResult<()> {
        self.repo.save_roster(&self.towers).map_err(|err| {
            error!("event=roster_save module=roster status=error error={}", err);
            RosterError::from(err)
        })
    }

    /// Registers a change callback; it runs after every mutation.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&RosterEvent, &[Tower]) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a callback. Returns `false` when the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, event: RosterEvent) -> RosterResult<()> {
        let saved = self.save();
        for (_, listener) in &mut self.listeners {
            listener(&event, &self.towers);
        }
        saved
    }
}
