//! The poll registry: creation, lookup, and discovery.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use ballot_ledger::PollLedger;
use ballot_types::{Clock, PollId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::config::RegistryConfig;
use crate::duration::DurationSelector;
use crate::error::RegistryError;
use crate::validate;

/// Counts of polls by state, all evaluated against one clock reading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySummary {
    pub total: usize,
    pub active: usize,
    pub closed: usize,
}

/// Factory and directory for polls.
///
/// Polls are kept in creation order and never removed. A poll's id is its
/// position in that order, so ids are dense, stable and never reused.
///
/// The registry's lock covers only opening and appending a new poll; each ledger
/// guards its own tally, so creating one poll never waits on voting in
/// another.
pub struct PollRegistry {
    config: RegistryConfig,
    clock: Arc<dyn Clock>,
    polls: RwLock<Vec<Arc<PollLedger>>>,
}

impl PollRegistry {
    pub fn new(config: RegistryConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            polls: RwLock::new(Vec::new()),
        }
    }

    /// A registry with the default duration table.
    pub fn with_defaults(clock: Arc<dyn Clock>) -> Self {
        Self::new(RegistryConfig::default(), clock)
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Configured window length for a selector code, in seconds.
    pub fn duration_for(&self, selector: u8) -> Result<u64, RegistryError> {
        let selector = DurationSelector::try_from(selector)?;
        Ok(self.config.durations.secs(selector))
    }

    /// Create a poll whose window length is picked by a selector code
    /// (1 = short, 2 = medium, 3 = day, 4 = week).
    ///
    /// Fails with [`RegistryError::InvalidDescription`],
    /// [`RegistryError::InvalidOptions`] or [`RegistryError::InvalidDuration`],
    /// checked in that order. Once this returns, the new id is visible to
    /// [`PollRegistry::list_polls`].
    pub fn create_poll<S: AsRef<str>>(
        &self,
        description: &str,
        options: &[S],
        selector: u8,
    ) -> Result<PollId, RegistryError> {
        let checked = validate::description(description).and_then(|description| {
            let options = validate::options(options)?;
            let duration_secs = self.duration_for(selector)?;
            Ok((description, options, duration_secs))
        });
        self.open_checked(checked)
    }

    /// Create a poll with a window of `minutes` minutes.
    ///
    /// Same checks and order as [`PollRegistry::create_poll`]; zero minutes
    /// or a window that overflows the clock is
    /// [`RegistryError::InvalidDuration`].
    pub fn create_poll_with_duration<S: AsRef<str>>(
        &self,
        description: &str,
        options: &[S],
        minutes: u64,
    ) -> Result<PollId, RegistryError> {
        let checked = validate::description(description).and_then(|description| {
            let options = validate::options(options)?;
            let duration_secs = validate::custom_minutes(minutes)?;
            Ok((description, options, duration_secs))
        });
        self.open_checked(checked)
    }

    fn open_checked(
        &self,
        checked: Result<(String, Vec<String>, u64), RegistryError>,
    ) -> Result<PollId, RegistryError> {
        let result = checked.and_then(|(description, options, duration_secs)| {
            let option_count = options.len();
            let (id, closes_at) = self.append(description, options, duration_secs)?;
            tracing::info!(poll = %id, options = option_count, %closes_at, "poll created");
            Ok(id)
        });

        if let Err(e) = &result {
            tracing::debug!("poll creation rejected: {e}");
        }
        result
    }

    // The clock is read under the write guard so that `opened_at` never
    // decreases along creation order.
    fn append(
        &self,
        description: String,
        options: Vec<String>,
        duration_secs: u64,
    ) -> Result<(PollId, Timestamp), RegistryError> {
        let mut polls = self.polls.write().unwrap_or_else(PoisonError::into_inner);
        let opened_at = self.clock.now();
        let closes_at = opened_at.checked_add_secs(duration_secs).ok_or_else(|| {
            RegistryError::InvalidDuration(format!(
                "window of {duration_secs}s from {opened_at} overflows the clock"
            ))
        })?;
        let id = PollId::new(polls.len() as u64);
        let ledger = PollLedger::new(
            id,
            description,
            options,
            opened_at,
            closes_at,
            self.clock.clone(),
        )?;
        polls.push(Arc::new(ledger));
        Ok((id, closes_at))
    }

    /// Ids of every poll, in creation order.
    ///
    /// The sequence is lazy and covers the polls that existed when it was
    /// made; polls created while iterating are not included. Clone it to
    /// iterate again from the start.
    pub fn list_polls(&self) -> PollIds<'_> {
        PollIds {
            registry: self,
            next: 0,
            end: self.len(),
        }
    }

    /// The ledger for `id`, if this registry created it.
    pub fn get(&self, id: PollId) -> Option<Arc<PollLedger>> {
        let index = usize::try_from(id.as_u64()).ok()?;
        self.read_polls().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.read_polls().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids of the polls still accepting votes, in creation order.
    pub fn active_polls(&self) -> Vec<PollId> {
        let now = self.clock.now();
        self.ledgers()
            .iter()
            .filter(|ledger| ledger.is_active_at(now))
            .map(|ledger| ledger.id())
            .collect()
    }

    /// How many polls exist and how many of them are open right now.
    pub fn summary(&self) -> RegistrySummary {
        let now = self.clock.now();
        let ledgers = self.ledgers();
        let active = ledgers.iter().filter(|l| l.is_active_at(now)).count();
        RegistrySummary {
            total: ledgers.len(),
            active,
            closed: ledgers.len() - active,
        }
    }

    // Clones the handles so callers evaluate ledgers without holding the lock.
    fn ledgers(&self) -> Vec<Arc<PollLedger>> {
        self.read_polls().clone()
    }

    fn read_polls(&self) -> RwLockReadGuard<'_, Vec<Arc<PollLedger>>> {
        self.polls.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Lazy, finite iterator over poll ids in creation order.
///
/// Returned by [`PollRegistry::list_polls`].
#[derive(Clone)]
pub struct PollIds<'a> {
    registry: &'a PollRegistry,
    next: usize,
    end: usize,
}

impl Iterator for PollIds<'_> {
    type Item = PollId;

    fn next(&mut self) -> Option<PollId> {
        if self.next >= self.end {
            return None;
        }
        let id = self.registry.read_polls().get(self.next).map(|l| l.id());
        self.next += 1;
        id
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PollIds<'_> {}
