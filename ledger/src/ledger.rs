//! The poll ledger and its vote state machine.

use crate::error::{DefinitionError, LedgerError};
use crate::option::PollOption;
use crate::snapshot::PollSnapshot;
use crate::validate;
use ballot_types::{Clock, ParticipantId, PollId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// Whether a poll still accepts votes.
///
/// Derived from the clock on every call: `Open` while `now < closes_at`,
/// `Closed` from `closes_at` onwards. There is no transition back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollStatus {
    Open,
    Closed,
}

/// Mutable part of a poll. Counts and voters change together under one lock.
#[derive(Debug)]
struct Tally {
    /// `counts[i]` belongs to `PollLedger::option_names[i]`.
    counts: Vec<u64>,
    voters: HashSet<ParticipantId>,
}

/// The record of a single poll.
///
/// Everything except the tally is fixed at construction. The only mutation
/// is [`PollLedger::vote`], which checks its preconditions and applies its
/// effect inside one write-lock critical section, so concurrent votes are
/// serialized per poll and never lost. Reads take the lock shared, or not
/// at all when they only need the window bounds.
pub struct PollLedger {
    id: PollId,
    description: String,
    option_names: Vec<String>,
    opened_at: Timestamp,
    closes_at: Timestamp,
    tally: RwLock<Tally>,
    clock: Arc<dyn Clock>,
}

impl PollLedger {
    /// Open a new poll with zeroed tallies.
    ///
    /// Fails unless the description is non-blank, there are at least
    /// [`validate::MIN_OPTIONS`] distinct non-blank options, and
    /// `closes_at > opened_at`.
    pub fn new(
        id: PollId,
        description: String,
        option_names: Vec<String>,
        opened_at: Timestamp,
        closes_at: Timestamp,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DefinitionError> {
        validate::description(&description)?;
        validate::options(&option_names)?;
        validate::window(opened_at, closes_at)?;

        let tally = Tally {
            counts: vec![0; option_names.len()],
            voters: HashSet::new(),
        };
        Ok(Self {
            id,
            description,
            option_names,
            opened_at,
            closes_at,
            tally: RwLock::new(tally),
            clock,
        })
    }

    pub fn id(&self) -> PollId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn option_count(&self) -> usize {
        self.option_names.len()
    }

    pub fn opened_at(&self) -> Timestamp {
        self.opened_at
    }

    pub fn closes_at(&self) -> Timestamp {
        self.closes_at
    }

    /// Cast `participant`'s single vote for the option at `option_index`.
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// 1. the poll is still open, else [`LedgerError::VotingClosed`];
    /// 2. the index names an option, else [`LedgerError::InvalidOption`];
    /// 3. the participant has not voted yet, else [`LedgerError::AlreadyVoted`].
    ///
    /// On success the option's count and the voter set change together.
    pub fn vote(
        &self,
        participant: &ParticipantId,
        option_index: usize,
    ) -> Result<(), LedgerError> {
        let result = {
            let mut tally = self.write_tally();
            let now = self.clock.now();
            self.check_vote(&tally, participant, option_index, now)
                .map(|()| {
                    tally.counts[option_index] += 1;
                    tally.voters.insert(participant.clone());
                })
        };

        match &result {
            Ok(()) => tracing::debug!(
                poll = %self.id,
                participant = %participant,
                option = option_index,
                "vote recorded"
            ),
            Err(e) => tracing::debug!(
                poll = %self.id,
                participant = %participant,
                option = option_index,
                "vote rejected: {e}"
            ),
        }
        result
    }

    fn check_vote(
        &self,
        tally: &Tally,
        participant: &ParticipantId,
        option_index: usize,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        if !self.is_active_at(now) {
            return Err(LedgerError::VotingClosed);
        }
        if option_index >= self.option_names.len() {
            return Err(LedgerError::InvalidOption {
                index: option_index,
                count: self.option_names.len(),
            });
        }
        if tally.voters.contains(participant) {
            return Err(LedgerError::AlreadyVoted(participant.clone()));
        }
        Ok(())
    }

    /// Whether the poll accepts votes right now.
    pub fn is_active(&self) -> bool {
        self.is_active_at(self.clock.now())
    }

    /// Whether the poll accepts votes at `now`.
    ///
    /// For callers evaluating many polls against a single clock reading.
    pub fn is_active_at(&self, now: Timestamp) -> bool {
        now < self.closes_at
    }

    pub fn status(&self) -> PollStatus {
        if self.is_active() {
            PollStatus::Open
        } else {
            PollStatus::Closed
        }
    }

    /// Time left until the poll closes; zero once it has closed.
    pub fn remaining_time(&self) -> Duration {
        Duration::from_secs(self.closes_at.secs_until(self.clock.now()))
    }

    /// A point-in-time copy of every option and its tally.
    pub fn all_options(&self) -> Vec<PollOption> {
        let tally = self.read_tally();
        self.options_from(&tally)
    }

    /// Whether `participant` has cast a vote in this poll.
    pub fn has_voted(&self, participant: &ParticipantId) -> bool {
        self.read_tally().voters.contains(participant)
    }

    /// Number of votes cast, which is also the number of distinct voters.
    pub fn total_votes(&self) -> u64 {
        self.read_tally().voters.len() as u64
    }

    /// Everything an adapter needs to render this poll, read consistently.
    pub fn snapshot(&self) -> PollSnapshot {
        let now = self.clock.now();
        let (options, total_votes) = {
            let tally = self.read_tally();
            (self.options_from(&tally), tally.voters.len() as u64)
        };
        PollSnapshot {
            id: self.id,
            description: self.description.clone(),
            options,
            opened_at: self.opened_at,
            closes_at: self.closes_at,
            is_active: self.is_active_at(now),
            remaining_secs: self.closes_at.secs_until(now),
            total_votes,
        }
    }

    fn options_from(&self, tally: &Tally) -> Vec<PollOption> {
        self.option_names
            .iter()
            .zip(&tally.counts)
            .map(|(name, &vote_count)| PollOption {
                name: name.clone(),
                vote_count,
            })
            .collect()
    }

    // A vote only writes after every check has passed, so a poisoned lock
    // never guards a half-applied vote.
    fn read_tally(&self) -> RwLockReadGuard<'_, Tally> {
        self.tally.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_tally(&self) -> RwLockWriteGuard<'_, Tally> {
        self.tally.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for PollLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollLedger")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("options", &self.option_names)
            .field("opened_at", &self.opened_at)
            .field("closes_at", &self.closes_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_nullables::NullClock;

    const START: u64 = 1_700_000_000;
    const FIVE_MINUTES: u64 = 300;

    fn participant(name: &str) -> ParticipantId {
        ParticipantId::new(name)
    }

    fn ledger_with(names: &[&str], clock: &Arc<NullClock>) -> PollLedger {
        PollLedger::new(
            PollId::new(0),
            "Favourite colour".to_string(),
            names.iter().map(|n| n.to_string()).collect(),
            Timestamp::new(START),
            Timestamp::new(START + FIVE_MINUTES),
            clock.clone(),
        )
        .unwrap()
    }

    fn red_blue() -> (PollLedger, Arc<NullClock>) {
        let clock = Arc::new(NullClock::new(START));
        (ledger_with(&["Red", "Blue"], &clock), clock)
    }

    #[test]
    fn test_new_ledger_starts_empty() {
        let (ledger, _clock) = red_blue();
        assert_eq!(ledger.total_votes(), 0);
        assert!(ledger.all_options().iter().all(|o| o.vote_count == 0));
        assert_eq!(ledger.option_count(), 2);
        assert_eq!(ledger.description(), "Favourite colour");
    }

    #[test]
    fn test_new_rejects_invalid_definitions() {
        let clock: Arc<dyn Clock> = Arc::new(NullClock::new(START));
        let build = |description: &str, names: &[&str], closes_at: u64| {
            PollLedger::new(
                PollId::new(0),
                description.to_string(),
                names.iter().map(|n| n.to_string()).collect(),
                Timestamp::new(START),
                Timestamp::new(closes_at),
                clock.clone(),
            )
        };
        let later = START + FIVE_MINUTES;

        assert_eq!(
            build("", &["Only"], START).unwrap_err(),
            DefinitionError::EmptyDescription
        );
        assert!(matches!(
            build("Pick", &["Only"], later),
            Err(DefinitionError::InvalidOptions(_))
        ));
        assert!(matches!(
            build("Pick", &["a", "a"], later),
            Err(DefinitionError::InvalidOptions(msg)) if msg.contains("duplicate")
        ));
        assert!(matches!(
            build("Pick", &["a", "b"], START),
            Err(DefinitionError::EmptyWindow { .. })
        ));
        assert!(build("Pick", &["a", "b"], later).is_ok());
    }

    #[test]
    fn test_vote_increments_chosen_option_only() {
        let (ledger, _clock) = red_blue();
        ledger.vote(&participant("p1"), 1).unwrap();

        let options = ledger.all_options();
        assert_eq!(options[0].vote_count, 0);
        assert_eq!(options[1].vote_count, 1);
        assert!(ledger.has_voted(&participant("p1")));
        assert!(!ledger.has_voted(&participant("p2")));
    }

    #[test]
    fn test_second_vote_is_already_voted() {
        let (ledger, _clock) = red_blue();
        ledger.vote(&participant("p1"), 0).unwrap();

        assert_eq!(
            ledger.vote(&participant("p1"), 1),
            Err(LedgerError::AlreadyVoted(participant("p1")))
        );
        assert_eq!(
            ledger.vote(&participant("p1"), 0),
            Err(LedgerError::AlreadyVoted(participant("p1")))
        );
        assert_eq!(ledger.total_votes(), 1);
    }

    #[test]
    fn test_out_of_range_index_is_invalid_option() {
        let (ledger, _clock) = red_blue();
        assert_eq!(
            ledger.vote(&participant("p1"), 2),
            Err(LedgerError::InvalidOption { index: 2, count: 2 })
        );
        assert!(!ledger.has_voted(&participant("p1")));
    }

    // ── Window boundary ─────────────────────────────────────────────────

    #[test]
    fn test_vote_one_second_before_close_succeeds() {
        let (ledger, clock) = red_blue();
        clock.advance(FIVE_MINUTES - 1);
        assert!(ledger.is_active());
        assert_eq!(ledger.remaining_time(), Duration::from_secs(1));
        ledger.vote(&participant("p1"), 0).unwrap();
    }

    #[test]
    fn test_vote_at_exact_close_is_rejected() {
        let (ledger, clock) = red_blue();
        clock.advance(FIVE_MINUTES);
        assert!(!ledger.is_active());
        assert_eq!(ledger.status(), PollStatus::Closed);
        assert_eq!(ledger.remaining_time(), Duration::ZERO);
        assert_eq!(
            ledger.vote(&participant("p1"), 0),
            Err(LedgerError::VotingClosed)
        );
    }

    #[test]
    fn test_closed_check_precedes_index_and_voter_checks() {
        let (ledger, clock) = red_blue();
        ledger.vote(&participant("p1"), 0).unwrap();
        clock.advance(FIVE_MINUTES + 60);

        assert_eq!(
            ledger.vote(&participant("p2"), 9),
            Err(LedgerError::VotingClosed)
        );
        assert_eq!(
            ledger.vote(&participant("p1"), 0),
            Err(LedgerError::VotingClosed)
        );
    }

    #[test]
    fn test_index_check_precedes_voter_check() {
        let (ledger, _clock) = red_blue();
        ledger.vote(&participant("p1"), 0).unwrap();
        assert_eq!(
            ledger.vote(&participant("p1"), 7),
            Err(LedgerError::InvalidOption { index: 7, count: 2 })
        );
    }

    #[test]
    fn test_tallies_stay_queryable_after_close() {
        let (ledger, clock) = red_blue();
        ledger.vote(&participant("p1"), 0).unwrap();
        ledger.vote(&participant("p2"), 0).unwrap();
        clock.advance(7 * 86_400);

        let options = ledger.all_options();
        assert_eq!(options[0].vote_count, 2);
        assert_eq!(options[0].name, "Red");
        assert_eq!(ledger.total_votes(), 2);
    }

    #[test]
    fn test_returned_options_are_a_snapshot() {
        let (ledger, _clock) = red_blue();
        let before = ledger.all_options();
        ledger.vote(&participant("p1"), 0).unwrap();
        assert_eq!(before[0].vote_count, 0);
        assert_eq!(ledger.all_options()[0].vote_count, 1);
    }

    #[test]
    fn test_snapshot_reflects_one_reading() {
        let (ledger, clock) = red_blue();
        ledger.vote(&participant("p1"), 1).unwrap();
        clock.advance(60);

        let snap = ledger.snapshot();
        assert_eq!(snap.id, PollId::new(0));
        assert!(snap.is_active);
        assert_eq!(snap.remaining_secs, FIVE_MINUTES - 60);
        assert_eq!(snap.total_votes, 1);
        assert_eq!(snap.options[1].vote_count, 1);
        assert_eq!(snap.opened_at, Timestamp::new(START));
        assert_eq!(snap.closes_at, Timestamp::new(START + FIVE_MINUTES));
    }
}
