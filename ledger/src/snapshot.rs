//! Poll snapshots — everything about one poll at a single point in time.
//!
//! A snapshot is what a front end shows for a poll: its text, each option
//! with its tally, whether voting is still open and how long is left. All
//! fields come from one clock reading and one consistent read of the tally.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::option::PollOption;
use ballot_types::{PollId, Timestamp};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollSnapshot {
    pub id: PollId,
    pub description: String,
    /// Options in creation order, with their tallies.
    pub options: Vec<PollOption>,
    pub opened_at: Timestamp,
    pub closes_at: Timestamp,
    pub is_active: bool,
    /// Seconds until close; zero once closed.
    pub remaining_secs: u64,
    /// Sum of all option tallies.
    pub total_votes: u64,
}

impl PollSnapshot {
    /// Remaining time formatted for display, e.g. `"4m 59s"`.
    pub fn remaining_display(&self) -> String {
        ballot_utils::format_remaining(Duration::from_secs(self.remaining_secs))
    }

    /// Indices of the options holding the most votes.
    ///
    /// Empty while no vote has been cast; more than one entry on a tie.
    pub fn leading_options(&self) -> Vec<usize> {
        let top = self.options.iter().map(|o| o.vote_count).max().unwrap_or(0);
        if top == 0 {
            return Vec::new();
        }
        self.options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.vote_count == top)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(counts: &[u64], remaining_secs: u64) -> PollSnapshot {
        PollSnapshot {
            id: PollId::new(4),
            description: "Lunch".to_string(),
            options: counts
                .iter()
                .enumerate()
                .map(|(i, &vote_count)| PollOption {
                    name: format!("Option {}", i + 1),
                    vote_count,
                })
                .collect(),
            opened_at: Timestamp::new(100),
            closes_at: Timestamp::new(400),
            is_active: remaining_secs > 0,
            remaining_secs,
            total_votes: counts.iter().sum(),
        }
    }

    #[test]
    fn leading_options_empty_before_first_vote() {
        assert!(snapshot(&[0, 0, 0], 300).leading_options().is_empty());
    }

    #[test]
    fn leading_options_reports_ties() {
        assert_eq!(snapshot(&[2, 5, 5], 10).leading_options(), vec![1, 2]);
        assert_eq!(snapshot(&[3, 1], 10).leading_options(), vec![0]);
    }

    #[test]
    fn remaining_display_uses_human_units() {
        assert_eq!(snapshot(&[0, 0], 299).remaining_display(), "4m 59s");
        assert_eq!(snapshot(&[0, 0], 0).remaining_display(), "0s");
    }

    #[test]
    fn json_shape_is_stable_for_adapters() {
        let json = serde_json::to_value(snapshot(&[1, 0], 60)).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["options"][0]["name"], "Option 1");
        assert_eq!(json["options"][0]["vote_count"], 1);
        assert_eq!(json["is_active"], true);
        assert_eq!(json["closes_at"], 400);
    }
}
