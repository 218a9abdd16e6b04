//! Rendering of remaining voting time.

use std::time::Duration;

const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

/// Remaining time as its two largest units, e.g. `"4m 59s"` or `"2d 3h"`.
///
/// Sub-second remainders are dropped, so anything under a second left on the
/// clock reads `"0s"`.
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    let Some(lead) = UNITS.iter().position(|&(size, _)| secs >= size) else {
        return "0s".to_string();
    };
    let (size, unit) = UNITS[lead];
    match UNITS.get(lead + 1) {
        Some(&(next_size, next_unit)) => {
            format!("{}{unit} {}{next_unit}", secs / size, (secs % size) / next_size)
        }
        None => format!("{}{unit}", secs / size),
    }
}
