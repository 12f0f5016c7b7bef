//! Todoist priority to Habitica difficulty mapping.

/// Difficulty weights indexed by one-based Todoist priority.
const WEIGHTS: [f64; 5] = [0.0, 0.1, 1.0, 1.5, 2.0];

/// Returns the Habitica difficulty weight for a Todoist priority.
///
/// Priority `n` maps to `WEIGHTS[n - 1]`; priority 0 and values past the end
/// of the table map to 0.
#[must_use]
pub fn priority_weight(priority: u8) -> f64 {
    usize::from(priority)
        .checked_sub(1)
        .and_then(|index| WEIGHTS.get(index))
        .copied()
        .unwrap_or_default()
}
