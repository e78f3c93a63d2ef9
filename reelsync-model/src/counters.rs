/// Per-user engagement counters kept on the users row.
///
/// Also used as a delta in `update_user_counters` calls: a committed
/// reaction bumps `reaction_count` by one and `total_hold_seconds` by the
/// hold duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserCounters {
    pub reaction_count: u64,
    pub total_hold_seconds: u64,
}

impl UserCounters {
    pub fn new(reaction_count: u64, total_hold_seconds: u64) -> Self {
        Self {
            reaction_count,
            total_hold_seconds,
        }
    }

    /// Delta applied for a single committed reaction.
    pub fn reaction_delta(hold_seconds: u64) -> Self {
        Self {
            reaction_count: 1,
            total_hold_seconds: hold_seconds,
        }
    }

    pub fn saturating_add(self, delta: UserCounters) -> Self {
        Self {
            reaction_count: self.reaction_count.saturating_add(delta.reaction_count),
            total_hold_seconds: self
                .total_hold_seconds
                .saturating_add(delta.total_hold_seconds),
        }
    }
}
