use crate::types::Color;

use std::time::Duration;

/// Time given to each side by default
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(600);

/// Two independent countdowns, one per side
///
/// The clock doesn't measure time itself: the caller decides how much time has elapsed and
/// whom to charge for it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Clock {
    remaining: [Duration; 2],
}

impl Clock {
    /// Creates a clock with `limit` for each side
    #[inline]
    pub const fn new(limit: Duration) -> Clock {
        Clock {
            remaining: [limit; 2],
        }
    }

    /// Charges one second to side `c`
    #[inline]
    pub fn tick(&mut self, c: Color) {
        self.elapse(c, Duration::from_secs(1));
    }

    /// Charges `d` to side `c`, stopping at zero
    #[inline]
    pub fn elapse(&mut self, c: Color, d: Duration) {
        let slot = &mut self.remaining[c.index()];
        *slot = slot.saturating_sub(d);
    }

    #[inline]
    pub fn remaining(&self, c: Color) -> Duration {
        self.remaining[c.index()]
    }

    /// Returns `true` if side `c` has run out of time
    #[inline]
    pub fn is_flagged(&self, c: Color) -> bool {
        self.remaining(c).is_zero()
    }
}

impl Default for Clock {
    #[inline]
    fn default() -> Clock {
        Clock::new(DEFAULT_TIME_LIMIT)
    }
}

/// Formats the duration as `m:ss`, dropping fractions of a second
pub fn format_remaining(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
