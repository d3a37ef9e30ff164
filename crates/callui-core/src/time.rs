//! Time related structs
use std::{
    ops::{Add, AddAssign},
    time::{Duration, Instant, SystemTime},
};

/// A system time and the corresponding instant.
///
/// Entries are stamped with the system time for display while
/// deadlines are computed on the monotonic instant. Passing both
/// explicitly lets callers drive the reconciler with a simulated
/// clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemTimeInstant {
    system_time: SystemTime,
    instant: Instant,
}

impl SystemTimeInstant {
    #[must_use]
    pub const fn new(system_time: SystemTime, instant: Instant) -> Self {
        Self {
            system_time,
            instant,
        }
    }

    #[must_use]
    pub fn now() -> Self {
        let instant = Instant::now();
        let system_time = SystemTime::now();
        let elapsed = instant.elapsed();
        // Compensate for the time that passed while retrieving
        // the current system time
        let instant = instant + elapsed / 2;
        Self::new(system_time, instant)
    }

    /// Anchor a monotonic instant, e.g. from an async runtime clock,
    /// at the current system time.
    #[must_use]
    pub fn anchor(instant: Instant) -> Self {
        Self::new(SystemTime::now(), instant)
    }

    #[must_use]
    pub const fn system_time(&self) -> SystemTime {
        self.system_time
    }

    #[must_use]
    pub const fn instant(&self) -> Instant {
        self.instant
    }

    /// Time elapsed since an earlier instant
    ///
    /// Saturates at zero if `earlier` is actually later.
    #[must_use]
    pub fn saturating_duration_since(&self, earlier: Instant) -> Duration {
        self.instant.saturating_duration_since(earlier)
    }
}

impl Add<Duration> for SystemTimeInstant {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        let Self {
            system_time,
            instant,
        } = self;
        Self::new(system_time + rhs, instant + rhs)
    }
}

impl AddAssign<Duration> for SystemTimeInstant {
    fn add_assign(&mut self, rhs: Duration) {
        self.system_time += rhs;
        self.instant += rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_moves_both_clocks() {
        let start = SystemTimeInstant::now();
        let later = start + Duration::from_secs(3);
        assert_eq!(
            Duration::from_secs(3),
            later.saturating_duration_since(start.instant())
        );
        assert_eq!(
            Ok(Duration::from_secs(3)),
            later
                .system_time()
                .duration_since(start.system_time())
                .map_err(|_| ())
        );
    }

    #[test]
    fn add_assign_matches_add() {
        let start = SystemTimeInstant::now();
        let mut advanced = start;
        advanced += Duration::from_millis(1500);
        assert_eq!(start + Duration::from_millis(1500), advanced);
    }

    #[test]
    fn saturating_duration_since_later_instant_is_zero() {
        let start = SystemTimeInstant::now();
        let later = start + Duration::from_secs(1);
        assert_eq!(
            Duration::ZERO,
            start.saturating_duration_since(later.instant())
        );
    }
}
