use crate::settings::FeedSettings;
use jiff::{RoundMode, SignedDuration, Timestamp, TimestampRound, Unit};
use neat_core::{CoreError, Short};
use tracing::debug;

/// Picks release times for new shorts so the feed never bursts.
///
/// A short is never released sooner than `separation` after the latest
/// release already scheduled. Pushed-back releases get a small random delay
/// so they don't land on identical timestamps.
#[derive(Debug, Clone, Copy)]
pub struct ReleaseScheduler {
    separation: SignedDuration,
    jitter_secs: u32,
}

impl ReleaseScheduler {
    pub fn new(separation: SignedDuration, jitter_secs: u32) -> Self {
        Self {
            separation,
            jitter_secs,
        }
    }

    pub fn from_settings(settings: &FeedSettings) -> Self {
        Self::new(settings.release_separation, settings.release_jitter_secs)
    }

    /// The release time requested by an author at `now`.
    ///
    /// `0` hours means immediately (to the second). Otherwise the release is
    /// that many hours after the start of the current hour.
    pub fn candidate_release(&self, now: Timestamp, release_hours: u64) -> Result<Timestamp, CoreError> {
        if release_hours == 0 {
            return Ok(truncate(now, Unit::Second));
        }

        let out_of_range = || CoreError::ReleaseOutOfRange(format!("{release_hours} hours"));
        let seconds = i64::try_from(release_hours)
            .ok()
            .and_then(|hours| hours.checked_mul(3600))
            .ok_or_else(out_of_range)?;

        truncate(now, Unit::Hour)
            .checked_add(SignedDuration::from_secs(seconds))
            .map_err(|_| out_of_range())
    }

    /// The earliest valid release time at or after `candidate`, given the
    /// shorts already scheduled.
    ///
    /// Only the latest existing release matters. If `candidate` is within
    /// `separation` of it, the release moves to exactly `latest + separation`
    /// plus jitter; otherwise `candidate` is returned unchanged.
    pub fn next_valid_release_time(&self, candidate: Timestamp, shorts: &[Short]) -> Timestamp {
        let Some(latest) = shorts.iter().map(|short| short.release_date).max() else {
            return candidate;
        };

        let earliest = latest.checked_add(self.separation).unwrap_or(Timestamp::MAX);
        if earliest <= candidate {
            return candidate;
        }

        let release = earliest.checked_add(self.jitter()).unwrap_or(earliest);
        debug!(%candidate, %latest, %release, "Release pushed back to keep separation");
        release
    }

    fn jitter(&self) -> SignedDuration {
        if self.jitter_secs == 0 {
            return SignedDuration::ZERO;
        }
        SignedDuration::from_secs(i64::from(rand::random_range(0..self.jitter_secs)))
    }
}

/// Truncates `timestamp` to a whole `unit`.
pub(crate) fn truncate(timestamp: Timestamp, unit: Unit) -> Timestamp {
    timestamp
        .round(TimestampRound::new().smallest(unit).mode(RoundMode::Trunc))
        .unwrap_or(timestamp)
}
