//! Weekly high score
//!
//! A single best score persisted alongside the time it was written. The
//! record expires every Friday at 23:59 local time.

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Timelike, Weekday};

use crate::error::GameError;
use crate::platform::KeyValueStore;

/// Best score and the time (Unix ms) it was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScoreRecord {
    pub score: u64,
    pub written_at_ms: i64,
}

/// Most recent weekly reset that has already passed.
///
/// Walks back to Friday and pins the wall clock to 23:59:00. On a Friday
/// before 23:59 that instant is still ahead, so the previous week's is used.
pub fn weekly_reset_boundary<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let today = now.date_naive();
    let days_back = (today.weekday().num_days_from_monday() + 7
        - Weekday::Fri.num_days_from_monday())
        % 7;
    let mut friday = today - Duration::days(i64::from(days_back));

    let before_cutoff = now.weekday() == Weekday::Fri
        && (now.hour() < 23 || (now.hour() == 23 && now.minute() < 59));
    if before_cutoff {
        friday = friday - Duration::days(7);
    }

    let cutoff = NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN);
    let local = friday.and_time(cutoff);
    let tz = now.timezone();
    // Ambiguous (fall back): earliest instant. Skipped (spring forward): read as UTC.
    tz.from_local_datetime(&local)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&local))
}

/// The persisted best score
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighScores {
    record: HighScoreRecord,
}

impl HighScores {
    pub const SCORE_KEY: &'static str = "shovel-run-high-score";
    pub const TIME_KEY: &'static str = "shovel-run-high-score-time";

    pub fn new() -> Self {
        Self::default()
    }

    /// Load the record, discarding (and clearing) it if a weekly reset has
    /// passed since it was written. Missing or unparsable slots load as 0.
    pub fn load<S, Tz>(store: &mut S, now: &DateTime<Tz>) -> Self
    where
        S: KeyValueStore + ?Sized,
        Tz: TimeZone,
    {
        let score = store.get(Self::SCORE_KEY).and_then(|s| s.trim().parse::<u64>().ok());
        let written_at = store
            .get(Self::TIME_KEY)
            .and_then(|s| s.trim().parse::<i64>().ok());

        let (Some(score), Some(written_at_ms)) = (score, written_at) else {
            log::info!("No high score found, starting fresh");
            return Self::new();
        };

        let boundary = weekly_reset_boundary(now);
        if written_at_ms < boundary.timestamp_millis() {
            log::info!("High score {score} expired at weekly reset, clearing");
            store.remove(Self::SCORE_KEY);
            store.remove(Self::TIME_KEY);
            return Self::new();
        }

        log::info!("Loaded high score {score}");
        Self {
            record: HighScoreRecord {
                score,
                written_at_ms,
            },
        }
    }

    pub fn best(&self) -> u64 {
        self.record.score
    }

    pub fn record_entry(&self) -> HighScoreRecord {
        self.record
    }

    /// Take `score` if it beats the current best. Returns true on a new record.
    pub fn record(&mut self, score: u64, now_ms: i64) -> bool {
        if score <= self.record.score {
            return false;
        }
        self.record = HighScoreRecord {
            score,
            written_at_ms: now_ms,
        };
        true
    }

    /// Write both slots
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), GameError> {
        store.set(Self::SCORE_KEY, &self.record.score.to_string())?;
        store.set(Self::TIME_KEY, &self.record.written_at_ms.to_string())?;
        log::info!("High score saved ({})", self.record.score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;
    use chrono::{FixedOffset, Utc};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_boundary_midweek() {
        // Monday 2026-10-19 -> Friday 2026-10-16 23:59
        let boundary = weekly_reset_boundary(&utc(2026, 10, 19, 12, 0));
        assert_eq!(boundary, utc(2026, 10, 16, 23, 59));
    }

    #[test]
    fn test_boundary_friday_before_cutoff() {
        let boundary = weekly_reset_boundary(&utc(2026, 10, 16, 23, 58));
        assert_eq!(boundary, utc(2026, 10, 9, 23, 59));

        let boundary = weekly_reset_boundary(&utc(2026, 10, 16, 8, 0));
        assert_eq!(boundary, utc(2026, 10, 9, 23, 59));
    }

    #[test]
    fn test_boundary_friday_after_cutoff() {
        let boundary = weekly_reset_boundary(&utc(2026, 10, 16, 23, 59));
        assert_eq!(boundary, utc(2026, 10, 16, 23, 59));
    }

    #[test]
    fn test_boundary_saturday() {
        let boundary = weekly_reset_boundary(&utc(2026, 10, 17, 0, 30));
        assert_eq!(boundary, utc(2026, 10, 16, 23, 59));
    }

    #[test]
    fn test_boundary_uses_local_wall_clock() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        // Saturday 00:30 local is still Friday 22:30 UTC
        let now = tz.with_ymd_and_hms(2026, 10, 17, 0, 30, 0).unwrap();
        let boundary = weekly_reset_boundary(&now);
        assert_eq!(boundary, tz.with_ymd_and_hms(2026, 10, 16, 23, 59, 0).unwrap());
        assert_eq!(boundary.with_timezone(&Utc), utc(2026, 10, 16, 21, 59));
    }

    #[test]
    fn test_round_trip_before_boundary() {
        let mut store = MemoryStore::new();
        let written = utc(2026, 10, 17, 10, 0);

        let mut scores = HighScores::load(&mut store, &written);
        assert_eq!(scores.best(), 0);
        assert!(scores.record(150, written.timestamp_millis()));
        scores.save(&mut store).unwrap();

        // Following Thursday, reset not yet reached
        let reloaded = HighScores::load(&mut store, &utc(2026, 10, 22, 18, 0));
        assert_eq!(reloaded.best(), 150);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_reload_after_boundary_clears() {
        let mut store = MemoryStore::new();
        let written = utc(2026, 10, 17, 10, 0);
        let mut scores = HighScores::new();
        scores.record(150, written.timestamp_millis());
        scores.save(&mut store).unwrap();

        let reloaded = HighScores::load(&mut store, &utc(2026, 10, 23, 23, 59));
        assert_eq!(reloaded.best(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupt_slots_load_as_zero() {
        let mut store = MemoryStore::new();
        store.set(HighScores::SCORE_KEY, "lots").unwrap();
        store.set(HighScores::TIME_KEY, "1760000000000").unwrap();
        assert_eq!(HighScores::load(&mut store, &utc(2026, 10, 19, 0, 0)).best(), 0);

        let mut store = MemoryStore::new();
        store.set(HighScores::SCORE_KEY, "42").unwrap();
        assert_eq!(HighScores::load(&mut store, &utc(2026, 10, 19, 0, 0)).best(), 0);
    }

    #[test]
    fn test_record_only_on_improvement() {
        let mut scores = HighScores::new();
        assert!(!scores.record(0, 1));
        assert!(scores.record(10, 2));
        assert!(!scores.record(10, 3));
        assert_eq!(scores.record_entry().written_at_ms, 2);
    }
}
