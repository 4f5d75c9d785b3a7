//! Twice-daily refresh schedule in a fixed timezone.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::constants::REFRESH_SLOTS;

/// Computes the next scheduled refresh instant strictly after `now`.
///
/// Candidates are today's slots and tomorrow's first slot in `tz`. The
/// comparison is strict, so a `now` that lands exactly on a slot rolls over
/// to the following one. The result is display metadata for clients; it does
/// not drive a timer here.
pub fn next_refresh_after(now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let local_now = now.with_timezone(&tz);
    let today = local_now.date_naive();

    for (hour, minute) in REFRESH_SLOTS {
        if let Some(slot) = slot_on(today, hour, minute, tz) {
            if local_now < slot {
                return slot.with_timezone(&Utc);
            }
        }
    }

    // Past the last slot: first slot of the next day that has it locally
    let (hour, minute) = REFRESH_SLOTS[0];
    let mut day = today + Duration::days(1);
    loop {
        if let Some(slot) = slot_on(day, hour, minute, tz) {
            return slot.with_timezone(&Utc);
        }
        day += Duration::days(1);
    }
}

/// Resolves a wall-clock slot on `date` in `tz`. Returns `None` when a DST
/// transition skips the local time; ambiguous times take the earlier
/// mapping.
fn slot_on(date: NaiveDate, hour: u32, minute: u32, tz: Tz) -> Option<DateTime<Tz>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    match tz.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(slot) => Some(slot),
        LocalResult::Ambiguous(earlier, _) => Some(earlier),
        LocalResult::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::REFRESH_TIMEZONE;
    use chrono::Timelike;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        REFRESH_TIMEZONE
            .with_ymd_and_hms(2025, 3, 10, hour, minute, second)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn local(result: DateTime<Utc>) -> DateTime<Tz> {
        result.with_timezone(&REFRESH_TIMEZONE)
    }

    #[test]
    fn morning_resolves_to_five_pm_same_day() {
        let next = local(next_refresh_after(at(9, 0, 0), REFRESH_TIMEZONE));
        assert_eq!(next, at(17, 0, 0).with_timezone(&REFRESH_TIMEZONE));
    }

    #[test]
    fn just_before_five_pm_resolves_to_five_pm() {
        let next = local(next_refresh_after(at(16, 59, 59), REFRESH_TIMEZONE));
        assert_eq!((next.hour(), next.minute()), (17, 0));
        assert_eq!(next.date_naive(), at(12, 0, 0).with_timezone(&REFRESH_TIMEZONE).date_naive());
    }

    #[test]
    fn exactly_five_pm_rolls_to_the_evening_slot() {
        let next = local(next_refresh_after(at(17, 0, 0), REFRESH_TIMEZONE));
        assert_eq!((next.hour(), next.minute()), (23, 30));
    }

    #[test]
    fn between_slots_resolves_to_eleven_thirty_pm() {
        let next = local(next_refresh_after(at(20, 15, 0), REFRESH_TIMEZONE));
        assert_eq!((next.hour(), next.minute()), (23, 30));
    }

    #[test]
    fn exactly_eleven_thirty_pm_rolls_to_tomorrow_five_pm() {
        let now = at(23, 30, 0);
        let next = local(next_refresh_after(now, REFRESH_TIMEZONE));
        assert_eq!((next.hour(), next.minute()), (17, 0));
        assert_eq!(
            next.date_naive(),
            now.with_timezone(&REFRESH_TIMEZONE).date_naive() + Duration::days(1)
        );
    }

    #[test]
    fn late_night_resolves_to_tomorrow_five_pm() {
        let now = at(23, 45, 0);
        let next = local(next_refresh_after(now, REFRESH_TIMEZONE));
        assert_eq!((next.hour(), next.minute()), (17, 0));
        assert_eq!(
            next.date_naive(),
            now.with_timezone(&REFRESH_TIMEZONE).date_naive() + Duration::days(1)
        );
    }

    #[test]
    fn result_is_always_strictly_in_the_future() {
        for (hour, minute) in [(0, 0), (16, 59), (17, 0), (23, 29), (23, 30), (23, 59)] {
            let now = at(hour, minute, 0);
            assert!(next_refresh_after(now, REFRESH_TIMEZONE) > now);
        }
    }
}
