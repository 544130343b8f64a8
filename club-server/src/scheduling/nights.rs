//! Night selector
//!
//! Pure date calculation: no I/O, independent of what the store has
//! provisioned. Availability of slots for the returned candidates is a
//! separate concern ([`super::availability`]).

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Weekday};
use chrono_tz::Tz;

use shared::models::NightDay;

/// A night the club is currently offering orders for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightCandidate {
    pub date: NaiveDate,
    pub day: NightDay,
}

/// Compute the currently offerable nights: the active weekend's Friday and
/// Saturday, chronologically ordered.
///
/// The scan starts at `now`'s date and walks forward one day at a time,
/// emitting the first Friday it sees and stopping at the first Saturday.
/// Same-day nights are included, so:
/// - Monday–Friday: this week's Friday and Saturday (two entries)
/// - Saturday before `cutoff`: today only (Friday is gone)
/// - Saturday after `cutoff`, or Sunday: next week's pair
///
/// `cutoff` is the last bookable start time of a night (the roster's final
/// slot); past it on a Saturday the weekend rolls over.
pub fn current_nights(now: DateTime<Tz>, cutoff: NaiveTime) -> Vec<NightCandidate> {
    let mut day = now.date_naive();

    // Saturday past the last slot: this weekend is over, start from Sunday
    // and let the scan land on the next Friday.
    if day.weekday() == Weekday::Sat && now.time() > cutoff {
        day = day.succ_opt().unwrap_or(day);
    }

    let mut nights = Vec::with_capacity(2);
    loop {
        match day.weekday() {
            Weekday::Fri => nights.push(NightCandidate {
                date: day,
                day: NightDay::Friday,
            }),
            Weekday::Sat => {
                nights.push(NightCandidate {
                    date: day,
                    day: NightDay::Saturday,
                });
                break;
            }
            _ => {}
        }
        day = match day.succ_opt() {
            Some(d) => d,
            None => break, // calendar overflow, nothing sane to offer
        };
    }
    nights
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    const TZ: Tz = New_York;

    fn cutoff() -> NaiveTime {
        NaiveTime::from_hms_opt(19, 30, 0).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        TZ.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2025-01-10 is a Friday, 2025-01-11 a Saturday.

    #[test]
    fn test_midweek_yields_this_weekend() {
        let nights = current_nights(at(2025, 1, 8, 12, 0), cutoff());
        assert_eq!(nights.len(), 2);
        assert_eq!(nights[0], NightCandidate { date: date(2025, 1, 10), day: NightDay::Friday });
        assert_eq!(nights[1], NightCandidate { date: date(2025, 1, 11), day: NightDay::Saturday });
    }

    #[test]
    fn test_friday_includes_same_day() {
        let nights = current_nights(at(2025, 1, 10, 18, 45), cutoff());
        assert_eq!(nights.len(), 2);
        assert_eq!(nights[0].date, date(2025, 1, 10));
        assert_eq!(nights[1].date, date(2025, 1, 11));
    }

    #[test]
    fn test_saturday_before_cutoff_keeps_today() {
        let nights = current_nights(at(2025, 1, 11, 19, 0), cutoff());
        assert_eq!(nights.len(), 1);
        assert_eq!(nights[0], NightCandidate { date: date(2025, 1, 11), day: NightDay::Saturday });
    }

    #[test]
    fn test_saturday_at_cutoff_still_active() {
        // Exactly 19:30: the last slot is still bookable, weekend holds.
        let nights = current_nights(at(2025, 1, 11, 19, 30), cutoff());
        assert_eq!(nights.len(), 1);
        assert_eq!(nights[0].date, date(2025, 1, 11));
    }

    #[test]
    fn test_saturday_past_cutoff_rolls_over() {
        let nights = current_nights(at(2025, 1, 11, 21, 0), cutoff());
        assert_eq!(nights.len(), 2);
        assert_eq!(nights[0].date, date(2025, 1, 17));
        assert_eq!(nights[1].date, date(2025, 1, 18));
    }

    #[test]
    fn test_sunday_rolls_over() {
        let nights = current_nights(at(2025, 1, 12, 9, 0), cutoff());
        assert_eq!(nights.len(), 2);
        assert_eq!(nights[0].date, date(2025, 1, 17));
        assert_eq!(nights[1].date, date(2025, 1, 18));
    }

    #[test]
    fn test_invariants_over_a_year() {
        // At most 2 entries; when 2, Friday then the immediately following
        // Saturday; all entries are Friday/Saturday and never in the past.
        let mut day = at(2025, 1, 1, 12, 0);
        for _ in 0..365 {
            let nights = current_nights(day, cutoff());
            assert!(!nights.is_empty() && nights.len() <= 2);
            for n in &nights {
                assert!(matches!(n.day, NightDay::Friday | NightDay::Saturday));
                assert!(n.date >= day.date_naive());
            }
            if nights.len() == 2 {
                assert_eq!(nights[0].day, NightDay::Friday);
                assert_eq!(nights[1].day, NightDay::Saturday);
                assert_eq!(nights[0].date.succ_opt().unwrap(), nights[1].date);
            }
            day += chrono::Duration::days(1);
        }
    }
}
