//! Expands a recurring transaction's schedule into the concrete calendar
//! dates that need a transaction generated.
//!
//! Expansion produces dates strictly after a watermark (the last date
//! generation has been run through) and up to an "as of" date, inclusive.
//! This strict-after/inclusive split is what makes repeated generation runs
//! idempotent: a date produced by one run is `<=` the watermark stored by
//! that run and is therefore excluded from every later run, while no date
//! between two runs is ever skipped.

use time::{Date, Duration, Month};

use crate::models::{Frequency, Schedule};

impl Schedule {
    /// The calendar dates `d` on this schedule with
    /// `last_generated < d <= as_of`, in increasing order.
    ///
    /// If `end_date` is set, the sequence stops before the first candidate
    /// after it (a date equal to `end_date` is still produced).
    ///
    /// Monthly and yearly schedules clamp the requested day of the month to
    /// the length of each visited month, so day 31 produces the 30th in
    /// April and the 28th (or 29th) in February. No date is skipped or
    /// rolled over to the next month by clamping.
    ///
    /// A schedule that is missing a parameter its frequency requires yields
    /// no dates rather than failing, so generation stays robust against
    /// partially invalid stored rows. Validation belongs upstream, see
    /// [Schedule::new].
    ///
    /// The returned sequence is lazy and can be restarted by cloning it
    /// before iterating.
    pub fn dates_between(
        &self,
        last_generated: Date,
        as_of: Date,
        end_date: Option<Date>,
    ) -> DateSequence {
        let cursor = match self.frequency() {
            Frequency::Daily => match last_generated.next_day() {
                Some(next) => Cursor::Daily { next },
                None => Cursor::Exhausted,
            },
            Frequency::Weekly => match self.day_of_week() {
                Some(day_of_week) => first_weekly_candidate(last_generated, day_of_week)
                    .map_or(Cursor::Exhausted, |next| Cursor::Weekly { next }),
                None => Cursor::Exhausted,
            },
            Frequency::Monthly => match self.day_of_month() {
                Some(day_of_month) => {
                    // Start at the month after the watermark's month; a
                    // candidate within the watermark's own month would be on
                    // or before the watermark for any watermark written by a
                    // previous run.
                    let (year, month) = next_month(last_generated.year(), last_generated.month());
                    Cursor::Monthly {
                        year,
                        month,
                        day_of_month,
                        last_generated,
                    }
                }
                None => Cursor::Exhausted,
            },
            Frequency::Yearly => match (self.day_of_month(), self.month_of_year()) {
                (Some(day_of_month), Some(month_of_year)) => {
                    match Month::try_from(month_of_year) {
                        // The watermark's own year stays included because
                        // this year's occurrence may still be after the
                        // watermark.
                        Ok(month_of_year) => Cursor::Yearly {
                            year: last_generated.year(),
                            month_of_year,
                            day_of_month,
                            last_generated,
                        },
                        Err(_) => Cursor::Exhausted,
                    }
                }
                _ => Cursor::Exhausted,
            },
        };

        DateSequence {
            cursor,
            as_of,
            end_date,
        }
    }
}

/// The first date strictly after `last_generated` that falls on
/// `day_of_week` (0 = Monday, ..., 6 = Sunday).
fn first_weekly_candidate(last_generated: Date, day_of_week: u8) -> Option<Date> {
    let next = last_generated.next_day()?;
    let days_ahead = (i16::from(day_of_week)
        - i16::from(next.weekday().number_days_from_monday()))
    .rem_euclid(7);

    next.checked_add(Duration::days(i64::from(days_ahead)))
}

/// The calendar month directly after `month` of `year`.
fn next_month(year: i32, month: Month) -> (i32, Month) {
    if month == Month::December {
        (year + 1, Month::January)
    } else {
        (year, month.next())
    }
}

/// A lazy, finite sequence of the calendar dates a schedule falls on within
/// a generation window.
///
/// Produced by [Schedule::dates_between]. Dates are yielded in strictly
/// increasing order. Clone the sequence before iterating to keep a
/// restartable copy.
#[derive(Clone, Debug)]
pub struct DateSequence {
    cursor: Cursor,
    as_of: Date,
    end_date: Option<Date>,
}

#[derive(Clone, Debug)]
enum Cursor {
    Exhausted,
    Daily {
        next: Date,
    },
    Weekly {
        next: Date,
    },
    Monthly {
        year: i32,
        month: Month,
        day_of_month: u8,
        last_generated: Date,
    },
    Yearly {
        year: i32,
        month_of_year: Month,
        day_of_month: u8,
        last_generated: Date,
    },
}

impl DateSequence {
    /// Whether `candidate` passes the upper bounds, or the sequence is over.
    ///
    /// Candidates arrive in increasing order, so the first one past `as_of`
    /// or `end_date` ends the whole sequence.
    fn is_in_window(&self, candidate: Date) -> bool {
        candidate <= self.as_of && self.end_date.is_none_or(|end| candidate <= end)
    }
}

impl Iterator for DateSequence {
    type Item = Date;

    fn next(&mut self) -> Option<Date> {
        loop {
            match self.cursor {
                Cursor::Exhausted => return None,
                Cursor::Daily { next } => {
                    if !self.is_in_window(next) {
                        self.cursor = Cursor::Exhausted;
                        return None;
                    }

                    self.cursor = match next.next_day() {
                        Some(following) => Cursor::Daily { next: following },
                        None => Cursor::Exhausted,
                    };

                    return Some(next);
                }
                Cursor::Weekly { next } => {
                    if !self.is_in_window(next) {
                        self.cursor = Cursor::Exhausted;
                        return None;
                    }

                    self.cursor = match next.checked_add(Duration::days(7)) {
                        Some(following) => Cursor::Weekly { next: following },
                        None => Cursor::Exhausted,
                    };

                    return Some(next);
                }
                Cursor::Monthly {
                    year,
                    month,
                    day_of_month,
                    last_generated,
                } => {
                    if (year, month as u8) > (self.as_of.year(), self.as_of.month() as u8) {
                        self.cursor = Cursor::Exhausted;
                        return None;
                    }

                    let day = day_of_month.min(month.length(year));
                    let candidate = Date::from_calendar_date(year, month, day);

                    let (next_year, next_month) = next_month(year, month);
                    self.cursor = Cursor::Monthly {
                        year: next_year,
                        month: next_month,
                        day_of_month,
                        last_generated,
                    };

                    // An unrepresentable date is skipped rather than ending
                    // the expansion.
                    if let Ok(candidate) = candidate
                        && candidate > last_generated
                    {
                        if !self.is_in_window(candidate) {
                            self.cursor = Cursor::Exhausted;
                            return None;
                        }

                        return Some(candidate);
                    }
                }
                Cursor::Yearly {
                    year,
                    month_of_year,
                    day_of_month,
                    last_generated,
                } => {
                    if year > self.as_of.year() {
                        self.cursor = Cursor::Exhausted;
                        return None;
                    }

                    let day = day_of_month.min(month_of_year.length(year));
                    let candidate = Date::from_calendar_date(year, month_of_year, day);

                    self.cursor = Cursor::Yearly {
                        year: year + 1,
                        month_of_year,
                        day_of_month,
                        last_generated,
                    };

                    if let Ok(candidate) = candidate
                        && candidate > last_generated
                    {
                        if !self.is_in_window(candidate) {
                            self.cursor = Cursor::Exhausted;
                            return None;
                        }

                        return Some(candidate);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod date_sequence_tests {
    use time::{Date, Month};

    use crate::models::{Frequency, Schedule};

    fn date(year: i32, month: u8, day: u8) -> Date {
        Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
    }

    fn expand(
        schedule: Schedule,
        last_generated: Date,
        as_of: Date,
        end_date: Option<Date>,
    ) -> Vec<Date> {
        schedule
            .dates_between(last_generated, as_of, end_date)
            .collect()
    }

    #[test]
    fn daily_produces_every_day_after_watermark_through_as_of() {
        let schedule = Schedule::new_unchecked(Frequency::Daily, None, None, None);

        let got = expand(schedule, date(2024, 3, 10), date(2024, 3, 13), None);

        assert_eq!(
            got,
            vec![date(2024, 3, 11), date(2024, 3, 12), date(2024, 3, 13)]
        );
    }

    #[test]
    fn daily_stops_at_end_date() {
        let schedule = Schedule::new_unchecked(Frequency::Daily, None, None, None);

        let got = expand(
            schedule,
            date(2024, 1, 3),
            date(2024, 1, 10),
            Some(date(2024, 1, 5)),
        );

        assert_eq!(got, vec![date(2024, 1, 4), date(2024, 1, 5)]);
    }

    #[test]
    fn daily_produces_nothing_when_watermark_equals_as_of() {
        let schedule = Schedule::new_unchecked(Frequency::Daily, None, None, None);

        let got = expand(schedule, date(2024, 3, 10), date(2024, 3, 10), None);

        assert_eq!(got, vec![]);
    }

    #[test]
    fn weekly_aligns_to_day_of_week_then_steps_by_seven_days() {
        // 2024-01-01 is a Monday; the first Monday strictly after the
        // watermark is 2024-01-08.
        let schedule = Schedule::new_unchecked(Frequency::Weekly, Some(0), None, None);

        let got = expand(schedule, date(2024, 1, 1), date(2024, 1, 22), None);

        assert_eq!(
            got,
            vec![date(2024, 1, 8), date(2024, 1, 15), date(2024, 1, 22)]
        );
    }

    #[test]
    fn weekly_first_candidate_can_be_day_after_watermark() {
        // 2024-01-01 is a Monday, so the first Tuesday (1) after it is the
        // very next day.
        let schedule = Schedule::new_unchecked(Frequency::Weekly, Some(1), None, None);

        let got = expand(schedule, date(2024, 1, 1), date(2024, 1, 9), None);

        assert_eq!(got, vec![date(2024, 1, 2), date(2024, 1, 9)]);
    }

    #[test]
    fn weekly_without_day_of_week_produces_nothing() {
        let schedule = Schedule::new_unchecked(Frequency::Weekly, None, None, None);

        let got = expand(schedule, date(2024, 1, 1), date(2024, 2, 1), None);

        assert_eq!(got, vec![]);
    }

    #[test]
    fn monthly_clamps_to_short_months() {
        // Day 31 across February (non-leap) and April clamps to the 28th
        // and 30th.
        let schedule = Schedule::new_unchecked(Frequency::Monthly, None, Some(31), None);

        let got = expand(schedule, date(2023, 1, 31), date(2023, 4, 30), None);

        assert_eq!(
            got,
            vec![date(2023, 2, 28), date(2023, 3, 31), date(2023, 4, 30)]
        );
    }

    #[test]
    fn monthly_clamps_to_leap_february() {
        let schedule = Schedule::new_unchecked(Frequency::Monthly, None, Some(31), None);

        let got = expand(schedule, date(2024, 1, 31), date(2024, 2, 29), None);

        assert_eq!(got, vec![date(2024, 2, 29)]);
    }

    #[test]
    fn monthly_starts_at_month_after_watermark() {
        // The candidate in the watermark's own month (2024-03-25) is not
        // produced even though it is after the watermark.
        let schedule = Schedule::new_unchecked(Frequency::Monthly, None, Some(25), None);

        let got = expand(schedule, date(2024, 3, 10), date(2024, 5, 31), None);

        assert_eq!(got, vec![date(2024, 4, 25), date(2024, 5, 25)]);
    }

    #[test]
    fn monthly_excludes_candidate_after_as_of() {
        let schedule = Schedule::new_unchecked(Frequency::Monthly, None, Some(20), None);

        let got = expand(schedule, date(2024, 3, 31), date(2024, 5, 10), None);

        assert_eq!(got, vec![date(2024, 4, 20)]);
    }

    #[test]
    fn monthly_crosses_year_boundary() {
        let schedule = Schedule::new_unchecked(Frequency::Monthly, None, Some(15), None);

        let got = expand(schedule, date(2023, 11, 20), date(2024, 1, 31), None);

        assert_eq!(got, vec![date(2023, 12, 15), date(2024, 1, 15)]);
    }

    #[test]
    fn yearly_on_leap_day_skips_non_leap_years() {
        let schedule = Schedule::new_unchecked(Frequency::Yearly, None, Some(29), Some(2));

        let got = expand(schedule, date(2023, 1, 1), date(2026, 12, 31), None);

        // 2023, 2025 and 2026 clamp to February 28th; 2024 is a leap year.
        assert_eq!(
            got,
            vec![
                date(2023, 2, 28),
                date(2024, 2, 29),
                date(2025, 2, 28),
                date(2026, 2, 28)
            ]
        );
    }

    #[test]
    fn yearly_includes_watermark_year_when_occurrence_is_later() {
        let schedule = Schedule::new_unchecked(Frequency::Yearly, None, Some(25), Some(12));

        let got = expand(schedule, date(2024, 6, 1), date(2025, 12, 31), None);

        assert_eq!(got, vec![date(2024, 12, 25), date(2025, 12, 25)]);
    }

    #[test]
    fn yearly_excludes_occurrence_on_or_before_watermark() {
        let schedule = Schedule::new_unchecked(Frequency::Yearly, None, Some(1), Some(1));

        let got = expand(schedule, date(2024, 1, 1), date(2025, 6, 1), None);

        assert_eq!(got, vec![date(2025, 1, 1)]);
    }

    #[test]
    fn yearly_stops_at_end_date() {
        let schedule = Schedule::new_unchecked(Frequency::Yearly, None, Some(1), Some(7));

        let got = expand(
            schedule,
            date(2022, 12, 31),
            date(2025, 12, 31),
            Some(date(2024, 7, 1)),
        );

        assert_eq!(got, vec![date(2023, 7, 1), date(2024, 7, 1)]);
    }

    #[test]
    fn sequence_is_restartable_by_cloning() {
        let schedule = Schedule::new_unchecked(Frequency::Daily, None, None, None);
        let sequence = schedule.dates_between(date(2024, 3, 10), date(2024, 3, 13), None);

        let first: Vec<_> = sequence.clone().collect();
        let second: Vec<_> = sequence.collect();

        assert_eq!(first, second);
    }

    #[test]
    fn split_windows_cover_the_same_dates_as_one_window() {
        // Generating in two runs (watermark advancing in between) must
        // produce exactly the dates of a single run over the whole window.
        let schedule = Schedule::new_unchecked(Frequency::Weekly, Some(3), None, None);
        let start = date(2024, 1, 1);
        let middle = date(2024, 2, 10);
        let end = date(2024, 3, 20);

        let mut split: Vec<_> = expand(schedule, start, middle, None);
        split.extend(expand(schedule, middle, end, None));

        let whole = expand(schedule, start, end, None);

        assert_eq!(split, whole);
    }
}
