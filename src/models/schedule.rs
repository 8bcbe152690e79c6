//! Defines the schedule of a recurring transaction: its frequency plus the
//! frequency-specific parameters (weekday, day of the month, month).

use serde::{Deserialize, Serialize};

use crate::{Error, models::Frequency};

/// When a recurring transaction repeats.
///
/// Which of the optional parameters must be set depends on the frequency:
///
/// - [Frequency::Daily]: no parameters.
/// - [Frequency::Weekly]: `day_of_week` (0 = Monday, ..., 6 = Sunday).
/// - [Frequency::Monthly]: `day_of_month` (1-31).
/// - [Frequency::Yearly]: `day_of_month` and `month_of_year` (1-12).
///
/// Parameters that a frequency does not use are ignored during expansion.
///
/// New instances should be created through [Schedule::new] which validates
/// the above rules. [Schedule::new_unchecked] skips validation and is meant
/// for rows loaded from the database, which were validated on the way in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    frequency: Frequency,
    day_of_week: Option<u8>,
    day_of_month: Option<u8>,
    month_of_year: Option<u8>,
}

impl Schedule {
    /// Create a new `Schedule`, validating that the parameters required for
    /// `frequency` are present and within range.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidDayOfWeek] if `day_of_week` is set but not in 0-6,
    /// - [Error::InvalidDayOfMonth] if `day_of_month` is set but not in 1-31,
    /// - [Error::InvalidMonthOfYear] if `month_of_year` is set but not in 1-12,
    /// - [Error::MissingDayOfWeek] for a weekly schedule without `day_of_week`,
    /// - [Error::MissingDayOfMonth] for a monthly or yearly schedule without
    ///   `day_of_month`,
    /// - or [Error::MissingMonthOfYear] for a yearly schedule without
    ///   `month_of_year`.
    pub fn new(
        frequency: Frequency,
        day_of_week: Option<u8>,
        day_of_month: Option<u8>,
        month_of_year: Option<u8>,
    ) -> Result<Self, Error> {
        if let Some(day) = day_of_week
            && day > 6
        {
            return Err(Error::InvalidDayOfWeek(i64::from(day)));
        }

        if let Some(day) = day_of_month
            && !(1..=31).contains(&day)
        {
            return Err(Error::InvalidDayOfMonth(i64::from(day)));
        }

        if let Some(month) = month_of_year
            && !(1..=12).contains(&month)
        {
            return Err(Error::InvalidMonthOfYear(i64::from(month)));
        }

        match frequency {
            Frequency::Daily => {}
            Frequency::Weekly if day_of_week.is_none() => return Err(Error::MissingDayOfWeek),
            Frequency::Weekly => {}
            Frequency::Monthly if day_of_month.is_none() => return Err(Error::MissingDayOfMonth),
            Frequency::Monthly => {}
            Frequency::Yearly if day_of_month.is_none() => return Err(Error::MissingDayOfMonth),
            Frequency::Yearly if month_of_year.is_none() => return Err(Error::MissingMonthOfYear),
            Frequency::Yearly => {}
        }

        Ok(Self {
            frequency,
            day_of_week,
            day_of_month,
            month_of_year,
        })
    }

    /// Create a new `Schedule` without validating the parameters.
    ///
    /// The caller should ensure that the parameters required for `frequency`
    /// are present and within range. A schedule that violates this produces
    /// no dates during expansion rather than causing an error, so generation
    /// stays robust against partially invalid stored rows.
    pub fn new_unchecked(
        frequency: Frequency,
        day_of_week: Option<u8>,
        day_of_month: Option<u8>,
        month_of_year: Option<u8>,
    ) -> Self {
        Self {
            frequency,
            day_of_week,
            day_of_month,
            month_of_year,
        }
    }

    /// How often the schedule repeats.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// The weekday a weekly schedule falls on (0 = Monday, ..., 6 = Sunday).
    pub fn day_of_week(&self) -> Option<u8> {
        self.day_of_week
    }

    /// The day of the month a monthly or yearly schedule falls on (1-31).
    pub fn day_of_month(&self) -> Option<u8> {
        self.day_of_month
    }

    /// The month a yearly schedule falls in (1 = January, ..., 12 = December).
    pub fn month_of_year(&self) -> Option<u8> {
        self.month_of_year
    }
}

#[cfg(test)]
mod schedule_tests {
    use crate::{Error, models::Frequency};

    use super::Schedule;

    #[test]
    fn new_daily_schedule_needs_no_parameters() {
        let schedule = Schedule::new(Frequency::Daily, None, None, None);

        assert!(schedule.is_ok());
    }

    #[test]
    fn new_weekly_schedule_fails_without_day_of_week() {
        let schedule = Schedule::new(Frequency::Weekly, None, None, None);

        assert_eq!(schedule, Err(Error::MissingDayOfWeek));
    }

    #[test]
    fn new_monthly_schedule_fails_without_day_of_month() {
        let schedule = Schedule::new(Frequency::Monthly, None, None, None);

        assert_eq!(schedule, Err(Error::MissingDayOfMonth));
    }

    #[test]
    fn new_yearly_schedule_fails_without_month_of_year() {
        let schedule = Schedule::new(Frequency::Yearly, None, Some(29), None);

        assert_eq!(schedule, Err(Error::MissingMonthOfYear));
    }

    #[test]
    fn new_schedule_fails_on_out_of_range_day_of_week() {
        let schedule = Schedule::new(Frequency::Weekly, Some(7), None, None);

        assert_eq!(schedule, Err(Error::InvalidDayOfWeek(7)));
    }

    #[test]
    fn new_schedule_fails_on_out_of_range_day_of_month() {
        let schedule = Schedule::new(Frequency::Monthly, None, Some(32), None);

        assert_eq!(schedule, Err(Error::InvalidDayOfMonth(32)));
    }

    #[test]
    fn new_schedule_fails_on_out_of_range_month_of_year() {
        let schedule = Schedule::new(Frequency::Yearly, None, Some(1), Some(13));

        assert_eq!(schedule, Err(Error::InvalidMonthOfYear(13)));
    }

    #[test]
    fn new_yearly_schedule_succeeds_with_both_parameters() {
        let schedule = Schedule::new(Frequency::Yearly, None, Some(29), Some(2)).unwrap();

        assert_eq!(schedule.day_of_month(), Some(29));
        assert_eq!(schedule.month_of_year(), Some(2));
    }
}
