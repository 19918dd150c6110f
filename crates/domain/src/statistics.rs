use chrono::{Datelike, Days, Months, NaiveDate};
use derive_more::Display;
use log::debug;

use crate::SwipeCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl From<std::ops::RangeInclusive<NaiveDate>> for Interval {
    fn from(value: std::ops::RangeInclusive<NaiveDate>) -> Self {
        Interval {
            first: *value.start(),
            last: *value.end(),
        }
    }
}

#[derive(Debug, Display, Default, Clone, Copy, PartialEq, Eq)]
pub enum TimePeriod {
    #[display("week")]
    Week,
    #[default]
    #[display("month")]
    Month,
}

/// Selects the period shown on the statistics page.
///
/// The offset counts months relative to the current month and is only changed in
/// [`TimePeriod::Month`]. It never exceeds zero and never points before the month of the
/// earliest workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsNavigation {
    time_period: TimePeriod,
    offset: i32,
    earliest_workout_date: Option<NaiveDate>,
}

impl StatisticsNavigation {
    #[must_use]
    pub fn new(time_period: TimePeriod, earliest_workout_date: Option<NaiveDate>) -> Self {
        Self {
            time_period,
            offset: 0,
            earliest_workout_date,
        }
    }

    #[must_use]
    pub fn time_period(&self) -> TimePeriod {
        self.time_period
    }

    #[must_use]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    #[must_use]
    pub fn earliest_workout_date(&self) -> Option<NaiveDate> {
        self.earliest_workout_date
    }

    /// Switch the mode. Switching to another mode goes back to the current period.
    pub fn set_time_period(&mut self, time_period: TimePeriod) {
        if self.time_period != time_period {
            debug!("switching statistics from {} to {time_period}", self.time_period);
            self.time_period = time_period;
            self.offset = 0;
        }
    }

    #[must_use]
    pub fn can_navigate_previous(&self, today: NaiveDate) -> bool {
        if self.time_period != TimePeriod::Month {
            return false;
        }

        let Some(earliest_workout_date) = self.earliest_workout_date else {
            return false;
        };

        month_at(today, self.offset.saturating_sub(1))
            .is_some_and(|target| target >= first_day_of_month(earliest_workout_date))
    }

    #[must_use]
    pub fn can_navigate_next(&self) -> bool {
        self.time_period == TimePeriod::Month && self.offset < 0
    }

    /// Returns whether the offset has changed.
    pub fn navigate_previous(&mut self, today: NaiveDate) -> bool {
        if !self.can_navigate_previous(today) {
            return false;
        }
        self.offset -= 1;
        true
    }

    /// Returns whether the offset has changed.
    pub fn navigate_next(&mut self) -> bool {
        if !self.can_navigate_next() {
            return false;
        }
        self.offset += 1;
        true
    }

    pub fn apply(&mut self, command: SwipeCommand, today: NaiveDate) -> bool {
        match command {
            SwipeCommand::Previous => self.navigate_previous(today),
            SwipeCommand::Next => self.navigate_next(),
        }
    }

    /// The dates covered by the selected period.
    #[must_use]
    pub fn interval(&self, today: NaiveDate) -> Interval {
        match self.time_period {
            TimePeriod::Week => {
                let first = today
                    .checked_sub_days(Days::new(u64::from(
                        today.weekday().num_days_from_monday(),
                    )))
                    .unwrap_or(today);
                Interval {
                    first,
                    last: first.checked_add_days(Days::new(6)).unwrap_or(first),
                }
            }
            TimePeriod::Month => {
                let first = month_at(today, self.offset).unwrap_or(first_day_of_month(today));
                Interval {
                    first,
                    last: first
                        .checked_add_months(Months::new(1))
                        .and_then(|next| next.pred_opt())
                        .unwrap_or(first),
                }
            }
        }
    }
}

#[must_use]
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month `offset` months away from the month of `today`.
fn month_at(today: NaiveDate, offset: i32) -> Option<NaiveDate> {
    let months = Months::new(offset.unsigned_abs());
    let first = first_day_of_month(today);

    if offset < 0 {
        first.checked_sub_months(months)
    } else {
        first.checked_add_months(months)
    }
}
