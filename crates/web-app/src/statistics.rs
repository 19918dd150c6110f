use chrono::NaiveDate;
use log::debug;
use trainlog_domain::{Interval, StatisticsNavigation, TimePeriod, TouchGesture};

use crate::settings::Settings;

// ------ ------
//     Init
// ------ ------

#[must_use]
pub fn init(settings: &Settings, earliest_workout_date: Option<NaiveDate>) -> Model {
    Model {
        navigation: StatisticsNavigation::new(
            settings.default_time_period,
            earliest_workout_date,
        ),
        gesture: TouchGesture::default(),
    }
}

// ------ ------
//     Model
// ------ ------

pub struct Model {
    navigation: StatisticsNavigation,
    gesture: TouchGesture,
}

/// Everything the view needs to render the period selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub time_period: TimePeriod,
    pub offset: i32,
    pub can_navigate_previous: bool,
    pub can_navigate_next: bool,
    pub interval: Interval,
}

impl Model {
    #[must_use]
    pub fn navigation(&self, today: NaiveDate) -> Navigation {
        Navigation {
            time_period: self.navigation.time_period(),
            offset: self.navigation.offset(),
            can_navigate_previous: self.navigation.can_navigate_previous(today),
            can_navigate_next: self.navigation.can_navigate_next(),
            interval: self.navigation.interval(today),
        }
    }
}

// ------ ------
//    Update
// ------ ------

pub enum Msg {
    TouchStart(f64),
    TouchMove(f64),
    TouchEnd,
    TouchCancel,
    SelectTimePeriod(TimePeriod),
    PreviousPeriod,
    NextPeriod,
}

/// Returns whether the displayed period has changed.
pub fn update(msg: Msg, model: &mut Model, today: NaiveDate) -> bool {
    match msg {
        Msg::TouchStart(x) => {
            model.gesture.touch_start(x);
            false
        }
        Msg::TouchMove(x) => {
            model.gesture.touch_move(x);
            false
        }
        Msg::TouchEnd => match model.gesture.touch_end() {
            Some(command) => {
                debug!("swipe to {command:?} {}", model.navigation.time_period());
                model.navigation.apply(command, today)
            }
            None => false,
        },
        Msg::TouchCancel => {
            model.gesture.cancel();
            false
        }
        Msg::SelectTimePeriod(time_period) => {
            let previous = model.navigation.time_period();
            model.navigation.set_time_period(time_period);
            previous != time_period
        }
        Msg::PreviousPeriod => model.navigation.navigate_previous(today),
        Msg::NextPeriod => model.navigation.navigate_next(),
    }
}
