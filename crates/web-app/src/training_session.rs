use chrono::{DateTime, Utc};
use log::debug;
use trainlog_domain::{
    Cue, RestKind, RestLabels, RestTimer, SessionExercises, Tick, TimerState, UpdateError,
};

use crate::{
    ongoing_training_session::{OngoingTrainingSession, RestTimerState},
    settings::Settings,
};

const BEEP_FREQUENCY: f32 = 2000.;

// ------ ------
//     Init
// ------ ------

#[must_use]
pub fn init(
    settings: Settings,
    ongoing_training_session: Option<&OngoingTrainingSession>,
    now: DateTime<Utc>,
) -> Model {
    Model {
        rest_timer: ongoing_training_session
            .map(|ongoing| ongoing.rest_timer.restore(now))
            .unwrap_or_default(),
        settings,
    }
}

// ------ ------
//     Model
// ------ ------

pub struct Model {
    rest_timer: RestTimer,
    settings: Settings,
}

impl Model {
    #[must_use]
    pub fn rest_timer(&self) -> Option<&TimerState> {
        self.rest_timer.state()
    }

    #[must_use]
    pub fn rest_progress(&self) -> f32 {
        self.rest_timer.progress_fraction()
    }

    /// The rest timer in the form it is persisted in.
    #[must_use]
    pub fn rest_timer_state(&self, now: DateTime<Utc>) -> RestTimerState {
        RestTimerState::capture(&self.rest_timer, now)
    }
}

/// A tone the view has to play, relative to the current time of the audio context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Beep {
    pub frequency: f32,
    pub start: f64,
    pub length: f64,
    pub gain: f32,
}

// ------ ------
//    Update
// ------ ------

pub enum Msg {
    SetCompleted {
        rest_seconds: Option<i64>,
        labels: RestLabels,
    },
    ExerciseCompleted {
        rest_seconds: Option<i64>,
        labels: RestLabels,
    },
    Tick,
    SkipRest,
    ApplyRestToAll,
    SettingsChanged(Settings),
}

/// Returns the beeps to be played.
///
/// A failure of applying the rest duration to all exercises is passed on unchanged.
pub fn update(
    msg: Msg,
    model: &mut Model,
    session: &mut impl SessionExercises,
) -> Result<Vec<Beep>, UpdateError> {
    match msg {
        Msg::SetCompleted {
            rest_seconds,
            labels,
        } => {
            start_rest(model, RestKind::Set, rest_seconds, labels);
        }
        Msg::ExerciseCompleted {
            rest_seconds,
            labels,
        } => {
            start_rest(model, RestKind::Exercise, rest_seconds, labels);
        }
        Msg::Tick => {
            return Ok(beeps(&model.settings, model.rest_timer.tick()));
        }
        Msg::SkipRest => {
            model.rest_timer.skip();
        }
        Msg::ApplyRestToAll => {
            let count = model.rest_timer.propagate_to_all(session)?;
            debug!("updated rest duration of {count} exercises");
        }
        Msg::SettingsChanged(settings) => {
            model.settings = settings;
        }
    }
    Ok(vec![])
}

fn start_rest(model: &mut Model, kind: RestKind, rest_seconds: Option<i64>, labels: RestLabels) {
    let seconds = rest_seconds.unwrap_or_else(|| model.settings.rest_seconds(kind));
    model.rest_timer.start(kind, seconds, labels);
}

fn beeps(settings: &Settings, tick: Tick) -> Vec<Beep> {
    if !settings.rest_timer_cues || settings.beep_volume == 0 {
        return vec![];
    }

    let beep = |start, length| Beep {
        frequency: BEEP_FREQUENCY,
        start,
        length,
        gain: settings.beep_gain(),
    };

    match tick {
        Tick::Running {
            cue: Some(Cue::Warning),
            ..
        } => vec![beep(0.01, 0.1), beep(0.18, 0.1)],
        Tick::Running {
            cue: Some(Cue::Countdown),
            ..
        } => vec![beep(0.01, 0.15)],
        Tick::Expired => vec![beep(0.01, 0.5)],
        Tick::Running { cue: None, .. } | Tick::Ignored => vec![],
    }
}
