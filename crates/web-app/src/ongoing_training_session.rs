use chrono::{DateTime, Duration, Utc};
use log::warn;
use trainlog_domain::{RestKind, RestLabels, RestTimer, TrainingSessionID};

/// The state of a training session that survives a reload of the app.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct OngoingTrainingSession {
    pub training_session_id: u128,
    pub start_time: DateTime<Utc>,
    pub rest_timer: RestTimerState,
}

impl OngoingTrainingSession {
    #[must_use]
    pub fn new(training_session_id: TrainingSessionID, start_time: DateTime<Utc>) -> Self {
        Self {
            training_session_id: training_session_id.as_u128(),
            start_time,
            rest_timer: RestTimerState::Unset,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum RestTimerState {
    Unset,
    Active {
        #[serde(with = "RestKindDef")]
        kind: RestKind,
        target_time: DateTime<Utc>,
        total_seconds: i64,
        exercise_label: Option<String>,
        next_exercise_label: Option<String>,
    },
}

impl RestTimerState {
    /// Snapshot a running timer. A target time that cannot be represented is not persisted.
    #[must_use]
    pub fn capture(rest_timer: &RestTimer, now: DateTime<Utc>) -> Self {
        let Some(state) = rest_timer.state() else {
            return RestTimerState::Unset;
        };

        let Some(target_time) = Duration::try_seconds(state.remaining_seconds())
            .and_then(|remaining| now.checked_add_signed(remaining))
        else {
            warn!(
                "failed to persist rest timer: {} s remaining is out of range",
                state.remaining_seconds()
            );
            return RestTimerState::Unset;
        };

        RestTimerState::Active {
            kind: state.kind(),
            target_time,
            total_seconds: state.total_seconds(),
            exercise_label: state.exercise_label().map(str::to_string),
            next_exercise_label: state.next_exercise_label().map(str::to_string),
        }
    }

    /// Rebuild the timer. A timer whose target time has already passed stays idle.
    #[must_use]
    pub fn restore(&self, now: DateTime<Utc>) -> RestTimer {
        let mut rest_timer = RestTimer::new();

        if let RestTimerState::Active {
            kind,
            target_time,
            total_seconds,
            exercise_label,
            next_exercise_label,
        } = self
        {
            let remaining_seconds = target_time
                .signed_duration_since(now)
                .num_milliseconds()
                .saturating_add(999)
                .div_euclid(1000);
            rest_timer.resume(
                *kind,
                *total_seconds,
                remaining_seconds,
                RestLabels {
                    exercise: exercise_label.clone(),
                    next_exercise: next_exercise_label.clone(),
                },
            );
        }

        rest_timer
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(remote = "RestKind")]
enum RestKindDef {
    Set,
    Exercise,
}
