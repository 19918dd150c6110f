use derive_more::Display;
use log::{debug, error, warn};

use crate::{ExerciseID, UpdateError};

/// Remaining seconds at which a warning cue is emitted.
pub const WARNING_SECONDS: i64 = 10;
/// Remaining seconds from which each tick emits a countdown cue.
pub const COUNTDOWN_SECONDS: i64 = 2;

/// The session-data collaborator consulted when a rest duration is applied to all exercises.
pub trait SessionExercises {
    /// All exercises of the ongoing session except the one the running timer belongs to.
    fn other_exercises(&self) -> Vec<ExerciseID>;
    fn replace_rest_duration(
        &mut self,
        exercise_id: ExerciseID,
        kind: RestKind,
        seconds: i64,
    ) -> Result<(), UpdateError>;
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum RestKind {
    /// Rest between two sets of the same exercise.
    #[display("set rest")]
    Set,
    /// Rest after the last set of an exercise.
    #[display("exercise rest")]
    Exercise,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RestLabels {
    pub exercise: Option<String>,
    pub next_exercise: Option<String>,
}

/// A running rest interval.
///
/// Only [`RestTimer`] creates and mutates values of this type, which keeps
/// `0 < remaining_seconds <= total_seconds` for as long as the state exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    kind: RestKind,
    remaining_seconds: i64,
    total_seconds: i64,
    labels: RestLabels,
}

impl TimerState {
    #[must_use]
    pub fn kind(&self) -> RestKind {
        self.kind
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> i64 {
        self.remaining_seconds
    }

    #[must_use]
    pub fn total_seconds(&self) -> i64 {
        self.total_seconds
    }

    #[must_use]
    pub fn exercise_label(&self) -> Option<&str> {
        self.labels.exercise.as_deref()
    }

    #[must_use]
    pub fn next_exercise_label(&self) -> Option<&str> {
        self.labels.next_exercise.as_deref()
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> i64 {
        (self.total_seconds - self.remaining_seconds).clamp(0, self.total_seconds.max(0))
    }

    /// Fraction of the interval that has passed, always within `[0, 1]`.
    #[must_use]
    pub fn progress_fraction(&self) -> f32 {
        if self.total_seconds <= 0 {
            return 1.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let fraction = (self.total_seconds - self.remaining_seconds) as f32
            / self.total_seconds as f32;
        if fraction.is_nan() {
            return 0.0;
        }
        fraction.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Warning,
    Countdown,
}

impl Cue {
    fn at(remaining_seconds: i64) -> Option<Cue> {
        match remaining_seconds {
            WARNING_SECONDS => Some(Cue::Warning),
            1..=COUNTDOWN_SECONDS => Some(Cue::Countdown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// No timer was running.
    Ignored,
    Running {
        remaining_seconds: i64,
        cue: Option<Cue>,
    },
    /// The timer reached zero and the coordinator is idle again.
    Expired,
}

/// Coordinates the single rest interval of an ongoing training session.
///
/// The timer does not schedule itself. An external driver calls [`RestTimer::tick`]
/// once per second while [`RestTimer::is_active`] holds.
#[derive(Debug, Default, Clone)]
pub struct RestTimer {
    state: Option<TimerState>,
}

impl RestTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> Option<&TimerState> {
        self.state.as_ref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Start a rest interval.
    ///
    /// A running interval is never replaced and a non-positive duration is ignored.
    /// Returns whether a new interval has been started.
    pub fn start(&mut self, kind: RestKind, total_seconds: i64, labels: RestLabels) -> bool {
        if let Some(state) = &self.state {
            debug!(
                "ignoring start of {kind}, {} is still running",
                state.kind
            );
            return false;
        }

        if total_seconds <= 0 {
            warn!("ignoring {kind} with invalid duration of {total_seconds} s");
            return false;
        }

        debug!("starting {kind} of {total_seconds} s");
        self.state = Some(TimerState {
            kind,
            remaining_seconds: total_seconds,
            total_seconds,
            labels,
        });
        true
    }

    /// Continue a previously persisted interval.
    pub fn resume(
        &mut self,
        kind: RestKind,
        total_seconds: i64,
        remaining_seconds: i64,
        labels: RestLabels,
    ) -> bool {
        if self.state.is_some() {
            debug!("ignoring resumption of {kind}, timer is already running");
            return false;
        }

        if total_seconds <= 0 || remaining_seconds <= 0 {
            debug!("not resuming {kind} with {remaining_seconds} of {total_seconds} s remaining");
            return false;
        }

        self.state = Some(TimerState {
            kind,
            remaining_seconds: remaining_seconds.min(total_seconds),
            total_seconds,
            labels,
        });
        true
    }

    pub fn tick(&mut self) -> Tick {
        let Some(state) = self.state.as_mut() else {
            return Tick::Ignored;
        };

        state.remaining_seconds -= 1;

        if state.remaining_seconds <= 0 {
            debug!("{} of {} s expired", state.kind, state.total_seconds);
            self.state = None;
            return Tick::Expired;
        }

        Tick::Running {
            remaining_seconds: state.remaining_seconds,
            cue: Cue::at(state.remaining_seconds),
        }
    }

    pub fn skip(&mut self) {
        if let Some(state) = self.state.take() {
            debug!(
                "skipping {} with {} s remaining",
                state.kind, state.remaining_seconds
            );
        }
    }

    #[must_use]
    pub fn progress_fraction(&self) -> f32 {
        self.state
            .as_ref()
            .map_or(0.0, TimerState::progress_fraction)
    }

    /// Apply the duration of the running interval to all other exercises of the session.
    ///
    /// The running interval itself stays untouched. Returns the number of updated
    /// exercises. The first failing update stops the propagation and is returned.
    pub fn propagate_to_all<S>(&self, session: &mut S) -> Result<usize, UpdateError>
    where
        S: SessionExercises + ?Sized,
    {
        let Some(state) = &self.state else {
            debug!("ignoring propagation of rest duration, no timer is running");
            return Ok(0);
        };

        let exercises = session.other_exercises();

        for exercise_id in &exercises {
            if let Err(err) =
                session.replace_rest_duration(*exercise_id, state.kind, state.total_seconds)
            {
                if err.is_offline() {
                    debug!("failed to replace {} of exercise: {err}", state.kind);
                } else {
                    error!("failed to replace {} of exercise: {err}", state.kind);
                }
                return Err(err);
            }
        }

        debug!(
            "applied {} of {} s to {} exercises",
            state.kind,
            state.total_seconds,
            exercises.len()
        );

        Ok(exercises.len())
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::StorageError;

    use super::*;

    struct Session {
        exercises: Vec<ExerciseID>,
        replaced: Vec<(ExerciseID, RestKind, i64)>,
        failing: Option<ExerciseID>,
    }

    impl Session {
        fn new(exercises: &[u128]) -> Self {
            Self {
                exercises: exercises.iter().map(|id| ExerciseID::from(*id)).collect(),
                replaced: vec![],
                failing: None,
            }
        }
    }

    impl SessionExercises for Session {
        fn other_exercises(&self) -> Vec<ExerciseID> {
            self.exercises.clone()
        }

        fn replace_rest_duration(
            &mut self,
            exercise_id: ExerciseID,
            kind: RestKind,
            seconds: i64,
        ) -> Result<(), UpdateError> {
            if self.failing == Some(exercise_id) {
                return Err(UpdateError::Storage(StorageError::NoConnection));
            }
            self.replaced.push((exercise_id, kind, seconds));
            Ok(())
        }
    }

    fn labels() -> RestLabels {
        RestLabels {
            exercise: Some(String::from("Squat")),
            next_exercise: Some(String::from("Deadlift")),
        }
    }

    fn running(kind: RestKind, total_seconds: i64) -> RestTimer {
        let mut timer = RestTimer::new();
        assert!(timer.start(kind, total_seconds, labels()));
        timer
    }

    #[test]
    fn test_start() {
        let timer = running(RestKind::Set, 90);
        let state = timer.state().unwrap();

        assert!(timer.is_active());
        assert_eq!(state.kind(), RestKind::Set);
        assert_eq!(state.remaining_seconds(), 90);
        assert_eq!(state.total_seconds(), 90);
        assert_eq!(state.exercise_label(), Some("Squat"));
        assert_eq!(state.next_exercise_label(), Some("Deadlift"));
    }

    #[rstest]
    #[case::zero(0)]
    #[case::negative(-1)]
    #[case::large_negative(i64::MIN)]
    fn test_start_invalid_duration(#[case] total_seconds: i64) {
        let mut timer = RestTimer::new();

        assert!(!timer.start(RestKind::Exercise, total_seconds, RestLabels::default()));
        assert!(!timer.is_active());
        assert_eq!(timer.state(), None);
    }

    #[test]
    fn test_start_while_running() {
        let mut timer = running(RestKind::Set, 90);
        timer.tick();

        assert!(!timer.start(RestKind::Exercise, 180, RestLabels::default()));

        let state = timer.state().unwrap();
        assert_eq!(state.kind(), RestKind::Set);
        assert_eq!(state.remaining_seconds(), 89);
        assert_eq!(state.total_seconds(), 90);
    }

    #[rstest]
    #[case(1, 0)]
    #[case(2, 1)]
    #[case(60, 0)]
    #[case(60, 59)]
    #[case(180, 42)]
    fn test_tick(#[case] total_seconds: i64, #[case] ticks: i64) {
        let mut timer = running(RestKind::Exercise, total_seconds);

        for _ in 0..ticks {
            assert!(matches!(timer.tick(), Tick::Running { .. }));
        }

        assert!(timer.is_active());
        assert_eq!(
            timer.state().unwrap().remaining_seconds(),
            total_seconds - ticks
        );
        assert_eq!(timer.state().unwrap().elapsed_seconds(), ticks);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(90)]
    fn test_tick_until_expired(#[case] total_seconds: i64) {
        let mut timer = running(RestKind::Set, total_seconds);

        for _ in 1..total_seconds {
            timer.tick();
        }

        assert_eq!(timer.tick(), Tick::Expired);
        assert!(!timer.is_active());
        assert_eq!(timer.tick(), Tick::Ignored);
    }

    #[test]
    fn test_tick_idle() {
        let mut timer = RestTimer::new();

        assert_eq!(timer.tick(), Tick::Ignored);
        assert!(!timer.is_active());
    }

    #[test]
    fn test_tick_cues() {
        let mut timer = running(RestKind::Set, 12);
        let cues = (0..11)
            .map(|_| match timer.tick() {
                Tick::Running { cue, .. } => cue,
                Tick::Ignored | Tick::Expired => panic!(),
            })
            .collect::<Vec<_>>();

        assert_eq!(
            cues,
            vec![
                None,
                Some(Cue::Warning),
                None,
                None,
                None,
                None,
                None,
                None,
                None,
                Some(Cue::Countdown),
                Some(Cue::Countdown),
            ]
        );
        assert_eq!(timer.tick(), Tick::Expired);
    }

    #[rstest]
    #[case::untouched(0)]
    #[case::partially_elapsed(30)]
    #[case::almost_expired(89)]
    fn test_skip(#[case] ticks: usize) {
        let mut timer = running(RestKind::Set, 90);

        for _ in 0..ticks {
            timer.tick();
        }
        timer.skip();

        assert!(!timer.is_active());
        assert_eq!(timer.state(), None);
    }

    #[test]
    fn test_skip_idle() {
        let mut timer = RestTimer::new();

        timer.skip();
        timer.skip();

        assert!(!timer.is_active());
    }

    #[test]
    fn test_progress_fraction() {
        let mut timer = running(RestKind::Set, 4);

        assert_approx_eq!(timer.progress_fraction(), 0.0);
        timer.tick();
        assert_approx_eq!(timer.progress_fraction(), 0.25);
        timer.tick();
        assert_approx_eq!(timer.progress_fraction(), 0.5);
        timer.tick();
        assert_approx_eq!(timer.progress_fraction(), 0.75);
        timer.tick();
        assert_approx_eq!(timer.progress_fraction(), 0.0);
    }

    #[test]
    fn test_progress_fraction_within_bounds() {
        let mut timer = running(RestKind::Exercise, 7);

        while timer.is_active() {
            let fraction = timer.progress_fraction();
            assert!((0.0..=1.0).contains(&fraction), "{fraction}");
            timer.tick();
        }
    }

    #[rstest]
    #[case::overrun(-5, 10, 1.0)]
    #[case::excess(20, 10, 0.0)]
    #[case::no_total(5, 0, 1.0)]
    fn test_progress_fraction_clamped(
        #[case] remaining_seconds: i64,
        #[case] total_seconds: i64,
        #[case] expected: f32,
    ) {
        let state = TimerState {
            kind: RestKind::Set,
            remaining_seconds,
            total_seconds,
            labels: RestLabels::default(),
        };

        assert_approx_eq!(state.progress_fraction(), expected);
    }

    #[rstest]
    #[case::partially_elapsed(90, 30, Some(30))]
    #[case::clamped_to_total(90, 120, Some(90))]
    #[case::expired(90, 0, None)]
    #[case::overdue(90, -12, None)]
    #[case::invalid_total(0, 30, None)]
    fn test_resume(
        #[case] total_seconds: i64,
        #[case] remaining_seconds: i64,
        #[case] expected: Option<i64>,
    ) {
        let mut timer = RestTimer::new();

        assert_eq!(
            timer.resume(
                RestKind::Set,
                total_seconds,
                remaining_seconds,
                RestLabels::default()
            ),
            expected.is_some()
        );
        assert_eq!(
            timer.state().map(TimerState::remaining_seconds),
            expected
        );
    }

    #[test]
    fn test_resume_while_running() {
        let mut timer = running(RestKind::Set, 90);

        assert!(!timer.resume(RestKind::Exercise, 180, 60, RestLabels::default()));
        assert_eq!(timer.state().unwrap().kind(), RestKind::Set);
    }

    #[rstest]
    #[case::set_rest(RestKind::Set, 90)]
    #[case::exercise_rest(RestKind::Exercise, 240)]
    fn test_propagate_to_all(#[case] kind: RestKind, #[case] total_seconds: i64) {
        let mut timer = running(kind, total_seconds);
        timer.tick();
        let mut session = Session::new(&[2, 3, 4]);

        assert_eq!(timer.propagate_to_all(&mut session).unwrap(), 3);
        assert_eq!(
            session.replaced,
            vec![
                (ExerciseID::from(2), kind, total_seconds),
                (ExerciseID::from(3), kind, total_seconds),
                (ExerciseID::from(4), kind, total_seconds),
            ]
        );

        let state = timer.state().unwrap();
        assert_eq!(state.remaining_seconds(), total_seconds - 1);
        assert_eq!(state.total_seconds(), total_seconds);
    }

    #[test]
    fn test_propagate_to_all_idle() {
        let timer = RestTimer::new();
        let mut session = Session::new(&[2, 3]);

        assert_eq!(timer.propagate_to_all(&mut session).unwrap(), 0);
        assert!(session.replaced.is_empty());
    }

    #[test]
    fn test_propagate_to_all_without_other_exercises() {
        let timer = running(RestKind::Set, 60);
        let mut session = Session::new(&[]);

        assert_eq!(timer.propagate_to_all(&mut session).unwrap(), 0);
    }

    #[test]
    fn test_propagate_to_all_failure() {
        let timer = running(RestKind::Set, 60);
        let mut session = Session::new(&[2, 3, 4]);
        session.failing = Some(ExerciseID::from(3));

        assert!(matches!(
            timer.propagate_to_all(&mut session),
            Err(UpdateError::Storage(StorageError::NoConnection))
        ));
        assert_eq!(
            session.replaced,
            vec![(ExerciseID::from(2), RestKind::Set, 60)]
        );
        assert!(timer.is_active());
    }
}
