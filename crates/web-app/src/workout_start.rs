use std::cell::{Cell, RefCell};

use log::debug;
use trainlog_domain::{RoutineID, SessionConfirmation, SessionStartRequest, guard_request};

use crate::ongoing_training_session::OngoingTrainingSession;

/// Asks for confirmation before a new workout replaces an ongoing training session.
///
/// Without an ongoing session a start proceeds immediately. Otherwise the start is parked
/// until the user confirms or cancels the dialog.
#[derive(Default)]
pub struct StartDialog {
    session_ongoing: Cell<bool>,
    pending: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl StartDialog {
    #[must_use]
    pub fn new(ongoing_training_session: Option<&OngoingTrainingSession>) -> Self {
        Self {
            session_ongoing: Cell::new(ongoing_training_session.is_some()),
            pending: RefCell::new(None),
        }
    }

    pub fn set_ongoing_training_session(
        &self,
        ongoing_training_session: Option<&OngoingTrainingSession>,
    ) {
        self.session_ongoing.set(ongoing_training_session.is_some());
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pending.borrow().is_some()
    }

    pub fn start_workout(
        &self,
        routine_id: RoutineID,
        start: impl FnOnce(SessionStartRequest) + 'static,
    ) {
        guard_request(self, SessionStartRequest::Routine(routine_id), start)();
    }

    pub fn start_quick_workout(&self, start: impl FnOnce(SessionStartRequest) + 'static) {
        guard_request(self, SessionStartRequest::Quick, start)();
    }

    pub fn confirm(&self) {
        let proceed = self.pending.borrow_mut().take();
        if let Some(proceed) = proceed {
            proceed();
        }
    }

    pub fn cancel(&self) {
        if self.pending.borrow_mut().take().is_some() {
            debug!("workout start cancelled");
        }
    }
}

impl SessionConfirmation for StartDialog {
    fn confirm_if_session_active(&self, proceed: Box<dyn FnOnce()>) {
        if self.session_ongoing.get() {
            if self.pending.replace(Some(proceed)).is_some() {
                debug!("replacing pending workout start");
            }
        } else {
            proceed();
        }
    }
}
