use derive_more::Display;
use log::debug;

use crate::RoutineID;

/// Interposes a user confirmation before a training session is started.
pub trait SessionConfirmation {
    /// Call `proceed` right away if no training session is ongoing. Otherwise ask the user
    /// and call `proceed` only after the user has confirmed. A declined confirmation must
    /// drop `proceed` without calling it.
    fn confirm_if_session_active(&self, proceed: Box<dyn FnOnce()>);
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum SessionStartRequest {
    #[display("routine {}", _0.as_hyphenated())]
    Routine(RoutineID),
    #[display("quick workout")]
    Quick,
}

/// Wrap a start action so that invoking it first passes the confirmation step.
///
/// The returned action holds no state besides the wrapped action. Failures of the start
/// action are neither caught nor retried.
#[must_use]
pub fn guard<'a, C, F>(confirmation: &'a C, start: F) -> impl FnOnce() + 'a
where
    C: SessionConfirmation + ?Sized,
    F: FnOnce() + 'static,
{
    move || confirmation.confirm_if_session_active(Box::new(start))
}

/// Wrap a start action for the given request.
#[must_use]
pub fn guard_request<'a, C, F>(
    confirmation: &'a C,
    request: SessionStartRequest,
    start: F,
) -> impl FnOnce() + 'a
where
    C: SessionConfirmation + ?Sized,
    F: FnOnce(SessionStartRequest) + 'static,
{
    guard(confirmation, move || {
        debug!("starting {request}");
        start(request);
    })
}
