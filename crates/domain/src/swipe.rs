/// Minimal horizontal distance in device-independent pixels for a touch gesture to count as
/// a swipe.
pub const SWIPE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeCommand {
    Previous,
    Next,
}

/// Turn the horizontal start and end position of a touch gesture into a command.
///
/// Swiping left shows the previous period, swiping right the next one.
#[must_use]
pub fn interpret_swipe(start_x: f64, end_x: f64) -> Option<SwipeCommand> {
    let distance = start_x - end_x;

    if distance > SWIPE_THRESHOLD {
        Some(SwipeCommand::Previous)
    } else if distance < -SWIPE_THRESHOLD {
        Some(SwipeCommand::Next)
    } else {
        None
    }
}

/// Horizontal positions of the touch gesture in progress.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TouchGesture {
    start_x: Option<f64>,
    end_x: Option<f64>,
}

impl TouchGesture {
    pub fn touch_start(&mut self, x: f64) {
        self.start_x = Some(x);
        self.end_x = None;
    }

    pub fn touch_move(&mut self, x: f64) {
        self.end_x = Some(x);
    }

    /// Finish the gesture. The recorded positions are discarded in any case.
    pub fn touch_end(&mut self) -> Option<SwipeCommand> {
        match std::mem::take(self) {
            TouchGesture {
                start_x: Some(start_x),
                end_x: Some(end_x),
            } => interpret_swipe(start_x, end_x),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        *self = TouchGesture::default();
    }
}
