//! Host capabilities the scale session is driven through.

/// Applies a resolved UI scale to the host window.
///
/// An implementation sets the logical UI scale, resizes the active screen and
/// its overlays to the scaled size, resizes the render surface to the
/// window's physical size, and swallows the mouse-move event the resize
/// produces.
pub trait WindowScaler {
    fn apply_scale(&mut self, scale: f64);
}

/// Modifier key state at the time of an input event.
pub trait InputPoller {
    fn ctrl_down(&self) -> bool;
    fn shift_down(&self) -> bool;
}

/// Fixed modifier state, for hosts that receive modifiers with the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl InputPoller for Modifiers {
    fn ctrl_down(&self) -> bool {
        self.ctrl
    }

    fn shift_down(&self) -> bool {
        self.shift
    }
}

/// Records every applied scale. Useful for hosts that apply later, and for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingScaler {
    pub applied: Vec<f64>,
}

impl RecordingScaler {
    pub fn last(&self) -> Option<f64> {
        self.applied.last().copied()
    }
}

impl WindowScaler for RecordingScaler {
    fn apply_scale(&mut self, scale: f64) {
        self.applied.push(scale);
    }
}
