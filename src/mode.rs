//! Viewing/Drawing mode state machine.
//!
//! The controller is the sole owner of the current [`Mode`]. Transitions
//! return a [`Transition`] describing the side effects the composing
//! store must apply: clearing the draft polygon on every exit from
//! drawing, and raising the one-shot instructional notice on the first
//! entry into drawing in the controller's lifetime.

#[cfg(test)]
#[path = "mode_test.rs"]
mod mode_test;

/// Which gesture regime the map is in.
///
/// In `Drawing` a map tap toggles a draft vertex; in `Viewing` it sets
/// the transient selected raw location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing saved areas; the initial mode.
    #[default]
    Viewing,
    /// Authoring the draft polygon.
    Drawing,
}

/// Outcome of a requested mode transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Mode after the request.
    pub mode: Mode,
    /// False when the request was a no-op (already in the target mode).
    pub changed: bool,
    /// The draft polygon must be cleared.
    pub clear_draft: bool,
    /// The one-shot instructional notice should be shown.
    pub show_instruction: bool,
}

/// Two-state machine gating which gestures are legal.
#[derive(Debug, Default)]
pub struct ModeController {
    mode: Mode,
    instruction_shown: bool,
}

impl ModeController {
    /// Start in `Viewing` with the instructional notice still pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Viewing → Drawing. The first entry ever requests the one-shot
    /// instructional notice; the flag is never reset afterwards.
    pub fn enter_drawing(&mut self) -> Transition {
        if self.mode == Mode::Drawing {
            return self.noop();
        }
        self.mode = Mode::Drawing;
        let first_entry = !self.instruction_shown;
        self.instruction_shown = true;
        Transition { mode: self.mode, changed: true, clear_draft: false, show_instruction: first_entry }
    }

    /// Drawing → Viewing, always discarding the draft polygon.
    pub fn exit_drawing(&mut self) -> Transition {
        if self.mode == Mode::Viewing {
            return self.noop();
        }
        self.mode = Mode::Viewing;
        Transition { mode: self.mode, changed: true, clear_draft: true, show_instruction: false }
    }

    /// Enter drawing when viewing, exit when drawing.
    pub fn toggle(&mut self) -> Transition {
        match self.mode {
            Mode::Viewing => self.enter_drawing(),
            Mode::Drawing => self.exit_drawing(),
        }
    }

    fn noop(&self) -> Transition {
        Transition { mode: self.mode, changed: false, clear_draft: false, show_instruction: false }
    }
}
