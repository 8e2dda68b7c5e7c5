//! Small state machines behind the interactive elements.
//!
//! Each card and button carries its own [`PointerState`] instead of sharing
//! loose hover/press flags. The help modal owns a [`ModalDrag`] and a close
//! timer; time is passed in so the transitions can be tested without sleeping.

use std::time::{Duration, Instant};

use crate::help::HelpTopic;

/// Rows the modal must be dragged down before release dismisses it.
pub const DISMISS_THRESHOLD: u16 = 4;

/// How long a closing modal stays on screen.
pub const CLOSE_DURATION: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    Hovered,
    Pressed,
}

impl PointerState {
    pub fn enter(self) -> Self {
        match self {
            PointerState::Idle => PointerState::Hovered,
            other => other,
        }
    }

    /// Leaving an element also cancels a press on it.
    pub fn leave(self) -> Self {
        PointerState::Idle
    }

    pub fn press(self) -> Self {
        PointerState::Pressed
    }

    pub fn release(self) -> Self {
        match self {
            PointerState::Pressed => PointerState::Hovered,
            other => other,
        }
    }

    pub fn is_hovered(self) -> bool {
        self == PointerState::Hovered
    }

    pub fn is_pressed(self) -> bool {
        self == PointerState::Pressed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalDrag {
    #[default]
    Idle,
    Dragging { start_row: u16, offset: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragRelease {
    SnapBack,
    Dismiss,
}

impl ModalDrag {
    pub fn begin(row: u16) -> Self {
        ModalDrag::Dragging {
            start_row: row,
            offset: 0,
        }
    }

    /// Only downward movement is tracked; dragging above the start row
    /// leaves the offset where it was.
    pub fn move_to(self, row: u16) -> Self {
        match self {
            ModalDrag::Dragging { start_row, offset } => {
                let offset = if row > start_row { row - start_row } else { offset };
                ModalDrag::Dragging { start_row, offset }
            }
            ModalDrag::Idle => ModalDrag::Idle,
        }
    }

    pub fn end(self) -> DragRelease {
        match self {
            ModalDrag::Dragging { offset, .. } if offset > DISMISS_THRESHOLD => DragRelease::Dismiss,
            _ => DragRelease::SnapBack,
        }
    }

    pub fn offset(self) -> u16 {
        match self {
            ModalDrag::Dragging { offset, .. } => offset,
            ModalDrag::Idle => 0,
        }
    }

    pub fn is_dragging(self) -> bool {
        matches!(self, ModalDrag::Dragging { .. })
    }
}

/// Bottom sheet showing help for one control.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipModal {
    pub topic: HelpTopic,
    pub drag: ModalDrag,
    closing_since: Option<Instant>,
}

impl TooltipModal {
    pub fn open(topic: HelpTopic) -> Self {
        Self {
            topic,
            drag: ModalDrag::Idle,
            closing_since: None,
        }
    }

    pub fn is_closing(&self) -> bool {
        self.closing_since.is_some()
    }

    /// Start the close animation. Closing twice keeps the first start time.
    pub fn close(&mut self, now: Instant) {
        self.drag = ModalDrag::Idle;
        if self.closing_since.is_none() {
            self.closing_since = Some(now);
        }
    }

    pub fn begin_drag(&mut self, row: u16) {
        if !self.is_closing() {
            self.drag = ModalDrag::begin(row);
        }
    }

    pub fn drag_to(&mut self, row: u16) {
        self.drag = self.drag.move_to(row);
    }

    pub fn end_drag(&mut self, now: Instant) -> DragRelease {
        let release = self.drag.end();
        self.drag = ModalDrag::Idle;
        if release == DragRelease::Dismiss {
            self.close(now);
        }
        release
    }

    /// Returns true once the close animation has run its course.
    pub fn tick(&self, now: Instant) -> bool {
        self.closing_since
            .map(|since| now.saturating_duration_since(since) >= CLOSE_DURATION)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_hover_press_release() {
        let state = PointerState::default().enter();
        assert!(state.is_hovered());
        let state = state.press();
        assert!(state.is_pressed());
        let state = state.release();
        assert!(state.is_hovered());
        assert_eq!(state.leave(), PointerState::Idle);
    }

    #[test]
    fn leaving_cancels_press() {
        let state = PointerState::Hovered.press().leave();
        assert_eq!(state, PointerState::Idle);
        assert_eq!(state.release(), PointerState::Idle);
    }

    #[test]
    fn entering_while_pressed_keeps_press() {
        assert_eq!(PointerState::Pressed.enter(), PointerState::Pressed);
    }

    #[test]
    fn drag_tracks_only_downward_motion() {
        let drag = ModalDrag::begin(10).move_to(13);
        assert_eq!(drag.offset(), 3);
        let drag = drag.move_to(8);
        assert_eq!(drag.offset(), 3);
        assert_eq!(ModalDrag::Idle.move_to(20), ModalDrag::Idle);
    }

    #[test]
    fn short_drag_snaps_back() {
        let drag = ModalDrag::begin(10).move_to(10 + DISMISS_THRESHOLD);
        assert_eq!(drag.end(), DragRelease::SnapBack);
    }

    #[test]
    fn long_drag_dismisses() {
        let drag = ModalDrag::begin(10).move_to(11 + DISMISS_THRESHOLD);
        assert_eq!(drag.end(), DragRelease::Dismiss);
    }

    #[test]
    fn modal_drag_release_starts_close() {
        let now = Instant::now();
        let mut modal = TooltipModal::open(HelpTopic::Deposit);
        modal.begin_drag(5);
        modal.drag_to(15);
        assert!(modal.drag.is_dragging());
        assert_eq!(modal.end_drag(now), DragRelease::Dismiss);
        assert!(modal.is_closing());
        assert_eq!(modal.drag, ModalDrag::Idle);
    }

    #[test]
    fn modal_snap_back_stays_open() {
        let now = Instant::now();
        let mut modal = TooltipModal::open(HelpTopic::Frequency);
        modal.begin_drag(5);
        modal.drag_to(6);
        assert_eq!(modal.end_drag(now), DragRelease::SnapBack);
        assert!(!modal.is_closing());
        assert!(!modal.tick(now + CLOSE_DURATION * 10));
    }

    #[test]
    fn close_finishes_after_duration() {
        let start = Instant::now();
        let mut modal = TooltipModal::open(HelpTopic::PlatformFee);
        modal.close(start);
        assert!(!modal.tick(start));
        assert!(!modal.tick(start + CLOSE_DURATION / 2));
        assert!(modal.tick(start + CLOSE_DURATION));
    }

    #[test]
    fn closing_modal_ignores_new_drags() {
        let start = Instant::now();
        let mut modal = TooltipModal::open(HelpTopic::PlatformFee);
        modal.close(start);
        modal.begin_drag(3);
        assert!(!modal.drag.is_dragging());
        modal.close(start + CLOSE_DURATION);
        assert!(modal.tick(start + CLOSE_DURATION));
    }
}
