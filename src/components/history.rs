//! Snapshot-based undo/redo.
//!
//! Both stacks hold whole-canvas [`Snapshot`]s: the undo stack always holds
//! pre-mutation states (captured before a gesture starts, never after), and
//! any fresh recording invalidates the entire redo stack — there is no
//! branching history. Depth is capped with oldest-entry eviction so a long
//! session cannot grow memory without bound.

use std::collections::VecDeque;

use crate::canvas::{CanvasState, Snapshot};

/// Default undo depth; configurable through settings.
pub const DEFAULT_MAX_DEPTH: usize = 50;

pub struct History {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Pushes a pre-mutation snapshot. Evicts the oldest entry past the
    /// depth cap and permanently discards redo history.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.undo_stack.push_back(snapshot);
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Convenience: capture the canvas and record it.
    pub fn record_canvas(&mut self, canvas: &CanvasState) {
        self.record(canvas.snapshot());
    }

    /// Pops the latest pre-mutation state onto the live surface, parking the
    /// current state on the redo stack. Returns `false` (and touches
    /// nothing) when there is nothing to undo.
    pub fn undo_canvas(&mut self, canvas: &mut CanvasState) -> bool {
        match self.undo_stack.pop_back() {
            Some(snapshot) => {
                self.redo_stack.push(canvas.snapshot());
                canvas.restore(&snapshot);
                true
            }
            None => false,
        }
    }

    /// Symmetric to [`History::undo_canvas`], moving a state from the redo
    /// stack back onto the surface.
    pub fn redo_canvas(&mut self, canvas: &mut CanvasState) -> bool {
        match self.redo_stack.pop() {
            Some(snapshot) => {
                self.undo_stack.push_back(canvas.snapshot());
                canvas.restore(&snapshot);
                true
            }
            None => false,
        }
    }

    /// Drops both stacks, e.g. when a new document replaces the canvas.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn paint(canvas: &mut CanvasState, x: u32, y: u32, c: Rgb<u8>) {
        canvas.base_mut().put_pixel(x, y, c);
    }

    #[test]
    fn n_actions_then_n_undos_restores_initial_state() {
        let mut canvas = CanvasState::new(6, 6, WHITE);
        let mut history = History::default();
        let initial = canvas.base().clone();

        for i in 0..5u32 {
            history.record_canvas(&canvas);
            paint(&mut canvas, i, i, Rgb([i as u8 * 40, 0, 0]));
        }
        for _ in 0..5 {
            assert!(history.undo_canvas(&mut canvas));
        }

        assert_eq!(canvas.base().as_raw(), initial.as_raw());
        assert!(!history.can_undo());
    }

    #[test]
    fn redo_is_invalidated_by_fresh_record() {
        let mut canvas = CanvasState::new(4, 4, WHITE);
        let mut history = History::default();

        history.record_canvas(&canvas);
        paint(&mut canvas, 0, 0, Rgb([1, 2, 3]));
        assert!(history.undo_canvas(&mut canvas));
        assert!(history.can_redo());

        // a new edit begins: redo must be gone, regardless of prior contents
        history.record_canvas(&canvas);
        assert!(!history.can_redo());
        assert!(!history.redo_canvas(&mut canvas));
    }

    #[test]
    fn undo_redo_scenario_moves_snapshots_between_stacks() {
        // undo_stack = [A, B], redo empty
        let mut canvas = CanvasState::new(2, 2, WHITE);
        let mut history = History::default();

        history.record_canvas(&canvas); // A (all white)
        paint(&mut canvas, 0, 0, Rgb([10, 10, 10]));
        history.record_canvas(&canvas); // B
        paint(&mut canvas, 1, 1, Rgb([20, 20, 20]));
        let live = canvas.base().clone();

        assert!(history.undo_canvas(&mut canvas)); // live = B
        assert_eq!(history.undo_depth(), 1);
        assert!(history.can_redo());
        assert_eq!(*canvas.base().get_pixel(0, 0), Rgb([10, 10, 10]));
        assert_eq!(*canvas.base().get_pixel(1, 1), WHITE);

        assert!(history.redo_canvas(&mut canvas)); // live restored
        assert_eq!(canvas.base().as_raw(), live.as_raw());
        assert_eq!(history.undo_depth(), 2);
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_on_empty_history_reports_failure_without_mutation() {
        let mut canvas = CanvasState::new(2, 2, WHITE);
        let mut history = History::default();
        let before = canvas.base().clone();

        assert!(!history.undo_canvas(&mut canvas));
        assert_eq!(canvas.base().as_raw(), before.as_raw());
    }

    #[test]
    fn depth_cap_evicts_oldest() {
        let mut canvas = CanvasState::new(2, 2, WHITE);
        let mut history = History::new(3);

        for i in 0..10u8 {
            history.record_canvas(&canvas);
            paint(&mut canvas, 0, 0, Rgb([i, i, i]));
        }
        assert_eq!(history.undo_depth(), 3);

        // three undos land on the oldest retained state, not the original
        for _ in 0..3 {
            assert!(history.undo_canvas(&mut canvas));
        }
        assert!(!history.can_undo());
        assert_eq!(*canvas.base().get_pixel(0, 0), Rgb([6, 6, 6]));
    }
}
