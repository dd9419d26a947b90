//! Click-to-highlight state machine.
//!
//! A click resolves to a cell through the renderer's hit-test, turns its
//! emphasis on immediately, and schedules a reversion one fixed delay
//! later. Reversions are deadline-based and polled by the frame tick, so
//! there is no detached callback to race with a later click: re-clicking a
//! cell whose reversion is still pending replaces the deadline, leaving at
//! most one pending reversion per cell.

use std::collections::HashMap;

use glam::Vec2;

use crate::render::Renderer;
use crate::sim::grid::{CellIndex, Grid, Highlight};

pub struct InteractionController {
    revert_delay: f64,
    pending: HashMap<CellIndex, f64>,
}

impl InteractionController {
    pub fn new(revert_delay: f64) -> Self {
        Self {
            revert_delay,
            pending: HashMap::new(),
        }
    }

    /// Resolve a pointer click at `screen` against the renderer and, if it
    /// lands on a cell, highlight it and (re)schedule its reversion.
    /// Returns the cell that was hit, if any.
    pub fn handle_click<R: Renderer>(
        &mut self,
        grid: &mut Grid,
        renderer: &mut R,
        screen: Vec2,
        now: f64,
    ) -> Option<CellIndex> {
        let index = renderer.hit_test(screen)?;
        let cell = grid.cell_mut(index)?;
        cell.highlight = Highlight::Highlighted;
        renderer.set_highlight(index, true);
        if self.pending.insert(index, now + self.revert_delay).is_some() {
            log::debug!("restarted reversion timer for cell ({}, {})", index.x, index.z);
        }
        Some(index)
    }

    /// Fire every reversion whose deadline has passed.
    pub fn tick<R: Renderer>(&mut self, grid: &mut Grid, renderer: &mut R, now: f64) {
        if self.pending.is_empty() {
            return;
        }
        let due: Vec<CellIndex> = self
            .pending
            .iter()
            .filter(|(_, &deadline)| deadline <= now)
            .map(|(&index, _)| index)
            .collect();
        for index in due {
            self.pending.remove(&index);
            self.revert(grid, renderer, index);
        }
    }

    /// Cancel every pending reversion and revert the cells now. Must run
    /// before the grid and renderer are torn down.
    pub fn cancel_all<R: Renderer>(&mut self, grid: &mut Grid, renderer: &mut R) {
        let pending: Vec<CellIndex> = self.pending.drain().map(|(index, _)| index).collect();
        for index in pending {
            self.revert(grid, renderer, index);
        }
    }

    /// Number of reversions currently scheduled.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn revert<R: Renderer>(&self, grid: &mut Grid, renderer: &mut R, index: CellIndex) {
        if let Some(cell) = grid.cell_mut(index) {
            cell.highlight = Highlight::Idle;
        }
        renderer.set_highlight(index, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    /// Scripted renderer: returns a fixed hit-test result and records
    /// every highlight call.
    #[derive(Default)]
    struct RecordingRenderer {
        hit: Option<CellIndex>,
        highlights: Vec<(CellIndex, bool)>,
    }

    impl Renderer for RecordingRenderer {
        fn set_position(&mut self, _index: CellIndex, _position: Vec3) {}
        fn set_scale(&mut self, _index: CellIndex, _scale: f32) {}
        fn set_highlight(&mut self, index: CellIndex, on: bool) {
            self.highlights.push((index, on));
        }
        fn hit_test(&self, _screen: Vec2) -> Option<CellIndex> {
            self.hit
        }
    }

    fn setup(hit: Option<CellIndex>) -> (Grid, RecordingRenderer, InteractionController) {
        let grid = Grid::new(5);
        let renderer = RecordingRenderer {
            hit,
            ..Default::default()
        };
        (grid, renderer, InteractionController::new(0.5))
    }

    fn highlight_of(grid: &Grid, index: CellIndex) -> Highlight {
        grid.cell(index).unwrap().highlight
    }

    #[test]
    fn test_missed_click_is_a_no_op() {
        let (mut grid, mut renderer, mut ctl) = setup(None);
        assert_eq!(ctl.handle_click(&mut grid, &mut renderer, Vec2::ZERO, 0.0), None);
        assert_eq!(ctl.pending_count(), 0);
        assert!(renderer.highlights.is_empty());
    }

    #[test]
    fn test_click_highlights_and_schedules_reversion() {
        let idx = CellIndex::new(2, 2);
        let (mut grid, mut renderer, mut ctl) = setup(Some(idx));

        assert_eq!(ctl.handle_click(&mut grid, &mut renderer, Vec2::ZERO, 0.0), Some(idx));
        assert_eq!(highlight_of(&grid, idx), Highlight::Highlighted);
        assert_eq!(renderer.highlights, vec![(idx, true)]);
        assert_eq!(ctl.pending_count(), 1);

        // before the deadline nothing fires
        ctl.tick(&mut grid, &mut renderer, 0.49);
        assert_eq!(highlight_of(&grid, idx), Highlight::Highlighted);

        ctl.tick(&mut grid, &mut renderer, 0.5);
        assert_eq!(highlight_of(&grid, idx), Highlight::Idle);
        assert_eq!(renderer.highlights, vec![(idx, true), (idx, false)]);
        assert_eq!(ctl.pending_count(), 0);
    }

    #[test]
    fn test_reclick_restarts_timer_and_reverts_once() {
        let idx = CellIndex::new(2, 2);
        let (mut grid, mut renderer, mut ctl) = setup(Some(idx));

        assert!(ctl.handle_click(&mut grid, &mut renderer, Vec2::ZERO, 0.0).is_some());
        assert!(ctl.handle_click(&mut grid, &mut renderer, Vec2::ZERO, 0.3).is_some());
        assert_eq!(ctl.pending_count(), 1);

        // the first click's deadline (0.5) must not fire
        ctl.tick(&mut grid, &mut renderer, 0.55);
        assert_eq!(highlight_of(&grid, idx), Highlight::Highlighted);

        ctl.tick(&mut grid, &mut renderer, 1.0);
        assert_eq!(highlight_of(&grid, idx), Highlight::Idle);

        let reversions = renderer
            .highlights
            .iter()
            .filter(|&&(_, on)| !on)
            .count();
        assert_eq!(reversions, 1);
        assert_eq!(ctl.pending_count(), 0);
    }

    #[test]
    fn test_distinct_cells_revert_independently() {
        let a = CellIndex::new(0, 0);
        let b = CellIndex::new(4, 1);
        let (mut grid, mut renderer, mut ctl) = setup(Some(a));

        assert!(ctl.handle_click(&mut grid, &mut renderer, Vec2::ZERO, 0.0).is_some());
        renderer.hit = Some(b);
        assert!(ctl.handle_click(&mut grid, &mut renderer, Vec2::ZERO, 0.2).is_some());
        assert_eq!(ctl.pending_count(), 2);

        ctl.tick(&mut grid, &mut renderer, 0.6);
        assert_eq!(highlight_of(&grid, a), Highlight::Idle);
        assert_eq!(highlight_of(&grid, b), Highlight::Highlighted);

        ctl.tick(&mut grid, &mut renderer, 0.7);
        assert_eq!(highlight_of(&grid, b), Highlight::Idle);
        assert_eq!(ctl.pending_count(), 0);
    }

    #[test]
    fn test_cancel_all_reverts_everything() {
        let a = CellIndex::new(1, 1);
        let b = CellIndex::new(3, 2);
        let (mut grid, mut renderer, mut ctl) = setup(Some(a));

        assert!(ctl.handle_click(&mut grid, &mut renderer, Vec2::ZERO, 0.0).is_some());
        renderer.hit = Some(b);
        assert!(ctl.handle_click(&mut grid, &mut renderer, Vec2::ZERO, 0.1).is_some());

        ctl.cancel_all(&mut grid, &mut renderer);
        assert_eq!(ctl.pending_count(), 0);
        assert_eq!(highlight_of(&grid, a), Highlight::Idle);
        assert_eq!(highlight_of(&grid, b), Highlight::Idle);

        // nothing left to fire later
        ctl.tick(&mut grid, &mut renderer, 10.0);
        let reversions = renderer.highlights.iter().filter(|&&(_, on)| !on).count();
        assert_eq!(reversions, 2);
    }
}
