//! Per-frame waveform evaluation.
//!
//! Each cell's vertical displacement is a sum of four sines of elapsed time,
//! phase-shifted by the cell's grid coordinates. The displacement feeds the
//! session range tracker and is then normalized against the updated bounds
//! to produce the cell's uniform scale in [0, 1].

use crate::sim::grid::{CellIndex, Grid};
use crate::sim::params::ParameterSet;
use crate::sim::range::RangeTracker;

/// Waveform displacement for the cell at `index` at elapsed `time`.
pub fn displacement(time: f64, index: CellIndex, params: &ParameterSet) -> f64 {
    let delay_x = params.delay_x_scale * index.x as f64;
    let delay_y = params.delay_y_scale * index.z as f64;
    let input_x = params.input_x_scale * (time + delay_x);
    let input_y = params.input_y_scale * (time + delay_y);
    input_x.sin() + (2.0 * input_x).sin() + input_y.sin() + (2.0 * input_y).sin()
}

/// Linearly remap `value` from [in_min, in_max] to [out_min, out_max].
///
/// A degenerate input interval (in_max == in_min, e.g. the very first
/// observed sample) maps to the output midpoint instead of dividing by
/// zero.
pub fn remap(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    if in_max == in_min {
        return (out_min + out_max) * 0.5;
    }
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Recompute displacement and scale for every cell in the grid.
///
/// Runs once per frame over all side² cells, no skipping. Deterministic:
/// identical (time, params, prior range) produce identical geometry. The
/// just-observed sample participates in its own normalization, so a new
/// extreme lands exactly on 0 or 1.
pub fn advance(grid: &mut Grid, time: f64, params: &ParameterSet, range: &mut RangeTracker) {
    for cell in grid.cells_mut() {
        let y = displacement(time, cell.index, params);
        range.observe(y);
        let (min, max) = range.current();
        cell.position.y = y;
        cell.scale = remap(y, min, max, 0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-12, "{a} != {b}");
    }

    #[test]
    fn test_displacement_matches_formula() {
        let params = ParameterSet::default();
        let idx = CellIndex::new(3, 7);
        let t = 1.25;
        let input_x: f64 = 2.0 * (t + 0.05 * 3.0);
        let input_y: f64 = 2.0 * (t + 0.05 * 7.0);
        let expected = input_x.sin() + (2.0 * input_x).sin() + input_y.sin() + (2.0 * input_y).sin();
        approx(displacement(t, idx, &params), expected);
    }

    #[test]
    fn test_origin_cell_at_time_zero_is_flat() {
        let params = ParameterSet::default();
        approx(displacement(0.0, CellIndex::new(0, 0), &params), 0.0);
    }

    #[test]
    fn test_remap_linear() {
        approx(remap(5.0, 0.0, 10.0, 0.0, 1.0), 0.5);
        approx(remap(-2.0, -2.0, 2.0, 0.0, 1.0), 0.0);
        approx(remap(2.0, -2.0, 2.0, 0.0, 1.0), 1.0);
        approx(remap(0.0, -1.0, 3.0, 10.0, 20.0), 12.5);
    }

    #[test]
    fn test_remap_degenerate_interval_returns_midpoint() {
        let scale = remap(0.0, 0.0, 0.0, 0.0, 1.0);
        assert!(scale.is_finite());
        approx(scale, 0.5);
        approx(remap(7.0, 7.0, 7.0, 2.0, 4.0), 3.0);
    }

    #[test]
    fn test_first_frame_of_small_grid_resolves_degenerate_range() {
        // N=3, defaults, time=0: cell (0,0) has y = 0, the range starts at
        // (0,0), and the scale must resolve via the midpoint guard.
        let mut grid = Grid::new(3);
        let mut range = RangeTracker::new();
        advance(&mut grid, 0.0, &ParameterSet::default(), &mut range);

        let origin = grid.cell(CellIndex::new(0, 0)).unwrap();
        approx(origin.position.y, 0.0);
        approx(origin.scale, 0.5);
        assert!(grid.cells().all(|c| c.scale.is_finite()));
    }

    #[test]
    fn test_advance_is_deterministic() {
        let params = ParameterSet::default();
        let run = || {
            let mut grid = Grid::new(5);
            let mut range = RangeTracker::new();
            for frame in 0..30 {
                advance(&mut grid, frame as f64 / 30.0, &params, &mut range);
            }
            grid.cells()
                .map(|c| (c.position.y, c.scale))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_scale_stays_in_unit_interval() {
        let mut grid = Grid::new(7);
        let mut range = RangeTracker::new();
        let params = ParameterSet {
            delay_x_scale: 0.31,
            delay_y_scale: -0.08,
            input_x_scale: 5.5,
            input_y_scale: 0.7,
        };
        for frame in 0..120 {
            advance(&mut grid, frame as f64 / 30.0, &params, &mut range);
            for cell in grid.cells() {
                assert!(
                    (0.0..=1.0).contains(&cell.scale),
                    "scale {} out of range at frame {frame}",
                    cell.scale
                );
            }
        }
    }

    #[test]
    fn test_new_extreme_normalizes_to_bound() {
        // The sample that widens the range is normalized against the
        // updated bounds, so it must land exactly on an endpoint.
        let mut grid = Grid::new(1);
        let mut range = RangeTracker::new();
        let params = ParameterSet::default();
        // pick a time where the single cell's displacement is positive
        let t = 0.2;
        let y = displacement(t, CellIndex::new(0, 0), &params);
        assert!(y > 0.0);
        advance(&mut grid, t, &params, &mut range);
        let cell = grid.cell(CellIndex::new(0, 0)).unwrap();
        approx(cell.scale, 1.0);
        assert_eq!(range.current(), (0.0, y));
    }

    #[test]
    fn test_horizontal_position_never_changes() {
        let mut grid = Grid::new(5);
        let mut range = RangeTracker::new();
        let params = ParameterSet::default();
        let before: Vec<(f64, f64)> = grid.cells().map(|c| (c.position.x, c.position.z)).collect();
        for frame in 0..10 {
            advance(&mut grid, frame as f64, &params, &mut range);
        }
        let after: Vec<(f64, f64)> = grid.cells().map(|c| (c.position.x, c.position.z)).collect();
        assert_eq!(before, after);
    }
}
