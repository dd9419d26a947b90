mod field;
mod grid;
mod interact;
mod params;
mod range;

pub use field::{advance, displacement, remap};
pub use grid::{Cell, CellIndex, Grid, Highlight};
pub use interact::InteractionController;
pub use params::{ParamField, ParameterSet, ParameterSink, ParameterStore};
pub use range::RangeTracker;
