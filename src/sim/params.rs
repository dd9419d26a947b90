use std::sync::Mutex;

use crate::config::{
    DEFAULT_DELAY_X_SCALE, DEFAULT_DELAY_Y_SCALE, DEFAULT_INPUT_X_SCALE, DEFAULT_INPUT_Y_SCALE,
};

/// The four coefficients that shape the waveform. No bounds are enforced;
/// extreme values simply produce correspondingly extreme surfaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterSet {
    pub delay_x_scale: f64,
    pub delay_y_scale: f64,
    pub input_x_scale: f64,
    pub input_y_scale: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            delay_x_scale: DEFAULT_DELAY_X_SCALE,
            delay_y_scale: DEFAULT_DELAY_Y_SCALE,
            input_x_scale: DEFAULT_INPUT_X_SCALE,
            input_y_scale: DEFAULT_INPUT_Y_SCALE,
        }
    }
}

/// Names a single coefficient for field-wise adjustment and logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamField {
    DelayXScale,
    DelayYScale,
    InputXScale,
    InputYScale,
}

impl ParamField {
    pub fn label(self) -> &'static str {
        match self {
            ParamField::DelayXScale => "delay_x_scale",
            ParamField::DelayYScale => "delay_y_scale",
            ParamField::InputXScale => "input_x_scale",
            ParamField::InputYScale => "input_y_scale",
        }
    }
}

/// Capability implemented by anything that accepts coefficient writes from
/// a control surface.
pub trait ParameterSink {
    fn adjust(&self, field: ParamField, value: f64);
}

/// Thread-safe holder of the live [`ParameterSet`].
///
/// Writers (input handlers) and the frame callback may run on different
/// contexts; the whole set sits behind one mutex so a reader never sees a
/// torn value and a write is visible to the next frame's snapshot.
#[derive(Debug, Default)]
pub struct ParameterStore {
    inner: Mutex<ParameterSet>,
}

impl ParameterStore {
    pub fn new(params: ParameterSet) -> Self {
        Self {
            inner: Mutex::new(params),
        }
    }

    /// Snapshot the current set. Taken once per frame by the field update.
    pub fn get(&self) -> ParameterSet {
        *self.inner.lock().expect("parameter store poisoned")
    }

    /// Overwrite one coefficient, leaving the others untouched.
    pub fn set(&self, field: ParamField, value: f64) {
        let mut params = self.inner.lock().expect("parameter store poisoned");
        match field {
            ParamField::DelayXScale => params.delay_x_scale = value,
            ParamField::DelayYScale => params.delay_y_scale = value,
            ParamField::InputXScale => params.input_x_scale = value,
            ParamField::InputYScale => params.input_y_scale = value,
        }
    }

    /// Add `delta` to one coefficient and return the new value.
    pub fn nudge(&self, field: ParamField, delta: f64) -> f64 {
        let mut params = self.inner.lock().expect("parameter store poisoned");
        let slot = match field {
            ParamField::DelayXScale => &mut params.delay_x_scale,
            ParamField::DelayYScale => &mut params.delay_y_scale,
            ParamField::InputXScale => &mut params.input_x_scale,
            ParamField::InputYScale => &mut params.input_y_scale,
        };
        *slot += delta;
        *slot
    }

    /// Restore the compile-time defaults.
    pub fn reset(&self) {
        *self.inner.lock().expect("parameter store poisoned") = ParameterSet::default();
    }
}

impl ParameterSink for ParameterStore {
    fn adjust(&self, field: ParamField, value: f64) {
        self.set(field, value);
    }
}
