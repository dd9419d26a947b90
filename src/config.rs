/// Cells per side of the square grid (41x41 = 1681 cells)
pub const GRID_SIDE: usize = 41;

/// Simulation steps per second
pub const TARGET_FRAME_RATE: f64 = 30.0;

// ============================================
// Waveform Parameters
// ============================================

/// Per-cell phase delay per unit of grid x
pub const DEFAULT_DELAY_X_SCALE: f64 = 0.05;

/// Per-cell phase delay per unit of grid z
pub const DEFAULT_DELAY_Y_SCALE: f64 = 0.05;

/// Time multiplier on the x-driven harmonic pair
pub const DEFAULT_INPUT_X_SCALE: f64 = 2.0;

/// Time multiplier on the z-driven harmonic pair
pub const DEFAULT_INPUT_Y_SCALE: f64 = 2.0;

/// Keyboard nudge step for the delay coefficients
pub const DELAY_SCALE_STEP: f64 = 0.01;

/// Keyboard nudge step for the input coefficients
pub const INPUT_SCALE_STEP: f64 = 0.25;

// ============================================
// Interaction
// ============================================

/// Seconds a clicked cell stays highlighted before reverting
pub const HIGHLIGHT_REVERT_DELAY: f64 = 0.5;

// ============================================
// Scene
// ============================================

/// Cell sphere radius in world units at scale 1.0
pub const CELL_RADIUS: f32 = 0.5;

/// Radians per second the grid spins about +Y (half turn every 40s)
pub const SCENE_SPIN_RATE: f64 = std::f64::consts::PI / 40.0;

/// Camera eye height above the grid plane
pub const CAMERA_HEIGHT: f32 = 1.5;

/// Vertical field of view in radians
pub const CAMERA_FOV_Y: f32 = std::f32::consts::FRAC_PI_4;

/// Near/far clip planes
pub const CAMERA_Z_NEAR: f32 = 0.1;
pub const CAMERA_Z_FAR: f32 = 200.0;
