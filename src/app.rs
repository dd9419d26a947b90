use std::sync::Arc;
use std::time::{Duration, Instant};

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{
    DELAY_SCALE_STEP, GRID_SIDE, HIGHLIGHT_REVERT_DELAY, INPUT_SCALE_STEP, SCENE_SPIN_RATE,
    TARGET_FRAME_RATE,
};
use crate::render::{Renderer, SceneRenderer};
use crate::sim::{advance, Grid, InteractionController, ParamField, ParameterStore, RangeTracker};

/// Application state
pub struct App {
    window: Option<Arc<Window>>,
    scene: Option<SceneRenderer>,
    grid: Grid,
    params: ParameterStore,
    range: RangeTracker,
    interaction: InteractionController,
    started_at: Instant,
    last_step: Instant,
    cursor: Vec2,
    fps_counter: FpsCounter,
}

impl App {
    pub fn new() -> Self {
        Self {
            window: None,
            scene: None,
            grid: Grid::new(GRID_SIDE),
            params: ParameterStore::default(),
            range: RangeTracker::new(),
            interaction: InteractionController::new(HIGHLIGHT_REVERT_DELAY),
            started_at: Instant::now(),
            last_step: Instant::now(),
            cursor: Vec2::ZERO,
            fps_counter: FpsCounter::new(),
        }
    }

    fn frame(&mut self) {
        // Fixed-rate pacing; redraws arriving early are skipped
        let step_interval = Duration::from_secs_f64(1.0 / TARGET_FRAME_RATE);
        if self.last_step.elapsed() < step_interval {
            return;
        }
        self.last_step = Instant::now();

        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        let now = self.started_at.elapsed().as_secs_f64();
        let params = self.params.get();
        advance(&mut self.grid, now, &params, &mut self.range);
        self.interaction.tick(&mut self.grid, scene, now);

        for cell in self.grid.cells() {
            scene.set_position(cell.index, cell.position.as_vec3());
            scene.set_scale(cell.index, cell.scale as f32);
        }
        scene.set_spin((now * SCENE_SPIN_RATE) as f32);
        scene.draw();

        if let Some(fps) = self.fps_counter.tick() {
            if let Some(window) = &self.window {
                window.set_title(&format!("Waveform Grid - {:.0} FPS", fps));
            }
        }
    }

    fn handle_click(&mut self) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let now = self.started_at.elapsed().as_secs_f64();
        if let Some(index) =
            self.interaction
                .handle_click(&mut self.grid, scene, self.cursor, now)
        {
            log::info!("Highlighted cell ({}, {})", index.x, index.z);
        }
    }

    fn handle_key(&mut self, key_code: KeyCode) {
        let nudged = match key_code {
            KeyCode::KeyQ => Some((ParamField::DelayXScale, DELAY_SCALE_STEP)),
            KeyCode::KeyA => Some((ParamField::DelayXScale, -DELAY_SCALE_STEP)),
            KeyCode::KeyW => Some((ParamField::DelayYScale, DELAY_SCALE_STEP)),
            KeyCode::KeyS => Some((ParamField::DelayYScale, -DELAY_SCALE_STEP)),
            KeyCode::KeyE => Some((ParamField::InputXScale, INPUT_SCALE_STEP)),
            KeyCode::KeyD => Some((ParamField::InputXScale, -INPUT_SCALE_STEP)),
            KeyCode::KeyR => Some((ParamField::InputYScale, INPUT_SCALE_STEP)),
            KeyCode::KeyF => Some((ParamField::InputYScale, -INPUT_SCALE_STEP)),
            KeyCode::Digit0 => {
                self.params.reset();
                log::info!("Parameters reset to defaults");
                None
            }
            _ => None,
        };

        if let Some((field, step)) = nudged {
            let value = self.params.nudge(field, step);
            log::info!("{} = {:.3}", field.label(), value);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("Initializing waveform grid...");
        log::info!("Grid size: {}x{}", GRID_SIDE, GRID_SIDE);

        // Create window
        let window_attrs = Window::default_attributes()
            .with_title("Waveform Grid")
            .with_inner_size(winit::dpi::LogicalSize::new(1024, 768));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .expect("Failed to create window"),
        );

        log::info!("Creating renderer...");
        let scene = SceneRenderer::new(window.clone(), GRID_SIDE);

        log::info!("Initialization complete!");
        log::info!("Controls:");
        log::info!("  Click a cell to highlight it");
        log::info!("  Q/A: delay_x_scale +/-");
        log::info!("  W/S: delay_y_scale +/-");
        log::info!("  E/D: input_x_scale +/-");
        log::info!("  R/F: input_y_scale +/-");
        log::info!("  0: Reset parameters");
        log::info!("  Escape: Quit");

        self.started_at = Instant::now();
        self.last_step = Instant::now();
        self.window = Some(window);
        self.scene = Some(scene);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                if let Some(scene) = self.scene.as_mut() {
                    self.interaction.cancel_all(&mut self.grid, scene);
                }
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed() {
                    if let PhysicalKey::Code(key_code) = event.physical_key {
                        if key_code == KeyCode::Escape {
                            log::info!("Escape pressed, exiting...");
                            if let Some(scene) = self.scene.as_mut() {
                                self.interaction.cancel_all(&mut self.grid, scene);
                            }
                            event_loop.exit();
                        } else {
                            self.handle_key(key_code);
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.handle_click();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(scene) = &mut self.scene {
                    log::info!("Window resized to {}x{}", new_size.width, new_size.height);
                    scene.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame();
                // Request another frame immediately
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Simple FPS counter
struct FpsCounter {
    last_update: Instant,
    frame_count: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last_update: Instant::now(),
            frame_count: 0,
        }
    }

    /// Tick the counter, returns Some(fps) every second
    fn tick(&mut self) -> Option<f64> {
        self.frame_count += 1;
        let elapsed = self.last_update.elapsed();

        if elapsed.as_secs_f64() >= 1.0 {
            let fps = self.frame_count as f64 / elapsed.as_secs_f64();
            self.frame_count = 0;
            self.last_update = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}
