use input::Input;
use std::{sync::Arc, time::Instant};
use tracing::{debug, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

use crate::geometry::Transform;

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod orientation;
pub mod presenter;
pub mod scene;
pub mod timer;

pub use error::{Error, Result};

/// Fixed rate at which scenes are updated.
pub const UPDATES_PER_SECOND: u128 = 60;

pub struct DisplayRequest<'a> {
    pub model_to_camera: Transform,
    pub base_color: [f32; 4],
    /// Short status line for the host window.
    pub caption: &'a str,
}

pub enum GameSceneState {
    Continue,
    Stop,
}

pub trait GameScene {
    /// `elapsed` is the simulated time in seconds at this update step.
    fn update(&mut self, input: &Input, elapsed: f32) -> GameSceneState;
    fn display(&self, drawer: &mut dyn Drawer);
}

pub trait Drawer {
    fn draw(&mut self, request: &DisplayRequest);
}

struct GameLoop<D: Drawer> {
    gamescene: Box<dyn GameScene>,
    drawer: D,
    frame_count: u128,
    start_time: Instant,
    input: Input,
}

impl<D: Drawer> GameLoop<D> {
    fn new(gamescene: Box<dyn GameScene>, drawer: D) -> Self {
        Self {
            gamescene,
            drawer,
            frame_count: 0,
            start_time: Instant::now(),
            input: Input::new(),
        }
    }

    /// Runs every update step due since the last call. Returns false once the
    /// scene asks to stop.
    fn update_gamescene(&mut self) -> bool {
        let target_frame_count =
            Instant::now().duration_since(self.start_time).as_millis() * UPDATES_PER_SECOND / 1000;
        let frame_delta = target_frame_count.saturating_sub(self.frame_count);
        for _ in 0..frame_delta {
            let elapsed = self.frame_count as f32 / UPDATES_PER_SECOND as f32;
            match self.gamescene.update(&self.input, elapsed) {
                GameSceneState::Continue => self.frame_count += 1,
                GameSceneState::Stop => return false,
            };
            self.input.reset();
        }
        true
    }

    fn display(&mut self) {
        self.gamescene.display(&mut self.drawer);
    }
}

pub fn run<D: Drawer + 'static>(
    event_loop: EventLoop<()>,
    window: Arc<Window>,
    gamescene: Box<dyn GameScene>,
    drawer: D,
) -> ! {
    let mut gameloop = GameLoop::new(gamescene, drawer);
    window.set_visible(true);
    info!("entering main loop");
    let mut start = Instant::now();
    let mut frames = 0;
    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            *control_flow = ControlFlow::Exit;
        }
        Event::WindowEvent {
            event: WindowEvent::KeyboardInput { input, .. },
            ..
        } => {
            gameloop.input.update(input);
        }
        Event::MainEventsCleared => {
            frames += 1;
            if frames >= 60 {
                let now = Instant::now();
                let duration = now.duration_since(start).as_secs_f32();
                let fps = frames as f32 / duration;
                debug!(fps, "frame rate");
                frames = 0;
                start = now;
            }
            if !gameloop.update_gamescene() {
                info!("scene stopped");
                *control_flow = ControlFlow::Exit;
                return;
            }
            gameloop.display();
        }
        _ => {}
    })
}
