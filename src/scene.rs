use tracing::{info, warn};

use crate::{
    geometry::{MatrixStack, Transform},
    input::{Command, Input, KeyBindings},
    orientation::OrientationController,
    DisplayRequest, Drawer, GameScene, GameSceneState,
};

const MODEL_DISTANCE: f32 = 200.0;
const MODEL_SCALE: f32 = 3.0;
const BASE_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Model orientation demo: preset keys animate the model to a new
/// orientation, the toggle key switches between lerp and slerp.
pub struct InterpolationScene {
    controller: OrientationController,
    bindings: KeyBindings,
}

impl InterpolationScene {
    pub fn new(controller: OrientationController, bindings: KeyBindings) -> Self {
        Self {
            controller,
            bindings,
        }
    }

    pub fn controller(&self) -> &OrientationController {
        &self.controller
    }

    pub fn model_to_camera(&self) -> Transform {
        let mut stack = MatrixStack::new();
        stack
            .translate([0.0, 0.0, -MODEL_DISTANCE])
            .apply(&Transform::from_rotation(self.controller.current_orientation()))
            .scale([MODEL_SCALE; 3])
            .rotate_x((-90.0f32).to_radians());
        stack.top()
    }

    pub fn caption(&self) -> String {
        let presets = self.controller.presets();
        let name = |index: usize| presets.get(index).map_or("?", |preset| preset.name.as_str());
        let mode = self.controller.interpolation().label();
        match self.controller.target_index() {
            Some(target) => format!(
                "{mode}: {} -> {}",
                name(self.controller.current_index()),
                name(target)
            ),
            None => format!("{mode}: {}", name(self.controller.current_index())),
        }
    }

    fn execute(&mut self, command: Command) -> GameSceneState {
        match command {
            Command::SelectPreset(index) => {
                if let Err(err) = self.controller.request_transition(index) {
                    warn!(%err, "ignoring preset key");
                }
            }
            Command::ToggleInterpolation => {
                self.controller.toggle_interpolation();
                let mode = self.controller.interpolation().label();
                info!(mode, "interpolation toggled");
            }
            Command::Quit => return GameSceneState::Stop,
        }
        GameSceneState::Continue
    }
}

impl GameScene for InterpolationScene {
    fn update(&mut self, input: &Input, elapsed: f32) -> GameSceneState {
        self.controller.advance_time(elapsed);
        for command in self.bindings.commands(input) {
            if let GameSceneState::Stop = self.execute(command) {
                return GameSceneState::Stop;
            }
        }
        GameSceneState::Continue
    }

    fn display(&self, drawer: &mut dyn Drawer) {
        let caption = self.caption();
        drawer.draw(&DisplayRequest {
            model_to_camera: self.model_to_camera(),
            base_color: BASE_COLOR,
            caption: &caption,
        });
    }
}
