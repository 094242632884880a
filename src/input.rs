use winit::event::{ElementState, KeyboardInput as KeyEvent, VirtualKeyCode};

// number of VirtualKeyCode variants
const KEY_COUNT: usize = 163;

pub struct Input {
    pub keyboard: KeyboardInput,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    pub fn new() -> Self {
        Self {
            keyboard: KeyboardInput::new(),
        }
    }

    pub fn update(&mut self, event: KeyEvent) {
        if let Some(key) = event.virtual_keycode {
            self.keyboard.set(key, event.state);
        }
    }

    pub fn reset(&mut self) {
        self.keyboard.reset();
    }
}

pub struct KeyboardInput {
    pub keys: [KeyState; KEY_COUNT],
}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self {
            keys: [KeyState::new(); KEY_COUNT],
        }
    }

    pub fn set(&mut self, key: VirtualKeyCode, state: ElementState) {
        let key_state = &mut self.keys[key as usize];
        match state {
            ElementState::Pressed => {
                key_state.pressed = true;
                key_state.state = true;
            }
            ElementState::Released => {
                key_state.released = true;
                key_state.state = false;
            }
        }
    }

    pub fn key(&self, key: VirtualKeyCode) -> KeyState {
        self.keys[key as usize]
    }

    pub fn reset(&mut self) {
        for key in &mut self.keys {
            key.reset();
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct KeyState {
    pub state: bool,
    pub released: bool,
    pub pressed: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self {
            state: false,
            released: false,
            pressed: false,
        }
    }

    pub fn reset(&mut self) {
        self.released = false;
        self.pressed = false;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SelectPreset(usize),
    ToggleInterpolation,
    Quit,
}

/// Maps pressed keys to commands. `presets[i]` selects preset `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyBindings {
    pub presets: Vec<VirtualKeyCode>,
    pub toggle_interpolation: VirtualKeyCode,
    pub quit: VirtualKeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            presets: vec![
                VirtualKeyCode::Q,
                VirtualKeyCode::W,
                VirtualKeyCode::E,
                VirtualKeyCode::R,
                VirtualKeyCode::T,
                VirtualKeyCode::Y,
                VirtualKeyCode::U,
            ],
            toggle_interpolation: VirtualKeyCode::Space,
            quit: VirtualKeyCode::Escape,
        }
    }
}

impl KeyBindings {
    /// Commands for the keys pressed since the last reset. When a key is
    /// bound to several presets only the first one is selected.
    pub fn commands(&self, input: &Input) -> Vec<Command> {
        let keyboard = &input.keyboard;
        let mut commands = Vec::new();
        for (index, &key) in self.presets.iter().enumerate() {
            if keyboard.key(key).pressed && !self.presets[..index].contains(&key) {
                commands.push(Command::SelectPreset(index));
            }
        }
        if keyboard.key(self.toggle_interpolation).pressed {
            commands.push(Command::ToggleInterpolation);
        }
        if keyboard.key(self.quit).pressed {
            commands.push(Command::Quit);
        }
        commands
    }
}
