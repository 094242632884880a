//! Progress of a timed transition, driven by elapsed time handed in by the
//! caller. Nothing here reads a clock.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerMode {
    /// Runs once; `alpha` saturates at 1.
    Single,
    /// Wraps around every `duration` seconds and never finishes.
    Loop,
}

#[derive(Clone, Debug)]
pub struct Timer {
    mode: TimerMode,
    duration: f32,
    // start shifted forward by paused and rewound time
    anchor: f32,
    last_time: f32,
    paused: bool,
}

impl Timer {
    /// Starts a timer at elapsed time `now`. A duration that is not strictly
    /// positive yields a timer that is already complete.
    pub fn new(mode: TimerMode, duration: f32, now: f32) -> Self {
        Self {
            mode,
            duration,
            anchor: now,
            last_time: now,
            paused: false,
        }
    }

    /// Advances to elapsed time `now`. Returns true once a `Single` timer has
    /// run its full duration.
    pub fn update(&mut self, now: f32) -> bool {
        let now = now.max(self.last_time);
        if self.paused {
            self.anchor += now - self.last_time;
        }
        self.last_time = now;
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        match self.mode {
            TimerMode::Single => !self.has_duration() || self.progression() >= self.duration,
            TimerMode::Loop => false,
        }
    }

    pub fn alpha(&self) -> f32 {
        if !self.has_duration() {
            return 1.0;
        }
        match self.mode {
            TimerMode::Single => (self.progression() / self.duration).clamp(0.0, 1.0),
            TimerMode::Loop => self.progression().rem_euclid(self.duration) / self.duration,
        }
    }

    /// Seconds accumulated since the start, pauses excluded.
    pub fn progression(&self) -> f32 {
        self.last_time - self.anchor
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Moves progress back, never before the start.
    pub fn rewind(&mut self, seconds: f32) {
        self.anchor = (self.anchor + seconds).min(self.last_time);
    }

    pub fn fast_forward(&mut self, seconds: f32) {
        self.rewind(-seconds);
    }

    fn has_duration(&self) -> bool {
        self.duration > 0.0
    }
}
