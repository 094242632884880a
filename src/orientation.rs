use tracing::debug;

use crate::{
    error::{Error, Result},
    geometry::{Quaternion, SLERP_DOT_THRESHOLD},
    timer::{Timer, TimerMode},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpolation {
    Linear,
    Spherical,
}

impl Interpolation {
    pub fn apply(
        self,
        from: Quaternion,
        to: Quaternion,
        alpha: f32,
        dot_threshold: f32,
    ) -> Quaternion {
        match self {
            Self::Linear => from.lerp(to, alpha),
            Self::Spherical => from.slerp(to, alpha, dot_threshold),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Linear => Self::Spherical,
            Self::Spherical => Self::Linear,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Linear => "Lerp",
            Self::Spherical => "Slerp",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Preset {
    pub name: String,
    pub rotation: Quaternion,
}

/// Fixed, ordered, non-empty list of named orientations.
#[derive(Clone, Debug)]
pub struct OrientationSet {
    presets: Vec<Preset>,
}

impl OrientationSet {
    /// Normalizes every rotation. Fails on an empty list or on a rotation
    /// that cannot be normalized.
    pub fn new(presets: Vec<Preset>) -> Result<Self> {
        if presets.is_empty() {
            return Err(Error::EmptyOrientationSet);
        }
        let presets = presets
            .into_iter()
            .map(|preset| {
                let magnitude = preset.rotation.magnitude();
                if !magnitude.is_finite() || magnitude == 0.0 {
                    return Err(Error::DegenerateRotation { name: preset.name });
                }
                Ok(Preset {
                    rotation: preset.rotation / magnitude,
                    ..preset
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { presets })
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Preset> {
        self.presets.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    fn rotation(&self, index: usize) -> Quaternion {
        self.presets[index].rotation
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSettings {
    /// Seconds a transition between two presets takes.
    pub duration: f32,
    pub slerp_threshold: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration: 1.0,
            slerp_threshold: SLERP_DOT_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug)]
enum AnimationState {
    Idle,
    Animating { timer: Timer, target: usize },
}

/// Current orientation of the model, moving between presets on request.
#[derive(Clone, Debug)]
pub struct OrientationController {
    presets: OrientationSet,
    settings: AnimationSettings,
    interpolation: Interpolation,
    current: usize,
    now: f32,
    state: AnimationState,
}

impl OrientationController {
    pub fn new(presets: OrientationSet, settings: AnimationSettings) -> Self {
        Self {
            presets,
            settings,
            interpolation: Interpolation::Linear,
            current: 0,
            now: 0.0,
            state: AnimationState::Idle,
        }
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Starts animating towards `target` from the time last given to
    /// [`OrientationController::advance_time`]. Returns `Ok(false)` when the
    /// request is dropped: the target is already current or another
    /// transition is running.
    pub fn request_transition(&mut self, target: usize) -> Result<bool> {
        if target >= self.presets.len() {
            return Err(Error::PresetOutOfRange {
                index: target,
                len: self.presets.len(),
            });
        }
        if target == self.current || self.is_animating() {
            return Ok(false);
        }
        debug!(from = self.current, to = target, start = self.now, "starting transition");
        self.state = AnimationState::Animating {
            timer: Timer::new(TimerMode::Single, self.settings.duration, self.now),
            target,
        };
        Ok(true)
    }

    pub fn advance_time(&mut self, elapsed: f32) {
        self.now = elapsed;
        if let AnimationState::Animating { timer, target } = &mut self.state {
            if timer.update(elapsed) {
                debug!(index = *target, "transition finished");
                self.current = *target;
                self.state = AnimationState::Idle;
            }
        }
    }

    /// Returns true if spherical interpolation is now active.
    pub fn toggle_interpolation(&mut self) -> bool {
        self.interpolation = self.interpolation.toggled();
        self.interpolation == Interpolation::Spherical
    }

    pub fn current_orientation(&self) -> Quaternion {
        match &self.state {
            AnimationState::Idle => self.presets.rotation(self.current),
            AnimationState::Animating { timer, target } => self.interpolation.apply(
                self.presets.rotation(self.current),
                self.presets.rotation(*target),
                timer.alpha(),
                self.settings.slerp_threshold,
            ),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn target_index(&self) -> Option<usize> {
        match &self.state {
            AnimationState::Idle => None,
            AnimationState::Animating { target, .. } => Some(*target),
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimationState::Animating { .. })
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn presets(&self) -> &OrientationSet {
        &self.presets
    }

    pub fn settings(&self) -> AnimationSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn preset(name: &str, w: f32, x: f32, y: f32, z: f32) -> Preset {
        Preset {
            name: name.to_owned(),
            rotation: Quaternion::new(w, x, y, z),
        }
    }

    fn controller() -> OrientationController {
        let presets = OrientationSet::new(vec![
            preset("rest", 1.0, 0.0, 0.0, 0.0),
            preset("pitch", 0.7071, 0.7071, 0.0, 0.0),
            preset("flip", 0.0, 0.0, 1.0, 0.0),
        ])
        .unwrap();
        OrientationController::new(presets, AnimationSettings::default())
    }

    #[test]
    fn idle_controller_returns_the_preset_unmodified() {
        let controller = controller();
        assert!(!controller.is_animating());
        assert_eq!(controller.current_orientation(), Quaternion::IDENTITY);
        assert_eq!(controller.target_index(), None);
    }

    #[test]
    fn rejects_out_of_range_targets() {
        let mut controller = controller();
        assert!(matches!(
            controller.request_transition(3),
            Err(Error::PresetOutOfRange { index: 3, len: 3 })
        ));
        assert!(!controller.is_animating());
    }

    #[test]
    fn requesting_the_current_preset_is_a_no_op() {
        let mut controller = controller();
        assert!(!controller.request_transition(0).unwrap());
        assert!(!controller.is_animating());
    }

    #[test]
    fn requests_during_an_animation_are_dropped() {
        let mut controller = controller();
        assert!(controller.request_transition(1).unwrap());
        controller.advance_time(0.3);
        assert!(!controller.request_transition(2).unwrap());
        assert_eq!(controller.target_index(), Some(1));
        assert_eq!(controller.current_index(), 0);
        controller.advance_time(1.0);
        assert_eq!(controller.current_index(), 1);
        assert!(!controller.is_animating());
    }

    #[test]
    fn transition_starts_at_the_last_advanced_time() {
        let mut controller = controller();
        controller.advance_time(10.0);
        controller.request_transition(1).unwrap();
        controller.advance_time(10.5);
        assert!(controller.is_animating());
        controller.advance_time(11.0);
        assert!(!controller.is_animating());
        assert_eq!(controller.current_index(), 1);
    }

    #[test]
    fn toggle_flips_between_modes() {
        let mut controller = controller();
        assert_eq!(controller.interpolation(), Interpolation::Linear);
        assert!(controller.toggle_interpolation());
        assert!(!controller.toggle_interpolation());
        assert_eq!(controller.interpolation(), Interpolation::Linear);
    }

    #[test]
    fn toggle_applies_to_a_running_animation() {
        let mut controller = controller();
        controller.advance_time(0.0);
        controller.request_transition(2).unwrap();
        controller.advance_time(0.25);
        let lerped = controller.current_orientation();
        controller.toggle_interpolation();
        let slerped = controller.current_orientation();
        assert_ne!(lerped, slerped);
        assert_relative_eq!(slerped.magnitude(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn empty_or_degenerate_sets_are_rejected() {
        assert!(matches!(
            OrientationSet::new(Vec::new()),
            Err(Error::EmptyOrientationSet)
        ));
        assert!(matches!(
            OrientationSet::new(vec![preset("zero", 0.0, 0.0, 0.0, 0.0)]),
            Err(Error::DegenerateRotation { name }) if name == "zero"
        ));
    }

    #[test]
    fn preset_rotations_are_normalized() {
        let set = OrientationSet::new(vec![preset("scaled", 2.0, 0.0, 0.0, 0.0)]).unwrap();
        assert_eq!(set.get(0).map(|p| p.rotation), Some(Quaternion::IDENTITY));
        assert_eq!(set.len(), 1);
    }
}
