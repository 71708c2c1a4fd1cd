use glam::Vec3;
use voxscene_kernel::SceneContext;

use crate::action::{Action, PAN_STEP_DEGREES};

/// Boolean controls on the scene panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    NormalDebug,
    LightAnimation,
    PointLight,
    Spotlight,
}

/// Continuous controls on the scene panel. `axis` selects x/y/z (or r/g/b).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    LightPosition { axis: usize },
    LightColor { axis: usize },
    SpotlightPosition { axis: usize },
}

/// Raw input delivered by a window or script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(char),
    Action(Action),
    /// Primary button pressed at window coordinates.
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    Toggle(Toggle, bool),
    Slider(Slider, f32),
}

/// Applies input events to a [`SceneContext`].
///
/// The only state it keeps is the last pointer position of an active drag.
#[derive(Debug, Clone)]
pub struct InputHandler {
    sensitivity: f32,
    drag_origin: Option<(f32, f32)>,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(0.15)
    }
}

impl InputHandler {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            drag_origin: None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    /// Apply one event. Returns `true` if scene state changed.
    pub fn handle(&mut self, ctx: &mut SceneContext, event: InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => match crate::action::action_for_key(key) {
                Some(action) => apply_action(ctx, action),
                None => false,
            },
            InputEvent::Action(action) => apply_action(ctx, action),
            InputEvent::PointerDown { x, y } => {
                self.drag_origin = Some((x, y));
                false
            }
            InputEvent::PointerMove { x, y } => {
                let Some((px, py)) = self.drag_origin else {
                    return false;
                };
                self.drag_origin = Some((x, y));
                let (dx, dy) = (x - px, y - py);
                if dx == 0.0 && dy == 0.0 {
                    return false;
                }
                ctx.camera.drag(dx, dy, self.sensitivity);
                true
            }
            InputEvent::PointerUp => {
                self.drag_origin = None;
                false
            }
            InputEvent::Toggle(toggle, on) => {
                apply_toggle(ctx, toggle, on);
                true
            }
            InputEvent::Slider(slider, value) => apply_slider(ctx, slider, value),
        }
    }
}

/// Apply a key action to the scene. Returns `true` if scene state changed.
pub fn apply_action(ctx: &mut SceneContext, action: Action) -> bool {
    tracing::trace!(?action, "applying action");
    match action {
        Action::MoveForward => ctx.camera.move_forward(),
        Action::MoveBackward => ctx.camera.move_backward(),
        Action::StrafeLeft => ctx.camera.strafe_left(),
        Action::StrafeRight => ctx.camera.strafe_right(),
        Action::PanLeft => ctx.camera.pan(PAN_STEP_DEGREES),
        Action::PanRight => ctx.camera.pan(-PAN_STEP_DEGREES),
        Action::AddBlock => return ctx.add_block_at_facing().is_some(),
        Action::RemoveBlock => return ctx.remove_block_at_facing().is_some(),
    }
    true
}

fn apply_toggle(ctx: &mut SceneContext, toggle: Toggle, on: bool) {
    let lighting = &mut ctx.lighting;
    match toggle {
        Toggle::NormalDebug => lighting.normal_debug = on,
        Toggle::LightAnimation => lighting.animated = on,
        Toggle::PointLight => lighting.set_point_enabled(on),
        Toggle::Spotlight => lighting.set_spot_enabled(on),
    }
    tracing::debug!(?toggle, on, "toggle changed");
}

fn apply_slider(ctx: &mut SceneContext, slider: Slider, value: f32) -> bool {
    let (target, axis): (&mut Vec3, usize) = match slider {
        Slider::LightPosition { axis } => (&mut ctx.lighting.point.position, axis),
        Slider::LightColor { axis } => (&mut ctx.lighting.point.color, axis),
        Slider::SpotlightPosition { axis } => (&mut ctx.lighting.spot.position, axis),
    };
    if axis > 2 || !value.is_finite() {
        tracing::warn!(?slider, value, "ignoring invalid slider input");
        return false;
    }
    target[axis] = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxscene_common::CellCoord;

    #[test]
    fn movement_keys_move_the_camera() {
        let mut ctx = SceneContext::new();
        let mut input = InputHandler::default();
        let eye = ctx.camera.eye();
        assert!(input.handle(&mut ctx, InputEvent::Key('w')));
        assert!(ctx.camera.eye().z < eye.z);
        input.handle(&mut ctx, InputEvent::Key('s'));
        assert!((ctx.camera.eye() - eye).length() < 1e-5);
    }

    #[test]
    fn pan_keys_are_inverse() {
        let mut ctx = SceneContext::new();
        let mut input = InputHandler::default();
        let at = ctx.camera.at();
        input.handle(&mut ctx, InputEvent::Key('q'));
        assert!((ctx.camera.at() - at).length() > 1e-3);
        input.handle(&mut ctx, InputEvent::Key('e'));
        assert!((ctx.camera.at() - at).length() < 1e-2);
    }

    #[test]
    fn block_keys_edit_the_facing_column() {
        let mut ctx = SceneContext::new();
        let mut input = InputHandler::default();
        let cell = ctx.facing_cell();
        let h = ctx.world.height_at(cell);
        assert!(input.handle(&mut ctx, InputEvent::Key('F')));
        assert_eq!(ctx.world.height_at(cell), h + 1);
        input.handle(&mut ctx, InputEvent::Key('g'));
        assert_eq!(ctx.world.height_at(cell), h);
    }

    #[test]
    fn remove_on_empty_column_reports_no_change() {
        let mut ctx = SceneContext::new();
        let cell = ctx.facing_cell();
        ctx.world.set_height(cell, 0);
        assert!(!apply_action(&mut ctx, Action::RemoveBlock));
        assert_eq!(ctx.world.height_at(CellCoord::new(cell.x, cell.z)), 0);
    }

    #[test]
    fn unbound_key_changes_nothing() {
        let mut ctx = SceneContext::new();
        let mut input = InputHandler::default();
        let eye = ctx.camera.eye();
        assert!(!input.handle(&mut ctx, InputEvent::Key('x')));
        assert_eq!(ctx.camera.eye(), eye);
    }

    #[test]
    fn pointer_move_without_press_is_ignored() {
        let mut ctx = SceneContext::new();
        let mut input = InputHandler::default();
        let at = ctx.camera.at();
        assert!(!input.handle(&mut ctx, InputEvent::PointerMove { x: 50.0, y: 0.0 }));
        assert_eq!(ctx.camera.at(), at);
    }

    #[test]
    fn drag_right_turns_right_per_move_event() {
        let mut ctx = SceneContext::new();
        let mut input = InputHandler::default();
        let before = ctx.camera.forward();
        input.handle(&mut ctx, InputEvent::PointerDown { x: 100.0, y: 100.0 });
        assert!(input.is_dragging());
        input.handle(&mut ctx, InputEvent::PointerMove { x: 110.0, y: 100.0 });
        input.handle(&mut ctx, InputEvent::PointerMove { x: 120.0, y: 100.0 });
        input.handle(&mut ctx, InputEvent::PointerUp);
        assert!(!input.is_dragging());

        let after = ctx.camera.forward();
        // 20 px at 0.15 deg/px, negated: a 3 degree clockwise turn seen from above.
        let angle = before.angle_between(after).to_degrees();
        assert!((angle - 3.0).abs() < 1e-2, "angle {angle}");
        assert!(before.cross(after).y < 0.0);

        let at = ctx.camera.at();
        input.handle(&mut ctx, InputEvent::PointerMove { x: 500.0, y: 500.0 });
        assert_eq!(ctx.camera.at(), at);
    }

    #[test]
    fn spotlight_toggle_forces_point_light_on() {
        let mut ctx = SceneContext::new();
        let mut input = InputHandler::default();
        input.handle(&mut ctx, InputEvent::Toggle(Toggle::PointLight, false));
        input.handle(&mut ctx, InputEvent::Toggle(Toggle::Spotlight, false));
        assert!(!ctx.lighting.point.enabled);
        input.handle(&mut ctx, InputEvent::Toggle(Toggle::Spotlight, true));
        assert!(ctx.lighting.point.enabled);
        input.handle(&mut ctx, InputEvent::Toggle(Toggle::NormalDebug, true));
        input.handle(&mut ctx, InputEvent::Toggle(Toggle::LightAnimation, true));
        assert!(ctx.lighting.normal_debug && ctx.lighting.animated);
    }

    #[test]
    fn sliders_write_single_components() {
        let mut ctx = SceneContext::new();
        let mut input = InputHandler::default();
        input.handle(&mut ctx, InputEvent::Slider(Slider::LightPosition { axis: 1 }, 7.5));
        input.handle(&mut ctx, InputEvent::Slider(Slider::LightColor { axis: 0 }, 0.25));
        input.handle(&mut ctx, InputEvent::Slider(Slider::SpotlightPosition { axis: 2 }, -3.0));
        assert_eq!(ctx.lighting.point.position, Vec3::new(5.0, 7.5, 4.0));
        assert_eq!(ctx.lighting.point.color, Vec3::new(0.25, 1.0, 1.0));
        assert_eq!(ctx.lighting.spot.position, Vec3::new(6.0, 10.0, -3.0));
    }

    #[test]
    fn invalid_slider_input_is_rejected() {
        let mut ctx = SceneContext::new();
        let before = ctx.lighting.clone();
        assert!(!apply_slider(&mut ctx, Slider::LightColor { axis: 3 }, 1.0));
        assert!(!apply_slider(&mut ctx, Slider::LightPosition { axis: 0 }, f32::NAN));
        assert_eq!(ctx.lighting, before);
    }
}
