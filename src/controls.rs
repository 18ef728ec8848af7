use winit::event::{ElementState, Event, MouseScrollDelta, VirtualKeyCode, WindowEvent};

use crate::{
    config::{Axis, ParamChange, ViewConfig},
    geometry::Quality,
};

/// Pan distance per key press.
const PAN_STEP: f32 = 0.1;

/// Zoom multiplier per key press or scroll line.
const ZOOM_STEP: f32 = 1.1;

/// Rotation rate change per key press (radians per millisecond).
const RATE_STEP: f32 = 0.00005;

/// Pixels of trackpad scroll that count as one line.
const PIXELS_PER_LINE: f64 = 40.0;

/// Turns keyboard and mouse-wheel input into [`ParamChange`]s.
///
/// Arrows pan, `+`/`-` or the wheel zoom, `X`/`Y`/`Z` pick the axis that
/// `[`/`]` slow down or speed up (`0` stops it), `Tab` switches between
/// filled and wireframe drawing, `PageUp`/`PageDown` change the quality.
pub struct InputSurface {
    axis: Axis,
}

impl InputSurface {
    pub fn new() -> Self {
        Self { axis: Axis::Z }
    }

    pub fn selected_axis(&self) -> Axis {
        self.axis
    }

    pub fn event<T>(&mut self, event: &Event<T>, current: &ViewConfig) -> Option<ParamChange> {
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::KeyboardInput { input, .. } if input.state.is_pressed() => {
                    self.key(input.virtual_keycode?, current)
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    let lines = match delta {
                        MouseScrollDelta::LineDelta(_, y) => *y,
                        MouseScrollDelta::PixelDelta(position) => {
                            (position.y / PIXELS_PER_LINE) as f32
                        }
                    };
                    self.scroll(lines, current)
                }
                _ => None,
            },
            _ => None,
        }
    }

    pub fn key(&mut self, key: VirtualKeyCode, current: &ViewConfig) -> Option<ParamChange> {
        let rate = current.rotation.get(self.axis);
        match key {
            VirtualKeyCode::Left => Some(ParamChange::PanX(current.pan_x - PAN_STEP)),
            VirtualKeyCode::Right => Some(ParamChange::PanX(current.pan_x + PAN_STEP)),
            VirtualKeyCode::Down => Some(ParamChange::PanY(current.pan_y - PAN_STEP)),
            VirtualKeyCode::Up => Some(ParamChange::PanY(current.pan_y + PAN_STEP)),
            VirtualKeyCode::Equals | VirtualKeyCode::Plus | VirtualKeyCode::NumpadAdd => {
                Some(ParamChange::Zoom(current.zoom * ZOOM_STEP))
            }
            VirtualKeyCode::Minus | VirtualKeyCode::NumpadSubtract => {
                Some(ParamChange::Zoom(current.zoom / ZOOM_STEP))
            }
            VirtualKeyCode::X | VirtualKeyCode::Y | VirtualKeyCode::Z => {
                self.axis = match key {
                    VirtualKeyCode::X => Axis::X,
                    VirtualKeyCode::Y => Axis::Y,
                    _ => Axis::Z,
                };
                log::debug!("rotation axis {:?} selected", self.axis);
                None
            }
            VirtualKeyCode::LBracket => {
                Some(ParamChange::RotationRate(self.axis, rate - RATE_STEP))
            }
            VirtualKeyCode::RBracket => {
                Some(ParamChange::RotationRate(self.axis, rate + RATE_STEP))
            }
            VirtualKeyCode::Key0 => Some(ParamChange::RotationRate(self.axis, 0.0)),
            VirtualKeyCode::Tab => Some(ParamChange::DrawMode(current.draw_mode.toggled())),
            VirtualKeyCode::PageUp => Quality::new(current.quality.get() + 1)
                .ok()
                .map(ParamChange::Quality),
            VirtualKeyCode::PageDown => current
                .quality
                .get()
                .checked_sub(1)
                .and_then(|q| Quality::new(q).ok())
                .map(ParamChange::Quality),
            _ => None,
        }
    }

    pub fn scroll(&mut self, lines: f32, current: &ViewConfig) -> Option<ParamChange> {
        if lines == 0.0 {
            return None;
        }
        Some(ParamChange::Zoom(current.zoom * ZOOM_STEP.powf(lines)))
    }
}

impl Default for InputSurface {
    fn default() -> Self {
        Self::new()
    }
}

trait ElementStateExt {
    fn is_pressed(&self) -> bool;
}

impl ElementStateExt for ElementState {
    fn is_pressed(&self) -> bool {
        matches!(self, ElementState::Pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DrawMode, geometry::MAX_QUALITY};

    #[test]
    fn arrows_pan() {
        let config = ViewConfig::default();
        let mut input = InputSurface::new();
        assert_eq!(
            input.key(VirtualKeyCode::Right, &config),
            Some(ParamChange::PanX(PAN_STEP))
        );
        assert_eq!(
            input.key(VirtualKeyCode::Down, &config),
            Some(ParamChange::PanY(-PAN_STEP))
        );
    }

    #[test]
    fn rate_keys_follow_selected_axis() {
        let config = ViewConfig::default();
        let mut input = InputSurface::new();
        assert_eq!(input.key(VirtualKeyCode::X, &config), None);
        assert_eq!(input.selected_axis(), Axis::X);
        assert_eq!(
            input.key(VirtualKeyCode::Key0, &config),
            Some(ParamChange::RotationRate(Axis::X, 0.0))
        );
        match input.key(VirtualKeyCode::RBracket, &config) {
            Some(ParamChange::RotationRate(Axis::X, rate)) => {
                assert!((rate - (config.rotation.x + RATE_STEP)).abs() < 1e-9)
            }
            other => panic!("unexpected change {:?}", other),
        }
    }

    #[test]
    fn zoom_keys_and_wheel() {
        let config = ViewConfig::default();
        let mut input = InputSurface::new();
        assert_eq!(
            input.key(VirtualKeyCode::Minus, &config),
            Some(ParamChange::Zoom(config.zoom / ZOOM_STEP))
        );
        assert_eq!(
            input.scroll(1.0, &config),
            Some(ParamChange::Zoom(config.zoom * ZOOM_STEP))
        );
        assert_eq!(input.scroll(0.0, &config), None);
    }

    #[test]
    fn tab_toggles_draw_mode() {
        let config = ViewConfig::default();
        let mut input = InputSurface::new();
        assert_eq!(
            input.key(VirtualKeyCode::Tab, &config),
            Some(ParamChange::DrawMode(DrawMode::Wireframe))
        );
    }

    #[test]
    fn quality_stays_in_range() {
        let mut config = ViewConfig::default();
        let mut input = InputSurface::new();

        config.quality = Quality::BASE;
        assert_eq!(input.key(VirtualKeyCode::PageDown, &config), None);

        config.quality = Quality::new(MAX_QUALITY).unwrap();
        assert_eq!(input.key(VirtualKeyCode::PageUp, &config), None);
        assert_eq!(
            input.key(VirtualKeyCode::PageDown, &config),
            Some(ParamChange::Quality(Quality::new(MAX_QUALITY - 1).unwrap()))
        );
    }
}
