use macroquad::prelude::*;

/// Everything the game reads from the keyboard and mouse in one frame.
/// Built by [`FrameInput::poll`] in the shell so game logic stays testable.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Cursor in screen space.
    pub mouse: Vec2,
    /// Left button held.
    pub left_down: bool,
    /// Left button went down this frame.
    pub left_pressed: bool,
    /// Wheel notches this frame, positive away from the user.
    pub wheel: f32,
    /// Frame time in seconds.
    pub dt: f32,

    /// `S`: show or hide the tool panel.
    pub toggle_panel: bool,
    /// `F`: next tool.
    pub cycle_tool: bool,
    /// `D`: wipe grid and spawns.
    pub clear: bool,
    /// `Ctrl+S`: write the level.
    pub save: bool,
    /// `L` or `Tab`: open the next level file.
    pub next_level: bool,
    /// `N`: start an empty level.
    pub new_level: bool,
    /// `Space` or `Enter`: start or stop play.
    pub toggle_play: bool,
    /// `F5` in debug builds: swap the plug table.
    pub reload: bool,
}

impl FrameInput {
    /// Read the current macroquad input state.
    pub fn poll() -> Self {
        let (mx, my) = mouse_position();
        let ctrl = is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl);
        let (_, wheel_y) = mouse_wheel();

        FrameInput {
            mouse: vec2(mx, my),
            left_down: is_mouse_button_down(MouseButton::Left),
            left_pressed: is_mouse_button_pressed(MouseButton::Left),
            wheel: notches(wheel_y),
            dt: get_frame_time(),

            toggle_panel: !ctrl && is_key_pressed(KeyCode::S),
            cycle_tool: is_key_pressed(KeyCode::F),
            clear: is_key_pressed(KeyCode::D),
            save: ctrl && is_key_pressed(KeyCode::S),
            next_level: is_key_pressed(KeyCode::L) || is_key_pressed(KeyCode::Tab),
            new_level: is_key_pressed(KeyCode::N),
            toggle_play: is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter),
            reload: cfg!(debug_assertions) && is_key_pressed(KeyCode::F5),
        }
    }
}

/// Platforms report wheel deltas in different units; only the direction is
/// kept.
fn notches(delta: f32) -> f32 {
    if delta > 0.0 {
        1.0
    } else if delta < 0.0 {
        -1.0
    } else {
        0.0
    }
}
