//! Swappable game-logic table.
//!
//! The shell only talks to the game through a [`PlugApi`]. In debug builds
//! the table can be swapped at runtime without losing the [`Session`].

use crate::input::FrameInput;
use crate::physics::GameEvent;
use crate::render::draw::{draw_session, draw_session_debug, Assets};
use crate::session::Session;
use macroquad::logging::info;

/// Entry points of one game-logic implementation.
#[derive(Clone, Copy)]
pub struct PlugApi {
    /// Shown in logs when tables are swapped.
    pub name: &'static str,
    /// Run once when the table becomes active.
    pub init: fn(&mut Session),
    /// One frame of logic.
    pub update: fn(&mut Session, &FrameInput) -> Vec<GameEvent>,
    /// Draw the frame.
    pub render: fn(&Session, &Assets),
}

impl std::fmt::Debug for PlugApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlugApi").field("name", &self.name).finish()
    }
}

/// Normal play and editing.
pub fn game_plug() -> PlugApi {
    PlugApi {
        name: "game",
        init,
        update: Session::handle_input,
        render: draw_session,
    }
}

/// Same logic as [`game_plug`], drawn with hit boxes and the hovered cell.
pub fn debug_plug() -> PlugApi {
    PlugApi {
        name: "debug",
        init,
        update: Session::handle_input,
        render: draw_session_debug,
    }
}

/// Tables linked into this binary, in the order `F5` cycles through them.
pub const PLUGS: [fn() -> PlugApi; 2] = [game_plug, debug_plug];

fn init(session: &mut Session) {
    session.camera = Default::default();
    session.panel = Default::default();
    session.hovered = None;
}

/// Owns the active table and forwards the frame to it.
pub struct PlugHost {
    api: PlugApi,
    registry: Vec<fn() -> PlugApi>,
    index: usize,
    generation: u32,
}

impl PlugHost {
    /// Host starting on the first table of `registry`.
    ///
    /// Panics when `registry` is empty.
    pub fn new(registry: &[fn() -> PlugApi]) -> Self {
        assert!(!registry.is_empty(), "plug registry is empty");
        PlugHost {
            api: registry[0](),
            registry: registry.to_vec(),
            index: 0,
            generation: 0,
        }
    }

    /// Install `api` in place of the active table and run its `init`.
    /// Session data other than what `init` touches is kept.
    pub fn swap(&mut self, api: PlugApi, session: &mut Session) {
        info!("plug `{}` -> `{}`", self.api.name, api.name);
        self.api = api;
        self.generation += 1;
        (self.api.init)(session);
    }

    /// Swap to the next table in the registry, wrapping around.
    pub fn reload(&mut self, session: &mut Session) {
        self.index = (self.index + 1) % self.registry.len();
        let api = (self.registry[self.index])();
        self.swap(api, session);
    }

    /// Number of swaps so far.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Active table.
    pub fn api(&self) -> &PlugApi {
        &self.api
    }

    /// Run the active table's `init`.
    pub fn init(&self, session: &mut Session) {
        (self.api.init)(session)
    }

    /// Run the active table's `update`.
    pub fn update(&self, session: &mut Session, input: &FrameInput) -> Vec<GameEvent> {
        (self.api.update)(session, input)
    }

    /// Run the active table's `render`.
    pub fn render(&self, session: &Session, assets: &Assets) {
        (self.api.render)(session, assets)
    }
}
