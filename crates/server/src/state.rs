use thor_routing::engine::Engine;

/// Shared by every handler. The engine is initialized before the state is
/// built and never mutated afterwards.
pub struct AppState {
    pub engine: Engine,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }
}
