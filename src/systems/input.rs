use anyhow::Result;

use crate::{
    engine::{System, TickContext},
    input::{dispatch, Effect, InputSource, TerminalInput},
    world::World,
};

/// Drains the input source to exhaustion each tick, before physics runs, and
/// applies every event's effect to the world.
pub struct InputSystem {
    source: Box<dyn InputSource>,
}

impl InputSystem {
    pub fn new(source: Box<dyn InputSource>) -> Self {
        Self { source }
    }

    pub fn terminal() -> Self {
        Self::new(Box::new(TerminalInput::new()))
    }
}

impl System for InputSystem {
    fn name(&self) -> &str {
        "input"
    }

    fn run(&mut self, _ctx: &TickContext, world: &mut World) -> Result<()> {
        while let Some(event) = self.source.poll_next()? {
            match dispatch(event) {
                Effect::Marker(glyph) => world.set_marker(glyph),
                Effect::Stop => world.request_stop(),
                Effect::None => {}
            }
        }
        Ok(())
    }
}
