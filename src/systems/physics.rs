use anyhow::Result;

use crate::{
    engine::{System, TickContext},
    world::World,
};

/// Downward acceleration applied to physics-enabled entities, in display
/// cells per second squared.
pub const FALL_RATE: f64 = 9.8;

/// Semi-implicit Euler integrator: gravity folds into the velocity first,
/// then the position moves by the post-gravity velocity. Always steps by the
/// fixed tick duration.
pub struct PhysicsSystem;

impl PhysicsSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PhysicsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for PhysicsSystem {
    fn name(&self) -> &str {
        "physics"
    }

    fn run(&mut self, ctx: &TickContext, world: &mut World) -> Result<()> {
        let dt = ctx.dt_ms / 1000.0;
        for entity in world.entities_mut().filter(|e| e.physics) {
            entity.vel_y += dt * FALL_RATE;
            entity.pos_x += dt * entity.vel_x;
            entity.pos_y += dt * entity.vel_y;
        }
        Ok(())
    }
}
