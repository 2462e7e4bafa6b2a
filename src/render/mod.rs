//! Character-grid rendering.
//!
//! Rendering goes through a plain framebuffer that the simulation plots
//! glyphs into; only `screen` touches the terminal. This keeps the draw path
//! deterministic and testable, and makes the terminal backend a thin,
//! replaceable collaborator.

pub mod fb;
pub mod screen;

pub use fb::FrameBuffer;
pub use screen::{Screen, TerminalScreen};

use crate::world::World;

/// Tri-state dirty flag deciding whether a frame needs redrawing.
///
/// Set once per outer frame when the accumulator crosses the tick threshold,
/// independent of how many integration steps that frame runs; cleared after
/// the frame is drawn.
#[derive(Debug, Default)]
pub struct RenderGate {
    dirty: bool,
}

impl RenderGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

/// Plots the current state into the framebuffer: clear, one glyph per live
/// entity at its integer-truncated cell, then the pending input marker at the
/// cursor. An empty store produces an empty frame.
pub fn draw_world(world: &mut World, fb: &mut FrameBuffer) {
    fb.clear();
    for entity in world.entities() {
        fb.plot(entity.pos_x, entity.pos_y, entity.glyph);
    }
    if let Some(glyph) = world.take_marker() {
        fb.plot_marker(glyph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Entity;

    #[test]
    fn gate_sets_and_clears() {
        let mut gate = RenderGate::new();
        assert!(!gate.is_dirty());
        gate.mark_dirty();
        gate.mark_dirty();
        assert!(gate.is_dirty());
        gate.clear_dirty();
        assert!(!gate.is_dirty());
    }

    #[test]
    fn draw_empty_world_yields_blank_frame() {
        let mut world = World::new();
        let mut fb = FrameBuffer::new(10, 4);
        draw_world(&mut world, &mut fb);
        assert!(fb.cells().iter().all(|&c| c == ' '));
    }

    #[test]
    fn draw_plots_entities_and_consumes_marker() {
        let mut world = World::new();
        world.spawn(Entity {
            pos_x: 3.9,
            pos_y: 1.2,
            vel_x: 0.0,
            vel_y: 0.0,
            glyph: '@',
            physics: true,
        });
        world.set_marker('^');

        let mut fb = FrameBuffer::new(10, 4);
        draw_world(&mut world, &mut fb);

        // 3.9 truncates to column 3, 1.2 to row 1; marker lands at the cursor
        // cell just past the entity.
        assert_eq!(fb.cell(3, 1), Some('@'));
        assert_eq!(fb.cell(4, 1), Some('^'));
        assert_eq!(world.take_marker(), None);
    }
}
