use std::collections::TryReserveError;

use thiserror::Error;

/// A simulated object: a glyph at a real-valued grid position.
///
/// Positions and velocities are in display cells and cells/second; they stay
/// finite for every input the integrator produces. Only entities with
/// `physics` set are advanced by the physics system.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub pos_x: f64,
    pub pos_y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub glyph: char,
    pub physics: bool,
}

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("failed to allocate entity storage: {0}")]
    Allocation(#[from] TryReserveError),
}

/// Owns the full entity set plus the per-tick input side effects.
///
/// Entities are spawned once at startup and torn down once at shutdown;
/// iteration is by length in insertion order.
#[derive(Debug, Default)]
pub struct World {
    entities: Vec<Entity>,
    marker: Option<char>,
    stop_requested: bool,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves room for `count` entities up front, surfacing allocation
    /// failure instead of aborting. On error no entity is initialized.
    pub fn with_capacity(count: usize) -> Result<Self, WorldError> {
        let mut entities = Vec::new();
        entities.try_reserve_exact(count)?;
        Ok(Self {
            entities,
            marker: None,
            stop_requested: false,
        })
    }

    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Releases every owned entity. Safe to call more than once; after the
    /// first call the store is empty and iteration yields nothing.
    pub fn teardown(&mut self) {
        self.entities.clear();
        self.marker = None;
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Latest directional marker, replaced on each directional key and
    /// consumed by the next draw.
    pub fn set_marker(&mut self, glyph: char) {
        self.marker = Some(glyph);
    }

    pub fn take_marker(&mut self) -> Option<char> {
        self.marker.take()
    }

    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(i: usize) -> Entity {
        Entity {
            pos_x: 20.0 + i as f64,
            pos_y: 5.0 + i as f64,
            vel_x: 3.0 * i as f64 + 1.0,
            vel_y: i as f64 - 6.0,
            glyph: 'o',
            physics: true,
        }
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let mut world = World::with_capacity(3).unwrap();
        for i in 0..3 {
            world.spawn(probe(i));
        }

        let xs: Vec<f64> = world.entities().map(|e| e.pos_x).collect();
        assert_eq!(xs, vec![20.0, 21.0, 22.0]);
        assert_eq!(world.entity_count(), 3);
    }

    #[test]
    fn teardown_is_idempotent() {
        let mut world = World::with_capacity(2).unwrap();
        world.spawn(probe(0));
        world.spawn(probe(1));

        world.teardown();
        assert_eq!(world.entity_count(), 0);
        assert_eq!(world.entities().count(), 0);

        world.teardown();
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn marker_is_consumed_once() {
        let mut world = World::new();
        world.set_marker('^');
        assert_eq!(world.take_marker(), Some('^'));
        assert_eq!(world.take_marker(), None);
    }
}
