use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    engine::EngineSettings,
    world::{Entity, World, WorldError},
};

fn default_tick_ms() -> f64 {
    16.6
}

fn default_max_run_ms() -> Option<f64> {
    Some(5000.0)
}

fn default_entity_count() -> usize {
    5
}

fn default_glyphs() -> String {
    "@*o+x".to_string()
}

/// A runnable setup: tick rate, run duration, and the entity batch.
///
/// `max_run_ms` defaults to a five-second demo; an explicit `null` in the
/// file runs untimed until an input stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: f64,
    #[serde(default = "default_max_run_ms")]
    pub max_run_ms: Option<f64>,
    #[serde(default)]
    pub entities: EntityBatch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityBatch {
    #[serde(default = "default_entity_count")]
    pub count: usize,
    /// Glyph cycle assigned to entities in index order.
    #[serde(default = "default_glyphs")]
    pub glyphs: String,
}

impl Default for EntityBatch {
    fn default() -> Self {
        Self {
            count: default_entity_count(),
            glyphs: default_glyphs(),
        }
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}

impl Scenario {
    /// The built-in demo: a handful of glyphs lobbed upward into gravity,
    /// running for five seconds.
    pub fn freefall() -> Self {
        Self {
            name: "freefall".to_string(),
            description: None,
            tick_ms: default_tick_ms(),
            max_run_ms: default_max_run_ms(),
            entities: EntityBatch::default(),
        }
    }

    /// Spawns the deterministic batch: index i starts at (20+i, 5+i) with
    /// velocity (3i+1, i-6).
    pub fn build_world(&self) -> Result<World, WorldError> {
        let mut world = World::with_capacity(self.entities.count)?;
        let glyphs: Vec<char> = self.entities.glyphs.chars().collect();
        for i in 0..self.entities.count {
            let glyph = if glyphs.is_empty() {
                'o'
            } else {
                glyphs[i % glyphs.len()]
            };
            world.spawn(Entity {
                pos_x: 20.0 + i as f64,
                pos_y: 5.0 + i as f64,
                vel_x: 3.0 * i as f64 + 1.0,
                vel_y: i as f64 - 6.0,
                glyph,
                physics: true,
            });
        }
        Ok(world)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            tick_ms: self.tick_ms,
            max_run_ms: self.max_run_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freefall_defaults() {
        let scenario = Scenario::freefall();
        assert_eq!(scenario.name, "freefall");
        assert_eq!(scenario.tick_ms, 16.6);
        assert_eq!(scenario.max_run_ms, Some(5000.0));
        assert_eq!(scenario.entities.count, 5);
    }

    #[test]
    fn minimal_yaml_fills_defaults() {
        let scenario: Scenario = serde_yaml::from_str("name: bare").unwrap();
        assert_eq!(scenario.name, "bare");
        assert_eq!(scenario.tick_ms, 16.6);
        assert_eq!(scenario.max_run_ms, Some(5000.0));
        assert_eq!(scenario.entities.count, 5);
    }

    #[test]
    fn explicit_null_runs_untimed() {
        let scenario: Scenario = serde_yaml::from_str("name: forever\nmax_run_ms: null").unwrap();
        assert_eq!(scenario.max_run_ms, None);
    }

    #[test]
    fn loader_reads_scenario_files() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = serde_yaml::to_string(&Scenario::freefall()).unwrap();
        fs::write(dir.path().join("demo.yaml"), yaml).unwrap();

        let loader = ScenarioLoader::new(dir.path());
        let scenario = loader.load("demo.yaml").unwrap();
        assert_eq!(scenario.name, "freefall");
        assert_eq!(scenario.entities.glyphs, "@*o+x");
    }

    #[test]
    fn build_world_spawns_the_indexed_batch() {
        let world = Scenario::freefall().build_world().unwrap();
        assert_eq!(world.entity_count(), 5);

        let entities: Vec<_> = world.entities().collect();
        assert_eq!(entities[0].pos_x, 20.0);
        assert_eq!(entities[0].pos_y, 5.0);
        assert_eq!(entities[0].vel_x, 1.0);
        assert_eq!(entities[0].vel_y, -6.0);
        assert_eq!(entities[4].pos_x, 24.0);
        assert_eq!(entities[4].vel_x, 13.0);
        assert_eq!(entities[4].vel_y, -2.0);
        assert!(entities.iter().all(|e| e.physics));
    }
}
