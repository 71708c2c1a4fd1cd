use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use voxscene_common::{GRID_SIZE, GRID_Z_OFFSET, RainConfig};

/// Fall speed range (world units per tick).
const FALL_SPEED: (f32, f32) = (0.1, 0.2);
/// Height range for the initial pool.
const SPAWN_HEIGHT: (f32, f32) = (0.0, 20.0);
/// Height range a drop respawns at after reaching the ground.
const RESPAWN_HEIGHT: (f32, f32) = (20.0, 25.0);

/// A single rain particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raindrop {
    pub position: Vec3,
    pub fall_speed: f32,
}

/// Fixed pool of raindrops falling over the grid footprint.
///
/// Pool order is stable and is also the emission order. Drops that fall below
/// `y = 0` respawn above the grid with a fresh column and fall speed.
#[derive(Debug, Clone)]
pub struct Rain {
    drops: Vec<Raindrop>,
    rng: ChaCha12Rng,
}

impl Default for Rain {
    fn default() -> Self {
        Self::from_config(&RainConfig::default())
    }
}

impl Rain {
    /// Create `count` drops scattered over the grid with heights in `[0, 20)`.
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        let drops = (0..count)
            .map(|_| {
                let (x, z) = random_column(&mut rng);
                Raindrop {
                    position: Vec3::new(x, rng.gen_range(SPAWN_HEIGHT.0..SPAWN_HEIGHT.1), z),
                    fall_speed: random_fall_speed(&mut rng),
                }
            })
            .collect();
        Self { drops, rng }
    }

    pub fn from_config(config: &RainConfig) -> Self {
        Self::new(config.count, config.seed)
    }

    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Advance every drop by one tick. Returns how many drops respawned.
    pub fn update(&mut self) -> usize {
        let mut respawned = 0;
        for drop in &mut self.drops {
            drop.position.y -= drop.fall_speed;
            if drop.position.y < 0.0 {
                let (x, z) = random_column(&mut self.rng);
                drop.position = Vec3::new(
                    x,
                    self.rng.gen_range(RESPAWN_HEIGHT.0..RESPAWN_HEIGHT.1),
                    z,
                );
                drop.fall_speed = random_fall_speed(&mut self.rng);
                respawned += 1;
            }
        }
        tracing::trace!(respawned, total = self.drops.len(), "rain advanced");
        respawned
    }
}

/// Random `(x, z)` over the grid footprint: x in `[0, 32)`, z in `[-25, 7)`.
fn random_column(rng: &mut ChaCha12Rng) -> (f32, f32) {
    let extent = GRID_SIZE as f32;
    let x = rng.gen_range(0.0..extent);
    let z = rng.gen_range(0.0..extent) - GRID_Z_OFFSET;
    (x, z)
}

fn random_fall_speed(rng: &mut ChaCha12Rng) -> f32 {
    rng.gen_range(FALL_SPEED.0..FALL_SPEED.1)
}
