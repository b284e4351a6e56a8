//! World <-> screen mapping and spawn point generation.
//!
//! World space has +y up and by default its origin at the center of the
//! screen. Screen space has its origin at the top-left corner with +y down.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{ensure_positive, SimError};
use crate::simulation::states::NVec2;

pub type ScreenPoint = Vector2<i32>;

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    screen_size: Vector2<u32>, // pixels
    world_size: NVec2,         // meters
    center: NVec2,             // world point shown at the screen center
}

impl Viewport {
    /// World height follows the screen aspect ratio
    pub fn new(screen: [u32; 2], world_width: f64) -> Result<Self, SimError> {
        let [sw, sh] = screen;
        ensure_positive("screen_width", sw as f64)?;
        ensure_positive("screen_height", sh as f64)?;
        let world_width = ensure_positive("world_width", world_width)?;

        Ok(Self {
            screen_size: Vector2::new(sw, sh),
            world_size: NVec2::new(world_width, world_width * sh as f64 / sw as f64),
            center: NVec2::zeros(),
        })
    }

    /// Put the world origin at the bottom-left corner of the screen
    pub fn with_corner_origin(mut self) -> Self {
        self.center = self.world_size * 0.5;
        self
    }

    pub fn center(&self) -> NVec2 {
        self.center
    }

    pub fn screen_size(&self) -> Vector2<u32> {
        self.screen_size
    }

    pub fn world_size(&self) -> NVec2 {
        self.world_size
    }

    /// Pixels per world unit, same on both axes
    pub fn scale(&self) -> f64 {
        self.screen_size.x as f64 / self.world_size.x
    }

    pub fn world_to_screen(&self, world: NVec2) -> ScreenPoint {
        let sw = self.screen_size.x as f64;
        let sh = self.screen_size.y as f64;
        let world = world - self.center;
        let x = sw * world.x / self.world_size.x + 0.5 * sw;
        let y = -sh * world.y / self.world_size.y + 0.5 * sh;
        ScreenPoint::new(x.round() as i32, y.round() as i32)
    }

    pub fn screen_to_world(&self, screen: ScreenPoint) -> NVec2 {
        let sw = self.screen_size.x as f64;
        let sh = self.screen_size.y as f64;
        let x = (screen.x as f64 - 0.5 * sw) * self.world_size.x / sw;
        let y = (0.5 * sh - screen.y as f64) * self.world_size.y / sh;
        NVec2::new(x, y) + self.center
    }
}

// quadrant order for consecutive spawns
const QUADRANTS: [(f64, f64); 4] = [(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0)];

/// Seedable spawn point source.
///
/// Every call draws a random offset inside half the world extent and places
/// it in the next quadrant, cycling through all four.
#[derive(Debug, Clone)]
pub struct SpawnPoints {
    rng: StdRng,
    half_extent: NVec2,
    quadrant: usize,
}

impl SpawnPoints {
    /// Both extents of `world_size` must be positive and finite
    pub fn new(seed: u64, world_size: NVec2) -> Result<Self, SimError> {
        ensure_positive("world_width", world_size.x)?;
        ensure_positive("world_height", world_size.y)?;
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            half_extent: world_size * 0.5,
            quadrant: 0,
        })
    }

    pub fn next_point(&mut self) -> NVec2 {
        let (sx, sy) = QUADRANTS[self.quadrant % QUADRANTS.len()];
        self.quadrant = self.quadrant.wrapping_add(1);

        let x = self.rng.gen_range(0.0..self.half_extent.x);
        let y = self.rng.gen_range(0.0..self.half_extent.y);
        NVec2::new(sx * x, sy * y)
    }
}
