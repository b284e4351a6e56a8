//! Build fully-initialized demo scenes from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces runtime bundles:
//! - `GravityScene`: object arena, gravity simulator, collider registry,
//!   viewport and spawn point generator, with the sun already registered
//! - `BallScene`: the bouncy ball with its precomputed trajectory
//!
//! Both expose `step`, `render` and `run`; the loop collaborators (input,
//! clock, renderer) are passed in so the same scene drives the headless
//! binary, the bevy viewer and the tests.

use tracing::{debug, info};

use super::collision::CollisionResolver;
use super::forces::UniformGravity;
use super::gravity::GravitySimulator;
use super::objects::{ObjectHandle, ObjectSet};
use super::params::Parameters;
use super::projectile::{BouncingBall, Trajectory};
use super::states::{CirclePhysicalObject, NVec2};
use crate::configuration::config::{PlanetConfig, ScenarioConfig};
use crate::error::SimError;
use crate::visualization::viewport::{SpawnPoints, Viewport};
use crate::visualization::{Clock, InputEvent, InputSource, Renderer};

#[cfg_attr(feature = "viewer", derive(bevy::prelude::Resource))]
pub struct GravityScene {
    pub parameters: Parameters,
    pub objects: ObjectSet,
    pub gravity: GravitySimulator,
    pub collisions: CollisionResolver,
    pub viewport: Viewport,
    spawner: SpawnPoints,
    planet: PlanetConfig,
    sun: Option<ObjectHandle>,
    tick: u64,
}

impl GravityScene {
    pub fn build(cfg: &ScenarioConfig) -> Result<Self, SimError> {
        let parameters = cfg.parameters.to_parameters()?;
        let viewport = Viewport::new(cfg.world.screen, cfg.world.width)?;
        let spawner = SpawnPoints::new(parameters.seed, viewport.world_size())?;

        let mut gravity = GravitySimulator::with_capacity(parameters.g, parameters.capacity)
            .with_min_distance(parameters.min_distance)?;
        if parameters.field != NVec2::zeros() {
            gravity = gravity.with_force(UniformGravity { g: parameters.field });
        }
        let collisions = CollisionResolver::with_capacity(parameters.capacity);

        // Sun first so it is always the first registered body
        let sun = CirclePhysicalObject::new(cfg.sun.radius)?
            .with_mass(cfg.sun.mass)?
            .with_position(NVec2::new(cfg.sun.x[0], cfg.sun.x[1]));

        let mut objects = ObjectSet::new();
        let sun_handle = objects.insert(sun);

        let mut scene = Self {
            parameters,
            objects,
            gravity,
            collisions,
            viewport,
            spawner,
            planet: cfg.planet.clone(),
            sun: Some(sun_handle),
            tick: 0,
        };
        scene.register(sun_handle);

        // Map every `BodyConfig` to an object
        for bc in &cfg.bodies {
            let object = CirclePhysicalObject::new(bc.radius)?
                .with_mass(bc.m)?
                .with_position(NVec2::new(bc.x[0], bc.x[1]))
                .with_velocity(NVec2::new(bc.v[0], bc.v[1]));
            scene.spawn(object);
        }

        info!(bodies = scene.gravity.len(), "gravity scene ready");
        Ok(scene)
    }

    fn register(&mut self, handle: ObjectHandle) {
        self.gravity.add(handle);
        self.collisions.add(handle);
    }

    /// Take ownership of `object` and register it with both registries
    pub fn spawn(&mut self, object: CirclePhysicalObject) -> ObjectHandle {
        let handle = self.objects.insert(object);
        self.register(handle);
        handle
    }

    /// Planet from the configured template at the next spawn point
    pub fn spawn_planet(&mut self) -> Result<ObjectHandle, SimError> {
        let position = self.spawner.next_point();
        let planet = CirclePhysicalObject::new(self.planet.radius)?
            .with_mass(self.planet.mass)?
            .with_position(position);
        let handle = self.spawn(planet);
        debug!(?handle, x = position.x, y = position.y, "planet spawned");
        Ok(handle)
    }

    /// Unregister and drop the object behind `handle`
    pub fn despawn(&mut self, handle: ObjectHandle) -> Option<CirclePhysicalObject> {
        if self.sun == Some(handle) {
            self.sun = None;
        }
        self.gravity.remove(handle);
        self.collisions.remove(handle);
        self.objects.remove(handle)
    }

    /// `None` once the sun has been despawned
    pub fn sun(&self) -> Option<ObjectHandle> {
        self.sun
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn handle_input(&mut self, events: &[InputEvent]) -> Result<(), SimError> {
        for event in events {
            match event {
                InputEvent::SpawnBody => {
                    self.spawn_planet()?;
                }
            }
        }
        Ok(())
    }

    /// Gravity tick, then collision resolution
    pub fn step(&mut self) -> Result<(), SimError> {
        self.gravity.simulate(&mut self.objects, self.parameters.delta_time)?;
        self.collisions.resolve(&mut self.objects);
        self.tick += 1;
        Ok(())
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> Result<(), SimError> {
        let mut circles = Vec::with_capacity(self.collisions.len());
        self.collisions
            .for_each_collider(&self.objects, |_, object| circles.push((object.position(), object.radius())));

        renderer.begin_frame(self.tick)?;
        for (center, radius) in circles {
            renderer.draw_circle(center, radius)?;
        }
        Ok(())
    }

    /// Demo main loop: input, simulate, resolve, render, wait
    pub fn run<I, C, R>(&mut self, input: &mut I, clock: &mut C, renderer: &mut R, ticks: u64) -> Result<(), SimError>
    where
        I: InputSource,
        C: Clock,
        R: Renderer,
    {
        self.parameters.delta_time = clock.tick_interval();
        for _ in 0..ticks {
            let events = input.poll();
            self.handle_input(&events)?;
            self.step()?;
            self.render(renderer)?;
            clock.wait_for_next_tick();
        }
        Ok(())
    }
}

/// Bouncy ball demo. World origin is the bottom-left corner, the floor is
/// the horizontal line `y = floor`.
#[cfg_attr(feature = "viewer", derive(bevy::prelude::Resource))]
pub struct BallScene {
    pub trajectory: Trajectory,
    pub ball: BouncingBall,
    pub gravity: NVec2,
    pub viewport: Viewport,
    pub delta_time: f64,
    pub floor: f64,
    trajectory_points: usize,
    bounces: usize,
    tick: u64,
}

impl BallScene {
    pub fn build(cfg: &ScenarioConfig) -> Result<Self, SimError> {
        let parameters = cfg.parameters.to_parameters()?;
        let viewport = Viewport::new(cfg.world.screen, cfg.world.width)?.with_corner_origin();

        let b = &cfg.ball;
        let gravity = NVec2::new(0.0, b.gravity);
        let origin = NVec2::new(b.origin[0], b.origin[1]);
        let trajectory = Trajectory::for_range(origin, b.range, b.angle_deg.to_radians(), gravity)?;
        let ball = BouncingBall::new(origin, trajectory.initial_velocity, b.radius, b.restitution)?;

        info!(
            speed = trajectory.initial_velocity.norm(),
            time_of_flight = trajectory.time_of_flight,
            "bouncy ball scene ready"
        );

        Ok(Self {
            trajectory,
            ball,
            gravity,
            viewport,
            delta_time: parameters.delta_time,
            floor: b.floor,
            trajectory_points: b.trajectory_points,
            bounces: 0,
            tick: 0,
        })
    }

    pub fn trajectory_points(&self) -> usize {
        self.trajectory_points
    }

    pub fn bounces(&self) -> usize {
        self.bounces
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn step(&mut self) -> Result<bool, SimError> {
        let bounced = self.ball.step(self.gravity, self.delta_time, self.floor)?;
        if bounced {
            self.bounces += 1;
            debug!(bounces = self.bounces, vy = self.ball.velocity.y, "ball bounced");
        }
        self.tick += 1;
        Ok(bounced)
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> Result<(), SimError> {
        renderer.begin_frame(self.tick)?;
        renderer.draw_trajectory(&self.trajectory.sample(self.trajectory_points))?;
        renderer.draw_circle(self.ball.position, self.ball.radius)?;
        Ok(())
    }

    pub fn run<C, R>(&mut self, clock: &mut C, renderer: &mut R, ticks: u64) -> Result<(), SimError>
    where
        C: Clock,
        R: Renderer,
    {
        self.delta_time = clock.tick_interval();
        for _ in 0..ticks {
            self.step()?;
            self.render(renderer)?;
            clock.wait_for_next_tick();
        }
        Ok(())
    }
}
