pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;

pub use error::SimError;

pub use simulation::states::{NVec2, Transform, RigidBody, CircleCollider, CirclePhysicalObject};
pub use simulation::objects::{ObjectHandle, ObjectSet};
pub use simulation::registry::HandleBuffer;
pub use simulation::forces::{pairwise_force, BodyState, Force, ForceSet, NewtonianGravity, UniformGravity};
pub use simulation::gravity::GravitySimulator;
pub use simulation::collision::CollisionResolver;
pub use simulation::params::Parameters;
pub use simulation::projectile::{launch_speed_for_range, BouncingBall, Trajectory};
pub use simulation::scenario::{GravityScene, BallScene};

pub use configuration::config::{DemoKind, ScenarioConfig, ParametersConfig, WorldConfig, SunConfig, PlanetConfig, BodyConfig, BallConfig};

pub use visualization::{Renderer, InputSource, InputEvent, ScriptedInput, Clock, FixedClock, ManualClock, RecordingRenderer, Frame};
pub use visualization::viewport::{Viewport, SpawnPoints};
pub use visualization::text::TextRenderer;

#[cfg(feature = "viewer")]
pub use visualization::viewer2d::{run_gravity_2d, run_ball_2d};
