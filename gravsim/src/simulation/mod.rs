pub mod states;
pub mod params;
pub mod objects;
pub mod registry;
pub mod forces;
pub mod integrator;
pub mod gravity;
pub mod collision;
pub mod projectile;
pub mod scenario;
