//! Force contributors for the 2D demos
//!
//! Defines the [`Force`] trait, a [`ForceSet`] that sums several terms into
//! one net force per body, direct Newtonian gravity and a uniform field.

use super::states::NVec2;

/// Separation clamp used when none is configured
pub const DEFAULT_MIN_DISTANCE: f64 = 1.0;

/// Read-only snapshot of one body, taken before any body moves in a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: NVec2,
    pub mass: f64,
}

/// Force on body `i` (at `xi`, mass `mi`) due to body `j`.
///
/// Magnitude `g * mi * mj / d^2` with `d = max(|xj - xi|, min_distance)`,
/// pointing from `i` toward `j`. Coincident positions have no direction and
/// contribute nothing.
pub fn pairwise_force(xi: NVec2, mi: f64, xj: NVec2, mj: f64, g: f64, min_distance: f64) -> NVec2 {
    // r points from i to j, so i is pulled along +r
    let r = xj - xi;
    let r2 = r.norm_squared();
    if r2 == 0.0 {
        return NVec2::zeros();
    }

    let dist = r2.sqrt();
    let clamped = dist.max(min_distance);
    let magnitude = g * mi * mj / (clamped * clamped);

    // normalize first: for tiny separations magnitude / dist overflows and
    // 0 * inf would turn the zero component into NaN
    let dir = r / dist;
    dir * magnitude
}

/// Trait for force sources operating on a body snapshot.
/// Implementations add their contribution into `out[i]` for each body
pub trait Force {
    fn accumulate(&self, bodies: &[BodyState], out: &mut [NVec2]);
}

/// Collection of force terms (gravity, uniform field, ...)
/// Contributions of every term are summed into one force per body
pub struct ForceSet {
    terms: Vec<Box<dyn Force + Send + Sync>>,
}

impl Default for ForceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ForceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForceSet").field("terms", &self.terms.len()).finish()
    }
}

impl ForceSet {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Force + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute net forces for all bodies
    /// - `out[i]` is overwritten with the sum of contributions from all terms
    pub fn accumulate_forces(&self, bodies: &[BodyState], out: &mut [NVec2]) {
        for f in out.iter_mut() {
            *f = NVec2::zeros();
        }
        for term in &self.terms {
            term.accumulate(bodies, out);
        }
    }
}

/// Newtonian attraction between every pair of bodies, O(n^2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub g: f64,            // gravitational constant
    pub min_distance: f64, // separation clamp, keeps 1/d^2 finite
}

impl Force for NewtonianGravity {
    fn accumulate(&self, bodies: &[BodyState], out: &mut [NVec2]) {
        let n = bodies.len();

        // Each unordered pair (i, j), i < j, is evaluated once and applied
        // equal and opposite, so the net internal force is exactly zero
        for i in 0..n {
            let bi = bodies[i];
            for j in (i + 1)..n {
                let bj = bodies[j];

                // f is the pull on i, pointing from i toward j
                // d = max(|xj - xi|, min_distance) keeps 1/d^2 bounded
                let f = pairwise_force(bi.position, bi.mass, bj.position, bj.mass, self.g, self.min_distance);

                // i moves toward j, j toward i
                out[i] += f;
                out[j] -= f;
            }
        }
    }
}

/// Constant field, force `m * g` on every body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformGravity {
    pub g: NVec2,
}

impl Force for UniformGravity {
    fn accumulate(&self, bodies: &[BodyState], out: &mut [NVec2]) {
        for (f, b) in out.iter_mut().zip(bodies) {
            *f += self.g * b.mass;
        }
    }
}
