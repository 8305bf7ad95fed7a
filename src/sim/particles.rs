//! Decorative particle bursts (never gameplay-affecting)

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::consts::PARTICLE_GRAVITY;

/// Maximum particles alive at once
pub const MAX_PARTICLES: usize = 256;

/// Longest lifetime a burst can roll, used for fade-out
pub const MAX_PARTICLE_LIFE: f32 = 0.9;

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Track-space position
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
    pub size: f32,
    pub color: Rgb,
}

impl Particle {
    /// Opacity for rendering, 0-1
    pub fn alpha(&self) -> f32 {
        (self.life / MAX_PARTICLE_LIFE).clamp(0.0, 1.0)
    }
}

/// Owns every live particle of one simulation context
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    rng: Pcg32,
    cap: usize,
}

impl ParticlePool {
    pub fn new(seed: u64) -> Self {
        Self::with_capacity(seed, MAX_PARTICLES)
    }

    /// Pool that never holds more than `cap` particles (0 disables bursts)
    pub fn with_capacity(seed: u64, cap: usize) -> Self {
        Self {
            particles: Vec::with_capacity(cap.min(MAX_PARTICLES)),
            rng: Pcg32::seed_from_u64(seed),
            cap,
        }
    }

    /// Append up to `count` particles around `origin`
    pub fn spawn_burst(&mut self, origin: Vec2, count: usize, color: Rgb) {
        let room = self.cap.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let vel = Vec2::new(
                self.rng.random_range(-200.0..200.0),
                self.rng.random_range(-260.0..-40.0),
            );
            self.particles.push(Particle {
                pos: origin,
                vel,
                life: self.rng.random_range(0.36..MAX_PARTICLE_LIFE),
                size: self.rng.random_range(2.0..6.0),
                color,
            });
        }
    }

    /// Age, move and cull particles
    pub fn advance(&mut self, dt: f32) {
        for p in self.particles.iter_mut() {
            p.life -= dt;
            p.pos += p.vel * dt;
            p.vel.y += PARTICLE_GRAVITY * dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_rolls_within_ranges() {
        let mut pool = ParticlePool::new(42);
        pool.spawn_burst(Vec2::new(100.0, 50.0), 12, Rgb::CORAL);
        assert_eq!(pool.len(), 12);
        for p in pool.particles() {
            assert_eq!(p.pos, Vec2::new(100.0, 50.0));
            assert!((-200.0..200.0).contains(&p.vel.x));
            assert!((-260.0..-40.0).contains(&p.vel.y));
            assert!((0.36..0.9).contains(&p.life));
            assert!((2.0..6.0).contains(&p.size));
        }
    }

    #[test]
    fn particles_fall_and_expire() {
        let mut pool = ParticlePool::new(1);
        pool.spawn_burst(Vec2::ZERO, 12, Rgb::CORAL);
        let vy0 = pool.particles()[0].vel.y;
        pool.advance(0.1);
        assert!((pool.particles()[0].vel.y - (vy0 + 120.0)).abs() < 1e-3);

        for _ in 0..10 {
            pool.advance(0.1);
        }
        assert!(pool.is_empty());
    }

    #[test]
    fn capacity_limits_bursts() {
        let mut pool = ParticlePool::with_capacity(3, 20);
        pool.spawn_burst(Vec2::ZERO, 12, Rgb::CORAL);
        pool.spawn_burst(Vec2::ZERO, 12, Rgb::CORAL);
        assert_eq!(pool.len(), 20);

        let mut off = ParticlePool::with_capacity(3, 0);
        off.spawn_burst(Vec2::ZERO, 12, Rgb::CORAL);
        assert!(off.is_empty());
    }

    #[test]
    fn same_seed_same_burst() {
        let mut a = ParticlePool::new(9);
        let mut b = ParticlePool::new(9);
        a.spawn_burst(Vec2::ONE, 5, Rgb::CORAL);
        b.spawn_burst(Vec2::ONE, 5, Rgb::CORAL);
        assert_eq!(a.particles(), b.particles());
    }
}
