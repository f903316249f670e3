//! Frame-stepped fireworks simulation
//!
//! Owns every live rocket and particle plus the shared RNG. The host calls
//! [`SimulationEngine::advance`] once per animation frame with the elapsed
//! time since start; rendering reads the collections afterwards.

use std::time::Duration;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::observer::{ListenerId, Listeners};
use super::particle::Particle;
use super::rocket::Rocket;
use super::spawner::{LaunchRequest, Spawner};
use super::trail::Trailed;
use crate::consts::*;
use crate::error::Result;
use crate::settings::Settings;
use crate::wrap_hue;

/// Snapshot of population counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    pub frame: u64,
    pub elapsed_ms: u64,
    pub rockets: usize,
    pub particles: usize,
    pub rockets_launched: u64,
    pub explosions: u64,
    pub global_hue: f32,
    pub manual_pending: bool,
}

#[derive(Debug)]
pub struct SimulationEngine {
    rng: Pcg32,
    rockets: Vec<Rocket>,
    particles: Vec<Particle>,
    spawner: Spawner,
    global_hue: f32,
    viewport: Vec2,
    last_elapsed: Duration,
    last_delta: Duration,
    frame: u64,
    rockets_launched: u64,
    explosions_total: u64,
    listeners: Listeners,
    /// Burst points collected during the rocket sweep, reused across frames
    explosions: Vec<(Vec2, f32)>,
    explosion_particle_count: usize,
    particle_size: f32,
    max_particles: usize,
}

impl SimulationEngine {
    pub fn new(settings: &Settings) -> Result<Self> {
        let settings = settings.clone().validate()?;
        let mut rng = Pcg32::seed_from_u64(settings.seed);
        let global_hue = rng.random_range(0.0..360.0);

        log::info!(
            "Simulation: seed={}, auto={}ms, manual={}ms, burst={}, cap={}",
            settings.seed,
            settings.auto_launch_interval_ms,
            settings.manual_spawn_timeout_ms,
            settings.explosion_particle_count,
            settings.max_particles
        );

        Ok(Self {
            rng,
            rockets: Vec::new(),
            particles: Vec::new(),
            spawner: Spawner::new(
                settings.auto_launch_interval(),
                settings.manual_spawn_timeout(),
            ),
            global_hue,
            viewport: Vec2::ZERO,
            last_elapsed: Duration::ZERO,
            last_delta: Duration::ZERO,
            frame: 0,
            rockets_launched: 0,
            explosions_total: 0,
            listeners: Listeners::new(),
            explosions: Vec::new(),
            explosion_particle_count: settings.explosion_particle_count,
            particle_size: settings.particle_size,
            max_particles: settings.max_particles,
        })
    }

    /// Set the drawable area; zero (or invalid) dimensions suspend the simulation
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        let sanitize = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let viewport = Vec2::new(sanitize(width), sanitize(height));
        if viewport != self.viewport {
            log::debug!("Viewport {}x{}", viewport.x, viewport.y);
        }
        self.viewport = viewport;
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    pub fn has_viewport(&self) -> bool {
        self.viewport.x > 0.0 && self.viewport.y > 0.0
    }

    /// Advance one frame
    ///
    /// `elapsed` is time since the show started. Without a viewport this is
    /// a no-op and no listener is notified.
    pub fn advance(&mut self, elapsed: Duration) {
        self.last_delta = elapsed.saturating_sub(self.last_elapsed);
        self.last_elapsed = self.last_elapsed.max(elapsed);

        if !self.has_viewport() {
            return;
        }
        let now = self.last_elapsed;
        self.frame += 1;

        self.global_hue =
            wrap_hue(self.global_hue + self.rng.random_range(HUE_STEP_MIN..HUE_STEP_MAX));

        if self.spawner.poll_auto(now) {
            let hue = self.global_hue;
            let (start, target) = self.auto_launch_points();
            self.launch(start, target, hue);
        }
        if let Some(target) = self.spawner.take_due_manual(now) {
            let hue = self.global_hue;
            let start = self.manual_launch_point();
            self.launch(start, target, hue);
        }

        for rocket in &mut self.rockets {
            rocket.update();
        }
        for particle in &mut self.particles {
            particle.update();
        }

        // Collect burst points first, then drop the arrived rockets
        let mut explosions = std::mem::take(&mut self.explosions);
        explosions.clear();
        explosions.extend(
            self.rockets
                .iter()
                .filter(|r| r.has_arrived())
                .map(|r| (r.position(), r.explosion_hue())),
        );
        self.rockets.retain(|r| !r.has_arrived());
        for &(origin, hue) in &explosions {
            self.explode(origin, hue);
        }
        self.explosions = explosions;

        self.particles.retain(Particle::is_alive);

        self.listeners.notify();
    }

    /// Ask for a rocket aimed at `target`
    ///
    /// Unforced requests share one debounced pending slot. Forced requests
    /// launch immediately and leave the debounce timer untouched.
    pub fn request_rocket(&mut self, target: Vec2, force: bool) -> LaunchRequest {
        if !self.spawner.manual_enabled() {
            log::debug!("Manual launch dropped: manual spawns disabled");
            return LaunchRequest::Dropped;
        }
        if !target.is_finite() {
            log::debug!("Manual launch dropped: non-finite target {target}");
            return LaunchRequest::Dropped;
        }
        if !force {
            return self.spawner.request(target);
        }
        if !self.has_viewport() {
            log::debug!("Forced launch dropped: no viewport");
            return LaunchRequest::Dropped;
        }
        let hue = self.global_hue;
        let start = self.manual_launch_point();
        self.launch(start, target, hue);
        LaunchRequest::Launched
    }

    /// Drop every live object and the pending request; timers are kept
    pub fn clear(&mut self) {
        self.rockets.clear();
        self.particles.clear();
        self.spawner.clear_pending();
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn global_hue(&self) -> f32 {
        self.global_hue
    }

    /// Frames actually simulated (deferred calls excluded)
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Time between the two most recent `advance` calls
    pub fn last_delta(&self) -> Duration {
        self.last_delta
    }

    pub fn pending_request(&self) -> Option<Vec2> {
        self.spawner.pending()
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            frame: self.frame,
            elapsed_ms: self.last_elapsed.as_millis() as u64,
            rockets: self.rockets.len(),
            particles: self.particles.len(),
            rockets_launched: self.rockets_launched,
            explosions: self.explosions_total,
            global_hue: self.global_hue,
            manual_pending: self.spawner.pending().is_some(),
        }
    }

    pub fn add_listener(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Notify listeners outside the frame cycle (e.g. a resource became ready)
    pub fn notify_listeners(&mut self) {
        self.listeners.notify();
    }

    fn launch(&mut self, start: Vec2, target: Vec2, hue: f32) {
        let rocket = Rocket::new(&mut self.rng, start, target, self.particle_size, hue);
        self.rockets.push(rocket);
        self.rockets_launched += 1;
    }

    fn explode(&mut self, origin: Vec2, hue: f32) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        let count = self.explosion_particle_count.min(room);
        if count < self.explosion_particle_count {
            log::warn!(
                "Particle cap {} reached: explosion truncated to {count}",
                self.max_particles
            );
        }
        log::debug!(
            "Explosion at ({:.0}, {:.0}) hue={hue:.1} particles={count}",
            origin.x,
            origin.y
        );

        let rng = &mut self.rng;
        let size = self.particle_size;
        self.particles
            .extend((0..count).map(|_| Particle::new(&mut *rng, origin, size, hue)));
        self.explosions_total += 1;
    }

    /// Random start along the bottom edge, random target in the upper region
    fn auto_launch_points(&mut self) -> (Vec2, Vec2) {
        let (width, height) = (self.viewport.x, self.viewport.y);
        let start = Vec2::new(self.rng.random_range(0.0..width), height);
        let target = Vec2::new(
            self.rng.random_range(0.0..width),
            self.rng
                .random_range(0.0..height * AUTO_TARGET_HEIGHT_FRACTION),
        );
        (start, target)
    }

    fn manual_launch_point(&self) -> Vec2 {
        Vec2::new(self.viewport.x / 2.0, self.viewport.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn quiet_settings() -> Settings {
        Settings {
            auto_launch_interval_ms: 0,
            seed: 42,
            ..Default::default()
        }
    }

    fn engine_with_viewport(settings: &Settings) -> SimulationEngine {
        let mut engine = SimulationEngine::new(settings).unwrap();
        engine.set_viewport_size(800.0, 600.0);
        engine
    }

    #[test]
    fn test_zero_viewport_is_noop() {
        let mut engine = SimulationEngine::new(&Settings::default()).unwrap();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        engine.add_listener(move || counter.set(counter.get() + 1));
        engine.request_rocket(Vec2::new(10.0, 10.0), false);

        for i in 0..300 {
            engine.advance(FRAME * i);
        }
        assert!(engine.rockets().is_empty());
        assert!(engine.particles().is_empty());
        assert_eq!(engine.frame(), 0);
        assert_eq!(calls.get(), 0);
        assert_eq!(
            engine.request_rocket(Vec2::ONE, true),
            LaunchRequest::Dropped
        );
    }

    #[test]
    fn test_auto_launch_after_interval() {
        let mut engine = engine_with_viewport(&Settings::default());
        engine.advance(Duration::from_millis(500));
        assert!(engine.rockets().is_empty());
        engine.advance(Duration::from_millis(1000));
        assert_eq!(engine.rockets().len(), 1);

        let rocket = &engine.rockets()[0];
        assert_eq!(rocket.start().y, 600.0);
        assert!(rocket.target().y < 600.0 * AUTO_TARGET_HEIGHT_FRACTION);
        assert!((0.0..800.0).contains(&rocket.start().x));
    }

    #[test]
    fn test_explosion_fan_out() {
        let mut engine = engine_with_viewport(&quiet_settings());
        engine.rockets.push(Rocket::from_parts(
            Vec2::ZERO,
            Vec2::new(0.0, 100.0),
            3.5,
            90.0,
            8.0,
            0.6,
        ));

        let mut elapsed = Duration::ZERO;
        while !engine.rockets().is_empty() {
            assert!(engine.particles().is_empty());
            elapsed += FRAME;
            engine.advance(elapsed);
            assert!(engine.frame() < 100, "rocket never exploded");
        }
        assert_eq!(engine.particles().len(), 160);
        assert_eq!(engine.stats().explosions, 1);
    }

    #[test]
    fn test_explosion_seeded_from_rocket_final_state() {
        let mut engine = engine_with_viewport(&quiet_settings());
        let rocket = Rocket::from_parts(
            Vec2::new(400.0, 600.0),
            Vec2::new(250.0, 180.0),
            3.5,
            355.0,
            7.0,
            0.6,
        );
        let mut flight = rocket.clone();
        while !flight.has_arrived() {
            flight.update();
        }
        engine.rockets.push(rocket);

        let mut elapsed = Duration::ZERO;
        while !engine.rockets().is_empty() {
            elapsed += FRAME;
            engine.advance(elapsed);
        }

        let burst = flight.position();
        let parent_hue = flight.explosion_hue();
        assert_eq!(engine.particles().len(), 160);
        for particle in engine.particles() {
            assert_eq!(particle.position(), burst);
            assert!(particle.trail().is_empty());
            let drift = (particle.hue() - parent_hue).rem_euclid(360.0);
            assert!(
                drift.min(360.0 - drift) <= PARTICLE_HUE_SPREAD + 1e-3,
                "hue {} too far from {parent_hue}",
                particle.hue()
            );
        }

        engine.advance(elapsed + FRAME);
        assert!(engine.particles().iter().all(|p| p.trail().oldest() == Some(burst)));
    }

    #[test]
    fn test_non_finite_targets_are_dropped() {
        let mut engine = engine_with_viewport(&quiet_settings());
        for target in [Vec2::new(f32::NAN, 100.0), Vec2::new(f32::INFINITY, 100.0)] {
            assert_eq!(engine.request_rocket(target, true), LaunchRequest::Dropped);
            assert_eq!(engine.request_rocket(target, false), LaunchRequest::Dropped);
        }
        assert!(engine.rockets().is_empty());
        assert_eq!(engine.pending_request(), None);
    }

    #[test]
    fn test_each_rocket_explodes_once() {
        let mut engine = engine_with_viewport(&quiet_settings());
        for _ in 0..3 {
            let p = Vec2::new(100.0, 100.0);
            engine
                .rockets
                .push(Rocket::from_parts(p, p, 3.5, 0.0, 5.0, 0.5));
        }
        engine.advance(FRAME);
        assert!(engine.rockets().is_empty());
        assert_eq!(engine.particles().len(), 3 * 160);

        engine.advance(FRAME * 2);
        assert_eq!(engine.particles().len(), 3 * 160);
        assert_eq!(engine.stats().explosions, 3);
    }

    #[test]
    fn test_particle_removed_on_death_frame() {
        let mut engine = engine_with_viewport(&quiet_settings());
        engine.particles.push(Particle::from_parts(
            Vec2::new(400.0, 300.0),
            3.5,
            1.0,
            2.0,
            0.0,
            0.5,
            0.02,
        ));

        for i in 1..50 {
            engine.advance(FRAME * i);
            assert_eq!(engine.particles().len(), 1, "removed early at frame {i}");
        }
        engine.advance(FRAME * 50);
        assert!(engine.particles().is_empty());
    }

    #[test]
    fn test_manual_requests_are_debounced() {
        let mut engine = engine_with_viewport(&quiet_settings());
        assert_eq!(
            engine.request_rocket(Vec2::new(100.0, 100.0), false),
            LaunchRequest::Queued
        );
        assert_eq!(
            engine.request_rocket(Vec2::new(300.0, 200.0), false),
            LaunchRequest::Replaced
        );

        for i in 1..=24 {
            engine.advance(FRAME * i);
        }
        assert_eq!(engine.stats().rockets_launched, 0);

        engine.advance(Duration::from_millis(420));
        assert_eq!(engine.stats().rockets_launched, 1);
        assert_eq!(engine.rockets()[0].target(), Vec2::new(300.0, 200.0));
        assert_eq!(engine.rockets()[0].start(), Vec2::new(400.0, 600.0));

        for i in 26..120 {
            engine.advance(FRAME * i);
        }
        assert_eq!(engine.stats().rockets_launched, 1);
    }

    #[test]
    fn test_forced_requests_launch_immediately() {
        let mut engine = engine_with_viewport(&quiet_settings());
        engine.advance(FRAME);
        assert_eq!(
            engine.request_rocket(Vec2::new(100.0, 100.0), true),
            LaunchRequest::Launched
        );
        assert_eq!(
            engine.request_rocket(Vec2::new(200.0, 100.0), true),
            LaunchRequest::Launched
        );
        assert_eq!(engine.rockets().len(), 2);
        assert_eq!(engine.pending_request(), None);
        assert_eq!(engine.spawner.last_manual_spawn(), Duration::ZERO);
    }

    #[test]
    fn test_manual_disabled_drops_everything() {
        let settings = Settings {
            manual_spawn_timeout_ms: 0,
            ..quiet_settings()
        };
        let mut engine = engine_with_viewport(&settings);
        assert_eq!(
            engine.request_rocket(Vec2::ONE, false),
            LaunchRequest::Dropped
        );
        assert_eq!(
            engine.request_rocket(Vec2::ONE, true),
            LaunchRequest::Dropped
        );
        engine.advance(Duration::from_secs(5));
        assert!(engine.rockets().is_empty());
    }

    #[test]
    fn test_single_notification_per_advance() {
        let mut engine = engine_with_viewport(&Settings::default());
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let id = engine.add_listener(move || counter.set(counter.get() + 1));

        for i in 1..=10 {
            engine.advance(FRAME * i);
        }
        assert_eq!(calls.get(), 10);

        assert!(engine.remove_listener(id));
        engine.advance(FRAME * 11);
        assert_eq!(calls.get(), 10);
        assert_eq!(engine.listener_count(), 0);
    }

    #[test]
    fn test_particle_cap_truncates_explosions() {
        let settings = Settings {
            max_particles: 200,
            ..quiet_settings()
        };
        let mut engine = engine_with_viewport(&settings);
        for _ in 0..2 {
            let p = Vec2::new(50.0, 50.0);
            engine
                .rockets
                .push(Rocket::from_parts(p, p, 3.5, 0.0, 5.0, 0.5));
        }
        engine.advance(FRAME);
        assert_eq!(engine.particles().len(), 200);
    }

    #[test]
    fn test_hue_stays_wrapped() {
        let mut engine = engine_with_viewport(&Settings::default());
        for i in 1..=2000 {
            engine.advance(FRAME * i);
            assert!((0.0..360.0).contains(&engine.global_hue()));
        }
    }

    #[test]
    fn test_backwards_elapsed_gives_zero_delta() {
        let mut engine = engine_with_viewport(&quiet_settings());
        engine.advance(Duration::from_millis(100));
        engine.advance(Duration::from_millis(50));
        assert_eq!(engine.last_delta(), Duration::ZERO);
        engine.advance(Duration::from_millis(116));
        assert_eq!(engine.last_delta(), Duration::from_millis(16));
    }

    #[test]
    fn test_determinism() {
        let settings = Settings {
            seed: 1234,
            ..Default::default()
        };
        let mut a = engine_with_viewport(&settings);
        let mut b = engine_with_viewport(&settings);

        for i in 1..=240 {
            if i % 30 == 0 {
                a.request_rocket(Vec2::new(i as f32, 100.0), i % 60 == 0);
                b.request_rocket(Vec2::new(i as f32, 100.0), i % 60 == 0);
            }
            a.advance(FRAME * i);
            b.advance(FRAME * i);
        }

        assert_eq!(a.stats(), b.stats());
        for (pa, pb) in a.particles().iter().zip(b.particles()) {
            assert_eq!(pa.position(), pb.position());
            assert_eq!(pa.base_color(), pb.base_color());
        }
    }

    #[test]
    fn test_clear_keeps_timers() {
        let mut engine = engine_with_viewport(&Settings::default());
        engine.advance(Duration::from_secs(1));
        engine.request_rocket(Vec2::ONE, false);
        engine.clear();
        assert!(engine.rockets().is_empty());
        assert_eq!(engine.pending_request(), None);
        engine.advance(Duration::from_millis(1500));
        assert!(engine.rockets().is_empty());
    }

    #[test]
    fn test_invalid_settings_fail_at_construction() {
        let settings = Settings {
            max_particles: 0,
            ..Default::default()
        };
        assert!(SimulationEngine::new(&settings).is_err());
    }
}
