//! The animation itself: three flat collections advanced and drawn once
//! per frame.
//!
//! Entities never reach back into the scene. Rockets and balloons report
//! from `update` whether they are done, and the scene removes them with
//! `retain_mut` while it walks the collection. Fireworks launched by
//! rockets are buffered and appended after the rocket pass, so no
//! collection changes shape under an iterator.

pub mod balloon;
pub mod firework;
pub mod particle;
pub mod rocket;
pub mod spawner;

use rand::Rng;
use serde::Deserialize;

use crate::graphics::Surface;
use crate::math::{rng, F2};

pub use balloon::Balloon;
pub use firework::Firework;
pub use rocket::Rocket;
pub use spawner::Spawner;

/// What happens to particles that have faded out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticlePolicy {
    /// Faded particles stay in their firework forever, so an exploded
    /// firework is never finished and never leaves the scene.
    Retain,
    /// Faded particles are dropped after each update, and a firework
    /// whose burst is gone leaves the scene.
    #[default]
    Prune,
}

pub struct Scene {
    width: f32,
    height: f32,
    policy: ParticlePolicy,

    fireworks: Vec<Firework>,
    rockets: Vec<Rocket>,
    balloons: Vec<Balloon>,

    // Fireworks launched by rockets during the current tick.
    launched: Vec<Firework>,
}

impl Scene {
    pub fn new(width: f32, height: f32, policy: ParticlePolicy) -> Self {
        Self {
            width,
            height,
            policy,

            fireworks: Vec::new(),
            rockets: Vec::new(),
            balloons: Vec::new(),

            launched: Vec::new(),
        }
    }

    pub fn viewport(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn policy(&self) -> ParticlePolicy {
        self.policy
    }

    /// Advance and draw everything by one frame.
    pub fn tick<S, R>(&mut self, surface: &mut S, rng: &mut R)
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        surface.clear();

        let prune = self.policy == ParticlePolicy::Prune;

        for firework in self.fireworks.iter_mut() {
            firework.update(rng);
            if prune {
                firework.prune_dead_particles();
            }
            firework.draw(surface, rng);
        }

        let ceiling = self.height / 2.0;
        let launched = &mut self.launched;

        self.rockets.retain_mut(|rocket| {
            let crossed = rocket.update(ceiling);

            if crossed {
                launched.push(Firework::new(rocket.pos(), rng));
            }

            rocket.draw(surface);
            !crossed
        });

        if !self.launched.is_empty() {
            log::trace!("{} rocket(s) burst into fireworks", self.launched.len());
            self.fireworks.append(&mut self.launched);
        }

        self.balloons.retain_mut(|balloon| {
            let gone = balloon.update();
            balloon.draw(surface);
            !gone
        });

        self.fireworks.retain(|firework| !firework.is_finished());
    }

    fn spawn_point<R: Rng + ?Sized>(&self, rng: &mut R) -> F2 {
        F2::new(rng::unit(rng) * self.width, self.height)
    }

    pub fn spawn_rocket<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let rocket = Rocket::new(self.spawn_point(rng));
        self.push_rocket(rocket);
    }

    pub fn spawn_firework<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let firework = Firework::new(self.spawn_point(rng), rng);
        self.push_firework(firework);
    }

    pub fn spawn_balloon<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let balloon = Balloon::new(self.spawn_point(rng), rng);
        self.push_balloon(balloon);
    }

    pub fn push_rocket(&mut self, rocket: Rocket) {
        self.rockets.push(rocket);
    }

    pub fn push_firework(&mut self, firework: Firework) {
        self.fireworks.push(firework);
    }

    pub fn push_balloon(&mut self, balloon: Balloon) {
        self.balloons.push(balloon);
    }

    pub fn clear(&mut self) {
        self.fireworks.clear();
        self.rockets.clear();
        self.balloons.clear();
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    pub fn rockets(&self) -> &[Rocket] {
        &self.rockets
    }

    pub fn balloons(&self) -> &[Balloon] {
        &self.balloons
    }

    pub fn particle_count(&self) -> usize {
        self.fireworks.iter().map(|f| f.particles().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::firework::{BURST_PARTICLES, FUSE_TICKS};
    use super::particle::PARTICLE_LIFETIME;
    use super::*;
    use crate::graphics::{Canvas, Color, NullSurface};
    use crate::math::rng::{scene_rng, SceneRng};

    fn scene(policy: ParticlePolicy) -> (Scene, SceneRng) {
        (Scene::new(800.0, 600.0, policy), scene_rng(Some(42)))
    }

    fn run(scene: &mut Scene, rng: &mut SceneRng, ticks: u32) {
        for _ in 0..ticks {
            scene.tick(&mut NullSurface, rng);
        }
    }

    #[derive(Default)]
    struct Calls {
        clears: usize,
        circles: usize,
        triangles: Vec<F2>,
        rects: usize,
        order: Vec<&'static str>,
    }

    impl Surface for Calls {
        fn clear(&mut self) {
            self.clears += 1;
            self.order.push("clear");
        }
        fn fill_circle(&mut self, _: F2, _: f32, _: Color) {
            self.circles += 1;
            self.order.push("circle");
        }
        fn fill_triangle(&mut self, a: F2, _: F2, _: F2, _: Color) {
            self.triangles.push(a);
            self.order.push("triangle");
        }
        fn fill_rect(&mut self, _: F2, _: f32, _: f32, _: Color) {
            self.rects += 1;
            self.order.push("rect");
        }
    }

    #[test]
    fn rocket_becomes_firework_on_tick_51() {
        let (mut scene, mut rng) = scene(ParticlePolicy::Prune);
        scene.push_rocket(Rocket::new(F2::new(100.0, 600.0)));

        run(&mut scene, &mut rng, 50);
        assert_eq!(scene.rockets().len(), 1);
        assert_eq!(scene.rockets()[0].pos(), F2::new(100.0, 300.0));
        assert!(scene.fireworks().is_empty());

        run(&mut scene, &mut rng, 1);
        assert!(scene.rockets().is_empty());
        assert_eq!(scene.fireworks().len(), 1);
        assert_eq!(scene.fireworks()[0].pos(), F2::new(100.0, 294.0));
        assert!(!scene.fireworks()[0].is_exploded());
    }

    #[test]
    fn each_rocket_launches_exactly_one_firework() {
        let (mut scene, mut rng) = scene(ParticlePolicy::Retain);

        for i in 0..5 {
            scene.push_rocket(Rocket::new(F2::new(100.0 * i as f32, 600.0 + 6.0 * i as f32)));
        }

        run(&mut scene, &mut rng, 60);
        assert!(scene.rockets().is_empty());
        assert_eq!(scene.fireworks().len(), 5);

        run(&mut scene, &mut rng, 200);
        assert_eq!(scene.fireworks().len(), 5);
    }

    #[test]
    fn simultaneous_removals_skip_nobody() {
        let (mut scene, mut rng) = scene(ParticlePolicy::Prune);

        // Three rockets crossing on the same tick, one that is not.
        for x in [10.0, 20.0, 30.0] {
            scene.push_rocket(Rocket::new(F2::new(x, 301.0)));
        }
        scene.push_rocket(Rocket::new(F2::new(40.0, 600.0)));

        let mut calls = Calls::default();
        scene.tick(&mut calls, &mut rng);

        assert_eq!(calls.triangles.len(), 4);
        assert_eq!(scene.rockets().len(), 1);
        assert_eq!(scene.fireworks().len(), 3);

        let xs: Vec<f32> = scene.fireworks().iter().map(|f| f.pos().x).collect();
        assert_eq!(xs, [10.0, 20.0, 30.0]);
    }

    #[test]
    fn launched_firework_first_moves_next_tick() {
        let (mut scene, mut rng) = scene(ParticlePolicy::Prune);
        scene.push_rocket(Rocket::new(F2::new(0.0, 301.0)));

        scene.tick(&mut NullSurface, &mut rng);
        let fw = &scene.fireworks()[0];
        assert_eq!(fw.pos(), F2::new(0.0, 295.0));
        assert_eq!(fw.size(), 8.0);
    }

    #[test]
    fn balloon_leaves_on_tick_301() {
        let (mut scene, mut rng) = scene(ParticlePolicy::Prune);
        scene.push_balloon(Balloon::with_velocity(F2::new(50.0, 600.0), F2::new(0.0, -2.0)));

        run(&mut scene, &mut rng, 300);
        assert_eq!(scene.balloons().len(), 1);
        assert_eq!(scene.balloons()[0].pos().y, 0.0);

        run(&mut scene, &mut rng, 1);
        assert!(scene.balloons().is_empty());
    }

    #[test]
    fn balloon_removed_only_when_negative() {
        let (mut scene, mut rng) = scene(ParticlePolicy::Prune);

        for _ in 0..20 {
            scene.spawn_balloon(&mut rng);
        }

        for _ in 0..700 {
            scene.tick(&mut NullSurface, &mut rng);
            assert!(scene.balloons().iter().all(|b| b.pos().y >= 0.0));
        }

        assert!(scene.balloons().is_empty());
    }

    #[test]
    fn retain_policy_keeps_exploded_fireworks() {
        let (mut scene, mut rng) = scene(ParticlePolicy::Retain);
        scene.push_firework(Firework::with_velocity(F2::new(400.0, 600.0), F2::zero()));

        run(&mut scene, &mut rng, FUSE_TICKS);
        assert_eq!(scene.particle_count(), BURST_PARTICLES);

        run(&mut scene, &mut rng, 1000);
        assert_eq!(scene.fireworks().len(), 1);
        assert_eq!(scene.particle_count(), BURST_PARTICLES);
    }

    #[test]
    fn prune_policy_removes_faded_fireworks() {
        let (mut scene, mut rng) = scene(ParticlePolicy::Prune);
        scene.push_firework(Firework::with_velocity(F2::new(400.0, 600.0), F2::zero()));

        run(&mut scene, &mut rng, FUSE_TICKS);
        assert_eq!(scene.particle_count(), BURST_PARTICLES);

        run(&mut scene, &mut rng, PARTICLE_LIFETIME - 1);
        assert_eq!(scene.fireworks().len(), 1);
        assert_eq!(scene.particle_count(), BURST_PARTICLES);

        run(&mut scene, &mut rng, 1);
        assert!(scene.fireworks().is_empty());
    }

    #[test]
    fn tick_clears_then_draws_each_entity() {
        let (mut scene, mut rng) = scene(ParticlePolicy::Prune);
        scene.push_firework(Firework::with_velocity(F2::new(1.0, 500.0), F2::zero()));
        scene.push_rocket(Rocket::new(F2::new(2.0, 550.0)));
        scene.push_balloon(Balloon::with_velocity(F2::new(3.0, 500.0), F2::new(0.0, -1.0)));

        let mut calls = Calls::default();
        scene.tick(&mut calls, &mut rng);

        assert_eq!(calls.order, ["clear", "circle", "triangle", "circle", "rect"]);
    }

    #[test]
    fn removed_entities_are_drawn_on_their_last_tick() {
        let (mut scene, mut rng) = scene(ParticlePolicy::Prune);
        scene.push_rocket(Rocket::new(F2::new(2.0, 301.0)));
        scene.push_balloon(Balloon::with_velocity(F2::new(3.0, 1.0), F2::new(0.0, -2.0)));

        let mut calls = Calls::default();
        scene.tick(&mut calls, &mut rng);

        assert!(scene.rockets().is_empty());
        assert!(scene.balloons().is_empty());
        assert_eq!(calls.triangles, [F2::new(2.0, 295.0)]);
        assert_eq!(calls.rects, 1);
    }

    #[test]
    fn spawns_along_bottom_edge() {
        let (mut scene, mut rng) = scene(ParticlePolicy::Prune);

        for _ in 0..50 {
            scene.spawn_rocket(&mut rng);
            scene.spawn_firework(&mut rng);
            scene.spawn_balloon(&mut rng);
        }

        let points = scene
            .rockets()
            .iter()
            .map(Rocket::pos)
            .chain(scene.fireworks().iter().map(Firework::pos))
            .chain(scene.balloons().iter().map(Balloon::pos));

        let (w, h) = scene.viewport();

        for p in points {
            assert!((0.0..w).contains(&p.x));
            assert_eq!(p.y, h);
        }
    }

    #[test]
    fn long_run_on_canvas_stays_bounded() {
        let (mut scene, mut rng) = scene(ParticlePolicy::Prune);
        let mut canvas = Canvas::new(800, 600);

        for frame in 0..2000u32 {
            if frame % 30 == 0 {
                scene.spawn_rocket(&mut rng);
                scene.spawn_firework(&mut rng);
            }
            if frame % 42 == 0 {
                scene.spawn_balloon(&mut rng);
            }
            scene.tick(&mut canvas, &mut rng);
        }

        // Every firework lives at most fuse + fade ticks.
        assert!(scene.fireworks().len() <= 2 * (130 / 30 + 2));
    }

    #[test]
    fn clear_empties_everything() {
        let (mut scene, mut rng) = scene(ParticlePolicy::Retain);
        scene.spawn_rocket(&mut rng);
        scene.spawn_firework(&mut rng);
        scene.spawn_balloon(&mut rng);

        scene.clear();
        assert!(scene.rockets().is_empty());
        assert!(scene.fireworks().is_empty());
        assert!(scene.balloons().is_empty());
    }
}
