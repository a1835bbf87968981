use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The generator owned by the running program. Any `rand::Rng`
/// works with the scene; this one is seedable for reproducible runs.
pub type SceneRng = ChaCha8Rng;

pub fn scene_rng(seed: Option<u64>) -> SceneRng {
    match seed {
        Some(seed) => SceneRng::seed_from_u64(seed),
        None => SceneRng::from_entropy(),
    }
}

/// Uniform in `[0, 1)`.
pub fn unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>()
}

/// Uniform in `[-width / 2, width / 2)`.
pub fn spread<R: Rng + ?Sized>(rng: &mut R, width: f32) -> f32 {
    (unit(rng) - 0.5) * width
}
