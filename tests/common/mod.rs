use ndarray::Array3;
use ndarray_rand::RandomExt;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand_distr::Uniform;
use rustypool::neural_network::{Size3D, Tensor};

/// Tensor of the given extent filled with uniform values in [-1, 1), reproducible per seed.
pub fn random_tensor(size: Size3D, seed: u64) -> Tensor {
    let mut rng = StdRng::seed_from_u64(seed);
    Array3::random_using(size.shape(), Uniform::new(-1.0f32, 1.0), &mut rng)
}
