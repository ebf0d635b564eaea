use anyhow::anyhow;
use log::info;
use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

pub struct SimArgs {
    pub samples: usize,
    pub dims: usize,
    pub weight_scale: f32,
    pub noise: f32,
    pub rseed: u64,
}

pub struct SimOut {
    pub x_nd: Array2<f32>,
    pub y_n: Vec<f32>,
    pub w_d: Vec<f32>,
    pub bias: f32,
}

/// Generate a toy linear-regression dataset
/// * `args`: SimArgs
///
/// ```text
/// y(i) = sum_j x(i,j) * w(j) + b + eps(i),  eps ~ N(0, noise^2)
/// ```
///
pub fn generate_regression_data(args: &SimArgs) -> anyhow::Result<SimOut> {
    if args.samples < 1 || args.dims < 1 {
        return Err(anyhow!(
            "check samples = {} and dims = {}",
            args.samples,
            args.dims
        ));
    }

    let mut rng = StdRng::seed_from_u64(args.rseed);

    let w_distr = Normal::new(0_f32, args.weight_scale)?;
    let x_distr = Normal::new(0_f32, 1_f32)?;
    let eps_distr = Normal::new(0_f32, args.noise)?;

    let w_d: Vec<f32> = (0..args.dims).map(|_| w_distr.sample(&mut rng)).collect();
    let bias = w_distr.sample(&mut rng);

    let x_nd = Array2::from_shape_fn((args.samples, args.dims), |_| x_distr.sample(&mut rng));

    let y_n: Vec<f32> = x_nd
        .axis_iter(Axis(0))
        .map(|row| {
            let xw = row.iter().zip(w_d.iter()).map(|(&x, &w)| x * w).sum::<f32>();
            xw + bias + eps_distr.sample(&mut rng)
        })
        .collect();

    info!(
        "simulated regression data: x [{} x {}], y [{}]",
        args.samples, args.dims, args.samples
    );

    Ok(SimOut { x_nd, y_n, w_d, bias })
}
