use batch_beans::cyclic_loader::CyclicData;
use batch_beans::data_loader::MinibatchSource;
use batch_beans::simulate::{generate_regression_data, SimArgs};

use approx::assert_abs_diff_eq;
use ndarray::Array2;

#[test]
fn regression_simulation_shapes() -> anyhow::Result<()> {
    let args = SimArgs {
        samples: 40,
        dims: 3,
        weight_scale: 1.,
        noise: 0.1,
        rseed: 42,
    };

    let sim = generate_regression_data(&args)?;

    assert_eq!(sim.x_nd.dim(), (40, 3));
    assert_eq!(sim.y_n.len(), 40);
    assert_eq!(sim.w_d.len(), 3);

    Ok(())
}

#[test]
fn regression_simulation_is_seed_deterministic() -> anyhow::Result<()> {
    let args = SimArgs {
        samples: 25,
        dims: 4,
        weight_scale: 2.,
        noise: 0.5,
        rseed: 13,
    };

    let a = generate_regression_data(&args)?;
    let b = generate_regression_data(&args)?;

    assert_eq!(a.x_nd, b.x_nd);
    assert_eq!(a.y_n, b.y_n);
    assert_eq!(a.w_d, b.w_d);
    assert_eq!(a.bias, b.bias);

    Ok(())
}

#[test]
fn noiseless_outputs_match_the_linear_model() -> anyhow::Result<()> {
    let args = SimArgs {
        samples: 30,
        dims: 2,
        weight_scale: 1.,
        noise: 0.,
        rseed: 99,
    };

    let sim = generate_regression_data(&args)?;

    for (i, &y) in sim.y_n.iter().enumerate() {
        let xw: f32 = (0..2).map(|j| sim.x_nd[[i, j]] * sim.w_d[j]).sum();
        assert_abs_diff_eq!(y, xw + sim.bias, epsilon = 1e-5);
    }

    Ok(())
}

#[test]
fn degenerate_simulation_arguments_fail() {
    let args = SimArgs {
        samples: 0,
        dims: 3,
        weight_scale: 1.,
        noise: 0.1,
        rseed: 42,
    };
    assert!(generate_regression_data(&args).is_err());
}

#[test]
fn simulated_data_streams_through_a_cyclic_loader() -> anyhow::Result<()> {
    let args = SimArgs {
        samples: 20,
        dims: 3,
        weight_scale: 1.,
        noise: 0.1,
        rseed: 42,
    };

    let sim = generate_regression_data(&args)?;
    let y_n1 = Array2::from_shape_vec((20, 1), sim.y_n.clone())?;

    let mut data = CyclicData::new_with_output(sim.x_nd.clone(), y_n1, 6)?;

    for iter in 0..10 {
        let mb = data.next_minibatch();
        assert_eq!(mb.input.dim(), (6, 3));

        let y = mb.output.ok_or(anyhow::anyhow!("missing output"))?;
        assert_eq!(y.dim(), (6, 1));

        // row k of this draw came from sample (6 * iter + k) mod 20
        for k in 0..6 {
            let i = (6 * iter + k) % 20;
            assert_abs_diff_eq!(y[[k, 0]], sim.y_n[i], epsilon = 1e-6);
            assert_abs_diff_eq!(mb.input[[k, 0]], sim.x_nd[[i, 0]], epsilon = 1e-6);
        }
    }

    Ok(())
}
