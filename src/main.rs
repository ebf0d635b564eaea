use batch_beans::cyclic_loader::CyclicData;
use batch_beans::data_loader::MinibatchSource;
use batch_beans::shuffled_loader::ShuffledData;
use batch_beans::simulate::{generate_regression_data, SimArgs};

use clap::{Args, Parser, Subcommand};
use indicatif::ProgressBar;
use log::info;
use ndarray::Array2;

#[derive(Parser)]
#[command(version, about, long_about=None)]
#[command(propagate_version = true)]
///
/// `batch-beans` utility for streaming minibatches
/// - stream: simulate a toy regression dataset and stream batches
///
struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// stream minibatches over a simulated regression dataset
    Stream(StreamArgs),
}

#[derive(Args)]
pub struct StreamArgs {
    /// number of samples
    #[arg(short = 'n', long, default_value_t = 500)]
    samples: usize,

    /// number of input dimensions
    #[arg(short, long, default_value_t = 5)]
    dims: usize,

    /// rows per minibatch
    #[arg(short, long, default_value_t = 50)]
    batch_size: usize,

    /// number of minibatch draws
    #[arg(short, long, default_value_t = 1000)]
    iterations: usize,

    /// reshuffle every epoch instead of cycling in storage order
    #[arg(long, default_value_t = false)]
    shuffle: bool,

    /// random seed
    #[arg(long, default_value_t = 42)]
    rseed: u64,
}

fn run_stream(args: &StreamArgs) -> anyhow::Result<()> {
    let sim = generate_regression_data(&SimArgs {
        samples: args.samples,
        dims: args.dims,
        weight_scale: 1.,
        noise: 0.1,
        rseed: args.rseed,
    })?;

    let y_n1 = Array2::from_shape_vec((args.samples, 1), sim.y_n)?;

    let mut data: Box<dyn MinibatchSource<Batch = Array2<f32>>> = if args.shuffle {
        Box::new(ShuffledData::new_with_output(sim.x_nd, y_n1, args.batch_size)?.seeded(args.rseed))
    } else {
        Box::new(CyclicData::new_with_output(sim.x_nd, y_n1, args.batch_size)?)
    };

    info!(
        "streaming {} draws of {} rows ({} minibatches per epoch)",
        args.iterations,
        args.batch_size,
        data.num_minibatch()
    );

    let pb = ProgressBar::new(args.iterations as u64);

    let mut y_sum = 0_f32;
    let mut y_rows = 0_usize;

    for _iter in 0..args.iterations {
        let mb = data.next_minibatch();

        // the consumer would feed mb.input / mb.output into its
        // update step here
        if let Some(y) = mb.output {
            y_sum += y.sum();
            y_rows += y.nrows();
        }

        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        "done: {} rows drawn, mean y = {:.4}",
        y_rows,
        y_sum / y_rows.max(1) as f32
    );

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.commands {
        Commands::Stream(args) => run_stream(args),
    }
}
