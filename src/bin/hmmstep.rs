use clap::Parser;
use coalhmm::{BaumWelchOptions, CountMode, Model};
use log::info;

///
/// Run a single Baum-Welch step of a json model on an observation sequence
///
#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Opts {
    /// model json (`{"pi": ..., "trans": ..., "emit": ...}`)
    #[clap(long)]
    model: std::path::PathBuf,
    /// comma separated symbols, e.g. `0,0,1`
    #[clap(long, value_delimiter = ',')]
    obs: Vec<usize>,
    /// use exact posterior counts instead of the legacy counts
    #[clap(long)]
    standard: bool,
    /// accumulate counts in parallel
    #[clap(long)]
    parallel: bool,
    /// allowed |sum(row) - 1| of the new model
    #[clap(long, default_value = "0.001")]
    tolerance: f64,
    /// write the new model here instead of stdout
    #[clap(long)]
    output: Option<std::path::PathBuf>,
}

fn main() -> coalhmm::Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();
    info!("opts={:?}", opts);
    if opts.parallel {
        info!("n_threads={}", rayon::current_num_threads());
    }

    let model = Model::from_json_file(&opts.model)?;
    info!("k={} Ew={} L={}", model.n_states(), model.n_symbols(), opts.obs.len());

    let bw_opts = BaumWelchOptions {
        mode: if opts.standard {
            CountMode::Standard
        } else {
            CountMode::Legacy
        },
        parallel: opts.parallel,
        tolerance: opts.tolerance,
    };
    let out = model.baum_welch(&opts.obs, &bw_opts)?;
    println!("# logL={}", out.log_likelihood);
    info!("new model\n{}", out.model);

    match opts.output {
        Some(path) => out.model.to_json_file(path)?,
        None => println!("{}", serde_json::to_string(&out.model)?),
    }
    Ok(())
}
