use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use teampref::error::{Result, RosterError};
use teampref::io::{load_roster, write_people_file, Report};
use teampref::options::PoolOptions;
use teampref::pain::PainModel;
use teampref::pool::StrainPool;
use teampref::stop::StopToken;

/// Assign people to teams, minimizing the worst dissatisfaction.
///
/// Runs until interrupted with Ctrl+C, then prints the best assignment found
/// and writes it in the people file format.
#[derive(Parser, Debug)]
#[command(name = "teampref", version)]
struct Args {
    /// Teams file: Team Name, Capacity, Traits
    #[arg(long, default_value = "teams.csv")]
    teams: PathBuf,

    /// People file: Name, Team Name, Team preferences, Friends, Foes, Traits
    #[arg(long, default_value = "people.csv")]
    people: PathBuf,

    /// Number of independently evolving strains
    #[arg(long, default_value_t = 8)]
    strains: usize,

    /// Generations per strain between progress reports
    #[arg(long, default_value_t = 300)]
    generations: usize,

    /// Where to write the best assignment
    #[arg(short, long, default_value = "output.csv")]
    output: PathBuf,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn run(args: Args) -> Result<()> {
    let base = load_roster(&args.teams, &args.people)?;

    let mut options = PoolOptions::new(args.strains, args.generations);
    options.set_seed(args.seed);
    let model = PainModel::default();
    let mut pool = StrainPool::new(&base, model, options)?;

    let stop = StopToken::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || handler_stop.request_stop())
        .map_err(|e| RosterError::Other(format!("Failed to install Ctrl+C handler: {}", e)))?;
    info!(
        strains = pool.options().strain_count(),
        generations = pool.options().generations_per_round(),
        "searching, press Ctrl+C to stop"
    );

    let mut best_seen = pool.best().pain();
    let best = pool.run(&stop, |report| {
        let pains: Vec<String> = report.strain_pains.iter().map(|p| p.to_string()).collect();
        info!(round = report.round, strains = %pains.join("   "), "best pain per strain");
        if report.pain < best_seen {
            best_seen = report.pain;
            info!(
                round = report.round,
                strain = report.best_strain,
                pain = %report.pain,
                "new best assignment"
            );
        }
    })?;

    let pain = best.pain();
    let group = best.into_group();
    println!("{}", Report::new(&group, &model));
    write_people_file(&group, &args.output)?;
    info!(pain = %pain, output = %args.output.display(), "done");
    Ok(())
}

fn main() -> ExitCode {
    enable_tracing();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
