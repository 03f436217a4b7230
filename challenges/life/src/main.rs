use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use life::config::Cli;
use life::input::Prompter;
use life::simulation::Simulation;
use life::terminal::{CrosstermTerminal, RawSafeStderr};

fn main() -> ExitCode {
    // Stdout belongs to the renderer, so logs go to stderr. Quiet unless
    // RUST_LOG asks for more.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(RawSafeStderr::default)
        .with_file(true)
        .with_line_number(true)
        .init();

    let args = Cli::parse();
    if let Err(err) = args.check() {
        err.exit();
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("life: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());
    let settings = args
        .resolve(&mut prompter)
        .context("reading simulation settings")?;

    let mut sim = Simulation::new();
    sim.configure(settings).context("allocating grid buffers")?;
    sim.initialize(&mut prompter).context("initializing the grid")?;

    // The terminal is restored when `term` drops, before the summary prints.
    let outcome = {
        let mut term = CrosstermTerminal::enter().context("setting up the terminal")?;
        sim.run(&mut term).context("running the simulation")?
    };
    sim.finish();

    println!(
        "Stopped after {} generations with {} live cells.",
        outcome.generations, outcome.population
    );
    Ok(())
}
