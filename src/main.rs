use anyhow::Result;
use clap::{Parser, Subcommand};
use risk_sim::narration::TradeNarrator;
use risk_sim::prompt::Prompter;
use risk_sim::report::{render_summary, SUMMARY_WIDTH};
use risk_sim::run_log::{RunLog, RunRecord, DEFAULT_LOG_FILE};
use risk_sim::sweep::{self, SweepConfig};
use risk_sim::trajectory::{self, sparkline};
use risk_sim::{run_simulation, run_simulation_with_observer, RngSource, SimulationConfig, SimulationResult};
use std::io;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "risk-sim")]
#[command(about = "Simulate win rate / risk-reward / risk-per-trade strategies over a sequence of trades")]
struct Args {
    /// Interactive session when omitted
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// File that finished runs are appended to
    #[arg(long, global = true, env = "RISK_SIM_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Don't append runs to the log file
    #[arg(long, global = true)]
    no_log: bool,
}

#[derive(clap::Args, Debug)]
struct StrategyArgs {
    /// Number of trades to simulate
    #[arg(short = 'n', long, env = "RISK_SIM_TRADES", default_value = "100")]
    trades: usize,

    /// Starting capital in dollars
    #[arg(short, long, env = "RISK_SIM_CAPITAL", default_value = "10000")]
    capital: f64,

    /// Win rate in percent (0-100)
    #[arg(short, long, env = "RISK_SIM_WIN_RATE", default_value = "40")]
    win_rate: f64,

    /// Reward multiple of the risked amount on a win
    #[arg(short, long, env = "RISK_SIM_RISK_REWARD", default_value = "2.0")]
    risk_reward: f64,

    /// Percent of current capital risked per trade (0-100)
    #[arg(short = 'p', long, env = "RISK_SIM_RISK_PER_TRADE", default_value = "1.0")]
    risk_per_trade: f64,
}

impl StrategyArgs {
    fn to_config(&self) -> SimulationConfig {
        SimulationConfig {
            trade_count: self.trades,
            initial_capital: self.capital,
            win_rate_pct: self.win_rate,
            risk_reward_ratio: self.risk_reward,
            risk_per_trade_pct: self.risk_per_trade,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single simulation from command-line parameters
    Run {
        #[command(flatten)]
        strategy: StrategyArgs,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Print every trade as it happens
        #[arg(long)]
        show_trades: bool,

        /// Write the capital trajectory to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print the result as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },

    /// Run many independent simulations in parallel and summarise them
    Sweep {
        #[command(flatten)]
        strategy: StrategyArgs,

        /// Number of simulations
        #[arg(long, default_value = "10000")]
        runs: usize,

        /// Base seed; run i uses seed + i
        #[arg(long)]
        seed: Option<u64>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let log_file = if args.no_log { None } else { Some(args.log_file) };

    match args.command {
        None => run_interactive(log_file)?,
        Some(Commands::Run { strategy, seed, show_trades, csv, json }) => {
            run_once(strategy.to_config(), seed, show_trades, csv, json, log_file)?;
        }
        Some(Commands::Sweep { strategy, runs, seed, json }) => {
            run_sweep(strategy.to_config(), runs, seed, json)?;
        }
    }

    Ok(())
}

fn simulate(config: &SimulationConfig, seed: Option<u64>, show_trades: bool) -> SimulationResult {
    let mut source = match seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };

    if show_trades {
        let mut narrator = TradeNarrator::new(io::stdout());
        run_simulation_with_observer(config, &mut source, &mut narrator)
    } else {
        run_simulation(config, &mut source)
    }
}

fn present(config: &SimulationConfig, result: &SimulationResult, log_file: Option<&PathBuf>) -> Result<()> {
    print!("{}", render_summary(result, SUMMARY_WIDTH));
    println!("Capital: {}", sparkline(&result.capital_trajectory, SUMMARY_WIDTH));
    println!();

    if let Some(path) = log_file {
        RunLog::append_to(path)?.write(&RunRecord::new(config, result))?;
    }
    Ok(())
}

fn run_interactive(log_file: Option<PathBuf>) -> Result<()> {
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());

    prompter.say("")?;
    prompter.say("$-----------------------------------------$")?;
    prompter.say("|    WELCOME TO THE RISK SIMULATOR        |")?;
    prompter.say("$-----------------------------------------$")?;
    prompter.say("")?;

    loop {
        let config = prompter.collect_config()?;
        let show_trades = prompter.ask_yes_no("\nDo you want to display EVERY trade?")?;

        let result = simulate(&config, None, show_trades);
        present(&config, &result, log_file.as_ref())?;

        if !prompter.ask_yes_no("Do you want to run another simulation?")? {
            prompter.say("\nThank you for using the risk simulator!")?;
            break;
        }
    }

    Ok(())
}

fn run_once(
    config: SimulationConfig,
    seed: Option<u64>,
    show_trades: bool,
    csv: Option<PathBuf>,
    json: bool,
    log_file: Option<PathBuf>,
) -> Result<()> {
    config.validate()?;
    info!(
        "Config: {} trades, ${:.2} capital, {}% win rate, {} R:R, {}% risk",
        config.trade_count,
        config.initial_capital,
        config.win_rate_pct,
        config.risk_reward_ratio,
        config.risk_per_trade_pct
    );

    let result = simulate(&config, seed, show_trades && !json);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        if let Some(path) = &log_file {
            RunLog::append_to(path)?.write(&RunRecord::new(&config, &result))?;
        }
    } else {
        present(&config, &result, log_file.as_ref())?;
    }

    if let Some(path) = csv {
        trajectory::export_csv(&result, &path)?;
    }

    Ok(())
}

fn run_sweep(config: SimulationConfig, runs: usize, seed: Option<u64>, json: bool) -> Result<()> {
    config.validate()?;
    if runs == 0 {
        anyhow::bail!("Sweep needs at least one run");
    }

    let summary = sweep::run_sweep(&config, &SweepConfig { runs, base_seed: seed });

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        sweep::print_summary(&config, &summary);
    }

    Ok(())
}
