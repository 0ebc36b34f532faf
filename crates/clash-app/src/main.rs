use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use clash_agents::AgentKind;
use clash_app::config::{Mode, RunConfig};
use clash_app::game_loop::{self, MatchSummary};

/// Tower-defense battle simulation runner
#[derive(Parser, Debug)]
#[command(name = "clash")]
#[command(about = "Run agent vs agent tower-defense matches, headless or in real time")]
struct Args {
    /// TOML config file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Base random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Tick budget per match
    #[arg(long)]
    ticks: Option<u64>,

    /// Matches to play in headless mode
    #[arg(long)]
    iterations: Option<u32>,

    /// Ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Blue agent: random, lane, one_shot or idle
    #[arg(long)]
    blue: Option<AgentKind>,

    /// Red agent: random, lane, one_shot or idle
    #[arg(long)]
    red: Option<AgentKind>,

    /// Print match summaries as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn into_config(self) -> Result<RunConfig, clash_app::config::ConfigError> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(ticks) = self.ticks {
            config.ticks = ticks;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate = tick_rate;
        }
        if let Some(blue) = self.blue {
            config.blue = blue;
        }
        if let Some(red) = self.red {
            config.red = red;
        }
        config.json |= self.json;

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn print_summaries(summaries: &[MatchSummary], json: bool) -> ExitCode {
    if json {
        return match serde_json::to_string_pretty(summaries) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                tracing::error!(%err, "failed to serialize summaries");
                ExitCode::FAILURE
            }
        };
    }

    for s in summaries {
        let winner = s
            .winner
            .map_or_else(|| "draw".to_string(), |side| format!("{side:?} wins"));
        println!(
            "match {} (seed {}): {} after {} ticks ({:.1}s) | cards {}/{} | troops {}/{} | towers lost {}/{}",
            s.iteration,
            s.seed,
            winner,
            s.ticks,
            s.elapsed_secs,
            s.cards_played[0],
            s.cards_played[1],
            s.troops_spawned[0],
            s.troops_spawned[1],
            s.towers_lost[0],
            s.towers_lost[1],
        );
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    init_tracing();

    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        mode = ?config.mode,
        seed = config.seed,
        blue = %config.blue,
        red = %config.red,
        "starting"
    );

    let summaries = match config.mode {
        Mode::Headless => match game_loop::run_headless(&config) {
            Ok(summaries) => summaries,
            Err(err) => {
                tracing::error!(%err, "headless run failed");
                return ExitCode::FAILURE;
            }
        },
        Mode::Realtime => {
            let handle = match game_loop::spawn_game_loop(config.clone()) {
                Ok(handle) => handle,
                Err(err) => {
                    tracing::error!(%err, "failed to start game loop");
                    return ExitCode::FAILURE;
                }
            };
            match handle.join() {
                Some(summary) => vec![summary],
                None => {
                    tracing::error!("game loop thread panicked");
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    print_summaries(&summaries, config.json)
}
