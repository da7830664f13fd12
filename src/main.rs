use std::{
    io::{stdout, IsTerminal},
    path::{Path, PathBuf},
    time::Duration as StdDuration,
};

use anyhow::Context;
use chrono::Duration;
use clap::{Parser, Subcommand};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use log::{info, warn};
use rankboard::{
    config::{
        load_roster, parse_roster, Config, QueueMode, DEFAULT_ENTRY_DELAY, DEFAULT_PLATFORM_HOST, DEFAULT_REGIONAL_HOST,
        DEFAULT_REQUEST_TIMEOUT, DEFAULT_TAG_LINE,
    },
    model::leaderboard::Leaderboard,
    service::{
        cache::DEFAULT_TTL_HOURS,
        pipeline::{self, LiveSession},
        snapshot::write_snapshot,
    },
    ui::leaderboard::print_leaderboard,
};
use tokio::time::sleep;

const DEFAULT_ROSTER_FILE: &str = "data/friends.json";

/// Ranked leaderboard for a group of League of Legends friends
#[derive(Parser)]
#[command(name = "rankboard")]
#[command(version, about, long_about = None)]
struct Args {
    /// Riot API key
    #[arg(long, env = "RIOT_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// JSON list of tracked players [default: data/friends.json if present]
    #[arg(short = 'r', long)]
    roster: Option<PathBuf>,

    /// Tracked player as `name` or `name#tag`, replaces the roster file
    #[arg(short = 'p', long = "player")]
    players: Vec<String>,

    /// Regional routing host used for account lookups
    #[arg(long, default_value = DEFAULT_REGIONAL_HOST)]
    region: String,

    /// Platform host used for summoner and league lookups
    #[arg(long, default_value = DEFAULT_PLATFORM_HOST)]
    platform: String,

    /// Tag line for roster names without one
    #[arg(long, default_value = DEFAULT_TAG_LINE)]
    tag_line: String,

    /// One row per ranked queue, or one solo/duo row per player
    #[arg(long, value_enum, default_value_t = QueueMode::MultiQueue)]
    queue_mode: QueueMode,

    /// Hours a fetched response stays valid
    #[arg(long, default_value_t = DEFAULT_TTL_HOURS)]
    ttl_hours: i64,

    /// Pause between players in milliseconds
    #[arg(long, default_value_t = DEFAULT_ENTRY_DELAY.as_millis() as u64)]
    delay_ms: u64,

    /// Timeout per request in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Snapshot read instead of the live API when no key is configured
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Print the leaderboard as JSON
    #[arg(long)]
    json: bool,

    /// Keep running and refresh the live leaderboard every SECS seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    watch: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the leaderboard (default)
    Show,
    /// Fetch live data and store it as a snapshot file
    Snapshot {
        #[arg(short, long, default_value = "data/players-cache.json")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = build_config(&args)?;

    match args.command.unwrap_or(Command::Show) {
        Command::Show => match args.watch {
            Some(secs) => watch(&config, StdDuration::from_secs(secs), args.json).await?,
            None => render(&pipeline::load_leaderboard(&config).await?, args.json)?,
        },
        Command::Snapshot { output } => {
            let report = pipeline::fetch_live(&config).await?;
            if report.attempted > 0 && report.succeeded() == 0 {
                warn!("No player could be fetched, the snapshot will be empty");
            }
            write_snapshot(&output, &report.into_snapshot())?;
        }
    }

    Ok(())
}

/// Refreshes through one session, so responses younger than the TTL are not fetched again.
async fn watch(config: &Config, interval: StdDuration, json: bool) -> anyhow::Result<()> {
    let session = LiveSession::connect(config)?;
    loop {
        let board = session.refresh().await.to_leaderboard();
        if !json && stdout().is_terminal() {
            execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        }
        render(&board, json)?;

        info!("Next refresh in {}s", interval.as_secs());
        sleep(interval).await;
    }
}

fn render(board: &Leaderboard, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(board)?);
    } else {
        let color = stdout().is_terminal();
        print_leaderboard(&mut stdout().lock(), board, color)?;
    }
    Ok(())
}

fn build_config(args: &Args) -> anyhow::Result<Config> {
    let roster = if !args.players.is_empty() {
        parse_roster(&args.players, &args.tag_line)
    } else if let Some(path) = &args.roster {
        load_roster(path, &args.tag_line)?
    } else if Path::new(DEFAULT_ROSTER_FILE).exists() {
        load_roster(Path::new(DEFAULT_ROSTER_FILE), &args.tag_line)?
    } else {
        warn!("No roster given, pass --player or --roster");
        Vec::new()
    };

    let cache_ttl = Duration::try_hours(args.ttl_hours)
        .filter(|ttl| *ttl > Duration::zero())
        .context("--ttl-hours must be a positive number of hours")?;

    Ok(Config {
        api_key: args.api_key.clone(),
        roster,
        regional_host: args.region.clone(),
        platform_host: args.platform.clone(),
        default_tag_line: args.tag_line.clone(),
        cache_ttl,
        entry_delay: StdDuration::from_millis(args.delay_ms),
        request_timeout: StdDuration::from_secs(args.timeout_secs),
        queue_mode: args.queue_mode,
        snapshot_path: args.snapshot.clone(),
    })
}
