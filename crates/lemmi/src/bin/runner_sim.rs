//! # Runner Simulation
//!
//! Plays seeded runs headless with the autopilot, settles them against a
//! mock wallet and an in-memory backend, and prints the results.
//!
//! ## Usage
//!
//! ```bash
//! runner_sim --seed 7 --runs 5 --character winky --render 3d --convert
//! ```

use std::process::ExitCode;

use lemmi::core::{Character, RunnerConfig};
use lemmi::rendering::{Canvas2dRenderer, Renderer, Scene3dRenderer};
use lemmi::server::{MemoryStore, Store};
use lemmi::shared::{Features, UpsertWalletRequest, GAME_ID};
use lemmi::wallet::{MockExtension, MockWalletAdapter, TokenAmount};
use lemmi::{Autopilot, AutopilotConfig, Session, SessionConfig};
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!("Usage: runner_sim [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -s, --seed <SEED>          First run seed (default: 1)");
    println!("  -n, --runs <NUM>           Number of runs (default: 3)");
    println!("  -c, --character <NAME>     lemmi | winky | gerbil (default: lemmi)");
    println!("      --nft                  Wallet holds the Gerbil NFT");
    println!("      --ada <AMOUNT>         Whole ADA in the mock wallet (default: 1000)");
    println!("      --convert              Convert WINKS to LEMMI after each run");
    println!("  -r, --render <MODE>        none | 2d | 3d (default: none)");
    println!("      --config <PATH>        Runner tuning TOML");
    println!("  -d, --max-secs <SECS>      Time cap per run (default: 120)");
    println!("      --ignore-coins         Autopilot only dodges, never chases coins");
    println!("  -h, --help                 Show this help");
}

fn parse_character(name: &str) -> Option<Character> {
    Character::ROSTER
        .into_iter()
        .find(|c| c.stats().display_name.eq_ignore_ascii_case(name))
}

fn make_renderer(mode: &str) -> Option<Box<dyn Renderer>> {
    match mode {
        "2d" => Some(Box::<Canvas2dRenderer>::default()),
        "3d" => Some(Box::<Scene3dRenderer>::default()),
        _ => None,
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         LEMMI RUNNER SIMULATION                                  ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let args: Vec<String> = std::env::args().collect();
    let mut seed = 1u64;
    let mut runs = 3u32;
    let mut character = Character::Lemmi;
    let mut nft = false;
    let mut convert = false;
    let mut render = String::from("none");
    let mut config_path: Option<String> = None;
    let mut max_secs = 120.0f32;
    let mut ada = 1_000u64;
    let mut collect_coins = true;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" | "-s" => {
                if i + 1 < args.len() {
                    seed = args[i + 1].parse().unwrap_or(1);
                    i += 1;
                }
            }
            "--runs" | "-n" => {
                if i + 1 < args.len() {
                    runs = args[i + 1].parse().unwrap_or(3);
                    i += 1;
                }
            }
            "--character" | "-c" => {
                if i + 1 < args.len() {
                    match parse_character(&args[i + 1]) {
                        Some(c) => character = c,
                        None => {
                            eprintln!("unknown character {:?}", args[i + 1]);
                            return ExitCode::FAILURE;
                        }
                    }
                    i += 1;
                }
            }
            "--nft" => nft = true,
            "--ada" => {
                if i + 1 < args.len() {
                    ada = args[i + 1].parse().unwrap_or(1_000);
                    i += 1;
                }
            }
            "--ignore-coins" => collect_coins = false,
            "--convert" => convert = true,
            "--render" | "-r" => {
                if i + 1 < args.len() {
                    render = args[i + 1].clone();
                    i += 1;
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--max-secs" | "-d" => {
                if i + 1 < args.len() {
                    max_secs = args[i + 1].parse().unwrap_or(120.0);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            _ => {}
        }
        i += 1;
    }

    let runner_config = match config_path {
        Some(path) => match RunnerConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("cannot load {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => RunnerConfig::default(),
    };

    let store = MemoryStore::new(Some(seed));
    let mut wallet = MockWalletAdapter::new();
    let extension = MockExtension::new(seed)
        .with_ada(TokenAmount::from_whole(ada))
        .with_gerbil_nft(nft);
    let address = match wallet.connect(&extension) {
        Ok(account) => account.address.clone(),
        Err(e) => {
            eprintln!("{}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    println!("┌─ CONFIGURATION ─────────────────────────────────────────────────┐");
    println!("│ Wallet:             {address}");
    println!("│ Character:          {}", character.stats().display_name);
    println!("│ Runs:               {runs} (seeds {seed}..{})", seed + u64::from(runs));
    println!("│ Renderer:           {render}");
    println!("│ Convert to LEMMI:   {convert}");
    println!("│ Chase Coins:        {collect_coins}");
    println!("└──────────────────────────────────────────────────────────────────┘");
    println!();

    for run in 0..runs {
        let config = SessionConfig {
            runner: runner_config.clone(),
            seed: seed + u64::from(run),
            character,
            max_duration_secs: max_secs,
            convert,
            ..SessionConfig::default()
        };
        let mut session = Session::new(config).with_autopilot(Autopilot::new(AutopilotConfig {
            collect_coins,
            ..AutopilotConfig::default()
        }));
        if let Some(renderer) = make_renderer(&render) {
            session = session.with_renderer(renderer);
        }

        let report = match session.play(&mut wallet, &store) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("run {run} failed: {e}");
                return ExitCode::FAILURE;
            }
        };

        let summary = &report.summary;
        let ending = match summary.cause {
            Some(cause) => format!("hit {cause:?}"),
            None => "time cap".to_owned(),
        };
        println!("┌─ RUN {run} (seed {}) ─────────────────────────────────────────", summary.seed);
        println!("│ Score:              {}", summary.score);
        println!("│ Distance:           {:.1}", summary.distance);
        println!("│ Coins:              {}", summary.coins_collected);
        println!("│ Dodged:             {}", summary.obstacles_dodged);
        println!("│ Top Speed:          {:.1}", summary.top_speed);
        println!("│ Duration:           {:.1}s ({} frames)", summary.duration_secs, report.frames);
        println!("│ Ended By:           {ending}");
        println!("│ WINKS Earned:       {}", report.winks_earned);
        if let Some(conversion) = report.conversion {
            println!(
                "│ Converted:          {} WINKS -> {} LEMMI",
                conversion.winks_spent, conversion.lemmi_received
            );
        }
        if report.render.draw_calls > 0 {
            println!(
                "│ Rendered:           {} draw calls, {} culled",
                report.render.draw_calls, report.render.culled
            );
        }
        println!("└──────────────────────────────────────────────────────────────────");
        println!();
    }

    let Ok(balance) = wallet.get_balance() else {
        eprintln!("wallet disconnected");
        return ExitCode::FAILURE;
    };
    let record = store.upsert_wallet(
        &address,
        &UpsertWalletRequest {
            balance: Some(balance.ada.to_f64()),
            lemmi_balance: Some(balance.lemmi.to_f64()),
            has_gerbil_nft: Some(nft),
        },
    );
    let features = Features::for_wallet(Some(&record));

    println!("┌─ SETTLEMENT ────────────────────────────────────────────────────┐");
    println!("│ ADA:                {}", balance.ada);
    println!("│ WINKS:              {}", balance.winks);
    println!("│ LEMMI:              {}", balance.lemmi);
    println!("│ Features:           {features:?}");
    let best: Vec<String> = store
        .scores(&address, GAME_ID)
        .iter()
        .map(|s| s.score.to_string())
        .collect();
    println!("│ Scores:             {}", best.join(", "));
    println!("└──────────────────────────────────────────────────────────────────┘");

    ExitCode::SUCCESS
}
