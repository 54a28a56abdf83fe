//! Command dispatch for the `gauntlet` binary.

use std::env;
use std::fs;
use std::path::Path;

use crate::data::import::import_cards_csv;
use crate::data::registry::DataRegistry;
use crate::data::validate::validate_catalog;
use crate::engine::turn::{resolve_turn, TurnError, TurnRequest};
use crate::parallel::WorkerPool;
use crate::server;
use crate::sim::{run_playout_batches, MatchupResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Serve,
    Resolve,
    Playout,
    Import,
    Validate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("serve") => Some(Command::Serve),
        Some("resolve") => Some(Command::Resolve),
        Some("playout") => Some(Command::Playout),
        Some("import") => Some(Command::Import),
        Some("validate") => Some(Command::Validate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Serve) => handle_serve(),
        Some(Command::Resolve) => handle_resolve(args),
        Some(Command::Playout) => handle_playout(args),
        Some(Command::Import) => handle_import(args),
        Some(Command::Validate) => handle_validate(),
        None => {
            eprintln!("usage: gauntlet <serve|resolve|playout|import|validate>");
            2
        }
    }
}

fn handle_serve() -> i32 {
    let bind_addr = env::var("GAUNTLET_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    match server::run_server(&bind_addr) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("server error: {err}");
            1
        }
    }
}

/// Resolve one turn from a request JSON file and print the result.
fn handle_resolve(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: gauntlet resolve <request.json>");
        return 2;
    };
    let body = match fs::read_to_string(path) {
        Ok(body) => body,
        Err(err) => {
            eprintln!("failed to read {path}: {err}");
            return 1;
        }
    };
    let request: TurnRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(err) => {
            eprintln!("invalid turn request: {err}");
            return 1;
        }
    };
    match resolve_turn(request) {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(payload) => {
                println!("{payload}");
                0
            }
            Err(err) => {
                eprintln!("failed to serialize turn result: {err}");
                1
            }
        },
        Err(TurnError::Rejected(reason)) => {
            eprintln!("rejected: {reason}");
            1
        }
        Err(TurnError::Parse(err)) => {
            eprintln!("invalid turn request: {err}");
            1
        }
    }
}

/// AI-vs-AI balance playouts between two catalog enemies.
fn handle_playout(args: &[String]) -> i32 {
    let (Some(first), Some(second)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: gauntlet playout <enemy_a> <enemy_b> [iterations] [seed]");
        return 2;
    };
    let iterations = parse_usize_arg(args.get(4), "iterations", 1000);
    let seed = parse_u64_arg(args.get(5), "seed", 7);

    let registry = DataRegistry::load();
    let (Some(enemy_a), Some(enemy_b)) = (
        registry.resolve_enemy(first),
        registry.resolve_enemy(second),
    ) else {
        eprintln!("could not resolve both enemies from the catalog");
        return 1;
    };

    let pool = WorkerPool::from_env("GAUNTLET_WORKERS");
    let side_a = registry.enemy_side_state(&enemy_a);
    let side_b = registry.enemy_side_state(&enemy_b);
    let result: MatchupResult = run_playout_batches(
        &side_a,
        &enemy_a.policy,
        &side_b,
        &enemy_b.policy,
        iterations,
        seed,
        &pool,
    );

    println!("matchup\ta_wins\tb_wins\tdraws\ta_win_rate\tavg_turns");
    println!(
        "{} vs {}\t{}\t{}\t{}\t{:.4}\t{:.1}",
        enemy_a.name,
        enemy_b.name,
        result.a_wins,
        result.b_wins,
        result.draws,
        result.a_win_rate(),
        result.avg_turns
    );
    0
}

fn handle_import(args: &[String]) -> i32 {
    let Some(path) = args.get(2) else {
        eprintln!("usage: gauntlet import <cards.csv>");
        return 2;
    };
    match import_cards_csv(Path::new(path), Path::new("data")) {
        Ok(count) => {
            println!("imported {count} cards");
            0
        }
        Err(err) => {
            eprintln!("import failed: {err}");
            1
        }
    }
}

fn handle_validate() -> i32 {
    let registry = DataRegistry::load();
    let report = validate_catalog(&registry);
    for diag in &report.diagnostics {
        println!("{}: {}: {}", diag.severity, diag.context, diag.message);
    }
    if report.has_errors() {
        1
    } else {
        println!("catalog ok");
        0
    }
}

fn parse_usize_arg(arg: Option<&String>, name: &str, default: usize) -> usize {
    match arg {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("invalid {name} {raw:?}, using {default}");
            default
        }),
        None => default,
    }
}

fn parse_u64_arg(arg: Option<&String>, name: &str, default: u64) -> u64 {
    match arg {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            eprintln!("invalid {name} {raw:?}, using {default}");
            default
        }),
        None => default,
    }
}
