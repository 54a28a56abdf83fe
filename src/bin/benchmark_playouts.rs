//! Run a playout batch once sequentially and once in parallel, then print
//! timings and speedup.
//!
//! Usage: cargo run --release --bin benchmark_playouts
//!
//! Run from the project root so data/cards and data/enemies are available if
//! present; without a catalog the benchmark falls back to a synthetic deck.

use std::time::Instant;

use gauntlet::data::registry::DataRegistry;
use gauntlet::engine::policy::PolicyConfig;
use gauntlet::engine::state::{CardSnapshot, SideState, Stats};
use gauntlet::sim::{run_playouts, run_playouts_parallel};

fn main() {
    let seed = 12345u64;
    let iterations = 2000;

    let registry = DataRegistry::load();
    let (side_a, policy_a, side_b, policy_b, label) = match (
        registry.resolve_enemy("bruiser"),
        registry.resolve_enemy("trickster"),
    ) {
        (Some(a), Some(b)) => {
            let label = format!("{} vs {}", a.name, b.name);
            (
                registry.enemy_side_state(&a),
                a.policy.clone(),
                registry.enemy_side_state(&b),
                b.policy.clone(),
                label,
            )
        }
        _ => {
            let side = synthetic_side();
            (
                side.clone(),
                PolicyConfig::default(),
                side,
                PolicyConfig::default(),
                "synthetic mirror".to_string(),
            )
        }
    };

    println!("Playouts: {iterations} iterations ({label})");
    println!();

    let t0 = Instant::now();
    let seq = run_playouts(&side_a, &policy_a, &side_b, &policy_b, iterations, seed);
    let elapsed_seq = t0.elapsed();
    let seq_ms = elapsed_seq.as_secs_f64() * 1000.0;
    println!(
        "Sequential:  {:.2} ms  ({:.1} playouts/s)",
        seq_ms,
        iterations as f64 / elapsed_seq.as_secs_f64()
    );

    let t0 = Instant::now();
    let par = run_playouts_parallel(&side_a, &policy_a, &side_b, &policy_b, iterations, seed);
    let elapsed_par = t0.elapsed();
    let par_ms = elapsed_par.as_secs_f64() * 1000.0;
    println!(
        "Parallel:    {:.2} ms  ({:.1} playouts/s)",
        par_ms,
        iterations as f64 / elapsed_par.as_secs_f64()
    );

    println!();
    println!("Speedup:     {:.2}x faster (parallel vs sequential)", seq_ms / par_ms);

    assert_eq!(seq.playouts, par.playouts);
    assert_eq!(seq.a_wins, par.a_wins, "a_wins mismatch");
    assert_eq!(seq.b_wins, par.b_wins, "b_wins mismatch");
    assert_eq!(seq.draws, par.draws, "draws mismatch");
    println!("(Results match sequential vs parallel)");
}

fn synthetic_side() -> SideState {
    let stats = Stats {
        attack_power: 10.0,
        physical_power: 8.0,
        supernatural_power: 6.0,
        durability: 4.0,
        vitality: 5.0,
        intelligence: 50.0,
        speed: 20.0,
        sp: 10.0,
        max_sp: 10.0,
        hp: 500.0,
    };
    let deck = (0..12)
        .map(|i| {
            let raw = serde_json::json!({
                "name": format!("Strike {i}"),
                "rating": 3,
                "spCost": 2.0,
                "potency": 5.0 + (i % 4) as f64,
                "defense": 3.0,
                "types": ["Physical"],
                "abilities": []
            });
            CardSnapshot::from_authored(&raw)
        })
        .collect();
    SideState {
        stats,
        hand: Vec::new(),
        deck,
        defending: false,
    }
}
