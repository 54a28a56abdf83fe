//! Turn resolution throughput benchmarks: turns per second for a plain
//! attack turn and for a loaded turn with field cards and standing effects.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use gauntlet::engine::{
    resolve_turn, AbilityKind, CardSnapshot, EffectBucket, PersistentEffect, SideState, StatKey,
    Stats, TurnAction, TurnRequest,
};
use serde_json::json;

fn combat_stats() -> Stats {
    Stats {
        attack_power: 10.0,
        physical_power: 8.0,
        supernatural_power: 3.0,
        durability: 4.0,
        vitality: 5.0,
        intelligence: 100.0,
        speed: 50.0,
        sp: 8.0,
        max_sp: 10.0,
        hp: 500.0,
    }
}

fn strike() -> CardSnapshot {
    CardSnapshot::from_authored(&json!({
        "name": "Strike",
        "spCost": 2.0,
        "potency": 5.0,
        "types": ["physical"],
        "abilities": [
            {"type": "statsUp", "target": "attackPower", "power": 2, "duration": 2,
             "precedence": 3, "activationChance": 60}
        ]
    }))
}

fn barrage() -> CardSnapshot {
    CardSnapshot::from_authored(&json!({
        "name": "Barrage",
        "spCost": 3.0,
        "potency": 4.0,
        "types": ["physical"],
        "abilities": [
            {"type": "multiHit", "key": "volley", "multiHit": {"turns": 3}}
        ]
    }))
}

fn side() -> SideState {
    SideState {
        stats: combat_stats(),
        hand: vec![strike(), barrage(), strike()],
        deck: (0..6).map(|_| strike()).collect(),
        defending: false,
    }
}

fn plain_request(seed: u64) -> TurnRequest {
    TurnRequest {
        player: side(),
        enemy: side(),
        selected_cards: vec![0],
        action: Some(TurnAction::Play),
        seed: Some(seed),
        ..TurnRequest::default()
    }
}

fn loaded_request(seed: u64) -> TurnRequest {
    // A turn with a staged field card and a populated ledger, closer to
    // mid-battle cost than the opening turn.
    let staged = resolve_turn(TurnRequest {
        player: side(),
        enemy: side(),
        selected_cards: vec![1],
        action: Some(TurnAction::Play),
        seed: Some(seed),
        ..TurnRequest::default()
    })
    .expect("staging turn resolves");

    let mut effects = EffectBucket::default();
    effects.player.insert(
        "StatsUp:attackPower".to_string(),
        PersistentEffect {
            kind: AbilityKind::StatsUp { stat: StatKey::AttackPower },
            power: 3.0,
            precedence: 2,
            remaining: 3,
        },
    );
    effects.enemy.insert(
        "Lucky".to_string(),
        PersistentEffect {
            kind: AbilityKind::Lucky,
            power: 10.0,
            precedence: 1,
            remaining: 2,
        },
    );

    TurnRequest {
        player: staged.player,
        enemy: staged.enemy,
        active_effects: effects,
        on_field: staged.on_field,
        selected_cards: vec![0],
        action: Some(TurnAction::Play),
        seed: Some(seed + 1),
        ..TurnRequest::default()
    }
}

fn bench_turns(c: &mut Criterion) {
    let mut group = c.benchmark_group("turn");
    group.sample_size(100);
    group.throughput(Throughput::Elements(1));

    group.bench_function("plain_attack", |b| {
        b.iter(|| black_box(resolve_turn(plain_request(7))));
    });

    let request = loaded_request(7);
    group.bench_function("field_and_effects", |b| {
        b.iter(|| black_box(resolve_turn(request.clone())));
    });

    group.finish();
}

criterion_group!(benches, bench_turns);
criterion_main!(benches);
