//! AI-vs-AI balance playouts: both sides driven by the enemy decision
//! policy, full turns resolved by the engine. Used to estimate matchup win
//! rates when tuning card and enemy data. Each playout is an independent
//! seeded run, so batches parallelize across playouts with Rayon while turn
//! resolution itself stays single-threaded.

use rayon::prelude::*;

use crate::engine::policy::{decide, EnemyAction, PolicyConfig};
use crate::engine::rng::Rng;
use crate::engine::state::SideState;
use crate::engine::turn::{
    resolve_turn, BattleOutcome, TurnAction, TurnRequest, TurnResult, SP_REGEN,
};

/// Turn cap per playout; a fight still undecided counts as a draw.
pub const MAX_PLAYOUT_TURNS: u32 = 60;

#[derive(Debug, Clone, Copy, Default)]
pub struct MatchupResult {
    pub playouts: usize,
    pub a_wins: usize,
    pub b_wins: usize,
    pub draws: usize,
    pub avg_turns: f64,
}

impl MatchupResult {
    pub fn a_win_rate(&self) -> f64 {
        if self.playouts == 0 {
            0.0
        } else {
            self.a_wins as f64 / self.playouts as f64
        }
    }
}

/// One full playout. Side A occupies the player slot, side B the enemy
/// slot; A's action comes from the same decision policy the engine applies
/// to B.
pub fn run_playout(
    side_a: &SideState,
    policy_a: &PolicyConfig,
    side_b: &SideState,
    policy_b: &PolicyConfig,
    seed: u64,
) -> (Option<BattleOutcome>, u32) {
    let mut decision_rng = Rng::new(seed ^ 0x5eed_0f_a11);

    let bootstrap = TurnRequest {
        player: side_a.clone(),
        enemy: side_b.clone(),
        bootstrap: true,
        seed: Some(seed),
        enemy_policy: Some(policy_b.clone()),
        ..TurnRequest::default()
    };
    let Ok(mut state) = resolve_turn(bootstrap) else {
        return (None, 0);
    };

    for turn in 1..=MAX_PLAYOUT_TURNS {
        let request = next_request(&state, policy_a, policy_b, seed.wrapping_add(turn as u64), &mut decision_rng);
        match resolve_turn(request) {
            Ok(result) => {
                let done = result.outcome;
                state = result;
                if done.is_some() {
                    return (done, turn);
                }
            }
            // A rejected AI action means the policy picked something the
            // engine refused; count the playout as a draw.
            Err(_) => return (None, turn),
        }
    }
    (None, MAX_PLAYOUT_TURNS)
}

fn next_request(
    state: &TurnResult,
    policy_a: &PolicyConfig,
    policy_b: &PolicyConfig,
    seed: u64,
    decision_rng: &mut Rng,
) -> TurnRequest {
    let stats = &state.player.stats;
    let choice = decide(
        &state.player.hand,
        (stats.sp + SP_REGEN).min(stats.max_sp),
        stats.max_sp,
        stats.hp,
        stats.max_hp(),
        policy_a,
        decision_rng,
    );
    let (action, selected_cards) = match choice {
        EnemyAction::Play(picks) => (TurnAction::Play, picks),
        EnemyAction::Skip => (TurnAction::Skip, Vec::new()),
        EnemyAction::Defend => (TurnAction::Defend, Vec::new()),
    };
    TurnRequest {
        player: state.player.clone(),
        enemy: state.enemy.clone(),
        active_effects: state.active_effects.clone(),
        on_field: state.on_field.clone(),
        selected_cards,
        action: Some(action),
        enemy_policy: Some(policy_b.clone()),
        seed: Some(seed),
        ..TurnRequest::default()
    }
}

pub fn run_playouts(
    side_a: &SideState,
    policy_a: &PolicyConfig,
    side_b: &SideState,
    policy_b: &PolicyConfig,
    iterations: usize,
    seed: u64,
) -> MatchupResult {
    let outcomes: Vec<(Option<BattleOutcome>, u32)> = (0..iterations)
        .map(|i| run_playout(side_a, policy_a, side_b, policy_b, seed.wrapping_add(i as u64)))
        .collect();
    summarize(outcomes)
}

/// Like [run_playouts] but distributes playouts across all CPU cores via
/// Rayon. Result totals match the sequential run for the same seed.
pub fn run_playouts_parallel(
    side_a: &SideState,
    policy_a: &PolicyConfig,
    side_b: &SideState,
    policy_b: &PolicyConfig,
    iterations: usize,
    seed: u64,
) -> MatchupResult {
    let outcomes: Vec<(Option<BattleOutcome>, u32)> = (0..iterations)
        .into_par_iter()
        .map(|i| run_playout(side_a, policy_a, side_b, policy_b, seed.wrapping_add(i as u64)))
        .collect();
    summarize(outcomes)
}

/// Run a parallel playout batch on a configured worker pool. With a zero
/// worker count this is [run_playouts_parallel] on the global pool.
#[allow(clippy::too_many_arguments)]
pub fn run_playout_batches(
    side_a: &SideState,
    policy_a: &PolicyConfig,
    side_b: &SideState,
    policy_b: &PolicyConfig,
    iterations: usize,
    seed: u64,
    pool: &crate::parallel::WorkerPool,
) -> MatchupResult {
    pool.install(|| run_playouts_parallel(side_a, policy_a, side_b, policy_b, iterations, seed))
}

fn summarize(outcomes: Vec<(Option<BattleOutcome>, u32)>) -> MatchupResult {
    let mut result = MatchupResult {
        playouts: outcomes.len(),
        ..MatchupResult::default()
    };
    let mut turn_sum = 0u64;
    for (outcome, turns) in outcomes {
        turn_sum += u64::from(turns);
        match outcome {
            Some(BattleOutcome::PlayerWon) => result.a_wins += 1,
            Some(BattleOutcome::EnemyWon) => result.b_wins += 1,
            None => result.draws += 1,
        }
    }
    if result.playouts > 0 {
        result.avg_turns = turn_sum as f64 / result.playouts as f64;
    }
    result
}
