use gauntlet::engine::{decide, CardSnapshot, Combo, EnemyAction, PolicyConfig, Rng};
use serde_json::json;

fn card(name: &str, sp_cost: f64) -> CardSnapshot {
    CardSnapshot::from_authored(&json!({
        "name": name,
        "spCost": sp_cost,
        "potency": 2.0,
        "types": ["physical"]
    }))
}

fn deterministic_config() -> PolicyConfig {
    PolicyConfig {
        greed_chance: 0.0,
        ..PolicyConfig::default()
    }
}

#[test]
fn affordable_combo_is_selected_first() {
    let hand = vec![card("Jab", 2.0), card("Cross", 2.0), card("Guard Up", 2.0)];
    let config = PolicyConfig {
        combos: vec![Combo {
            cards: vec!["Jab".to_string(), "Cross".to_string()],
            priority: 5.0,
        }],
        ..deterministic_config()
    };
    let mut rng = Rng::new(1);

    // SP covers exactly the combo, so the greedy fill adds nothing.
    let action = decide(&hand, 4.0, 10.0, 100.0, 100.0, &config, &mut rng);
    assert_eq!(action, EnemyAction::Play(vec![0, 1]));
}

#[test]
fn higher_priority_combo_wins() {
    let hand = vec![card("Jab", 2.0), card("Cross", 2.0), card("Hex", 2.0)];
    let config = PolicyConfig {
        combos: vec![
            Combo {
                cards: vec!["Jab".to_string()],
                priority: 1.0,
            },
            Combo {
                cards: vec!["Hex".to_string()],
                priority: 9.0,
            },
        ],
        ..deterministic_config()
    };
    let mut rng = Rng::new(1);

    let action = decide(&hand, 2.0, 10.0, 100.0, 100.0, &config, &mut rng);
    assert_eq!(action, EnemyAction::Play(vec![2]));
}

#[test]
fn unaffordable_combo_falls_back_to_greedy_fill() {
    let hand = vec![card("Jab", 8.0), card("Cross", 8.0), card("Poke", 1.0)];
    let config = PolicyConfig {
        combos: vec![Combo {
            cards: vec!["Jab".to_string(), "Cross".to_string()],
            priority: 5.0,
        }],
        ..deterministic_config()
    };
    let mut rng = Rng::new(1);

    let action = decide(&hand, 2.0, 10.0, 100.0, 100.0, &config, &mut rng);
    assert_eq!(action, EnemyAction::Play(vec![2]));
}

#[test]
fn greedy_fill_prefers_higher_priority_cards() {
    let hand = vec![card("Weak", 2.0), card("Strong", 2.0)];
    let mut config = deterministic_config();
    config.card_priority.insert("Strong".to_string(), 5.0);
    let mut rng = Rng::new(1);

    // Only one card fits the budget; the prioritized one goes first.
    let action = decide(&hand, 2.0, 10.0, 100.0, 100.0, &config, &mut rng);
    assert_eq!(action, EnemyAction::Play(vec![1]));
}

#[test]
fn combo_requires_distinct_hand_slots() {
    let hand = vec![card("Jab", 1.0), card("Poke", 1.0)];
    let config = PolicyConfig {
        combos: vec![Combo {
            cards: vec!["Jab".to_string(), "Jab".to_string()],
            priority: 9.0,
        }],
        ..deterministic_config()
    };
    let mut rng = Rng::new(1);

    // The duplicate combo cannot match one copy; greedy fill takes over.
    match decide(&hand, 10.0, 10.0, 100.0, 100.0, &config, &mut rng) {
        EnemyAction::Play(mut picks) => {
            picks.sort_unstable();
            assert_eq!(picks, vec![0, 1]);
        }
        other => panic!("expected a play, got {other:?}"),
    }
}

#[test]
fn empty_hand_with_low_sp_skips() {
    let config = deterministic_config();
    let mut rng = Rng::new(1);

    // sp ratio 0.1 is under the 0.3 threshold; hp is full so defend scores 0.
    let action = decide(&[], 1.0, 10.0, 100.0, 100.0, &config, &mut rng);
    assert_eq!(action, EnemyAction::Skip);
}

#[test]
fn empty_hand_with_low_hp_defends() {
    let config = deterministic_config();
    let mut rng = Rng::new(1);

    let action = decide(&[], 10.0, 10.0, 10.0, 100.0, &config, &mut rng);
    assert_eq!(action, EnemyAction::Defend);
}

#[test]
fn ties_between_defend_and_skip_break_to_defend() {
    let config = deterministic_config();
    let mut rng = Rng::new(1);

    // Full SP and full HP: both scores are zero.
    let action = decide(&[], 10.0, 10.0, 100.0, 100.0, &config, &mut rng);
    assert_eq!(action, EnemyAction::Defend);
}

#[test]
fn greed_always_plays_when_forced_on() {
    let hand = vec![card("Jab", 1.0)];
    let config = PolicyConfig {
        greed_chance: 1.0,
        // A huge skip incentive that greed must short-circuit past.
        sp_skip_threshold: 1.0,
        ..PolicyConfig::default()
    };

    for seed in 0..20 {
        let mut rng = Rng::new(seed);
        let action = decide(&hand, 1.0, 100.0, 100.0, 100.0, &config, &mut rng);
        assert_eq!(action, EnemyAction::Play(vec![0]));
    }
}

#[test]
fn play_wins_ties_against_defend_and_skip() {
    let hand = vec![card("Jab", 0.0)];
    let mut config = deterministic_config();
    config.weights.play = 0.0;
    let mut rng = Rng::new(1);

    // All three scores are zero; the tie-break order keeps the play.
    let action = decide(&hand, 10.0, 10.0, 100.0, 100.0, &config, &mut rng);
    assert_eq!(action, EnemyAction::Play(vec![0]));
}
