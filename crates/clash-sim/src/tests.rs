//! Tests for the engine, the per-tick passes, the deck economy and observers.

use std::sync::{Arc, Mutex};

use glam::DVec2;
use hecs::{Entity, World};
use proptest::prelude::*;

use clash_agents::AgentKind;
use clash_core::commands::PlayerCommand;
use clash_core::components::{Health, Owner, Tower, Troop};
use clash_core::constants::*;
use clash_core::enums::*;
use clash_core::events::GameEvent;
use clash_core::stats::{troop_stats, DEFAULT_DECK};
use clash_core::types::Position;

use crate::engine::{Game, SimConfig};
use crate::placement::PlacementError;
use crate::player::{Deck, Player};
use crate::systems::combat::DamageOutcome;
use crate::systems::steering::{self, Body};
use crate::systems::targeting::{self, Candidate, Scanner};
use crate::systems::{elixir, projectile};

// ---- Helpers ----

fn towers_of(game: &Game, side: Side, kind: TowerKind) -> Vec<Entity> {
    game.towers()
        .iter()
        .copied()
        .filter(|&e| {
            let owner = game.world().get::<&Owner>(e).ok().map(|o| o.0);
            let tower = game.world().get::<&Tower>(e).ok().map(|t| t.kind);
            owner == Some(side) && tower == Some(kind)
        })
        .collect()
}

fn tower_at(game: &Game, x: f64, y: f64) -> Entity {
    game.towers()
        .iter()
        .copied()
        .find(|&e| {
            game.world()
                .get::<&Position>(e)
                .map(|p| p.within(&Position::new(x, y), 0.5))
                .unwrap_or(false)
        })
        .expect("no tower at that position")
}

fn health(game: &Game, entity: Entity) -> Health {
    *game.world().get::<&Health>(entity).expect("entity has no health")
}

fn troop(game: &Game, entity: Entity) -> Troop {
    *game.world().get::<&Troop>(entity).expect("entity is not a troop")
}

fn blank_entities(n: usize) -> Vec<Entity> {
    let mut world = World::new();
    (0..n).map(|_| world.spawn(())).collect()
}

// ---- Targeting ----

#[test]
fn test_nearest_skips_own_side_dead_and_unreachable_air() {
    let e = blank_entities(4);
    let scanner = Scanner {
        side: Side::Blue,
        position: Position::new(0.0, 0.0),
        can_hit_air: false,
        target_buildings: false,
    };
    let cands = [
        Candidate { entity: e[0], side: Side::Blue, position: Position::new(1.0, 0.0), dead: false, air: false },
        Candidate { entity: e[1], side: Side::Red, position: Position::new(2.0, 0.0), dead: true, air: false },
        Candidate { entity: e[2], side: Side::Red, position: Position::new(3.0, 0.0), dead: false, air: true },
        Candidate { entity: e[3], side: Side::Red, position: Position::new(40.0, 0.0), dead: false, air: false },
    ];

    let (found, dist_sq) = targeting::nearest(&scanner, &cands).expect("one valid candidate");
    assert_eq!(found, e[3]);
    assert!((dist_sq - 1600.0).abs() < 1e-9);

    let air_scanner = Scanner { can_hit_air: true, ..scanner };
    assert_eq!(targeting::nearest(&air_scanner, &cands).map(|(e, _)| e), Some(e[2]));
}

#[test]
fn test_nearest_tie_goes_to_first_encountered() {
    let e = blank_entities(2);
    let scanner = Scanner {
        side: Side::Red,
        position: Position::new(0.0, 0.0),
        can_hit_air: true,
        target_buildings: false,
    };
    let cands = [
        Candidate { entity: e[0], side: Side::Blue, position: Position::new(10.0, 0.0), dead: false, air: false },
        Candidate { entity: e[1], side: Side::Blue, position: Position::new(0.0, 10.0), dead: false, air: false },
    ];
    assert_eq!(targeting::nearest(&scanner, &cands).map(|(e, _)| e), Some(e[0]));
}

#[test]
fn test_select_target_prefers_troop_inside_acquisition_radius() {
    let e = blank_entities(3);
    let scanner = Scanner {
        side: Side::Blue,
        position: Position::new(0.0, 0.0),
        can_hit_air: false,
        target_buildings: false,
    };
    let building = [Candidate {
        entity: e[0],
        side: Side::Red,
        position: Position::new(0.0, 50.0),
        dead: false,
        air: false,
    }];
    let near = [Candidate {
        entity: e[1],
        side: Side::Red,
        position: Position::new(TARGET_ACQUISITION_RADIUS, 0.0),
        dead: false,
        air: false,
    }];
    let far = [Candidate {
        entity: e[2],
        side: Side::Red,
        position: Position::new(TARGET_ACQUISITION_RADIUS + 1.0, 0.0),
        dead: false,
        air: false,
    }];

    // Boundary is inclusive, and a troop wins even when a building is closer.
    assert_eq!(targeting::select_target(&scanner, &near, &building), Some(e[1]));
    assert_eq!(targeting::select_target(&scanner, &far, &building), Some(e[0]));
    assert_eq!(targeting::select_target(&scanner, &[], &building), Some(e[0]));
    assert_eq!(targeting::select_target(&scanner, &[], &[]), None);

    let giant = Scanner { target_buildings: true, ..scanner };
    assert_eq!(targeting::select_target(&giant, &near, &building), Some(e[0]));
}

#[test]
fn test_revalidate_clears_dead_target() {
    let e = blank_entities(2);
    assert_eq!(targeting::revalidate(Some(e[0]), |_| true), Some(e[0]));
    assert_eq!(targeting::revalidate(Some(e[0]), |x| x != e[0]), None);
    assert_eq!(targeting::revalidate(None, |_| true), None);
}

// ---- Steering ----

#[test]
fn test_desired_velocity_follows_screen_heading() {
    let up = steering::desired_velocity(90.0, 10.0);
    assert!(up.x.abs() < 1e-9);
    assert!((up.y + 10.0).abs() < 1e-9);

    let down = steering::desired_velocity(270.0, 10.0);
    assert!((down.y - 10.0).abs() < 1e-9);
}

#[test]
fn test_separation_pushes_apart_weighted_by_other() {
    let e = blank_entities(2);
    let me = Body { entity: e[0], position: DVec2::ZERO, weight: 1.0 };
    let equal = Body { entity: e[1], position: DVec2::new(10.0, 0.0), weight: 1.0 };
    let heavy = Body { weight: 18.0, ..equal };

    let push = steering::separation(&me, &[me, equal]);
    let expected = (1.0 - 10.0 / MIN_SEPARATION) * 0.5 * SEPARATION_STRENGTH;
    assert!((push.x + expected).abs() < 1e-9);
    assert!(push.y.abs() < 1e-9);

    let shoved = steering::separation(&me, &[heavy]);
    assert!(shoved.x < push.x, "heavier neighbours push harder");
}

#[test]
fn test_separation_ignores_far_and_coincident_bodies() {
    let e = blank_entities(3);
    let me = Body { entity: e[0], position: DVec2::new(5.0, 5.0), weight: 1.0 };
    let far = Body { entity: e[1], position: DVec2::new(5.0 + MIN_SEPARATION, 5.0), weight: 1.0 };
    let same = Body { entity: e[2], position: DVec2::new(5.0, 5.0), weight: 1.0 };

    assert_eq!(steering::separation(&me, &[far, same]), DVec2::ZERO);
}

// ---- Deck and elixir ----

#[test]
fn test_deck_cycle_promotes_fifth_card() {
    let mut deck = Deck::new(Side::Blue, DEFAULT_DECK);
    deck.cycle(1);

    use CardKind::*;
    assert_eq!(
        deck.kinds(),
        vec![Knight, Fireball, MiniPekka, BabyDragon, Skeletons, SkeletonArmy, Giant]
    );
    assert_eq!(deck.hand().len(), HAND_SIZE);
}

#[test]
fn test_deck_cycle_ignores_queue_slots() {
    let mut deck = Deck::new(Side::Red, DEFAULT_DECK);
    deck.cycle(HAND_SIZE);
    deck.cycle(DECK_SIZE + 3);
    assert_eq!(deck.kinds(), DEFAULT_DECK.to_vec());
}

proptest! {
    #[test]
    fn prop_deck_cycle_keeps_other_hand_slots(plays in proptest::collection::vec(0usize..HAND_SIZE, 1..40)) {
        let mut deck = Deck::new(Side::Blue, DEFAULT_DECK);
        for i in plays {
            let before = deck.kinds();
            deck.cycle(i);
            let after = deck.kinds();

            prop_assert_eq!(after[DECK_SIZE - 1], before[i]);
            prop_assert_eq!(after[i], before[HAND_SIZE]);
            for j in (0..HAND_SIZE).filter(|&j| j != i) {
                prop_assert_eq!(after[j], before[j]);
            }
            prop_assert_eq!(&after[HAND_SIZE..DECK_SIZE - 1], &before[HAND_SIZE + 1..]);
        }
    }

    #[test]
    fn prop_elixir_stays_in_bounds(start in -5.0f64..20.0, steps in proptest::collection::vec(0.0f64..2.0, 0..200)) {
        let mut players = [Player::new(Side::Blue, start, DEFAULT_DECK)];
        prop_assert!((0.0..=ELIXIR_MAX).contains(&players[0].elixir));
        for dt in steps {
            elixir::run(&mut players, dt);
            prop_assert!((0.0..=ELIXIR_MAX).contains(&players[0].elixir));
        }
    }
}

#[test]
fn test_elixir_accrual_is_step_independent() {
    let mut fine = [Player::new(Side::Blue, 0.0, DEFAULT_DECK)];
    let mut coarse = [Player::new(Side::Blue, 0.0, DEFAULT_DECK)];

    for _ in 0..60 {
        elixir::run(&mut fine, 1.0 / 60.0);
    }
    elixir::run(&mut coarse, 1.0);

    assert!((fine[0].elixir - coarse[0].elixir).abs() < 1e-9);
    assert!((coarse[0].elixir - ELIXIR_PER_SECOND).abs() < 1e-9);
}

#[test]
fn test_elixir_caps_at_max() {
    let mut players = [Player::new(Side::Red, 9.9, DEFAULT_DECK)];
    elixir::run(&mut players, 10.0);
    assert_eq!(players[0].elixir, ELIXIR_MAX);
}

// ---- Placement ----

#[test]
fn test_place_card_rejects_unaffordable_card() {
    let mut game = Game::new(SimConfig::default());
    game.set_elixir(Side::Blue, 2.0);

    // Slot 1 holds the Giant (cost 5).
    let err = game.try_place_card(Side::Blue, 100.0, 450.0, 1).unwrap_err();
    assert!(matches!(err, PlacementError::InsufficientElixir { .. }));
    assert!(!game.place_card(Side::Blue, 100.0, 450.0, 1));

    assert_eq!(game.player(Side::Blue).elixir, 2.0);
    assert_eq!(game.player(Side::Blue).deck.kinds(), DEFAULT_DECK.to_vec());
    assert!(game.troops().is_empty());
}

#[test]
fn test_place_card_rejects_queue_slot() {
    let mut game = Game::new(SimConfig::default());
    assert_eq!(
        game.try_place_card(Side::Blue, 100.0, 450.0, HAND_SIZE),
        Err(PlacementError::InvalidHandIndex(HAND_SIZE))
    );
}

#[test]
fn test_place_card_spawns_charges_and_cycles() {
    let mut game = Game::new(SimConfig::default());

    assert!(game.place_card(Side::Blue, 100.0, 450.0, 0));
    assert_eq!(game.troops().len(), 1);
    assert!((game.player(Side::Blue).elixir - 2.0).abs() < 1e-9);

    let spawned = troop(&game, game.troops()[0]);
    assert_eq!(spawned.kind, TroopKind::Knight);
    assert_eq!(spawned.direction_deg, 90.0);

    let hand = game.player(Side::Blue).deck.kinds();
    assert_eq!(hand[0], CardKind::Fireball);
    assert_eq!(hand[DECK_SIZE - 1], CardKind::Knight);

    let snap = game.tick(DT);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::CardPlayed { side: Side::Blue, card: CardKind::Knight, .. }
    )));
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::TroopSpawned { kind: TroopKind::Knight, .. })));
}

#[test]
fn test_multi_unit_cards_spawn_jittered_units() {
    use CardKind::*;
    let mut game = Game::new(SimConfig {
        blue_deck: [Skeletons, SkeletonArmy, Knight, Giant, MiniPekka, BabyDragon, Fireball],
        ..Default::default()
    });
    game.set_elixir(Side::Blue, ELIXIR_MAX);

    assert!(game.place_card(Side::Blue, 225.0, 450.0, 0));
    assert_eq!(game.troops().len(), 3);
    for &e in game.troops() {
        let pos = *game.world().get::<&Position>(e).unwrap();
        assert!((215.0..235.0).contains(&pos.x));
        assert!((440.0..460.0).contains(&pos.y));
    }
    assert!((game.player(Side::Blue).elixir - 9.0).abs() < 1e-9);

    // SkeletonArmy stays in slot 1 after slot 0 cycles.
    assert_eq!(game.player(Side::Blue).deck.kinds()[1], SkeletonArmy);
    assert!(game.place_card(Side::Blue, 225.0, 450.0, 1));
    assert_eq!(game.troops().len(), 18);
    assert!((game.player(Side::Blue).elixir - 6.0).abs() < 1e-9);
}

#[test]
fn test_multi_unit_card_places_every_unit_on_exact_elixir() {
    use CardKind::*;
    let mut game = Game::new(SimConfig {
        blue_deck: [Skeletons, SkeletonArmy, Knight, Giant, MiniPekka, BabyDragon, Fireball],
        ..Default::default()
    });

    game.set_elixir(Side::Blue, 0.5);
    assert_eq!(
        game.try_place_card(Side::Blue, 225.0, 450.0, 0),
        Err(PlacementError::InsufficientElixir {
            cost: 1.0,
            available: 0.5
        })
    );
    assert!(game.troops().is_empty());

    game.set_elixir(Side::Blue, 1.0);
    assert_eq!(game.try_place_card(Side::Blue, 225.0, 450.0, 0), Ok(()));
    assert_eq!(game.troops().len(), 3);
    assert_eq!(game.player(Side::Blue).elixir, 0.0);
}

#[test]
fn test_fireball_launches_from_king_tower() {
    use CardKind::*;
    let mut game = Game::new(SimConfig {
        blue_deck: [Fireball, Knight, Giant, MiniPekka, BabyDragon, Skeletons, SkeletonArmy],
        ..Default::default()
    });

    assert!(game.place_card(Side::Blue, 100.0, 130.0, 0));
    assert_eq!(game.projectiles().len(), 1);

    let snap = game.snapshot();
    let shot = &snap.projectiles[0];
    assert_eq!(shot.position, Position::new(KING_TOWER_POSITION.0, KING_TOWER_POSITION.1).mirrored());
    assert_eq!(shot.target_pos, Some(Position::new(100.0, 130.0)));
    assert_eq!(shot.radius, Some(FIREBALL_RADIUS));
}

#[test]
fn test_spell_without_king_tower_fails() {
    use CardKind::*;
    let mut game = Game::new(SimConfig {
        blue_deck: [Fireball, Knight, Giant, MiniPekka, BabyDragon, Skeletons, SkeletonArmy],
        ..Default::default()
    });
    let king = towers_of(&game, Side::Blue, TowerKind::King)[0];
    assert_eq!(game.apply_damage(king, 1e6), DamageOutcome::Died);

    assert_eq!(
        game.try_place_card(Side::Blue, 100.0, 130.0, 0),
        Err(PlacementError::NoLaunchTower)
    );
    assert!(game.projectiles().is_empty());
    assert_eq!(game.player(Side::Blue).elixir, STARTING_ELIXIR);
}

#[test]
fn test_place_card_command_is_applied_on_next_tick() {
    let mut game = Game::new(SimConfig::default());
    game.queue_command(PlayerCommand::PlaceCard {
        side: Side::Red,
        x: 100.0,
        y: 200.0,
        hand_index: 0,
    });
    assert!(game.troops().is_empty());

    game.tick(DT);
    assert_eq!(game.troops().len(), 1);
    let red = game.world().get::<&Owner>(game.troops()[0]).unwrap().0;
    assert_eq!(red, Side::Red);
}

// ---- Combat ----

#[test]
fn test_damage_clamps_and_dead_entities_ignore_hits() {
    let mut game = Game::new(SimConfig::default());
    let knight = game.spawn_troop(Position::new(225.0, 300.0), TroopKind::Knight, Side::Blue);

    assert_eq!(game.apply_damage(knight, 100.0), DamageOutcome::Survived);
    assert_eq!(game.apply_damage(knight, 1e6), DamageOutcome::Died);

    let hp = health(&game, knight);
    assert_eq!(hp.current, 0.0);
    assert!(hp.dead);
    assert_eq!(troop(&game, knight).state, TroopState::Dead);
    assert_eq!(game.apply_damage(knight, 10.0), DamageOutcome::Ignored);

    let snap = game.tick(DT);
    assert!(game.troops().is_empty());
    assert!(snap.troops.is_empty());
    assert!(snap.events.iter().any(|e| matches!(e, GameEvent::TroopDied { .. })));
}

#[test]
fn test_king_activates_once_after_both_princess_towers_fall() {
    let mut game = Game::new(SimConfig::default());
    let princesses = towers_of(&game, Side::Red, TowerKind::Princess);
    let king = towers_of(&game, Side::Red, TowerKind::King)[0];
    assert_eq!(princesses.len(), 2);

    let is_active = |game: &Game| game.world().get::<&Tower>(king).unwrap().active;
    assert!(!is_active(&game));

    assert_eq!(game.apply_damage(princesses[0], 1e6), DamageOutcome::Died);
    assert!(!is_active(&game), "one princess tower is not enough");

    assert_eq!(game.apply_damage(princesses[1], 1e6), DamageOutcome::Died);
    assert!(is_active(&game));

    assert_eq!(game.apply_damage(princesses[1], 1e6), DamageOutcome::Ignored);
    assert!(is_active(&game));

    let snap = game.tick(DT);
    let activations = snap
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::KingActivated { side: Side::Red }))
        .count();
    assert_eq!(activations, 1);

    // Blue's king never woke up.
    let blue_king = towers_of(&game, Side::Blue, TowerKind::King)[0];
    assert!(!game.world().get::<&Tower>(blue_king).unwrap().active);
}

#[test]
fn test_destroyed_king_ends_match() {
    let mut game = Game::new(SimConfig::default());
    let red_king = towers_of(&game, Side::Red, TowerKind::King)[0];
    game.apply_damage(red_king, 1e6);

    let snap = game.tick(DT);
    assert_eq!(snap.winner, Some(Side::Blue));
    assert!(!snap.running);
    assert!(snap.events.contains(&GameEvent::MatchOver { winner: Side::Blue }));
    assert!(!game.place_card(Side::Blue, 100.0, 450.0, 0));

    let tick = game.time().tick;
    let after = game.tick(DT);
    assert_eq!(after.time.tick, tick);
    assert!(after.events.is_empty());
}

#[test]
fn test_troop_reacquires_when_target_dies() {
    let mut game = Game::new(SimConfig::default());
    let knight = game.spawn_troop(Position::new(225.0, 300.0), TroopKind::Knight, Side::Blue);
    let near = game.spawn_troop(Position::new(225.0, 280.0), TroopKind::Skeleton, Side::Red);
    let far = game.spawn_troop(Position::new(225.0, 250.0), TroopKind::Skeleton, Side::Red);

    game.tick(DT);
    assert_eq!(troop(&game, knight).target, Some(near));

    game.apply_damage(near, 1e6);
    game.tick(DT);

    let after = troop(&game, knight);
    assert_eq!(after.target, Some(far));
    assert_eq!(after.initial_attack_timer, 0.0);
    assert!(!game.troops().contains(&near));
}

#[test]
fn test_giant_needs_twelve_hits_on_princess_tower() {
    let mut game = Game::new(SimConfig::default());
    let tower = tower_at(&game, 100.0, 130.0);
    let giant = game.spawn_troop(Position::new(100.0, 150.0), TroopKind::Giant, Side::Blue);
    let giant_damage = troop_stats(TroopKind::Giant).damage;

    let mut last = health(&game, tower).current;
    let mut hits = 0;
    let mut hit_ticks = Vec::new();
    let mut in_range_at = None;

    for _ in 0..(TICK_RATE as usize * 30) {
        game.tick(DT);
        if in_range_at.is_none() && troop(&game, giant).state == TroopState::Attacking {
            in_range_at = Some(game.time().tick);
        }
        let now = health(&game, tower);
        if now.current < last {
            assert!((last - now.current - giant_damage).abs() < 1e-9 || now.dead);
            hits += 1;
            hit_ticks.push(game.time().tick);
            if hits < 12 {
                assert!(!now.dead, "tower fell after only {hits} hits");
            }
        }
        last = now.current;
        if now.dead {
            break;
        }
    }

    assert_eq!(hits, 12);
    assert!(health(&game, tower).dead);
    assert!(!health(&game, giant).dead);

    // Spawned in range: the first strike waits for the slower of the 1.5 s
    // attack timer and the 0.5 s wind-up.
    let stats = troop_stats(TroopKind::Giant);
    let gate = (1.0 / stats.attack_speed).max(1.0 / stats.initial_attack_speed);
    let in_range_at = in_range_at.expect("giant never reached the tower");
    assert!(
        (hit_ticks[0] - in_range_at) as f64 >= gate * TICK_RATE as f64 - 1.0,
        "first strike at tick {} after reaching range at {in_range_at}",
        hit_ticks[0]
    );
    for pair in hit_ticks.windows(2) {
        // 1.5 s between strikes at 60 ticks per second.
        assert!(pair[1] - pair[0] >= 89, "strikes too close: {pair:?}");
    }
}

#[test]
fn test_giant_winds_up_after_walking_into_range() {
    let mut game = Game::new(SimConfig::default());
    let tower = tower_at(&game, 100.0, 130.0);
    let giant = game.spawn_troop(Position::new(100.0, 200.0), TroopKind::Giant, Side::Blue);
    let full = health(&game, tower).current;

    let mut in_range_at = None;
    let mut first_hit = None;
    for _ in 0..(TICK_RATE as usize * 10) {
        game.tick(DT);
        if in_range_at.is_none() && troop(&game, giant).state == TroopState::Attacking {
            in_range_at = Some(game.time().tick);
        }
        if health(&game, tower).current < full {
            first_hit = Some(game.time().tick);
            break;
        }
    }

    // The attack timer filled during the walk, so only the 0.5 s wind-up gates.
    let in_range_at = in_range_at.expect("giant never reached the tower");
    let first_hit = first_hit.expect("giant never struck");
    assert!(in_range_at > 90, "giant should need to walk, reached range at {in_range_at}");
    assert!((29..=31).contains(&(first_hit - in_range_at)), "wind-up took {} ticks", first_hit - in_range_at);
}

#[test]
fn test_tower_locks_first_troop_in_roster_order() {
    let mut game = Game::new(SimConfig::default());
    let tower = tower_at(&game, 100.0, 130.0);
    let first = game.spawn_troop(Position::new(100.0, 270.0), TroopKind::Knight, Side::Blue);
    let _closer = game.spawn_troop(Position::new(100.0, 200.0), TroopKind::Knight, Side::Blue);

    game.tick(DT);
    assert_eq!(game.world().get::<&Tower>(tower).unwrap().target, Some(first));
}

#[test]
fn test_tower_fires_on_cadence() {
    let mut game = Game::new(SimConfig::default());
    game.spawn_troop(Position::new(100.0, 200.0), TroopKind::Giant, Side::Blue);

    let mut fired_at = None;
    for _ in 0..TICK_RATE {
        let snap = game.tick(DT);
        if snap.events.iter().any(|e| matches!(e, GameEvent::ProjectileFired { side: Side::Red, .. })) {
            fired_at = Some(snap.time.tick);
            break;
        }
    }
    // 1.25 shots per second: first shot after 0.8 s.
    let tick = fired_at.expect("tower never fired");
    assert!((47..=49).contains(&tick), "first shot at tick {tick}");
}

#[test]
fn test_ranged_troop_fires_projectiles() {
    let mut game = Game::new(SimConfig::default());
    game.spawn_troop(Position::new(225.0, 330.0), TroopKind::Musketeer, Side::Blue);
    let knight = game.spawn_troop(Position::new(225.0, 250.0), TroopKind::Knight, Side::Red);

    let mut fired = false;
    for _ in 0..(TICK_RATE * 2) {
        let snap = game.tick(DT);
        fired |= snap
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::ProjectileFired { side: Side::Blue, .. }));
    }

    assert!(fired);
    let full = troop_stats(TroopKind::Knight).health;
    let damage = troop_stats(TroopKind::Musketeer).damage;
    assert!(health(&game, knight).current <= full - damage);
}

#[test]
fn test_splash_troop_damages_tower() {
    let mut game = Game::new(SimConfig::default());
    let tower = tower_at(&game, 100.0, 130.0);
    game.spawn_troop(Position::new(100.0, 215.0), TroopKind::BabyDragon, Side::Blue);

    let mut impacts = 0;
    for _ in 0..(TICK_RATE * 2) {
        let snap = game.tick(DT);
        impacts += snap
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::AreaImpact { side: Side::Blue, hits: 1, .. }))
            .count();
    }

    assert_eq!(impacts, 1);
    let full = clash_core::stats::tower_stats(TowerKind::Princess).health;
    let damage = troop_stats(TroopKind::BabyDragon).damage;
    assert!((health(&game, tower).current - (full - damage)).abs() < 1e-9);
}

// ---- Projectiles ----

#[test]
fn test_area_projectile_hits_only_inside_radius() {
    let mut game = Game::new(SimConfig::default());
    let center = Position::new(200.0, 200.0);
    let full = troop_stats(TroopKind::Knight).health;

    let inside: Vec<Entity> = [(200.0, 200.0), (230.0, 200.0), (200.0, 255.0)]
        .into_iter()
        .map(|(x, y)| game.spawn_troop(Position::new(x, y), TroopKind::Knight, Side::Red))
        .collect();
    let outside: Vec<Entity> = [(200.0, 265.0), (270.0, 200.0)]
        .into_iter()
        .map(|(x, y)| game.spawn_troop(Position::new(x, y), TroopKind::Knight, Side::Red))
        .collect();
    let friendly = game.spawn_troop(Position::new(190.0, 190.0), TroopKind::Knight, Side::Blue);

    game.spawn_area_projectile(center, Side::Blue, None, center, FIREBALL_DAMAGE, FIREBALL_SPEED, FIREBALL_RADIUS);
    let snap = game.tick(DT);

    for e in inside {
        assert!((health(&game, e).current - (full - FIREBALL_DAMAGE)).abs() < 1e-9);
    }
    for e in outside {
        assert_eq!(health(&game, e).current, full);
    }
    assert_eq!(health(&game, friendly).current, full);

    assert!(game.projectiles().is_empty());
    assert!(snap.projectiles.is_empty());
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::AreaImpact { hits: 3, side: Side::Blue, .. })));
}

#[test]
fn test_detonate_counts_each_victim_once() {
    let mut world = World::new();
    let mut rosters = crate::roster::Rosters::default();
    let mut events = Vec::new();
    let spawn = |world: &mut World, rosters: &mut crate::roster::Rosters, x, side| {
        crate::world_setup::spawn_troop(world, rosters, Position::new(x, 10.0), TroopKind::Knight, side)
    };
    let victim = spawn(&mut world, &mut rosters, 10.0, Side::Red);
    let ally = spawn(&mut world, &mut rosters, 12.0, Side::Blue);
    let clear = spawn(&mut world, &mut rosters, 30.0, Side::Red);

    let hits = projectile::detonate(
        &mut world,
        &rosters,
        Side::Blue,
        Position::new(10.0, 10.0),
        5.0,
        100.0,
        &mut events,
    );

    let full = troop_stats(TroopKind::Knight).health;
    assert_eq!(hits, 1);
    assert_eq!(world.get::<&Health>(victim).unwrap().current, full - 100.0);
    assert_eq!(world.get::<&Health>(ally).unwrap().current, full);
    assert_eq!(world.get::<&Health>(clear).unwrap().current, full);
    assert!(matches!(events.as_slice(), [GameEvent::AreaImpact { hits: 1, .. }]));
}

#[test]
fn test_area_projectile_does_not_overshoot() {
    let mut game = Game::new(SimConfig::default());
    // One tick at speed 1200 covers 20 units. Starting 27 short leaves 7
    // after the first step, so the second step must land on the point.
    let target = Position::new(225.0, 300.0);
    game.spawn_area_projectile(
        Position::new(225.0, 327.0),
        Side::Blue,
        None,
        target,
        1.0,
        1200.0,
        10.0,
    );

    let first = game.tick(DT);
    assert_eq!(first.projectiles.len(), 1);
    let second = game.tick(DT);
    assert!(second.projectiles.is_empty());
    assert!(second
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::AreaImpact { position, .. } if *position == target)));
}

#[test]
fn test_homing_projectile_despawns_when_target_dies() {
    let mut game = Game::new(SimConfig::default());
    let knight = game.spawn_troop(Position::new(225.0, 300.0), TroopKind::Knight, Side::Red);
    game.spawn_projectile(Position::new(225.0, 500.0), Side::Blue, None, knight, 50.0, 300.0)
        .expect("target has a position");

    game.tick(DT);
    assert_eq!(game.projectiles().len(), 1);

    game.apply_damage(knight, 1e6);
    game.tick(DT);
    assert!(game.projectiles().is_empty());
}

#[test]
fn test_homing_projectile_hits_target() {
    let mut game = Game::new(SimConfig::default());
    let knight = game.spawn_troop(Position::new(225.0, 300.0), TroopKind::Knight, Side::Red);
    game.spawn_projectile(Position::new(225.0, 330.0), Side::Blue, None, knight, 50.0, 300.0);

    for _ in 0..10 {
        game.tick(DT);
    }
    assert!(game.projectiles().is_empty());
    assert_eq!(health(&game, knight).current, troop_stats(TroopKind::Knight).health - 50.0);
}

#[test]
fn test_straight_projectile_hits_at_coarse_dt() {
    let mut game = Game::new(SimConfig::default());
    let giant = game.spawn_troop(Position::new(225.0, 300.0), TroopKind::Giant, Side::Red);
    game.spawn_projectile(
        Position::new(225.0, 400.0),
        Side::Blue,
        None,
        giant,
        50.0,
        TOWER_PROJECTILE_SPEED,
    )
    .expect("target has a position");

    // 60 units per step: the second step starts 40 short and ends 20 past.
    game.tick(0.2);
    assert_eq!(game.projectiles().len(), 1);
    assert_eq!(health(&game, giant).current, troop_stats(TroopKind::Giant).health);

    game.tick(0.2);
    assert!(game.projectiles().is_empty());
    assert_eq!(health(&game, giant).current, troop_stats(TroopKind::Giant).health - 50.0);
}

#[test]
fn test_projectile_leaving_arena_is_despawned() {
    let mut world = World::new();
    let mut rosters = crate::roster::Rosters::default();
    let mut despawn = Vec::new();
    let mut events = Vec::new();
    let knight = crate::world_setup::spawn_troop(
        &mut world,
        &mut rosters,
        Position::new(225.0, 300.0),
        TroopKind::Knight,
        Side::Red,
    );
    // Flying straight down the screen, away from its live target.
    let shot = crate::world_setup::spawn_projectile(
        &mut world,
        &mut rosters,
        Position::new(225.0, 500.0),
        Side::Blue,
        None,
        knight,
        Position::new(225.0, 600.0),
        50.0,
        300.0,
    );

    let limit = ARENA_HEIGHT + OUT_OF_BOUNDS_MARGIN;
    let mut steps = 0;
    while despawn.is_empty() {
        let y = world.get::<&Position>(shot).unwrap().y;
        assert!(y <= limit, "shot still in flight at y={y}");
        projectile::run(&mut world, &rosters, DT, &mut despawn, &mut events);
        steps += 1;
        assert!(steps < 1000, "shot never left the arena");
    }
    assert_eq!(despawn, vec![shot]);
    assert!(world.get::<&Position>(shot).unwrap().y + 300.0 * DT > limit);

    crate::systems::cleanup::run(&mut world, &mut rosters, &mut despawn);
    assert!(rosters.projectiles.is_empty());
    assert!(!world.contains(shot));
    assert!(world.contains(knight));
    assert_eq!(world.get::<&Health>(knight).unwrap().current, troop_stats(TroopKind::Knight).health);
}

#[test]
fn test_despawn_unknown_entity_is_noop() {
    let mut game = Game::new(SimConfig::default());
    let knight = game.spawn_troop(Position::new(225.0, 300.0), TroopKind::Knight, Side::Red);
    game.despawn(knight);
    game.despawn(knight);
    assert!(game.troops().is_empty());
    assert_eq!(game.towers().len(), 6);
}

// ---- Snapshot ----

#[test]
fn test_snapshot_orders_troops_back_to_front() {
    let mut game = Game::new(SimConfig::default());
    for y in [400.0, 250.0, 320.0] {
        game.spawn_troop(Position::new(225.0, y), TroopKind::Knight, Side::Blue);
    }

    let snap = game.snapshot();
    let ys: Vec<f64> = snap.troops.iter().map(|t| t.position.y).collect();
    assert_eq!(ys, vec![250.0, 320.0, 400.0]);
    assert_eq!(snap.towers.len(), 6);
    assert_eq!(snap.players.len(), 2);
    assert_eq!(snap.players[0].hand.len(), HAND_SIZE);
}

// ---- Full matches ----

fn random_match(seed: u64) -> Game {
    Game::with_agents(
        SimConfig { seed, ..Default::default() },
        clash_agents::build(AgentKind::Random, seed),
        clash_agents::build(AgentKind::Random, seed + 1),
    )
}

#[test]
fn test_health_and_elixir_invariants_hold_during_play() {
    let mut game = random_match(7);
    let mut saw_troops = false;

    for _ in 0..(TICK_RATE * 30) {
        let snap = game.tick(DT);
        for t in &snap.troops {
            assert!(t.health > 0.0 && t.health <= t.max_health, "troop health {}", t.health);
            assert_ne!(t.state, TroopState::Dead);
        }
        for t in &snap.towers {
            assert!(t.health >= 0.0 && t.health <= t.max_health);
            assert_eq!(t.dead, t.health == 0.0);
        }
        for p in &snap.players {
            assert!((0.0..=ELIXIR_MAX).contains(&p.elixir));
        }
        saw_troops |= !snap.troops.is_empty();
        if !snap.running {
            break;
        }
    }
    assert!(saw_troops, "random agents never deployed");
}

#[test]
fn test_determinism_same_seed() {
    let mut game_a = random_match(12345);
    let mut game_b = random_match(12345);

    for _ in 0..600 {
        let json_a = serde_json::to_string(&game_a.tick(DT)).unwrap();
        let json_b = serde_json::to_string(&game_b.tick(DT)).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_lane_agents_push_troops_across() {
    let mut game = Game::with_agents(
        SimConfig::default(),
        clash_agents::build(AgentKind::Lane, 0),
        clash_agents::build(AgentKind::Lane, 0),
    );

    let mut spawned = [0usize; 2];
    for _ in 0..(TICK_RATE * 10) {
        let snap = game.tick(DT);
        for e in &snap.events {
            if let GameEvent::TroopSpawned { side, .. } = e {
                spawned[side.index()] += 1;
            }
        }
    }
    assert!(spawned[0] > 0 && spawned[1] > 0);
}

// ---- Observers and commands ----

#[test]
fn test_observer_can_stop_the_game() {
    let mut game = Game::new(SimConfig::default());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);

    game.add_observer(move |dt: f64, snap: &clash_core::state::GameStateSnapshot| {
        log.lock().unwrap().push((snap.time.tick, dt));
        snap.time.tick < 3
    });

    for _ in 0..10 {
        game.tick(DT);
    }

    assert!(!game.is_running());
    assert_eq!(game.time().tick, 3);
    let seen = seen.lock().unwrap();
    assert_eq!(seen.iter().map(|(t, _)| *t).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(seen.iter().all(|(_, dt)| *dt == DT));
}

#[test]
fn test_removed_observer_is_not_called() {
    let mut game = Game::new(SimConfig::default());
    let calls = Arc::new(Mutex::new(0u32));
    let counter = Arc::clone(&calls);

    let id = game.add_observer(move |_: f64, _: &clash_core::state::GameStateSnapshot| {
        *counter.lock().unwrap() += 1;
        true
    });
    game.tick(DT);
    assert!(game.remove_observer(id).is_some());
    assert!(game.remove_observer(id).is_none());
    game.tick(DT);

    assert_eq!(*calls.lock().unwrap(), 1);
    assert!(game.is_running());
}

#[test]
fn test_queued_commands_apply_in_order() {
    let mut game = Game::new(SimConfig::default());
    game.set_elixir(Side::Blue, ELIXIR_MAX);
    game.queue_commands([
        PlayerCommand::PlaceCard {
            side: Side::Blue,
            x: 100.0,
            y: 450.0,
            hand_index: 0,
        },
        PlayerCommand::EndMatch,
        PlayerCommand::PlaceCard {
            side: Side::Blue,
            x: 350.0,
            y: 450.0,
            hand_index: 1,
        },
    ]);

    let snap = game.tick(DT);
    assert!(!snap.running);
    let played: Vec<f64> = snap
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::CardPlayed { position, .. } => Some(position.x),
            _ => None,
        })
        .collect();
    assert_eq!(played, vec![100.0, 350.0]);
}

#[test]
fn test_end_match_command_stops_after_tick() {
    let mut game = Game::new(SimConfig::default());
    game.queue_command(PlayerCommand::EndMatch);

    let snap = game.tick(DT);
    assert!(!snap.running);
    assert_eq!(snap.winner, None);
    assert_eq!(snap.time.tick, 1);
    assert_eq!(game.tick(DT).time.tick, 1);
}
