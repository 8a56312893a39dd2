//! Seeded random play checked against the state machine's invariants.
//!
//! Each seed drives random input and frame deltas (including stalls past the
//! delta cap) through the full schedule and checks every frame that:
//! - frame indices stay inside their sequence
//! - attack and hit are never latched together
//! - Death is terminal
//! - aggro is never cleared
//! - health stays in `0..=max`
//! - projectiles never survive outside the world

mod common;

use bevy_ecs::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use common::*;
use kismet::components::actor::{Actor, ActorFlags, Facing, Health, Player};
use kismet::components::animation::{AnimState, Animation};
use kismet::components::mapposition::MapPosition;
use kismet::components::projectile::Projectile;
use kismet::game::{load_map, step};
use kismet::geometry::Rect;
use kismet::resources::animationstore::AnimationStore;
use kismet::resources::encounter::Encounter;
use kismet::resources::input::RawInput;
use kismet::resources::map::MapLayout;
use kismet::systems::combat::end_encounter;

fn arena() -> MapLayout {
    let mut layout = field_layout(
        200,
        vec![
            enemy_at(700, 3, Facing::Left),
            enemy_at(1100, 2, Facing::Right),
            enemy_at(1500, 4, Facing::Left),
        ],
    );
    layout.blockers.push(Rect::new(350, 700, 150, 12));
    layout.blockers.push(Rect::new(1300, 820, 40, 30));
    // Keep the player on this map.
    layout.triggers.clear();
    layout
}

fn random_input(rng: &mut fastrand::Rng) -> RawInput {
    RawInput {
        left: rng.u8(..4) == 0,
        right: rng.u8(..3) == 0,
        run: rng.bool(),
        attack: rng.u8(..15) == 0,
        jump: rng.u8(..30) == 0,
        ..Default::default()
    }
}

fn random_delta(rng: &mut fastrand::Rng) -> u32 {
    if rng.u8(..100) == 0 {
        rng.u32(100..2000)
    } else {
        rng.u32(1..40)
    }
}

#[derive(Default)]
struct History {
    dying: FxHashSet<Entity>,
    aggroed: FxHashSet<Entity>,
}

fn check_invariants(world: &mut World, history: &mut History) {
    let frame_counts: FxHashMap<Entity, (AnimState, usize)> = {
        let mut query = world.query::<(Entity, &Actor, &Animation)>();
        let store = world.resource::<AnimationStore>();
        query
            .iter(world)
            .map(|(entity, actor, animation)| {
                let count = store
                    .sequence(actor.kind, animation.state)
                    .map(|s| s.frame_count())
                    .unwrap_or(0);
                (entity, (animation.state, count))
            })
            .collect()
    };

    let mut query = world.query::<(Entity, &Animation, &ActorFlags, &Health)>();
    for (entity, animation, flags, health) in query.iter(world) {
        let (state, count) = frame_counts[&entity];
        assert!(
            animation.frame_index < count,
            "{:?} frame {} of {} in {:?}",
            entity,
            animation.frame_index,
            count,
            state
        );
        assert!(!(flags.is_attacking && flags.is_hit), "attack and hit latched");
        assert!(health.current >= 0 && health.current <= health.max);

        if history.dying.contains(&entity) {
            assert_eq!(animation.state, AnimState::Death, "left Death");
        }
        if animation.state == AnimState::Death {
            history.dying.insert(entity);
        }
        if history.aggroed.contains(&entity) {
            assert!(flags.is_aggroed, "aggro cleared");
        }
        if flags.is_aggroed {
            history.aggroed.insert(entity);
        }
    }

    let mut projectiles = world.query::<(&Projectile, &MapPosition)>();
    for (_, position) in projectiles.iter(world) {
        assert!(position.rect.left() >= 0 && position.rect.right() <= 1920);
    }
}

#[test]
fn random_play_keeps_invariants() {
    for seed in 0..6 {
        let layout = arena();
        let (mut world, mut schedule) = loaded(&layout);
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut history = History::default();
        let mut active_frames = 0;

        for _ in 0..3000 {
            let input = random_input(&mut rng);
            let delta = random_delta(&mut rng);
            step(&mut world, &mut schedule, input, delta);
            check_invariants(&mut world, &mut history);

            if world.resource::<Encounter>().is_active() {
                active_frames += 1;
                if active_frames > 20 {
                    assert!(end_encounter(&mut world));
                    active_frames = 0;
                }
            }

            let player_alive = world
                .query_filtered::<Entity, With<Player>>()
                .iter(&world)
                .next()
                .is_some();
            if !player_alive {
                load_map(&mut world, &layout).unwrap();
                history = History::default();
            }
        }
    }
}
