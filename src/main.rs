//! Kismet headless driver.
//!
//! Runs the entity simulation core without a window or audio device, standing
//! in for every collaborator:
//! - **input**: a seeded autopilot that walks, runs, jumps and attacks
//! - **timing**: jittered frame deltas around the configured frame rate
//! - **maps**: the bundled `assets/maps.json` or a JSON file given with `--maps`
//! - **audio**: cues are drained every frame and logged
//! - **encounters**: an active encounter is resolved after a fixed time
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults when absent), the animation tables and maps
//! 2. Build the world, register observers, load the first map
//! 3. Each frame: pick input and delta, [`step`], drain audio, react to
//!    driver signals (map forward, player removed, encounter timeout)
//! 4. Stop on the quit edge or after `--frames` frames
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --frames 5000 --seed 7
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemState;
use clap::Parser;

use kismet::components::actor::{ActorKind, Health};
use kismet::error::SetupError;
use kismet::events::actor::ActorRemovedEvent;
use kismet::events::audio::AudioCmd;
use kismet::events::combat::{CombatEndedEvent, CombatStartedEvent};
use kismet::events::trigger::TriggerReachedEvent;
use kismet::game::{build_update_schedule, build_world, load_map, step};
use kismet::resources::animationstore::{AnimationManifest, AnimationStore};
use kismet::resources::encounter::Encounter;
use kismet::resources::gameconfig::GameConfig;
use kismet::resources::input::{InputState, RawInput};
use kismet::resources::map::{JsonMapProvider, MapProvider};
use kismet::resources::worldtime::WorldTime;
use kismet::systems::combat::end_encounter;

const BUILTIN_MAPS: &str = include_str!("../assets/maps.json");

/// Milliseconds an encounter stays active before the driver resolves it.
const ENCOUNTER_RESOLVE_MS: u64 = 3000;

/// Kismet entity simulation core, headless
#[derive(Parser)]
#[command(version, about = "Runs the Kismet simulation core headless with an autopilot.")]
struct Cli {
    /// INI configuration file (default: ./config.ini).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON array of map layouts (default: the bundled maps).
    #[arg(long, value_name = "PATH")]
    maps: Option<PathBuf>,

    /// Stop after this many frames.
    #[arg(long, default_value_t = 6000)]
    frames: u64,

    /// Autopilot and frame-jitter seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Sleep each frame's delta so the run takes real time.
    #[arg(long)]
    realtime: bool,
}

/// Flags raised by observers and handled between frames.
#[derive(Resource, Debug, Default)]
struct DriverSignals {
    advance_map: bool,
    player_removed: bool,
}

/// Stand-in for the input collaborator.
struct Autopilot {
    rng: fastrand::Rng,
    held: RawInput,
    hold_left_ms: u32,
    quit: bool,
}

impl Autopilot {
    fn new(rng: fastrand::Rng) -> Self {
        Self {
            rng,
            held: RawInput::default(),
            hold_left_ms: 0,
            quit: false,
        }
    }

    /// Input for the next frame lasting `delta_ms`.
    fn next(&mut self, delta_ms: u32) -> RawInput {
        if self.quit {
            return RawInput {
                quit: true,
                ..Default::default()
            };
        }
        if self.hold_left_ms <= delta_ms {
            self.held = self.pick_direction();
            self.hold_left_ms = self.rng.u32(200..1200);
        } else {
            self.hold_left_ms -= delta_ms;
        }
        let mut input = self.held;
        input.attack = self.rng.u8(..40) == 0;
        input.jump = self.rng.u8(..90) == 0;
        input
    }

    fn pick_direction(&mut self) -> RawInput {
        let (left, right) = match self.rng.u8(..10) {
            0 => (false, false),
            1 => (true, false),
            _ => (false, true),
        };
        RawInput {
            left,
            right,
            run: self.rng.bool(),
            ..Default::default()
        }
    }

    /// Jittered raw frame delta around `budget_ms`, with the odd stall.
    fn frame_delta(&mut self, budget_ms: u32) -> u32 {
        if self.rng.u8(..200) == 0 {
            return budget_ms * 15;
        }
        budget_ms / 2 + self.rng.u32(0..=budget_ms)
    }
}

fn load_maps(path: Option<&Path>) -> Result<JsonMapProvider, SetupError> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| SetupError::Layout(format!("{}: {}", path.display(), e)))?,
        None => BUILTIN_MAPS.to_string(),
    };
    let provider = JsonMapProvider::from_json(&text)?;
    if provider.is_empty() {
        return Err(SetupError::UnknownMap(0));
    }
    Ok(provider)
}

fn register_observers(world: &mut World) {
    world.add_observer(|trigger: On<CombatStartedEvent>| {
        let event = trigger.event();
        log::info!("combat started: {:?} vs {:?}", event.player, event.enemy);
    });
    world.add_observer(|_trigger: On<CombatEndedEvent>| {
        log::info!("combat ended");
    });
    world.add_observer(
        |trigger: On<ActorRemovedEvent>, mut signals: ResMut<DriverSignals>| {
            let event = trigger.event();
            log::info!("{:?} {:?} removed", event.kind, event.entity);
            if event.kind == ActorKind::Player {
                signals.player_removed = true;
            }
        },
    );
    world.add_observer(
        |trigger: On<TriggerReachedEvent>, mut signals: ResMut<DriverSignals>| {
            if trigger.event().name == "exit" {
                signals.advance_map = true;
            }
        },
    );
    world.flush();
}

/// Stand-in for the encounter collaborator: after a while the player wins,
/// the enemy takes lethal damage and the encounter ends.
fn resolve_encounter(world: &mut World) {
    let now = world.resource::<WorldTime>().now_ms;
    let (active_since, enemy) = {
        let encounter = world.resource::<Encounter>();
        if !encounter.is_active() {
            return;
        }
        (encounter.stage_started_ms, encounter.enemy)
    };
    if now.saturating_sub(active_since) < ENCOUNTER_RESOLVE_MS {
        return;
    }
    if let Some(mut health) = enemy.and_then(|e| world.get_mut::<Health>(e)) {
        for _ in 0..health.current {
            health.queue_hit();
        }
    }
    end_encounter(world);
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    if let Err(e) = config.load_from_file() {
        log::warn!("{}; using defaults", e);
    }
    let budget_ms = config.frame_budget_ms() as u32;

    let maps = match load_maps(cli.maps.as_deref()) {
        Ok(maps) => maps,
        Err(e) => {
            eprintln!("Error loading maps: {e}");
            std::process::exit(1);
        }
    };
    let store = match AnimationStore::from_manifest(
        &AnimationManifest::builtin(),
        &AnimationManifest::builtin_catalog(),
    ) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error loading animations: {e}");
            std::process::exit(1);
        }
    };

    let mut world = build_world(config, store);
    world.insert_resource(DriverSignals::default());
    register_observers(&mut world);

    let mut map_index = 0;
    let first = maps.layout(map_index).and_then(|layout| load_map(&mut world, &layout));
    if let Err(e) = first {
        eprintln!("Error loading map {map_index}: {e}");
        std::process::exit(1);
    }

    let mut update = build_update_schedule();
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");
    let mut audio_reader = SystemState::<MessageReader<AudioCmd>>::new(&mut world);

    let seed = cli.seed.unwrap_or_else(|| fastrand::u64(..));
    log::info!("autopilot seed {}", seed);
    let mut autopilot = Autopilot::new(fastrand::Rng::with_seed(seed));

    // --------------- Main loop ---------------
    for _ in 0..cli.frames {
        let delta = autopilot.frame_delta(budget_ms);
        let input = autopilot.next(delta);
        step(&mut world, &mut update, input, delta);

        for AudioCmd::PlayFx { cue } in audio_reader.get_mut(&mut world).read() {
            log::debug!("audio cue '{}'", cue.name());
        }

        if world.resource::<InputState>().quit.just_pressed {
            log::info!("quit requested");
            break;
        }

        resolve_encounter(&mut world);

        let signals = std::mem::take(&mut *world.resource_mut::<DriverSignals>());
        if signals.advance_map {
            map_index += 1;
            if map_index >= maps.len() {
                log::info!("last map cleared");
                autopilot.quit = true;
            } else if let Err(e) =
                maps.layout(map_index).and_then(|layout| load_map(&mut world, &layout))
            {
                log::error!("map {} not loaded: {}", map_index, e);
                map_index -= 1;
            }
        } else if signals.player_removed {
            log::info!("player down, reloading map {}", map_index);
            if let Err(e) = maps.layout(map_index).and_then(|layout| load_map(&mut world, &layout)) {
                log::error!("map {} not reloaded: {}", map_index, e);
                break;
            }
        }

        if cli.realtime {
            std::thread::sleep(Duration::from_millis(u64::from(delta)));
        }
    }

    let frames = world.resource::<WorldTime>().frame_count;
    let encounters = world.resource::<Encounter>().started;
    log::info!("{} frames simulated, {} encounter(s) on the last map", frames, encounters);
}
