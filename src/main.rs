//! Tentacle Dodge headless runner
//!
//! Plays one session with the autopilot on a simulated 60 Hz clock and
//! prints a summary. Usage: `tentacle-dodge [seed] [settings.json]`

use glam::Vec3;

use tentacle_dodge::audio::{AudioManager, LogBackend};
use tentacle_dodge::autopilot::Autopilot;
use tentacle_dodge::consts::FRAME_MS;
use tentacle_dodge::sim::{HudSnapshot, ModelHandle, TerminalReason};
use tentacle_dodge::{Game, HudSink, Settings, TerminationSink, ui};

/// Two simulated minutes
const MAX_FRAMES: u64 = 2 * 60 * 1000 / FRAME_MS;

/// Logs the HUD line whenever it changes
struct LogHud {
    enabled: bool,
    last: String,
}

impl HudSink for LogHud {
    fn refresh(&mut self, hud: &HudSnapshot) {
        if !self.enabled {
            return;
        }
        let line = ui::hud_line(hud);
        if line != self.last {
            log::info!("{}", line);
            self.last = line;
        }
    }
}

struct LogTermination;

impl TerminationSink for LogTermination {
    fn game_over(&mut self, reason: TerminalReason, hud: &HudSnapshot) {
        let why = match reason {
            TerminalReason::LivesDepleted => "out of lives",
            TerminalReason::OutOfBounds => "fell off the platform",
        };
        log::info!("GAME OVER: {} ({})", why, ui::format_time(hud.elapsed_secs));
    }
}

/// Stand-in for the model loader: a rigged character and a five-stalk monster
fn demo_models(settings: &Settings) -> (ModelHandle, ModelHandle) {
    let character = ModelHandle::new(1)
        .with_bone("J_root_04", 0, Vec3::ZERO)
        .with_bone("J_momo_L_026", 1, Vec3::ZERO)
        .with_bone("J_momo_R_031", 2, Vec3::ZERO)
        .with_bone("J_ude_L_017", 3, Vec3::ZERO)
        .with_bone("J_ude_R_022", 4, Vec3::ZERO);

    let mut monster = ModelHandle::new(2);
    for (i, point) in settings.tuning.fallback_emission_points().into_iter().enumerate() {
        monster = monster.with_bone(&format!("Stalk_{:02}", i), 10 + i as u32, point);
    }
    (character, monster)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse().unwrap_or_else(|_| {
            log::warn!("Invalid seed {:?}, using 0", s);
            0
        }),
        None => 0,
    };
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };

    log::info!("Tentacle Dodge (headless) starting with seed {}", seed);

    let audio = AudioManager::with_settings(Some(Box::new(LogBackend)), &settings);
    let hud = LogHud {
        enabled: settings.show_hud,
        last: String::new(),
    };
    let (mut game, loaders) = Game::new(&settings, 0, audio, Box::new(hud), Box::new(LogTermination));

    let (character_model, monster_model) = demo_models(&settings);
    loaders.character.resolve(character_model);
    loaders.monster.resolve(monster_model);

    let mut pilot = Autopilot::new(seed);
    let mut now = 0;
    while !game.is_finished() && game.frames() < MAX_FRAMES {
        now += FRAME_MS;
        let input = pilot.next_input(game.world());
        game.frame(&input, now);
    }

    let state = &game.world().state;
    match state.outcome() {
        Some(reason) => println!(
            "Session ended ({:?}) after {:.1}s: {} volleys, {} hits",
            reason,
            state.elapsed_secs(),
            state.volleys,
            state.hits
        ),
        None => println!(
            "Survived {:.1}s with {} lives: {} volleys, {} hits",
            state.elapsed_secs(),
            state.lives,
            state.volleys,
            state.hits
        ),
    }
}
