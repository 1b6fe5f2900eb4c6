//! Everything the simulation owns for one session

use super::assets::{AssetSender, ModelHandle, PendingAsset, asset_channel};
use super::character::{Character, CharacterParams};
use super::monster::Monster;
use super::platform::{Platform, VisualId};
use super::rig::{CHARACTER_BONES, Rig};
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::Tuning;
use crate::{Millis, vec3};

/// Visual id the renderer uses for the platform mesh
pub const PLATFORM_VISUAL: VisualId = VisualId(1);

/// Loader ends of the two model completion events
#[derive(Debug)]
pub struct Loaders {
    pub character: AssetSender<ModelHandle>,
    pub monster: AssetSender<ModelHandle>,
}

/// Session world: the platform, the entities once loaded, and game state
#[derive(Debug)]
pub struct World {
    pub tuning: Tuning,
    pub platform: Platform,
    pub character: Option<Character>,
    pub monster: Option<Monster>,
    pub state: GameState,
    pending_character: PendingAsset<ModelHandle>,
    pending_monster: PendingAsset<ModelHandle>,
}

impl World {
    /// Create a world whose session clock starts at `now`
    pub fn new(tuning: Tuning, now: Millis) -> (Self, Loaders) {
        let (character_tx, pending_character) = asset_channel();
        let (monster_tx, pending_monster) = asset_channel();
        let platform = Platform::new(
            PLATFORM_VISUAL,
            vec3(tuning.platform_center),
            vec3(tuning.platform_extents),
        );
        let state = GameState::new(tuning.starting_lives, now);
        let world = Self {
            tuning,
            platform,
            character: None,
            monster: None,
            state,
            pending_character,
            pending_monster,
        };
        let loaders = Loaders {
            character: character_tx,
            monster: monster_tx,
        };
        (world, loaders)
    }

    /// Create the entities whose models have arrived since the last tick
    pub fn poll_assets(&mut self, now: Millis) {
        if self.character.is_none() {
            if let Some(model) = self.pending_character.poll() {
                self.spawn_character(&model);
            }
        }
        if self.monster.is_none() {
            if let Some(model) = self.pending_monster.poll() {
                self.spawn_monster(&model, now);
            }
        }
    }

    pub fn spawn_character(&mut self, model: &ModelHandle) {
        let rig = Rig::resolve(model, &CHARACTER_BONES);
        let missing = rig.missing();
        if !missing.is_empty() {
            log::warn!("Character model {} missing bones for {:?}", model.id, missing);
        }
        self.character = Some(Character::new(
            self.tuning.character_spawn(),
            self.tuning.character_extents(),
            CharacterParams::from_tuning(&self.tuning),
            rig,
        ));
        self.state.push_event(GameEvent::CharacterReady);
        log::info!("Character ready (model {})", model.id);
    }

    pub fn spawn_monster(&mut self, model: &ModelHandle, now: Millis) {
        let monster = Monster::from_model(model, &self.tuning, now);
        log::info!(
            "Monster ready (model {}, {} emission points)",
            model.id,
            monster.emission_points.len()
        );
        self.monster = Some(monster);
        self.state.push_event(GameEvent::MonsterReady);
    }

    pub fn phase(&self) -> GamePhase {
        match self.state.outcome() {
            Some(reason) => GamePhase::GameOver(reason),
            None if self.character.is_none() => GamePhase::Loading,
            None => GamePhase::Playing,
        }
    }
}
