//! Game state and round lifecycle
//!
//! One `GameState` lives for the whole session; each round resets it in place.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::{self, Actor, ActorId, ActorKind};
use super::collision::{self, Contact, Outcome, PixelProbe};
use super::explosion::Explosion;
use super::spawner;
use crate::settings::{CollisionStrategy, Settings};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for Enter
    Title,
    /// Active round
    Playing,
    /// Player died; enemies and explosion keep animating
    GameOver,
    /// Quit requested; the front end should exit
    Terminated,
}

/// Discrete things that happened this frame, for audio/HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    RoundStarted,
    Ate { score: u64, size: u32 },
    Died { score: u64 },
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Window size the round is played in
    pub arena: Vec2,
    pub strategy: CollisionStrategy,
    pub angle_variance: f32,
    pub inherit_shape: bool,
    /// Frames per second the session is stepped at
    pub framerate: u32,
    pub score: u64,
    /// Average frames between enemy spawns; shrinks as the score rises
    pub frames_per_spawn: f32,
    /// Frames simulated this round
    pub time_ticks: u64,
    /// Seconds of frame time since the session began
    pub clock: f32,
    pub player: Actor,
    /// Spawn order
    pub enemies: Vec<Actor>,
    pub explosion: Option<Explosion>,
    /// Events raised since the front end last drained them
    pub events: Vec<GameEvent>,
    next_id: ActorId,
}

impl GameState {
    /// Create a session on the title screen
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let arena = settings.arena();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Title,
            arena,
            strategy: settings.collision,
            angle_variance: settings.angle_variance,
            inherit_shape: settings.inherit_shape,
            framerate: settings.framerate,
            score: 0,
            frames_per_spawn: spawner::frames_per_spawn(0),
            time_ticks: 0,
            clock: 0.0,
            player: Actor::player(0, arena),
            enemies: Vec::new(),
            explosion: None,
            events: Vec::new(),
            next_id: 1,
        };
        state.player.id = state.next_entity_id();
        state.player.regenerate();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset everything round-scoped and enter `Playing`
    pub fn start_round(&mut self) {
        self.score = 0;
        self.frames_per_spawn = spawner::frames_per_spawn(0);
        self.time_ticks = 0;
        self.enemies.clear();
        self.explosion = None;
        let id = self.next_entity_id();
        self.player = Actor::player(id, self.arena);
        self.player.regenerate();
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::RoundStarted);
        log::info!("Round started (seed {})", self.seed);
    }

    /// Roll the spawn die and maybe add an enemy
    pub fn maybe_spawn(&mut self) {
        if spawner::should_spawn(&mut self.rng, self.frames_per_spawn) {
            self.spawn_enemy();
        }
    }

    /// Add one enemy at a random edge
    pub fn spawn_enemy(&mut self) {
        let id = self.next_entity_id();
        let enemy = spawner::spawn_enemy(
            &mut self.rng,
            id,
            &self.player,
            self.arena,
            self.angle_variance,
            self.framerate,
        );
        self.enemies.push(enemy);
    }

    /// Size of the player an enemy is colored against, looked up by id
    fn target_size(&self, target: ActorId) -> Option<f32> {
        (self.player.id == target).then(|| self.player.size())
    }

    /// Recolor every enemy for the player's current size
    pub fn refresh_enemy_colors(&mut self) {
        let targets: Vec<Option<f32>> = self
            .enemies
            .iter()
            .map(|e| match e.kind {
                ActorKind::Enemy { target } => self.target_size(target),
                _ => None,
            })
            .collect();
        for (enemy, target_size) in self.enemies.iter_mut().zip(targets) {
            if let Some(player_size) = target_size {
                enemy.shape.fill_color = spawner::enemy_colors(enemy.size(), player_size);
            }
        }
    }

    /// Geometric resolution for this frame
    pub fn resolve_collisions(&mut self) -> Outcome {
        let contact = collision::resolve_geometric(&self.player, &self.enemies);
        self.apply_contact(contact)
    }

    /// Pixel-probe resolution against a frame drawn from this state
    pub fn resolve_with_probe(&mut self, probe: &impl PixelProbe) -> Outcome {
        if self.phase != GamePhase::Playing {
            return Outcome::None;
        }
        self.refresh_enemy_colors();
        let contact = collision::resolve_pixel_probe(&self.player, &self.enemies, probe);
        self.apply_contact(contact)
    }

    /// Carry out a resolver's decision
    pub fn apply_contact(&mut self, contact: Contact) -> Outcome {
        match contact {
            Contact::Eat { enemy } if enemy < self.enemies.len() => {
                let meal = self.enemies.remove(enemy);
                actor::grow(&mut self.player, &meal, self.inherit_shape);
                self.player.regenerate();
                self.score += 1;
                self.frames_per_spawn = spawner::frames_per_spawn(self.score);
                self.refresh_enemy_colors();
                self.events.push(GameEvent::Ate {
                    score: self.score,
                    size: self.player.size() as u32,
                });
                log::debug!(
                    "Ate enemy {} (size {:.1}); player size {}",
                    meal.id,
                    meal.size(),
                    self.player.size()
                );
                Outcome::Eat
            }
            Contact::Eat { enemy } => {
                log::warn!("Ignoring eat of missing enemy index {}", enemy);
                Outcome::None
            }
            Contact::Dead => {
                self.end_round();
                Outcome::Dead
            }
            Contact::None => Outcome::None,
        }
    }

    /// Player died: freeze, burst into particles, enter `GameOver`
    pub fn end_round(&mut self) {
        let origin = self.player.position();
        let color = self.player.shape.fill_color;
        let started_at = self.clock;
        let mut next_id = self.next_id;
        let explosion = Explosion::burst(&mut self.rng, origin, color, started_at, || {
            let id = next_id;
            next_id += 1;
            id
        });
        self.next_id = next_id;
        self.explosion = Some(explosion);
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::Died { score: self.score });
        log::info!(
            "Round over: score {} after {} frames, size {}",
            self.score,
            self.time_ticks,
            self.player.size()
        );
    }

    /// Take queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the player should be drawn
    pub fn player_visible(&self) -> bool {
        matches!(self.phase, GamePhase::Title | GamePhase::Playing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::kinematics::KinematicState;
    use crate::sim::polygon::ShapeState;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed, &Settings::default());
        state.start_round();
        state.drain_events();
        state
    }

    fn place_enemy(state: &mut GameState, offset: Vec2, size: f32) {
        let id = state.next_entity_id();
        let mut enemy = Actor {
            id,
            kind: ActorKind::Enemy { target: state.player.id },
            body: KinematicState::new(state.player.position() + offset, Vec2::ZERO, 1.0),
            shape: ShapeState::new(size, 4, spawner::enemy_colors(size, state.player.size())),
        };
        enemy.regenerate();
        state.enemies.push(enemy);
    }

    #[test]
    fn test_new_state_on_title() {
        let state = GameState::new(1, &Settings::default());
        assert_eq!(state.phase, GamePhase::Title);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.size(), PLAYER_START_SIZE);
    }

    #[test]
    fn test_enemy_speed_follows_configured_framerate() {
        let settings = Settings {
            framerate: 30,
            ..Settings::default()
        };
        let mut state = GameState::new(4, &settings);
        state.start_round();
        for _ in 0..50 {
            state.spawn_enemy();
        }
        for enemy in &state.enemies {
            let px_per_second = enemy.body.speed.length() * 30.0;
            assert!(px_per_second >= ENEMY_SPEED_MIN - 1e-3);
            assert!(px_per_second <= ENEMY_SPEED_MAX + 1e-3);
        }
    }

    #[test]
    fn test_eat_removes_and_grows() {
        let mut state = playing(5);
        place_enemy(&mut state, Vec2::new(12.0, 0.0), 5.0);
        place_enemy(&mut state, Vec2::new(200.0, 0.0), 30.0);
        let far_id = state.enemies[1].id;

        assert_eq!(state.resolve_collisions(), Outcome::Eat);
        assert_eq!(state.player.size(), PLAYER_START_SIZE + 1.0);
        assert_eq!(state.score, 1);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, far_id);
        assert_eq!(state.player.shape.num_sides, 4);
        assert!(matches!(state.drain_events()[..], [GameEvent::Ate { score: 1, size: 11 }]));
        assert!(state.frames_per_spawn < BASE_FRAMES_PER_SPAWN);
    }

    #[test]
    fn test_dead_ends_round() {
        let mut state = playing(5);
        place_enemy(&mut state, Vec2::new(25.0, 0.0), 20.0);
        assert_eq!(state.resolve_collisions(), Outcome::Dead);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.explosion.is_some());
        assert_eq!(state.drain_events(), vec![GameEvent::Died { score: 0 }]);
    }

    #[test]
    fn test_no_contact() {
        let mut state = playing(5);
        place_enemy(&mut state, Vec2::new(31.0, 0.0), 20.0);
        assert_eq!(state.resolve_collisions(), Outcome::None);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_growth_is_monotonic() {
        let mut state = playing(11);
        let mut last = state.player.size();
        for _ in 0..20 {
            place_enemy(&mut state, Vec2::new(3.0, 0.0), 4.0);
            assert_eq!(state.resolve_collisions(), Outcome::Eat);
            assert_eq!(state.player.size(), last + 1.0);
            last = state.player.size();
        }
        assert_eq!(state.score, 20);
    }

    #[test]
    fn test_colors_follow_player_growth() {
        let mut state = playing(2);
        place_enemy(&mut state, Vec2::new(300.0, 0.0), 11.0);
        assert_eq!(state.enemies[0].shape.fill_color.b, BIG_CODE);
        state.player.shape.size = 12.0;
        state.refresh_enemy_colors();
        assert_eq!(state.enemies[0].shape.fill_color.b, SMALL_CODE);
    }

    #[test]
    fn test_stale_eat_index_ignored() {
        let mut state = playing(2);
        assert_eq!(state.apply_contact(Contact::Eat { enemy: 3 }), Outcome::None);
        assert_eq!(state.player.size(), PLAYER_START_SIZE);
    }

    #[test]
    fn test_restart_resets_round() {
        let mut state = playing(8);
        for _ in 0..3 {
            place_enemy(&mut state, Vec2::new(2.0, 0.0), 4.0);
            state.resolve_collisions();
        }
        place_enemy(&mut state, Vec2::new(500.0, 0.0), 4.0);
        place_enemy(&mut state, Vec2::new(1.0, 0.0), 50.0);
        assert_eq!(state.resolve_collisions(), Outcome::Dead);
        assert_eq!(state.score, 3);

        state.start_round();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.size(), PLAYER_START_SIZE);
        assert!(state.enemies.is_empty());
        assert!(state.explosion.is_none());
    }
}
