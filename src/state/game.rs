//! Game snapshots.
//!
//! ## GameState
//!
//! One immutable snapshot of a game:
//! - Players, turn order and the active player (by `PlayerId`)
//! - Phase, round and the queue of pending off-turn decisions
//! - Shared pool of tiles, expended action slots, cult board
//! - Terrain changes and bridges layered over the map
//! - Snapshot id, previous snapshot id and the transition log
//!
//! Every collection is an `im` persistent structure, so `clone` is O(1) and
//! a successor snapshot shares everything it did not change.
//!
//! ## Derived data
//!
//! `turn_positions` is rebuilt from `turn_order` whenever a snapshot is
//! assembled and is never written on its own.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::actions::{Action, ActionExecution, OffTurnAction};
use crate::core::{
    ActionId, BridgeId, GameRng, LocationId, PlayerId, PlayerMap, Rules, RulesConfig, SnapshotId,
    TileId,
};
use crate::economy::Conversion;
use crate::entities::{CultBoard, Player, PlayerMetadata, PlayerState, Tile, TileSet};
use crate::error::{ConfigError, RulesError};
use crate::map::{HexMap, Terrain};
use crate::rules::{self, GameResult, Phase};

/// Shared handle to the ruleset of a game.
///
/// Handles compare equal when they hold equal rulesets, whether or not they
/// share an instance. The handle is not serialized; `GameState::decode`
/// reattaches one.
#[derive(Clone)]
pub struct RulesHandle(Arc<Rules>);

impl RulesHandle {
    /// Wrap a ruleset.
    #[must_use]
    pub fn new(rules: Arc<Rules>) -> Self {
        Self(rules)
    }
}

impl Default for RulesHandle {
    fn default() -> Self {
        Self(Arc::new(Rules::new(
            RulesConfig::default(),
            Arc::new(HexMap::default()),
        )))
    }
}

impl PartialEq for RulesHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl std::fmt::Debug for RulesHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RulesHandle(..)")
    }
}

impl std::ops::Deref for RulesHandle {
    type Target = Rules;

    fn deref(&self) -> &Rules {
        &self.0
    }
}

/// Tiles drawn for one game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Setup {
    /// One per round, in round order.
    pub round_tiles: Vec<TileId>,
    /// Bonus tiles in play.
    pub bonus_tiles: Vec<TileId>,
}

impl Setup {
    /// Create a setup from explicit tiles.
    #[must_use]
    pub fn new(round_tiles: Vec<TileId>, bonus_tiles: Vec<TileId>) -> Self {
        Self {
            round_tiles,
            bonus_tiles,
        }
    }

    /// Draw round and bonus tiles at random.
    #[must_use]
    pub fn random(config: &RulesConfig, player_count: usize, rng: &mut GameRng) -> Self {
        let ids = |tiles: &[Tile]| tiles.iter().map(|t| t.id.clone()).collect::<Vec<_>>();

        Self {
            round_tiles: rng.sample(&ids(&config.round_tiles), config.rounds as usize),
            bonus_tiles: rng.sample(
                &ids(&config.bonus_tiles),
                player_count + config.extra_bonus_tiles,
            ),
        }
    }

    /// Check that the setup fits the ruleset and player count.
    pub fn validate(&self, config: &RulesConfig, player_count: usize) -> Result<(), ConfigError> {
        let checks = [
            ("setup round tiles", config.rounds as usize, self.round_tiles.len()),
            ("setup bonus tiles", player_count + 1, self.bonus_tiles.len()),
        ];
        for (table, required, found) in checks {
            if found < required {
                return Err(ConfigError::TableTooSmall {
                    table,
                    required,
                    found,
                });
            }
        }

        for (ids, tiles) in [
            (&self.round_tiles, &config.round_tiles),
            (&self.bonus_tiles, &config.bonus_tiles),
        ] {
            if let Some(unknown) = ids.iter().find(|id| !tiles.iter().any(|t| t.id == **id)) {
                return Err(ConfigError::UnknownTile(unknown.clone()));
            }
        }
        Ok(())
    }
}

/// A decision waiting for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingDecision {
    pub player: PlayerId,
    pub phase: Phase,
}

impl PendingDecision {
    /// Create a pending decision.
    #[must_use]
    pub const fn new(player: PlayerId, phase: Phase) -> Self {
        Self { player, phase }
    }
}

/// A once-per-round action slot.
///
/// Power actions are shared (`owner` is `None`); stronghold and tile
/// actions belong to one player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionSlot {
    pub id: ActionId,
    pub owner: Option<PlayerId>,
}

impl ActionSlot {
    /// A shared slot.
    #[must_use]
    pub const fn shared(id: ActionId) -> Self {
        Self { id, owner: None }
    }

    /// A slot owned by one player.
    #[must_use]
    pub const fn owned(id: ActionId, owner: PlayerId) -> Self {
        Self {
            id,
            owner: Some(owner),
        }
    }
}

/// One accepted transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub description: String,
    pub active_player: PlayerId,
    pub previous_state: SnapshotId,
    pub resulting_state: SnapshotId,
}

/// One immutable snapshot of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    #[serde(skip)]
    pub(crate) rules: RulesHandle,

    pub(crate) players: im::Vector<Player>,
    pub(crate) turn_order: im::Vector<PlayerId>,
    pub(crate) turn_positions: PlayerMap<usize>,
    pub(crate) active_player: PlayerId,
    /// Player whose turn the pending decisions interrupted.
    pub(crate) turn_player: PlayerId,
    pub(crate) phase: Phase,
    pub(crate) round: u32,
    pub(crate) setup: Setup,

    pub(crate) pool: TileSet,
    pub(crate) expended_action_slots: im::OrdSet<ActionSlot>,
    pub(crate) terrain: im::OrdMap<LocationId, Terrain>,
    pub(crate) bridges: im::OrdMap<BridgeId, PlayerId>,
    pub(crate) cult_board: CultBoard,

    pub(crate) decisions: im::Vector<PendingDecision>,
    pub(crate) pass_order: im::Vector<PlayerId>,
    pub(crate) extra_turns: u8,

    pub(crate) snapshot_id: SnapshotId,
    pub(crate) previous_state: Option<SnapshotId>,
    pub(crate) log: im::Vector<LogEntry>,
}

impl GameState {
    /// Start a game.
    ///
    /// Players get stable ids from their initial turn position. With
    /// `randomize_turn_order` the metadata is shuffled first. Without a
    /// `setup`, round and bonus tiles are drawn at random. All randomness
    /// comes from `seed`.
    pub fn create(
        rules: Arc<Rules>,
        player_metadata: Vec<PlayerMetadata>,
        randomize_turn_order: bool,
        setup: Option<Setup>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        let player_count = player_metadata.len();
        rules.config.validate_for(player_count)?;

        let rng = GameRng::new(seed);
        let mut metadata = player_metadata;
        if randomize_turn_order {
            rng.for_context("turn-order").shuffle(&mut metadata);
        }

        let setup = match setup {
            Some(setup) => setup,
            None => Setup::random(&rules.config, player_count, &mut rng.for_context("setup")),
        };
        setup.validate(&rules.config, player_count)?;

        let players: im::Vector<Player> = metadata
            .into_iter()
            .enumerate()
            .map(|(position, m)| Player::create(m, position))
            .collect();
        let turn_order: im::Vector<PlayerId> = PlayerId::all(player_count).collect();

        let mut pool = TileSet {
            bonus_tiles: setup.bonus_tiles.iter().cloned().collect(),
            ..TileSet::new()
        };
        for tile in rules.config.favor_tiles.iter().chain(&rules.config.town_tiles) {
            for _ in 0..tile.copies {
                pool = pool.with_added(tile);
            }
        }

        let decisions = turn_order
            .iter()
            .map(|&p| PendingDecision::new(p, Phase::SelectFaction))
            .collect();
        let first = turn_order[0];

        Ok(Self {
            rules: RulesHandle::new(rules),
            players,
            turn_positions: Self::positions(&turn_order),
            turn_order,
            active_player: first,
            turn_player: first,
            phase: Phase::SelectFaction,
            round: 0,
            setup,
            pool,
            expended_action_slots: im::OrdSet::new(),
            terrain: im::OrdMap::new(),
            bridges: im::OrdMap::new(),
            cult_board: CultBoard::new(),
            decisions,
            pass_order: im::Vector::new(),
            extra_turns: 0,
            snapshot_id: SnapshotId::default(),
            previous_state: None,
            log: im::Vector::new(),
        })
    }

    fn positions(turn_order: &im::Vector<PlayerId>) -> PlayerMap<usize> {
        let mut positions = PlayerMap::filled(turn_order.len(), 0);
        for (position, &player) in turn_order.iter().enumerate() {
            positions[player] = position;
        }
        positions
    }

    /// A copy with a new turn order and its derived positions.
    #[must_use]
    pub(crate) fn with_turn_order(&self, turn_order: im::Vector<PlayerId>) -> Self {
        Self {
            turn_positions: Self::positions(&turn_order),
            turn_order,
            ..self.clone()
        }
    }

    /// A copy with one player replaced.
    #[must_use]
    pub(crate) fn with_player(&self, player: Player) -> Self {
        let mut next = self.clone();
        let index = player.player_id.index();
        next.players.set(index, player);
        next
    }

    /// Replace one player's state in place. Only used while a successor
    /// snapshot is being assembled.
    pub(crate) fn set_player_state(&mut self, player: PlayerId, state: PlayerState) {
        let updated = self.player(player).with_state(state);
        self.players.set(player.index(), updated);
    }

    /// A copy in which `player` owns `bridges`.
    #[must_use]
    pub(crate) fn with_player_bridges(&self, player: PlayerId, bridges: im::Vector<BridgeId>) -> Self {
        let mut state = self.player(player).state.clone();
        state.bridges = bridges;
        let mut next = self.clone();
        next.set_player_state(player, state);
        next
    }

    /// Outcome by victory points once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if self.phase != Phase::Over {
            return None;
        }
        let best = self
            .players
            .iter()
            .map(|p| p.state.resources.victory_points)
            .max()?;
        let winners: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.state.resources.victory_points == best)
            .map(|p| p.player_id)
            .collect();

        Some(match winners.as_slice() {
            [winner] => GameResult::Winner(*winner),
            _ if winners.len() == self.players.len() => GameResult::Draw,
            _ => GameResult::Winners(winners),
        })
    }

    /// Actions the active player may take.
    ///
    /// In `Turn` this is every standard action, every power action not yet
    /// expended this round and every special action the active player has
    /// unlocked and not expended. Every other phase except `Over` has
    /// exactly one off-turn action. `Over` has none.
    ///
    /// # Panics
    ///
    /// Panics if a decision phase has no registered off-turn action.
    #[must_use]
    pub fn get_available_actions(&self) -> Vec<Action> {
        match self.phase {
            Phase::Turn => {
                let player = self.active_player;
                let mut actions = Action::standard();
                actions.extend(
                    self.config()
                        .power_actions
                        .iter()
                        .filter(|a| !self.is_expended(&ActionSlot::shared(a.id.clone())))
                        .cloned()
                        .map(Action::Power),
                );
                actions.extend(
                    self.special_abilities(player)
                        .into_iter()
                        .filter(|a| !self.is_expended(&ActionSlot::owned(a.id.clone(), player)))
                        .map(Action::Special),
                );
                actions
            }
            Phase::Over => Vec::new(),
            phase => {
                let action = OffTurnAction::for_phase(phase)
                    .unwrap_or_else(|| panic!("No off-turn action registered for {phase:?}"));
                vec![Action::OffTurn(action)]
            }
        }
    }

    /// Apply one submission. See `rules::submit`.
    pub fn submit(
        &self,
        execution: &ActionExecution,
        leech_decisions: &[bool],
        conversions_before: &[Conversion],
        conversions_after: &[Conversion],
    ) -> Result<GameState, RulesError> {
        rules::submit(
            self,
            execution,
            leech_decisions,
            conversions_before,
            conversions_after,
        )
    }

    /// Encode the snapshot with `bincode`. The ruleset is not included.
    pub fn encode(&self) -> Result<Vec<u8>, RulesError> {
        bincode::serialize(self).map_err(|e| RulesError::Encoding(e.to_string()))
    }

    /// Decode a snapshot encoded with `encode` and attach a ruleset.
    pub fn decode(rules: Arc<Rules>, bytes: &[u8]) -> Result<Self, RulesError> {
        let mut state: Self =
            bincode::deserialize(bytes).map_err(|e| RulesError::Encoding(e.to_string()))?;
        state.rules = RulesHandle::new(rules);
        Ok(state)
    }

    // === Accessors ===

    /// The ruleset.
    #[must_use]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// The static tables.
    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.rules.config
    }

    /// All players, indexed by `PlayerId`.
    #[must_use]
    pub fn players(&self) -> &im::Vector<Player> {
        &self.players
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// One player.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player.index()]
    }

    /// The player who must act now.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active_player
    }

    /// Current turn order.
    #[must_use]
    pub fn turn_order(&self) -> &im::Vector<PlayerId> {
        &self.turn_order
    }

    /// Position of a player in the current turn order.
    #[must_use]
    pub fn turn_position(&self, player: PlayerId) -> usize {
        self.turn_positions[player]
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current round, 0 during setup.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Tiles drawn for this game.
    #[must_use]
    pub fn setup(&self) -> &Setup {
        &self.setup
    }

    /// Shared tile pool.
    #[must_use]
    pub fn pool(&self) -> &TileSet {
        &self.pool
    }

    /// Action slots used this round.
    #[must_use]
    pub fn expended_action_slots(&self) -> &im::OrdSet<ActionSlot> {
        &self.expended_action_slots
    }

    /// Check if an action slot was used this round.
    #[must_use]
    pub fn is_expended(&self, slot: &ActionSlot) -> bool {
        self.expended_action_slots.contains(slot)
    }

    /// Priest slots on the cult tracks.
    #[must_use]
    pub fn cult_board(&self) -> &CultBoard {
        &self.cult_board
    }

    /// Built bridges and their owners.
    #[must_use]
    pub fn bridges(&self) -> &im::OrdMap<BridgeId, PlayerId> {
        &self.bridges
    }

    /// Decisions waiting to be made, the current one first.
    #[must_use]
    pub fn pending_decisions(&self) -> &im::Vector<PendingDecision> {
        &self.decisions
    }

    /// Players who passed this round, in passing order.
    #[must_use]
    pub fn pass_order(&self) -> &im::Vector<PlayerId> {
        &self.pass_order
    }

    /// Id of this snapshot.
    #[must_use]
    pub fn snapshot_id(&self) -> SnapshotId {
        self.snapshot_id
    }

    /// Id of the snapshot this one was produced from.
    #[must_use]
    pub fn previous_state(&self) -> Option<SnapshotId> {
        self.previous_state
    }

    /// Every accepted transition so far.
    #[must_use]
    pub fn log(&self) -> &im::Vector<LogEntry> {
        &self.log
    }
}
