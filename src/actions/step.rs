//! The declarative result of one execution.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::core::{BridgeId, FactionId, LocationId, PlayerId, TileId};
use crate::economy::{LeechOpportunity, ResourceDelta};
use crate::entities::{Cult, CultDelta, Structure};
use crate::map::Terrain;
use crate::rules::Phase;
use crate::state::ActionSlot;

/// What one `ActionExecution` changes, as data.
///
/// Produced by `ActionExecution::compute` and folded into a successor
/// snapshot by the transition engine. Every field describes a change for
/// the active player unless it names another player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Step {
    pub description: String,

    /// Costs (negative) and rewards (positive), event rewards included.
    pub resource_delta: ResourceDelta,
    pub new_structures: SmallVec<[Structure; 1]>,
    pub terrain_changes: SmallVec<[(LocationId, Terrain); 1]>,
    pub new_bridges: SmallVec<[BridgeId; 1]>,
    /// Tiles taken from the pool.
    pub new_tiles: SmallVec<[TileId; 1]>,
    /// Tile handed back to the pool.
    pub returned_tile: Option<TileId>,
    pub cult_delta: CultDelta,
    /// Priest slot occupied. The priest leaves the player's pool for good.
    pub priest_slot: Option<(Cult, u8)>,
    pub dig_levels: u8,
    pub ship_levels: u8,
    pub passed: bool,

    pub new_leech_opportunities: BTreeMap<PlayerId, LeechOpportunity>,
    /// Tile decisions for the active player, in the order they are served.
    pub new_tile_decisions: SmallVec<[Phase; 2]>,
    /// Locations joining the player's towns.
    pub town_locations: Vec<LocationId>,
    pub town_founded: bool,

    pub action_slot_expended: Option<ActionSlot>,
    pub extra_turns: u8,
    pub faction_selected: Option<FactionId>,

    /// Accept flags for the player's pending leech offers.
    pub leech_decisions: Option<Vec<bool>>,
    pub bonus_spades_used: bool,
    pub cultist_steps_used: bool,
    /// Track that receives one of the player's contested keys.
    pub key_choice: Option<Cult>,
}

impl Step {
    /// An empty step with a description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }
}
