//! Entity state model.
//!
//! Immutable values describing what players own: cult positions,
//! structures, tiles and factions, plus the `Player` aggregate.

pub mod cult;
pub mod structure;
pub mod ability;
pub mod tile;
pub mod faction;
pub mod player;

pub use cult::{
    reward_between, Cult, CultAdvance, CultBoard, CultDelta, CultReward, PlayerCultState,
    CULT_TRACK_TOP, PRIEST_SLOT_STEPS,
};
pub use structure::{PlayerStructureState, Structure, StructureType};
pub use ability::{SpecialAbility, SpecialEffect};
pub use tile::{CultBonus, EventTrigger, EventType, PassTrigger, Tile, TileSet, TileType};
pub use faction::Faction;
pub use player::{Player, PlayerMetadata, PlayerState};
