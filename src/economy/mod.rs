//! Resource economy: bundles, power bowls, conversions and leeching.
//!
//! Pure arithmetic over immutable values. Nothing here knows about turns,
//! phases or the map.

pub mod resource;
pub mod power;
pub mod player_resources;
pub mod conversion;
pub mod leech;

pub use resource::{ResourceDelta, ResourceType};
pub use power::PowerBowlState;
pub use player_resources::{PlayerResourceState, PRIEST_POOL_SIZE};
pub use conversion::{Conversion, ConversionRate, ConversionTable};
pub use leech::{resolve_leech, LeechOpportunity, LeechOutcome};
