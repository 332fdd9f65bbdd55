//! Standard power actions.

use crate::actions::{PowerAction, PowerEffect};
use crate::core::ActionId;
use crate::economy::ResourceDelta;

/// The six power actions on the shared board.
#[must_use]
pub fn power_actions() -> Vec<PowerAction> {
    vec![
        PowerAction::new(ActionId::new("ACT1"), 3, PowerEffect::Bridge),
        PowerAction::new(
            ActionId::new("ACT2"),
            3,
            PowerEffect::Resources(ResourceDelta::new().priests(1)),
        ),
        PowerAction::new(
            ActionId::new("ACT3"),
            4,
            PowerEffect::Resources(ResourceDelta::new().workers(2)),
        ),
        PowerAction::new(
            ActionId::new("ACT4"),
            4,
            PowerEffect::Resources(ResourceDelta::new().coins(7)),
        ),
        PowerAction::new(ActionId::new("ACT5"), 4, PowerEffect::Spades(1)),
        PowerAction::new(ActionId::new("ACT6"), 6, PowerEffect::Spades(2)),
    ]
}
