//! Shared pieces of building, digging and town founding.
//!
//! Several actions transform terrain or put structures on the map: the
//! standard transform-and-build, power and special spade actions, bonus
//! spades, free dwellings and upgrades. They all enumerate transforms the
//! same way and fill a `Step` through the helpers here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::step::Step;
use crate::core::{LocationId, PlayerId};
use crate::economy::{LeechOpportunity, ResourceDelta};
use crate::entities::{EventType, PlayerStructureState, Structure, StructureType};
use crate::map::Terrain;
use crate::rules::Phase;
use crate::state::GameState;

/// Change of one hex's terrain, optionally followed by a dwelling.
///
/// `terrain: None` builds on the hex as it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transform {
    pub location: LocationId,
    pub terrain: Option<Terrain>,
    pub build_dwelling: bool,
}

impl Transform {
    /// Transform without building.
    #[must_use]
    pub const fn to(location: LocationId, terrain: Terrain) -> Self {
        Self {
            location,
            terrain: Some(terrain),
            build_dwelling: false,
        }
    }

    /// Transform and build a dwelling.
    #[must_use]
    pub const fn to_and_build(location: LocationId, terrain: Terrain) -> Self {
        Self {
            location,
            terrain: Some(terrain),
            build_dwelling: true,
        }
    }

    /// Build a dwelling without transforming.
    #[must_use]
    pub const fn build(location: LocationId) -> Self {
        Self {
            location,
            terrain: None,
            build_dwelling: true,
        }
    }
}

/// Which transforms a spade source allows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SpadeUse {
    /// Pay for every spade; building on home terrain without digging is
    /// allowed.
    Paid,
    /// Free spades from an action; at least one spade must be used, extra
    /// spades are paid.
    Free(u8),
    /// Round-end bonus spades; no paid spades and no dwelling.
    Bonus(u8),
}

impl SpadeUse {
    fn free(self) -> u32 {
        match self {
            SpadeUse::Paid => 0,
            SpadeUse::Free(n) | SpadeUse::Bonus(n) => u32::from(n),
        }
    }
}

fn can_build_dwelling(state: &GameState, player: PlayerId) -> bool {
    state
        .player(player)
        .state
        .structures
        .count(StructureType::Dwelling)
        < StructureType::Dwelling.supply()
}

/// Resources a transform costs beyond free spades.
pub(crate) fn transform_cost(
    state: &GameState,
    player: PlayerId,
    transform: &Transform,
    spades: SpadeUse,
) -> ResourceDelta {
    let Some(faction) = state.faction_of(player) else {
        return ResourceDelta::ZERO;
    };
    let distance = spades_needed(state, transform);
    let paid = distance.saturating_sub(spades.free());

    let mut cost = faction.spade_cost(state.player(player).state.dig_level) * paid as i32;
    if transform.build_dwelling {
        cost += faction.dwelling_cost;
    }
    cost
}

fn spades_needed(state: &GameState, transform: &Transform) -> u32 {
    match (state.terrain_at(transform.location), transform.terrain) {
        (Some(current), Some(target)) => current.spades_to(target).unwrap_or(0),
        _ => 0,
    }
}

/// Every legal transform of reachable hexes for `player`.
pub(crate) fn transform_options(
    state: &GameState,
    player: PlayerId,
    spades: SpadeUse,
) -> Vec<Transform> {
    let Some(home) = state.home_terrain(player) else {
        return Vec::new();
    };
    let resources = &state.player(player).state.resources;
    let may_build = can_build_dwelling(state, player) && !matches!(spades, SpadeUse::Bonus(_));

    let mut options = Vec::new();
    for location in state.reachable(player) {
        let Some(current) = state.terrain_at(location) else {
            continue;
        };

        let mut candidates = Vec::new();
        if current == home && spades == SpadeUse::Paid && may_build {
            candidates.push(Transform::build(location));
        }
        for target in Terrain::LAND {
            let Some(distance) = current.spades_to(target) else {
                continue;
            };
            if distance == 0 {
                continue;
            }
            if let SpadeUse::Bonus(free) = spades {
                if distance > u32::from(free) {
                    continue;
                }
            }
            candidates.push(Transform::to(location, target));
            if target == home && may_build {
                candidates.push(Transform::to_and_build(location, target));
            }
        }

        options.extend(candidates.into_iter().filter(|t| {
            resources.can_afford(&transform_cost(state, player, t, spades))
        }));
    }
    options
}

/// Fill `step` with a transform: cost, terrain change, dwelling, dig and
/// build rewards, leech offers and town founding.
pub(crate) fn apply_transform(
    state: &GameState,
    player: PlayerId,
    transform: &Transform,
    spades: SpadeUse,
    step: &mut Step,
) {
    let distance = spades_needed(state, transform);
    step.resource_delta -= transform_cost(state, player, transform, spades);

    let mut events = vec![EventType::Dig; distance as usize];
    if let Some(terrain) = transform.terrain {
        step.terrain_changes.push((transform.location, terrain));
    }
    if transform.build_dwelling {
        events.push(EventType::BuildDwelling);
        place_structure(
            state,
            player,
            Structure::new(StructureType::Dwelling, transform.location),
            step,
        );
    }
    step.resource_delta += event_rewards(state, player, &events);
}

/// Put a structure on the map (new or upgraded) and record the leech
/// offers and town it causes.
pub(crate) fn place_structure(
    state: &GameState,
    player: PlayerId,
    structure: Structure,
    step: &mut Step,
) {
    step.new_structures.push(structure);
    step.new_leech_opportunities
        .extend(leech_offers(state, player, structure.location));

    let structures = state.player(player).state.structures.with_built(&[structure]);
    check_town(state, player, &structures, structure.location, step);
}

/// Power offered to every other player with structures directly
/// connected to `location`.
pub(crate) fn leech_offers(
    state: &GameState,
    builder: PlayerId,
    location: LocationId,
) -> BTreeMap<PlayerId, LeechOpportunity> {
    let mut amounts: BTreeMap<PlayerId, u32> = BTreeMap::new();
    for neighbour in state.connected(location) {
        if let Some((owner, structure_type)) = state.occupant(neighbour) {
            if owner != builder {
                *amounts.entry(owner).or_default() += structure_type.power_value();
            }
        }
    }

    amounts
        .into_iter()
        .filter(|(owner, _)| state.player(*owner).state.resources.power.gain_capacity() > 0)
        .map(|(owner, amount)| (owner, LeechOpportunity::new(builder, amount)))
        .collect()
}

/// Resources paid by held tiles and the round tile for a batch of events.
pub(crate) fn event_rewards(
    state: &GameState,
    player: PlayerId,
    events: &[EventType],
) -> ResourceDelta {
    if events.is_empty() {
        return ResourceDelta::ZERO;
    }
    state
        .held_tiles(player)
        .chain(state.round_tile())
        .filter_map(|t| t.event_trigger.as_ref())
        .map(|trigger| trigger.reward(events))
        .sum()
}

/// Own structures connected to `from` through adjacency and own bridges.
fn component(
    state: &GameState,
    player: PlayerId,
    structures: &PlayerStructureState,
    from: LocationId,
) -> Vec<LocationId> {
    let bridges = &state.player(player).state.bridges;
    let slots = state.rules().map.bridge_slots();

    let mut seen = vec![from];
    let mut frontier = vec![from];
    while let Some(location) = frontier.pop() {
        let mut next = state.rules().map.adjacent(location);
        next.extend(
            slots
                .iter()
                .filter(|s| bridges.contains(&s.id))
                .filter_map(|s| s.other_end(location)),
        );
        for n in next {
            if structures.at(n).is_some() && !seen.contains(&n) {
                seen.push(n);
                frontier.push(n);
            }
        }
    }
    seen.sort_unstable();
    seen
}

/// Record town growth or founding for the group around `location`.
pub(crate) fn check_town(
    state: &GameState,
    player: PlayerId,
    structures: &PlayerStructureState,
    location: LocationId,
    step: &mut Step,
) {
    if structures.at(location).is_none() {
        return;
    }
    let towns = &state.player(player).state.town_locations;
    let group = component(state, player, structures, location);

    if group.iter().any(|l| towns.contains(l)) {
        step.town_locations = group.into_iter().filter(|l| !towns.contains(l)).collect();
        return;
    }

    let config = state.config();
    let modifier: u32 = state.held_tiles(player).map(|t| t.town_power_modifier).sum();
    let power: u32 = group
        .iter()
        .filter_map(|&l| structures.at(l))
        .map(StructureType::power_value)
        .sum();
    let has_sanctuary = group
        .iter()
        .any(|&l| structures.at(l) == Some(StructureType::Sanctuary));
    let size = if has_sanctuary {
        config.town_size_with_sanctuary
    } else {
        config.town_size
    };

    if group.len() >= size && power >= config.town_power.saturating_sub(modifier) {
        step.resource_delta += event_rewards(state, player, &[EventType::FoundTown]);
        step.town_locations = group;
        step.town_founded = true;
        step.new_tile_decisions.push(Phase::SelectTownTile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn test_paid_transform_cost() {
        let state = testing::in_turn(2);
        let player = PlayerId::new(0);
        let location = state.reachable(player)[0];
        let current = state.terrain_at(location).unwrap();
        let home = state.home_terrain(player).unwrap();

        let transform = Transform::to_and_build(location, home);
        let distance = current.spades_to(home).unwrap() as i32;
        let cost = transform_cost(&state, player, &transform, SpadeUse::Paid);

        assert_eq!(cost.workers, distance * 3 + 1);
        assert_eq!(cost.coins, 2);
    }

    #[test]
    fn test_free_spades_cover_distance() {
        let state = testing::in_turn(2);
        let player = PlayerId::new(0);
        let location = state.reachable(player)[0];
        let current = state.terrain_at(location).unwrap();
        let target = Terrain::LAND
            .into_iter()
            .find(|&t| current.spades_to(t) == Some(1))
            .unwrap();

        let cost = transform_cost(&state, player, &Transform::to(location, target), SpadeUse::Free(2));
        assert_eq!(cost, ResourceDelta::ZERO);
    }

    #[test]
    fn test_bonus_spades_never_build() {
        let state = testing::in_turn(2);
        let options = transform_options(&state, PlayerId::new(0), SpadeUse::Bonus(1));

        assert!(!options.is_empty());
        assert!(options.iter().all(|t| !t.build_dwelling && t.terrain.is_some()));
    }

    #[test]
    fn test_leech_offers_sum_neighbour_power() {
        let state = testing::in_turn(2);
        let builder = PlayerId::new(0);
        let neighbour = PlayerId::new(1);

        let location = state
            .reachable(builder)
            .into_iter()
            .find(|&l| state.has_neighbours(builder, l))
            .unwrap();
        let expected: u32 = state
            .connected(location)
            .into_iter()
            .filter_map(|l| state.occupant(l))
            .filter(|(owner, _)| *owner == neighbour)
            .map(|(_, t)| t.power_value())
            .sum();

        let offers = leech_offers(&state, builder, location);
        assert_eq!(offers[&neighbour], LeechOpportunity::new(builder, expected));
        assert!(!offers.contains_key(&builder));
    }
}
