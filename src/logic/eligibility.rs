//! Eligibility filter: compute the candidate pool for an event's
//! team/criteria selection.

use crate::models::{EligiblePlayer, Gender, Member, TeamMembership};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A gender category the event can filter on. The name is carried alongside
/// the id for the legacy fallback (members without category data).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenderCategory {
    pub id: Uuid,
    pub name: String,
}

/// Filter criteria for one event. Every empty collection means
/// "no constraint on this dimension", not "exclude all".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibilityCriteria {
    #[serde(default)]
    pub team_ids: Vec<Uuid>,
    /// Explicit member selection; when set, it overrides all other filters.
    #[serde(default)]
    pub member_ids: Option<Vec<Uuid>>,
    #[serde(default)]
    pub age_group_ids: Vec<Uuid>,
    #[serde(default)]
    pub gender_categories: Vec<GenderCategory>,
    #[serde(default)]
    pub level_ids: Vec<Uuid>,
    /// Position names implied by the selected match types.
    #[serde(default)]
    pub match_type_position_names: Vec<String>,
}

/// Compute the eligible-player pool for `criteria`. Pure function: a
/// conjunction of independently-optional predicates over the roster, then
/// decoration from the first selected team each accepted member belongs to.
/// Members appear at most once even when eligible via several teams.
pub fn eligible_players(roster: &[Member], criteria: &EligibilityCriteria) -> Vec<EligiblePlayer> {
    if let Some(ids) = &criteria.member_ids {
        // Caller picked members directly; filters do not apply.
        return roster
            .iter()
            .filter(|m| ids.contains(&m.member_id))
            .filter_map(|m| decorate(m, criteria))
            .collect();
    }

    roster
        .iter()
        .filter(|m| matches_team_filter(m, criteria))
        .filter(|m| matches_gender_filter(m, criteria))
        .filter(|m| matches_age_filter(m, criteria))
        .filter(|m| matches_level_filter(m, criteria))
        .filter(|m| matches_position_filter(m, criteria))
        .filter_map(|m| decorate(m, criteria))
        .collect()
}

/// Memberships restricted to the selected teams (all of them when no team
/// filter is active).
fn selected_memberships<'a>(
    member: &'a Member,
    criteria: &EligibilityCriteria,
) -> impl Iterator<Item = &'a TeamMembership> {
    let team_ids = criteria.team_ids.clone();
    member
        .memberships
        .iter()
        .filter(move |m| team_ids.is_empty() || team_ids.contains(&m.team_id))
}

fn matches_team_filter(member: &Member, criteria: &EligibilityCriteria) -> bool {
    criteria.team_ids.is_empty()
        || member
            .memberships
            .iter()
            .any(|m| criteria.team_ids.contains(&m.team_id))
}

fn matches_gender_filter(member: &Member, criteria: &EligibilityCriteria) -> bool {
    if criteria.gender_categories.is_empty() {
        return true;
    }
    if !member.gender_category_ids.is_empty() {
        return criteria
            .gender_categories
            .iter()
            .any(|c| member.gender_category_ids.contains(&c.id));
    }
    // Legacy roster rows carry only male/female; map onto category names.
    match member.gender {
        Some(g) => criteria
            .gender_categories
            .iter()
            .any(|c| gender_matches_category_name(g, &c.name)),
        None => false,
    }
}

/// Legacy mapping of a male/female marker onto a named gender category.
pub fn gender_matches_category_name(gender: Gender, category_name: &str) -> bool {
    let name = category_name.to_ascii_lowercase();
    match gender {
        Gender::Female => {
            name.contains("women") || name.contains("female") || name.contains("ladies")
        }
        Gender::Male => {
            (name.contains("men") && !name.contains("women"))
                || (name.contains("male") && !name.contains("female"))
        }
    }
}

fn matches_age_filter(member: &Member, criteria: &EligibilityCriteria) -> bool {
    criteria.age_group_ids.is_empty()
        || member
            .age_group_ids
            .iter()
            .any(|id| criteria.age_group_ids.contains(id))
}

fn matches_level_filter(member: &Member, criteria: &EligibilityCriteria) -> bool {
    criteria.level_ids.is_empty()
        || selected_memberships(member, criteria)
            .filter_map(|m| m.level_id)
            .any(|id| criteria.level_ids.contains(&id))
}

fn matches_position_filter(member: &Member, criteria: &EligibilityCriteria) -> bool {
    criteria.match_type_position_names.is_empty()
        || selected_memberships(member, criteria)
            .flat_map(|m| m.position_names.iter())
            .any(|pos| {
                criteria
                    .match_type_position_names
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(pos))
            })
}

/// Resolve the decoration membership: the first selected team (in selection
/// order) the member belongs to, or the member's first membership when no
/// team filter is active. Members with no memberships cannot be decorated.
fn decorate(member: &Member, criteria: &EligibilityCriteria) -> Option<EligiblePlayer> {
    let membership = if criteria.team_ids.is_empty() {
        member.memberships.first()
    } else {
        criteria
            .team_ids
            .iter()
            .find_map(|&tid| member.membership_for_team(tid))
            .or_else(|| member.memberships.first())
    }?;
    Some(EligiblePlayer::from_membership(member, membership))
}
