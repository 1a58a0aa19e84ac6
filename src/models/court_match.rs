//! CourtMatch, MatchResource and MatchStatus: one court or field's
//! assignment container for an event.

use crate::models::layout::TeamSide;
use crate::models::player::{mean_skill, MatchPlayer};
use crate::models::member::MemberId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match. Derived from the underlying court/field id,
/// so it stays stable across resource re-syncs.
pub type MatchId = Uuid;

/// The physical resource a match is played on. Exactly one of court/field,
/// enforced by construction; serializes as a `court_id` or `field_id` key.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchResource {
    Court { court_id: Uuid },
    Field { field_id: Uuid },
}

impl MatchResource {
    pub fn id(&self) -> Uuid {
        match *self {
            MatchResource::Court { court_id } => court_id,
            MatchResource::Field { field_id } => field_id,
        }
    }
}

/// The only status this app produces; a match is an assignment container,
/// not a workflow.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
}

/// One court or field instance for the event, holding the current player
/// assignments for both sides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourtMatch {
    pub match_id: MatchId,
    pub event_id: Uuid,
    #[serde(flatten)]
    pub resource: MatchResource,
    pub status: MatchStatus,
    pub team_a_players: Vec<MatchPlayer>,
    pub team_b_players: Vec<MatchPlayer>,
    pub match_order: u32,
}

impl CourtMatch {
    pub fn new(event_id: Uuid, resource: MatchResource, match_order: u32) -> Self {
        Self {
            match_id: resource.id(),
            event_id,
            resource,
            status: MatchStatus::Scheduled,
            team_a_players: Vec::new(),
            team_b_players: Vec::new(),
            match_order,
        }
    }

    pub fn team_players(&self, side: TeamSide) -> &Vec<MatchPlayer> {
        match side {
            TeamSide::A => &self.team_a_players,
            TeamSide::B => &self.team_b_players,
        }
    }

    pub fn team_players_mut(&mut self, side: TeamSide) -> &mut Vec<MatchPlayer> {
        match side {
            TeamSide::A => &mut self.team_a_players,
            TeamSide::B => &mut self.team_b_players,
        }
    }

    pub fn contains_member(&self, member_id: MemberId) -> bool {
        self.team_a_players
            .iter()
            .chain(self.team_b_players.iter())
            .any(|p| p.member_id == member_id)
    }

    /// Member ids occupying any slot of this match.
    pub fn assigned_member_ids(&self) -> impl Iterator<Item = MemberId> + '_ {
        self.team_a_players
            .iter()
            .chain(self.team_b_players.iter())
            .map(|p| p.member_id)
    }

    /// Remove a member from both sides. A member should only occupy one slot,
    /// removal is unconditional across both anyway.
    pub fn remove_member(&mut self, member_id: MemberId) {
        self.team_a_players.retain(|p| p.member_id != member_id);
        self.team_b_players.retain(|p| p.member_id != member_id);
    }

    pub fn clear_players(&mut self) {
        self.team_a_players.clear();
        self.team_b_players.clear();
    }

    /// Mean numeric skill of one side; `None` when no player on that side
    /// carries a positive numeric skill label.
    pub fn skill_average(&self, side: TeamSide) -> Option<f64> {
        mean_skill(self.team_players(side).iter().map(|p| p.skill_name.as_str()))
    }
}
