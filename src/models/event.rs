//! EventDraw: the authoritative match list for one event, with manual
//! slot assignment primitives.

use crate::models::court_match::{CourtMatch, MatchId, MatchResource};
use crate::models::layout::{CourtLayout, TeamSide};
use crate::models::member::MemberId;
use crate::models::player::{EligiblePlayer, MatchPlayer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Errors that can occur during draw operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DrawError {
    /// No non-reserve eligible players available for an auto-draw.
    NoEligiblePlayers,
    /// Match not found in the current event.
    MatchNotFound(MatchId),
    /// Position slot does not exist on that side of the current layout.
    UnknownSlot { side: TeamSide, slot_id: String },
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::NoEligiblePlayers => write!(f, "No eligible players for auto-draw"),
            DrawError::MatchNotFound(_) => write!(f, "Match not found"),
            DrawError::UnknownSlot { side, slot_id } => {
                write!(f, "No position slot '{}' on side {:?}", slot_id, side)
            }
        }
    }
}

/// Unique identifier for an event.
pub type EventId = Uuid;

/// The mutable match collection for the active event. The auto-draw engine
/// replaces the whole list; manual assignment edits one slot at a time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventDraw {
    pub event_id: EventId,
    pub matches: Vec<CourtMatch>,
}

impl EventDraw {
    pub fn new(event_id: EventId) -> Self {
        Self {
            event_id,
            matches: Vec::new(),
        }
    }

    /// Reconcile the match list with the selected courts and fields: exactly
    /// one match per selected resource, `match_order` following selection
    /// order. Matches for still-selected resources keep their assignments;
    /// deselected resources' matches are dropped. Idempotent for unchanged
    /// selections. A resource id listed twice (or as both court and field)
    /// only yields one match, keeping `match_id` unique.
    pub fn sync_matches_to_resources(&mut self, court_ids: &[Uuid], field_ids: &[Uuid]) {
        let mut existing = std::mem::take(&mut self.matches);
        let resources = court_ids
            .iter()
            .map(|&id| MatchResource::Court { court_id: id })
            .chain(field_ids.iter().map(|&id| MatchResource::Field { field_id: id }));

        let mut seen = HashSet::new();
        for (i, resource) in resources.filter(|r| seen.insert(r.id())).enumerate() {
            let order = i as u32;
            match existing.iter().position(|m| m.match_id == resource.id()) {
                Some(idx) => {
                    let mut m = existing.swap_remove(idx);
                    m.match_order = order;
                    self.matches.push(m);
                }
                None => self
                    .matches
                    .push(CourtMatch::new(self.event_id, resource, order)),
            }
        }
    }

    pub fn get_match(&self, match_id: MatchId) -> Option<&CourtMatch> {
        self.matches.iter().find(|m| m.match_id == match_id)
    }

    fn get_match_mut(&mut self, match_id: MatchId) -> Result<&mut CourtMatch, DrawError> {
        self.matches
            .iter_mut()
            .find(|m| m.match_id == match_id)
            .ok_or(DrawError::MatchNotFound(match_id))
    }

    /// Write a player into one slot of one match. Any existing occupant of
    /// the slot is evicted first, and any prior assignment of the same member
    /// elsewhere in the match is removed, so reassignment is an overwrite,
    /// never an error.
    pub fn assign_player(
        &mut self,
        match_id: MatchId,
        player: &EligiblePlayer,
        side: TeamSide,
        slot_id: &str,
        layout: &CourtLayout,
    ) -> Result<(), DrawError> {
        if layout.slot_on_side(side, slot_id).is_none() {
            return Err(DrawError::UnknownSlot {
                side,
                slot_id: slot_id.to_string(),
            });
        }
        let m = self.get_match_mut(match_id)?;
        m.remove_member(player.member_id);
        let team = m.team_players_mut(side);
        team.retain(|p| p.position_slot != slot_id);
        team.push(MatchPlayer::from_eligible(player, side, slot_id));
        Ok(())
    }

    /// Remove a member from a match (both sides; absent member is a no-op).
    pub fn remove_player(&mut self, match_id: MatchId, member_id: MemberId) -> Result<(), DrawError> {
        self.get_match_mut(match_id)?.remove_member(member_id);
        Ok(())
    }

    /// Member ids currently occupying any slot in any match.
    pub fn assigned_player_ids(&self) -> HashSet<MemberId> {
        self.matches
            .iter()
            .flat_map(|m| m.assigned_member_ids())
            .collect()
    }

    /// Assigned ids, except the occupant of the slot currently being edited,
    /// so the picker still offers that slot's own player.
    pub fn assigned_player_ids_excluding_slot(
        &self,
        match_id: MatchId,
        side: TeamSide,
        slot_id: &str,
    ) -> HashSet<MemberId> {
        let mut ids = self.assigned_player_ids();
        if let Some(m) = self.get_match(match_id) {
            if let Some(p) = m
                .team_players(side)
                .iter()
                .find(|p| p.position_slot == slot_id)
            {
                ids.remove(&p.member_id);
            }
        }
        ids
    }
}
