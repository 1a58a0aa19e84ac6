//! EligiblePlayer and MatchPlayer data structures, plus skill-average math.

use crate::models::layout::TeamSide;
use crate::models::member::{Member, MemberId, ShareType, TeamMembership};
use crate::models::text::parse_skill;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A roster member that passed the eligibility filter, decorated with the
/// team context used for this event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EligiblePlayer {
    pub member_id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub team_id: Uuid,
    pub team_name: String,
    /// Raw sport-specific skill label; not always numeric.
    pub skill_label: String,
    /// Fraction of participation entitlement, 0-100.
    pub contract_share: u8,
    pub share_type: ShareType,
    /// Reserves stay manually assignable but are excluded from auto-draw.
    pub is_reserve: bool,
}

impl EligiblePlayer {
    /// Decorate a member with one of its team memberships.
    pub fn from_membership(member: &Member, membership: &TeamMembership) -> Self {
        Self {
            member_id: member.member_id,
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            display_name: member.display_name(),
            team_id: membership.team_id,
            team_name: membership.team_name.clone(),
            skill_label: membership.skill_label.clone(),
            contract_share: membership.contract_share,
            share_type: membership.share_type,
            is_reserve: membership.is_reserve(),
        }
    }

    /// Numeric skill rating, when the label parses as one.
    pub fn skill_value(&self) -> Option<f64> {
        parse_skill(&self.skill_label)
    }
}

/// A player placed into one position slot of one match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchPlayer {
    pub member_id: MemberId,
    pub team_side: TeamSide,
    /// Slot id within the match's layout.
    pub position_slot: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub skill_name: String,
}

impl MatchPlayer {
    pub fn from_eligible(player: &EligiblePlayer, side: TeamSide, slot_id: &str) -> Self {
        Self {
            member_id: player.member_id,
            team_side: side,
            position_slot: slot_id.to_string(),
            first_name: player.first_name.clone(),
            last_name: player.last_name.clone(),
            display_name: player.display_name.clone(),
            skill_name: player.skill_label.clone(),
        }
    }
}

/// Mean of the numeric skill labels in `labels`. Unparseable and zero-valued
/// labels are excluded; `None` when no valid entries remain.
pub fn mean_skill<'a>(labels: impl Iterator<Item = &'a str>) -> Option<f64> {
    let values: Vec<f64> = labels.filter_map(parse_skill).filter(|v| *v > 0.0).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// One-decimal rendering of a skill average (3.75 -> "3.8").
pub fn format_skill_average(average: f64) -> String {
    format!("{:.1}", average)
}
