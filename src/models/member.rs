//! Roster members: the raw input of the eligibility filter.
//!
//! A member carries per-team associations (roles, positions, level, skill,
//! contract share); the filter turns accepted members into `EligiblePlayer`s
//! decorated from one of those memberships.

use crate::models::text::is_reserve_role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a roster member.
pub type MemberId = Uuid;

/// Legacy gender marker, used only as a fallback when a member carries no
/// gender-category ids.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// Category code for a player's contracted participation share.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareType {
    #[default]
    Full,
    ThreeQuarter,
    Half,
    Quarter,
    Reserve,
    Custom,
}

/// One member's association with one team: roles, playable positions,
/// level, skill label, and contract share for that team.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamMembership {
    pub team_id: Uuid,
    pub team_name: String,
    /// Role names within the team ("Captain", "Reserve", ...).
    #[serde(default)]
    pub role_names: Vec<String>,
    /// Position / match-type names the member plays for this team.
    #[serde(default)]
    pub position_names: Vec<String>,
    #[serde(default)]
    pub level_id: Option<Uuid>,
    /// Sport-specific skill label; may be empty or non-numeric.
    #[serde(default)]
    pub skill_label: String,
    /// Fraction of participation entitlement, 0-100.
    #[serde(default)]
    pub contract_share: u8,
    #[serde(default)]
    pub share_type: ShareType,
}

impl TeamMembership {
    /// A membership is a reserve one when any of its role names marks a reserve.
    pub fn is_reserve(&self) -> bool {
        self.role_names.iter().any(|r| is_reserve_role(r))
    }
}

/// A roster member with all per-team associations and filter attributes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub member_id: MemberId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub gender_category_ids: Vec<Uuid>,
    #[serde(default)]
    pub age_group_ids: Vec<Uuid>,
    #[serde(default)]
    pub memberships: Vec<TeamMembership>,
}

impl Member {
    /// Display name, falling back to "First Last" when none is set.
    pub fn display_name(&self) -> String {
        match &self.display_name {
            Some(n) if !n.trim().is_empty() => n.clone(),
            _ => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// The member's membership in a specific team, if any.
    pub fn membership_for_team(&self, team_id: Uuid) -> Option<&TeamMembership> {
        self.memberships.iter().find(|m| m.team_id == team_id)
    }
}
