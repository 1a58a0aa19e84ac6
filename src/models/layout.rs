//! Court layouts: named position slots per team side, and match-type selection.

use crate::models::text::contains_ignore_case;
use serde::{Deserialize, Serialize};

/// Which side of the court/field a slot (or assigned player) belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    #[default]
    A,
    B,
}

impl TeamSide {
    pub fn other(self) -> TeamSide {
        match self {
            TeamSide::A => TeamSide::B,
            TeamSide::B => TeamSide::A,
        }
    }
}

/// A named physical position within a layout, tagged to one team side.
/// `id` is the join key between a match player and its court position.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PositionSlot {
    pub id: String,
    pub label: String,
    pub side: TeamSide,
}

impl PositionSlot {
    fn new(id: &str, label: &str, side: TeamSide) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            side,
        }
    }
}

/// An immutable slot template for one match of a given type.
/// Slot order is declaration order; a side's slot count is how many players
/// that side takes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CourtLayout {
    pub name: String,
    pub slots: Vec<PositionSlot>,
}

impl CourtLayout {
    /// Tennis singles: one slot per side.
    pub fn tennis_singles() -> Self {
        Self {
            name: "tennis_singles".to_string(),
            slots: vec![
                PositionSlot::new("a_singles", "Singles", TeamSide::A),
                PositionSlot::new("b_singles", "Singles", TeamSide::B),
            ],
        }
    }

    /// Tennis/pickleball doubles: deuce and ad slots per side.
    pub fn doubles() -> Self {
        Self {
            name: "doubles".to_string(),
            slots: vec![
                PositionSlot::new("a_deuce", "Deuce side", TeamSide::A),
                PositionSlot::new("a_ad", "Ad side", TeamSide::A),
                PositionSlot::new("b_deuce", "Deuce side", TeamSide::B),
                PositionSlot::new("b_ad", "Ad side", TeamSide::B),
            ],
        }
    }

    /// Generic field formation for team sports: three slots per side.
    pub fn generic_field() -> Self {
        Self {
            name: "generic_field".to_string(),
            slots: vec![
                PositionSlot::new("a_left", "Left field", TeamSide::A),
                PositionSlot::new("a_center", "Center field", TeamSide::A),
                PositionSlot::new("a_right", "Right field", TeamSide::A),
                PositionSlot::new("b_left", "Left field", TeamSide::B),
                PositionSlot::new("b_center", "Center field", TeamSide::B),
                PositionSlot::new("b_right", "Right field", TeamSide::B),
            ],
        }
    }

    /// Total number of players one match of this layout can hold.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Slots belonging to one side, in declaration order.
    pub fn side_slots(&self, side: TeamSide) -> Vec<&PositionSlot> {
        self.slots.iter().filter(|s| s.side == side).collect()
    }

    pub fn slots_per_side(&self, side: TeamSide) -> usize {
        self.slots.iter().filter(|s| s.side == side).count()
    }

    /// Look up a slot by id, restricted to one side.
    pub fn slot_on_side(&self, side: TeamSide, slot_id: &str) -> Option<&PositionSlot> {
        self.slots.iter().find(|s| s.side == side && s.id == slot_id)
    }
}

/// Resolve the layout for a match-type display name.
///
/// Case-insensitive substring rules:
/// - contains "singles" -> tennis singles
/// - contains "doubles" -> doubles
/// - contains "tennis", "pickleball" or "racquet" -> doubles (racquet default)
/// - anything else, including no match type at all -> generic field
///
/// Total function: there is no error case, team sports without a racquet
/// classification get the generic field layout.
pub fn select_layout(match_type_name: Option<&str>) -> CourtLayout {
    let name = match match_type_name {
        Some(n) => n,
        None => return CourtLayout::generic_field(),
    };
    if contains_ignore_case(name, "singles") {
        CourtLayout::tennis_singles()
    } else if contains_ignore_case(name, "doubles") {
        CourtLayout::doubles()
    } else if contains_ignore_case(name, "tennis")
        || contains_ignore_case(name, "pickleball")
        || contains_ignore_case(name, "racquet")
    {
        CourtLayout::doubles()
    } else {
        CourtLayout::generic_field()
    }
}
