//! Data structures for the court draw: layouts, members, players, matches.

mod court_match;
mod event;
mod layout;
mod member;
mod player;
pub mod text;

pub use court_match::{CourtMatch, MatchId, MatchResource, MatchStatus};
pub use event::{DrawError, EventDraw, EventId};
pub use layout::{select_layout, CourtLayout, PositionSlot, TeamSide};
pub use member::{Gender, Member, MemberId, ShareType, TeamMembership};
pub use player::{format_skill_average, mean_skill, EligiblePlayer, MatchPlayer};
