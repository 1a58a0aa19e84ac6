//! Court draw web app: library with models and draw logic.

pub mod logic;
pub mod models;

pub use logic::{
    eligible_players, gender_matches_category_name, generate_auto_matches, run_auto_draw,
    EligibilityCriteria, GenderCategory,
};
pub use models::{
    format_skill_average, mean_skill, select_layout, CourtLayout, CourtMatch, DrawError,
    EligiblePlayer, EventDraw, EventId, Gender, MatchId, MatchPlayer, MatchResource, MatchStatus,
    Member, MemberId, PositionSlot, ShareType, TeamMembership, TeamSide,
};
