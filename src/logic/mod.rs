//! Draw business logic: eligibility filtering and auto-match generation.

mod auto_draw;
mod eligibility;

pub use auto_draw::{generate_auto_matches, run_auto_draw};
pub use eligibility::{
    eligible_players, gender_matches_category_name, EligibilityCriteria, GenderCategory,
};
