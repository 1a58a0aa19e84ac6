//! Integration tests for the event match store: resource sync, manual
//! assignment, removal, picker exclusion, and skill averages.

use court_draw_web::{
    CourtLayout, DrawError, EligiblePlayer, EventDraw, MatchResource, ShareType, TeamSide,
};
use uuid::Uuid;

fn player(name: &str, skill: &str) -> EligiblePlayer {
    EligiblePlayer {
        member_id: Uuid::new_v4(),
        first_name: name.to_string(),
        last_name: "Test".to_string(),
        display_name: format!("{name} Test"),
        team_id: Uuid::new_v4(),
        team_name: "Blue".to_string(),
        skill_label: skill.to_string(),
        contract_share: 100,
        share_type: ShareType::Full,
        is_reserve: false,
    }
}

#[test]
fn sync_creates_one_match_per_resource_with_stable_ids() {
    let mut draw = EventDraw::new(Uuid::new_v4());
    let courts = [Uuid::new_v4(), Uuid::new_v4()];
    let fields = [Uuid::new_v4()];
    draw.sync_matches_to_resources(&courts, &fields);

    assert_eq!(draw.matches.len(), 3);
    assert_eq!(draw.matches[0].match_id, courts[0]);
    assert_eq!(draw.matches[1].match_id, courts[1]);
    assert_eq!(draw.matches[2].match_id, fields[0]);
    for (i, m) in draw.matches.iter().enumerate() {
        assert_eq!(m.match_order, i as u32);
    }
    assert!(matches!(draw.matches[0].resource, MatchResource::Court { .. }));
    assert!(matches!(draw.matches[2].resource, MatchResource::Field { .. }));
}

#[test]
fn match_json_round_trips_with_resource_keys() {
    let layout = CourtLayout::doubles();
    let mut draw = EventDraw::new(Uuid::new_v4());
    let court = Uuid::new_v4();
    let field = Uuid::new_v4();
    draw.sync_matches_to_resources(&[court], &[field]);
    draw.assign_player(court, &player("Ana", "4.0"), TeamSide::A, "a_deuce", &layout)
        .unwrap();

    let json = serde_json::to_value(&draw.matches).unwrap();
    // The persisted shape carries a plain court_id/field_id key per match.
    assert_eq!(json[0]["court_id"], serde_json::json!(court));
    assert!(json[0].get("field_id").is_none());
    assert_eq!(json[1]["field_id"], serde_json::json!(field));
    assert!(json[1].get("court_id").is_none());
    assert_eq!(json[0]["status"], "scheduled");
    assert_eq!(json[0]["match_order"], 0);

    let restored: Vec<court_draw_web::CourtMatch> = serde_json::from_value(json).unwrap();
    assert_eq!(restored, draw.matches);
    assert!(matches!(restored[0].resource, MatchResource::Court { .. }));
    assert!(matches!(restored[1].resource, MatchResource::Field { .. }));
}

#[test]
fn sync_collapses_duplicate_resource_ids() {
    let mut draw = EventDraw::new(Uuid::new_v4());
    let court = Uuid::new_v4();
    let other = Uuid::new_v4();
    // Same id listed twice as a court, and once again as a field.
    draw.sync_matches_to_resources(&[court, court, other], &[court]);

    assert_eq!(draw.matches.len(), 2);
    assert_eq!(draw.matches[0].match_id, court);
    assert_eq!(draw.matches[1].match_id, other);
    assert_eq!(draw.matches[1].match_order, 1);
    assert!(matches!(draw.matches[0].resource, MatchResource::Court { .. }));
}

#[test]
fn sync_is_idempotent_and_preserves_assignments() {
    let layout = CourtLayout::doubles();
    let mut draw = EventDraw::new(Uuid::new_v4());
    let courts = [Uuid::new_v4(), Uuid::new_v4()];
    draw.sync_matches_to_resources(&courts, &[]);

    let ana = player("Ana", "4.0");
    draw.assign_player(courts[0], &ana, TeamSide::A, "a_deuce", &layout)
        .unwrap();
    let before = draw.matches.clone();

    draw.sync_matches_to_resources(&courts, &[]);
    assert_eq!(draw.matches, before);
}

#[test]
fn sync_drops_deselected_and_keeps_the_rest() {
    let layout = CourtLayout::doubles();
    let mut draw = EventDraw::new(Uuid::new_v4());
    let courts = [Uuid::new_v4(), Uuid::new_v4()];
    draw.sync_matches_to_resources(&courts, &[]);

    let ana = player("Ana", "4.0");
    draw.assign_player(courts[1], &ana, TeamSide::B, "b_ad", &layout)
        .unwrap();

    // Deselect court 0, add a new field: court 1's assignment survives.
    let field = Uuid::new_v4();
    draw.sync_matches_to_resources(&courts[1..], &[field]);
    assert_eq!(draw.matches.len(), 2);
    assert_eq!(draw.matches[0].match_id, courts[1]);
    assert_eq!(draw.matches[0].team_b_players.len(), 1);
    assert_eq!(draw.matches[1].match_id, field);
}

#[test]
fn assign_overwrites_slot_occupant() {
    let layout = CourtLayout::doubles();
    let mut draw = EventDraw::new(Uuid::new_v4());
    let court = Uuid::new_v4();
    draw.sync_matches_to_resources(&[court], &[]);

    let ana = player("Ana", "4.0");
    let ben = player("Ben", "3.0");
    draw.assign_player(court, &ana, TeamSide::A, "a_deuce", &layout)
        .unwrap();
    draw.assign_player(court, &ben, TeamSide::A, "a_deuce", &layout)
        .unwrap();

    let team = &draw.matches[0].team_a_players;
    assert_eq!(team.len(), 1);
    assert_eq!(team[0].member_id, ben.member_id);
}

#[test]
fn reassigning_a_member_moves_them_to_the_new_slot() {
    let layout = CourtLayout::doubles();
    let mut draw = EventDraw::new(Uuid::new_v4());
    let court = Uuid::new_v4();
    draw.sync_matches_to_resources(&[court], &[]);

    let ana = player("Ana", "4.0");
    draw.assign_player(court, &ana, TeamSide::A, "a_deuce", &layout)
        .unwrap();
    draw.assign_player(court, &ana, TeamSide::B, "b_ad", &layout)
        .unwrap();

    let m = &draw.matches[0];
    assert!(m.team_a_players.is_empty());
    assert_eq!(m.team_b_players.len(), 1);
    assert_eq!(m.team_b_players[0].position_slot, "b_ad");
}

#[test]
fn assign_rejects_unknown_slot_and_missing_match() {
    let layout = CourtLayout::doubles();
    let mut draw = EventDraw::new(Uuid::new_v4());
    let court = Uuid::new_v4();
    draw.sync_matches_to_resources(&[court], &[]);

    let ana = player("Ana", "4.0");
    // b_ad exists, but not on side A.
    assert!(matches!(
        draw.assign_player(court, &ana, TeamSide::A, "b_ad", &layout),
        Err(DrawError::UnknownSlot { .. })
    ));
    let missing = Uuid::new_v4();
    assert_eq!(
        draw.assign_player(missing, &ana, TeamSide::A, "a_deuce", &layout),
        Err(DrawError::MatchNotFound(missing))
    );
}

#[test]
fn remove_player_clears_both_sides_and_tolerates_absent_members() {
    let layout = CourtLayout::doubles();
    let mut draw = EventDraw::new(Uuid::new_v4());
    let court = Uuid::new_v4();
    draw.sync_matches_to_resources(&[court], &[]);

    let ana = player("Ana", "4.0");
    draw.assign_player(court, &ana, TeamSide::B, "b_deuce", &layout)
        .unwrap();
    draw.remove_player(court, ana.member_id).unwrap();
    assert!(draw.matches[0].team_b_players.is_empty());

    // Removing again is a no-op, not an error.
    draw.remove_player(court, ana.member_id).unwrap();

    // A missing match is an error, though.
    let missing = Uuid::new_v4();
    assert_eq!(
        draw.remove_player(missing, ana.member_id),
        Err(DrawError::MatchNotFound(missing))
    );
}

#[test]
fn assigned_ids_cover_all_matches_with_slot_exception() {
    let layout = CourtLayout::doubles();
    let mut draw = EventDraw::new(Uuid::new_v4());
    let courts = [Uuid::new_v4(), Uuid::new_v4()];
    draw.sync_matches_to_resources(&courts, &[]);

    let ana = player("Ana", "4.0");
    let ben = player("Ben", "3.0");
    draw.assign_player(courts[0], &ana, TeamSide::A, "a_deuce", &layout)
        .unwrap();
    draw.assign_player(courts[1], &ben, TeamSide::B, "b_ad", &layout)
        .unwrap();

    let assigned = draw.assigned_player_ids();
    assert!(assigned.contains(&ana.member_id));
    assert!(assigned.contains(&ben.member_id));

    // Editing Ana's own slot: she stays pickable, Ben stays excluded.
    let picker = draw.assigned_player_ids_excluding_slot(courts[0], TeamSide::A, "a_deuce");
    assert!(!picker.contains(&ana.member_id));
    assert!(picker.contains(&ben.member_id));

    // Editing a different slot: both are excluded.
    let picker = draw.assigned_player_ids_excluding_slot(courts[0], TeamSide::A, "a_ad");
    assert!(picker.contains(&ana.member_id));
    assert!(picker.contains(&ben.member_id));
}

#[test]
fn skill_average_excludes_invalid_labels_and_rounds_to_one_decimal() {
    use court_draw_web::format_skill_average;

    let layout = CourtLayout::doubles();
    let mut draw = EventDraw::new(Uuid::new_v4());
    let court = Uuid::new_v4();
    draw.sync_matches_to_resources(&[court], &[]);

    draw.assign_player(court, &player("Ana", "4.0"), TeamSide::A, "a_deuce", &layout)
        .unwrap();
    draw.assign_player(court, &player("Ben", "3.5"), TeamSide::A, "a_ad", &layout)
        .unwrap();
    draw.assign_player(court, &player("Cora", ""), TeamSide::B, "b_deuce", &layout)
        .unwrap();
    draw.assign_player(court, &player("Dan", "5.0"), TeamSide::B, "b_ad", &layout)
        .unwrap();

    let m = &draw.matches[0];
    let a = m.skill_average(TeamSide::A).unwrap();
    assert!((a - 3.75).abs() < 1e-9);
    assert_eq!(format_skill_average(a), "3.8");
    let b = m.skill_average(TeamSide::B).unwrap();
    assert_eq!(format_skill_average(b), "5.0");
}

#[test]
fn skill_average_is_none_without_valid_entries() {
    let layout = CourtLayout::tennis_singles();
    let mut draw = EventDraw::new(Uuid::new_v4());
    let court = Uuid::new_v4();
    draw.sync_matches_to_resources(&[court], &[]);

    assert_eq!(draw.matches[0].skill_average(TeamSide::A), None);

    draw.assign_player(court, &player("Ana", "0"), TeamSide::A, "a_singles", &layout)
        .unwrap();
    draw.assign_player(court, &player("Ben", "n/a"), TeamSide::B, "b_singles", &layout)
        .unwrap();
    // Zero and unparseable labels contribute no average.
    assert_eq!(draw.matches[0].skill_average(TeamSide::A), None);
    assert_eq!(draw.matches[0].skill_average(TeamSide::B), None);
}
