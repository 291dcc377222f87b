use waterbill_core::{
    default_towers, validate_roster, FloorSlot, HomeRef, HomeRefError, Month, MonthParseError,
    RosterValidationError, Tower, TowerLayout,
};

#[test]
fn default_roster_has_two_towers_of_sixty_empty_homes() {
    let towers = default_towers();

    assert_eq!(towers.len(), 2);
    assert_eq!(towers[0].id, "a");
    assert_eq!(towers[0].name, "A");
    assert_eq!(towers[1].id, "b");
    for tower in &towers {
        assert_eq!(tower.stories.len(), 15);
        assert!(tower.stories.iter().all(|story| story.homes.len() == 4));
        assert!(tower
            .homes()
            .all(|home| home.residents == 0 && home.days_stayed == 0));
    }
    validate_roster(&towers).unwrap();
}

#[test]
fn generated_ids_and_numbers_follow_floor_and_position() {
    let tower = Tower::generate("A", TowerLayout::default());

    let first = &tower.stories[0].homes[0];
    assert_eq!(first.id, "A-1-1");
    assert_eq!(first.number, "1A");

    let last = &tower.stories[14].homes[3];
    assert_eq!(last.id, "A-15-4");
    assert_eq!(last.number, "15D");
    assert_eq!(tower.stories[14].floor, 15);
}

#[test]
fn serialization_uses_camel_case_wire_fields() {
    let mut tower = Tower::generate(
        "A",
        TowerLayout {
            floors: 1,
            homes_per_floor: 1,
        },
    );
    tower.stories[0].homes[0].residents = 3;
    tower.stories[0].homes[0].days_stayed = 10;

    let json = serde_json::to_value(&tower).unwrap();
    assert_eq!(json["id"], "a");
    assert_eq!(json["name"], "A");
    assert_eq!(json["stories"][0]["floor"], 1);
    let home = &json["stories"][0]["homes"][0];
    assert_eq!(home["id"], "A-1-1");
    assert_eq!(home["number"], "1A");
    assert_eq!(home["residents"], 3);
    assert_eq!(home["daysStayed"], 10);

    let decoded: Tower = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, tower);
}

#[test]
fn negative_counts_do_not_deserialize() {
    let value = serde_json::json!({
        "id": "a",
        "name": "A",
        "stories": [{
            "floor": 1,
            "homes": [{ "id": "A-1-1", "number": "1A", "residents": -1, "daysStayed": 0 }]
        }]
    });
    assert!(serde_json::from_value::<Tower>(value).is_err());
}

#[test]
fn validate_rejects_duplicates_and_bad_floors() {
    assert_eq!(validate_roster(&[]), Err(RosterValidationError::Empty));

    let tower = Tower::generate("A", TowerLayout::default());
    let err = validate_roster(&[tower.clone(), tower.clone()]).unwrap_err();
    assert_eq!(err, RosterValidationError::DuplicateTowerId("a".to_string()));

    let mut shuffled = tower.clone();
    shuffled.stories.swap(0, 1);
    let err = validate_roster(&[shuffled]).unwrap_err();
    assert!(matches!(
        err,
        RosterValidationError::FloorOutOfOrder {
            expected: 1,
            found: 2,
            ..
        }
    ));

    let mut duplicated = tower;
    duplicated.stories[1].homes[0].id = "A-1-1".to_string();
    assert_eq!(
        validate_roster(&[duplicated]).unwrap_err(),
        RosterValidationError::DuplicateHomeId("A-1-1".to_string())
    );
}

#[test]
fn home_ref_parses_id_and_label_forms() {
    let by_id = HomeRef::parse("A-3-2").unwrap();
    assert_eq!(by_id.tower, "A");
    assert_eq!(by_id.floor, 3);
    assert_eq!(by_id.slot, FloorSlot::Index(2));

    let by_label = HomeRef::parse(" b12d ").unwrap();
    assert_eq!(by_label.tower, "b");
    assert_eq!(by_label.floor, 12);
    assert_eq!(by_label.slot, FloorSlot::Letter('D'));

    assert_eq!(HomeRef::parse(""), Err(HomeRefError::Empty));
    assert!(matches!(
        HomeRef::parse("A/1/2"),
        Err(HomeRefError::Malformed(_))
    ));
}

#[test]
fn home_ref_resolves_to_structural_position() {
    let towers = default_towers();

    let location = HomeRef::parse("A-1-2").unwrap().resolve(&towers).unwrap();
    assert_eq!(location.tower_id, "a");
    assert_eq!(location.story_index, 0);
    assert_eq!(location.home_index, 1);

    let location = HomeRef::parse("TB15D").unwrap().resolve(&towers).unwrap();
    assert_eq!(location.tower_id, "b");
    assert_eq!(location.story_index, 14);
    assert_eq!(location.home_index, 3);

    assert_eq!(
        HomeRef::parse("C-1-1").unwrap().resolve(&towers),
        Err(HomeRefError::UnknownTower("C".to_string()))
    );
    assert!(matches!(
        HomeRef::parse("A-16-1").unwrap().resolve(&towers),
        Err(HomeRefError::OutOfRange(_))
    ));
    assert!(matches!(
        HomeRef::parse("A1E").unwrap().resolve(&towers),
        Err(HomeRefError::OutOfRange(_))
    ));
    assert!(matches!(
        HomeRef::parse("A-0-1").unwrap().resolve(&towers),
        Err(HomeRefError::OutOfRange(_))
    ));
}

#[test]
fn month_catalog_matches_fixed_day_counts() {
    let days: Vec<u32> = Month::ALL.iter().map(|month| month.days()).collect();
    assert_eq!(days, [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
    assert_eq!(Month::February.number(), 2);
    assert_eq!(Month::from_number(12), Some(Month::December));
    assert_eq!(Month::from_number(0), None);
    assert_eq!(Month::February.to_string(), "February (28 days)");
    assert_eq!(days.iter().copied().max(), Some(Month::MAX_DAYS));
}

#[test]
fn month_parse_accepts_numbers_names_and_abbreviations() {
    assert_eq!(Month::parse("2"), Ok(Month::February));
    assert_eq!(Month::parse("february"), Ok(Month::February));
    assert_eq!(Month::parse(" SEP "), Ok(Month::September));
    assert_eq!(Month::parse("13"), Err(MonthParseError::OutOfRange(13)));
    assert_eq!(Month::parse(""), Err(MonthParseError::Empty));
    assert_eq!(
        Month::parse("febr"),
        Err(MonthParseError::Unknown("febr".to_string()))
    );
}
