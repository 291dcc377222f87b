use waterbill_core::{
    allocate, calculate_bill, default_towers, parse_amount, total_resident_days, AllocationError,
    AllocationInput,
};

fn input(key: &'static str, residents: u32, days_stayed: u32) -> AllocationInput<&'static str> {
    AllocationInput {
        key,
        residents,
        days_stayed,
    }
}

fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn shares_are_proportional_to_resident_days() {
    let inputs = [input("a", 2, 30), input("b", 1, 30), input("c", 3, 10)];
    let shares = allocate(&inputs, 1200.0).unwrap();

    // 60 + 30 + 30 = 120 resident-days
    assert_eq!(shares.len(), 3);
    assert_eq!(shares[0].key, "a");
    assert_close(shares[0].share, 600.0);
    assert_close(shares[1].share, 300.0);
    assert_close(shares[2].share, 300.0);
}

#[test]
fn shares_sum_to_total_amount() {
    let inputs: Vec<AllocationInput<usize>> = (0..120)
        .map(|i| AllocationInput {
            key: i,
            residents: (i % 5) as u32,
            days_stayed: (i % 31) as u32,
        })
        .collect();

    for total in [1.0, 333.33, 2800.0, 98_765.43] {
        let shares = allocate(&inputs, total).unwrap();
        let sum: f64 = shares.iter().map(|allocation| allocation.share).sum();
        assert_close(sum, total);
    }
}

#[test]
fn zero_residents_always_get_zero_share() {
    let inputs = [input("empty", 0, 31), input("full", 4, 31)];
    let shares = allocate(&inputs, 500.0).unwrap();

    assert_eq!(shares[0].share, 0.0);
    assert_close(shares[1].share, 500.0);
}

#[test]
fn permuting_inputs_permutes_outputs() {
    let forward = [input("a", 2, 28), input("b", 1, 14), input("c", 5, 3)];
    let reversed = [forward[2].clone(), forward[1].clone(), forward[0].clone()];

    let forward_shares = allocate(&forward, 777.0).unwrap();
    let reversed_shares = allocate(&reversed, 777.0).unwrap();

    let keys: Vec<&str> = reversed_shares.iter().map(|a| a.key).collect();
    assert_eq!(keys, ["c", "b", "a"]);
    for allocation in &forward_shares {
        let twin = reversed_shares
            .iter()
            .find(|other| other.key == allocation.key)
            .unwrap();
        assert_eq!(twin.share, allocation.share);
    }
}

#[test]
fn zero_total_resident_days_is_rejected() {
    let inputs = [input("a", 0, 30), input("b", 3, 0)];
    assert_eq!(
        allocate(&inputs, 500.0).unwrap_err(),
        AllocationError::ZeroResidentDays
    );
    assert_eq!(
        allocate::<&str>(&[], 500.0).unwrap_err(),
        AllocationError::ZeroResidentDays
    );
}

#[test]
fn invalid_amounts_are_rejected_before_division() {
    let inputs = [input("a", 1, 1)];
    for amount in [0.0, -10.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            allocate(&inputs, amount),
            Err(AllocationError::InvalidAmount(_))
        ));
    }
}

#[test]
fn parse_amount_accepts_only_positive_finite_numbers() {
    assert_eq!(parse_amount("2800"), Some(2800.0));
    assert_eq!(parse_amount(" 12.5 "), Some(12.5));
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount("0"), None);
    assert_eq!(parse_amount("-5"), None);
    assert_eq!(parse_amount("NaN"), None);
    assert_eq!(parse_amount("inf"), None);
}

#[test]
fn single_occupied_home_takes_the_whole_bill() {
    let mut towers = default_towers();
    towers[1].stories[4].homes[2].residents = 3;
    towers[1].stories[4].homes[2].days_stayed = 10;

    let results = calculate_bill(&towers, 300.0).unwrap();
    assert_eq!(results.len(), 120);

    let occupied = results
        .iter()
        .find(|calc| calc.tower_id == "b" && calc.home_number == "5C")
        .unwrap();
    assert_eq!(occupied.floor, 5);
    assert_eq!(occupied.tower_name, "B");
    assert_close(occupied.share, 300.0);
    assert!(results
        .iter()
        .filter(|calc| calc.home_number != "5C" || calc.tower_id != "b")
        .all(|calc| calc.share == 0.0));
}

#[test]
fn calculate_bill_preserves_roster_order_and_tags() {
    let mut towers = default_towers();
    towers[0].stories[0].homes[0].residents = 1;
    towers[0].stories[0].homes[0].days_stayed = 1;

    let results = calculate_bill(&towers, 10.0).unwrap();
    assert_eq!(results[0].home_number, "1A");
    assert_eq!(results[3].home_number, "1D");
    assert_eq!(results[4].home_number, "2A");
    assert_eq!(results[60].tower_id, "b");
    assert_eq!(results[60].home_number, "1A");
    assert_eq!(results[0].label(), "TA1A");
}

#[test]
fn empty_home_reports_zero_display_days() {
    let mut towers = default_towers();
    towers[0].stories[0].homes[0].residents = 2;
    towers[0].stories[0].homes[0].days_stayed = 30;
    towers[0].stories[0].homes[1].days_stayed = 30;

    let results = calculate_bill(&towers, 90.0).unwrap();
    assert_eq!(results[1].days_stayed, 30);
    assert_eq!(results[1].display_days(), 0);
    assert_eq!(results[0].display_days(), 30);
}

#[test]
fn extreme_resident_days_still_sum_to_total() {
    let inputs = [
        input("a", u32::MAX, u32::MAX),
        input("b", u32::MAX, u32::MAX),
    ];
    let shares = allocate(&inputs, 100.0).unwrap();

    assert_close(shares[0].share, 50.0);
    assert_close(shares[1].share, 50.0);
    let sum: f64 = shares.iter().map(|allocation| allocation.share).sum();
    assert_close(sum, 100.0);
}

#[test]
fn extreme_roster_values_total_without_wrapping() {
    let mut towers = default_towers();
    for home in &mut towers[0].stories[0].homes[..2] {
        home.residents = u32::MAX;
        home.days_stayed = u32::MAX;
    }

    let per_home = u128::from(u32::MAX) * u128::from(u32::MAX);
    assert_eq!(total_resident_days(&towers), per_home * 2);

    let results = calculate_bill(&towers, 100.0).unwrap();
    let sum: f64 = results.iter().map(|calc| calc.share).sum();
    assert_close(sum, 100.0);
}
