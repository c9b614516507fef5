use crate::types::user::User;
use std::collections::BTreeMap;

pub const BASE_SCORE: f64 = 0.5;
pub const CHECKIN_POINTS: f64 = 0.5;
pub const HAS_OKR_POINTS: f64 = 1.0;

/// `(lower inclusive, upper exclusive, bonus)` rows of the movement rule
/// table. Values between rows (25..26, 30..31, 50..51, 80..81, 99..100)
/// match nothing and earn no bonus.
const MOVEMENT_BONUS: [(f64, f64, f64); 7] = [
    (f64::NEG_INFINITY, 10.0, 0.15),
    (10.0, 25.0, 0.25),
    (26.0, 30.0, 0.5),
    (31.0, 50.0, 0.75),
    (51.0, 80.0, 1.25),
    (81.0, 99.0, 1.5),
    (100.0, f64::INFINITY, 2.5),
];

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn movement_bonus(movement: f64) -> f64 {
    MOVEMENT_BONUS
        .iter()
        .find(|(low, high, _)| *low <= movement && movement < *high)
        .map(|(_, _, bonus)| *bonus)
        .unwrap_or(0.0)
}

/// Index of the rule-table row `movement` falls in, `None` inside a gap.
pub fn movement_rank(movement: f64) -> Option<usize> {
    MOVEMENT_BONUS
        .iter()
        .position(|(low, high, _)| *low <= movement && movement < *high)
}

pub fn score(has_okr: bool, checked_in: bool, movement: f64) -> f64 {
    let mut total = BASE_SCORE;
    if checked_in {
        total += CHECKIN_POINTS;
    }
    if has_okr {
        total += HAS_OKR_POINTS;
    }
    total += movement_bonus(movement);
    round2(total)
}

pub fn score_user(user: &User) -> f64 {
    score(user.has_okr, user.checked_in, user.movement)
}

pub fn apply(users: &mut BTreeMap<String, User>) {
    for user in users.values_mut() {
        user.score = score_user(user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonus_below_ten() {
        for movement in [-250.0, -0.01, 0.0, 5.0, 9.99] {
            assert_eq!(movement_bonus(movement), 0.15, "movement {movement}");
        }
    }

    #[test]
    fn bonus_at_and_above_hundred() {
        for movement in [100.0, 100.01, 250.0, 1e9] {
            assert_eq!(movement_bonus(movement), 2.5, "movement {movement}");
        }
    }

    #[test]
    fn bonus_band_edges() {
        assert_eq!(movement_bonus(10.0), 0.25);
        assert_eq!(movement_bonus(24.99), 0.25);
        assert_eq!(movement_bonus(26.0), 0.5);
        assert_eq!(movement_bonus(31.0), 0.75);
        assert_eq!(movement_bonus(51.0), 1.25);
        assert_eq!(movement_bonus(60.0), 1.25);
        assert_eq!(movement_bonus(81.0), 1.5);
        assert_eq!(movement_bonus(98.99), 1.5);
    }

    #[test]
    fn gaps_in_rule_table_earn_nothing() {
        for movement in [25.0, 25.5, 30.0, 30.5, 50.0, 50.5, 80.0, 80.5, 99.0, 99.5] {
            assert_eq!(movement_bonus(movement), 0.0, "movement {movement}");
            assert_eq!(movement_rank(movement), None, "movement {movement}");
        }
    }

    #[test]
    fn nan_movement_earns_nothing() {
        assert_eq!(movement_bonus(f64::NAN), 0.0);
        assert_eq!(score(true, true, f64::NAN), 2.0);
    }

    #[test]
    fn score_adds_all_components() {
        assert_eq!(score(true, true, 60.0), 3.25);
        assert_eq!(score(false, false, 0.0), 0.65);
        assert_eq!(score(true, false, 100.0), 4.0);
        assert_eq!(score(true, true, 100.0), 4.5);
        assert_eq!(score(false, false, 25.0), 0.5);
    }

    #[test]
    fn score_is_monotonic_in_each_signal() {
        let representatives = [0.0, 15.0, 27.0, 40.0, 60.0, 90.0, 150.0];
        for movement in representatives {
            for checked_in in [false, true] {
                assert!(score(true, checked_in, movement) >= score(false, checked_in, movement));
            }
            for has_okr in [false, true] {
                assert!(score(has_okr, true, movement) >= score(has_okr, false, movement));
            }
        }
        for pair in representatives.windows(2) {
            let (lower, higher) = (pair[0], pair[1]);
            assert!(movement_rank(lower) < movement_rank(higher));
            assert!(score(true, true, lower) <= score(true, true, higher));
        }
    }

    #[test]
    fn score_stays_within_bounds() {
        for movement in [-1e6, -5.0, 0.0, 25.0, 45.0, 99.5, 100.0, 1e6] {
            for has_okr in [false, true] {
                for checked_in in [false, true] {
                    let value = score(has_okr, checked_in, movement);
                    assert!((0.5..=5.0).contains(&value), "score {value}");
                }
            }
        }
    }

    #[test]
    fn apply_recomputes_from_scratch() {
        let mut users = BTreeMap::new();
        let mut user = User::new("u1", "Lan");
        user.score = 99.0;
        user.checked_in = true;
        user.movement = 60.0;
        users.insert("u1".to_string(), user);

        apply(&mut users);
        assert_eq!(users["u1"].score, 3.25);
    }
}
