// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Power-of-three table and floor_log2, checked against big integers.

use num_bigint::BigUint;
use two_three_search::memo::{floor_log2, power_of_three, THREE_POWERS};

#[test]
fn test_powers_match_big_integers() {
    let three = BigUint::from(3u32);
    let mut expected = BigUint::from(1u32);
    for k in 0..THREE_POWERS.len() {
        assert_eq!(BigUint::from(power_of_three(k)), expected, "3^{}", k);
        expected *= &three;
    }
    // The next power is past u64
    assert!(expected > BigUint::from(u64::MAX));
}

#[test]
#[should_panic(expected = "overflow in 3^n")]
fn test_power_past_table_panics() {
    power_of_three(40);
}

#[test]
fn test_floor_log2() {
    let cases = [
        (0u64, 0u32),
        (1, 0),
        (2, 1),
        (3, 1),
        (4, 2),
        (1023, 9),
        (1024, 10),
        (1 << 63, 63),
        (u64::MAX, 63),
    ];
    for (n, expected) in cases {
        assert_eq!(floor_log2(n), expected, "floor_log2({})", n);
    }
}
