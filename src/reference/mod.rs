// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Direct search of a bounded range, for cross-checking the streaming engine.
//!
//! Every integer up to `max` gets a mask of the addition counts k with which it has
//! been reached. Starting from (1, 0), each state walks its whole doubling chain, and
//! every step of the chain queues the power-of-three successor. A chain stops early at
//! the first value already reached with the same k, since the rest of it has been
//! walked before.
//!
//! Memory is one word per integer, so this is only for modest bounds.

use crate::memo::{floor_log2, THREE_POWERS};
use std::collections::VecDeque;
use tracing::debug;

/// The non-multiples of 3 in `1..=max` that are unreachable from 1, in increasing order.
///
/// # Panics
///
/// Panics if `max` does not fit in memory as a `usize` index.
///
/// # Examples
///
/// ```
/// use two_three_search::reference::non_trivial_zeros;
///
/// assert!(non_trivial_zeros(20).is_empty());
/// ```
pub fn non_trivial_zeros(max: u64) -> Vec<u64> {
    let masks = reachability_masks(max);
    let zeros: Vec<u64> = masks
        .iter()
        .enumerate()
        .skip(1)
        .filter(|&(value, &mask)| mask == 0 && value % 3 != 0)
        .map(|(value, _)| value as u64)
        .collect();
    debug!("reference search up to {}: {} zeros", max, zeros.len());
    zeros
}

/// For each integer in `0..=max`, bit k is set when it is reachable with exactly k
/// additions.
pub fn reachability_masks(max: u64) -> Vec<u64> {
    let len = usize::try_from(max)
        .ok()
        .and_then(|max| max.checked_add(1))
        .unwrap_or_else(|| panic!("reference search bound {} is too large", max));
    let mut masks = vec![0u64; len];
    if max == 0 {
        return masks;
    }

    let mut queue = VecDeque::from([(1u64, 0usize)]);
    while let Some((start, k)) = queue.pop_front() {
        // start << steps <= max for every step walked
        let steps = floor_log2(max / start);
        let power = THREE_POWERS.checked_get(k + 1);
        for step in 0..=steps {
            let value = start << step;
            let slot = &mut masks[value as usize];
            if *slot & (1 << k) != 0 {
                break;
            }
            *slot |= 1 << k;

            if let Some(next) = power.and_then(|power| value.checked_add(power)) {
                if next <= max {
                    queue.push_back((next, k + 1));
                }
            }
        }
    }
    masks
}
