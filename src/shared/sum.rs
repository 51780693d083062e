//! Sum of the integers `1..=n`, three ways
//!
//! All three take a `u32` and return a `u64`: in that domain `n * (n + 1)`
//! never overflows, so the implementations agree for every input.

/// Iterative accumulation.
///
/// O(n) time, O(1) space.
pub fn sum_to_n_a(n: u32) -> u64 {
    let mut sum = 0u64;
    for i in 1..=u64::from(n) {
        sum += i;
    }
    sum
}

/// Arithmetic-series closed form `n * (n + 1) / 2`.
///
/// O(1) time and space.
pub fn sum_to_n_b(n: u32) -> u64 {
    let n = u64::from(n);
    n * (n + 1) / 2
}

/// Closed form with the halving done as a right shift.
///
/// O(1) time and space. `n * (n + 1)` is always even, so the shift is exact.
pub fn sum_to_n_c(n: u32) -> u64 {
    let n = u64::from(n);
    (n * (n + 1)) >> 1
}
