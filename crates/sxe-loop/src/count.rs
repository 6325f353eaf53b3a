//! Overflow-aware combinatorial counting.

/// Greatest common divisor.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Binomial coefficient `C(n, k)`, or `0` when the value does not fit in a
/// `u64`.
///
/// The product is built one factor at a time as `C(n - k + i, i)`; before
/// each multiplication the accumulator and the divisor `i` are reduced by
/// their common factor, so every intermediate value is itself a binomial
/// coefficient no larger than the result. An overflow therefore means the
/// result itself is unrepresentable.
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u64 = 1;
    for i in 1..=k {
        let factor = n - k + i;
        let common = gcd(acc, i);
        let reduced = acc / common;
        let divisor = i / common;
        // `divisor` is coprime with `reduced` and divides `reduced * factor`.
        debug_assert_eq!(factor % divisor, 0);
        match reduced.checked_mul(factor / divisor) {
            Some(next) => acc = next,
            None => return 0,
        }
    }
    acc
}

/// Number of non-decreasing `length`-tuples drawn from `[0, values)`,
/// `C(values + length - 1, length)`, or `0` on overflow.
pub fn multiset(values: u64, length: u64) -> u64 {
    if values == 0 {
        return 0;
    }
    match values.checked_add(length - 1) {
        Some(n) => binomial(n, length),
        None => 0,
    }
}

/// Number of compositions of `sum` into `parts + 1` non-negative parts,
/// `C(sum + parts, parts)`, or `0` on overflow.
pub fn compositions(parts: u64, sum: u64) -> u64 {
    match sum.checked_add(parts) {
        Some(n) => binomial(n, parts),
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_binomials() {
        assert_eq!(binomial(4, 2), 6);
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(0, 0), 1);
        assert_eq!(binomial(3, 4), 0);
        assert_eq!(binomial(10, 7), 120);
    }

    #[test]
    fn pascal_rule_holds() {
        for n in 1..40u64 {
            for k in 1..n {
                assert_eq!(
                    binomial(n, k),
                    binomial(n - 1, k - 1) + binomial(n - 1, k),
                    "n={n} k={k}"
                );
            }
        }
    }

    #[test]
    fn largest_representable_binomials() {
        // C(67, 33) fits in u64, C(68, 34) does not.
        assert_eq!(binomial(67, 33), 14_226_520_737_620_288_370);
        assert_eq!(binomial(68, 34), 0);
        assert_eq!(binomial(u64::MAX, 1), u64::MAX);
        assert_eq!(binomial(u64::MAX, 2), 0);
    }

    #[test]
    fn multiset_and_composition_counts() {
        assert_eq!(multiset(3, 2), 6);
        assert_eq!(multiset(0, 4), 0);
        assert_eq!(compositions(2, 3), 10);
        assert_eq!(compositions(1, 0), 1);
        assert_eq!(compositions(1, u64::MAX), 0);
    }

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(1, 99), 1);
    }
}
