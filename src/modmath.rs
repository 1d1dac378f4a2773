//! Modular arithmetic helpers shared by the affine cipher and key tooling.

/// Greatest common divisor. Always non-negative.
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` such that `a*x + b*y == g` where `g = gcd(a, b)`.
/// Iterative, so the recursion depth of the textbook formulation is not
/// a concern for any `i64` input.
pub fn extended_gcd(a: i64, b: i64) -> (i64, i64, i64) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_x, mut x) = (1i64, 0i64);
    let (mut old_y, mut y) = (0i64, 1i64);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_x, x) = (x, old_x - q * x);
        (old_y, y) = (y, old_y - q * y);
    }

    (old_r, old_x, old_y)
}

/// Modular multiplicative inverse of `a` under `modulus`.
///
/// Returns the unique value in `[0, modulus)` such that
/// `a * inverse ≡ 1 (mod modulus)`, or `None` when `gcd(a, modulus) != 1`
/// and no inverse exists. `a` is reduced into `[0, modulus)` first.
pub fn mod_inverse(a: i64, modulus: i64) -> Option<i64> {
    if modulus <= 1 {
        return None;
    }
    let a = a.rem_euclid(modulus);
    let (g, x, _) = extended_gcd(a, modulus);
    if g != 1 {
        return None;
    }
    Some(x.rem_euclid(modulus))
}
