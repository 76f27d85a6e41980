//! Decimal digit arithmetic shared by the hash functions.
//!
//! Keys may be wider than any machine integer, so every function here works on big-endian digit
//! sequences and reduces modulo the requested number of buckets as it goes.

/// Reduces a big-endian decimal digit sequence modulo `modulus` using Horner's rule.
#[inline]
pub fn digits_mod<I: IntoIterator<Item = u8>>(digits: I, modulus: usize) -> usize {
    debug_assert!(modulus > 0, r#""modulus" must be positive"#);
    let m = modulus as u128;

    digits
        .into_iter()
        .fold(0_u128, |acc, digit| (acc * 10 + digit as u128) % m) as usize
}

/// Computes `10 ** exp % modulus` by repeated squaring.
pub fn pow10_mod(mut exp: usize, modulus: usize) -> usize {
    debug_assert!(modulus > 0, r#""modulus" must be positive"#);
    let m = modulus as u128;

    let mut result = 1 % m;
    let mut base = 10 % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % m;
        }
        base = base * base % m;
        exp >>= 1;
    }
    result as usize
}

/// Squares a big-endian decimal number.
///
/// Returns the digits of the square without leading zeros (`[0]` for zero).
pub fn square_digits(digits: &[u8]) -> Vec<u8> {
    let first_significant = digits
        .iter()
        .position(|&d| d != 0)
        .unwrap_or(digits.len());
    let value = &digits[first_significant..];
    if value.is_empty() {
        return vec![0];
    }

    // Little-endian column sums of the schoolbook multiplication.
    let mut columns = vec![0_u64; 2 * value.len()];
    for (i, &a) in value.iter().rev().enumerate() {
        for (j, &b) in value.iter().rev().enumerate() {
            columns[i + j] += a as u64 * b as u64;
        }
    }

    let mut carry = 0_u64;
    for column in columns.iter_mut() {
        let total = *column + carry;
        *column = total % 10;
        carry = total / 10;
    }
    debug_assert_eq!(carry, 0, "square of an n-digit number has at most 2n digits");

    let mut result: Vec<u8> = columns.into_iter().rev().map(|d| d as u8).collect();
    let first_significant = result.iter().position(|&d| d != 0).unwrap_or(0);
    result.drain(..first_significant);
    result
}

/// Takes the two digits to the left-of-centre of the square of `digits` and reduces them.
///
/// For a square with `len` digits the window starts at `max(0, len / 2 - 1)`.
pub fn mid_square_mod(digits: &[u8], modulus: usize) -> usize {
    let square = square_digits(digits);
    let start = (square.len() / 2).saturating_sub(1);
    let end = (start + 2).min(square.len());
    digits_mod(square[start..end].iter().copied(), modulus)
}

/// Reduces a digit group right-padded with zeros to `group_size` digits.
#[inline]
pub fn padded_group_mod(group: &[u8], group_size: usize, modulus: usize) -> usize {
    debug_assert!(group.len() <= group_size);
    let value = digits_mod(group.iter().copied(), modulus) as u128;
    let shift = pow10_mod(group_size - group.len(), modulus) as u128;
    (value * shift % modulus as u128) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits_of(s: &str) -> Vec<u8> {
        s.bytes().map(|b| b - b'0').collect()
    }

    #[test]
    fn test_digits_mod() {
        assert_eq!(digits_mod(digits_of("1234"), 10), 4);
        assert_eq!(digits_mod(digits_of("0042"), 7), 0);
        assert_eq!(digits_mod(digits_of("9999"), 1), 0);
        // Wider than u128.
        let wide = "9".repeat(60);
        assert_eq!(digits_mod(digits_of(&wide), 10), 9);
        // 10 == -1 (mod 11), so 10^60 - 1 == 0 (mod 11).
        assert_eq!(digits_mod(digits_of(&wide), 11), 0);
        assert_eq!(digits_mod(digits_of(&wide), 7), (10_u128.pow(6) - 1) as usize % 7);
    }

    #[test]
    fn test_pow10_mod() {
        assert_eq!(pow10_mod(0, 7), 1);
        assert_eq!(pow10_mod(0, 1), 0);
        assert_eq!(pow10_mod(3, 7), 1000 % 7);
        assert_eq!(pow10_mod(18, 97), (10_u128.pow(18) % 97) as usize);
    }

    #[test]
    fn test_square_digits() {
        assert_eq!(square_digits(&digits_of("1234")), digits_of("1522756"));
        assert_eq!(square_digits(&digits_of("0012")), digits_of("144"));
        assert_eq!(square_digits(&digits_of("0000")), vec![0]);
        assert_eq!(square_digits(&digits_of("9")), digits_of("81"));
        assert_eq!(square_digits(&digits_of("1000")), digits_of("1000000"));

        let big: u64 = 9_876_543_210_123;
        let expected = (big as u128 * big as u128).to_string();
        assert_eq!(
            square_digits(&digits_of(&big.to_string())),
            digits_of(&expected)
        );
    }

    #[test]
    fn test_mid_square_mod() {
        // 1234^2 = 1522756, window starts at 7 / 2 - 1 = 2 -> "22".
        assert_eq!(mid_square_mod(&digits_of("1234"), 100), 22);
        assert_eq!(mid_square_mod(&digits_of("1234"), 10), 2);
        // 3^2 = 9, single digit window.
        assert_eq!(mid_square_mod(&digits_of("0003"), 100), 9);
        // 5^2 = 25, window starts at 0 -> "25".
        assert_eq!(mid_square_mod(&digits_of("0005"), 100), 25);
        assert_eq!(mid_square_mod(&digits_of("0000"), 10), 0);
    }

    #[test]
    fn test_padded_group_mod() {
        assert_eq!(padded_group_mod(&digits_of("12"), 2, 1000), 12);
        assert_eq!(padded_group_mod(&digits_of("5"), 3, 1000), 500);
        assert_eq!(padded_group_mod(&digits_of("5"), 3, 7), 500 % 7);
    }
}
