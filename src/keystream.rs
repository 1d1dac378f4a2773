//! Collatz-derived keystream generation.
//!
//! The keystream is built from the parity trail of a Collatz iteration:
//! even steps emit 0 (and halve), odd steps emit 1 (and apply 3c+1).
//! When the value reaches 1 the iteration restarts from the seed, making
//! the stream infinite and fully determined by the seed. This is a
//! publicly reproducible sequence, not a secure PRNG.

/// Generate exactly `length` Collatz parity bits from `seed`.
///
/// Every iteration first checks for 1 (restart from `seed`) and only then
/// classifies parity. The order matters: with `seed == 1` the odd rule
/// fires on the restarted value itself, giving the short cycle 1,0,0.
///
/// Pure function: identical `(seed, length)` always produces the same bits.
pub fn generate(seed: u64, length: usize) -> Vec<u8> {
    let mut bits = Vec::with_capacity(length);
    // 3c+1 on a u64 value can exceed u64::MAX, so iterate in u128.
    let mut current = seed as u128;

    while bits.len() < length {
        if current == 1 {
            current = seed as u128;
        }

        if current % 2 == 0 {
            bits.push(0);
            current /= 2;
        } else {
            bits.push(1);
            current = 3 * current + 1;
        }
    }

    bits
}

/// Pack bits into bytes, most significant bit first.
///
/// A trailing chunk shorter than 8 bits folds only the bits present,
/// leaving them in the low end of the final byte.
pub fn to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit))
        .collect()
}

/// Keystream bytes for `bit_len` bits from `seed`: `ceil(bit_len / 8)` bytes.
pub fn keystream(seed: u64, bit_len: usize) -> Vec<u8> {
    to_bytes(&generate(seed, bit_len))
}

/// Rebalance a bit sequence to contain equal counts of 0 and 1.
///
/// The target length is the input length rounded up to even, half zeros
/// and half ones. Original bits are kept in order while their bucket has
/// room; once a bucket is full the other bit value is substituted.
/// Missing bits are padded at the end. Returns the balanced sequence and
/// the number of bits added.
///
/// Quality-analysis utility only; the encrypt/decrypt pipeline never
/// calls this.
pub fn balance(bits: &[u8]) -> (Vec<u8>, usize) {
    let zeros = bits.iter().filter(|&&b| b == 0).count();
    let ones = bits.len() - zeros;

    if zeros == ones {
        return (bits.to_vec(), 0);
    }

    let target = if bits.len() % 2 == 0 {
        bits.len()
    } else {
        bits.len() + 1
    };
    let half = target / 2;

    let mut balanced = Vec::with_capacity(target);
    let mut zeros_added = 0;
    let mut ones_added = 0;

    for &bit in bits {
        if bit == 0 && zeros_added < half {
            balanced.push(0);
            zeros_added += 1;
        } else if bit == 1 && ones_added < half {
            balanced.push(1);
            ones_added += 1;
        } else if zeros_added < half {
            balanced.push(0);
            zeros_added += 1;
        } else if ones_added < half {
            balanced.push(1);
            ones_added += 1;
        }
    }

    while zeros_added < half {
        balanced.push(0);
        zeros_added += 1;
    }
    while ones_added < half {
        balanced.push(1);
        ones_added += 1;
    }

    let added = balanced.len() - bits.len();
    (balanced, added)
}
