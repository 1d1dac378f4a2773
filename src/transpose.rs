//! Block transposition keyed by a digit permutation.
//!
//! The key "3142" means: stable-sort the digit positions by digit value
//! to obtain each source position's destination slot. Blocks are
//! `key.len()` bytes; the final encrypt block is zero-padded, so callers
//! must track the original plaintext length to strip padding after the
//! full pipeline is undone.

use crate::keyset::KeySet;

/// Destination slot for each source position within a block.
///
/// `order[i]` is the rank of digit `i` in a stable sort of the key's
/// digits, so "3142" yields `[2, 0, 3, 1]`. Recomputed on every call;
/// nothing is cached that could desync from the key.
pub fn derive_order(keyset: &KeySet) -> Vec<usize> {
    // Digits are guaranteed ASCII by KeySet validation.
    let digits: Vec<u8> = keyset.trans_key().bytes().map(|b| b - b'0').collect();

    let mut positions: Vec<usize> = (0..digits.len()).collect();
    positions.sort_by_key(|&i| digits[i]);

    let mut order = vec![0usize; digits.len()];
    for (rank, &position) in positions.iter().enumerate() {
        order[position] = rank;
    }
    order
}

/// Permutes each block of the input; the final partial block is
/// zero-padded to a full block first.
pub fn encrypt(data: &[u8], keyset: &KeySet) -> Vec<u8> {
    let order = derive_order(keyset);
    let block_len = order.len();

    let mut result = Vec::with_capacity(data.len().div_ceil(block_len) * block_len);
    for chunk in data.chunks(block_len) {
        let mut block = vec![0u8; block_len];
        for (source, &byte) in chunk.iter().enumerate() {
            block[order[source]] = byte;
        }
        result.extend_from_slice(&block);
    }
    result
}

/// Applies the inverse permutation to each block.
///
/// A truncated final block writes only the positions actually present;
/// the missing slots stay zero and the output is still a whole block.
pub fn decrypt(data: &[u8], keyset: &KeySet) -> Vec<u8> {
    let order = derive_order(keyset);
    let block_len = order.len();

    let mut reverse = vec![0usize; block_len];
    for (source, &dest) in order.iter().enumerate() {
        reverse[dest] = source;
    }

    let mut result = Vec::with_capacity(data.len().div_ceil(block_len) * block_len);
    for chunk in data.chunks(block_len) {
        let mut block = vec![0u8; block_len];
        for (position, &byte) in chunk.iter().enumerate() {
            block[reverse[position]] = byte;
        }
        result.extend_from_slice(&block);
    }
    result
}
