//! MD5 block compression (RFC 1321 §3.4).
//!
//! Pure function over the four running state words and a run of whole
//! 64-byte blocks. All arithmetic wraps modulo 2^32.

use super::MD5_BLOCK_SIZE;

/// The sine table constants (K) in MD5 (32 bits).
/// K[i] = floor(2^32 * abs(sin(i+1))) for i=0..63
static K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee,
    0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be,
    0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa,
    0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed,
    0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c,
    0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05,
    0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039,
    0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1,
    0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Left rotation per step, grouped by round.
static S: [u32; 64] = [
    // Round 1
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22,
    // Round 2
    5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20, 5, 9, 14, 20,
    // Round 3
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23,
    // Round 4
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// Message word consumed at each step.
/// Round 1: i, round 2: (5i + 1) mod 16, round 3: (3i + 5) mod 16, round 4: 7i mod 16.
static M: [usize; 64] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
    1, 6, 11, 0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12,
    5, 8, 11, 14, 1, 4, 7, 10, 13, 0, 3, 6, 9, 12, 15, 2,
    0, 7, 14, 5, 12, 3, 10, 1, 8, 15, 6, 13, 4, 11, 2, 9,
];

#[inline(always)]
fn f(b: u32, c: u32, d: u32) -> u32 {
    (b & c) | (!b & d)
}

#[inline(always)]
fn g(b: u32, c: u32, d: u32) -> u32 {
    (b & d) | (c & !d)
}

#[inline(always)]
fn h(b: u32, c: u32, d: u32) -> u32 {
    b ^ c ^ d
}

#[inline(always)]
fn i(b: u32, c: u32, d: u32) -> u32 {
    c ^ (b | !d)
}

/// Compresses every 64-byte block of `blocks` into `state`, in order.
///
/// `blocks.len()` must be a multiple of [`MD5_BLOCK_SIZE`]; callers only ever
/// hand over whole blocks.
pub fn compress(state: &mut [u32; 4], blocks: &[u8]) {
    debug_assert_eq!(blocks.len() % MD5_BLOCK_SIZE, 0);

    for block in blocks.chunks_exact(MD5_BLOCK_SIZE) {
        let mut w = [0u32; 16];
        for (word, bytes) in w.iter_mut().zip(block.chunks_exact(4)) {
            *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }

        let [mut a, mut b, mut c, mut d] = *state;

        for step in 0..64 {
            let mix = match step / 16 {
                0 => f(b, c, d),
                1 => g(b, c, d),
                2 => h(b, c, d),
                _ => i(b, c, d),
            };

            let temp = a
                .wrapping_add(mix)
                .wrapping_add(w[M[step]])
                .wrapping_add(K[step])
                .rotate_left(S[step])
                .wrapping_add(b);

            a = d;
            d = c;
            c = b;
            b = temp;
        }

        state[0] = state[0].wrapping_add(a);
        state[1] = state[1].wrapping_add(b);
        state[2] = state[2].wrapping_add(c);
        state[3] = state[3].wrapping_add(d);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INIT: [u32; 4] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476];

    fn padded_empty_block() -> [u8; 64] {
        let mut block = [0u8; 64];
        block[0] = 0x80;
        block
    }

    #[test]
    fn test_message_index_table_matches_round_formulas() {
        for step in 0..64 {
            let expected = match step / 16 {
                0 => step,
                1 => (5 * step + 1) % 16,
                2 => (3 * step + 5) % 16,
                _ => (7 * step) % 16,
            };
            assert_eq!(M[step], expected, "step {}", step);
        }
    }

    #[test]
    fn test_compress_padded_empty_message() {
        // The empty message pads to exactly one block: 0x80 then zeros, bit length 0.
        let mut state = INIT;
        compress(&mut state, &padded_empty_block());

        let mut digest = Vec::with_capacity(16);
        for word in state {
            digest.extend_from_slice(&word.to_le_bytes());
        }
        assert_eq!(hex::encode(digest), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_compress_multiple_blocks_equals_sequential() {
        let mut data = [0u8; 192];
        for (i, byte) in data.iter_mut().enumerate() {
            *byte = (i * 7 + 3) as u8;
        }

        let mut all_at_once = INIT;
        compress(&mut all_at_once, &data);

        let mut one_by_one = INIT;
        for block in data.chunks(64) {
            compress(&mut one_by_one, block);
        }

        assert_eq!(all_at_once, one_by_one);
    }

    #[test]
    fn test_compress_empty_input_is_identity() {
        let mut state = INIT;
        compress(&mut state, &[]);
        assert_eq!(state, INIT);
    }
}
