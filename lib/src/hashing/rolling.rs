use crate::hashing::KmerHash;

/// The base should be a prime at least as large as the alphabet (256 bytes).
pub const BASE: u64 = 257;

/// `BASE^k mod modulus`, the weight of the byte leaving the window.
pub fn top_one(k: usize, mask: u64) -> u64 {
    let mut top = 1u64;
    for _ in 0..k {
        top = top.wrapping_mul(BASE) & mask;
    }
    top
}

/// Karp-Rabin hashes of every k-byte window of `data`, in order.
///
/// Yields `(position, hash)` for positions `0..=data.len() - k`. The modulus
/// must be a power of two so reduction is a mask; all arithmetic wraps in
/// 64 bits first, which is consistent with masking since `2^64` is a multiple
/// of the modulus.
#[derive(Clone, Debug)]
pub struct RollingHash<'a> {
    data: &'a [u8],
    k: usize,
    mask: u64,
    top_one: u64,
    hash: KmerHash,
    position: usize,
}

impl<'a> RollingHash<'a> {
    /// `k` must not exceed `data.len()` and `modulus` must be a power of two.
    pub fn new(data: &'a [u8], k: usize, modulus: usize) -> Self {
        debug_assert!(modulus.is_power_of_two());
        debug_assert!(k <= data.len());
        let mask = modulus as u64 - 1;
        let hash = data[..k]
            .iter()
            .fold(0u64, |h, &b| (h.wrapping_mul(BASE).wrapping_add(u64::from(b))) & mask);
        RollingHash {
            data,
            k,
            mask,
            top_one: top_one(k, mask),
            hash,
            position: 0,
        }
    }
}

impl<'a> Iterator for RollingHash<'a> {
    type Item = (usize, KmerHash);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let position = self.position;
        if position + self.k > self.data.len() {
            return None;
        }
        let current = (position, self.hash);
        self.position += 1;
        if let Some(&incoming) = self.data.get(position + self.k) {
            let outgoing = u64::from(self.data[position]);
            self.hash = self
                .hash
                .wrapping_mul(BASE)
                .wrapping_add(u64::from(incoming))
                .wrapping_sub(outgoing.wrapping_mul(self.top_one))
                & self.mask;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.data.len() + 1).saturating_sub(self.position + self.k);
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for RollingHash<'a> {}
