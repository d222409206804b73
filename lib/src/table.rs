use crate::hashing::KmerHash;

const EMPTY: u32 = u32::MAX;

/// Decides whether two start positions hold the same k-mer.
///
/// The table only ever stores positions, so equality of k-mers is a question
/// it has to ask of whoever owns the bytes.
pub trait WindowCompare {
    fn same_kmer(&self, a: usize, b: usize) -> bool;
}

/// The k-byte windows of a borrowed buffer.
#[derive(Clone, Copy, Debug)]
pub struct Windows<'a> {
    data: &'a [u8],
    k: usize,
}

impl<'a> Windows<'a> {
    pub fn new(data: &'a [u8], k: usize) -> Self {
        Windows { data, k }
    }

    #[inline]
    pub fn kmer(&self, position: usize) -> &'a [u8] {
        &self.data[position..position + self.k]
    }
}

impl<'a> WindowCompare for Windows<'a> {
    #[inline]
    fn same_kmer(&self, a: usize, b: usize) -> bool {
        a == b || self.kmer(a) == self.kmer(b)
    }
}

/// Open-addressed (linear probing) table from k-mer content to a counter.
///
/// Each occupied slot holds the start position of the first occurrence of a
/// k-mer (its representative); `counts` is indexed by that position. The
/// number of slots must be a power of two and larger than the number of
/// windows ever recorded, otherwise probing for a new k-mer never ends.
pub struct KmerTable<C> {
    compare: C,
    slots: Vec<u32>,
    mask: usize,
    counts: Vec<u32>,
    distinct: usize,
}

impl<C: WindowCompare> KmerTable<C> {
    /// `positions` is the size of the count array (one per buffer byte).
    ///
    /// Panics if `positions` doesn't fit below the empty-slot marker, since
    /// positions are stored as `u32`.
    pub fn new(compare: C, modulus: usize, positions: usize) -> Self {
        debug_assert!(modulus.is_power_of_two());
        assert!(
            positions < EMPTY as usize,
            "{} positions can't be stored in u32 slots",
            positions
        );
        KmerTable {
            compare,
            slots: vec![EMPTY; modulus],
            mask: modulus - 1,
            counts: vec![0; positions],
            distinct: 0,
        }
    }

    /// Count one occurrence of the k-mer starting at `position` and return
    /// the position of its representative.
    pub fn record(&mut self, hash: KmerHash, position: usize) -> usize {
        let mut slot = hash as usize & self.mask;
        let representative = loop {
            let observed = self.slots[slot];
            if observed == EMPTY {
                self.slots[slot] = position as u32;
                self.distinct += 1;
                break position;
            }
            if self.compare.same_kmer(observed as usize, position) {
                break observed as usize;
            }
            slot = (slot + 1) & self.mask;
        };
        self.counts[representative] += 1;
        representative
    }

    /// Number of distinct k-mers recorded so far.
    pub fn distinct(&self) -> usize {
        self.distinct
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Drop the slots and keep only the count array.
    pub fn into_counts(self) -> Vec<u32> {
        self.counts
    }
}
