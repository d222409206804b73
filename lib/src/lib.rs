use std::time::Instant;

use serde::{Serialize, Serializer};

use crate::errors::{KmerError, KmerResult};
use crate::filtering::{FilterParams, RankedKmer};
use crate::hashing::{table_size, RollingHash};
use crate::table::{KmerTable, Windows};

pub mod errors;
pub mod filtering;
pub mod hashing;
pub mod input;
pub mod serialization;
pub mod table;

pub use crate::input::{open_input, InputBuffer};

pub const MIN_KMER_LENGTH: usize = 2;
pub const MAX_KMER_LENGTH: usize = 100;
/// Largest input (in bytes) that will be counted.
pub const MAX_INPUT_LENGTH: usize = 100_000_000;

/// Everything needed to go from an input buffer to a report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CountParams {
    pub kmer_length: usize,
    pub filter: FilterParams,
}

impl CountParams {
    pub fn new(kmer_length: usize, min_frequency: f64) -> KmerResult<Self> {
        if !(MIN_KMER_LENGTH..=MAX_KMER_LENGTH).contains(&kmer_length) {
            return Err(KmerError::InvalidKmerLength {
                k: kmer_length,
                min: MIN_KMER_LENGTH,
                max: MAX_KMER_LENGTH,
            });
        }
        Ok(CountParams {
            kmer_length,
            filter: FilterParams::new(min_frequency)?,
        })
    }

    /// Parse the k-mer length and minimum frequency from their textual form,
    /// e.g. command-line arguments, then validate them as `new` does.
    pub fn parse(kmer_length: &str, min_frequency: &str) -> KmerResult<Self> {
        let kmer_length: usize = kmer_length.trim().parse()?;
        let min_frequency: f64 = min_frequency.trim().parse()?;
        CountParams::new(kmer_length, min_frequency)
    }

    /// Checks the preconditions `count_kmers` relies on for an input of
    /// `len` bytes.
    pub fn check_input(&self, len: usize) -> KmerResult<()> {
        if len > MAX_INPUT_LENGTH {
            return Err(KmerError::OversizedInput {
                len,
                max: MAX_INPUT_LENGTH,
            });
        }
        if self.kmer_length > len {
            return Err(KmerError::KmerLongerThanInput {
                k: self.kmer_length,
                len,
            });
        }
        Ok(())
    }
}

/// Occurrence counts for every distinct k-mer of a buffer.
///
/// `counts[i]` is non-zero only when position `i` is the first occurrence
/// (the representative) of its k-mer, and then holds the number of times
/// that k-mer occurs anywhere in the buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct KmerCounts {
    counts: Vec<u32>,
    kmer_length: usize,
    distinct: usize,
}

impl KmerCounts {
    pub fn kmer_length(&self) -> usize {
        self.kmer_length
    }

    pub fn input_length(&self) -> usize {
        self.counts.len()
    }

    /// Number of k-mer windows in the buffer (`n - k + 1`).
    pub fn max_possible_count(&self) -> usize {
        self.counts.len() + 1 - self.kmer_length
    }

    pub fn distinct(&self) -> usize {
        self.distinct
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| u64::from(*c)).sum()
    }

    /// Filter and rank the counts of `data` (the buffer they were built from).
    pub fn report<'a>(&self, data: &'a [u8], filter: &FilterParams) -> KmerReport<'a> {
        debug_assert_eq!(data.len(), self.counts.len());
        let max_possible_count = self.max_possible_count();
        let start = Instant::now();
        let ranked = filter.filter_counts(&self.counts, max_possible_count);
        log::debug!(
            "selected and ranked {} k-mers in {:.2?}",
            ranked.len(),
            start.elapsed()
        );
        KmerReport {
            windows: Windows::new(data, self.kmer_length),
            kmer_length: self.kmer_length,
            input_length: data.len(),
            total_kmers: max_possible_count,
            distinct_kmers: self.distinct,
            min_count: filter.min_count(max_possible_count),
            ranked,
        }
    }
}

/// Count every k-mer of `data` in one rolling-hash pass.
///
/// `kmer_length` must be at least 1 and no larger than `data.len()`, and
/// `data` must be shorter than `u32::MAX` bytes. Only the length bound is
/// enforced here (`KmerTable::new` asserts it); the k-mer length is left to
/// `CountParams::check_input`, and a `kmer_length` past the end of `data`
/// panics on the first slice.
pub fn count_kmers(data: &[u8], kmer_length: usize) -> KmerCounts {
    debug_assert!(kmer_length >= 1 && kmer_length <= data.len());
    let start = Instant::now();
    let modulus = table_size(data.len());
    log::debug!(
        "counting {}-mers over {} bytes with {} table slots",
        kmer_length,
        data.len(),
        modulus
    );

    let mut table = KmerTable::new(Windows::new(data, kmer_length), modulus, data.len());
    for (position, hash) in RollingHash::new(data, kmer_length, modulus) {
        table.record(hash, position);
    }
    let distinct = table.distinct();
    log::debug!(
        "found {} distinct k-mers in {:.2?}",
        distinct,
        start.elapsed()
    );

    KmerCounts {
        counts: table.into_counts(),
        kmer_length,
        distinct,
    }
}

/// Validate the parameters against `data`, count, then filter and rank.
pub fn frequent_kmers<'a>(data: &'a [u8], params: &CountParams) -> KmerResult<KmerReport<'a>> {
    params.check_input(data.len())?;
    let counts = count_kmers(data, params.kmer_length);
    let report = counts.report(data, &params.filter);
    log::info!(
        "{} of {} distinct {}-mers occur at least {} times",
        report.len(),
        report.distinct_kmers(),
        report.kmer_length(),
        report.min_count()
    );
    Ok(report)
}

fn serialize_kmer<S>(kmer: &&[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&String::from_utf8_lossy(kmer))
}

/// A reported k-mer, borrowed from the input buffer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct KmerFrequency<'a> {
    #[serde(serialize_with = "serialize_kmer")]
    pub kmer: &'a [u8],
    pub count: u32,
    /// `count` over the number of windows in the buffer.
    pub frequency: f64,
}

/// The k-mers that met the threshold, most frequent first.
pub struct KmerReport<'a> {
    windows: Windows<'a>,
    kmer_length: usize,
    input_length: usize,
    total_kmers: usize,
    distinct_kmers: usize,
    min_count: u32,
    ranked: Vec<RankedKmer>,
}

impl<'a> KmerReport<'a> {
    pub fn kmer_length(&self) -> usize {
        self.kmer_length
    }

    pub fn input_length(&self) -> usize {
        self.input_length
    }

    /// Number of windows, i.e. the largest count any k-mer could have.
    pub fn total_kmers(&self) -> usize {
        self.total_kmers
    }

    pub fn distinct_kmers(&self) -> usize {
        self.distinct_kmers
    }

    pub fn min_count(&self) -> u32 {
        self.min_count
    }

    pub fn ranked(&self) -> &[RankedKmer] {
        &self.ranked
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = KmerFrequency<'a>> + '_ {
        let windows = self.windows;
        let total = self.total_kmers as f64;
        self.ranked.iter().map(move |r| KmerFrequency {
            kmer: windows.kmer(r.position),
            count: r.count,
            frequency: f64::from(r.count) / total,
        })
    }
}
