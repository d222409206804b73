mod modulus;
mod rolling;

pub use modulus::table_size;
pub use rolling::{top_one, RollingHash, BASE};

/// Hash of a single k-mer window; always lies in `[0, modulus)`.
pub type KmerHash = u64;
