/// Size of the open-addressed table for a buffer of `len` bytes.
///
/// This is the smallest power of two that is at least `3 * len`, which keeps
/// the load factor at or under 1/3 even when every one of the `len - k + 1`
/// windows is a distinct k-mer. Being a power of two lets every modular
/// reduction be done with a mask of `size - 1`.
#[inline]
pub fn table_size(len: usize) -> usize {
    len.saturating_mul(3).next_power_of_two()
}
