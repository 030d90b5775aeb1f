//! Constant-time byte comparison.

use subtle::ConstantTimeEq;

/// Compares two byte slices without exiting early on the first difference.
///
/// A length mismatch is folded into the same result as the byte comparison,
/// which only runs over the overlapping prefix, so the timing reveals the
/// shorter length but never the position of a differing byte.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let overlap = a.len().min(b.len());
    let same_len = (a.len() as u64).ct_eq(&(b.len() as u64));
    let same_prefix = a[..overlap].ct_eq(&b[..overlap]);
    (same_len & same_prefix).into()
}
