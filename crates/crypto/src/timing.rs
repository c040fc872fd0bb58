//! Constant-time equality for signature checks.

use subtle::ConstantTimeEq;

/// Byte equality whose running time does not depend on the contents.
///
/// A length mismatch returns `false` at once; signature lengths are public.
/// Equal-length inputs go through `subtle`, which touches every byte.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
