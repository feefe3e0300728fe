//! Content fingerprints using FxHash.
//!
//! Generation keeps one fingerprint per written output file so watch-mode
//! passes can tell which synthesized files actually changed.

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Compute 64-bit hash from byte data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_is_deterministic() {
        let wrapper = "export default function Page(props) {}";
        assert_eq!(compute(wrapper), compute(wrapper));
        assert_ne!(compute(wrapper), compute("export default function Layout(props) {}"));
    }
}
