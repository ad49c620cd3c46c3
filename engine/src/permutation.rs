use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// Number of distinct lattice hashes.
pub const PERIOD: usize = 256;

/// Seeded lookup table used to hash lattice coordinates.
///
/// The first half is a shuffle of `0..=255` and the second half repeats it, so
/// `perm[perm[x] + y]` never needs a wrap for `x, y <= 256`.
#[derive(Clone, PartialEq, Eq)]
pub struct PermutationTable {
    perm: [u8; PERIOD * 2],
}

impl PermutationTable {
    /// Fisher-Yates shuffle of the identity sequence, driven by a ChaCha8
    /// stream seeded from `seed`. ChaCha8 output is stable across platforms
    /// and `rand` releases, so a seed always maps to the same table.
    pub fn generate(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut source = [0u8; PERIOD];
        for (i, slot) in source.iter_mut().enumerate() {
            *slot = i as u8;
        }
        for i in (1..PERIOD as u32).rev() {
            let j = rng.gen_range(0..=i);
            source.swap(i as usize, j as usize);
        }

        let mut perm = [0u8; PERIOD * 2];
        perm[..PERIOD].copy_from_slice(&source);
        perm[PERIOD..].copy_from_slice(&source);
        trace!(seed, head = ?&perm[..8], "permutation table generated");
        Self { perm }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.perm.get(index).copied()
    }

    /// Hash of a wrapped lattice corner. Both coordinates must be in `0..=256`.
    #[inline]
    pub fn hash(&self, x: usize, y: usize) -> u8 {
        self.perm[self.perm[x] as usize + y]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.perm
    }

    pub fn len(&self) -> usize {
        self.perm.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl std::fmt::Debug for PermutationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermutationTable").field("head", &&self.perm[..8]).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_table() {
        assert_eq!(PermutationTable::generate(7), PermutationTable::generate(7));
    }

    #[test]
    fn different_seeds_differ() {
        assert_ne!(PermutationTable::generate(1), PermutationTable::generate(2));
    }

    #[test]
    fn every_value_appears_twice() {
        let table = PermutationTable::generate(0xDEAD_BEEF);
        assert_eq!(table.len(), 512);
        let mut counts = [0u32; 256];
        for &v in table.as_slice() {
            counts[v as usize] += 1;
        }
        assert!(counts.iter().all(|&c| c == 2));
        assert_eq!(&table.as_slice()[..256], &table.as_slice()[256..]);
    }

    #[test]
    fn seed_42_prefix() {
        let table = PermutationTable::generate(42);
        assert_eq!(&table.as_slice()[..8], &[181, 106, 238, 18, 176, 93, 183, 139]);
    }

    #[test]
    fn hash_reads_through_both_halves() {
        let table = PermutationTable::generate(3);
        let p = table.as_slice();
        assert_eq!(table.hash(256, 256), p[p[256] as usize + 256]);
        assert_eq!(table.hash(0, 0), p[p[0] as usize]);
        assert_eq!(table.get(512), None);
    }
}
