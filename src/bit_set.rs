//! A small bitset over non-negative `usize` indices, used by the ATN
//! config-set machinery for alt-number and conflict-alt tracking.
//!
//! Spec §9 open question: the reference runtime's `BitSet.hashCode` mixes
//! 32-bit and 64-bit masks in a way that assumes a particular host word
//! size. This port fixes the word size at 64 bits (`u64` words via the
//! `bit-set` crate's backing `BitVec`, which is word-size-agnostic at the
//! API level) and documents that choice here rather than leaving it
//! implicit.
use bit_set::BitSet as RawBitSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSet {
    inner: RawBitSet,
}

impl BitSet {
    pub fn new() -> Self {
        BitSet { inner: RawBitSet::new() }
    }

    pub fn with_capacity(bits: usize) -> Self {
        BitSet { inner: RawBitSet::with_capacity(bits) }
    }

    pub fn set(&mut self, index: usize) {
        self.inner.insert(index);
    }

    pub fn clear(&mut self, index: usize) {
        self.inner.remove(index);
    }

    pub fn get(&self, index: usize) -> bool {
        self.inner.contains(index)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn union_with(&mut self, other: &BitSet) {
        self.inner.union_with(&other.inner);
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_roundtrip() {
        let mut b = BitSet::new();
        b.set(3);
        b.set(64);
        assert!(b.get(3));
        assert!(b.get(64));
        assert!(!b.get(4));
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn union_combines_members() {
        let mut a = BitSet::new();
        a.set(1);
        let mut b = BitSet::new();
        b.set(2);
        a.union_with(&b);
        assert!(a.get(1));
        assert!(a.get(2));
    }
}
