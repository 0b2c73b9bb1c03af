use std::cmp::Ordering;

/// A frontier entry, ordered for `BinaryHeap` so that the smallest distance
/// pops first and, among equal distances, the earliest push pops first.
///
/// Entries are never updated in place: an improved distance pushes a new
/// entry and the old one is discarded when popped after its cell has been
/// finalized.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) dist: u32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse both keys: BinaryHeap is a max-heap.
        other
            .dist
            .cmp(&self.dist)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
