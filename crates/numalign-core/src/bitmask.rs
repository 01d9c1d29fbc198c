//! NUMA affinity bitmasks.
//!
//! A [`Bitmask`] is an immutable set of NUMA node identifiers. Every mask
//! remembers the machine universe ([`NumaNodes`]) it was built against, so
//! combining masks that disagree about the machine topology is caught
//! instead of silently truncated.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{AffinityError, AffinityResult};

/// Highest number of NUMA nodes a single mask can describe.
pub const MAX_NUMA_NODES: usize = 64;

/// The fixed set of NUMA node identifiers present on the machine.
///
/// Built once from the topology source and handed to every policy; it never
/// changes afterwards. Identifiers may be sparse (`[0, 2]` is valid).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NumaNodes {
    ids: Vec<usize>,
    bits: u64,
}

impl NumaNodes {
    /// Build the universe from the machine's node identifiers.
    ///
    /// Duplicates collapse and the result is kept in ascending order.
    pub fn new(ids: impl IntoIterator<Item = usize>) -> AffinityResult<Self> {
        let mut bits = 0u64;
        for id in ids {
            if id >= MAX_NUMA_NODES {
                return Err(AffinityError::InvalidNode {
                    node: id,
                    known: ids_of(bits),
                });
            }
            bits |= 1u64 << id;
        }
        Ok(Self {
            ids: ids_of(bits),
            bits,
        })
    }

    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: usize) -> bool {
        id < MAX_NUMA_NODES && self.bits & (1u64 << id) != 0
    }

    /// Mask containing every node of the machine.
    pub fn full(&self) -> Bitmask {
        Bitmask {
            bits: self.bits,
            universe: self.bits,
        }
    }

    /// Mask containing no node at all.
    pub fn empty(&self) -> Bitmask {
        Bitmask {
            bits: 0,
            universe: self.bits,
        }
    }

    /// Build a mask from explicit node identifiers.
    ///
    /// Fails with [`AffinityError::InvalidNode`] for any identifier that is
    /// not a node of this machine.
    pub fn mask(&self, ids: &[usize]) -> AffinityResult<Bitmask> {
        let mut bits = 0u64;
        for &id in ids {
            if !self.contains(id) {
                return Err(AffinityError::InvalidNode {
                    node: id,
                    known: self.ids.clone(),
                });
            }
            bits |= 1u64 << id;
        }
        Ok(Bitmask {
            bits,
            universe: self.bits,
        })
    }

    /// True if `mask` was built against this machine topology.
    pub fn owns(&self, mask: &Bitmask) -> bool {
        mask.universe == self.bits
    }

    /// Fail with [`AffinityError::UniverseMismatch`] unless `mask` belongs to
    /// this machine topology.
    pub fn check(&self, mask: &Bitmask) -> AffinityResult<()> {
        if self.owns(mask) {
            Ok(())
        } else {
            Err(AffinityError::UniverseMismatch {
                left: self.ids.clone(),
                right: ids_of(mask.universe),
            })
        }
    }
}

/// Immutable set of NUMA node identifiers over a fixed machine universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitmask {
    bits: u64,
    universe: u64,
}

impl Bitmask {
    /// Shorthand for [`NumaNodes::mask`].
    pub fn new(nodes: &NumaNodes, ids: &[usize]) -> AffinityResult<Self> {
        nodes.mask(ids)
    }

    /// Nodes present in both masks. An empty result is a valid value meaning
    /// "no common node".
    pub fn intersect(&self, other: &Bitmask) -> AffinityResult<Bitmask> {
        self.same_universe(other)?;
        Ok(Bitmask {
            bits: self.bits & other.bits,
            universe: self.universe,
        })
    }

    /// Nodes present in either mask.
    pub fn union(&self, other: &Bitmask) -> AffinityResult<Bitmask> {
        self.same_universe(other)?;
        Ok(Bitmask {
            bits: self.bits | other.bits,
            universe: self.universe,
        })
    }

    /// Member equality, refusing to compare masks of different machines.
    pub fn is_equal(&self, other: &Bitmask) -> AffinityResult<bool> {
        self.same_universe(other)?;
        Ok(self.bits == other.bits)
    }

    /// True if the mask holds every node of its machine.
    pub fn is_full_universe(&self) -> bool {
        self.bits == self.universe
    }

    /// Number of member nodes.
    pub fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn contains(&self, id: usize) -> bool {
        id < MAX_NUMA_NODES && self.bits & (1u64 << id) != 0
    }

    /// Member node identifiers in ascending order.
    pub fn nodes(&self) -> Vec<usize> {
        ids_of(self.bits)
    }

    /// Strictly fewer member nodes than `other`.
    pub fn is_narrower_than(&self, other: &Bitmask) -> bool {
        self.count() < other.count()
    }

    fn same_universe(&self, other: &Bitmask) -> AffinityResult<()> {
        if self.universe == other.universe {
            Ok(())
        } else {
            Err(AffinityError::UniverseMismatch {
                left: ids_of(self.universe),
                right: ids_of(other.universe),
            })
        }
    }
}

impl fmt::Display for Bitmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nodes: Vec<String> = self.nodes().iter().map(|n| n.to_string()).collect();
        write!(f, "{{{}}}", nodes.join(","))
    }
}

impl Serialize for Bitmask {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.nodes().serialize(serializer)
    }
}

fn ids_of(bits: u64) -> Vec<usize> {
    (0..MAX_NUMA_NODES).filter(|i| bits & (1u64 << i) != 0).collect()
}
