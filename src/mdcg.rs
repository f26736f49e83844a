use crate::graph::MultipliedGraph;
use crate::region::Orientation;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Multiplied oriented contig: one occurrence of one strand of a contig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OccOrC {
    pub contig: u32,
    pub orientation: Orientation,
    pub occurrence: u32,
}

impl OccOrC {
    pub fn new(contig: u32, orientation: Orientation, occurrence: u32) -> Self {
        Self {
            contig,
            orientation,
            occurrence,
        }
    }

    /// Reverse-complement partner: other strand, paired occurrence
    pub fn invf_other(&self) -> Self {
        Self::new(self.contig, self.orientation.rev(), self.occurrence ^ 1)
    }

    /// Canonical half of the inverted fragment (even occurrence)
    pub fn invf_canonical(&self) -> Self {
        if self.occurrence % 2 == 0 {
            *self
        } else {
            self.invf_other()
        }
    }

    /// Direct repeat partner: same strand, paired occurrence
    pub fn dirf_other(&self) -> Self {
        Self::new(self.contig, self.orientation, self.occurrence ^ 1)
    }

    /// Canonical half of the direct fragment (even occurrence)
    pub fn dirf_canonical(&self) -> Self {
        if self.occurrence % 2 == 0 {
            *self
        } else {
            self.dirf_other()
        }
    }

    /// (occurrence - orientation) mod 2 == 0
    pub fn has_invf_parity(&self) -> bool {
        (self.occurrence + self.orientation.as_int()) % 2 == 0
    }
}

impl fmt::Display for OccOrC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}#{}", self.contig, self.orientation, self.occurrence)
    }
}

/// In-memory multiplied doubled contig graph
#[derive(Debug, Default, Clone)]
pub struct MdcGraph {
    succs: FxHashMap<OccOrC, Vec<OccOrC>>,
    preds: FxHashMap<OccOrC, Vec<OccOrC>>,
    leaves: FxHashMap<OccOrC, Vec<OccOrC>>,
}

impl MdcGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the arc u -> v (duplicates are ignored)
    pub fn add_arc(&mut self, u: OccOrC, v: OccOrC) {
        let succs = self.succs.entry(u).or_default();
        if succs.contains(&v) {
            return;
        }
        succs.push(v);
        self.preds.entry(v).or_default().push(u);
    }

    /// Add the arcs of a closed walk, last vertex linked back to the first
    pub fn add_circuit(&mut self, walk: &[OccOrC]) {
        for (i, &u) in walk.iter().enumerate() {
            self.add_arc(u, walk[(i + 1) % walk.len()]);
        }
    }

    /// Declare the vertices a coarse vertex expands to
    pub fn set_leaves(&mut self, coarse: OccOrC, leaves: Vec<OccOrC>) {
        self.leaves.insert(coarse, leaves);
    }

    pub fn number_arcs(&self) -> usize {
        self.succs.values().map(Vec::len).sum()
    }
}

impl MultipliedGraph for MdcGraph {
    type Vertex = OccOrC;
    type Fragment = OccOrC;

    fn multiplied_successors(&self, v: OccOrC) -> impl Iterator<Item = OccOrC> + '_ {
        self.succs.get(&v).into_iter().flatten().copied()
    }

    fn multiplied_predecessors(&self, v: OccOrC) -> impl Iterator<Item = OccOrC> + '_ {
        self.preds.get(&v).into_iter().flatten().copied()
    }

    fn leaf_vertices(&self, v: OccOrC) -> impl Iterator<Item = OccOrC> + '_ {
        // A vertex with no declared leaves is its own leaf
        let leaves: Vec<OccOrC> = match self.leaves.get(&v) {
            Some(leaves) => leaves.clone(),
            None => vec![v],
        };
        leaves.into_iter()
    }

    fn invf_canonical(&self, v: OccOrC) -> OccOrC {
        v.invf_canonical()
    }

    fn invf_other(&self, v: OccOrC) -> OccOrC {
        v.invf_other()
    }

    fn dirf_canonical(&self, v: OccOrC) -> OccOrC {
        v.dirf_canonical()
    }

    fn dirf_other(&self, v: OccOrC) -> OccOrC {
        v.dirf_other()
    }

    fn is_invf_pairing_copy(&self, v: OccOrC) -> bool {
        v.has_invf_parity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Orientation::{Forward, Reverse};

    #[test]
    fn test_invf_pairing() {
        let v = OccOrC::new(3, Forward, 0);
        let w = v.invf_other();
        assert_eq!(w, OccOrC::new(3, Reverse, 1));
        assert_eq!(w.invf_other(), v);
        assert_eq!(v.invf_canonical(), w.invf_canonical());
        assert!(v.has_invf_parity());
        assert!(w.has_invf_parity());

        // The other doubled copy never passes the parity check
        let x = OccOrC::new(3, Reverse, 0);
        assert!(!x.has_invf_parity());
        assert!(!x.invf_other().has_invf_parity());
    }

    #[test]
    fn test_dirf_pairing() {
        let v = OccOrC::new(5, Forward, 2);
        let w = v.dirf_other();
        assert_eq!(w, OccOrC::new(5, Forward, 3));
        assert_eq!(v.dirf_canonical(), w.dirf_canonical());
        assert_eq!(w.dirf_canonical(), v);
    }

    #[test]
    fn test_circuit_adjacency() {
        let walk = [
            OccOrC::new(0, Forward, 0),
            OccOrC::new(1, Forward, 0),
            OccOrC::new(2, Reverse, 0),
        ];
        let mut graph = MdcGraph::new();
        graph.add_circuit(&walk);
        graph.add_circuit(&walk);
        assert_eq!(graph.number_arcs(), 3);
        assert_eq!(
            graph.multiplied_successors(walk[2]).collect::<Vec<_>>(),
            vec![walk[0]]
        );
        assert_eq!(
            graph.multiplied_predecessors(walk[0]).collect::<Vec<_>>(),
            vec![walk[2]]
        );
        assert_eq!(graph.leaf_vertices(walk[1]).collect::<Vec<_>>(), vec![walk[1]]);
    }
}
