use crate::graph::MultipliedGraph;
use crate::region::RegionCode;
use crate::result::ScaffoldingResult;
use crate::solution::CircuitSolution;
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Canonical fragments known to be paired, gathered once before the walk.
#[derive(Debug, Clone)]
pub struct PairingSets<F> {
    pub invf_paired: FxHashSet<F>,
    pub dirf_paired: FxHashSet<F>,
}

impl<F> Default for PairingSets<F> {
    fn default() -> Self {
        Self {
            invf_paired: FxHashSet::default(),
            dirf_paired: FxHashSet::default(),
        }
    }
}

impl<F: Copy + Eq + Hash> PairingSets<F> {
    /// Collect paired fragments from a previous stage's result (if any) and
    /// from the fragments the current solution paired.
    ///
    /// Vertices of the previous result are expanded to this graph's leaves.
    pub fn from_solution<G, S>(
        graph: &G,
        solution: &S,
        fix_result: Option<&ScaffoldingResult<G::Vertex>>,
    ) -> Self
    where
        G: MultipliedGraph<Fragment = F>,
        S: CircuitSolution<Vertex = G::Vertex, Fragment = F>,
    {
        let mut sets = Self::default();

        if let Some(fix_result) = fix_result {
            for region_index in fix_result.ir_regions() {
                for &v in fix_result.region_occorc(region_index) {
                    sets.invf_paired
                        .extend(graph.leaf_vertices(v).map(|leaf| graph.invf_canonical(leaf)));
                }
            }
            for region_index in fix_result.dr_regions() {
                for &v in fix_result.region_occorc(region_index) {
                    sets.dirf_paired
                        .extend(graph.leaf_vertices(v).map(|leaf| graph.dirf_canonical(leaf)));
                }
            }
        }

        sets.invf_paired.extend(solution.selected_invf_pairs());
        sets.dirf_paired.extend(solution.selected_dirf_pairs());
        sets
    }

    /// Region code of a vertex. Direct repeats take precedence over inverted
    /// repeats.
    pub fn classify<G>(&self, graph: &G, v: G::Vertex) -> RegionCode
    where
        G: MultipliedGraph<Fragment = F>,
    {
        if self.dirf_paired.contains(&graph.dirf_canonical(v)) {
            RegionCode::DirectRepeat
        } else if graph.is_invf_pairing_copy(v) && self.invf_paired.contains(&graph.invf_canonical(v)) {
            RegionCode::InvertedRepeat
        } else {
            RegionCode::SingleCopy
        }
    }
}
