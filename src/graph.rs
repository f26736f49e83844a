use std::fmt::Debug;
use std::hash::Hash;

/// Read-only view of a multiplied doubled contig graph.
///
/// Besides the multiplied adjacency, the graph knows how its vertices pair
/// up into repeat fragments:
/// - an *inverted fragment* pairs a vertex with its reverse-complement copy,
/// - a *direct fragment* pairs a vertex with its same-strand repeat copy.
///
/// Both halves of a fragment share one canonical identifier.
pub trait MultipliedGraph {
    /// A multiplied oriented contig
    type Vertex: Copy + Eq + Hash + Debug;
    /// Canonical identifier of a repeat fragment
    type Fragment: Copy + Eq + Hash + Debug;

    fn multiplied_successors(&self, v: Self::Vertex) -> impl Iterator<Item = Self::Vertex> + '_;

    fn multiplied_predecessors(&self, v: Self::Vertex) -> impl Iterator<Item = Self::Vertex> + '_;

    /// Expand a vertex of a coarser graph (e.g. from an earlier pipeline
    /// stage) into the vertices of this graph it stands for.
    fn leaf_vertices(&self, v: Self::Vertex) -> impl Iterator<Item = Self::Vertex> + '_ {
        std::iter::once(v)
    }

    fn invf_canonical(&self, v: Self::Vertex) -> Self::Fragment;

    fn invf_other(&self, v: Self::Vertex) -> Self::Vertex;

    fn dirf_canonical(&self, v: Self::Vertex) -> Self::Fragment;

    fn dirf_other(&self, v: Self::Vertex) -> Self::Vertex;

    /// Whether `v` is the copy that can sit on an inverted repeat boundary.
    ///
    /// Only one of the two doubled copies of a contig occurrence stands for a
    /// real palindrome half; the other must never be classified as an
    /// inverted repeat even when its fragment is paired.
    fn is_invf_pairing_copy(&self, v: Self::Vertex) -> bool;
}
