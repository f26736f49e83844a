use crate::error::{ScaffoldError, WalkDirection};
use crate::graph::MultipliedGraph;
use crate::pairing::PairingSets;
use crate::region::RegionCode;
use crate::solution::CircuitSolution;
use log::debug;
use rustc_hash::FxHashSet;

/// Next vertex of `v` in the solution circuit.
///
/// Returns `None` when the next vertex is `initial_vertex` (the circuit is
/// closed) and fails with `NotACircuit` if no outgoing arc of `v` is selected.
pub fn successor<G, S>(
    graph: &G,
    solution: &S,
    v: G::Vertex,
    initial_vertex: G::Vertex,
) -> Result<Option<G::Vertex>, ScaffoldError>
where
    G: MultipliedGraph,
    S: CircuitSolution<Vertex = G::Vertex>,
{
    graph
        .multiplied_successors(v)
        .find(|&w| solution.arc_selected(v, w))
        .map(|w| (w != initial_vertex).then_some(w))
        .ok_or_else(|| ScaffoldError::not_a_circuit(&v, WalkDirection::Successor))
}

/// Previous vertex of `v` in the solution circuit, see [`successor`]
pub fn predecessor<G, S>(
    graph: &G,
    solution: &S,
    v: G::Vertex,
    initial_vertex: G::Vertex,
) -> Result<Option<G::Vertex>, ScaffoldError>
where
    G: MultipliedGraph,
    S: CircuitSolution<Vertex = G::Vertex>,
{
    graph
        .multiplied_predecessors(v)
        .find(|&u| solution.arc_selected(u, v))
        .map(|u| (u != initial_vertex).then_some(u))
        .ok_or_else(|| ScaffoldError::not_a_circuit(&v, WalkDirection::Predecessor))
}

/// First vertex of the single copy stretch the starter belongs to.
///
/// Walks backward while the predecessor is single copy, so that the walk
/// never starts inside a repeat region. If the whole circuit is single copy,
/// the starter itself is returned. Coming back to a vertex other than the
/// starter means the selected arcs hold a cycle the starter is not on.
pub fn find_initial<G, S>(
    graph: &G,
    solution: &S,
    pairing: &PairingSets<G::Fragment>,
    starter_vertex: G::Vertex,
) -> Result<G::Vertex, ScaffoldError>
where
    G: MultipliedGraph,
    S: CircuitSolution<Vertex = G::Vertex>,
{
    let mut visited = FxHashSet::default();
    visited.insert(starter_vertex);
    let mut v = starter_vertex;
    let mut u = predecessor(graph, solution, starter_vertex, starter_vertex)?;
    while let Some(pred) = u {
        if !visited.insert(pred) {
            return Err(ScaffoldError::not_a_circuit(&pred, WalkDirection::Revisit));
        }
        if pairing.classify(graph, pred) != RegionCode::SingleCopy {
            debug!("Initial vertex {:?} (repeat boundary at {:?})", v, pred);
            return Ok(v);
        }
        v = pred;
        u = predecessor(graph, solution, v, starter_vertex)?;
    }
    debug!("Circular single copy circuit, initial vertex is the starter {:?}", starter_vertex);
    Ok(starter_vertex)
}

/// Iterator over the vertices of the solution circuit, from `initial_vertex`
/// until the circuit closes.
///
/// A broken circuit (no selected arc, or a cycle that misses
/// `initial_vertex`) yields one `NotACircuit` error, then the iterator ends.
pub struct CircuitWalk<'a, G: MultipliedGraph, S> {
    graph: &'a G,
    solution: &'a S,
    initial_vertex: G::Vertex,
    next: Option<G::Vertex>,
    visited: FxHashSet<G::Vertex>,
}

impl<'a, G, S> CircuitWalk<'a, G, S>
where
    G: MultipliedGraph,
    S: CircuitSolution<Vertex = G::Vertex>,
{
    pub fn new(graph: &'a G, solution: &'a S, initial_vertex: G::Vertex) -> Self {
        Self {
            graph,
            solution,
            initial_vertex,
            next: Some(initial_vertex),
            visited: FxHashSet::default(),
        }
    }
}

impl<G, S> Iterator for CircuitWalk<'_, G, S>
where
    G: MultipliedGraph,
    S: CircuitSolution<Vertex = G::Vertex>,
{
    type Item = Result<G::Vertex, ScaffoldError>;

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.next.take()?;
        if !self.visited.insert(v) {
            return Some(Err(ScaffoldError::not_a_circuit(&v, WalkDirection::Revisit)));
        }
        match successor(self.graph, self.solution, v, self.initial_vertex) {
            Ok(w) => {
                self.next = w;
                Some(Ok(v))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// The whole circuit as a vertex sequence starting at `initial_vertex`
pub fn circuit<G, S>(
    graph: &G,
    solution: &S,
    initial_vertex: G::Vertex,
) -> Result<Vec<G::Vertex>, ScaffoldError>
where
    G: MultipliedGraph,
    S: CircuitSolution<Vertex = G::Vertex>,
{
    CircuitWalk::new(graph, solution, initial_vertex).collect()
}
