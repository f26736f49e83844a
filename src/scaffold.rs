use crate::classifier::RegionClassifier;
use crate::error::ScaffoldError;
use crate::graph::MultipliedGraph;
use crate::pairing::PairingSets;
use crate::region::{ilp_combination, IlpCode};
use crate::result::ScaffoldingResult;
use crate::solution::CircuitSolution;
use crate::walk::{find_initial, CircuitWalk};
use log::info;
use rayon::prelude::*;

/// Inputs of one reconstruction, for [`path_to_regions_many`]
pub struct ReconstructionJob<'a, V, S> {
    pub solution: &'a S,
    pub starter_vertex: V,
    pub ilp_codes: Vec<IlpCode>,
    /// Result of an earlier stage whose repeats stay paired
    pub fix_result: Option<&'a ScaffoldingResult<V>>,
}

/// Extract the regions of the optimal circuit.
///
/// The walk starts at the first vertex of the single copy stretch holding
/// `starter_vertex`. Failures carry the ILP combination and the starter.
pub fn path_to_regions<G, S>(
    graph: &G,
    starter_vertex: G::Vertex,
    ilp_codes: &[IlpCode],
    solution: &S,
    fix_result: Option<&ScaffoldingResult<G::Vertex>>,
) -> Result<ScaffoldingResult<G::Vertex>, ScaffoldError>
where
    G: MultipliedGraph,
    S: CircuitSolution<Vertex = G::Vertex, Fragment = G::Fragment>,
{
    reconstruct(graph, starter_vertex, ilp_codes, solution, fix_result).map_err(|e| {
        ScaffoldError::Reconstruction {
            ilp_combination: ilp_combination(ilp_codes),
            starter: format!("{:?}", starter_vertex),
            source: Box::new(e),
        }
    })
}

fn reconstruct<G, S>(
    graph: &G,
    starter_vertex: G::Vertex,
    ilp_codes: &[IlpCode],
    solution: &S,
    fix_result: Option<&ScaffoldingResult<G::Vertex>>,
) -> Result<ScaffoldingResult<G::Vertex>, ScaffoldError>
where
    G: MultipliedGraph,
    S: CircuitSolution<Vertex = G::Vertex, Fragment = G::Fragment>,
{
    let pairing = PairingSets::from_solution(graph, solution, fix_result);
    let initial_vertex = find_initial(graph, solution, &pairing, starter_vertex)?;

    let mut classifier = RegionClassifier::new(graph, solution, &pairing);
    for v in CircuitWalk::new(graph, solution, initial_vertex) {
        classifier.push(v?)?;
    }

    let result = classifier
        .finish()?
        .finalize(solution.status(), solution.objective_value(), ilp_codes.to_vec());
    info!(
        "ILP {}: {} regions ({} sc, {} ir, {} dr), status {}, objective {}",
        ilp_combination(ilp_codes),
        result.number_regions(),
        result.sc_regions().count(),
        result.ir_regions().count(),
        result.dr_regions().count(),
        result.status(),
        result.opt_value()
    );
    Ok(result)
}

/// Reconstruct several independent solutions of the same graph in parallel.
///
/// Results come back in job order; one failing job does not affect the others.
pub fn path_to_regions_many<G, S>(
    graph: &G,
    jobs: &[ReconstructionJob<'_, G::Vertex, S>],
) -> Vec<Result<ScaffoldingResult<G::Vertex>, ScaffoldError>>
where
    G: MultipliedGraph + Sync,
    G::Vertex: Send + Sync,
    S: CircuitSolution<Vertex = G::Vertex, Fragment = G::Fragment> + Sync,
{
    jobs.par_iter()
        .map(|job| {
            path_to_regions(
                graph,
                job.starter_vertex,
                &job.ilp_codes,
                job.solution,
                job.fix_result,
            )
        })
        .collect()
}
