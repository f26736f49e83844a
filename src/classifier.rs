use crate::builder::ScaffoldingResultBuilder;
use crate::error::ScaffoldError;
use crate::graph::MultipliedGraph;
use crate::pairing::PairingSets;
use crate::region::{RegionCode, RegionIndex};
use crate::solution::CircuitSolution;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

/// Halves waiting for their partner occurrence
trait PendingHalves<V>: Default {
    fn put_half(&mut self, v: V);
    fn take_half(&mut self) -> Option<V>;
    fn pending(&self) -> usize;
}

/// Inverted repeats come back in reverse order
impl<V> PendingHalves<V> for Vec<V> {
    fn put_half(&mut self, v: V) {
        self.push(v);
    }

    fn take_half(&mut self) -> Option<V> {
        self.pop()
    }

    fn pending(&self) -> usize {
        self.len()
    }
}

/// Direct repeats come back in the same order
impl<V> PendingHalves<V> for VecDeque<V> {
    fn put_half(&mut self, v: V) {
        self.push_back(v);
    }

    fn take_half(&mut self) -> Option<V> {
        self.pop_front()
    }

    fn pending(&self) -> usize {
        self.len()
    }
}

/// Per repeat kind bookkeeping of the walk
struct RepeatTracker<V, F, Q> {
    /// Canonical fragment -> region it was first seen in
    canonical_reg: FxHashMap<F, RegionIndex>,
    pending: FxHashMap<RegionIndex, Q>,
    /// Regions whose second occurrence has started
    paired: FxHashSet<RegionIndex>,
    add_region: fn(&mut ScaffoldingResultBuilder<V>, Option<RegionIndex>) -> RegionIndex,
}

impl<V, F, Q> RepeatTracker<V, F, Q>
where
    V: Copy + Eq + Debug,
    F: Copy + Eq + Hash,
    Q: PendingHalves<V>,
{
    fn new(add_region: fn(&mut ScaffoldingResultBuilder<V>, Option<RegionIndex>) -> RegionIndex) -> Self {
        Self {
            canonical_reg: FxHashMap::default(),
            pending: FxHashMap::default(),
            paired: FxHashSet::default(),
            add_region,
        }
    }

    /// Consume the pending half of `region_index` that `v` must be
    fn pair(&mut self, region_index: RegionIndex, v: V) -> Result<(), ScaffoldError> {
        let expected = self.pending.get_mut(&region_index).and_then(Q::take_half);
        if expected != Some(v) {
            return Err(ScaffoldError::PairingMismatch {
                region: region_index,
                expected: expected.map(|e| format!("{:?}", e)),
                found: format!("{:?}", v),
            });
        }
        Ok(())
    }

    /// First region still holding unpaired halves
    fn unbalanced(&self) -> Option<(RegionIndex, usize)> {
        self.pending
            .iter()
            .filter(|(_, q)| q.pending() > 0)
            .map(|(&region_index, q)| (region_index, q.pending()))
            .min()
    }
}

/// The region the walk is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CurrentRegion {
    code: RegionCode,
    index: RegionIndex,
    /// Walking the second occurrence of a repeat
    second: bool,
}

/// A repeat vertex with its fragment data resolved
struct RepeatStep<V, F> {
    v: V,
    canonical: F,
    other: V,
    /// Whether `v` extends the current first occurrence
    contiguous: bool,
}

/// Region classifier and pairing state machine.
///
/// Fed the circuit vertices in walk order, it decides for each one whether
/// it extends the current region, opens a new one, or starts the second
/// occurrence of a repeat seen before.
pub struct RegionClassifier<'a, G: MultipliedGraph, S> {
    graph: &'a G,
    solution: &'a S,
    pairing: &'a PairingSets<G::Fragment>,
    builder: ScaffoldingResultBuilder<G::Vertex>,
    current: Option<CurrentRegion>,
    previous: Option<G::Vertex>,
    ir: RepeatTracker<G::Vertex, G::Fragment, Vec<G::Vertex>>,
    dr: RepeatTracker<G::Vertex, G::Fragment, VecDeque<G::Vertex>>,
}

impl<'a, G, S> RegionClassifier<'a, G, S>
where
    G: MultipliedGraph,
    S: CircuitSolution<Vertex = G::Vertex>,
{
    pub fn new(graph: &'a G, solution: &'a S, pairing: &'a PairingSets<G::Fragment>) -> Self {
        Self {
            graph,
            solution,
            pairing,
            builder: ScaffoldingResultBuilder::new(),
            current: None,
            previous: None,
            ir: RepeatTracker::new(ScaffoldingResultBuilder::add_ir_region),
            dr: RepeatTracker::new(ScaffoldingResultBuilder::add_dr_region),
        }
    }

    /// Process the next vertex of the circuit
    pub fn push(&mut self, v: G::Vertex) -> Result<(), ScaffoldError> {
        let code = self.pairing.classify(self.graph, v);
        let continued = match (self.current, self.previous) {
            (Some(current), Some(u)) if current.code == code => Some((current, u)),
            _ => None,
        };

        let current = match code {
            RegionCode::SingleCopy => {
                let index = match continued {
                    Some((current, _)) => current.index,
                    None => {
                        let index = self.builder.add_sc_region();
                        debug!("New single copy region {} at {:?}", index, v);
                        index
                    }
                };
                self.builder.add_occorc_to_region(v, index);
                CurrentRegion {
                    code,
                    index,
                    second: false,
                }
            }
            RegionCode::InvertedRepeat => {
                let step = RepeatStep {
                    v,
                    canonical: self.graph.invf_canonical(v),
                    other: self.graph.invf_other(v),
                    // i (= u) -> k (= v), so is there l -> j?
                    contiguous: continued.is_some_and(|(_, u)| {
                        self.solution
                            .arc_selected(self.graph.invf_other(v), self.graph.invf_other(u))
                    }),
                };
                step_repeat(&mut self.ir, &mut self.builder, code, continued.map(|(c, _)| c), step)?
            }
            RegionCode::DirectRepeat => {
                let step = RepeatStep {
                    v,
                    canonical: self.graph.dirf_canonical(v),
                    other: self.graph.dirf_other(v),
                    // i (= u) -> k (= v), so is there j -> l?
                    contiguous: continued.is_some_and(|(_, u)| {
                        self.solution
                            .arc_selected(self.graph.dirf_other(u), self.graph.dirf_other(v))
                    }),
                };
                step_repeat(&mut self.dr, &mut self.builder, code, continued.map(|(c, _)| c), step)?
            }
        };

        self.current = Some(current);
        self.previous = Some(v);
        Ok(())
    }

    /// End of the circuit: every repeat half must have found its partner
    pub fn finish(self) -> Result<ScaffoldingResultBuilder<G::Vertex>, ScaffoldError> {
        if let Some((region, pending)) = self.ir.unbalanced().or(self.dr.unbalanced()) {
            return Err(ScaffoldError::UnbalancedRepeat { region, pending });
        }
        Ok(self.builder)
    }
}

/// Repeat transition shared by inverted and direct repeats.
///
/// `current` is the region of the previous vertex when it has the same code,
/// `None` at a region type boundary.
fn step_repeat<V, F, Q>(
    tracker: &mut RepeatTracker<V, F, Q>,
    builder: &mut ScaffoldingResultBuilder<V>,
    code: RegionCode,
    current: Option<CurrentRegion>,
    step: RepeatStep<V, F>,
) -> Result<CurrentRegion, ScaffoldError>
where
    V: Copy + Eq + Debug,
    F: Copy + Eq + Hash,
    Q: PendingHalves<V>,
{
    match tracker.canonical_reg.get(&step.canonical).copied() {
        // First occurrence: extend the current region or open a new one
        None => {
            let index = match current {
                Some(current) if !current.second && step.contiguous => current.index,
                _ => {
                    let index = (tracker.add_region)(builder, None);
                    debug!("New {} region {} at {:?}", code, index, step.v);
                    index
                }
            };
            builder.add_occorc_to_region(step.v, index);
            tracker.pending.entry(index).or_default().put_half(step.other);
            tracker.canonical_reg.insert(step.canonical, index);
            Ok(CurrentRegion {
                code,
                index,
                second: false,
            })
        }
        // Second occurrence: start it if needed, then consume the pending half
        Some(index) => {
            let continues = current.is_some_and(|c| c.index == index && c.second);
            if !continues {
                if !tracker.paired.insert(index) {
                    return Err(ScaffoldError::UnbalancedRepeat {
                        region: index,
                        pending: tracker.pending.get(&index).map_or(0, Q::pending),
                    });
                }
                (tracker.add_region)(builder, Some(index));
                debug!("Second occurrence of {} region {} at {:?}", code, index, step.v);
            }
            tracker.pair(index, step.v)?;
            Ok(CurrentRegion {
                code,
                index,
                second: true,
            })
        }
    }
}
