use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Arc variables above this value are considered selected
pub const BIN_THRESHOLD: f64 = 0.5;

/// Read access to a solved circuit ILP.
pub trait CircuitSolution {
    type Vertex: Copy + Eq + Hash;
    type Fragment: Copy + Eq + Hash;

    /// Whether the arc u -> v is part of the optimal circuit
    fn arc_selected(&self, u: Self::Vertex, v: Self::Vertex) -> bool;

    /// Canonical inverted fragments the solver paired
    fn selected_invf_pairs(&self) -> impl Iterator<Item = Self::Fragment> + '_ {
        std::iter::empty()
    }

    /// Canonical direct fragments the solver paired
    fn selected_dirf_pairs(&self) -> impl Iterator<Item = Self::Fragment> + '_ {
        std::iter::empty()
    }

    /// Solver status code
    fn status(&self) -> i32;

    /// Objective value, `None` when the solver did not report one
    fn objective_value(&self) -> Option<f64>;
}

/// In-memory solution: arc variable values plus the selected fragment pairs
#[derive(Debug, Clone)]
pub struct ArcSolution<V, F> {
    arcs: FxHashMap<(V, V), f64>,
    invf_pairs: Vec<F>,
    dirf_pairs: Vec<F>,
    status: i32,
    objective: Option<f64>,
    bin_threshold: f64,
}

impl<V: Copy + Eq + Hash, F: Copy + Eq + Hash> ArcSolution<V, F> {
    pub fn new(status: i32, objective: Option<f64>) -> Self {
        Self {
            arcs: FxHashMap::default(),
            invf_pairs: Vec::new(),
            dirf_pairs: Vec::new(),
            status,
            objective,
            bin_threshold: BIN_THRESHOLD,
        }
    }

    /// Use another cutoff for binary arc variables
    pub fn with_bin_threshold(mut self, bin_threshold: f64) -> Self {
        self.bin_threshold = bin_threshold;
        self
    }

    /// Set the value of the arc variable u -> v
    pub fn set_arc(&mut self, u: V, v: V, value: f64) {
        self.arcs.insert((u, v), value);
    }

    /// Select every arc of a closed walk
    pub fn select_circuit(&mut self, walk: &[V]) {
        for (i, &u) in walk.iter().enumerate() {
            self.set_arc(u, walk[(i + 1) % walk.len()], 1.0);
        }
    }

    pub fn add_invf_pair(&mut self, canonical: F) {
        self.invf_pairs.push(canonical);
    }

    pub fn add_dirf_pair(&mut self, canonical: F) {
        self.dirf_pairs.push(canonical);
    }

    pub fn arc_value(&self, u: V, v: V) -> f64 {
        self.arcs.get(&(u, v)).copied().unwrap_or(0.0)
    }
}

impl<V: Copy + Eq + Hash, F: Copy + Eq + Hash> CircuitSolution for ArcSolution<V, F> {
    type Vertex = V;
    type Fragment = F;

    fn arc_selected(&self, u: V, v: V) -> bool {
        self.arc_value(u, v) > self.bin_threshold
    }

    fn selected_invf_pairs(&self) -> impl Iterator<Item = F> + '_ {
        self.invf_pairs.iter().copied()
    }

    fn selected_dirf_pairs(&self) -> impl Iterator<Item = F> + '_ {
        self.dirf_pairs.iter().copied()
    }

    fn status(&self) -> i32 {
        self.status
    }

    fn objective_value(&self) -> Option<f64> {
        self.objective
    }
}
