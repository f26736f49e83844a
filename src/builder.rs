use crate::region::{IlpCode, OrientedRegion, Orientation, RegionCode, RegionIndex};
use crate::result::ScaffoldingResult;
use log::warn;

/// Objective value used when the solver does not report one
const NO_OPT_VALUE: f64 = 0.0;

/// Append-only accumulator of regions, driven by the region classifier
#[derive(Debug, Clone)]
pub struct ScaffoldingResultBuilder<V> {
    region_map: Vec<OrientedRegion>,
    regions: Vec<(RegionCode, Vec<V>)>,
    sc_regions: Vec<RegionIndex>,
    ir_regions: Vec<RegionIndex>,
    dr_regions: Vec<RegionIndex>,
}

impl<V> Default for ScaffoldingResultBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ScaffoldingResultBuilder<V> {
    pub fn new() -> Self {
        Self {
            region_map: Vec::new(),
            regions: Vec::new(),
            sc_regions: Vec::new(),
            ir_regions: Vec::new(),
            dr_regions: Vec::new(),
        }
    }

    fn new_region(&mut self, code: RegionCode) -> RegionIndex {
        let region_index = self.regions.len();
        self.regions.push((code, Vec::new()));
        self.region_map.push((region_index, Orientation::Forward));
        region_index
    }

    /// Add a single copy region
    pub fn add_sc_region(&mut self) -> RegionIndex {
        let region_index = self.new_region(RegionCode::SingleCopy);
        self.sc_regions.push(region_index);
        region_index
    }

    /// Add an inverted repeat region, or the reverse occurrence of an
    /// existing one
    pub fn add_ir_region(&mut self, existing: Option<RegionIndex>) -> RegionIndex {
        match existing {
            None => {
                let region_index = self.new_region(RegionCode::InvertedRepeat);
                self.ir_regions.push(region_index);
                region_index
            }
            Some(region_index) => {
                self.region_map.push((region_index, Orientation::Reverse));
                region_index
            }
        }
    }

    /// Add a direct repeat region, or the second (forward) occurrence of an
    /// existing one
    pub fn add_dr_region(&mut self, existing: Option<RegionIndex>) -> RegionIndex {
        match existing {
            None => {
                let region_index = self.new_region(RegionCode::DirectRepeat);
                self.dr_regions.push(region_index);
                region_index
            }
            Some(region_index) => {
                self.region_map.push((region_index, Orientation::Forward));
                region_index
            }
        }
    }

    /// Append `v` to the region. The index must come from an `add_*_region` call.
    pub fn add_occorc_to_region(&mut self, v: V, region_index: RegionIndex) {
        debug_assert!(region_index < self.regions.len(), "unknown region {region_index}");
        self.regions[region_index].1.push(v);
    }

    pub fn number_regions(&self) -> usize {
        self.regions.len()
    }

    /// Freeze the builder into a result
    pub fn finalize(
        self,
        status: i32,
        objective_value: Option<f64>,
        ilp_codes: Vec<IlpCode>,
    ) -> ScaffoldingResult<V> {
        let opt_value = objective_value.unwrap_or_else(|| {
            warn!("No objective value reported by the solver, using {}", NO_OPT_VALUE);
            NO_OPT_VALUE
        });
        ScaffoldingResult::new(
            ilp_codes,
            status,
            opt_value,
            self.region_map,
            self.regions,
            self.sc_regions,
            self.ir_regions,
            self.dr_regions,
        )
    }
}
