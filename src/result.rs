use crate::graph::MultipliedGraph;
use crate::region::{IlpCode, OrientedRegion, RegionCode, RegionIndex};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};

const MAGIC: &[u8] = b"SCAFRES1";

/// Scaffolding result: the map of genomic regions of an optimal circuit and
/// the multiplied oriented contigs of each region.
///
/// Results are only produced by [`crate::builder::ScaffoldingResultBuilder`]
/// and never change afterwards. A repeat region stores the contigs of its
/// first occurrence only; the second occurrence is derived from the fragment
/// pairing of the graph (see [`ScaffoldingResult::occurrence_occorc`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaffoldingResult<V> {
    ilp_codes: Vec<IlpCode>,
    status: i32,
    opt_value: f64,
    region_map: Vec<OrientedRegion>,
    regions: Vec<(RegionCode, Vec<V>)>,
    sc_regions: Vec<RegionIndex>,
    ir_regions: Vec<RegionIndex>,
    dr_regions: Vec<RegionIndex>,
}

impl<V> ScaffoldingResult<V> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        ilp_codes: Vec<IlpCode>,
        status: i32,
        opt_value: f64,
        region_map: Vec<OrientedRegion>,
        regions: Vec<(RegionCode, Vec<V>)>,
        sc_regions: Vec<RegionIndex>,
        ir_regions: Vec<RegionIndex>,
        dr_regions: Vec<RegionIndex>,
    ) -> Self {
        Self {
            ilp_codes,
            status,
            opt_value,
            region_map,
            regions,
            sc_regions,
            ir_regions,
            dr_regions,
        }
    }

    /// Code of the ILP that produced this result
    pub fn last_ilp(&self) -> Option<IlpCode> {
        self.ilp_codes.last().copied()
    }

    /// ILP codes of every stage that led to this result, in order
    pub fn ilp_codes(&self) -> impl Iterator<Item = IlpCode> + '_ {
        self.ilp_codes.iter().copied()
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn opt_value(&self) -> f64 {
        self.opt_value
    }

    /// Region occurrences with their orientation, in circuit order
    pub fn map_of_regions(&self) -> impl Iterator<Item = OrientedRegion> + '_ {
        self.region_map.iter().copied()
    }

    /// Multiplied oriented contigs of the region, in walk order
    pub fn region_occorc(&self, region_index: RegionIndex) -> &[V] {
        &self.regions[region_index].1
    }

    pub fn region_code(&self, region_index: RegionIndex) -> RegionCode {
        self.regions[region_index].0
    }

    pub fn number_regions(&self) -> usize {
        self.regions.len()
    }

    pub fn sc_regions(&self) -> impl Iterator<Item = RegionIndex> + '_ {
        self.sc_regions.iter().copied()
    }

    pub fn ir_regions(&self) -> impl Iterator<Item = RegionIndex> + '_ {
        self.ir_regions.iter().copied()
    }

    pub fn dr_regions(&self) -> impl Iterator<Item = RegionIndex> + '_ {
        self.dr_regions.iter().copied()
    }

    /// Every region index in range, and each region listed under its own code
    fn check_regions(&self) -> io::Result<()> {
        let lists = [
            (RegionCode::SingleCopy, &self.sc_regions),
            (RegionCode::InvertedRepeat, &self.ir_regions),
            (RegionCode::DirectRepeat, &self.dr_regions),
        ];
        for (code, list) in lists {
            for &region_index in list {
                match self.regions.get(region_index) {
                    Some((found, _)) if *found == code => {}
                    Some((found, _)) => {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!("Region {region_index} is {found} but listed as {code}"),
                        ))
                    }
                    None => return Err(out_of_range(region_index, self.regions.len())),
                }
            }
        }
        if let Some(&(region_index, _)) =
            self.region_map.iter().find(|(r, _)| *r >= self.regions.len())
        {
            return Err(out_of_range(region_index, self.regions.len()));
        }
        Ok(())
    }
}

fn out_of_range(region_index: RegionIndex, number_regions: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("Region index {region_index} out of range ({number_regions} regions)"),
    )
}

impl<V: Copy> ScaffoldingResult<V> {
    /// Contigs of one region occurrence as they appear in the circuit.
    ///
    /// The first occurrence is the stored list. The second occurrence of an
    /// inverted repeat is the reversed list of reverse-complement halves; the
    /// second occurrence of a direct repeat is the list of direct halves in
    /// the same order.
    pub fn occurrence_occorc<G>(&self, graph: &G, region_index: RegionIndex, second: bool) -> Vec<V>
    where
        G: MultipliedGraph<Vertex = V>,
    {
        let occorcs = self.region_occorc(region_index);
        if !second {
            return occorcs.to_vec();
        }
        match self.region_code(region_index) {
            RegionCode::SingleCopy => occorcs.to_vec(),
            RegionCode::InvertedRepeat => occorcs.iter().rev().map(|&v| graph.invf_other(v)).collect(),
            RegionCode::DirectRepeat => occorcs.iter().map(|&v| graph.dirf_other(v)).collect(),
        }
    }

    /// Expand the map of regions back into the circuit's vertex sequence
    pub fn expand_path<G>(&self, graph: &G) -> Vec<V>
    where
        G: MultipliedGraph<Vertex = V>,
    {
        let mut seen = vec![false; self.regions.len()];
        let mut path = Vec::new();
        for (region_index, _) in self.map_of_regions() {
            let second = seen[region_index];
            seen[region_index] = true;
            path.extend(self.occurrence_occorc(graph, region_index, second));
        }
        path
    }
}

impl<V: Serialize> ScaffoldingResult<V> {
    /// Write the result in binary form
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(MAGIC)?;
        bincode::serde::encode_into_std_write(self, writer, bincode::config::standard())
            .map_err(io::Error::other)?;
        writer.flush()
    }
}

impl<V: DeserializeOwned> ScaffoldingResult<V> {
    /// Read a result written by [`ScaffoldingResult::write_to`].
    ///
    /// Fails with `InvalidData` on a bad header, a decoding error, or region
    /// indices that do not match the stored regions.
    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut magic_buf = [0u8; 8];
        reader.read_exact(&mut magic_buf)?;
        if magic_buf != MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Invalid magic bytes in scaffolding result",
            ));
        }
        let result: Self = bincode::serde::decode_from_std_read(reader, bincode::config::standard())
            .map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Failed to load scaffolding result: {e}"),
                )
            })?;
        result.check_regions()?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ScaffoldingResultBuilder;
    use crate::mdcg::{MdcGraph, OccOrC};
    use crate::region::Orientation::Forward;

    fn two_repeats() -> ScaffoldingResult<OccOrC> {
        let mut builder = ScaffoldingResultBuilder::new();
        let ir = builder.add_ir_region(None);
        builder.add_occorc_to_region(OccOrC::new(1, Forward, 0), ir);
        builder.add_occorc_to_region(OccOrC::new(2, Forward, 0), ir);
        let dr = builder.add_dr_region(None);
        builder.add_occorc_to_region(OccOrC::new(3, Forward, 0), dr);
        builder.add_occorc_to_region(OccOrC::new(4, Forward, 0), dr);
        builder.add_ir_region(Some(ir));
        builder.add_dr_region(Some(dr));
        builder.finalize(1, Some(12.0), vec![IlpCode::InvertedRepeats, IlpCode::DirectRepeats])
    }

    #[test]
    fn test_ilp_provenance() {
        let result = two_repeats();
        assert_eq!(result.last_ilp(), Some(IlpCode::DirectRepeats));
        assert_eq!(
            result.ilp_codes().collect::<Vec<_>>(),
            vec![IlpCode::InvertedRepeats, IlpCode::DirectRepeats]
        );
        assert_eq!(result.status(), 1);
        assert_eq!(result.opt_value(), 12.0);
    }

    #[test]
    fn test_expand_path_second_occurrences() {
        let graph = MdcGraph::new();
        let result = two_repeats();
        let a = OccOrC::new(1, Forward, 0);
        let b = OccOrC::new(2, Forward, 0);
        let c = OccOrC::new(3, Forward, 0);
        let d = OccOrC::new(4, Forward, 0);
        assert_eq!(
            result.expand_path(&graph),
            vec![
                a,
                b,
                c,
                d,
                b.invf_other(),
                a.invf_other(),
                c.dirf_other(),
                d.dirf_other(),
            ]
        );
    }

    #[test]
    fn test_read_rejects_bad_magic() {
        let bytes = b"NOTARES1rest".to_vec();
        let err = ScaffoldingResult::<OccOrC>::read_from(&mut bytes.as_slice()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    fn one_region(
        region_map: Vec<OrientedRegion>,
        sc_regions: Vec<RegionIndex>,
        ir_regions: Vec<RegionIndex>,
    ) -> ScaffoldingResult<OccOrC> {
        ScaffoldingResult::new(
            vec![IlpCode::InvertedRepeats],
            1,
            0.0,
            region_map,
            vec![(RegionCode::SingleCopy, vec![OccOrC::new(0, Forward, 0)])],
            sc_regions,
            ir_regions,
            Vec::new(),
        )
    }

    fn reload(result: &ScaffoldingResult<OccOrC>) -> io::Result<ScaffoldingResult<OccOrC>> {
        let mut buf = Vec::new();
        result.write_to(&mut buf).unwrap();
        ScaffoldingResult::read_from(&mut buf.as_slice())
    }

    #[test]
    fn test_read_rejects_dangling_region_index() {
        let corrupt = one_region(vec![(0, Forward)], vec![0], vec![7]);
        let err = reload(&corrupt).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("Region index 7"));

        let corrupt = one_region(vec![(0, Forward), (3, Forward)], vec![0], Vec::new());
        assert_eq!(reload(&corrupt).unwrap_err().kind(), io::ErrorKind::InvalidData);

        assert!(reload(&one_region(vec![(0, Forward)], vec![0], Vec::new())).is_ok());
    }

    #[test]
    fn test_read_rejects_region_listed_under_wrong_code() {
        let corrupt = one_region(vec![(0, Forward)], Vec::new(), vec![0]);
        let err = reload(&corrupt).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("listed as"));
    }

    #[test]
    fn test_write_then_read() {
        let result = two_repeats();
        let mut buf = Vec::new();
        result.write_to(&mut buf).unwrap();
        let loaded = ScaffoldingResult::<OccOrC>::read_from(&mut buf.as_slice()).unwrap();
        assert_eq!(loaded, result);
    }
}
