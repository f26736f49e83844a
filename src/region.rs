use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense, zero-based index of a genomic region, in creation order
pub type RegionIndex = usize;

/// One occurrence of a region in the map of regions
pub type OrientedRegion = (RegionIndex, Orientation);

/// Kind of genomic region a multiplied oriented contig belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionCode {
    SingleCopy,
    InvertedRepeat,
    DirectRepeat,
}

impl RegionCode {
    /// Short tag used in logs and file names
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionCode::SingleCopy => "sc",
            RegionCode::InvertedRepeat => "ir",
            RegionCode::DirectRepeat => "dr",
        }
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strand orientation of a contig or of a region occurrence
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Forward,
    Reverse,
}

impl Orientation {
    /// The opposite strand
    pub fn rev(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Reverse,
            Orientation::Reverse => Orientation::Forward,
        }
    }

    /// Integer value of the orientation (forward = 0, reverse = 1)
    pub fn as_int(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Forward => f.write_str("+"),
            Orientation::Reverse => f.write_str("-"),
        }
    }
}

/// Identifies which ILP sub-problem of a multi-stage pipeline produced a result.
///
/// This is provenance only: it labels the stage (inverted repeats, direct
/// repeats, single copy), not the kind of an individual region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IlpCode {
    InvertedRepeats,
    DirectRepeats,
    SingleCopy,
}

impl IlpCode {
    /// Short tag used in logs and file names
    pub fn as_str(&self) -> &'static str {
        match self {
            IlpCode::InvertedRepeats => "ir",
            IlpCode::DirectRepeats => "dr",
            IlpCode::SingleCopy => "sc",
        }
    }
}

impl fmt::Display for IlpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Join ILP codes into a combination label, e.g. `ir_dr_sc`
pub fn ilp_combination<'a, I>(ilp_codes: I) -> String
where
    I: IntoIterator<Item = &'a IlpCode>,
{
    ilp_codes
        .into_iter()
        .map(IlpCode::as_str)
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_rev() {
        assert_eq!(Orientation::Forward.rev(), Orientation::Reverse);
        assert_eq!(Orientation::Reverse.rev(), Orientation::Forward);
        assert_eq!(Orientation::Forward.as_int(), 0);
        assert_eq!(Orientation::Reverse.as_int(), 1);
    }

    #[test]
    fn test_ilp_combination() {
        assert_eq!(
            ilp_combination(&[IlpCode::InvertedRepeats, IlpCode::DirectRepeats, IlpCode::SingleCopy]),
            "ir_dr_sc"
        );
        assert_eq!(ilp_combination(&Vec::<IlpCode>::new()), "");
    }
}
