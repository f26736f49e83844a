use crate::region::RegionIndex;
use thiserror::Error;

/// Direction of the step that failed while walking the solution circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkDirection {
    Successor,
    Predecessor,
    /// The walk came back to a vertex other than where it started
    Revisit,
}

impl std::fmt::Display for WalkDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalkDirection::Successor => f.write_str("no selected outgoing arc"),
            WalkDirection::Predecessor => f.write_str("no selected incoming arc"),
            WalkDirection::Revisit => f.write_str("walk revisits the vertex"),
        }
    }
}

/// Fatal failures of a region reconstruction.
///
/// Every variant means the solution or the graph broke a precondition: the
/// selected arcs do not form a circuit, or the repeat halves do not pair up.
/// Re-running the same walk cannot succeed.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Not a circuit: {direction} at vertex {vertex}")]
    NotACircuit {
        vertex: String,
        direction: WalkDirection,
    },

    #[error("Pairing mismatch in region {region}: expected {}, found {found}", .expected.as_deref().unwrap_or("no pending half"))]
    PairingMismatch {
        region: RegionIndex,
        expected: Option<String>,
        found: String,
    },

    #[error("Unbalanced repeat region {region}: {pending} unpaired half(s)")]
    UnbalancedRepeat { region: RegionIndex, pending: usize },

    #[error("Region reconstruction failed for ILP {ilp_combination} from starter {starter}: {source}")]
    Reconstruction {
        ilp_combination: String,
        starter: String,
        #[source]
        source: Box<ScaffoldError>,
    },
}

impl ScaffoldError {
    /// The underlying failure, without the ILP stage context
    pub fn root_cause(&self) -> &ScaffoldError {
        match self {
            ScaffoldError::Reconstruction { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub(crate) fn not_a_circuit<V: std::fmt::Debug>(vertex: &V, direction: WalkDirection) -> Self {
        ScaffoldError::NotACircuit {
            vertex: format!("{:?}", vertex),
            direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_unwraps_context() {
        let err = ScaffoldError::Reconstruction {
            ilp_combination: "ir".to_string(),
            starter: "(0, +, 0)".to_string(),
            source: Box::new(ScaffoldError::not_a_circuit(&7u32, WalkDirection::Successor)),
        };
        assert!(matches!(
            err.root_cause(),
            ScaffoldError::NotACircuit { direction: WalkDirection::Successor, .. }
        ));
        let msg = err.to_string();
        assert!(msg.contains("ILP ir"));
        assert!(msg.contains("no selected outgoing arc at vertex 7"));
    }

    #[test]
    fn test_pairing_mismatch_message() {
        let err = ScaffoldError::PairingMismatch {
            region: 2,
            expected: None,
            found: "x".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Pairing mismatch in region 2: expected no pending half, found x"
        );
    }
}
