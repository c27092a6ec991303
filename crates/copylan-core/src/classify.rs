// ── Interface taxonomy ──
//
// ION hardware presents LAN VLANs one of two ways. Appliances without an
// integrated switch carve VLANs out of a routed port as sub-interfaces;
// switch-equipped appliances use SVIs with the VLAN list trunked on a
// parent port.

use serde::Serialize;
use strum::{Display, EnumString};

/// Models that present VLANs as sub-interfaces. Everything else is SVI.
pub const SUBINTERFACE_MODELS: &[&str] = &[
    "ion 1000",
    "ion 1200",
    "ion 2000",
    "ion 3000",
    "ion 3102v",
    "ion 3104v",
    "ion 3108v",
    "ion 7000",
    "ion 7108v",
    "ion 7116v",
    "ion 7132v",
    "ion 9000",
];

/// How an element models its LAN VLANs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InterfaceTaxonomy {
    /// One `subinterface` object per VLAN, each with a `parent` reference.
    SubInterface,
    /// One `vlan` object per VLAN; membership is trunked on a shared parent port.
    Svi,
}

impl InterfaceTaxonomy {
    /// The interface `type` that carries VLANs under this taxonomy.
    pub fn vlan_interface_type(self) -> &'static str {
        match self {
            Self::SubInterface => "subinterface",
            Self::Svi => "vlan",
        }
    }

    /// Whether the parent port's trunk list must be copied after the VLANs.
    pub fn has_parent_trunk(self) -> bool {
        matches!(self, Self::Svi)
    }
}

/// Classify an element by model name.
///
/// Unrecognized (or empty) models are treated as SVI.
pub fn classify(model: &str) -> InterfaceTaxonomy {
    if SUBINTERFACE_MODELS.contains(&model) {
        InterfaceTaxonomy::SubInterface
    } else {
        InterfaceTaxonomy::Svi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_listed_models_are_subinterface() {
        for model in SUBINTERFACE_MODELS {
            assert_eq!(classify(model), InterfaceTaxonomy::SubInterface, "{model}");
        }
    }

    #[test]
    fn other_models_default_to_svi() {
        for model in ["", "ion 3200", "ion 5200", "ion 9200", "ion 1200-s", "unknown"] {
            assert_eq!(classify(model), InterfaceTaxonomy::Svi, "{model:?}");
        }
    }

    #[test]
    fn taxonomy_selects_vlan_type() {
        assert_eq!(
            InterfaceTaxonomy::SubInterface.vlan_interface_type(),
            "subinterface"
        );
        assert_eq!(InterfaceTaxonomy::Svi.vlan_interface_type(), "vlan");
        assert!(InterfaceTaxonomy::Svi.has_parent_trunk());
        assert!(!InterfaceTaxonomy::SubInterface.has_parent_trunk());
    }

    #[test]
    fn taxonomy_display() {
        assert_eq!(InterfaceTaxonomy::SubInterface.to_string(), "sub_interface");
        assert_eq!(InterfaceTaxonomy::Svi.to_string(), "svi");
    }
}
