//! Enumerated domains for text-valued inputs.
//!
//! Each domain is a plain enum whose variants map one-to-one onto the labels a
//! user may type into an input table. Parsing an unknown label fails with
//! [`FdcicError::InvalidCategoricalValue`] naming the field and the valid set,
//! so a typo never silently selects a fallback branch.

use crate::errors::{FdcicError, FdcicResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of labels accepted by one input field.
pub trait Categorical: Sized + Copy + 'static {
    /// Name of the input variable holding the label
    const FIELD: &'static str;
    /// Every accepted label with its variant
    const OPTIONS: &'static [(&'static str, Self)];

    fn label(self) -> &'static str;

    fn parse(value: &str) -> FdcicResult<Self> {
        Self::OPTIONS
            .iter()
            .find(|(label, _)| *label == value)
            .map(|(_, variant)| *variant)
            .ok_or_else(|| FdcicError::InvalidCategoricalValue {
                field: Self::FIELD.to_string(),
                value: value.to_string(),
                valid: Self::labels().iter().map(|l| l.to_string()).collect(),
            })
    }

    fn labels() -> Vec<&'static str> {
        Self::OPTIONS.iter().map(|(label, _)| *label).collect()
    }
}

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl Categorical for $name {
            const FIELD: &'static str = $field;
            const OPTIONS: &'static [(&'static str, Self)] = &[$(($label, $name::$variant)),+];

            fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

categorical!(
    /// Ammonia production pathway.
    NitrogenSource, "Nfertilizer_source" {
        /// Steam methane reforming
        Conventional => "Conventional",
        Green => "Green",
    }
);

categorical!(
    CoverCrop, "CC_Choice" {
        CoverCrop => "Cover crop",
        NoCoverCrop => "No cover crop",
    }
);

categorical!(
    Manure, "Manure_Choice" {
        Manure => "Manure",
        NoManure => "No manure",
    }
);

categorical!(
    /// Climate zone driving the regionalized fertilizer N2O factors.
    ClimateZone, "Climate_zone" {
        NoConsideration => "No consideration",
        NotAvailable => "NA",
        WetOrMoist => "Wet or Moist",
        Dry => "Dry",
    }
);

categorical!(
    /// Water regime during the rice cultivation period.
    WaterRegimeCultivation, "Rice_water_regime_during_cultivation" {
        ContinuouslyFlooded => "Continuously flooded",
        SingleDrainage => "Single drainage period",
        MultipleDrainage => "Multiple drainage period",
        RegularRainfed => "Regular rainfed",
        DroughtProne => "Drought prone",
        DeepWater => "Deep water",
    }
);

categorical!(
    /// Water regime in the season before rice cultivation.
    WaterRegimePreSeason, "Rice_water_regime_pre_season" {
        NonFloodedShort => "Non flooded pre-season <180 d",
        NonFloodedLong => "Non flooded pre-season >180 d",
        Flooded => "Flooded pre-season (>30 d)",
        NonFloodedOverYear => "Non flooded pre-season >365 d",
    }
);

categorical!(
    StrawIncorporation, "Rice_time_for_straw_incorporation" {
        Shortly => "Straw incorporated shortly (<30 days) before cultivation",
        Long => "Straw incorporated long (>30 days) before cultivation",
    }
);

categorical!(
    /// Nitrogen management practice for corn.
    NitrogenManagement, "N_management_corn" {
        BusinessAsUsual => "Business as usual",
        FourR => "4R (Right time, Right place, Right form, and Right rate)",
    }
);

categorical!(
    Tillage, "Tillage_Choice" {
        Conventional => "Conventional tillage",
        Reduced => "Reduced tillage",
        NoTill => "No till",
    }
);

impl NitrogenSource {
    /// Prefix of the ammonia production constants for this pathway.
    pub fn prefix(self) -> &'static str {
        match self {
            NitrogenSource::Conventional => "",
            NitrogenSource::Green => "Green_",
        }
    }
}

impl ClimateZone {
    /// Direct N2O-N emitted per unit of fertilizer N applied to corn.
    pub fn direct_n2o_factor(self) -> f64 {
        match self {
            ClimateZone::NoConsideration | ClimateZone::NotAvailable | ClimateZone::WetOrMoist => {
                0.01
            }
            ClimateZone::Dry => 0.005,
        }
    }

    /// Indirect (volatilization and leaching) N2O-N per unit of fertilizer N.
    pub fn indirect_n2o_factor(self) -> f64 {
        match self {
            ClimateZone::NoConsideration | ClimateZone::NotAvailable => 0.00374,
            ClimateZone::WetOrMoist => 0.00418,
            ClimateZone::Dry => 0.00055,
        }
    }
}

impl WaterRegimeCultivation {
    /// Methane scaling factor SFw.
    pub fn scaling_factor(self) -> f64 {
        match self {
            WaterRegimeCultivation::ContinuouslyFlooded => 1.0,
            WaterRegimeCultivation::SingleDrainage => 0.71,
            WaterRegimeCultivation::MultipleDrainage => 0.55,
            WaterRegimeCultivation::RegularRainfed => 0.54,
            WaterRegimeCultivation::DroughtProne => 0.16,
            WaterRegimeCultivation::DeepWater => 0.06,
        }
    }
}

impl WaterRegimePreSeason {
    /// Methane scaling factor SFp.
    pub fn scaling_factor(self) -> f64 {
        match self {
            WaterRegimePreSeason::NonFloodedShort => 1.0,
            WaterRegimePreSeason::NonFloodedLong => 0.89,
            WaterRegimePreSeason::Flooded => 2.41,
            WaterRegimePreSeason::NonFloodedOverYear => 0.59,
        }
    }
}

impl StrawIncorporation {
    /// Effect of the straw relative to straw applied shortly before cultivation.
    pub fn amendment_factor(self) -> f64 {
        match self {
            StrawIncorporation::Shortly => 1.0,
            StrawIncorporation::Long => 0.19,
        }
    }
}
