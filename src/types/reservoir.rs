//! Physical constants supplied per analysis call (field units)

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_positive, AnalysisError, Result};

/// Rock, fluid and wellbore properties that stay constant for one analysis.
///
/// Units: Bo in rb/STB, viscosity in cp, thickness and wellbore radius in ft,
/// porosity as a fraction, total compressibility in 1/psi, initial pressure
/// in psia.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReservoirProperties {
    pub formation_volume_factor: f64,
    pub viscosity_cp: f64,
    pub thickness_ft: f64,
    pub porosity: f64,
    pub total_compressibility: f64,
    pub wellbore_radius_ft: f64,
    pub initial_pressure_psia: f64,
}

impl ReservoirProperties {
    /// Reject non-finite values and non-positive divisors.
    pub fn validate(&self) -> Result<()> {
        require_positive("formation_volume_factor", self.formation_volume_factor)?;
        require_positive("viscosity_cp", self.viscosity_cp)?;
        require_positive("thickness_ft", self.thickness_ft)?;
        require_positive("porosity", self.porosity)?;
        if self.porosity > 1.0 {
            return Err(AnalysisError::InvalidConstant {
                name: "porosity",
                value: self.porosity,
                reason: "must be a fraction no greater than 1",
            });
        }
        require_positive("total_compressibility", self.total_compressibility)?;
        require_positive("wellbore_radius_ft", self.wellbore_radius_ft)?;
        require_finite("initial_pressure_psia", self.initial_pressure_psia)?;
        Ok(())
    }

    /// Diffusivity group `k / (poro * mu * ct * rw^2)` shared by every skin formula.
    pub fn diffusivity_group(&self, permeability_md: f64) -> f64 {
        permeability_md
            / (self.porosity
                * self.viscosity_cp
                * self.total_compressibility
                * self.wellbore_radius_ft.powi(2))
    }
}
