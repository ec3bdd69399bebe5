// Copyright (c) 2018-2022  Ministerio de Fomento
//                          Instituto de Ciencias de la Construcción Eduardo Torroja (IETcc-CSIC)

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

// Author(s): Rafael Villar Burke <pachi@ietcc.csic.es>,
//            Daniel Jiménez González <dani@ietcc.csic.es>,
//            Marta Sorribes Gil <msorribes@ietcc.csic.es>

/*!
Parámetros de cálculo
=====================

Valores constantes del cálculo agrupados en un valor inmutable, para poder usar
valores alternativos sin estado global.
*/

use serde::{Deserialize, Serialize};

use crate::epc::{
    CO2_FACTOR, ENERGY_PRICE, HEATING_HOURS, RSI_INTERNAL, RSO_EXTERNAL, SYSTEM_EFFICIENCY,
    TEMPERATURE_DIFFERENCE,
};
use crate::types::{Meta, MetaVec};

/// Metadato de catálogo para la diferencia de temperatura de diseño
pub const META_DELTA_T: &str = "CALC_DELTA_T";
/// Metadato de catálogo para las horas anuales de calefacción
pub const META_HEATING_HOURS: &str = "CALC_HEATING_HOURS";
/// Metadato de catálogo para el rendimiento del sistema
pub const META_SYSTEM_EFFICIENCY: &str = "CALC_SYSTEM_EFFICIENCY";

/// Resistencias superficiales (BS EN ISO 6946) [m²K/W]
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceResistances {
    /// Internal surface resistance, Rsi
    pub rsi: f64,
    /// External surface resistance, Rso
    pub rso: f64,
}

impl SurfaceResistances {
    /// Rsi + Rso
    pub fn total(&self) -> f64 {
        self.rsi + self.rso
    }
}

impl Default for SurfaceResistances {
    fn default() -> Self {
        Self {
            rsi: RSI_INTERNAL,
            rso: RSO_EXTERNAL,
        }
    }
}

/// Periodo constructivo para el factor de puentes térmicos (y) [W/m²K]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgingEra {
    /// Built before 2002, poor thermal bridging control
    Pre2002,
    /// Complying with 2002 building regulations
    Year2002,
    /// Built after 2006
    Post2006,
}

impl BridgingEra {
    /// Linear thermal bridging factor, y [W/m²K]
    pub fn factor(self) -> f64 {
        match self {
            BridgingEra::Pre2002 => 0.15,
            BridgingEra::Year2002 => 0.11,
            BridgingEra::Post2006 => 0.08,
        }
    }
}

impl Default for BridgingEra {
    fn default() -> Self {
        BridgingEra::Post2006
    }
}

/// Parámetros del cálculo de prestaciones térmicas
///
/// Calculation constants passed explicitly into the performance computation
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalcParams {
    /// Surface resistances
    pub surfaces: SurfaceResistances,
    /// Design temperature difference, ΔT [K]
    pub delta_t: f64,
    /// Annual heating hours [h/year]
    pub heating_hours: f64,
    /// Heating system efficiency (0, 1]
    pub system_efficiency: f64,
    /// Construction era used for thermal bridging
    pub bridging: BridgingEra,
    /// Emission factor [kgCO2/kWh of delivered heat]
    pub co2_factor: f64,
    /// Energy price [currency/kWh]
    pub energy_price: f64,
}

impl Default for CalcParams {
    fn default() -> Self {
        Self {
            surfaces: SurfaceResistances::default(),
            delta_t: TEMPERATURE_DIFFERENCE,
            heating_hours: HEATING_HOURS,
            system_efficiency: SYSTEM_EFFICIENCY,
            bridging: BridgingEra::default(),
            co2_factor: CO2_FACTOR,
            energy_price: ENERGY_PRICE,
        }
    }
}

impl CalcParams {
    /// Sustituye los parámetros definidos en los metadatos
    ///
    /// Replace ΔT, heating hours and system efficiency with the values found in metadata.
    /// Keys that are missing or not numeric leave the current value untouched.
    pub fn with_meta_overrides<T: MetaVec>(mut self, meta: &T) -> Self {
        if let Some(v) = meta.get_meta_f64(META_DELTA_T) {
            self.delta_t = v;
        }
        if let Some(v) = meta.get_meta_f64(META_HEATING_HOURS) {
            self.heating_hours = v;
        }
        if let Some(v) = meta.get_meta_f64(META_SYSTEM_EFFICIENCY) {
            self.system_efficiency = v;
        }
        self
    }

    /// Metadatos que representan los parámetros ajustables
    pub fn to_meta(&self) -> Vec<Meta> {
        vec![
            Meta::new(META_DELTA_T, format!("{}", self.delta_t)),
            Meta::new(META_HEATING_HOURS, format!("{}", self.heating_hours)),
            Meta::new(META_SYSTEM_EFFICIENCY, format!("{}", self.system_efficiency)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Holder(Vec<Meta>);

    impl MetaVec for Holder {
        fn get_metavec(&self) -> &Vec<Meta> {
            &self.0
        }
        fn get_mut_metavec(&mut self) -> &mut Vec<Meta> {
            &mut self.0
        }
    }

    #[test]
    fn default_params() {
        let p = CalcParams::default();
        assert_eq!(p.surfaces.rsi, 0.13);
        assert_eq!(p.surfaces.rso, 0.04);
        assert_eq!(p.delta_t, 20.0);
        assert_eq!(p.heating_hours, 2000.0);
        assert_eq!(p.system_efficiency, 0.85);
        assert_eq!(p.bridging, BridgingEra::Post2006);
        assert_eq!(p.bridging.factor(), 0.08);
    }

    #[test]
    fn bridging_factors() {
        assert_eq!(BridgingEra::Pre2002.factor(), 0.15);
        assert_eq!(BridgingEra::Year2002.factor(), 0.11);
    }

    #[test]
    fn meta_overrides() {
        let meta = Holder(vec![
            Meta::new(META_DELTA_T, "18"),
            Meta::new(META_SYSTEM_EFFICIENCY, "no es un número"),
        ]);
        let p = CalcParams::default().with_meta_overrides(&meta);
        assert_eq!(p.delta_t, 18.0);
        assert_eq!(p.heating_hours, 2000.0);
        assert_eq!(p.system_efficiency, 0.85);

        let roundtrip = CalcParams::default().with_meta_overrides(&Holder(p.to_meta()));
        assert_eq!(roundtrip, p);
    }
}
