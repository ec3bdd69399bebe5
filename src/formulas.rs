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
Fórmulas de cálculo térmico
===========================

Funciones puras que implementan cada fórmula física (BS EN ISO 6946 y metodología EPC):

- Resistencia térmica: R = Rsi + d1/λ1 + d2/λ2 + Rso
- Transmitancia: U = 1/R
- Corrección de ventanas por cortinas: U' = 1/(1/U + 0.04)
- Pérdidas por elementos: Σ Ai·Ui
- Puentes térmicos: HTB = y·A_ext
- Coeficiente total de pérdidas: HF = Σ Ai·Ui + HTB
- Puntuación de eficiencia a partir del consumo por m² (bandas EPC)

Ninguna de ellas conoce la estructura del local.
*/

use serde::{Deserialize, Serialize};

use crate::types::{EpcBand, SurfaceResistances};

/// Resistencia térmica adicional de las cortinas [m²K/W]
pub const CURTAIN_RESISTANCE: f64 = 0.04;

/// Capa homogénea de material
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Thickness, d [m]
    pub thickness: f64,
    /// Thermal conductivity, λ [W/mK]. Must be > 0.
    pub conductivity: f64,
}

impl Layer {
    /// Constructor
    pub fn new(thickness: f64, conductivity: f64) -> Self {
        Self {
            thickness,
            conductivity,
        }
    }

    /// d/λ [m²K/W]
    pub fn resistance(&self) -> f64 {
        self.thickness / self.conductivity
    }
}

/// Capa de aislamiento de un elemento
///
/// Insulation layer of an opaque element, or its absence
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub enum Insulation {
    /// Insulation layer. Conductivity must be > 0.
    Insulated {
        /// Thickness, d [m]
        thickness: f64,
        /// Thermal conductivity, λ [W/mK]
        conductivity: f64,
    },
    /// No insulation layer
    Uninsulated,
}

impl Insulation {
    /// d/λ of the insulation layer, 0 when uninsulated [m²K/W]
    pub fn resistance(&self) -> f64 {
        match *self {
            Insulation::Insulated {
                thickness,
                conductivity,
            } => Layer::new(thickness, conductivity).resistance(),
            Insulation::Uninsulated => 0.0,
        }
    }
}

/// Superficie y transmitancia de un elemento
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaU {
    /// Area [m²]
    pub area: f64,
    /// U-value [W/m²K]
    pub u_value: f64,
}

impl AreaU {
    /// Constructor
    pub fn new(area: f64, u_value: f64) -> Self {
        Self { area, u_value }
    }
}

/// Resistencia térmica total, incluyendo resistencias superficiales [m²K/W]
///
/// R_total = Rsi + d1/λ1 + d2/λ2 + Rso
pub fn thermal_resistance(
    base: Layer,
    insulation: Insulation,
    surfaces: SurfaceResistances,
) -> f64 {
    surfaces.rsi + base.resistance() + insulation.resistance() + surfaces.rso
}

/// Transmitancia térmica a partir de la resistencia total [W/m²K]
///
/// The caller guarantees `resistance > 0`.
pub fn u_value(resistance: f64) -> f64 {
    1.0 / resistance
}

/// Transmitancia de ventana corregida por el uso de cortinas [W/m²K]
pub fn adjust_window_u_value_for_curtains(u_value: f64) -> f64 {
    1.0 / (1.0 / u_value + CURTAIN_RESISTANCE)
}

/// Pérdidas por elementos, Σ Ai·Ui [W/K]
pub fn fabric_heat_loss_elements(elements: &[AreaU]) -> f64 {
    elements.iter().map(|e| e.area * e.u_value).sum()
}

/// Pérdidas por puentes térmicos, HTB = y·A_ext [W/K]
pub fn thermal_bridging_loss(external_area: f64, bridge_factor: f64) -> f64 {
    bridge_factor * external_area
}

/// Coeficiente total de pérdidas por la envolvente, HF = Σ Ai·Ui + HTB [W/K]
pub fn total_fabric_heat_loss(elements_loss: f64, bridging_loss: f64) -> f64 {
    elements_loss + bridging_loss
}

// Tramo de consumo de una banda EPC. La puntuación decrece linealmente desde
// `score_at_start` con pendiente `slope` a partir de `start`.
struct BandSegment {
    band: EpcBand,
    upper: f64,
    start: f64,
    score_at_start: f64,
    slope: f64,
}

impl BandSegment {
    fn contains(&self, energy_m2: f64) -> bool {
        // A is open above 50, the rest include their upper edge
        if self.band == EpcBand::A {
            energy_m2 < self.upper
        } else {
            energy_m2 <= self.upper
        }
    }

    fn score(&self, energy_m2: f64) -> f64 {
        let (min, max) = self.band.score_range();
        let raw = self.score_at_start - (energy_m2 - self.start) * self.slope;
        num::clamp(raw, f64::from(min), f64::from(max))
    }
}

const BAND_SEGMENTS: [BandSegment; 7] = [
    BandSegment { band: EpcBand::A, upper: 50.0, start: 0.0, score_at_start: 100.0, slope: 1.0 },
    BandSegment { band: EpcBand::B, upper: 90.0, start: 50.0, score_at_start: 92.0, slope: 11.0 / 40.0 },
    BandSegment { band: EpcBand::C, upper: 150.0, start: 90.0, score_at_start: 81.0, slope: 12.0 / 60.0 },
    BandSegment { band: EpcBand::D, upper: 230.0, start: 150.0, score_at_start: 69.0, slope: 14.0 / 80.0 },
    BandSegment { band: EpcBand::E, upper: 330.0, start: 230.0, score_at_start: 55.0, slope: 16.0 / 100.0 },
    BandSegment { band: EpcBand::F, upper: 450.0, start: 330.0, score_at_start: 39.0, slope: 18.0 / 120.0 },
    BandSegment { band: EpcBand::G, upper: std::f64::INFINITY, start: 450.0, score_at_start: 21.0, slope: 20.0 / 100.0 },
];

fn band_segment(energy_m2: f64) -> &'static BandSegment {
    BAND_SEGMENTS
        .iter()
        .find(|s| s.contains(energy_m2))
        .unwrap_or(&BAND_SEGMENTS[BAND_SEGMENTS.len() - 1])
}

/// Puntuación de eficiencia (1-100) a partir del consumo anual por m² [kWh/m².año]
///
/// Piecewise linear banding mirroring UK EPC thresholds. Within each band the score falls
/// linearly with consumption and is clamped to the band's score range. Not rounded.
pub fn energy_score_from_consumption(energy_m2: f64) -> f64 {
    band_segment(energy_m2).score(energy_m2)
}

/// Banda EPC correspondiente a un consumo anual por m² [kWh/m².año]
pub fn epc_band_from_consumption(energy_m2: f64) -> EpcBand {
    band_segment(energy_m2).band
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use pretty_assertions::assert_eq;

    const SURFACES: SurfaceResistances = SurfaceResistances {
        rsi: 0.13,
        rso: 0.04,
    };

    fn rockwool(thickness: f64) -> Insulation {
        Insulation::Insulated {
            thickness,
            conductivity: 0.04,
        }
    }

    #[test]
    fn brick_and_rockwool_wall() {
        let r = thermal_resistance(Layer::new(0.2, 0.87), rockwool(0.1), SURFACES);
        assert_abs_diff_eq!(r, 2.9, epsilon = 0.001);
        assert_abs_diff_eq!(u_value(r), 0.345, epsilon = 0.001);
    }

    #[test]
    fn uninsulated_resistance() {
        let r = thermal_resistance(Layer::new(0.2, 0.87), Insulation::Uninsulated, SURFACES);
        assert_relative_eq!(r, 0.13 + 0.2 / 0.87 + 0.04);
    }

    #[test]
    fn resistance_never_below_surface_resistances() {
        for &d in &[0.0, 0.05, 0.2, 0.5] {
            for &lambda in &[0.025, 0.87, 50.0] {
                let r = thermal_resistance(Layer::new(d, lambda), rockwool(d), SURFACES);
                assert!(r >= SURFACES.total());
            }
        }
        let r = thermal_resistance(Layer::new(0.0, 1.4), Insulation::Uninsulated, SURFACES);
        assert_relative_eq!(r, SURFACES.total());
    }

    #[test]
    fn u_value_is_inverse() {
        assert_eq!(u_value(2.0), 0.5);
        assert_eq!(u_value(0.25), 4.0);
    }

    #[test]
    fn u_value_monotonicity() {
        let u = |d: f64, lambda: f64, d_ins: f64| {
            u_value(thermal_resistance(
                Layer::new(d, lambda),
                rockwool(d_ins),
                SURFACES,
            ))
        };
        assert!(u(0.3, 0.87, 0.1) < u(0.2, 0.87, 0.1));
        assert!(u(0.2, 0.87, 0.15) < u(0.2, 0.87, 0.1));
        assert!(u(0.2, 1.4, 0.1) > u(0.2, 0.87, 0.1));
        let poly = u_value(thermal_resistance(
            Layer::new(0.2, 0.87),
            Insulation::Insulated {
                thickness: 0.1,
                conductivity: 0.025,
            },
            SURFACES,
        ));
        assert!(poly < u(0.2, 0.87, 0.1));
    }

    #[test]
    fn curtains_reduce_window_u_value() {
        for &u in &[0.5, 1.6, 2.8, 5.8, 100.0] {
            assert!(adjust_window_u_value_for_curtains(u) < u);
        }
        assert_relative_eq!(adjust_window_u_value_for_curtains(2.8), 1.0 / (1.0 / 2.8 + 0.04));
    }

    #[test]
    fn elements_loss() {
        assert_eq!(fabric_heat_loss_elements(&[]), 0.0);
        let elements = [
            AreaU::new(39.8, 0.345),
            AreaU::new(3.6, 2.518),
            AreaU::new(1.6, 2.0),
        ];
        let mut reversed = elements;
        reversed.reverse();
        assert_relative_eq!(
            fabric_heat_loss_elements(&elements),
            fabric_heat_loss_elements(&reversed)
        );
        assert_relative_eq!(
            fabric_heat_loss_elements(&elements),
            39.8 * 0.345 + 3.6 * 2.518 + 1.6 * 2.0
        );
    }

    #[test]
    fn bridging_and_total() {
        assert_eq!(thermal_bridging_loss(100.0, 0.08), 8.0);
        assert_eq!(thermal_bridging_loss(0.0, 0.15), 0.0);
        assert_eq!(total_fabric_heat_loss(35.0, 0.5), 35.5);
    }

    #[test]
    fn score_band_edges() {
        let score = |e: f64| energy_score_from_consumption(e).round() as u8;
        assert_eq!(score(0.0), 100);
        assert_eq!(score(10.0), 92);
        assert_eq!(score(49.9), 92);
        assert_eq!(score(50.0), 91);
        assert_eq!(score(90.0), 81);
        assert_eq!(score(90.5), 80);
        assert_eq!(score(120.0), 75);
        assert_eq!(score(150.0), 69);
        assert_eq!(score(200.0), 60);
        assert_eq!(score(230.0), 55);
        assert_eq!(score(300.0), 44);
        assert_eq!(score(330.0), 39);
        assert_eq!(score(450.0), 21);
        assert_eq!(score(451.0), 20);
        assert_eq!(score(500.0), 11);
        assert_eq!(score(560.0), 1);
        assert_eq!(score(10_000.0), 1);
    }

    #[test]
    fn score_is_monotonic_and_bounded() {
        let mut last = std::f64::INFINITY;
        let mut e = 0.0;
        while e < 700.0 {
            let s = energy_score_from_consumption(e);
            assert!(s <= last, "score grows at {} kWh/m2", e);
            assert!(s >= 1.0 && s <= 100.0);
            last = s;
            e += 0.25;
        }
    }

    #[test]
    fn bands_from_consumption() {
        assert_eq!(epc_band_from_consumption(20.0), EpcBand::A);
        assert_eq!(epc_band_from_consumption(50.0), EpcBand::B);
        assert_eq!(epc_band_from_consumption(90.0), EpcBand::B);
        assert_eq!(epc_band_from_consumption(150.0), EpcBand::C);
        assert_eq!(epc_band_from_consumption(231.0), EpcBand::E);
        assert_eq!(epc_band_from_consumption(1000.0), EpcBand::G);
        for &e in &[0.0, 49.0, 75.0, 149.0, 200.0, 300.0, 400.0, 600.0] {
            let s = energy_score_from_consumption(e).round() as u8;
            assert_eq!(EpcBand::from_score(s), epc_band_from_consumption(e));
        }
    }
}
