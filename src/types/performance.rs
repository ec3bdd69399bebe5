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
Resultados
==========

Resultado del cálculo de prestaciones térmicas (resumen y desglose).
*/

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::types::{CalcParams, RoomConfig};

/// Resumen de prestaciones térmicas del local
///
/// Thermal performance summary
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceResult {
    /// Overall U-value over the full nominal envelope [W/m²K]. Reference only.
    pub u_value: f64,
    /// Total fabric heat loss at design conditions [W]
    pub heat_loss: f64,
    /// Energy efficiency score [1, 100]
    pub energy_score: u8,
    /// Annual energy consumption [kWh/year]
    pub energy_consumption_per_year: f64,
}

impl PerformanceResult {
    /// Result of a room with no heat-loss surface
    pub fn enclosed() -> Self {
        Self {
            u_value: 0.0,
            heat_loss: 0.0,
            energy_score: 100,
            energy_consumption_per_year: 0.0,
        }
    }

    /// EPC band of the score
    pub fn band(&self) -> EpcBand {
        EpcBand::from_score(self.energy_score)
    }
}

/// Banda de calificación EPC
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
pub enum EpcBand {
    /// 92-100
    A,
    /// 81-91
    B,
    /// 69-80
    C,
    /// 55-68
    D,
    /// 39-54
    E,
    /// 21-38
    F,
    /// 1-20
    G,
}

impl EpcBand {
    /// All bands, best first
    pub const ALL: [EpcBand; 7] = [
        EpcBand::A,
        EpcBand::B,
        EpcBand::C,
        EpcBand::D,
        EpcBand::E,
        EpcBand::F,
        EpcBand::G,
    ];

    /// Score range (min, max) of the band
    pub fn score_range(self) -> (u8, u8) {
        match self {
            EpcBand::A => (92, 100),
            EpcBand::B => (81, 91),
            EpcBand::C => (69, 80),
            EpcBand::D => (55, 68),
            EpcBand::E => (39, 54),
            EpcBand::F => (21, 38),
            EpcBand::G => (1, 20),
        }
    }

    /// Band holding a score. Scores below 1 fall in G.
    pub fn from_score(score: u8) -> Self {
        EpcBand::ALL
            .iter()
            .cloned()
            .find(|b| score >= b.score_range().0)
            .unwrap_or(EpcBand::G)
    }
}

/// Elemento de la envolvente
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ElementKind {
    /// Opaque walls, net of openings
    #[strum(serialize = "Muros")]
    Walls,
    /// Windows
    #[strum(serialize = "Ventanas")]
    Windows,
    /// Door
    #[strum(serialize = "Puerta")]
    Door,
    /// Roof
    #[strum(serialize = "Cubierta")]
    Roof,
    /// Floor
    #[strum(serialize = "Suelo")]
    Floor,
}

/// Superficies expuestas al exterior, por elemento [m²]
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExposedAreas {
    /// Exposed wall area, net of openings
    pub walls: f64,
    /// Window area on exposed walls
    pub windows: f64,
    /// Door area, when the front wall is exposed
    pub door: f64,
    /// Roof area, when the ceiling is exposed
    pub roof: f64,
    /// Floor area, when the floor is exposed
    pub floor: f64,
}

impl ExposedAreas {
    /// Sum of the five exposed areas
    pub fn total(&self) -> f64 {
        self.walls + self.windows + self.door + self.roof + self.floor
    }

    /// Window and door area, used for thermal bridging
    pub fn openings(&self) -> f64 {
        self.windows + self.door
    }

    /// Area of an element
    pub fn get(&self, kind: ElementKind) -> f64 {
        match kind {
            ElementKind::Walls => self.walls,
            ElementKind::Windows => self.windows,
            ElementKind::Door => self.door,
            ElementKind::Roof => self.roof,
            ElementKind::Floor => self.floor,
        }
    }
}

/// Pérdidas de un elemento
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementLoss {
    /// Element
    pub kind: ElementKind,
    /// Exposed area [m²]
    pub area: f64,
    /// Element U-value [W/m²K]
    pub u_value: f64,
    /// A·U [W/K]
    pub loss: f64,
}

/// Coeficiente de pérdidas por la envolvente [W/K]
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FabricLoss {
    /// Σ A·U of the elements
    pub elements: f64,
    /// Thermal bridging
    pub bridging: f64,
    /// Elements + bridging
    pub total: f64,
}

/// Indicadores derivados
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    /// Heat loss per floor area [W/m²]
    pub heat_loss_m2: f64,
    /// Annual consumption per floor area [kWh/m².year]
    pub energy_m2: f64,
    /// Annual CO2 emissions [kgCO2/year]
    pub co2: f64,
    /// Annual heating cost [currency/year]
    pub cost: f64,
}

/// Datos y resultados detallados del cálculo
///
/// Detailed performance: inputs echo, area accounting, per-element losses and summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Performance {
    /// Room configuration
    pub room: RoomConfig,
    /// Calculation parameters
    pub params: CalcParams,
    /// Exposed areas
    pub areas: ExposedAreas,
    /// Per-element losses (empty for an enclosed room)
    pub elements: Vec<ElementLoss>,
    /// Fabric heat loss coefficient
    pub fabric: FabricLoss,
    /// Summary
    pub result: PerformanceResult,
    /// EPC band of the score
    pub band: EpcBand,
    /// Derived indicators
    pub indicators: Indicators,
}
