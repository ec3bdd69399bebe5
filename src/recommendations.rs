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
Recomendaciones de mejora
=========================

Recomendaciones sencillas a partir del resultado del cálculo:

- nivel de aislamiento según la transmitancia global
- proporción de huecos acristalados sobre la superficie de muros
- coste del aislante de muros
*/

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::MaterialCatalog;
use crate::types::Performance;

/// Transmitancia global por encima de la cual el aislamiento es insuficiente [W/m²K]
pub const U_INSUFFICIENT: f64 = 2.0;
/// Transmitancia global por encima de la cual el aislamiento es mejorable [W/m²K]
pub const U_MODERATE: f64 = 1.0;
/// Proporción máxima de ventanas sobre la superficie bruta de muros
pub const MAX_WINDOW_RATIO: f64 = 0.4;
/// Coste unitario del aislamiento de muros a partir del cual se sugieren alternativas
pub const EXPENSIVE_INSULATION_COST: f64 = 20.0;

/// Tipo de recomendación
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Meets the target
    Success,
    /// Can be improved
    Info,
    /// Should be improved
    Warning,
}

/// Prioridad
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// High
    High,
    /// Medium
    Medium,
    /// Low
    Low,
}

/// Aspecto al que se refiere la recomendación
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topic {
    /// Overall insulation level
    Insulation,
    /// Window to wall ratio
    Glazing,
    /// Insulation cost
    Cost,
}

/// Recomendación de mejora
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Kind
    pub severity: Severity,
    /// Priority
    pub priority: Priority,
    /// Topic
    pub topic: Topic,
    /// Short title
    pub title: String,
    /// Description
    pub message: String,
}

impl Recommendation {
    fn new(severity: Severity, priority: Priority, topic: Topic, title: &str, message: &str) -> Self {
        Self {
            severity,
            priority,
            topic,
            title: title.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Success => "OK",
            Severity::Info => "INFO",
            Severity::Warning => "AVISO",
        };
        let priority = match self.priority {
            Priority::High => "alta",
            Priority::Medium => "media",
            Priority::Low => "baja",
        };
        write!(
            f,
            "[{}] {} (prioridad {}): {}",
            severity, self.title, priority, self.message
        )
    }
}

fn insulation_level(u_value: f64) -> Recommendation {
    if u_value > U_INSUFFICIENT {
        Recommendation::new(
            Severity::Warning,
            Priority::High,
            Topic::Insulation,
            "Aislamiento insuficiente",
            "La transmitancia es elevada. Se recomienda mejorar el aislamiento térmico.",
        )
    } else if u_value > U_MODERATE {
        Recommendation::new(
            Severity::Info,
            Priority::Medium,
            Topic::Insulation,
            "Aislamiento moderado",
            "El aislamiento es aceptable pero puede mejorarse.",
        )
    } else {
        Recommendation::new(
            Severity::Success,
            Priority::Low,
            Topic::Insulation,
            "Aislamiento excelente",
            "El aislamiento térmico cumple con criterios de alta eficiencia.",
        )
    }
}

/// Recomendaciones para el local a partir de su resultado detallado
///
/// The catalog is used to read the unit cost of the wall insulation.
pub fn recommendations(perf: &Performance, catalog: &MaterialCatalog) -> Vec<Recommendation> {
    let room = &perf.room;
    let mut recs = vec![insulation_level(perf.result.u_value)];

    let gross_wall_area = room.dimensions.gross_wall_area();
    if room.windows.count > 0 && gross_wall_area > 0.0 {
        let window_ratio = room.windows.area() / gross_wall_area;
        if window_ratio > MAX_WINDOW_RATIO {
            recs.push(Recommendation::new(
                Severity::Warning,
                Priority::Medium,
                Topic::Glazing,
                "Muchas ventanas",
                "La superficie de ventanas es elevada. Considere un vidrio de mejores prestaciones.",
            ));
        }
    }

    let cost = catalog
        .insulation(&room.walls.insulation)
        .ok()
        .and_then(|m| m.cost);
    if let Some(cost) = cost {
        if cost > EXPENSIVE_INSULATION_COST {
            recs.push(Recommendation::new(
                Severity::Info,
                Priority::Low,
                Topic::Cost,
                "Alternativas económicas",
                "Considere aislantes más económicos como EPS o fibra de vidrio.",
            ));
        }
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epc::default_catalog;
    use crate::performance::room_performance;
    use crate::types::{CalcParams, ElementConfig, RoomConfig};
    use pretty_assertions::assert_eq;

    fn topics(recs: &[Recommendation]) -> Vec<(Topic, Severity)> {
        recs.iter().map(|r| (r.topic, r.severity)).collect()
    }

    #[test]
    fn insulation_thresholds() {
        assert_eq!(insulation_level(2.5).severity, Severity::Warning);
        assert_eq!(insulation_level(2.5).priority, Priority::High);
        assert_eq!(insulation_level(2.0).severity, Severity::Info);
        assert_eq!(insulation_level(1.0).severity, Severity::Success);
        assert_eq!(insulation_level(0.0).priority, Priority::Low);
    }

    #[test]
    fn default_room_recommendations() {
        let catalog = default_catalog();
        let perf = room_performance(&RoomConfig::default(), &catalog, &CalcParams::default())
            .unwrap();
        // Suelo sin aislar y lana de roca (15 por unidad)
        assert_eq!(
            topics(&recommendations(&perf, &catalog)),
            vec![(Topic::Insulation, Severity::Info)]
        );
    }

    #[test]
    fn glazing_and_cost() {
        let catalog = default_catalog();
        let mut room = RoomConfig::default();
        room.walls = ElementConfig::uninsulated("concrete", 0.1);
        room.windows.count = 10;
        let perf = room_performance(&room, &catalog, &CalcParams::default()).unwrap();
        assert!(perf.result.u_value > U_INSUFFICIENT);
        assert_eq!(
            topics(&recommendations(&perf, &catalog)),
            vec![
                (Topic::Insulation, Severity::Warning),
                (Topic::Glazing, Severity::Warning),
            ]
        );

        room.walls = ElementConfig::new("brick", 0.2, "polyurethane", 0.1);
        room.windows.count = 1;
        let perf = room_performance(&room, &catalog, &CalcParams::default()).unwrap();
        let recs = recommendations(&perf, &catalog);
        assert_eq!(recs.last().unwrap().topic, Topic::Cost);
        assert_eq!(recs.last().unwrap().priority, Priority::Low);
    }
}
