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
Valores y utilidades de cálculo tipo EPC
========================================

- valores por defecto de los parámetros de cálculo
- catálogo de materiales por defecto
- salida en formato de texto simple de los resultados
*/

use itertools::Itertools;
use log::error;

use crate::catalog::MaterialCatalog;
use crate::recommendations::Recommendation;
use crate::types::{ElementLoss, Performance};

/// Resistencia superficial interior, Rsi [m²K/W]
pub const RSI_INTERNAL: f64 = 0.13;
/// Resistencia superficial exterior, Rso [m²K/W]
pub const RSO_EXTERNAL: f64 = 0.04;
/// Diferencia de temperatura de diseño interior-exterior, ΔT [K]
pub const TEMPERATURE_DIFFERENCE: f64 = 20.0;
/// Horas anuales de calefacción [h/año]
pub const HEATING_HOURS: f64 = 2000.0;
/// Rendimiento del sistema de calefacción [-]
pub const SYSTEM_EFFICIENCY: f64 = 0.85;
/// Factor de emisiones [kg_CO2/kWh]
pub const CO2_FACTOR: f64 = 0.2;
/// Precio de la energía [€/kWh]
pub const ENERGY_PRICE: f64 = 0.15;

/// Catálogo de materiales por defecto
pub const DEFAULT_CATALOG: &str = "tabla, id, valor, densidad, coste # nombre
# Materiales de muros: conductividad [W/mK]
WALL, brick, 0.87, 1800, - # Solid Brick
WALL, concrete, 1.4, 2300, - # Concrete
WALL, wood, 0.15, 500, - # Wood
WALL, hollow_brick, 0.45, 1200, - # Hollow Brick
# Materiales de cubiertas: conductividad [W/mK]
ROOF, concrete, 1.4, 2300, - # Concrete Slab
ROOF, wood, 0.15, 500, - # Wood Structure
ROOF, metal, 50, 7800, - # Metal Sheet
# Materiales de suelos: conductividad [W/mK]
FLOOR, concrete, 1.4, 2300, - # Concrete Slab
FLOOR, wood, 0.15, 500, - # Timber Floor
FLOOR, screed, 0.41, 1200, - # Cement Screed
# Aislantes: conductividad [W/mK] y coste [€/m2]
INSULATION, none, 0, -, 0 # No Insulation
INSULATION, rockwool, 0.04, -, 15 # Rock Wool
INSULATION, eps, 0.035, -, 12 # Expanded Polystyrene (EPS)
INSULATION, polyurethane, 0.025, -, 25 # Polyurethane
INSULATION, fiberglass, 0.045, -, 10 # Fiberglass
INSULATION, cellulose, 0.042, -, 8 # Cellulose
# Vidrios: transmitancia [W/m2K]
WINDOW, single, 5.8, -, - # Single Glass
WINDOW, double, 2.8, -, - # Double Glazing
WINDOW, triple, 1.6, -, - # Triple Glazing
WINDOW, low_e, 2.2, -, - # Double with Low-E
# Puertas: transmitancia [W/m2K]
DOOR, wood_basic, 3.0, -, - # Basic Wood Door
DOOR, wood_insulated, 2.0, -, - # Insulated Wood Door
DOOR, steel_basic, 2.5, -, - # Basic Steel Door
DOOR, steel_insulated, 1.5, -, - # Insulated Steel Door
DOOR, fiberglass, 1.8, -, - # Fiberglass Door
DOOR, composite, 1.2, -, - # Composite Insulated Door
";

/// Catálogo de materiales por defecto
pub fn default_catalog() -> MaterialCatalog {
    DEFAULT_CATALOG.parse().unwrap_or_else(|e| {
        error!("Catálogo por defecto incorrecto: {}", e);
        MaterialCatalog::default()
    })
}

// ==================== Conversión a formato simple

fn element_to_plain(e: &ElementLoss) -> String {
    format!(
        "- {}: A = {:.2}, U = {:.3}, A·U = {:.2}",
        e.kind, e.area, e.u_value, e.loss
    )
}

/// Muestra el resultado en formato de texto simple
pub fn performance_to_plain(perf: &Performance) -> String {
    let Performance {
        room,
        params,
        areas,
        elements,
        fabric,
        result,
        band,
        indicators,
    } = perf;
    let floor_area = room.dimensions.floor_area();
    let exposed_area = areas.total();
    let elements_out = if elements.is_empty() {
        "- Sin superficies expuestas".to_string()
    } else {
        elements.iter().map(element_to_plain).join("\n")
    };

    format!(
        "** Prestaciones térmicas

Superficie útil = {floor_area:.2} [m2]
Superficie expuesta = {exposed_area:.2} [m2]
U global = {u:.3} [W/m2K]
H_F = {hf:.2} [W/K] (elementos: {hel:.2}, puentes térmicos: {htb:.2})
Pérdidas de calor = {q:.2} [W] (ΔT = {dt:.1} K)
Consumo anual = {e:.2} [kWh/a] ({hours:.0} h, rendimiento {eff:.2})
Consumo por superficie = {em2:.2} [kWh/m2.a]
Puntuación = {score} ({band})

** Elementos [m2, W/m2K, W/K]:

{elements_out}

** Indicadores:

Pérdidas por superficie = {qm2:.2} [W/m2]
Emisiones = {co2:.2} [kg_CO2/a]
Coste = {cost:.2} [€/a]
",
        floor_area = floor_area,
        exposed_area = exposed_area,
        u = result.u_value,
        hf = fabric.total,
        hel = fabric.elements,
        htb = fabric.bridging,
        q = result.heat_loss,
        dt = params.delta_t,
        e = result.energy_consumption_per_year,
        hours = params.heating_hours,
        eff = params.system_efficiency,
        em2 = indicators.energy_m2,
        score = result.energy_score,
        band = band,
        elements_out = elements_out,
        qm2 = indicators.heat_loss_m2,
        co2 = indicators.co2,
        cost = indicators.cost,
    )
}

/// Muestra las recomendaciones en formato de texto simple
pub fn recommendations_to_plain(recs: &[Recommendation]) -> String {
    let lines = if recs.is_empty() {
        "- Sin recomendaciones".to_string()
    } else {
        recs.iter().map(|r| format!("- {}", r)).join("\n")
    };
    format!("** Recomendaciones\n\n{}\n", lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::performance::room_performance;
    use crate::recommendations::recommendations;
    use crate::types::{Adjacency, CalcParams, RoomConfig};
    use pretty_assertions::assert_eq;

    #[test]
    fn default_catalog_is_complete() {
        let cat = default_catalog();
        assert_eq!(cat.walls.len(), 4);
        assert_eq!(cat.roofs.len(), 3);
        assert_eq!(cat.floors.len(), 3);
        assert_eq!(cat.insulations.len(), 6);
        assert_eq!(cat.windows.len(), 4);
        assert_eq!(cat.doors.len(), 6);
        assert_eq!(cat.roof("metal").unwrap().conductivity, 50.0);
        assert_eq!(cat.insulation("polyurethane").unwrap().cost, Some(25.0));
        assert_eq!(cat.door("composite").unwrap().name, "Composite Insulated Door");
    }

    #[test]
    fn default_catalog_parses_back() {
        let cat = default_catalog();
        assert_eq!(cat.to_string().parse::<MaterialCatalog>().unwrap(), cat);
    }

    #[test]
    fn plain_output() {
        let cat = default_catalog();
        let perf =
            room_performance(&RoomConfig::default(), &cat, &CalcParams::default()).unwrap();
        let out = performance_to_plain(&perf);
        assert!(out.starts_with("** Prestaciones térmicas"));
        assert!(out.contains("Superficie útil = 16.00 [m2]"));
        assert!(out.contains(&format!("Puntuación = {} (", perf.result.energy_score)));
        assert!(out.contains("- Muros: A = 34.51"));
        assert!(out.contains("- Suelo: A = 16.00"));

        let recs = recommendations_to_plain(&recommendations(&perf, &cat));
        assert!(recs.starts_with("** Recomendaciones\n\n- [INFO] Aislamiento moderado"));
    }

    #[test]
    fn plain_output_enclosed() {
        let mut room = RoomConfig::default();
        room.adjacent = Adjacency::enclosed();
        let perf = room_performance(&room, &default_catalog(), &CalcParams::default()).unwrap();
        let out = performance_to_plain(&perf);
        assert!(out.contains("Puntuación = 100 (A)"));
        assert!(out.contains("- Sin superficies expuestas"));
        assert_eq!(recommendations_to_plain(&[]), "** Recomendaciones\n\n- Sin recomendaciones\n");
    }
}
