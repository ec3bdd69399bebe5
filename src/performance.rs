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
Prestaciones térmicas del local
===============================

Cálculo de las prestaciones térmicas de un local rectangular a partir de su configuración, el
catálogo de materiales y los parámetros de cálculo.

Pasos:

1. Resolución de todos los identificadores del catálogo (sin cálculo si alguno falta)
2. Superficies expuestas de muros, ventanas, puerta, cubierta y suelo
3. Transmitancias de cada elemento
4. Pérdidas por elementos, puentes térmicos y coeficiente total (W/K)
5. Pérdidas de calor de diseño (W), consumo anual (kWh) y puntuación de eficiencia
*/

use log::{debug, warn};

use crate::catalog::MaterialCatalog;
use crate::error::Result;
use crate::formulas::{
    adjust_window_u_value_for_curtains, energy_score_from_consumption,
    fabric_heat_loss_elements, thermal_bridging_loss, thermal_resistance,
    total_fabric_heat_loss, u_value, AreaU, Insulation, Layer,
};
use crate::types::{
    CalcParams, ElementConfig, ElementKind, ElementLoss, EpcBand, ExposedAreas, FabricLoss,
    Indicators, Material, Orientation, Performance, PerformanceResult, RoomConfig,
};

// Construcción opaca con sus materiales ya resueltos
struct OpaqueElement<'a> {
    config: &'a ElementConfig,
    base: &'a Material,
    insulation: &'a Material,
}

impl<'a> OpaqueElement<'a> {
    fn insulation(&self) -> Insulation {
        if self.config.is_uninsulated() {
            return Insulation::Uninsulated;
        }
        if !(self.insulation.conductivity > 0.0) {
            warn!(
                "Aislamiento \"{}\" con conductividad no válida ({}). Se considera sin aislamiento",
                self.insulation.id, self.insulation.conductivity
            );
            return Insulation::Uninsulated;
        }
        Insulation::Insulated {
            thickness: self.config.insulation_thickness,
            conductivity: self.insulation.conductivity,
        }
    }

    fn u_value(&self, params: &CalcParams) -> f64 {
        let base = Layer::new(self.config.thickness, self.base.conductivity);
        u_value(thermal_resistance(base, self.insulation(), params.surfaces))
    }
}

// Valores del catálogo usados por el cálculo
struct Resolved<'a> {
    walls: OpaqueElement<'a>,
    roof: OpaqueElement<'a>,
    floor: OpaqueElement<'a>,
    window_u: f64,
    door_u: f64,
}

/// Resuelve los ocho identificadores del local, en orden, antes de cualquier cálculo
fn resolve<'a>(room: &'a RoomConfig, catalog: &'a MaterialCatalog) -> Result<Resolved<'a>> {
    let walls = OpaqueElement {
        config: &room.walls,
        base: catalog.wall(&room.walls.material)?,
        insulation: catalog.insulation(&room.walls.insulation)?,
    };
    let roof = OpaqueElement {
        config: &room.roof,
        base: catalog.roof(&room.roof.material)?,
        insulation: catalog.insulation(&room.roof.insulation)?,
    };
    let floor = OpaqueElement {
        config: &room.floor,
        base: catalog.floor(&room.floor.material)?,
        insulation: catalog.insulation(&room.floor.insulation)?,
    };
    let window_u = catalog.window(&room.windows.glazing)?.u_value;
    let door_u = catalog.door(&room.door.door_type)?.u_value;
    Ok(Resolved {
        walls,
        roof,
        floor,
        window_u,
        door_u,
    })
}

/// Superficies expuestas al exterior de cada elemento [m²]
///
/// - windows count when at least one wall is exposed
/// - the door sits on the front wall
/// - wall area is the gross area of exposed walls minus openings, never negative
pub fn exposed_areas(room: &RoomConfig) -> ExposedAreas {
    let dims = &room.dimensions;
    let adj = &room.adjacent;

    let windows = if adj.has_exposed_wall() {
        room.windows.area()
    } else {
        0.0
    };
    let door = if adj.is_exposed(Orientation::Front) {
        room.door.area()
    } else {
        0.0
    };
    let exposed_walls_gross: f64 = Orientation::WALLS
        .iter()
        .filter(|&&o| adj.is_exposed(o))
        .map(|&o| dims.surface_area(o))
        .sum();
    let walls_net = exposed_walls_gross - windows - door;
    if walls_net < 0.0 {
        warn!(
            "Superficie de huecos ({:.2} m2) mayor que la de muros expuestos ({:.2} m2)",
            windows + door,
            exposed_walls_gross
        );
    }
    let roof = if adj.is_exposed(Orientation::Ceiling) {
        dims.floor_area()
    } else {
        0.0
    };
    let floor = if adj.is_exposed(Orientation::Floor) {
        dims.floor_area()
    } else {
        0.0
    };

    ExposedAreas {
        walls: walls_net.max(0.0),
        windows,
        door,
        roof,
        floor,
    }
}

/// Puntuación redondeada y limitada a [1, 100]
fn rounded_score(energy_m2: f64) -> u8 {
    num::clamp(energy_score_from_consumption(energy_m2).round(), 1.0, 100.0) as u8
}

/// Resultado detallado del cálculo de prestaciones térmicas del local
///
/// Fails with `ThermalError::UnresolvedMaterial` when any identifier of the room is missing
/// from the catalog. No arithmetic is done in that case.
pub fn room_performance(
    room: &RoomConfig,
    catalog: &MaterialCatalog,
    params: &CalcParams,
) -> Result<Performance> {
    let resolved = resolve(room, catalog)?;
    let areas = exposed_areas(room);
    debug!("Superficies expuestas: {:?}", areas);

    // Local sin superficies en contacto con el exterior
    if areas.total() == 0.0 {
        debug!("Local sin superficies expuestas");
        return Ok(Performance {
            room: room.clone(),
            params: *params,
            areas,
            elements: vec![],
            fabric: FabricLoss::default(),
            result: PerformanceResult::enclosed(),
            band: EpcBand::A,
            indicators: Indicators::default(),
        });
    }

    let element_u = [
        (ElementKind::Walls, resolved.walls.u_value(params)),
        (
            ElementKind::Windows,
            adjust_window_u_value_for_curtains(resolved.window_u),
        ),
        (ElementKind::Door, resolved.door_u),
        (ElementKind::Roof, resolved.roof.u_value(params)),
        (ElementKind::Floor, resolved.floor.u_value(params)),
    ];
    let elements: Vec<ElementLoss> = element_u
        .iter()
        .map(|&(kind, u)| {
            let area = areas.get(kind);
            ElementLoss {
                kind,
                area,
                u_value: u,
                loss: area * u,
            }
        })
        .collect();
    for e in &elements {
        debug!("{}: A = {:.2} m2, U = {:.4} W/m2K", e.kind, e.area, e.u_value);
    }

    let area_u: Vec<AreaU> = elements
        .iter()
        .map(|e| AreaU::new(e.area, e.u_value))
        .collect();
    let elements_loss = fabric_heat_loss_elements(&area_u);
    let bridging_loss = thermal_bridging_loss(areas.openings(), params.bridging.factor());
    let fabric = FabricLoss {
        elements: elements_loss,
        bridging: bridging_loss,
        total: total_fabric_heat_loss(elements_loss, bridging_loss),
    };
    debug!("Coeficiente de pérdidas: {:?}", fabric);

    let dims = &room.dimensions;
    let floor_area = dims.floor_area();
    let envelope_area = dims.gross_wall_area() + 2.0 * floor_area;
    let overall_u = if envelope_area > 0.0 {
        fabric.total / envelope_area
    } else {
        0.0
    };
    let heat_loss = fabric.total * params.delta_t;
    let consumption = heat_loss * params.heating_hours / (1000.0 * params.system_efficiency);

    let (heat_loss_m2, energy_m2) = if floor_area > 0.0 {
        (heat_loss / floor_area, consumption / floor_area)
    } else {
        warn!("Local con superficie en planta nula");
        let per_area = |v: f64| if v > 0.0 { std::f64::INFINITY } else { 0.0 };
        (per_area(heat_loss), per_area(consumption))
    };
    let energy_score = rounded_score(energy_m2);
    debug!(
        "Consumo: {:.2} kWh/a, {:.2} kWh/m2.a, puntuación {}",
        consumption, energy_m2, energy_score
    );

    let result = PerformanceResult {
        u_value: overall_u,
        heat_loss,
        energy_score,
        energy_consumption_per_year: consumption,
    };
    let indicators = Indicators {
        heat_loss_m2,
        energy_m2,
        co2: heat_loss * params.heating_hours / 1000.0 * params.co2_factor,
        cost: consumption * params.energy_price,
    };

    Ok(Performance {
        room: room.clone(),
        params: *params,
        areas,
        elements,
        fabric,
        band: result.band(),
        result,
        indicators,
    })
}

/// Prestaciones térmicas del local (resumen)
///
/// Overall U-value, design heat loss, energy score and annual consumption of the room.
pub fn compute_performance(
    room: &RoomConfig,
    catalog: &MaterialCatalog,
    params: &CalcParams,
) -> Result<PerformanceResult> {
    Ok(room_performance(room, catalog, params)?.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epc::default_catalog;
    use crate::error::ThermalError;
    use crate::types::{Adjacency, CatalogTable};
    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;

    fn test_room() -> RoomConfig {
        let mut room = RoomConfig::default();
        room.dimensions.length = 5.0;
        room.walls = ElementConfig::new("brick", 0.2, "rockwool", 0.1);
        room.door.width = 0.8;
        room.door.height = 2.0;
        room.door.door_type = "wood_insulated".into();
        room.roof = ElementConfig::new("concrete", 0.15, "polyurethane", 0.1);
        room.floor = ElementConfig::new("concrete", 0.15, "polyurethane", 0.1);
        room
    }

    #[test]
    fn areas_all_exposed() {
        let areas = exposed_areas(&test_room());
        assert_abs_diff_eq!(areas.walls, 39.8, epsilon = 1e-9);
        assert_abs_diff_eq!(areas.windows, 3.6, epsilon = 1e-9);
        assert_abs_diff_eq!(areas.door, 1.6, epsilon = 1e-9);
        assert_eq!(areas.roof, 20.0);
        assert_eq!(areas.floor, 20.0);
    }

    #[test]
    fn areas_front_adjacent() {
        let mut room = test_room();
        room.adjacent.front = true;
        let areas = exposed_areas(&room);
        // Sin puerta, muro frontal (5 x 2.5) excluido
        assert_eq!(areas.door, 0.0);
        assert_abs_diff_eq!(areas.windows, 3.6, epsilon = 1e-9);
        assert_abs_diff_eq!(areas.walls, 45.0 - 12.5 - 3.6, epsilon = 1e-9);
    }

    #[test]
    fn areas_walls_adjacent_keep_no_openings() {
        let mut room = test_room();
        room.adjacent = Adjacency {
            front: true,
            back: true,
            left: true,
            right: true,
            ceiling: false,
            floor: false,
        };
        let areas = exposed_areas(&room);
        assert_eq!(areas.walls, 0.0);
        assert_eq!(areas.openings(), 0.0);
        assert_eq!(areas.total(), 40.0);
    }

    #[test]
    fn areas_openings_larger_than_walls() {
        let mut room = test_room();
        room.adjacent = Adjacency {
            back: true,
            left: true,
            right: true,
            ..Default::default()
        };
        room.windows.count = 10;
        let areas = exposed_areas(&room);
        assert_eq!(areas.walls, 0.0);
    }

    #[test]
    fn base_room_performance() {
        let perf = room_performance(&test_room(), &default_catalog(), &CalcParams::default())
            .unwrap();
        assert_abs_diff_eq!(perf.fabric.elements, 35.3415, epsilon = 1e-3);
        assert_abs_diff_eq!(perf.fabric.bridging, 0.416, epsilon = 1e-9);
        assert_abs_diff_eq!(perf.fabric.total, 35.7575, epsilon = 1e-3);
        assert_abs_diff_eq!(perf.result.u_value, 0.42068, epsilon = 1e-4);
        assert_abs_diff_eq!(perf.result.heat_loss, 715.149, epsilon = 1e-2);
        assert_abs_diff_eq!(perf.result.energy_consumption_per_year, 1682.70, epsilon = 1e-1);
        assert_abs_diff_eq!(perf.indicators.energy_m2, 84.135, epsilon = 1e-2);
        assert_eq!(perf.result.energy_score, 83);
        assert_eq!(perf.band, EpcBand::B);
        assert_eq!(perf.elements.len(), 5);
        let walls = perf.elements[0];
        assert_eq!(walls.kind, ElementKind::Walls);
        assert_abs_diff_eq!(walls.u_value, 0.344841, epsilon = 1e-5);
    }

    #[test]
    fn enclosed_room() {
        let mut room = test_room();
        room.adjacent = Adjacency::enclosed();
        let perf = room_performance(&room, &default_catalog(), &CalcParams::default()).unwrap();
        assert_eq!(perf.result, PerformanceResult::enclosed());
        assert!(perf.elements.is_empty());
        assert_eq!(perf.band, EpcBand::A);
    }

    #[test]
    fn unresolved_material_before_computing() {
        let mut room = test_room();
        room.walls.material = "nonexistent_material".into();
        let err = compute_performance(&room, &default_catalog(), &CalcParams::default())
            .unwrap_err();
        assert_eq!(
            err,
            ThermalError::UnresolvedMaterial {
                table: CatalogTable::Wall,
                id: "nonexistent_material".into()
            }
        );
    }

    #[test]
    fn door_checked_last() {
        let mut room = test_room();
        room.windows.glazing = "quadruple".into();
        room.door.door_type = "unknown".into();
        match compute_performance(&room, &default_catalog(), &CalcParams::default()) {
            Err(ThermalError::UnresolvedMaterial { table, .. }) => {
                assert_eq!(table, CatalogTable::Window)
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn invalid_insulation_conductivity_is_ignored() {
        let mut catalog = default_catalog();
        catalog
            .insulations
            .insert("air".into(), Material::new("air", "Air gap", 0.0));
        let mut room = test_room();
        room.walls.insulation = "air".into();
        let with_air = room_performance(&room, &catalog, &CalcParams::default()).unwrap();
        room.walls = ElementConfig::uninsulated("brick", 0.2);
        let bare = room_performance(&room, &catalog, &CalcParams::default()).unwrap();
        assert_eq!(with_air.result, bare.result);
    }

    #[test]
    fn zero_dimensions_keep_finite_u_value() {
        let mut room = RoomConfig::default();
        room.dimensions.length = 0.0;
        room.dimensions.width = 0.0;
        room.dimensions.height = 0.0;
        let perf = room_performance(&room, &default_catalog(), &CalcParams::default()).unwrap();
        // Solo huecos expuestos
        assert_eq!(perf.areas.walls, 0.0);
        assert!(perf.areas.openings() > 0.0);
        assert_eq!(perf.result.u_value, 0.0);
        assert!(perf.result.heat_loss > 0.0);
        assert_eq!(perf.result.energy_score, 1);
        let json = serde_json::to_string(&perf).unwrap();
        assert!(json.contains("\"u_value\":0.0"));
    }

    #[test]
    fn zero_floor_area() {
        let mut room = test_room();
        room.dimensions.width = 0.0;
        let perf = room_performance(&room, &default_catalog(), &CalcParams::default()).unwrap();
        assert!(perf.result.heat_loss > 0.0);
        assert_eq!(perf.result.energy_score, 1);
        assert_eq!(perf.band, EpcBand::G);
    }
}
