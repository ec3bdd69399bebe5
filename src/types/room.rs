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
Configuración del local
=======================

Geometría, elementos constructivos, huecos y adyacencias de un local rectangular.

La configuración se lee en formato JSON:

```json
{
  "dimensions": { "length": 5.0, "width": 4.0, "height": 2.5 },
  "walls": { "material": "brick", "thickness": 0.2, "insulation": "rockwool", "insulation_thickness": 0.1 },
  "windows": { "count": 2, "width": 1.2, "height": 1.5, "type": "double" },
  "door": { "width": 0.8, "height": 2.0, "type": "wood_insulated" },
  "roof": { "material": "concrete", "thickness": 0.15, "insulation": "polyurethane", "insulation_thickness": 0.1 },
  "floor": { "material": "concrete", "thickness": 0.15, "insulation": "none", "insulation_thickness": 0.0 },
  "adjacent": { "front": false, "ceiling": true }
}
```
*/

use std::fmt;
use std::str;

use serde::{Deserialize, Serialize};

use crate::error::ThermalError;
use crate::types::NO_INSULATION;

/// Dimensiones interiores del local [m]
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dimensions {
    /// Length (front and back walls) [m]
    pub length: f64,
    /// Width (left and right walls) [m]
    pub width: f64,
    /// Height [m]
    pub height: f64,
}

impl Dimensions {
    /// Floor area, equal to the roof area [m²]
    pub fn floor_area(&self) -> f64 {
        self.length * self.width
    }

    /// Gross area of the four walls, ignoring openings [m²]
    pub fn gross_wall_area(&self) -> f64 {
        2.0 * (self.length + self.width) * self.height
    }

    /// Gross area of the surface facing a given orientation [m²]
    pub fn surface_area(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Front | Orientation::Back => self.length * self.height,
            Orientation::Left | Orientation::Right => self.width * self.height,
            Orientation::Ceiling | Orientation::Floor => self.floor_area(),
        }
    }
}

/// Elemento opaco: muro, cubierta o suelo
///
/// Opaque building element: base layer plus an optional insulation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementConfig {
    /// Base material identifier
    pub material: String,
    /// Base layer thickness [m]
    pub thickness: f64,
    /// Insulation identifier or `"none"`
    #[serde(default = "no_insulation")]
    pub insulation: String,
    /// Insulation thickness [m], ignored when uninsulated
    #[serde(default, alias = "insulationThickness")]
    pub insulation_thickness: f64,
}

fn no_insulation() -> String {
    NO_INSULATION.to_string()
}

impl ElementConfig {
    /// Element config with an insulation layer
    pub fn new<T: Into<String>, U: Into<String>>(
        material: T,
        thickness: f64,
        insulation: U,
        insulation_thickness: f64,
    ) -> Self {
        Self {
            material: material.into(),
            thickness,
            insulation: insulation.into(),
            insulation_thickness,
        }
    }

    /// Element config without insulation
    pub fn uninsulated<T: Into<String>>(material: T, thickness: f64) -> Self {
        Self::new(material, thickness, NO_INSULATION, 0.0)
    }

    /// True when the insulation identifier is the `"none"` sentinel
    pub fn is_uninsulated(&self) -> bool {
        self.insulation == NO_INSULATION
    }
}

/// Ventanas del local (todas iguales)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    /// Number of windows
    pub count: u32,
    /// Width of each window [m]
    pub width: f64,
    /// Height of each window [m]
    pub height: f64,
    /// Glazing type identifier
    #[serde(rename = "type")]
    pub glazing: String,
}

impl WindowConfig {
    /// Total window area, regardless of adjacency [m²]
    pub fn area(&self) -> f64 {
        f64::from(self.count) * self.width * self.height
    }
}

/// Puerta del local, siempre en la fachada frontal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DoorConfig {
    /// Width [m]
    pub width: f64,
    /// Height [m]
    pub height: f64,
    /// Door type identifier
    #[serde(rename = "type")]
    pub door_type: String,
}

impl DoorConfig {
    /// Door area, regardless of adjacency [m²]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Orientación de una superficie del local
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Front wall, holds the door
    Front,
    /// Back wall
    Back,
    /// Left wall
    Left,
    /// Right wall
    Right,
    /// Ceiling (roof)
    Ceiling,
    /// Floor
    Floor,
}

impl Orientation {
    /// The four wall orientations
    pub const WALLS: [Orientation; 4] = [
        Orientation::Front,
        Orientation::Back,
        Orientation::Left,
        Orientation::Right,
    ];
}

/// Superficies en contacto con otros espacios calefactados
///
/// Surfaces bordering heated spaces, which do not lose heat. Missing flags are exposed.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Adjacency {
    /// Front wall adjacent
    pub front: bool,
    /// Back wall adjacent
    pub back: bool,
    /// Left wall adjacent
    pub left: bool,
    /// Right wall adjacent
    pub right: bool,
    /// Ceiling adjacent
    pub ceiling: bool,
    /// Floor adjacent
    pub floor: bool,
}

impl Adjacency {
    /// Every surface borders a heated space
    pub fn enclosed() -> Self {
        Self {
            front: true,
            back: true,
            left: true,
            right: true,
            ceiling: true,
            floor: true,
        }
    }

    /// Is the surface with this orientation adjacent to a heated space?
    pub fn is_adjacent(&self, orientation: Orientation) -> bool {
        match orientation {
            Orientation::Front => self.front,
            Orientation::Back => self.back,
            Orientation::Left => self.left,
            Orientation::Right => self.right,
            Orientation::Ceiling => self.ceiling,
            Orientation::Floor => self.floor,
        }
    }

    /// Is the surface with this orientation exposed to the exterior?
    pub fn is_exposed(&self, orientation: Orientation) -> bool {
        !self.is_adjacent(orientation)
    }

    /// At least one wall can hold windows
    pub fn has_exposed_wall(&self) -> bool {
        Orientation::WALLS.iter().any(|o| self.is_exposed(*o))
    }
}

/// Configuración completa del local
///
/// Room configuration: geometry, opaque elements, openings and adjacencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoomConfig {
    /// Inner dimensions
    pub dimensions: Dimensions,
    /// Walls (all four share the same construction)
    pub walls: ElementConfig,
    /// Windows
    pub windows: WindowConfig,
    /// Door
    pub door: DoorConfig,
    /// Roof
    pub roof: ElementConfig,
    /// Floor
    pub floor: ElementConfig,
    /// Adjacent surfaces
    #[serde(default, alias = "adjacentAreas")]
    pub adjacent: Adjacency,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            dimensions: Dimensions {
                length: 4.0,
                width: 4.0,
                height: 2.5,
            },
            walls: ElementConfig::new("brick", 0.2, "rockwool", 0.05),
            windows: WindowConfig {
                count: 2,
                width: 1.2,
                height: 1.5,
                glazing: "double".into(),
            },
            door: DoorConfig {
                width: 0.9,
                height: 2.1,
                door_type: "wood_basic".into(),
            },
            roof: ElementConfig::new("concrete", 0.15, "eps", 0.08),
            floor: ElementConfig::uninsulated("concrete", 0.15),
            adjacent: Adjacency::default(),
        }
    }
}

impl fmt::Display for RoomConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", json)
    }
}

impl str::FromStr for RoomConfig {
    type Err = ThermalError;

    fn from_str(s: &str) -> Result<RoomConfig, Self::Err> {
        let s_nobom = s.trim_start_matches('\u{feff}');
        Ok(serde_json::from_str(s_nobom)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ROOMJSON: &str = r#"{
  "dimensions": { "length": 5.0, "width": 4.0, "height": 2.5 },
  "walls": { "material": "brick", "thickness": 0.2, "insulation": "rockwool", "insulation_thickness": 0.1 },
  "windows": { "count": 2, "width": 1.2, "height": 1.5, "type": "double" },
  "door": { "width": 0.8, "height": 2.0, "type": "wood_insulated" },
  "roof": { "material": "concrete", "thickness": 0.15, "insulation": "polyurethane", "insulation_thickness": 0.1 },
  "floor": { "material": "concrete", "thickness": 0.15 },
  "adjacent": { "ceiling": true }
}"#;

    #[test]
    fn parse_room_json() {
        let room: RoomConfig = ROOMJSON.parse().unwrap();
        assert_eq!(room.dimensions.floor_area(), 20.0);
        assert_eq!(room.dimensions.gross_wall_area(), 45.0);
        assert_eq!(room.windows.glazing, "double");
        assert_eq!(room.door.door_type, "wood_insulated");
        // Aislamiento ausente -> "none"
        assert!(room.floor.is_uninsulated());
        assert_eq!(room.floor.insulation_thickness, 0.0);
        // Adyacencias no indicadas -> expuestas
        assert!(room.adjacent.ceiling);
        assert!(!room.adjacent.front);
        assert!(room.adjacent.has_exposed_wall());
    }

    #[test]
    fn parse_camel_case_room_json() {
        let json = r#"{
  "dimensions": { "length": 4, "width": 4, "height": 2.5 },
  "walls": { "material": "brick", "thickness": 0.2, "insulation": "rockwool", "insulationThickness": 0.05 },
  "windows": { "count": 2, "width": 1.2, "height": 1.5, "type": "double" },
  "door": { "width": 0.9, "height": 2.1, "type": "wood_basic" },
  "roof": { "material": "concrete", "thickness": 0.15, "insulation": "eps", "insulationThickness": 0.08 },
  "floor": { "material": "concrete", "thickness": 0.15, "insulation": "none", "insulationThickness": 0 },
  "adjacentAreas": { "front": true, "back": false, "left": false, "right": false, "ceiling": true, "floor": false }
}"#;
        let room: RoomConfig = json.parse().unwrap();
        assert_eq!(room.walls.insulation_thickness, 0.05);
        assert_eq!(room.roof.insulation_thickness, 0.08);
        assert!(room.floor.is_uninsulated());
        assert!(room.adjacent.front);
        assert!(room.adjacent.ceiling);
        assert!(!room.adjacent.back);
        // Mismo local que el de serie salvo las adyacencias
        let expected = RoomConfig {
            adjacent: Adjacency {
                front: true,
                ceiling: true,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(room, expected);
    }

    #[test]
    fn unknown_room_fields_are_rejected() {
        let typo = ROOMJSON.replacen("insulation_thickness", "insulation_thicknes", 1);
        assert!(typo.parse::<RoomConfig>().is_err());
        let extra = ROOMJSON.replace("\"ceiling\": true", "\"ceiling\": true, \"roof\": true");
        assert!(extra.parse::<RoomConfig>().is_err());
    }

    #[test]
    fn missing_adjacency_block_means_exposed() {
        let json = ROOMJSON.replace(",\n  \"adjacent\": { \"ceiling\": true }", "");
        let room: RoomConfig = json.parse().unwrap();
        assert_eq!(room.adjacent, Adjacency::default());
    }

    #[test]
    fn room_json_roundtrip_through_display() {
        let room = RoomConfig::default();
        let parsed: RoomConfig = room.to_string().parse().unwrap();
        assert_eq!(parsed, room);
    }

    #[test]
    fn wrong_room_json() {
        assert!("{ \"dimensions\": {} }".parse::<RoomConfig>().is_err());
    }

    #[test]
    fn adjacency_queries() {
        let adj = Adjacency::enclosed();
        assert!(!adj.has_exposed_wall());
        assert!(adj.is_adjacent(Orientation::Floor));
        let adj = Adjacency {
            front: true,
            back: true,
            left: true,
            ..Default::default()
        };
        assert!(adj.has_exposed_wall());
        assert!(adj.is_exposed(Orientation::Right));
    }

    #[test]
    fn surface_areas() {
        let dims = Dimensions {
            length: 5.0,
            width: 4.0,
            height: 2.5,
        };
        assert_eq!(dims.surface_area(Orientation::Front), 12.5);
        assert_eq!(dims.surface_area(Orientation::Left), 10.0);
        assert_eq!(dims.surface_area(Orientation::Ceiling), 20.0);
    }
}
