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
Materiales y tipos de huecos
============================

Registros de propiedades del catálogo de materiales y formato de línea del catálogo:

`TABLA, id, valor, densidad, coste # nombre`

Para las tablas de materiales el valor es la conductividad térmica λ [W/mK] y para las de
ventanas y puertas la transmitancia U [W/m²K]. La densidad y el coste son opcionales (`-`).
*/

use std::fmt;
use std::str;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::ThermalError;

/// Identificador centinela para elementos sin aislamiento
///
/// Sentinel insulation identifier meaning "no insulation layer"
pub const NO_INSULATION: &str = "none";

/// Tabla del catálogo de materiales
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumString,
)]
pub enum CatalogTable {
    /// Wall base materials
    #[strum(serialize = "WALL")]
    Wall,
    /// Roof base materials
    #[strum(serialize = "ROOF")]
    Roof,
    /// Floor base materials
    #[strum(serialize = "FLOOR")]
    Floor,
    /// Insulation materials
    #[strum(serialize = "INSULATION")]
    Insulation,
    /// Glazing types
    #[strum(serialize = "WINDOW")]
    Window,
    /// Door types
    #[strum(serialize = "DOOR")]
    Door,
}

impl CatalogTable {
    /// All tables, in catalog file order
    pub const ALL: [CatalogTable; 6] = [
        CatalogTable::Wall,
        CatalogTable::Roof,
        CatalogTable::Floor,
        CatalogTable::Insulation,
        CatalogTable::Window,
        CatalogTable::Door,
    ];

    /// Tables whose value is a thermal conductivity (the rest hold U-values)
    pub fn holds_conductivity(self) -> bool {
        !matches!(self, CatalogTable::Window | CatalogTable::Door)
    }
}

/// Material opaco (base o aislante)
///
/// Opaque material record: structural base layers and insulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Thermal conductivity, λ [W/mK]
    pub conductivity: f64,
    /// Density [kg/m³]
    pub density: Option<f64>,
    /// Unit cost (currency/m²)
    pub cost: Option<f64>,
}

impl Material {
    /// Constructor
    pub fn new<T: Into<String>, U: Into<String>>(id: T, name: U, conductivity: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            conductivity,
            density: None,
            cost: None,
        }
    }
}

/// Tipo de hueco (ventana o puerta)
///
/// Glazing or door type with its nominal U-value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningType {
    /// Identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Nominal thermal transmittance, U [W/m²K]
    pub u_value: f64,
}

impl OpeningType {
    /// Constructor
    pub fn new<T: Into<String>, U: Into<String>>(id: T, name: U, u_value: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            u_value,
        }
    }
}

/// Línea de datos del catálogo
///
/// One data line of a catalog file
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Table the entry belongs to
    pub table: CatalogTable,
    /// Identifier
    pub id: String,
    /// λ [W/mK] for material tables, U [W/m²K] for WINDOW and DOOR
    pub value: f64,
    /// Density [kg/m³]
    pub density: Option<f64>,
    /// Unit cost
    pub cost: Option<f64>,
    /// Display name, stored as the line comment
    pub name: String,
}

impl CatalogEntry {
    /// Builds an entry from a material record
    pub fn from_material(table: CatalogTable, material: &Material) -> Self {
        Self {
            table,
            id: material.id.clone(),
            value: material.conductivity,
            density: material.density,
            cost: material.cost,
            name: material.name.clone(),
        }
    }

    /// Builds an entry from a window or door type record
    pub fn from_opening(table: CatalogTable, opening: &OpeningType) -> Self {
        Self {
            table,
            id: opening.id.clone(),
            value: opening.u_value,
            density: None,
            cost: None,
            name: opening.name.clone(),
        }
    }
}

fn optional_to_string(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{}", v),
        None => "-".to_string(),
    }
}

fn parse_optional(s: &str) -> Result<Option<f64>, ThermalError> {
    match s {
        "" | "-" => Ok(None),
        v => Ok(Some(v.parse::<f64>()?)),
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let comment = if self.name.is_empty() {
            "".to_owned()
        } else {
            format!(" # {}", self.name)
        };
        write!(
            f,
            "{}, {}, {}, {}, {}{}",
            self.table,
            self.id,
            self.value,
            optional_to_string(self.density),
            optional_to_string(self.cost),
            comment
        )
    }
}

impl str::FromStr for CatalogEntry {
    type Err = ThermalError;

    fn from_str(s: &str) -> Result<CatalogEntry, Self::Err> {
        let items: Vec<&str> = s.trim().splitn(2, '#').map(str::trim).collect();
        let name = items.get(1).unwrap_or(&"").to_string();
        let items: Vec<&str> = items[0].split(',').map(str::trim).collect();
        if items.len() < 3 || items.len() > 5 || items[1].is_empty() {
            return Err(ThermalError::CatalogLineError(s.into()));
        };
        let table: CatalogTable = items[0]
            .parse()
            .map_err(|_| ThermalError::TableUnknown(items[0].into()))?;
        let id = items[1].to_string();
        let value: f64 = items[2].parse()?;
        let density = parse_optional(items.get(3).unwrap_or(&"-"))?;
        let cost = parse_optional(items.get(4).unwrap_or(&"-"))?;

        // Solo la entrada sin aislamiento puede tener valor nulo
        let is_no_insulation = table == CatalogTable::Insulation && id == NO_INSULATION;
        if !is_no_insulation && !(value > 0.0) {
            return Err(ThermalError::CatalogLineError(s.into()));
        }

        Ok(CatalogEntry {
            table,
            id,
            value,
            density,
            cost,
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn catalog_table_names() {
        assert_eq!("INSULATION".parse::<CatalogTable>().unwrap(), CatalogTable::Insulation);
        assert_eq!(CatalogTable::Door.to_string(), "DOOR");
        assert!("VENTANA".parse::<CatalogTable>().is_err());
        assert!(CatalogTable::Floor.holds_conductivity());
        assert!(!CatalogTable::Window.holds_conductivity());
    }

    #[test]
    fn catalog_entry_parse() {
        let entry: CatalogEntry = "WALL, brick, 0.87, 1800, - # Solid Brick".parse().unwrap();
        assert_eq!(
            entry,
            CatalogEntry {
                table: CatalogTable::Wall,
                id: "brick".into(),
                value: 0.87,
                density: Some(1800.0),
                cost: None,
                name: "Solid Brick".into(),
            }
        );
        assert_eq!(entry.to_string(), "WALL, brick, 0.87, 1800, - # Solid Brick");

        let short: CatalogEntry = "DOOR, composite, 1.2".parse().unwrap();
        assert_eq!(short.density, None);
        assert_eq!(short.name, "");
    }

    #[test]
    fn catalog_entry_errors() {
        assert_eq!(
            "PARED, brick, 0.87".parse::<CatalogEntry>(),
            Err(ThermalError::TableUnknown("PARED".into()))
        );
        assert!("WALL, brick".parse::<CatalogEntry>().is_err());
        assert!("WALL, brick, abc".parse::<CatalogEntry>().is_err());
        assert!("WALL, brick, 0.0".parse::<CatalogEntry>().is_err());
        assert!("INSULATION, rockwool, 0".parse::<CatalogEntry>().is_err());
        assert!("INSULATION, none, 0, -, 0 # No Insulation".parse::<CatalogEntry>().is_ok());
    }
}
