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
Catálogo de materiales
======================

Tablas de materiales opacos, aislantes, vidrios y puertas, indexadas por identificador.

Formato de archivo:

```text
#META CALC_DELTA_T: 20
tabla, id, valor, densidad, coste # nombre
WALL, brick, 0.87, 1800, - # Solid Brick
INSULATION, none, 0, -, 0 # No Insulation
INSULATION, rockwool, 0.04, -, 15 # Rock Wool
WINDOW, double, 2.8, -, - # Double Glazing
DOOR, wood_basic, 3, -, - # Basic Wood Door
```

Las búsquedas fallan con `ThermalError::UnresolvedMaterial` si el identificador no existe.
*/

use std::collections::BTreeMap;
use std::fmt;
use std::str;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ThermalError};
use crate::types::{CatalogEntry, CatalogTable, Material, Meta, MetaVec, OpeningType};

/// Catálogo de materiales y tipos de huecos, con sus metadatos
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialCatalog {
    /// Metadata
    pub cmeta: Vec<Meta>,
    /// Wall base materials
    pub walls: BTreeMap<String, Material>,
    /// Roof base materials
    pub roofs: BTreeMap<String, Material>,
    /// Floor base materials
    pub floors: BTreeMap<String, Material>,
    /// Insulation materials, including the `none` entry
    pub insulations: BTreeMap<String, Material>,
    /// Glazing types
    pub windows: BTreeMap<String, OpeningType>,
    /// Door types
    pub doors: BTreeMap<String, OpeningType>,
}

fn unresolved(table: CatalogTable, id: &str) -> ThermalError {
    ThermalError::UnresolvedMaterial {
        table,
        id: id.to_string(),
    }
}

impl MaterialCatalog {
    /// Catálogo vacío
    pub fn new() -> Self {
        Self::default()
    }

    fn materials(&self, table: CatalogTable) -> Option<&BTreeMap<String, Material>> {
        match table {
            CatalogTable::Wall => Some(&self.walls),
            CatalogTable::Roof => Some(&self.roofs),
            CatalogTable::Floor => Some(&self.floors),
            CatalogTable::Insulation => Some(&self.insulations),
            CatalogTable::Window | CatalogTable::Door => None,
        }
    }

    fn openings(&self, table: CatalogTable) -> Option<&BTreeMap<String, OpeningType>> {
        match table {
            CatalogTable::Window => Some(&self.windows),
            CatalogTable::Door => Some(&self.doors),
            _ => None,
        }
    }

    /// Material de una tabla de materiales opacos
    ///
    /// Fails with `UnresolvedMaterial` when the id is missing or `table` is WINDOW or DOOR.
    pub fn material(&self, table: CatalogTable, id: &str) -> Result<&Material> {
        self.materials(table)
            .and_then(|t| t.get(id))
            .ok_or_else(|| unresolved(table, id))
    }

    /// Tipo de hueco (WINDOW o DOOR)
    pub fn opening(&self, table: CatalogTable, id: &str) -> Result<&OpeningType> {
        self.openings(table)
            .and_then(|t| t.get(id))
            .ok_or_else(|| unresolved(table, id))
    }

    /// Wall base material
    pub fn wall(&self, id: &str) -> Result<&Material> {
        self.material(CatalogTable::Wall, id)
    }

    /// Roof base material
    pub fn roof(&self, id: &str) -> Result<&Material> {
        self.material(CatalogTable::Roof, id)
    }

    /// Floor base material
    pub fn floor(&self, id: &str) -> Result<&Material> {
        self.material(CatalogTable::Floor, id)
    }

    /// Insulation material
    pub fn insulation(&self, id: &str) -> Result<&Material> {
        self.material(CatalogTable::Insulation, id)
    }

    /// Glazing type
    pub fn window(&self, id: &str) -> Result<&OpeningType> {
        self.opening(CatalogTable::Window, id)
    }

    /// Door type
    pub fn door(&self, id: &str) -> Result<&OpeningType> {
        self.opening(CatalogTable::Door, id)
    }

    /// Incorpora una línea de catálogo. Un identificador repetido sustituye al anterior.
    pub fn insert(&mut self, entry: CatalogEntry) {
        let CatalogEntry {
            table,
            id,
            value,
            density,
            cost,
            name,
        } = entry;
        if table.holds_conductivity() {
            let material = Material {
                id: id.clone(),
                name,
                conductivity: value,
                density,
                cost,
            };
            let map = match table {
                CatalogTable::Wall => &mut self.walls,
                CatalogTable::Roof => &mut self.roofs,
                CatalogTable::Floor => &mut self.floors,
                _ => &mut self.insulations,
            };
            map.insert(id, material);
        } else {
            let opening = OpeningType {
                id: id.clone(),
                name,
                u_value: value,
            };
            let map = if table == CatalogTable::Window {
                &mut self.windows
            } else {
                &mut self.doors
            };
            map.insert(id, opening);
        }
    }

    /// Líneas del catálogo, por tabla y por identificador
    pub fn entries(&self) -> Vec<CatalogEntry> {
        let mut entries = Vec::with_capacity(self.len());
        for &table in CatalogTable::ALL.iter() {
            if let Some(map) = self.materials(table) {
                entries.extend(map.values().map(|m| CatalogEntry::from_material(table, m)));
            }
            if let Some(map) = self.openings(table) {
                entries.extend(map.values().map(|o| CatalogEntry::from_opening(table, o)));
            }
        }
        entries
    }

    /// Número total de registros
    pub fn len(&self) -> usize {
        self.walls.len()
            + self.roofs.len()
            + self.floors.len()
            + self.insulations.len()
            + self.windows.len()
            + self.doors.len()
    }

    /// ¿Catálogo sin registros?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MetaVec for MaterialCatalog {
    fn get_metavec(&self) -> &Vec<Meta> {
        &self.cmeta
    }
    fn get_mut_metavec(&mut self) -> &mut Vec<Meta> {
        &mut self.cmeta
    }
}

impl fmt::Display for MaterialCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let metalines = self.cmeta.iter().map(|m| m.to_string()).join("\n");
        let datalines = self.entries().iter().map(|e| e.to_string()).join("\n");
        if metalines.is_empty() {
            write!(f, "{}", datalines)
        } else {
            write!(f, "{}\n{}", metalines, datalines)
        }
    }
}

impl str::FromStr for MaterialCatalog {
    type Err = ThermalError;

    fn from_str(s: &str) -> std::result::Result<MaterialCatalog, Self::Err> {
        let s_nobom = s.trim_start_matches('\u{feff}');
        let lines: Vec<&str> = s_nobom.lines().map(str::trim).collect();
        let cmeta = lines
            .iter()
            .filter(|l| l.starts_with("#META"))
            .map(|l| l.parse())
            .collect::<Result<Vec<Meta>>>()?;
        let entries = lines
            .iter()
            .filter(|l| !(l.is_empty() || l.starts_with('#') || l.starts_with("tabla,")))
            .map(|l| l.parse())
            .collect::<Result<Vec<CatalogEntry>>>()?;

        let mut catalog = MaterialCatalog {
            cmeta,
            ..Default::default()
        };
        for entry in entries {
            catalog.insert(entry);
        }
        Ok(catalog)
    }
}
