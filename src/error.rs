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
Errores (error)
===============

Tipo de error de la librería.

The only error the thermal computation itself can raise is `UnresolvedMaterial`. The remaining
variants come from parsing room and catalog inputs.
*/

use std::fmt;

use crate::types::CatalogTable;

/// Error de cálculo o de interpretación de datos
///
/// Errors raised by the library
#[derive(Debug, Clone, PartialEq)]
pub enum ThermalError {
    /// Identificador no encontrado en el catálogo
    ///
    /// A referenced material, insulation, glazing or door identifier is missing from its table
    UnresolvedMaterial {
        /// Catalog table where the lookup was made
        table: CatalogTable,
        /// Identifier that could not be resolved
        id: String,
    },
    /// Generic parse error
    ParseError(String),
    /// Wrong catalog data line
    CatalogLineError(String),
    /// Unknown catalog table name
    TableUnknown(String),
    /// Wrong input data
    WrongInput(String),
}

impl fmt::Display for ThermalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ThermalError::*;
        match self {
            UnresolvedMaterial { table, id } => write!(
                f,
                "Material not found: \"{}\" is not defined in table {}",
                id, table
            ),
            ParseError(s) => write!(f, "Error parsing data \"{}\"", s),
            CatalogLineError(s) => write!(f, "Error parsing catalog line \"{}\"", s),
            TableUnknown(s) => write!(f, "Unknown catalog table \"{}\"", s),
            WrongInput(s) => write!(f, "Wrong input: {}", s),
        }
    }
}

impl std::error::Error for ThermalError {}

impl From<std::num::ParseFloatError> for ThermalError {
    fn from(err: std::num::ParseFloatError) -> Self {
        ThermalError::ParseError(err.to_string())
    }
}

impl From<serde_json::Error> for ThermalError {
    fn from(err: serde_json::Error) -> Self {
        ThermalError::ParseError(err.to_string())
    }
}

/// Resultado con error de la librería
pub type Result<T> = std::result::Result<T, ThermalError>;
