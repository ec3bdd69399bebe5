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
ThermalCalc
===========

This crate provides a library and binary that compute the **steady-state thermal performance of a
rectangular room**: U-values of its construction elements (BS EN ISO 6946), fabric heat loss
coefficient including thermal bridging, design heat loss, annual heating energy consumption and
an EPC-style energy efficiency score (1-100) with its A-G band.

It holds the following assumptions:

- one-dimensional steady-state heat transfer through homogeneous layers
- all four walls share the same construction
- windows are spread over the exposed walls and the door sits on the front wall
- surfaces adjacent to other heated rooms do not lose heat
- constant design temperature difference, heating hours and system efficiency

Este *crate* proporciona una biblioteca y un programa que calculan las **prestaciones térmicas en
régimen estacionario de un local rectangular**: transmitancias de sus elementos (BS EN ISO 6946),
coeficiente de pérdidas por la envolvente incluyendo puentes térmicos, pérdidas de calor de
diseño, consumo anual de calefacción y una puntuación de eficiencia (1-100) de tipo EPC con su
banda A-G.

# Ejemplo

```rust
use thermalcalc::*;

// Local y catálogo de materiales por defecto
let room = RoomConfig::default();
let catalog = epc::default_catalog();

// Parámetros de cálculo (ΔT = 20 K, 2000 h, rendimiento 0.85)
let params = CalcParams::default();

// Cálculo de prestaciones
let perf = room_performance(&room, &catalog, &params).unwrap();
assert!(perf.result.heat_loss > 0.0);

// Visualización compacta
println!("{}", epc::performance_to_plain(&perf));
```

*/

#![deny(missing_docs)]

mod catalog;
mod performance;

pub mod epc;
pub mod error;
pub mod formulas;
pub mod recommendations;
pub mod types;

pub use catalog::*;
pub use error::ThermalError;
pub use performance::*;
pub use types::*;

/// Número de versión de la librería
///
/// Version number
pub static VERSION: &str = env!("CARGO_PKG_VERSION");
