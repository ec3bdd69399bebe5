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
Metadatos
=========

- Tipo Meta y trait MetaVec para datos con metadatos (catálogo de materiales)
*/

use std::fmt;
use std::str;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ThermalError;

/// Metadatos del catálogo de materiales
///
/// Catalog metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// metadata name.
    pub key: String,
    /// metadata value
    pub value: String,
}

impl Meta {
    /// Metadata constructor
    pub fn new<T, U>(key: T, value: U) -> Self
    where
        T: Into<String>,
        U: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Meta {
    /// Textual representation of metadata.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#META {}: {}", self.key, self.value)
    }
}

impl str::FromStr for Meta {
    type Err = ThermalError;

    fn from_str(s: &str) -> Result<Meta, Self::Err> {
        // Remove start of line with #META
        let s = s.trim();
        if !s.starts_with("#META") {
            return Err(ThermalError::ParseError(s.into()));
        }
        let items: Vec<&str> = s[5..].splitn(2, ':').map(str::trim).collect();
        if items.len() == 2 && !items[0].is_empty() {
            Ok(Meta::new(items[0], items[1]))
        } else {
            Err(ThermalError::ParseError(s.into()))
        }
    }
}

/// Trait común para gestionar metadatos
pub trait MetaVec {
    /// Get vector of metadata
    fn get_metavec(&self) -> &Vec<Meta>;

    /// Get mutable vector of metadata
    fn get_mut_metavec(&mut self) -> &mut Vec<Meta>;

    /// Check if key is included in metadata
    fn has_meta(&self, key: &str) -> bool {
        self.get_metavec().iter().any(|m| m.key == key)
    }

    /// Get (optional) metadata value by key
    fn get_meta(&self, key: &str) -> Option<String> {
        self.get_metavec()
            .iter()
            .find(|m| m.key == key)
            .map(|v| v.value.clone())
    }

    /// Get (optional) metadata value by key as f64
    fn get_meta_f64(&self, key: &str) -> Option<f64> {
        self.get_metavec()
            .iter()
            .find(|m| m.key == key)
            .and_then(|v| f64::from_str(v.value.trim()).ok())
    }

    /// Update metadata value for key or insert new metadata.
    fn set_meta(&mut self, key: &str, value: &str) {
        let meta = self.get_mut_metavec();
        if let Some(pos) = meta.iter().position(|m| m.key == key) {
            meta[pos].value = value.to_string();
        } else {
            meta.push(Meta::new(key, value));
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Holder(Vec<Meta>);

    impl MetaVec for Holder {
        fn get_metavec(&self) -> &Vec<Meta> {
            &self.0
        }
        fn get_mut_metavec(&mut self) -> &mut Vec<Meta> {
            &mut self.0
        }
    }

    #[test]
    fn meta_display_and_parse() {
        let meta = Meta::new("CATALOGO_FUENTE", "BS EN ISO 10456");
        let metastr = "#META CATALOGO_FUENTE: BS EN ISO 10456";
        assert_eq!(format!("{}", meta), metastr);
        assert_eq!(metastr.parse::<Meta>().unwrap(), meta);
        assert!("#META sin_separador".parse::<Meta>().is_err());
        assert!("WALL, brick, 0.87".parse::<Meta>().is_err());
    }

    #[test]
    fn metavec_get_and_set() {
        let mut holder = Holder(vec![Meta::new("CALC_DELTA_T", " 18.5")]);
        assert!(holder.has_meta("CALC_DELTA_T"));
        assert_eq!(holder.get_meta_f64("CALC_DELTA_T"), Some(18.5));
        assert_eq!(holder.get_meta_f64("CALC_HEATING_HOURS"), None);

        holder.set_meta("CALC_DELTA_T", "21");
        holder.set_meta("CALC_HEATING_HOURS", "1800");
        assert_eq!(holder.get_meta("CALC_DELTA_T"), Some("21".to_string()));
        assert_eq!(holder.get_meta_f64("CALC_HEATING_HOURS"), Some(1800.0));
        assert_eq!(holder.0.len(), 2);
    }
}
