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

#[macro_use]
extern crate clap;

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::process::exit;

use clap::{App, AppSettings, Arg};
use failure::Error;
use failure::ResultExt;
use tracing_subscriber::EnvFilter;

use thermalcalc::recommendations::recommendations;
use thermalcalc::types::{META_DELTA_T, META_HEATING_HOURS, META_SYSTEM_EFFICIENCY};
use thermalcalc::*;

// Funciones auxiliares -----------------------------------------------------------------------

fn readfile(path: &Path) -> Result<String, Error> {
    let mut f = File::open(path).context(format!("Archivo {} no encontrado", path.display()))?;
    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .context("Error al leer el archivo")?;
    Ok(contents)
}

fn writefile(path: &Path, content: &[u8]) -> Result<(), Error> {
    let mut file = File::create(path).context(format!(
        "No se ha podido crear el archivo {}",
        path.display()
    ))?;
    file.write_all(content)
        .context(format!("No se ha podido escribir en {}", path.display()))?;
    Ok(())
}

fn writefile_or_exit(path: &Path, content: &[u8]) {
    if let Err(err) = writefile(path, content) {
        eprintln!("ERROR: {}", err);
        exit(exitcode::IOERR);
    }
}

/// Nivel de registro según la verbosidad. RUST_LOG tiene prioridad.
fn init_logging(verbosity: u64) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Carga el catálogo de materiales desde archivo o devuelve el catálogo por defecto
fn get_catalog(archivo: Option<&str>) -> MaterialCatalog {
    if let Some(archivo_materiales) = archivo {
        let path = Path::new(archivo_materiales);
        let catalogstring = readfile(path).unwrap_or_else(|err| {
            eprintln!(
                "ERROR: No se ha podido leer el catálogo de materiales \"{}\" -> {}",
                path.display(),
                err
            );
            exit(exitcode::IOERR);
        });
        println!("Catálogo de materiales: \"{}\"", path.display());
        catalogstring.parse().unwrap_or_else(|err| {
            eprintln!(
                "ERROR: Formato incorrecto del catálogo de materiales \"{}\" ({})",
                path.display(),
                err
            );
            exit(exitcode::DATAERR);
        })
    } else {
        println!("Catálogo de materiales: predefinido");
        epc::default_catalog()
    }
}

/// Carga la configuración del local desde archivo o devuelve el local por defecto
fn get_room(archivo: Option<&str>) -> RoomConfig {
    if let Some(archivo_local) = archivo {
        let path = Path::new(archivo_local);
        let roomstring = readfile(path).unwrap_or_else(|err| {
            eprintln!(
                "ERROR: No se ha podido leer el archivo del local \"{}\" -> {}",
                path.display(),
                err
            );
            exit(exitcode::IOERR);
        });
        println!("Local: \"{}\"", path.display());
        roomstring.parse().unwrap_or_else(|err| {
            eprintln!(
                "ERROR: Formato incorrecto del archivo del local \"{}\" ({})",
                path.display(),
                err
            );
            exit(exitcode::DATAERR);
        })
    } else {
        println!("Local: predefinido");
        RoomConfig::default()
    }
}

/// Obtén parámetro de cálculo
/// Argumentos de CLI > Metadatos del catálogo > Valor por defecto
fn get_param(
    matches: &clap::ArgMatches<'_>,
    name: &str,
    catalog: &MaterialCatalog,
    meta: &str,
    default: f64,
    descr: &str,
) -> f64 {
    let meta_value = if catalog.has_meta(meta) {
        Some(catalog.get_meta_f64(meta).unwrap_or_else(|| {
            eprintln!(
                "ERROR: {} de los metadatos no es un valor numérico válido",
                descr
            );
            exit(exitcode::DATAERR);
        }))
    } else {
        None
    };

    if matches.occurrences_of(name) != 0 {
        let value = value_t!(matches, name, f64).unwrap_or_else(|_| {
            eprintln!("ERROR: {} indicado no es un valor numérico válido", descr);
            exit(exitcode::DATAERR);
        });
        if let Some(m_value) = meta_value {
            if (value - m_value).abs() > 1e-3 {
                println!("AVISO: El valor de {} del catálogo ({:.2}) no coincide con el valor definido por el usuario ({:.2})", descr, m_value, value);
            }
        }
        println!("{} (usuario): {:.2}", descr, value);
        value
    } else if let Some(value) = meta_value {
        println!("{} (metadatos): {:.2}", descr, value);
        value
    } else {
        println!("{} (predefinido): {:.2}", descr, default);
        default
    }
}

/// Comprueba la validez de los parámetros de cálculo
fn validate_params(params: &CalcParams) {
    if !(params.delta_t > 0.0) {
        eprintln!(
            "ERROR: la diferencia de temperatura debe ser mayor que 0 y vale {:.2}",
            params.delta_t
        );
        exit(exitcode::DATAERR);
    }
    if !(params.heating_hours > 0.0) {
        eprintln!(
            "ERROR: las horas de calefacción deben ser mayores que 0 y valen {:.2}",
            params.heating_hours
        );
        exit(exitcode::DATAERR);
    }
    if !(params.system_efficiency > 0.0 && params.system_efficiency <= 1.0) {
        eprintln!(
            "ERROR: el rendimiento del sistema debe estar entre 0.00 y 1.00 y vale {:.2}",
            params.system_efficiency
        );
        exit(exitcode::DATAERR);
    }
}

// Función principal ------------------------------------------------------------------------------

fn main() {
    let matches = App::new("ThermalCalc")
        .bin_name("thermalcalc")
        .version(env!("CARGO_PKG_VERSION"))
        .author("
Copyright (c) 2018-2022 Ministerio de Fomento,
                        Instituto de CC. de la Construcción Eduardo Torroja (IETcc-CSIC)

Autores: Rafael Villar Burke <pachi@ietcc.csic.es>,
         Daniel Jiménez González <danielj@ietcc.csic.es>
         Marta Sorribes Gil <msorribes@ietcc.csic.es>

Licencia: Publicado bajo licencia MIT.

")
        .about("ThermalCalc - Prestaciones térmicas de un local (transmitancias, pérdidas y consumo).")
        .setting(AppSettings::NextLineHelp)
        .arg(Arg::with_name("archivo_local")
            .short("r")
            .long("archivo_local")
            .value_name("ARCHIVO_LOCAL")
            .help("Archivo JSON de configuración del local")
            .takes_value(true)
            .display_order(1))
        .arg(Arg::with_name("archivo_materiales")
            .short("m")
            .long("archivo_materiales")
            .value_name("ARCHIVO_MATERIALES")
            .help("Archivo del catálogo de materiales")
            .takes_value(true)
            .display_order(2))
        .arg(Arg::with_name("delta_t")
            .long("delta_t")
            .value_name("DELTA_T")
            .help("Diferencia de temperatura de diseño [K]")
            .takes_value(true)
            .display_order(3))
        .arg(Arg::with_name("horas")
            .long("horas")
            .value_name("HORAS")
            .help("Horas anuales de calefacción [h]")
            .takes_value(true)
            .display_order(4))
        .arg(Arg::with_name("rendimiento")
            .long("rendimiento")
            .value_name("RENDIMIENTO")
            .help("Rendimiento del sistema de calefacción (0, 1]")
            .takes_value(true)
            .display_order(5))
        .arg(Arg::with_name("gen_archivo_materiales")
            .long("oc")
            .value_name("GEN_ARCHIVO_MATERIALES")
            .help("Archivo de salida del catálogo de materiales con los parámetros de cálculo")
            .takes_value(true))
        .arg(Arg::with_name("gen_archivo_local")
            .long("or")
            .value_name("GEN_ARCHIVO_LOCAL")
            .help("Archivo de salida de la configuración del local")
            .takes_value(true))
        .arg(Arg::with_name("archivo_salida_json")
            .long("json")
            .value_name("ARCHIVO_SALIDA_JSON")
            .help("Archivo de salida de resultados detallados en formato JSON")
            .takes_value(true))
        .arg(Arg::with_name("recomendaciones")
            .short("R")
            .long("recomendaciones")
            .help("Muestra recomendaciones de mejora"))
        .arg(Arg::with_name("showlicense")
            .short("L")
            .long("licencia")
            .help("Muestra la licencia del programa (MIT)"))
        .arg(Arg::with_name("v")
            .short("v")
            .multiple(true)
            .help("Sets the level of verbosity"))
        .get_matches();

    if matches.is_present("showlicense") {
        println!(
            "
Copyright (c) 2018-2022 Ministerio de Fomento
                        Instituto de Ciencias de la Construcción Eduardo Torroja (IETcc-CSIC)

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the 'Software'), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in
all copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED 'AS IS', WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.

Author(s): Rafael Villar Burke <pachi@ietcc.csic.es>
            Daniel Jiménez González <danielj@ietcc.csic.es>
            Marta Sorribes Gil <msorribes@ietcc.csic.es>"
        );
        exit(exitcode::OK);
    }

    // Prólogo ------------------------------------------------------------------------------------

    let verbosity = matches.occurrences_of("v");
    init_logging(verbosity);

    if verbosity > 2 {
        println!("Opciones indicadas: ----------");
        println!("{:#?}", matches);
        println!("------------------------------");
    }

    println!("** Datos de entrada");

    // Catálogo de materiales y local ---------------------------------------------------------------
    let mut catalog = get_catalog(matches.value_of("archivo_materiales"));
    let room = get_room(matches.value_of("archivo_local"));

    if verbosity > 1 && !catalog.cmeta.is_empty() {
        println!("Metadatos del catálogo:");
        for meta in &catalog.cmeta {
            println!("  {}: {}", meta.key, meta.value);
        }
    }

    // Parámetros de cálculo -------------------------------------------------------------------------
    // Argumentos de CLI > Metadatos del catálogo > Valor por defecto
    let defaults = CalcParams::default();
    let params = CalcParams {
        delta_t: get_param(
            &matches,
            "delta_t",
            &catalog,
            META_DELTA_T,
            defaults.delta_t,
            "Diferencia de temperatura [K]",
        ),
        heating_hours: get_param(
            &matches,
            "horas",
            &catalog,
            META_HEATING_HOURS,
            defaults.heating_hours,
            "Horas de calefacción [h]",
        ),
        system_efficiency: get_param(
            &matches,
            "rendimiento",
            &catalog,
            META_SYSTEM_EFFICIENCY,
            defaults.system_efficiency,
            "Rendimiento del sistema [-]",
        ),
        ..defaults
    };
    validate_params(&params);

    // Actualiza metadatos del catálogo con los valores seleccionados
    for meta in params.to_meta() {
        catalog.set_meta(&meta.key, &meta.value);
    }

    // Guardado del catálogo y del local ---------------------------------------------------------
    if let Some(path) = matches.value_of_os("gen_archivo_materiales") {
        let path = Path::new(path);
        let catalog_string = format!("{}\n", catalog);
        if verbosity > 2 {
            println!("Catálogo de materiales:\n{}", catalog_string);
        }
        writefile_or_exit(path, catalog_string.as_bytes());
        if verbosity > 0 {
            println!("Guardado catálogo de materiales: {}", path.display());
        }
    }

    if let Some(path) = matches.value_of_os("gen_archivo_local") {
        let path = Path::new(path);
        writefile_or_exit(path, format!("{}\n", room).as_bytes());
        if verbosity > 0 {
            println!("Guardado archivo del local: {}", path.display());
        }
    }

    // Cálculo de prestaciones ---------------------------------------------------------------------
    let perf = room_performance(&room, &catalog, &params).unwrap_or_else(|error| {
        eprintln!("ERROR: {}", error);
        exit(exitcode::DATAERR);
    });

    // Salida de resultados ------------------------------------------------------------------------
    if let Some(path) = matches.value_of_os("archivo_salida_json") {
        let path = Path::new(path);
        if verbosity > 0 {
            println!("Resultados en formato JSON: {:?}", path.display());
        }
        let json = serde_json::to_string_pretty(&perf).unwrap_or_else(|error| {
            eprintln!("ERROR: No se han podido convertir los resultados al formato JSON");
            if verbosity > 2 {
                println!("{}", error)
            };
            exit(exitcode::DATAERR);
        });
        writefile_or_exit(path, json.as_bytes());
    }

    // Mostrar siempre en formato plain
    println!("** Resultados");
    println!("{}", epc::performance_to_plain(&perf));

    if matches.is_present("recomendaciones") {
        let recs = recommendations(&perf, &catalog);
        println!("{}", epc::recommendations_to_plain(&recs));
    }
}
