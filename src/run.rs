//! Orquestación de una corrida completa: caché → generación → escritura del
//! caché → filtrado/ordenamiento/límite → render.

use std::sync::atomic::AtomicBool;

use crate::algorithm::generator::generar_programas;
use crate::cache;
use crate::config::{ConfigGeneracion, ConfigSalida};
use crate::error::ErrorGeneracion;
use crate::models::{Catalogo, Programa, Requisito};
use crate::printer::listar_programas;

/// Resultado de la corrida: programas listados, texto de salida, y si se
/// observó la cancelación en algún punto (distinguible de "cero resultados").
#[derive(Debug)]
pub struct Ejecucion {
    pub programas: Vec<Programa>,
    pub texto: String,
    pub cancelado: bool,
}

/// Corre el flujo completo. El catálogo y los requisitos son de sólo lectura
/// durante toda la llamada. `cancelar` es el flag cooperativo que sondean la
/// búsqueda (por programa aceptado) y el bucle de formateo (por programa).
///
/// El caché de programas sólo se escribe tras una generación completa y no
/// cancelada; una corrida interrumpida nunca deja un archivo parcial.
pub fn ejecutar_generacion(
    requisitos: &[Requisito],
    catalogo: &Catalogo,
    config_gen: &ConfigGeneracion,
    config_salida: &ConfigSalida,
    cancelar: &AtomicBool,
) -> Result<Ejecucion, ErrorGeneracion> {
    let mut texto = String::new();
    let mut cancelado = false;

    // 1) Intentar el caché: la clave embebida se revalida contra los
    //    requisitos y el rango actuales, nunca se confía en el nombre solo.
    let mut programas: Option<Vec<Programa>> = None;
    if config_gen.usar_cache {
        if let Some(ruta) = &config_gen.ruta_cache {
            texto.push_str(&format!("Buscando caché en '{}'...\n", ruta.display()));
            programas = cache::cargar_programas(
                ruta,
                requisitos,
                config_gen.min_creditos,
                config_gen.max_creditos,
            );
            texto.push_str(if programas.is_some() {
                "Caché válido: programas cargados.\n"
            } else {
                "Sin caché utilizable: se regenera.\n"
            });
        }
    }

    // 2) Generar si no hubo caché.
    let programas = match programas {
        Some(p) => p,
        None => {
            texto.push_str("Generando programas posibles... (puede tardar)\n");
            let generacion = generar_programas(
                requisitos,
                catalogo,
                config_gen.min_creditos,
                config_gen.max_creditos,
                cancelar,
            )?;
            eprintln!(
                "🧮 [generador] {} programas{}",
                generacion.programas.len(),
                if generacion.cancelado { " (corrida cancelada)" } else { "" }
            );
            texto.push_str(&format!("Se encontraron {} programas.\n", generacion.programas.len()));
            cancelado = generacion.cancelado;

            // 3) Escribir el caché sólo tras una corrida completa.
            if !generacion.cancelado && config_gen.guardar_cache {
                if let Some(ruta) = &config_gen.ruta_cache {
                    cache::guardar_programas(
                        ruta,
                        requisitos,
                        config_gen.min_creditos,
                        config_gen.max_creditos,
                        &generacion.programas,
                    );
                }
            }
            generacion.programas
        }
    };

    // 4) Filtrar, ordenar, limitar y formatear.
    let listado = listar_programas(programas, catalogo, config_salida, cancelar)?;
    texto.push_str(&listado.texto);
    cancelado = cancelado || listado.cancelado;
    if cancelado {
        texto.push_str("\n--- GENERACIÓN CANCELADA ---\n");
    }

    Ok(Ejecucion { programas: listado.programas, texto, cancelado })
}
