//! Configuración explícita de una corrida de generación.
//!
//! Parámetros inmutables que el llamador arma por completo y pasa por
//! referencia a `ejecutar_generacion`; no hay estado de configuración global
//! ni fase de "update" posterior.

use std::path::PathBuf;

use crate::algorithm::filters::{CampoOrden, FiltrosSalida};

/// Parámetros de la búsqueda y del caché de programas.
#[derive(Debug, Clone)]
pub struct ConfigGeneracion {
    pub min_creditos: u32,
    pub max_creditos: u32,
    /// Intentar cargar del caché antes de generar.
    pub usar_cache: bool,
    /// Guardar el resultado al caché tras una corrida completa.
    pub guardar_cache: bool,
    /// Ruta del archivo de caché; None deshabilita ambos lados.
    pub ruta_cache: Option<PathBuf>,
}

impl Default for ConfigGeneracion {
    fn default() -> Self {
        ConfigGeneracion {
            min_creditos: 30,
            max_creditos: 42,
            usar_cache: true,
            guardar_cache: true,
            ruta_cache: None,
        }
    }
}

/// Parámetros de la etapa de salida: filtros, orden, límite y render.
#[derive(Debug, Clone)]
pub struct ConfigSalida {
    pub filtros: FiltrosSalida,
    pub orden: Option<CampoOrden>,
    pub descendente: bool,
    /// Máximo de programas a listar; None = sin límite.
    pub limite: Option<usize>,
    /// Incluir la grilla semanal en el texto de cada programa.
    pub incluir_horario: bool,
    /// Si se indica, el texto final también se escribe a este archivo.
    pub guardar_en: Option<PathBuf>,
}

impl Default for ConfigSalida {
    fn default() -> Self {
        ConfigSalida {
            filtros: FiltrosSalida::default(),
            orden: Some(CampoOrden::TotalDias),
            descendente: false,
            limite: Some(5),
            incluir_horario: true,
            guardar_en: None,
        }
    }
}
