//! Errores tipados del núcleo de generación.
//!
//! Ojo: un cache miss o un cache corrupto NO son errores — degradan a
//! regeneración completa. La cancelación tampoco: viaja como flag en el
//! resultado para distinguirla de "cero programas".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ErrorGeneracion {
    /// Condición "cuantos" o filtro de días sin operador reconocido o con
    /// operando no numérico. Aborta la generación completa: aplicar el resto
    /// de los requisitos cambiaría silenciosamente qué programas son válidos.
    #[error("condición inválida: '{0}'")]
    CondicionInvalida(String),

    /// min_creditos > max_creditos. Error de programación del llamador;
    /// se rechaza antes de iniciar la búsqueda.
    #[error("rango de créditos inválido: min {min} > max {max}")]
    CreditosFueraDeRango { min: u32, max: u32 },

    /// Un requisito nombra un candidato que no existe en el catálogo.
    #[error("sección desconocida en el catálogo: '{0}'")]
    SeccionDesconocida(String),

    #[error("error de E/S: {0}")]
    Io(#[from] std::io::Error),

    /// Problema de formato en un archivo de entrada (excel o JSON).
    #[error("formato inválido: {0}")]
    Formato(String),
}

impl From<serde_json::Error> for ErrorGeneracion {
    fn from(e: serde_json::Error) -> Self {
        ErrorGeneracion::Formato(e.to_string())
    }
}
