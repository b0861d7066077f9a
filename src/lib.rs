// Biblioteca raíz del crate `progen`.
// Reexporta los módulos principales y la función de conveniencia
// `ejecutar_generacion` que orquesta el flujo completo.
pub mod algorithm;
pub mod cache;
pub mod config;
pub mod error;
pub mod excel;
pub mod models;
pub mod printer;
pub mod run;

pub use run::{ejecutar_generacion, Ejecucion};
