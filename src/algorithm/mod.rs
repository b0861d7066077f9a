// Módulo de alto nivel del generador de programas
// Declarar submódulos (archivos en la carpeta `src/algorithm`)
pub mod condiciones;
pub mod conflict;
pub mod filters;
pub mod generator;

// Reexportar solo la API pública que se expone desde aquí
pub use condiciones::{cumple_condicion, limite_superior, parsear_condicion, Comparador};
pub use conflict::franjas_en_conflicto;
pub use filters::{aplicar_filtros, ordenar_programas, seleccionar_programas, CampoOrden, FiltrosSalida};
pub use generator::{generar_programas, validar_y_puntuar, Generacion};
