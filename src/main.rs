// --- Generador de programas académicos - Archivo principal ---

use std::error::Error;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use progen::cache;
use progen::config::{ConfigGeneracion, ConfigSalida};
use progen::excel::{cargar_requisitos_json, leer_catalogo_excel};
use progen::models::Catalogo;

/// Directorio de datos: variable de entorno `PROGEN_DATA_DIR` o `./data`.
fn data_dir() -> PathBuf {
    match std::env::var("PROGEN_DATA_DIR") {
        Ok(p) => PathBuf::from(p),
        Err(_) => PathBuf::from("data"),
    }
}

/// Carga el catálogo pasando por el caché en disco: si el hash del archivo
/// fuente no cambió, se evita reparsear el Excel.
fn cargar_catalogo(ruta_excel: &PathBuf, dir: &PathBuf) -> Result<Catalogo, Box<dyn Error>> {
    let hash = cache::hash_archivo(ruta_excel)?;
    let nombre = ruta_excel
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "catalogo".to_string());
    let ruta_cache = dir.join(format!("cache_catalogo_{nombre}.json"));

    if let Some(catalogo) = cache::cargar_catalogo(&ruta_cache, &hash) {
        return Ok(catalogo);
    }
    let catalogo = leer_catalogo_excel(ruta_excel)?;
    cache::guardar_catalogo(&ruta_cache, &hash, &catalogo);
    Ok(catalogo)
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Generador de Programas Académicos ===");

    let args: Vec<String> = std::env::args().collect();
    let dir = data_dir();
    let ruta_excel = dir.join(args.get(1).map(String::as_str).unwrap_or("Courses.xlsx"));
    let ruta_requisitos = dir.join(args.get(2).map(String::as_str).unwrap_or("requirements.json"));

    let requisitos = cargar_requisitos_json(&ruta_requisitos)?;
    let catalogo = cargar_catalogo(&ruta_excel, &dir)?;
    println!("{} requisitos, {} secciones en el catálogo", requisitos.len(), catalogo.len());

    let mut config_gen = ConfigGeneracion::default();
    let nombre_catalogo = ruta_excel
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    config_gen.ruta_cache = Some(dir.join(cache::nombre_archivo_cache(
        &nombre_catalogo,
        &requisitos,
        config_gen.min_creditos,
        config_gen.max_creditos,
    )));

    let salida_dir = dir.join("output");
    std::fs::create_dir_all(&salida_dir)?;
    let config_salida = ConfigSalida {
        guardar_en: Some(
            salida_dir.join(chrono::Local::now().format("%Y-%m-%d_%H-%M-%S.txt").to_string()),
        ),
        ..Default::default()
    };

    // Sin interfaz interactiva el flag queda siempre en false; un frontend lo
    // compartiría con un hilo trabajador para cancelar a mitad de corrida.
    let cancelar = AtomicBool::new(false);
    let ejecucion =
        progen::ejecutar_generacion(&requisitos, &catalogo, &config_gen, &config_salida, &cancelar)?;

    print!("{}", ejecucion.texto);
    Ok(())
}
