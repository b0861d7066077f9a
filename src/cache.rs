//! Caché en disco de resultados de generación y de catálogos parseados.
//!
//! Dos cachés separados, ambos con payload JSON:
//! - programas generados, con nombre de archivo derivado de un hash sha256
//!   (truncado) de los requisitos exactos más el rango de créditos;
//! - catálogos parseados, clavados por el hash sha256 del contenido del
//!   archivo fuente.
//!
//! Key notes:
//! - el nombre del archivo usa un hash truncado, así que una colisión es poco
//!   probable pero posible: al cargar SIEMPRE se revalida que los requisitos
//!   y el rango embebidos coincidan con los actuales antes de confiar en el
//!   payload. Un match de nombre solo nunca alcanza.
//! - miss, clave vencida y archivo corrupto degradan todos a regenerar (con
//!   una línea de log); el archivo corrupto queda para que el próximo guardado
//!   exitoso lo pise.
//! - fallas de E/S al guardar no abortan la corrida: se sigue sin caché.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use crate::models::{Catalogo, Programa, Requisito};

/// Registro persistido del caché de programas. Los requisitos y el rango van
/// embebidos completos para poder revalidarlos al cargar.
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheProgramas {
    pub requisitos: Vec<Requisito>,
    pub min_creditos: u32,
    pub max_creditos: u32,
    pub programas: Vec<Programa>,
}

/// Registro persistido del caché de catálogos, clavado por hash del archivo fuente.
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheCatalogo {
    pub hash_origen: String,
    pub catalogo: Catalogo,
}

/// Hash sha256 (hex completo) del contenido de un archivo.
pub fn hash_archivo(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Hash sha256 truncado (16 hex) de la serialización canónica de los requisitos.
pub fn hash_requisitos(requisitos: &[Requisito]) -> String {
    // serde_json emite los campos en orden de declaración: serialización estable
    let canonico = serde_json::to_string(requisitos).unwrap_or_default();
    let mut hasher = Sha256::new();
    hasher.update(canonico.as_bytes());
    let hex = format!("{:x}", hasher.finalize());
    hex[..16].to_string()
}

/// Nombre de archivo del caché de programas, con el esquema
/// `cache_{catalogo}_reqs_{hash16}_cr_{min}-{max}.json`.
pub fn nombre_archivo_cache(
    nombre_catalogo: &str,
    requisitos: &[Requisito],
    min_creditos: u32,
    max_creditos: u32,
) -> String {
    let seguro: String = nombre_catalogo
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_')
        .collect();
    let seguro = seguro.trim_end();
    format!(
        "cache_{}_reqs_{}_cr_{}-{}.json",
        seguro,
        hash_requisitos(requisitos),
        min_creditos,
        max_creditos
    )
}

/// Intenta cargar programas cacheados. Devuelve None ante miss, clave vencida
/// (requisitos o rango distintos) o archivo corrupto; en todos los casos el
/// llamador regenera.
pub fn cargar_programas(
    path: &Path,
    requisitos: &[Requisito],
    min_creditos: u32,
    max_creditos: u32,
) -> Option<Vec<Programa>> {
    if !path.exists() {
        return None;
    }
    let contenido = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("⚠️  [cache] no se pudo leer {:?}: {}", path, e);
            return None;
        }
    };
    let registro: CacheProgramas = match serde_json::from_str(&contenido) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("⚠️  [cache] archivo corrupto {:?}: {} (se regenera)", path, e);
            return None;
        }
    };
    if registro.requisitos != requisitos
        || registro.min_creditos != min_creditos
        || registro.max_creditos != max_creditos
    {
        eprintln!("♻️  [cache] clave vencida en {:?} (requisitos o créditos distintos)", path);
        return None;
    }
    eprintln!("✅ [cache] {} programas cargados de {:?}", registro.programas.len(), path);
    Some(registro.programas)
}

/// Guarda los programas con su clave embebida. Las fallas de E/S se loguean y
/// se devuelve false: la generación ya terminó, el caché es solo una mejora.
pub fn guardar_programas(
    path: &Path,
    requisitos: &[Requisito],
    min_creditos: u32,
    max_creditos: u32,
    programas: &[Programa],
) -> bool {
    let registro = CacheProgramas {
        requisitos: requisitos.to_vec(),
        min_creditos,
        max_creditos,
        programas: programas.to_vec(),
    };
    let json = match serde_json::to_string(&registro) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("⚠️  [cache] no se pudo serializar: {}", e);
            return false;
        }
    };
    match fs::write(path, json) {
        Ok(()) => {
            eprintln!("💾 [cache] {} programas guardados en {:?}", programas.len(), path);
            true
        }
        Err(e) => {
            eprintln!("⚠️  [cache] no se pudo escribir {:?}: {} (se sigue sin caché)", path, e);
            false
        }
    }
}

/// Intenta cargar un catálogo cacheado, validando el hash del archivo fuente.
pub fn cargar_catalogo(path: &Path, hash_origen: &str) -> Option<Catalogo> {
    if !path.exists() {
        return None;
    }
    let contenido = fs::read_to_string(path).ok()?;
    let registro: CacheCatalogo = match serde_json::from_str(&contenido) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("⚠️  [cache] catálogo corrupto {:?}: {} (se reparsea)", path, e);
            return None;
        }
    };
    if registro.hash_origen != hash_origen {
        eprintln!("♻️  [cache] el archivo fuente cambió; se reparsea el catálogo");
        return None;
    }
    eprintln!("✅ [cache] catálogo cargado de {:?} ({} secciones)", path, registro.catalogo.len());
    Some(registro.catalogo)
}

/// Guarda un catálogo parseado junto con el hash de su fuente.
pub fn guardar_catalogo(path: &Path, hash_origen: &str, catalogo: &Catalogo) -> bool {
    let registro = CacheCatalogo {
        hash_origen: hash_origen.to_string(),
        catalogo: catalogo.clone(),
    };
    match serde_json::to_string(&registro).map(|json| fs::write(path, json)) {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            eprintln!("⚠️  [cache] no se pudo escribir catálogo {:?}: {}", path, e);
            false
        }
        Err(e) => {
            eprintln!("⚠️  [cache] no se pudo serializar catálogo: {}", e);
            false
        }
    }
}
