//! Lectura del catálogo de secciones desde Excel y de los requisitos desde JSON.
//!
//! Formato de la oferta: cada celda no vacía trae cuatro líneas
//! (código de sección, nombre del curso, horario, créditos). El horario es una
//! lista `DIA HH.MM-HH.MM` separada por `;`; se acepta `.` o `:` como
//! separador de hora.

use calamine::{open_workbook_auto, Data, Reader};
use std::error::Error;
use std::path::Path;

use crate::models::{Catalogo, Dia, Franja, Requisito, Seccion};

/// Convierte un `Data` de calamine a String (versión genérica para celdas)
fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Convierte "HH.MM" o "HH:MM" a minutos desde medianoche.
pub fn hora_a_minutos(hora: &str) -> Option<i32> {
    let tok = hora.trim().replace('.', ":");
    let partes: Vec<&str> = tok.split(':').collect();
    if partes.len() != 2 {
        return None;
    }
    let hh = partes[0].parse::<i32>().ok()?;
    let mm = partes[1].parse::<i32>().ok()?;
    Some(hh * 60 + mm)
}

/// Minutos desde medianoche a "HH.MM" (para la salida en texto).
pub fn minutos_a_hora(minutos: i32) -> String {
    format!("{:02}.{:02}", minutos / 60, minutos % 60)
}

/// Parsea el campo de horario de una celda: `LU 08.30-10.00; MI 08.30-10.00`.
pub fn parsear_horario(texto: &str) -> Result<Vec<Franja>, Box<dyn Error>> {
    let limpio = texto.trim().trim_start_matches('[').trim_end_matches(']');
    let mut franjas = Vec::new();
    for entrada in limpio.split(';') {
        let entrada = entrada.trim();
        if entrada.is_empty() {
            continue;
        }
        let (dia_tok, rango) = entrada
            .split_once(' ')
            .ok_or_else(|| format!("entrada de horario inválida: '{entrada}'"))?;
        let dia = Dia::parse(dia_tok)
            .ok_or_else(|| format!("día desconocido: '{dia_tok}'"))?;
        let (ini_tok, fin_tok) = rango
            .split_once('-')
            .ok_or_else(|| format!("rango horario inválido: '{rango}'"))?;
        let inicio = hora_a_minutos(ini_tok)
            .ok_or_else(|| format!("hora inválida: '{ini_tok}'"))?;
        let fin = hora_a_minutos(fin_tok)
            .ok_or_else(|| format!("hora inválida: '{fin_tok}'"))?;
        if inicio >= fin {
            return Err(format!("rango horario vacío o invertido: '{rango}'").into());
        }
        franjas.push(Franja::new(dia, inicio, fin));
    }
    Ok(franjas)
}

/// Código de curso padre (sin letra de sección): "CS 333.A" -> "CS 333".
fn codigo_curso_de(codigo: &str) -> String {
    match codigo.rsplit_once('.') {
        Some((base, _seccion)) => base.to_string(),
        None => codigo.to_string(),
    }
}

/// Parsea una celda de cuatro líneas en una `Seccion`.
fn parsear_celda(texto: &str) -> Result<Seccion, Box<dyn Error>> {
    let lineas: Vec<&str> = texto.lines().map(|l| l.trim()).collect();
    if lineas.len() < 4 {
        return Err(format!("celda con menos de 4 líneas: '{texto}'").into());
    }
    let codigo = lineas[0].to_string();
    let nombre = lineas[1].trim_start_matches('(').trim_end_matches(')').to_string();
    let horario = parsear_horario(lineas[2])?;
    let creditos = lineas[3]
        .parse::<u32>()
        .map_err(|_| format!("créditos inválidos: '{}'", lineas[3]))?;
    Ok(Seccion {
        codigo_curso: codigo_curso_de(&codigo),
        codigo,
        nombre,
        creditos,
        horario,
    })
}

/// Lee la oferta completa desde un Excel y construye el catálogo.
/// Recorre todas las celdas de la primera hoja; las vacías se ignoran.
pub fn leer_catalogo_excel<P: AsRef<Path>>(path: P) -> Result<Catalogo, Box<dyn Error>> {
    let mut workbook = open_workbook_auto(&path)?;
    let nombres = workbook.sheet_names().to_owned();
    let hoja = nombres
        .first()
        .cloned()
        .ok_or("el archivo no tiene hojas")?;
    let rango = workbook.worksheet_range(&hoja)?;

    let mut catalogo = Catalogo::new();
    for fila in rango.rows() {
        for celda in fila {
            let texto = cell_to_string(celda);
            if texto.is_empty() {
                continue;
            }
            let seccion = parsear_celda(&texto)?;
            catalogo.insertar(seccion);
        }
    }
    eprintln!("📚 [excel] {} secciones leídas de {:?}", catalogo.len(), path.as_ref());
    Ok(catalogo)
}

/// Carga la lista ordenada de requisitos desde el documento JSON.
pub fn cargar_requisitos_json<P: AsRef<Path>>(path: P) -> Result<Vec<Requisito>, Box<dyn Error>> {
    let contenido = std::fs::read_to_string(&path)
        .map_err(|e| format!("no se pudo leer {:?}: {}", path.as_ref(), e))?;
    let requisitos: Vec<Requisito> = serde_json::from_str(&contenido)
        .map_err(|e| format!("JSON de requisitos inválido: {}", e))?;
    Ok(requisitos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hora_a_minutos() {
        assert_eq!(hora_a_minutos("08.30"), Some(510));
        assert_eq!(hora_a_minutos("14:00"), Some(840));
        assert_eq!(hora_a_minutos("9.05"), Some(545));
        assert_eq!(hora_a_minutos("nada"), None);
    }

    #[test]
    fn test_minutos_a_hora() {
        assert_eq!(minutos_a_hora(510), "08.30");
        assert_eq!(minutos_a_hora(840), "14.00");
    }

    #[test]
    fn test_parsear_horario() {
        let franjas = parsear_horario("LU 08.30-10.00; MI 08.30-10.00").unwrap();
        assert_eq!(franjas.len(), 2);
        assert_eq!(franjas[0].dia, Dia::Lunes);
        assert_eq!(franjas[0].inicio, 510);
        assert_eq!(franjas[0].fin, 600);
        assert_eq!(franjas[1].dia, Dia::Miercoles);
    }

    #[test]
    fn test_parsear_horario_invalido() {
        assert!(parsear_horario("XX 08.30-10.00").is_err());
        assert!(parsear_horario("LU 10.00-08.30").is_err());
        assert!(parsear_horario("LU 08.30").is_err());
    }

    #[test]
    fn test_parsear_celda() {
        let celda = "CS 333.A\n(Algoritmos)\nLU 09.00-10.00; JU 09.00-10.00\n6";
        let s = parsear_celda(celda).unwrap();
        assert_eq!(s.codigo, "CS 333.A");
        assert_eq!(s.codigo_curso, "CS 333");
        assert_eq!(s.nombre, "Algoritmos");
        assert_eq!(s.creditos, 6);
        assert_eq!(s.horario.len(), 2);
    }

    #[test]
    fn test_requisitos_json_claves_en_ingles() {
        // el formato del archivo conserva las claves históricas en inglés
        let json = r#"[{"name": "cs", "candidates": ["CS 333.A"], "needed": "=1"}]"#;
        let reqs: Vec<Requisito> = serde_json::from_str(json).unwrap();
        assert_eq!(reqs[0].nombre, "cs");
        assert_eq!(reqs[0].candidatos, vec!["CS 333.A".to_string()]);
        assert_eq!(reqs[0].cuantos, "=1");
    }
}
