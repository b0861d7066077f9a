//! Render en texto de los programas: resumen por programa y grilla semanal.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::algorithm::filters::seleccionar_programas;
use crate::config::ConfigSalida;
use crate::error::ErrorGeneracion;
use crate::excel::minutos_a_hora;
use crate::models::{Catalogo, Dia, Programa};

/// Días que muestra la grilla (columnas, en orden).
const DIAS_GRILLA: [Dia; 5] = [Dia::Lunes, Dia::Martes, Dia::Miercoles, Dia::Jueves, Dia::Viernes];

/// Filas horarias de la grilla: bloques de una hora desde las 08.30.
const INICIO_GRILLA: i32 = 8 * 60 + 30;
const FILAS_GRILLA: usize = 14;

/// Resultado de listar: programas sobrevivientes (con índice asignado),
/// el texto acumulado, y si el bucle se interrumpió por cancelación.
#[derive(Debug)]
pub struct Listado {
    pub programas: Vec<Programa>,
    pub texto: String,
    pub cancelado: bool,
}

/// Encabezado y totales de un programa, más la grilla si se pide.
pub fn formatear_programa(programa: &Programa, catalogo: &Catalogo, incluir_horario: bool) -> String {
    let mut salida = format!("\nPrograma {}:\n", programa.indice.unwrap_or(0));
    salida.push_str("Cursos:");
    for codigo in &programa.cursos {
        salida.push_str(&format!(" {codigo} |"));
    }
    salida.push('\n');
    salida.push_str(&format!("Créditos totales: {}\n", programa.total_creditos));
    salida.push_str(&format!("Días totales: {}\n", programa.total_dias));
    salida.push_str(&format!("Horas totales: {:.2}\n", programa.total_horas));
    if incluir_horario {
        salida.push_str(&formatear_grilla(programa, catalogo));
    }
    salida
}

/// Grilla semanal: una fila por bloque horario, una columna por día, el código
/// de la sección en cada bloque que su franja cubre (total o parcialmente).
pub fn formatear_grilla(programa: &Programa, catalogo: &Catalogo) -> String {
    let mut celdas: Vec<[String; 5]> =
        (0..FILAS_GRILLA).map(|_| std::array::from_fn(|_| String::new())).collect();

    for codigo in &programa.cursos {
        let Some(seccion) = catalogo.get(codigo) else { continue };
        for franja in &seccion.horario {
            let Some(col) = DIAS_GRILLA.iter().position(|d| *d == franja.dia) else {
                continue; // la grilla sólo muestra lunes a viernes
            };
            for fila in 0..FILAS_GRILLA {
                let bloque_ini = INICIO_GRILLA + (fila as i32) * 60;
                let bloque_fin = bloque_ini + 60;
                if franja.inicio < bloque_fin && bloque_ini < franja.fin {
                    celdas[fila][col] = codigo.clone();
                }
            }
        }
    }

    let ancho_total = 12 * (DIAS_GRILLA.len() + 1) + DIAS_GRILLA.len() + 2;
    let separador = format!("{}\n", "-".repeat(ancho_total));

    let mut salida = String::from("Horario semanal:\n");
    salida.push_str(&separador);
    salida.push_str(&format!("| {:<11}", "Hora"));
    for dia in DIAS_GRILLA {
        salida.push_str(&format!("| {:<11}", dia.nombre()));
    }
    salida.push_str("|\n");
    salida.push_str(&separador);
    for fila in 0..FILAS_GRILLA {
        let bloque_ini = INICIO_GRILLA + (fila as i32) * 60;
        let etiqueta = format!("{}-{}", minutos_a_hora(bloque_ini), minutos_a_hora(bloque_ini + 60));
        salida.push_str(&format!("| {:<11}", etiqueta));
        for col in 0..DIAS_GRILLA.len() {
            salida.push_str(&format!("| {:<11}", celdas[fila][col]));
        }
        salida.push_str("|\n");
    }
    salida.push_str(&separador);
    salida
}

/// Aplica el pipeline filtrar/ordenar/limitar y formatea cada sobreviviente,
/// sondeando `cancelar` una vez por programa formateado. Si se indica
/// `guardar_en`, el texto también se escribe a ese archivo (las fallas de
/// escritura se loguean, no abortan).
pub fn listar_programas(
    programas: Vec<Programa>,
    catalogo: &Catalogo,
    config: &ConfigSalida,
    cancelar: &AtomicBool,
) -> Result<Listado, ErrorGeneracion> {
    let mut texto = String::new();

    if !config.filtros.esta_vacio() {
        texto.push_str(&format!("Filtros: {}\n", config.filtros.describir()));
    }
    if let Some(campo) = config.orden {
        texto.push_str(&format!(
            "Ordenado por: {}{}\n",
            campo.describir(),
            if config.descendente { " (descendente)" } else { "" }
        ));
    }

    let seleccionados = seleccionar_programas(
        programas,
        &config.filtros,
        config.orden,
        config.descendente,
        config.limite,
    )?;
    eprintln!("🔎 [salida] {} programas tras filtrar/ordenar/limitar", seleccionados.len());
    texto.push_str(&format!("Programas totales: {}\n", seleccionados.len()));

    let mut listados: Vec<Programa> = Vec::with_capacity(seleccionados.len());
    let mut cancelado = false;
    for (i, mut programa) in seleccionados.into_iter().enumerate() {
        if cancelar.load(Ordering::Relaxed) {
            cancelado = true;
            break;
        }
        programa.indice = Some(i + 1);
        texto.push_str(&formatear_programa(&programa, catalogo, config.incluir_horario));
        listados.push(programa);
    }

    if let Some(path) = &config.guardar_en {
        match std::fs::write(path, &texto) {
            Ok(()) => texto.push_str(&format!("\nSalida guardada en {:?}\n", path)),
            Err(e) => eprintln!("⚠️  [salida] no se pudo escribir {:?}: {}", path, e),
        }
    }

    Ok(Listado { programas: listados, texto, cancelado })
}
