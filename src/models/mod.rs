// Estructuras de datos principales

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Día de la semana, ordenado lunes..domingo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dia {
    Lunes,
    Martes,
    Miercoles,
    Jueves,
    Viernes,
    Sabado,
    Domingo,
}

impl Dia {
    /// Parsea un día desde el código corto ("LU", "MA", ...) o el nombre
    /// completo en español, sin distinguir mayúsculas.
    pub fn parse(s: &str) -> Option<Dia> {
        let t = s.trim().to_uppercase();
        // aceptar nombres con tilde quitándola primero
        let t = t.replace('É', "E").replace('Á', "A");
        match t.as_str() {
            "LU" | "LUN" | "LUNES" => Some(Dia::Lunes),
            "MA" | "MAR" | "MARTES" => Some(Dia::Martes),
            "MI" | "MIE" | "MIERCOLES" => Some(Dia::Miercoles),
            "JU" | "JUE" | "JUEVES" => Some(Dia::Jueves),
            "VI" | "VIE" | "VIERNES" => Some(Dia::Viernes),
            "SA" | "SAB" | "SABADO" => Some(Dia::Sabado),
            "DO" | "DOM" | "DOMINGO" => Some(Dia::Domingo),
            _ => None,
        }
    }

    /// Código corto para mostrar en la grilla semanal.
    pub fn codigo(&self) -> &'static str {
        match self {
            Dia::Lunes => "LU",
            Dia::Martes => "MA",
            Dia::Miercoles => "MI",
            Dia::Jueves => "JU",
            Dia::Viernes => "VI",
            Dia::Sabado => "SA",
            Dia::Domingo => "DO",
        }
    }

    /// Nombre completo para encabezados de salida.
    pub fn nombre(&self) -> &'static str {
        match self {
            Dia::Lunes => "Lunes",
            Dia::Martes => "Martes",
            Dia::Miercoles => "Miércoles",
            Dia::Jueves => "Jueves",
            Dia::Viernes => "Viernes",
            Dia::Sabado => "Sábado",
            Dia::Domingo => "Domingo",
        }
    }
}

/// Franja horaria semanal: día + rango [inicio, fin) en minutos desde medianoche.
/// Invariante: inicio < fin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Franja {
    pub dia: Dia,
    pub inicio: i32,
    pub fin: i32,
}

impl Franja {
    pub fn new(dia: Dia, inicio: i32, fin: i32) -> Franja {
        Franja { dia, inicio, fin }
    }

    /// Duración de la franja en minutos.
    pub fn duracion_min(&self) -> i32 {
        self.fin - self.inicio
    }

    /// True si ambas franjas caen el mismo día y los rangos [inicio, fin)
    /// se superponen. Franjas consecutivas (fin == inicio) NO chocan.
    pub fn solapa_con(&self, otra: &Franja) -> bool {
        self.dia == otra.dia && self.inicio < otra.fin && otra.inicio < self.fin
    }
}

/// Una sección ofertada de un curso. Inmutable una vez parseada.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seccion {
    /// Código completo con letra de sección (ej: "CS 333.A"). Único en el catálogo.
    pub codigo: String,
    /// Identificador del curso padre, sin sección (ej: "CS 333").
    pub codigo_curso: String,
    pub nombre: String,
    pub creditos: u32,
    pub horario: Vec<Franja>,
}

/// Catálogo de secciones, indexado por código completo. De sólo lectura
/// durante la generación; puede compartirse entre llamadas repetidas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalogo {
    pub secciones: HashMap<String, Seccion>,
}

impl Catalogo {
    pub fn new() -> Catalogo {
        Catalogo { secciones: HashMap::new() }
    }

    pub fn insertar(&mut self, seccion: Seccion) {
        self.secciones.insert(seccion.codigo.clone(), seccion);
    }

    pub fn get(&self, codigo: &str) -> Option<&Seccion> {
        self.secciones.get(codigo)
    }

    pub fn len(&self) -> usize {
        self.secciones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secciones.is_empty()
    }
}

/// Requisito académico: de sus `candidatos` deben elegirse tantas secciones
/// como exija la condición `cuantos` (ej: "=1", "<=3").
///
/// Los renames de serde mantienen compatibilidad con los archivos
/// requirements.json existentes (claves en inglés).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requisito {
    #[serde(rename = "name")]
    pub nombre: String,
    #[serde(rename = "candidates")]
    pub candidatos: Vec<String>,
    #[serde(rename = "needed")]
    pub cuantos: String,
}

/// Programa aceptado: conjunto de secciones sin topes de horario, dentro del
/// rango de créditos y cumpliendo todos los requisitos. No se muta después de
/// aceptado, salvo para asignarle `indice` (1-based) al momento de listar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Programa {
    pub cursos: Vec<String>,
    pub total_creditos: u32,
    pub total_dias: u32,
    pub total_horas: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indice: Option<usize>,
}

impl Programa {
    /// True si el programa contiene la sección indicada.
    pub fn contiene(&self, codigo: &str) -> bool {
        self.cursos.iter().any(|c| c == codigo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dia_parse() {
        assert_eq!(Dia::parse("LU"), Some(Dia::Lunes));
        assert_eq!(Dia::parse("martes"), Some(Dia::Martes));
        assert_eq!(Dia::parse("MIÉRCOLES"), Some(Dia::Miercoles));
        assert_eq!(Dia::parse("xx"), None);
    }

    #[test]
    fn test_franja_solapa() {
        let a = Franja::new(Dia::Lunes, 540, 600); // 09:00-10:00
        let b = Franja::new(Dia::Lunes, 570, 630); // 09:30-10:30
        let c = Franja::new(Dia::Lunes, 600, 660); // 10:00-11:00 (consecutiva)
        let d = Franja::new(Dia::Martes, 540, 600);
        assert!(a.solapa_con(&b));
        assert!(!a.solapa_con(&c));
        assert!(!a.solapa_con(&d));
    }
}
