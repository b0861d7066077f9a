//! Filtrado, ordenamiento y límite de los programas generados.
//!
//! Los filtros son un conjunto cerrado de predicados tipados (nada de evaluar
//! expresiones arbitrarias): condición sobre el número de días, exclusión de
//! secciones, inclusión de al menos una, y secciones obligatorias. Se combinan
//! con AND lógico; sin filtros configurados, todo programa pasa.

use crate::algorithm::condiciones::parsear_condicion;
use crate::error::ErrorGeneracion;
use crate::models::Programa;

/// Filtros de salida. Cada campo vacío/None queda deshabilitado.
#[derive(Debug, Clone, Default)]
pub struct FiltrosSalida {
    /// Condición sobre `total_dias`, con la misma sintaxis de los requisitos
    /// (ej: "<=4" para programas de a lo más cuatro días).
    pub condicion_dias: Option<String>,
    /// El programa no debe contener ninguna de estas secciones.
    pub excluir: Vec<String>,
    /// El programa debe contener al menos una de estas secciones.
    pub incluir_alguno: Vec<String>,
    /// El programa debe contener todas estas secciones.
    pub obligatorios: Vec<String>,
}

impl FiltrosSalida {
    pub fn esta_vacio(&self) -> bool {
        self.condicion_dias.is_none()
            && self.excluir.is_empty()
            && self.incluir_alguno.is_empty()
            && self.obligatorios.is_empty()
    }

    /// Descripción legible para el log de salida.
    pub fn describir(&self) -> String {
        let mut partes: Vec<String> = Vec::new();
        if let Some(cond) = &self.condicion_dias {
            partes.push(format!("total_dias {cond}"));
        }
        if !self.excluir.is_empty() {
            partes.push(format!("excluir {:?}", self.excluir));
        }
        if !self.incluir_alguno.is_empty() {
            partes.push(format!("incluir alguno de {:?}", self.incluir_alguno));
        }
        if !self.obligatorios.is_empty() {
            partes.push(format!("obligatorios {:?}", self.obligatorios));
        }
        if partes.is_empty() {
            "ninguno".to_string()
        } else {
            partes.join(" y ")
        }
    }
}

/// Campo numérico por el que ordenar los programas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampoOrden {
    TotalDias,
    TotalCreditos,
    TotalHoras,
    NumCursos,
}

impl CampoOrden {
    /// Parsea el nombre del campo tal como lo escribe el usuario.
    pub fn parse(s: &str) -> Option<CampoOrden> {
        match s.trim().to_lowercase().as_str() {
            "total_dias" | "dias" => Some(CampoOrden::TotalDias),
            "total_creditos" | "creditos" => Some(CampoOrden::TotalCreditos),
            "total_horas" | "horas" => Some(CampoOrden::TotalHoras),
            "num_cursos" | "cursos" => Some(CampoOrden::NumCursos),
            _ => None,
        }
    }

    fn extraer(&self, p: &Programa) -> f64 {
        match self {
            CampoOrden::TotalDias => p.total_dias as f64,
            CampoOrden::TotalCreditos => p.total_creditos as f64,
            CampoOrden::TotalHoras => p.total_horas,
            CampoOrden::NumCursos => p.cursos.len() as f64,
        }
    }

    pub fn describir(&self) -> &'static str {
        match self {
            CampoOrden::TotalDias => "total_dias",
            CampoOrden::TotalCreditos => "total_creditos",
            CampoOrden::TotalHoras => "total_horas",
            CampoOrden::NumCursos => "num_cursos",
        }
    }
}

/// Aplica todos los filtros habilitados (AND) y retorna los que pasan.
/// La condición de días se valida antes de filtrar: una condición malformada
/// aborta con `CondicionInvalida` en vez de filtrar a medias.
pub fn aplicar_filtros(
    programas: Vec<Programa>,
    filtros: &FiltrosSalida,
) -> Result<Vec<Programa>, ErrorGeneracion> {
    if filtros.esta_vacio() {
        return Ok(programas);
    }

    let condicion_dias = match &filtros.condicion_dias {
        Some(expr) => Some(parsear_condicion(expr)?),
        None => None,
    };

    let resultado: Vec<Programa> = programas
        .into_iter()
        .filter(|p| {
            if let Some((op, valor)) = condicion_dias {
                if !op.aplicar(p.total_dias as i64, valor) {
                    return false;
                }
            }
            if filtros.excluir.iter().any(|c| p.contiene(c)) {
                return false;
            }
            if !filtros.incluir_alguno.is_empty()
                && !filtros.incluir_alguno.iter().any(|c| p.contiene(c))
            {
                return false;
            }
            if !filtros.obligatorios.iter().all(|c| p.contiene(c)) {
                return false;
            }
            true
        })
        .collect();

    Ok(resultado)
}

/// Ordenamiento estable por el campo elegido; descendente si se pide.
pub fn ordenar_programas(programas: &mut [Programa], campo: CampoOrden, descendente: bool) {
    programas.sort_by(|a, b| {
        let cmp = campo.extraer(a).total_cmp(&campo.extraer(b));
        if descendente { cmp.reverse() } else { cmp }
    });
}

/// Pipeline completo: filtrar, ordenar y truncar a `limite` (None = sin límite).
pub fn seleccionar_programas(
    programas: Vec<Programa>,
    filtros: &FiltrosSalida,
    orden: Option<CampoOrden>,
    descendente: bool,
    limite: Option<usize>,
) -> Result<Vec<Programa>, ErrorGeneracion> {
    let mut resultado = aplicar_filtros(programas, filtros)?;
    if let Some(campo) = orden {
        ordenar_programas(&mut resultado, campo, descendente);
    }
    if let Some(n) = limite {
        resultado.truncate(n);
    }
    Ok(resultado)
}
