//! Parser y evaluador de condiciones de conteo ("=1", "<=3", ">2", ...).
//!
//! Las condiciones vienen de los archivos de requisitos y de los filtros de
//! días. Una condición malformada se reporta con `CondicionInvalida`, nunca
//! se trata como "siempre verdadera": señala un archivo de requisitos corrupto.

use crate::error::ErrorGeneracion;

/// Operadores de comparación soportados.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparador {
    MenorIgual,
    MayorIgual,
    Igual,
    Menor,
    Mayor,
}

impl Comparador {
    pub fn aplicar(&self, cuenta: i64, valor: i64) -> bool {
        match self {
            Comparador::MenorIgual => cuenta <= valor,
            Comparador::MayorIgual => cuenta >= valor,
            Comparador::Igual => cuenta == valor,
            Comparador::Menor => cuenta < valor,
            Comparador::Mayor => cuenta > valor,
        }
    }
}

/// Parsea una condición en (operador, valor).
///
/// Los operadores de dos caracteres ("<=", ">=") se prueban antes que los de
/// uno para evitar la ambigüedad de prefijo ("<" es prefijo de "<=").
pub fn parsear_condicion(expr: &str) -> Result<(Comparador, i64), ErrorGeneracion> {
    let expr = expr.trim();
    let (op, resto) = if let Some(r) = expr.strip_prefix("<=") {
        (Comparador::MenorIgual, r)
    } else if let Some(r) = expr.strip_prefix(">=") {
        (Comparador::MayorIgual, r)
    } else if let Some(r) = expr.strip_prefix("==") {
        (Comparador::Igual, r)
    } else if let Some(r) = expr.strip_prefix('=') {
        (Comparador::Igual, r)
    } else if let Some(r) = expr.strip_prefix('<') {
        (Comparador::Menor, r)
    } else if let Some(r) = expr.strip_prefix('>') {
        (Comparador::Mayor, r)
    } else {
        return Err(ErrorGeneracion::CondicionInvalida(expr.to_string()));
    };

    let valor = resto
        .trim()
        .parse::<i64>()
        .map_err(|_| ErrorGeneracion::CondicionInvalida(expr.to_string()))?;
    if valor < 0 {
        return Err(ErrorGeneracion::CondicionInvalida(expr.to_string()));
    }
    Ok((op, valor))
}

/// Evalúa si `cuenta` satisface la condición.
pub fn cumple_condicion(expr: &str, cuenta: i64) -> Result<bool, ErrorGeneracion> {
    let (op, valor) = parsear_condicion(expr)?;
    Ok(op.aplicar(cuenta, valor))
}

/// Cota superior de secciones tomables para un requisito, derivada de su
/// condición: "<=N" y "=N" acotan en N, "<N" en N-1. Para ">=N" y ">N" no
/// existe cota finita y la búsqueda explora todo el conjunto de candidatos
/// del requisito (costo conocido; cambiar la poda cambiaría qué programas se
/// descubren primero bajo cancelación).
pub fn limite_superior(expr: &str) -> Result<Option<usize>, ErrorGeneracion> {
    let (op, valor) = parsear_condicion(expr)?;
    let limite = match op {
        Comparador::MenorIgual | Comparador::Igual => Some(valor as usize),
        Comparador::Menor => Some((valor as usize).saturating_sub(1)),
        Comparador::MayorIgual | Comparador::Mayor => None,
    };
    Ok(limite)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cumple_condicion() {
        assert!(cumple_condicion("<=3", 3).unwrap());
        assert!(!cumple_condicion("<=3", 4).unwrap());
        assert!(cumple_condicion("=2", 2).unwrap());
        assert!(!cumple_condicion("=2", 1).unwrap());
        assert!(!cumple_condicion(">1", 1).unwrap());
        assert!(cumple_condicion(">1", 2).unwrap());
        assert!(cumple_condicion(">=2", 2).unwrap());
        assert!(cumple_condicion("<5", 4).unwrap());
    }

    #[test]
    fn test_condicion_malformada() {
        assert!(matches!(
            cumple_condicion("abc2", 2),
            Err(ErrorGeneracion::CondicionInvalida(_))
        ));
        assert!(cumple_condicion("=", 0).is_err());
        assert!(cumple_condicion("<=x", 0).is_err());
        assert!(cumple_condicion("", 0).is_err());
    }

    #[test]
    fn test_prefijo_dos_caracteres_primero() {
        // "<=3" debe parsear como MenorIgual(3), no como Menor("=3")
        assert_eq!(
            parsear_condicion("<=3").unwrap(),
            (Comparador::MenorIgual, 3)
        );
        assert_eq!(parsear_condicion("==2").unwrap(), (Comparador::Igual, 2));
    }

    #[test]
    fn test_limite_superior() {
        assert_eq!(limite_superior("<=3").unwrap(), Some(3));
        assert_eq!(limite_superior("=2").unwrap(), Some(2));
        assert_eq!(limite_superior("<3").unwrap(), Some(2));
        assert_eq!(limite_superior("<0").unwrap(), Some(0));
        assert_eq!(limite_superior(">=2").unwrap(), None);
        assert_eq!(limite_superior(">0").unwrap(), None);
    }
}
