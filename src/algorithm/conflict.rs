//! Detección de topes entre horarios semanales.

use crate::models::Franja;

/// True si alguna franja de `existentes` solapa con alguna de `candidatas`
/// (mismo día y rangos [inicio, fin) superpuestos). Función pura, O(n·m).
/// Franjas espalda-con-espalda (fin de una == inicio de la otra) no chocan.
pub fn franjas_en_conflicto(existentes: &[Franja], candidatas: &[Franja]) -> bool {
    for actual in existentes {
        for candidata in candidatas {
            if actual.solapa_con(candidata) {
                return true;
            }
        }
    }
    false
}
