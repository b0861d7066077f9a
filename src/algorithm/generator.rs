//! Generador de programas: búsqueda con backtracking sobre los requisitos.
//!
//! La recursión doble del diseño clásico (requisito por requisito, y dentro de
//! cada requisito candidato por candidato con ramas saltar/incluir) se
//! implementa con una pila de trabajo explícita. Eso desacopla la profundidad
//! de búsqueda del call stack y da un punto natural para sondear la
//! cancelación cooperativa en cada programa aceptado.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::algorithm::condiciones::{cumple_condicion, limite_superior, parsear_condicion, Comparador};
use crate::algorithm::conflict::franjas_en_conflicto;
use crate::error::ErrorGeneracion;
use crate::models::{Catalogo, Franja, Programa, Requisito};

/// Resultado de una corrida de generación. `cancelado` distingue una corrida
/// interrumpida de una que genuinamente no encontró programas.
#[derive(Debug, Clone)]
pub struct Generacion {
    pub programas: Vec<Programa>,
    pub cancelado: bool,
}

/// Nodo pendiente de la búsqueda. `cursos` y `franjas` acumulan las secciones
/// ya elegidas en todos los requisitos anteriores más el actual.
struct Marco {
    req_idx: usize,
    cand_idx: usize,
    tomados: usize,
    cursos: Vec<String>,
    franjas: Vec<Franja>,
}

/// Enumera todos los programas que cumplen los requisitos, quedan dentro del
/// rango de créditos y no tienen topes de horario.
///
/// Contratos:
/// - Todas las condiciones `cuantos` se parsean antes de buscar: una sola
///   condición malformada aborta la llamada completa (aplicarla a medias
///   cambiaría la semántica de los programas en silencio).
/// - Un candidato inexistente en el catálogo aborta con `SeccionDesconocida`.
/// - `cancelar` se sondea una vez por programa aceptado; al observarse, se
///   devuelve la lista parcial con `cancelado = true`.
/// - El *conjunto* de programas devuelto es determinista para entradas fijas;
///   el orden de enumeración no es parte del contrato (lo impone después la
///   etapa de ordenamiento).
pub fn generar_programas(
    requisitos: &[Requisito],
    catalogo: &Catalogo,
    min_creditos: u32,
    max_creditos: u32,
    cancelar: &AtomicBool,
) -> Result<Generacion, ErrorGeneracion> {
    if min_creditos > max_creditos {
        return Err(ErrorGeneracion::CreditosFueraDeRango {
            min: min_creditos,
            max: max_creditos,
        });
    }

    // Validación anticipada: condiciones parseables y candidatos conocidos.
    let mut condiciones: Vec<(Comparador, i64)> = Vec::with_capacity(requisitos.len());
    let mut limites: Vec<Option<usize>> = Vec::with_capacity(requisitos.len());
    for req in requisitos {
        condiciones.push(parsear_condicion(&req.cuantos)?);
        limites.push(limite_superior(&req.cuantos)?);
        for codigo in &req.candidatos {
            if catalogo.get(codigo).is_none() {
                return Err(ErrorGeneracion::SeccionDesconocida(codigo.clone()));
            }
        }
    }

    let mut programas: Vec<Programa> = Vec::new();
    let mut pila: Vec<Marco> = vec![Marco {
        req_idx: 0,
        cand_idx: 0,
        tomados: 0,
        cursos: Vec::new(),
        franjas: Vec::new(),
    }];

    while let Some(marco) = pila.pop() {
        // Caso terminal: todos los requisitos recorridos. Validación conjunta
        // del candidato completo y sondeo de cancelación.
        if marco.req_idx == requisitos.len() {
            if cancelar.load(Ordering::Relaxed) {
                return Ok(Generacion { programas, cancelado: true });
            }
            if let Some(programa) =
                validar_y_puntuar(&marco.cursos, requisitos, catalogo, min_creditos, max_creditos)?
            {
                programas.push(programa);
            }
            continue;
        }

        let req = &requisitos[marco.req_idx];

        // Fin de los candidatos de este requisito: avanzar al siguiente sólo
        // si la cuenta acumulada satisface la condición.
        if marco.cand_idx == req.candidatos.len() {
            let (op, valor) = condiciones[marco.req_idx];
            if op.aplicar(marco.tomados as i64, valor) {
                pila.push(Marco {
                    req_idx: marco.req_idx + 1,
                    cand_idx: 0,
                    tomados: 0,
                    cursos: marco.cursos,
                    franjas: marco.franjas,
                });
            }
            continue;
        }

        let codigo = &req.candidatos[marco.cand_idx];
        // `get` no puede fallar tras la validación anticipada
        let seccion = catalogo
            .get(codigo)
            .ok_or_else(|| ErrorGeneracion::SeccionDesconocida(codigo.clone()))?;

        let dentro_de_cota = match limites[marco.req_idx] {
            Some(limite) => marco.tomados < limite,
            None => true,
        };

        // Rama "incluir": se apila primero para que "saltar" (apilada después,
        // LIFO) se explore antes, igual que la enumeración de referencia.
        // Una sección no puede tomarse dos veces aunque aparezca como
        // candidata de más de un requisito.
        if dentro_de_cota
            && !marco.cursos.iter().any(|c| c == codigo)
            && !franjas_en_conflicto(&marco.franjas, &seccion.horario)
        {
            let mut cursos = marco.cursos.clone();
            cursos.push(codigo.clone());
            let mut franjas = marco.franjas.clone();
            franjas.extend_from_slice(&seccion.horario);
            pila.push(Marco {
                req_idx: marco.req_idx,
                cand_idx: marco.cand_idx + 1,
                tomados: marco.tomados + 1,
                cursos,
                franjas,
            });
        }

        // Rama "saltar": reutiliza los vectores del marco actual.
        pila.push(Marco {
            req_idx: marco.req_idx,
            cand_idx: marco.cand_idx + 1,
            tomados: marco.tomados,
            cursos: marco.cursos,
            franjas: marco.franjas,
        });
    }

    Ok(Generacion { programas, cancelado: false })
}

/// Compuerta final de aceptación: suma de créditos dentro del rango y cada
/// requisito re-verificado contra el conjunto *final* de cursos (es el único
/// punto donde todos los requisitos se validan en conjunto sobre el mismo
/// candidato). Al aceptar calcula los campos derivados.
///
/// Una sección candidata de varios requisitos cuenta para cada uno de ellos,
/// pero sus créditos se suman una sola vez (aparece una vez en el programa).
pub fn validar_y_puntuar(
    cursos: &[String],
    requisitos: &[Requisito],
    catalogo: &Catalogo,
    min_creditos: u32,
    max_creditos: u32,
) -> Result<Option<Programa>, ErrorGeneracion> {
    let mut total_creditos: u32 = 0;
    for codigo in cursos {
        let seccion = catalogo
            .get(codigo)
            .ok_or_else(|| ErrorGeneracion::SeccionDesconocida(codigo.clone()))?;
        total_creditos += seccion.creditos;
    }
    if total_creditos < min_creditos || total_creditos > max_creditos {
        return Ok(None);
    }

    for req in requisitos {
        let cuenta = cursos
            .iter()
            .filter(|c| req.candidatos.contains(c))
            .count() as i64;
        if !cumple_condicion(&req.cuantos, cuenta)? {
            return Ok(None);
        }
    }

    // Estadísticas derivadas: días distintos con clase y horas totales.
    let mut dias: HashSet<crate::models::Dia> = HashSet::new();
    let mut total_minutos: i64 = 0;
    for codigo in cursos {
        if let Some(seccion) = catalogo.get(codigo) {
            for franja in &seccion.horario {
                dias.insert(franja.dia);
                total_minutos += franja.duracion_min() as i64;
            }
        }
    }

    Ok(Some(Programa {
        cursos: cursos.to_vec(),
        total_creditos,
        total_dias: dias.len() as u32,
        total_horas: total_minutos as f64 / 60.0,
        indice: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dia, Seccion};

    fn seccion(codigo: &str, creditos: u32, franjas: &[(Dia, i32, i32)]) -> Seccion {
        Seccion {
            codigo: codigo.to_string(),
            codigo_curso: codigo.split('.').next().unwrap_or(codigo).to_string(),
            nombre: format!("Curso {codigo}"),
            creditos,
            horario: franjas.iter().map(|&(d, i, f)| Franja::new(d, i, f)).collect(),
        }
    }

    fn catalogo_de(secciones: Vec<Seccion>) -> Catalogo {
        let mut cat = Catalogo::new();
        for s in secciones {
            cat.insertar(s);
        }
        cat
    }

    fn sin_cancelar() -> AtomicBool {
        AtomicBool::new(false)
    }

    fn requisito(nombre: &str, candidatos: &[&str], cuantos: &str) -> Requisito {
        Requisito {
            nombre: nombre.to_string(),
            candidatos: candidatos.iter().map(|s| s.to_string()).collect(),
            cuantos: cuantos.to_string(),
        }
    }

    #[test]
    fn test_un_requisito_exactamente_uno() {
        // A y B chocan a la misma hora; "=1" exige exactamente una
        let cat = catalogo_de(vec![
            seccion("CS 101.A", 6, &[(Dia::Lunes, 540, 600)]),
            seccion("CS 101.B", 6, &[(Dia::Lunes, 540, 600)]),
        ]);
        let reqs = vec![requisito("cs", &["CS 101.A", "CS 101.B"], "=1")];
        let generacion = generar_programas(&reqs, &cat, 6, 12, &sin_cancelar()).unwrap();
        assert!(!generacion.cancelado);
        assert_eq!(generacion.programas.len(), 2); // una con A, otra con B
        for p in &generacion.programas {
            assert_eq!(p.cursos.len(), 1);
            assert_eq!(p.total_creditos, 6);
            assert_eq!(p.total_dias, 1);
            assert!((p.total_horas - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_conflicto_poda_la_combinacion() {
        // A y B chocan: "<=2" permitiría ambas, pero el tope las excluye
        let cat = catalogo_de(vec![
            seccion("CS 101.A", 3, &[(Dia::Lunes, 540, 600)]),
            seccion("CS 102.A", 3, &[(Dia::Lunes, 570, 630)]),
        ]);
        let reqs = vec![requisito("cs", &["CS 101.A", "CS 102.A"], ">=1")];
        let generacion = generar_programas(&reqs, &cat, 0, 12, &sin_cancelar()).unwrap();
        // {A} y {B}, nunca {A, B}
        assert_eq!(generacion.programas.len(), 2);
        assert!(generacion.programas.iter().all(|p| p.cursos.len() == 1));
    }

    #[test]
    fn test_rango_de_creditos() {
        let cat = catalogo_de(vec![
            seccion("CS 101.A", 3, &[(Dia::Lunes, 540, 600)]),
            seccion("MA 201.A", 4, &[(Dia::Martes, 540, 600)]),
        ]);
        let reqs = vec![
            requisito("cs", &["CS 101.A"], "<=1"),
            requisito("ma", &["MA 201.A"], "<=1"),
        ];
        // sólo la combinación de 7 créditos entra en [7, 10]
        let generacion = generar_programas(&reqs, &cat, 7, 10, &sin_cancelar()).unwrap();
        assert_eq!(generacion.programas.len(), 1);
        assert_eq!(generacion.programas[0].total_creditos, 7);
        assert_eq!(generacion.programas[0].cursos.len(), 2);
    }

    #[test]
    fn test_min_mayor_que_max_rechazado() {
        let cat = catalogo_de(vec![seccion("CS 101.A", 3, &[])]);
        let reqs = vec![requisito("cs", &["CS 101.A"], "<=1")];
        let err = generar_programas(&reqs, &cat, 10, 5, &sin_cancelar()).unwrap_err();
        assert!(matches!(err, ErrorGeneracion::CreditosFueraDeRango { min: 10, max: 5 }));
    }

    #[test]
    fn test_condicion_malformada_aborta_todo() {
        let cat = catalogo_de(vec![
            seccion("CS 101.A", 3, &[]),
            seccion("MA 201.A", 3, &[]),
        ]);
        // el segundo requisito está corrupto: nada de aplicar sólo el primero
        let reqs = vec![
            requisito("cs", &["CS 101.A"], "=1"),
            requisito("ma", &["MA 201.A"], "abc1"),
        ];
        let err = generar_programas(&reqs, &cat, 0, 10, &sin_cancelar()).unwrap_err();
        assert!(matches!(err, ErrorGeneracion::CondicionInvalida(_)));
    }

    #[test]
    fn test_candidato_desconocido() {
        let cat = catalogo_de(vec![seccion("CS 101.A", 3, &[])]);
        let reqs = vec![requisito("cs", &["CS 101.A", "NO EXISTE.Z"], "<=1")];
        let err = generar_programas(&reqs, &cat, 0, 10, &sin_cancelar()).unwrap_err();
        assert!(matches!(err, ErrorGeneracion::SeccionDesconocida(c) if c == "NO EXISTE.Z"));
    }

    #[test]
    fn test_seccion_compartida_cuenta_para_ambos_requisitos() {
        // "CS 300.A" es candidata de dos requisitos: satisface ambos conteos
        // pero sus créditos se suman una sola vez
        let cat = catalogo_de(vec![seccion("CS 300.A", 6, &[(Dia::Viernes, 600, 720)])]);
        let reqs = vec![
            requisito("electivo_a", &["CS 300.A"], "=1"),
            requisito("electivo_b", &["CS 300.A"], "=1"),
        ];
        let generacion = generar_programas(&reqs, &cat, 6, 6, &sin_cancelar()).unwrap();
        assert_eq!(generacion.programas.len(), 1);
        assert_eq!(generacion.programas[0].cursos, vec!["CS 300.A".to_string()]);
        assert_eq!(generacion.programas[0].total_creditos, 6);
    }

    #[test]
    fn test_poda_por_cota_superior() {
        // "=1" con tres candidatos sin topes: nunca se exploran pares ni tríos
        let cat = catalogo_de(vec![
            seccion("A 1.A", 3, &[(Dia::Lunes, 480, 540)]),
            seccion("B 1.A", 3, &[(Dia::Martes, 480, 540)]),
            seccion("C 1.A", 3, &[(Dia::Miercoles, 480, 540)]),
        ]);
        let reqs = vec![requisito("uno", &["A 1.A", "B 1.A", "C 1.A"], "=1")];
        let generacion = generar_programas(&reqs, &cat, 0, 30, &sin_cancelar()).unwrap();
        assert_eq!(generacion.programas.len(), 3);
    }

    #[test]
    fn test_mismo_conjunto_en_corridas_repetidas() {
        let cat = catalogo_de(vec![
            seccion("A 1.A", 3, &[(Dia::Lunes, 480, 540)]),
            seccion("B 1.A", 3, &[(Dia::Martes, 480, 540)]),
            seccion("C 1.A", 4, &[(Dia::Miercoles, 480, 540)]),
        ]);
        let reqs = vec![requisito("todos", &["A 1.A", "B 1.A", "C 1.A"], ">=1")];
        let normalizar = |g: &Generacion| {
            let mut v: Vec<Vec<String>> = g
                .programas
                .iter()
                .map(|p| {
                    let mut c = p.cursos.clone();
                    c.sort();
                    c
                })
                .collect();
            v.sort();
            v
        };
        let g1 = generar_programas(&reqs, &cat, 0, 30, &sin_cancelar()).unwrap();
        let g2 = generar_programas(&reqs, &cat, 0, 30, &sin_cancelar()).unwrap();
        assert_eq!(normalizar(&g1), normalizar(&g2));
        assert_eq!(g1.programas.len(), 7); // subconjuntos no vacíos de 3 cursos compatibles
    }

    #[test]
    fn test_cancelacion_inmediata() {
        let cat = catalogo_de(vec![
            seccion("A 1.A", 3, &[(Dia::Lunes, 480, 540)]),
            seccion("B 1.A", 3, &[(Dia::Martes, 480, 540)]),
        ]);
        let reqs = vec![requisito("todos", &["A 1.A", "B 1.A"], ">=0")];
        let cancelar = AtomicBool::new(true);
        let generacion = generar_programas(&reqs, &cat, 0, 30, &cancelar).unwrap();
        assert!(generacion.cancelado);
        assert!(generacion.programas.is_empty());
    }

    #[test]
    fn test_validar_y_puntuar_estadisticas() {
        let cat = catalogo_de(vec![
            seccion("A 1.A", 3, &[(Dia::Lunes, 480, 570), (Dia::Miercoles, 480, 570)]),
            seccion("B 1.A", 4, &[(Dia::Lunes, 600, 660)]),
        ]);
        let cursos = vec!["A 1.A".to_string(), "B 1.A".to_string()];
        let p = validar_y_puntuar(&cursos, &[], &cat, 0, 20).unwrap().unwrap();
        assert_eq!(p.total_creditos, 7);
        assert_eq!(p.total_dias, 2); // lunes y miércoles
        assert!((p.total_horas - 4.0).abs() < 1e-9); // 90 + 90 + 60 minutos
    }
}
