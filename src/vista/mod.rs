//! Vistas derivadas del plan: agrupación por semestre, pools de electivas,
//! electivas ofertables y estadísticas agregadas.
//!
//! Todo es función pura de (catálogo, estado, filtros); recomputar es
//! idempotente y el resultado completo se rederiva tras cada mutación.

use std::collections::BTreeMap;

use crate::estado::EstadoPlan;
use crate::malla::{self, SEMESTRES, TOPE_CREDITOS_ELECTIVOS, TOTAL_CREDITOS_PLAN};
use crate::models::{
    Curso, DetalleCurso, FiltrosVista, PrereqResuelto, ResumenPlan, SemestreVista,
};

/// Predicado de búsqueda: subcadena sin distinción de mayúsculas sobre
/// nombre, código o clasificación. La consulta vacía acepta todo.
pub fn coincide_busqueda(curso: &Curso, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return true;
    }
    [curso.curso.as_str(), curso.codigo.as_str(), curso.clasificacion.as_str()]
        .iter()
        .any(|campo| campo.to_lowercase().contains(&q))
}

fn pasa_filtros(curso: &Curso, filtros: &FiltrosVista) -> bool {
    if let Some(t) = filtros.tipo_activo() {
        if curso.tipo != t {
            return false;
        }
    }
    if let Some(cl) = filtros.clasificacion_activa() {
        if curso.clasificacion != cl {
            return false;
        }
    }
    true
}

/// Cursos por semestre: obligatorios fijos + electivas asignadas a ese
/// semestre, materializadas con su periodo, ordenados por nombre.
/// Asignaciones cuyo semestre no parsea dentro del plan se ignoran.
pub fn cursos_por_semestre(estado: &EstadoPlan, query: &str) -> BTreeMap<u32, Vec<Curso>> {
    let mut mapa: BTreeMap<u32, Vec<Curso>> = SEMESTRES.map(|s| (s, Vec::new())).collect();

    for c in malla::obligatorios() {
        if !coincide_busqueda(c, query) {
            continue;
        }
        if let Some(lista) = c.periodo.and_then(|p| mapa.get_mut(&p)) {
            lista.push(c.clone());
        }
    }

    for e in malla::electivos() {
        if !coincide_busqueda(e, query) {
            continue;
        }
        let Some(raw) = estado.asignaciones().get(&e.id) else {
            continue;
        };
        let Some(p) = raw.parse::<u32>().ok().filter(|p| malla::es_semestre_valido(*p)) else {
            continue;
        };
        let mut materializada = e.clone();
        materializada.periodo = Some(p);
        if let Some(lista) = mapa.get_mut(&p) {
            lista.push(materializada);
        }
    }

    for lista in mapa.values_mut() {
        lista.sort_by(|a, b| a.curso.to_lowercase().cmp(&b.curso.to_lowercase()));
    }

    mapa
}

/// Filtros de tipo/clasificación, aplicados después de agrupar. Son de
/// presentación: nunca tocan las asignaciones.
pub fn aplicar_filtros(lista: &[Curso], filtros: &FiltrosVista) -> Vec<Curso> {
    lista.iter().filter(|c| pasa_filtros(c, filtros)).cloned().collect()
}

/// Vista final por semestre con los filtros activos y subtotal de créditos.
pub fn semestres_vista(estado: &EstadoPlan, filtros: &FiltrosVista) -> Vec<SemestreVista> {
    cursos_por_semestre(estado, &filtros.query)
        .into_iter()
        .map(|(semestre, lista)| {
            let cursos = aplicar_filtros(&lista, filtros);
            let creditos = malla::sum_creditos(&cursos);
            SemestreVista { semestre, creditos, cursos }
        })
        .collect()
}

/// Electivas ofertables para asignar: sin entrada en el mapa, con créditos
/// dentro del cupo restante y pasando los filtros activos. `pool` restringe
/// a una clasificación concreta (el selector por pool de la interfaz).
///
/// Es una vista derivada de sólo lectura del complemento del mapa de
/// asignaciones; no mantiene estado propio.
pub fn electivas_disponibles(
    estado: &EstadoPlan,
    filtros: &FiltrosVista,
    pool: Option<&str>,
) -> Vec<Curso> {
    let restantes = estado.electivos_restantes();
    malla::electivos()
        .filter(|e| !estado.asignaciones().contains_key(&e.id))
        .filter(|e| pool.map_or(true, |p| e.clasificacion == p))
        .filter(|e| pasa_filtros(e, filtros))
        .filter(|e| e.creditos <= restantes)
        .cloned()
        .collect()
}

/// Electivas sin asignar agrupadas por clasificación (pools FC/IBC/DC/DE).
pub fn pools_electivas(estado: &EstadoPlan) -> BTreeMap<String, Vec<Curso>> {
    let mut pools: BTreeMap<String, Vec<Curso>> = BTreeMap::new();
    for e in malla::electivos() {
        if estado.asignaciones().contains_key(&e.id) {
            continue;
        }
        pools.entry(e.clasificacion.clone()).or_default().push(e.clone());
    }
    pools
}

/// Ficha de un curso con sus prerrequisitos resueltos a nombre y código.
pub fn detalle_curso(id: &str) -> Option<DetalleCurso> {
    let curso = malla::buscar_por_id(id)?;
    let prereqs = curso
        .prereqs
        .iter()
        .map(|pid| match malla::buscar_por_id(pid) {
            Some(p) => PrereqResuelto {
                id: pid.clone(),
                curso: Some(p.curso.clone()),
                codigo: Some(p.codigo.clone()),
            },
            None => PrereqResuelto { id: pid.clone(), curso: None, codigo: None },
        })
        .collect();
    Some(DetalleCurso { curso: curso.clone(), prereqs })
}

/// Estadísticas agregadas. El porcentaje de progreso se redondea y se
/// acota a 100 aunque la suma literal supere los créditos del plan.
pub fn resumen(estado: &EstadoPlan) -> ResumenPlan {
    let completados = estado.creditos_completados();
    let pct = ((completados as f64 / TOTAL_CREDITOS_PLAN as f64) * 100.0).round() as u32;
    ResumenPlan {
        creditos_totales_plan: TOTAL_CREDITOS_PLAN,
        creditos_obligatorios: malla::sum_creditos(malla::obligatorios()),
        tope_electivos: TOPE_CREDITOS_ELECTIVOS,
        creditos_completados: completados,
        progreso_pct: pct.min(100),
        creditos_electivos_asignados: estado.creditos_electivos_asignados(),
        electivos_restantes: estado.electivos_restantes(),
    }
}
