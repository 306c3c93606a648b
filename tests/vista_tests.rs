use std::collections::HashMap;

use mallamap::estado::{EstadoPlan, Storage};
use mallamap::malla;
use mallamap::models::{FiltrosVista, TipoCurso};
use mallamap::vista;

fn estado_nuevo() -> EstadoPlan {
    EstadoPlan::cargar(Storage::en_memoria().expect("Debe abrir almacén en memoria"))
}

fn filtros_con_query(query: &str) -> FiltrosVista {
    FiltrosVista { query: query.to_string(), ..FiltrosVista::default() }
}

#[test]
fn test_busqueda_english_solo_devuelve_coincidencias() {
    for c in malla::catalogo() {
        let esperado = c.curso.to_lowercase().contains("english")
            || c.codigo.to_lowercase().contains("english")
            || c.clasificacion.to_lowercase().contains("english");
        assert_eq!(
            vista::coincide_busqueda(c, "English"),
            esperado,
            "predicado inconsistente para {}",
            c.id
        );
    }

    // Casos concretos: English I entra, Guitarra no
    let english = malla::buscar_por_id("518002").expect("English I existe");
    let guitarra = malla::buscar_por_id("80005").expect("Guitarra existe");
    assert!(vista::coincide_busqueda(english, "english"));
    assert!(!vista::coincide_busqueda(guitarra, "english"));
}

#[test]
fn test_busqueda_vacia_acepta_todo() {
    for c in malla::catalogo() {
        assert!(vista::coincide_busqueda(c, ""));
        assert!(vista::coincide_busqueda(c, "   "));
    }
}

#[test]
fn test_obligatorio_de_semestre_3_siempre_en_su_lista() {
    let estado = estado_nuevo();

    let mapa = vista::cursos_por_semestre(&estado, "");
    assert!(mapa[&3].iter().any(|c| c.id == "518007"), "English II debe estar en el semestre 3");

    // Sigue ahí con una búsqueda que lo alcanza
    let mapa = vista::cursos_por_semestre(&estado, "English II");
    assert!(mapa[&3].iter().any(|c| c.id == "518007"));

    // El filtro de tipo Obligatorio lo conserva; el de Electivo lo excluye
    let vista_obl = vista::semestres_vista(
        &estado,
        &FiltrosVista { tipo: Some("Obligatorio".to_string()), ..FiltrosVista::default() },
    );
    let sem3 = vista_obl.iter().find(|s| s.semestre == 3).expect("Debe existir el semestre 3");
    assert!(sem3.cursos.iter().any(|c| c.id == "518007"));

    let vista_ele = vista::semestres_vista(
        &estado,
        &FiltrosVista { tipo: Some("Electivo".to_string()), ..FiltrosVista::default() },
    );
    let sem3 = vista_ele.iter().find(|s| s.semestre == 3).expect("Debe existir el semestre 3");
    assert!(!sem3.cursos.iter().any(|c| c.id == "518007"));
}

#[test]
fn test_electiva_asignada_se_materializa_en_su_semestre() {
    let mut estado = estado_nuevo();
    estado.asignar_electiva("ELE_A1", 5).expect("Debe asignar");

    let mapa = vista::cursos_por_semestre(&estado, "");
    let electiva = mapa[&5].iter().find(|c| c.id == "ELE_A1").expect("Debe aparecer en el 5");
    assert_eq!(electiva.periodo, Some(5));
    assert_eq!(electiva.tipo, TipoCurso::Electivo);

    // En ningún otro semestre
    for (s, lista) in &mapa {
        if *s != 5 {
            assert!(!lista.iter().any(|c| c.id == "ELE_A1"));
        }
    }
}

#[test]
fn test_asignaciones_con_semestre_invalido_se_ignoran() {
    let mut estado = estado_nuevo();
    let mut mapa = HashMap::new();
    mapa.insert("ELE_A1".to_string(), "99".to_string());
    mapa.insert("80005".to_string(), "abc".to_string());
    estado.reemplazar_asignaciones(mapa);

    let por_semestre = vista::cursos_por_semestre(&estado, "");
    for lista in por_semestre.values() {
        assert!(!lista.iter().any(|c| c.id == "ELE_A1" || c.id == "80005"));
    }
}

#[test]
fn test_listas_ordenadas_por_nombre() {
    let mut estado = estado_nuevo();
    estado.asignar_electiva("40004", 1).expect("Debe asignar");

    let mapa = vista::cursos_por_semestre(&estado, "");
    for lista in mapa.values() {
        for par in lista.windows(2) {
            assert!(
                par[0].curso.to_lowercase() <= par[1].curso.to_lowercase(),
                "'{}' debería ir antes que '{}'",
                par[0].curso,
                par[1].curso
            );
        }
    }
}

#[test]
fn test_progreso_cero_y_progreso_acotado_a_cien() {
    let mut estado = estado_nuevo();
    assert_eq!(vista::resumen(&estado).progreso_pct, 0);
    assert_eq!(vista::resumen(&estado).creditos_completados, 0);

    // Marcar todo el catálogo supera los 160 créditos del plan;
    // el porcentaje queda acotado a 100.
    for c in malla::catalogo() {
        estado.alternar_cursada(&c.id);
    }
    let resumen = vista::resumen(&estado);
    assert!(resumen.creditos_completados > resumen.creditos_totales_plan);
    assert_eq!(resumen.progreso_pct, 100);
}

#[test]
fn test_resumen_refleja_asignaciones() {
    let mut estado = estado_nuevo();
    estado.asignar_electiva("ELE_A1", 5).expect("Debe asignar");

    let resumen = vista::resumen(&estado);
    assert_eq!(resumen.creditos_totales_plan, 160);
    assert_eq!(resumen.creditos_obligatorios, 133);
    assert_eq!(resumen.tope_electivos, 27);
    assert_eq!(resumen.creditos_electivos_asignados, 3);
    assert_eq!(resumen.electivos_restantes, 24);
}

#[test]
fn test_disponibles_excluyen_asignadas_y_sin_cupo() {
    let mut estado = estado_nuevo();
    let tres: Vec<String> = malla::electivos()
        .filter(|e| e.creditos == 3)
        .map(|e| e.id.clone())
        .take(8)
        .collect();
    for (i, id) in tres.iter().enumerate() {
        estado.asignar_electiva(id, (i as u32 % 10) + 1).expect("Debe asignar");
    }
    assert_eq!(estado.electivos_restantes(), 3);

    let disponibles = vista::electivas_disponibles(&estado, &FiltrosVista::default(), None);
    assert!(!disponibles.is_empty());
    for e in &disponibles {
        assert!(!estado.asignaciones().contains_key(&e.id), "{} ya estaba asignada", e.id);
        assert!(e.creditos <= 3, "{} no cabe en el cupo restante", e.id);
    }
}

#[test]
fn test_disponibles_por_pool_y_filtros() {
    let estado = estado_nuevo();

    let fc = vista::electivas_disponibles(&estado, &FiltrosVista::default(), Some("FC"));
    assert!(!fc.is_empty());
    assert!(fc.iter().all(|e| e.clasificacion == "FC"));

    let filtros = FiltrosVista { clasificacion: Some("DC".to_string()), ..FiltrosVista::default() };
    let dc = vista::electivas_disponibles(&estado, &filtros, None);
    assert!(dc.iter().all(|e| e.clasificacion == "DC"));

    // El centinela "Todas" no filtra nada
    let todas = FiltrosVista { clasificacion: Some("Todas".to_string()), ..FiltrosVista::default() };
    assert_eq!(
        vista::electivas_disponibles(&estado, &todas, None).len(),
        vista::electivas_disponibles(&estado, &FiltrosVista::default(), None).len()
    );
}

#[test]
fn test_pools_agrupan_solo_electivas_sin_asignar() {
    let mut estado = estado_nuevo();
    estado.asignar_electiva("ELE_A1", 2).expect("Debe asignar");

    let pools = vista::pools_electivas(&estado);
    assert!(pools.contains_key("FC"));
    assert!(pools.contains_key("IBC"));
    assert!(pools.contains_key("DC"));
    assert!(pools.contains_key("DE"));
    assert!(!pools["IBC"].iter().any(|e| e.id == "ELE_A1"));
}

#[test]
fn test_detalle_resuelve_prerrequisitos() {
    let detalle = vista::detalle_curso("518007").expect("English II existe");
    assert_eq!(detalle.curso.curso, "English II");
    assert_eq!(detalle.prereqs.len(), 1);
    assert_eq!(detalle.prereqs[0].id, "518002");
    assert_eq!(detalle.prereqs[0].curso.as_deref(), Some("English I"));

    assert!(vista::detalle_curso("NO_EXISTE").is_none());
}

#[test]
fn test_filtros_de_clasificacion_post_agrupacion() {
    let estado = estado_nuevo();
    let filtros = FiltrosVista { clasificacion: Some("DC".to_string()), ..FiltrosVista::default() };

    for sem in vista::semestres_vista(&estado, &filtros) {
        for c in &sem.cursos {
            assert_eq!(c.clasificacion, "DC");
        }
        assert_eq!(sem.creditos, sem.cursos.iter().map(|c| c.creditos).sum::<u32>());
    }
}

#[test]
fn test_busqueda_con_query_en_vista() {
    let estado = estado_nuevo();
    let vista_filtrada = vista::semestres_vista(&estado, &filtros_con_query("linguistics"));
    let sem3 = vista_filtrada.iter().find(|s| s.semestre == 3).expect("Debe existir el semestre 3");
    assert!(sem3.cursos.iter().any(|c| c.id == "503438691"));
    assert!(sem3.cursos.iter().all(|c| c.curso.to_lowercase().contains("linguistics")));
}
