use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::json;
use std::sync::Mutex;

use crate::api_json::{self, NOMBRE_ARCHIVO_EXPORT};
use crate::estado::{EstadoPlan, Storage};
use crate::malla;
use crate::models::FiltrosVista;
use crate::vista;

/// El controlador de estado viaja por la app protegido por un Mutex: cada
/// interacción toma el lock y corre hasta completarse antes de la siguiente.
type Controlador = web::Data<Mutex<EstadoPlan>>;

#[derive(Deserialize)]
struct AsignarRequest {
    id: String,
    periodo: u32,
}

#[derive(Deserialize)]
struct QuitarRequest {
    id: String,
}

/// GET /plan?query=...&tipo=...&clasificacion=...
/// Vista completa: semestres filtrados, electivas ofertables, pools,
/// resumen y opciones de filtro.
async fn plan_handler(query: web::Query<FiltrosVista>, data: Controlador) -> impl Responder {
    let filtros = query.into_inner();
    let estado = data.lock().expect("estado mutex poisoned");

    let semestres = vista::semestres_vista(&estado, &filtros);
    let disponibles = vista::electivas_disponibles(&estado, &filtros, None);
    let pools = vista::pools_electivas(&estado);
    let resumen = vista::resumen(&estado);

    let mut clasificaciones = vec!["Todas".to_string()];
    clasificaciones.extend(malla::clasificaciones());

    HttpResponse::Ok().json(json!({
        "semestres": semestres,
        "electivas_disponibles": disponibles,
        "pools": pools,
        "resumen": resumen,
        "tipos": ["Todos", "Obligatorio", "Electivo"],
        "clasificaciones": clasificaciones,
    }))
}

/// GET /cursos/{id}
async fn curso_handler(path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    match vista::detalle_curso(&id) {
        Some(detalle) => HttpResponse::Ok().json(detalle),
        None => HttpResponse::NotFound()
            .json(json!({"error": format!("el curso '{}' no existe en la malla", id)})),
    }
}

/// POST /cursadas/{id}
/// Alterna la marca de cursada; siempre tiene éxito.
async fn alternar_cursada_handler(path: web::Path<String>, data: Controlador) -> impl Responder {
    let id = path.into_inner();
    if malla::buscar_por_id(&id).is_none() {
        return HttpResponse::NotFound()
            .json(json!({"error": format!("el curso '{}' no existe en la malla", id)}));
    }

    let mut estado = data.lock().expect("estado mutex poisoned");
    let cursada = estado.alternar_cursada(&id);
    HttpResponse::Ok().json(json!({
        "id": id,
        "cursada": cursada,
        "resumen": vista::resumen(&estado),
    }))
}

/// POST /cursadas/reiniciar
async fn reiniciar_handler(data: Controlador) -> impl Responder {
    let mut estado = data.lock().expect("estado mutex poisoned");
    estado.reiniciar_cursadas();
    HttpResponse::Ok().json(json!({"status": "ok", "resumen": vista::resumen(&estado)}))
}

/// POST /electivas/asignar  {"id": "...", "periodo": N}
/// Rechaza con 400 (sin tocar el estado) si el curso no es una electiva
/// válida o si la asignación superaría el tope de créditos.
async fn asignar_handler(body: web::Json<AsignarRequest>, data: Controlador) -> impl Responder {
    let req = body.into_inner();
    let mut estado = data.lock().expect("estado mutex poisoned");
    match estado.asignar_electiva(&req.id, req.periodo) {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "asignaciones": estado.asignaciones(),
            "resumen": vista::resumen(&estado),
        })),
        Err(e) => {
            eprintln!("Asignación rechazada ({} -> {}): {}", req.id, req.periodo, e);
            HttpResponse::BadRequest().json(json!({"error": format!("{}", e)}))
        }
    }
}

/// POST /electivas/quitar  {"id": "..."}
async fn quitar_handler(body: web::Json<QuitarRequest>, data: Controlador) -> impl Responder {
    let req = body.into_inner();
    let mut estado = data.lock().expect("estado mutex poisoned");
    estado.quitar_electiva(&req.id);
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "asignaciones": estado.asignaciones(),
        "resumen": vista::resumen(&estado),
    }))
}

/// GET /export
/// Devuelve el documento {DATA, asignaciones} como adjunto descargable.
async fn export_handler(data: Controlador) -> impl Responder {
    let estado = data.lock().expect("estado mutex poisoned");
    match api_json::exportar_json(estado.asignaciones()) {
        Ok(texto) => HttpResponse::Ok()
            .content_type("application/json")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", NOMBRE_ARCHIVO_EXPORT),
            ))
            .body(texto),
        Err(e) => HttpResponse::InternalServerError()
            .json(json!({"error": format!("no se pudo exportar: {}", e)})),
    }
}

/// POST /import (multipart)
/// Lee el archivo subido y, si contiene `asignaciones`, sustituye el mapa
/// completo. Cualquier problema de formato es un 400 y el estado no cambia.
async fn import_handler(mut payload: Multipart, data: Controlador) -> impl Responder {
    let mut contenido: Vec<u8> = Vec::new();
    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(f) => f,
            Err(e) => {
                return HttpResponse::BadRequest()
                    .json(json!({"error": format!("upload inválido: {}", e)}))
            }
        };
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(bytes) => contenido.extend_from_slice(&bytes),
                Err(e) => {
                    return HttpResponse::BadRequest()
                        .json(json!({"error": format!("upload inválido: {}", e)}))
                }
            }
        }
    }

    let texto = match String::from_utf8(contenido) {
        Ok(t) => t,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(json!({"error": "Archivo inválido: no es UTF-8"}))
        }
    };

    let mapa = match api_json::parse_import(&texto) {
        Ok(m) => m,
        Err(e) => return HttpResponse::BadRequest().json(json!({"error": format!("{}", e)})),
    };

    let mut estado = data.lock().expect("estado mutex poisoned");
    estado.reemplazar_asignaciones(mapa);
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "asignadas": estado.asignaciones().len(),
        "resumen": vista::resumen(&estado),
    }))
}

async fn help_handler() -> impl Responder {
    let help = json!({
        "description": "API de la malla curricular interactiva. GET /plan devuelve la vista completa (semestres, electivas ofertables, pools y resumen); las mutaciones van por POST y se persisten en el almacén local.",
        "rutas": {
            "GET /plan": "vista derivada; acepta query, tipo y clasificacion como query params",
            "GET /cursos/{id}": "ficha de un curso con prerrequisitos resueltos",
            "POST /cursadas/{id}": "alterna la marca de cursada",
            "POST /cursadas/reiniciar": "borra todas las cursadas",
            "POST /electivas/asignar": "body {\"id\": \"ELE_A1\", \"periodo\": 5}; 400 si supera el tope de 27 créditos",
            "POST /electivas/quitar": "body {\"id\": \"ELE_A1\"}",
            "GET /export": "descarga el documento {DATA, asignaciones}",
            "POST /import": "multipart con un JSON exportado; sólo se consume 'asignaciones'"
        },
        "ejemplo_asignar": {"id": "ELE_A1", "periodo": 5},
        "nota": "el tope global de electivas es de 27 créditos; las electivas sin cupo no se ofertan"
    });

    HttpResponse::Ok().json(help)
}

pub async fn run_server(bind_addr: &str) -> std::io::Result<()> {
    let storage = match Storage::abrir() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("No se pudo abrir el almacén local: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };
    let controlador = web::Data::new(Mutex::new(EstadoPlan::cargar(storage)));

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(controlador.clone())
            .route("/plan", web::get().to(plan_handler))
            .route("/cursos/{id}", web::get().to(curso_handler))
            .route("/cursadas/reiniciar", web::post().to(reiniciar_handler))
            .route("/cursadas/{id}", web::post().to(alternar_cursada_handler))
            .route("/electivas/asignar", web::post().to(asignar_handler))
            .route("/electivas/quitar", web::post().to(quitar_handler))
            .route("/export", web::get().to(export_handler))
            .route("/import", web::post().to(import_handler))
            .route("/help", web::get().to(help_handler))
    })
    .workers(1)
    .bind(bind_addr)?
    .run()
    .await
}
