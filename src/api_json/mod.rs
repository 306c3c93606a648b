//! Exportación e importación del estado de asignaciones.
//!
//! El documento exportado lleva el catálogo completo (`DATA`) como
//! referencia y el mapa de asignaciones. Al importar sólo se consume
//! `asignaciones`; `DATA` nunca vuelve al estado vivo.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;

use crate::malla;
use crate::models::Curso;

/// Nombre fijo del archivo de descarga
pub const NOMBRE_ARCHIVO_EXPORT: &str = "lilei_malla_config.json";

#[derive(Serialize)]
struct DocumentoExport<'a> {
    #[serde(rename = "DATA")]
    data: &'a [Curso],
    asignaciones: &'a HashMap<String, String>,
}

#[derive(Deserialize)]
struct DocumentoImport {
    #[serde(default)]
    asignaciones: Option<HashMap<String, String>>,
}

/// Serializa el documento de exportación, pretty-printed.
pub fn exportar_json(asignaciones: &HashMap<String, String>) -> Result<String, Box<dyn Error>> {
    let doc = DocumentoExport { data: malla::catalogo(), asignaciones };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parsea un documento importado. Falla cerrado: JSON inválido o sin campo
/// `asignaciones` se rechaza con mensaje y el estado queda intacto.
pub fn parse_import(json_str: &str) -> Result<HashMap<String, String>, Box<dyn Error>> {
    let doc: DocumentoImport =
        serde_json::from_str(json_str).map_err(|e| format!("Archivo inválido: {}", e))?;
    match doc.asignaciones {
        Some(mapa) => Ok(mapa),
        None => Err("JSON sin 'asignaciones'.".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_import_con_asignaciones() {
        let json_data = r#"
        {
            "asignaciones": {
                "300040": "4",
                "ELE_A1": "5"
            }
        }
        "#;

        let mapa = parse_import(json_data).expect("Debe parsear JSON con asignaciones");
        assert_eq!(mapa.len(), 2);
        assert_eq!(mapa.get("300040"), Some(&"4".to_string()));
        assert_eq!(mapa.get("ELE_A1"), Some(&"5".to_string()));
    }

    #[test]
    fn test_parse_import_ignora_data() {
        // Un documento exportado completo: DATA viaja pero no se consume
        let json_data = r#"
        {
            "DATA": [{"id": "x", "codigo": "x", "curso": "X", "creditos": 1, "tipo": "Electivo", "clasificacion": "FC"}],
            "asignaciones": { "80005": "2" }
        }
        "#;

        let mapa = parse_import(json_data).expect("Debe aceptar documento con DATA");
        assert_eq!(mapa.len(), 1);
        assert_eq!(mapa.get("80005"), Some(&"2".to_string()));
    }

    #[test]
    fn test_parse_import_sin_asignaciones() {
        let err = parse_import(r#"{"otra_cosa": 1}"#).unwrap_err();
        assert!(err.to_string().contains("asignaciones"));
    }

    #[test]
    fn test_parse_import_json_invalido() {
        assert!(parse_import("esto no es json").is_err());
        assert!(parse_import(r#"{"asignaciones": ["no", "es", "mapa"]}"#).is_err());
    }

    #[test]
    fn test_export_incluye_catalogo_y_asignaciones() {
        let mut asignaciones = HashMap::new();
        asignaciones.insert("300040".to_string(), "4".to_string());

        let texto = exportar_json(&asignaciones).expect("Debe serializar");
        let valor: serde_json::Value = serde_json::from_str(&texto).expect("Debe ser JSON válido");
        assert_eq!(
            valor["DATA"].as_array().map(|a| a.len()),
            Some(malla::catalogo().len())
        );
        assert_eq!(valor["asignaciones"]["300040"], "4");
    }
}
