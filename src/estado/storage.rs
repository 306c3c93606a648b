//! Almacén local clave→valor respaldado por SQLite.
//!
//! Los valores son JSON; cada escritura sella la fila con su timestamp.
//! La ruta del archivo se resuelve vía `MALLA_DB_PATH` (env o `.env`),
//! con `data/malla.db` como fallback.

use chrono::Utc;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Clave versionada del conjunto de cursadas
pub const CLAVE_CURSADAS: &str = "lilei_completed_v1";
/// Clave versionada de las asignaciones de electivas
pub const CLAVE_ASIGNACIONES: &str = "lilei_electivas_asignadas_v3";

// load .env at open if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

/// Ruta del almacén local. Honra MALLA_DB_PATH.
pub fn storage_path() -> PathBuf {
    load_dotenv();
    match std::env::var("MALLA_DB_PATH") {
        Ok(p) => PathBuf::from(p),
        Err(_) => PathBuf::from("data/malla.db"),
    }
}

pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Abre (o crea) el almacén en la ruta configurada.
    pub fn abrir() -> Result<Storage, Box<dyn Error>> {
        Self::abrir_en(storage_path())
    }

    /// Abre (o crea) el almacén en una ruta explícita.
    pub fn abrir_en<P: AsRef<Path>>(path: P) -> Result<Storage, Box<dyn Error>> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::init(&conn)?;
        Ok(Storage { conn })
    }

    /// Almacén efímero, para pruebas.
    pub fn en_memoria() -> Result<Storage, Box<dyn Error>> {
        let conn = Connection::open_in_memory()?;
        Self::init(&conn)?;
        Ok(Storage { conn })
    }

    fn init(conn: &Connection) -> Result<(), Box<dyn Error>> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS estado (
                clave TEXT PRIMARY KEY,
                valor TEXT NOT NULL,
                actualizado TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn leer(&self, clave: &str) -> Result<Option<String>, Box<dyn Error>> {
        let mut stmt = self.conn.prepare("SELECT valor FROM estado WHERE clave = ?1")?;
        let mut rows = stmt.query(params![clave])?;
        if let Some(row) = rows.next()? {
            let valor: String = row.get(0)?;
            Ok(Some(valor))
        } else {
            Ok(None)
        }
    }

    pub fn guardar(&self, clave: &str, valor: &str) -> Result<(), Box<dyn Error>> {
        let ts = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO estado (clave, valor, actualizado) VALUES (?1, ?2, ?3)
             ON CONFLICT(clave) DO UPDATE SET valor = excluded.valor, actualizado = excluded.actualizado",
            params![clave, valor, ts],
        )?;
        Ok(())
    }
}
