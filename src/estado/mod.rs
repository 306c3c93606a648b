//! Estado mutable del plan: cursadas y asignaciones de electivas.
//!
//! `EstadoPlan` es el único dueño de los dos conjuntos persistentes. Cada
//! mutación se escribe al almacén en el momento; una escritura fallida no
//! aborta la operación (caché best-effort, el siguiente guardado repara).

mod storage;

pub use storage::{storage_path, Storage, CLAVE_ASIGNACIONES, CLAVE_CURSADAS};

use std::collections::{HashMap, HashSet};
use std::error::Error;

use crate::malla::{self, TOPE_CREDITOS_ELECTIVOS};
use crate::models::TipoCurso;

pub struct EstadoPlan {
    cursadas: HashSet<String>,
    asignaciones: HashMap<String, String>,
    storage: Storage,
}

impl EstadoPlan {
    /// Carga el estado desde el almacén. Valores ausentes o corruptos caen
    /// al default vacío; la siguiente escritura deja el almacén sano.
    pub fn cargar(storage: Storage) -> EstadoPlan {
        let cursadas = match storage.leer(CLAVE_CURSADAS) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(_) => HashSet::new(),
            },
            Ok(None) => HashSet::new(),
            Err(e) => {
                eprintln!("No se pudo leer '{}': {}", CLAVE_CURSADAS, e);
                HashSet::new()
            }
        };

        let asignaciones = match storage.leer(CLAVE_ASIGNACIONES) {
            Ok(Some(raw)) => serde_json::from_str::<HashMap<String, String>>(&raw).unwrap_or_default(),
            Ok(None) => HashMap::new(),
            Err(e) => {
                eprintln!("No se pudo leer '{}': {}", CLAVE_ASIGNACIONES, e);
                HashMap::new()
            }
        };

        EstadoPlan { cursadas, asignaciones, storage }
    }

    fn persistir_cursadas(&self) {
        let mut ids: Vec<&String> = self.cursadas.iter().collect();
        ids.sort();
        match serde_json::to_string(&ids) {
            Ok(raw) => {
                if let Err(e) = self.storage.guardar(CLAVE_CURSADAS, &raw) {
                    eprintln!("No se pudo guardar '{}': {}", CLAVE_CURSADAS, e);
                }
            }
            Err(e) => eprintln!("No se pudo serializar cursadas: {}", e),
        }
    }

    fn persistir_asignaciones(&self) {
        match serde_json::to_string(&self.asignaciones) {
            Ok(raw) => {
                if let Err(e) = self.storage.guardar(CLAVE_ASIGNACIONES, &raw) {
                    eprintln!("No se pudo guardar '{}': {}", CLAVE_ASIGNACIONES, e);
                }
            }
            Err(e) => eprintln!("No se pudo serializar asignaciones: {}", e),
        }
    }

    /// Alterna la marca de cursada de un curso. Devuelve la membresía nueva.
    pub fn alternar_cursada(&mut self, id: &str) -> bool {
        let ahora = if self.cursadas.remove(id) {
            false
        } else {
            self.cursadas.insert(id.to_string());
            true
        };
        self.persistir_cursadas();
        ahora
    }

    pub fn reiniciar_cursadas(&mut self) {
        self.cursadas.clear();
        self.persistir_cursadas();
    }

    pub fn creditos_completados(&self) -> u32 {
        malla::sum_creditos(
            malla::catalogo().iter().filter(|c| self.cursadas.contains(&c.id)),
        )
    }

    pub fn creditos_electivos_asignados(&self) -> u32 {
        malla::sum_creditos(
            malla::electivos().filter(|c| self.asignaciones.contains_key(&c.id)),
        )
    }

    pub fn electivos_restantes(&self) -> u32 {
        TOPE_CREDITOS_ELECTIVOS.saturating_sub(self.creditos_electivos_asignados())
    }

    /// Asigna una electiva a un semestre. Rechaza ids desconocidos, cursos no
    /// electivos, semestres fuera del plan y asignaciones que superen el tope
    /// de créditos. Reasignar una electiva ya ubicada sólo la mueve: sus
    /// propios créditos no cuentan contra el tope en esa operación.
    pub fn asignar_electiva(&mut self, id: &str, periodo: u32) -> Result<(), Box<dyn Error>> {
        let curso = malla::buscar_por_id(id)
            .ok_or_else(|| format!("el curso '{}' no existe en la malla", id))?;
        if curso.tipo != TipoCurso::Electivo {
            return Err(format!("el curso '{}' no es electivo", id).into());
        }
        if !malla::es_semestre_valido(periodo) {
            return Err(format!("semestre {} fuera del plan (1-10)", periodo).into());
        }

        let asignados_sin_el: u32 = malla::sum_creditos(
            malla::electivos().filter(|c| c.id != id && self.asignaciones.contains_key(&c.id)),
        );
        if asignados_sin_el + curso.creditos > TOPE_CREDITOS_ELECTIVOS {
            let restantes = TOPE_CREDITOS_ELECTIVOS.saturating_sub(asignados_sin_el);
            return Err(format!(
                "No puedes superar los {} créditos electivos. Te quedan {}.",
                TOPE_CREDITOS_ELECTIVOS, restantes
            )
            .into());
        }

        self.asignaciones.insert(id.to_string(), periodo.to_string());
        self.persistir_asignaciones();
        Ok(())
    }

    /// Quita la asignación de una electiva; no hace nada si no estaba asignada.
    pub fn quitar_electiva(&mut self, id: &str) {
        if self.asignaciones.remove(id).is_some() {
            self.persistir_asignaciones();
        }
    }

    /// Sustituye el mapa completo de asignaciones (importación). No hay merge
    /// ni revalidación de tope: el documento importado manda.
    pub fn reemplazar_asignaciones(&mut self, mapa: HashMap<String, String>) {
        self.asignaciones = mapa;
        self.persistir_asignaciones();
    }

    pub fn cursadas(&self) -> &HashSet<String> {
        &self.cursadas
    }

    pub fn asignaciones(&self) -> &HashMap<String, String> {
        &self.asignaciones
    }
}
