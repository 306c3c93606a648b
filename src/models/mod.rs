// Estructuras de datos principales

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TipoCurso {
    Obligatorio,
    Electivo,
}

/// Un curso del catálogo. Los obligatorios llevan `periodo` fijo; las
/// electivas no lo llevan en el catálogo, su ubicación vive en las
/// asignaciones del estado.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Curso {
    pub id: String,
    /// Código visible; puede repetirse entre cursos homologados
    pub codigo: String,
    pub curso: String,
    pub creditos: u32,
    pub tipo: TipoCurso,
    /// FC | IBC | DC | DE | otros
    pub clasificacion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periodo: Option<u32>,
    /// Informativos; no se validan cadenas de prerrequisitos
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prereqs: Vec<String>,
}

/// Filtros de presentación que llegan desde la interfaz. Los valores
/// centinela "Todos"/"Todas" equivalen a no filtrar.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct FiltrosVista {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub clasificacion: Option<String>,
}

impl FiltrosVista {
    pub fn tipo_activo(&self) -> Option<TipoCurso> {
        match self.tipo.as_deref() {
            Some("Obligatorio") => Some(TipoCurso::Obligatorio),
            Some("Electivo") => Some(TipoCurso::Electivo),
            _ => None,
        }
    }

    pub fn clasificacion_activa(&self) -> Option<&str> {
        match self.clasificacion.as_deref() {
            None | Some("") | Some("Todas") => None,
            Some(c) => Some(c),
        }
    }
}

/// Lista de cursos de un semestre ya filtrada, con su subtotal de créditos
#[derive(Debug, Clone, serde::Serialize)]
pub struct SemestreVista {
    pub semestre: u32,
    pub creditos: u32,
    pub cursos: Vec<Curso>,
}

/// Prerrequisito resuelto contra el catálogo para mostrarlo con nombre.
/// Si el id no aparece en la malla, `curso` y `codigo` quedan vacíos.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PrereqResuelto {
    pub id: String,
    pub curso: Option<String>,
    pub codigo: Option<String>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DetalleCurso {
    pub curso: Curso,
    pub prereqs: Vec<PrereqResuelto>,
}

/// Estadísticas agregadas del plan
#[derive(Debug, Clone, serde::Serialize)]
pub struct ResumenPlan {
    pub creditos_totales_plan: u32,
    pub creditos_obligatorios: u32,
    pub tope_electivos: u32,
    pub creditos_completados: u32,
    pub progreso_pct: u32,
    pub creditos_electivos_asignados: u32,
    pub electivos_restantes: u32,
}
