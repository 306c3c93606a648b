//! Malla curricular fija del plan de estudios.
//!
//! El catálogo se construye una sola vez al arrancar el proceso y no se
//! muta después. Los cursos obligatorios llevan su semestre fijo; las
//! electivas se ubican vía las asignaciones del estado.

use std::sync::OnceLock;

use crate::models::{Curso, TipoCurso};

/// Créditos totales del plan de estudios
pub const TOTAL_CREDITOS_PLAN: u32 = 160;
/// Créditos que aportan los obligatorios del catálogo
pub const TOTAL_OBLIGATORIOS_PLAN: u32 = 133;
/// Tope global de créditos electivos asignables
pub const TOPE_CREDITOS_ELECTIVOS: u32 = 27;
/// Semestres del plan
pub const SEMESTRES: std::ops::RangeInclusive<u32> = 1..=10;

pub fn es_semestre_valido(periodo: u32) -> bool {
    SEMESTRES.contains(&periodo)
}

fn ob(id: &str, codigo: &str, curso: &str, creditos: u32, clasificacion: &str, periodo: u32) -> Curso {
    Curso {
        id: id.to_string(),
        codigo: codigo.to_string(),
        curso: curso.to_string(),
        creditos,
        tipo: TipoCurso::Obligatorio,
        clasificacion: clasificacion.to_string(),
        periodo: Some(periodo),
        prereqs: Vec::new(),
    }
}

fn ob_req(id: &str, codigo: &str, curso: &str, creditos: u32, clasificacion: &str, periodo: u32, prereqs: &[&str]) -> Curso {
    let mut c = ob(id, codigo, curso, creditos, clasificacion, periodo);
    c.prereqs = prereqs.iter().map(|s| s.to_string()).collect();
    c
}

fn el(id: &str, codigo: &str, curso: &str, creditos: u32, clasificacion: &str) -> Curso {
    Curso {
        id: id.to_string(),
        codigo: codigo.to_string(),
        curso: curso.to_string(),
        creditos,
        tipo: TipoCurso::Electivo,
        clasificacion: clasificacion.to_string(),
        periodo: None,
        prereqs: Vec::new(),
    }
}

static CATALOGO: OnceLock<Vec<Curso>> = OnceLock::new();

/// Catálogo completo de la malla (obligatorios por semestre + electivas por pool)
pub fn catalogo() -> &'static [Curso] {
    CATALOGO.get_or_init(construir_catalogo).as_slice()
}

fn construir_catalogo() -> Vec<Curso> {
    vec![
        // Semestre 1
        ob("503438689", "503438689", "Elementary English", 3, "DE", 1),
        ob("503438688", "503438688", "Introducción a la Licenciatura en Lenguas Extranjeras con énfasis en Inglés", 3, "DE", 1),
        ob("80017", "80017", "Cátedra Unadista", 3, "Acogida/Integración", 1),
        ob("40003", "40003", "Competencias Comunicativas", 3, "IBC", 1),
        ob("40002", "40002", "Ética y ciudadanía", 3, "IBC", 1),
        // Semestre 2
        ob("518002", "518002", "English I", 3, "DE", 2),
        ob("520027", "520027", "Epistemología e historia de la pedagogía", 4, "DC", 2),
        ob("700004", "700004", "Prestación servicio social unadista (Requisito de grado)", 0, "Requisito de grado", 2),
        ob("517031", "517031", "Matemáticas para la Resolución de Problemas", 3, "DC", 2),
        ob("200611", "200611", "Pensamiento Lógico y Matemático", 3, "IBC", 2),
        ob("200610", "200610", "Herramientas digitales para la gestión del conocimiento", 3, "IBC", 2),
        // Semestre 3
        ob_req("518007", "518007", "English II", 3, "DE", 3, &["518002"]),
        ob("517022", "517022", "Teorías del Aprendizaje", 3, "DC", 3),
        ob("150001", "150001", "Fundamentos y Generalidades de la Investigación", 3, "IBC", 3),
        ob("503438691", "503438691", "Introduction to Linguistics", 3, "DE", 3),
        ob("518015", "518015", "Foreign Language Acquisition and Learning", 2, "DE", 3),
        ob("518003", "518003", "Lengua Materna", 2, "DE", 3),
        // Semestre 4
        ob_req("518008", "518008", "English III", 3, "DE", 4, &["518007"]),
        ob("520026", "520026", "Evaluación", 3, "DC", 4),
        ob("517020", "517020", "Didáctica", 3, "DC", 4),
        ob("518014", "518014", "English Phonetics", 2, "DE", 4),
        ob("520025", "520025", "Ética de la Profesión Docente", 3, "DC", 4),
        // Semestre 5
        ob_req("518009", "518009", "English IV", 3, "DE", 5, &["518008"]),
        ob("517021", "517021", "Enfoques Curriculares", 3, "DC", 5),
        ob("518005", "518005", "Methodology in Foreign Language Teaching", 3, "DE", 5),
        ob("503438690", "503438690", "Didactics of English", 3, "DE", 5),
        ob("500001", "500001", "Administración y Gestión Educativas", 3, "DC", 5),
        // Semestre 6
        ob_req("518010", "518010", "English V", 3, "DE", 6, &["518009"]),
        ob("517027", "517027", "Educación para la Transformación Social", 3, "DC", 6),
        ob("518004", "518004", "Teaching English to Children, Adolescents and Adults", 3, "DE", 6),
        ob("503438692", "503438692", "Materials Design in EFL", 3, "DE", 6),
        // Semestre 7
        ob_req("518011", "518011", "English VI", 3, "DE", 7, &["518010"]),
        ob("517028", "517028", "Escenarios Educativos Inclusivos", 3, "DC", 7),
        ob("518006", "518006", "Technology in Foreign Language Teaching", 3, "DE", 7),
        ob("503438693", "503438693", "Intercultural Competence in ELT", 3, "DE", 7),
        ob("518023", "518023", "Testing and Evaluation in ELT", 3, "DE", 7),
        // Semestre 8
        ob_req("518012", "518012", "English VII - English Conversation", 3, "DE", 8, &["518011"]),
        ob("517023", "517023", "Investigación Educativa y Pedagógica", 3, "DC", 8),
        ob("518018", "518018", "Integral Pedagogical Practice", 3, "DE", 8),
        ob("518021", "518021", "Teacher Development", 3, "DE", 8),
        // Semestre 9
        ob("503438694", "503438694", "English VIII - Academic Writing", 3, "DE", 9),
        ob("518024", "518024", "Educational Research", 3, "DE", 9),
        ob("518019", "518019", "Research Pedagogical Practice", 3, "DE", 9),
        // Semestre 10
        ob("517018_TIC", "517018", "Prácticas educativas mediadas por TIC", 3, "DC", 10),
        ob_req("503438695", "503438695", "Research Project", 3, "DE", 10, &["518024"]),
        ob("518020", "518020", "Pedagogical Practice in Online Environments", 3, "DE", 10),
        ob("OPCGRADO", "OPC", "Opción de Grado (Requisito)", 0, "Requisito de grado", 10),
        // Electivas FC
        el("300040", "300040", "Hoja de Vida", 1, "FC"),
        el("80003", "80003", "Salud Oral", 2, "FC"),
        el("80005", "80005", "Guitarra", 1, "FC"),
        el("80008", "80008", "Pedagogía para la Solución de Conflictos", 2, "FC"),
        el("80011", "80011", "Discapacidad y Sexualidad", 2, "FC"),
        el("80002", "80002", "Proyecto de Vida", 2, "FC"),
        el("80004", "80004", "La Persona como Ser Trascendente", 2, "FC"),
        el("80007", "80007", "Protocolo", 1, "FC"),
        el("80010", "80010", "Teatro", 1, "FC"),
        el("80012", "80012", "Danza", 2, "FC"),
        // Electivas IBC
        el("ELE_A1", "ELE-A1", "Curso Electivo de Lengua Extranjera A1", 3, "IBC"),
        el("ELE_A2", "ELE-A2", "Curso Electivo de Lengua Extranjera A2", 3, "IBC"),
        el("40004", "40004", "Inclusión Social", 3, "IBC"),
        el("40006", "40006", "Sostenibilidad, Desarrollo y Calidad de Vida", 3, "IBC"),
        el("90007", "90007", "Cultura Política", 2, "IBC"),
        el("105020", "105020", "Emprendimiento Solidario", 3, "IBC"),
        el("204040", "204040", "Estadística Descriptiva", 3, "IBC"),
        el("40005", "40005", "Sujeto, Comunidad e Interacción Social", 3, "IBC"),
        el("358028", "358028", "Educación Ambiental", 3, "IBC"),
        el("112001", "112001", "Fundamentos de Gestión Integral", 3, "IBC"),
        el("120002", "120002", "Responsabilidad Social Empresarial", 3, "IBC"),
        el("105019", "105019", "Investigación Cualitativa", 3, "IBC"),
        // Electivas DC
        el("50003", "50003", "Diseño de Ambientes de Aprendizaje", 3, "DC"),
        el("50017", "50017", "Comunicación Escrita", 2, "DC"),
        el("50020", "50020", "Razonamiento Cuantitativo", 2, "DC"),
        el("514520", "514520", "Desarrollo Psicobiológico de la Infancia y la Adolescencia", 3, "DC"),
        el("518025", "518025", "Modelos Pedagógicos", 3, "DC"),
        el("520024", "520024", "Legislación Educativa", 3, "DC"),
        el("50011", "50011", "Educación Inclusiva en Ambientes de Aprendizaje", 3, "DC"),
        el("50018", "50018", "Competencias Ciudadanas", 2, "DC"),
        el("401432", "401432", "Etnografía", 3, "DC"),
        el("514521", "514521", "Innovación e Investigación en Educación", 3, "DC"),
        el("520028", "520028", "Pensamiento Crítico y Ciudadanía", 3, "DC"),
        el("511001", "511001", "Latex", 3, "DC"),
        el("50016", "50016", "Competencias Comunicativas Docentes", 2, "DC"),
        el("50019", "50019", "Lectura Crítica", 2, "DC"),
        el("514519", "514519", "Lectura y Escritura Académicas", 3, "DC"),
        el("517032", "517032", "Pedagogía Social Solidaria", 3, "DC"),
        el("712003", "712003", "Resiliencia", 3, "DC"),
        // Electivas DE
        el("ELE_B1", "ELE-B1", "Curso Electivo de Lengua Extranjera B1", 3, "DE"),
        el("ELE_B1P", "ELE-B1+", "Curso Electivo de Lengua Extranjera B1+", 3, "DE"),
        el("551002_E", "551002", "Lengua Materna II", 2, "DE"),
        el("551030", "551030", "Educational Management", 2, "DE"),
        el("551033", "551033", "Didactics of Science", 3, "DE"),
        el("551036", "551036", "Language and Culture", 2, "DE"),
        el("450073", "450073", "English Composition I", 2, "DE"),
        el("551029", "551029", "English Literature", 2, "DE"),
        el("551032", "551032", "Didactics of Mathematics", 3, "DE"),
        el("503438696", "503438696", "Educational Governance in a Global Context", 3, "DE"),
        el("551038", "551038", "Teaching English for Specific Purposes", 3, "DE"),
        el("551031", "551031", "Qualitative and Quantitative Research", 2, "DE"),
        el("503438697", "503438697", "Foundations of Bilingual Education", 3, "DE"),
        el("551037", "551037", "Translation Techniques", 2, "DE"),
        el("450058", "450058", "English Composition II", 3, "DE"),
    ]
}

pub fn buscar_por_id(id: &str) -> Option<&'static Curso> {
    catalogo().iter().find(|c| c.id == id)
}

pub fn obligatorios() -> impl Iterator<Item = &'static Curso> {
    catalogo().iter().filter(|c| c.tipo == TipoCurso::Obligatorio)
}

pub fn electivos() -> impl Iterator<Item = &'static Curso> {
    catalogo().iter().filter(|c| c.tipo == TipoCurso::Electivo)
}

pub fn sum_creditos<'a, I>(cursos: I) -> u32
where
    I: IntoIterator<Item = &'a Curso>,
{
    cursos.into_iter().map(|c| c.creditos).sum()
}

/// Clasificaciones distintas en el orden en que aparecen en el catálogo.
/// Alimenta el selector de filtros de la interfaz.
pub fn clasificaciones() -> Vec<String> {
    let mut vistas: Vec<String> = Vec::new();
    for c in catalogo() {
        if !vistas.iter().any(|v| v == &c.clasificacion) {
            vistas.push(c.clasificacion.clone());
        }
    }
    vistas
}
