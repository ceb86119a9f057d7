//! Contrato base de los analizadores, taxonomía de errores y acumulación de hallazgos.

mod result;

pub use result::{AnalysisResult, GpsCoordinates, PdfFlags};

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;


/// Tope de la escala ordinal de severidad (0 = sin riesgo, 5 = crítico).
pub const MAX_SEVERITY: u8 = 5;

#[derive(Debug, Error)]
pub enum FileAnalysisError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("not a regular file: {}", .path.display())]
    NotAFile { path: PathBuf },

    #[error("corrupted file `{}`: {reason}", .path.display())]
    Corrupted { path: PathBuf, reason: String },

    #[error("no analyzer registered for type `{mime_type}`")]
    AnalyzerNotFound { mime_type: String },

    #[error("i/o error on `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Hallazgo individual producido durante un análisis.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RiskFinding {
    pub description: String,
    pub severity: u8,
}

impl RiskFinding {
    /// Crea un hallazgo; las severidades fuera de escala se recortan al tope.
    pub fn new(description: impl Into<String>, severity: u8) -> Self {
        Self {
            description: description.into(),
            severity: severity.min(MAX_SEVERITY),
        }
    }
}

/// Acumulador de hallazgos con el máximo de severidad observado.
///
/// Cada llamada a `analyze` construye el suyo propio, de modo que ningún
/// estado de análisis sobrevive entre archivos distintos.
#[derive(Debug, Default)]
pub struct FindingAccumulator {
    risk_level: u8,
    findings: Vec<RiskFinding>,
}

impl FindingAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra un hallazgo y eleva el nivel de riesgo si corresponde.
    /// Los duplicados se conservan: los hallazgos son una bitácora, no un conjunto.
    pub fn add_finding(&mut self, description: impl Into<String>, severity: u8) {
        let finding = RiskFinding::new(description, severity);
        self.risk_level = self.risk_level.max(finding.severity);
        self.findings.push(finding);
    }

    /// Máxima severidad registrada hasta el momento; 0 si no hay hallazgos.
    pub fn risk_level(&self) -> u8 {
        self.risk_level
    }

    pub fn findings(&self) -> &[RiskFinding] {
        &self.findings
    }

    /// Descripciones de los hallazgos en orden de inserción.
    pub fn recommendations(&self) -> Vec<String> {
        self.findings
            .iter()
            .map(|finding| finding.description.clone())
            .collect()
    }
}

/// Capacidad que implementa todo analizador de formato.
pub trait Analyzer: Send + Sync {
    /// Indica si el analizador puede procesar este tipo MIME. Predicado puro.
    fn can_handle(&self, mime_type: &str) -> bool;

    /// Analiza el archivo y devuelve los riesgos detectados.
    ///
    /// Falla con `FileAnalysisError::Corrupted` cuando el contenido no puede
    /// interpretarse, y con las variantes de ruta cuando `validate_file`
    /// rechaza el archivo antes de leerlo.
    fn analyze(&self, path: &Path) -> Result<AnalysisResult, FileAnalysisError>;
}

/// Validación previa que todo analizador aplica antes de tocar el contenido.
///
/// Rechaza rutas inexistentes, rutas que no son archivos regulares y archivos
/// de cero bytes. Ninguno de los tres casos se degrada a un resultado sin
/// riesgo: siempre llegan al llamador como error.
pub fn validate_file(path: &Path) -> Result<(), FileAnalysisError> {
    let metadata = fs::metadata(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            FileAnalysisError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            FileAnalysisError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    if !metadata.is_file() {
        return Err(FileAnalysisError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    if metadata.len() == 0 {
        return Err(FileAnalysisError::Corrupted {
            path: path.to_path_buf(),
            reason: "empty file".to_string(),
        });
    }

    Ok(())
}
