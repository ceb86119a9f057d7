//! Modelos de resultado compartidos por todos los analizadores.

use super::FindingAccumulator;
use serde::Serialize;
use std::collections::BTreeMap;

/// Coordenadas GPS decodificadas a grados decimales.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Indicadores propios de documentos PDF. Son campos de primera clase porque
/// las tuberías consumidoras ramifican directamente sobre ellos.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PdfFlags {
    pub javascript_present: bool,
    pub form_fields: usize,
    pub embedded_files: usize,
}

/// Resultado normalizado de un análisis de archivo.
///
/// Se construye completo dentro de cada llamada a `analyze` y pertenece en
/// exclusiva al llamador; nunca se muta después de devolverse.
#[derive(Clone, Debug, Serialize)]
pub struct AnalysisResult {
    /// Máxima severidad entre todos los hallazgos; 0 si no hubo ninguno.
    pub risk_level: u8,
    /// Hallazgos en orden de detección.
    pub findings: Vec<String>,
    /// Metadata estructurada extraída del archivo, por clave de atributo.
    pub metadata: BTreeMap<String, serde_json::Value>,
    /// Indicadores específicos de PDF; `None` para el resto de formatos.
    #[serde(flatten)]
    pub pdf: Option<PdfFlags>,
}

impl AnalysisResult {
    /// Resultado sin riesgos ni metadata: la ausencia de datos no es un error.
    pub fn clean() -> Self {
        Self {
            risk_level: 0,
            findings: Vec::new(),
            metadata: BTreeMap::new(),
            pdf: None,
        }
    }

    /// Materializa el resultado a partir del acumulador de una llamada.
    pub fn from_accumulator(
        accumulator: FindingAccumulator,
        metadata: BTreeMap<String, serde_json::Value>,
        pdf: Option<PdfFlags>,
    ) -> Self {
        Self {
            risk_level: accumulator.risk_level(),
            findings: accumulator.recommendations(),
            metadata,
            pdf,
        }
    }
}
