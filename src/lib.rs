//! FileWarden: análisis de archivos en busca de contenido sensible embebido.
//!
//! Biblioteca pensada para tuberías automatizadas (escáneres de subida,
//! puertas DLP) que necesitan un nivel de riesgo normalizado y hallazgos
//! legibles por archivo. El parseo binario de cada formato se delega en
//! bibliotecas colaboradoras (`kamadak-exif`, `lopdf`, `infer`); este núcleo
//! aporta el contrato de los analizadores, la acumulación de riesgos y el
//! despacho por tipo de contenido.
//!
//! La biblioteca no instala ningún suscriptor de `tracing`: configurar el
//! logging es responsabilidad del llamador.

mod analyzers;
mod core;
mod file_type;
mod registry;

pub use self::analyzers::{ImageAnalyzer, PdfAnalyzer};
pub use self::core::{
    AnalysisResult, Analyzer, FileAnalysisError, FindingAccumulator, GpsCoordinates, MAX_SEVERITY,
    PdfFlags, RiskFinding, validate_file,
};
pub use self::file_type::{FALLBACK_MIME_TYPE, FileCategory, FileTypeDetector};
pub use self::registry::AnalyzerRegistry;
