//! Registro de analizadores y despacho por categoría detectada.

use crate::analyzers::{ImageAnalyzer, PdfAnalyzer};
use crate::core::{AnalysisResult, Analyzer, FileAnalysisError};
use crate::file_type::{FileCategory, FileTypeDetector};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Tabla categoría → analizador, de solo lectura tras su construcción.
pub struct AnalyzerRegistry {
    detector: FileTypeDetector,
    analyzers: HashMap<FileCategory, Box<dyn Analyzer>>,
}

impl AnalyzerRegistry {
    /// Registro vacío, sin analizadores asociados.
    pub fn new() -> Self {
        Self {
            detector: FileTypeDetector::new(),
            analyzers: HashMap::new(),
        }
    }

    /// Registro con los analizadores incorporados: imágenes y PDFs.
    ///
    /// La categoría `Office` se detecta pero no trae analizador, por lo que
    /// los documentos ofimáticos terminan en `AnalyzerNotFound`.
    pub fn with_default_analyzers() -> Self {
        let mut registry = Self::new();
        registry.register(FileCategory::Image, Box::new(ImageAnalyzer::new()));
        registry.register(FileCategory::Pdf, Box::new(PdfAnalyzer::new()));
        registry
    }

    /// Asocia un analizador a una categoría; reemplaza el existente si lo hay.
    pub fn register(&mut self, category: FileCategory, analyzer: Box<dyn Analyzer>) {
        self.analyzers.insert(category, analyzer);
    }

    pub fn category_for(&self, mime_type: &str) -> Option<FileCategory> {
        self.detector.category_for(mime_type)
    }

    pub fn analyzer_for(&self, category: FileCategory) -> Option<&dyn Analyzer> {
        self.analyzers.get(&category).map(|analyzer| analyzer.as_ref())
    }

    /// Detecta el tipo por contenido, despacha al analizador y analiza.
    pub fn scan(&self, path: &Path) -> Result<AnalysisResult, FileAnalysisError> {
        let mime_type = self.detector.detect_mime_type(path);

        let analyzer = self
            .detector
            .category_for(&mime_type)
            .and_then(|category| self.analyzer_for(category))
            .ok_or_else(|| FileAnalysisError::AnalyzerNotFound {
                mime_type: mime_type.clone(),
            })?;

        debug!(path = %path.display(), %mime_type, "dispatching analysis");
        analyzer.analyze(path)
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::with_default_analyzers()
    }
}
