//! Detección de tipo de archivo por contenido y tabla de categorías.

use infer::Infer;
use serde::Serialize;
use std::path::Path;

/// Tipo MIME de reserva cuando la inferencia no reconoce el contenido.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Categorías cerradas de archivos con analizador potencial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Pdf,
    Office,
}

impl FileCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FileCategory::Image => "image",
            FileCategory::Pdf => "pdf",
            FileCategory::Office => "office",
        }
    }
}

const MIME_CATEGORIES: &[(FileCategory, &[&str])] = &[
    (
        FileCategory::Image,
        &["image/jpeg", "image/png", "image/gif", "image/tiff"],
    ),
    (FileCategory::Pdf, &["application/pdf"]),
    (
        FileCategory::Office,
        &[
            "application/msword",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "application/vnd.ms-excel",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "application/vnd.ms-powerpoint",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        ],
    ),
];

/// Detector de tipo MIME basado en los bytes del archivo, nunca en su nombre.
pub struct FileTypeDetector {
    infer: Infer,
}

impl FileTypeDetector {
    pub fn new() -> Self {
        Self {
            infer: Infer::new(),
        }
    }

    /// Detecta el tipo MIME del archivo.
    ///
    /// Los fallos de lectura o de inferencia degradan al tipo genérico en
    /// lugar de propagarse: la detección nunca aborta un escaneo.
    pub fn detect_mime_type(&self, path: &Path) -> String {
        self.infer
            .get_from_path(path)
            .ok()
            .flatten()
            .map(|kind| kind.mime_type().to_string())
            .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string())
    }

    /// Busca la categoría del tipo MIME en la tabla estática.
    pub fn category_for(&self, mime_type: &str) -> Option<FileCategory> {
        MIME_CATEGORIES
            .iter()
            .find(|(_, mime_types)| mime_types.contains(&mime_type))
            .map(|&(category, _)| category)
    }

    pub fn is_supported_type(&self, path: &Path) -> bool {
        self.category_for(&self.detect_mime_type(path)).is_some()
    }
}

impl Default for FileTypeDetector {
    fn default() -> Self {
        Self::new()
    }
}
