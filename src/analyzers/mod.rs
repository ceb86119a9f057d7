//! Analizadores incorporados para los formatos soportados.

mod image;
mod pdf;

pub use image::ImageAnalyzer;
pub use pdf::PdfAnalyzer;
