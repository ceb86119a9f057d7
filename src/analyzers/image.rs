//! Analizador de imágenes: metadata EXIF sensible y geolocalización.

use crate::core::{
    AnalysisResult, Analyzer, FileAnalysisError, FindingAccumulator, GpsCoordinates, validate_file,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, warn};

/// Severidad asignada a la presencia de un bloque de localización GPS.
const GPS_SEVERITY: u8 = 3;

/// Tabla declarativa de tags EXIF sensibles y su severidad.
const SENSITIVE_EXIF_TAGS: &[(exif::Tag, &str, u8)] = &[
    (exif::Tag::Make, "Make", 1),
    (exif::Tag::Model, "Model", 1),
    (exif::Tag::Software, "Software", 1),
    (exif::Tag::DateTimeOriginal, "DateTimeOriginal", 2),
];

const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/tiff"];

#[derive(Debug, Default)]
pub struct ImageAnalyzer;

impl ImageAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for ImageAnalyzer {
    fn can_handle(&self, mime_type: &str) -> bool {
        IMAGE_MIME_TYPES.contains(&mime_type)
    }

    fn analyze(&self, path: &Path) -> Result<AnalysisResult, FileAnalysisError> {
        validate_file(path)?;

        let file = File::open(path).map_err(|source| FileAnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = BufReader::new(file);

        let exif = match exif::Reader::new().read_from_container(&mut reader) {
            Ok(exif) => exif,
            // Un contenedor sin segmento EXIF es un resultado válido de riesgo cero.
            Err(exif::Error::NotFound(_)) => {
                debug!(path = %path.display(), "no EXIF data found");
                return Ok(AnalysisResult::clean());
            }
            Err(error) => {
                return Err(FileAnalysisError::Corrupted {
                    path: path.to_path_buf(),
                    reason: error.to_string(),
                });
            }
        };

        let mut accumulator = FindingAccumulator::new();
        let mut metadata = BTreeMap::new();

        if let Some(coordinates) = decode_gps(&exif, path) {
            metadata.insert(
                "GPS".to_string(),
                json!({
                    "latitude": coordinates.latitude,
                    "longitude": coordinates.longitude,
                }),
            );
            accumulator.add_finding(
                "image contains GPS location data that may compromise privacy",
                GPS_SEVERITY,
            );
        }

        for &(tag, name, severity) in SENSITIVE_EXIF_TAGS {
            if let Some(field) = exif.get_field(tag, exif::In::PRIMARY) {
                metadata.insert(name.to_string(), json!(field.display_value().to_string()));
                accumulator.add_finding(format!("sensitive metadata tag found: {name}"), severity);
            }
        }

        Ok(AnalysisResult::from_accumulator(accumulator, metadata, None))
    }
}

/// Decodifica el bloque GPS a grados decimales.
///
/// Los fallos de decodificación se degradan a `None`: nunca abortan el
/// análisis completo de la imagen.
fn decode_gps(exif: &exif::Exif, path: &Path) -> Option<GpsCoordinates> {
    let latitude_field = exif.get_field(exif::Tag::GPSLatitude, exif::In::PRIMARY)?;
    let longitude_field = exif.get_field(exif::Tag::GPSLongitude, exif::In::PRIMARY)?;

    let (Some(mut latitude), Some(mut longitude)) = (
        dms_to_decimal(latitude_field),
        dms_to_decimal(longitude_field),
    ) else {
        warn!(path = %path.display(), "GPS block present but not decodable");
        return None;
    };

    if hemisphere(exif, exif::Tag::GPSLatitudeRef) == Some('S') {
        latitude = -latitude;
    }
    if hemisphere(exif, exif::Tag::GPSLongitudeRef) == Some('W') {
        longitude = -longitude;
    }

    Some(GpsCoordinates {
        latitude,
        longitude,
    })
}

/// Convierte un triple (grados, minutos, segundos) a grados decimales.
fn dms_to_decimal(field: &exif::Field) -> Option<f64> {
    match field.value {
        exif::Value::Rational(ref parts) if parts.len() >= 3 => {
            Some(parts[0].to_f64() + parts[1].to_f64() / 60.0 + parts[2].to_f64() / 3600.0)
        }
        _ => None,
    }
}

fn hemisphere(exif: &exif::Exif, tag: exif::Tag) -> Option<char> {
    match exif.get_field(tag, exif::In::PRIMARY)?.value {
        exif::Value::Ascii(ref values) => values
            .first()
            .and_then(|value| value.first())
            .map(|&byte| byte as char),
        _ => None,
    }
}
