//! Analizador de PDFs: JavaScript embebido, formularios y archivos adjuntos.

use crate::core::{
    AnalysisResult, Analyzer, FileAnalysisError, FindingAccumulator, PdfFlags, validate_file,
};
use lopdf::{Dictionary, Document, Object};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Default)]
pub struct PdfAnalyzer;

impl PdfAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for PdfAnalyzer {
    fn can_handle(&self, mime_type: &str) -> bool {
        mime_type == "application/pdf"
    }

    fn analyze(&self, path: &Path) -> Result<AnalysisResult, FileAnalysisError> {
        validate_file(path)?;

        let document = Document::load(path).map_err(|error| FileAnalysisError::Corrupted {
            path: path.to_path_buf(),
            reason: error.to_string(),
        })?;

        let mut accumulator = FindingAccumulator::new();
        let mut metadata = BTreeMap::new();

        let javascript_actions = count_javascript_actions(&document);
        if javascript_actions > 0 {
            accumulator.add_finding("contains JavaScript code", 4);
        }

        let form_fields = collect_form_fields(&document);
        if !form_fields.is_empty() {
            accumulator.add_finding("contains forms that may hold sensitive data", 3);

            let field_types: BTreeSet<&str> = form_fields.values().map(String::as_str).collect();
            for field_type in field_types {
                accumulator.add_finding(format!("form field type detected: {field_type}"), 2);
            }

            metadata.insert(
                "form_field_types".to_string(),
                serde_json::json!(form_fields),
            );
        }

        let embedded_files = count_embedded_files(&document);
        if embedded_files > 0 {
            accumulator.add_finding("contains embedded files", 3);
            accumulator.add_finding(format!("{embedded_files} embedded files detected"), 2);
        }

        let flags = PdfFlags {
            javascript_present: javascript_actions > 0,
            form_fields: form_fields.len(),
            embedded_files,
        };

        debug!(
            path = %path.display(),
            javascript_actions,
            form_fields = flags.form_fields,
            embedded_files,
            "PDF object graph analyzed"
        );

        Ok(AnalysisResult::from_accumulator(
            accumulator,
            metadata,
            Some(flags),
        ))
    }
}

/// Cuenta las acciones `/S /JavaScript` en todo el grafo del documento.
///
/// Las acciones pueden ser objetos indirectos o diccionarios escritos en
/// línea (por ejemplo un `/OpenAction` dentro del catálogo), así que el
/// recorrido desciende por los valores anidados de cada objeto. Las
/// referencias no se siguen: cada objeto indirecto ya se enumera una vez.
fn count_javascript_actions(document: &Document) -> usize {
    document
        .objects
        .values()
        .map(count_javascript_in_object)
        .sum::<usize>()
        + count_javascript_in_dictionary(&document.trailer)
}

fn count_javascript_in_object(object: &Object) -> usize {
    match object {
        Object::Dictionary(dictionary) => count_javascript_in_dictionary(dictionary),
        Object::Array(items) => items.iter().map(count_javascript_in_object).sum(),
        Object::Stream(stream) => count_javascript_in_dictionary(&stream.dict),
        _ => 0,
    }
}

fn count_javascript_in_dictionary(dictionary: &Dictionary) -> usize {
    let own = usize::from(matches!(
        dictionary.get(b"S"),
        Ok(Object::Name(name)) if name.as_slice() == b"JavaScript"
    ));

    own + dictionary
        .iter()
        .map(|(_, value)| count_javascript_in_object(value))
        .sum::<usize>()
}

/// Mapa nombre → tipo de cada campo del AcroForm, si existe.
fn collect_form_fields(document: &Document) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    let Some(acro_form) = document
        .catalog()
        .ok()
        .and_then(|catalog| catalog.get(b"AcroForm").ok())
        .and_then(|object| deref_dictionary(document, object))
    else {
        return fields;
    };

    let Ok(field_refs) = acro_form.get(b"Fields").and_then(Object::as_array) else {
        return fields;
    };

    for (index, field_ref) in field_refs.iter().enumerate() {
        let Some(field) = deref_dictionary(document, field_ref) else {
            continue;
        };

        let name = field
            .get(b"T")
            .ok()
            .and_then(|object| object_to_string(document, object))
            .unwrap_or_else(|| format!("field-{index}"));
        let field_type = field
            .get(b"FT")
            .ok()
            .and_then(|object| object_to_string(document, object))
            .unwrap_or_else(|| "Unknown".to_string());

        fields.insert(name, field_type);
    }

    fields
}

/// Cuenta los adjuntos registrados bajo el árbol de nombres `/EmbeddedFiles`.
fn count_embedded_files(document: &Document) -> usize {
    let Some(embedded) = document
        .catalog()
        .ok()
        .and_then(|catalog| catalog.get(b"Names").ok())
        .and_then(|object| deref_dictionary(document, object))
        .and_then(|names| names.get(b"EmbeddedFiles").ok())
        .and_then(|object| deref_dictionary(document, object))
    else {
        return 0;
    };

    count_name_tree_entries(document, embedded)
}

/// Recorre un nodo del árbol de nombres, incluyendo sus `/Kids`.
fn count_name_tree_entries(document: &Document, node: &Dictionary) -> usize {
    let mut count = 0;

    if let Ok(pairs) = node.get(b"Names").and_then(Object::as_array) {
        // Las entradas van en pares (nombre, filespec).
        count += pairs.len() / 2;
    }

    if let Ok(kids) = node.get(b"Kids").and_then(Object::as_array) {
        for kid in kids {
            if let Some(child) = deref_dictionary(document, kid) {
                count += count_name_tree_entries(document, child);
            }
        }
    }

    count
}

fn deref_dictionary<'a>(document: &'a Document, object: &'a Object) -> Option<&'a Dictionary> {
    match object {
        Object::Reference(reference) => document.get_dictionary(*reference).ok(),
        Object::Dictionary(dictionary) => Some(dictionary),
        _ => None,
    }
}

fn object_to_string(document: &Document, object: &Object) -> Option<String> {
    match object {
        Object::String(bytes, _) => Some(String::from_utf8_lossy(bytes).trim().to_string()),
        Object::Name(name) => Some(String::from_utf8_lossy(name).trim().to_string()),
        Object::Reference(reference) => document
            .get_object(*reference)
            .ok()
            .and_then(|inner| object_to_string(document, inner)),
        _ => None,
    }
}
