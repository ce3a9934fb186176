//! Python bindings for the editor backend

use pyo3::prelude::*;

use crate::assets::JsonFileAsset;
use crate::document::RundownDocument;
use crate::json_helpers::parse_rows_str;

fn build_document(rows_json: &str, title: Option<&str>, slug: Option<&str>) -> PyResult<RundownDocument> {
    let rows = parse_rows_str(rows_json)?;
    Ok(RundownDocument::new(rows)
        .with_custom_title(title.unwrap_or(""))
        .with_slug(slug.unwrap_or("")))
}

/// Render the rundown and return it as a `data:application/pdf` URI
#[pyfunction]
#[pyo3(signature = (rows_json, asset_path, title=None, slug=None))]
fn render_preview(
    rows_json: &str,
    asset_path: &str,
    title: Option<&str>,
    slug: Option<&str>,
) -> PyResult<String> {
    let document = build_document(rows_json, title, slug)?;
    Ok(document.preview(&JsonFileAsset::new(asset_path))?)
}

/// Render the rundown into `out_dir` and return the written file path
#[pyfunction]
#[pyo3(signature = (rows_json, asset_path, out_dir, title=None, slug=None))]
fn export_pdf(
    rows_json: &str,
    asset_path: &str,
    out_dir: &str,
    title: Option<&str>,
    slug: Option<&str>,
) -> PyResult<String> {
    let document = build_document(rows_json, title, slug)?;
    let path = document.export_to_dir(&JsonFileAsset::new(asset_path), out_dir)?;
    Ok(path.display().to_string())
}

/// Python module for rundown PDF rendering
#[pymodule]
fn rundown_pdf_rust(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(render_preview, m)?)?;
    m.add_function(wrap_pyfunction!(export_pdf, m)?)?;
    Ok(())
}
