//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Documents and reports go to stdout; logs go to stderr.

use safari_ld_core::{
    Composition, Diagnostic, Page, RelationResolver, SchemaError, SiteConfig, compose_page,
    document_checksum, emit_string,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE HANDLING
// =============================================================================

/// Maximum size of a page content file (16 MB).
const MAX_PAGE_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Resolve an input path to a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, SchemaError> {
    let canonical = path.canonicalize().map_err(|e| {
        SchemaError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(SchemaError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path whose parent directory must already exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, SchemaError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        SchemaError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;
    if !canonical_parent.is_dir() {
        return Err(SchemaError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| SchemaError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

/// Read and decode a page content file.
pub fn read_page(path: &Path) -> Result<Page, SchemaError> {
    let validated = validate_file_path(path)?;

    let metadata = std::fs::metadata(&validated)
        .map_err(|e| SchemaError::IoError(format!("Cannot read file metadata: {}", e)))?;
    if metadata.len() > MAX_PAGE_FILE_SIZE {
        return Err(SchemaError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_PAGE_FILE_SIZE
        )));
    }

    let content = std::fs::read_to_string(&validated)
        .map_err(|e| SchemaError::IoError(format!("Read file: {}", e)))?;
    serde_json::from_str(&content).map_err(|e| {
        SchemaError::SerializationError(format!("Invalid page in '{}': {}", path.display(), e))
    })
}

/// Read a page file, compose it and log what the engine reported.
pub fn compose_file(config: &SiteConfig, input: &Path) -> Result<Composition, SchemaError> {
    let page = read_page(input)?;
    let composition = compose_page(config, &page)?;

    log_diagnostics(&composition.diagnostics);
    tracing::info!(
        path = %page.path(),
        nodes = composition.document.len(),
        diagnostics = composition.diagnostics.len(),
        "composed document"
    );
    Ok(composition)
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

/// Entity and detail of a diagnostic, for structured logging.
pub fn diagnostic_fields(diagnostic: &Diagnostic) -> (&str, String) {
    match diagnostic {
        Diagnostic::InvalidPath { path } => (path.as_str(), "unmatched route".to_string()),
        Diagnostic::EmptyCollection { entity } => (entity.as_str(), "no ratings".to_string()),
        Diagnostic::MalformedEntity { entity, detail } => (entity.as_str(), detail.clone()),
        Diagnostic::SkippedNode { entity, field } => (
            entity.as_str(),
            format!("missing required field '{}'", field),
        ),
    }
}

fn log_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let (entity, detail) = diagnostic_fields(diagnostic);
        tracing::warn!(kind = diagnostic.kind(), entity, detail = %detail, "diagnostic");
    }
}

// =============================================================================
// COMPOSE COMMAND
// =============================================================================

/// Compose a page and write its document to `output` or stdout.
pub fn cmd_compose(
    config: &SiteConfig,
    json_mode: bool,
    quiet: bool,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), SchemaError> {
    let composition = compose_file(config, input)?;
    let text = emit_string(&composition.document, !compact)?;

    let Some(output) = output else {
        println!("{}", text);
        return Ok(());
    };

    let validated_output = validate_output_path(output)?;
    std::fs::write(&validated_output, &text)
        .map_err(|e| SchemaError::IoError(format!("Write file: {}", e)))?;

    if json_mode {
        let report = serde_json::json!({
            "output": validated_output.to_string_lossy(),
            "bytes": text.len(),
            "nodes": composition.document.len(),
            "diagnostics": composition.diagnostics,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_default()
        );
    } else if !quiet {
        println!(
            "Wrote {} nodes ({} bytes) to {:?}",
            composition.document.len(),
            text.len(),
            validated_output
        );
    }

    Ok(())
}

// =============================================================================
// BREADCRUMBS COMMAND
// =============================================================================

/// Render the breadcrumb chain of a route.
pub fn render_breadcrumbs(
    config: &SiteConfig,
    json_mode: bool,
    path: &str,
    title: Option<&str>,
) -> Result<String, SchemaError> {
    let resolver = RelationResolver::new(config);
    let (chain, unmatched) = resolver.trail(path, title);
    log_diagnostics(unmatched.as_slice());

    if json_mode {
        let items: Vec<_> = chain
            .iter()
            .map(|crumb| {
                serde_json::json!({
                    "position": crumb.position,
                    "name": crumb.name,
                    "url": crumb.url,
                    "item": resolver.canonical_url(&crumb.url),
                })
            })
            .collect();
        return serde_json::to_string_pretty(&items)
            .map_err(|e| SchemaError::SerializationError(e.to_string()));
    }

    Ok(chain
        .iter()
        .map(|crumb| {
            format!(
                "{}. {}  {}",
                crumb.position,
                crumb.name,
                resolver.canonical_url(&crumb.url)
            )
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

pub fn cmd_breadcrumbs(
    config: &SiteConfig,
    json_mode: bool,
    path: &str,
    title: Option<&str>,
) -> Result<(), SchemaError> {
    println!("{}", render_breadcrumbs(config, json_mode, path, title)?);
    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Compose a page and print its diagnostics. Soft conditions never fail
/// the command; hard errors still do.
pub fn cmd_check(config: &SiteConfig, json_mode: bool, input: &Path) -> Result<(), SchemaError> {
    let composition = compose_file(config, input)?;

    if json_mode {
        let report = serde_json::json!({
            "nodes": composition.document.len(),
            "diagnostics": composition.diagnostics,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Nodes:       {}", composition.document.len());
    println!("Diagnostics: {}", composition.diagnostics.len());
    for diagnostic in &composition.diagnostics {
        println!("  [{}] {}", diagnostic.kind(), diagnostic);
    }
    Ok(())
}

// =============================================================================
// HASH COMMAND
// =============================================================================

/// BLAKE3 checksum of the compact document composed from a page file.
pub fn checksum_file(config: &SiteConfig, input: &Path) -> Result<String, SchemaError> {
    let composition = compose_file(config, input)?;
    document_checksum(&composition.document)
}

pub fn cmd_hash(config: &SiteConfig, json_mode: bool, input: &Path) -> Result<(), SchemaError> {
    let checksum = checksum_file(config, input)?;

    if json_mode {
        let output = serde_json::json!({
            "input": input.to_string_lossy(),
            "algorithm": "blake3",
            "checksum": checksum,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
    } else {
        println!("BLAKE3: {}", checksum);
    }
    Ok(())
}

// =============================================================================
// CONFIG COMMAND
// =============================================================================

/// Render the effective configuration as TOML, or JSON in json mode.
pub fn render_config(config: &SiteConfig, json_mode: bool) -> Result<String, SchemaError> {
    if json_mode {
        serde_json::to_string_pretty(config)
            .map_err(|e| SchemaError::SerializationError(e.to_string()))
    } else {
        toml::to_string_pretty(config).map_err(|e| SchemaError::SerializationError(e.to_string()))
    }
}

pub fn cmd_config(config: &SiteConfig, json_mode: bool) -> Result<(), SchemaError> {
    println!("{}", render_config(config, json_mode)?);
    Ok(())
}
