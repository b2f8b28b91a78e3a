//! Writing notes and imports to disk
//!
//! Notes are saved either as a generated PDF (for a `.pdf` file name) or as
//! their raw content. Imports are exported by writing the stored payload
//! verbatim. Existing files are overwritten.

use std::io;
use std::path::{Path, PathBuf};

use printpdf::{BuiltinFont, Mm, PdfDocument};
use thiserror::Error;
use tokio::fs;
use tracing::info;

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN: f32 = 10.0;
const LINE_HEIGHT: f32 = 10.0;
const FONT_SIZE: f32 = 12.0;
/// Characters per line of 12pt Helvetica across the printable width
const LINE_WIDTH: usize = 90;

/// Errors raised while writing files
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to render PDF: {0}")]
    Pdf(String),

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),
}

impl ExportError {
    /// Message safe to return to clients
    pub fn user_message(&self) -> String {
        match self {
            ExportError::CreateDir { .. } => "Failed to create directory".to_string(),
            ExportError::Write { .. } => "Failed to write file".to_string(),
            ExportError::Pdf(_) => "Failed to create .pdf file".to_string(),
            ExportError::InvalidFileName(name) => format!("Invalid file name: {name}"),
        }
    }
}

/// Output encoding picked from the target file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteFormat {
    Pdf,
    Text,
}

impl NoteFormat {
    pub fn from_file_name(file_name: &str) -> Self {
        match Path::new(file_name).extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("pdf") => NoteFormat::Pdf,
            _ => NoteFormat::Text,
        }
    }
}

/// Save a note's content to `directory/file_name`, creating missing
/// directories. Returns the path written.
pub async fn save_note(
    title: &str,
    content: &str,
    directory: &Path,
    file_name: &str,
) -> Result<PathBuf, ExportError> {
    let full_path = directory.join(file_name);
    if let Some(parent) = full_path.parent() {
        create_dir(parent).await?;
    }

    let bytes = match NoteFormat::from_file_name(file_name) {
        NoteFormat::Pdf => render_pdf(title, content)?,
        NoteFormat::Text => content.as_bytes().to_vec(),
    };
    write(&full_path, &bytes).await?;

    info!("{} has been saved to {}", file_name, full_path.display());
    Ok(full_path)
}

/// Write an import payload into `export_dir`. Only the final component of
/// `file_name` is used.
pub async fn export_payload(
    export_dir: &Path,
    file_name: &str,
    data: &[u8],
) -> Result<PathBuf, ExportError> {
    let base_name = Path::new(file_name)
        .file_name()
        .ok_or_else(|| ExportError::InvalidFileName(file_name.to_string()))?;

    create_dir(export_dir).await?;
    let path = export_dir.join(base_name);
    write(&path, data).await?;

    info!("Exported {} bytes to {}", data.len(), path.display());
    Ok(path)
}

/// Render content as an A4 document, wrapping long lines and starting a new
/// page when one fills up
pub fn render_pdf(title: &str, content: &str) -> Result<Vec<u8>, ExportError> {
    let (doc, page, layer) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    let top = PAGE_HEIGHT.0 - MARGIN - LINE_HEIGHT;
    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = top;

    for line in wrap_lines(content, LINE_WIDTH) {
        if y < MARGIN {
            let (page, layer) = doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
            current = doc.get_page(page).get_layer(layer);
            y = top;
        }
        if !line.is_empty() {
            current.use_text(line, FONT_SIZE, Mm(MARGIN), Mm(y), &font);
        }
        y -= LINE_HEIGHT;
    }
    drop(current);

    doc.save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

/// Break text into lines of at most `width` characters, on word boundaries
/// where possible. Explicit newlines are kept.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            // Words longer than a line are split across lines
            while word.len() > width {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
            if needed > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.extend(word.iter());
            line_len += word.len();
        }

        lines.push(line);
    }

    lines
}

async fn create_dir(path: &Path) -> Result<(), ExportError> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(path)
        .await
        .map_err(|source| ExportError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
}

async fn write(path: &Path, data: &[u8]) -> Result<(), ExportError> {
    fs::write(path, data)
        .await
        .map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })
}
