//! PDF export of a single entry.

use crate::diary_entry::DiaryEntry;
use crate::error::{DiaryError, DiaryResult};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;
use unicode_width::UnicodeWidthStr;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const LINE_HEIGHT_MM: f32 = 10.0;
const FONT_SIZE_PT: f32 = 12.0;
// Helvetica 12pt fits roughly this many average glyphs across A4 minus margins.
const WRAP_COLUMNS: usize = 90;

fn lines_per_page() -> usize {
    ((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / LINE_HEIGHT_MM) as usize
}

/// `<dir>/<date>-<title slug>.pdf`
pub fn default_export_path(dir: &Path, entry: &DiaryEntry) -> PathBuf {
    let mut slug = String::new();
    for c in entry.title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() { "entry" } else { slug };
    dir.join(format!("{}-{}.pdf", entry.date_string(), slug))
}

/// The text of the exported document, one element per printed line.
pub fn entry_lines(entry: &DiaryEntry) -> Vec<String> {
    let mut lines = vec![
        format!("Title: {}", entry.title),
        format!("Date: {}", entry.date_string()),
        String::new(),
    ];
    for paragraph in entry.content.lines() {
        lines.extend(wrap(paragraph, WRAP_COLUMNS));
    }
    lines
}

pub fn export_pdf(entry: &DiaryEntry, path: &Path) -> DiaryResult<()> {
    if entry.locked {
        return Err(DiaryError::EntryLocked(entry.title.clone()));
    }

    let lines = entry_lines(entry);

    let (doc, first_page, first_layer) = PdfDocument::new(
        entry.title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| DiaryError::Pdf(e.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    for (page_no, page_lines) in lines.chunks(lines_per_page()).enumerate() {
        if page_no > 0 {
            let (page, page_layer) = doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                format!("Layer {}", page_no + 1),
            );
            layer = doc.get_page(page).get_layer(page_layer);
        }
        for (row, line) in page_lines.iter().enumerate() {
            let y = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM * (row as f32 + 1.0);
            layer.use_text(line.as_str(), FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| DiaryError::Pdf(e.to_string()))?;
    info!(path = %path.display(), "entry exported");
    Ok(())
}

/// Greedy word wrap by display width. Words wider than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let sep = usize::from(!current.is_empty());
        if current.width() + sep + word.width() <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            if current.width() + c.to_string().width() > width {
                lines.push(std::mem::take(&mut current));
            }
            current.push(c);
        }
    }
    lines.push(current);
    lines
}
