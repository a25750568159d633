//! DOCX text extraction. Reads `word/document.xml` out of the zip container
//! and walks the body in order: each paragraph becomes a block, each table
//! becomes one block with a line per row and cells joined by ` | `.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::documents::DocumentError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Text collected while a table is open. Paragraphs inside a cell are joined
/// with newlines.
#[derive(Default)]
struct TableBuilder {
    rows: Vec<String>,
    cells: Vec<String>,
    cell: String,
}

pub fn extract_docx_text(content: &[u8]) -> Result<String, DocumentError> {
    let xml = read_document_part(content)?;
    let mut reader = Reader::from_str(&xml);

    let mut blocks: Vec<String> = Vec::new();
    let mut paragraph = String::new();
    let mut in_text_run = false;
    // Nested tables are flattened into their outermost table.
    let mut table: Option<TableBuilder> = None;
    let mut table_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = true,
                b"w:tbl" => {
                    table_depth += 1;
                    if table.is_none() {
                        table = Some(TableBuilder::default());
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => paragraph.push('\t'),
                b"w:br" | b"w:cr" => paragraph.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) if in_text_run => {
                let text = t.unescape().map_err(|e| DocumentError::Docx(e.to_string()))?;
                paragraph.push_str(&text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => {
                    let text = paragraph.trim().to_string();
                    paragraph.clear();
                    if text.is_empty() {
                        continue;
                    }
                    match table.as_mut() {
                        Some(builder) => {
                            if !builder.cell.is_empty() {
                                builder.cell.push('\n');
                            }
                            builder.cell.push_str(&text);
                        }
                        None => blocks.push(text),
                    }
                }
                b"w:tc" if table_depth == 1 => {
                    // inner table cells stay part of the enclosing cell
                    if let Some(builder) = table.as_mut() {
                        let cell = std::mem::take(&mut builder.cell);
                        if !cell.is_empty() {
                            builder.cells.push(cell);
                        }
                    }
                }
                b"w:tr" if table_depth == 1 => {
                    if let Some(builder) = table.as_mut() {
                        if !builder.cells.is_empty() {
                            let row = builder.cells.join(" | ");
                            builder.cells.clear();
                            builder.rows.push(row);
                        }
                    }
                }
                b"w:tbl" => {
                    table_depth = table_depth.saturating_sub(1);
                    if table_depth == 0 {
                        if let Some(builder) = table.take() {
                            if !builder.rows.is_empty() {
                                blocks.push(builder.rows.join("\n"));
                            }
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(DocumentError::Docx(e.to_string())),
        }
    }

    Ok(blocks.join("\n\n"))
}

fn read_document_part(content: &[u8]) -> Result<String, DocumentError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(content))
        .map_err(|e| DocumentError::Docx(format!("not a valid DOCX archive: {e}")))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|_| DocumentError::Docx(format!("missing {DOCUMENT_PART}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| DocumentError::Docx(e.to_string()))?;
    Ok(xml)
}

/// Packs `body` (the inner XML of `<w:body>`) into a minimal in-memory DOCX.
#[cfg(test)]
pub fn build_docx(body: &str) -> Vec<u8> {
    use std::io::Write;

    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(DOCUMENT_PART, zip::write::FileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}
