// file: src/document/pdf.rs
// description: page-ordered text extraction from in-memory PDF bytes
// reference: https://docs.rs/lopdf

use lopdf::Document;

/// Concatenates the text of every page in page order. A document with no
/// pages yields an empty string.
pub fn extract_text(bytes: &[u8]) -> Result<String, lopdf::Error> {
    let document = Document::load_mem(bytes)?;
    let mut text = String::new();

    for page_number in document.get_pages().into_keys() {
        text.push_str(&document.extract_text(&[page_number])?);
    }

    Ok(text)
}
