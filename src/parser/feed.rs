// file: src/parser/feed.rs
// description: arXiv Atom feed parsing into paper records
// reference: https://info.arxiv.org/help/api/user-manual.html#_details_of_atom_results_returned

use crate::error::IndexError;
use crate::models::PaperRecord;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A parsed feed: the advertised total and the entries actually returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFeed {
    pub total_results: u64,
    pub papers: Vec<PaperRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    TotalResults,
    Title,
    Summary,
}

#[derive(Default)]
struct EntryBuilder {
    title: String,
    summary: String,
    pdf_url: Option<String>,
}

impl EntryBuilder {
    fn observe_link(&mut self, element: &BytesStart<'_>) -> Result<(), IndexError> {
        if self.pdf_url.is_some() {
            return Ok(());
        }

        let mut href = None;
        let mut is_pdf = false;

        for attr in element.attributes() {
            let attr = attr.map_err(|e| IndexError::Parse(e.to_string()))?;
            let value = attr
                .unescape_value()
                .map_err(|e| IndexError::Parse(e.to_string()))?;
            match attr.key.local_name().as_ref() {
                b"href" => href = Some(value.into_owned()),
                b"type" => is_pdf = value == PDF_MEDIA_TYPE,
                _ => {}
            }
        }

        if is_pdf {
            self.pdf_url = href;
        }
        Ok(())
    }

    fn build(self) -> PaperRecord {
        PaperRecord::new(self.title, self.summary, self.pdf_url)
    }
}

/// Parses an Atom feed. Structural problems (bad XML, missing or non-numeric
/// `opensearch:totalResults`) are reported as [`IndexError::Parse`]; an
/// empty result set is not an error here.
pub fn parse_feed(xml: &str) -> Result<ParsedFeed, IndexError> {
    let mut reader = Reader::from_str(xml);

    let mut total_text: Option<String> = None;
    let mut papers = Vec::new();
    let mut entry: Option<EntryBuilder> = None;
    let mut field: Option<Field> = None;
    let mut depth = 0usize;
    let mut saw_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                saw_root = true;
                match e.local_name().as_ref() {
                    b"totalResults" if entry.is_none() => {
                        total_text = Some(String::new());
                        field = Some(Field::TotalResults);
                    }
                    b"entry" => entry = Some(EntryBuilder::default()),
                    b"title" if entry.is_some() => field = Some(Field::Title),
                    b"summary" if entry.is_some() => field = Some(Field::Summary),
                    b"link" => {
                        if let Some(current) = entry.as_mut() {
                            current.observe_link(e)?;
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                saw_root = true;
                if e.local_name().as_ref() == b"link" {
                    if let Some(current) = entry.as_mut() {
                        current.observe_link(e)?;
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(target) = field {
                    let text = e
                        .unescape()
                        .map_err(|err| IndexError::Parse(err.to_string()))?;
                    push_field_text(target, &text, &mut total_text, entry.as_mut());
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(target) = field {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    push_field_text(target, &text, &mut total_text, entry.as_mut());
                }
            }
            Ok(Event::End(ref e)) => {
                depth = depth.saturating_sub(1);
                match e.local_name().as_ref() {
                    b"entry" => {
                        if let Some(done) = entry.take() {
                            papers.push(done.build());
                        }
                        field = None;
                    }
                    b"totalResults" | b"title" | b"summary" => field = None,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(IndexError::Parse(format!(
                    "XML error at byte {}: {}",
                    reader.error_position(),
                    e
                )));
            }
            _ => {}
        }
    }

    if entry.is_some() {
        return Err(IndexError::Parse("feed ended inside an <entry>".to_string()));
    }

    if !saw_root {
        return Err(IndexError::Parse("response has no root element".to_string()));
    }

    // A body cut off between elements still reads as a clean Eof.
    if depth > 0 {
        return Err(IndexError::Parse(format!(
            "feed ended with {} unclosed element(s)",
            depth
        )));
    }

    let total_text = total_text
        .ok_or_else(|| IndexError::Parse("missing opensearch:totalResults".to_string()))?;
    let total_results = total_text.trim().parse::<u64>().map_err(|e| {
        IndexError::Parse(format!("invalid totalResults {:?}: {}", total_text.trim(), e))
    })?;

    Ok(ParsedFeed {
        total_results,
        papers,
    })
}

fn push_field_text(
    field: Field,
    text: &str,
    total_text: &mut Option<String>,
    entry: Option<&mut EntryBuilder>,
) {
    match (field, entry) {
        (Field::TotalResults, _) => {
            if let Some(total) = total_text.as_mut() {
                total.push_str(text);
            }
        }
        (Field::Title, Some(current)) => current.title.push_str(text),
        (Field::Summary, Some(current)) => current.summary.push_str(text),
        _ => {}
    }
}
