// file: tests/common/mod.rs
// description: shared fixtures for integration tests: feed and PDF builders
// reference: https://docs.rs/lopdf/latest/lopdf/struct.Document.html

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use tokio::net::TcpListener;

/// An address nothing is listening on.
pub async fn closed_port_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, path)
}

pub struct FeedEntry<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    pub pdf_url: Option<&'a str>,
}

/// An arXiv-style Atom feed with the given advertised total.
pub fn atom_feed(total_results: u64, entries: &[FeedEntry<'_>]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">
  <title type="html">ArXiv Query: search_query=cat:cs.AI</title>
  <opensearch:totalResults>{}</opensearch:totalResults>
  <opensearch:startIndex>0</opensearch:startIndex>
"#,
        total_results
    );

    for entry in entries {
        xml.push_str("  <entry>\n");
        xml.push_str(&format!("    <title>{}</title>\n", entry.title));
        xml.push_str(&format!("    <summary>{}</summary>\n", entry.summary));
        xml.push_str("    <link href=\"http://arxiv.org/abs/0000\" rel=\"alternate\" type=\"text/html\"/>\n");
        if let Some(url) = entry.pdf_url {
            xml.push_str(&format!(
                "    <link title=\"pdf\" href=\"{}\" rel=\"related\" type=\"application/pdf\"/>\n",
                url
            ));
        }
        xml.push_str("  </entry>\n");
    }

    xml.push_str("</feed>\n");
    xml
}

/// A PDF with one page per entry, each showing its text with a single `Tj`.
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page_text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*page_text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
