// src/services/digest.rs

//! Digest construction from the run's findings.

use chrono::{DateTime, Local};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::Finding;

const INTRO: &str =
    "Automated alert: new Victoria Government Gazette issue(s) matched your search terms.";

/// The rendered alert, ready for the notifier.
#[derive(Debug, Clone)]
pub struct Digest {
    /// Subject line: prefix, document count, local timestamp
    pub subject: String,

    /// Plain-text body
    pub plain_body: String,

    /// HTML body carrying the same data as the plain one
    pub html_body: String,
}

/// Build the digest, or `None` when there is nothing to report.
pub fn build(subject_prefix: &str, findings: &[Finding]) -> Option<Digest> {
    build_at(subject_prefix, findings, Local::now())
}

/// Like [`build`] but with an explicit timestamp.
///
/// Both bodies list every match of every finding in exactly the matcher's
/// output order; nothing is summarized or truncated. All document-derived
/// text is escaped before it reaches the HTML body.
pub fn build_at(
    subject_prefix: &str,
    findings: &[Finding],
    now: DateTime<Local>,
) -> Option<Digest> {
    if findings.is_empty() {
        return None;
    }

    let subject = format!(
        "{}: {} gazette(s) matched — {}",
        subject_prefix,
        findings.len(),
        now.format("%Y-%m-%d %H:%M")
    );

    let mut plain_lines = vec![format!("{}\n", INTRO)];
    let mut html_lines = vec![format!(
        concat!(
            r#"<html><body style="font-family: sans-serif;">"#,
            "<p>{}</p>",
            r#"<ul style="list-style-type: none; padding-left: 0;">"#
        ),
        INTRO
    )];

    for finding in findings {
        plain_lines.push(format!("\n• {} ({})", finding.filename, finding.url));
        html_lines.push(format!(
            concat!(
                r#"<li style="margin-bottom: 1em; border: 1px solid #ccc; padding: 10px; border-radius: 5px;">"#,
                r#"<p style="margin: 0;"><strong>File:</strong> {}<br>"#,
                r#"<small><a href="{}">{}</a></small></p>"#,
                r#"<hr style="border: 0; border-top: 1px solid #eee;">"#
            ),
            encode_text(&finding.filename),
            encode_double_quoted_attribute(&finding.url),
            encode_text(&finding.url),
        ));

        for record in &finding.matches {
            plain_lines.push(format!(
                "  - Found Term: {} (Page: {})",
                record.term, record.page
            ));
            plain_lines.push(format!("    Context: …{}…", record.snippet));
            html_lines.push(format!(
                concat!(
                    r#"<div style="margin-top: 10px; padding-left: 15px;">"#,
                    r#"<p style="margin: 0;">Found Term: <strong>{}</strong> (Page: {})</p>"#,
                    r#"<p style="margin: 5px 0 0 0; font-size: 0.9em; color: #555; "#,
                    r#"border-left: 3px solid #ddd; padding-left: 10px;"><em>…{}…</em></p></div>"#
                ),
                encode_text(&record.term),
                record.page,
                encode_text(&record.snippet),
            ));
        }

        html_lines.push("</li>".to_string());
    }

    html_lines.push("</ul></body></html>".to_string());

    Some(Digest {
        subject,
        plain_body: plain_lines.join("\n"),
        html_body: html_lines.join("\n"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchRecord;
    use chrono::TimeZone;

    fn make_finding(filename: &str, url: &str, matches: &[(&str, usize, &str)]) -> Finding {
        Finding {
            url: url.to_string(),
            filename: filename.to_string(),
            matches: matches
                .iter()
                .map(|(term, page, snippet)| MatchRecord {
                    term: term.to_string(),
                    page: *page,
                    snippet: snippet.to_string(),
                })
                .collect(),
        }
    }

    fn fixed_now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 0).unwrap()
    }

    #[test]
    fn test_no_findings_no_digest() {
        assert!(build("Gazette Alert", &[]).is_none());
    }

    #[test]
    fn test_subject_counts_documents() {
        let findings = vec![
            make_finding("a.pdf", "https://e.com/a.pdf", &[("t", 1, "s"), ("t", 2, "s")]),
            make_finding("b.pdf", "https://e.com/b.pdf", &[("t", 1, "s")]),
        ];
        let digest = build_at("Gazette Alert", &findings, fixed_now()).unwrap();
        assert_eq!(
            digest.subject,
            "Gazette Alert: 2 gazette(s) matched — 2025-03-14 09:26"
        );
    }

    #[test]
    fn test_plain_body_layout() {
        let findings = vec![make_finding(
            "G1.pdf",
            "https://e.com/G1.pdf",
            &[("acquisition", 3, "the acquisition of land")],
        )];
        let digest = build_at("Gazette Alert", &findings, fixed_now()).unwrap();

        assert!(digest.plain_body.starts_with("Automated alert:"));
        assert!(digest.plain_body.contains("• G1.pdf (https://e.com/G1.pdf)"));
        assert!(
            digest
                .plain_body
                .contains("  - Found Term: acquisition (Page: 3)")
        );
        assert!(
            digest
                .plain_body
                .contains("    Context: …the acquisition of land…")
        );
    }

    #[test]
    fn test_bodies_preserve_match_order() {
        let findings = vec![make_finding(
            "G1.pdf",
            "https://e.com/G1.pdf",
            &[("first", 1, "s1"), ("second", 1, "s2"), ("first", 2, "s3")],
        )];
        let digest = build_at("Gazette Alert", &findings, fixed_now()).unwrap();

        let p1 = digest.plain_body.find("(Page: 1)").unwrap();
        let p2 = digest.plain_body.find("second").unwrap();
        let p3 = digest.plain_body.find("(Page: 2)").unwrap();
        assert!(p1 < p2 && p2 < p3);

        let h1 = digest.html_body.find("<strong>first</strong> (Page: 1)").unwrap();
        let h2 = digest.html_body.find("<strong>second</strong> (Page: 1)").unwrap();
        let h3 = digest.html_body.find("<strong>first</strong> (Page: 2)").unwrap();
        assert!(h1 < h2 && h2 < h3);
    }

    #[test]
    fn test_html_escapes_document_text() {
        let findings = vec![make_finding(
            "we<ird>.pdf",
            "https://e.com/?a=1&b=2",
            &[("a<b", 1, "x & y")],
        )];
        let digest = build_at("Gazette Alert", &findings, fixed_now()).unwrap();

        assert!(digest.html_body.contains("we&lt;ird&gt;.pdf"));
        assert!(digest.html_body.contains("a&lt;b"));
        assert!(digest.html_body.contains("x &amp; y"));
        assert!(
            digest
                .html_body
                .contains(r#"href="https://e.com/?a=1&amp;b=2""#)
        );
        assert!(!digest.html_body.contains("a<b"));
    }

    #[test]
    fn test_html_structure() {
        let findings = vec![
            make_finding("a.pdf", "https://e.com/a.pdf", &[("t", 1, "s")]),
            make_finding("b.pdf", "https://e.com/b.pdf", &[("t", 1, "s")]),
        ];
        let digest = build_at("Gazette Alert", &findings, fixed_now()).unwrap();

        assert!(digest.html_body.starts_with("<html><body"));
        assert!(digest.html_body.ends_with("</ul></body></html>"));
        assert_eq!(digest.html_body.matches("<li ").count(), 2);
        assert_eq!(digest.html_body.matches("</li>").count(), 2);
    }
}
