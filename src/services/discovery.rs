// src/services/discovery.rs

//! PDF link discovery over the configured listing pages.

use std::collections::BTreeSet;

use scraper::{Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::utils::http::Fetch;
use crate::utils::resolve_url;

/// Fetch every listing page and collect the PDF links found on them.
///
/// Returns the deduplicated links in ascending order. A listing page that
/// fails to fetch is logged and skipped; when every configured page fails
/// the run has nothing trustworthy to diff against and an error is returned.
pub async fn discover_pdf_links(
    fetcher: &dyn Fetch,
    listing_urls: &[String],
) -> Result<Vec<String>> {
    let anchors = parse_selector("a[href]")?;

    let mut links = BTreeSet::new();
    let mut failures = 0;

    for listing_url in listing_urls {
        log::info!("Checking listing page: {}", listing_url);
        let base = match Url::parse(listing_url) {
            Ok(base) => base,
            Err(error) => {
                log::error!("Invalid listing URL {}: {}", listing_url, error);
                failures += 1;
                continue;
            }
        };
        let html = match fetcher.get_text(listing_url).await {
            Ok(html) => html,
            Err(error) => {
                log::error!("Failed to fetch listing page {}: {}", listing_url, error);
                failures += 1;
                continue;
            }
        };
        collect_pdf_links(&html, &base, &anchors, &mut links);
    }

    if !listing_urls.is_empty() && failures == listing_urls.len() {
        return Err(AppError::discovery("all listing pages failed to fetch"));
    }

    Ok(links.into_iter().collect())
}

/// Walk the anchors of one page, resolving hrefs and keeping PDF targets.
///
/// Kept synchronous: the parsed `scraper::Html` is not `Send` and must not
/// live across an await point.
fn collect_pdf_links(html: &str, base: &Url, anchors: &Selector, links: &mut BTreeSet<String>) {
    let document = Html::parse_document(html);
    for element in document.select(anchors) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(resolved) = resolve_url(base, href.trim()) else {
            continue;
        };
        if resolved.path().to_ascii_lowercase().ends_with(".pdf") {
            links.insert(resolved.to_string());
        }
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct PageFetch(HashMap<String, String>);

    impl PageFetch {
        fn with(pages: &[(&str, &str)]) -> Self {
            Self(
                pages
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.to_string()))
                    .collect(),
            )
        }
    }

    #[async_trait]
    impl Fetch for PageFetch {
        async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
            match self.0.get(url) {
                Some(body) => Ok(body.clone().into_bytes()),
                None => Err(AppError::discovery(format!("no canned page for {}", url))),
            }
        }
    }

    #[test]
    fn test_collect_filters_and_resolves() {
        let base = Url::parse("https://example.com/bin/list.cfm").unwrap();
        let anchors = parse_selector("a[href]").unwrap();
        let html = r##"
            <html><body>
              <a href="G1.pdf">one</a>
              <a href=" G1.pdf ">one again</a>
              <a href="/files/G2.PDF">upper</a>
              <a href="notes.html">not a pdf</a>
              <a href="https://other.com/G3.pdf">absolute</a>
              <a href="view.pdf?id=12">query</a>
              <a href="https://[broken">garbage</a>
              <a name="anchor-only">no href</a>
            </body></html>
        "##;

        let mut links = BTreeSet::new();
        collect_pdf_links(html, &base, &anchors, &mut links);

        let links: Vec<_> = links.into_iter().collect();
        assert_eq!(
            links,
            vec![
                "https://example.com/bin/G1.pdf",
                "https://example.com/bin/view.pdf?id=12",
                "https://example.com/files/G2.PDF",
                "https://other.com/G3.pdf",
            ]
        );
    }

    #[tokio::test]
    async fn test_discover_merges_pages_sorted() {
        let fetch = PageFetch::with(&[
            (
                "https://example.com/a",
                r#"<a href="z.pdf">z</a><a href="m.pdf">m</a>"#,
            ),
            (
                "https://example.com/b",
                r#"<a href="a.pdf">a</a><a href="m.pdf">m again</a>"#,
            ),
        ]);

        let links = discover_pdf_links(
            &fetch,
            &[
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string(),
            ],
        )
        .await
        .unwrap();

        assert_eq!(
            links,
            vec![
                "https://example.com/a.pdf",
                "https://example.com/m.pdf",
                "https://example.com/z.pdf",
            ]
        );
    }

    #[tokio::test]
    async fn test_discover_skips_failing_page() {
        let fetch = PageFetch::with(&[("https://example.com/good", r#"<a href="g.pdf">g</a>"#)]);

        let links = discover_pdf_links(
            &fetch,
            &[
                "https://example.com/good".to_string(),
                "https://example.com/down".to_string(),
            ],
        )
        .await
        .unwrap();

        assert_eq!(links, vec!["https://example.com/g.pdf"]);
    }

    #[tokio::test]
    async fn test_discover_fails_when_all_pages_fail() {
        let fetch = PageFetch::with(&[]);
        let result = discover_pdf_links(&fetch, &["https://example.com/down".to_string()]).await;
        assert!(matches!(result, Err(AppError::Discovery(_))));
    }

    #[tokio::test]
    async fn test_discover_no_listing_pages_is_empty() {
        let fetch = PageFetch::with(&[]);
        let links = discover_pdf_links(&fetch, &[]).await.unwrap();
        assert!(links.is_empty());
    }
}
