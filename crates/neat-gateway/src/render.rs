//! HTML page for released shorts.
//!
//! Rendering uses [maud](https://maud.lambda.xyz/), so every title and
//! paragraph is escaped.

use maud::{DOCTYPE, Markup, html};
use neat_core::Short;

#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct RenderError(pub String);

/// Turns the visible shorts into a page body.
pub trait ShortsRenderer: Send + Sync + 'static {
    fn render(&self, shorts: &[Short]) -> Result<String, RenderError>;
}

const PAGE_CSS: &str = r#"
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;line-height:1.6;max-width:680px;margin:0 auto;padding:1.5rem 1rem;color:#111;background:#fafafa}
article{margin-bottom:2.5rem}
h2{margin-bottom:.25rem}
time{color:#999;font-size:.85rem}
"#;

/// The default `/shorts` page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortsPage;

impl ShortsPage {
    fn markup(shorts: &[Short]) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { "Shorts" }
                    style { (PAGE_CSS) }
                }
                body {
                    main {
                        @if shorts.is_empty() {
                            p { "Nothing here yet." }
                        }
                        @for short in shorts {
                            article id=(short.id.as_str()) {
                                h2 { (short.title) }
                                time datetime=(short.release_date.to_string()) {
                                    (short.release_date.strftime("%B %-d, %Y").to_string())
                                }
                                @for paragraph in paragraphs(&short.content) {
                                    p { (paragraph) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

impl ShortsRenderer for ShortsPage {
    fn render(&self, shorts: &[Short]) -> Result<String, RenderError> {
        Ok(Self::markup(shorts).into_string())
    }
}

/// Splits `content` on blank lines. Line endings are normalised first and
/// empty paragraphs dropped.
fn paragraphs(content: &str) -> Vec<String> {
    content
        .replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use neat_core::ShortId;

    fn short(title: &str, content: &str) -> Short {
        Short {
            title: title.to_string(),
            content: content.to_string(),
            id: ShortId::new("C2C2C2"),
            release_date: "2024-05-01T10:00:00Z".parse().unwrap(),
            ..Default::default()
        }
    }

    #[test]
    fn splits_on_blank_lines() {
        assert_eq!(
            paragraphs("one\r\n\r\ntwo\nstill two\n\n\n\nthree"),
            ["one", "two\nstill two", "three"]
        );
        assert!(paragraphs("  \n\n ").is_empty());
    }

    #[test]
    fn renders_titles_and_paragraphs() {
        let page = ShortsPage
            .render(&[short("Hello", "first\n\nsecond")])
            .unwrap();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<h2>Hello</h2>"));
        assert!(page.contains("<p>first</p>"));
        assert!(page.contains("<p>second</p>"));
        assert!(page.contains("May 1, 2024"));
        assert!(page.contains(r#"id="C2C2C2""#));
    }

    #[test]
    fn escapes_user_content() {
        let page = ShortsPage
            .render(&[short("<b>bold</b>", "<script>alert(1)</script>")])
            .unwrap();

        assert!(!page.contains("<script>alert"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn empty_feed_has_placeholder() {
        let page = ShortsPage.render(&[]).unwrap();
        assert!(page.contains("Nothing here yet."));
    }
}
