//! HTML rendering of the index page.

use maud::{html, Markup, PreEscaped, DOCTYPE};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::index::listing::Listing;

/// Characters escaped inside a path segment of an `href`.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'&')
    .add(b'\'')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\');

const STYLE: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 800px; margin: 40px auto; padding: 20px; font-size: 14px; }
h1, h2 { color: #333; }
ul { list-style: none; padding: 0; }
li { margin: 8px 0; padding: 12px 15px; background: #f5f5f5; border-radius: 8px; }
a { text-decoration: none; color: #0066cc; font-weight: 500; }
a:hover { text-decoration: underline; }
.info { background: #e7f3ff; padding: 15px; border-radius: 8px; margin-bottom: 20px; }
code { background: #eee; padding: 2px 6px; border-radius: 4px; }
.section { margin-top: 30px; }
.empty { color: #888; background: none; }
";

/// Render the index page for `listing`. `name_prefix` is shown in the hint.
pub fn render_index(listing: &Listing, name_prefix: &str) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Dev Userscripts" }
                meta name="viewport" content="width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no";
                style { (PreEscaped(STYLE)) }
            }
            body {
                h1 { "Dev Userscripts" }
                div class="info" {
                    p {
                        "Install scripts in your userscript manager. Served with "
                        code { (name_prefix.trim_end()) }
                        " prefix."
                    }
                }
                (links(&listing.scripts, "No userscripts found."))
                div class="section" {
                    h2 { "Test Pages" }
                    (links(&listing.pages, "No test pages."))
                }
            }
        }
    }
}

fn links(names: &[String], empty: &str) -> Markup {
    html! {
        ul {
            @if names.is_empty() {
                li class="empty" { (empty) }
            }
            @for name in names {
                li { a href={ "/" (utf8_percent_encode(name, SEGMENT)) } { (name) } }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn links_every_entry() {
        let listing = Listing {
            scripts: vec!["a.user.js".into(), "b.user.js".into()],
            pages: vec!["video.html".into()],
        };
        let html = render_index(&listing, "[DEV] ").into_string();
        assert!(html.contains(r#"<a href="/a.user.js">a.user.js</a>"#));
        assert!(html.contains(r#"<a href="/b.user.js">b.user.js</a>"#));
        assert!(html.contains(r#"<a href="/video.html">video.html</a>"#));
        assert!(html.contains("<code>[DEV]</code>"));
    }

    #[test]
    fn escapes_names() {
        let listing = Listing {
            scripts: vec!["<x> & y.user.js".into()],
            pages: vec![],
        };
        let html = render_index(&listing, "[DEV] ").into_string();
        assert!(html.contains(r#"href="/%3Cx%3E%20%26%20y.user.js""#));
        assert!(html.contains("&lt;x&gt; &amp; y.user.js"));
        assert!(html.contains("No test pages."));
    }

    #[test]
    fn escapes_the_prefix_hint() {
        let html = render_index(&Listing::default(), "<b>dev</b> ").into_string();
        assert!(html.contains("<code>&lt;b&gt;dev&lt;/b&gt;</code>"));
    }

    #[test]
    fn empty_listing_renders() {
        let html = render_index(&Listing::default(), "[DEV] ").into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("No userscripts found."));
        assert!(html.ends_with("</html>"));
    }
}
