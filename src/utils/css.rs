//! CSS utilities: inline style declarations and `url(...)` values.

use regex::Regex;
use std::sync::LazyLock;

/// Parse an inline `style` attribute into ordered `(property, value)` pairs.
///
/// Property names are lowercased. Empty declarations are skipped.
///
/// # Example
/// ```ignore
/// parse_style("color: red; transform:translateY(4px)")
///     -> vec![("color", "red"), ("transform", "translateY(4px)")]
/// ```
pub fn parse_style(style: &str) -> Vec<(String, String)> {
    split_declarations(style)
        .filter_map(|decl| {
            let (prop, value) = decl.split_once(':')?;
            let prop = prop.trim().to_ascii_lowercase();
            let value = value.trim();
            (!prop.is_empty() && !value.is_empty()).then(|| (prop, value.to_string()))
        })
        .collect()
}

/// Render declarations back into an inline `style` attribute value.
pub fn render_style(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(prop, value)| format!("{prop}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split on `;` outside of parentheses and quotes, so `url("a;b")` stays whole.
fn split_declarations(style: &str) -> impl Iterator<Item = &str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in style.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&style[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&style[start..]);
    parts.into_iter()
}

/// Strip a CSS `url(...)` wrapper with optional quotes.
///
/// Mirrors what the browser's computed `background-image` looks like:
/// `url("https://x/y.jpg")` -> `https://x/y.jpg`. Values without a wrapper are
/// returned trimmed, so `none` stays `none`.
pub fn strip_css_url(value: &str) -> String {
    static RE_URL_OPEN: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"^url\(["']?"#).unwrap());
    static RE_URL_CLOSE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"["']?\)$"#).unwrap());

    let value = value.trim();
    let opened = RE_URL_OPEN.replace(value, "");
    RE_URL_CLOSE.replace(&opened, "").into_owned()
}

/// Wrap a URL as a double-quoted CSS `url("...")` value.
pub fn css_url(url: &str) -> String {
    let escaped = url.replace('\\', "\\\\").replace('"', "\\\"");
    format!("url(\"{escaped}\")")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style_keeps_order() {
        let decls = parse_style("Color: red;  transform:translateY(4px) ;;");
        assert_eq!(
            decls,
            vec![
                ("color".to_string(), "red".to_string()),
                ("transform".to_string(), "translateY(4px)".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_style_semicolon_inside_url() {
        let decls = parse_style(r#"background-image: url("a;b.jpg"); opacity: 1"#);
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].1, r#"url("a;b.jpg")"#);
    }

    #[test]
    fn test_render_style() {
        let decls = vec![
            ("color".to_string(), "red".to_string()),
            ("opacity".to_string(), "0".to_string()),
        ];
        assert_eq!(render_style(&decls), "color: red; opacity: 0;");
    }

    #[test]
    fn test_strip_css_url_variants() {
        assert_eq!(strip_css_url(r#"url("/img/hero.jpg")"#), "/img/hero.jpg");
        assert_eq!(strip_css_url("url('/img/hero.jpg')"), "/img/hero.jpg");
        assert_eq!(strip_css_url("url(/img/hero.jpg)"), "/img/hero.jpg");
        assert_eq!(strip_css_url("none"), "none");
        assert_eq!(strip_css_url(""), "");
    }

    #[test]
    fn test_css_url_quotes() {
        assert_eq!(css_url("/a.jpg"), r#"url("/a.jpg")"#);
        assert_eq!(css_url(r#"/a"b.jpg"#), r#"url("/a\"b.jpg")"#);
    }
}
