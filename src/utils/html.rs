// src/utils/html.rs

use ammonia::Builder;

/// Clean HTML content using the ammonia library.
///
/// Question bodies, explanations and option contents are rich text written in
/// the admin panel. Safe tags (like <b>, <p>, <img>) are kept, while
/// dangerous tags (like <script>, <iframe>) and attributes (like onclick)
/// are stripped before the text reaches a learner.
///
/// The editor embeds pictures inline as `data:` URIs, so that scheme is
/// accepted on `<img src>` and nowhere else.
pub fn clean_html(input: &str) -> String {
    let mut builder = Builder::default();
    builder
        .add_url_schemes(&["data"])
        .attribute_filter(|element, attribute, value| {
            let is_data_uri = value.trim_start().get(..5).is_some_and(|s| s.eq_ignore_ascii_case("data:"));
            match (element, attribute) {
                ("img", "src") => Some(value.into()),
                _ if is_data_uri => None,
                _ => Some(value.into()),
            }
        });

    builder.clean(input).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_html_keeps_formatting() {
        assert_eq!(clean_html("<p><b>Bold</b> text</p>"), "<p><b>Bold</b> text</p>");
        assert_eq!(clean_html("Plain text"), "Plain text");
    }

    #[test]
    fn test_clean_html_strips_script() {
        assert_eq!(clean_html("<p onclick=\"x()\">Hi</p><script>alert(1)</script>"), "<p>Hi</p>");
    }

    #[test]
    fn test_clean_html_keeps_inline_image() {
        let html = "<p><img src=\"data:image/png;base64,iVBORw0KGgo=\"></p>";
        assert_eq!(clean_html(html), html);
    }

    #[test]
    fn test_clean_html_rejects_data_uri_links() {
        let cleaned = clean_html("<a href=\"data:text/html,alert(1)\">klik</a>");
        assert!(!cleaned.contains("data:"));
        assert!(cleaned.contains("klik"));
    }
}
