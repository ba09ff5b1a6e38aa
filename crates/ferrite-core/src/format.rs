//! Rendering formatting entities back to markup.
//!
//! Entity ranges can nest and, on malformed input, overlap. Rendering
//! walks the text left to right by character offset keeping a stack of
//! open entities: at each offset, first close every open entity whose
//! end equals the offset (last-opened, first-closed), then open every
//! entity starting there, then emit the literal character. Unknown
//! entity kinds contribute empty tags, preserving their text.

use crate::model::RawMessageEntity;

/// Markup-specific open/close tag pair for one entity.
fn html_tags(entity: &RawMessageEntity) -> (String, String) {
    match entity.kind.as_str() {
        "bold" => ("<b>".into(), "</b>".into()),
        "italic" => ("<i>".into(), "</i>".into()),
        "underline" => ("<u>".into(), "</u>".into()),
        "strikethrough" => ("<s>".into(), "</s>".into()),
        "spoiler" => ("<tg-spoiler>".into(), "</tg-spoiler>".into()),
        "code" => ("<code>".into(), "</code>".into()),
        "pre" => match &entity.language {
            Some(lang) => (
                format!("<pre><code class=\"language-{lang}\">"),
                "</code></pre>".into(),
            ),
            None => ("<pre>".into(), "</pre>".into()),
        },
        "text_link" => (
            format!("<a href=\"{}\">", entity.url.as_deref().unwrap_or("")),
            "</a>".into(),
        ),
        "text_mention" => (
            format!(
                "<a href=\"tg://user?id={}\">",
                entity.user.as_ref().map(|u| u.id).unwrap_or_default()
            ),
            "</a>".into(),
        ),
        _ => (String::new(), String::new()),
    }
}

fn markdown_tags(entity: &RawMessageEntity) -> (String, String) {
    match entity.kind.as_str() {
        "bold" => ("**".into(), "**".into()),
        "italic" => ("_".into(), "_".into()),
        "strikethrough" => ("~~".into(), "~~".into()),
        "code" => ("`".into(), "`".into()),
        "pre" => ("```\n".into(), "\n```".into()),
        "text_link" => (
            "[".into(),
            format!("]({})", entity.url.as_deref().unwrap_or("")),
        ),
        _ => (String::new(), String::new()),
    }
}

/// Renders `text` with its entity ranges as HTML.
pub fn render_html(text: &str, entities: &[RawMessageEntity]) -> String {
    render_with(text, entities, html_tags)
}

/// Renders `text` with its entity ranges as Markdown.
pub fn render_markdown(text: &str, entities: &[RawMessageEntity]) -> String {
    render_with(text, entities, markdown_tags)
}

fn render_with(
    text: &str,
    entities: &[RawMessageEntity],
    tags: fn(&RawMessageEntity) -> (String, String),
) -> String {
    if entities.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + entities.len() * 8);
    // Indices into `entities`, in open order.
    let mut open: Vec<usize> = Vec::new();

    let close_ending_at = |open: &mut Vec<usize>, out: &mut String, offset: usize| {
        let mut i = open.len();
        while i > 0 {
            i -= 1;
            let idx = open[i];
            if entities[idx].offset + entities[idx].length == offset {
                out.push_str(&tags(&entities[idx]).1);
                open.remove(i);
            }
        }
    };

    for (offset, ch) in chars.iter().enumerate() {
        close_ending_at(&mut open, &mut out, offset);
        for (idx, entity) in entities.iter().enumerate() {
            if entity.offset == offset && entity.length > 0 {
                out.push_str(&tags(entity).0);
                open.push(idx);
            }
        }
        out.push(*ch);
    }

    close_ending_at(&mut open, &mut out, chars.len());
    // Anything still open ran past the end of the text; close in
    // reverse-open order.
    while let Some(idx) = open.pop() {
        out.push_str(&tags(&entities[idx]).1);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(kind: &str, offset: usize, length: usize) -> RawMessageEntity {
        RawMessageEntity {
            kind: kind.to_string(),
            offset,
            length,
            url: None,
            user: None,
            language: None,
        }
    }

    #[test]
    fn bold_and_link() {
        // "Hello bold and link"
        let mut link = entity("text_link", 15, 4);
        link.url = Some("http://x".into());
        let out = render_html("Hello bold and link", &[entity("bold", 6, 4), link]);
        assert_eq!(
            out,
            "Hello <b>bold</b> and <a href=\"http://x\">link</a>"
        );
    }

    #[test]
    fn nested_entities_close_in_reverse_open_order() {
        // bold spans "bold italic", italic spans "italic".
        let out = render_html(
            "bold italic",
            &[entity("bold", 0, 11), entity("italic", 5, 6)],
        );
        assert_eq!(out, "<b>bold <i>italic</i></b>");
    }

    #[test]
    fn unknown_entity_kind_preserves_text() {
        let out = render_html("future text", &[entity("hologram", 0, 6)]);
        assert_eq!(out, "future text");
    }

    #[test]
    fn adjacent_entities() {
        let out = render_html("ab", &[entity("bold", 0, 1), entity("italic", 1, 1)]);
        assert_eq!(out, "<b>a</b><i>b</i>");
    }

    #[test]
    fn entity_to_end_of_text() {
        let out = render_html("tail", &[entity("code", 0, 4)]);
        assert_eq!(out, "<code>tail</code>");
    }

    #[test]
    fn markdown_link() {
        let mut link = entity("text_link", 0, 4);
        link.url = Some("http://x".into());
        assert_eq!(render_markdown("link", &[link]), "[link](http://x)");
    }
}
