//! Turns a captured markup fragment into plain text.

use ::lazy_regex::{lazy_regex, Lazy, Regex};

static RE_LINE_BREAK: Lazy<Regex> = lazy_regex!(r"(?i)<br\s*/?>");
static RE_BLOCK_CLOSE: Lazy<Regex> = lazy_regex!(r"(?i)</div\s*>");
static RE_ANY_TAG: Lazy<Regex> = lazy_regex!(r"<[^>]+>");

/// Decoded in this order. `&amp;` goes last so that `&amp;quot;` yields `&quot;`.
const ENTITIES: [(&str, &str); 6] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
    ("&amp;", "&"),
];

/// Cleans a sample block or the time-limit region.
///
/// `<br>` and `</div>` each become one newline (sample lines are often
/// separated by nothing but a closing div), remaining tags are dropped and
/// entities are decoded. Only the whole block is trimmed.
///
/// Tags are matched on the raw markup, so angle brackets that come out of
/// entity decoding stay in the text.
pub fn clean_text(fragment: &str) -> String {
    let text = RE_LINE_BREAK.replace_all(fragment, "\n");
    let text = RE_BLOCK_CLOSE.replace_all(&text, "\n");
    let text = RE_ANY_TAG.replace_all(&text, "");
    decode_entities(&text).trim().to_owned()
}

pub fn decode_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_owned(), |acc, (entity, decoded)| {
            acc.replace(entity, decoded)
        })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn entities_are_decoded() {
        assert_eq!(
            clean_text("&lt;a&gt;&amp;&quot;x&quot;&nbsp;&#39;y&#39;"),
            "<a>&\"x\" 'y'"
        );
    }

    #[test]
    fn br_and_closing_div_become_newlines() {
        assert_eq!(clean_text("1<br>2</div>3"), "1\n2\n3");
        assert_eq!(clean_text("1<BR/>2<br />3</DIV>"), "1\n2\n3");
    }

    #[test]
    fn line_per_div_layout() {
        let fragment = concat!(
            r#"<div class="test-example-line test-example-line-even test-example-line-0">3</div>"#,
            r#"<div class="test-example-line test-example-line-odd test-example-line-1">1 2</div>"#,
            r#"<div class="test-example-line test-example-line-odd test-example-line-1">3 4</div>"#,
        );
        assert_eq!(clean_text(fragment), "3\n1 2\n3 4");
    }

    #[test]
    fn only_the_whole_block_is_trimmed() {
        assert_eq!(clean_text("\n  1  2 \n\n 3\n\n"), "1  2 \n\n 3");
    }

    #[test]
    fn other_tags_are_stripped() {
        assert_eq!(clean_text("<span class=\"x\">5</span> <b>6</b>"), "5 6");
    }

    #[test]
    fn double_encoded_entity_is_decoded_once() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("&amp;quot;"), "&quot;");
        assert_eq!(decode_entities("&amp;nbsp;&amp;#39;"), "&nbsp;&#39;");
        assert_eq!(clean_text("<pre>say &amp;quot;hi&amp;quot;</pre>"), "say &quot;hi&quot;");
    }
}
