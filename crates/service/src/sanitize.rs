//! Allow-list HTML sanitization for rich-text answers.
//!
//! Anything outside the allowed tag/attribute/protocol set is stripped, not
//! escaped. Script and style elements lose their contents as well.

use std::collections::{HashMap, HashSet};

use ammonia::Builder;

const ALLOWED_TAGS: [&str; 11] = ["p", "br", "strong", "em", "ul", "ol", "li", "a", "code", "pre", "span"];
const ALLOWED_LINK_ATTRS: [&str; 4] = ["href", "title", "target", "rel"];
const ALLOWED_SPAN_ATTRS: [&str; 1] = ["class"];
const ALLOWED_PROTOCOLS: [&str; 3] = ["http", "https", "mailto"];

pub fn clean_answer_html(input: &str) -> String {
    let mut tag_attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    tag_attributes.insert("a", ALLOWED_LINK_ATTRS.into_iter().collect());
    tag_attributes.insert("span", ALLOWED_SPAN_ATTRS.into_iter().collect());

    Builder::default()
        .tags(ALLOWED_TAGS.into_iter().collect())
        .tag_attributes(tag_attributes)
        .generic_attributes(HashSet::new())
        .url_schemes(ALLOWED_PROTOCOLS.into_iter().collect())
        // Keep author-provided rel/target instead of forcing one
        .link_rel(None)
        .clean(input)
        .to_string()
}
