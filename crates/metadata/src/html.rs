//! Minimal meta-tag extraction. Not an HTML parser: it looks for the handful
//! of `<meta>`, `<link>`, and `<title>` markers link previews care about.

use regex::Regex;

/// `content` of `<meta {attr}="{key}" content="...">`, attribute order free.
pub(crate) fn meta_content(html: &str, attr: &str, key: &str) -> Option<String> {
    tag_attribute(html, "meta", attr, key, "content")
}

/// `href` of `<link {attr}="{key}" href="...">`, attribute order free.
pub(crate) fn link_href(html: &str, attr: &str, key: &str) -> Option<String> {
    tag_attribute(html, "link", attr, key, "href")
}

/// Text of the first `<title>` element.
pub(crate) fn title_element(html: &str) -> Option<String> {
    let re = Regex::new(r"(?is)<title[^>]*>(.*?)</title>").ok()?;
    let raw = re.captures(html)?.get(1)?.as_str();
    clean(raw)
}

fn tag_attribute(html: &str, tag: &str, attr: &str, key: &str, wanted: &str) -> Option<String> {
    let tag_re = Regex::new(&format!(r"(?is)<{tag}\b[^>]*>")).ok()?;
    let key_re = Regex::new(&format!(
        r#"(?is)\b{}\s*=\s*["']{}["']"#,
        regex::escape(attr),
        regex::escape(key)
    ))
    .ok()?;
    let value_re = Regex::new(&format!(
        r#"(?is)\b{}\s*=\s*(?:"([^"]*)"|'([^']*)')"#,
        regex::escape(wanted)
    ))
    .ok()?;

    let found = tag_re
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|element| key_re.is_match(element))
        .find_map(|element| {
            let caps = value_re.captures(element)?;
            let raw = caps.get(1).or_else(|| caps.get(2))?.as_str();
            clean(raw)
        });
    found
}

fn clean(raw: &str) -> Option<String> {
    let decoded = decode_entities(raw.trim());
    let collapsed = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
    (!collapsed.is_empty()).then_some(collapsed)
}

/// Decode the named entities pages actually emit in attributes plus numeric
/// references. Unknown entities are left as written.
pub(crate) fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|semi| *semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|ch| (ch, semi)));

        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
