//! Line-oriented parsing of free-form WHOIS answers.

use crate::domain::entities::WhoisTree;
use serde_json::Value;

/// Key under which lines without a `key: value` shape are collected.
pub const TEXT_KEY: &str = "text";

const MAX_KEY_LEN: usize = 64;

/// Parses a WHOIS answer into a flat field map.
///
/// `Key: value` lines become entries; a key seen again turns into an array
/// of its distinct values. Comment lines (`%`, `#`, `>>>`) are dropped, and
/// any other non-empty line is appended to [`TEXT_KEY`].
pub fn parse_response(raw: &str) -> WhoisTree {
    let mut fields = WhoisTree::new();

    for line in raw.lines().map(str::trim) {
        if line.is_empty() || is_comment(line) {
            continue;
        }

        match split_field(line) {
            Some((key, value)) if !value.is_empty() => push_value(&mut fields, key, value),
            Some(_) => {}
            None => push_value(&mut fields, TEXT_KEY, line),
        }
    }

    fields
}

fn is_comment(line: &str) -> bool {
    line.starts_with('%') || line.starts_with('#') || line.starts_with(">>>")
}

fn split_field(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();

    if key.is_empty() || key.len() > MAX_KEY_LEN || value.starts_with("//") {
        return None;
    }

    Some((key, value.trim()))
}

fn push_value(fields: &mut WhoisTree, key: &str, value: &str) {
    let value = Value::String(value.to_string());

    match fields.get_mut(key) {
        None => {
            fields.insert(key.to_string(), value);
        }
        Some(Value::Array(items)) => {
            if !items.contains(&value) {
                items.push(value);
            }
        }
        Some(existing) => {
            if *existing != value {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }
}

/// First non-empty string under any of `keys`, compared case-insensitively.
pub(crate) fn find_field<'a>(fields: &'a WhoisTree, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|wanted| {
        fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(wanted))
            .and_then(|(_, value)| match value {
                Value::String(s) => Some(s.as_str()),
                Value::Array(items) => items.iter().find_map(Value::as_str),
                _ => None,
            })
            .filter(|s| !s.is_empty())
    })
}
