use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::NodeData;

/// A comma-separated list of compound selectors: `tag`, `*`, `.class`, `[attr]`, `[attr="v"]`.
///
/// Combinators are not supported; such selectors fail to parse. Commas inside attribute values
/// are not supported either.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SelectorList(Vec<Compound>);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

impl SelectorList {
    pub(crate) fn parse(src: &str) -> Option<Self> {
        let mut out = Vec::new();
        for part in src.split(',') {
            out.push(Compound::parse(part.trim())?);
        }
        Some(Self(out))
    }

    pub(crate) fn matches(&self, node: &NodeData) -> bool {
        self.0.iter().any(|c| c.matches(node))
    }
}

impl Compound {
    fn parse(src: &str) -> Option<Self> {
        if src.is_empty() {
            return None;
        }
        let mut out = Self::default();
        let mut rest = src;
        if let Some(r) = rest.strip_prefix('*') {
            rest = r;
        } else {
            let (tag, r) = take_ident(rest);
            if !tag.is_empty() {
                out.tag = Some(tag.to_ascii_lowercase());
            }
            rest = r;
        }

        while !rest.is_empty() {
            if let Some(r) = rest.strip_prefix('.') {
                let (class, r) = take_ident(r);
                if class.is_empty() {
                    return None;
                }
                out.classes.push(class.to_string());
                rest = r;
            } else if let Some(r) = rest.strip_prefix('[') {
                let end = r.find(']')?;
                out.attrs.push(AttrMatch::parse(&r[..end])?);
                rest = &r[end + 1..];
            } else {
                return None;
            }
        }
        Some(out)
    }

    fn matches(&self, node: &NodeData) -> bool {
        let Some(tag) = node.tag.as_deref() else {
            return false;
        };
        if self.tag.as_deref().is_some_and(|t| t != tag) {
            return false;
        }
        if !self.classes.iter().all(|c| node.classes.contains(c)) {
            return false;
        }
        self.attrs.iter().all(|a| {
            let found = node.attrs.iter().find(|(name, _)| *name == a.name);
            match (found, a.value.as_deref()) {
                (None, _) => false,
                (Some(_), None) => true,
                (Some((_, v)), Some(want)) => v == want,
            }
        })
    }
}

impl AttrMatch {
    fn parse(inner: &str) -> Option<Self> {
        let (name, value) = match inner.split_once('=') {
            None => (inner.trim(), None),
            Some((name, value)) => (name.trim(), Some(unquote(value.trim()))),
        };
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            value: value.map(str::to_string),
        })
    }
}

fn unquote(v: &str) -> &str {
    for q in ['"', '\''] {
        if v.len() >= 2 && v.starts_with(q) && v.ends_with(q) {
            return &v[1..v.len() - 1];
        }
    }
    v
}

fn take_ident(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(s.len());
    s.split_at(end)
}
