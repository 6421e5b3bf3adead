use once_cell::sync::Lazy;
use regex::Regex;

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").expect("valid url regex"));
static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").expect("valid mention regex"));
static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").expect("valid hashtag regex"));

/// Kind of a styled span inside a line of body text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Plain,
    Url,
    Mention,
    Hashtag,
}

impl EntityKind {
    pub fn is_link(self) -> bool {
        !matches!(self, Self::Plain)
    }
}

/// A contiguous span of a line tagged with its [`EntityKind`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextEntity {
    pub content: String,
    pub kind: EntityKind,
}

impl TextEntity {
    fn new(content: &str, kind: EntityKind) -> Self {
        Self {
            content: content.to_string(),
            kind,
        }
    }
}

/// Split one logical line into plain/url/mention/hashtag spans.
///
/// Spans are emitted left to right and concatenate back to `line`. When patterns start at the
/// same offset the earlier entry of URL, mention, hashtag wins.
pub fn segment_line(line: &str) -> Vec<TextEntity> {
    let patterns: [(&Regex, EntityKind); 3] = [
        (&URL_RE, EntityKind::Url),
        (&MENTION_RE, EntityKind::Mention),
        (&HASHTAG_RE, EntityKind::Hashtag),
    ];

    let mut out = Vec::new();
    let mut rest = line;
    while !rest.is_empty() {
        let mut earliest: Option<(regex::Match<'_>, EntityKind)> = None;
        for (re, kind) in &patterns {
            let Some(m) = re.find(rest) else {
                continue;
            };
            if earliest.is_none_or(|(best, _)| m.start() < best.start()) {
                earliest = Some((m, *kind));
            }
        }

        let Some((m, kind)) = earliest else {
            out.push(TextEntity::new(rest, EntityKind::Plain));
            break;
        };
        if m.start() > 0 {
            out.push(TextEntity::new(&rest[..m.start()], EntityKind::Plain));
        }
        out.push(TextEntity::new(m.as_str(), kind));
        rest = &rest[m.end()..];
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/entities.rs"]
mod tests;
