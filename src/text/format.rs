use chrono::DateTime;

/// Source timestamp layout, e.g. `Thu Oct 13 20:47:08 +0000 2022`.
pub const SOURCE_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

const SHORT_FALLBACK_CHARS: usize = 12;

/// Compact engagement count: `999`, `1.0K`, `1.5M`.
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// Up to two uppercase initials for the fallback avatar.
pub fn initials(name: &str) -> String {
    let mut tokens = name.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(first), Some(second)) => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect(),
        _ => name
            .trim()
            .chars()
            .take(2)
            .flat_map(char::to_uppercase)
            .collect(),
    }
}

/// `Oct 13, 2022`; unparsable input is truncated to its first 12 characters.
pub fn format_date_short(raw: &str) -> String {
    match DateTime::parse_from_str(raw, SOURCE_DATE_FORMAT) {
        Ok(dt) => dt.format("%b %d, %Y").to_string(),
        Err(err) => {
            if !raw.is_empty() {
                tracing::debug!(raw, %err, "unparsable post date");
            }
            raw.chars().take(SHORT_FALLBACK_CHARS).collect()
        }
    }
}

/// `October 13, 2022 at 08:47 PM`; unparsable input is returned verbatim.
pub fn format_date_full(raw: &str) -> String {
    DateTime::parse_from_str(raw, SOURCE_DATE_FORMAT)
        .map(|dt| dt.format("%B %d, %Y at %I:%M %p").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// One entry of the engagement line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetricItem {
    pub value: String,
    pub label: &'static str,
}

/// Replies, reposts, likes and views with zero or absent counts suppressed.
///
/// A post without any engagement still reports `0 Likes` so the line is never empty.
pub fn metric_items(replies: u64, reposts: u64, likes: u64, views: Option<u64>) -> Vec<MetricItem> {
    let entries = [
        (replies, "Reply", "Replies"),
        (reposts, "Repost", "Reposts"),
        (likes, "Like", "Likes"),
        (views.unwrap_or(0), "View", "Views"),
    ];

    let items: Vec<MetricItem> = entries
        .into_iter()
        .filter(|(n, _, _)| *n > 0)
        .map(|(n, one, many)| MetricItem {
            value: format_count(n),
            label: if n == 1 { one } else { many },
        })
        .collect();

    if items.is_empty() {
        return vec![MetricItem {
            value: "0".to_string(),
            label: "Likes",
        }];
    }
    items
}

/// Plain-text rendering of [`metric_items`], joined with ` · `.
pub fn metrics_line(items: &[MetricItem]) -> String {
    items
        .iter()
        .map(|item| format!("{} {}", item.value, item.label))
        .collect::<Vec<_>>()
        .join(" · ")
}

#[cfg(test)]
#[path = "../../tests/unit/text/format.rs"]
mod tests;
