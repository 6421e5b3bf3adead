use super::*;

fn kinds(entities: &[TextEntity]) -> Vec<(&str, EntityKind)> {
    entities
        .iter()
        .map(|e| (e.content.as_str(), e.kind))
        .collect()
}

#[test]
fn mixed_line_is_split_in_order() {
    let line = "Hello @alice check #systems https://example.com/x";
    let entities = segment_line(line);
    assert_eq!(
        kinds(&entities),
        vec![
            ("Hello ", EntityKind::Plain),
            ("@alice", EntityKind::Mention),
            (" check ", EntityKind::Plain),
            ("#systems", EntityKind::Hashtag),
            (" ", EntityKind::Plain),
            ("https://example.com/x", EntityKind::Url),
        ]
    );
}

#[test]
fn concatenation_reconstructs_the_line() {
    let lines = [
        "",
        "plain text only",
        "@a@b#c#d",
        "see http://a.b/c?d=#frag and @me.",
        "tail #tag",
        "  leading and trailing  ",
        "ünïcode @név #címke",
    ];
    for line in lines {
        let joined: String = segment_line(line)
            .iter()
            .map(|e| e.content.as_str())
            .collect();
        assert_eq!(joined, line);
    }
}

#[test]
fn url_swallows_embedded_mentions_and_hashtags() {
    let entities = segment_line("https://x.com/@user#top rest");
    assert_eq!(entities[0].kind, EntityKind::Url);
    assert_eq!(entities[0].content, "https://x.com/@user#top");
    assert_eq!(entities[1], TextEntity::new(" rest", EntityKind::Plain));
}

#[test]
fn bare_sigils_stay_plain() {
    let entities = segment_line("a @ b # c");
    assert_eq!(kinds(&entities), vec![("a @ b # c", EntityKind::Plain)]);
}

#[test]
fn empty_line_yields_no_entities() {
    assert!(segment_line("").is_empty());
}

#[test]
fn link_kinds_are_flagged() {
    assert!(!EntityKind::Plain.is_link());
    assert!(EntityKind::Url.is_link());
    assert!(EntityKind::Mention.is_link());
    assert!(EntityKind::Hashtag.is_link());
}
