use std::fs;

use brand_context::document::Document;
use brand_context::selection::{AnchorTable, AnchorTableError, ContextSelector};
use brand_context::types::MatchedRule;
use tempfile::tempdir;

#[test]
fn landon_table_keeps_rule_order() {
    let table = AnchorTable::landon();

    let names: Vec<&str> = table.themes.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "services",
            "logo",
            "colors",
            "graphics",
            "photography",
            "values",
            "printed_materials",
            "typography",
            "brand_personality",
            "voice_and_tone",
            "look_and_feel",
            "customers",
            "location",
            "pricing",
        ]
    );

    let composite = table.composite.as_ref().expect("typography composite rule");
    assert_eq!(composite.anchors.len(), 6);
    assert_eq!(composite.before, 1500);
    assert_eq!(composite.after, 4500);
    assert_eq!(composite.separator, "\n\n---\n\n");

    assert_eq!(
        table.fallback,
        vec!["BRANDON GROTESQUE", "OUR COLORS", "OUR SERVICES", "PHOTOGRAPHY"]
    );
    assert!(table.validate().is_ok());
    assert_eq!(AnchorTable::default(), table);
}

#[test]
fn every_builtin_keyword_is_lower_case() {
    let table = AnchorTable::landon();
    for theme in &table.themes {
        for keyword in &theme.keywords {
            assert_eq!(keyword, &keyword.to_lowercase(), "theme {}", theme.name);
        }
    }
}

#[test]
fn json_table_drives_selection() {
    let json = br#"{
        "themes": [
            { "name": "spa", "keywords": ["Spa", "Wellness"], "anchors": ["WELLNESS CENTRE", "SPA"] }
        ],
        "fallback": ["WELCOME"]
    }"#;
    let table = AnchorTable::from_json(json).unwrap();

    // Keywords are lower-cased on load.
    assert_eq!(table.themes[0].keywords, vec!["spa", "wellness"]);
    assert!(table.composite.is_none());

    let doc = Document::from_text("spa.txt", "WELCOME to the hotel. Our SPA is open daily.");
    let selector = ContextSelector::new(table, 1_000);

    let window = selector.select("Is there a spa?", &doc);
    assert_eq!(
        window.matched,
        MatchedRule::Theme {
            name: "spa".to_string(),
            anchor: "SPA".to_string(),
        }
    );

    let window = selector.select("Parking?", &doc);
    assert_eq!(
        window.matched,
        MatchedRule::Fallback {
            anchor: "WELCOME".to_string(),
        }
    );
}

#[test]
fn composite_defaults_apply_when_omitted() {
    let json = br#"{
        "composite": { "name": "fonts", "keywords": ["font"], "anchors": ["TYPEFACE"] }
    }"#;
    let table = AnchorTable::from_json(json).unwrap();
    let composite = table.composite.unwrap();

    assert_eq!(composite.before, 1500);
    assert_eq!(composite.after, 4500);
    assert_eq!(composite.separator, "\n\n---\n\n");
    assert!(table.themes.is_empty());
    assert!(table.fallback.is_empty());
}

#[test]
fn empty_keyword_is_rejected() {
    let json = br#"{ "themes": [ { "name": "all", "keywords": [""], "anchors": ["X"] } ] }"#;
    let err = AnchorTable::from_json(json).unwrap_err();
    assert!(matches!(err, AnchorTableError::EmptyEntry { ref rule } if rule == "all"));
}

#[test]
fn empty_fallback_anchor_is_rejected() {
    let json = br#"{ "fallback": ["OUR COLORS", ""] }"#;
    let err = AnchorTable::from_json(json).unwrap_err();
    assert!(matches!(err, AnchorTableError::EmptyEntry { ref rule } if rule == "fallback"));
}

#[test]
fn malformed_json_is_reported() {
    let err = AnchorTable::from_json(b"{ not json").unwrap_err();
    assert!(matches!(err, AnchorTableError::Malformed(_)));
}

#[test]
fn table_loads_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("anchors.json");
    let table = AnchorTable::landon();
    fs::write(&path, serde_json::to_vec_pretty(&table).unwrap()).unwrap();

    assert_eq!(AnchorTable::load(&path).unwrap(), table);

    let missing = AnchorTable::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(missing, AnchorTableError::Io { .. }));
}
