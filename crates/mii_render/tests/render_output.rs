use mii_core::core_api::{Engine, Session};
use mii_core::mii::{self, MiiFormat};
use mii_core::save::{MAX_SLOTS, Region, SaveLayout};
use mii_render::{
    TextRenderOptions, render_extraction_json, render_extraction_text, render_mii_json,
    render_mii_text, render_slot_json,
};
use serde_json::Value;

fn write_utf16_le(buf: &mut [u8], at: usize, text: &str) {
    for (i, unit) in text.encode_utf16().enumerate() {
        buf[at + i * 2..at + i * 2 + 2].copy_from_slice(&unit.to_le_bytes());
    }
}

fn two_mii_session(region: Region) -> Session {
    let layout = SaveLayout::for_region(region);
    let mut buf = vec![0u8; layout.required_len(MAX_SLOTS)];

    let ada = layout.offsets_for(0);
    write_utf16_le(&mut buf, ada.profile, "Ada");
    buf[ada.personality..ada.personality + 5].copy_from_slice(&[2, 3, 4, 5, 1]);
    // Ada -> Bo: friend, 40
    let edge = ada.relationship + 1;
    buf[edge] = 40;
    buf[edge + 0x64] = 1;

    let bo = layout.offsets_for(1);
    write_utf16_le(&mut buf, bo.profile, "Bo");
    buf[bo.personality..bo.personality + 5].copy_from_slice(&[7, 7, 7, 7, 1]);

    Engine::new()
        .open_save(buf, region, None)
        .expect("synthetic save should open")
}

fn keys(value: &Value) -> Vec<&str> {
    value
        .as_object()
        .expect("json should be an object")
        .keys()
        .map(String::as_str)
        .collect()
}

#[test]
fn extraction_json_uses_canonical_top_level_order() {
    let session = two_mii_session(Region::Jp);
    let extraction = session.extract_all(MAX_SLOTS);
    let value = render_extraction_json(&extraction, session.info(), session.capabilities());

    assert_eq!(
        keys(&value),
        vec![
            "region",
            "file_size",
            "truncated",
            "low_confidence_layout",
            "slots_scanned",
            "total_miis",
            "relationship_count",
            "personality_distribution",
            "miis",
            "relationships",
        ]
    );
    assert_eq!(value["region"], "JP");
    assert_eq!(value["total_miis"], 2);
    assert_eq!(value["low_confidence_layout"], false);
    assert_eq!(keys(&value["miis"]), vec!["0", "1"]);

    let edges = value["relationships"].as_array().expect("edge list");
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0]["source"], 0);
    assert_eq!(edges[0]["target"], 1);
    assert_eq!(edges[0]["value"], 40);
    assert_eq!(edges[0]["type_name"], "Friend");
    assert_eq!(edges[0]["target_name"], "Bo");
}

#[test]
fn personality_distribution_counts_every_mii() {
    let session = two_mii_session(Region::Jp);
    let extraction = session.extract_all(MAX_SLOTS);
    let value = render_extraction_json(&extraction, session.info(), session.capabilities());

    let distribution = value["personality_distribution"]
        .as_object()
        .expect("distribution object");
    let total: u64 = distribution.values().filter_map(Value::as_u64).sum();
    assert_eq!(total, 2);

    let ada = &extraction.slots[&0];
    assert_eq!(
        value["miis"]["0"]["personality_type"],
        ada.personality_type.to_string()
    );
}

#[test]
fn slot_json_groups_sections_in_order() {
    let session = two_mii_session(Region::Eu);
    let record = session.slot(0).expect("slot 0");
    let value = render_slot_json(&record);

    assert_eq!(
        keys(&value),
        vec![
            "slot",
            "name",
            "personality_type",
            "profile",
            "status",
            "food",
            "personality",
            "mii",
            "relationships",
            "relationship_count",
        ]
    );
    assert_eq!(value["name"], "Ada");
    assert_eq!(value["profile"]["nickname"], "Ada");
    assert_eq!(value["personality"]["Speech"], 2);
    assert_eq!(value["food"]["favorites"][0]["name"], "Nothing");
    assert_eq!(value["mii"]["format"], "modern");
    assert_eq!(value["relationship_count"], 1);
}

#[test]
fn western_extraction_reports_estimated_layout() {
    let session = two_mii_session(Region::Us);
    let extraction = session.extract_all(MAX_SLOTS);
    let value = render_extraction_json(&extraction, session.info(), session.capabilities());
    assert_eq!(value["low_confidence_layout"], true);

    let text = render_extraction_text(
        &extraction,
        session.capabilities(),
        TextRenderOptions::default(),
    );
    assert!(text.starts_with("US save"), "{text}");
    assert!(text.contains("estimates"));
    assert!(text.contains(" ::: Slot 0 :::"));
    assert!(text.contains(" ::: Slot 1 :::"));
    assert!(!text.contains(" ::: Slot 2 :::"));
}

#[test]
fn verbose_text_lists_each_edge() {
    let session = two_mii_session(Region::Jp);
    let record = session.slot(0).expect("slot 0");

    let terse = mii_render::render_slot_text(&record, TextRenderOptions::default());
    assert!(terse.contains("Relationships: 1"), "{terse}");

    let verbose = mii_render::render_slot_text(&record, TextRenderOptions { verbose: true });
    assert!(verbose.contains("-> Bo: Friend (40)"), "{verbose}");
}

#[test]
fn standalone_record_json_and_text() {
    let mut bytes = vec![0u8; 74];
    // female, March 17, blue
    bytes[0] = 0x4E;
    bytes[1] = 0x2A;
    for (i, unit) in "Ann".encode_utf16().enumerate() {
        bytes[2 + i * 2..4 + i * 2].copy_from_slice(&unit.to_be_bytes());
    }
    let record = mii::decode(MiiFormat::Legacy, &bytes).expect("legacy decode");

    let value = render_mii_json(&record, None);
    assert_eq!(
        &keys(&value)[..6],
        &["format", "name", "creator", "sex", "birthday", "favorite_color"]
    );
    assert_eq!(value["format"], "legacy");
    assert_eq!(value["name"], "Ann");
    assert_eq!(value["birthday"], "03-17");
    assert_eq!(value["favorite_color"], "Blue");
    assert!(value["appearance"]["head"].is_object());

    let text = render_mii_text(&record, None);
    assert!(text.contains("Name: Ann"), "{text}");
    assert!(text.contains("Birthday: March 17"), "{text}");
}

#[test]
fn zeroed_modern_record_has_null_birthday() {
    let record = mii::decode(MiiFormat::Modern, &[0u8; 96]).expect("modern decode");
    let value = render_mii_json(&record, Some(true));
    assert_eq!(value["birthday"], Value::Null);
    assert_eq!(value["checksum_valid"], true);
    assert_eq!(value["console_id"], "0000000000000000");
    assert_eq!(value["metadata"]["format_version"], 0);
    assert_eq!(value["appearance"]["height"], 0);
}
