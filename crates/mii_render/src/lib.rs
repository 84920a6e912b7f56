use std::fmt::Write as _;

use mii_core::core_api::{Capabilities, CapabilityIssue, SaveInfo};
use mii_core::mii::{LegacyMii, MiiRecord, ModernMii};
use mii_core::personality::{PersonalityTraits, VoiceTraits};
use mii_core::save::{
    FoodPreference, FoodPreferences, Profile, RelationshipEdge, SaveExtraction, SlotRecord, Status,
};
use serde_json::{Map as JsonMap, Value as JsonValue};

const LABEL_WIDTH: usize = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRenderOptions {
    /// Include every relationship edge instead of a per-slot count.
    pub verbose: bool,
}

/// Standalone record as a JSON object. Identity fields come first, then the
/// format-specific metadata and appearance groups.
pub fn render_mii_json(record: &MiiRecord, checksum_valid: Option<bool>) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert(
        "format".to_string(),
        JsonValue::String(record.format().to_string()),
    );
    out.insert(
        "name".to_string(),
        JsonValue::String(record.name().to_string()),
    );
    out.insert(
        "creator".to_string(),
        JsonValue::String(record.creator_name().to_string()),
    );
    out.insert(
        "sex".to_string(),
        JsonValue::String(record.sex().to_string()),
    );
    let (month, day) = record.birthday();
    out.insert("birthday".to_string(), birthday_to_json(month.raw(), day));
    out.insert(
        "favorite_color".to_string(),
        JsonValue::String(record.favorite_color().to_string()),
    );

    match record {
        MiiRecord::Legacy(mii) => legacy_details(&mut out, mii),
        MiiRecord::Modern(mii) => modern_details(&mut out, mii, checksum_valid),
    }

    JsonValue::Object(out)
}

fn legacy_details(out: &mut JsonMap<String, JsonValue>, mii: &LegacyMii) {
    let id = &mii.identity;
    out.insert(
        "mii_type".to_string(),
        JsonValue::from(mii.metadata.mii_type.raw),
    );
    out.insert(
        "mii_kind".to_string(),
        JsonValue::String(format!("{:?}", mii.metadata.mii_type.kind())),
    );
    out.insert("is_favorite".to_string(), JsonValue::from(id.is_favorite));
    out.insert(
        "creation_time".to_string(),
        JsonValue::from(id.creation_time),
    );
    out.insert(
        "console_id".to_string(),
        JsonValue::String(hex_bytes(&id.console_id)),
    );
    out.insert(
        "appearance".to_string(),
        serde_json::to_value(&mii.appearance).expect("record groups always serialize"),
    );
}

fn modern_details(
    out: &mut JsonMap<String, JsonValue>,
    mii: &ModernMii,
    checksum_valid: Option<bool>,
) {
    let meta = &mii.metadata;
    let id = &mii.identity;
    out.insert(
        "format_version".to_string(),
        JsonValue::from(meta.format_version),
    );
    out.insert("is_favorite".to_string(), JsonValue::from(id.is_favorite));
    out.insert(
        "birth_platform".to_string(),
        JsonValue::String(meta.birth_platform.to_string()),
    );
    out.insert(
        "region_lock".to_string(),
        JsonValue::String(meta.region_lock.to_string()),
    );
    out.insert(
        "font_region".to_string(),
        JsonValue::String(meta.font_region.to_string()),
    );
    out.insert("copying".to_string(), JsonValue::from(meta.copying));
    out.insert(
        "console_id".to_string(),
        JsonValue::String(format!("{:016X}", id.console_id)),
    );
    out.insert(
        "console_mac".to_string(),
        JsonValue::String(hex_bytes(&id.console_mac)),
    );
    out.insert(
        "creation_time".to_string(),
        JsonValue::from(id.mii_id.creation_time),
    );
    out.insert(
        "checksum".to_string(),
        JsonValue::String(format!("{:04X}", meta.checksum)),
    );
    out.insert(
        "checksum_valid".to_string(),
        match checksum_valid {
            Some(valid) => JsonValue::from(valid),
            None => JsonValue::Null,
        },
    );
    out.insert(
        "metadata".to_string(),
        serde_json::to_value(meta).expect("record groups always serialize"),
    );
    out.insert(
        "appearance".to_string(),
        serde_json::to_value(&mii.appearance).expect("record groups always serialize"),
    );
}

/// Whole-save extraction in canonical top-level order.
pub fn render_extraction_json(
    extraction: &SaveExtraction,
    info: &SaveInfo,
    capabilities: &Capabilities,
) -> JsonValue {
    let summary = &extraction.summary;
    let mut out = JsonMap::new();

    out.insert(
        "region".to_string(),
        JsonValue::String(summary.region.to_string()),
    );
    out.insert("file_size".to_string(), JsonValue::from(summary.buffer_len));
    out.insert("truncated".to_string(), JsonValue::from(info.is_truncated()));
    out.insert(
        "low_confidence_layout".to_string(),
        JsonValue::from(capabilities.has_issue(CapabilityIssue::LowConfidenceLayout)),
    );
    out.insert(
        "slots_scanned".to_string(),
        JsonValue::from(summary.slots_scanned),
    );
    out.insert("total_miis".to_string(), JsonValue::from(summary.slot_count));
    out.insert(
        "relationship_count".to_string(),
        JsonValue::from(summary.edge_count),
    );

    let mut distribution = JsonMap::new();
    for (personality, count) in &summary.personality_distribution {
        distribution.insert(personality.to_string(), JsonValue::from(*count));
    }
    out.insert(
        "personality_distribution".to_string(),
        JsonValue::Object(distribution),
    );

    let mut miis = JsonMap::new();
    for (slot, record) in &extraction.slots {
        miis.insert(slot.to_string(), render_slot_json(record));
    }
    out.insert("miis".to_string(), JsonValue::Object(miis));
    out.insert(
        "relationships".to_string(),
        JsonValue::Array(extraction.edges.iter().map(edge_to_json).collect()),
    );

    JsonValue::Object(out)
}

pub fn render_slot_json(record: &SlotRecord) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("slot".to_string(), JsonValue::from(record.slot));
    out.insert(
        "name".to_string(),
        JsonValue::String(record.display_name.clone()),
    );
    out.insert(
        "personality_type".to_string(),
        JsonValue::String(record.personality_type.to_string()),
    );
    out.insert("profile".to_string(), profile_to_json(&record.profile));
    out.insert("status".to_string(), status_to_json(&record.status));
    out.insert("food".to_string(), food_to_json(&record.food));
    out.insert(
        "personality".to_string(),
        personality_to_json(&record.personality),
    );
    out.insert(
        "mii".to_string(),
        match &record.mii {
            Some(mii) => render_mii_json(
                &MiiRecord::Modern(mii.clone()),
                record.mii_checksum_valid,
            ),
            None => JsonValue::Null,
        },
    );
    out.insert(
        "relationships".to_string(),
        JsonValue::Array(record.relationships.iter().map(edge_to_json).collect()),
    );
    out.insert(
        "relationship_count".to_string(),
        JsonValue::from(record.relationships.len()),
    );
    JsonValue::Object(out)
}

fn profile_to_json(profile: &Profile) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert(
        "nickname".to_string(),
        JsonValue::String(profile.nickname.clone()),
    );
    m.insert(
        "firstname".to_string(),
        JsonValue::String(profile.first_name.clone()),
    );
    m.insert(
        "lastname".to_string(),
        JsonValue::String(profile.last_name.clone()),
    );
    m.insert(
        "pronunciation_nickname".to_string(),
        JsonValue::String(profile.pronunciation.nickname.clone()),
    );
    m.insert(
        "pronunciation_firstname".to_string(),
        JsonValue::String(profile.pronunciation.first_name.clone()),
    );
    m.insert(
        "pronunciation_lastname".to_string(),
        JsonValue::String(profile.pronunciation.last_name.clone()),
    );
    m.insert(
        "creator".to_string(),
        JsonValue::String(profile.creator.clone()),
    );
    m.insert(
        "sex".to_string(),
        JsonValue::String(profile.sex.to_string()),
    );
    m.insert(
        "favorite_color".to_string(),
        JsonValue::String(profile.favorite_color.to_string()),
    );
    m.insert("sharing".to_string(), JsonValue::from(profile.sharing));
    m.insert("copying".to_string(), JsonValue::from(profile.copying));
    m.insert(
        "relation_to_you".to_string(),
        JsonValue::from(profile.relation_to_player),
    );
    m.insert("grow_kid".to_string(), JsonValue::from(profile.grow_kid));
    m.insert(
        "mii_sysid".to_string(),
        JsonValue::String(profile.mii_system_id.clone()),
    );
    m.insert(
        "tomodachi_life_mii_sysid".to_string(),
        JsonValue::String(profile.local_system_id.clone()),
    );
    m.insert(
        "origin_island".to_string(),
        JsonValue::from(profile.origin_island),
    );
    m.insert(
        "actual_island".to_string(),
        JsonValue::from(profile.current_island),
    );
    JsonValue::Object(m)
}

fn status_to_json(status: &Status) -> JsonValue {
    let phrases = &status.catchphrases;
    let mut catchphrases = JsonMap::new();
    for (key, phrase) in [
        ("catchphrase", &phrases.regular),
        ("happy_phrase", &phrases.happy),
        ("sad_phrase", &phrases.sad),
        ("mad_phrase", &phrases.mad),
        ("worried_phrase", &phrases.worried),
    ] {
        catchphrases.insert(key.to_string(), JsonValue::String(phrase.clone()));
    }

    let mut m = JsonMap::new();
    m.insert("level".to_string(), JsonValue::from(status.level));
    m.insert("experience".to_string(), JsonValue::from(status.experience));
    m.insert("hair_color".to_string(), JsonValue::from(status.hair_color));
    m.insert(
        "pampered_ranking".to_string(),
        JsonValue::from(status.pampered_ranking),
    );
    m.insert(
        "splurge_ranking".to_string(),
        JsonValue::from(status.splurge_ranking),
    );
    m.insert("catchphrases".to_string(), JsonValue::Object(catchphrases));
    m.insert(
        "gestures".to_string(),
        JsonValue::Array(
            status
                .gestures
                .iter()
                .map(|g| JsonValue::String(g.to_string()))
                .collect(),
        ),
    );
    JsonValue::Object(m)
}

fn food_to_json(food: &FoodPreferences) -> JsonValue {
    let list = |items: &[FoodPreference]| JsonValue::Array(items.iter().map(food_entry).collect());
    let mut m = JsonMap::new();
    m.insert(
        "all_time_favorites".to_string(),
        list(&food.all_time_favorites),
    );
    m.insert("favorites".to_string(), list(&food.favorites));
    m.insert("worst".to_string(), list(&food.worst));
    m.insert("checktummy".to_string(), JsonValue::from(food.check_tummy));
    m.insert("fullness".to_string(), JsonValue::from(food.fullness));
    JsonValue::Object(m)
}

fn food_entry(item: &FoodPreference) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("id".to_string(), JsonValue::from(item.id));
    m.insert("name".to_string(), JsonValue::String(item.name.clone()));
    JsonValue::Object(m)
}

fn personality_to_json(traits: &PersonalityTraits) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("Energy".to_string(), JsonValue::from(traits.energy));
    m.insert("Speech".to_string(), JsonValue::from(traits.speech));
    m.insert(
        "Facialexpressions".to_string(),
        JsonValue::from(traits.facial_expressions),
    );
    m.insert("Mood".to_string(), JsonValue::from(traits.mood));
    m.insert("Overall".to_string(), JsonValue::from(traits.overall));
    m.insert("voice".to_string(), voice_to_json(&traits.voice));
    m.insert(
        "type".to_string(),
        JsonValue::String(traits.personality_type().to_string()),
    );
    JsonValue::Object(m)
}

fn voice_to_json(voice: &VoiceTraits) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("Pitch".to_string(), JsonValue::from(voice.pitch));
    m.insert("Speed".to_string(), JsonValue::from(voice.speed));
    m.insert("Quality".to_string(), JsonValue::from(voice.quality));
    m.insert("Tone".to_string(), JsonValue::from(voice.tone));
    m.insert("Accent".to_string(), JsonValue::from(voice.accent));
    m.insert("Intonation".to_string(), JsonValue::from(voice.intonation));
    JsonValue::Object(m)
}

fn edge_to_json(edge: &RelationshipEdge) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("source".to_string(), JsonValue::from(edge.source));
    m.insert("target".to_string(), JsonValue::from(edge.target));
    m.insert("value".to_string(), JsonValue::from(edge.value));
    m.insert("type".to_string(), JsonValue::from(edge.kind.raw()));
    m.insert(
        "type_name".to_string(),
        JsonValue::String(edge.kind.to_string()),
    );
    m.insert(
        "target_name".to_string(),
        JsonValue::String(edge.target_name.clone()),
    );
    JsonValue::Object(m)
}

fn birthday_to_json(month: u8, day: u8) -> JsonValue {
    if month == 0 || day == 0 {
        return JsonValue::Null;
    }
    JsonValue::String(format!("{month:02}-{day:02}"))
}

fn hex_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        write!(&mut out, "{byte:02X}").expect("writing to String cannot fail");
    }
    out
}

fn push_row(out: &mut String, label: &str, value: impl std::fmt::Display) {
    writeln!(out, "{:>width$}: {value}", label, width = LABEL_WIDTH)
        .expect("writing to String cannot fail");
}

pub fn render_mii_text(record: &MiiRecord, checksum_valid: Option<bool>) -> String {
    let mut out = String::new();
    let (month, day) = record.birthday();
    push_row(&mut out, "Format", record.format());
    push_row(&mut out, "Name", record.name());
    push_row(&mut out, "Creator", record.creator_name());
    push_row(&mut out, "Sex", record.sex());
    push_row(&mut out, "Birthday", format!("{month} {day}"));
    push_row(&mut out, "Favorite color", record.favorite_color());

    match record {
        MiiRecord::Legacy(mii) => {
            push_row(
                &mut out,
                "Type",
                format!("{:?}", mii.metadata.mii_type.kind()),
            );
            push_row(
                &mut out,
                "Height / build",
                format!("{} / {}", mii.appearance.height, mii.appearance.build),
            );
        }
        MiiRecord::Modern(mii) => {
            push_row(&mut out, "Created on", mii.metadata.birth_platform);
            push_row(
                &mut out,
                "Height / build",
                format!("{} / {}", mii.appearance.height, mii.appearance.build),
            );
            let checksum = match checksum_valid {
                Some(true) => "valid",
                Some(false) => "MISMATCH",
                None => "not checked",
            };
            push_row(
                &mut out,
                "Checksum",
                format!("{:04X} ({checksum})", mii.metadata.checksum),
            );
        }
    }
    out
}

pub fn render_slot_text(record: &SlotRecord, options: TextRenderOptions) -> String {
    let mut out = String::new();
    let profile = &record.profile;
    let traits = &record.personality;

    writeln!(&mut out, " ::: Slot {} :::", record.slot).expect("writing to String cannot fail");
    push_row(&mut out, "Nickname", &record.display_name);
    if !profile.first_name.is_empty() || !profile.last_name.is_empty() {
        push_row(
            &mut out,
            "Full name",
            format!("{} {}", profile.first_name, profile.last_name).trim(),
        );
    }
    if !profile.creator.is_empty() {
        push_row(&mut out, "Creator", &profile.creator);
    }
    push_row(&mut out, "Sex", profile.sex);
    push_row(&mut out, "Favorite color", profile.favorite_color);
    push_row(&mut out, "Personality", record.personality_type);
    push_row(
        &mut out,
        "Traits",
        format!(
            "energy {} / speech {} / expressions {} / mood {}",
            traits.energy, traits.speech, traits.facial_expressions, traits.mood
        ),
    );
    push_row(
        &mut out,
        "Level / experience",
        format!("{} / {}", record.status.level, record.status.experience),
    );
    if !record.status.catchphrases.regular.is_empty() {
        push_row(&mut out, "Catchphrase", &record.status.catchphrases.regular);
    }
    let favorites: Vec<&str> = record
        .food
        .favorites
        .iter()
        .filter(|f| !f.is_nothing())
        .map(|f| f.name.as_str())
        .collect();
    if !favorites.is_empty() {
        push_row(&mut out, "Favorite foods", favorites.join(", "));
    }

    if options.verbose {
        for edge in &record.relationships {
            push_row(
                &mut out,
                &format!("-> {}", edge.target_name),
                format!("{} ({})", edge.kind, edge.value),
            );
        }
    } else {
        push_row(&mut out, "Relationships", record.relationships.len());
    }
    out
}

pub fn render_extraction_text(
    extraction: &SaveExtraction,
    capabilities: &Capabilities,
    options: TextRenderOptions,
) -> String {
    let summary = &extraction.summary;
    let mut out = String::new();

    writeln!(
        &mut out,
        "{} save, {} bytes: {} of {} slots in use, {} relationship edges",
        summary.region,
        summary.buffer_len,
        summary.slot_count,
        summary.slots_scanned,
        summary.edge_count
    )
    .expect("writing to String cannot fail");
    if capabilities.has_issue(CapabilityIssue::LowConfidenceLayout) {
        writeln!(
            &mut out,
            "note: food and relationship offsets for this region are estimates"
        )
        .expect("writing to String cannot fail");
    }
    writeln!(&mut out).expect("writing to String cannot fail");

    for record in extraction.slots.values() {
        out.push_str(&render_slot_text(record, options));
        writeln!(&mut out).expect("writing to String cannot fail");
    }

    if !summary.personality_distribution.is_empty() {
        writeln!(&mut out, " ::: Personalities :::").expect("writing to String cannot fail");
        for (personality, count) in &summary.personality_distribution {
            push_row(&mut out, personality.as_str(), count);
        }
    }
    out
}
