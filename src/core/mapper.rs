use crate::domain::model::{FieldMap, Logo, Sponsor, SponsorForm, SponsorPatch};
use crate::domain::ports::RawRecord;
use crate::utils::error::{DeskError, Result};
use serde_json::{json, Value};

pub const F_NAME: &str = "sponsor_name";
pub const F_LOGO: &str = "sponsor_logo";
pub const F_INDUSTRY: &str = "industry";
pub const F_CONTACT_PERSON: &str = "contact_person";
pub const F_CONTACT_EMAIL: &str = "contact_email";
pub const F_CONTACT_PHONE: &str = "contact_phone";
pub const F_LEVEL: &str = "level";
pub const F_CONTRACT_END: &str = "contract_end";

fn string_field(fields: &FieldMap, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// The logo column appears as a bare URL string in older tables and as a
/// list of attachment objects in newer ones; accept both.
fn logo_url(fields: &FieldMap) -> Option<String> {
    match fields.get(F_LOGO) {
        Some(Value::String(url)) if !url.is_empty() => Some(url.clone()),
        Some(Value::Array(items)) => items
            .first()
            .and_then(|item| item.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Decodes a raw backend record into a `Sponsor`.
///
/// Decoding is deliberately permissive: the backend's field typing is
/// trusted, absent or mistyped fields become empty strings / `None` instead
/// of failing. Placeholder category records (only `level` set) decode this
/// way into sponsors with blank names.
pub fn decode(record: &RawRecord) -> Sponsor {
    Sponsor {
        id: record.id.clone(),
        name: string_field(&record.fields, F_NAME),
        industry: record
            .fields
            .get(F_INDUSTRY)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        contact_person: string_field(&record.fields, F_CONTACT_PERSON),
        contact_email: string_field(&record.fields, F_CONTACT_EMAIL),
        contact_phone: string_field(&record.fields, F_CONTACT_PHONE),
        level: string_field(&record.fields, F_LEVEL),
        contract_end: string_field(&record.fields, F_CONTRACT_END),
        logo_url: logo_url(&record.fields),
    }
}

/// Wraps a logo URL into the attachment shape the backend expects on write.
fn attachment(url: &str) -> Value {
    json!([{ "url": url }])
}

fn encode_logo(logo: &Logo) -> Result<Value> {
    match logo {
        Logo::Remote(url) => Ok(attachment(url)),
        Logo::Pending { file_name, .. } => Err(DeskError::write(format!(
            "logo '{}' was not uploaded before encoding",
            file_name
        ))),
    }
}

/// Encodes a new-sponsor form into a backend field map. The logo, when
/// present, must already be `Logo::Remote`; raw file bytes never go to the
/// record backend.
pub fn encode_form(form: &SponsorForm) -> Result<FieldMap> {
    let mut fields = FieldMap::new();
    fields.insert(F_NAME.to_string(), json!(form.name));
    if let Some(industry) = &form.industry {
        fields.insert(F_INDUSTRY.to_string(), json!(industry));
    }
    fields.insert(F_CONTACT_PERSON.to_string(), json!(form.contact_person));
    fields.insert(F_CONTACT_EMAIL.to_string(), json!(form.contact_email));
    fields.insert(F_CONTACT_PHONE.to_string(), json!(form.contact_phone));
    fields.insert(F_LEVEL.to_string(), json!(form.level));
    fields.insert(F_CONTRACT_END.to_string(), json!(form.contract_end));
    if let Some(logo) = &form.logo {
        fields.insert(F_LOGO.to_string(), encode_logo(logo)?);
    }
    Ok(fields)
}

/// Encodes a partial update; only fields present in the patch are emitted,
/// so independent patches compose on the backend side.
pub fn encode_patch(patch: &SponsorPatch) -> Result<FieldMap> {
    let mut fields = FieldMap::new();
    if let Some(name) = &patch.name {
        fields.insert(F_NAME.to_string(), json!(name));
    }
    if let Some(industry) = &patch.industry {
        fields.insert(F_INDUSTRY.to_string(), json!(industry));
    }
    if let Some(person) = &patch.contact_person {
        fields.insert(F_CONTACT_PERSON.to_string(), json!(person));
    }
    if let Some(email) = &patch.contact_email {
        fields.insert(F_CONTACT_EMAIL.to_string(), json!(email));
    }
    if let Some(phone) = &patch.contact_phone {
        fields.insert(F_CONTACT_PHONE.to_string(), json!(phone));
    }
    if let Some(level) = &patch.level {
        fields.insert(F_LEVEL.to_string(), json!(level));
    }
    if let Some(end) = &patch.contract_end {
        fields.insert(F_CONTRACT_END.to_string(), json!(end));
    }
    if let Some(logo) = &patch.logo {
        fields.insert(F_LOGO.to_string(), encode_logo(logo)?);
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(fields: Vec<(&str, Value)>) -> RawRecord {
        RawRecord {
            id: "recTEST0001".to_string(),
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }

    #[test]
    fn test_decode_full_record() {
        let rec = record(vec![
            (F_NAME, json!("Acme Corp")),
            (F_INDUSTRY, json!("Aerospace")),
            (F_CONTACT_PERSON, json!("Dana Vale")),
            (F_CONTACT_EMAIL, json!("dana@acme.example")),
            (F_CONTACT_PHONE, json!("+1-555-0100")),
            (F_LEVEL, json!("Gold")),
            (F_CONTRACT_END, json!("2027-06-30")),
            (F_LOGO, json!([{ "url": "https://cdn.example/acme.png" }])),
        ]);

        let sponsor = decode(&rec);
        assert_eq!(sponsor.id, "recTEST0001");
        assert_eq!(sponsor.name, "Acme Corp");
        assert_eq!(sponsor.industry.as_deref(), Some("Aerospace"));
        assert_eq!(sponsor.level, "Gold");
        assert_eq!(
            sponsor.logo_url.as_deref(),
            Some("https://cdn.example/acme.png")
        );
    }

    #[test]
    fn test_decode_is_permissive_on_missing_fields() {
        // A placeholder category record carries only `level`.
        let rec = record(vec![(F_LEVEL, json!("Bronze"))]);
        let sponsor = decode(&rec);
        assert_eq!(sponsor.name, "");
        assert_eq!(sponsor.industry, None);
        assert_eq!(sponsor.level, "Bronze");
        assert_eq!(sponsor.logo_url, None);
    }

    #[test]
    fn test_decode_accepts_bare_url_logo() {
        let rec = record(vec![(F_LOGO, json!("https://cdn.example/logo.png"))]);
        assert_eq!(
            decode(&rec).logo_url.as_deref(),
            Some("https://cdn.example/logo.png")
        );
    }

    #[test]
    fn test_encode_form_without_logo_has_no_logo_key() {
        let form = SponsorForm {
            name: "Acme Corp".to_string(),
            industry: None,
            contact_person: "Dana Vale".to_string(),
            contact_email: "dana@acme.example".to_string(),
            contact_phone: "+1-555-0100".to_string(),
            level: "Gold".to_string(),
            contract_end: "2027-06-30".to_string(),
            logo: None,
        };

        let fields = encode_form(&form).unwrap();
        assert!(!fields.contains_key(F_LOGO));
        assert!(!fields.contains_key(F_INDUSTRY));
        assert_eq!(fields[F_NAME], json!("Acme Corp"));
    }

    #[test]
    fn test_encode_wraps_remote_logo_as_attachment() {
        let patch = SponsorPatch {
            logo: Some(Logo::Remote("https://cdn.example/new.png".to_string())),
            ..Default::default()
        };
        let fields = encode_patch(&patch).unwrap();
        assert_eq!(fields[F_LOGO], json!([{ "url": "https://cdn.example/new.png" }]));
    }

    #[test]
    fn test_encode_rejects_pending_logo() {
        let patch = SponsorPatch {
            logo: Some(Logo::Pending {
                bytes: vec![0xff, 0xd8],
                file_name: "logo.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
            }),
            ..Default::default()
        };
        assert!(encode_patch(&patch).is_err());
    }

    #[test]
    fn test_encode_patch_emits_only_present_fields() {
        let patch = SponsorPatch {
            contact_email: Some("new@acme.example".to_string()),
            ..Default::default()
        };
        let fields = encode_patch(&patch).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[F_CONTACT_EMAIL], json!("new@acme.example"));
    }

    #[test]
    fn test_round_trip_preserves_non_logo_fields() {
        let original: HashMap<String, Value> = vec![
            (F_NAME, json!("Acme Corp")),
            (F_INDUSTRY, json!("Aerospace")),
            (F_CONTACT_PERSON, json!("Dana Vale")),
            (F_CONTACT_EMAIL, json!("dana@acme.example")),
            (F_CONTACT_PHONE, json!("+1-555-0100")),
            (F_LEVEL, json!("Gold")),
            (F_CONTRACT_END, json!("2027-06-30")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let sponsor = decode(&RawRecord {
            id: "rec1".to_string(),
            fields: original.clone(),
        });
        let form = SponsorForm {
            name: sponsor.name,
            industry: sponsor.industry,
            contact_person: sponsor.contact_person,
            contact_email: sponsor.contact_email,
            contact_phone: sponsor.contact_phone,
            level: sponsor.level,
            contract_end: sponsor.contract_end,
            logo: None,
        };

        assert_eq!(encode_form(&form).unwrap(), original);
    }
}
