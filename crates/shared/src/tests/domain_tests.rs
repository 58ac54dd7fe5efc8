use super::*;

fn sample_form() -> FormData {
    let mut form = FormData::default();
    form.set(FormField::StartupName, "Acme");
    form.set(FormField::Problem, "X");
    form.set(FormField::Solution, "Y");
    form
}

#[test]
fn set_touches_only_the_named_field() {
    let mut form = sample_form();
    for field in FormField::ALL {
        let before = form.clone();
        form.set(field, format!("value for {field}"));
        for other in FormField::ALL {
            if other == field {
                assert_eq!(form.get(other), format!("value for {field}"));
            } else {
                assert_eq!(form.get(other), before.get(other), "{other} leaked from {field}");
            }
        }
    }
}

#[test]
fn form_serializes_with_wire_names() {
    let mut form = sample_form();
    form.set(FormField::Usp, "fast");
    let value = serde_json::to_value(&form).expect("serialize");
    let object = value.as_object().expect("object");

    assert_eq!(object.len(), FormField::ALL.len());
    for field in FormField::ALL {
        assert!(object.contains_key(field.wire_name()), "missing {field}");
    }
    assert_eq!(object["USP"], "fast");
    assert_eq!(object["startup_name"], "Acme");
}

#[test]
fn field_names_parse_back() {
    for field in FormField::ALL {
        assert_eq!(field.wire_name().parse::<FormField>(), Ok(field));
    }
    assert_eq!(
        "usp".parse::<FormField>(),
        Err(DomainError::UnknownField("usp".to_string()))
    );
}

#[test]
fn missing_required_lists_blank_required_fields_in_order() {
    let mut form = FormData::default();
    form.set(FormField::Problem, "   ");
    form.set(FormField::Industry, "fintech");
    assert_eq!(
        form.missing_required(),
        vec![FormField::StartupName, FormField::Problem, FormField::Solution]
    );

    assert!(sample_form().missing_required().is_empty());
}

#[test]
fn file_stem_collapses_whitespace_runs() {
    let mut form = FormData::default();
    assert_eq!(form.file_stem(), None);

    form.set(FormField::StartupName, "  Acme   Rocket\tCo ");
    assert_eq!(form.file_stem().as_deref(), Some("Acme_Rocket_Co"));
}

#[test]
fn section_keys_are_ordered_and_parse_back() {
    let names: Vec<_> = SectionKey::ALL.iter().map(|key| key.as_str()).collect();
    assert_eq!(
        names,
        [
            "cover",
            "problem",
            "solution",
            "market",
            "product",
            "business_model",
            "competition",
            "team",
            "traction",
            "funding_needs"
        ]
    );
    for key in SectionKey::ALL {
        assert_eq!(key.as_str().parse::<SectionKey>(), Ok(key));
        assert_eq!(
            serde_json::to_value(key).expect("serialize"),
            serde_json::Value::String(key.as_str().to_string())
        );
    }
    assert!("appendix".parse::<SectionKey>().is_err());
}

#[test]
fn deck_from_service_always_has_ten_sections() {
    let deck: Deck = serde_json::from_str(
        r##"{"cover": "# Acme", "team": null, "bonus": "ignored", "market": "big"}"##,
    )
    .expect("deserialize");

    assert_eq!(deck.iter().count(), SectionKey::COUNT);
    assert_eq!(deck.get(SectionKey::Cover), "# Acme");
    assert_eq!(deck.get(SectionKey::Market), "big");
    assert_eq!(deck.get(SectionKey::Team), "");
    assert_eq!(deck.get(SectionKey::FundingNeeds), "");

    let with_metadata: Deck = serde_json::from_str(
        r##"{"cover": "# Acme", "meta": {"model": "gemini"}, "tokens": 42, "tags": ["a"], "problem": 7}"##,
    )
    .expect("deserialize with non-string extras");
    assert_eq!(with_metadata.get(SectionKey::Cover), "# Acme");
    assert_eq!(with_metadata.get(SectionKey::Problem), "");
    assert_eq!(with_metadata.iter().count(), SectionKey::COUNT);
}

#[test]
fn deck_serializes_every_section_in_order() {
    let deck: Deck = [(SectionKey::Team, "crew".to_string())]
        .into_iter()
        .collect();
    let text = serde_json::to_string(&deck).expect("serialize");

    assert!(text.starts_with(r#"{"cover":"","problem":"#));
    assert!(text.contains(r#""team":"crew""#));
    assert!(text.ends_with(r#""funding_needs":""}"#));

    let parsed: Deck = serde_json::from_str(&text).expect("round trip");
    assert_eq!(parsed, deck);
}

#[test]
fn blank_deck_detection_ignores_whitespace() {
    let mut deck = Deck::default();
    assert!(deck.is_blank());
    deck.set(SectionKey::Problem, " \n ");
    assert!(deck.is_blank());
    deck.set(SectionKey::Problem, "pain");
    assert!(!deck.is_blank());
}
