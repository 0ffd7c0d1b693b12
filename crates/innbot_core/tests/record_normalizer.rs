use innbot_core::{
    format_address, format_name, format_numbers, AddressShapeError, KeywordRule, NormalizeError,
    RawRecord, RecordNormalizer,
};

fn sample_record() -> RawRecord {
    RawRecord::new(
        "ОБЩЕСТВО С ОГРАНИЧЕННОЙ ОТВЕТСТВЕННОСТЬЮ \"РОМАШКА\"",
        "1027700000001",
        "7707083893",
        "770701001",
        "101000, ГОРОД МОСКВА, УЛИЦА ТВЕРСКАЯ, ДОМ 7",
    )
}

#[test]
fn normalize_builds_all_three_fields() {
    let canonical = RecordNormalizer::new()
        .normalize(&sample_record())
        .expect("sample record should normalize");

    assert_eq!(
        canonical.final_name,
        "общество с ограниченной ответственностью «РОМАШКА» "
    );
    assert_eq!(
        canonical.final_numbers,
        "(ОГРН 1027700000001, ИНН 7707083893, КПП 770701001)\n\n"
    );
    assert_eq!(
        canonical.final_address,
        "Адрес: улица   Тверская Дом 7, город Москва, Россия, 101000"
    );
}

#[test]
fn message_concatenates_fields_without_extra_separators() {
    let canonical = RecordNormalizer::new()
        .normalize(&sample_record())
        .expect("sample record should normalize");

    let expected = "общество с ограниченной ответственностью «РОМАШКА» \
                    (ОГРН 1027700000001, ИНН 7707083893, КПП 770701001)\n\n\
                    Адрес: улица   Тверская Дом 7, город Москва, Россия, 101000";
    assert_eq!(canonical.message(), expected);
    assert_eq!(canonical.to_string(), expected);
    assert_eq!(canonical.into_message(), expected);
}

#[test]
fn normalize_is_repeatable() {
    let normalizer = RecordNormalizer::new();
    let record = sample_record();
    let first = normalizer.normalize(&record).unwrap();
    let second = normalizer.normalize(&record).unwrap();
    assert_eq!(first, second);
}

#[test]
fn short_name_is_verbatim_text_after_first_quote() {
    for (raw, prefix, short) in [
        ("LEGAL FORM \"SHORT NAME\"", "LEGAL FORM ", "SHORT NAME"),
        ("ПАО \"Сбербанк\"", "ПАО ", "Сбербанк"),
        ("ООО \"Mixed Case 42\"", "ООО ", "Mixed Case 42"),
    ] {
        assert_eq!(
            format_name(raw),
            format!("{}«{}» ", prefix.to_lowercase(), short)
        );
    }
}

#[test]
fn numbers_pass_through_unchanged() {
    assert_eq!(
        format_numbers("1234567890123", "1234567890", "123456789"),
        "(ОГРН 1234567890123, ИНН 1234567890, КПП 123456789)\n\n"
    );
    assert_eq!(
        format_numbers("00", "0", "000"),
        "(ОГРН 00, ИНН 0, КПП 000)\n\n"
    );
}

#[test]
fn street_rule_outranks_embankment_rule() {
    let formatted =
        format_address("190000, ГОРОД САНКТ-ПЕТЕРБУРГ, УЛИЦА ДВОРЦОВАЯ, НАБЕРЕЖНАЯ, 32")
            .expect("address should format");
    assert!(formatted.starts_with("Адрес: улица "));
    assert!(formatted.contains("Набережная"));
    assert!(!formatted.contains("набережная"));
}

#[test]
fn custom_rules_extend_keyword_routing() {
    let mut rules = innbot_core::DEFAULT_KEYWORD_RULES.to_vec();
    rules.push(KeywordRule::lowercase("Проспект"));
    let normalizer = RecordNormalizer::with_rules(rules);

    let mut record = sample_record();
    record.address = "125009, ГОРОД МОСКВА, ПРОСПЕКТ МИРА, 1".to_string();
    let canonical = normalizer.normalize(&record).unwrap();
    assert_eq!(
        canonical.final_address,
        "Адрес: проспект Мира 1, город Москва, Россия, 125009"
    );

    let canonical = RecordNormalizer::new().normalize(&record).unwrap();
    assert_eq!(
        canonical.final_address,
        "Адрес:Проспект Мира 1, город Москва, Россия, 125009"
    );
}

#[test]
fn two_segment_address_fails_normalization() {
    let mut record = sample_record();
    record.address = "123456, CITY NAME".to_string();

    let err = RecordNormalizer::new()
        .normalize(&record)
        .expect_err("address without street must fail");
    assert_eq!(err, NormalizeError::Address(AddressShapeError::MissingStreet));
}

#[test]
fn raw_record_reads_registry_short_keys() {
    let record: RawRecord = serde_json::from_value(serde_json::json!({
        "n": "АО \"ТЕСТ\"",
        "o": "1027700000001",
        "i": "7707083893",
        "p": "770701001",
        "a": "101000, ГОРОД МОСКВА, ПЕРЕУЛОК ЛУБЯНСКИЙ, 5",
        "g": "ГЕНЕРАЛЬНЫЙ ДИРЕКТОР"
    }))
    .expect("row should deserialize");

    assert_eq!(record.ogrn, "1027700000001");
    assert_eq!(record.kpp, "770701001");
    assert_eq!(
        format_address(&record.address).unwrap(),
        "Адрес: переулок Лубянский 5, город Москва, Россия, 101000"
    );
}
