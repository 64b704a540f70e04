use super::*;

const PROFILE: &str = include_str!("../tests/fixtures/profile_page.html");

#[test]
fn extracts_name_and_parsed_parts() {
    let record = extract_record(PROFILE).unwrap();
    assert_eq!(record.full_name_raw, "Dr. Jane Ann Doe, DDS");
    assert_eq!(record.name.first, "Jane");
    assert_eq!(record.name.middle, "Ann");
    assert_eq!(record.name.last, "Doe");
}

#[test]
fn extracts_specialties_trimmed() {
    let record = extract_record(PROFILE).unwrap();
    assert_eq!(
        record.specialties,
        vec!["General Dentistry", "Pediatric Dentistry"]
    );
}

#[test]
fn address_blocks_without_second_span_are_skipped() {
    let record = extract_record(PROFILE).unwrap();
    assert_eq!(record.addresses.len(), 2);
    assert_eq!(record.addresses[0].street, "1200 Main St Suite 4");
    assert_eq!(record.addresses[0].city, "Austin");
    assert_eq!(record.addresses[0].state_code, "TX");
    assert_eq!(record.addresses[0].zip_code, "78701");
    assert_eq!(record.addresses[1].city, "Round Rock");
    assert_eq!(record.addresses[1].zip_code, "");
}

#[test]
fn phone_numbers_come_from_existing_patient_links_only() {
    let record = extract_record(PROFILE).unwrap();
    assert_eq!(record.phone_numbers, vec!["5125550100", "(512) 555-0199"]);
}

#[test]
fn insurance_labels_keep_details_and_label_only_entries() {
    let record = extract_record(PROFILE).unwrap();
    let labels: Vec<&str> = record.insurances.iter().map(|(l, _)| l).collect();
    assert_eq!(labels, vec!["Aetna", "Medicaid", "Cigna"]);
    assert_eq!(
        record.insurances.get("Aetna").unwrap(),
        &["Aetna Dental PPO".to_string(), "Aetna DMO".to_string()]
    );
    assert_eq!(record.insurances.get("Medicaid"), Some(&[][..]));
    assert_eq!(
        record.insurances.get("Cigna").unwrap(),
        &["Cigna Dental 1500".to_string()]
    );
}

#[test]
fn missing_name_block_is_a_mandatory_field_error() {
    let html = r#"<html><body><address><span>x</span><span>1 A St, Reno, NV 89501</span></address></body></html>"#;
    let err = extract_record(html).unwrap_err();
    assert!(
        matches!(err, ScraperError::MissingField { field: "name" }),
        "expected MissingField(name), got: {err:?}"
    );
}

#[test]
fn name_only_page_yields_empty_optional_sections() {
    let html = r#"<div class="ProviderLeadStyleTwo-title">Alan Grant</div>"#;
    let record = extract_record(html).unwrap();
    assert_eq!(record.name.first, "Alan");
    assert_eq!(record.name.last, "Grant");
    assert!(record.addresses.is_empty());
    assert!(record.specialties.is_empty());
    assert!(record.phone_numbers.is_empty());
    assert!(record.insurances.is_empty());
}

#[test]
fn unparseable_name_still_yields_record() {
    let html = r#"<div class="ProviderLeadStyleTwo-title">DDS, PhD</div>"#;
    let record = extract_record(html).unwrap();
    assert_eq!(record.full_name_raw, "DDS, PhD");
    assert!(record.name.is_empty());
}

#[test]
fn line_breaks_inside_name_are_removed() {
    let html = "<div class=\"ProviderLeadStyleTwo-title\">Alan\nGrant</div>";
    let record = extract_record(html).unwrap();
    assert_eq!(record.full_name_raw, "AlanGrant");
}

#[test]
fn empty_article_adds_no_entry() {
    let html = r#"
        <div class="ProviderLeadStyleTwo-title">Alan Grant</div>
        <ul class="ProviderInsuranceAccepted-description">
          <li><label>Delta Dental</label><article></article></li>
        </ul>"#;
    let record = extract_record(html).unwrap();
    assert!(record.insurances.get("Delta Dental").is_none());
    assert!(record.insurances.is_empty());
}

#[test]
fn empty_article_keeps_details_already_collected() {
    let html = r#"
        <div class="ProviderLeadStyleTwo-title">Alan Grant</div>
        <ul class="ProviderInsuranceAccepted-description">
          <li><label>Delta Dental</label><article><div>PPO</div></article></li>
          <li><label>Delta Dental</label><article></article></li>
        </ul>"#;
    let record = extract_record(html).unwrap();
    assert_eq!(
        record.insurances.get("Delta Dental").unwrap(),
        &["PPO".to_string()]
    );
}

#[test]
fn label_without_article_resets_details() {
    let html = r#"
        <div class="ProviderLeadStyleTwo-title">Alan Grant</div>
        <ul class="ProviderInsuranceAccepted-description">
          <li><label>Delta Dental</label><article><div>PPO</div></article></li>
          <li><label>Delta Dental</label></li>
        </ul>"#;
    let record = extract_record(html).unwrap();
    assert_eq!(record.insurances.get("Delta Dental"), Some(&[][..]));
}

#[test]
fn phone_link_with_missing_or_empty_data_phone_is_used() {
    let html = r#"
        <div class="ProviderLeadStyleTwo-title">Alan Grant</div>
        <div class="ProviderLocationsModuleAlternative-buttons">
          <a href="tel:5551111" data-analytics="make-appointment__phone--existing">Call</a>
        </div>
        <div class="ProviderLocationsModuleAlternative-buttons">
          <a href="tel:5552222" data-analytics="make-appointment__phone--existing" data-phone="">Call</a>
        </div>"#;
    let record = extract_record(html).unwrap();
    assert_eq!(record.phone_numbers, vec!["5551111", "5552222"]);
}

#[test]
fn phone_link_with_populated_data_phone_is_skipped() {
    let html = r#"
        <div class="ProviderLeadStyleTwo-title">Alan Grant</div>
        <div class="ProviderLocationsModuleAlternative-buttons">
          <a href="tel:5559999" data-analytics="make-appointment__phone--existing" data-phone="5559999">Call</a>
          <a href="tel:5551111" data-analytics="make-appointment__phone--existing">Call</a>
        </div>
        <div class="ProviderLocationsModuleAlternative-buttons">
          <a href="tel:5553333" data-analytics="make-appointment__phone--existing" data-phone="5553333">Call</a>
        </div>"#;
    let record = extract_record(html).unwrap();
    assert_eq!(record.phone_numbers, vec!["5551111"]);
}

#[test]
fn extraction_is_idempotent() {
    let document = Html::parse_document(PROFILE);
    let first = extract_from_document(&document).unwrap();
    let second = extract_from_document(&document).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, extract_record(PROFILE).unwrap());
}
