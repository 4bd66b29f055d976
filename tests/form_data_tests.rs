use enrollrows::config::EnrollmentConfig;
use enrollrows::dom::{Document, Dom};
use enrollrows::enrollment::{EnrollmentRows, AlertLog};
use enrollrows::form_data::decode_additional_enrollments;
use enrollrows::models::AdditionalEnrollment;

const PREFIX: &str = "additional_enrollments";

fn entry(index: u32, user: &str, role: &str) -> AdditionalEnrollment {
    AdditionalEnrollment {
        index,
        user: Some(user.to_string()),
        role: Some(role.to_string()),
    }
}

#[test]
fn test_decode_orders_by_index_across_gaps() {
    let body = "title=Intro&\
        additional_enrollments%5B3%5D%5Buser%5D=zed&additional_enrollments%5B3%5D%5Brole%5D=LIB&\
        additional_enrollments%5B1%5D%5Buser%5D=amy&additional_enrollments%5B1%5D%5Brole%5D=TA";
    let decoded = decode_additional_enrollments(body, PREFIX);
    assert_eq!(decoded, vec![entry(1, "amy", "TA"), entry(3, "zed", "LIB")]);
}

#[test]
fn test_decode_lowercases_and_trims_users() {
    let body = "additional_enrollments[1][user]=+JDoe+&additional_enrollments[1][role]=DES";
    let decoded = decode_additional_enrollments(body, PREFIX);
    assert_eq!(decoded, vec![entry(1, "jdoe", "DES")]);
}

#[test]
fn test_decode_drops_rows_with_blank_fields() {
    // Row 1 has a blank user, row 2 a blank role.
    let body = "additional_enrollments[1][user]=&additional_enrollments[1][role]=TA&\
        additional_enrollments[2][user]=bob&additional_enrollments[2][role]=+&\
        additional_enrollments[3][user]=cat&additional_enrollments[3][role]=LIB";
    let decoded = decode_additional_enrollments(body, PREFIX);
    assert_eq!(decoded, vec![entry(3, "cat", "LIB")]);
}

#[test]
fn test_decode_keeps_rows_without_role() {
    // The role placeholder is disabled, so an untouched select submits nothing.
    let body = "additional_enrollments[2][user]=Bob&\
        additional_enrollments[3][user]=cat&additional_enrollments[3][role]=LIB";
    let decoded = decode_additional_enrollments(body, PREFIX);
    assert_eq!(
        decoded,
        vec![
            AdditionalEnrollment {
                index: 2,
                user: Some("bob".to_string()),
                role: None,
            },
            entry(3, "cat", "LIB"),
        ]
    );
}

#[test]
fn test_decode_empty_body() {
    assert!(decode_additional_enrollments("", PREFIX).is_empty());
    assert!(decode_additional_enrollments("title=x&term=2024A", PREFIX).is_empty());
}

#[test]
fn test_decode_skips_non_numeric_index() {
    let body = "additional_enrollments[1][user]=amy&additional_enrollments[1][role]=TA&\
        additional_enrollments[new][user]=x&additional_enrollments[new][role]=LIB";
    let decoded = decode_additional_enrollments(body, PREFIX);
    assert_eq!(decoded, vec![entry(1, "amy", "TA")]);
}

#[test]
fn test_decode_accepts_quoted_field_names() {
    let body = "'additional_enrollments[2][user]'=kim&'additional_enrollments[2][role]'=TA";
    let decoded = decode_additional_enrollments(body, PREFIX);
    assert_eq!(decoded, vec![entry(2, "kim", "TA")]);
}

#[test]
fn test_rendered_rows_decode_back() {
    let config = EnrollmentConfig::default();
    let doc = Document::with_container(&config.container_id);
    let mut rows = EnrollmentRows::new(doc, config, AlertLog::new());
    for _ in 0..3 {
        rows.add().unwrap();
    }
    rows.remove_row("addEnroll-2").unwrap();

    // Fill in what a browser would submit for the remaining rows.
    let doc = rows.dom();
    let container = doc.element_by_id(&rows.config().container_id).unwrap();
    let mut pairs = Vec::new();
    for (row, (user, role)) in doc.children(&container).iter().zip([("Ann", "TA"), ("Ben", "LIB")]) {
        let input = doc.find(*row, |d, n| d.tag_name(n) == Some("input")).unwrap();
        let select = doc.find(*row, |d, n| d.tag_name(n) == Some("select")).unwrap();
        pairs.push(format!("{}={}", urlencoding::encode(&doc.attribute(&input, "name").unwrap()), user));
        pairs.push(format!("{}={}", urlencoding::encode(&doc.attribute(&select, "name").unwrap()), role));
    }
    let decoded = decode_additional_enrollments(&pairs.join("&"), PREFIX);
    assert_eq!(decoded, vec![entry(1, "ann", "TA"), entry(3, "ben", "LIB")]);
}
