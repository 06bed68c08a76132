use super::*;


#[test]
fn test_brand_from_tag() {
    assert_eq!(CardBrand::from_tag("visa"), Some(CardBrand::Visa));
    assert_eq!(CardBrand::from_tag("MasterCard"), Some(CardBrand::Mastercard));
    assert_eq!(CardBrand::from_tag("AMEX"), Some(CardBrand::Amex));
    assert_eq!(CardBrand::from_tag("Discover"), Some(CardBrand::Discover));
    assert_eq!(CardBrand::from_tag(""), None);
    assert_eq!(CardBrand::from_tag("jcb"), None);
}

#[test]
fn test_brand_tag_roundtrip() {
    for brand in [CardBrand::Visa, CardBrand::Mastercard, CardBrand::Amex, CardBrand::Discover] {
        assert_eq!(CardBrand::from_tag(brand.as_str()), Some(brand));
        assert_eq!(brand.to_string(), brand.as_str());
    }
}

#[test]
fn test_wipe_empties_every_field() {
    let mut card = CardRecord::new("4111111111111111", "555", "11/2030", CardBrand::Visa);
    card.wipe();

    assert!(card.number().is_empty());
    assert!(card.cvv().is_empty());
    assert!(card.expiry().is_empty());
    assert!(card.brand().is_empty());
}

#[test]
fn test_last_four() {
    let card = CardRecord::new("4111111111111234", "555", "11/2030", "visa");
    assert_eq!(card.last_four(), "1234");

    let short = CardRecord::new("12", "555", "11/2030", "visa");
    assert_eq!(short.last_four(), "12");
}

#[test]
fn test_debug_redacts_card_data() {
    let card = CardRecord::new("4111111111111234", "987", "11/2030", "visa");
    let debug = format!("{card:?}");

    assert!(debug.contains("****1234"));
    assert!(!debug.contains("4111111111111234"));
    assert!(!debug.contains("987"));
    assert!(!debug.contains("2030"));
}

#[test]
fn test_card_wire_fields() {
    let card = CardRecord::new("4111111111111111", "555", "11/2030", "visa");
    let mut params = crate::fields::FormParams::new();
    crate::fields::map_fields(&card, &mut params);

    assert_eq!(params.len(), 3);
    assert_eq!(params.get("x_card_num"), Some("4111111111111111"));
    assert_eq!(params.get("x_card_code"), Some("555"));
    assert_eq!(params.get("x_exp_date"), Some("11/2030"));
    assert!(!params.contains_key("x_method"), "brand is never sent");
}
