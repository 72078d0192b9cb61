//! Request validation for customer and address payloads.
//!
//! Every field is checked; all failures are reported together, keyed by field name.

use crate::model::{AddressInput, CustomerInput};
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Key used when the payload as a whole is unusable.
pub const ROOT_FIELD: &str = "_root";

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("numeric pattern compiles"));

/// Field name -> human readable message. No entry means the field passed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn root() -> Self {
        let mut errors = FieldErrors::default();
        errors.add(ROOT_FIELD, "Invalid payload");
        errors
    }

    fn add(&mut self, field: &str, message: &str) {
        self.0.insert(field.to_string(), message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

struct Rule {
    field: &'static str,
    min: usize,
    max: Option<usize>,
    numeric: bool,
    message: &'static str,
}

const FIRST_NAME: Rule = Rule {
    field: "first_name",
    min: 2,
    max: None,
    numeric: false,
    message: "First name is required (min 2 chars)",
};
const LAST_NAME: Rule = Rule {
    field: "last_name",
    min: 2,
    max: None,
    numeric: false,
    message: "Last name is required (min 2 chars)",
};
const PHONE_NUMBER: Rule = Rule {
    field: "phone_number",
    min: 7,
    max: Some(20),
    numeric: false,
    message: "Phone number must be 7-20 chars",
};
const ADDRESS_DETAILS: Rule = Rule {
    field: "address_details",
    min: 5,
    max: None,
    numeric: false,
    message: "Address details required (min 5 chars)",
};
const CITY: Rule = Rule {
    field: "city",
    min: 2,
    max: None,
    numeric: false,
    message: "City is required (min 2 chars)",
};
const STATE: Rule = Rule {
    field: "state",
    min: 2,
    max: None,
    numeric: false,
    message: "State is required (min 2 chars)",
};
const PIN_CODE: Rule = Rule {
    field: "pin_code",
    min: 3,
    max: Some(12),
    numeric: true,
    message: "PIN code must be 3-12 digits",
};

/// Trimmed text of a string or number field. Other JSON types count as missing.
fn field_text(obj: &Map<String, Value>, field: &str) -> Option<String> {
    match obj.get(field)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(number_text(n)),
        _ => None,
    }
}

/// Integral numbers print without a fraction even when sent as floats (`5.5e9` -> `5500000000`).
fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

/// Returns the trimmed value, or records the rule's message and returns an empty string.
fn check(obj: &Map<String, Value>, rule: &Rule, errors: &mut FieldErrors) -> String {
    let value = field_text(obj, rule.field).unwrap_or_default();
    let len = value.chars().count();
    let ok = len >= rule.min
        && rule.max.map_or(true, |max| len <= max)
        && (!rule.numeric || NUMERIC.is_match(&value));
    if !ok {
        errors.add(rule.field, rule.message);
    }
    value
}

pub struct RequestValidator;

impl RequestValidator {
    pub fn validate_customer(payload: &Value) -> Result<CustomerInput, FieldErrors> {
        let Value::Object(obj) = payload else {
            return Err(FieldErrors::root());
        };
        let mut errors = FieldErrors::default();
        let input = CustomerInput {
            first_name: check(obj, &FIRST_NAME, &mut errors),
            last_name: check(obj, &LAST_NAME, &mut errors),
            phone_number: check(obj, &PHONE_NUMBER, &mut errors),
        };
        if errors.is_empty() {
            Ok(input)
        } else {
            Err(errors)
        }
    }

    pub fn validate_address(payload: &Value) -> Result<AddressInput, FieldErrors> {
        let Value::Object(obj) = payload else {
            return Err(FieldErrors::root());
        };
        let mut errors = FieldErrors::default();
        let input = AddressInput {
            address_details: check(obj, &ADDRESS_DETAILS, &mut errors),
            city: check(obj, &CITY, &mut errors),
            state: check(obj, &STATE, &mut errors),
            pin_code: check(obj, &PIN_CODE, &mut errors),
        };
        if errors.is_empty() {
            Ok(input)
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn customer() -> Value {
        json!({ "first_name": "Jane", "last_name": "Doe", "phone_number": "5551234567" })
    }

    fn address() -> Value {
        json!({ "address_details": "12 Congress Ave", "city": "Austin", "state": "TX", "pin_code": "78701" })
    }

    fn with(mut base: Value, field: &str, value: Value) -> Value {
        base[field] = value;
        base
    }

    #[test]
    fn valid_customer_is_trimmed() {
        let input = RequestValidator::validate_customer(&with(customer(), "first_name", json!("  Jane  ")))
            .unwrap();
        assert_eq!(input.first_name, "Jane");
        assert_eq!(input.phone_number, "5551234567");
    }

    #[test]
    fn numeric_phone_is_accepted() {
        let input =
            RequestValidator::validate_customer(&with(customer(), "phone_number", json!(5551234567_i64)))
                .unwrap();
        assert_eq!(input.phone_number, "5551234567");
    }

    #[rstest]
    #[case("first_name", json!("J"))]
    #[case("first_name", json!("   "))]
    #[case("first_name", json!(null))]
    #[case("last_name", json!(["Doe"]))]
    #[case("phone_number", json!("123456"))]
    #[case("phone_number", json!("123456789012345678901"))]
    fn customer_field_rejected(#[case] field: &str, #[case] value: Value) {
        let errors = RequestValidator::validate_customer(&with(customer(), field, value)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get(field).is_some());
    }

    #[test]
    fn all_customer_errors_are_collected() {
        let errors = RequestValidator::validate_customer(&json!({})).unwrap_err();
        assert_eq!(errors.len(), 3);
        for field in ["first_name", "last_name", "phone_number"] {
            assert!(errors.get(field).is_some(), "{field}");
        }
    }

    #[rstest]
    #[case(json!("not an object"))]
    #[case(json!([1, 2]))]
    #[case(json!(null))]
    fn non_object_is_root_error(#[case] payload: Value) {
        let errors = RequestValidator::validate_address(&payload).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(ROOT_FIELD), Some("Invalid payload"));
        assert!(RequestValidator::validate_customer(&payload).is_err());
    }

    #[rstest]
    #[case("address_details", json!("12 A"))]
    #[case("city", json!("A"))]
    #[case("state", json!(""))]
    #[case("pin_code", json!("ab"))]
    #[case("pin_code", json!("12"))]
    #[case("pin_code", json!("1234567890123"))]
    #[case("pin_code", json!("78 701"))]
    fn address_field_rejected(#[case] field: &str, #[case] value: Value) {
        let errors = RequestValidator::validate_address(&with(address(), field, value)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get(field).is_some());
    }

    #[test]
    fn numeric_pin_code_number_is_accepted() {
        let input = RequestValidator::validate_address(&with(address(), "pin_code", json!(560001))).unwrap();
        assert_eq!(input.pin_code, "560001");
    }

    #[rstest]
    #[case(json!(5.5e9), "5500000000")]
    #[case(json!(5551234567.0), "5551234567")]
    #[case(json!(18446744073709551615_u64), "18446744073709551615")]
    fn float_phone_numbers_have_no_fraction(#[case] phone: Value, #[case] expected: &str) {
        let input = RequestValidator::validate_customer(&with(customer(), "phone_number", phone)).unwrap();
        assert_eq!(input.phone_number, expected);
    }

    #[test]
    fn fractional_pin_code_is_not_numeric() {
        let errors = RequestValidator::validate_address(&with(address(), "pin_code", json!(7870.5))).unwrap_err();
        assert!(errors.get("pin_code").is_some());
        let input = RequestValidator::validate_address(&with(address(), "pin_code", json!(78701.0))).unwrap();
        assert_eq!(input.pin_code, "78701");
    }

    #[test]
    fn errors_serialize_as_flat_map() {
        let errors = RequestValidator::validate_address(&with(address(), "pin_code", json!("ab"))).unwrap_err();
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({ "pin_code": "PIN code must be 3-12 digits" })
        );
    }
}
