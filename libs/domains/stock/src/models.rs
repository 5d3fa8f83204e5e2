use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{StockError, StockResult};

/// A sellable or rentable inventory unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Stock {
    pub stock_id: i32,
    pub project_id: String,
    pub property_id: String,
    /// e.g. `residential`, `commercial`
    pub property_type: String,
    /// Magnitude as supplied; numbers are stored in their text form
    pub size: String,
    /// Base selling price
    pub bsp: Option<f64>,
    pub broker_id: Option<String>,
    pub remarks: Option<String>,
    pub on_hold_status: Option<bool>,
    pub hold_till_date: Option<DateTime<Utc>>,
    pub hold_remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stock row with the display names of the records it references.
///
/// A reference that does not resolve yields `null`, never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StockDetails {
    #[serde(flatten)]
    pub stock: Stock,
    pub project_name: Option<String>,
    pub property_name: Option<String>,
    pub broker_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub project_id: String,
    pub project_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Property {
    pub property_id: String,
    pub property_name: String,
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Broker {
    pub broker_id: String,
    pub broker_name: String,
}

/// Body of `POST /api/stock`.
///
/// Required fields are optional here so that every missing one can be
/// reported in a single message.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CreateStock {
    #[serde(default, deserialize_with = "lenient::option_string")]
    #[validate(required, custom(function = "not_blank"))]
    #[schema(example = "P1")]
    pub project_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::option_string")]
    #[validate(required, custom(function = "not_blank"))]
    #[schema(example = "PR1")]
    pub property_id: Option<String>,

    #[validate(required, custom(function = "not_blank"))]
    #[schema(example = "residential")]
    pub property_type: Option<String>,

    #[serde(default, deserialize_with = "lenient::option_string")]
    #[validate(required, custom(function = "not_blank"))]
    #[schema(example = "1200")]
    pub size: Option<String>,

    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub bsp: Option<f64>,

    #[serde(default, deserialize_with = "lenient::option_string")]
    pub broker_id: Option<String>,

    pub remarks: Option<String>,

    pub on_hold_status: Option<bool>,

    /// `YYYY-MM-DD` or RFC 3339; `null`, `""`, `false` and `0` mean no hold date
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2025-06-30")]
    pub hold_till_date: Option<Value>,

    pub hold_remarks: Option<String>,
}

/// Fields of [`CreateStock`] that must be present and non-blank.
pub const REQUIRED_FIELDS: [&str; 4] = ["project_id", "property_id", "property_type", "size"];

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Body of `PUT /api/stock`.
///
/// Every field other than `stock_id` is a [`Patch`]: omitted leaves the
/// stored value alone, `null` clears it, a value replaces it.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateStock {
    /// JSON number or numeric string
    #[serde(default)]
    #[schema(value_type = Option<i32>, example = 42)]
    pub stock_id: Option<Value>,

    #[serde(default, deserialize_with = "lenient::patch_string")]
    #[schema(value_type = Option<String>)]
    pub project_id: Patch<String>,

    #[serde(default, deserialize_with = "lenient::patch_string")]
    #[schema(value_type = Option<String>)]
    pub property_id: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub property_type: Patch<String>,

    #[serde(default, deserialize_with = "lenient::patch_string")]
    #[schema(value_type = Option<String>)]
    pub size: Patch<String>,

    #[serde(default, deserialize_with = "lenient::patch_f64")]
    #[schema(value_type = Option<f64>)]
    pub bsp: Patch<f64>,

    #[serde(default, deserialize_with = "lenient::patch_string")]
    #[schema(value_type = Option<String>)]
    pub broker_id: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub remarks: Patch<String>,

    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub on_hold_status: Patch<bool>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub hold_till_date: Patch<Value>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub hold_remarks: Patch<String>,
}

/// Tri-state field update.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    /// Field omitted
    Unchanged,
    /// Field sent as `null`
    Clear,
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unchanged
    }
}

impl<T> Patch<T> {
    /// `None` when unchanged, `Some(None)` when cleared.
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Patch::Unchanged => None,
            Patch::Clear => Some(None),
            Patch::Set(value) => Some(Some(value)),
        }
    }

    pub fn apply_to(self, target: &mut Option<T>) {
        if let Some(value) = self.into_option() {
            *target = value;
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Patch::Clear, Patch::Set)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

/// Validated input for inserting a stock row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStock {
    pub project_id: String,
    pub property_id: String,
    pub property_type: String,
    pub size: String,
    pub bsp: Option<f64>,
    pub broker_id: Option<String>,
    pub remarks: Option<String>,
    pub on_hold_status: Option<bool>,
    pub hold_till_date: Option<DateTime<Utc>>,
    pub hold_remarks: Option<String>,
}

/// Validated partial update. NOT NULL columns can only be replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StockPatch {
    pub project_id: Option<String>,
    pub property_id: Option<String>,
    pub property_type: Option<String>,
    pub size: Option<String>,
    pub bsp: Patch<f64>,
    pub broker_id: Patch<String>,
    pub remarks: Patch<String>,
    pub on_hold_status: Patch<bool>,
    pub hold_till_date: Patch<DateTime<Utc>>,
    pub hold_remarks: Patch<String>,
}

impl StockPatch {
    /// Apply to `stock` in place; `updated_at` is left to the caller.
    pub fn apply(self, stock: &mut Stock) {
        if let Some(project_id) = self.project_id {
            stock.project_id = project_id;
        }
        if let Some(property_id) = self.property_id {
            stock.property_id = property_id;
        }
        if let Some(property_type) = self.property_type {
            stock.property_type = property_type;
        }
        if let Some(size) = self.size {
            stock.size = size;
        }
        self.bsp.apply_to(&mut stock.bsp);
        self.broker_id.apply_to(&mut stock.broker_id);
        self.remarks.apply_to(&mut stock.remarks);
        self.on_hold_status.apply_to(&mut stock.on_hold_status);
        self.hold_till_date.apply_to(&mut stock.hold_till_date);
        self.hold_remarks.apply_to(&mut stock.hold_remarks);
    }
}

/// Interpret a `hold_till_date` input.
///
/// `null`, `""`, `false` and `0` mean no date. Strings may be `YYYY-MM-DD`
/// (midnight UTC), RFC 3339, or `YYYY-MM-DDTHH:MM:SS` (taken as UTC); other
/// numbers are milliseconds since the Unix epoch. Anything else is rejected
/// rather than stored as an invalid date.
pub fn normalize_hold_date(value: &Value) -> StockResult<Option<DateTime<Utc>>> {
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::String(raw) => {
            let raw = raw.trim();
            if raw.is_empty() {
                return Ok(None);
            }
            parse_date_string(raw).map(Some).ok_or_else(invalid_hold_date)
        }
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(None),
            Some(millis) => DateTime::from_timestamp_millis(millis)
                .map(Some)
                .ok_or_else(invalid_hold_date),
            None if n.as_f64() == Some(0.0) => Ok(None),
            None => Err(invalid_hold_date()),
        },
        Value::Bool(true) | Value::Array(_) | Value::Object(_) => Err(invalid_hold_date()),
    }
}

fn parse_date_string(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.and_utc())
}

fn invalid_hold_date() -> StockError {
    StockError::Validation("hold_till_date must be a valid date".to_string())
}

/// Parse a caller-supplied stock identifier.
///
/// Integral decimal forms such as `"1.0"` or `"1e2"` name the same row as
/// their integer value; fractional or out-of-range values are rejected.
pub fn parse_stock_id(raw: &str) -> StockResult<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(StockError::Validation("stock_id is required".to_string()));
    }
    raw.parse::<i32>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().and_then(integral_id))
        .ok_or_else(invalid_stock_id)
}

fn integral_id(value: f64) -> Option<i32> {
    let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    (value.is_finite() && value.fract() == 0.0 && in_range).then_some(value as i32)
}

fn invalid_stock_id() -> StockError {
    StockError::Validation("stock_id must be a numeric identifier".to_string())
}

/// [`parse_stock_id`] for a JSON body value, which may be a number or a string.
pub fn stock_id_from_value(value: Option<&Value>) -> StockResult<i32> {
    match value {
        None | Some(Value::Null) => Err(StockError::Validation("stock_id is required".to_string())),
        Some(Value::String(raw)) => parse_stock_id(raw),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(id) => i32::try_from(id).ok(),
            None => n.as_f64().and_then(integral_id),
        }
        .ok_or_else(invalid_stock_id),
        Some(_) => Err(invalid_stock_id()),
    }
}

/// Deserializers that accept a JSON number wherever text is stored, and a
/// numeric string wherever a number is stored.
mod lenient {
    use super::Patch;
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Str(String),
        Int(i64),
        Float(f64),
    }

    impl From<Text> for String {
        fn from(value: Text) -> Self {
            match value {
                Text::Str(s) => s,
                Text::Int(n) => n.to_string(),
                Text::Float(n) => n.to_string(),
            }
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Float(f64),
        Str(String),
    }

    fn to_f64<E: Error>(value: Number) -> Result<Option<f64>, E> {
        match value {
            Number::Float(n) => Ok(Some(n)),
            Number::Str(s) if s.trim().is_empty() => Ok(None),
            Number::Str(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| E::custom(format!("expected a number, got \"{}\"", s))),
        }
    }

    pub fn option_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Text>::deserialize(deserializer)?.map(String::from))
    }

    pub fn patch_string<'de, D>(deserializer: D) -> Result<Patch<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(option_string(deserializer)?.into())
    }

    pub fn option_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Number>::deserialize(deserializer)? {
            Some(value) => to_f64(value),
            None => Ok(None),
        }
    }

    /// A blank string clears the price, like `null`.
    pub fn patch_f64<'de, D>(deserializer: D) -> Result<Patch<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(option_f64(deserializer)?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_create_accepts_numeric_size_and_ids() {
        let input: CreateStock = serde_json::from_value(json!({
            "project_id": 7,
            "property_id": "PR1",
            "property_type": "residential",
            "size": 1200,
            "bsp": "4500000"
        }))
        .unwrap();

        assert_eq!(input.project_id.as_deref(), Some("7"));
        assert_eq!(input.size.as_deref(), Some("1200"));
        assert_eq!(input.bsp, Some(4_500_000.0));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_create_validation_flags_missing_and_blank() {
        let input: CreateStock = serde_json::from_value(json!({
            "project_id": "P1",
            "property_id": "   ",
            "size": null
        }))
        .unwrap();

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("property_id"));
        assert!(fields.contains_key("property_type"));
        assert!(fields.contains_key("size"));
        assert!(!fields.contains_key("project_id"));
    }

    #[test]
    fn test_update_distinguishes_omitted_null_and_value() {
        let input: UpdateStock = serde_json::from_value(json!({
            "stock_id": 3,
            "remarks": null,
            "bsp": 10.5
        }))
        .unwrap();

        assert_eq!(input.remarks, Patch::Clear);
        assert_eq!(input.bsp, Patch::Set(10.5));
        assert_eq!(input.hold_remarks, Patch::Unchanged);
        assert_eq!(input.size, Patch::Unchanged);
    }

    #[test]
    fn test_update_blank_price_clears() {
        let input: UpdateStock = serde_json::from_value(json!({"bsp": ""})).unwrap();
        assert_eq!(input.bsp, Patch::Clear);
    }

    #[test]
    fn test_non_numeric_price_is_rejected() {
        let result = serde_json::from_value::<CreateStock>(json!({"bsp": "a lot"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_hold_date_falsy_inputs_mean_none() {
        for value in [json!(null), json!(""), json!("  "), json!(false), json!(0), json!(0.0)] {
            assert_eq!(normalize_hold_date(&value).unwrap(), None, "{value}");
        }
    }

    #[test]
    fn test_hold_date_accepted_formats() {
        let midnight = Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).unwrap();

        assert_eq!(normalize_hold_date(&json!("2025-06-30")).unwrap(), Some(midnight));
        assert_eq!(
            normalize_hold_date(&json!("2025-06-30T00:00:00Z")).unwrap(),
            Some(midnight)
        );
        assert_eq!(
            normalize_hold_date(&json!("2025-06-30T05:30:00+05:30")).unwrap(),
            Some(midnight)
        );
        assert_eq!(
            normalize_hold_date(&json!("2025-06-30T00:00:00")).unwrap(),
            Some(midnight)
        );
        assert_eq!(
            normalize_hold_date(&json!(midnight.timestamp_millis())).unwrap(),
            Some(midnight)
        );
    }

    #[test]
    fn test_hold_date_rejects_garbage() {
        for value in [json!("next week"), json!("2025-13-01"), json!(true), json!([1]), json!({})] {
            let err = normalize_hold_date(&value).unwrap_err();
            assert!(matches!(err, StockError::Validation(_)), "{value}");
        }
    }

    #[test]
    fn test_parse_stock_id() {
        assert_eq!(parse_stock_id(" 42 ").unwrap(), 42);
        assert_eq!(
            parse_stock_id("").unwrap_err().to_string(),
            "stock_id is required"
        );
        assert_eq!(
            parse_stock_id("abc").unwrap_err().to_string(),
            "stock_id must be a numeric identifier"
        );
    }

    #[test]
    fn test_parse_stock_id_accepts_integral_decimals() {
        assert_eq!(parse_stock_id("1.0").unwrap(), 1);
        assert_eq!(parse_stock_id("7.000").unwrap(), 7);
        assert_eq!(parse_stock_id("1e2").unwrap(), 100);

        for rejected in ["1.5", "NaN", "inf", "3000000000", "1.0.0"] {
            let err = parse_stock_id(rejected).unwrap_err();
            assert!(matches!(err, StockError::Validation(_)), "{rejected}");
        }
    }

    #[test]
    fn test_stock_id_from_value() {
        assert_eq!(stock_id_from_value(Some(&json!(5))).unwrap(), 5);
        assert_eq!(stock_id_from_value(Some(&json!("5"))).unwrap(), 5);
        assert!(stock_id_from_value(None).is_err());
        assert!(stock_id_from_value(Some(&json!(null))).is_err());
        assert_eq!(stock_id_from_value(Some(&json!(2.0))).unwrap(), 2);
        assert_eq!(stock_id_from_value(Some(&json!("2.0"))).unwrap(), 2);
        assert!(stock_id_from_value(Some(&json!(1.5))).is_err());
        assert!(stock_id_from_value(Some(&json!(3_000_000_000i64))).is_err());
        assert!(stock_id_from_value(Some(&json!(true))).is_err());
    }

    #[test]
    fn test_patch_apply_leaves_unchanged_fields() {
        let now = Utc::now();
        let mut stock = Stock {
            stock_id: 1,
            project_id: "P1".into(),
            property_id: "PR1".into(),
            property_type: "residential".into(),
            size: "1200".into(),
            bsp: Some(100.0),
            broker_id: Some("B1".into()),
            remarks: Some("corner unit".into()),
            on_hold_status: None,
            hold_till_date: None,
            hold_remarks: None,
            created_at: now,
            updated_at: now,
        };

        StockPatch {
            size: Some("1300".into()),
            broker_id: Patch::Clear,
            on_hold_status: Patch::Set(true),
            ..Default::default()
        }
        .apply(&mut stock);

        assert_eq!(stock.size, "1300");
        assert_eq!(stock.broker_id, None);
        assert_eq!(stock.on_hold_status, Some(true));
        assert_eq!(stock.bsp, Some(100.0));
        assert_eq!(stock.remarks.as_deref(), Some("corner unit"));
        assert_eq!(stock.project_id, "P1");
    }
}
