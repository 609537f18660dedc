use crate::domain::{CreateUserRequest, Payload, PayloadKind, ProductItem, Record, TransformResult};
use crate::utils::error::{PayloadError, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Typed payloads plus the input keys that were dropped while decoding them.
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    pub items: Vec<T>,
    pub dropped_fields: Vec<String>,
}

/// Splits a JSON document into records. An array yields one record per
/// element, a lone object yields a single record.
pub fn parse_records(kind: PayloadKind, bytes: &[u8]) -> Result<Vec<Record>> {
    let document: Value = serde_json::from_slice(bytes)?;

    match document {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(data) => Ok(Record { index, data }),
                other => Err(not_an_object(kind, index, &other)),
            })
            .collect(),
        Value::Object(data) => Ok(vec![Record { index: 0, data }]),
        other => Err(not_an_object(kind, 0, &other)),
    }
}

fn not_an_object(kind: PayloadKind, index: usize, value: &Value) -> PayloadError {
    let found = match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    PayloadError::DecodeError {
        kind: kind.to_string(),
        index,
        message: format!("expected a JSON object, found {}", found),
    }
}

pub fn decode<T: Payload>(records: Vec<Record>, reject_unknown_fields: bool) -> Result<Decoded<T>> {
    let mut items = Vec::with_capacity(records.len());
    let mut dropped = BTreeSet::new();

    for Record { index, mut data } in records {
        let unknown: Vec<String> = data
            .keys()
            .filter(|key| !T::FIELDS.contains(&key.as_str()))
            .cloned()
            .collect();

        if let Some(field) = unknown.first() {
            if reject_unknown_fields {
                return Err(PayloadError::UnknownFieldError {
                    kind: T::KIND.to_string(),
                    index,
                    field: field.clone(),
                });
            }
            tracing::warn!(
                "Dropping unknown fields {:?} from {} #{}",
                unknown,
                T::KIND,
                index
            );
            for key in unknown {
                data.remove(&key);
                dropped.insert(key);
            }
        }

        let item = serde_json::from_value(Value::Object(data)).map_err(|e| {
            PayloadError::DecodeError {
                kind: T::KIND.to_string(),
                index,
                message: e.to_string(),
            }
        })?;
        items.push(item);
    }

    Ok(Decoded {
        items,
        dropped_fields: dropped.into_iter().collect(),
    })
}

/// Canonical form: a pretty-printed JSON array with every field present.
pub fn to_json<T: Serialize>(items: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

/// Header row of wire names followed by one row per payload.
pub fn to_delimited<T: Payload>(items: &[T], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(T::FIELDS)?;
    for item in items {
        writer.write_record(item.row())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PayloadError::ProcessingError {
            message: format!("Failed to flush delimited output: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| PayloadError::ProcessingError {
        message: format!("Delimited output is not UTF-8: {}", e),
    })
}

fn convert<T: Payload>(records: Vec<Record>, reject_unknown_fields: bool) -> Result<TransformResult> {
    let decoded = decode::<T>(records, reject_unknown_fields)?;

    Ok(TransformResult {
        kind: T::KIND,
        record_count: decoded.items.len(),
        json_output: to_json(&decoded.items)?,
        csv_output: to_delimited(&decoded.items, b',')?,
        tsv_output: to_delimited(&decoded.items, b'\t')?,
        dropped_fields: decoded.dropped_fields,
    })
}

/// Decodes `records` as `kind` and renders every output format.
pub fn transform_records(
    kind: PayloadKind,
    records: Vec<Record>,
    reject_unknown_fields: bool,
) -> Result<TransformResult> {
    match kind {
        PayloadKind::ProductItem => convert::<ProductItem>(records, reject_unknown_fields),
        PayloadKind::CreateUserRequest => {
            convert::<CreateUserRequest>(records, reject_unknown_fields)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;

    fn records(value: Value) -> Vec<Record> {
        parse_records(PayloadKind::ProductItem, value.to_string().as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_array_yields_one_record_per_element() {
        let parsed = records(json!([{"productId": 1}, {"productId": 2}]));

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].index, 1);
        assert_eq!(parsed[1].data.get("productId"), Some(&json!(2)));
    }

    #[test]
    fn test_parse_single_object() {
        let parsed = records(json!({"productName": "Widget"}));

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].index, 0);
    }

    #[test]
    fn test_parse_rejects_non_object_elements() {
        let err = parse_records(PayloadKind::ProductItem, br#"[{"productId": 1}, 42]"#).unwrap_err();

        match err {
            PayloadError::DecodeError { index, message, .. } => {
                assert_eq!(index, 1);
                assert!(message.contains("found a number"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse_records(PayloadKind::ProductItem, b"{not json").unwrap_err();
        assert!(matches!(err, PayloadError::SerializationError(_)));
    }

    #[test]
    fn test_decode_drops_unknown_fields_when_lenient() {
        let parsed = records(json!([
            {"productId": 1, "color": "red"},
            {"productId": 2, "color": "blue", "weight": 3}
        ]));

        let decoded = decode::<ProductItem>(parsed, false).unwrap();

        assert_eq!(decoded.items.len(), 2);
        assert_eq!(decoded.items[1].product_id, Some(2));
        assert_eq!(decoded.dropped_fields, vec!["color", "weight"]);
    }

    #[test]
    fn test_decode_rejects_unknown_fields_when_strict() {
        let parsed = records(json!([{"productId": 1}, {"productId": 2, "color": "red"}]));

        let err = decode::<ProductItem>(parsed, true).unwrap_err();

        match err {
            PayloadError::UnknownFieldError { index, field, kind } => {
                assert_eq!(index, 1);
                assert_eq!(field, "color");
                assert_eq!(kind, "product-item");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_reports_type_mismatch_with_index() {
        let parsed = records(json!([{"productQuantity": 1}, {"productQuantity": "many"}]));

        let err = decode::<ProductItem>(parsed, false).unwrap_err();
        assert!(matches!(err, PayloadError::DecodeError { index: 1, .. }));
    }

    #[test]
    fn test_decode_keeps_every_price_digit() {
        let parsed = parse_records(
            PayloadKind::ProductItem,
            br#"[{"pricePerUnit": 12345678901234567.89}]"#,
        )
        .unwrap();

        let decoded = decode::<ProductItem>(parsed, true).unwrap();
        let price: Decimal = "12345678901234567.89".parse().unwrap();
        assert_eq!(decoded.items[0].price_per_unit, Some(price));

        let json = to_json(&decoded.items).unwrap();
        assert!(json.contains("\"pricePerUnit\": 12345678901234567.89"));
    }

    #[test]
    fn test_decode_reports_price_out_of_decimal_range() {
        let parsed = parse_records(
            PayloadKind::ProductItem,
            br#"[{"pricePerUnit": 1.5}, {"pricePerUnit": 1e30}]"#,
        )
        .unwrap();

        let err = decode::<ProductItem>(parsed, false).unwrap_err();
        assert!(matches!(err, PayloadError::DecodeError { index: 1, .. }));
    }

    #[test]
    fn test_to_delimited_writes_header_and_rows() {
        let items = vec![
            ProductItem {
                product_id: Some(1),
                product_name: Some("Widget, large".to_string()),
                product_quantity: Some(5),
                price_per_unit: Some(Decimal::new(999, 2)),
                image_url: None,
            },
            ProductItem::default(),
        ];

        let csv_output = to_delimited(&items, b',').unwrap();
        let lines: Vec<&str> = csv_output.lines().collect();

        assert_eq!(lines[0], "productId,productName,productQuantity,pricePerUnit,imageUrl");
        assert_eq!(lines[1], "1,\"Widget, large\",5,9.99,");
        assert_eq!(lines[2], ",,,,");

        let tsv_output = to_delimited(&items, b'\t').unwrap();
        assert_eq!(
            tsv_output.lines().nth(1),
            Some("1\tWidget, large\t5\t9.99\t")
        );
    }

    #[test]
    fn test_transform_records_for_create_user_request() {
        let parsed = parse_records(
            PayloadKind::CreateUserRequest,
            json!([{"userName": "jdoe", "address": {"city": "Springfield"}, "cartId": 3}])
                .to_string()
                .as_bytes(),
        )
        .unwrap();

        let result = transform_records(PayloadKind::CreateUserRequest, parsed, true).unwrap();

        assert_eq!(result.kind, PayloadKind::CreateUserRequest);
        assert_eq!(result.record_count, 1);
        assert!(result.dropped_fields.is_empty());

        let canonical: Value = serde_json::from_str(&result.json_output).unwrap();
        assert_eq!(canonical[0]["address"], json!({"city": "Springfield"}));
        assert_eq!(canonical[0]["email"], Value::Null);

        assert_eq!(
            result.csv_output.lines().nth(1),
            Some(r#",jdoe,,,,"{""city"":""Springfield""}",3"#)
        );
    }
}
