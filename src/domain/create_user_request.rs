use crate::domain::model::{cell, Payload, PayloadKind};
use serde::{Deserialize, Serialize};

/// Postal address attached to a user.
///
/// Its fields are owned by the user service and are not modeled here; the
/// JSON object is kept as received and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub serde_json::Map<String, serde_json::Value>);

impl Address {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Address {
    fn from(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(fields)
    }
}

/// Request to create a user account, as sent to the user service.
///
/// `user_id` is carried even though the request creates the user; it is
/// passed through without interpretation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub address: Option<Address>,
    pub cart_id: Option<i64>,
}

impl Payload for CreateUserRequest {
    const KIND: PayloadKind = PayloadKind::CreateUserRequest;

    const FIELDS: &'static [&'static str] = &[
        "userId",
        "userName",
        "firstName",
        "lastName",
        "email",
        "address",
        "cartId",
    ];

    fn row(&self) -> Vec<String> {
        // serializing a Map into a String cannot fail
        let address = self
            .address
            .as_ref()
            .and_then(|address| serde_json::to_string(address).ok())
            .unwrap_or_default();

        vec![
            cell(&self.user_id),
            cell(&self.user_name),
            cell(&self.first_name),
            cell(&self.last_name),
            cell(&self.email),
            address,
            cell(&self.cart_id),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn address() -> Address {
        match json!({"street": "1 Main St", "city": "Springfield", "zip": "12345"}) {
            serde_json::Value::Object(fields) => Address::from(fields),
            _ => unreachable!(),
        }
    }

    fn jane() -> CreateUserRequest {
        CreateUserRequest {
            user_id: Some(10),
            user_name: Some("jdoe".to_string()),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            address: Some(address()),
            cart_id: Some(99),
        }
    }

    #[test]
    fn test_fields_read_back_as_assigned() {
        let mut request = CreateUserRequest::default();
        request.cart_id = Some(99);
        request.address = Some(address());
        request.email = Some("jane@example.com".to_string());
        request.last_name = Some("Doe".to_string());
        request.first_name = Some("Jane".to_string());
        request.user_name = Some("jdoe".to_string());
        request.user_id = Some(10);

        assert_eq!(request.user_id, Some(10));
        assert_eq!(request.user_name.as_deref(), Some("jdoe"));
        assert_eq!(request.first_name.as_deref(), Some("Jane"));
        assert_eq!(request.last_name.as_deref(), Some("Doe"));
        assert_eq!(request.email.as_deref(), Some("jane@example.com"));
        assert_eq!(request.address, Some(address()));
        assert_eq!(request.cart_id, Some(99));
        assert_eq!(request, jane());
    }

    #[test]
    fn test_assigning_one_field_leaves_others_untouched() {
        let mut request = jane();
        request.email = None;

        assert_eq!(request.email, None);
        assert_eq!(
            CreateUserRequest {
                email: Some("jane@example.com".to_string()),
                ..request
            },
            jane()
        );
    }

    #[test]
    fn test_address_is_kept_verbatim() {
        let input = json!({
            "userName": "jdoe",
            "address": {"street": "1 Main St", "geo": {"lat": 1.5, "lng": -2.25}, "tags": ["home"]}
        });

        let request: CreateUserRequest = serde_json::from_value(input.clone()).unwrap();
        let address = request.address.as_ref().unwrap();
        assert_eq!(address.get("street"), Some(&json!("1 Main St")));

        let output = serde_json::to_value(&request).unwrap();
        assert_eq!(output["address"], input["address"]);
        assert_eq!(output["userId"], serde_json::Value::Null);
    }

    #[test]
    fn test_address_must_be_an_object() {
        let result = serde_json::from_value::<CreateUserRequest>(json!({"address": "1 Main St"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_user_id_is_optional_on_create() {
        let request: CreateUserRequest =
            serde_json::from_value(json!({"userName": "jdoe", "cartId": 5})).unwrap();

        assert_eq!(request.user_id, None);
        assert_eq!(request.cart_id, Some(5));
    }

    #[test]
    fn test_row_renders_address_as_compact_json() {
        let mut request = jane();
        request.address = Some(Address::from(match json!({"city": "Springfield"}) {
            serde_json::Value::Object(fields) => fields,
            _ => unreachable!(),
        }));

        assert_eq!(
            request.row(),
            vec![
                "10",
                "jdoe",
                "Jane",
                "Doe",
                "jane@example.com",
                r#"{"city":"Springfield"}"#,
                "99"
            ]
        );

        request.address = None;
        assert_eq!(request.row()[5], "");
    }
}
