use crate::domain::model::{cell, Payload, PayloadKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A line item referencing a product, as sent to the orchestration service.
///
/// Every field is optional and stored as given: quantities and prices are not
/// range checked and `image_url` is not parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductItem {
    pub product_id: Option<i64>,
    pub product_name: Option<String>,
    pub product_quantity: Option<i64>,
    /// Written as an exact JSON number; accepts JSON numbers and strings.
    /// Values outside `Decimal`'s 28 significant digits fail to decode.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub price_per_unit: Option<Decimal>,
    pub image_url: Option<String>,
}

impl Payload for ProductItem {
    const KIND: PayloadKind = PayloadKind::ProductItem;

    const FIELDS: &'static [&'static str] = &[
        "productId",
        "productName",
        "productQuantity",
        "pricePerUnit",
        "imageUrl",
    ];

    fn row(&self) -> Vec<String> {
        vec![
            cell(&self.product_id),
            cell(&self.product_name),
            cell(&self.product_quantity),
            cell(&self.price_per_unit),
            cell(&self.image_url),
        ]
    }
}
