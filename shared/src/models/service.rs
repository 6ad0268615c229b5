//! Service catalog entry

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog service; its cadence seeds fresh service orders on first load
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDefinition {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub interval: i64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub charge: Option<Decimal>,
}
