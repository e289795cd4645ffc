//! Wire DTOs for `POST /shipments`.
//!
//! # Design
//! The nested request is a tree of borrowed views over the builder's value
//! objects, so rendering never clones addresses or contacts. Optional blocks
//! are `Option`s skipped when `None`; the builder decides which ones to fill.
//! The carrier expects booleans as the strings `"true"`/`"false"`, which
//! `bool_string` takes care of.

use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};

use crate::types::{Account, Address, Contact, Package};

/// `DateTime` in ATOM form, e.g. `2024-05-01T10:00:00+02:00`.
pub(crate) fn format_atom(date: &DateTime<FixedOffset>) -> String {
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

mod bool_string {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }
}

fn serialize_atom<S: Serializer>(date: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_atom(date))
}

/// Request body for creating a shipment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRequest<'a> {
    #[serde(serialize_with = "serialize_atom")]
    pub planned_shipping_date_and_time: DateTime<FixedOffset>,
    pub accounts: &'a [Account],
    pub customer_details: CustomerDetails<'a>,
    pub content: Content<'a>,
    #[serde(with = "bool_string")]
    pub get_rate_estimates: bool,
    pub product_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_product_code: Option<&'a str>,
    /// The carrier schema defines this as an array, so it is sent as one
    /// even though only a single email notification is ever added.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_notification: Option<Vec<ShipmentNotification<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup: Option<Pickup<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_details: Option<Party<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails<'a> {
    pub shipper_details: Party<'a>,
    pub receiver_details: Party<'a>,
}

/// Address plus contact, used for shipper, receiver and pickup details.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Party<'a> {
    pub postal_address: &'a Address,
    pub contact_information: &'a Contact,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content<'a> {
    pub packages: &'a [Package],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentNotification<'a> {
    pub type_code: &'static str,
    pub language_country_code: &'a str,
    pub receiver_id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pickup<'a> {
    #[serde(with = "bool_string")]
    pub is_requested: bool,
    pub close_time: &'a str,
    pub location: &'a str,
}
