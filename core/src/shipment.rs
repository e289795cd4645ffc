//! The confirmed shipment and the parser that produces it.
//!
//! # Design
//! `Shipment` is only ever built from a carrier response. Its serialized form
//! is the canonical view: every field except `labelPdf`, which duplicates the
//! first document's content. Rate lines and shipment details are kept as raw
//! JSON because their shape depends on the product and the account setup.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::client::check_status;
use crate::error::ApiError;
use crate::http::HttpResponse;

/// One package of a confirmed shipment. Fields the carrier adds beyond the
/// named ones are kept in `extra` so the canonical view stays lossless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentPackage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A document returned with the shipment, typically the label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_format: Option<String>,
    /// Base64-encoded document content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The carrier's confirmed booking record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    shipment_tracking_number: String,
    cancel_pickup_url: String,
    tracking_url: String,
    dispatch_confirmation_number: String,
    #[serde(skip)]
    label_pdf: String,
    warnings: Vec<String>,
    packages: Vec<ShipmentPackage>,
    documents: Vec<Document>,
    shipment_details: Vec<Value>,
    shipment_charges: Vec<Value>,
}

impl Shipment {
    pub fn shipment_tracking_number(&self) -> &str {
        &self.shipment_tracking_number
    }

    /// Empty when no pickup was booked.
    pub fn cancel_pickup_url(&self) -> &str {
        &self.cancel_pickup_url
    }

    pub fn tracking_url(&self) -> &str {
        &self.tracking_url
    }

    /// Empty when no pickup was booked.
    pub fn dispatch_confirmation_number(&self) -> &str {
        &self.dispatch_confirmation_number
    }

    /// Base64 content of the first returned document.
    pub fn label_pdf(&self) -> &str {
        &self.label_pdf
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn packages(&self) -> &[ShipmentPackage] {
        &self.packages
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn shipment_details(&self) -> &[Value] {
        &self.shipment_details
    }

    pub fn shipment_charges(&self) -> &[Value] {
        &self.shipment_charges
    }

    /// The canonical mapping view, without the label.
    pub fn to_value(&self) -> Result<Value, ApiError> {
        serde_json::to_value(self).map_err(|e| ApiError::SerializationError(e.to_string()))
    }
}

impl fmt::Display for Shipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShipmentResponseBody {
    shipment_tracking_number: String,
    tracking_url: String,
    #[serde(default)]
    cancel_pickup_url: String,
    #[serde(default)]
    dispatch_confirmation_number: String,
    #[serde(default)]
    warnings: Vec<String>,
    #[serde(default)]
    packages: Vec<ShipmentPackage>,
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    shipment_details: Vec<Value>,
    #[serde(default)]
    shipment_charges: Vec<Value>,
}

impl From<ShipmentResponseBody> for Shipment {
    fn from(body: ShipmentResponseBody) -> Self {
        let label_pdf = body
            .documents
            .first()
            .and_then(|doc| doc.content.clone())
            .unwrap_or_default();
        Self {
            shipment_tracking_number: body.shipment_tracking_number,
            cancel_pickup_url: body.cancel_pickup_url,
            tracking_url: body.tracking_url,
            dispatch_confirmation_number: body.dispatch_confirmation_number,
            label_pdf,
            warnings: body.warnings,
            packages: body.packages,
            documents: body.documents,
            shipment_details: body.shipment_details,
            shipment_charges: body.shipment_charges,
        }
    }
}

/// Maps a `POST /shipments` response to a `Shipment`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShipmentResponseParser;

impl ShipmentResponseParser {
    pub fn parse(&self, response: HttpResponse) -> Result<Shipment, ApiError> {
        check_status(&response, &[200, 201])?;
        let shipment = self.parse_body(&response.body)?;
        for warning in shipment.warnings() {
            warn!(
                tracking_number = shipment.shipment_tracking_number(),
                "carrier warning: {warning}"
            );
        }
        info!(
            tracking_number = shipment.shipment_tracking_number(),
            packages = shipment.packages().len(),
            "shipment created"
        );
        Ok(shipment)
    }

    /// Build a `Shipment` from a success body without checking a status.
    pub fn parse_body(&self, body: &str) -> Result<Shipment, ApiError> {
        let body: ShipmentResponseBody =
            serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(body.into())
    }
}
