//! Fluent builder for `POST /shipments`.
//!
//! # Design
//! `ShipmentService` accumulates fields through `&mut self` setters so calls
//! chain like `Command`. Nothing is checked until the request is built: at
//! that point every required field must be present, in a fixed order, and the
//! first gap is reported by its wire name. Sending is split the same way as
//! the rest of the crate: `build_request` produces plain data,
//! `ShipmentResponseParser` consumes it, and `send_shipment` wires the two
//! around a caller-supplied transport.

use chrono::{DateTime, FixedOffset};
use tracing::debug;
use uuid::Uuid;

use crate::client::MyDhlClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpTransport};
use crate::request::{format_atom, Content, CustomerDetails, Party, Pickup, ShipmentNotification, ShipmentRequest};
use crate::shipment::{Shipment, ShipmentResponseParser};
use crate::types::{Account, Address, Contact, Package};

const CREATE_SHIPMENT_ENDPOINT: &str = "shipments";

fn required<'s, T>(field: &'s Option<T>, name: &'static str) -> Result<&'s T, ApiError> {
    field.as_ref().ok_or(ApiError::MissingArgument(name))
}

#[derive(Debug, Clone)]
struct PickupRequest {
    is_requested: bool,
    close_time: String,
    location: String,
}

#[derive(Debug, Clone)]
pub struct ShipmentService<'a> {
    client: &'a MyDhlClient,
    planned_shipping_date_and_time: Option<DateTime<FixedOffset>>,
    pickup: Option<PickupRequest>,
    pickup_details: Option<(Address, Contact)>,
    product_code: Option<String>,
    local_product_code: Option<String>,
    shipper: Option<(Address, Contact)>,
    receiver: Option<(Address, Contact)>,
    get_rate_estimates: bool,
    accounts: Option<Vec<Account>>,
    packages: Option<Vec<Package>>,
    message_reference: Option<Uuid>,
}

impl<'a> ShipmentService<'a> {
    pub fn new(client: &'a MyDhlClient) -> Self {
        Self {
            client,
            planned_shipping_date_and_time: None,
            pickup: None,
            pickup_details: None,
            product_code: None,
            local_product_code: None,
            shipper: None,
            receiver: None,
            get_rate_estimates: false,
            accounts: None,
            packages: None,
            message_reference: None,
        }
    }

    pub fn set_planned_shipping_date_and_time(&mut self, date: DateTime<FixedOffset>) -> &mut Self {
        self.planned_shipping_date_and_time = Some(date);
        self
    }

    /// Whether a courier should collect the shipment. `close_time` is the
    /// latest time (`HH:MM`) the premises are open; `location` tells the
    /// courier where to pick the packages up. Both may be empty.
    pub fn set_pickup(&mut self, is_requested: bool, close_time: &str, location: &str) -> &mut Self {
        self.pickup = Some(PickupRequest {
            is_requested,
            close_time: close_time.to_string(),
            location: location.to_string(),
        });
        self
    }

    pub fn set_pickup_details(&mut self, address: Address, contact: Contact) -> &mut Self {
        self.pickup_details = Some((address, contact));
        self
    }

    pub fn set_product_code(&mut self, product_code: &str) -> &mut Self {
        self.product_code = Some(product_code.to_string());
        self
    }

    pub fn set_local_product_code(&mut self, local_product_code: &str) -> &mut Self {
        self.local_product_code = Some(local_product_code.to_string());
        self
    }

    /// At least one account is required; an empty list is rejected here
    /// rather than left for the carrier to refuse.
    pub fn set_accounts(&mut self, accounts: impl IntoIterator<Item = Account>) -> Result<&mut Self, ApiError> {
        let accounts: Vec<Account> = accounts.into_iter().collect();
        if accounts.is_empty() {
            return Err(ApiError::invalid("accounts must contain at least one Account"));
        }
        self.accounts = Some(accounts);
        Ok(self)
    }

    pub fn set_shipper_details(&mut self, address: Address, contact: Contact) -> &mut Self {
        self.shipper = Some((address, contact));
        self
    }

    pub fn set_receiver_details(&mut self, address: Address, contact: Contact) -> &mut Self {
        self.receiver = Some((address, contact));
        self
    }

    pub fn set_get_rate_estimates(&mut self, get_rate_estimates: bool) -> &mut Self {
        self.get_rate_estimates = get_rate_estimates;
        self
    }

    /// At least one package is required; an empty list is rejected here
    /// rather than left for the carrier to refuse.
    pub fn set_packages(&mut self, packages: impl IntoIterator<Item = Package>) -> Result<&mut Self, ApiError> {
        let packages: Vec<Package> = packages.into_iter().collect();
        if packages.is_empty() {
            return Err(ApiError::invalid("packages must contain at least one Package"));
        }
        self.packages = Some(packages);
        Ok(self)
    }

    /// Override the random `message-reference` header value.
    pub fn set_message_reference(&mut self, reference: Uuid) -> &mut Self {
        self.message_reference = Some(reference);
        self
    }

    /// Validate and render the nested request body.
    ///
    /// Required fields are checked in a fixed order and the first gap is
    /// reported: `plannedShippingDateAndTime`, `isPickupRequested`,
    /// `productCode`, `shipperAddress`, `receiverAddress`, `accounts`,
    /// `packages`.
    pub fn build_payload(&self) -> Result<ShipmentRequest<'_>, ApiError> {
        let date = required(&self.planned_shipping_date_and_time, "plannedShippingDateAndTime")?;
        let pickup = required(&self.pickup, "isPickupRequested")?;
        let product_code = required(&self.product_code, "productCode")?;
        let (shipper_address, shipper_contact) = required(&self.shipper, "shipperAddress")?;
        let (receiver_address, receiver_contact) = required(&self.receiver, "receiverAddress")?;
        let accounts = required(&self.accounts, "accounts")?;
        let packages = required(&self.packages, "packages")?;

        let shipment_notification = (!receiver_contact.email().is_empty()).then(|| {
            vec![ShipmentNotification {
                type_code: "email",
                language_country_code: receiver_address.country_code(),
                receiver_id: receiver_contact.email(),
            }]
        });

        let (pickup_block, pickup_details) = if pickup.is_requested {
            let (address, contact) = required(&self.pickup_details, "pickupDetails")?;
            (
                Some(Pickup {
                    is_requested: true,
                    close_time: &pickup.close_time,
                    location: &pickup.location,
                }),
                Some(Party {
                    postal_address: address,
                    contact_information: contact,
                }),
            )
        } else {
            (None, None)
        };

        Ok(ShipmentRequest {
            planned_shipping_date_and_time: *date,
            accounts,
            customer_details: CustomerDetails {
                shipper_details: Party {
                    postal_address: shipper_address,
                    contact_information: shipper_contact,
                },
                receiver_details: Party {
                    postal_address: receiver_address,
                    contact_information: receiver_contact,
                },
            },
            content: Content { packages },
            get_rate_estimates: self.get_rate_estimates,
            product_code,
            local_product_code: self.local_product_code.as_deref().filter(|code| !code.is_empty()),
            shipment_notification,
            pickup: pickup_block,
            pickup_details,
        })
    }

    pub fn build_request(&self) -> Result<HttpRequest, ApiError> {
        let payload = self.build_payload()?;
        let body = serde_json::to_string(&payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let reference = self.message_reference.unwrap_or_else(Uuid::new_v4);
        debug!(
            message_reference = %reference,
            product_code = payload.product_code,
            planned = %format_atom(&payload.planned_shipping_date_and_time),
            packages = payload.content.packages.len(),
            pickup = payload.pickup.is_some(),
            "built shipment request"
        );
        Ok(self.client.build_post(CREATE_SHIPMENT_ENDPOINT, body, reference))
    }

    /// Validate, submit through `transport`, and parse the confirmation.
    pub fn send_shipment<T: HttpTransport>(&self, transport: T) -> Result<Shipment, ApiError> {
        let request = self.build_request()?;
        let response = transport.execute(request)?;
        ShipmentResponseParser.parse(response)
    }
}
