//! Synchronous shipment client core for the DHL Express MyDHL API.
//!
//! # Overview
//! Assembles a shipment-creation request from validated value objects,
//! renders it to the carrier's JSON shape, and parses the confirmation into a
//! [`Shipment`]. The HTTP round-trip itself is delegated to an
//! [`HttpTransport`] supplied by the caller (host-does-IO pattern), which is
//! also where authentication, retries and timeouts belong.
//!
//! # Design
//! - `MyDhlClient` is stateless: it holds the base URL and default headers.
//! - `ShipmentService` is a per-shipment builder. `build_request` produces an
//!   `HttpRequest`, `ShipmentResponseParser::parse` consumes an
//!   `HttpResponse`, and `send_shipment` runs both around the transport.
//! - Value objects validate on construction; the builder validates required
//!   fields before anything is sent.
//!
//! ```no_run
//! use chrono::{FixedOffset, TimeZone};
//! use mydhl_core::{Account, AccountType, Address, ApiError, ClientConfig, Contact, HttpRequest,
//!     HttpResponse, HttpTransport, MyDhlClient, Package};
//!
//! struct MyTransport;
//!
//! impl HttpTransport for MyTransport {
//!     fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
//!         unimplemented!("send {} with your HTTP client", request.path)
//!     }
//! }
//!
//! fn main() -> Result<(), ApiError> {
//!     let client = MyDhlClient::new(ClientConfig::from_env());
//!     let mut service = client.shipments();
//!     let date = FixedOffset::east_opt(3600).unwrap().with_ymd_and_hms(2024, 3, 4, 14, 0, 0).unwrap();
//!     service
//!         .set_planned_shipping_date_and_time(date)
//!         .set_pickup(false, "", "")
//!         .set_product_code("P")
//!         .set_shipper_details(
//!             Address::new("Main St 1", "10115", "Berlin", "DE")?,
//!             Contact::new("Max Mustermann", "ACME", "+4930123456"),
//!         )
//!         .set_receiver_details(
//!             Address::new("High St 2", "SW1A 2AA", "London", "GB")?,
//!             Contact::new("Jane Doe", "Doe Ltd", "+44201234567").with_email("jane@example.com"),
//!         )
//!         .set_accounts([Account::new(AccountType::Shipper, "123456789")])?
//!         .set_packages([Package::new(2.5, 30.0, 20.0, 10.0)])?;
//!     let shipment = service.send_shipment(MyTransport)?;
//!     println!("{}", shipment.shipment_tracking_number());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod service;
pub mod shipment;
pub mod types;

pub use client::MyDhlClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
pub use request::ShipmentRequest;
pub use service::ShipmentService;
pub use shipment::{Document, Shipment, ShipmentPackage, ShipmentResponseParser};
pub use types::{Account, AccountType, Address, Contact, Dimensions, Package, RateAddress};
