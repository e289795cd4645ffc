//! Value objects the shipment request is assembled from.
//!
//! # Design
//! Addresses validate on construction and are immutable afterwards; the
//! optional address lines are added with consuming `with_*` methods that
//! never touch the validated fields. Contacts, accounts and packages are plain
//! attribute holders. Every type serializes directly to the carrier's
//! camelCase field names, so the request DTOs can embed them as-is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Upper-cases the country code and checks the three location fields shared
/// by `Address` and `RateAddress`.
fn validate_location(country_code: &str, postal_code: &str, city_name: &str) -> Result<String, ApiError> {
    let country_code = country_code.to_ascii_uppercase();
    if country_code.chars().count() != 2 {
        return Err(ApiError::invalid(format!(
            "Country Code must be 2 characters long. Entered: {country_code}"
        )));
    }
    if postal_code.chars().count() < 3 {
        return Err(ApiError::invalid(format!(
            "Postal Code must be at least 3 characters long. Entered: {postal_code}"
        )));
    }
    if city_name.is_empty() {
        return Err(ApiError::invalid("City name must not be empty"));
    }
    Ok(country_code)
}

/// A full postal address, rendered as `postalAddress` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    postal_code: String,
    city_name: String,
    country_code: String,
    address_line1: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    address_line2: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    address_line3: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    county_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    province_code: String,
}

impl Address {
    pub fn new(
        address_line1: &str,
        postal_code: &str,
        city_name: &str,
        country_code: &str,
    ) -> Result<Self, ApiError> {
        let country_code = validate_location(country_code, postal_code, city_name)?;
        Ok(Self {
            postal_code: postal_code.to_string(),
            city_name: city_name.to_string(),
            country_code,
            address_line1: address_line1.to_string(),
            address_line2: String::new(),
            address_line3: String::new(),
            county_name: String::new(),
            province_code: String::new(),
        })
    }

    pub fn with_address_line2(mut self, line: &str) -> Self {
        self.address_line2 = line.to_string();
        self
    }

    pub fn with_address_line3(mut self, line: &str) -> Self {
        self.address_line3 = line.to_string();
        self
    }

    pub fn with_county_name(mut self, county: &str) -> Self {
        self.county_name = county.to_string();
        self
    }

    pub fn with_province_code(mut self, province: &str) -> Self {
        self.province_code = province.to_string();
        self
    }

    pub fn address_line1(&self) -> &str {
        &self.address_line1
    }

    pub fn address_line2(&self) -> &str {
        &self.address_line2
    }

    pub fn address_line3(&self) -> &str {
        &self.address_line3
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn city_name(&self) -> &str {
        &self.city_name
    }

    pub fn county_name(&self) -> &str {
        &self.county_name
    }

    pub fn province_code(&self) -> &str {
        &self.province_code
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }
}

/// The reduced address used when rating: country, postal code and city only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateAddress {
    country_code: String,
    postal_code: String,
    city_name: String,
}

impl RateAddress {
    pub fn new(country_code: &str, postal_code: &str, city_name: &str) -> Result<Self, ApiError> {
        let country_code = validate_location(country_code, postal_code, city_name)?;
        Ok(Self {
            country_code,
            postal_code: postal_code.to_string(),
            city_name: city_name.to_string(),
        })
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn city_name(&self) -> &str {
        &self.city_name
    }
}

impl From<&Address> for RateAddress {
    fn from(address: &Address) -> Self {
        // Already validated by Address::new.
        Self {
            country_code: address.country_code.clone(),
            postal_code: address.postal_code.clone(),
            city_name: address.city_name.clone(),
        }
    }
}

/// Contact details, rendered as `contactInformation` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    full_name: String,
    company_name: String,
    phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    mobile_phone: String,
}

impl Contact {
    pub fn new(full_name: &str, company_name: &str, phone: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            company_name: company_name.to_string(),
            phone: phone.to_string(),
            email: String::new(),
            mobile_phone: String::new(),
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn with_mobile_phone(mut self, mobile_phone: &str) -> Self {
        self.mobile_phone = mobile_phone.to_string();
        self
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Empty when no email was given.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn mobile_phone(&self) -> &str {
        &self.mobile_phone
    }
}

/// Role of an account in the shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountType {
    Shipper,
    Payer,
    DutiesTaxes,
}

impl AccountType {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Shipper => "shipper",
            AccountType::Payer => "payer",
            AccountType::DutiesTaxes => "duties-taxes",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shipper" => Ok(AccountType::Shipper),
            "payer" => Ok(AccountType::Payer),
            "duties-taxes" => Ok(AccountType::DutiesTaxes),
            other => Err(ApiError::invalid(format!("unknown account type: {other}"))),
        }
    }
}

/// A billing account used for rating and invoicing the shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    type_code: AccountType,
    number: String,
}

impl Account {
    pub fn new(type_code: AccountType, number: &str) -> Self {
        Self {
            type_code,
            number: number.to_string(),
        }
    }

    /// Build an account from the raw wire type code, e.g. `"shipper"`.
    pub fn parse(type_code: &str, number: &str) -> Result<Self, ApiError> {
        Ok(Self::new(type_code.parse()?, number))
    }

    pub fn type_code(&self) -> AccountType {
        self.type_code
    }

    pub fn number(&self) -> &str {
        &self.number
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

/// A single piece of the shipment. Weight in kilograms, dimensions in
/// centimetres (metric unit of measurement).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Package {
    weight: f64,
    dimensions: Dimensions,
}

impl Package {
    pub fn new(weight: f64, length: f64, width: f64, height: f64) -> Self {
        Self {
            weight,
            dimensions: Dimensions { length, width, height },
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn length(&self) -> f64 {
        self.dimensions.length
    }

    pub fn width(&self) -> f64 {
        self.dimensions.width
    }

    pub fn height(&self) -> f64 {
        self.dimensions.height
    }
}
