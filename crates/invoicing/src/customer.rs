use core::str::FromStr;

use serde::{Deserialize, Serialize};

use taxform_core::{DomainError, ValueObject};

/// Billing party. Only `name` and `email` are required to finalize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(alias = "gstNumber")]
    pub tax_id: String,
    pub address: String,
    pub city: String,
    #[serde(alias = "state")]
    pub region: String,
    #[serde(alias = "pincode")]
    pub postal_code: String,
}

impl CustomerDetails {
    /// Store raw form input (verbatim) into `field`.
    pub fn set_field(&mut self, field: CustomerField, value: &str) {
        let slot = match field {
            CustomerField::Name => &mut self.name,
            CustomerField::Email => &mut self.email,
            CustomerField::Phone => &mut self.phone,
            CustomerField::TaxId => &mut self.tax_id,
            CustomerField::Address => &mut self.address,
            CustomerField::City => &mut self.city,
            CustomerField::Region => &mut self.region,
            CustomerField::PostalCode => &mut self.postal_code,
        };
        *slot = value.to_string();
    }
}

impl ValueObject for CustomerDetails {}

/// Editable customer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "String")]
pub enum CustomerField {
    Name,
    Email,
    Phone,
    TaxId,
    Address,
    City,
    Region,
    PostalCode,
}

impl FromStr for CustomerField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(CustomerField::Name),
            "email" => Ok(CustomerField::Email),
            "phone" => Ok(CustomerField::Phone),
            "taxId" | "tax_id" | "gstNumber" => Ok(CustomerField::TaxId),
            "address" => Ok(CustomerField::Address),
            "city" => Ok(CustomerField::City),
            "region" | "state" => Ok(CustomerField::Region),
            "postalCode" | "postal_code" | "pincode" => Ok(CustomerField::PostalCode),
            other => Err(DomainError::unknown_field(other)),
        }
    }
}

impl TryFrom<String> for CustomerField {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
