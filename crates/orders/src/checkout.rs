//! Checkout contact details and shipping methods.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use lumina_core::Price;

/// The checkout form as typed.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

/// Validated, trimmed contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

/// Which form field a validation failure belongs to, so the rendering
/// layer can attach the message to the right input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Email,
    Phone,
    Address,
    City,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: ContactField,
    pub message: String,
}

impl FieldError {
    fn new(field: ContactField, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\d\s\-()+]+$").unwrap())
}

impl ContactForm {
    /// Validate every field and report all failures, keyed by field.
    pub fn validate(&self) -> Result<ContactDetails, Vec<FieldError>> {
        let mut errors = Vec::new();

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError::new(ContactField::Email, "Email is required"));
        } else if !email_re().is_match(email) {
            errors.push(FieldError::new(
                ContactField::Email,
                "Please enter a valid email address",
            ));
        }

        let phone = self.phone.trim();
        if phone.is_empty() {
            errors.push(FieldError::new(ContactField::Phone, "Phone number is required"));
        } else if phone.len() < 10 || !phone_re().is_match(phone) {
            errors.push(FieldError::new(
                ContactField::Phone,
                "Please enter a valid phone number",
            ));
        }

        let address = self.address.trim();
        if address.is_empty() {
            errors.push(FieldError::new(ContactField::Address, "Address is required"));
        } else if address.len() < 5 {
            errors.push(FieldError::new(
                ContactField::Address,
                "Please enter a complete address",
            ));
        }

        let city = self.city.trim();
        if city.is_empty() {
            errors.push(FieldError::new(ContactField::City, "City is required"));
        } else if city.len() < 2 {
            errors.push(FieldError::new(ContactField::City, "Please enter a valid city"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ContactDetails {
            email: email.to_lowercase(),
            phone: phone.to_string(),
            address: address.to_string(),
            city: city.to_string(),
        })
    }
}

/// Shipping options. All free; the distinction is display only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
    Overnight,
}

impl ShippingMethod {
    pub fn cost(&self) -> Price {
        Price::ZERO
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "Standard Shipping (FREE)",
            ShippingMethod::Express => "Express Shipping (FREE)",
            ShippingMethod::Overnight => "Overnight Shipping (FREE)",
        }
    }

    /// Resolve a form token; anything unrecognized falls back to standard.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_lowercase().as_str() {
            "express" => ShippingMethod::Express,
            "overnight" => ShippingMethod::Overnight,
            _ => ShippingMethod::Standard,
        }
    }
}
