//! Mock payment capture. Nothing is charged and card data is never stored.

use crate::error::BookingError;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

const MAX_CARD_DIGITS: usize = 16;
const MAX_CVV_DIGITS: usize = 4;

lazy_static! {
    static ref NON_DIGIT: Regex = Regex::new(r"[^0-9]").unwrap();
    static ref DIGITS_ONLY: Regex = Regex::new(r"^[0-9]+$").unwrap();
    static ref NON_BLANK: Regex = Regex::new(r"\S").unwrap();
}

fn digits(value: &str) -> String {
    NON_DIGIT.replace_all(value, "").into_owned()
}

/// Groups up to 16 digits by four. Fewer than four digits are returned as typed.
pub fn format_card_number(value: &str) -> String {
    let digits = digits(value);
    if digits.len() < 4 {
        return digits;
    }
    let digits = &digits[..digits.len().min(MAX_CARD_DIGITS)];
    digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `1225` becomes `12/25`.
pub fn format_expiry_date(value: &str) -> String {
    let digits = digits(value);
    if digits.len() >= 2 {
        let year_end = digits.len().min(4);
        format!("{}/{}", &digits[..2], &digits[2..year_end])
    } else {
        digits
    }
}

pub fn format_cvv(value: &str) -> String {
    digits(value).chars().take(MAX_CVV_DIGITS).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CardDetails {
    /// 16 digits plus 3 separating spaces.
    #[validate(length(min = 19, message = "the card number is incomplete"))]
    pub card_number: String,
    #[validate(length(equal = 5, message = "the expiry date must read MM/YY"))]
    pub expiry_date: String,
    #[validate(
        length(min = 3, message = "the cvv needs at least 3 digits"),
        regex(path = *DIGITS_ONLY, message = "the cvv only holds digits")
    )]
    pub cvv: String,
    #[validate(regex(path = *NON_BLANK, message = "the card holder is required"))]
    pub card_holder: String,
    #[serde(default)]
    pub billing_address: String,
}

impl CardDetails {
    /// Applies the input masks the booking form shows while typing.
    pub fn formatted(self) -> Self {
        Self {
            card_number: format_card_number(&self.card_number),
            expiry_date: format_expiry_date(&self.expiry_date),
            cvv: format_cvv(&self.cvv),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum PaymentMethod {
    #[serde(rename = "online")]
    Online(CardDetails),
    /// Paid at the appointment, nothing to collect.
    #[serde(rename = "reception")]
    OnArrival,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentKind {
    #[serde(rename = "online")]
    Online,
    #[serde(rename = "reception")]
    OnArrival,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub method: PaymentKind,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

impl PaymentMethod {
    pub fn formatted(self) -> Self {
        match self {
            PaymentMethod::Online(card) => PaymentMethod::Online(card.formatted()),
            PaymentMethod::OnArrival => PaymentMethod::OnArrival,
        }
    }

    pub fn validate(&self) -> Result<(), BookingError> {
        match self {
            PaymentMethod::Online(card) => Ok(card.validate()?),
            PaymentMethod::OnArrival => Ok(()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn kind(&self) -> PaymentKind {
        match self {
            PaymentMethod::Online(_) => PaymentKind::Online,
            PaymentMethod::OnArrival => PaymentKind::OnArrival,
        }
    }

    pub fn complete(self, amount: f64) -> Result<PaymentRecord, BookingError> {
        let method = self.formatted();
        method.validate()?;
        Ok(PaymentRecord {
            method: method.kind(),
            amount,
            timestamp: Utc::now(),
        })
    }
}

/// No mode chosen yet counts as invalid.
pub fn is_payment_valid(method: Option<&PaymentMethod>) -> bool {
    method.map(PaymentMethod::is_valid).unwrap_or(false)
}
