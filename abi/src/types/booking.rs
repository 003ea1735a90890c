use std::fmt;

use chrono::NaiveDate;
use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};

use crate::{parse_calendar_day, Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 6] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::CheckedIn,
        BookingStatus::CheckedOut,
        BookingStatus::Cancelled,
        BookingStatus::NoShow,
    ];

    /// wire value, as used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CheckedIn => "checked_in",
            BookingStatus::CheckedOut => "checked_out",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::NoShow => "no_show",
        }
    }

    /// human readable label
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::CheckedIn => "Checked In",
            BookingStatus::CheckedOut => "Checked Out",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::NoShow => "No Show",
        }
    }

    /// cancelled bookings bring no money in
    pub fn counts_toward_revenue(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
    Refunded,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

/// Short property info the backend embeds in booking payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayment {
    pub id: String,
    pub booking_id: String,
    #[serde(deserialize_with = "amount")]
    pub amount: f64,
    pub payment_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A booking as the backend reports it.
///
/// Dates stay as the strings the backend sent; [`Booking::stay`] parses them on
/// demand so one malformed record never poisons a whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub property_id: String,
    pub guest_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(default = "one_guest")]
    pub number_of_guests: u32,
    #[serde(default, deserialize_with = "calendar_text")]
    pub check_in_date: String,
    #[serde(default, deserialize_with = "calendar_text")]
    pub check_out_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nights_count: Option<u32>,
    #[serde(default, deserialize_with = "amount")]
    pub base_amount: f64,
    #[serde(default, deserialize_with = "amount")]
    pub cleaning_fee: f64,
    #[serde(default, deserialize_with = "amount")]
    pub taxes: f64,
    #[serde(default, deserialize_with = "amount")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "amount")]
    pub security_deposit: f64,
    #[serde(default)]
    pub booking_status: BookingStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertySummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payments: Vec<BookingPayment>,
}

/// Nights a guest occupies: the half-open day range `[check_in, check_out)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stay {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl Stay {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// true if the guest sleeps there on the night starting at `day`
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.check_in <= day && day < self.check_out
    }

    /// zero or negative for stays the backend should have rejected
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn is_empty(&self) -> bool {
        self.check_out <= self.check_in
    }

}

impl Booking {
    pub fn new_pending(
        id: impl Into<String>,
        property_id: impl Into<String>,
        guest_name: impl Into<String>,
        check_in_date: impl Into<String>,
        check_out_date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            property_id: property_id.into(),
            guest_name: guest_name.into(),
            guest_email: None,
            guest_phone: None,
            number_of_guests: 1,
            check_in_date: check_in_date.into(),
            check_out_date: check_out_date.into(),
            nights_count: None,
            base_amount: 0.0,
            cleaning_fee: 0.0,
            taxes: 0.0,
            total_amount: 0.0,
            security_deposit: 0.0,
            booking_status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            special_requests: None,
            internal_notes: None,
            booking_source: None,
            confirmation_code: None,
            created_at: None,
            updated_at: None,
            property: None,
            payments: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.booking_status = status;
        self
    }

    /// Parse check-in and check-out into calendar days.
    pub fn stay(&self) -> Result<Stay, Error> {
        Ok(Stay::new(
            parse_calendar_day(&self.check_in_date)?,
            parse_calendar_day(&self.check_out_date)?,
        ))
    }

    pub fn nights(&self) -> Result<i64, Error> {
        Ok(self.stay()?.nights())
    }

    /// Checks run before a booking is sent to the backend.
    pub fn validate(&self) -> Result<(), Error> {
        let stay = self.stay()?;
        if stay.is_empty() {
            return Err(Error::InvalidStay {
                check_in: self.check_in_date.clone(),
                check_out: self.check_out_date.clone(),
            });
        }
        let amounts = [
            ("baseAmount", self.base_amount),
            ("cleaningFee", self.cleaning_fee),
            ("taxes", self.taxes),
            ("totalAmount", self.total_amount),
            ("securityDeposit", self.security_deposit),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidAmount { field, value });
            }
        }
        Ok(())
    }

    /// Refresh `nights_count` and `total_amount` from the nightly rate,
    /// cleaning fee and taxes. Deposit is held separately.
    pub fn recompute_totals(&mut self) -> Result<(), Error> {
        let nights = self.nights()?.max(0);
        let count = u32::try_from(nights).map_err(|_| Error::InvalidStay {
            check_in: self.check_in_date.clone(),
            check_out: self.check_out_date.clone(),
        })?;
        self.nights_count = Some(count);
        self.total_amount = self.base_amount * nights as f64 + self.cleaning_fee + self.taxes;
        Ok(())
    }
}

fn one_guest() -> u32 {
    1
}

/// Dates are kept as text. Anything that is not a string (`null`, a number)
/// becomes an empty string, which never parses, so only that booking drops
/// out of the calendar instead of the whole page failing to decode.
fn calendar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Other(IgnoredAny),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Text(s) => Ok(s),
        Raw::Other(_) => Ok(String::new()),
    }
}

/// Money arrives as a JSON number, a decimal string or `null` (zero).
fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Raw::Number(n)) => Ok(n),
        Some(Raw::Text(s)) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
