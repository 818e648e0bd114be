use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    Check,
    Lcr,
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Check => write!(f, "check"),
            Self::Lcr => write!(f, "lcr"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Received,
    Issued,
}

impl Direction {
    /// Display name of the counterparty for this direction.
    pub fn counterparty_role(self) -> &'static str {
        match self {
            Self::Received => "issuer",
            Self::Issued => "beneficiary",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Received => write!(f, "received"),
            Self::Issued => write!(f, "issued"),
        }
    }
}

static RECEIVED_VOCABULARY: [Status; 5] = [
    Status::Received,
    Status::Deposited,
    Status::Paid,
    Status::Rejected,
    Status::Cancelled,
];

static ISSUED_VOCABULARY: [Status; 5] = [
    Status::Issued,
    Status::Deposited,
    Status::Paid,
    Status::Rejected,
    Status::Cancelled,
];

/// Labels outside the vocabulary are kept verbatim as `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Received,
    Issued,
    Deposited,
    Paid,
    Rejected,
    Cancelled,
    Unrecognized(String),
}

impl Status {
    pub fn initial(direction: Direction) -> Self {
        match direction {
            Direction::Received => Self::Received,
            Direction::Issued => Self::Issued,
        }
    }

    pub fn vocabulary(direction: Direction) -> &'static [Status] {
        match direction {
            Direction::Received => &RECEIVED_VOCABULARY,
            Direction::Issued => &ISSUED_VOCABULARY,
        }
    }

    pub fn is_valid_for(&self, direction: Direction) -> bool {
        Self::vocabulary(direction).contains(self)
    }

    /// Not yet paid, rejected or cancelled.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Received | Self::Issued | Self::Deposited)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Received => "Reçu",
            Self::Issued => "Émis",
            Self::Deposited => "Déposé",
            Self::Paid => "Payé",
            Self::Rejected => "Rejeté",
            Self::Cancelled => "Annulé",
            Self::Unrecognized(label) => label,
        }
    }
}

impl From<&str> for Status {
    fn from(label: &str) -> Self {
        match label {
            "Reçu" => Self::Received,
            "Émis" => Self::Issued,
            "Déposé" => Self::Deposited,
            "Payé" => Self::Paid,
            "Rejeté" => Self::Rejected,
            "Annulé" => Self::Cancelled,
            other => Self::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for Status {
    fn from(label: String) -> Self {
        Self::from(label.as_str())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Unrecognized(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: Uuid,
    pub kind: InstrumentKind,
    pub direction: Direction,
    pub number: String,
    pub amount: Decimal,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: Status,
    pub counterparty_name: String,
    pub bank_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInstrumentRequest {
    pub number: String,
    pub amount: Decimal,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub status: Option<Status>,
    pub counterparty_name: String,
    pub bank_name: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update. Absent fields are left untouched; an empty `notes` clears them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInstrumentRequest {
    pub number: Option<String>,
    pub amount: Option<Decimal>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<Status>,
    pub counterparty_name: Option<String>,
    pub bank_name: Option<String>,
    pub notes: Option<String>,
}
