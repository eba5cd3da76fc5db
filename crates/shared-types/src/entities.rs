//! # Core Ledger Entities
//!
//! Identity, quantity and status types shared across the ledger subsystems.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `UserId`
//! - **Ledger**: `BatchId`, `TransferId`, `ActivityId`, `U256`, `Timestamp`
//! - **Status**: `UserStatus`, `TransferStatus`, `ActivityType`

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Identifier of a registered user. Assigned once, starting at 1.
pub type UserId = u64;

/// A 20-byte external identity key.
///
/// The engine never verifies signatures; the session layer hands over an
/// address it has already authenticated. Rendered as `0x`-prefixed lowercase
/// hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address. Never a valid admin.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Builds an address from raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Builds an address with every byte set to `byte` (handy in tests).
    pub const fn repeat(byte: u8) -> Self {
        Self([byte; 20])
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true for the all-zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

/// Error parsing an address from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    /// Input was not valid hex.
    #[error("invalid hex in address: {0}")]
    InvalidHex(String),

    /// Decoded input was not exactly 20 bytes.
    #[error("address must be 20 bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let bytes = hex::decode(digits).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        let array: [u8; 20] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AddressParseError::InvalidLength(bytes.len()))?;
        Ok(Self(array))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

// =============================================================================
// CLUSTER B: LEDGER
// =============================================================================

/// Identifier of a batch (token). Assigned monotonically, starting at 1.
pub type BatchId = u64;

/// Identifier of a transfer. Assigned monotonically, starting at 1.
pub type TransferId = u64;

/// Identifier of an activity log entry. Assigned monotonically, starting at 1.
pub type ActivityId = u64;

/// Timestamp in seconds since UNIX epoch.
pub type Timestamp = u64;

// =============================================================================
// CLUSTER C: STATUS
// =============================================================================

/// Approval status of a registered user.
///
/// Only `Approved` users may create batches, request transfers or annotate
/// batches. The admin may overwrite any status with any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UserStatus {
    /// Self-requested, awaiting an admin decision.
    #[default]
    Pending,
    /// Allowed to write.
    Approved,
    /// Refused by the admin.
    Rejected,
    /// Access withdrawn.
    Canceled,
}

impl UserStatus {
    /// All statuses in wire order.
    pub const ALL: [UserStatus; 4] = [
        UserStatus::Pending,
        UserStatus::Approved,
        UserStatus::Rejected,
        UserStatus::Canceled,
    ];

    /// Stable numeric code (0 = Pending .. 3 = Canceled).
    pub fn code(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Approved => 1,
            Self::Rejected => 2,
            Self::Canceled => 3,
        }
    }

    /// Inverse of [`UserStatus::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }

    /// Returns true if the status grants write access.
    pub fn is_approved(self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Canceled => "Canceled",
        };
        f.write_str(label)
    }
}

/// Transfer state in the request/accept-or-reject protocol.
///
/// ```text
/// [PENDING] ──accept (recipient)──→ [ACCEPTED]
///     │
///     └──────reject (recipient)──→ [REJECTED]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TransferStatus {
    /// Requested by the sender, awaiting the recipient.
    #[default]
    Pending,
    /// Balance moved. Terminal.
    Accepted,
    /// Declined without balance movement. Terminal.
    Rejected,
}

impl TransferStatus {
    /// Returns true for `Accepted` and `Rejected`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        };
        f.write_str(label)
    }
}

/// Kind of state-changing event recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActivityType {
    /// A batch was created. Related id: batch.
    TokenCreated,
    /// A transfer was requested. Related id: transfer.
    TransferRequested,
    /// A transfer was accepted. Related id: transfer.
    TransferAccepted,
    /// A transfer was rejected. Related id: transfer.
    TransferRejected,
    /// An address requested a role. Related id: user.
    UserRoleRequested,
    /// The admin changed a user's status. Related id: user.
    UserStatusChanged,
    /// The admin registered a user directly. Related id: user.
    UserRegisteredByAdmin,
    /// A custody actor annotated a batch. Related id: batch.
    BatchEvent,
}

impl ActivityType {
    /// All activity types in wire order.
    pub const ALL: [ActivityType; 8] = [
        ActivityType::TokenCreated,
        ActivityType::TransferRequested,
        ActivityType::TransferAccepted,
        ActivityType::TransferRejected,
        ActivityType::UserRoleRequested,
        ActivityType::UserStatusChanged,
        ActivityType::UserRegisteredByAdmin,
        ActivityType::BatchEvent,
    ];

    /// Stable numeric code (0 = TokenCreated .. 7 = BatchEvent).
    pub fn code(self) -> u8 {
        match self {
            Self::TokenCreated => 0,
            Self::TransferRequested => 1,
            Self::TransferAccepted => 2,
            Self::TransferRejected => 3,
            Self::UserRoleRequested => 4,
            Self::UserStatusChanged => 5,
            Self::UserRegisteredByAdmin => 6,
            Self::BatchEvent => 7,
        }
    }

    /// Inverse of [`ActivityType::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_display_is_prefixed_hex() {
        let addr = Address::repeat(0xAB);
        assert_eq!(addr.to_string(), format!("0x{}", "ab".repeat(20)));
    }

    #[test]
    fn test_address_parse_accepts_prefix_and_case() {
        let text = format!("0X{}", "CD".repeat(20));
        let addr: Address = text.parse().unwrap();
        assert_eq!(addr, Address::repeat(0xCD));

        let bare: Address = "11".repeat(20).parse().unwrap();
        assert_eq!(bare, Address::repeat(0x11));
    }

    #[test]
    fn test_address_parse_rejects_wrong_length() {
        let result = "0x1234".parse::<Address>();
        assert_eq!(result, Err(AddressParseError::InvalidLength(2)));
    }

    #[test]
    fn test_address_parse_rejects_bad_hex() {
        let result = format!("0x{}", "zz".repeat(20)).parse::<Address>();
        assert!(matches!(result, Err(AddressParseError::InvalidHex(_))));
    }

    #[test]
    fn test_address_serializes_as_string() {
        let addr = Address::repeat(0x01);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "01".repeat(20)));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::repeat(1).is_zero());
    }

    #[test]
    fn test_user_status_codes_match_wire_order() {
        assert_eq!(UserStatus::Pending.code(), 0);
        assert_eq!(UserStatus::Approved.code(), 1);
        assert_eq!(UserStatus::Rejected.code(), 2);
        assert_eq!(UserStatus::Canceled.code(), 3);
        assert_eq!(UserStatus::from_code(1), Some(UserStatus::Approved));
        assert_eq!(UserStatus::from_code(9), None);
    }

    #[test]
    fn test_only_approved_grants_write_access() {
        for status in UserStatus::ALL {
            assert_eq!(status.is_approved(), status == UserStatus::Approved);
        }
    }

    #[test]
    fn test_transfer_status_terminality() {
        assert!(!TransferStatus::Pending.is_terminal());
        assert!(TransferStatus::Accepted.is_terminal());
        assert!(TransferStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_activity_type_codes_round_trip() {
        for (i, kind) in ActivityType::ALL.iter().enumerate() {
            assert_eq!(kind.code() as usize, i);
            assert_eq!(ActivityType::from_code(kind.code()), Some(*kind));
        }
        assert_eq!(ActivityType::from_code(8), None);
    }
}
