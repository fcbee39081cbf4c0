// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// IPP tag table (RFC 8010 §3.5).  Delimiter tags occupy 0x00-0x0F; every
// other byte in an attribute position is a value tag.

use std::fmt;

// ---------------------------------------------------------------------------
// Value tags (RFC 8010 §3.5.2)
// ---------------------------------------------------------------------------

/// Out-of-band: attribute is not supported by the server.
pub const UNSUPPORTED: u8 = 0x10;
/// Out-of-band: value is unknown.
pub const UNKNOWN: u8 = 0x12;
/// Out-of-band: attribute has no value.
pub const NO_VALUE: u8 = 0x13;

/// Integer (4 bytes, signed big-endian).
pub const INTEGER: u8 = 0x21;
/// Boolean (1 byte).
pub const BOOLEAN: u8 = 0x22;
/// Enum (4 bytes, same encoding as integer).
pub const ENUM: u8 = 0x23;

pub const OCTET_STRING: u8 = 0x30;
/// RFC 2579 DateAndTime (11 bytes).
pub const DATE_TIME: u8 = 0x31;
pub const RESOLUTION: u8 = 0x32;
pub const RANGE_OF_INTEGER: u8 = 0x33;
pub const BEG_COLLECTION: u8 = 0x34;
pub const TEXT_WITH_LANGUAGE: u8 = 0x35;
pub const NAME_WITH_LANGUAGE: u8 = 0x36;
pub const END_COLLECTION: u8 = 0x37;

pub const TEXT_WITHOUT_LANGUAGE: u8 = 0x41;
pub const NAME_WITHOUT_LANGUAGE: u8 = 0x42;
pub const KEYWORD: u8 = 0x44;
pub const URI: u8 = 0x45;
pub const URI_SCHEME: u8 = 0x46;
pub const CHARSET: u8 = 0x47;
pub const NATURAL_LANGUAGE: u8 = 0x48;
pub const MIME_MEDIA_TYPE: u8 = 0x49;
pub const MEMBER_ATTR_NAME: u8 = 0x4A;

/// Delimiter tags are in the range 0x00..=0x0F.
pub fn is_delimiter(tag: u8) -> bool {
    tag <= 0x0F
}

// ---------------------------------------------------------------------------
// Delimiter tags (RFC 8010 §3.5.1, PWG 5100.x extensions)
// ---------------------------------------------------------------------------

/// Attribute-group delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum GroupTag {
    OperationAttributes = 0x01,
    JobAttributes = 0x02,
    EndOfAttributes = 0x03,
    PrinterAttributes = 0x04,
    UnsupportedAttributes = 0x05,
    SubscriptionAttributes = 0x06,
    EventNotificationAttributes = 0x07,
    ResourceAttributes = 0x08,
    DocumentAttributes = 0x09,
    SystemAttributes = 0x0A,
}

impl GroupTag {
    pub fn code(self) -> u8 {
        self as u8
    }

    /// `None` for 0x00 and the reserved 0x0B-0x0F range.
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0x01 => Self::OperationAttributes,
            0x02 => Self::JobAttributes,
            0x03 => Self::EndOfAttributes,
            0x04 => Self::PrinterAttributes,
            0x05 => Self::UnsupportedAttributes,
            0x06 => Self::SubscriptionAttributes,
            0x07 => Self::EventNotificationAttributes,
            0x08 => Self::ResourceAttributes,
            0x09 => Self::DocumentAttributes,
            0x0A => Self::SystemAttributes,
            _ => return None,
        })
    }
}

impl fmt::Display for GroupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OperationAttributes => "operation-attributes-tag",
            Self::JobAttributes => "job-attributes-tag",
            Self::EndOfAttributes => "end-of-attributes-tag",
            Self::PrinterAttributes => "printer-attributes-tag",
            Self::UnsupportedAttributes => "unsupported-attributes-tag",
            Self::SubscriptionAttributes => "subscription-attributes-tag",
            Self::EventNotificationAttributes => "event-notification-attributes-tag",
            Self::ResourceAttributes => "resource-attributes-tag",
            Self::DocumentAttributes => "document-attributes-tag",
            Self::SystemAttributes => "system-attributes-tag",
        };
        f.write_str(name)
    }
}
