// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Protocol vocabulary shared by every Inkwire layer: versions, operation ids,
// status codes and the enum/keyword values the client reads and writes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InkwireError;

/// IPP protocol version carried in the first two bytes of every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IppVersion {
    pub major: u8,
    pub minor: u8,
}

impl IppVersion {
    pub const V1_0: Self = Self::new(1, 0);
    pub const V1_1: Self = Self::new(1, 1);
    pub const V2_0: Self = Self::new(2, 0);
    pub const V2_1: Self = Self::new(2, 1);
    pub const V2_2: Self = Self::new(2, 2);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl Default for IppVersion {
    fn default() -> Self {
        Self::V1_1
    }
}

impl fmt::Display for IppVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for IppVersion {
    type Err = InkwireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = s
            .split_once('.')
            .ok_or_else(|| InkwireError::Config(format!("invalid IPP version '{s}'")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<u8>()
                .map_err(|e| InkwireError::Config(format!("invalid IPP version '{s}': {e}")))
        };
        Ok(Self::new(parse(major)?, parse(minor)?))
    }
}

/// IPP operation identifiers (RFC 8011 §5.4.15, CUPS Implementation of IPP).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    PrintJob,
    ValidateJob,
    CreateJob,
    SendDocument,
    CancelJob,
    GetJobAttributes,
    GetJobs,
    GetPrinterAttributes,
    HoldJob,
    ReleaseJob,
    PausePrinter,
    ResumePrinter,
    PurgeJobs,
    CupsGetDefault,
    CupsGetPrinters,
}

/// Which operation attribute identifies the target of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationTarget {
    /// No target: server-wide CUPS operations.
    Server,
    /// `printer-uri`.
    Printer,
    /// `job-uri`, or `printer-uri` together with `job-id`.
    Job,
}

impl Operation {
    /// The 16-bit operation-id written on the wire.
    pub fn code(self) -> u16 {
        match self {
            Self::PrintJob => 0x0002,
            Self::ValidateJob => 0x0004,
            Self::CreateJob => 0x0005,
            Self::SendDocument => 0x0006,
            Self::CancelJob => 0x0008,
            Self::GetJobAttributes => 0x0009,
            Self::GetJobs => 0x000A,
            Self::GetPrinterAttributes => 0x000B,
            Self::HoldJob => 0x000C,
            Self::ReleaseJob => 0x000D,
            Self::PausePrinter => 0x0010,
            Self::ResumePrinter => 0x0011,
            Self::PurgeJobs => 0x0012,
            Self::CupsGetDefault => 0x4001,
            Self::CupsGetPrinters => 0x4002,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            0x0002 => Self::PrintJob,
            0x0004 => Self::ValidateJob,
            0x0005 => Self::CreateJob,
            0x0006 => Self::SendDocument,
            0x0008 => Self::CancelJob,
            0x0009 => Self::GetJobAttributes,
            0x000A => Self::GetJobs,
            0x000B => Self::GetPrinterAttributes,
            0x000C => Self::HoldJob,
            0x000D => Self::ReleaseJob,
            0x0010 => Self::PausePrinter,
            0x0011 => Self::ResumePrinter,
            0x0012 => Self::PurgeJobs,
            0x4001 => Self::CupsGetDefault,
            0x4002 => Self::CupsGetPrinters,
            _ => return None,
        })
    }

    /// The operation attribute(s) that must be present before encoding.
    pub fn target(self) -> OperationTarget {
        match self {
            Self::CupsGetDefault | Self::CupsGetPrinters => OperationTarget::Server,
            Self::PrintJob
            | Self::ValidateJob
            | Self::CreateJob
            | Self::GetJobs
            | Self::GetPrinterAttributes
            | Self::PausePrinter
            | Self::ResumePrinter
            | Self::PurgeJobs => OperationTarget::Printer,
            Self::SendDocument
            | Self::CancelJob
            | Self::GetJobAttributes
            | Self::HoldJob
            | Self::ReleaseJob => OperationTarget::Job,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::PrintJob => "Print-Job",
            Self::ValidateJob => "Validate-Job",
            Self::CreateJob => "Create-Job",
            Self::SendDocument => "Send-Document",
            Self::CancelJob => "Cancel-Job",
            Self::GetJobAttributes => "Get-Job-Attributes",
            Self::GetJobs => "Get-Jobs",
            Self::GetPrinterAttributes => "Get-Printer-Attributes",
            Self::HoldJob => "Hold-Job",
            Self::ReleaseJob => "Release-Job",
            Self::PausePrinter => "Pause-Printer",
            Self::ResumePrinter => "Resume-Printer",
            Self::PurgeJobs => "Purge-Jobs",
            Self::CupsGetDefault => "CUPS-Get-Default",
            Self::CupsGetPrinters => "CUPS-Get-Printers",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Status-code class (RFC 8011 §4.1.6 / Appendix B).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Successful,
    Informational,
    Redirection,
    ClientError,
    ServerError,
    Unassigned,
}

/// IPP status code from a response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const SUCCESSFUL_OK: Self = Self(0x0000);
    pub const SUCCESSFUL_OK_IGNORED_OR_SUBSTITUTED: Self = Self(0x0001);
    pub const SUCCESSFUL_OK_CONFLICTING: Self = Self(0x0002);
    pub const CLIENT_ERROR_BAD_REQUEST: Self = Self(0x0400);
    pub const CLIENT_ERROR_FORBIDDEN: Self = Self(0x0401);
    pub const CLIENT_ERROR_NOT_AUTHENTICATED: Self = Self(0x0402);
    pub const CLIENT_ERROR_NOT_AUTHORIZED: Self = Self(0x0403);
    pub const CLIENT_ERROR_NOT_POSSIBLE: Self = Self(0x0404);
    pub const CLIENT_ERROR_TIMEOUT: Self = Self(0x0405);
    pub const CLIENT_ERROR_NOT_FOUND: Self = Self(0x0406);
    pub const CLIENT_ERROR_GONE: Self = Self(0x0407);
    pub const CLIENT_ERROR_DOCUMENT_FORMAT_NOT_SUPPORTED: Self = Self(0x040A);
    pub const CLIENT_ERROR_ATTRIBUTES_OR_VALUES_NOT_SUPPORTED: Self = Self(0x040B);
    pub const SERVER_ERROR_INTERNAL_ERROR: Self = Self(0x0500);
    pub const SERVER_ERROR_OPERATION_NOT_SUPPORTED: Self = Self(0x0501);
    pub const SERVER_ERROR_SERVICE_UNAVAILABLE: Self = Self(0x0502);
    pub const SERVER_ERROR_VERSION_NOT_SUPPORTED: Self = Self(0x0503);
    pub const SERVER_ERROR_NOT_ACCEPTING_JOBS: Self = Self(0x0506);
    pub const SERVER_ERROR_BUSY: Self = Self(0x0507);

    pub fn class(self) -> StatusClass {
        match self.0 {
            0x0000..=0x00FF => StatusClass::Successful,
            0x0100..=0x01FF => StatusClass::Informational,
            0x0300..=0x03FF => StatusClass::Redirection,
            0x0400..=0x04FF => StatusClass::ClientError,
            0x0500..=0x05FF => StatusClass::ServerError,
            _ => StatusClass::Unassigned,
        }
    }

    pub fn is_success(self) -> bool {
        self.class() == StatusClass::Successful
    }

    /// The RFC 8011 keyword for well-known codes.
    pub fn name(self) -> Option<&'static str> {
        Some(match self.0 {
            0x0000 => "successful-ok",
            0x0001 => "successful-ok-ignored-or-substituted-attributes",
            0x0002 => "successful-ok-conflicting-attributes",
            0x0400 => "client-error-bad-request",
            0x0401 => "client-error-forbidden",
            0x0402 => "client-error-not-authenticated",
            0x0403 => "client-error-not-authorized",
            0x0404 => "client-error-not-possible",
            0x0405 => "client-error-timeout",
            0x0406 => "client-error-not-found",
            0x0407 => "client-error-gone",
            0x040A => "client-error-document-format-not-supported",
            0x040B => "client-error-attributes-or-values-not-supported",
            0x0500 => "server-error-internal-error",
            0x0501 => "server-error-operation-not-supported",
            0x0502 => "server-error-service-unavailable",
            0x0503 => "server-error-version-not-supported",
            0x0506 => "server-error-not-accepting-jobs",
            0x0507 => "server-error-busy",
            _ => return None,
        })
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} (0x{:04X})", self.0),
            None => write!(f, "status 0x{:04X}", self.0),
        }
    }
}

/// `printer-state` enum values (RFC 8011 §5.4.11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrinterState {
    Idle,
    Processing,
    Stopped,
}

impl PrinterState {
    pub fn from_ipp(value: i32) -> Option<Self> {
        match value {
            3 => Some(Self::Idle),
            4 => Some(Self::Processing),
            5 => Some(Self::Stopped),
            _ => None,
        }
    }

    pub fn ipp_enum_value(self) -> i32 {
        match self {
            Self::Idle => 3,
            Self::Processing => 4,
            Self::Stopped => 5,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Processing => "processing",
            Self::Stopped => "stopped",
        }
    }
}

/// `job-state` enum values (RFC 8011 §5.3.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobState {
    Pending,
    PendingHeld,
    Processing,
    ProcessingStopped,
    Canceled,
    Aborted,
    Completed,
}

impl JobState {
    pub fn from_ipp(value: i32) -> Option<Self> {
        match value {
            3 => Some(Self::Pending),
            4 => Some(Self::PendingHeld),
            5 => Some(Self::Processing),
            6 => Some(Self::ProcessingStopped),
            7 => Some(Self::Canceled),
            8 => Some(Self::Aborted),
            9 => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn ipp_enum_value(self) -> i32 {
        match self {
            Self::Pending => 3,
            Self::PendingHeld => 4,
            Self::Processing => 5,
            Self::ProcessingStopped => 6,
            Self::Canceled => 7,
            Self::Aborted => 8,
            Self::Completed => 9,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PendingHeld => "pending-held",
            Self::Processing => "processing",
            Self::ProcessingStopped => "processing-stopped",
            Self::Canceled => "canceled",
            Self::Aborted => "aborted",
            Self::Completed => "completed",
        }
    }

    /// Canceled, aborted and completed jobs never change state again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Canceled | Self::Aborted | Self::Completed)
    }
}

/// `which-jobs` filter for Get-Jobs (RFC 8011 §4.2.6.1, PWG 5100.7).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WhichJobs {
    #[default]
    NotCompleted,
    Completed,
    All,
}

impl WhichJobs {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::NotCompleted => "not-completed",
            Self::Completed => "completed",
            Self::All => "all",
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
    ReverseLandscape,
    ReversePortrait,
}

impl Orientation {
    /// IPP `orientation-requested` enum value (RFC 8011 §5.2.10).
    pub fn ipp_enum_value(&self) -> i32 {
        match self {
            Self::Portrait => 3,
            Self::Landscape => 4,
            Self::ReverseLandscape => 5,
            Self::ReversePortrait => 6,
        }
    }
}

/// Duplex printing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sides {
    OneSided,
    TwoSidedLongEdge,
    TwoSidedShortEdge,
}

impl Sides {
    /// IPP `sides` keyword (RFC 8011 §5.2.8).
    pub fn ipp_keyword(&self) -> &'static str {
        match self {
            Self::OneSided => "one-sided",
            Self::TwoSidedLongEdge => "two-sided-long-edge",
            Self::TwoSidedShortEdge => "two-sided-short-edge",
        }
    }
}
