// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer and job views over a decoded attribute group.
//
// A resource owns its group and never talks to the server.  Accessors return
// `None` for an absent attribute and for one whose value has an unexpected
// type; servers routinely omit or vary attributes and that is not an error.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use inkwire_core::types::{JobState, PrinterState};

use crate::attribute::{Attribute, AttributeGroup};
use crate::value::Value;

macro_rules! group_access {
    ($ty:ident) => {
        impl $ty {
            pub fn new(attributes: AttributeGroup) -> Self {
                Self { attributes }
            }

            /// First value of any attribute.
            pub fn get(&self, name: &str) -> Option<&Value> {
                self.attributes.get(name)
            }

            /// Every value of a multi-valued attribute.
            pub fn values<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Value> {
                self.attributes.values(name)
            }

            pub fn attributes(&self) -> &[Attribute] {
                self.attributes.attributes()
            }

            pub fn group(&self) -> &AttributeGroup {
                &self.attributes
            }

            pub fn into_group(self) -> AttributeGroup {
                self.attributes
            }

            fn str(&self, name: &str) -> Option<&str> {
                self.get(name).and_then(Value::as_str)
            }

            fn strs(&self, name: &str) -> Vec<&str> {
                self.values(name).filter_map(Value::as_str).collect()
            }
        }

        impl From<AttributeGroup> for $ty {
            fn from(attributes: AttributeGroup) -> Self {
                Self::new(attributes)
            }
        }
    };
}

/// A printer as described by a printer-attributes group.
#[derive(Debug, Clone, PartialEq)]
pub struct Printer {
    attributes: AttributeGroup,
}

group_access!(Printer);

impl Printer {
    /// `printer-uri-supported`, falling back to `printer-uri`.
    pub fn uri(&self) -> Option<&str> {
        self.str("printer-uri-supported").or_else(|| self.str("printer-uri"))
    }

    pub fn name(&self) -> Option<&str> {
        self.str("printer-name")
    }

    pub fn state(&self) -> Option<PrinterState> {
        self.state_code().and_then(PrinterState::from_ipp)
    }

    /// Raw `printer-state` enum value.
    pub fn state_code(&self) -> Option<i32> {
        self.get("printer-state").and_then(Value::as_i32)
    }

    pub fn state_message(&self) -> Option<&str> {
        self.str("printer-state-message")
    }

    pub fn state_reasons(&self) -> Vec<&str> {
        self.strs("printer-state-reasons")
    }

    pub fn info(&self) -> Option<&str> {
        self.str("printer-info")
    }

    pub fn location(&self) -> Option<&str> {
        self.str("printer-location")
    }

    pub fn make_and_model(&self) -> Option<&str> {
        self.str("printer-make-and-model")
    }

    pub fn is_accepting_jobs(&self) -> Option<bool> {
        self.get("printer-is-accepting-jobs").and_then(Value::as_bool)
    }

    pub fn document_formats(&self) -> Vec<&str> {
        self.strs("document-format-supported")
    }

    pub fn summary(&self) -> PrinterSummary {
        PrinterSummary {
            uri: self.uri().map(str::to_owned),
            name: self.name().map(str::to_owned),
            state: self.state(),
            state_message: self.state_message().map(str::to_owned),
            state_reasons: owned(self.state_reasons()),
            info: self.info().map(str::to_owned),
            location: self.location().map(str::to_owned),
            make_and_model: self.make_and_model().map(str::to_owned),
            accepting_jobs: self.is_accepting_jobs(),
        }
    }
}

/// A print job as described by a job-attributes group.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintJob {
    attributes: AttributeGroup,
}

group_access!(PrintJob);

impl PrintJob {
    pub fn uri(&self) -> Option<&str> {
        self.str("job-uri")
    }

    pub fn id(&self) -> Option<i32> {
        self.get("job-id").and_then(Value::as_i32)
    }

    pub fn name(&self) -> Option<&str> {
        self.str("job-name")
    }

    pub fn state(&self) -> Option<JobState> {
        self.state_code().and_then(JobState::from_ipp)
    }

    /// Raw `job-state` enum value.
    pub fn state_code(&self) -> Option<i32> {
        self.get("job-state").and_then(Value::as_i32)
    }

    pub fn state_reasons(&self) -> Vec<&str> {
        self.strs("job-state-reasons")
    }

    pub fn printer_uri(&self) -> Option<&str> {
        self.str("job-printer-uri")
    }

    /// Queue name: the last path segment of `job-printer-uri`.
    pub fn printer_name(&self) -> Option<String> {
        let uri = Url::parse(self.printer_uri()?).ok()?;
        let segment = uri.path_segments()?.rev().find(|s| !s.is_empty())?;
        Some(segment.to_owned())
    }

    pub fn printer_state_message(&self) -> Option<&str> {
        self.str("job-printer-state-message")
    }

    /// `date-time-at-creation`, or `time-at-creation` read as seconds since
    /// the epoch when the server only sends the integer form.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        if let Some(at) = self.get("date-time-at-creation").and_then(Value::as_date_time) {
            return Some(*at);
        }
        let secs = match self.get("time-at-creation")? {
            Value::Integer(secs) => *secs,
            _ => return None,
        };
        DateTime::<Utc>::from_timestamp(i64::from(secs), 0).map(|at| at.fixed_offset())
    }

    pub fn number_of_documents(&self) -> Option<i32> {
        match self.get("number-of-documents")? {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn summary(&self) -> JobSummary {
        JobSummary {
            uri: self.uri().map(str::to_owned),
            id: self.id(),
            name: self.name().map(str::to_owned),
            state: self.state(),
            state_reasons: owned(self.state_reasons()),
            printer_uri: self.printer_uri().map(str::to_owned),
            printer_name: self.printer_name(),
            created_at: self.created_at(),
        }
    }
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_owned).collect()
}

/// Detached snapshot of a printer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterSummary {
    pub uri: Option<String>,
    pub name: Option<String>,
    pub state: Option<PrinterState>,
    pub state_message: Option<String>,
    pub state_reasons: Vec<String>,
    pub info: Option<String>,
    pub location: Option<String>,
    pub make_and_model: Option<String>,
    pub accepting_jobs: Option<bool>,
}

/// Detached snapshot of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub uri: Option<String>,
    pub id: Option<i32>,
    pub name: Option<String>,
    pub state: Option<JobState>,
    pub state_reasons: Vec<String>,
    pub printer_uri: Option<String>,
    pub printer_name: Option<String>,
    pub created_at: Option<DateTime<FixedOffset>>,
}
