// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parsed IPP responses.

use tracing::debug;

use inkwire_core::error::MalformedResponse;
use inkwire_core::types::{IppVersion, StatusCode};

use crate::attribute::AttributeGroup;
use crate::resource::{PrintJob, Printer};
use crate::tag::GroupTag;
use crate::value::Value;
use crate::wire::decode_frame;

/// A response as received: status, groups in wire order, trailing payload.
#[derive(Debug, Clone, PartialEq)]
pub struct IppResponse {
    pub version: IppVersion,
    pub status: StatusCode,
    pub request_id: u32,
    pub groups: Vec<AttributeGroup>,
    pub data: Vec<u8>,
}

impl IppResponse {
    /// Parse response bytes.  See [`decode_frame`] for the failure cases.
    pub fn parse(bytes: &[u8]) -> Result<Self, MalformedResponse> {
        let frame = decode_frame(bytes)?;
        debug!(
            len = bytes.len(),
            status = frame.code,
            request_id = frame.request_id,
            groups = frame.groups.len(),
            "parsed IPP response"
        );
        Ok(Self {
            version: frame.version,
            status: StatusCode(frame.code),
            request_id: frame.request_id,
            groups: frame.groups,
            data: frame.data,
        })
    }

    /// Status in 0x0000-0x00FF.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// `status-message` from the operation group.
    pub fn status_message(&self) -> Option<&str> {
        self.operation_attributes()
            .and_then(|g| g.get("status-message"))
            .and_then(Value::as_str)
    }

    pub fn operation_attributes(&self) -> Option<&AttributeGroup> {
        self.groups_of(GroupTag::OperationAttributes).next()
    }

    pub fn groups_of(&self, tag: GroupTag) -> impl Iterator<Item = &AttributeGroup> {
        self.groups.iter().filter(move |g| g.tag() == tag)
    }

    /// One printer per printer-attributes group.
    pub fn printers(&self) -> Vec<Printer> {
        self.groups_of(GroupTag::PrinterAttributes)
            .cloned()
            .map(Printer::new)
            .collect()
    }

    /// One job per job-attributes group.
    pub fn jobs(&self) -> Vec<PrintJob> {
        self.groups_of(GroupTag::JobAttributes)
            .cloned()
            .map(PrintJob::new)
            .collect()
    }

    pub fn printer(&self) -> Option<Printer> {
        self.groups_of(GroupTag::PrinterAttributes)
            .next()
            .cloned()
            .map(Printer::new)
    }

    pub fn job(&self) -> Option<PrintJob> {
        self.groups_of(GroupTag::JobAttributes)
            .next()
            .cloned()
            .map(PrintJob::new)
    }

    pub fn into_printers(self) -> Vec<Printer> {
        self.into_groups(GroupTag::PrinterAttributes)
            .map(Printer::new)
            .collect()
    }

    pub fn into_jobs(self) -> Vec<PrintJob> {
        self.into_groups(GroupTag::JobAttributes)
            .map(PrintJob::new)
            .collect()
    }

    fn into_groups(self, tag: GroupTag) -> impl Iterator<Item = AttributeGroup> {
        self.groups.into_iter().filter(move |g| g.tag() == tag)
    }
}
