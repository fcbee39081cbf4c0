// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inkwire IPP: the binary IPP codec (RFC 8010), request and job builders,
// response parsing, printer/job projections and the CUPS service client.
// Shared vocabulary and errors live in `inkwire-core`.

pub mod attribute;
pub mod client;
pub mod job;
pub mod request;
pub mod resource;
pub mod response;
pub mod tag;
pub mod translit;
pub mod transport;
pub mod value;
pub mod wire;

pub use attribute::{Attribute, AttributeGroup};
pub use client::{AttributeQuery, CupsClient, JobQuery};
pub use job::{JobBuilder, PageRange};
pub use request::RequestBuilder;
pub use resource::{JobSummary, PrintJob, Printer, PrinterSummary};
pub use response::IppResponse;
pub use tag::GroupTag;
pub use transport::{HttpTransport, RequestOptions, Transport};
pub use value::Value;
pub use wire::{Frame, decode_frame};
