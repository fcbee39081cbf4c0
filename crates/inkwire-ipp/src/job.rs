// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Job builder: print settings to a Print-Job or Create-Job request.
//
// Only what the caller sets is sent.  There are no default copies, sides or
// orientation; the printer's own defaults apply to anything left unset.

use inkwire_core::error::{BuildError, Result};
use inkwire_core::types::{IppVersion, Operation, Orientation, Sides};

use crate::attribute::{Attribute, AttributeGroup};
use crate::request::{PRINTER_URI, RequestBuilder};
use crate::tag::GroupTag;
use crate::value::Value;

/// Inclusive page range.  `end == None` means "to the end of the document".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: i32,
    pub end: Option<i32>,
}

impl PageRange {
    pub fn new(start: i32, end: Option<i32>) -> Self {
        Self { start, end }
    }

    /// From `start` to the last page.
    pub fn from_page(start: i32) -> Self {
        Self { start, end: None }
    }

    /// The `rangeOfInteger` value, after checking `1 <= start <= end`.
    pub fn to_value(self) -> std::result::Result<Value, BuildError> {
        let upper = self.end.unwrap_or(i32::MAX);
        if self.start < 1 || upper < self.start {
            return Err(BuildError::InvalidPageRange {
                start: self.start,
                end: upper,
            });
        }
        Ok(Value::RangeOfInteger {
            lower: self.start,
            upper,
        })
    }
}

/// Fluent description of a job to submit.
#[derive(Debug, Clone, Default)]
pub struct JobBuilder {
    printer_uri: Option<String>,
    content: Option<Vec<u8>>,
    document_format: Option<String>,
    title: Option<String>,
    requesting_user: Option<String>,
    copies: Option<i32>,
    page_ranges: Vec<PageRange>,
    orientation: Option<Orientation>,
    sides: Option<Sides>,
    options: Vec<Attribute>,
    version: Option<IppVersion>,
    request_id: Option<u32>,
}

impl JobBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn printer(mut self, uri: impl Into<String>) -> Self {
        self.printer_uri = Some(uri.into());
        self
    }

    /// Document bytes.  A job with content is sent as Print-Job.
    pub fn content(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.content = Some(bytes.into());
        self
    }

    pub fn document_format(mut self, mime: impl Into<String>) -> Self {
        self.document_format = Some(mime.into());
        self
    }

    pub fn title(mut self, name: impl Into<String>) -> Self {
        self.title = Some(name.into());
        self
    }

    /// `requesting-user-name`; transliterated to ASCII on encode.
    pub fn requesting_user(mut self, name: impl Into<String>) -> Self {
        self.requesting_user = Some(name.into());
        self
    }

    pub fn copies(mut self, copies: i32) -> Self {
        self.copies = Some(copies);
        self
    }

    /// Add a page range; `end = None` prints from `start` to the last page.
    pub fn range(self, start: i32, end: Option<i32>) -> Self {
        self.page_range(PageRange::new(start, end))
    }

    pub fn page_range(mut self, range: PageRange) -> Self {
        self.page_ranges.push(range);
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn sides(mut self, sides: Sides) -> Self {
        self.sides = Some(sides);
        self
    }

    /// Arbitrary job-template attribute.  Replaces a built-in setting of
    /// the same name.
    pub fn option(mut self, name: impl Into<String>, value: Value) -> Self {
        self.options.push(Attribute::new(name, value));
        self
    }

    pub fn version(mut self, version: IppVersion) -> Self {
        self.version = Some(version);
        self
    }

    pub fn request_id(mut self, request_id: u32) -> Self {
        self.request_id = Some(request_id);
        self
    }

    pub fn printer_uri(&self) -> Option<&str> {
        self.printer_uri.as_deref()
    }

    /// Version set with [`JobBuilder::version`], if any.
    pub fn explicit_version(&self) -> Option<IppVersion> {
        self.version
    }

    /// Request id set with [`JobBuilder::request_id`], if any.
    pub fn explicit_request_id(&self) -> Option<u32> {
        self.request_id
    }

    pub fn operation(&self) -> Operation {
        if self.content.is_some() {
            Operation::PrintJob
        } else {
            Operation::CreateJob
        }
    }

    /// Translate into a request.  Fails only on an invalid page range; a
    /// missing printer is reported when the request is encoded.
    pub fn to_request(&self) -> Result<RequestBuilder> {
        let mut operation = Vec::new();
        if let Some(uri) = &self.printer_uri {
            operation.push(Attribute::new(PRINTER_URI, Value::uri(uri.as_str())));
        }
        if let Some(user) = &self.requesting_user {
            operation.push(Attribute::new("requesting-user-name", Value::ascii_name(user)));
        }
        if let Some(title) = &self.title {
            operation.push(Attribute::new("job-name", Value::name(title.as_str())));
        }
        if let Some(format) = &self.document_format {
            operation.push(Attribute::new("document-format", Value::mime_media_type(format.as_str())));
        }

        let mut job = AttributeGroup::new(GroupTag::JobAttributes);
        if let Some(copies) = self.copies {
            job.push(Attribute::new("copies", Value::Integer(copies)));
        }
        for range in &self.page_ranges {
            job.push(Attribute::new("page-ranges", range.to_value()?));
        }
        if let Some(orientation) = self.orientation {
            job.push(Attribute::new(
                "orientation-requested",
                Value::Enum(orientation.ipp_enum_value()),
            ));
        }
        if let Some(sides) = self.sides {
            job.push(Attribute::new("sides", Value::keyword(sides.ipp_keyword())));
        }
        job.replace_all(self.options.iter().cloned());

        let mut request = RequestBuilder::new()
            .set_operation(self.operation())
            .add_operation_attributes(operation);
        if let Some(version) = self.version {
            request = request.set_version(version);
        }
        if let Some(id) = self.request_id {
            request = request.set_request_id(id);
        }
        if !job.is_empty() {
            request = request.add_attribute_group(job);
        }
        if let Some(content) = &self.content {
            request = request.set_document(content.clone());
        }
        Ok(request)
    }
}
