// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// IPP request builder.
//
// Collects version, operation, request-id and attribute groups, then
// serializes them in the binary encoding of RFC 8010 §3.1.  Encoding has no
// hidden inputs: the same builder state always yields the same bytes.

use inkwire_core::error::{BuildError, Result};
use inkwire_core::types::{IppVersion, Operation, OperationTarget};

use crate::attribute::{Attribute, AttributeGroup};
use crate::tag::GroupTag;
use crate::value::Value;

pub const ATTRIBUTES_CHARSET: &str = "attributes-charset";
pub const ATTRIBUTES_NATURAL_LANGUAGE: &str = "attributes-natural-language";
pub const PRINTER_URI: &str = "printer-uri";
pub const JOB_URI: &str = "job-uri";
pub const JOB_ID: &str = "job-id";

/// Charset written when the caller does not supply one.
pub const DEFAULT_CHARSET: &str = "utf-8";
/// Natural language written when the caller does not supply one.
pub const DEFAULT_NATURAL_LANGUAGE: &str = "en";

/// Builder for a single IPP request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBuilder {
    version: IppVersion,
    operation: Option<Operation>,
    request_id: u32,
    operation_attributes: AttributeGroup,
    groups: Vec<AttributeGroup>,
    document: Option<Vec<u8>>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    /// An empty request: version 1.1, request-id 1, no operation.
    pub fn new() -> Self {
        Self {
            version: IppVersion::V1_1,
            operation: None,
            request_id: 1,
            operation_attributes: AttributeGroup::new(GroupTag::OperationAttributes),
            groups: Vec::new(),
            document: None,
        }
    }

    pub fn set_version(mut self, version: IppVersion) -> Self {
        self.version = version;
        self
    }

    pub fn set_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    pub fn set_request_id(mut self, request_id: u32) -> Self {
        self.request_id = request_id;
        self
    }

    /// Merge attributes into the operation group.  Any existing attribute
    /// sharing a name with the incoming ones is replaced, so later calls win.
    pub fn add_operation_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.operation_attributes.replace_all(attributes);
        self
    }

    /// Shorthand for a single-valued operation attribute.
    pub fn operation_attribute(self, name: &str, value: Value) -> Self {
        self.add_operation_attributes([Attribute::new(name, value)])
    }

    /// Append a non-operation group.  An operation group is merged into the
    /// operation attributes the same way as [`Self::add_operation_attributes`],
    /// so its attributes replace earlier ones of the same name.
    pub fn add_attribute_group(mut self, group: AttributeGroup) -> Self {
        if group.tag() == GroupTag::OperationAttributes {
            self.operation_attributes.replace_all(group.iter().cloned());
        } else {
            self.groups.push(group);
        }
        self
    }

    /// Document data sent after the end-of-attributes tag.
    pub fn set_document(mut self, document: Vec<u8>) -> Self {
        self.document = Some(document);
        self
    }

    pub fn version(&self) -> IppVersion {
        self.version
    }

    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    pub fn request_id(&self) -> u32 {
        self.request_id
    }

    pub fn operation_attributes(&self) -> &AttributeGroup {
        &self.operation_attributes
    }

    pub fn groups(&self) -> &[AttributeGroup] {
        &self.groups
    }

    pub fn document(&self) -> Option<&[u8]> {
        self.document.as_deref()
    }

    /// Serialize the request.
    ///
    /// Fails if no operation is set, a required target attribute is missing,
    /// an end-of-attributes group was added, or a name/value exceeds the
    /// 16-bit length field.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let operation = self.operation.ok_or(BuildError::MissingOperation)?;
        check_target(operation, &self.operation_attributes)?;

        let capacity = 9 + self.document.as_ref().map_or(0, Vec::len) + 64 * self.attribute_count();
        let mut buf = Vec::with_capacity(capacity);
        buf.push(self.version.major);
        buf.push(self.version.minor);
        buf.extend_from_slice(&operation.code().to_be_bytes());
        buf.extend_from_slice(&self.request_id.to_be_bytes());

        self.operation_group().encode(&mut buf)?;
        for group in &self.groups {
            group.encode(&mut buf)?;
        }
        buf.push(GroupTag::EndOfAttributes.code());

        if let Some(document) = &self.document {
            buf.extend_from_slice(document);
        }
        Ok(buf)
    }

    fn attribute_count(&self) -> usize {
        self.operation_attributes.len() + self.groups.iter().map(AttributeGroup::len).sum::<usize>()
    }

    /// The operation group as sent: charset and natural language first
    /// (RFC 8011 §4.1.4), then the caller's attributes in order.
    fn operation_group(&self) -> AttributeGroup {
        let mut group = AttributeGroup::new(GroupTag::OperationAttributes);
        let supplied = &self.operation_attributes;

        let charset = supplied
            .get(ATTRIBUTES_CHARSET)
            .cloned()
            .unwrap_or_else(|| Value::charset(DEFAULT_CHARSET));
        let language = supplied
            .get(ATTRIBUTES_NATURAL_LANGUAGE)
            .cloned()
            .unwrap_or_else(|| Value::natural_language(DEFAULT_NATURAL_LANGUAGE));
        group.insert(0, Attribute::new(ATTRIBUTES_CHARSET, charset));
        group.insert(1, Attribute::new(ATTRIBUTES_NATURAL_LANGUAGE, language));

        group.extend(
            supplied
                .iter()
                .filter(|a| a.name != ATTRIBUTES_CHARSET && a.name != ATTRIBUTES_NATURAL_LANGUAGE)
                .cloned(),
        );
        group
    }
}

fn check_target(operation: Operation, group: &AttributeGroup) -> std::result::Result<(), BuildError> {
    let missing = |attribute| BuildError::MissingAttribute {
        operation,
        attribute,
    };
    match operation.target() {
        OperationTarget::Server => Ok(()),
        OperationTarget::Printer if group.contains(PRINTER_URI) => Ok(()),
        OperationTarget::Printer => Err(missing(PRINTER_URI)),
        OperationTarget::Job if group.contains(JOB_URI) => Ok(()),
        OperationTarget::Job if group.contains(PRINTER_URI) && group.contains(JOB_ID) => Ok(()),
        OperationTarget::Job => Err(missing(JOB_URI)),
    }
}
