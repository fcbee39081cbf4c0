// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// IPP message framing (RFC 8010 §3.1).
//
// ```text
// version-number:  2 bytes (major, minor)
// operation-id /
// status-code:     2 bytes (big-endian u16)
// request-id:      4 bytes (big-endian u32)
// attribute-groups: variable
//   delimiter-tag: 1 byte
//   attributes:    variable
//     value-tag:    1 byte
//     name-length:  2 bytes (big-endian u16)
//     name:         name-length bytes
//     value-length: 2 bytes (big-endian u16)
//     value:        value-length bytes
// end-of-attributes-tag: 1 byte (0x03)
// data: remainder
// ```
//
// Requests and responses share this layout; only the meaning of the second
// header field differs.  `decode_frame` handles both.

use inkwire_core::error::{MalformedKind, MalformedResponse};
use inkwire_core::types::IppVersion;

use crate::attribute::{Attribute, AttributeGroup};
use crate::tag::{self, GroupTag};

/// Bounds-checked cursor over a message buffer.  Every read either succeeds
/// completely or reports how many bytes were missing.
pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn at(buf: &'a [u8], pos: usize) -> Self {
        Self { buf, pos }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub(crate) fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8], MalformedResponse> {
        if len > self.remaining() {
            return Err(MalformedResponse::new(
                self.pos,
                MalformedKind::Truncated {
                    field,
                    needed: len,
                    remaining: self.remaining(),
                },
            ));
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub(crate) fn read_u8(&mut self, field: &'static str) -> Result<u8, MalformedResponse> {
        Ok(self.take(1, field)?[0])
    }

    pub(crate) fn read_u16(&mut self, field: &'static str) -> Result<u16, MalformedResponse> {
        let b = self.take(2, field)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub(crate) fn read_u32(&mut self, field: &'static str) -> Result<u32, MalformedResponse> {
        let b = self.take(4, field)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub(crate) fn rest(&mut self) -> &'a [u8] {
        let rest = &self.buf[self.pos.min(self.buf.len())..];
        self.pos = self.buf.len();
        rest
    }
}

/// A decoded IPP message, request or response.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub version: IppVersion,
    /// Operation id in a request, status code in a response.
    pub code: u16,
    pub request_id: u32,
    pub groups: Vec<AttributeGroup>,
    /// Bytes after the end-of-attributes tag (document data).
    pub data: Vec<u8>,
}

/// Decode a complete IPP message.
///
/// Fails on truncation, length overruns, reserved delimiter tags, attributes
/// outside a group and a missing end-of-attributes tag.  Never reads past
/// the buffer.
pub fn decode_frame(buf: &[u8]) -> Result<Frame, MalformedResponse> {
    if buf.len() < 8 {
        return Err(MalformedResponse::new(0, MalformedKind::ShortHeader(buf.len())));
    }

    let mut reader = Reader::new(buf);
    let major = reader.read_u8("version")?;
    let minor = reader.read_u8("version")?;
    let code = reader.read_u16("operation-id/status-code")?;
    let request_id = reader.read_u32("request-id")?;

    let mut groups: Vec<AttributeGroup> = Vec::new();
    let mut current: Option<AttributeGroup> = None;
    let mut last_name: Option<String> = None;

    loop {
        if reader.is_empty() {
            return Err(MalformedResponse::new(reader.position(), MalformedKind::MissingEndTag));
        }
        let tag_pos = reader.position();
        let tag = reader.read_u8("tag")?;

        if tag::is_delimiter(tag) {
            if let Some(group) = current.take() {
                groups.push(group);
            }
            match GroupTag::from_code(tag) {
                Some(GroupTag::EndOfAttributes) => break,
                Some(group_tag) => {
                    current = Some(AttributeGroup::new(group_tag));
                    last_name = None;
                }
                None => {
                    return Err(MalformedResponse::new(tag_pos, MalformedKind::ReservedDelimiter(tag)));
                }
            }
            continue;
        }

        let group = current
            .as_mut()
            .ok_or_else(|| MalformedResponse::new(tag_pos, MalformedKind::AttributeOutsideGroup(tag)))?;
        let attribute = Attribute::read(&mut reader, tag, last_name.as_deref())?;
        last_name = Some(attribute.name.clone());
        group.push(attribute);
    }

    Ok(Frame {
        version: IppVersion::new(major, minor),
        code,
        request_id,
        groups,
        data: reader.rest().to_vec(),
    })
}
