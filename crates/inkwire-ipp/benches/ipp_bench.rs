// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for request encoding and response parsing in the
// inkwire-ipp crate.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use inkwire_core::types::{Operation, Orientation, Sides};
use inkwire_ipp::{Attribute, AttributeGroup, GroupTag, IppResponse, JobBuilder, RequestBuilder, Value};

/// A CUPS-Get-Printers style response with `printers` printer groups.
fn printers_response(printers: usize) -> Vec<u8> {
    let mut buf = vec![0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01];
    AttributeGroup::new(GroupTag::OperationAttributes)
        .with("attributes-charset", Value::charset("utf-8"))
        .with("attributes-natural-language", Value::natural_language("en"))
        .encode(&mut buf)
        .expect("operation group");
    for i in 0..printers {
        let mut group = AttributeGroup::new(GroupTag::PrinterAttributes)
            .with("printer-uri-supported", Value::uri(format!("ipp://localhost:631/printers/p{i}")))
            .with("printer-name", Value::name(format!("p{i}")))
            .with("printer-state", Value::Enum(3))
            .with("printer-is-accepting-jobs", Value::Boolean(true));
        group.extend(Attribute::multi(
            "document-format-supported",
            ["application/pdf", "image/jpeg", "image/png", "image/urf"].map(Value::mime_media_type),
        ));
        group.encode(&mut buf).expect("printer group");
    }
    buf.push(GroupTag::EndOfAttributes.code());
    buf
}

fn bench_encode_request(c: &mut Criterion) {
    let get_jobs = RequestBuilder::new()
        .set_operation(Operation::GetJobs)
        .operation_attribute("printer-uri", Value::uri("ipp://localhost:631/printers/p1"))
        .operation_attribute("which-jobs", Value::keyword("not-completed"))
        .add_operation_attributes(Attribute::multi(
            "requested-attributes",
            ["job-id", "job-uri", "job-name", "job-state"].map(Value::keyword),
        ));
    c.bench_function("encode Get-Jobs request", |b| {
        b.iter(|| black_box(&get_jobs).encode().expect("encode"));
    });

    let document = vec![0x25u8; 4096];
    let job = JobBuilder::new()
        .printer("ipp://localhost:631/printers/p1")
        .title("bench")
        .copies(2)
        .range(1, Some(10))
        .orientation(Orientation::Portrait)
        .sides(Sides::TwoSidedLongEdge)
        .content(document);
    c.bench_function("encode Print-Job request (4 KiB document)", |b| {
        b.iter(|| {
            black_box(&job)
                .to_request()
                .and_then(|r| r.encode())
                .expect("encode")
        });
    });
}

fn bench_parse_response(c: &mut Criterion) {
    let small = printers_response(1);
    c.bench_function("parse response (1 printer)", |b| {
        b.iter(|| IppResponse::parse(black_box(&small)).expect("parse"));
    });

    let large = printers_response(50);
    c.bench_function("parse + project response (50 printers)", |b| {
        b.iter(|| {
            IppResponse::parse(black_box(&large))
                .expect("parse")
                .into_printers()
        });
    });
}

criterion_group!(benches, bench_encode_request, bench_parse_response);
criterion_main!(benches);
