use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hl7prep::prelude::*;

fn sample_cwe() -> Cwe {
    Cwe {
        identifier: Some("I10".into()),
        text: Some("Essential hypertension".into()),
        name_of_coding_system: Some("ICD10".into()),
        alternate_identifier: Some("38341003".into()),
        alternate_text: Some("Hypertensive disorder".into()),
        alternate_name_of_coding_system: Some("SCT".into()),
        original_text: Some("high blood pressure".into()),
        ..Default::default()
    }
}

fn sample_xad() -> Xad {
    Xad {
        street_address: Some(Component::composite(["123 Main St", "Main St", "123"])),
        other_designation: Some("Apt 4B".into()),
        city: Some("Springfield".into()),
        state_or_province: Some("IL".into()),
        zip_or_postal_code: Some("62704-1234".into()),
        country: Some("USA".into()),
        address_type: Some("H".into()),
    }
}

fn sample_pl() -> Pl {
    Pl {
        point_of_care: Some(Component::composite(["ICU", "1.2.40", "ISO"])),
        room: Some("204".into()),
        bed: Some("B".into()),
        facility: Some(Component::composite(["GENHOSP"])),
        ..Default::default()
    }
}

fn benchmark_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare");

    group.bench_function("coded_concept_three_repetitions", |b| {
        let preparer = FieldPreparer::coded_concept("diagnosis", sample_cwe().into())
            .unwrap()
            .with_message_id("MSG0001")
            .with_segment("DG1");
        b.iter(|| black_box(&preparer).prepare().unwrap());
    });

    group.bench_function("address_with_street_decode", |b| {
        let preparer = FieldPreparer::address("patient_address", sample_xad().into())
            .unwrap()
            .with_message_id("MSG0001")
            .with_segment("PID");
        b.iter(|| black_box(&preparer).prepare().unwrap());
    });

    group.bench_function("location_seven_designators", |b| {
        let preparer = FieldPreparer::location("assigned_location", sample_pl().into())
            .unwrap()
            .with_message_id("MSG0001")
            .with_segment("PV1");
        b.iter(|| black_box(&preparer).prepare().unwrap());
    });

    group.finish();
}

fn benchmark_construction(c: &mut Criterion) {
    c.bench_function("preparer_construction_and_config", |b| {
        let value: CompositeValue = sample_cwe().into();
        b.iter(|| {
            FieldPreparer::coded_concept(black_box("diagnosis"), black_box(value.clone()))
                .unwrap()
                .with_message_id("MSG0001")
                .with_segment("DG1")
                .with_sequence_id(6)
        });
    });
}

fn benchmark_serialization(c: &mut Criterion) {
    let records = FieldPreparer::address("patient_address", sample_xad().into())
        .unwrap()
        .with_message_id("MSG0001")
        .with_segment("PID")
        .prepare()
        .unwrap();

    c.bench_function("record_to_json", |b| {
        b.iter(|| serde_json::to_string(black_box(&records[0])).unwrap());
    });
}

criterion_group!(
    benches,
    benchmark_prepare,
    benchmark_construction,
    benchmark_serialization
);

criterion_main!(benches);
