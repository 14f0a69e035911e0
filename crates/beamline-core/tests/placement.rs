use beamline::core::io::line::LineDescription;
use beamline::core::models::element::{Element, ElementKind};
use beamline::core::models::placement::{PlacementHints, ReferencePlacement};
use beamline::core::models::value::{Header, Value};
use beamline::core::physics::kinematics::KinematicsSource;
use beamline::core::physics::particle::PROTON;
use beamline::core::units::Length;
use beamline::engine::config::{SequenceConfig, SequenceConfigBuilder};
use beamline::engine::error::SequenceError;
use beamline::sequences::Sequence;
use beamline::sequences::metadata::SequenceMetadata;
use beamline::sequences::placement::PlacementSequence;
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn m(value: f64) -> Length {
    Length::meters(value)
}

fn element(name: &str, length: f64) -> Arc<Element> {
    Arc::new(Element::new(name, ElementKind::Quadrupole).with("L", m(length)))
}

fn line() -> PlacementSequence {
    PlacementSequence::new("LINE", SequenceMetadata::default(), SequenceConfig::default())
}

#[test]
fn gap_between_two_elements_becomes_a_single_drift() {
    let mut seq = line();
    seq.place(element("A", 2.0), PlacementHints::new().at_entry(m(0.0)))
        .unwrap();
    seq.place(element("B", 2.0), PlacementHints::new().at_entry(m(5.0)))
        .unwrap();
    seq.expand(ElementKind::Drift);

    let names: Vec<_> = seq.records().iter().map(|r| r.name().to_string()).collect();
    assert_eq!(names, ["A", "DRIFT_B", "B"]);
    let drift = &seq.records()[1];
    assert_eq!(drift.element().length("L"), Some(m(3.0)));
    assert_eq!(
        (drift.entry(), drift.center(), drift.exit()),
        (Some(m(2.0)), Some(m(3.5)), Some(m(5.0)))
    );
}

#[test]
fn expansion_is_idempotent_and_ignores_tiny_gaps() {
    let mut seq = line();
    seq.place(element("A", 2.0), PlacementHints::new().at_entry(m(0.0)))
        .unwrap();
    seq.place(element("B", 2.0), PlacementHints::new().at_entry(m(2.0 + 1e-9)))
        .unwrap();
    seq.place(element("C", 1.0), PlacementHints::new().at_center(m(7.5)))
        .unwrap();

    seq.expand(ElementKind::Drift);
    let first = seq.records().to_vec();
    assert_eq!(first.len(), 4);
    assert!(seq.get("DRIFT_B").is_none());

    seq.expand(ElementKind::Drift);
    assert_eq!(seq.records(), first.as_slice());
}

#[test]
fn following_places_relative_to_the_previous_exit() {
    let mut seq = line();
    seq.place(element("A", 4.0), PlacementHints::new().at_entry(m(6.0)))
        .unwrap();
    let b = seq
        .place(
            element("B", 1.0),
            PlacementHints::new().at_entry(m(1.0)).following("A"),
        )
        .unwrap();
    assert_eq!(b.entry(), Some(m(11.0)));
}

#[test]
fn every_single_anchor_satisfies_the_length_identities() {
    let lengths = [0.0, 0.25, 1.0, 2.5, 12.0];
    for (i, length) in lengths.into_iter().enumerate() {
        for (j, reference) in [
            ReferencePlacement::Entry,
            ReferencePlacement::Center,
            ReferencePlacement::Exit,
        ]
        .into_iter()
        .enumerate()
        {
            let config = SequenceConfigBuilder::new()
                .reference_placement(reference)
                .build()
                .unwrap();
            let mut seq = PlacementSequence::new("S", SequenceMetadata::default(), config);
            let name = format!("E{i}{j}");
            let record = seq
                .place(element(&name, length), PlacementHints::new().at(m(3.0)))
                .unwrap();
            let (entry, center, exit) = (
                record.entry().unwrap(),
                record.center().unwrap(),
                record.exit().unwrap(),
            );
            assert_eq!(exit - entry, m(length));
            assert_eq!(center, entry + m(length) / 2.0);
        }
    }
}

#[test]
fn length_identities_hold_within_epsilon_for_inexact_decimals() {
    let epsilon = SequenceConfig::default().drift_epsilon;
    for (i, length) in [0.1, 0.3, 0.7, 1.1].into_iter().enumerate() {
        for (j, reference) in [
            ReferencePlacement::Entry,
            ReferencePlacement::Center,
            ReferencePlacement::Exit,
        ]
        .into_iter()
        .enumerate()
        {
            let config = SequenceConfigBuilder::new()
                .reference_placement(reference)
                .build()
                .unwrap();
            let mut seq = PlacementSequence::new("S", SequenceMetadata::default(), config);
            let record = seq
                .place(
                    element(&format!("E{i}{j}"), length),
                    PlacementHints::new().at(m(0.2)),
                )
                .unwrap();
            let (entry, center, exit) = (
                record.entry().unwrap(),
                record.center().unwrap(),
                record.exit().unwrap(),
            );
            assert!((exit - entry).approx_eq(m(length), epsilon));
            assert!(center.approx_eq(entry + m(length) / 2.0, epsilon));
        }
    }
}

#[test]
fn unresolvable_placement_names_sequence_and_element() {
    let mut seq = line();
    let err = seq
        .place(element("BAD", 1.0), PlacementHints::new().at_exit(m(f64::NAN)))
        .unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, SequenceError::Unresolvable { .. }));
    assert!(message.contains("LINE"));
    assert!(message.contains("BAD"));
    assert!(seq.is_empty());
}

#[test]
fn metadata_inference_follows_the_field_order() {
    let gamma_only: Header = [("GAMMA".to_string(), Value::from(10.0))].into_iter().collect();
    let metadata = SequenceMetadata::from_header(gamma_only).unwrap();
    assert_eq!(metadata.particle(), Some(PROTON));
    assert_eq!(
        metadata.kinematics().map(|k| k.source()),
        Some(KinematicsSource::Gamma)
    );

    let both: Header = [
        ("PC".to_string(), Value::from(2.0)),
        ("ENERGY".to_string(), Value::from(100.0)),
    ]
    .into_iter()
    .collect();
    let metadata = SequenceMetadata::from_header(both).unwrap();
    assert_eq!(
        metadata.kinematics().map(|k| k.source()),
        Some(KinematicsSource::Momentum)
    );
}

#[test]
fn line_file_to_csv_round_trip() {
    let dir = tempdir().unwrap();
    let line_path = dir.path().join("line.toml");
    fs::write(
        &line_path,
        r#"
name = "TL"
reference-placement = "center"

[header]
PARTICLE = "proton"
PC = 0.25

[[element]]
name = "Q1"
kind = "QUADRUPO"
attributes = { L = "50 cm" }
at = "25 cm"

[[element]]
name = "Q2"
kind = "QUADRUPO"
attributes = { L = "50 cm" }
at = 1.75
"#,
    )
    .unwrap();

    let description = LineDescription::load(&line_path).unwrap();
    let config = SequenceConfigBuilder::from_line(&description).build().unwrap();
    let mut seq = PlacementSequence::from_line(description, config).unwrap();
    seq.expand(ElementKind::Drift);

    let csv_path = dir.path().join("line.csv");
    seq.to_table().write_csv_path(&csv_path).unwrap();
    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "NAME,KEYWORD,L,AT_ENTRY,AT_CENTER,AT_EXIT");
    assert_eq!(lines[1], "Q1,QUADRUPO,0.5,0,0.25,0.5");
    assert_eq!(lines[2], "DRIFT_Q2,DRIFT,1,0.5,1,1.5");
    assert_eq!(lines[3], "Q2,QUADRUPO,0.5,1.5,1.75,2");
}
