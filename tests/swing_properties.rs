use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slicemap::analysis::builtin::{CoverageAnalyzer, DoublesAnalyzer};
use slicemap::analysis::{BucketedValue, PerHand};
use slicemap::{
    AnalysisContext, AnalysisError, Beatmap, Bomb, CutDirection, Hand, MapMetadata, Note,
    Obstacle, Parity, ParityStrategy, ResetType, SliceMap, SliceMapConfig, Swing, SwingAnalyzer,
    SwingKind, SwingPipeline,
};
use std::sync::Arc;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn metadata(bpm: f32) -> MapMetadata {
    MapMetadata::new("Test Song", "ExpertPlus", bpm)
}

fn random_beatmap(seed: u64, notes: usize) -> Beatmap {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut beat = 0.0f32;
    let mut timeline = Vec::with_capacity(notes);
    let mut bombs = Vec::new();
    let mut obstacles = Vec::new();
    for _ in 0..notes {
        beat += [0.0, 0.25, 0.5, 1.0][rng.random_range(0..4)];
        let note = Note::from_raw(
            beat,
            rng.random_range(0..4),
            rng.random_range(0..3),
            rng.random_range(0..2),
            rng.random_range(0..9),
        )
        .unwrap();
        timeline.push(note);
        if rng.random_bool(0.2) {
            bombs.push(Bomb::new(
                beat + 0.125,
                rng.random_range(0..4),
                rng.random_range(0..3),
            ));
        }
        if rng.random_bool(0.03) {
            obstacles.push(Obstacle::from_raw(
                beat,
                rng.random_range(0..4),
                rng.random_range(0..3),
                rng.random_range(1..4) as f32,
                rng.random_range(1..4),
                rng.random_range(1..6),
            ));
        }
    }
    Beatmap::new(metadata(150.0), timeline, bombs, obstacles)
}

fn assert_well_formed(map: &SliceMap) {
    for swing in map.swings() {
        assert!(swing.start_beat <= swing.end_beat, "{:?}", swing);
        match swing.kind {
            SwingKind::Cut => assert!(!swing.notes.is_empty()),
            SwingKind::Avoidance => assert!(swing.notes.is_empty()),
        }
    }
    for pair in map.swings().windows(2) {
        assert!(pair[0].end_beat <= pair[1].start_beat + 1e-4);
        if pair[1].is_reset() {
            assert_eq!(pair[0].kind, SwingKind::Avoidance);
            assert_ne!(pair[0].parity, pair[1].parity);
        }
    }
    let cuts: Vec<&Swing> = map.cuts().collect();
    for pair in cuts.windows(2) {
        if pair[1].is_reset() {
            assert_eq!(pair[0].parity, pair[1].parity);
        } else {
            assert_ne!(pair[0].parity, pair[1].parity);
        }
    }
}

#[test]
fn test_alternating_column_has_no_resets() {
    init_logger();
    let config = SliceMapConfig::default();
    for hand in [Hand::Left, Hand::Right] {
        let notes: Vec<Note> = (0..8)
            .map(|i| {
                let direction = if i % 2 == 0 {
                    CutDirection::Up
                } else {
                    CutDirection::Down
                };
                Note::new(i as f32, 0, 0, hand, direction)
            })
            .collect();
        let map = SliceMap::build(120.0, &notes, &[], &[], hand, &config).unwrap();
        assert_eq!(map.len(), 8);
        assert_eq!(map.reset_count(), 0);
        for pair in map.swings().windows(2) {
            assert_ne!(pair[0].parity, pair[1].parity);
        }
    }
}

#[test]
fn test_up_then_down_at_120_bpm() {
    init_logger();
    let notes = [
        Note::new(0.0, 1, 0, Hand::Right, CutDirection::Up),
        Note::new(1.0, 1, 0, Hand::Right, CutDirection::Down),
    ];
    let map =
        SliceMap::build(120.0, &notes, &[], &[], Hand::Right, &SliceMapConfig::default()).unwrap();
    let swings = map.swings();
    assert_eq!(swings.len(), 2);
    assert_eq!(swings[0].parity, Parity::Backhand);
    assert_eq!(swings[1].parity, Parity::Forehand);
    assert_eq!(swings[1].reset, ResetType::None);
    assert_eq!(swings[1].ebpm, 60.0);
}

#[test]
fn test_bomb_under_forehand_down_holds_parity() {
    init_logger();
    let notes = [
        Note::new(0.0, 1, 2, Hand::Right, CutDirection::Down),
        Note::new(2.0, 1, 2, Hand::Right, CutDirection::Down),
    ];
    let bombs = [Bomb::new(1.0, 1, 0)];
    let map =
        SliceMap::build(120.0, &notes, &bombs, &[], Hand::Right, &SliceMapConfig::default())
            .unwrap();
    let swings = map.swings();
    assert_eq!(swings.len(), 3);
    assert_eq!(swings[0].parity, Parity::Forehand);
    assert_eq!(swings[1].kind, SwingKind::Avoidance);
    assert_eq!(swings[1].parity, Parity::Backhand);
    assert_eq!(swings[2].reset, ResetType::Bomb);
    assert_eq!(swings[2].parity, Parity::Forehand);
    assert_eq!(map.cuts().count(), 2);
    assert_well_formed(&map);
}

#[test]
fn test_random_maps_are_well_formed_for_every_strategy() {
    init_logger();
    for seed in 0..20 {
        let beatmap = random_beatmap(seed, 150);
        for strategy in ParityStrategy::ALL {
            let config = SliceMapConfig::default().with_strategy(strategy);
            for hand in [Hand::Left, Hand::Right] {
                let map = SliceMap::from_beatmap(&beatmap, hand, &config).unwrap();
                assert_eq!(
                    map.cuts().map(|s| s.notes.len()).sum::<usize>(),
                    beatmap.notes_for(hand).count()
                );
                assert_well_formed(&map);
            }
        }
    }
}

#[test]
fn test_builds_are_deterministic() {
    init_logger();
    let pipeline = SwingPipeline::default();
    for seed in [7, 42, 1234] {
        let beatmap = random_beatmap(seed, 200);
        let first = pipeline.process(&beatmap).unwrap().to_json_pretty().unwrap();
        let second = pipeline.process(&beatmap).unwrap().to_json_pretty().unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_full_grid_coverage() {
    let meta = metadata(120.0);
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut beat = 0.0;
    for x in 0..4 {
        for y in 0..3 {
            for hand in [Hand::Left, Hand::Right] {
                for d in 0..9u8 {
                    let direction = CutDirection::try_from(d).unwrap();
                    let swing = Swing::from_notes(vec![Note::new(beat, x, y, hand, direction)], 0.1);
                    match hand {
                        Hand::Left => left.push(swing),
                        Hand::Right => right.push(swing),
                    }
                    beat += 1.0;
                }
            }
        }
    }
    let coverage = CoverageAnalyzer::new();

    let ctx = AnalysisContext::new(&meta, &left, &right, 10.0);
    let full: BucketedValue = serde_json::from_value(coverage.process(&ctx).unwrap()).unwrap();
    assert_eq!(full.overall_value, 1.0);

    let ctx = AnalysisContext::new(&meta, &[], &[], 10.0);
    let empty: BucketedValue = serde_json::from_value(coverage.process(&ctx).unwrap()).unwrap();
    assert_eq!(empty.overall_value, 0.0);
}

#[test]
fn test_synchronized_hands_are_all_doubles() {
    let meta = metadata(120.0);
    let swings = |hand: Hand, x: i32| -> Vec<Swing> {
        [1.0, 2.0, 3.0]
            .iter()
            .map(|&b| Swing::from_notes(vec![Note::new(b, x, 0, hand, CutDirection::Down)], 0.1))
            .collect()
    };
    let (left, right) = (swings(Hand::Left, 1), swings(Hand::Right, 2));
    let ctx = AnalysisContext::new(&meta, &left, &right, 10.0);
    let value: BucketedValue =
        serde_json::from_value(DoublesAnalyzer::new().process(&ctx).unwrap()).unwrap();
    assert_eq!(value.overall_value, 1.0);
}

#[derive(Debug)]
struct Exploding;

impl SwingAnalyzer for Exploding {
    fn name(&self) -> &str {
        "exploding"
    }

    fn description(&self) -> &str {
        "Fails on every map"
    }

    fn process(&self, _ctx: &AnalysisContext<'_>) -> Result<serde_json::Value, AnalysisError> {
        Err(AnalysisError::Other("no".to_string()))
    }
}

#[test]
fn test_failing_analyzer_does_not_abort_report() {
    init_logger();
    let mut pipeline = SwingPipeline::default();
    let handle = pipeline.registry_mut().register(Arc::new(Exploding));
    let beatmap = random_beatmap(3, 60);

    let report = pipeline.process(&beatmap).unwrap();
    assert!(!report.is_complete());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "exploding");
    assert_eq!(report.analytics.len(), 4);
    let horizontal: PerHand<BucketedValue> =
        serde_json::from_value(report.output("horizontal").unwrap().value.clone()).unwrap();
    assert!(horizontal.left_hand.overall_value >= 0.0);

    assert!(pipeline.registry_mut().unregister(handle));
    assert!(pipeline.process(&beatmap).unwrap().is_complete());
}

#[test]
fn test_report_json_carries_both_hands() {
    let config = SliceMapConfig::from_toml_str(
        r#"
        [parity]
        strategy = "reset_only"
        "#,
    )
    .unwrap();
    let pipeline = SwingPipeline::new(config);
    let report = pipeline.process(&random_beatmap(11, 40)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["metadata"]["song_name"], "Test Song");
    assert_eq!(
        json["left_hand"].as_array().map(Vec::len),
        Some(report.left_hand.len())
    );
    assert_eq!(json["analytics"].as_array().map(Vec::len), Some(4));
    assert!(json.get("failures").is_none());
}
