//! Pins the layout constants against the bundled known-good viewmodels.

use asset_store::AssetPath;
use model_format::{
    extract_sequences, is_valid, layout, read_timing, validate, ModelError, SequenceTiming,
};
use pretty_assertions::assert_eq;
use testdata::{ModelBuilder, ModelKind};

fn le_i32(bytes: &[u8], at: usize) -> i32 {
    i32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
}

/// The header fields must sit where the shipped USP viewmodel has them.
#[test]
fn layout_constants_match_known_good_sample() {
    let bytes = testdata::bytes(testdata::USP);

    assert_eq!(&bytes[0..4], b"IDST");
    assert_eq!(le_i32(&bytes, 164), 14);
    assert_eq!(le_i32(&bytes, 168), 244);
    assert_eq!(
        le_i32(&bytes, layout::HEADER_SEQ_COUNT as usize),
        le_i32(&bytes, 164)
    );
    assert_eq!(
        le_i32(&bytes, layout::HEADER_SEQ_TABLE as usize),
        le_i32(&bytes, 168)
    );

    // Record 12 is `usp_inspect_sil`: 30.0 fps as float bits, 61 frames.
    let rec = 244 + 12 * 176;
    assert_eq!(&bytes[rec..rec + 15], b"usp_inspect_sil");
    assert_eq!(le_i32(&bytes, rec + 32), 30.0f32.to_bits() as i32);
    assert_eq!(le_i32(&bytes, rec + 56), 61);

    let table = layout::SequenceTable {
        count: 14,
        offset: 244,
    };
    assert_eq!(table.record_offset(12), rec as u64);
    assert_eq!(
        le_i32(&bytes, rec + layout::SEQ_FPS as usize),
        le_i32(&bytes, rec + 32)
    );
    assert_eq!(
        le_i32(&bytes, rec + layout::SEQ_FRAMES_A as usize),
        le_i32(&bytes, rec + 56)
    );
    assert_eq!(layout::SEQ_FRAMES_B, 60);
    assert_eq!(layout::SEQ_RECORD_SIZE, 176);
}

#[test]
fn bundled_fixtures_validate_as_tagged() {
    let store = testdata::dir_store();
    for meta in testdata::list() {
        let valid = is_valid(&store, &AssetPath::from(meta.path));
        assert_eq!(valid, meta.kind != ModelKind::Invalid, "{}", meta.name);
    }
}

#[test]
fn usp_sequence_table_in_order() {
    let store = testdata::dir_store();
    let names: Vec<String> = extract_sequences(&store, &AssetPath::from(testdata::USP))
        .unwrap()
        .into_iter()
        .map(|seq| seq.name)
        .collect();
    assert_eq!(
        names,
        vec![
            "idle",
            "shoot1",
            "shoot2",
            "shootlast",
            "reload",
            "draw",
            "add_silencer",
            "idle_unsil",
            "shoot1_unsil",
            "reload_unsil",
            "draw_unsil",
            "detach_silencer",
            "usp_inspect_sil",
            "usp_inspect_unsil",
        ]
    );
}

#[test]
fn timing_of_bundled_sequences() {
    let store = testdata::mem_store();
    let usp = AssetPath::from(testdata::USP);
    assert_eq!(
        read_timing(&store, &usp, 13).unwrap(),
        SequenceTiming {
            fps: 30.0f32.to_bits() as i32,
            frames_a: 75,
            frames_b: 1_000_000,
        }
    );

    let ak = AssetPath::from(testdata::AK47);
    assert_eq!(
        read_timing(&store, &ak, 6).unwrap(),
        SequenceTiming {
            fps: 24,
            frames_a: 96,
            frames_b: 0,
        }
    );
}

#[test]
fn bad_magic_fixture_reports_found_value() {
    let store = testdata::mem_store();
    match validate(&store, &AssetPath::from(testdata::AK47_BAD_MAGIC)) {
        Err(ModelError::BadMagic { found }) => assert_eq!(found, 0),
        other => panic!("expected bad magic, got {other:?}"),
    }
}

#[test]
fn truncated_builder_model_fails_extraction() {
    let bytes = ModelBuilder::new()
        .sequences(["idle", "inspect", "shoot", "reload", "draw", "idle2"])
        .truncate(1100)
        .build();
    let mut store = asset_store::MemAssetStore::new();
    store.insert("models/v_cut.mdl", bytes);
    let path = AssetPath::from("models/v_cut.mdl");

    assert!(is_valid(&store, &path));
    let err = extract_sequences(&store, &path).unwrap_err();
    assert!(err.is_format_error());
    assert!(matches!(err, ModelError::Truncated { needed: 1300, size: 1100 }));
}
