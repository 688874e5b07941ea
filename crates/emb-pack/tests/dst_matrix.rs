//! DST wire behavior through the public surface: header fields, record
//! coding, warnings, and corruption handling.

use emb_pack::{CommandKind, DecodeWarning, DstDecoder, DstEncoder, DstError, Pattern};

fn single_stitch(x: i32, y: i32) -> Pattern {
    let mut pattern = Pattern::new();
    pattern.add_stitch(x, y, CommandKind::Stitch);
    pattern.add_stitch(x, y, CommandKind::End);
    pattern
}

// ---------------------------------------------------------------------------
// record coding
// ---------------------------------------------------------------------------

#[test]
fn bucket_boundaries_roundtrip_exactly() {
    let deltas = [
        1, -1, 2, -2, 3, 4, 5, -5, 9, 13, 14, -14, 27, 40, 41, -41, 81, 120, 121, -121,
    ];
    for dx in deltas {
        for dy in deltas {
            let pattern = single_stitch(dx, dy);
            let bytes = DstEncoder::new().encode(&pattern);
            let decoded = DstDecoder::new().decode(&bytes).unwrap();
            assert_eq!(
                decoded.pattern.stitches(),
                pattern.stitches(),
                "delta ({dx}, {dy})"
            );
        }
    }
}

#[test]
fn model_y_is_flipped_on_the_wire() {
    // +5 in the model is -5 on the wire: -9 +3 +1.
    let bytes = DstEncoder::new().encode(&single_stitch(0, 5));
    assert_eq!(&bytes[512..515], &[0b1001_0000, 0b1000_0000, 0b0000_0011]);
}

#[test]
fn moves_past_record_range_split_and_land_exactly() {
    for (x, y) in [(300, -10), (-500, 499), (1000, 1000), (122, 0)] {
        let mut pattern = Pattern::new();
        pattern.add_stitch(x, y, CommandKind::Jump);
        pattern.add_stitch(x, y, CommandKind::End);
        let bytes = DstEncoder::new().encode(&pattern);
        let decoded = DstDecoder::new().decode(&bytes).unwrap();
        let rows = decoded.pattern.stitches();
        // Splitting inserts intermediate jumps; the landing point and the
        // kinds are what must survive.
        assert!(rows.len() >= 2);
        assert!(rows[..rows.len() - 1]
            .iter()
            .all(|s| s.command == CommandKind::Jump));
        let last_jump = rows[rows.len() - 2];
        assert_eq!((last_jump.x, last_jump.y), (x, y));
    }
}

#[test]
fn stop_decodes_as_color_change() {
    // DST has one pause record; the stop/color-change distinction does not
    // survive a trip through the format.
    let mut pattern = Pattern::new();
    pattern.add_stitch(0, 0, CommandKind::Stitch);
    pattern.add_stitch(0, 0, CommandKind::Stop);
    pattern.add_stitch(1, 1, CommandKind::Stitch);
    pattern.add_stitch(1, 1, CommandKind::End);
    let bytes = DstEncoder::new().encode(&pattern);
    let decoded = DstDecoder::new().decode(&bytes).unwrap();
    assert_eq!(decoded.pattern.stitches()[1].command, CommandKind::ColorChange);
}

// ---------------------------------------------------------------------------
// header
// ---------------------------------------------------------------------------

#[test]
fn header_counts_records_and_color_changes() {
    let mut pattern = Pattern::new();
    pattern.add_stitch(10, 0, CommandKind::Stitch);
    pattern.add_stitch(10, 0, CommandKind::Stop);
    pattern.add_stitch(20, 0, CommandKind::Stitch);
    pattern.add_stitch(20, 0, CommandKind::ColorChange);
    pattern.add_stitch(30, 0, CommandKind::Stitch);
    pattern.add_stitch(30, 0, CommandKind::End);
    let bytes = DstEncoder::new().encode(&pattern);
    // 3 stitches + 2 pause records; stops count as color changes.
    assert_eq!(&bytes[20..31], b"ST:      5\r");
    assert_eq!(&bytes[31..38], b"CO:  2\r");
}

#[test]
fn header_extents_cover_the_whole_program() {
    let mut pattern = Pattern::new();
    pattern.add_stitch(-15, 8, CommandKind::Stitch);
    pattern.add_stitch(30, -22, CommandKind::Stitch);
    pattern.add_stitch(30, -22, CommandKind::End);
    let bytes = DstEncoder::new().encode(&pattern);
    assert_eq!(&bytes[38..47], b"+X:   30\r");
    assert_eq!(&bytes[47..56], b"-X:   15\r");
    assert_eq!(&bytes[56..65], b"+Y:    8\r");
    assert_eq!(&bytes[65..74], b"-Y:   22\r");
}

// ---------------------------------------------------------------------------
// warnings
// ---------------------------------------------------------------------------

#[test]
fn header_record_count_mismatch_warns_but_decodes() {
    let pattern = single_stitch(5, 5);
    let mut bytes = DstEncoder::new().encode(&pattern);
    bytes[20..31].copy_from_slice(format!("ST:{:7}\r", 999).as_bytes());
    let decoded = DstDecoder::new().decode(&bytes).unwrap();
    assert_eq!(decoded.pattern.stitches(), pattern.stitches());
    assert_eq!(
        decoded.warnings,
        vec![DecodeWarning::HeaderMismatch {
            field: "ST",
            declared: 999,
            actual: 1
        }]
    );
}

#[test]
fn header_color_count_mismatch_warns_but_decodes() {
    let mut bytes = DstEncoder::new().encode(&single_stitch(5, 5));
    bytes[31..38].copy_from_slice(b"CO:  7\r");
    let decoded = DstDecoder::new().decode(&bytes).unwrap();
    assert_eq!(
        decoded.warnings,
        vec![DecodeWarning::HeaderMismatch {
            field: "CO",
            declared: 7,
            actual: 0
        }]
    );
}

#[test]
fn unparseable_count_fields_are_not_checked() {
    let mut bytes = DstEncoder::new().encode(&single_stitch(5, 5));
    bytes[20..31].copy_from_slice(b"ST:xxxxxxx\r");
    bytes[31..38].copy_from_slice(b"CO:a b\r");
    let decoded = DstDecoder::new().decode(&bytes).unwrap();
    assert!(decoded.warnings.is_empty());
    assert_eq!(decoded.pattern.stitches().len(), 2);
}

// ---------------------------------------------------------------------------
// corruption
// ---------------------------------------------------------------------------

#[test]
fn short_header_is_fatal() {
    let err = DstDecoder::new().decode(&[0x20; 100]).unwrap_err();
    assert_eq!(err, DstError::HeaderTooShort(100));
}

#[test]
fn truncated_record_is_fatal_at_its_offset() {
    let mut pattern = Pattern::new();
    pattern.add_stitch(1, 0, CommandKind::Stitch);
    pattern.add_stitch(2, 0, CommandKind::Stitch);
    pattern.add_stitch(2, 0, CommandKind::End);
    let mut bytes = DstEncoder::new().encode(&pattern);
    assert_eq!(bytes.len(), 512 + 9);
    bytes.truncate(520);
    let err = DstDecoder::new().decode(&bytes).unwrap_err();
    assert_eq!(err, DstError::CorruptRecord(518));
}

#[test]
fn sequin_records_are_refused() {
    let mut bytes = DstEncoder::new().encode(&Pattern::new());
    bytes[512..515].copy_from_slice(&[0x00, 0x00, 0b0100_0011]);
    let err = DstDecoder::new().decode(&bytes).unwrap_err();
    assert_eq!(err, DstError::CorruptRecord(512));
}

#[test]
fn records_without_the_set_bits_are_refused() {
    let mut bytes = DstEncoder::new().encode(&Pattern::new());
    bytes[512..515].copy_from_slice(&[0x00, 0x00, 0x00]);
    let err = DstDecoder::new().decode(&bytes).unwrap_err();
    assert_eq!(err, DstError::CorruptRecord(512));
}

#[test]
fn positions_saturate_at_the_coordinate_ceiling() {
    // Every record is a legal +121 step; enough of them walk x past any
    // i32 position.
    let steps = 17_750_000usize;
    let mut bytes = vec![0x20u8; 512];
    bytes.reserve(3 * steps + 3);
    for _ in 0..steps {
        bytes.extend_from_slice(&[0b0000_0101, 0b0000_0101, 0b0000_0111]);
    }
    bytes.extend_from_slice(&[0x00, 0x00, 0xF3]);
    let decoded = DstDecoder::new().decode(&bytes).unwrap();
    let rows = decoded.pattern.stitches();
    assert_eq!(rows.len(), steps + 1);
    assert_eq!(rows[steps - 1].x, i32::MAX);
    assert_eq!(rows[steps - 1].y, 0);
    assert_eq!(rows[steps].command, CommandKind::End);
}

#[test]
fn clean_eof_without_end_record_synthesizes_one() {
    let pattern = single_stitch(5, 5);
    let mut bytes = DstEncoder::new().encode(&pattern);
    bytes.truncate(bytes.len() - 3); // drop the end record
    let decoded = DstDecoder::new().decode(&bytes).unwrap();
    assert_eq!(decoded.pattern.stitches(), pattern.stitches());
}
