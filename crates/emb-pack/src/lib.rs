//! Embroidery pattern model and machine-format codecs.
//!
//! A [`Pattern`] is an ordered stitch program (absolute coordinates in
//! 0.1 mm units, one command per row) plus the thread palette its color
//! changes walk through. Codecs turn patterns into machine files and back:
//! Tajima DST, and Brother PES with the embedded PEC section the machine
//! actually runs.

mod color;
mod command;
mod constants;
mod design;
mod pattern;
mod report;
mod thread;

pub mod codecs;
pub mod dst;
pub mod pes;

pub use color::{Color, ColorError};
pub use command::CommandKind;
pub use constants::EmbFormat;
pub use design::{Design, DesignCommand, DesignError, DesignStitch};
pub use pattern::{Bounds, Pattern, Stitch};
pub use report::{DecodeWarning, Decoded};
pub use thread::Thread;

pub use codecs::{decode_bytes, CodecError, Codecs, PatternCodec};
pub use dst::{DstDecoder, DstEncoder, DstError};
pub use pes::{PesDecoder, PesEncoder, PesError, PesVersion};

#[cfg(test)]
mod tests {
    use super::*;

    fn sampler() -> Pattern {
        let mut pattern = Pattern::new();
        pattern.add_thread(Thread::new(Color::new(237, 23, 31)));
        pattern.add_thread(Thread::new(Color::new(10, 85, 163)));
        pattern.add_stitch(0, 0, CommandKind::Stitch);
        pattern.add_stitch(20, 5, CommandKind::Stitch);
        pattern.add_stitch(20, 5, CommandKind::ColorChange);
        pattern.add_stitch(-40, 80, CommandKind::Jump);
        pattern.add_stitch(-38, 82, CommandKind::Stitch);
        pattern.add_stitch(-38, 82, CommandKind::End);
        pattern
    }

    #[test]
    fn dst_roundtrip_matrix() {
        let mut zigzag = Pattern::new();
        zigzag.add_thread(Thread::new(Color::new(0, 0, 0)));
        for i in 0..50 {
            zigzag.add_stitch(i * 9, (i % 2) * 30, CommandKind::Stitch);
        }
        zigzag.add_stitch(441, 30, CommandKind::End);

        for pattern in [sampler(), zigzag] {
            let bytes = DstEncoder::new().encode(&pattern);
            let decoded = DstDecoder::new().decode(&bytes).unwrap();
            assert!(decoded.warnings.is_empty(), "{:?}", decoded.warnings);
            assert_eq!(decoded.pattern.stitches(), pattern.stitches());
        }
    }

    #[test]
    fn dst_trim_becomes_net_zero_jumps() {
        let mut pattern = Pattern::new();
        pattern.add_thread(Thread::new(Color::new(0, 0, 0)));
        pattern.add_stitch(10, 10, CommandKind::Stitch);
        pattern.add_stitch(10, 10, CommandKind::Trim);
        pattern.add_stitch(12, 12, CommandKind::Stitch);
        pattern.add_stitch(12, 12, CommandKind::End);

        let bytes = DstEncoder::new().encode(&pattern);
        let decoded = DstDecoder::new().decode(&bytes).unwrap();
        let rows = decoded.pattern.stitches();
        // DST has no trim record; the trim shows up as a jump triangle that
        // returns to where it started.
        let jumps: Vec<_> = rows
            .iter()
            .filter(|s| s.command == CommandKind::Jump)
            .collect();
        assert_eq!(jumps.len(), 3);
        assert_eq!((jumps[2].x, jumps[2].y), (10, 10));
        assert_eq!(rows.last().unwrap().command, CommandKind::End);
    }

    #[test]
    fn pes_roundtrip_preserves_program_and_palette() {
        let pattern = sampler();
        let bytes = PesEncoder::new().encode(&pattern).unwrap();
        let decoded = PesDecoder::new().decode(&bytes).unwrap();
        assert!(decoded.warnings.is_empty());
        assert_eq!(decoded.pattern.stitches(), pattern.stitches());
        assert_eq!(decoded.pattern.threads(), pattern.threads());
    }

    #[test]
    fn decode_bytes_sniffs_every_format() {
        let pattern = sampler();

        let dst = DstEncoder::new().encode(&pattern);
        assert_eq!(EmbFormat::sniff(&dst), Some(EmbFormat::Dst));
        let decoded = decode_bytes(&dst).unwrap();
        assert_eq!(decoded.pattern.stitches(), pattern.stitches());

        let pes = PesEncoder::new().encode(&pattern).unwrap();
        assert_eq!(EmbFormat::sniff(&pes), Some(EmbFormat::Pes));
        let decoded = decode_bytes(&pes).unwrap();
        assert_eq!(decoded.pattern.stitches(), pattern.stitches());

        let v1 = PesEncoder::with_version(PesVersion::V1)
            .encode(&pattern)
            .unwrap();
        let mut pec = b"#PEC0001".to_vec();
        pec.extend_from_slice(&v1[22..]);
        assert_eq!(EmbFormat::sniff(&pec), Some(EmbFormat::Pec));
        let decoded = decode_bytes(&pec).unwrap();
        assert_eq!(decoded.pattern.stitches(), pattern.stitches());
    }

    #[test]
    fn decode_bytes_refuses_unknown_formats() {
        assert!(matches!(
            decode_bytes(b"GIF89a...."),
            Err(CodecError::UnrecognizedFormat)
        ));
        assert!(matches!(
            decode_bytes(&[]),
            Err(CodecError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn from_decoded_bytes_is_the_pattern_entry_point() {
        let bytes = DstEncoder::new().encode(&sampler());
        let decoded = Pattern::from_decoded_bytes(&bytes).unwrap();
        assert_eq!(decoded.pattern.count_stitches(), 3);
        assert_eq!(decoded.pattern.count_color_changes(), 1);
    }

    #[test]
    fn codecs_registry_dispatches_by_signature() {
        let pattern = sampler();
        let mut codecs = Codecs::new();
        let dst = codecs.dst.encode(&pattern).unwrap();
        let pes = codecs.pes.encode(&pattern).unwrap();
        assert_eq!(
            codecs.decode(&dst).unwrap().pattern.stitches(),
            pattern.stitches()
        );
        assert_eq!(
            codecs.decode(&pes).unwrap().pattern.stitches(),
            pattern.stitches()
        );
    }

    #[test]
    fn codecs_work_behind_the_trait() {
        let pattern = sampler();
        let mut codecs: Vec<Box<dyn PatternCodec>> = vec![
            Box::new(codecs::DstPatternCodec::new()),
            Box::new(codecs::PesPatternCodec::new()),
        ];
        for codec in codecs.iter_mut() {
            let bytes = codec.encode(&pattern).unwrap();
            let decoded = codec.decode(&bytes).unwrap();
            assert_eq!(
                decoded.pattern.stitches(),
                pattern.stitches(),
                "codec {}",
                codec.id()
            );
        }
        assert_eq!(codecs[0].format(), EmbFormat::Dst);
        assert_eq!(codecs[1].format(), EmbFormat::Pes);
    }

    #[test]
    fn design_payload_through_a_file_and_back() {
        let payload = serde_json::json!({
            "stitches": [
                {"x": 0, "y": 0, "command": "STITCH"},
                {"x": 15, "y": -8, "command": "STITCH"},
                {"x": 15, "y": -8, "command": "COLOR_CHANGE"},
                {"x": 18, "y": -5, "command": "STITCH"},
            ],
            "threads": [{"r": 237, "g": 23, "b": 31}],
            "hex_colors": ["#ed171f", "#0a55a3"],
        });
        let design: Design = serde_json::from_value(payload).unwrap();
        let pattern = Pattern::from_scratch(&design).unwrap();
        assert_eq!(pattern.threads().len(), 2);
        assert_eq!(pattern.threads()[1].color, Color::new(0x0A, 0x55, 0xA3));

        let bytes = PesEncoder::new().encode(&pattern).unwrap();
        let decoded = PesDecoder::new().decode(&bytes).unwrap();
        let round = decoded.pattern.to_design();
        // The decoder appends the end-of-program row; to_design drops it, so
        // the payload stitches come back exactly.
        assert_eq!(round.stitches, design.stitches);
        assert_eq!(round.hex_colors, vec!["#ed171f", "#0a55a3"]);
    }

    #[test]
    fn recolor_survives_reencode() {
        let mut pattern = sampler();
        pattern.recolor(&[Color::new(1, 2, 3), Color::new(4, 5, 6)]);
        let bytes = PesEncoder::new().encode(&pattern).unwrap();
        let decoded = PesDecoder::new().decode(&bytes).unwrap();
        assert_eq!(decoded.pattern.threads()[0].color, Color::new(1, 2, 3));
        assert_eq!(decoded.pattern.threads()[1].color, Color::new(4, 5, 6));
    }
}
