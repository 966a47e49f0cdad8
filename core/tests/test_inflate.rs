#[cfg(test)]
mod inflate_tests {
    use std::cell::RefCell;
    use std::io::Write;
    use std::rc::Rc;
    use std::sync::Arc;

    use bytes::Bytes;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    use streamflate_core::compression::{CodecErrorKind, CodecOptions, Format};
    use streamflate_core::engine::{compress_all, decompress_all, CallbackSink, Engine, InlineExecutor};
    use streamflate_core::types::EngineError;

    fn zlib(data: &[u8]) -> Vec<u8> {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    fn codec_kind(err: EngineError) -> CodecErrorKind {
        match err {
            EngineError::Codec(e) => e.kind(),
            other => panic!("expected a codec error, got {other:?}"),
        }
    }

    #[test]
    fn streamed_inflate_reassembles_split_input() {
        let original: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();
        let compressed = zlib(&original);

        let out = Rc::new(RefCell::new(Vec::new()));
        let collector = out.clone();
        let sink = CallbackSink::new().on_data(move |c| collector.borrow_mut().extend_from_slice(c));
        let options = CodecOptions::decompress(Format::Zlib).with_chunk_size(1024);
        let mut engine = Engine::with_executor(options, Arc::new(InlineExecutor), Box::new(sink)).unwrap();

        for piece in compressed.chunks(333) {
            engine.write(Some(Bytes::copy_from_slice(piece)), None).unwrap();
        }
        engine.end(None, None).unwrap();
        engine.run_until_idle().unwrap();

        assert!(engine.is_finished());
        assert_eq!(*out.borrow(), original);
    }

    #[test]
    fn corrupt_input_poisons_the_engine() {
        let results = Rc::new(RefCell::new(Vec::new()));
        let errors = Rc::new(RefCell::new(0));
        let counter = errors.clone();
        let sink = CallbackSink::new().on_error(move |_| *counter.borrow_mut() += 1);
        let mut engine = Engine::with_executor(
            CodecOptions::decompress(Format::Zlib),
            Arc::new(InlineExecutor),
            Box::new(sink),
        )
        .unwrap();

        for payload in [&b"not a zlib stream"[..], &b"queued behind it"[..]] {
            let r = results.clone();
            engine
                .write(Some(Bytes::from_static(payload)), Some(Box::new(move |res: Result<(), EngineError>| r.borrow_mut().push(res))))
                .unwrap();
        }

        let err = engine.run_until_idle().unwrap_err();
        assert_eq!(codec_kind(err), CodecErrorKind::Data);
        assert!(engine.is_poisoned());
        assert_eq!(*errors.borrow(), 1);

        let results = results.borrow();
        assert_eq!(results.len(), 2);
        assert!(matches!(&results[0], Err(EngineError::Codec(_))));
        assert!(matches!(&results[1], Err(EngineError::Poisoned(_))));

        assert!(matches!(engine.write(Some(Bytes::from_static(b"x")), None), Err(EngineError::Poisoned(_))));
        assert_eq!(engine.telemetry().counters.requests_failed, 2);
    }

    #[test]
    fn end_after_poison_still_reports_poison() {
        let mut engine = Engine::with_executor(
            CodecOptions::decompress(Format::Raw),
            Arc::new(InlineExecutor),
            Box::new(CallbackSink::new()),
        )
        .unwrap();
        engine.write(Some(Bytes::from_static(&[0xff; 16])), None).unwrap();
        assert!(engine.run_until_idle().is_err());
        assert!(matches!(engine.end(None, None), Err(EngineError::Poisoned(_))));
    }

    #[test]
    fn truncated_stream_fails_on_end() {
        let original: Vec<u8> = (0..4096u32).map(|i| (i * 7 % 256) as u8).collect();
        let compressed = zlib(&original);
        let cut = &compressed[..compressed.len() / 2];

        let err = decompress_all(cut, Format::Zlib).unwrap_err();
        assert_eq!(codec_kind(err), CodecErrorKind::Truncated);
    }

    #[test]
    fn truncated_gzip_trailer_fails_on_end() {
        let gz = compress_all(b"short gzip member", Format::Gzip, 6).unwrap();
        let err = decompress_all(&gz[..gz.len() - 3], Format::Gzip).unwrap_err();
        assert_eq!(codec_kind(err), CodecErrorKind::Truncated);
    }

    #[test]
    fn trailing_bytes_after_stream_end_are_ignored() {
        let mut data = zlib(b"exact");
        data.extend_from_slice(b"garbage after the adler32");
        assert_eq!(decompress_all(&data, Format::Zlib).unwrap(), b"exact");
    }

    #[test]
    fn one_shot_helpers_round_trip_every_format() {
        let input = b"one shot helpers share the streaming loop".repeat(100);
        for format in [Format::Zlib, Format::Raw, Format::Gzip] {
            let packed = compress_all(&input, format, 9).unwrap();
            assert!(packed.len() < input.len());
            assert_eq!(decompress_all(&packed, format).unwrap(), input);
        }
    }

    #[test]
    fn one_shot_rejects_bad_level() {
        assert_eq!(compress_all(b"x", Format::Zlib, 42), Err(EngineError::InvalidLevel { level: 42 }));
    }
}
