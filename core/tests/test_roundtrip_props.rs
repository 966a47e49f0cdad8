#[cfg(test)]
mod roundtrip_props {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use bytes::Bytes;
    use proptest::prelude::*;

    use streamflate_core::compression::{CodecOptions, Format};
    use streamflate_core::engine::{decompress_all, CallbackSink, Engine, InlineExecutor};
    use streamflate_core::types::EngineError;

    fn format_strategy() -> impl Strategy<Value = Format> {
        prop_oneof![Just(Format::Zlib), Just(Format::Raw), Just(Format::Gzip)]
    }

    /// Stream `parts` through a compressing engine, one write per part.
    fn stream_compress(parts: &[Vec<u8>], format: Format, level: i32, chunk_size: usize) -> (Vec<u8>, usize) {
        let out = Rc::new(RefCell::new(Vec::new()));
        let completions = Rc::new(RefCell::new(0usize));
        let collector = out.clone();
        let sink = CallbackSink::new().on_data(move |c| collector.borrow_mut().extend_from_slice(c));
        let options = CodecOptions::compress(format).with_level(level).with_chunk_size(chunk_size);
        let mut engine = Engine::with_executor(options, Arc::new(InlineExecutor), Box::new(sink)).unwrap();

        for part in parts {
            let done = completions.clone();
            engine
                .write(Some(Bytes::from(part.clone())), Some(Box::new(move |res: Result<(), EngineError>| {
                    assert!(res.is_ok());
                    *done.borrow_mut() += 1;
                })))
                .unwrap();
        }
        engine.end(None, None).unwrap();
        engine.run_until_idle().unwrap();

        let compressed = out.borrow().clone();
        let count = *completions.borrow();
        (compressed, count)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn streamed_writes_round_trip(
            parts in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..2048), 0..8),
            format in format_strategy(),
            level in -1i32..=9,
            chunk_size in 64usize..4096,
        ) {
            let (compressed, completed) = stream_compress(&parts, format, level, chunk_size);
            prop_assert_eq!(completed, parts.len());

            let expected: Vec<u8> = parts.concat();
            let inflated = decompress_all(&compressed, format).unwrap();
            prop_assert_eq!(inflated, expected);
        }

        #[test]
        fn inflate_never_panics_on_noise(
            noise in prop::collection::vec(any::<u8>(), 0..512),
            format in format_strategy(),
        ) {
            // Arbitrary input either decodes or fails with an error.
            let _ = decompress_all(&noise, format);
        }
    }
}
