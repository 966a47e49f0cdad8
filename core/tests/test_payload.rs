#[cfg(test)]
mod payload_tests {
    use std::any::Any;
    use std::sync::Arc;

    use bytes::{Bytes, BytesMut};

    use streamflate_core::compression::CodecOptions;
    use streamflate_core::engine::{coerce_payload, Engine, InlineExecutor, NoopSink};
    use streamflate_core::types::EngineError;

    fn boxed<T: Any + Send>(v: T) -> Box<dyn Any + Send> {
        Box::new(v)
    }

    #[test]
    fn byte_like_values_are_accepted() {
        assert_eq!(coerce_payload(boxed(Bytes::from_static(b"b"))).unwrap(), "b");
        assert_eq!(coerce_payload(boxed(BytesMut::from(&b"bm"[..]))).unwrap(), "bm");
        assert_eq!(coerce_payload(boxed(vec![1u8, 2, 3])).unwrap(), &[1u8, 2, 3][..]);
        assert_eq!(coerce_payload(boxed(String::from("text"))).unwrap(), "text");
        assert_eq!(coerce_payload(boxed(&b"static"[..])).unwrap(), "static");
        assert_eq!(coerce_payload(boxed("str")).unwrap(), "str");
    }

    #[test]
    fn other_values_are_invalid_input() {
        assert_eq!(coerce_payload(boxed(42i32)), Err(EngineError::InvalidInputType));
        assert_eq!(coerce_payload(boxed(vec![1u16])), Err(EngineError::InvalidInputType));
    }

    #[test]
    fn write_any_rejects_before_queueing() {
        let mut engine =
            Engine::with_executor(CodecOptions::default(), Arc::new(InlineExecutor), Box::new(NoopSink)).unwrap();
        assert_eq!(engine.write_any(Some(boxed(3.5f64)), None), Err(EngineError::InvalidInputType));
        assert_eq!(engine.queue_len(), 0);
        assert_eq!(engine.telemetry().counters.requests_enqueued, 0);

        assert!(engine.write_any(Some(boxed(vec![0u8; 10])), None).unwrap());
        assert!(engine.write_any(None, None).is_ok());
    }

    #[test]
    fn write_any_after_end_reports_end_first() {
        let mut engine =
            Engine::with_executor(CodecOptions::default(), Arc::new(InlineExecutor), Box::new(NoopSink)).unwrap();
        engine.end(None, None).unwrap();
        assert_eq!(engine.write_any(Some(boxed(7u8)), None), Err(EngineError::WriteAfterEnd));
    }
}
