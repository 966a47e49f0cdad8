#[cfg(test)]
mod session_tests {
    use streamflate_core::compression::{
        CodecOptions, CodecSession, Direction, FlushMode, Format, StepStatus, Strategy,
    };
    use streamflate_core::constants::{MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};
    use streamflate_core::types::EngineError;

    #[test]
    fn level_out_of_range_is_rejected() {
        for level in [-2, 10, 11, i32::MAX] {
            let err = CodecSession::new(&CodecOptions::default().with_level(level)).err();
            assert_eq!(err, Some(EngineError::InvalidLevel { level }));
        }
    }

    #[test]
    fn strategy_out_of_range_is_rejected() {
        let err = CodecSession::new(&CodecOptions::default().with_strategy(9)).err();
        assert_eq!(err, Some(EngineError::InvalidStrategy { strategy: 9 }));
        let err = CodecSession::new(&CodecOptions::default().with_strategy(-1)).err();
        assert_eq!(err, Some(EngineError::InvalidStrategy { strategy: -1 }));
    }

    #[test]
    fn level_is_checked_before_strategy() {
        let opts = CodecOptions::default().with_level(12).with_strategy(12);
        assert_eq!(CodecSession::new(&opts).err(), Some(EngineError::InvalidLevel { level: 12 }));
    }

    #[test]
    fn chunk_size_bounds() {
        assert!(CodecSession::new(&CodecOptions::default().with_chunk_size(MIN_CHUNK_SIZE)).is_ok());
        let err = CodecSession::new(&CodecOptions::default().with_chunk_size(MIN_CHUNK_SIZE - 1)).err();
        assert_eq!(
            err,
            Some(EngineError::InvalidChunkSize { size: MIN_CHUNK_SIZE - 1, min: MIN_CHUNK_SIZE, max: MAX_CHUNK_SIZE })
        );
        assert!(CodecSession::new(&CodecOptions::default().with_chunk_size(MAX_CHUNK_SIZE + 1)).is_err());
    }

    #[test]
    fn default_level_resolves_and_strategies_validate() {
        let session = CodecSession::new(&CodecOptions::default().with_level(-1).with_strategy(3)).unwrap();
        assert_eq!(session.options().level.get(), 6);
        assert_eq!(session.options().strategy, Strategy::Rle);
        assert_eq!(session.options().direction, Direction::Compress);
    }

    #[test]
    fn step_reports_bounded_progress() {
        let mut session = CodecSession::new(&CodecOptions::default().with_chunk_size(64)).unwrap();
        assert_eq!(session.capacity(), 64);

        let input = vec![7u8; 4096];
        let p = session.step(&input, FlushMode::NoFlush).unwrap();
        assert!(p.consumed <= input.len());
        assert!(p.produced <= 64);
        assert_eq!(p.status, StepStatus::Continue);

        // Drain the rest with Finish until the stream ends.
        let mut offset = p.consumed;
        let mut status = p.status;
        let mut guard = 0;
        while status != StepStatus::StreamEnd {
            let p = session.step(&input[offset..], FlushMode::Finish).unwrap();
            offset += p.consumed;
            status = p.status;
            guard += 1;
            assert!(guard < 10_000, "stream never ended");
        }
        assert_eq!(offset, input.len());

        let stats = session.finalize();
        assert_eq!(stats.total_in, input.len() as u64);
        assert!(stats.steps >= 2);
    }

    #[test]
    fn codec_names_follow_direction_and_format() {
        let name = |opts: CodecOptions| CodecSession::new(&opts).unwrap().codec_name();
        assert_eq!(name(CodecOptions::compress(Format::Zlib)), "deflate");
        assert_eq!(name(CodecOptions::compress(Format::Gzip)), "gzip");
        assert_eq!(name(CodecOptions::decompress(Format::Raw)), "inflate-raw");
        assert_eq!(name(CodecOptions::decompress(Format::Gzip)), "gunzip");
    }
}
