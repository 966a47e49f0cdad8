#[cfg(test)]
mod queue_tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use bytes::Bytes;

    use streamflate_core::compression::FlushMode;
    use streamflate_core::queue::{Request, RequestQueue};
    use streamflate_core::types::EngineError;

    fn req(data: &'static [u8]) -> Request {
        Request::new(Bytes::from_static(data), FlushMode::NoFlush, None)
    }

    #[test]
    fn fifo_order_and_depth() {
        let mut q = RequestQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.enqueue(req(b"a")), 1);
        assert_eq!(q.enqueue(req(b"bb")), 2);
        assert_eq!(q.enqueue(req(b"ccc")), 3);

        assert_eq!(q.peek_head().map(Request::len), Some(1));
        assert_eq!(q.pop_head().map(|r| r.len()), Some(1));
        assert_eq!(q.pop_head().map(|r| r.len()), Some(2));
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn advancing_head_shrinks_remaining_input() {
        let mut q = RequestQueue::new();
        q.enqueue(req(b"0123456789"));
        q.enqueue(req(b"xyz"));
        assert_eq!(q.pending_bytes(), 13);

        let head = q.peek_head_mut().unwrap();
        head.advance(4);
        assert_eq!(&head.remaining()[..], b"456789");
        assert_eq!(head.remaining_len(), 6);
        assert_eq!(head.len(), 10);
        assert_eq!(q.pending_bytes(), 9);
    }

    #[test]
    fn completion_fires_once_with_result() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        let r = Request::new(
            Bytes::new(),
            FlushMode::Finish,
            Some(Box::new(move |res: Result<(), EngineError>| s.borrow_mut().push(res))),
        );
        assert!(r.is_empty());
        assert_eq!(r.flush_mode(), FlushMode::Finish);
        r.complete(Err(EngineError::WriteAfterEnd));
        assert_eq!(*seen.borrow(), vec![Err(EngineError::WriteAfterEnd)]);
    }

    #[test]
    fn completing_without_callback_is_silent() {
        req(b"quiet").complete(Ok(()));
    }
}
