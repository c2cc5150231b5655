//! Behavioural tests for `BufferedTransport` over in-memory transports.

use buftransport::{
    BufferedTransport, Direction, Error, ErrorKind, LoopbackTransport, Result, Transport,
};
use proptest::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn opened(capacity: usize) -> BufferedTransport<LoopbackTransport> {
    let mut transport = BufferedTransport::with_capacity(LoopbackTransport::new(), capacity).unwrap();
    transport.open().unwrap();
    transport
}

/// Transport whose every call fails, for exercising close ordering.
#[derive(Default)]
struct FailingTransport {
    open: bool,
    close_calls: usize,
}

impl Transport for FailingTransport {
    fn is_open(&self) -> bool {
        self.open
    }

    fn open(&mut self) -> Result<()> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.close_calls += 1;
        self.open = false;
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "close failed",
        )))
    }

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize> {
        Err(Error::Io(std::io::ErrorKind::ConnectionReset.into()))
    }

    fn write(&mut self, _buf: &[u8]) -> Result<()> {
        Err(Error::Io(std::io::ErrorKind::BrokenPipe.into()))
    }
}

/// Transport that cannot connect.
#[derive(Default)]
struct RefusingTransport {
    open_calls: usize,
}

impl Transport for RefusingTransport {
    fn is_open(&self) -> bool {
        false
    }

    fn open(&mut self) -> Result<()> {
        self.open_calls += 1;
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "nobody listening",
        )))
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize> {
        Err(Error::Closed)
    }

    fn write(&mut self, _buf: &[u8]) -> Result<()> {
        Err(Error::Closed)
    }
}

#[test]
fn test_open_error_is_returned_unchanged() {
    let mut transport = BufferedTransport::new(RefusingTransport::default());

    match transport.open().unwrap_err() {
        Error::Io(e) => {
            assert_eq!(e.kind(), std::io::ErrorKind::ConnectionRefused);
            assert_eq!(e.to_string(), "nobody listening");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(transport.underlying().open_calls, 1);
    assert!(!transport.is_open());
}

#[test]
fn test_failed_drain_on_open_keeps_pending_bytes() {
    let mut transport = BufferedTransport::with_capacity(FailingTransport::default(), 16).unwrap();
    transport.write(b"staged").unwrap();

    match transport.open().unwrap_err() {
        Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe),
        other => panic!("unexpected error: {other}"),
    }
    assert!(transport.is_open());
    assert_eq!(transport.write_buffered(), 6);
}

#[test]
fn test_flush_reaches_underlying_flush() {
    let mut transport = opened(16);
    transport.write(b"abc").unwrap();
    assert_eq!(transport.underlying().stats().flush_calls, 0);

    transport.flush().unwrap();
    assert_eq!(transport.underlying().stats().flush_calls, 1);
    assert_eq!(transport.underlying().written(), b"abc");
}

#[test]
fn test_overflow_writes_before_flush() {
    init_logger();
    let mut transport = opened(8);

    transport.write(b"12345").unwrap();
    assert_eq!(transport.underlying().stats().write_calls, 0);

    transport.write(b"6789").unwrap();
    assert!(transport.underlying().stats().write_calls >= 1);

    transport.flush().unwrap();
    assert_eq!(transport.underlying().written(), b"123456789");
}

#[test]
fn test_close_flushes_pending_output() {
    init_logger();
    let mut transport = opened(64);
    transport.write(&[0xABu8; 10]).unwrap();
    assert_eq!(transport.underlying().stats().write_calls, 0);

    transport.close().unwrap();
    assert_eq!(transport.underlying().written(), &[0xABu8; 10]);
    assert_eq!(transport.underlying().stats().close_calls, 1);
}

#[test]
fn test_read_without_input_endpoint() {
    let mut transport = BufferedTransport::new(LoopbackTransport::write_only());
    transport.open().unwrap();

    let mut buf = [0u8; 4];
    let err = transport.read(&mut buf).unwrap_err();
    assert!(matches!(err, Error::Unsupported(Direction::Input)));
    assert_eq!(err.kind(), ErrorKind::Unsupported);
}

#[test]
fn test_write_without_output_endpoint() {
    let mut transport = BufferedTransport::new(LoopbackTransport::read_only());
    transport.open().unwrap();

    let err = transport.write(b"data").unwrap_err();
    assert!(matches!(err, Error::Unsupported(Direction::Output)));

    // nothing to flush is not an error
    transport.flush().unwrap();
}

#[test]
fn test_partial_read_is_not_padded() {
    let mut transport = BufferedTransport::new(LoopbackTransport::read_only());
    transport.open().unwrap();
    transport.underlying_mut().feed(&[7u8, 8, 9]);

    let mut buf = [0u8; 10];
    assert_eq!(transport.read(&mut buf).unwrap(), 3);
    assert_eq!(&buf[..3], &[7u8, 8, 9]);
}

#[test]
fn test_read_served_from_buffer() {
    let mut transport = BufferedTransport::with_capacity(LoopbackTransport::read_only(), 64).unwrap();
    transport.open().unwrap();
    transport.underlying_mut().feed(b"abcdefghijkl");

    let mut buf = [0u8; 4];
    for expected in [b"abcd", b"efgh", b"ijkl"] {
        assert_eq!(transport.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, expected);
    }
    assert_eq!(transport.underlying().stats().read_calls, 1);
    assert_eq!(transport.read(&mut buf).unwrap(), 0);
}

#[test]
fn test_double_close() {
    let mut transport = opened(16);
    transport.write(b"once").unwrap();

    transport.close().unwrap();
    transport.close().unwrap();

    assert_eq!(transport.underlying().written(), b"once");
    assert_eq!(transport.underlying().stats().write_calls, 1);
    assert_eq!(transport.underlying().stats().close_calls, 2);
}

#[test]
fn test_close_reaches_underlying_when_flush_fails() {
    init_logger();
    let mut transport = BufferedTransport::with_capacity(FailingTransport::default(), 16).unwrap();
    transport.open().unwrap();
    transport.write(b"doomed").unwrap();

    let err = transport.close().unwrap_err();
    // the flush failure comes first
    match err {
        Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(transport.underlying().close_calls, 1);
    assert!(!transport.is_open());
}

#[test]
fn test_underlying_errors_propagate_unchanged() {
    let mut transport = BufferedTransport::with_capacity(FailingTransport::default(), 4).unwrap();
    transport.open().unwrap();

    let mut buf = [0u8; 2];
    match transport.read(&mut buf).unwrap_err() {
        Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::ConnectionReset),
        other => panic!("unexpected error: {other}"),
    }

    match transport.write(b"too long").unwrap_err() {
        Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_loopback_round_trip() {
    init_logger();
    let mut transport = opened(4);

    transport.write(&[1u8, 2, 3, 4, 5, 6, 7]).unwrap();
    assert!(transport.underlying().stats().write_calls >= 1);

    transport.flush().unwrap();
    assert_eq!(transport.underlying().written(), &[1u8, 2, 3, 4, 5, 6, 7]);

    let mut buf = [0u8; 7];
    transport.read_exact(&mut buf).unwrap();
    assert_eq!(buf, [1u8, 2, 3, 4, 5, 6, 7]);

    transport.close().unwrap();
    assert_eq!(transport.underlying().stats().close_calls, 1);
}

#[test]
fn test_decorators_stack() {
    let inner = BufferedTransport::with_capacity(LoopbackTransport::new(), 8).unwrap();
    let mut outer = BufferedTransport::with_capacity(inner, 4).unwrap();
    outer.open().unwrap();

    outer.write(b"ab").unwrap();
    outer.write(b"cdefgh").unwrap();
    outer.flush().unwrap();

    assert_eq!(outer.underlying().underlying().written(), b"abcdefgh");
}

proptest! {
    #[test]
    fn prop_small_writes_stay_buffered(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..8), 0..8)
    ) {
        let capacity = 64;
        let total: usize = chunks.iter().map(Vec::len).sum();
        prop_assume!(total < capacity);

        let mut transport = opened(capacity);
        for chunk in &chunks {
            transport.write(chunk).unwrap();
        }
        prop_assert_eq!(transport.underlying().stats().write_calls, 0);

        transport.flush().unwrap();
        let expected: Vec<u8> = chunks.concat();
        prop_assert_eq!(transport.underlying().written(), expected.as_slice());
    }

    #[test]
    fn prop_bytes_arrive_in_order(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..40), 0..16),
        capacity in 1usize..32,
    ) {
        let mut transport = opened(capacity);
        for chunk in &chunks {
            transport.write(chunk).unwrap();
        }
        transport.close().unwrap();

        let expected: Vec<u8> = chunks.concat();
        prop_assert_eq!(transport.underlying().written(), expected.as_slice());
    }
}
