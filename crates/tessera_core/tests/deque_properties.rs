//! Integration tests for `ConcurrentDeque` ordering and cancellation.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tessera_core::{ConcurrentDeque, DequeConfig, SyncConfig, SyncError};

#[test]
fn test_fifo_through_push_back_front_pop() {
    let deque = ConcurrentDeque::new();
    for value in ["a", "b", "c"] {
        deque.push_back(value);
    }
    let drained: Vec<_> = (0..3).map(|_| deque.front(true)).collect();
    assert_eq!(drained, ["a", "b", "c"]);
}

#[test]
fn test_lifo_through_push_front_front_pop() {
    let deque = ConcurrentDeque::new();
    for value in 1..=4u8 {
        deque.push_front(value);
    }
    let drained: Vec<_> = (0..4).map(|_| deque.front(true)).collect();
    assert_eq!(drained, [4, 3, 2, 1]);
}

#[test]
fn test_back_pop_reverses_push_back() {
    let deque = ConcurrentDeque::new();
    for value in 1..=3u8 {
        deque.push_back(value);
    }
    assert_eq!(deque.back(false), 3);
    assert_eq!(deque.back(true), 3);
    assert_eq!(deque.pop_back(), 2);
    assert_eq!(deque.pop_front(), 1);
    assert!(deque.empty());
}

#[test]
fn test_multiple_producers_single_consumer_loses_nothing() {
    const PRODUCERS: u64 = 4;
    const PER_PRODUCER: u64 = 500;

    let deque = Arc::new(ConcurrentDeque::new());

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|id| {
            let deque = Arc::clone(&deque);
            thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(id);
                for seq in 0..PER_PRODUCER {
                    deque.push_back(id * PER_PRODUCER + seq);
                    if rng.gen_range(0..16) == 0 {
                        thread::yield_now();
                    }
                }
            })
        })
        .collect();

    let mut received: Vec<u64> = (0..PRODUCERS * PER_PRODUCER)
        .map(|_| deque.pop_front())
        .collect();

    for p in producers {
        p.join().unwrap();
    }

    // Per-producer order survives interleaving.
    for id in 0..PRODUCERS {
        let own: Vec<_> = received
            .iter()
            .copied()
            .filter(|v| v / PER_PRODUCER == id)
            .collect();
        assert!(own.windows(2).all(|w| w[0] < w[1]));
    }

    received.sort_unstable();
    assert_eq!(received, (0..PRODUCERS * PER_PRODUCER).collect::<Vec<_>>());
    assert!(deque.empty());
}

#[test]
fn test_cancel_releases_all_blocked_readers() {
    let deque: Arc<ConcurrentDeque<String>> = Arc::new(ConcurrentDeque::new());
    let (done_tx, done_rx) = crossbeam_channel::unbounded();

    let readers: Vec<_> = (0..4)
        .map(|i| {
            let deque = Arc::clone(&deque);
            let done_tx = done_tx.clone();
            thread::spawn(move || {
                let value = if i % 2 == 0 {
                    deque.front(true)
                } else {
                    deque.back(false)
                };
                done_tx.send(value).unwrap();
            })
        })
        .collect();
    drop(done_tx);

    assert!(done_rx.recv_timeout(Duration::from_millis(50)).is_err());

    let start = Instant::now();
    deque.cancel();
    let values: Vec<String> = done_rx.iter().collect();

    assert!(start.elapsed() < Duration::from_secs(5));
    assert_eq!(values.len(), 4);
    assert!(values.iter().all(String::is_empty));
    for r in readers {
        r.join().unwrap();
    }
}

#[test]
fn test_cancel_twice_matches_cancel_once() {
    let deque: ConcurrentDeque<i32> = ConcurrentDeque::new();
    deque.push_back(1);

    deque.cancel();
    deque.cancel();

    assert!(deque.is_canceled());
    assert_eq!(deque.front_checked(true), Ok(1));
    assert_eq!(deque.back_checked(false), Err(SyncError::Canceled));
    assert_eq!(deque.front(false), 0);
}

#[test]
fn test_process_deque_is_one_critical_section() {
    let deque = Arc::new(ConcurrentDeque::new());
    for value in 0..100u32 {
        deque.push_back(value);
    }

    let rotators: Vec<_> = (0..4)
        .map(|_| {
            let deque = Arc::clone(&deque);
            thread::spawn(move || {
                for _ in 0..250 {
                    deque.process_deque(|items| {
                        if let Some(head) = items.pop_front() {
                            items.push_back(head);
                        }
                    });
                }
            })
        })
        .collect();

    for r in rotators {
        r.join().unwrap();
    }

    // 1000 rotations of a 100 element ring land back on the start.
    let ring = deque.process_deque(|items| items.iter().copied().collect::<Vec<_>>());
    assert_eq!(ring, (0..100).collect::<Vec<_>>());
}

#[test]
fn test_deque_from_loaded_config() {
    let config = SyncConfig::from_toml_str("[deque]\ninitial_capacity = 128\n").unwrap();
    assert_eq!(config.deque, DequeConfig { initial_capacity: 128 });

    let deque: ConcurrentDeque<u16> = ConcurrentDeque::from_config(&config.deque);
    assert!(deque.process_deque(|items| items.capacity()) >= 128);
    assert_eq!(deque.size(), 0);
}
