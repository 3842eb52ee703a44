//! # Lock Benchmark
//!
//! Measures:
//! 1. Uncontended lock/unlock cost per primitive
//! 2. Contended counter throughput across thread counts
//! 3. `AtomicValue` increment vs. compare-and-swap loop

#![allow(dead_code)]
#![allow(missing_docs)]

use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tessera_core::{
    AtomicValue, ConcurrentObject, LockGuard, Lockable, Mutex, RecursiveMutex, SpinConfig,
    Spinlock,
};

const OPS_PER_THREAD: u64 = 10_000;

fn lock_unlock<M: Lockable>(mutex: &M) {
    mutex.lock();
    black_box(mutex);
    mutex.unlock();
}

/// Benchmark a single thread taking and releasing each lock type
fn bench_uncontended(c: &mut Criterion) {
    let mut group = c.benchmark_group("uncontended_lock_unlock");

    let mutex = Mutex::new();
    group.bench_function("mutex", |b| b.iter(|| lock_unlock(&mutex)));

    let recursive = RecursiveMutex::new();
    group.bench_function("recursive_mutex", |b| b.iter(|| lock_unlock(&recursive)));

    let spin = Spinlock::new();
    group.bench_function("spinlock", |b| b.iter(|| lock_unlock(&spin)));

    group.bench_function("mutex_guard", |b| {
        b.iter(|| {
            let _guard = LockGuard::new(&mutex);
            black_box(&mutex);
        });
    });

    group.finish();
}

fn run_contended<F>(threads: usize, work: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let work = Arc::new(work);
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let work = Arc::clone(&work);
            thread::spawn(move || {
                for _ in 0..OPS_PER_THREAD {
                    work();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}

/// Benchmark a shared counter hammered by several threads
fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_counter");
    group.sample_size(20);

    for threads in [2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("mutex", threads), &threads, |b, &threads| {
            b.iter(|| {
                let counter = Arc::new(ConcurrentObject::new(0u64));
                let shared = Arc::clone(&counter);
                run_contended(threads, move || *shared.lock() += 1);
                black_box(*counter.lock());
            });
        });

        group.bench_with_input(
            BenchmarkId::new("spinlock_yield_64", threads),
            &threads,
            |b, &threads| {
                b.iter(|| {
                    let spin = Arc::new(Spinlock::with_config(SpinConfig {
                        yield_after_spins: 64,
                    }));
                    let hits = Arc::new(AtomicValue::new(0u64));
                    let (spin_ref, hits_ref) = (Arc::clone(&spin), Arc::clone(&hits));
                    run_contended(threads, move || {
                        let _guard = LockGuard::new(&*spin_ref);
                        hits_ref.set(hits_ref.get_relaxed() + 1);
                    });
                    black_box(hits.get());
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("atomic_increment", threads),
            &threads,
            |b, &threads| {
                b.iter(|| {
                    let counter = Arc::new(AtomicValue::new(0u64));
                    let shared = Arc::clone(&counter);
                    run_contended(threads, move || {
                        shared.increment();
                    });
                    black_box(counter.get());
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("atomic_cas_loop", threads),
            &threads,
            |b, &threads| {
                b.iter(|| {
                    let counter = Arc::new(AtomicValue::new(0u64));
                    let shared = Arc::clone(&counter);
                    run_contended(threads, move || loop {
                        let current = shared.get();
                        if shared.compare_and_swap(current, current + 1) {
                            break;
                        }
                    });
                    black_box(counter.get());
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_uncontended, bench_contended);
criterion_main!(benches);
