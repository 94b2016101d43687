//! Stress tests for concurrent use of one encoder tree
//!
//! These tests verify:
//! - Realm loggers are created exactly once under contention
//! - Concurrent log calls never mix fields between entries
//! - Pools stay bounded and reusable under load
//! - Dynamic loggers pick up rule changes made while logging

use realm_bridge::backend::{
    static_logging, BackendLogger, KeyValue, LoggingContext, MemoryContext,
};
use realm_bridge::config::BridgeConfig;
use realm_bridge::core::{object_fn, BackendLevel, Field, Level, Realm};
use realm_bridge::encoding::{FieldEncoder, LoggerCache};
use realm_bridge::Logger;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;

/// Context that counts factory invocations and discards output
#[derive(Default)]
struct CountingContext {
    created: AtomicUsize,
}

struct NullLogger;

impl BackendLogger for NullLogger {
    fn enabled(&self, _level: BackendLevel) -> bool {
        true
    }
    fn debug(&self, _message: &str, _fields: &[KeyValue]) {}
    fn info(&self, _message: &str, _fields: &[KeyValue]) {}
    fn warn(&self, _message: &str, _fields: &[KeyValue]) {}
    fn error(&self, _message: &str, _fields: &[KeyValue]) {}
}

impl LoggingContext for CountingContext {
    fn logger(&self, _realm: &Realm) -> Arc<dyn BackendLogger> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Arc::new(NullLogger)
    }
}

#[test]
fn test_cache_creates_each_realm_once() {
    let ctx = Arc::new(CountingContext::default());
    let cache = Arc::new(LoggerCache::new(ctx.clone(), static_logging));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let realm = Realm::new("bridge/hot");
                (0..100).map(|_| cache.get(&realm)).last()
            })
        })
        .collect();

    let loggers: Vec<Arc<dyn BackendLogger>> = handles
        .into_iter()
        .map(|h| h.join().expect("Thread panicked").expect("no logger"))
        .collect();

    assert_eq!(ctx.created.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
    for logger in &loggers[1..] {
        assert!(Arc::ptr_eq(&loggers[0], logger));
    }
}

#[test]
fn test_concurrent_entries_do_not_mix() {
    const PER_THREAD: usize = 200;

    let ctx = Arc::new(MemoryContext::new(BackendLevel::Debug));
    let config = BridgeConfig::builder().pool_capacity(4).build().unwrap();
    let logger = Logger::from_config(ctx.clone(), "stress", &config)
        .unwrap()
        .with(&[Field::string("shared", "yes")]);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = logger.named(&format!("t{}", t));
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let payload = object_fn(move |o| {
                        o.add_u64("thread", t as u64);
                        o.add_u64("seq", i as u64);
                        Ok(())
                    });
                    logger.info(
                        "tick",
                        &[
                            Field::u64("thread", t as u64),
                            Field::namespace("p"),
                            Field::object("payload", payload),
                        ],
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let records = ctx.take_records();
    assert_eq!(records.len(), THREADS * PER_THREAD);

    let mut seen = HashSet::new();
    for record in &records {
        assert_eq!(record.fields.len(), 3, "unexpected fields {:?}", record.fields);
        assert_eq!(record.fields[0], KeyValue::new("shared", "yes"));

        let thread = match &record.fields[1] {
            KeyValue { key, value } if key == "thread" => value.to_string(),
            other => panic!("unexpected field {:?}", other),
        };
        assert_eq!(record.realm.name(), format!("bridge/stress/t{}", thread));

        let payload = record.field("p/payload").and_then(|v| v.as_str()).unwrap();
        let json: serde_json::Value = serde_json::from_str(payload).unwrap();
        assert_eq!(json["thread"].to_string(), thread);
        assert!(seen.insert((thread, json["seq"].as_u64().unwrap())));
    }

    let metrics = logger.encoder().pools().metrics();
    assert!(logger.encoder().pools().fields().idle() <= 4);
    assert!(metrics.fields.hits() > 0);
}

#[test]
fn test_dynamic_rules_change_under_load() {
    let ctx = Arc::new(MemoryContext::new(BackendLevel::Error));
    let logger = Logger::new_dynamic(ctx.clone(), "live").with_level(Level::Debug);
    let barrier = Arc::new(Barrier::new(THREADS + 1));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = logger.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                for _ in 0..50 {
                    logger.info("before", &[]);
                }
                barrier.wait();
                barrier.wait();
                for _ in 0..50 {
                    logger.info("after", &[]);
                }
            })
        })
        .collect();

    barrier.wait();
    ctx.add_rule(Realm::new("bridge/live"), BackendLevel::Info);
    barrier.wait();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let records = ctx.take_records();
    assert_eq!(records.len(), THREADS * 50);
    assert!(records.iter().all(|r| r.message == "after"));
}

#[test]
fn test_shared_encoder_across_threads() {
    let ctx = Arc::new(MemoryContext::new(BackendLevel::Debug));
    let encoder = Arc::new(FieldEncoder::new(ctx.clone()));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let encoder = Arc::clone(&encoder);
            thread::spawn(move || {
                let child = encoder.with_fields(&[Field::usize("worker", t)]);
                for _ in 0..100 {
                    let mut work = child.working();
                    work.add_field(&Field::bool("ok", true));
                    assert_eq!(work.fields().len(), 2);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }
    assert!(encoder.fields().is_empty());
}
