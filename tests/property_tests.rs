//! Property-based tests for realm_bridge using proptest

use proptest::prelude::*;
use realm_bridge::backend::MemoryContext;
use realm_bridge::config::BridgeConfig;
use realm_bridge::core::{
    array_fn, object_fn, ArrayEncoder, BackendLevel, Field, Level, LoggerError, ObjectEncoder,
    Realm, Value,
};
use realm_bridge::encoding::{DataEncoder, FieldEncoder, Pools};
use realm_bridge::Logger;
use std::collections::BTreeMap;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warn),
        Just(Level::Error),
        Just(Level::DPanic),
        Just(Level::Panic),
        Just(Level::Fatal),
    ]
}

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,7}"
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Level string conversions roundtrip
    #[test]
    fn test_level_str_roundtrip(level in any_level(), lower in any::<bool>()) {
        let text = if lower { level.to_str().to_lowercase() } else { level.to_str().to_string() };
        let parsed: Level = text.parse().unwrap();
        prop_assert_eq!(level, parsed);
        prop_assert_eq!(format!("{}", level), level.to_str());
    }

    /// Mapping to backend buckets never inverts severity
    #[test]
    fn test_backend_mapping_is_monotonic(a in any_level(), b in any_level()) {
        if a <= b {
            prop_assert!(a.backend_level() <= b.backend_level());
        }
        if a >= Level::Error {
            prop_assert_eq!(a.backend_level(), BackendLevel::Error);
        }
    }
}

// ============================================================================
// Realm Tests
// ============================================================================

proptest! {
    /// Dotted names become slash-separated realms below the root
    #[test]
    fn test_realm_for_logger_name(segments in prop::collection::vec(key(), 1..5)) {
        let name = segments.join(".");
        let realm = Realm::for_logger_name("root", &name);

        prop_assert_eq!(realm.name(), format!("root/{}", segments.join("/")));
        prop_assert!(!realm.name().contains('.'));
        prop_assert!(realm.is_within(&Realm::new("root")));
    }
}

// ============================================================================
// Encoder Tests
// ============================================================================

proptest! {
    /// Every opened namespace prefixes the following keys
    #[test]
    fn test_namespace_prefix(namespaces in prop::collection::vec(key(), 0..4), leaf in key()) {
        let ctx = Arc::new(MemoryContext::default());
        let encoder = FieldEncoder::new(ctx);
        let mut work = encoder.working();
        for ns in &namespaces {
            work.open_namespace(ns);
        }
        work.add_bool(&leaf, true);

        let mut expected = String::new();
        for ns in &namespaces {
            expected.push_str(ns);
            expected.push('/');
        }
        expected.push_str(&leaf);
        prop_assert_eq!(&work.fields()[0].key, &expected);
    }

    /// The flat sequence keeps every field, duplicates included, in order
    #[test]
    fn test_flat_fields_keep_order(values in prop::collection::vec((key(), any::<i64>()), 0..16)) {
        let ctx = Arc::new(MemoryContext::new(BackendLevel::Debug));
        let logger = Logger::new_static(ctx.clone(), "prop");
        let fields: Vec<Field> = values.iter().map(|(k, v)| Field::i64(k.clone(), *v)).collect();

        logger.info("fields", &fields);

        let record = ctx.take_records().remove(0);
        let got: Vec<(String, Value)> = record.fields.into_iter().map(|kv| (kv.key, kv.value)).collect();
        let want: Vec<(String, Value)> = values.into_iter().map(|(k, v)| (k, Value::I64(v))).collect();
        prop_assert_eq!(got, want);
    }

    /// Object text matches serde's rendering of the same map
    #[test]
    fn test_object_text_matches_serde(entries in prop::collection::btree_map(key(), any::<i32>(), 0..8)) {
        let map = entries.clone();
        let text = encode_object(&entries);
        prop_assert_eq!(text, serde_json::to_vec(&map).unwrap());
    }

    /// Finite f32 values survive the trip through JSON text unchanged
    #[test]
    fn test_f32_text_is_shortest(value in any::<f32>().prop_filter("finite", |v| v.is_finite())) {
        let text = realm_bridge::encode_array_to_text(&array_fn(move |a| {
            a.append_f32(value);
            Ok(())
        })).unwrap();
        let parsed: Vec<f32> = serde_json::from_slice(&text).unwrap();
        prop_assert_eq!(parsed[0], value);
    }

    /// A marshaler that fails part way leaves the parent exactly as it was
    #[test]
    fn test_failed_nested_encode_is_atomic(
        before in prop::collection::vec((key(), any::<u16>()), 0..6),
        partial in prop::collection::vec((key(), any::<u16>()), 0..6),
    ) {
        let mut enc = DataEncoder::new();
        for (k, v) in &before {
            enc.add_u16(k, *v);
        }
        let snapshot = enc.clone();

        let result = enc.add_object("nested", &object_fn(|o| {
            for (k, v) in &partial {
                o.add_u16(k, *v);
            }
            Err(LoggerError::other("stop"))
        }));

        prop_assert!(result.is_err());
        prop_assert_eq!(enc.object(), snapshot.object());
        prop_assert_eq!(enc.namespace(), "");
    }

    /// Pooled buffers come back empty no matter what the last call left behind
    #[test]
    fn test_pool_reuse_starts_clean(keys in prop::collection::vec(key(), 1..10), ns in key()) {
        let ctx = Arc::new(MemoryContext::default());
        let config = BridgeConfig::builder().pool_capacity(1).build().unwrap();
        let encoder = FieldEncoder::from_config(ctx, &config).unwrap();
        {
            let mut work = encoder.working();
            work.open_namespace(&ns);
            for k in &keys {
                work.add_string(k, "x");
            }
        }
        let work = encoder.working();
        prop_assert!(work.fields().is_empty());
        prop_assert_eq!(work.namespace(), "");
        prop_assert_eq!(encoder.pools().metrics().fields.hits(), 1);
    }
}

fn encode_object(entries: &BTreeMap<String, i32>) -> Vec<u8> {
    let pools = Pools::new(2);
    realm_bridge::encoding::encode_object_to_text_with(
        &pools,
        &object_fn(|o| {
            for (k, v) in entries {
                o.add_i32(k, *v);
            }
            Ok(())
        }),
    )
    .unwrap()
}
