//! Unit tests for config_store module
//! No filesystem, timing, or external dependencies.

#![allow(clippy::panic, clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use crate::{
    StoreError,
    config_store::{ChangeHooks, ConfigStore, SectionDict, split_attr_name},
    observer::{ConfigChange, Observable, ObserverError},
};

type Log = Arc<Mutex<Vec<String>>>;

fn store() -> ConfigStore {
    ConfigStore::new("unused.ini")
}

fn observed_store() -> (ConfigStore, Arc<Mutex<Vec<ConfigChange>>>) {
    let hub = Arc::new(Observable::new());
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&changes);

    hub.subscribe(move |change: &ConfigChange| {
        sink.lock().unwrap().push(change.clone());
        Ok::<(), ObserverError>(())
    });

    (store().with_observable(hub), changes)
}

struct RecordingHooks(Log);

impl ChangeHooks for RecordingHooks {
    fn on_change(&mut self, section: &str, key: &str, value: &str) {
        self.0
            .lock()
            .unwrap()
            .push(format!("hook change {section}.{key}={value}"));
    }

    fn on_remove(&mut self, section: &str, key: Option<&str>) {
        self.0
            .lock()
            .unwrap()
            .push(format!("hook remove {section}.{}", key.unwrap_or("*")));
    }
}

#[test]
fn set_then_get() {
    let mut store = store();
    store.set("server", "port", "8080").unwrap();

    assert_eq!(store.get("server", "port"), Some("8080"));
    assert!(store.has_section("server"));
}

#[test]
fn set_converts_value_to_string() {
    let mut store = store();
    store.set("server", "port", 8080).unwrap();
    store.set("server", "debug", true).unwrap();

    assert_eq!(store.get("server", "port"), Some("8080"));
    assert_eq!(store.get("server", "debug"), Some("true"));
}

#[test]
fn set_chains() {
    let mut store = store();
    store
        .set("a", "x", "1")
        .unwrap()
        .set("b", "y", "2")
        .unwrap();

    assert_eq!(store.sections().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn names_are_case_sensitive() {
    let mut store = store();
    store.set("Server", "Port", "1").unwrap();

    assert_eq!(store.get("server", "Port"), None);
    assert_eq!(store.get("Server", "port"), None);
    assert_eq!(store.get("Server", "Port"), Some("1"));
}

#[test]
fn get_falls_back_to_defaults_then_caller() {
    let mut store = store();
    store.set_default("timeout", "60").unwrap();
    store.set("server", "host", "localhost").unwrap();

    assert_eq!(store.get_or("server", "timeout", "30"), "60");
    assert_eq!(store.get_or("missing", "timeout", "30"), "60");
    assert_eq!(store.get_or("server", "retries", "3"), "3");
    assert_eq!(store.get("server", "retries"), None);
}

#[test]
fn section_value_shadows_default() {
    let mut store = store();
    store.set_default("user", "admin").unwrap();
    store.set("oracle", "user", "scott").unwrap();

    assert_eq!(store.get("oracle", "user"), Some("scott"));
    assert_eq!(store.get("common", "user"), Some("admin"));
}

#[test]
fn default_accessors() {
    let mut store = store();
    store.set_default("postal_code", "3300").unwrap();

    assert_eq!(store.get_default("postal_code"), Some("3300"));
    assert_eq!(store.get_default_or("system", "Linux"), "Linux");
    assert_eq!(store.defaults().len(), 1);
    assert_eq!(store.sections().count(), 0);
}

#[test]
fn server_port_scenario() {
    let mut store = store();

    store.set("server", "port", "8080").unwrap();
    assert_eq!(store.get("server", "port"), Some("8080"));
    assert_eq!(store.get_or("server", "timeout", "30"), "30");
    assert!(store.remove("server", Some("port")).unwrap());
    assert_eq!(store.get_or("server", "port", "80"), "80");
}

#[test]
fn remove_key_present_and_absent() {
    let mut store = store();
    store.set("s", "a", "1").unwrap();
    store.set("s", "b", "2").unwrap();

    assert!(store.remove_key("s", "a").unwrap());
    assert!(!store.remove_key("s", "a").unwrap());
    assert!(!store.remove_key("nope", "a").unwrap());

    assert_eq!(store.get("s", "b"), Some("2"));
}

#[test]
fn removing_last_key_keeps_section() {
    let mut store = store();
    store.set("s", "only", "1").unwrap();
    store.remove("s", Some("only")).unwrap();

    assert!(store.has_section("s"));
    assert_eq!(
        store.to_dict(Some("s")),
        vec![SectionDict {
            name: "s".into(),
            items: Default::default(),
        }]
    );
}

#[test]
fn remove_key_leaves_default_visible() {
    let mut store = store();
    store.set_default("port", "80").unwrap();
    store.set("server", "port", "8080").unwrap();

    assert!(store.remove("server", Some("port")).unwrap());
    assert_eq!(store.get("server", "port"), Some("80"));
    assert!(!store.remove("server", Some("port")).unwrap());
}

#[test]
fn remove_whole_section() {
    let mut store = store();
    store.set("server", "port", "8080").unwrap();
    store.set("server", "host", "localhost").unwrap();

    assert!(store.remove("server", None).unwrap());
    assert!(!store.has_section("server"));
    assert!(store.to_dict(Some("server")).is_empty());
    assert!(!store.remove("server", None).unwrap());
}

#[test]
fn remove_default_section_clears_defaults() {
    let mut store = store();
    assert!(!store.remove_section("DEFAULT").unwrap());

    store.set_default("a", "1").unwrap();
    assert!(store.remove_section("DEFAULT").unwrap());
    assert!(store.defaults().is_empty());
    assert!(store.has_section("DEFAULT"));
}

#[test]
fn to_dict_lists_sections_in_order() {
    let mut store = store();
    store.set_default("shared", "yes").unwrap();
    store.set("b", "k", "1").unwrap();
    store.set("a", "k", "2").unwrap();
    store.set("b", "j", "3").unwrap();

    let dicts = store.to_dict(None);
    let names: Vec<&str> = dicts.iter().map(|d| d.name.as_str()).collect();
    let b_keys: Vec<&str> = dicts[0].items.keys().map(String::as_str).collect();

    assert_eq!(names, vec!["b", "a"]);
    assert_eq!(b_keys, vec!["k", "j"]);
    assert!(!dicts[0].items.contains_key("shared"));
}

#[test]
fn to_dict_single_section() {
    let mut store = store();
    store.set("a", "k", "1").unwrap();
    store.set("b", "k", "2").unwrap();
    store.set_default("d", "3").unwrap();

    let only_b = store.to_dict(Some("b"));
    assert_eq!(only_b.len(), 1);
    assert_eq!(only_b[0].items.get("k").unwrap(), "2");

    let defaults = store.to_dict(Some("DEFAULT"));
    assert_eq!(defaults[0].items.get("d").unwrap(), "3");

    assert!(store.to_dict(Some("missing")).is_empty());
}

#[test]
fn section_dict_serializes_in_order() {
    let mut store = store();
    store.set("server", "port", "8080").unwrap();
    store.set("server", "host", "localhost").unwrap();

    let json = serde_json::to_string(&store.to_dict(None)).unwrap();

    assert_eq!(
        json,
        r#"[{"name":"server","items":{"port":"8080","host":"localhost"}}]"#
    );
}

#[test]
fn observers_receive_exact_changes() {
    let (mut store, changes) = observed_store();

    store.set("server", "port", "8080").unwrap();
    store.remove("server", Some("port")).unwrap();
    store.remove("server", None).unwrap();

    let changes = changes.lock().unwrap();
    let tuples: Vec<_> = changes.iter().map(ConfigChange::as_tuple).collect();
    assert_eq!(
        tuples,
        vec![
            ("set", "server", Some("port"), Some("8080")),
            ("remove", "server", Some("port"), None),
            ("remove", "server", None, None),
        ]
    );
}

#[test]
fn failed_removals_do_not_notify() {
    let (mut store, changes) = observed_store();

    assert!(!store.remove("ghost", None).unwrap());
    assert!(!store.remove("ghost", Some("key")).unwrap());

    assert!(changes.lock().unwrap().is_empty());
}

#[test]
fn every_observer_notified_once() {
    let hub = Arc::new(Observable::new());
    let counts = Arc::new(Mutex::new([0usize; 3]));

    for slot in 0..3 {
        let counts = Arc::clone(&counts);
        hub.subscribe(move |_: &ConfigChange| {
            counts.lock().unwrap()[slot] += 1;
            Ok::<(), ObserverError>(())
        });
    }

    let mut store = store().with_observable(Arc::clone(&hub));
    store.set("a", "b", "c").unwrap();

    assert_eq!(*counts.lock().unwrap(), [1, 1, 1]);
}

#[test]
fn observer_failure_propagates_after_mutation() {
    let hub = Arc::new(Observable::new());
    hub.subscribe(|change: &ConfigChange| {
        if change.section == "locked" {
            return Err(ObserverError::Rejected("section is locked".into()));
        }
        Ok(())
    });

    let mut store = store().with_observable(hub);
    let err = store.set("locked", "k", "v").unwrap_err();

    match err {
        StoreError::Observer { event, path, .. } => {
            assert_eq!(event, "set");
            assert_eq!(path, "locked.k");
        }
        other => panic!("expected observer error, got {other:?}"),
    }
    assert_eq!(store.get("locked", "k"), Some("v"));
    assert!(store.set("open", "k", "v").is_ok());
}

#[test]
fn hooks_run_before_observers() {
    let log: Log = Arc::default();
    let hub = Arc::new(Observable::new());
    let sink = Arc::clone(&log);

    hub.subscribe(move |change: &ConfigChange| {
        sink.lock()
            .unwrap()
            .push(format!("observer {} {}", change.event, change.path()));
        Ok::<(), ObserverError>(())
    });

    let mut store = store()
        .with_hooks(RecordingHooks(Arc::clone(&log)))
        .with_observable(hub);

    store.set("s", "k", "v").unwrap();
    store.remove("s", Some("k")).unwrap();
    store.remove("s", None).unwrap();
    store.remove("s", None).unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "hook change s.k=v",
            "observer set s.k",
            "hook remove s.k",
            "observer remove s.k",
            "hook remove s.*",
            "observer remove s",
        ]
    );
}

#[test]
fn hooks_run_without_observable() {
    let log: Log = Arc::default();
    let mut store = store().with_hooks(RecordingHooks(Arc::clone(&log)));

    store.set("s", "k", "v").unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["hook change s.k=v"]);
}

#[test]
fn unwritable_setting_is_rejected_without_side_effects() {
    let log: Log = Arc::default();
    let hub = Arc::new(Observable::new());
    let (_id, mut receiver) = hub.channel("*", 8);
    let mut store = store()
        .with_hooks(RecordingHooks(Arc::clone(&log)))
        .with_observable(hub);

    let rejected = [
        ("", "k", "v"),
        ("a]b", "k", "v"),
        ("s", "", "v"),
        ("s", "a=b", "v"),
        ("s", "#k", "v"),
        ("s", "[x", "y]"),
        ("s", "k", "trailing\n"),
    ];

    for (section, key, value) in rejected {
        match store.set(section, key, value) {
            Err(StoreError::UnwritableSetting {
                section: s, key: k, ..
            }) => {
                assert_eq!(s, section);
                assert_eq!(k, key);
            }
            other => panic!("expected [{section}] {key:?} to be rejected, got {other:?}"),
        }
    }

    assert!(matches!(
        store.set_attr("s_k:x", "v"),
        Err(StoreError::UnwritableSetting { .. })
    ));
    assert!(matches!(
        store.set_default(";k", "v"),
        Err(StoreError::UnwritableSetting { .. })
    ));
    assert!(store.document().is_empty());
    assert!(log.lock().unwrap().is_empty());
    assert!(receiver.try_recv().is_err());
}

#[test]
fn split_attr_name_on_first_underscore() {
    assert_eq!(split_attr_name("server_port"), Some(("server", "port")));
    assert_eq!(
        split_attr_name("DEFAULT_postal_code"),
        Some(("DEFAULT", "postal_code"))
    );
    assert_eq!(split_attr_name("a__b"), Some(("a", "_b")));
    assert_eq!(split_attr_name("server"), None);
    assert_eq!(split_attr_name("_port"), None);
    assert_eq!(split_attr_name("server_"), None);
}

#[test]
fn attribute_write_equals_set() {
    let (mut store, changes) = observed_store();

    store.set_attr("server_port", "9090").unwrap();

    assert_eq!(store.get("server", "port"), Some("9090"));
    assert_eq!(store.attr("server_port").unwrap(), Some("9090"));
    assert_eq!(
        changes.lock().unwrap()[0],
        ConfigChange::set("server", "port", "9090")
    );
}

#[test]
fn attribute_key_keeps_underscores() {
    let mut store = store();
    store.set_attr("DEFAULT_postal_code", "3300").unwrap();

    assert_eq!(store.get_default("postal_code"), Some("3300"));
    assert_eq!(store.attr("DEFAULT_postal_code").unwrap(), Some("3300"));
}

#[test]
fn attribute_read_unknown_section_fails() {
    let store = store();

    match store.attr("ghost_key") {
        Err(StoreError::UnknownAttribute { name, section }) => {
            assert_eq!(name, "ghost_key");
            assert_eq!(section, "ghost");
        }
        other => panic!("expected unknown attribute, got {other:?}"),
    }
}

#[test]
fn attribute_read_known_section_resolves_like_get() {
    let mut store = store();
    store.set("oracle", "user", "scott").unwrap();
    store.set_default("host", "db1").unwrap();

    assert_eq!(store.attr("oracle_host").unwrap(), Some("db1"));
    assert_eq!(store.attr("oracle_missing").unwrap(), None);
    assert_eq!(store.attr("DEFAULT_missing").unwrap(), None);
}

#[test]
fn attribute_name_without_underscore_is_invalid() {
    let mut store = store();

    assert!(matches!(
        store.attr("server"),
        Err(StoreError::InvalidAttribute { .. })
    ));
    assert!(matches!(
        store.set_attr("server", "1"),
        Err(StoreError::InvalidAttribute { .. })
    ));
    assert_eq!(store.sections().count(), 0);
}
