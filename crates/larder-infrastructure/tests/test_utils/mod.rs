//! Test utilities for larder-infrastructure
//!
//! Provides a `probe` resource kind that records every construction and
//! close in a shared log, plus helpers to build sources and registries
//! around it.
//!
//! Probe parameters:
//!
//! | Parameter | Effect |
//! |-----------|--------|
//! | `value` | Free-form label, readable through [`Probe::value`] |
//! | `fail_init` | Constructor returns an error |
//! | `panic_init` | Constructor panics |
//! | `fail_close` | `close` returns an error (after recording the call) |
//! | `delay_ms` | Constructor sleeps first |

#![allow(dead_code)]

use larder_domain::error::{Error, Result};
use larder_domain::{Resource, ResourceContext, ResourceDefinition, SourceKey};
use larder_infrastructure::{ResourceFactory, ResourceRegistry};
use serde_json::{Map, Value, json};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared record of probe activity, in call order
#[derive(Debug, Default)]
pub struct ProbeLog {
    events: Mutex<Vec<String>>,
}

impl ProbeLog {
    pub fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// How many times `close` ran on probes labelled `label`
    pub fn closes(&self, label: &str) -> usize {
        self.count(&format!("close:{label}"))
    }

    /// How many probes labelled `label` were constructed
    pub fn inits(&self, label: &str) -> usize {
        self.count(&format!("init:{label}"))
    }

    pub fn total_closes(&self) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.starts_with("close:"))
            .count()
    }

    fn count(&self, event: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| *e == event)
            .count()
    }
}

/// Resource that reports its lifecycle to a [`ProbeLog`]
#[derive(Debug)]
pub struct Probe {
    label: String,
    value: String,
    fail_close: bool,
    closes: AtomicUsize,
    log: Arc<ProbeLog>,
}

impl Probe {
    /// `name@value`, unique per definition content
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl Resource for Probe {
    fn close(&self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.log.record(format!("close:{}", self.label));
        if self.fail_close {
            return Err(Error::internal(format!("probe {} refused to close", self.label)));
        }
        Ok(())
    }
}

/// A second kind, to exercise type mismatches
#[derive(Debug)]
pub struct Marker;

impl Resource for Marker {}

fn build_probe(
    log: &Arc<ProbeLog>,
    definition: &ResourceDefinition,
    _context: &ResourceContext,
) -> Result<Arc<dyn Resource>> {
    let params = &definition.parameters;
    if let Some(delay) = params.get_u64("delay_ms") {
        std::thread::sleep(Duration::from_millis(delay));
    }
    let value = params.get_str("value").unwrap_or_default().to_string();
    let label = format!("{}@{}", definition.name, value);
    if params.get_bool("panic_init").unwrap_or(false) {
        panic!("probe {label} panicked");
    }
    if params.get_bool("fail_init").unwrap_or(false) {
        log.record(format!("fail:{label}"));
        return Err(Error::invalid_argument(format!("probe {label} refused to start")));
    }
    log.record(format!("init:{label}"));
    Ok(Arc::new(Probe {
        label,
        value,
        fail_close: params.get_bool("fail_close").unwrap_or(false),
        closes: AtomicUsize::new(0),
        log: Arc::clone(log),
    }))
}

/// Factory knowing only `probe` and `marker`
pub fn probe_factory(log: &Arc<ProbeLog>) -> Arc<ResourceFactory> {
    let factory = ResourceFactory::empty();
    let probe_log = Arc::clone(log);
    factory
        .register("probe", "Lifecycle probe", move |definition, context| {
            build_probe(&probe_log, definition, context)
        })
        .unwrap();
    factory
        .register("marker", "Inert marker", |_, _| {
            Ok(Arc::new(Marker) as Arc<dyn Resource>)
        })
        .unwrap();
    Arc::new(factory)
}

/// Fresh registry over the probe factory
pub fn probe_registry() -> (ResourceRegistry, Arc<ProbeLog>) {
    let log = Arc::new(ProbeLog::default());
    let registry = ResourceRegistry::new(probe_factory(&log), PathBuf::from("data"));
    (registry, log)
}

/// JSON source defining one probe per `(name, value)` pair, in order
pub fn probe_source(entries: &[(&str, &str)]) -> String {
    let resources: Map<String, Value> = entries
        .iter()
        .map(|(name, value)| {
            (
                (*name).to_string(),
                json!({ "type": "probe", "value": value }),
            )
        })
        .collect();
    json!({ "resources": resources }).to_string()
}

/// JSON source from raw resource tables, in order
pub fn raw_source(entries: &[(&str, Value)]) -> String {
    let resources: Map<String, Value> = entries
        .iter()
        .map(|(name, table)| ((*name).to_string(), table.clone()))
        .collect();
    json!({ "resources": resources }).to_string()
}

pub fn key(name: &str) -> SourceKey {
    SourceKey::new(name)
}

/// Value of the probe currently published under `name`
pub fn probe_value(registry: &ResourceRegistry, name: &str) -> Option<String> {
    registry
        .get_as::<Probe>(name)
        .ok()
        .map(|probe| probe.value().to_string())
}
