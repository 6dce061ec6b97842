//! Injector
//!
//! Resolves a consumer type's static bindings against one snapshot. A
//! missing name leaves its slot as it was; so does a resource of the wrong
//! type. References are captured once: a later reload does not reach back
//! into the consumer.

use super::snapshot::Snapshot;
use larder_domain::{Injectable, InjectionReport};
use tracing::{debug, warn};

/// Binding resolver
#[derive(Debug, Clone, Copy, Default)]
pub struct Injector;

impl Injector {
    /// Create an injector
    pub fn new() -> Self {
        Self
    }

    /// Assign every resolvable binding of `consumer` from `snapshot`
    pub fn inject<C: Injectable>(&self, snapshot: &Snapshot, consumer: &mut C) -> InjectionReport {
        let consumer_type = std::any::type_name::<C>();
        let mut report = InjectionReport::default();

        for binding in C::BINDINGS {
            match snapshot.get(binding.resource) {
                Some(resource) => {
                    if binding.apply(consumer, &resource) {
                        report.bound.push(binding.slot);
                    } else {
                        warn!(
                            consumer = consumer_type,
                            slot = binding.slot,
                            resource = binding.resource,
                            "Resource type does not fit the injection slot"
                        );
                        report.mismatched.push(binding.slot);
                    }
                }
                None => {
                    debug!(
                        consumer = consumer_type,
                        slot = binding.slot,
                        resource = binding.resource,
                        "Resource not found, slot left unset"
                    );
                    report.missing.push(binding.slot);
                }
            }
        }

        report
    }
}
