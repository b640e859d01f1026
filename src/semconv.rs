//! Semantic-convention attribute helpers.
//!
//! Well-known resource keys plus a small builder for the common
//! service-identity attributes.

use crate::attrs::{Attr, Value};

pub const SERVICE_NAME: &str = "service.name";
pub const SERVICE_NAMESPACE: &str = "service.namespace";
pub const SERVICE_INSTANCE_ID: &str = "service.instance.id";
pub const SERVICE_VERSION: &str = "service.version";

pub fn service_name(name: impl Into<Value>) -> Attr {
    Attr::new(SERVICE_NAME, name)
}

pub fn service_version(version: impl Into<Value>) -> Attr {
    Attr::new(SERVICE_VERSION, version)
}

/// Accumulates service-identity attributes.
#[derive(Debug, Clone)]
pub struct Service {
    attrs: Vec<Attr>,
}

impl Service {
    pub fn new(service_name: impl Into<Value>) -> Self {
        Self {
            attrs: vec![Attr::new(SERVICE_NAME, service_name)],
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<Value>) -> Self {
        self.attrs.push(Attr::new(SERVICE_NAMESPACE, namespace));
        self
    }

    pub fn with_instance_id(mut self, instance_id: impl Into<Value>) -> Self {
        self.attrs.push(Attr::new(SERVICE_INSTANCE_ID, instance_id));
        self
    }

    pub fn with_version(mut self, version: impl Into<Value>) -> Self {
        self.attrs.push(Attr::new(SERVICE_VERSION, version));
        self
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn into_attrs(self) -> Vec<Attr> {
        self.attrs
    }
}
