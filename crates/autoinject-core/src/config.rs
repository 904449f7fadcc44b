// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The names the AutoInject contract is written in terms of.
//!
//! Analyzers and fixers never hard-code a symbol name; they read it from an
//! [`AutoInjectConfig`] handed to them at construction. The default is the
//! contract of the AutoInject library itself.

use ecow::EcoString;
use serde::{Deserialize, Serialize};

/// Immutable table of attribute, interface and method names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoInjectConfig {
    /// Attribute that opts a class in: `[Meta(typeof(IAutoNode))]`.
    pub meta_attribute: EcoString,
    /// Marker interfaces accepted as `typeof(...)` arguments of the meta
    /// attribute.
    pub marker_interfaces: Vec<EcoString>,
    /// Generic interface whose implementers must call [`Self::provide_method`].
    pub provider_interface: EcoString,
    /// Engine notification hook the class must override.
    pub notification_method: EcoString,
    /// Library dispatch method the hook must forward to.
    pub notify_method: EcoString,
    /// Method that publishes provided values.
    pub provide_method: EcoString,
    pub setup_method: EcoString,
    pub on_ready_method: EcoString,
    /// Engine ready hook; only ever used as an override.
    pub ready_method: EcoString,
    /// Parameter name used when synthesizing the notification override.
    pub notification_parameter: EcoString,
    /// Statement template for bodies of created provide methods.
    pub provide_body: EcoString,
}

impl Default for AutoInjectConfig {
    fn default() -> Self {
        Self {
            meta_attribute: "Meta".into(),
            marker_interfaces: [
                "IAutoNode",
                "IAutoOn",
                "IAutoConnect",
                "IAutoInit",
                "IProvider",
                "IDependent",
            ]
            .into_iter()
            .map(EcoString::from)
            .collect(),
            provider_interface: "IProvide".into(),
            notification_method: "_Notification".into(),
            notify_method: "Notify".into(),
            provide_method: "Provide".into(),
            setup_method: "Setup".into(),
            on_ready_method: "OnReady".into(),
            ready_method: "_Ready".into(),
            notification_parameter: "what".into(),
            provide_body: "this.Provide();".into(),
        }
    }
}

impl AutoInjectConfig {
    /// Returns `true` if `name` refers to the meta attribute.
    ///
    /// Accepts the written name (`Meta`), the class name with the
    /// `Attribute` suffix (`MetaAttribute`), and either form qualified by a
    /// namespace (`Chickensoft.Introspection.Meta`, `global::Meta`).
    #[must_use]
    pub fn is_meta_attribute_name(&self, name: &str) -> bool {
        let simple = name.rsplit(['.', ':']).next().unwrap_or(name);
        let meta = self.meta_attribute.as_str();
        simple == meta || simple.strip_suffix("Attribute") == Some(meta)
    }

    /// Returns `true` if `name` is one of the marker interfaces.
    #[must_use]
    pub fn is_marker_interface(&self, name: &str) -> bool {
        self.marker_interfaces.iter().any(|marker| marker.as_str() == name)
    }
}
