//! Notification channel registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Notification importance tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    /// No sound or visual interruption.
    #[default]
    Low,
    /// Normal notification behavior.
    Normal,
    /// Heads-up notification behavior.
    High,
}

/// A named, user-configurable notification category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSpec {
    /// Stable channel identifier.
    pub id: String,
    /// Human-readable channel name.
    pub name: String,
    /// Importance tier for notifications posted to this channel.
    pub importance: Importance,
    /// Whether notifications on this channel suppress sound.
    pub silent: bool,
}

impl ChannelSpec {
    /// A low-importance, silent channel - the shape every presence
    /// notification wants.
    pub fn low_silent(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            importance: Importance::Low,
            silent: true,
        }
    }
}

/// Registry of materialized notification channels.
///
/// Hosts that predate channel-scoped notifications simply never consult the
/// registry; creating channels on them is a no-op by definition, so the
/// registry itself carries no platform awareness.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    channels: HashMap<String, ChannelSpec>,
}

impl ChannelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize a channel if absent. Returns `true` if the channel was
    /// created by this call, `false` if it already existed.
    ///
    /// Re-ensuring an existing id keeps the original spec; a conflicting
    /// respecification is logged and ignored.
    pub fn ensure_channel(&mut self, spec: ChannelSpec) -> bool {
        match self.channels.get(&spec.id) {
            Some(existing) => {
                if *existing != spec {
                    warn!(
                        "Channel {} already exists with a different spec; keeping original",
                        spec.id
                    );
                }
                false
            }
            None => {
                debug!("Creating notification channel {} ({})", spec.id, spec.name);
                self.channels.insert(spec.id.clone(), spec);
                true
            }
        }
    }

    /// Look up a channel by id.
    pub fn get(&self, id: &str) -> Option<&ChannelSpec> {
        self.channels.get(id)
    }

    /// Number of materialized channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no channels have been materialized.
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_channel_creates_once() {
        let mut registry = ChannelRegistry::new();
        let spec = ChannelSpec::low_silent("vigil.presence", "Background keepalive");

        assert!(registry.ensure_channel(spec.clone()));
        assert!(!registry.ensure_channel(spec));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ensure_channel_distinct_ids() {
        let mut registry = ChannelRegistry::new();
        assert!(registry.ensure_channel(ChannelSpec::low_silent("a", "A")));
        assert!(registry.ensure_channel(ChannelSpec::low_silent("b", "B")));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_ensure_channel_conflicting_spec_keeps_original() {
        let mut registry = ChannelRegistry::new();
        registry.ensure_channel(ChannelSpec::low_silent("a", "Original"));
        registry.ensure_channel(ChannelSpec::low_silent("a", "Renamed"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().name, "Original");
    }

    #[test]
    fn test_low_silent_shape() {
        let spec = ChannelSpec::low_silent("id", "name");
        assert_eq!(spec.importance, Importance::Low);
        assert!(spec.silent);
    }
}
