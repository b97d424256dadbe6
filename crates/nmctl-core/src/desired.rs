// ── Desired-state types ──
//
// Every optional attribute is an `Option`: `None` means "leave this field
// alone", which is not the same thing as `Some(String::new())`. Only set
// fields ever reach the wire or the equality evaluators.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

use nmctl_api::Resource;

/// Sentinel `ingress_gateway_id` value requesting automatic selection.
pub const AUTO_GATEWAY: &str = "auto";

/// Which reconciler handles an invocation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourceType {
    Network,
    Extclient,
}

impl ResourceType {
    /// Human label used in result messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Network => "Network",
            Self::Extclient => "External client",
        }
    }
}

/// Target state of a resource.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DesiredState {
    #[default]
    Present,
    Absent,
}

/// How the ingress gateway for a new external client is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GatewaySelection {
    /// First node flagged as ingress gateway, in server order.
    #[default]
    Auto,
    /// A literal node ID.
    Node(String),
}

impl From<&str> for GatewaySelection {
    fn from(raw: &str) -> Self {
        if raw == AUTO_GATEWAY {
            Self::Auto
        } else {
            Self::Node(raw.to_owned())
        }
    }
}

// ── Network ────────────────────────────────────────────────────────

/// Desired configuration of a Netmaker network.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkSpec {
    pub netid: String,
    pub addressrange: Option<String>,
    pub addressrange6: Option<String>,
    pub defaultextclientdns: Option<String>,
    pub defaultinterface: Option<String>,
    pub defaultpostdown: Option<String>,
    pub defaultpostup: Option<String>,
    pub defaultkeepalive: Option<u32>,
    pub defaultmtu: Option<u32>,
    pub islocal: Option<bool>,
}

impl NetworkSpec {
    pub fn new(netid: impl Into<String>) -> Self {
        Self {
            netid: netid.into(),
            ..Self::default()
        }
    }

    /// Wire representation: `netid` plus every attribute that is set.
    pub fn to_fields(&self) -> Resource {
        let mut fields = Map::new();
        fields.insert("netid".into(), Value::from(self.netid.as_str()));
        set(&mut fields, "addressrange", self.addressrange.as_deref());
        set(&mut fields, "addressrange6", self.addressrange6.as_deref());
        set(
            &mut fields,
            "defaultextclientdns",
            self.defaultextclientdns.as_deref(),
        );
        set(
            &mut fields,
            "defaultinterface",
            self.defaultinterface.as_deref(),
        );
        set(
            &mut fields,
            "defaultpostdown",
            self.defaultpostdown.as_deref(),
        );
        set(&mut fields, "defaultpostup", self.defaultpostup.as_deref());
        set(&mut fields, "defaultkeepalive", self.defaultkeepalive);
        set(&mut fields, "defaultmtu", self.defaultmtu);
        set(&mut fields, "islocal", self.islocal);
        fields
    }
}

// ── External client ────────────────────────────────────────────────

/// Desired configuration of an external (WireGuard) client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtClientSpec {
    pub clientid: String,
    pub dns: Option<String>,
    pub extraallowedips: Option<Vec<String>>,
    pub enabled: Option<bool>,
    pub postup: Option<String>,
    pub postdown: Option<String>,
}

impl ExtClientSpec {
    pub fn new(clientid: impl Into<String>) -> Self {
        Self {
            clientid: clientid.into(),
            ..Self::default()
        }
    }

    /// Wire representation: `clientid` plus every attribute that is set.
    pub fn to_fields(&self) -> Resource {
        let mut fields = Map::new();
        fields.insert("clientid".into(), Value::from(self.clientid.as_str()));
        set(&mut fields, "dns", self.dns.as_deref());
        set(&mut fields, "extraallowedips", self.extraallowedips.clone());
        set(&mut fields, "enabled", self.enabled);
        set(&mut fields, "postup", self.postup.as_deref());
        set(&mut fields, "postdown", self.postdown.as_deref());
        fields
    }
}

fn set<T: Into<Value>>(fields: &mut Resource, key: &str, value: Option<T>) {
    if let Some(value) = value {
        fields.insert(key.to_owned(), value.into());
    }
}
