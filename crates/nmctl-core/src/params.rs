// ── Invocation parameters ──
//
// `ModuleParams` is the flat parameter set a caller hands over (from CLI
// flags or a JSON/YAML parameter file). `validate()` checks preconditions
// without touching the network and turns it into a typed `Invocation`.

use std::fmt;

use secrecy::SecretString;
use serde::Deserialize;

use nmctl_api::{TlsMode, TransportConfig};

use crate::desired::{
    AUTO_GATEWAY, DesiredState, ExtClientSpec, GatewaySelection, NetworkSpec, ResourceType,
};
use crate::error::CoreError;

/// Username used for password authentication when none is given.
pub const DEFAULT_USERNAME: &str = "oriol";

/// Flat parameter set. Every resource field is optional and only set fields
/// are forwarded into desired state.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleParams {
    pub resource_type: Option<ResourceType>,
    pub name: Option<String>,
    pub network: Option<String>,
    pub ingress_gateway_id: Option<String>,
    pub state: Option<DesiredState>,

    // Connection
    pub base_url: Option<String>,
    pub master_key: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub validate_certs: Option<bool>,
    #[serde(default)]
    pub check_mode: bool,

    // Network
    pub addressrange: Option<String>,
    pub addressrange6: Option<String>,
    pub defaultextclientdns: Option<String>,
    pub defaultinterface: Option<String>,
    pub defaultpostdown: Option<String>,
    pub defaultpostup: Option<String>,
    pub defaultkeepalive: Option<u32>,
    pub defaultmtu: Option<u32>,
    pub islocal: Option<bool>,

    // External client
    pub dns: Option<String>,
    pub extraallowedips: Option<Vec<String>>,
    pub enabled: Option<bool>,
    pub postup: Option<String>,
    pub postdown: Option<String>,
}

impl fmt::Debug for ModuleParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("ModuleParams")
            .field("resource_type", &self.resource_type)
            .field("name", &self.name)
            .field("network", &self.network)
            .field("ingress_gateway_id", &self.ingress_gateway_id)
            .field("state", &self.state)
            .field("base_url", &self.base_url)
            .field("master_key", &redact(&self.master_key))
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("validate_certs", &self.validate_certs)
            .field("check_mode", &self.check_mode)
            .finish_non_exhaustive()
    }
}

/// How the API token is obtained.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Used directly as the bearer token.
    MasterKey(SecretString),
    /// Exchanged for a token via `/users/adm/authenticate`.
    Password {
        username: String,
        password: SecretString,
    },
}

/// Where and how to reach the API.
#[derive(Debug, Clone)]
pub struct Connection {
    pub base_url: String,
    pub credentials: Credentials,
    pub transport: TransportConfig,
}

/// The resource a single invocation reconciles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Network(NetworkSpec),
    ExtClient {
        network: String,
        gateway: GatewaySelection,
        spec: ExtClientSpec,
    },
}

impl Target {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Self::Network(_) => ResourceType::Network,
            Self::ExtClient { .. } => ResourceType::Extclient,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Network(spec) => &spec.netid,
            Self::ExtClient { spec, .. } => &spec.clientid,
        }
    }
}

/// A validated invocation, ready to run.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub connection: Connection,
    pub target: Target,
    pub state: DesiredState,
    pub check_mode: bool,
}

impl ModuleParams {
    /// Check preconditions and build the typed invocation.
    ///
    /// Errors are tagged with the resource type and name whenever those
    /// are known.
    pub fn validate(self) -> Result<Invocation, CoreError> {
        let resource_type = self
            .resource_type
            .ok_or_else(|| CoreError::validation("resource_type is required"))?;
        let name = non_empty(self.name.clone())
            .ok_or_else(|| CoreError::validation("name is required"))?;

        self.validate_for(resource_type, &name)
            .map_err(|e| e.managing(resource_type, name))
    }

    fn validate_for(
        self,
        resource_type: ResourceType,
        name: &str,
    ) -> Result<Invocation, CoreError> {
        let base_url = non_empty(self.base_url.clone())
            .ok_or_else(|| CoreError::validation("base_url is required"))?;
        let credentials = self.credentials()?;
        let transport = TransportConfig {
            tls: TlsMode::from_validate_certs(self.validate_certs.unwrap_or(true)),
            ..TransportConfig::default()
        };

        let target = match resource_type {
            ResourceType::Network => Target::Network(self.network_spec(name)),
            ResourceType::Extclient => {
                let network = non_empty(self.network.clone()).ok_or_else(|| {
                    CoreError::validation("network is required when resource_type is extclient")
                })?;
                let gateway = GatewaySelection::from(
                    self.ingress_gateway_id.as_deref().unwrap_or(AUTO_GATEWAY),
                );
                Target::ExtClient {
                    network,
                    gateway,
                    spec: self.extclient_spec(name),
                }
            }
        };

        Ok(Invocation {
            connection: Connection {
                base_url,
                credentials,
                transport,
            },
            target,
            state: self.state.unwrap_or_default(),
            check_mode: self.check_mode,
        })
    }

    /// Master key wins when both are given; there is no fallback between them.
    fn credentials(&self) -> Result<Credentials, CoreError> {
        if let Some(key) = non_empty(self.master_key.clone()) {
            return Ok(Credentials::MasterKey(SecretString::from(key)));
        }
        if let Some(password) = non_empty(self.password.clone()) {
            let username =
                non_empty(self.username.clone()).unwrap_or_else(|| DEFAULT_USERNAME.to_owned());
            return Ok(Credentials::Password {
                username,
                password: SecretString::from(password),
            });
        }
        Err(CoreError::validation(
            "one of the following is required: master_key, password",
        ))
    }

    fn network_spec(&self, netid: &str) -> NetworkSpec {
        NetworkSpec {
            netid: netid.to_owned(),
            addressrange: self.addressrange.clone(),
            addressrange6: self.addressrange6.clone(),
            defaultextclientdns: self.defaultextclientdns.clone(),
            defaultinterface: self.defaultinterface.clone(),
            defaultpostdown: self.defaultpostdown.clone(),
            defaultpostup: self.defaultpostup.clone(),
            defaultkeepalive: self.defaultkeepalive,
            defaultmtu: self.defaultmtu,
            islocal: self.islocal,
        }
    }

    fn extclient_spec(&self, clientid: &str) -> ExtClientSpec {
        ExtClientSpec {
            clientid: clientid.to_owned(),
            dns: self.dns.clone(),
            extraallowedips: self.extraallowedips.clone(),
            enabled: self.enabled,
            postup: self.postup.clone(),
            postdown: self.postdown.clone(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    fn base() -> ModuleParams {
        ModuleParams {
            resource_type: Some(ResourceType::Network),
            name: Some("net1".into()),
            base_url: Some("https://api.netmaker.example.com".into()),
            master_key: Some("secret".into()),
            ..ModuleParams::default()
        }
    }

    #[test]
    fn network_fields_only_forward_what_is_set() {
        let params = ModuleParams {
            addressrange: Some("10.0.0.0/24".into()),
            defaultmtu: Some(1420),
            ..base()
        };
        let inv = params.validate().unwrap();

        assert_eq!(inv.state, DesiredState::Present);
        assert!(!inv.check_mode);
        assert_eq!(
            inv.target,
            Target::Network(NetworkSpec {
                addressrange: Some("10.0.0.0/24".into()),
                defaultmtu: Some(1420),
                ..NetworkSpec::new("net1")
            })
        );
    }

    #[test]
    fn extclient_fields_are_ignored_for_networks() {
        let params = ModuleParams {
            dns: Some("1.1.1.1".into()),
            network: Some("ignored".into()),
            ..base()
        };
        let inv = params.validate().unwrap();
        assert_eq!(inv.target, Target::Network(NetworkSpec::new("net1")));
    }

    #[test]
    fn extclient_requires_network() {
        let params = ModuleParams {
            resource_type: Some(ResourceType::Extclient),
            name: Some("dev1".into()),
            ..base()
        };
        let err = params.validate().unwrap_err();
        assert!(err.is_precondition());
        assert_eq!(
            err.to_string(),
            "Error managing extclient 'dev1': Validation failed: \
             network is required when resource_type is extclient"
        );
    }

    #[test]
    fn extclient_gateway_defaults_to_auto() {
        let params = ModuleParams {
            resource_type: Some(ResourceType::Extclient),
            name: Some("dev1".into()),
            network: Some("iot".into()),
            enabled: Some(true),
            ..base()
        };
        let inv = params.validate().unwrap();
        assert_eq!(
            inv.target,
            Target::ExtClient {
                network: "iot".into(),
                gateway: GatewaySelection::Auto,
                spec: ExtClientSpec {
                    enabled: Some(true),
                    ..ExtClientSpec::new("dev1")
                },
            }
        );
        assert_eq!(inv.target.name(), "dev1");
        assert_eq!(inv.target.resource_type(), ResourceType::Extclient);
    }

    #[test]
    fn literal_gateway_is_kept() {
        let params = ModuleParams {
            resource_type: Some(ResourceType::Extclient),
            name: Some("dev1".into()),
            network: Some("iot".into()),
            ingress_gateway_id: Some("gw-42".into()),
            ..base()
        };
        let Target::ExtClient { gateway, .. } = params.validate().unwrap().target else {
            panic!("expected extclient target");
        };
        assert_eq!(gateway, GatewaySelection::Node("gw-42".into()));
    }

    #[test]
    fn credentials_are_required() {
        let params = ModuleParams {
            master_key: None,
            ..base()
        };
        let err = params.validate().unwrap_err();
        assert!(err.is_precondition());
        assert!(err.to_string().contains("master_key, password"));
    }

    #[test]
    fn empty_master_key_falls_through_to_password() {
        let params = ModuleParams {
            master_key: Some(String::new()),
            password: Some("hunter2".into()),
            ..base()
        };
        let inv = params.validate().unwrap();
        let Credentials::Password { username, password } = inv.connection.credentials else {
            panic!("expected password credentials");
        };
        assert_eq!(username, DEFAULT_USERNAME);
        assert_eq!(password.expose_secret(), "hunter2");
    }

    #[test]
    fn master_key_takes_precedence() {
        let params = ModuleParams {
            password: Some("hunter2".into()),
            ..base()
        };
        let inv = params.validate().unwrap();
        assert!(matches!(inv.connection.credentials, Credentials::MasterKey(_)));
    }

    #[test]
    fn validate_certs_false_accepts_invalid() {
        let params = ModuleParams {
            validate_certs: Some(false),
            ..base()
        };
        let inv = params.validate().unwrap();
        assert_eq!(inv.connection.transport.tls, TlsMode::DangerAcceptInvalid);
    }

    #[test]
    fn missing_name_is_untagged() {
        let params = ModuleParams {
            name: None,
            ..base()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: name is required");
    }

    #[test]
    fn deserializes_parameter_file() {
        let params: ModuleParams = serde_json::from_str(
            r#"{
                "resource_type": "extclient",
                "name": "sensor-01",
                "network": "iot-network",
                "state": "absent",
                "base_url": "https://api.netmaker.example.com",
                "master_key": "k",
                "extraallowedips": ["10.9.0.0/16"],
                "check_mode": true
            }"#,
        )
        .unwrap();
        assert_eq!(params.state, Some(DesiredState::Absent));
        assert_eq!(params.extraallowedips, Some(vec!["10.9.0.0/16".to_owned()]));
        assert!(params.check_mode);
        assert!(!format!("{params:?}").contains("\"k\""));
    }

    #[test]
    fn unknown_parameters_are_rejected() {
        let result = serde_json::from_str::<ModuleParams>(r#"{ "nmae": "typo" }"#);
        assert!(result.is_err());
    }
}
