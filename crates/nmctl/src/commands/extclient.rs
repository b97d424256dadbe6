use nmctl_core::{ModuleParams, ResourceType};

use crate::cli::ExtclientArgs;

/// Parameter set for `nmctl extclient`.
pub fn params(args: ExtclientArgs) -> ModuleParams {
    ModuleParams {
        resource_type: Some(ResourceType::Extclient),
        name: Some(args.name),
        network: Some(args.network),
        ingress_gateway_id: Some(args.ingress_gateway_id),
        state: Some(args.state.into()),
        dns: args.dns,
        // `--extraallowedips ""` asks for an empty list.
        extraallowedips: args
            .extraallowedips
            .map(|ips| ips.into_iter().filter(|ip| !ip.is_empty()).collect()),
        enabled: args.enabled,
        postup: args.postup,
        postdown: args.postdown,
        ..ModuleParams::default()
    }
}
