use nmctl_core::{ModuleParams, ResourceType};

use crate::cli::NetworkArgs;

/// Parameter set for `nmctl network`.
pub fn params(args: NetworkArgs) -> ModuleParams {
    ModuleParams {
        resource_type: Some(ResourceType::Network),
        name: Some(args.name),
        state: Some(args.state.into()),
        addressrange: args.addressrange,
        addressrange6: args.addressrange6,
        defaultextclientdns: args.defaultextclientdns,
        defaultinterface: args.defaultinterface,
        defaultpostdown: args.defaultpostdown,
        defaultpostup: args.defaultpostup,
        defaultkeepalive: args.defaultkeepalive,
        defaultmtu: args.defaultmtu,
        islocal: args.islocal,
        ..ModuleParams::default()
    }
}
