use std::collections::HashMap;

use log::warn;

use crate::args::ProtocolEntry;

/// IANA numbers of the protocols named out of the box.
const BUILTIN_PROTOCOLS: [(i64, &str); 3] = [(1, "icmp"), (6, "tcp"), (17, "udp")];

/// Maps protocol numbers from the flow log to the lowercase names used in the
/// lookup table.
#[derive(Debug, Clone)]
pub struct ProtocolResolver {
    names: HashMap<i64, String>,
}

impl ProtocolResolver {
    pub fn new() -> Self {
        let names = BUILTIN_PROTOCOLS
            .iter()
            .map(|&(number, name)| (number, name.to_string()))
            .collect();

        Self { names }
    }

    /// Builds a resolver from the built-in table extended with `extra`.
    /// The names of icmp, tcp and udp are fixed; entries for their numbers
    /// are ignored.
    pub fn with_extra(extra: &[ProtocolEntry]) -> Self {
        let mut resolver = Self::new();
        for entry in extra {
            if is_builtin(entry.number) {
                warn!(
                    "Ignoring configured name '{}' for built-in protocol {}",
                    entry.name, entry.number
                );
                continue;
            }
            resolver
                .names
                .insert(entry.number, entry.name.trim().to_lowercase());
        }
        resolver
    }

    /// Returns the name of `protocol`, or its decimal form when unknown.
    pub fn resolve(&self, protocol: i64) -> String {
        match self.names.get(&protocol) {
            Some(name) => name.clone(),
            None => protocol.to_string(),
        }
    }
}

fn is_builtin(number: i64) -> bool {
    BUILTIN_PROTOCOLS.iter().any(|&(builtin, _)| builtin == number)
}

impl Default for ProtocolResolver {
    fn default() -> Self {
        Self::new()
    }
}
