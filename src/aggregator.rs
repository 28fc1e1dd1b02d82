use std::collections::HashMap;
use std::hash::Hash;

/// Tag assigned to flows whose (port, protocol) has no lookup entry.
pub const UNTAGGED: &str = "Untagged";

/// Key of the port/protocol tally.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PortProtocol {
    pub port: i64,
    pub protocol: String,
}

/// Counter that iterates in first-seen key order.
#[derive(Debug, Clone)]
pub struct OrderedCounter<K> {
    index: HashMap<K, usize>,
    counts: Vec<(K, u64)>,
}

impl<K> OrderedCounter<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        OrderedCounter {
            index: HashMap::new(),
            counts: Vec::new(),
        }
    }

    pub fn increment(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&slot) => self.counts[slot].1 += 1,
            None => {
                self.index.insert(key.clone(), self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.counts.iter().map(|(key, count)| (key, *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

impl<K> Default for OrderedCounter<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// The two tallies of a report run.
#[derive(Debug, Default)]
pub struct Aggregator {
    pub tag_counts: OrderedCounter<String>,
    pub port_protocol_counts: OrderedCounter<PortProtocol>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one flow. A missing `tag` is counted as [`UNTAGGED`].
    pub fn record(&mut self, port: i64, protocol: &str, tag: Option<&str>) {
        self.tag_counts
            .increment(tag.unwrap_or(UNTAGGED).to_string());
        self.port_protocol_counts.increment(PortProtocol {
            port,
            protocol: protocol.to_string(),
        });
    }

    pub fn flow_count(&self) -> u64 {
        self.tag_counts.total()
    }
}
