#[cfg(test)]
mod tests {
    use crate::aggregator::{Aggregator, OrderedCounter, PortProtocol, UNTAGGED};

    #[test]
    fn test_ordered_counter_keeps_first_seen_order() {
        let mut counter = OrderedCounter::new();
        for key in ["b", "a", "b", "c", "a", "b"] {
            counter.increment(key.to_string());
        }

        let counts: Vec<(String, u64)> = counter.iter().map(|(k, c)| (k.clone(), c)).collect();
        assert_eq!(
            counts,
            vec![
                ("b".to_string(), 3),
                ("a".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
        assert_eq!(counter.len(), 3);
        assert_eq!(counter.total(), 6);
    }

    #[test]
    fn test_record_tagged_and_untagged() {
        let mut aggregator = Aggregator::new();
        aggregator.record(25, "tcp", Some("sv_P1"));
        aggregator.record(53, "udp", None);
        aggregator.record(25, "tcp", Some("sv_P1"));

        let tags: Vec<(&String, u64)> = aggregator.tag_counts.iter().collect();
        assert_eq!(tags.len(), 2);
        assert_eq!((tags[0].0.as_str(), tags[0].1), ("sv_P1", 2));
        assert_eq!((tags[1].0.as_str(), tags[1].1), (UNTAGGED, 1));

        let pairs: Vec<(&PortProtocol, u64)> = aggregator.port_protocol_counts.iter().collect();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].0.port, 25);
        assert_eq!(pairs[0].0.protocol, "tcp");
        assert_eq!(pairs[0].1, 2);
        assert_eq!(pairs[1].0.port, 53);
        assert_eq!(pairs[1].0.protocol, "udp");
        assert_eq!(pairs[1].1, 1);
    }

    #[test]
    fn test_tallies_sum_to_flow_count() {
        let mut aggregator = Aggregator::new();
        let flows = [
            (80, "tcp", Some("web")),
            (443, "tcp", Some("web")),
            (53, "udp", None),
            (0, "icmp", None),
            (80, "tcp", Some("web")),
        ];
        for (port, protocol, tag) in flows {
            aggregator.record(port, protocol, tag);
        }

        assert_eq!(aggregator.flow_count(), flows.len() as u64);
        assert_eq!(
            aggregator.port_protocol_counts.total(),
            aggregator.tag_counts.total()
        );
    }
}
