#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use crate::{error::FlowTagError, lookup::LookupTable};

    #[test]
    fn test_lookup_parses_entries() {
        let csv = "dstport,protocol,tag\n25,tcp,sv_P1\n68,UDP,sv_P2\n 443 , tcp , sv_P3 \n";
        let table = LookupTable::from_reader(csv.as_bytes()).unwrap();

        // The header row has no integer port and is skipped like any other bad row.
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(25, "tcp"), Some("sv_P1"));
        assert_eq!(table.get(68, "udp"), Some("sv_P2"));
        assert_eq!(table.get(443, "tcp"), Some("sv_P3"));
        assert_eq!(table.get(25, "udp"), None);
    }

    #[test]
    fn test_lookup_skips_comments_blank_and_malformed_lines() {
        let csv = "# comment\n\n   \n80,tcp\nabc,tcp,sv_P2\n8.5,tcp,frac\n110,tcp,email\n";
        let table = LookupTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(110, "tcp"), Some("email"));
        assert_eq!(table.get(80, "tcp"), None);
    }

    #[test]
    fn test_lookup_tag_case_preserved_and_last_write_wins() {
        let csv = "143,tcp,Email\n143,TCP,IMAP\n";
        let table = LookupTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(143, "tcp"), Some("IMAP"));
    }

    #[test]
    fn test_lookup_accepts_ports_outside_u16_range() {
        let table = LookupTable::from_reader("70000,tcp,big\n-1,udp,neg\n".as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(70000, "tcp"), Some("big"));
        assert_eq!(table.get(-1, "udp"), Some("neg"));
    }

    #[test]
    fn test_lookup_ignores_extra_fields() {
        let table = LookupTable::from_reader("22,tcp,ssh,extra\n".as_bytes()).unwrap();
        assert_eq!(table.get(22, "tcp"), Some("ssh"));
    }

    #[test]
    fn test_lookup_tolerates_invalid_utf8() {
        let csv: &[u8] = b"23,tcp,tel\xffnet\n";
        let table = LookupTable::from_reader(csv).unwrap();
        assert_eq!(table.get(23, "tcp"), Some("tel\u{FFFD}net"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");

        let err = LookupTable::load(&path).unwrap_err();
        assert!(matches!(err, FlowTagError::LookupNotFound { .. }));
    }

    #[test]
    fn test_load_empty_table() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# only comments").unwrap();
        writeln!(file, "80,tcp").unwrap();
        writeln!(file, "abc,tcp,sv_P2").unwrap();

        let err = LookupTable::load(file.path()).unwrap_err();
        assert!(matches!(err, FlowTagError::EmptyLookup { .. }));
    }
}
