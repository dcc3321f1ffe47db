//! Tests for the editing API.

use super::*;

const SAMPLE: &str = "\
[Interface]
PrivateKey = abc123

[Peer]
PublicKey = peer1
AllowedIPs = 10.0.0.2/32
";

const THREE_PEERS: &str = "\
[Interface]
PrivateKey = abc123
ListenPort = 51820

[Peer]
PublicKey = A
AllowedIPs = 10.0.0.2/32

[Peer]
PublicKey = B
AllowedIPs = 10.0.0.3/32
Endpoint = 1.2.3.4:51820

[Peer]
PublicKey = C
AllowedIPs = 10.0.0.4/32
";

fn config(text: &str) -> WireguardConfig {
    WireguardConfig::parse(text).unwrap()
}

fn peer_keys(config: &WireguardConfig) -> Vec<&str> {
    config.get_peer_keys().collect()
}

mod loading {
    use super::*;

    #[test]
    fn serialize_reproduces_input() {
        let config = config(THREE_PEERS);

        assert_eq!(config.serialize(), THREE_PEERS);
    }

    #[test]
    fn serialize_collapses_adjacent_duplicates() {
        let config = config("[Interface]\nPrivateKey = k\n\n\n\n[Peer]\nPublicKey = p\n");

        assert_eq!(
            config.serialize(),
            "[Interface]\nPrivateKey = k\n\n[Peer]\nPublicKey = p\n"
        );
    }

    #[test]
    fn identical_consecutive_attribute_lines_collapse() {
        let config = config("[Interface]\nDNS = 1.1.1.1\nDNS = 1.1.1.1\n");

        assert_eq!(config.lines(), ["[Interface]", "DNS = 1.1.1.1"]);
    }

    #[test]
    fn lines_are_trimmed() {
        let config = config("  [Interface]  \n\tPrivateKey   =  k   # note \n");

        assert_eq!(config.lines(), ["[Interface]", "PrivateKey   =  k   # note"]);
        assert_eq!(config.get_interface_attr("PrivateKey"), Some("k"));
    }

    #[test]
    fn unknown_lines_are_preserved() {
        let text = "# managed by ops\n[Interface]\nPrivateKey = k\nthis line is not understood\n";
        let config = config(text);

        assert_eq!(config.serialize(), text);
    }

    #[test]
    fn from_str_and_from_lines_agree() {
        let parsed: WireguardConfig = SAMPLE.parse().unwrap();
        let from_lines = WireguardConfig::from_lines(SAMPLE.lines()).unwrap();

        assert_eq!(parsed.lines(), from_lines.lines());
        assert_eq!(parsed.model(), from_lines.model());
    }

    #[test]
    fn peer_without_public_key_fails_to_load() {
        let result = WireguardConfig::parse("[Peer]\nAllowedIPs = 10.0.0.2/32\n");

        assert!(matches!(result, Err(ConfError::MissingPublicKey { line: 1 })));
    }

    #[test]
    fn empty_file() {
        let config = config("");

        assert!(config.interface().is_none());
        assert_eq!(peer_keys(&config), Vec::<&str>::new());
        assert_eq!(config.serialize(), "");
    }
}

mod interface_attrs {
    use super::*;

    #[test]
    fn set_after_blank_line_does_not_reach_later_duplicate() {
        let mut config = config("[Interface]\nA = 1\n\nB = 2\n");

        config.set_interface_attr("B", "3", None).unwrap();

        assert_eq!(config.lines(), ["[Interface]", "A = 1", "B = 3", "", "B = 2"]);
        assert_eq!(config.get_interface_attr("B"), Some("2"));
    }

    #[test]
    fn set_scenario_keeps_peer_unchanged() {
        let mut config = config(SAMPLE);

        config.set_interface_attr("ListenPort", "51820", None).unwrap();

        assert_eq!(
            config.serialize(),
            "[Interface]\nPrivateKey = abc123\nListenPort = 51820\n\n\
             [Peer]\nPublicKey = peer1\nAllowedIPs = 10.0.0.2/32\n"
        );
        let peer = config.get_peer("peer1").unwrap();
        assert_eq!(
            peer.iter().collect::<Vec<_>>(),
            [("PublicKey", "peer1"), ("AllowedIPs", "10.0.0.2/32")]
        );
    }

    #[test]
    fn add_then_get() {
        let mut config = config(SAMPLE);

        config.add_interface_attr("Address", "10.0.0.1/24", None).unwrap();

        assert_eq!(config.get_interface_attr("Address"), Some("10.0.0.1/24"));
    }

    #[test]
    fn add_lands_before_blank_separator() {
        let mut config = config(SAMPLE);

        config.add_interface_attr("DNS", "1.1.1.1", Some("cloudflare")).unwrap();

        assert_eq!(config.lines()[2], "DNS = 1.1.1.1 # cloudflare");
        assert_eq!(config.lines()[3], "");
    }

    #[test]
    fn add_when_interface_is_last_section() {
        let mut config = config("[Peer]\nPublicKey = p\n\n[Interface]\nPrivateKey = k");

        config.add_interface_attr("ListenPort", "1", None).unwrap();

        assert_eq!(config.lines().last().map(String::as_str), Some("ListenPort = 1"));
        assert_eq!(config.get_interface_attr("ListenPort"), Some("1"));
    }

    #[test]
    fn add_duplicate_is_rejected_case_insensitively() {
        let mut config = config(SAMPLE);
        let before = config.serialize();

        let result = config.add_interface_attr("privatekey", "other", None);

        assert_eq!(
            result,
            Err(ConfError::DuplicateAttribute {
                section: "Interface".to_owned(),
                key: "privatekey".to_owned(),
            })
        );
        assert_eq!(config.serialize(), before);
        assert_eq!(config.get_interface_attr("PrivateKey"), Some("abc123"));
    }

    #[test]
    fn add_without_interface_section() {
        let mut config = config("[Peer]\nPublicKey = p\n");
        let before = config.serialize();

        let result = config.add_interface_attr("ListenPort", "1", None);

        assert!(matches!(result, Err(ConfError::SectionNotFound { .. })));
        assert_eq!(config.serialize(), before);
    }

    #[test]
    fn set_overwrites_existing() {
        let mut config = config(THREE_PEERS);

        config.set_interface_attr("listenport", "6000", Some("moved")).unwrap();

        assert_eq!(config.get_interface_attr("ListenPort"), Some("6000"));
        assert!(config.lines().contains(&"listenport = 6000 # moved".to_owned()));
        assert!(!config.lines().contains(&"ListenPort = 51820".to_owned()));
    }

    #[test]
    fn set_creates_missing() {
        let mut config = config(SAMPLE);

        config.set_interface_attr("MTU", "1420", None).unwrap();

        assert_eq!(config.get_interface_attr("MTU"), Some("1420"));
    }

    #[test]
    fn set_moves_attribute_to_end_of_section() {
        let mut config = config(THREE_PEERS);

        config.set_interface_attr("PrivateKey", "new", None).unwrap();

        assert_eq!(config.lines()[1..3], ["ListenPort = 51820", "PrivateKey = new"]);
    }

    #[test]
    fn delete_removes_every_match() {
        let mut config = config("[Interface]\nDNS = 1.1.1.1\nPrivateKey = k\ndns = 8.8.8.8\n");

        let removed = config.del_interface_attr("DNS").unwrap();

        assert_eq!(removed, 2);
        assert_eq!(config.lines(), ["[Interface]", "PrivateKey = k"]);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut once = config(THREE_PEERS);
        once.del_interface_attr("ListenPort").unwrap();
        let mut twice = once.clone();

        assert_eq!(twice.del_interface_attr("ListenPort").unwrap(), 0);
        assert_eq!(twice.model(), once.model());
        assert_eq!(twice.lines(), once.lines());
    }

    #[test]
    fn delete_without_interface_is_noop() {
        let mut config = config("[Peer]\nPublicKey = p\n");

        assert_eq!(config.del_interface_attr("ListenPort").unwrap(), 0);
    }

    #[test]
    fn delete_does_not_touch_peers() {
        let mut config = config("[Interface]\nPrivateKey = k\n\n[Peer]\nPublicKey = p\nPrivateKey = x\n");

        config.del_interface_attr("PrivateKey").unwrap();

        assert_eq!(config.get_peer("p").unwrap().get("PrivateKey"), Some("x"));
    }
}

mod peer_attrs {
    use super::*;

    #[test]
    fn add_rejects_value_with_line_break() {
        let mut config = config(SAMPLE);

        let result = config.add_peer_attr("peer1", "Endpoint", "x\n[Peer]\nAllowedIPs = y", None);

        assert_eq!(
            result,
            Err(ConfError::InvalidLine {
                text: "x\n[Peer]\nAllowedIPs = y".to_owned()
            })
        );
        assert_eq!(config.serialize(), SAMPLE);
        assert!(WireguardConfig::parse(&config.serialize()).is_ok());
    }

    #[test]
    fn set_rejects_key_or_comment_with_line_break() {
        let mut config = config(SAMPLE);

        assert!(matches!(
            config.set_peer_attr("peer1", "End\rpoint", "x", None),
            Err(ConfError::InvalidLine { .. })
        ));
        assert!(matches!(
            config.set_interface_attr("ListenPort", "51820", Some("a\n[Peer]")),
            Err(ConfError::InvalidLine { .. })
        ));
        assert_eq!(config.serialize(), SAMPLE);
    }

    #[test]
    fn add_with_comment_survives_reload() {
        let mut config = config(SAMPLE);

        config
            .add_peer_attr("peer1", "Endpoint", "1.2.3.4:51820", Some("note"))
            .unwrap();
        let reloaded = WireguardConfig::parse(&config.serialize()).unwrap();

        assert_eq!(
            reloaded.get_peer("peer1").unwrap().get("Endpoint"),
            Some("1.2.3.4:51820")
        );
        let line = reloaded
            .lines()
            .iter()
            .find(|line| line.starts_with("Endpoint"))
            .unwrap();
        assert!(line.ends_with("# note"));
    }

    #[test]
    fn add_targets_the_right_peer() {
        let mut config = config(THREE_PEERS);

        config.add_peer_attr("B", "PersistentKeepalive", "25", None).unwrap();

        assert_eq!(config.get_peer("B").unwrap().get("PersistentKeepalive"), Some("25"));
        assert_eq!(config.get_peer("A").unwrap().get("PersistentKeepalive"), None);
        assert_eq!(config.get_peer("C").unwrap().get("PersistentKeepalive"), None);
        assert_eq!(config.lines()[12], "PersistentKeepalive = 25");
    }

    #[test]
    fn add_to_peer_without_trailing_blank_line() {
        let mut config = config("[Peer]\nPublicKey = A\n[Peer]\nPublicKey = B");

        config.add_peer_attr("A", "Endpoint", "e", None).unwrap();
        config.add_peer_attr("B", "Endpoint", "f", None).unwrap();

        assert_eq!(
            config.lines(),
            [
                "[Peer]",
                "PublicKey = A",
                "Endpoint = e",
                "[Peer]",
                "PublicKey = B",
                "Endpoint = f"
            ]
        );
    }

    #[test]
    fn add_duplicate_is_rejected() {
        let mut config = config(THREE_PEERS);
        let before = config.serialize();

        let result = config.add_peer_attr("B", "endpoint", "x", None);

        assert_eq!(
            result,
            Err(ConfError::DuplicateAttribute {
                section: "Peer B".to_owned(),
                key: "endpoint".to_owned(),
            })
        );
        assert_eq!(config.serialize(), before);
    }

    #[test]
    fn key_present_in_other_peer_is_not_duplicate() {
        let mut config = config(THREE_PEERS);

        config.add_peer_attr("A", "Endpoint", "5.6.7.8:51820", None).unwrap();

        assert_eq!(config.get_peer("A").unwrap().get("Endpoint"), Some("5.6.7.8:51820"));
    }

    #[test]
    fn add_to_unknown_peer() {
        let mut config = config(THREE_PEERS);
        let before = config.serialize();

        let result = config.add_peer_attr("nope", "Endpoint", "x", None);

        assert_eq!(
            result,
            Err(ConfError::SectionNotFound {
                section: "Peer nope".to_owned(),
            })
        );
        assert_eq!(config.serialize(), before);
    }

    #[test]
    fn set_overwrites_or_creates() {
        let mut config = config(THREE_PEERS);

        config.set_peer_attr("B", "Endpoint", "9.9.9.9:1", None).unwrap();
        config.set_peer_attr("C", "Endpoint", "8.8.8.8:1", None).unwrap();

        assert_eq!(config.get_peer("B").unwrap().get("Endpoint"), Some("9.9.9.9:1"));
        assert_eq!(config.get_peer("C").unwrap().get("Endpoint"), Some("8.8.8.8:1"));
    }

    #[test]
    fn set_public_key_rekeys_peer() {
        let mut config = config(THREE_PEERS);

        config.set_peer_attr("B", "PublicKey", "B2", None).unwrap();

        assert_eq!(peer_keys(&config), ["A", "B2", "C"]);
        assert_eq!(config.get_peer("B2").unwrap().get("Endpoint"), Some("1.2.3.4:51820"));
        assert!(config.get_peer("B").is_none());
    }

    #[test]
    fn delete_is_idempotent() {
        let mut config = config(THREE_PEERS);

        assert_eq!(config.del_peer_attr("B", "Endpoint").unwrap(), 1);
        let snapshot = config.clone();
        assert_eq!(config.del_peer_attr("B", "Endpoint").unwrap(), 0);

        assert_eq!(config.model(), snapshot.model());
        assert_eq!(config.get_peer("B").unwrap().get("Endpoint"), None);
    }

    #[test]
    fn delete_from_unknown_peer_is_noop() {
        let mut config = config(THREE_PEERS);
        let before = config.serialize();

        assert_eq!(config.del_peer_attr("nope", "AllowedIPs").unwrap(), 0);
        assert_eq!(config.serialize(), before);
    }

    #[test]
    fn deleting_public_key_is_rejected_and_rolled_back() {
        let mut config = config(THREE_PEERS);
        let before = config.serialize();

        let result = config.del_peer_attr("B", "PublicKey");

        assert!(matches!(result, Err(ConfError::MissingPublicKey { .. })));
        assert_eq!(config.serialize(), before);
        assert!(config.get_peer("B").is_some());
    }
}

mod peer_lifecycle {
    use super::*;

    #[test]
    fn create_rejects_key_with_line_break() {
        let mut config = config(SAMPLE);

        assert!(matches!(
            config.create_peer("peer2\n[Interface]"),
            Err(ConfError::InvalidLine { .. })
        ));
        assert_eq!(peer_keys(&config), ["peer1"]);
    }

    #[test]
    fn create_appends_section() {
        let mut config = config(SAMPLE);

        config.create_peer("peer2").unwrap();

        assert_eq!(peer_keys(&config), ["peer1", "peer2"]);
        assert_eq!(config.lines()[config.lines().len() - 3..], ["", "[Peer]", "PublicKey = peer2"]);
        assert_eq!(
            config.get_peer("peer2").unwrap().iter().collect::<Vec<_>>(),
            [("PublicKey", "peer2")]
        );
    }

    #[test]
    fn create_after_trailing_blank_keeps_single_separator() {
        let mut config = config("[Interface]\nPrivateKey = k\n\n");

        config.create_peer("p").unwrap();

        assert_eq!(config.serialize(), "[Interface]\nPrivateKey = k\n\n[Peer]\nPublicKey = p\n");
    }

    #[test]
    fn create_twice_is_rejected() {
        let mut config = config(SAMPLE);
        config.create_peer("peer2").unwrap();
        let count = config.get_peer_keys().count();

        let result = config.create_peer("peer2");

        assert_eq!(
            result,
            Err(ConfError::PeerAlreadyExists {
                public_key: "peer2".to_owned(),
            })
        );
        assert_eq!(config.get_peer_keys().count(), count);
    }

    #[test]
    fn create_rejects_value_used_by_any_attribute() {
        let mut config = config(SAMPLE);

        let result = config.create_peer("10.0.0.2/32");

        assert!(matches!(result, Err(ConfError::PeerAlreadyExists { .. })));
    }

    #[test]
    fn created_peer_accepts_attributes() {
        let mut config = config(SAMPLE);
        config.create_peer("peer2").unwrap();

        config.add_peer_attr("peer2", "AllowedIPs", "10.0.0.3/32", None).unwrap();

        assert_eq!(config.get_peer("peer2").unwrap().get("AllowedIPs"), Some("10.0.0.3/32"));
    }

    #[test]
    fn delete_removes_exactly_one_section() {
        let mut config = config(THREE_PEERS);
        let a = config.get_peer("A").cloned();
        let c = config.get_peer("C").cloned();

        assert!(config.delete_peer("B").unwrap());

        assert_eq!(peer_keys(&config), ["A", "C"]);
        assert_eq!(config.get_peer("A").cloned(), a);
        assert_eq!(config.get_peer("C").cloned(), c);
        assert!(!config.serialize().contains("\n\n\n"));
    }

    #[test]
    fn delete_last_peer() {
        let mut config = config(SAMPLE);

        assert!(config.delete_peer("peer1").unwrap());

        assert_eq!(config.serialize(), "[Interface]\nPrivateKey = abc123\n\n");
        assert_eq!(peer_keys(&config), Vec::<&str>::new());
    }

    #[test]
    fn delete_unknown_peer_is_noop() {
        let mut config = config(THREE_PEERS);
        let before = config.serialize();

        assert!(!config.delete_peer("nope").unwrap());
        assert_eq!(config.serialize(), before);
    }

    #[test]
    fn delete_then_recreate() {
        let mut config = config(THREE_PEERS);
        config.delete_peer("A").unwrap();

        config.create_peer("A").unwrap();

        assert_eq!(peer_keys(&config), ["B", "C", "A"]);
    }
}
