//! Replay of recorded Horizon snapshots from disk

use hex_book::session::{BookSession, Update};
use std::fs::File;
use std::io::{BufReader, Write};

const HEXA_XLM: [&str; 4] = [
    r#"{"bids":[{"price_r":{"n":9,"d":10},"price":"0.9000000","amount":"9000000.0000000"}],"asks":[{"price_r":{"n":11,"d":10},"price":"1.1000000","amount":"10.0000000"}],"base":{"asset_type":"credit_alphanum4","asset_code":"HEXA","asset_issuer":"GISSUER"},"counter":{"asset_type":"native"}}"#,
    r#"{"bids":[{"price_r":{"n":9,"d":10},"price":"0.9000000","amount":"9000000.0000000"}],"asks":[{"price_r":{"n":11,"d":10},"price":"1.1000000","amount":"10.0000000"}],"base":{"asset_type":"credit_alphanum4","asset_code":"HEXA","asset_issuer":"GISSUER"},"counter":{"asset_type":"native"}}"#,
    r#"{"bids":[{"price_r":{"n":9,"d":10},"price":"0.9000000","amount":"9000000.0000000"}],"asks":[]}"#,
    r#"{"bids":[{"price_r":{"n":9,"d":10},"amount":"lots"}],"asks":[]}"#,
];

#[test]
fn test_replay_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in HEXA_XLM {
        writeln!(file, "{}", line).unwrap();
    }

    let mut session = BookSession::new(3).unwrap();
    let reader = BufReader::new(File::open(file.path()).unwrap());
    let updates = session.replay(reader).unwrap();

    assert_eq!(updates.len(), 4);
    assert_eq!(
        updates[0],
        Update::Retained {
            sequence: 0,
            line: " 10000000@0.9 : 10@1.1 ".to_string(),
        }
    );
    assert_eq!(updates[1], Update::Heartbeat);
    assert_eq!(
        updates[2],
        Update::Retained {
            sequence: 1,
            line: " 10000000@0.9 : ".to_string(),
        }
    );
    assert!(matches!(updates[3], Update::Rejected(_)));

    let stats = session.stats();
    assert_eq!((stats.retained, stats.heartbeats, stats.rejected), (2, 1, 1));
    assert_eq!(session.tracker().len(), 2);
}
