use fixtures::fixtures;
use serde::Deserialize;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use ua_classifier::{
    CacheConfig, Client, Detection, Device, Error, Os, ParserConfig, RuleDescriptor, RuleSet,
    UaParser, BUNDLED_RULES,
};

// Global UaParser instance that is initialized once
static PARSER_INSTANCE: OnceLock<Arc<UaParser>> = OnceLock::new();

fn get_shared_parser() -> Arc<UaParser> {
    PARSER_INSTANCE
        .get_or_init(|| Arc::new(UaParser::new().expect("failed to build UaParser")))
        .clone()
}

// ---------------------------------------------------------------------------
// Fixture files
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Fixture {
    user_agent: String,
    client: Client,
    os: Os,
    device: Device,
}

#[fixtures(["tests/fixtures/*.yml"])]
#[test]
fn test_fixtures(path: &Path) {
    let parser = get_shared_parser();
    let content = std::fs::read_to_string(path).unwrap();
    let fixtures: Vec<Fixture> = serde_yaml::from_str(&content).unwrap();
    assert!(!fixtures.is_empty(), "no fixtures in {:?}", path);

    for f in &fixtures {
        let result = parser.classify(&f.user_agent);
        assert_eq!(result.client, f.client, "client mismatch for UA: {}", f.user_agent);
        assert_eq!(result.os, f.os, "os mismatch for UA: {}", f.user_agent);
        assert_eq!(result.device, f.device, "device mismatch for UA: {}", f.user_agent);

        // The narrow entry points agree with the composite result.
        assert_eq!(parser.classify_client(&f.user_agent), f.client);
        assert_eq!(parser.classify_os(&f.user_agent), f.os);
        assert_eq!(parser.classify_device(&f.user_agent), f.device);
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn detection_round_trips_through_yaml() {
    let parser = get_shared_parser();
    let detection = parser.classify(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1_2 like Mac OS X) AppleWebKit/605.1.15 \
         (KHTML, like Gecko) Version/17.1.2 Mobile/15E148 Safari/604.1",
    );

    let yaml = serde_yaml::to_string(&*detection).unwrap();
    let parsed: Detection = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, *detection);
    assert_eq!(parsed.client.family, "Mobile Safari");
    assert_eq!(parsed.os.patch.as_deref(), Some("2"));
}

#[test]
fn display_form_parses_back_by_field_name() {
    let parser = get_shared_parser();
    let detection = parser.classify(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1_2 like Mac OS X) AppleWebKit/605.1.15 \
         (KHTML, like Gecko) Version/17.1.2 Mobile/15E148 Safari/604.1",
    );

    let client: Client = serde_yaml::from_str(&detection.client.to_string()).unwrap();
    assert_eq!(client, detection.client);
    let os: Os = serde_yaml::from_str(&detection.os.to_string()).unwrap();
    assert_eq!(os, detection.os);

    // An empty component stays distinct from an absent one.
    let client = Client::new("Firefox", Some("3"), Some(""), None);
    let parsed: Client = serde_yaml::from_str(&client.to_string()).unwrap();
    assert_eq!(parsed, client);
    assert_eq!(parsed.minor.as_deref(), Some(""));
    assert_eq!(parsed.patch, None);

    let os = Os::new("Mac OS X", [Some("10"), Some("15"), Some("7"), Some("")]);
    let parsed: Os = serde_yaml::from_str(&os.to_string()).unwrap();
    assert_eq!(parsed, os);
}

#[test]
fn spider_display() {
    let parser = get_shared_parser();
    let d = parser.classify("Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)");
    assert!(d.is_spider());
    assert!(!d.is_mobile());
    assert_eq!(d.client.display_family(), "googlebot");
    assert_eq!(d.client.full_version(), "");
    assert_eq!(
        d.client.to_string(),
        r#"{family: "Spider", is_spider: true, major: "googlebot", minor: null, patch: null}"#
    );
}

#[test]
fn version_strings() {
    let parser = get_shared_parser();
    let d = parser.classify("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15");
    assert_eq!(d.client.full_version(), "17.1");
    assert_eq!(d.client.short_version(), "17.1");
    assert_eq!(d.os.full_version(), "10.15.7");
    assert_eq!(d.os.short_version(), "10.15");

    let d = parser.classify("something nobody recognises");
    assert_eq!(d.client, Client::other());
    assert_eq!(d.client.full_version(), "unknown");
    assert_eq!(d.os.display_family(), "Other");
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn from_reader_and_from_path_match_bundled() {
    let ua = "Mozilla/5.0 (Linux; Android 13; SM-S918B) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.6099.144 Mobile Safari/537.36";
    let from_reader = UaParser::from_reader(BUNDLED_RULES.as_bytes()).unwrap();
    let from_path = UaParser::from_path(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("regexes/regexes.yaml"),
        ParserConfig::without_cache(),
    )
    .unwrap();
    assert_eq!(*from_reader.classify(ua), *get_shared_parser().classify(ua));
    assert_eq!(*from_path.classify(ua), *get_shared_parser().classify(ua));
}

#[test]
fn missing_section_is_fatal() {
    let yaml = "user_agent_parsers: []\nos_parsers: []\n";
    let err = UaParser::from_reader_with_config(yaml.as_bytes(), ParserConfig::default())
        .err()
        .unwrap();
    assert!(matches!(err, Error::MissingSection("device_parsers")));
    assert_eq!(err.to_string(), "rule source is missing the `device_parsers` section");
}

#[test]
fn rule_without_regex_or_name_is_fatal() {
    let yaml = "user_agent_parsers:\n  - family_replacement: 'Broken'\nos_parsers: []\ndevice_parsers: []\n";
    let err = UaParser::from_reader(yaml.as_bytes()).err().unwrap();
    assert!(matches!(
        err,
        Error::InvalidRule {
            section: "user_agent_parsers",
            index: 0,
            ..
        }
    ));
}

#[test]
fn malformed_yaml_is_fatal() {
    let err = UaParser::from_reader("user_agent_parsers: [".as_bytes()).err().unwrap();
    assert!(matches!(err, Error::YAML(_)));
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

fn tiny_rules() -> RuleSet {
    RuleSet {
        user_agent_parsers: Some(vec![RuleDescriptor::pattern(r"(\w+)/(\d+)")]),
        os_parsers: Some(vec![]),
        device_parsers: Some(vec![]),
        ..RuleSet::default()
    }
}

#[test]
fn cache_is_bounded() {
    let parser = UaParser::from_rules(
        tiny_rules(),
        ParserConfig::with_cache(CacheConfig {
            initial_capacity: 2,
            max_capacity: 16,
        }),
    )
    .unwrap();

    for i in 0..16 {
        parser.classify(&format!("agent{}/{}", i, i));
    }
    assert!(parser.cache_entry_count().unwrap() <= 16);

    for i in 16..500 {
        let d = parser.classify(&format!("agent{}/{}", i, i));
        assert_eq!(d.client.major.as_deref(), Some(i.to_string().as_str()));
    }
    assert!(parser.cache_entry_count().unwrap() <= 16);
}

#[test]
fn cached_results_are_identical() {
    let parser = UaParser::from_rules(tiny_rules(), ParserConfig::default()).unwrap();
    let first = parser.classify("Foo/1");
    let second = parser.classify("Foo/1");
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.client, Client::new("Foo", Some("1"), None, None));
}

#[test]
fn concurrent_callers_see_the_same_results() {
    let parser = get_shared_parser();
    let uas = [
        "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
        "Opera/9.80 (Windows NT 6.1; U; en) Presto/2.10.289 Version/12.02",
        "curl/7.68.0",
        "",
    ];
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let parser = parser.clone();
                s.spawn(move || {
                    uas.iter()
                        .map(|ua| (*parser.classify(ua)).clone())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let results: Vec<Vec<Detection>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for r in &results[1..] {
            assert_eq!(r, &results[0]);
        }
    });
}
