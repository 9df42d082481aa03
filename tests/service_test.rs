//! Facade tests against a scripted runner.
//!
//! Every test asserts the exact token sequence handed to the runner and the
//! translation of its scripted output, without touching a real PowerShell.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{ScriptedRunner, failure, success};
use windns::{DnsServerError, DnsServerModule, RecordType};

fn module_with(runner: &Arc<ScriptedRunner>, server: Option<&str>) -> DnsServerModule {
    DnsServerModule::with_runner(runner.clone(), server.map(str::to_string))
}

// ============ Queries ============

#[tokio::test]
async fn get_records_builds_scoped_query_and_decodes_rows() {
    let output = r#"[
        {
            "HostName": "www",
            "RecordType": "A",
            "TimeToLive": "01:00:00",
            "RecordData": { "IPv4Address": "100.100.100.100" }
        }
    ]"#;
    let runner = Arc::new(ScriptedRunner::new([success(output)]));
    let dns = module_with(&runner, None);

    let records = dns
        .get_records("myzone.com", Some("www"), Some(RecordType::A))
        .await
        .unwrap();

    assert_eq!(
        runner.commands(),
        vec![vec![
            "Get-DnsServerResourceRecord".to_string(),
            "-ZoneName myzone.com".to_string(),
            "-Name www".to_string(),
            "-RRType A".to_string(),
            "|".to_string(),
            "ConvertTo-Json".to_string(),
        ]]
    );

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].zone, "myzone.com");
    assert_eq!(records[0].name, "www");
    assert_eq!(records[0].record_type, RecordType::A);
    assert_eq!(records[0].value, "100.100.100.100");
    assert_eq!(records[0].ttl, Some(Duration::from_secs(3600)));
}

#[tokio::test]
async fn get_records_without_filters_queries_the_whole_zone() {
    let runner = Arc::new(ScriptedRunner::new([success("")]));
    let dns = module_with(&runner, None);

    let records = dns.get_records("myzone.com", None, None).await.unwrap();

    assert!(records.is_empty());
    assert_eq!(
        runner.commands()[0],
        vec![
            "Get-DnsServerResourceRecord".to_string(),
            "-ZoneName myzone.com".to_string(),
            "|".to_string(),
            "ConvertTo-Json".to_string(),
        ]
    );
}

#[tokio::test]
async fn get_records_failure_is_distinguishable_from_zero_records() {
    let runner = Arc::new(ScriptedRunner::new([failure(1, "zone does not exist")]));
    let dns = module_with(&runner, None);

    let err = dns.get_records("nosuchzone.com", None, None).await.unwrap_err();

    match err {
        DnsServerError::CommandFailed {
            cmdlet,
            exit_code,
            stderr,
        } => {
            assert_eq!(cmdlet, "Get-DnsServerResourceRecord");
            assert_eq!(exit_code, 1);
            assert_eq!(stderr, "zone does not exist");
        }
        other => panic!("expected CommandFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn get_records_survives_corrupt_ttl_output() {
    let output = r#"{
        "HostName": "www",
        "RecordType": "A",
        "TimeToLive": { "TotalSeconds": 1e300 },
        "RecordData": { "IPv4Address": "10.0.0.1" }
    }"#;
    let runner = Arc::new(ScriptedRunner::new([success(output)]));
    let dns = module_with(&runner, None);

    let records = dns.get_records("myzone.com", None, None).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].ttl, None, "unrepresentable TTLs degrade to None");
}

#[tokio::test]
async fn get_records_malformed_json_is_a_parse_error() {
    let runner = Arc::new(ScriptedRunner::new([success("WARNING: not json")]));
    let dns = module_with(&runner, None);

    let err = dns.get_records("myzone.com", None, None).await.unwrap_err();
    assert!(matches!(err, DnsServerError::ParseError { .. }));
}

// ============ A Records ============

#[tokio::test]
async fn add_a_record_forces_allow_update_any() {
    let runner = Arc::new(ScriptedRunner::new([success("")]));
    let dns = module_with(&runner, None);

    let added = dns
        .add_a_record("myzone.com", "www", "100.100.100.100", None)
        .await
        .unwrap();

    assert!(added);
    assert_eq!(
        runner.commands(),
        vec![vec![
            "Add-DnsServerResourceRecordA".to_string(),
            "-AllowUpdateAny".to_string(),
            "-ZoneName myzone.com".to_string(),
            "-Name www".to_string(),
            "-IPv4Address 100.100.100.100".to_string(),
        ]]
    );
}

#[tokio::test]
async fn add_a_record_formats_the_ttl() {
    let runner = Arc::new(ScriptedRunner::new([success("")]));
    let dns = module_with(&runner, None);

    dns.add_a_record("myzone.com", "www", "10.0.0.99", Some("1h 30m"))
        .await
        .unwrap();

    assert!(
        runner.commands()[0].contains(&"-TimeToLive 01:30:00".to_string()),
        "TTL should be rendered as a TimeSpan token"
    );
}

#[tokio::test]
async fn add_a_record_rejects_bad_ttl_before_spawning() {
    let runner = Arc::new(ScriptedRunner::new([success("")]));
    let dns = module_with(&runner, None);

    let err = dns
        .add_a_record("myzone.com", "www", "10.0.0.99", Some("bogus"))
        .await
        .unwrap_err();

    assert!(matches!(err, DnsServerError::InvalidTtl { .. }));
    assert_eq!(runner.command_count(), 0, "no process may be spawned");
}

#[tokio::test]
async fn remove_a_record_is_forced_and_scoped_to_type_a() {
    let runner = Arc::new(ScriptedRunner::new([success("")]));
    let dns = module_with(&runner, None);

    let removed = dns.remove_a_record("myzone.com", "www").await.unwrap();

    assert!(removed);
    assert_eq!(
        runner.commands(),
        vec![vec![
            "Remove-DnsServerResourceRecord".to_string(),
            "-Force".to_string(),
            "-ZoneName myzone.com".to_string(),
            "-RRType A".to_string(),
            "-Name www".to_string(),
        ]]
    );
}

#[tokio::test]
async fn remove_a_record_passes_the_runner_verdict_through() {
    // Removing a non-existent record does not raise; the runner's verdict
    // comes back unchanged.
    let runner = Arc::new(ScriptedRunner::new([failure(1, "no such record")]));
    let dns = module_with(&runner, None);

    let removed = dns.remove_a_record("myzone.com", "ghost").await.unwrap();
    assert!(!removed);
}

// ============ CNAME Records ============

#[tokio::test]
async fn add_cname_record_quotes_the_alias_target() {
    let runner = Arc::new(ScriptedRunner::new([success("")]));
    let dns = module_with(&runner, None);

    dns.add_cname_record("myzone.com", "alias", "www.myzone.com", None)
        .await
        .unwrap();

    assert_eq!(
        runner.commands(),
        vec![vec![
            "Add-DnsServerResourceRecordCName".to_string(),
            "-ZoneName myzone.com".to_string(),
            "-Name alias".to_string(),
            "-HostNameAlias \"www.myzone.com\"".to_string(),
        ]]
    );
}

#[tokio::test]
async fn add_cname_record_reports_failure_as_false() {
    let runner = Arc::new(ScriptedRunner::new([failure(1, "record exists")]));
    let dns = module_with(&runner, None);

    let added = dns
        .add_cname_record("myzone.com", "alias", "www.myzone.com", None)
        .await
        .unwrap();
    assert!(!added);
}

#[tokio::test]
async fn remove_cname_record_is_scoped_to_type_cname() {
    let runner = Arc::new(ScriptedRunner::new([success("")]));
    let dns = module_with(&runner, None);

    dns.remove_cname_record("myzone.com", "alias").await.unwrap();

    assert!(runner.commands()[0].contains(&"-RRType CNAME".to_string()));
}

// ============ TXT Records ============

#[tokio::test]
async fn add_txt_record_defaults_the_ttl_to_one_hour() {
    let runner = Arc::new(ScriptedRunner::new([success("")]));
    let dns = module_with(&runner, None);

    dns.add_txt_record("myzone.com", "www", "my test record", None)
        .await
        .unwrap();

    assert_eq!(
        runner.commands(),
        vec![vec![
            "Add-DnsServerResourceRecord".to_string(),
            "-AllowUpdateAny".to_string(),
            "-Txt".to_string(),
            "-ZoneName myzone.com".to_string(),
            "-Name www".to_string(),
            "-DescriptiveText my test record".to_string(),
            "-TimeToLive 01:00:00".to_string(),
        ]]
    );
}

#[tokio::test]
async fn remove_txt_record_quotes_the_record_data() {
    let runner = Arc::new(ScriptedRunner::new([success("")]));
    let dns = module_with(&runner, None);

    dns.remove_txt_record("myzone.com", "www", Some("my test record"))
        .await
        .unwrap();

    assert_eq!(
        runner.commands(),
        vec![vec![
            "Remove-DnsServerResourceRecord".to_string(),
            "-Force".to_string(),
            "-ZoneName myzone.com".to_string(),
            "-RRType Txt".to_string(),
            "-Name www".to_string(),
            "-RecordData \"my test record\"".to_string(),
        ]]
    );
}

#[tokio::test]
async fn remove_txt_record_without_value_omits_record_data() {
    let runner = Arc::new(ScriptedRunner::new([success("")]));
    let dns = module_with(&runner, None);

    dns.remove_txt_record("myzone.com", "www", None).await.unwrap();

    assert!(
        !runner.commands()[0]
            .iter()
            .any(|token| token.starts_with("-RecordData"))
    );
}

// ============ Server Scoping ============

#[tokio::test]
async fn configured_server_is_passed_as_computer_name() {
    let runner = Arc::new(ScriptedRunner::new([success(""), success("")]));
    let dns = module_with(&runner, Some("dns01.myzone.com"));

    dns.add_a_record("myzone.com", "www", "10.0.0.1", None)
        .await
        .unwrap();
    dns.remove_a_record("myzone.com", "www").await.unwrap();

    for tokens in runner.commands() {
        assert!(
            tokens.contains(&"-ComputerName dns01.myzone.com".to_string()),
            "expected server scoping in {tokens:?}"
        );
    }
}

#[tokio::test]
async fn unconfigured_server_defaults_to_the_local_machine() {
    let runner = Arc::new(ScriptedRunner::new([success("")]));
    let dns = module_with(&runner, None);

    dns.add_a_record("myzone.com", "www", "10.0.0.1", None)
        .await
        .unwrap();

    assert!(
        !runner.commands()[0]
            .iter()
            .any(|token| token.starts_with("-ComputerName"))
    );
}

// ============ Module Discovery ============

#[tokio::test]
async fn is_module_installed_requires_success_and_output() {
    let runner = Arc::new(ScriptedRunner::new([success(
        "ModuleType Version Name\nManifest   2.0.0.0 DNSServer",
    )]));
    let dns = module_with(&runner, None);

    assert!(dns.is_module_installed().await.unwrap());
    assert_eq!(
        runner.commands(),
        vec![vec![
            "Get-Module".to_string(),
            "-ListAvailable".to_string(),
            "-Name DNSServer".to_string(),
        ]]
    );
}

#[tokio::test]
async fn is_module_installed_is_false_on_empty_output() {
    let runner = Arc::new(ScriptedRunner::new([success("  \n")]));
    let dns = module_with(&runner, None);
    assert!(!dns.is_module_installed().await.unwrap());
}

#[tokio::test]
async fn is_module_installed_is_false_on_failure() {
    let runner = Arc::new(ScriptedRunner::new([failure(1, "powershell broke")]));
    let dns = module_with(&runner, None);
    assert!(!dns.is_module_installed().await.unwrap());
}

// ============ Scenarios ============

#[tokio::test]
async fn add_then_query_round_trip() {
    let query_output = r#"{
        "HostName": "www",
        "RecordType": "TXT",
        "TimeToLive": "01:00:00",
        "RecordData": { "DescriptiveText": "my test record" }
    }"#;
    let runner = Arc::new(ScriptedRunner::new([success(""), success(query_output)]));
    let dns = module_with(&runner, None);

    let added = dns
        .add_txt_record("myzone.com", "www", "my test record", None)
        .await
        .unwrap();
    assert!(added);

    let records = dns
        .get_records("myzone.com", Some("www"), Some(RecordType::Txt))
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].value, "my test record");
    assert_eq!(records[0].record_type, RecordType::Txt);
}
