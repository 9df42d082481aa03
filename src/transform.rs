//! Result translation
//!
//! Decodes the `ConvertTo-Json` output of `Get-DnsServerResourceRecord` into
//! [`Record`]s. PowerShell emits a bare object when exactly one row matches
//! and an array otherwise; both shapes are normalized here. Rows of
//! unsupported record types are skipped rather than failing the decode.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{DnsServerError, Result};
use crate::types::{Record, RecordType};
use crate::utils::log::truncate_for_log;

/// One row of query output, as serialized by `ConvertTo-Json`.
#[derive(Debug, Deserialize)]
struct ResourceRecordRow {
    #[serde(rename = "HostName")]
    host_name: String,
    #[serde(rename = "RecordType")]
    record_type: String,
    #[serde(rename = "TimeToLive", default)]
    time_to_live: Option<Value>,
    #[serde(rename = "RecordData", default)]
    record_data: Value,
}

/// `ConvertTo-Json` unwraps single-element pipelines to a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<ResourceRecordRow>),
    One(ResourceRecordRow),
}

/// Decode query output into records, attaching the queried `zone`.
///
/// Empty output means zero rows. Malformed JSON is an explicit
/// [`DnsServerError::ParseError`], distinguishable from "no records".
pub(crate) fn decode_records(zone: &str, output: &str) -> Result<Vec<Record>> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let rows = match serde_json::from_str::<OneOrMany>(trimmed) {
        Ok(OneOrMany::Many(rows)) => rows,
        Ok(OneOrMany::One(row)) => vec![row],
        Err(e) => {
            log::error!("JSON parse failed: {e}");
            log::error!("Raw output: {}", truncate_for_log(trimmed));
            return Err(DnsServerError::ParseError {
                detail: e.to_string(),
            });
        }
    };

    let zone = normalize_name(zone);
    Ok(rows
        .into_iter()
        .filter_map(|row| translate_row(&zone, row))
        .collect())
}

/// Translate one row, or skip it when the type is unsupported or the
/// type-specific data field is missing.
fn translate_row(zone: &str, row: ResourceRecordRow) -> Option<Record> {
    let Some(record_type) = RecordType::parse(&row.record_type) else {
        log::warn!(
            "Skipping record '{}': unsupported type '{}'",
            row.host_name,
            row.record_type
        );
        return None;
    };

    let Some(value) = record_value(record_type, &row.record_data) else {
        log::warn!(
            "Skipping {} record '{}': no usable record data",
            record_type,
            row.host_name
        );
        return None;
    };

    Some(Record {
        zone: zone.to_string(),
        name: row.host_name,
        record_type,
        value,
        ttl: row.time_to_live.as_ref().and_then(parse_ttl_field),
    })
}

/// Extract the type-specific value field from `RecordData`.
fn record_value(record_type: RecordType, data: &Value) -> Option<String> {
    match record_type {
        // IPv4Address serializes either as a plain string or as an address
        // object carrying IPAddressToString, depending on JSON depth.
        RecordType::A => match &data["IPv4Address"] {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => obj
                .get("IPAddressToString")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        },
        RecordType::Cname => data["HostNameAlias"].as_str().map(normalize_name),
        RecordType::Txt => data["DescriptiveText"].as_str().map(str::to_string),
        RecordType::Mx => data["MailExchange"].as_str().map(normalize_name),
        RecordType::Srv => data["DomainName"].as_str().map(normalize_name),
    }
}

/// Drop the trailing dot of a fully qualified name.
fn normalize_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// Parse the `TimeToLive` field, which serializes either as a TimeSpan
/// literal (`"01:00:00"`, `"1.02:00:00"`) or as a TimeSpan object carrying
/// `TotalSeconds`. Total over arbitrary input: values that don't fit a
/// `Duration` (negative, non-finite, out of range) yield `None` like any
/// other malformed field.
fn parse_ttl_field(value: &Value) -> Option<Duration> {
    match value {
        Value::String(s) => parse_timespan(s),
        Value::Object(obj) => obj
            .get("TotalSeconds")
            .and_then(Value::as_f64)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok()),
        _ => None,
    }
}

/// Parse a TimeSpan literal: `hh:mm:ss[.fraction]`, optionally prefixed with
/// `d.` for the day component.
fn parse_timespan(s: &str) -> Option<Duration> {
    let (days, rest) = match s.split_once('.') {
        Some((head, tail)) if !head.contains(':') => (head.parse::<u64>().ok()?, tail),
        _ => (0, s),
    };

    let mut parts = rest.splitn(3, ':');
    let hours = parts.next()?.parse::<u64>().ok()?;
    let minutes = parts.next()?.parse::<u64>().ok()?;
    let seconds = parts.next()?.parse::<f64>().ok()?;

    let whole = days
        .checked_mul(86_400)?
        .checked_add(hours.checked_mul(3_600)?)?
        .checked_add(minutes.checked_mul(60)?)?;
    let frac = Duration::try_from_secs_f64(seconds).ok()?;

    Duration::from_secs(whole).checked_add(frac)
}
