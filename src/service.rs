//! DNS service facade
//!
//! [`DnsServerModule`] wraps the Windows `DnsServer` PowerShell module,
//! exposing one operation per record type and verb. Each call builds exactly
//! one [`PowerShellCommand`], hands it to the configured [`CommandRunner`],
//! and translates the outcome.
//!
//! <https://docs.microsoft.com/en-us/powershell/module/dnsserver/>

use std::sync::Arc;

use crate::command::PowerShellCommand;
use crate::error::{DnsServerError, Result};
use crate::runner::PowerShellRunner;
use crate::traits::{CommandOutput, CommandRunner};
use crate::transform::decode_records;
use crate::types::{Record, RecordType};
use crate::utils::ttl::format_ttl;

/// TTL applied to TXT records when the caller does not supply one.
const DEFAULT_TXT_TTL: &str = "1h";

/// Facade over the `DnsServer` PowerShell module.
///
/// Stateless apart from its configuration: every operation spawns an
/// independent process and shares nothing with overlapping calls. The DNS
/// server itself arbitrates the ordering of concurrent administrative
/// changes.
///
/// # Examples
///
/// ```rust,no_run
/// use windns::{DnsServerModule, RecordType};
///
/// # async fn example() -> windns::Result<()> {
/// let dns = DnsServerModule::new();
///
/// if dns.add_a_record("example.com", "www", "10.0.0.1", Some("1h")).await? {
///     let records = dns
///         .get_records("example.com", Some("www"), Some(RecordType::A))
///         .await?;
///     for record in &records {
///         println!("{} {} -> {}", record.record_type, record.name, record.value);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct DnsServerModule {
    runner: Arc<dyn CommandRunner>,
    server: Option<String>,
}

impl DnsServerModule {
    /// Create a facade using the default [`PowerShellRunner`], targeting the
    /// local machine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            runner: Arc::new(PowerShellRunner::new()),
            server: None,
        }
    }

    /// Create a facade managing a remote DNS server.
    ///
    /// The server name is passed as `-ComputerName` on every operation.
    #[must_use]
    pub fn with_server(server: impl Into<String>) -> Self {
        Self {
            runner: Arc::new(PowerShellRunner::new()),
            server: Some(server.into()),
        }
    }

    /// Create a facade with a custom runner (primarily a test seam).
    #[must_use]
    pub fn with_runner(runner: Arc<dyn CommandRunner>, server: Option<String>) -> Self {
        Self { runner, server }
    }

    /// Uses `Get-DnsServerResourceRecord` to query records in a zone,
    /// optionally filtered by name and record type.
    ///
    /// Zero matching rows yield an empty list; a failed invocation yields
    /// [`DnsServerError::CommandFailed`] so callers can tell the two apart.
    pub async fn get_records(
        &self,
        zone: &str,
        name: Option<&str>,
        record_type: Option<RecordType>,
    ) -> Result<Vec<Record>> {
        let mut command = PowerShellCommand::new("Get-DnsServerResourceRecord").arg("ZoneName", zone);
        if let Some(name) = name {
            command = command.arg("Name", name);
        }
        if let Some(record_type) = record_type {
            command = command.arg("RRType", record_type.as_token());
        }
        command = self.computer_scoped(command).json_output();

        let output = self.run(&command).await?;
        if !output.success {
            return Err(DnsServerError::CommandFailed {
                cmdlet: command.cmdlet().to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        decode_records(zone, &output.stdout)
    }

    /// Uses `Add-DnsServerResourceRecordA` to add an A record to a zone.
    ///
    /// `-AllowUpdateAny` is always set so an existing record with the same
    /// name is updated in place.
    pub async fn add_a_record(
        &self,
        zone: &str,
        name: &str,
        ipv4: &str,
        ttl: Option<&str>,
    ) -> Result<bool> {
        let mut command = PowerShellCommand::new("Add-DnsServerResourceRecordA")
            .flag("AllowUpdateAny")
            .arg("ZoneName", zone)
            .arg("Name", name)
            .arg("IPv4Address", ipv4);
        if let Some(ttl) = ttl {
            command = command.arg("TimeToLive", format_ttl(ttl)?);
        }
        command = self.computer_scoped(command);

        let output = self.run(&command).await?;
        Ok(output.success)
    }

    /// Uses `Remove-DnsServerResourceRecord` to remove an A record from a
    /// zone, without a confirmation prompt.
    pub async fn remove_a_record(&self, zone: &str, name: &str) -> Result<bool> {
        self.remove_record(zone, name, RecordType::A, None).await
    }

    /// Uses `Add-DnsServerResourceRecordCName` to add a CNAME record to a
    /// zone.
    ///
    /// The alias target is quoted literally so PowerShell does not interpret
    /// it.
    pub async fn add_cname_record(
        &self,
        zone: &str,
        alias_name: &str,
        target: &str,
        ttl: Option<&str>,
    ) -> Result<bool> {
        let mut command = PowerShellCommand::new("Add-DnsServerResourceRecordCName")
            .arg("ZoneName", zone)
            .arg("Name", alias_name)
            .arg("HostNameAlias", quote_literal(target));
        if let Some(ttl) = ttl {
            command = command.arg("TimeToLive", format_ttl(ttl)?);
        }
        command = self.computer_scoped(command);

        let output = self.run(&command).await?;
        if !output.success {
            log::error!("{}", output.stdout);
            log::error!("{}", output.stderr);
        }
        Ok(output.success)
    }

    /// Uses `Remove-DnsServerResourceRecord` to remove a CNAME record from a
    /// zone.
    pub async fn remove_cname_record(&self, zone: &str, alias_name: &str) -> Result<bool> {
        self.remove_record(zone, alias_name, RecordType::Cname, None)
            .await
    }

    /// Uses `Add-DnsServerResourceRecord` to add a TXT record to a zone.
    ///
    /// The TTL defaults to one hour when not supplied.
    pub async fn add_txt_record(
        &self,
        zone: &str,
        name: &str,
        text: &str,
        ttl: Option<&str>,
    ) -> Result<bool> {
        let command = self.computer_scoped(
            PowerShellCommand::new("Add-DnsServerResourceRecord")
                .flag("AllowUpdateAny")
                .flag("Txt")
                .arg("ZoneName", zone)
                .arg("Name", name)
                .arg("DescriptiveText", text)
                .arg("TimeToLive", format_ttl(ttl.unwrap_or(DEFAULT_TXT_TTL))?),
        );

        let output = self.run(&command).await?;
        Ok(output.success)
    }

    /// Uses `Remove-DnsServerResourceRecord` to remove a TXT record from a
    /// zone.
    ///
    /// When `value` is given, only the TXT record carrying that data is
    /// removed.
    pub async fn remove_txt_record(
        &self,
        zone: &str,
        name: &str,
        value: Option<&str>,
    ) -> Result<bool> {
        self.remove_record(zone, name, RecordType::Txt, value).await
    }

    /// Uses `Get-Module` to check whether the `DNSServer` module is
    /// available on the target machine.
    pub async fn is_module_installed(&self) -> Result<bool> {
        let command = PowerShellCommand::new("Get-Module")
            .flag("ListAvailable")
            .arg("Name", "DNSServer");

        let output = self.run(&command).await?;
        Ok(output.success && !output.stdout.trim().is_empty())
    }

    /// Shared removal path: forced, scoped to one record type, optionally
    /// narrowed to a specific record data value.
    async fn remove_record(
        &self,
        zone: &str,
        name: &str,
        record_type: RecordType,
        record_data: Option<&str>,
    ) -> Result<bool> {
        let mut command = PowerShellCommand::new("Remove-DnsServerResourceRecord")
            .flag("Force")
            .arg("ZoneName", zone)
            .arg("RRType", record_type.as_token())
            .arg("Name", name);
        if let Some(record_data) = record_data {
            command = command.arg("RecordData", quote_literal(record_data));
        }
        command = self.computer_scoped(command);

        let output = self.run(&command).await?;
        Ok(output.success)
    }

    /// Append `-ComputerName` only when a target server was configured;
    /// omitting it lets the cmdlet default to the local machine.
    fn computer_scoped(&self, command: PowerShellCommand) -> PowerShellCommand {
        match &self.server {
            Some(server) => command.arg("ComputerName", server),
            None => command,
        }
    }

    /// Single funnel for all invocations; failures are logged with the
    /// rendered command before the output is handed back.
    async fn run(&self, command: &PowerShellCommand) -> Result<CommandOutput> {
        let output = self.runner.run(command).await?;
        if !output.success {
            log::error!("Command failed [{}]", command.render());
        }
        Ok(output)
    }
}

impl Default for DnsServerModule {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap a value in double quotes so PowerShell treats it as a literal
/// string.
fn quote_literal(value: &str) -> String {
    format!("\"{value}\"")
}
