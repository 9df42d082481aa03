//! # windns
//!
//! Manage DNS resource records (A, CNAME, TXT) on a Windows DNS Server by
//! driving the vendor [`DnsServer` PowerShell module] through
//! `powershell.exe` and decoding its `ConvertTo-Json` output back into typed
//! records.
//!
//! [`DnsServer` PowerShell module]: https://docs.microsoft.com/en-us/powershell/module/dnsserver/
//!
//! ## How It Works
//!
//! Every operation follows the same path:
//!
//! 1. [`DnsServerModule`] builds a [`PowerShellCommand`] — cmdlet, switch
//!    flags, ordered named arguments, and optionally a `ConvertTo-Json` pipe.
//! 2. A [`CommandRunner`] (by default [`PowerShellRunner`]) executes it as a
//!    child process with a bounded wait and captures both output streams.
//! 3. For queries, the JSON result rows are translated into [`Record`]
//!    values; for writes, the process verdict is returned as a `bool`.
//!
//! There is no protocol state machine, no caching, and no persistence: the
//! Windows DNS Server itself is the system of record.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use windns::{DnsServerModule, RecordType};
//!
//! #[tokio::main]
//! async fn main() -> windns::Result<()> {
//!     // Targets the local machine; use `with_server` for a remote one.
//!     let dns = DnsServerModule::new();
//!
//!     if !dns.is_module_installed().await? {
//!         eprintln!("DnsServer module is not installed");
//!         return Ok(());
//!     }
//!
//!     dns.add_a_record("example.com", "www", "10.0.0.1", Some("1h")).await?;
//!
//!     let records = dns
//!         .get_records("example.com", Some("www"), Some(RecordType::A))
//!         .await?;
//!     for record in &records {
//!         println!("{} {} -> {}", record.record_type, record.name, record.value);
//!     }
//!
//!     dns.remove_a_record("example.com", "www").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, DnsServerError>`](DnsServerError):
//!
//! - [`DnsServerError::CommandFailed`] — a query's backing invocation failed
//!   (distinguishable from "zero records")
//! - [`DnsServerError::ParseError`] — query output was not valid JSON
//! - [`DnsServerError::InvalidTtl`] — a TTL string was rejected before any
//!   process was spawned
//!
//! Write operations (`add_*`, `remove_*`) report process-level failure as
//! `Ok(false)`; the offending command line is logged at error level.
//!
//! No automatic retry is performed: retry policy, if any, belongs to the
//! caller.

mod command;
mod error;
mod runner;
mod service;
mod traits;
mod transform;
mod types;
mod utils;

// Re-export error types
pub use error::{DnsServerError, Result};

// Re-export the facade
pub use service::DnsServerModule;

// Re-export command construction and execution types
pub use command::PowerShellCommand;
pub use runner::{DEFAULT_POWERSHELL_PATH, PowerShellRunner};
pub use traits::{CommandOutput, CommandRunner};

// Re-export the record model
pub use types::{Record, RecordType};

// Re-export the TTL helper
pub use utils::ttl::format_ttl;
