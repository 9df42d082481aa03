//! PowerShell command construction.
//!
//! A [`PowerShellCommand`] is a declarative description of one cmdlet
//! invocation: the cmdlet name, switch flags, named arguments, and whether
//! the output should be piped through `ConvertTo-Json`. Building is a pure
//! formatting step; no validation or quoting happens here. Values that
//! PowerShell must see as literal strings are pre-quoted by the caller.

/// Token appended after the pipe when structured output is requested.
pub(crate) const CONVERT_TO_JSON: &str = "ConvertTo-Json";

/// A single cmdlet invocation, built freshly per operation and never mutated
/// after construction.
///
/// Named arguments are kept as an *ordered* list of pairs rather than a map:
/// argument order affects the rendered command line, and insertion order is
/// part of the contract.
///
/// # Examples
///
/// ```rust
/// use windns::PowerShellCommand;
///
/// let command = PowerShellCommand::new("Get-DnsServerResourceRecord")
///     .arg("ZoneName", "example.com")
///     .arg("Name", "www")
///     .json_output();
/// assert_eq!(
///     command.build(),
///     vec![
///         "Get-DnsServerResourceRecord",
///         "-ZoneName example.com",
///         "-Name www",
///         "|",
///         "ConvertTo-Json",
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PowerShellCommand {
    cmdlet: String,
    flags: Vec<String>,
    args: Vec<(String, String)>,
    json_output: bool,
}

impl PowerShellCommand {
    /// Start building a command for the given cmdlet.
    #[must_use]
    pub fn new(cmdlet: impl Into<String>) -> Self {
        Self {
            cmdlet: cmdlet.into(),
            flags: Vec::new(),
            args: Vec::new(),
            json_output: false,
        }
    }

    /// Append a switch flag (rendered as `-<flag>`).
    #[must_use]
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// Append a named argument (rendered as a single `-<name> <value>` token).
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push((name.into(), value.into()));
        self
    }

    /// Request machine-readable output by piping through `ConvertTo-Json`.
    #[must_use]
    pub fn json_output(mut self) -> Self {
        self.json_output = true;
        self
    }

    /// The cmdlet this command invokes.
    #[must_use]
    pub fn cmdlet(&self) -> &str {
        &self.cmdlet
    }

    /// Render the ordered token sequence for process execution.
    ///
    /// Order: cmdlet, then flags in insertion order, then argument pairs in
    /// insertion order, then `|` + `ConvertTo-Json` iff requested.
    #[must_use]
    pub fn build(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.flags.len() + self.args.len() + 3);
        tokens.push(self.cmdlet.clone());

        for flag in &self.flags {
            tokens.push(format!("-{flag}"));
        }

        for (name, value) in &self.args {
            tokens.push(format!("-{name} {value}"));
        }

        if self.json_output {
            tokens.push("|".to_string());
            tokens.push(CONVERT_TO_JSON.to_string());
        }

        tokens
    }

    /// Space-joined form, for logging only.
    #[must_use]
    pub fn render(&self) -> String {
        self.build().join(" ")
    }
}
