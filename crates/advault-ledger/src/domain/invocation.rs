//! Typed invocation descriptor.
//!
//! The external tool takes its arguments positionally; building them as ad
//! hoc string arrays scattered across handlers is how arguments go missing or
//! end up on the wrong side of the `--` separator. `InvokeSpec` is the one
//! place the argv shape is known: everything before `--` configures the
//! invocation, everything after it is the contract function and its named
//! arguments. Arguments are always passed as an exec argv, never through a
//! shell.

/// Descriptor for one `contract invoke` call. Constructed fresh per call,
/// never persisted.
#[derive(Debug, Clone)]
pub struct InvokeSpec {
    source: String,
    contract_id: String,
    function: String,
    args: Vec<(String, String)>,
    submit: bool,
}

impl InvokeSpec {
    /// Start a descriptor for `function` on `contract_id`, signed by the
    /// `source` alias or address.
    pub fn new(
        source: impl Into<String>,
        contract_id: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            contract_id: contract_id.into(),
            function: function.into(),
            args: Vec::new(),
            submit: false,
        }
    }

    /// Append a named function argument (`--name value`). Order is preserved.
    pub fn arg(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.args.push((name.into(), value.to_string()));
        self
    }

    /// Mark the invocation for signing and network submission.
    pub fn submit(mut self) -> Self {
        self.submit = true;
        self
    }

    /// The contract function being invoked. Used as the diagnostic context.
    pub fn function(&self) -> &str {
        &self.function
    }

    /// Render the full argv for the external tool.
    pub fn to_argv(&self, network: &str) -> Vec<String> {
        let mut argv = vec![
            "contract".to_string(),
            "invoke".to_string(),
            "--network".to_string(),
            network.to_string(),
            "--source".to_string(),
            self.source.clone(),
            "--id".to_string(),
            self.contract_id.clone(),
        ];
        if self.submit {
            argv.push("--send".to_string());
            argv.push("yes".to_string());
        }
        argv.push("--".to_string());
        argv.push(self.function.clone());
        for (name, value) in &self.args {
            argv.push(format!("--{name}"));
            argv.push(value.clone());
        }
        argv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_argv_shape() {
        let argv = InvokeSpec::new("admin", "CADV", "get_campaign")
            .arg("campaign_id", "abc123")
            .to_argv("testnet");
        assert_eq!(
            argv,
            vec![
                "contract",
                "invoke",
                "--network",
                "testnet",
                "--source",
                "admin",
                "--id",
                "CADV",
                "--",
                "get_campaign",
                "--campaign_id",
                "abc123",
            ]
        );
    }

    #[test]
    fn test_submit_flag_precedes_separator() {
        let argv = InvokeSpec::new("advertiser", "CADV", "deposit")
            .arg("amount", 100)
            .submit()
            .to_argv("testnet");
        let send = argv.iter().position(|a| a == "--send").unwrap();
        let sep = argv.iter().position(|a| a == "--").unwrap();
        assert!(send < sep);
        assert_eq!(argv[send + 1], "yes");
    }

    #[test]
    fn test_arg_order_preserved() {
        let argv = InvokeSpec::new("admin", "CADV", "init")
            .arg("b", 2)
            .arg("a", 1)
            .to_argv("testnet");
        let b = argv.iter().position(|a| a == "--b").unwrap();
        let a = argv.iter().position(|a| a == "--a").unwrap();
        assert!(b < a);
    }
}
