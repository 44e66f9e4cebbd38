//! Runs invocations against a context of either thread mode

use std::fmt;

use script_context::{
    BridgeError, CallBridge, ContextConfig, Entry, ScriptContext, ScriptSource, SharedContext,
    SingleContext, ThreadMode, ThreadModel,
};
use serde::Serialize;
use tracing::info;

use crate::cli::OutputFormat;
use crate::error::CliResult;

enum AnyContext {
    Single(SingleContext),
    Shared(SharedContext),
}

/// One result pair, copied out of the context.
///
/// `None` marks a key or value that was not a string or number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPair {
    /// Pair key
    pub key: Option<String>,
    /// Pair value
    pub value: Option<String>,
}

/// Owned copy of one invocation's results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallOutput {
    /// Function that was called
    pub function: String,
    /// Pairs in the order the script produced them
    pub pairs: Vec<OutputPair>,
}

fn owned(entry: Entry<'_>) -> Option<String> {
    if entry.is_absent() {
        None
    } else {
        Some(entry.to_string_lossy().into_owned())
    }
}

impl CallOutput {
    fn capture(function: &str, bridge: &CallBridge) -> Self {
        let pairs = bridge
            .results()
            .iter()
            .map(|(key, value)| OutputPair {
                key: owned(key),
                value: owned(value),
            })
            .collect();
        Self {
            function: function.to_string(),
            pairs,
        }
    }

    /// Renders the pairs in `format`.
    pub fn render(&self, format: OutputFormat) -> CliResult<String> {
        match format {
            OutputFormat::Text => Ok(self.to_string()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl fmt::Display for CallOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let key = pair.key.as_deref().unwrap_or("<absent>");
            let value = pair.value.as_deref().unwrap_or("<absent>");
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

/// Owns a context and remembers the outcome of the last invocation.
pub struct Runner {
    context: AnyContext,
    last_output: Option<CallOutput>,
    last_error: String,
}

impl Runner {
    /// Creates a context for `script` in the given mode.
    pub fn new(
        script: impl Into<ScriptSource>,
        mode: ThreadMode,
        config: ContextConfig,
    ) -> CliResult<Self> {
        let source = script.into();
        info!(chunk = %source.chunk_name(), %mode, "creating context");

        let context = match mode {
            ThreadMode::Single => AnyContext::Single(SingleContext::with_config(source, config)?),
            ThreadMode::Multi => AnyContext::Shared(SharedContext::with_config(source, config)?),
        };
        Ok(Self {
            context,
            last_output: None,
            last_error: String::new(),
        })
    }

    /// Thread mode of the owned context.
    pub fn thread_mode(&self) -> ThreadMode {
        match &self.context {
            AnyContext::Single(ctx) => ctx.thread_mode(),
            AnyContext::Shared(ctx) => ctx.thread_mode(),
        }
    }

    /// Calls `function` with `args` and copies out the results.
    ///
    /// On failure the bridge's error message is kept for [`Runner::last_error`].
    pub fn invoke(&mut self, function: &str, args: &[(String, String)]) -> CliResult<&CallOutput> {
        let outcome = match &self.context {
            AnyContext::Single(ctx) => call_in(ctx, function, args),
            AnyContext::Shared(ctx) => call_in(ctx, function, args),
        };

        match outcome {
            Ok(output) => Ok(self.last_output.insert(output)),
            Err((error, message)) => {
                self.last_output = None;
                self.last_error = message;
                Err(error.into())
            }
        }
    }

    /// Results of the last successful invocation.
    pub fn last_output(&self) -> Option<&CallOutput> {
        self.last_output.as_ref()
    }

    /// Message of the last failed invocation, empty if none failed.
    pub fn last_error(&self) -> &str {
        &self.last_error
    }
}

type CallFailure = (BridgeError, String);

fn call_in<M: ThreadModel>(
    ctx: &ScriptContext<M>,
    function: &str,
    args: &[(String, String)],
) -> Result<CallOutput, CallFailure> {
    let mut bridge = ctx.acquire().map_err(|e| {
        let message = e.to_string();
        (e, message)
    })?;

    let pairs = args.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    match bridge.invoke(function, pairs) {
        Ok(_) => Ok(CallOutput::capture(function, &bridge)),
        Err(e) => Err((e, bridge.last_error().to_string())),
    }
}
