//! Deciding whether a snippet may run and how to launch it.
//!
//! [`plan_execution`] is a pure mapping from platform, language and code to
//! a program invocation, so every branch can be checked without spawning
//! anything. [`run_plan`] is the only place that touches processes.

use std::ffi::OsString;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempPath;

use crate::models::Snippet;
use crate::{CodestashError, Result};

/// Languages allowed to run even when the snippet is not marked executable.
pub const SHELL_LANGUAGES: [&str; 9] = [
    "shell",
    "bash",
    "sh",
    "zsh",
    "fish",
    "powershell",
    "ps1",
    "cmd",
    "bat",
];

const POSIX_SHELL: &str = "/bin/sh";

pub fn is_shell_language(language: &str) -> bool {
    SHELL_LANGUAGES
        .iter()
        .any(|shell| shell.eq_ignore_ascii_case(language.trim()))
}

fn language_is(language: &str, names: &[&str]) -> bool {
    names.iter().any(|name| name.eq_ignore_ascii_case(language.trim()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOs {
    Windows,
    Linux,
    MacOs,
    OtherUnix,
    Other,
}

impl TargetOs {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            TargetOs::Windows
        } else if cfg!(target_os = "linux") {
            TargetOs::Linux
        } else if cfg!(target_os = "macos") {
            TargetOs::MacOs
        } else if cfg!(unix) {
            TargetOs::OtherUnix
        } else {
            TargetOs::Other
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TargetOs::Windows => "windows",
            TargetOs::Linux => "linux",
            TargetOs::MacOs => "macos",
            TargetOs::OtherUnix => "unix",
            TargetOs::Other => std::env::consts::OS,
        }
    }
}

/// Why the gate let a snippet through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The snippet is marked executable.
    Allowed,
    /// Not marked executable, but written in a shell language.
    ShellException,
    /// Not marked executable; the caller asked to run it anyway.
    Forced,
}

/// Refuse non-executable snippets unless they are shell code or `force` is set.
pub fn check_gate(snippet: &Snippet, force: bool) -> Result<GateDecision> {
    if snippet.executable {
        Ok(GateDecision::Allowed)
    } else if is_shell_language(&snippet.language) {
        Ok(GateDecision::ShellException)
    } else if force {
        Ok(GateDecision::Forced)
    } else {
        Err(CodestashError::NotExecutable(snippet.title.clone()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanArg {
    Literal(String),
    /// Replaced by the temporary script's path at launch time.
    ScriptPath,
}

impl From<&str> for PlanArg {
    fn from(value: &str) -> Self {
        PlanArg::Literal(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempScript {
    pub extension: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub program: String,
    pub args: Vec<PlanArg>,
    pub script: Option<TempScript>,
}

impl ExecutionPlan {
    fn with_script(program: &str, leading: &[&str], extension: &'static str, code: &str) -> Self {
        let mut args: Vec<PlanArg> = leading.iter().copied().map(PlanArg::from).collect();
        args.push(PlanArg::ScriptPath);
        Self {
            program: program.to_string(),
            args,
            script: Some(TempScript {
                extension,
                content: code.to_string(),
            }),
        }
    }

    fn inline(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().copied().map(PlanArg::from).collect(),
            script: None,
        }
    }
}

/// Work out how `code` written in `language` runs on `os`.
///
/// `on_path` reports whether an interpreter can be found on the search path.
pub fn plan_execution(
    os: TargetOs,
    language: &str,
    code: &str,
    on_path: impl Fn(&str) -> bool,
) -> Result<ExecutionPlan> {
    let plan = match os {
        TargetOs::Windows => {
            if language_is(language, &["powershell", "ps1"]) {
                ExecutionPlan::with_script(
                    "powershell",
                    &["-ExecutionPolicy", "Bypass", "-File"],
                    ".ps1",
                    code,
                )
            } else if language_is(language, &["cmd", "bat", "batch"])
                || code.contains(['\n', '\r', '"'])
            {
                ExecutionPlan::with_script("cmd", &["/C"], ".bat", code)
            } else {
                ExecutionPlan::inline("cmd", &["/C", code])
            }
        }
        TargetOs::Linux | TargetOs::MacOs | TargetOs::OtherUnix => {
            let shell = ["bash", "zsh", "fish"]
                .into_iter()
                .find(|&shell| language_is(language, &[shell]) && on_path(shell))
                .unwrap_or(POSIX_SHELL);
            ExecutionPlan::inline(shell, &["-c", code])
        }
        TargetOs::Other => {
            return Err(CodestashError::PlatformUnsupported(format!(
                "cannot execute snippets on {}",
                os.name()
            )))
        }
    };
    log::debug!("planned {:?} for language '{}'", plan.program, language);
    Ok(plan)
}

fn write_temp_script(script: &TempScript) -> Result<TempPath> {
    let mut file = tempfile::Builder::new()
        .prefix("codestash-")
        .suffix(script.extension)
        .tempfile()?;
    file.write_all(script.content.as_bytes())?;
    file.flush()?;
    // Close our handle so the interpreter can open the file on every platform;
    // the path is still deleted on drop.
    Ok(file.into_temp_path())
}

/// Launch the plan with inherited stdio and wait for it to finish.
pub fn run_plan(plan: &ExecutionPlan) -> Result<()> {
    let script = plan.script.as_ref().map(write_temp_script).transpose()?;

    let mut args: Vec<OsString> = Vec::with_capacity(plan.args.len());
    for arg in &plan.args {
        match (arg, &script) {
            (PlanArg::Literal(value), _) => args.push(OsString::from(value)),
            (PlanArg::ScriptPath, Some(path)) => args.push(path.as_os_str().to_os_string()),
            (PlanArg::ScriptPath, None) => {
                return Err(CodestashError::ExecutionFailed(
                    "plan refers to a script that was never written".to_string(),
                ))
            }
        }
    }

    log::info!("running {} with {} argument(s)", plan.program, args.len());
    let status = Command::new(&plan.program)
        .args(&args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();

    // `script` is dropped after this point whatever the outcome, removing the file.
    match status {
        Ok(exit_status) if exit_status.success() => Ok(()),
        Ok(exit_status) => Err(CodestashError::ExecutionFailed(format!(
            "{} exited with {}",
            plan.program, exit_status
        ))),
        Err(e) => Err(CodestashError::ExecutionFailed(format!(
            "failed to launch {}: {}",
            plan.program, e
        ))),
    }
}

/// Plan for the current platform and run. Callers pass the snippet through
/// [`check_gate`] first.
pub fn run_snippet(snippet: &Snippet) -> Result<()> {
    let plan = plan_execution(
        TargetOs::current(),
        &snippet.language,
        &snippet.code,
        |program| which::which(program).is_ok(),
    )?;
    run_plan(&plan)
}
