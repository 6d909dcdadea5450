//! Terminal desktop app: a tiny command line over the desktop host commands.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use desktop_app_contract::{AppHost, AppKind, AppMountContext, AppModule, AppParams};
use leptos::ev::KeyboardEvent;
use leptos::*;
use thiserror::Error;

const MAX_TERMINAL_ENTRIES: usize = 200;
const PROMPT: &str = "$";
const DEFAULT_NANO_NAME: &str = "untitled.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
enum TerminalTranscriptEntry {
    Prompt { command: String },
    Output { text: String },
    Error { text: String },
}

impl TerminalTranscriptEntry {
    fn render(&self) -> String {
        match self {
            Self::Prompt { command } => format!("{PROMPT} {command}"),
            Self::Output { text } | Self::Error { text } => text.clone(),
        }
    }

    fn class(&self) -> &'static str {
        match self {
            Self::Prompt { .. } => "terminal-line prompt",
            Self::Output { .. } => "terminal-line",
            Self::Error { .. } => "terminal-line error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TerminalCommand {
    Help,
    Clear,
    Echo(String),
    Mkdir(String),
    Rm(String),
    Nano(String),
    Open(AppKind),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum CommandError {
    #[error("{0}: missing operand")]
    MissingOperand(&'static str),
    #[error("open: unknown app `{0}`")]
    UnknownApp(String),
    #[error("{0}: command not found")]
    UnknownCommand(String),
}

fn parse_command(line: &str) -> Result<Option<TerminalCommand>, CommandError> {
    let line = line.trim();
    let Some((program, rest)) = line
        .split_once(char::is_whitespace)
        .map(|(program, rest)| (program, rest.trim()))
        .or_else(|| (!line.is_empty()).then_some((line, "")))
    else {
        return Ok(None);
    };

    let operand = |name: &'static str| {
        if rest.is_empty() {
            Err(CommandError::MissingOperand(name))
        } else {
            Ok(rest.to_string())
        }
    };

    let command = match program {
        "help" => TerminalCommand::Help,
        "clear" => TerminalCommand::Clear,
        "echo" => TerminalCommand::Echo(rest.to_string()),
        "mkdir" => TerminalCommand::Mkdir(operand("mkdir")?),
        "rm" => TerminalCommand::Rm(operand("rm")?),
        "nano" => TerminalCommand::Nano(if rest.is_empty() {
            DEFAULT_NANO_NAME.to_string()
        } else {
            rest.to_string()
        }),
        "open" => {
            let token = operand("open")?.to_lowercase();
            TerminalCommand::Open(
                AppKind::from_token(&token).ok_or(CommandError::UnknownApp(token))?,
            )
        }
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

const HELP_LINES: [&str; 7] = [
    "Available commands:",
    "  help          show this list",
    "  clear         clear the screen",
    "  echo [text]   print text",
    "  mkdir [name]  create a desktop folder",
    "  rm [name]     delete a desktop file or folder",
    "  nano [name] / open [app]",
];

/// Runs `command` against the host and returns the lines to print.
fn run_command(host: &AppHost, command: TerminalCommand) -> Vec<TerminalTranscriptEntry> {
    let output = |text: String| TerminalTranscriptEntry::Output { text };
    let error = |text: String| TerminalTranscriptEntry::Error { text };

    match command {
        TerminalCommand::Help => HELP_LINES.iter().map(|line| output(line.to_string())).collect(),
        TerminalCommand::Clear => Vec::new(),
        TerminalCommand::Echo(text) => vec![output(text)],
        TerminalCommand::Mkdir(name) => {
            if host.create_folder(Some(name.clone())) {
                vec![output(format!("Created folder '{name}'."))]
            } else {
                vec![error(format!("mkdir: cannot create '{name}'"))]
            }
        }
        TerminalCommand::Rm(name) => {
            if host.delete_by_name(name.clone()) {
                vec![output(format!("'{name}' removed."))]
            } else {
                vec![error(format!("rm: cannot find '{name}' on the desktop"))]
            }
        }
        TerminalCommand::Nano(name) => {
            if host.open_document(name.clone()) {
                vec![output(format!("Opening editor for {name}"))]
            } else {
                vec![error(format!("nano: cannot open {name}"))]
            }
        }
        TerminalCommand::Open(kind) => {
            if host.open_app(kind, AppParams::Empty) {
                vec![output(format!("Opening {kind}"))]
            } else {
                vec![error(format!("open: cannot open {kind}"))]
            }
        }
    }
}

fn push_entries(
    transcript: &mut Vec<TerminalTranscriptEntry>,
    entries: impl IntoIterator<Item = TerminalTranscriptEntry>,
) {
    transcript.extend(entries);
    if transcript.len() > MAX_TERMINAL_ENTRIES {
        let overflow = transcript.len() - MAX_TERMINAL_ENTRIES;
        transcript.drain(..overflow);
    }
}

fn default_terminal_transcript() -> Vec<TerminalTranscriptEntry> {
    vec![TerminalTranscriptEntry::Output {
        text: "Type `help` for a list of commands.".to_string(),
    }]
}

/// Registry entry for the Terminal app.
pub const TERMINAL_MODULE: AppModule = AppModule::new(mount_terminal_app);

fn mount_terminal_app(context: AppMountContext) -> View {
    view! { <TerminalApp context=context /> }.into_view()
}

#[component]
/// Terminal app window contents.
pub fn TerminalApp(
    /// Mount context supplied by the desktop runtime.
    context: AppMountContext,
) -> impl IntoView {
    let host = context.host;
    let transcript = create_rw_signal(default_terminal_transcript());
    let input = create_rw_signal(String::new());
    let input_id = format!("{}-input", context.window_id);

    let submit = move || {
        let line = input.get_untracked();
        input.set(String::new());
        let mut entries = vec![TerminalTranscriptEntry::Prompt {
            command: line.clone(),
        }];
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(TerminalCommand::Clear)) => {
                transcript.set(Vec::new());
                return;
            }
            Ok(Some(command)) => entries.extend(run_command(&host, command)),
            Err(err) => entries.push(TerminalTranscriptEntry::Error {
                text: err.to_string(),
            }),
        }
        transcript.update(|transcript| push_entries(transcript, entries));
    };

    view! {
        <div class="app-shell app-terminal-shell">
            <div class="terminal-transcript" role="log" aria-live="polite">
                {move || {
                    transcript
                        .get()
                        .iter()
                        .map(|entry| view! { <pre class=entry.class()>{entry.render()}</pre> })
                        .collect_view()
                }}
            </div>
            <div class="terminal-prompt">
                <span aria-hidden="true">{PROMPT}</span>
                <input
                    id=input_id
                    class="terminal-input"
                    type="text"
                    spellcheck="false"
                    autocomplete="off"
                    aria-label="Terminal input"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            submit();
                        }
                    }
                />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use desktop_app_contract::AppCommand;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Host that records every command and accepts all of them except deleting `missing`.
    fn recording_host() -> (AppHost, Rc<RefCell<Vec<AppCommand>>>) {
        let sent = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&sent);
        let host = AppHost::new(Callback::new(move |command: AppCommand| {
            let accepted = !matches!(
                &command,
                AppCommand::DeleteByName { name } if name == "missing"
            );
            log.borrow_mut().push(command);
            accepted
        }));
        (host, sent)
    }

    fn rendered(entries: &[TerminalTranscriptEntry]) -> Vec<String> {
        entries.iter().map(TerminalTranscriptEntry::render).collect()
    }

    #[test]
    fn mkdir_and_open_report_what_the_host_did() {
        let _ = leptos::create_runtime();
        let (host, sent) = recording_host();

        let mkdir = run_command(&host, TerminalCommand::Mkdir("Projects".to_string()));
        assert_eq!(rendered(&mkdir), vec!["Created folder 'Projects'."]);
        let open = run_command(&host, TerminalCommand::Open(AppKind::Paint));
        assert_eq!(open, vec![TerminalTranscriptEntry::Output {
            text: format!("Opening {}", AppKind::Paint),
        }]);

        assert_eq!(*sent.borrow(), vec![
            AppCommand::CreateFolder {
                name: Some("Projects".to_string()),
            },
            AppCommand::OpenApp {
                kind: AppKind::Paint,
                params: AppParams::Empty,
            },
        ]);
    }

    #[test]
    fn rm_of_an_unknown_name_prints_an_error_line() {
        let _ = leptos::create_runtime();
        let (host, _) = recording_host();

        let removed = run_command(&host, TerminalCommand::Rm("notes.txt".to_string()));
        assert_eq!(rendered(&removed), vec!["'notes.txt' removed."]);

        let missing = run_command(&host, TerminalCommand::Rm("missing".to_string()));
        assert_eq!(missing, vec![TerminalTranscriptEntry::Error {
            text: "rm: cannot find 'missing' on the desktop".to_string(),
        }]);
        assert_eq!(missing[0].class(), "terminal-line error");
    }

    #[test]
    fn nano_asks_the_host_for_the_named_document() {
        let _ = leptos::create_runtime();
        let (host, sent) = recording_host();

        let lines = run_command(&host, TerminalCommand::Nano("a.txt".to_string()));
        assert_eq!(rendered(&lines), vec!["Opening editor for a.txt"]);
        assert_eq!(*sent.borrow(), vec![AppCommand::OpenDocumentByName {
            name: "a.txt".to_string(),
        }]);
    }

    #[test]
    fn blank_lines_parse_to_nothing() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn operands_keep_inner_spaces() {
        assert_eq!(
            parse_command("mkdir  My Projects "),
            Ok(Some(TerminalCommand::Mkdir("My Projects".to_string())))
        );
        assert_eq!(
            parse_command("rm old notes"),
            Ok(Some(TerminalCommand::Rm("old notes".to_string())))
        );
    }

    #[test]
    fn mkdir_and_rm_require_an_operand() {
        assert_eq!(parse_command("mkdir"), Err(CommandError::MissingOperand("mkdir")));
        assert_eq!(
            CommandError::MissingOperand("rm").to_string(),
            "rm: missing operand"
        );
    }

    #[test]
    fn nano_defaults_to_an_untitled_document() {
        assert_eq!(
            parse_command("nano"),
            Ok(Some(TerminalCommand::Nano(DEFAULT_NANO_NAME.to_string())))
        );
    }

    #[test]
    fn open_resolves_app_tokens_case_insensitively() {
        assert_eq!(
            parse_command("open Paint"),
            Ok(Some(TerminalCommand::Open(AppKind::Paint)))
        );
        assert_eq!(
            parse_command("open solitaire"),
            Err(CommandError::UnknownApp("solitaire".to_string()))
        );
    }

    #[test]
    fn unknown_programs_are_reported() {
        assert_eq!(
            parse_command("ls -la").map_err(|err| err.to_string()),
            Err("ls: command not found".to_string())
        );
    }

    #[test]
    fn transcript_keeps_only_the_newest_entries() {
        let mut transcript = Vec::new();
        push_entries(
            &mut transcript,
            (0..MAX_TERMINAL_ENTRIES + 5).map(|index| TerminalTranscriptEntry::Output {
                text: index.to_string(),
            }),
        );

        assert_eq!(transcript.len(), MAX_TERMINAL_ENTRIES);
        assert_eq!(transcript[0].render(), "5");
    }

    #[test]
    fn prompt_entries_render_with_the_prompt_marker() {
        let entry = TerminalTranscriptEntry::Prompt {
            command: "help".to_string(),
        };
        assert_eq!(entry.render(), "$ help");
        assert_eq!(entry.class(), "terminal-line prompt");
    }
}
