//! Console command grammar.
//!
//! One command per line: a keyword followed by its argument text. Tally
//! paths are label lists separated by `|`, because some labels contain a
//! `/` (for example `Men|Dead|Unaccounted / Missing`).

use muster_types::{EvacuationView, RecordingMode, Tab};

/// Separator between labels of a tally path.
pub const PATH_SEPARATOR: char = '|';

/// Errors raised while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The keyword is not a known command.
    #[error("unknown command `{name}`, type `help` for the list")]
    UnknownCommand {
        /// The unrecognized keyword.
        name: String,
    },

    /// A required argument is missing.
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        /// The command keyword.
        command: &'static str,
        /// What was expected.
        argument: &'static str,
    },

    /// An argument could not be interpreted.
    #[error("`{command}` cannot use `{value}`")]
    InvalidArgument {
        /// The command keyword.
        command: &'static str,
        /// The offending text.
        value: String,
    },
}

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Switch tabs.
    Tab(Tab),
    /// Switch the evacuation sub-view.
    View(EvacuationView),
    /// Next procedure card.
    Next,
    /// Previous procedure card.
    Prev,
    /// Show the checklists of an emergency type, or every checklist.
    Checklist(Option<String>),
    /// Flip a person's presence.
    Toggle(String),
    /// Mark everyone present or absent.
    MarkAll(bool),
    /// Increment a tally path.
    Inc(Vec<String>),
    /// Decrement a tally path.
    Dec(Vec<String>),
    /// Overwrite one leaf.
    Set(Vec<String>, i64),
    /// Subtree sum of a path (root when empty).
    Sum(Vec<String>),
    /// Expand a tree node.
    Open(Vec<String>),
    /// Collapse a tree node.
    Close(Vec<String>),
    /// Print the tally tree, as text or JSON.
    Tree {
        /// Emit JSON instead of an indented outline.
        json: bool,
    },
    /// Run the tally integrity check.
    Check,
    /// Toggle the loud alarm.
    Alarm,
    /// Toggle the visual alert.
    Visual,
    /// Start recording.
    Record(RecordingMode),
    /// Advance the recording timer by one second.
    Tick,
    /// Stop recording.
    Stop,
    /// Set the incident description.
    Describe(String),
    /// Set the notify-team flag.
    Notify(bool),
    /// Submit the incident report.
    Submit,
    /// Add a line to the assistant transcript.
    Say(String),
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

/// Split `|`-separated labels. Empty text is the root path.
///
/// # Errors
///
/// Returns [`ParseError::InvalidArgument`] if any label between
/// separators is blank, as in `Men||Dead`.
pub fn parse_path(command: &'static str, text: &str) -> Result<Vec<String>, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let labels: Vec<String> = text
        .split(PATH_SEPARATOR)
        .map(|label| label.trim().to_owned())
        .collect();
    if labels.iter().any(String::is_empty) {
        return Err(ParseError::InvalidArgument {
            command,
            value: text.to_owned(),
        });
    }
    Ok(labels)
}

fn parse_switch(command: &'static str, text: &str) -> Result<bool, ParseError> {
    match text.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        "" => Err(ParseError::MissingArgument {
            command,
            argument: "on or off",
        }),
        _ => Err(ParseError::InvalidArgument {
            command,
            value: text.to_owned(),
        }),
    }
}

fn require<'a>(
    command: &'static str,
    argument: &'static str,
    text: &'a str,
) -> Result<&'a str, ParseError> {
    if text.is_empty() {
        Err(ParseError::MissingArgument { command, argument })
    } else {
        Ok(text)
    }
}

/// Parse one input line. Blank lines and `#` comments yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`ParseError`] for an unknown keyword or a bad argument.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (keyword, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(k, r)| (k, r.trim()));
    let keyword = keyword.to_ascii_lowercase();

    if let Some(command) = parse_navigation(&keyword, rest)? {
        return Ok(Some(command));
    }
    if let Some(command) = parse_tally(&keyword, rest)? {
        return Ok(Some(command));
    }
    if let Some(command) = parse_incident(&keyword, rest)? {
        return Ok(Some(command));
    }
    Err(ParseError::UnknownCommand { name: keyword })
}

/// Tabs, catalogs, roll call, transcript and session control.
fn parse_navigation(keyword: &str, rest: &str) -> Result<Option<Command>, ParseError> {
    let command = match keyword {
        "tab" => {
            let name = require("tab", "a tab name", rest)?;
            Command::Tab(Tab::from_name(name).ok_or_else(|| ParseError::InvalidArgument {
                command: "tab",
                value: name.to_owned(),
            })?)
        }
        "view" => {
            let name = require("view", "procedures, headcount or tally", rest)?;
            Command::View(EvacuationView::from_name(name).ok_or_else(|| {
                ParseError::InvalidArgument {
                    command: "view",
                    value: name.to_owned(),
                }
            })?)
        }
        "next" => Command::Next,
        "prev" => Command::Prev,
        "checklist" => Command::Checklist((!rest.is_empty()).then(|| rest.to_owned())),
        "toggle" => Command::Toggle(require("toggle", "a person id", rest)?.to_owned()),
        "all" => Command::MarkAll(parse_switch("all", rest)?),
        "say" => Command::Say(require("say", "a message", rest)?.to_owned()),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Ok(None),
    };
    Ok(Some(command))
}

/// Headcount tally and tree view.
fn parse_tally(keyword: &str, rest: &str) -> Result<Option<Command>, ParseError> {
    let command = match keyword {
        "inc" => Command::Inc(parse_path("inc", require("inc", "a path", rest)?)?),
        "dec" => Command::Dec(parse_path("dec", rest)?),
        "set" => {
            let text = require("set", "a leaf path and a value", rest)?;
            let (path, value) = text.rsplit_once(char::is_whitespace).ok_or(
                ParseError::MissingArgument {
                    command: "set",
                    argument: "a leaf path and a value",
                },
            )?;
            let value = value
                .parse::<i64>()
                .map_err(|e| ParseError::InvalidArgument {
                    command: "set",
                    value: format!("{value} ({e})"),
                })?;
            Command::Set(parse_path("set", path)?, value)
        }
        "sum" => Command::Sum(parse_path("sum", rest)?),
        "open" => Command::Open(parse_path("open", require("open", "a path", rest)?)?),
        "close" => Command::Close(parse_path("close", require("close", "a path", rest)?)?),
        "tree" => match rest {
            "" => Command::Tree { json: false },
            "json" => Command::Tree { json: true },
            other => {
                return Err(ParseError::InvalidArgument {
                    command: "tree",
                    value: other.to_owned(),
                });
            }
        },
        "check" => Command::Check,
        _ => return Ok(None),
    };
    Ok(Some(command))
}

/// Alerts, recorder and incident report.
fn parse_incident(keyword: &str, rest: &str) -> Result<Option<Command>, ParseError> {
    let command = match keyword {
        "alarm" => Command::Alarm,
        "visual" => Command::Visual,
        "record" => match require("record", "audio or video", rest)?
            .to_ascii_lowercase()
            .as_str()
        {
            "audio" => Command::Record(RecordingMode::Audio),
            "video" => Command::Record(RecordingMode::Video),
            _ => {
                return Err(ParseError::InvalidArgument {
                    command: "record",
                    value: rest.to_owned(),
                });
            }
        },
        "tick" => Command::Tick,
        "stop" => Command::Stop,
        "describe" => Command::Describe(rest.to_owned()),
        "notify" => Command::Notify(parse_switch("notify", rest)?),
        "submit" => Command::Submit,
        _ => return Ok(None),
    };
    Ok(Some(command))
}

/// Command reference printed by `help`.
pub const HELP: &str = "\
navigation
  tab <evacuation|emergency|incident|assistant>
  view <procedures|headcount|tally>
  next | prev                     procedure cards
  checklist [emergency type]      do/don't lists, all or of one type
roll call
  toggle <person id>              flip presence
  all <on|off>                    mark everyone present or absent
tally (labels separated by |)
  inc <category[|health[|evacuation]]>
  dec [category[|health[|evacuation]]]
  set <category|health|evacuation> <value>
  sum [path]                      subtree sum, grand total without a path
  open <path> | close <path>      expand or collapse a tree node
  tree [json]                     print the tally tree
  check                           verify tally integrity
incident
  alarm | visual                  toggle alerts
  record <audio|video> | tick | stop
  describe <text> | notify <on|off> | submit
assistant
  say <text>
  help | quit";
