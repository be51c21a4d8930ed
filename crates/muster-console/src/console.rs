//! Executes parsed commands against a session and renders the result as
//! text for stdout.

use std::fmt::Write as _;

use tracing::warn;

use muster_core::incident::format_elapsed;
use muster_core::session::{Session, SessionError};
use muster_tally::conservation::verify_tally;
use muster_tally::{TallyCheck, TallyNode};
use muster_types::{EmergencyChecklist, LeafKey, ProcedureCard};

use crate::command::{Command, HELP};
use crate::error::ConsoleError;

/// What the read loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text and read the next line.
    Continue(String),
    /// Print the text and stop.
    Quit(String),
}

/// A session plus the text rendering around it.
#[derive(Debug)]
pub struct Console {
    session: Session,
}

impl Console {
    /// Wrap a fresh session.
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// The underlying session.
    #[cfg(test)]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Run one command.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError`] when the session rejects the operation.
    /// Nothing is changed in that case.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, ConsoleError> {
        let text = match command {
            Command::Help => HELP.to_owned(),
            Command::Quit => {
                return Ok(Outcome::Quit(format!(
                    "session closed, total {}, roll call {}",
                    self.session.tally().grand_total(),
                    self.session.roll_call().summary()
                )));
            }
            Command::Inc(_)
            | Command::Dec(_)
            | Command::Set(..)
            | Command::Sum(_)
            | Command::Open(_)
            | Command::Close(_)
            | Command::Tree { .. }
            | Command::Check => self.execute_tally(command)?,
            Command::Alarm
            | Command::Visual
            | Command::Record(_)
            | Command::Tick
            | Command::Stop
            | Command::Describe(_)
            | Command::Notify(_)
            | Command::Submit => self.execute_incident(command)?,
            Command::Tab(_)
            | Command::View(_)
            | Command::Next
            | Command::Prev
            | Command::Checklist(_)
            | Command::Toggle(_)
            | Command::MarkAll(_)
            | Command::Say(_) => self.execute_navigation(command),
        };
        Ok(Outcome::Continue(text))
    }

    /// Tabs, procedure cards, checklists, roll call and chat.
    fn execute_navigation(&mut self, command: Command) -> String {
        match command {
            Command::Tab(tab) => {
                self.session.select_tab(tab);
                format!("tab: {tab}")
            }
            Command::View(view) => {
                self.session.select_evacuation_view(view);
                format!("view: {view:?}").to_lowercase()
            }
            Command::Next => {
                let card = self.session.deck_mut().next_card().cloned();
                self.render_card(card.as_ref())
            }
            Command::Prev => {
                let card = self.session.deck_mut().previous_card().cloned();
                self.render_card(card.as_ref())
            }
            Command::Checklist(category) => self.render_checklists(category.as_deref()),
            Command::Toggle(id) => self.session.roll_call_mut().toggle(&id).map_or_else(
                || format!("no one with id `{id}`"),
                |present| {
                    format!(
                        "{id}: {} ({})",
                        if present { "present" } else { "absent" },
                        self.session.roll_call().summary()
                    )
                },
            ),
            Command::MarkAll(present) => {
                self.session.roll_call_mut().mark_all(present);
                format!("roll call: {}", self.session.roll_call().summary())
            }
            Command::Say(text) => {
                self.session.record_user_message(&text);
                format!("{} message(s) in transcript", self.session.transcript().len())
            }
            _ => HELP.to_owned(),
        }
    }

    fn execute_tally(&mut self, command: Command) -> Result<String, ConsoleError> {
        let text = match command {
            Command::Inc(labels) => {
                let key = self.session.increment(&as_strs(&labels))?;
                format!("+1 -> {}", self.leaf_label(key))
            }
            Command::Dec(labels) => self.session.decrement(&as_strs(&labels))?.map_or_else(
                || "nothing to remove".to_owned(),
                |key| format!("-1 <- {}", self.leaf_label(key)),
            ),
            Command::Set(labels, value) => {
                let previous = self.session.set_leaf(&as_strs(&labels), value)?;
                format!("{}: {previous} -> {value}", labels.join(" | "))
            }
            Command::Sum(labels) => {
                let total = self.session.sum(&as_strs(&labels))?;
                if labels.is_empty() {
                    format!("total: {total}")
                } else {
                    format!("{}: {total}", labels.join(" | "))
                }
            }
            Command::Open(labels) => {
                let path = self.session.resolve(&as_strs(&labels))?;
                self.session.expansion_mut().open(path);
                render_tree(&self.session.tally_tree())
            }
            Command::Close(labels) => {
                let path = self.session.resolve(&as_strs(&labels))?;
                self.session.expansion_mut().close(path);
                render_tree(&self.session.tally_tree())
            }
            Command::Tree { json: true } => {
                serde_json::to_string_pretty(&self.session.tally_tree())?
            }
            Command::Check => match verify_tally(self.session.tally()) {
                TallyCheck::Consistent => format!(
                    "consistent, total {}",
                    self.session.tally().grand_total()
                ),
                TallyCheck::Anomaly(anomaly) => {
                    warn!(%anomaly, "tally check failed");
                    anomaly.to_string()
                }
            },
            _ => render_tree(&self.session.tally_tree()),
        };
        Ok(text)
    }

    fn execute_incident(&mut self, command: Command) -> Result<String, ConsoleError> {
        let desk = self.session.incident_mut();
        let text = match command {
            Command::Alarm => format!("loud alarm {}", on_off(desk.alerts.toggle_alarm())),
            Command::Visual => {
                format!("visual alert {}", on_off(desk.alerts.toggle_visual_alert()))
            }
            Command::Record(mode) => {
                desk.recorder.start(mode);
                format!("recording {mode} 0:00")
            }
            Command::Tick => {
                if desk.recorder.is_recording() {
                    let elapsed = desk.recorder.tick();
                    format!("recording {} {}", desk.recorder.mode(), format_elapsed(elapsed))
                } else {
                    "not recording".to_owned()
                }
            }
            Command::Stop => desk.recorder.stop().map_or_else(
                || "not recording".to_owned(),
                |seconds| format!("saved {} of recording", format_elapsed(seconds)),
            ),
            Command::Describe(text) => {
                desk.draft.description = text;
                format!(
                    "description set ({} characters, {})",
                    desk.draft.description_len(),
                    if desk.draft.can_submit() { "ready" } else { "too short" }
                )
            }
            Command::Notify(on) => {
                desk.draft.notify_team = on;
                format!("notify response team {}", on_off(on))
            }
            _ => {
                let report = desk.submit().map_err(SessionError::from)?;
                serde_json::to_string_pretty(&report)?
            }
        };
        Ok(text)
    }

    /// Every checklist of `category`, or the whole catalog headed by its
    /// scenario list.
    fn render_checklists(&self, category: Option<&str>) -> String {
        let catalog = self.session.checklists();
        let Some(category) = category else {
            let mut out = format!("scenarios: {}", catalog.categories().join(", "));
            for checklist in catalog.all() {
                out.push('\n');
                out.push_str(&render_checklist(checklist));
            }
            return out;
        };
        let found = catalog.by_category(category);
        if found.is_empty() {
            return format!("no checklist for `{category}`");
        }
        found
            .into_iter()
            .map(render_checklist)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn leaf_label(&self, key: LeafKey) -> String {
        self.session
            .tally()
            .taxonomy()
            .label_path(key.into())
            .join(" | ")
    }

    fn render_card(&self, card: Option<&ProcedureCard>) -> String {
        let Some(card) = card else {
            return "no procedure cards".to_owned();
        };
        let (index, len) = self.session.deck().position();
        let mut out = format!(
            "[{}/{len}] {} ({})",
            index.saturating_add(1),
            card.title,
            card.kind
        );
        for (n, step) in card.steps.iter().enumerate() {
            let _ = write!(out, "\n  {}. {step}", n.saturating_add(1));
        }
        out
    }
}

fn as_strs(labels: &[String]) -> Vec<&str> {
    labels.iter().map(String::as_str).collect()
}

const fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

fn render_checklist(checklist: &EmergencyChecklist) -> String {
    let mut out = checklist.title.clone();
    out.push_str("\n  do:");
    for item in &checklist.dos {
        let _ = write!(out, "\n    + {item}");
    }
    out.push_str("\n  don't:");
    for item in &checklist.donts {
        let _ = write!(out, "\n    - {item}");
    }
    out
}

/// Indented outline of the tally tree. Expandable nodes are marked `+`
/// when collapsed and `-` when open.
pub fn render_tree(root: &TallyNode) -> String {
    let mut out = String::new();
    render_node(root, 0, &mut out);
    out
}

fn render_node(node: &TallyNode, depth: usize, out: &mut String) {
    let marker = match (node.expandable, node.children.is_empty()) {
        (false, _) => ' ',
        (true, true) => '+',
        (true, false) => '-',
    };
    if !out.is_empty() {
        out.push('\n');
    }
    let _ = write!(
        out,
        "{:indent$}{marker} {} {}",
        "",
        node.label,
        node.count,
        indent = depth.saturating_mul(2)
    );
    for child in &node.children {
        render_node(child, depth.saturating_add(1), out);
    }
}
