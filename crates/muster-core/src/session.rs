//! One operator session: the state behind every tab of the application.
//!
//! A [`Session`] is built from a [`MusterConfig`] and owns exactly one
//! tally, one roll call, one procedure deck, one checklist catalog and one
//! incident desk. It has no I/O of its own; front-ends call its methods and
//! render what they return.

use std::collections::BTreeSet;

use tracing::{debug, info};

use muster_tally::view::build_tree;
use muster_tally::{Tally, TallyError, TallyNode};
use muster_types::{
    ChatMessage, ChatRole, EvacuationView, LeafKey, NodePath, Tab, TaxonomyError,
};

use crate::catalog::{ChecklistCatalog, ProcedureDeck};
use crate::config::MusterConfig;
use crate::incident::{IncidentDesk, IncidentError};
use crate::roll_call::RollCall;

/// Errors raised while driving a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The configured taxonomy is invalid.
    #[error("invalid taxonomy: {source}")]
    Taxonomy {
        /// The underlying validation error.
        #[from]
        source: TaxonomyError,
    },

    /// A tally operation failed.
    #[error("tally error: {source}")]
    Tally {
        /// The underlying tally error.
        #[from]
        source: TallyError,
    },

    /// An incident desk operation failed.
    #[error("incident error: {source}")]
    Incident {
        /// The underlying incident error.
        #[from]
        source: IncidentError,
    },

    /// A leaf write was addressed to an inner node.
    #[error("{labels:?} is not a leaf; a write needs all three labels")]
    NotALeaf {
        /// The labels that were given.
        labels: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Tree expansion
// ---------------------------------------------------------------------------

/// Which nodes of the tally tree are expanded.
///
/// Pure presentation state: it decides how much of the tree is built and
/// never touches a count. The root is always open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeExpansion {
    open: BTreeSet<NodePath>,
}

impl TreeExpansion {
    /// Whether `path` is expanded.
    pub fn is_open(&self, path: NodePath) -> bool {
        path == NodePath::Root || self.open.contains(&path)
    }

    /// Flip `path` and return whether it is now open. The root stays open.
    pub fn toggle(&mut self, path: NodePath) -> bool {
        if path == NodePath::Root {
            return true;
        }
        if self.open.remove(&path) {
            false
        } else {
            self.open.insert(path);
            true
        }
    }

    /// Expand `path`.
    pub fn open(&mut self, path: NodePath) {
        if path != NodePath::Root {
            self.open.insert(path);
        }
    }

    /// Collapse `path`.
    pub fn close(&mut self, path: NodePath) {
        self.open.remove(&path);
    }

    /// Collapse everything below the root.
    pub fn collapse_all(&mut self) {
        self.open.clear();
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// State of one running application session.
#[derive(Debug, Clone)]
pub struct Session {
    tab: Tab,
    evacuation_view: EvacuationView,
    tally: Tally,
    expansion: TreeExpansion,
    roll_call: RollCall,
    deck: ProcedureDeck,
    checklists: ChecklistCatalog,
    incident: IncidentDesk,
    transcript: Vec<ChatMessage>,
}

impl Session {
    /// Build a session from configuration with every count at zero.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Taxonomy`] if the configured taxonomy is
    /// invalid.
    pub fn from_config(config: &MusterConfig) -> Result<Self, SessionError> {
        let taxonomy = config.taxonomy.build()?;
        let session = Self {
            tab: Tab::Evacuation,
            evacuation_view: EvacuationView::default(),
            tally: Tally::new(taxonomy),
            expansion: TreeExpansion::default(),
            roll_call: RollCall::new(config.roster.clone()),
            deck: ProcedureDeck::new(config.procedures.clone()),
            checklists: ChecklistCatalog::new(config.checklists.clone()),
            incident: IncidentDesk::new(&config.incident),
            transcript: Vec::new(),
        };
        info!(
            leaves = session.tally.counts().len(),
            roster = session.roll_call.len(),
            procedures = session.deck.cards().len(),
            checklists = session.checklists.all().len(),
            "session started"
        );
        Ok(session)
    }

    // -- navigation ---------------------------------------------------------

    /// The active tab.
    pub const fn tab(&self) -> Tab {
        self.tab
    }

    /// Switch tabs.
    pub fn select_tab(&mut self, tab: Tab) {
        debug!(from = %self.tab, to = %tab, "tab selected");
        self.tab = tab;
    }

    /// The active evacuation sub-view.
    pub const fn evacuation_view(&self) -> EvacuationView {
        self.evacuation_view
    }

    /// Switch the evacuation sub-view.
    pub const fn select_evacuation_view(&mut self, view: EvacuationView) {
        self.evacuation_view = view;
    }

    // -- tally ----------------------------------------------------------------

    /// The headcount tally.
    pub const fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Resolve labels against the session taxonomy.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Tally`] if a label is unknown or there are
    /// too many.
    pub fn resolve(&self, labels: &[&str]) -> Result<NodePath, SessionError> {
        Ok(self.tally.resolve(labels)?)
    }

    /// Increment the node named by `labels`.
    ///
    /// # Errors
    ///
    /// See [`Tally::increment`].
    pub fn increment(&mut self, labels: &[&str]) -> Result<LeafKey, SessionError> {
        Ok(self.tally.increment_labels(labels)?)
    }

    /// Decrement the node named by `labels`.
    ///
    /// # Errors
    ///
    /// See [`Tally::decrement`].
    pub fn decrement(&mut self, labels: &[&str]) -> Result<Option<LeafKey>, SessionError> {
        Ok(self.tally.decrement_labels(labels)?)
    }

    /// Overwrite the leaf named by three labels. Returns the previous count.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotALeaf`] unless the labels name a leaf,
    /// and otherwise see [`Tally::set_leaf`].
    pub fn set_leaf(&mut self, labels: &[&str], value: i64) -> Result<u32, SessionError> {
        match self.resolve(labels)? {
            NodePath::Leaf(key) => Ok(self.tally.set_leaf(key, value)?),
            _ => Err(SessionError::NotALeaf {
                labels: labels.iter().map(|l| (*l).to_owned()).collect(),
            }),
        }
    }

    /// Subtree sum of the node named by `labels`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Tally`] if the labels do not resolve.
    pub fn sum(&self, labels: &[&str]) -> Result<u64, SessionError> {
        Ok(self.tally.sum(self.resolve(labels)?))
    }

    /// Tree expansion state.
    pub const fn expansion(&self) -> &TreeExpansion {
        &self.expansion
    }

    /// Mutable tree expansion state.
    pub const fn expansion_mut(&mut self) -> &mut TreeExpansion {
        &mut self.expansion
    }

    /// Flip the node named by `labels` open or closed.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Tally`] if the labels do not resolve.
    pub fn toggle_node(&mut self, labels: &[&str]) -> Result<bool, SessionError> {
        let path = self.resolve(labels)?;
        Ok(self.expansion.toggle(path))
    }

    /// The aggregate tree with the current expansion applied.
    pub fn tally_tree(&self) -> TallyNode {
        let expansion = &self.expansion;
        build_tree(&self.tally, NodePath::Root, &|path| expansion.is_open(path))
    }

    // -- evacuation / emergency ---------------------------------------------

    /// The named roll call.
    pub const fn roll_call(&self) -> &RollCall {
        &self.roll_call
    }

    /// Mutable roll call.
    pub const fn roll_call_mut(&mut self) -> &mut RollCall {
        &mut self.roll_call
    }

    /// The procedure deck.
    pub const fn deck(&self) -> &ProcedureDeck {
        &self.deck
    }

    /// Mutable procedure deck.
    pub const fn deck_mut(&mut self) -> &mut ProcedureDeck {
        &mut self.deck
    }

    /// The emergency checklist catalog.
    pub const fn checklists(&self) -> &ChecklistCatalog {
        &self.checklists
    }

    // -- incident -----------------------------------------------------------

    /// The incident desk.
    pub const fn incident(&self) -> &IncidentDesk {
        &self.incident
    }

    /// Mutable incident desk.
    pub const fn incident_mut(&mut self) -> &mut IncidentDesk {
        &mut self.incident
    }

    // -- assistant ----------------------------------------------------------

    /// Chat transcript, oldest first.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Append a line typed by the user. Blank lines are ignored.
    pub fn record_user_message(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.transcript.push(ChatMessage {
            role: ChatRole::User,
            text: text.to_owned(),
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use muster_types::CategoryIx;

    use super::*;

    fn session() -> Session {
        Session::from_config(&MusterConfig::default()).unwrap()
    }

    #[test]
    fn new_session_starts_on_evacuation_procedures() {
        let s = session();
        assert_eq!(s.tab(), Tab::Evacuation);
        assert_eq!(s.evacuation_view(), EvacuationView::Procedures);
        assert_eq!(s.tally().grand_total(), 0);
    }

    #[test]
    fn invalid_taxonomy_fails_session_start() {
        let mut config = MusterConfig::default();
        config.taxonomy.categories.clear();
        assert!(matches!(
            Session::from_config(&config),
            Err(SessionError::Taxonomy { .. })
        ));
    }

    #[test]
    fn set_leaf_requires_three_labels() {
        let mut s = session();
        let result = s.set_leaf(&["Men", "Dead"], 3);
        assert!(matches!(result, Err(SessionError::NotALeaf { .. })));
        assert_eq!(s.tally().grand_total(), 0);

        assert_eq!(s.set_leaf(&["Men", "Dead", "Evacuated"], 3), Ok(0));
        assert_eq!(s.sum(&["Men"]), Ok(3));
    }

    #[test]
    fn expansion_root_always_open() {
        let mut expansion = TreeExpansion::default();
        assert!(expansion.is_open(NodePath::Root));
        assert!(expansion.toggle(NodePath::Root));
        assert!(expansion.is_open(NodePath::Root));

        let men = NodePath::Category(CategoryIx(0));
        assert!(expansion.toggle(men));
        assert!(expansion.is_open(men));
        assert!(!expansion.toggle(men));
        expansion.open(men);
        expansion.collapse_all();
        assert!(!expansion.is_open(men));
    }

    #[test]
    fn tree_follows_expansion() {
        let mut s = session();
        let collapsed = s.tally_tree();
        assert_eq!(collapsed.node_count(), 5);

        assert_eq!(s.toggle_node(&["Women"]), Ok(true));
        let expanded = s.tally_tree();
        assert_eq!(expanded.node_count(), 9);
    }

    #[test]
    fn blank_chat_lines_are_dropped() {
        let mut s = session();
        s.record_user_message("  ");
        s.record_user_message("Where is the assembly point?");
        s.record_user_message(" Is stairwell B clear? ");
        assert_eq!(s.transcript().len(), 2);
        assert_eq!(
            s.transcript().last().map(|m| m.text.as_str()),
            Some("Is stairwell B clear?")
        );
        assert_eq!(s.transcript().first().map(|m| m.role), Some(ChatRole::User));
    }
}
