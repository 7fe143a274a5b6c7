//! Observable change records.
//!
//! When recording is enabled on a [`Document`](crate::Document), every
//! effective change to a node is appended to a log in the order it happened.
//! Operations that change nothing (adding a class that is already present,
//! removing an absent attribute) leave no record.

use crate::node::NodeId;

/// One observable change to the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRecord {
    /// A class was added to a node.
    ClassAdded { node: NodeId, class: String },
    /// A class was removed from a node.
    ClassRemoved { node: NodeId, class: String },
    /// An attribute was created or changed.
    AttributeSet {
        node: NodeId,
        name: String,
        value: String,
    },
    /// An attribute was removed.
    AttributeRemoved { node: NodeId, name: String },
    /// The native value was written (including writes of an unchanged value).
    ValueSet { node: NodeId, value: String },
    /// The native disabled flag changed.
    DisabledSet { node: NodeId, disabled: bool },
    /// A child was inserted into a parent.
    ChildInserted { parent: NodeId, child: NodeId },
    /// A child was removed from a parent.
    ChildRemoved { parent: NodeId, child: NodeId },
}

impl MutationRecord {
    /// The node the record is about (the parent for structural records).
    pub fn node(&self) -> NodeId {
        match self {
            Self::ClassAdded { node, .. }
            | Self::ClassRemoved { node, .. }
            | Self::AttributeSet { node, .. }
            | Self::AttributeRemoved { node, .. }
            | Self::ValueSet { node, .. }
            | Self::DisabledSet { node, .. } => *node,
            Self::ChildInserted { parent, .. } | Self::ChildRemoved { parent, .. } => *parent,
        }
    }
}

/// Append-only mutation log.
#[derive(Debug, Default)]
pub(crate) struct MutationLog {
    recording: bool,
    records: Vec<MutationRecord>,
}

impl MutationLog {
    pub(crate) fn set_recording(&mut self, recording: bool) {
        self.recording = recording;
    }

    pub(crate) fn is_recording(&self) -> bool {
        self.recording
    }

    pub(crate) fn push(&mut self, record: MutationRecord) {
        if self.recording {
            self.records.push(record);
        }
    }

    pub(crate) fn take(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }
}
