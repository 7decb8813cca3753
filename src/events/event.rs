use chrono::{DateTime, Utc};

use crate::teams::RoleName;

/// Events emitted by roster actions.
///
/// Events are always fired from actions. If no listeners are registered,
/// they are silently ignored. Register listeners via
/// [`register_event_listeners`](crate::register_event_listeners).
#[derive(Debug, Clone)]
pub enum RosterEvent {
    // team lifecycle
    TeamCreated {
        team_id: i32,
        creator_id: i32,
        at: DateTime<Utc>,
    },
    TeamRenamed {
        team_id: i32,
        name: String,
        at: DateTime<Utc>,
    },
    TeamDeleted {
        team_id: i32,
        roles_removed: u64,
        projects_removed: u64,
        at: DateTime<Utc>,
    },
    ProjectCreated {
        team_id: i32,
        project_id: i32,
        at: DateTime<Utc>,
    },

    // membership
    MemberAdded {
        team_id: i32,
        user_id: i32,
        role: RoleName,
        at: DateTime<Utc>,
    },
    RoleChanged {
        team_id: i32,
        user_id: i32,
        from: String,
        to: RoleName,
        at: DateTime<Utc>,
    },
    MemberRemoved {
        team_id: i32,
        user_id: i32,
        at: DateTime<Utc>,
    },
    MemberLeft {
        team_id: i32,
        user_id: i32,
        at: DateTime<Utc>,
    },
    /// A change was rejected because it would leave the team without a manager.
    NoManagersRejected {
        team_id: i32,
        user_id: i32,
        at: DateTime<Utc>,
    },

    // messages
    MessageSent {
        message_id: i32,
        sender_id: i32,
        recipient_id: i32,
        at: DateTime<Utc>,
    },
    MessageSeen {
        message_id: i32,
        recipient_id: i32,
        at: DateTime<Utc>,
    },
}

impl RosterEvent {
    /// Returns a dot-separated event name for logging/tracing.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TeamCreated { .. } => "team.created",
            Self::TeamRenamed { .. } => "team.renamed",
            Self::TeamDeleted { .. } => "team.deleted",
            Self::ProjectCreated { .. } => "team.project.created",
            Self::MemberAdded { .. } => "team.member.added",
            Self::RoleChanged { .. } => "team.member.role_changed",
            Self::MemberRemoved { .. } => "team.member.removed",
            Self::MemberLeft { .. } => "team.member.left",
            Self::NoManagersRejected { .. } => "team.member.no_managers_rejected",
            Self::MessageSent { .. } => "message.sent",
            Self::MessageSeen { .. } => "message.seen",
        }
    }

    /// Returns the timestamp when this event occurred.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::TeamCreated { at, .. }
            | Self::TeamRenamed { at, .. }
            | Self::TeamDeleted { at, .. }
            | Self::ProjectCreated { at, .. }
            | Self::MemberAdded { at, .. }
            | Self::RoleChanged { at, .. }
            | Self::MemberRemoved { at, .. }
            | Self::MemberLeft { at, .. }
            | Self::NoManagersRejected { at, .. }
            | Self::MessageSent { at, .. }
            | Self::MessageSeen { at, .. } => *at,
        }
    }

    /// The team the event concerns, if any.
    pub fn team_id(&self) -> Option<i32> {
        match self {
            Self::TeamCreated { team_id, .. }
            | Self::TeamRenamed { team_id, .. }
            | Self::TeamDeleted { team_id, .. }
            | Self::ProjectCreated { team_id, .. }
            | Self::MemberAdded { team_id, .. }
            | Self::RoleChanged { team_id, .. }
            | Self::MemberRemoved { team_id, .. }
            | Self::MemberLeft { team_id, .. }
            | Self::NoManagersRejected { team_id, .. } => Some(*team_id),
            Self::MessageSent { .. } | Self::MessageSeen { .. } => None,
        }
    }
}
