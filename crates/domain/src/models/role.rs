//! Role registry and approval stages.
//!
//! Role ids are fixed and shared with the `roles` table. Each approving role
//! owns exactly one stage; extending the chain means adding a row to
//! [`STAGE_TABLE`], not another branch.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Organisation roles known to the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    Hrm,
    Hod,
    ExecutiveDirector,
    Finance,
    InternalAuditor,
    Admin,
}

/// Static description of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleInfo {
    pub role: Role,
    pub id: i16,
    pub name: &'static str,
}

/// Every role with its persisted id and display name.
pub const ROLE_REGISTRY: [RoleInfo; 7] = [
    RoleInfo { role: Role::Employee, id: 1, name: "Employee" },
    RoleInfo { role: Role::Hrm, id: 2, name: "Human Resource Manager" },
    RoleInfo { role: Role::Hod, id: 3, name: "Head of Department" },
    RoleInfo { role: Role::ExecutiveDirector, id: 4, name: "Executive Director" },
    RoleInfo { role: Role::Finance, id: 5, name: "Finance" },
    RoleInfo { role: Role::InternalAuditor, id: 6, name: "Internal Auditor" },
    RoleInfo { role: Role::Admin, id: 7, name: "Administrator" },
];

impl Role {
    fn info(self) -> &'static RoleInfo {
        let index = match self {
            Role::Employee => 0,
            Role::Hrm => 1,
            Role::Hod => 2,
            Role::ExecutiveDirector => 3,
            Role::Finance => 4,
            Role::InternalAuditor => 5,
            Role::Admin => 6,
        };
        &ROLE_REGISTRY[index]
    }

    /// Persisted role id.
    pub fn id(self) -> i16 {
        self.info().id
    }

    /// Human readable role name, used in notifications.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Looks up a role by its persisted id.
    pub fn from_id(id: i16) -> Option<Role> {
        ROLE_REGISTRY
            .iter()
            .find(|info| info.id == id)
            .map(|info| info.role)
    }

    /// The approval stage this role decides, if any.
    pub fn stage(self) -> Option<Stage> {
        STAGE_TABLE
            .iter()
            .find(|(role, _)| *role == self)
            .map(|(_, stage)| *stage)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An approval checkpoint on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Hod,
    Hrm,
    Auditor,
    Finance,
    Ed,
}

/// Column names backing one stage on the `requests` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageColumns {
    pub status: &'static str,
    pub remark: &'static str,
    pub decided_at: &'static str,
}

/// Role to stage mapping, in approval order.
pub const STAGE_TABLE: [(Role, Stage); 5] = [
    (Role::Hod, Stage::Hod),
    (Role::Hrm, Stage::Hrm),
    (Role::InternalAuditor, Stage::Auditor),
    (Role::Finance, Stage::Finance),
    (Role::ExecutiveDirector, Stage::Ed),
];

impl Stage {
    /// All stages in approval order.
    pub const ALL: [Stage; 5] = [
        Stage::Hod,
        Stage::Hrm,
        Stage::Auditor,
        Stage::Finance,
        Stage::Ed,
    ];

    /// Position in the approval chain, starting at 1.
    pub fn order(self) -> usize {
        self.index() + 1
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Stage::Hod => 0,
            Stage::Hrm => 1,
            Stage::Auditor => 2,
            Stage::Finance => 3,
            Stage::Ed => 4,
        }
    }

    /// The final stage; its approval approves the whole request.
    pub fn is_final(self) -> bool {
        self == Stage::Ed
    }

    /// The role that decides this stage.
    pub fn role(self) -> Role {
        STAGE_TABLE[self.index()].0
    }

    /// Stage decided by the given role id. Unknown or non-approving roles yield `None`.
    pub fn for_role_id(role_id: i16) -> Option<Stage> {
        Role::from_id(role_id).and_then(Role::stage)
    }

    pub fn columns(self) -> StageColumns {
        match self {
            Stage::Hod => StageColumns {
                status: "hod_status",
                remark: "hod_remark",
                decided_at: "hod_approved_at",
            },
            Stage::Hrm => StageColumns {
                status: "hrm_status",
                remark: "hrm_remark",
                decided_at: "hrm_approved_at",
            },
            Stage::Auditor => StageColumns {
                status: "auditor_status",
                remark: "auditor_remark",
                decided_at: "auditor_approved_at",
            },
            Stage::Finance => StageColumns {
                status: "finance_status",
                remark: "finance_remark",
                decided_at: "finance_approved_at",
            },
            Stage::Ed => StageColumns {
                status: "ed_status",
                remark: "ed_remark",
                decided_at: "ed_approved_at",
            },
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Hod => write!(f, "HOD"),
            Stage::Hrm => write!(f, "HRM"),
            Stage::Auditor => write!(f, "Internal Auditor"),
            Stage::Finance => write!(f, "Finance"),
            Stage::Ed => write!(f, "ED"),
        }
    }
}

/// Explicit caller context passed into every workflow operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: Uuid,
    pub role_id: i16,
    pub department: Option<String>,
}

impl Actor {
    pub fn new(user_id: Uuid, role_id: i16) -> Self {
        Self {
            user_id,
            role_id,
            department: None,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Resolved role, `None` for ids outside the registry.
    pub fn role(&self) -> Option<Role> {
        Role::from_id(self.role_id)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }
}
