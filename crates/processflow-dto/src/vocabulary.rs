//! Fixed vocabularies shared by the backend and the dashboard.
//!
//! The backend speaks `UPPER_SNAKE_CASE` codes, with grammatically gendered
//! status codes for processes (`CONCLUIDO`) and tasks (`CONCLUIDA`). The
//! dashboard speaks lowercase-hyphenated values.
//!
//! Two mappings here are lossy:
//!
//! - [`Status::Atrasado`] is written back as the cancelled code, so an
//!   overdue item and a cancelled item are indistinguishable on the backend.
//! - [`TipoUsuario::Financeiro`] is written as the `admin` role but every
//!   elevated role reads back as [`TipoUsuario::Gestor`].

use serde::{Deserialize, Serialize};

/// Fallback for a missing process category or user department.
pub const DEFAULT_GROUP_LABEL: &str = "Geral";

/// Selects the grammatical gender of backend status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Masculine codes (`CONCLUIDO`, `CANCELADO`).
    Process,
    /// Feminine codes (`CONCLUIDA`, `CANCELADA`).
    Task,
}

/// Workflow status as shown in the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Not started.
    #[default]
    Pendente,
    /// In progress.
    EmAndamento,
    /// Done.
    Concluido,
    /// Overdue; stored on the backend as cancelled.
    Atrasado,
}

impl Status {
    /// Every status, in workflow order.
    pub const ALL: [Self; 4] = [
        Self::Pendente,
        Self::EmAndamento,
        Self::Concluido,
        Self::Atrasado,
    ];

    /// Dashboard spelling of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pendente => "pendente",
            Self::EmAndamento => "em-andamento",
            Self::Concluido => "concluido",
            Self::Atrasado => "atrasado",
        }
    }

    /// Parse a backend status code.
    ///
    /// Matching ignores ASCII case and accepts both grammatical genders for
    /// either record kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use processflow_dto::Status;
    ///
    /// assert_eq!(Status::from_backend_code("EM_ANDAMENTO"), Some(Status::EmAndamento));
    /// assert_eq!(Status::from_backend_code("CANCELADA"), Some(Status::Atrasado));
    /// assert_eq!(Status::from_backend_code("ARQUIVADO"), None);
    /// ```
    #[must_use]
    pub fn from_backend_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "PENDENTE" => Some(Self::Pendente),
            "EM_ANDAMENTO" => Some(Self::EmAndamento),
            "CONCLUIDO" | "CONCLUIDA" => Some(Self::Concluido),
            "CANCELADO" | "CANCELADA" => Some(Self::Atrasado),
            _ => None,
        }
    }

    /// Backend code for this status on the given record kind.
    #[must_use]
    pub const fn backend_code(self, kind: RecordKind) -> &'static str {
        match (self, kind) {
            (Self::Pendente, _) => "PENDENTE",
            (Self::EmAndamento, _) => "EM_ANDAMENTO",
            (Self::Concluido, RecordKind::Process) => "CONCLUIDO",
            (Self::Concluido, RecordKind::Task) => "CONCLUIDA",
            (Self::Atrasado, RecordKind::Process) => "CANCELADO",
            (Self::Atrasado, RecordKind::Task) => "CANCELADA",
        }
    }
}

/// Priority as shown in the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    /// Low.
    Baixa,
    /// Medium.
    #[default]
    Media,
    /// High.
    Alta,
    /// Critical; `URGENTE` on the backend.
    Critica,
}

impl Priority {
    /// Every priority, lowest first.
    pub const ALL: [Self; 4] = [Self::Baixa, Self::Media, Self::Alta, Self::Critica];

    /// Dashboard spelling of the priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baixa => "baixa",
            Self::Media => "media",
            Self::Alta => "alta",
            Self::Critica => "critica",
        }
    }

    /// Parse a backend priority code, ignoring ASCII case.
    #[must_use]
    pub fn from_backend_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "BAIXA" => Some(Self::Baixa),
            "MEDIA" => Some(Self::Media),
            "ALTA" => Some(Self::Alta),
            "URGENTE" => Some(Self::Critica),
            _ => None,
        }
    }

    /// Backend code for this priority.
    #[must_use]
    pub const fn backend_code(self) -> &'static str {
        match self {
            Self::Baixa => "BAIXA",
            Self::Media => "MEDIA",
            Self::Alta => "ALTA",
            Self::Critica => "URGENTE",
        }
    }
}

/// Account role as stored by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UserRole {
    /// Full administrative access.
    Admin,
    /// Manages processes and teams.
    Manager,
    /// Regular account.
    #[default]
    User,
}

impl UserRole {
    /// Interpret a backend role string.
    ///
    /// Anything other than `admin` or `manager` (ignoring ASCII case),
    /// including an absent role, is a regular user.
    #[must_use]
    pub fn from_backend(role: Option<&str>) -> Self {
        match role.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("admin") => Self::Admin,
            Some(value) if value.eq_ignore_ascii_case("manager") => Self::Manager,
            _ => Self::User,
        }
    }

    /// Backend spelling of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::User => "user",
        }
    }

    /// Job title shown when the backend record carries none.
    #[must_use]
    pub const fn default_cargo(self) -> &'static str {
        match self {
            Self::Admin => "Administrador",
            Self::Manager => "Gerente",
            Self::User => "Usuário",
        }
    }
}

/// Account type selected in the dashboard's user forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TipoUsuario {
    /// Regular account.
    #[default]
    Comum,
    /// Manager account.
    Gestor,
    /// Finance account; stored as an administrator.
    Financeiro,
}

impl TipoUsuario {
    /// Account type shown for a backend role.
    ///
    /// Both elevated roles read as [`TipoUsuario::Gestor`];
    /// [`TipoUsuario::Financeiro`] is never produced here.
    #[must_use]
    pub const fn from_role(role: UserRole) -> Self {
        match role {
            UserRole::Admin | UserRole::Manager => Self::Gestor,
            UserRole::User => Self::Comum,
        }
    }

    /// Backend role written for this account type.
    #[must_use]
    pub const fn backend_role(self) -> UserRole {
        match self {
            Self::Comum => UserRole::User,
            Self::Gestor => UserRole::Manager,
            Self::Financeiro => UserRole::Admin,
        }
    }
}
