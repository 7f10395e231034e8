//! User record and its status field.

use super::{EmailAddress, UserId};
use crate::collection::domain::{Choice, CollectionRecord, RecordFilter, Timestamps, UniqueKey};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Role assigned when a creation request omits one.
pub const DEFAULT_ROLE: &str = "user";

/// User account status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserStatus {
    /// The account is in use.
    #[default]
    Active,
    /// The account is disabled.
    Inactive,
    /// The account awaits activation.
    Pending,
}

impl Choice for UserStatus {
    const ALL: &'static [Self] = &[Self::Active, Self::Inactive, Self::Pending];

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }
}

/// Validated field values for a user about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Trimmed, non-empty display name.
    pub name: String,
    /// Validated email address.
    pub email: EmailAddress,
    /// Optional avatar URL.
    pub avatar: Option<String>,
    /// Initial status.
    pub status: UserStatus,
    /// Trimmed, non-empty role.
    pub role: String,
}

/// Validated partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement email address.
    pub email: Option<EmailAddress>,
    /// Replacement avatar URL.
    pub avatar: Option<String>,
    /// Replacement status.
    pub status: Option<UserStatus>,
    /// Replacement role.
    pub role: Option<String>,
}

/// User record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
    status: UserStatus,
    role: String,
    #[serde(flatten)]
    timestamps: Timestamps,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted user identifier.
    pub id: UserId,
    /// Persisted name.
    pub name: String,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted avatar URL, if any.
    pub avatar: Option<String>,
    /// Persisted status.
    pub status: UserStatus,
    /// Persisted role.
    pub role: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a user with a fresh identifier and matching timestamps.
    #[must_use]
    pub fn new(data: NewUser, clock: &impl Clock) -> Self {
        Self {
            id: UserId::new(),
            name: data.name,
            email: data.email,
            avatar: data.avatar,
            status: data.status,
            role: data.role,
            timestamps: Timestamps::now(clock),
        }
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            email: data.email,
            avatar: data.avatar,
            status: data.status,
            role: data.role,
            timestamps: Timestamps::from_persisted(data.created_at, data.updated_at),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the avatar URL, if any.
    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Returns the account status.
    #[must_use]
    pub const fn status(&self) -> UserStatus {
        self.status
    }

    /// Returns the role.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.timestamps.created_at()
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.timestamps.updated_at()
    }

    /// Applies the supplied changes and advances `updated_at` to `now`.
    ///
    /// Email uniqueness is not checked here; storage enforces it when the
    /// changed record is written.
    pub fn apply(&mut self, changes: UserChanges, now: DateTime<Utc>) {
        let UserChanges {
            name,
            email,
            avatar,
            status,
            role,
        } = changes;

        if let Some(value) = name {
            self.name = value;
        }
        if let Some(value) = email {
            self.email = value;
        }
        if avatar.is_some() {
            self.avatar = avatar;
        }
        if let Some(value) = status {
            self.status = value;
        }
        if let Some(value) = role {
            self.role = value;
        }
        self.timestamps.touch(now);
    }
}

impl CollectionRecord for User {
    type Id = UserId;
    type Status = UserStatus;
    type Filter = UserFilter;
    type Changes = UserChanges;

    const KIND: &'static str = "user";

    fn id(&self) -> UserId {
        self.id
    }

    fn status_filter(status: UserStatus) -> UserFilter {
        UserFilter::default().with_status(status)
    }

    fn apply_changes(&mut self, changes: UserChanges, now: DateTime<Utc>) {
        self.apply(changes, now);
    }

    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        Some(UniqueKey {
            field: "email",
            value: self.email.as_str(),
        })
    }
}

/// User selection criteria; unset criteria match every user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    status: Option<UserStatus>,
}

impl UserFilter {
    /// Narrows the selection to users with `status`.
    #[must_use]
    pub const fn with_status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns the status criterion, if any.
    #[must_use]
    pub const fn status(&self) -> Option<UserStatus> {
        self.status
    }
}

impl RecordFilter<User> for UserFilter {
    fn matches(&self, user: &User) -> bool {
        self.status.is_none_or(|wanted| user.status == wanted)
    }
}
