//! User collection schema and request payloads.

use crate::collection::{
    domain::{CollectionSchema, ValidationError, parse_optional_choice, require_text},
    services::CollectionService,
};
use crate::user::domain::{DEFAULT_ROLE, EmailAddress, NewUser, User, UserChanges, UserStats};
use mockable::Clock;
use serde::Deserialize;

/// Request payload for creating a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl CreateUserRequest {
    /// Creates a request with the required name and email.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Sets the initial status; defaults to `active` when omitted.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the role; defaults to `user` when omitted.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Request payload for a partial user update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl UpdateUserRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Replaces the avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    /// Replaces the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the role.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// Schema binding [`User`] records to their validation rules.
///
/// Email uniqueness is declared through the record's unique key and enforced
/// by the repository, not here.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserCollection;

impl CollectionSchema for UserCollection {
    type Record = User;
    type CreateRequest = CreateUserRequest;
    type UpdateRequest = UpdateUserRequest;
    type Stats = UserStats;

    fn build<C: Clock>(request: CreateUserRequest, clock: &C) -> Result<User, ValidationError> {
        let data = NewUser {
            name: require_text("name", &request.name)?,
            email: EmailAddress::new(&request.email)?,
            avatar: request.avatar,
            status: parse_optional_choice("status", request.status.as_deref())?
                .unwrap_or_default(),
            role: request
                .role
                .map_or_else(|| Ok(DEFAULT_ROLE.to_owned()), |role| require_text("role", &role))?,
        };
        Ok(User::new(data, clock))
    }

    fn validate_update(request: UpdateUserRequest) -> Result<UserChanges, ValidationError> {
        Ok(UserChanges {
            name: request
                .name
                .map(|name| require_text("name", &name))
                .transpose()?,
            email: request.email.map(EmailAddress::new).transpose()?,
            avatar: request.avatar,
            status: parse_optional_choice("status", request.status.as_deref())?,
            role: request
                .role
                .map(|role| require_text("role", &role))
                .transpose()?,
        })
    }
}

/// User collection manager.
pub type UserService<R, C> = CollectionService<UserCollection, R, C>;
