// src/service/users.rs

use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::graphql;
use crate::transport::Transport;

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Deserialize)]
struct UsersEnvelope {
    #[serde(default)]
    users: Vec<User>,
}

pub struct UserService<T> {
    transport: Arc<T>,
}

impl<T: Transport> UserService<T> {
    pub(crate) fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let data = self
            .transport
            .execute(graphql::LIST_USERS, Value::Null)
            .await?;
        let envelope: UsersEnvelope = serde_json::from_value(data)?;
        Ok(envelope.users)
    }

    pub async fn get_user_by_id(&self, user_id: &str) -> Result<Option<User>> {
        if user_id.is_empty() {
            return Err(Error::MissingParameter("user_id"));
        }
        let data = self
            .transport
            .execute(graphql::GET_USER_BY_ID, json!({ "userId": user_id }))
            .await?;
        let envelope: UsersEnvelope = serde_json::from_value(data)?;
        Ok(envelope.users.into_iter().next())
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        if email.is_empty() {
            return Err(Error::MissingParameter("email"));
        }
        let data = self
            .transport
            .execute(graphql::GET_USER_BY_EMAIL, json!({ "email": email }))
            .await?;
        let envelope: UsersEnvelope = serde_json::from_value(data)?;
        Ok(envelope.users.into_iter().next())
    }
}
