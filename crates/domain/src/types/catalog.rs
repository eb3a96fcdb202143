//! Public catalog records: projects, site members, news
//!
//! These are read-only entries served without authentication. Nothing
//! beyond the presence of an id is required of them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;
use crate::hydrate::{self, Hydrate};

/// A showcased project on the public landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub button_text: String,
    pub link: String,
    pub order: i64,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Hydrate for Project {
    const ENTITY: &'static str = "project";

    fn hydrate(value: &Value) -> Result<Self> {
        Ok(Self {
            id: hydrate::require_id(value, "id", Self::ENTITY)?,
            title: hydrate::string_or(value, "title", ""),
            description: hydrate::string_or(value, "description", ""),
            image: hydrate::opt_string(value, "image"),
            button_text: hydrate::string_or(value, "button_text", ""),
            link: hydrate::string_or(value, "link", ""),
            order: hydrate::int_or(value, "order", 0),
            is_active: hydrate::bool_or(value, "is_active", true),
            created_at: hydrate::string_or(value, "created_at", ""),
            updated_at: hydrate::string_or(value, "updated_at", ""),
        })
    }
}

/// A site team member listed on the public about page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub nickname: String,
    pub photo: Option<String>,
    pub group: String,
    pub telegram: String,
    pub itd: String,
    pub order: i64,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Hydrate for Member {
    const ENTITY: &'static str = "member";

    fn hydrate(value: &Value) -> Result<Self> {
        Ok(Self {
            id: hydrate::require_id(value, "id", Self::ENTITY)?,
            nickname: hydrate::string_or(value, "nickname", ""),
            photo: hydrate::opt_string(value, "photo"),
            group: hydrate::string_or(value, "group", ""),
            telegram: hydrate::string_or(value, "telegram", ""),
            itd: hydrate::string_or(value, "itd", ""),
            order: hydrate::int_or(value, "order", 0),
            is_active: hydrate::bool_or(value, "is_active", true),
            created_at: hydrate::string_or(value, "created_at", ""),
            updated_at: hydrate::string_or(value, "updated_at", ""),
        })
    }
}

/// A published news entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub subtitle: Option<String>,
    pub image: Option<String>,
    pub is_published: bool,
    pub views: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl Hydrate for News {
    const ENTITY: &'static str = "news";

    fn hydrate(value: &Value) -> Result<Self> {
        Ok(Self {
            id: hydrate::require_id(value, "id", Self::ENTITY)?,
            title: hydrate::string_or(value, "title", ""),
            content: hydrate::string_or(value, "content", ""),
            subtitle: hydrate::opt_string(value, "subtitle"),
            image: hydrate::opt_string(value, "image"),
            is_published: hydrate::bool_or(value, "is_published", true),
            views: hydrate::int_or(value, "views", 0),
            created_at: hydrate::string_or(value, "created_at", ""),
            updated_at: hydrate::string_or(value, "updated_at", ""),
        })
    }
}
