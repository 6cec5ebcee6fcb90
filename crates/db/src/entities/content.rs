//! Content kind discriminator and the polymorphic view over the three
//! content tables.

use std::fmt;
use std::str::FromStr;

use newlands_common::AppError;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{art, post, video};

/// Content kinds sharing the like and comment mechanisms.
///
/// Stored as a plain string discriminator wherever a reference must span the
/// three content tables (likes, notifications). Those columns carry no
/// foreign key, so target existence is checked in code and dependent rows
/// are purged explicitly when a target is deleted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[sea_orm(string_value = "post")]
    Post,
    #[sea_orm(string_value = "art")]
    Art,
    #[sea_orm(string_value = "video")]
    Video,
}

impl ContentKind {
    /// The discriminator string stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Art => "art",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(Self::Post),
            "art" => Ok(Self::Art),
            "video" => Ok(Self::Video),
            other => Err(AppError::Validation(format!(
                "unknown content kind: {other}"
            ))),
        }
    }
}

/// A content item of any kind, tagged by its discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentItem {
    Post(post::Model),
    Art(art::Model),
    Video(video::Model),
}

impl ContentItem {
    /// The item's ID.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Post(p) => &p.id,
            Self::Art(a) => &a.id,
            Self::Video(v) => &v.id,
        }
    }

    /// The owning user's ID.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        match self {
            Self::Post(p) => &p.user_id,
            Self::Art(a) => &a.user_id,
            Self::Video(v) => &v.user_id,
        }
    }

    /// Which table this item lives in.
    #[must_use]
    pub const fn kind(&self) -> ContentKind {
        match self {
            Self::Post(_) => ContentKind::Post,
            Self::Art(_) => ContentKind::Art,
            Self::Video(_) => ContentKind::Video,
        }
    }

    /// When the item was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTimeWithTimeZone {
        match self {
            Self::Post(p) => p.created_at,
            Self::Art(a) => a.created_at,
            Self::Video(v) => v.created_at,
        }
    }
}
