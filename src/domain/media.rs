// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Media attached to a post. Declared by the caller, never inferred from text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    None,
    Gif,
    Image,
    Video,
}

impl MediaType {
    pub const ALL: &'static [&'static str] = &["none", "gif", "image", "video"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gif => "gif",
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "gif" => Ok(Self::Gif),
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            _ => Err(Error::InvalidMediaType {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
