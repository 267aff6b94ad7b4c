//! Item type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What kind of item a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "file_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// A container for other items. Has no content.
    Folder,
    /// Opaque content.
    File,
    /// Content that also gets thumbnails.
    Image,
}

impl FileType {
    /// Whether items of this type carry stored content.
    pub fn has_content(&self) -> bool {
        !matches!(self, Self::Folder)
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image)
    }

    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FileType {
    type Err = filestash_core::AppError;

    /// Type names are matched exactly; `"Folder"` is not a folder.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "folder" => Ok(Self::Folder),
            "file" => Ok(Self::File),
            "image" => Ok(Self::Image),
            _ => Err(filestash_core::ErrorKind::MissingType.into()),
        }
    }
}
