//! core::metadata::version
//!
//! The metadata version table.
//!
//! Each supported version is a plain [`VersionSpec`] record: a set of
//! capability flags plus the ordered field plan the writer walks. There is
//! no per-version code; the writer and renderer consult the record.
//!
//! | version | adds |
//! |---------|------|
//! | 1.2 | baseline fields |
//! | 2.1 | `Provides-Extra`, `Description-Content-Type` |
//! | 2.2 | `Dynamic` |
//! | 2.3 | nothing (bookkeeping) |
//! | 2.4 | `License-Expression`, `License-File` |
//!
//! # Example
//!
//! ```
//! use coremeta::core::metadata::version::{MetadataVersion, LATEST_METADATA_VERSION};
//!
//! let v: MetadataVersion = "2.2".parse().unwrap();
//! assert!(v.spec().capabilities.dynamic);
//! assert!(!v.spec().capabilities.license_expression);
//! assert_eq!(LATEST_METADATA_VERSION.as_str(), "2.4");
//! assert!("3.0".parse::<MetadataVersion>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::MetadataError;

/// A supported core metadata version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MetadataVersion {
    V1_2,
    V2_1,
    V2_2,
    V2_3,
    V2_4,
}

/// The newest version the writer produces.
pub const LATEST_METADATA_VERSION: MetadataVersion = MetadataVersion::V2_4;

impl MetadataVersion {
    /// Every supported version, oldest first.
    pub const ALL: [MetadataVersion; 5] = [
        MetadataVersion::V1_2,
        MetadataVersion::V2_1,
        MetadataVersion::V2_2,
        MetadataVersion::V2_3,
        MetadataVersion::V2_4,
    ];

    /// The identifier written in `Metadata-Version`.
    pub fn as_str(self) -> &'static str {
        self.spec().id
    }

    /// The table entry for this version.
    pub fn spec(self) -> &'static VersionSpec {
        match self {
            MetadataVersion::V1_2 => &VERSION_TABLE[0],
            MetadataVersion::V2_1 => &VERSION_TABLE[1],
            MetadataVersion::V2_2 => &VERSION_TABLE[2],
            MetadataVersion::V2_3 => &VERSION_TABLE[3],
            MetadataVersion::V2_4 => &VERSION_TABLE[4],
        }
    }
}

impl FromStr for MetadataVersion {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VERSION_TABLE
            .iter()
            .find(|spec| spec.id == s)
            .map(|spec| spec.version)
            .ok_or_else(|| MetadataError::UnsupportedVersion(s.to_string()))
    }
}

impl fmt::Display for MetadataVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a version can express beyond the 1.2 baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Optional dependencies get `Provides-Extra` declarations
    pub provides_extra: bool,
    /// Readme content type is written as `Description-Content-Type`
    pub description_content_type: bool,
    /// `Dynamic` declarations are written
    pub dynamic: bool,
    /// License expressions use `License-Expression`
    pub license_expression: bool,
    /// Resolved license files are written as `License-File`
    pub license_files: bool,
}

/// A slot in a version's field plan.
///
/// Some slots produce one of several headers depending on the value
/// (`Author` vs `Author-email`) or on capabilities (`License` vs
/// `License-Expression`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Version,
    Dynamic,
    Summary,
    ProjectUrl,
    Author,
    Maintainer,
    License,
    LicenseFile,
    Keywords,
    Classifier,
    RequiresPython,
    RequiresDist,
    OptionalDependencies,
    Readme,
}

impl Field {
    /// Header names this slot may produce under the given capabilities.
    pub fn headers(self, caps: &Capabilities) -> &'static [&'static str] {
        match self {
            Field::Name => &["Name"],
            Field::Version => &["Version"],
            Field::Dynamic => &["Dynamic"],
            Field::Summary => &["Summary"],
            Field::ProjectUrl => &["Project-URL"],
            Field::Author => &["Author", "Author-email"],
            Field::Maintainer => &["Maintainer", "Maintainer-email"],
            Field::License if caps.license_expression => &["License", "License-Expression"],
            Field::License => &["License"],
            Field::LicenseFile => &["License-File"],
            Field::Keywords => &["Keywords"],
            Field::Classifier => &["Classifier"],
            Field::RequiresPython => &["Requires-Python"],
            Field::RequiresDist => &["Requires-Dist"],
            Field::OptionalDependencies if caps.provides_extra => {
                &["Provides-Extra", "Requires-Dist"]
            }
            Field::OptionalDependencies => &["Requires-Dist"],
            Field::Readme if caps.description_content_type => {
                &["Description", "Description-Content-Type"]
            }
            Field::Readme => &["Description"],
        }
    }
}

/// One row of the version table.
#[derive(Debug)]
pub struct VersionSpec {
    pub version: MetadataVersion,
    pub id: &'static str,
    pub capabilities: Capabilities,
    /// Fields in the order they are written
    pub plan: &'static [Field],
}

impl VersionSpec {
    /// Whether any slot of this version can produce `header`.
    pub fn supports_header(&self, header: &str) -> bool {
        self.plan
            .iter()
            .flat_map(|field| field.headers(&self.capabilities))
            .any(|h| h.eq_ignore_ascii_case(header))
    }
}

const PLAN_1X: &[Field] = &[
    Field::Name,
    Field::Version,
    Field::Summary,
    Field::ProjectUrl,
    Field::Author,
    Field::Maintainer,
    Field::License,
    Field::Keywords,
    Field::Classifier,
    Field::RequiresPython,
    Field::RequiresDist,
    Field::OptionalDependencies,
    Field::Readme,
];

const PLAN_WITH_DYNAMIC: &[Field] = &[
    Field::Name,
    Field::Version,
    Field::Dynamic,
    Field::Summary,
    Field::ProjectUrl,
    Field::Author,
    Field::Maintainer,
    Field::License,
    Field::Keywords,
    Field::Classifier,
    Field::RequiresPython,
    Field::RequiresDist,
    Field::OptionalDependencies,
    Field::Readme,
];

const PLAN_WITH_LICENSE_FILES: &[Field] = &[
    Field::Name,
    Field::Version,
    Field::Dynamic,
    Field::Summary,
    Field::ProjectUrl,
    Field::Author,
    Field::Maintainer,
    Field::License,
    Field::LicenseFile,
    Field::Keywords,
    Field::Classifier,
    Field::RequiresPython,
    Field::RequiresDist,
    Field::OptionalDependencies,
    Field::Readme,
];

/// The version table, oldest first.
pub static VERSION_TABLE: [VersionSpec; 5] = [
    VersionSpec {
        version: MetadataVersion::V1_2,
        id: "1.2",
        capabilities: Capabilities {
            provides_extra: false,
            description_content_type: false,
            dynamic: false,
            license_expression: false,
            license_files: false,
        },
        plan: PLAN_1X,
    },
    VersionSpec {
        version: MetadataVersion::V2_1,
        id: "2.1",
        capabilities: Capabilities {
            provides_extra: true,
            description_content_type: true,
            dynamic: false,
            license_expression: false,
            license_files: false,
        },
        plan: PLAN_1X,
    },
    VersionSpec {
        version: MetadataVersion::V2_2,
        id: "2.2",
        capabilities: Capabilities {
            provides_extra: true,
            description_content_type: true,
            dynamic: true,
            license_expression: false,
            license_files: false,
        },
        plan: PLAN_WITH_DYNAMIC,
    },
    VersionSpec {
        version: MetadataVersion::V2_3,
        id: "2.3",
        capabilities: Capabilities {
            provides_extra: true,
            description_content_type: true,
            dynamic: true,
            license_expression: false,
            license_files: false,
        },
        plan: PLAN_WITH_DYNAMIC,
    },
    VersionSpec {
        version: MetadataVersion::V2_4,
        id: "2.4",
        capabilities: Capabilities {
            provides_extra: true,
            description_content_type: true,
            dynamic: true,
            license_expression: true,
            license_files: true,
        },
        plan: PLAN_WITH_LICENSE_FILES,
    },
];
