use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use meridian_error::{MeridianError, Result};

/// A type contributed by an extension.
///
/// Extension types are carried over a builtin physical representation (binary
/// blobs), with the extension providing the text rendering for values of the
/// type. Two extension types are considered equal if they have the same name.
pub trait ExtensionType: Debug + Sync + Send {
    /// Name of the type as exposed to SQL.
    fn name(&self) -> &'static str;

    /// Render a single value of this type.
    fn format_value(&self, value: &[u8]) -> Result<String>;
}

/// Metadata attached to `DataType::Extension`.
#[derive(Debug, Clone)]
pub struct ExtensionTypeMeta {
    ext: Arc<dyn ExtensionType>,
}

impl ExtensionTypeMeta {
    pub fn new(ext: Arc<dyn ExtensionType>) -> Self {
        ExtensionTypeMeta { ext }
    }

    pub fn name(&self) -> &'static str {
        self.ext.name()
    }

    pub fn format_value(&self, value: &[u8]) -> Result<String> {
        self.ext.format_value(value)
    }
}

impl PartialEq for ExtensionTypeMeta {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for ExtensionTypeMeta {}

impl Hash for ExtensionTypeMeta {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state)
    }
}

/// Supported data types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Constant null columns.
    Null,
    Boolean,
    Int64,
    Float64,
    Utf8,
    Binary,
    /// A type registered by an extension, physically stored as binary.
    Extension(ExtensionTypeMeta),
}

impl DataType {
    /// Get the identifier for this datatype.
    pub fn datatype_id(&self) -> DataTypeId {
        match self {
            DataType::Null => DataTypeId::Null,
            DataType::Boolean => DataTypeId::Boolean,
            DataType::Int64 => DataTypeId::Int64,
            DataType::Float64 => DataTypeId::Float64,
            DataType::Utf8 => DataTypeId::Utf8,
            DataType::Binary => DataTypeId::Binary,
            DataType::Extension(meta) => DataTypeId::Extension(meta.name()),
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, DataType::Null)
    }

    pub const fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int64 | DataType::Float64)
    }

    pub const fn is_extension(&self) -> bool {
        matches!(self, DataType::Extension(_))
    }

    /// Get the extension metadata, erroring if this isn't an extension type.
    pub fn try_get_extension_meta(&self) -> Result<&ExtensionTypeMeta> {
        match self {
            DataType::Extension(meta) => Ok(meta),
            other => Err(MeridianError::new(format!(
                "Not an extension type: {other}"
            ))),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Boolean => write!(f, "Boolean"),
            Self::Int64 => write!(f, "Int64"),
            Self::Float64 => write!(f, "Float64"),
            Self::Utf8 => write!(f, "Utf8"),
            Self::Binary => write!(f, "Binary"),
            Self::Extension(meta) => write!(f, "{}", meta.name()),
        }
    }
}

/// Identifier for a datatype without any attached metadata.
///
/// Usable in const contexts, so function signatures reference types through
/// ids. Extension types are identified by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataTypeId {
    Null,
    Boolean,
    Int64,
    Float64,
    Utf8,
    Binary,
    Extension(&'static str),
}

impl DataTypeId {
    /// Get the default datatype for this id.
    ///
    /// Errors for extension ids since the full type requires metadata only the
    /// registering extension has.
    pub fn try_default_datatype(&self) -> Result<DataType> {
        Ok(match self {
            DataTypeId::Null => DataType::Null,
            DataTypeId::Boolean => DataType::Boolean,
            DataTypeId::Int64 => DataType::Int64,
            DataTypeId::Float64 => DataType::Float64,
            DataTypeId::Utf8 => DataType::Utf8,
            DataTypeId::Binary => DataType::Binary,
            DataTypeId::Extension(name) => {
                return Err(MeridianError::new(format!(
                    "No default data type for extension type '{name}'"
                )))
            }
        })
    }
}

impl fmt::Display for DataTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "Null"),
            Self::Boolean => write!(f, "Boolean"),
            Self::Int64 => write!(f, "Int64"),
            Self::Float64 => write!(f, "Float64"),
            Self::Utf8 => write!(f, "Utf8"),
            Self::Binary => write!(f, "Binary"),
            Self::Extension(name) => write!(f, "{name}"),
        }
    }
}
