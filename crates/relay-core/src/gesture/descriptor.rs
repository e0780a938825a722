//! Remote gesture descriptors.
//!
//! A gesture arrives from the controlling side as a bag of named fields.
//! [`RawGesture`] is that bag as it comes off the wire; [`GestureDescriptor`]
//! is the validated, fixed-schema value the rest of the crate works with.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Prefix added to every gesture source to mark it as remote-originated.
pub const REMOTE_SOURCE_PREFIX: &str = "remote";

/// Which kind of extension owns a bound action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnerKind {
    /// A global extension, active regardless of focus. Wire tag `GlobalPlugin`.
    GlobalExtension,
    /// An extension tied to the focused application. Wire tag `AppModule`.
    ApplicationExtension,
    /// An accessibility-enhancement provider. Wire tag `VisionEnhancementProvider`.
    AccessibilityEnhancer,
    /// Any other owner tag; only the unfiltered scopes can match it.
    Other(String),
}

impl OwnerKind {
    /// Maps a wire tag to an owner kind.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "GlobalPlugin" => Self::GlobalExtension,
            "AppModule" => Self::ApplicationExtension,
            "VisionEnhancementProvider" => Self::AccessibilityEnhancer,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the wire tag.
    pub fn as_tag(&self) -> &str {
        match self {
            Self::GlobalExtension => "GlobalPlugin",
            Self::ApplicationExtension => "AppModule",
            Self::AccessibilityEnhancer => "VisionEnhancementProvider",
            Self::Other(tag) => tag,
        }
    }
}

/// The 3-part coordinate of a bound action: owning module, owner kind, name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptPath {
    pub owner_module: Option<String>,
    pub owner_kind: Option<OwnerKind>,
    pub action_name: String,
}

impl ScriptPath {
    pub fn new(
        owner_module: impl Into<String>,
        owner_kind: OwnerKind,
        action_name: impl Into<String>,
    ) -> Self {
        Self {
            owner_module: Some(owner_module.into()),
            owner_kind: Some(owner_kind),
            action_name: action_name.into(),
        }
    }

    /// Builds a path from its wire form.
    ///
    /// Returns `None` unless there are exactly 3 components and the action
    /// name is present.
    pub fn from_parts(parts: &[Option<String>]) -> Option<Self> {
        match parts {
            [module, kind, Some(name)] => Some(Self {
                owner_module: module.clone(),
                owner_kind: kind.as_deref().map(OwnerKind::from_tag),
                action_name: name.clone(),
            }),
            _ => None,
        }
    }

    /// Converts back to the wire form.
    pub fn to_parts(&self) -> Vec<Option<String>> {
        vec![
            self.owner_module.clone(),
            self.owner_kind.as_ref().map(|k| k.as_tag().to_string()),
            Some(self.action_name.clone()),
        ]
    }

    /// `true` when this path is owned by `module` with the given kind.
    pub fn is_owned_by(&self, kind: &OwnerKind, module: Option<&str>) -> bool {
        self.owner_kind.as_ref() == Some(kind)
            && module.is_some()
            && self.owner_module.as_deref() == module
    }
}

/// A gesture exactly as received, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGesture {
    pub source: String,
    #[serde(rename = "scriptPath", default, skip_serializing_if = "Option::is_none")]
    pub script_path: Option<Vec<Option<String>>>,
    /// Everything else (`id`, `dots`, `space`, `routingIndex`, …).
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

/// A validated remote gesture.
#[derive(Clone, PartialEq)]
pub struct GestureDescriptor {
    source: String,
    script_path: Option<ScriptPath>,
    fields: BTreeMap<String, Value>,
}

impl GestureDescriptor {
    /// Creates a gesture from a local source tag; the tag is marked remote.
    pub fn new(source: &str, script_path: Option<ScriptPath>) -> Self {
        Self {
            source: remote_source(source),
            script_path,
            fields: BTreeMap::new(),
        }
    }

    /// Validates a raw gesture.
    ///
    /// A script path of the wrong shape is dropped (logged at debug level),
    /// which later resolves to "no action".
    pub fn from_raw(raw: RawGesture) -> Self {
        let script_path = raw.script_path.and_then(|parts| {
            let path = ScriptPath::from_parts(&parts);
            if path.is_none() {
                debug!(components = parts.len(), "dropping malformed script path");
            }
            path
        });
        Self {
            source: remote_source(&raw.source),
            script_path,
            fields: raw.fields,
        }
    }

    /// Adds a passthrough field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// The remote-marked source tag, e.g. `remoteFreedomScientific`.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn script_path(&self) -> Option<&ScriptPath> {
        self.script_path.as_ref()
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }
}

impl fmt::Debug for GestureDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureDescriptor")
            .field("source", &self.source)
            .field("script_path", &self.script_path)
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Prefixes `source` with `remote`, upper-casing its first letter.
fn remote_source(source: &str) -> String {
    let mut chars = source.chars();
    match chars.next() {
        Some(first) => format!(
            "{REMOTE_SOURCE_PREFIX}{}{}",
            first.to_uppercase(),
            chars.as_str()
        ),
        None => REMOTE_SOURCE_PREFIX.to_string(),
    }
}
