use anyhow::{Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Stable identifier for a study module (e.g., `preview`).
///
/// Ids are never reused; prerequisite edges refer to modules by id.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub String);

impl ModuleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ModuleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleId {
    fn from(value: &str) -> Self {
        ModuleId(value.to_string())
    }
}

/// Opaque handle the host uses to launch a module's content.
///
/// The catalog never interprets it; only the presentation layer does.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryPoint(pub String);

/// Coarse difficulty tier, `0..=Level::MAX`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct Level(u8);

impl Level {
    pub const MAX: u8 = 17;

    pub fn new(value: u8) -> Result<Self> {
        if value > Self::MAX {
            bail!("level {} out of range 0..={}", value, Self::MAX);
        }
        Ok(Level(value))
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Level::new(value).map_err(serde::de::Error::custom)
    }
}

/// Topical grouping of a module, orthogonal to its level.
///
/// The set is closed: catalogs naming an unknown category fail to load.
/// Variant order is the presentation order used by aggregates.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Category {
    Basics,
    Layout,
    State,
    Component,
    List,
    Search,
    Structure,
    Effect,
    Navigation,
    Animation,
    Architecture,
    Interaction,
    Integration,
    System,
    Testing,
    Multiplatform,
    Graphics,
    Performance,
    Accessibility,
}

impl Category {
    pub const ALL: [Category; 19] = [
        Category::Basics,
        Category::Layout,
        Category::State,
        Category::Component,
        Category::List,
        Category::Search,
        Category::Structure,
        Category::Effect,
        Category::Navigation,
        Category::Animation,
        Category::Architecture,
        Category::Interaction,
        Category::Integration,
        Category::System,
        Category::Testing,
        Category::Multiplatform,
        Category::Graphics,
        Category::Performance,
        Category::Accessibility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Basics => "basics",
            Category::Layout => "layout",
            Category::State => "state",
            Category::Component => "component",
            Category::List => "list",
            Category::Search => "search",
            Category::Structure => "structure",
            Category::Effect => "effect",
            Category::Navigation => "navigation",
            Category::Animation => "animation",
            Category::Architecture => "architecture",
            Category::Interaction => "interaction",
            Category::Integration => "integration",
            Category::System => "system",
            Category::Testing => "testing",
            Category::Multiplatform => "multiplatform",
            Category::Graphics => "graphics",
            Category::Performance => "performance",
            Category::Accessibility => "accessibility",
        }
    }

    fn from_wire(value: &str) -> Option<Self> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse used for user input.
impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match Category::from_wire(&normalized) {
            Some(category) => Ok(category),
            None => bail!("unknown category '{}'", value.trim()),
        }
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Category::from_wire(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown category '{value}'")))
    }
}
