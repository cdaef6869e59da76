//! MCP tool catalogue
//!
//! One module per Todoist resource. Each module declares its parameter
//! structs, one async handler per tool and a `descriptors()` list; this
//! module stitches those lists into the process-wide catalogue.

use std::sync::LazyLock;

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::mcp::registry::{ToolDescriptor, ToolError, ToolResult};
use crate::todoist;

/// Declare a [`ToolDescriptor`] whose handler takes a typed parameter struct.
macro_rules! tool {
    (
        $name:literal,
        $params:ty,
        $handler:path,
        action = $action:literal,
        description = $description:expr $(,)?
    ) => {
        $crate::mcp::registry::ToolDescriptor {
            name: $name,
            description: $description,
            action: $action,
            input_schema: $crate::mcp::registry::schema_for::<$params>(),
            handler: |ctx, args| {
                ::futures_util::FutureExt::boxed(async move {
                    let params: $params = $crate::mcp::registry::parse_params(args)?;
                    $handler(ctx, params).await
                })
            },
            always_registered: false,
        }
    };
}

pub mod comments;
pub mod labels;
pub mod projects;
pub mod sections;
pub mod tasks;
pub mod user;

static CATALOG: LazyLock<Vec<ToolDescriptor>> = LazyLock::new(|| {
    let mut catalog = Vec::new();
    catalog.extend(user::descriptors());
    catalog.extend(projects::descriptors());
    catalog.extend(sections::descriptors());
    catalog.extend(tasks::descriptors());
    catalog.extend(labels::descriptors());
    catalog.extend(comments::descriptors());
    catalog
});

/// Every tool this server knows how to run, registered or not.
pub fn catalog() -> &'static [ToolDescriptor] {
    &CATALOG
}

/// Look up a descriptor in the full catalogue.
pub fn find(name: &str) -> Option<&'static ToolDescriptor> {
    catalog().iter().find(|d| d.name == name)
}

/// Upstream path of one resource, rejecting ids that would not stay inside it.
pub(crate) fn id_path(collection: &str, id: &str) -> ToolResult<String> {
    todoist::resource_path(collection, id).ok_or_else(|| {
        ToolError::InvalidParams(format!("invalid {} id: '{}'", collection, id))
    })
}

/// Request values follow the serde names of these enums.
macro_rules! value_from_serialize {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    // Unit variants always serialize to their name.
                    serde_json::to_value(value).unwrap_or_default()
                }
            }
        )+
    };
}

/// Todoist palette names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    BerryRed,
    Red,
    Orange,
    Yellow,
    OliveGreen,
    LimeGreen,
    Green,
    MintGreen,
    Teal,
    SkyBlue,
    LightBlue,
    Blue,
    Grape,
    Violet,
    Lavender,
    Magenta,
    Salmon,
    Charcoal,
    Grey,
    Taupe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViewStyle {
    List,
    Board,
    Calendar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Minute,
    Day,
}

value_from_serialize!(Color, ViewStyle, DurationUnit);

#[cfg(test)]
mod comments_test;
#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tasks_test;
#[cfg(test)]
mod user_test;
