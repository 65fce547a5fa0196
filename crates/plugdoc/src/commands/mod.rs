//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod dependencies;
pub(crate) mod goal_prefix;
pub(crate) mod sources;

pub(crate) use convert::ConvertArgs;
pub(crate) use goal_prefix::GoalPrefixArgs;
pub(crate) use sources::SourcesArgs;
