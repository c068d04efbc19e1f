use std::{fmt, str::FromStr};

use argus_core::{Transform, TransformError};

use crate::transformers::{Alias, AliasByTag, Identity};

/// The supported transform functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Identity,
    Alias,
    AliasByTag,
}

impl Function {
    pub fn all() -> &'static [Function] {
        &[Function::Identity, Function::Alias, Function::AliasByTag]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Function::Identity => "IDENTITY",
            Function::Alias => "ALIAS",
            Function::AliasByTag => "ALIASBYTAG",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Function::Identity => "Performs an identity transform such that input = output",
            Function::Alias => "Transforms the name of one or more metrics/scopes.",
            Function::AliasByTag => {
                "Sets the display name for the metric. It uses the provided tag keys to get the values for those tags and joins them to set the display name."
            }
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Function {
    type Err = TransformError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Function::all()
            .iter()
            .copied()
            .find(|function| function.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| {
                TransformError::invalid_argument(format!("Unknown transform function '{}'", name))
            })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TransformFactory;

impl TransformFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn get_transform(
        &self,
        function_name: &str,
    ) -> Result<Box<dyn Transform + Send + Sync + 'static>, TransformError> {
        let function = function_name.parse::<Function>()?;

        Ok(self.create(function))
    }

    pub fn create(&self, function: Function) -> Box<dyn Transform + Send + Sync + 'static> {
        match function {
            Function::Identity => Box::new(Identity),
            Function::Alias => Box::new(Alias::new()),
            Function::AliasByTag => Box::new(AliasByTag::new()),
        }
    }
}
