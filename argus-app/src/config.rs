mod alias;
mod alias_by_tag;
mod input;

use argus_core::config::Configuration;
use argus_transform::{Function, TransformFactory};
use eyre::{bail, WrapErr};
use serde::Deserialize;
use toml::value::Table;

pub use input::InputConfig;

use crate::config::{alias::AliasConfig, alias_by_tag::AliasByTagConfig};

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub transforms: Vec<TransformDefinition>,
}

impl Config {
    pub fn parse(source: &str) -> eyre::Result<Self> {
        toml::from_str(source).wrap_err("Error when parsing configuration")
    }

    pub fn build(self) -> eyre::Result<Configuration> {
        let factory = TransformFactory::new();
        let mut config = Configuration::default();

        for (index, mut definition) in self.transforms.into_iter().enumerate() {
            let function = match definition.function.parse::<Function>() {
                Ok(function) => function,
                Err(_) => bail!("Unknown transform '{}'", definition.function),
            };

            let name = definition
                .name
                .clone()
                .unwrap_or_else(|| format!("{}#{}", function, index));

            let constants = match (function, definition.constants.take()) {
                (_, Some(constants)) => {
                    if !definition.params.is_empty() {
                        bail!(
                            "Transform '{}' takes either 'constants' or function parameters, not both",
                            name
                        );
                    }

                    Some(constants)
                }

                (Function::Identity, None) => {
                    if !definition.params.is_empty() {
                        bail!("Transform '{}' doesn't take any parameter", name);
                    }

                    None
                }

                (Function::Alias, None) => definition
                    .parse_params::<AliasConfig>()
                    .wrap_err_with(|| format!("Invalid parameters for transform '{}'", name))?
                    .into_constants(),

                (Function::AliasByTag, None) => definition
                    .parse_params::<AliasByTagConfig>()
                    .wrap_err_with(|| format!("Invalid parameters for transform '{}'", name))?
                    .into_constants(),
            };

            tracing::debug!(
                target = "config",
                "Registering transform '{}' ({}) with constants {:?}",
                name,
                function,
                constants
            );

            config.push_transform(name, constants, factory.create(function));
        }

        Ok(config)
    }
}

#[derive(Deserialize, Debug)]
pub struct TransformDefinition {
    pub function: String,
    pub name: Option<String>,
    /// Raw constants handed to the transform as is.
    pub constants: Option<Vec<String>>,
    /// Function specific keys, e.g. `tags` for ALIASBYTAG or `metric` and
    /// `scope` for ALIAS. Only read when `constants` isn't set.
    #[serde(flatten)]
    pub params: Table,
}

impl TransformDefinition {
    pub fn parse_params<'de, P>(self) -> eyre::Result<P>
    where
        P: Deserialize<'de>,
    {
        toml::Value::Table(self.params)
            .try_into()
            .wrap_err("Error when parsing params")
    }
}
