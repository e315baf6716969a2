//! Loading the three inputs of a run: protos, service config and `gapic.toml`.

use std::path::{Path, PathBuf};

use gapic_codegen::pipeline::{CompilationContext, Pipeline};
use gapic_core::Transport;
use gapic_descriptor::{
    DescriptorError, DescriptorSet, GeneratorConfig, Loader, Result, ServiceConfig,
};

/// Where the protos named on the command line come from.
#[derive(Debug, Clone, Copy)]
pub enum Protos<'a> {
    /// Compile `.proto` sources found under these include directories.
    Sources(&'a [PathBuf]),
    /// Decode a binary `FileDescriptorSet`.
    DescriptorSet(&'a Path),
}

/// Everything a pipeline run reads.
#[derive(Debug)]
pub struct Inputs {
    pub descriptors: DescriptorSet,
    pub service_config: ServiceConfig,
    pub config: GeneratorConfig,
}

impl Inputs {
    /// Load the `files` to generate; a missing config file means defaults.
    ///
    /// `transport`, when given, replaces the one in `gapic.toml`.
    pub fn load(
        files: &[String],
        protos: Protos<'_>,
        service_config: Option<&Path>,
        config: Option<&Path>,
        transport: Option<Transport>,
    ) -> Result<Self> {
        let descriptors = match protos {
            Protos::Sources(includes) => includes
                .iter()
                .fold(Loader::new(), |loader, dir| loader.include(dir))
                .load(files)?,
            Protos::DescriptorSet(path) => {
                let bytes = std::fs::read(path).map_err(|e| DescriptorError::io(path, e))?;
                Loader::new().load_descriptor_set(&bytes, files)?
            }
        };
        let service_config = match service_config {
            Some(path) => ServiceConfig::from_file(path)?,
            None => ServiceConfig::default(),
        };
        let mut config = match config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(transport) = transport {
            config.generator.transport = Some(transport);
        }
        tracing::debug!(
            files = descriptors.files_to_generate.len(),
            transport = ?config.generator.transport,
            "inputs loaded"
        );
        Ok(Self {
            descriptors,
            service_config,
            config,
        })
    }

    pub fn run(self, pipeline: &Pipeline) -> eyre::Result<CompilationContext> {
        pipeline.run(self.descriptors, self.service_config, self.config)
    }
}
