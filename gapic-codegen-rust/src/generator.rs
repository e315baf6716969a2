use std::thread;

use gapic_codegen::{CompositionError, Error, ast::CompilationUnit, language::LanguageCodegen};
use gapic_core::File;
use gapic_model::GapicContext;

use crate::{
    composer::{Composer, ComposerOptions, composers},
    writer::RustWriter,
};

/// Rust code generator that produces a client library crate.
pub struct Generator {
    composers: Vec<Box<dyn Composer>>,
    parallel: bool,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageCodegen for Generator {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn render(&self, ctx: &GapicContext) -> Result<Vec<File>, Error> {
        let units = self.compose(ctx)?;
        let writer = RustWriter::new().with_copyright(ctx.options().copyright.clone());
        let mut files = Vec::with_capacity(units.len());
        for unit in &units {
            let file = writer.write(unit)?;
            tracing::debug!(path = %unit.path, bytes = file.content().len(), "rendered unit");
            files.push(file);
        }
        Ok(files)
    }
}

impl Generator {
    pub fn new() -> Self {
        Self {
            composers: composers(),
            parallel: true,
        }
    }

    /// Run composers one after another on the calling thread.
    pub fn sequential(self) -> Self {
        Self {
            parallel: false,
            ..self
        }
    }

    /// Every compilation unit for `ctx`, in composer order.
    ///
    /// Composers only read the context, so they run on scoped threads unless
    /// [`Generator::sequential`] was asked for. The output is the same either way.
    pub fn compose(&self, ctx: &GapicContext) -> Result<Vec<CompilationUnit>, CompositionError> {
        let options = ComposerOptions::from_context(ctx);
        let results = if self.parallel {
            thread::scope(|scope| {
                let handles: Vec<_> = self
                    .composers
                    .iter()
                    .map(|composer| scope.spawn(move || run(composer.as_ref(), ctx, &options)))
                    .collect();
                handles
                    .into_iter()
                    .map(|handle| {
                        handle
                            .join()
                            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                    })
                    .collect::<Vec<_>>()
            })
        } else {
            self.composers
                .iter()
                .map(|composer| run(composer.as_ref(), ctx, &options))
                .collect()
        };

        let mut units = Vec::new();
        for result in results {
            units.extend(result?);
        }
        tracing::info!(units = units.len(), api = %ctx.api().package, "composed");
        Ok(units)
    }
}

fn run(
    composer: &dyn Composer,
    ctx: &GapicContext,
    options: &ComposerOptions,
) -> Result<Vec<CompilationUnit>, CompositionError> {
    let units = composer.compose(ctx, options)?;
    tracing::debug!(composer = composer.name(), units = units.len(), "composer finished");
    Ok(units)
}

#[cfg(test)]
mod tests {
    use gapic_codegen::testing;
    use gapic_core::Transport;
    use gapic_descriptor::{GeneratorConfig, GeneratorSection, ServiceConfig};

    use super::*;

    fn paths(files: &[File]) -> Vec<String> {
        files.iter().map(|file| file.path().display().to_string()).collect()
    }

    #[test]
    fn test_echo_layout() {
        let files = Generator::new().render(&testing::echo_model()).unwrap();
        let paths = paths(&files);
        assert_eq!(
            paths[..7],
            [
                "src/lib.rs",
                "src/echo_settings.rs",
                "src/stub/mod.rs",
                "src/stub/echo_stub.rs",
                "src/stub/grpc_echo_stub.rs",
                "src/stub/http_json_echo_stub.rs",
                "src/echo_client.rs",
            ]
        );
        assert!(paths[7..].iter().all(|path| path.starts_with("samples/echo_client/")));
        assert!(paths.contains(&"samples/echo_client/echo.rs".to_string()));
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let model = testing::library_model();
        let parallel = Generator::new().render(&model).unwrap();
        let sequential = Generator::new().sequential().render(&model).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_copyright_and_transport_from_config() {
        let config = GeneratorConfig {
            generator: GeneratorSection {
                transport: Some(Transport::Grpc),
                samples: false,
                copyright: Some("Copyright 2026 Example LLC".to_string()),
                ..GeneratorSection::default()
            },
            ..GeneratorConfig::default()
        };
        let model = testing::model(testing::LIBRARY_PROTO, ServiceConfig::default(), config);
        let files = Generator::new().render(&model).unwrap();
        let paths = paths(&files);
        assert!(!paths.iter().any(|path| path.starts_with("samples/")));
        assert!(!paths.iter().any(|path| path.contains("http_json")));
        assert!(
            files
                .iter()
                .all(|file| file.content().starts_with("// Copyright 2026 Example LLC\n\n"))
        );
    }
}
