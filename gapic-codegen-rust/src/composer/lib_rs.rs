//! The crate root: package documentation, module declarations and re-exports.

use gapic_codegen::{
    CompositionError,
    ast::{CompilationUnit, Item, Module, ReExport, Symbol, Visibility},
};
use gapic_model::{CallShape, GapicContext, Service};

use super::{Composer, ComposerOptions};
use crate::{
    naming::{ServiceNames, method_name},
    type_mapper::RustTypeMapper,
};

pub(crate) struct LibComposer;

impl Composer for LibComposer {
    fn name(&self) -> &'static str {
        "lib"
    }

    fn compose(
        &self,
        ctx: &GapicContext,
        options: &ComposerOptions,
    ) -> Result<Vec<CompilationUnit>, CompositionError> {
        let mut modules = Vec::new();
        let mut exports = Vec::new();
        for service in ctx.services() {
            let names = ServiceNames::new(service);
            modules.push(module(&names.client_module, None));
            modules.push(module(&names.settings_module, None));
            exports.push(re_export(&names.client_module, &names.client));
            exports.push(re_export(&names.settings_module, &names.settings));
        }
        modules.push(module("model", Some("Messages and enums, generated by `prost-build`.")));
        if !ctx.resource_names().is_empty() {
            modules.push(module("resources", None));
        }
        modules.push(module("stub", None));

        let unit = CompilationUnit::new("src/lib.rs", ["crate"])
            .doc(package_doc(ctx, options))
            .items(modules)
            .items(exports);
        Ok(vec![unit])
    }
}

fn module(name: &str, doc: Option<&str>) -> Item {
    Item::Module(Module {
        name: name.to_string(),
        doc: doc.map(str::to_string),
        visibility: Visibility::Public,
    })
}

fn re_export(module: &str, name: &str) -> Item {
    Item::ReExport(ReExport {
        visibility: Visibility::Public,
        symbol: Symbol::new([module], name),
    })
}

fn package_doc(ctx: &GapicContext, options: &ComposerOptions) -> String {
    let mut doc = format!("Client library for the `{}` API.\n", ctx.api().package);
    for service in ctx.services() {
        let names = ServiceNames::new(service);
        doc.push_str(&format!("\n# [`{}`]\n", names.client));
        let description = service.doc.as_deref().map(str::trim).unwrap_or_default();
        if !description.is_empty() {
            doc.push('\n');
            doc.push_str(description);
            doc.push('\n');
        }
        if let Some(usage) = usage(ctx, service, &names, options) {
            doc.push('\n');
            doc.push_str(&usage);
        }
    }
    doc
}

/// A doctest calling the first unary method of `service` with a default request.
fn usage(
    ctx: &GapicContext,
    service: &Service,
    names: &ServiceNames,
    options: &ComposerOptions,
) -> Option<String> {
    let method = service
        .methods
        .iter()
        .find(|method| matches!(method.shape, CallShape::Unary))?;
    let request = RustTypeMapper::external(ctx).message_symbol(&method.input_type)?;
    let (constructor, channel) = if options.transport.has_grpc() {
        ("grpc", "GrpcChannel")
    } else {
        ("http_json", "HttpChannel")
    };
    let krate = ctx.api().crate_ident();
    Some(format!(
        "```no_run\n\
         # use std::sync::Arc;\n\
         # fn sample(channel: Arc<dyn gapic_gax::{channel}>) -> gapic_gax::Result<()> {{\n\
         use {krate}::{client};\n\
         use {request_path};\n\
         \n\
         let client = {client}::{constructor}(channel);\n\
         let response = client.{method}({request}::default())?;\n\
         println!(\"{{response:?}}\");\n\
         # Ok(())\n\
         # }}\n\
         ```\n",
        client = names.client,
        request = request.name,
        request_path = request.qualified(),
        method = method_name(method),
    ))
}
