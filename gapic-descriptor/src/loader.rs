//! Loading protos into a validated [`DescriptorSet`].
//!
//! `.proto` sources are compiled with `protox`, or a prebuilt descriptor set
//! is decoded, into a `prost_reflect::DescriptorPool`. The pool takes care of
//! syntax, imports and name resolution. This module reads the API annotations
//! off the pool's options and enforces the rules protobuf itself does not.

use std::path::{Path, PathBuf};

use gapic_core::ScalarType;
use indexmap::IndexMap;
use miette::SourceSpan;
use prost_reflect::{self as reflect, DescriptorPool, DynamicMessage, ExtensionDescriptor, Kind};
use prost_types::field_descriptor_proto::Label;
use protox::file::{ChainFileResolver, File, FileResolver, GoogleFileResolver, IncludeFileResolver};

use crate::{
    annotations::{self, http_rule::Pattern},
    builtin,
    descriptor::{
        DescriptorSet, EnumDescriptor, FieldBehavior, FieldDescriptor, FieldKind, FieldLabel,
        FileDescriptor, HttpRule, HttpVerb, MessageDescriptor, MethodDescriptor, OPERATION_TYPE,
        OperationInfo, ResourceDescriptor, ResourceReference, ServiceDescriptor,
    },
    error::{DescriptorError, Result, SourceContext},
};

const HTTP: &str = "google.api.http";
const METHOD_SIGNATURE: &str = "google.api.method_signature";
const OPERATION_INFO: &str = "google.longrunning.operation_info";
const DEFAULT_HOST: &str = "google.api.default_host";
const OAUTH_SCOPES: &str = "google.api.oauth_scopes";
const RESOURCE: &str = "google.api.resource";
const RESOURCE_DEFINITION: &str = "google.api.resource_definition";
const RESOURCE_REFERENCE: &str = "google.api.resource_reference";
const FIELD_BEHAVIOR: &str = "google.api.field_behavior";

/// Loads proto files from in-memory sources, built-in annotation files and
/// include directories, in that order of precedence.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    include_dirs: Vec<PathBuf>,
    sources: IndexMap<String, String>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory imports are resolved against.
    pub fn include(mut self, dir: impl Into<PathBuf>) -> Self {
        self.include_dirs.push(dir.into());
        self
    }

    /// Register an in-memory file under its import name.
    pub fn source(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.sources.insert(name.into(), content.into());
        self
    }

    /// Compile `files` and their transitive imports.
    ///
    /// Only services declared in `files` are generated; imports contribute
    /// types and resource definitions.
    pub fn load<S: AsRef<str>>(&self, files: &[S]) -> Result<DescriptorSet> {
        let names: Vec<&str> = files.iter().map(|f| f.as_ref()).collect();
        let mut compiler = protox::Compiler::with_file_resolver(self.resolver());
        compiler.include_imports(true).include_source_info(true);
        compiler
            .open_files(names.iter().copied())
            .map_err(|e| Box::new(DescriptorError::from(e)))?;
        let pool = compiler.descriptor_pool();
        tracing::debug!(files = pool.files().len(), "compiled protos");
        self.collect(&pool, &names)
    }

    /// Load `files` out of an encoded `FileDescriptorSet`, such as the output
    /// of `protoc --include_imports --include_source_info -o`.
    pub fn load_descriptor_set<S: AsRef<str>>(
        &self,
        bytes: &[u8],
        files: &[S],
    ) -> Result<DescriptorSet> {
        let names: Vec<&str> = files.iter().map(|f| f.as_ref()).collect();
        let pool = DescriptorPool::decode(bytes).map_err(|e| Box::new(DescriptorError::from(e)))?;
        if let Some(missing) = names.iter().find(|name| pool.get_file_by_name(name).is_none()) {
            return Err(Box::new(DescriptorError::FileNotFound {
                name: missing.to_string(),
            }));
        }
        tracing::debug!(files = pool.files().len(), "decoded descriptor set");
        self.collect(&pool, &names)
    }

    pub(crate) fn resolver(&self) -> SourceResolver {
        let mut fallback = ChainFileResolver::new();
        if self.include_dirs.is_empty() {
            fallback.add(IncludeFileResolver::new(PathBuf::from(".")));
        }
        for dir in &self.include_dirs {
            fallback.add(IncludeFileResolver::new(dir.clone()));
        }
        fallback.add(GoogleFileResolver::new());
        SourceResolver {
            sources: self.sources.clone(),
            fallback,
        }
    }

    /// Source text of `name`, for pointing errors into it.
    fn source_text(&self, name: &str) -> String {
        if let Some(src) = in_memory(&self.sources, name) {
            return src.to_string();
        }
        self.include_dirs
            .iter()
            .find_map(|dir| std::fs::read_to_string(dir.join(name)).ok())
            .unwrap_or_default()
    }

    fn collect(&self, pool: &DescriptorPool, files: &[&str]) -> Result<DescriptorSet> {
        let collector = Collector {
            loader: self,
            pool,
            extensions: Extensions::new(pool),
        };
        let mut set = DescriptorSet {
            files_to_generate: files.iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        };
        for file in pool.files() {
            collector.file(&file, &mut set)?;
        }
        tracing::debug!(
            files = set.files.len(),
            messages = set.messages.len(),
            enums = set.enums.len(),
            "loaded descriptors"
        );
        Ok(set)
    }
}

fn in_memory<'a>(sources: &'a IndexMap<String, String>, name: &str) -> Option<&'a str> {
    sources
        .get(name)
        .map(String::as_str)
        .or_else(|| builtin::source(name))
}

/// Resolves in-memory sources, then the built-in annotation files, then the
/// include directories and the compiler's own `google/protobuf` files.
pub(crate) struct SourceResolver {
    sources: IndexMap<String, String>,
    fallback: ChainFileResolver,
}

impl FileResolver for SourceResolver {
    fn resolve_path(&self, path: &Path) -> Option<String> {
        match path.to_str() {
            Some(name) if in_memory(&self.sources, name).is_some() => Some(name.to_string()),
            _ => self.fallback.resolve_path(path),
        }
    }

    fn open_file(&self, name: &str) -> std::result::Result<File, protox::Error> {
        match in_memory(&self.sources, name) {
            Some(src) => File::from_source(name, src),
            None => self.fallback.open_file(name),
        }
    }
}

/// The annotation extensions the pool knows about.
///
/// A descriptor set compiled without the annotation files simply has none.
struct Extensions {
    http: Option<ExtensionDescriptor>,
    method_signature: Option<ExtensionDescriptor>,
    operation_info: Option<ExtensionDescriptor>,
    default_host: Option<ExtensionDescriptor>,
    oauth_scopes: Option<ExtensionDescriptor>,
    resource: Option<ExtensionDescriptor>,
    resource_definition: Option<ExtensionDescriptor>,
    resource_reference: Option<ExtensionDescriptor>,
    field_behavior: Option<ExtensionDescriptor>,
}

impl Extensions {
    fn new(pool: &DescriptorPool) -> Self {
        let get = |name: &str| pool.get_extension_by_name(name);
        Self {
            http: get(HTTP),
            method_signature: get(METHOD_SIGNATURE),
            operation_info: get(OPERATION_INFO),
            default_host: get(DEFAULT_HOST),
            oauth_scopes: get(OAUTH_SCOPES),
            resource: get(RESOURCE),
            resource_definition: get(RESOURCE_DEFINITION),
            resource_reference: get(RESOURCE_REFERENCE),
            field_behavior: get(FIELD_BEHAVIOR),
        }
    }
}

/// Where a descriptor was declared, for error labels.
#[derive(Clone, Copy)]
struct Site<'a> {
    file: &'a reflect::FileDescriptor,
    path: &'a [i32],
}

struct Collector<'a> {
    loader: &'a Loader,
    pool: &'a DescriptorPool,
    extensions: Extensions,
}

impl Collector<'_> {
    fn file(&self, file: &reflect::FileDescriptor, set: &mut DescriptorSet) -> Result<()> {
        for message in file.messages() {
            self.message(file, &message, set)?;
        }
        for decl in file.enums() {
            self.enumeration(file, &decl, set);
        }

        let site = Site { file, path: &[] };
        let resource_definitions = self
            .decode::<annotations::ResourceDescriptor>(
                &file.options(),
                &self.extensions.resource_definition,
                site,
            )?
            .into_iter()
            .map(|resource| self.resource(resource, RESOURCE_DEFINITION, site))
            .collect::<Result<Vec<_>>>()?;

        let services = file
            .services()
            .map(|service| self.service(file, &service))
            .collect::<Result<Vec<_>>>()?;

        set.files.push(FileDescriptor {
            name: file.name().to_string(),
            package: file.package_name().to_string(),
            imports: file.file_descriptor_proto().dependency.clone(),
            services,
            resource_definitions,
        });
        Ok(())
    }

    fn message(
        &self,
        file: &reflect::FileDescriptor,
        message: &reflect::MessageDescriptor,
        set: &mut DescriptorSet,
    ) -> Result<()> {
        if message.is_map_entry() {
            return Ok(());
        }
        let fields = message
            .fields()
            .map(|field| self.field(file, &field))
            .collect::<Result<Vec<_>>>()?;

        let site = Site {
            file,
            path: message.path(),
        };
        let resource = match self
            .decode::<annotations::ResourceDescriptor>(
                &message.options(),
                &self.extensions.resource,
                site,
            )?
            .pop()
        {
            Some(resource) => Some(self.resource(resource, RESOURCE, site)?),
            None => None,
        };

        set.messages.insert(
            message.full_name().to_string(),
            MessageDescriptor {
                full_name: message.full_name().to_string(),
                name: message.name().to_string(),
                file: file.name().to_string(),
                doc: doc(file, message.path()),
                fields,
                resource,
            },
        );
        for nested in message.child_messages() {
            self.message(file, &nested, set)?;
        }
        for nested in message.child_enums() {
            self.enumeration(file, &nested, set);
        }
        Ok(())
    }

    fn enumeration(
        &self,
        file: &reflect::FileDescriptor,
        decl: &reflect::EnumDescriptor,
        set: &mut DescriptorSet,
    ) {
        set.enums.insert(
            decl.full_name().to_string(),
            EnumDescriptor {
                full_name: decl.full_name().to_string(),
                name: decl.name().to_string(),
                file: file.name().to_string(),
                doc: doc(file, decl.path()),
                values: decl
                    .values()
                    .map(|value| (value.name().to_string(), value.number()))
                    .collect(),
            },
        );
    }

    fn field(
        &self,
        file: &reflect::FileDescriptor,
        field: &reflect::FieldDescriptor,
    ) -> Result<FieldDescriptor> {
        let site = Site {
            file,
            path: field.path(),
        };
        let kind = match field.kind() {
            Kind::Message(entry) if field.is_map() => {
                let FieldKind::Scalar(key) = field_kind(entry.map_entry_key_field().kind()) else {
                    return Err(self.invalid_option(
                        site,
                        field.full_name(),
                        "map keys must be scalars",
                    ));
                };
                FieldKind::Map {
                    key,
                    value: Box::new(field_kind(entry.map_entry_value_field().kind())),
                }
            }
            kind => field_kind(kind),
        };

        let proto = field.field_descriptor_proto();
        let proto2 = matches!(file.file_descriptor_proto().syntax(), "" | "proto2");
        let label = if field.is_list() {
            FieldLabel::Repeated
        } else if proto.proto3_optional() || (proto2 && proto.label() == Label::Optional) {
            FieldLabel::Optional
        } else {
            FieldLabel::Singular
        };

        let options = field.options();
        let mut behaviors = Vec::new();
        if let Some(ext) = &self.extensions.field_behavior {
            for name in annotations::enum_names(&options, ext) {
                match FieldBehavior::from_name(&name) {
                    Some(behavior) if !behaviors.contains(&behavior) => behaviors.push(behavior),
                    Some(_) => {}
                    None => {
                        tracing::debug!(field = field.full_name(), %name, "ignoring field behavior")
                    }
                }
            }
        }

        let resource_reference = match self
            .decode::<annotations::ResourceReference>(
                &options,
                &self.extensions.resource_reference,
                site,
            )?
            .pop()
        {
            Some(reference) => Some(self.resource_reference(reference, site)?),
            None => None,
        };

        Ok(FieldDescriptor {
            name: field.name().to_string(),
            number: i32::try_from(field.number()).unwrap_or(i32::MAX),
            json_name: field.json_name().to_string(),
            label,
            kind,
            oneof: field
                .containing_oneof()
                .filter(|oneof| !oneof.is_synthetic())
                .map(|oneof| oneof.name().to_string()),
            behaviors,
            resource_reference,
            doc: doc(file, field.path()),
        })
    }

    fn service(
        &self,
        file: &reflect::FileDescriptor,
        service: &reflect::ServiceDescriptor,
    ) -> Result<ServiceDescriptor> {
        let options = service.options();
        let default_host = self.strings(&options, &self.extensions.default_host).pop();
        let oauth_scopes = self
            .strings(&options, &self.extensions.oauth_scopes)
            .pop()
            .map(|scopes| split_list(&scopes))
            .unwrap_or_default();

        let methods = service
            .methods()
            .map(|method| self.method(file, &method))
            .collect::<Result<Vec<_>>>()?;

        Ok(ServiceDescriptor {
            name: service.name().to_string(),
            full_name: service.full_name().to_string(),
            file: file.name().to_string(),
            package: file.package_name().to_string(),
            doc: doc(file, service.path()),
            default_host,
            oauth_scopes,
            methods,
        })
    }

    fn method(
        &self,
        file: &reflect::FileDescriptor,
        method: &reflect::MethodDescriptor,
    ) -> Result<MethodDescriptor> {
        let site = Site {
            file,
            path: method.path(),
        };
        let options = method.options();
        let output_type = method.output().full_name().to_string();

        let http = match self
            .decode::<annotations::HttpRule>(&options, &self.extensions.http, site)?
            .pop()
        {
            Some(rule) => Some(self.http_rule(rule, site)?),
            None => None,
        };

        let method_signatures = self
            .strings(&options, &self.extensions.method_signature)
            .iter()
            .map(|signature| split_list(signature))
            .collect();

        let operation_info = match self
            .decode::<annotations::OperationInfo>(&options, &self.extensions.operation_info, site)?
            .pop()
        {
            Some(info) => Some(self.operation_info(info, file.package_name(), method, site)?),
            None if output_type == OPERATION_TYPE => {
                let (ctx, span) = self.locate(site);
                return Err(ctx.missing_extension(
                    method.full_name(),
                    OPERATION_INFO,
                    "methods returning google.longrunning.Operation must declare the \
                     response and metadata types of the operation",
                    span,
                ));
            }
            None => None,
        };

        Ok(MethodDescriptor {
            name: method.name().to_string(),
            doc: doc(file, method.path()),
            input_type: method.input().full_name().to_string(),
            output_type,
            client_streaming: method.is_client_streaming(),
            server_streaming: method.is_server_streaming(),
            http,
            method_signatures,
            operation_info,
        })
    }

    fn operation_info(
        &self,
        info: annotations::OperationInfo,
        package: &str,
        method: &reflect::MethodDescriptor,
        site: Site<'_>,
    ) -> Result<OperationInfo> {
        let resolve = |key: &str, name: &str| {
            if name.is_empty() {
                return Err(self.invalid_option(site, OPERATION_INFO, format!("missing '{key}'")));
            }
            self.resolve_message(name, package).ok_or_else(|| {
                let (ctx, span) = self.locate(site);
                ctx.unresolved_type(
                    name,
                    format!("{key} of method '{}'", method.full_name()),
                    span,
                )
            })
        };
        Ok(OperationInfo {
            response_type: resolve("response_type", &info.response_type)?,
            metadata_type: resolve("metadata_type", &info.metadata_type)?,
        })
    }

    /// Resolve a message name written inside `scope`, innermost scope first.
    fn resolve_message(&self, name: &str, scope: &str) -> Option<String> {
        if let Some(absolute) = name.strip_prefix('.') {
            return self
                .pool
                .get_message_by_name(absolute)
                .map(|m| m.full_name().to_string());
        }
        let mut scope = scope;
        loop {
            let candidate = qualify(scope, name);
            if let Some(message) = self.pool.get_message_by_name(&candidate) {
                return Some(message.full_name().to_string());
            }
            if scope.is_empty() {
                return None;
            }
            scope = scope.rsplit_once('.').map_or("", |(parent, _)| parent);
        }
    }

    fn http_rule(&self, rule: annotations::HttpRule, site: Site<'_>) -> Result<HttpRule> {
        let (verb, path) = match rule.pattern {
            Some(Pattern::Get(path)) => (HttpVerb::Get, path),
            Some(Pattern::Put(path)) => (HttpVerb::Put, path),
            Some(Pattern::Post(path)) => (HttpVerb::Post, path),
            Some(Pattern::Delete(path)) => (HttpVerb::Delete, path),
            Some(Pattern::Patch(path)) => (HttpVerb::Patch, path),
            Some(Pattern::Custom(custom)) => {
                let kind = custom.kind.to_ascii_lowercase();
                let Some(verb) = HttpVerb::from_key(&kind) else {
                    return Err(self.invalid_option(
                        site,
                        HTTP,
                        format!("unsupported custom verb '{kind}'"),
                    ));
                };
                (verb, custom.path)
            }
            None => {
                return Err(self.invalid_option(site, HTTP, "no HTTP verb and path pattern"));
            }
        };

        let additional_bindings = rule
            .additional_bindings
            .into_iter()
            .map(|nested| self.http_rule(nested, site))
            .collect::<Result<Vec<_>>>()?;

        Ok(HttpRule {
            verb,
            path,
            body: non_empty(rule.body),
            response_body: non_empty(rule.response_body),
            additional_bindings,
        })
    }

    fn resource(
        &self,
        resource: annotations::ResourceDescriptor,
        option: &str,
        site: Site<'_>,
    ) -> Result<ResourceDescriptor> {
        let type_name = resource.r#type;
        if type_name.is_empty() {
            return Err(self.invalid_option(site, option, "missing resource 'type'"));
        }
        if !type_name.contains('/') {
            return Err(self.invalid_option(
                site,
                option,
                format!("resource type '{type_name}' must look like 'service/Kind'"),
            ));
        }
        Ok(ResourceDescriptor {
            type_name,
            patterns: resource.pattern,
            name_field: non_empty(resource.name_field),
            plural: non_empty(resource.plural),
            singular: non_empty(resource.singular),
        })
    }

    fn resource_reference(
        &self,
        reference: annotations::ResourceReference,
        site: Site<'_>,
    ) -> Result<ResourceReference> {
        if !reference.r#type.is_empty() {
            return Ok(ResourceReference {
                type_name: reference.r#type,
                child: false,
            });
        }
        if !reference.child_type.is_empty() {
            return Ok(ResourceReference {
                type_name: reference.child_type,
                child: true,
            });
        }
        Err(self.invalid_option(site, RESOURCE_REFERENCE, "expected 'type' or 'child_type'"))
    }

    fn strings(&self, options: &DynamicMessage, ext: &Option<ExtensionDescriptor>) -> Vec<String> {
        ext.as_ref()
            .map(|ext| annotations::strings(options, ext))
            .unwrap_or_default()
    }

    fn decode<T: prost::Message + Default>(
        &self,
        options: &DynamicMessage,
        ext: &Option<ExtensionDescriptor>,
        site: Site<'_>,
    ) -> Result<Vec<T>> {
        let Some(ext) = ext else {
            return Ok(Vec::new());
        };
        annotations::decode_messages(options, ext)
            .map_err(|e| self.invalid_option(site, ext.full_name(), e.to_string()))
    }

    fn invalid_option(
        &self,
        site: Site<'_>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Box<DescriptorError> {
        let (ctx, span) = self.locate(site);
        ctx.invalid_option(name, message, span)
    }

    fn locate(&self, site: Site<'_>) -> (SourceContext, SourceSpan) {
        let name = site.file.name();
        let ctx = SourceContext::new(self.loader.source_text(name), name);
        let span = location(site.file, site.path)
            .map(|location| ctx.span_of(&location.span))
            .unwrap_or_else(|| SourceSpan::from((0, 0)));
        (ctx, span)
    }
}

fn location<'a>(
    file: &'a reflect::FileDescriptor,
    path: &[i32],
) -> Option<&'a prost_types::source_code_info::Location> {
    file.file_descriptor_proto()
        .source_code_info
        .as_ref()?
        .location
        .iter()
        .find(|location| location.path == path)
}

/// Leading comment of the element at `path`, one space of indent removed.
fn doc(file: &reflect::FileDescriptor, path: &[i32]) -> Option<String> {
    let comments = location(file, path)?.leading_comments.as_deref()?;
    let lines: Vec<&str> = comments
        .lines()
        .map(|line| line.strip_prefix(' ').unwrap_or(line).trim_end())
        .collect();
    let doc = lines.join("\n");
    let doc = doc.trim_matches('\n');
    (!doc.is_empty()).then(|| doc.to_string())
}

fn field_kind(kind: Kind) -> FieldKind {
    let scalar = match kind {
        Kind::Message(message) => return FieldKind::Message(message.full_name().to_string()),
        Kind::Enum(decl) => return FieldKind::Enum(decl.full_name().to_string()),
        Kind::Double => ScalarType::Double,
        Kind::Float => ScalarType::Float,
        Kind::Int32 => ScalarType::Int32,
        Kind::Int64 => ScalarType::Int64,
        Kind::Uint32 => ScalarType::Uint32,
        Kind::Uint64 => ScalarType::Uint64,
        Kind::Sint32 => ScalarType::Sint32,
        Kind::Sint64 => ScalarType::Sint64,
        Kind::Fixed32 => ScalarType::Fixed32,
        Kind::Fixed64 => ScalarType::Fixed64,
        Kind::Sfixed32 => ScalarType::Sfixed32,
        Kind::Sfixed64 => ScalarType::Sfixed64,
        Kind::Bool => ScalarType::Bool,
        Kind::String => ScalarType::String,
        Kind::Bytes => ScalarType::Bytes,
    };
    FieldKind::Scalar(scalar)
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}
