//! Build phase - derives the semantic model from the descriptor graph.

use std::time::Duration;

use eyre::Result;
use gapic_core::to_kebab_case;
use gapic_descriptor::{
    DescriptorSet, FieldDescriptor, FieldKind, FieldLabel, GeneratorConfig, HttpRule, HttpVerb,
    MethodDescriptor, ServiceConfig, ServiceDescriptor,
};
use gapic_model::{
    ApiInfo, BodyBinding, CallShape, Cardinality, DEFAULT_TIMEOUT, Field, GapicContext,
    GeneratorOptions, HttpBinding, HttpMethod, Message, Method, MethodSignature, OperationInfo,
    PathParam, PathTemplate, PollingSettings, QueryParam, ResourceName, ResourceReference,
    RetrySettings, Service, SignatureArg,
};
use indexmap::IndexMap;

use super::{
    fields::{field_type, resolve_field_path},
    pagination::{Pagination, detect},
};
use crate::pipeline::{CompilationContext, Diagnostic, Phase};

/// Phase that builds the [`GapicContext`].
///
/// Constructs the lints already reported are skipped quietly; only problems
/// that surface while building (unknown resource references, unusable
/// resource patterns) are recorded here.
pub struct BuildPhase;

impl Phase for BuildPhase {
    fn name(&self) -> &'static str {
        "build"
    }

    fn description(&self) -> &'static str {
        "Resolve call shapes, retry and polling settings, HTTP bindings and resource names"
    }

    fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
        let mut builder = ModelBuilder {
            set: &ctx.descriptors,
            service_config: &ctx.service_config,
            config: &ctx.config,
            diagnostics: Vec::new(),
        };
        let model = builder.build();
        let diagnostics = builder.diagnostics;

        ctx.diagnostics.extend(diagnostics);
        ctx.model = Some(model);
        Ok(())
    }
}

struct ModelBuilder<'a> {
    set: &'a DescriptorSet,
    service_config: &'a ServiceConfig,
    config: &'a GeneratorConfig,
    diagnostics: Vec<Diagnostic>,
}

impl ModelBuilder<'_> {
    fn build(&mut self) -> GapicContext {
        let messages = self.messages();
        let resource_names = self.resource_names();
        self.check_resource_references(&resource_names);

        let services: Vec<Service> = self.set.services().map(|s| self.service(s)).collect();
        if services.is_empty() {
            self.diagnostics.push(
                Diagnostic::warning("build", "no services found in the files to generate")
                    .with_rule("no-services"),
            );
        }
        tracing::debug!(
            services = services.len(),
            messages = messages.len(),
            resources = resource_names.len(),
            "model assembled"
        );

        let options = GeneratorOptions {
            transport: self.config.generator.transport.unwrap_or_default(),
            samples: self.config.generator.samples,
            copyright: self.config.generator.copyright.clone(),
        };
        GapicContext::new(
            self.api_info(),
            services,
            messages,
            resource_names,
            options,
        )
    }

    fn api_info(&self) -> ApiInfo {
        let package = self
            .set
            .services()
            .map(|s| s.package.clone())
            .next()
            .or_else(|| self.set.generated_files().map(|f| f.package.clone()).next())
            .unwrap_or_default();
        let crate_name = match &self.config.generator.crate_name {
            Some(name) => name.clone(),
            None if package.is_empty() => "client".to_string(),
            None => to_kebab_case(&package),
        };
        ApiInfo {
            package,
            crate_name,
        }
    }

    fn messages(&self) -> IndexMap<String, Message> {
        self.set
            .messages
            .values()
            .map(|m| {
                let package = self
                    .set
                    .file(&m.file)
                    .map(|f| f.package.clone())
                    .unwrap_or_default();
                let message = Message {
                    full_name: m.full_name.clone(),
                    name: m.name.clone(),
                    package,
                    doc: m.doc.clone(),
                    fields: m.fields.iter().map(field).collect(),
                    resource_type: m.resource.as_ref().map(|r| r.type_name.clone()),
                };
                (m.full_name.clone(), message)
            })
            .collect()
    }

    fn resource_names(&mut self) -> IndexMap<String, ResourceName> {
        let (set, config) = (self.set, self.config);
        let declared = set
            .resources()
            .map(|r| (r.type_name.as_str(), r.patterns.as_slice()));
        let configured = config
            .resources
            .iter()
            .map(|r| (r.type_name.as_str(), r.patterns.as_slice()));

        let mut names: IndexMap<String, ResourceName> = IndexMap::new();
        for (type_name, patterns) in declared.chain(configured) {
            let mut templates = Vec::new();
            for pattern in patterns {
                match PathTemplate::parse(pattern) {
                    Ok(template) if template.is_simple() => templates.push(template),
                    Ok(_) => self.diagnostics.push(
                        Diagnostic::error(
                            "build",
                            format!(
                                "resource pattern '{}' uses wildcards; only literals and \
                                 single-segment variables are allowed",
                                pattern
                            ),
                        )
                        .with_rule("resource-pattern")
                        .at(type_name),
                    ),
                    Err(err) => self.diagnostics.push(
                        Diagnostic::error("build", err.to_string())
                            .with_rule("resource-pattern")
                            .at(type_name),
                    ),
                }
            }

            match names.get_mut(type_name) {
                Some(existing) => {
                    for template in templates {
                        if !existing.patterns.contains(&template) {
                            existing.patterns.push(template);
                        }
                    }
                }
                None if !templates.is_empty() => {
                    names.insert(
                        type_name.to_string(),
                        ResourceName::new(type_name, templates),
                    );
                }
                None => {}
            }
        }
        names
    }

    fn check_resource_references(&mut self, names: &IndexMap<String, ResourceName>) {
        let set = self.set;
        let generated = set
            .messages
            .values()
            .filter(|m| set.files_to_generate.contains(&m.file));
        for message in generated {
            for f in &message.fields {
                let Some(reference) = &f.resource_reference else {
                    continue;
                };
                if reference.type_name == "*" || names.contains_key(&reference.type_name) {
                    continue;
                }
                self.diagnostics.push(
                    Diagnostic::error(
                        "build",
                        format!("unknown resource type '{}'", reference.type_name),
                    )
                    .with_rule("resource-reference")
                    .at(format!("{}.{}", message.full_name, f.name)),
                );
            }
        }
    }

    fn service(&self, service: &ServiceDescriptor) -> Service {
        Service {
            name: service.name.clone(),
            full_name: service.full_name.clone(),
            package: service.package.clone(),
            doc: service.doc.clone(),
            default_host: service.default_host.clone(),
            oauth_scopes: service.oauth_scopes.clone(),
            methods: service
                .methods
                .iter()
                .map(|m| self.method(service, m))
                .collect(),
        }
    }

    fn method(&self, service: &ServiceDescriptor, method: &MethodDescriptor) -> Method {
        let full_name = format!("{}.{}", service.full_name, method.name);

        let operation = method.operation_info.as_ref().map(|info| OperationInfo {
            response_type: info.response_type.clone(),
            metadata_type: info.metadata_type.clone(),
            polling: self.polling(&full_name),
        });
        // Malformed pagination was reported by the pagination-shape lint.
        let pagination = match detect(self.set, method) {
            Pagination::Paged(info) => Some(info),
            Pagination::NotPaged | Pagination::Malformed(_) => None,
        };
        let shape = CallShape::resolve(
            operation,
            pagination,
            method.client_streaming,
            method.server_streaming,
        );

        let signatures = method
            .method_signatures
            .iter()
            .filter(|s| !s.is_empty())
            .filter_map(|s| self.signature(&method.input_type, s))
            .collect();

        Method {
            name: method.name.clone(),
            full_name,
            doc: method.doc.clone(),
            input_type: method.input_type.clone(),
            output_type: method.output_type.clone(),
            shape,
            http: method
                .http
                .as_ref()
                .and_then(|rule| self.http_binding(rule, &method.input_type)),
            signatures,
            retry: self.retry(&service.full_name, &method.name),
        }
    }

    fn polling(&self, method_full_name: &str) -> PollingSettings {
        let mut polling = PollingSettings::default();
        let Some(overrides) = self.config.longrunning.get(method_full_name) else {
            return polling;
        };
        if let Some(ms) = overrides.initial_poll_delay_ms {
            polling.initial_poll_delay = Duration::from_millis(ms);
        }
        if let Some(multiplier) = overrides.poll_delay_multiplier {
            polling.poll_delay_multiplier = multiplier;
        }
        if let Some(ms) = overrides.max_poll_delay_ms {
            polling.max_poll_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = overrides.initial_rpc_timeout_ms {
            polling.initial_rpc_timeout = Duration::from_millis(ms);
        }
        if let Some(multiplier) = overrides.rpc_timeout_multiplier {
            polling.rpc_timeout_multiplier = multiplier;
        }
        if let Some(ms) = overrides.max_rpc_timeout_ms {
            polling.max_rpc_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = overrides.total_poll_timeout_ms {
            polling.total_poll_timeout = Duration::from_millis(ms);
        }
        polling
    }

    fn retry(&self, service: &str, method: &str) -> RetrySettings {
        let Some(entry) = self.service_config.lookup(service, method) else {
            return RetrySettings::default();
        };
        let timeout = entry.timeout.unwrap_or(DEFAULT_TIMEOUT);
        match &entry.retry_policy {
            Some(policy) => RetrySettings::with_backoff(
                policy.retryable_status_codes.clone(),
                policy.initial_backoff,
                policy.backoff_multiplier,
                policy.max_backoff,
                timeout,
            ),
            None => RetrySettings::no_retry(timeout),
        }
    }

    fn signature(&self, request: &str, fields: &[String]) -> Option<MethodSignature> {
        let args = fields
            .iter()
            .map(|path| {
                let field = resolve_field_path(self.set, request, path).ok()?;
                Some(SignatureArg {
                    field: path.clone(),
                    field_type: field_type(&field.kind),
                    repeated: field.is_repeated(),
                    resource_type: field
                        .resource_reference
                        .as_ref()
                        .filter(|r| !r.child && r.type_name != "*")
                        .map(|r| r.type_name.clone()),
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(MethodSignature { args })
    }

    fn http_binding(&self, rule: &HttpRule, request: &str) -> Option<HttpBinding> {
        // Bad templates were reported by the http-binding lint.
        let template = PathTemplate::parse(&rule.path).ok()?;
        let path_params: Vec<PathParam> = template
            .variables()
            .map(|v| PathParam {
                field_path: v.field_path.clone(),
                pattern: v.pattern(),
            })
            .collect();
        let body = match rule.body.as_deref() {
            None | Some("") => BodyBinding::None,
            Some("*") => BodyBinding::Wildcard,
            Some(field) => BodyBinding::Field(field.to_string()),
        };

        let query_params = match (&body, self.set.message(request)) {
            (BodyBinding::Wildcard, _) | (_, None) => Vec::new(),
            (_, Some(message)) => message
                .fields
                .iter()
                .filter(|f| !matches!(f.kind, FieldKind::Message(_) | FieldKind::Map { .. }))
                .filter(|f| !path_params.iter().any(|p| p.field_path == [f.name.as_str()]))
                .filter(|f| body != BodyBinding::Field(f.name.clone()))
                .map(|f| QueryParam {
                    field_name: f.name.clone(),
                    json_name: f.json_name.clone(),
                })
                .collect(),
        };

        Some(HttpBinding {
            method: http_method(rule.verb),
            template,
            body,
            path_params,
            query_params,
        })
    }
}

fn http_method(verb: HttpVerb) -> HttpMethod {
    match verb {
        HttpVerb::Get => HttpMethod::Get,
        HttpVerb::Post => HttpMethod::Post,
        HttpVerb::Put => HttpMethod::Put,
        HttpVerb::Patch => HttpMethod::Patch,
        HttpVerb::Delete => HttpMethod::Delete,
    }
}

fn field(f: &FieldDescriptor) -> Field {
    Field {
        name: f.name.clone(),
        json_name: f.json_name.clone(),
        number: f.number,
        field_type: field_type(&f.kind),
        cardinality: match f.label {
            FieldLabel::Singular => Cardinality::Singular,
            FieldLabel::Optional => Cardinality::Optional,
            FieldLabel::Repeated => Cardinality::Repeated,
        },
        oneof: f.oneof.clone(),
        required: f.is_required(),
        resource_reference: f.resource_reference.as_ref().map(|r| ResourceReference {
            type_name: r.type_name.clone(),
            child: r.child,
        }),
        doc: f.doc.clone(),
    }
}
