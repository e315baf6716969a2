//! Per-service call settings: endpoint, scopes and one retry policy per method.

use std::time::Duration;

use gapic_codegen::{
    CompositionError,
    ast::{
        Block, Class, ClassKind, CompilationUnit, Const, Expr, FieldDecl, Impl, Item, MethodDecl,
        Pattern, Symbol, TypeRef, Visibility,
    },
};
use gapic_model::{CallShape, GapicContext, PollingSettings, RetrySettings, Service};

use super::{Composer, ComposerOptions};
use crate::naming::{ServiceNames, method_name};

pub(crate) struct SettingsComposer;

impl Composer for SettingsComposer {
    fn name(&self) -> &'static str {
        "settings"
    }

    fn compose(
        &self,
        ctx: &GapicContext,
        _options: &ComposerOptions,
    ) -> Result<Vec<CompilationUnit>, CompositionError> {
        Ok(ctx.services().iter().map(settings_unit).collect())
    }
}

fn gax(name: &str) -> TypeRef {
    TypeRef::named(Symbol::new(["gapic_gax"], name))
}

fn millis(duration: Duration) -> Expr {
    let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    Expr::assoc_call(TypeRef::path("std::time::Duration"), "from_millis", vec![Expr::uint(millis)])
}

fn settings_unit(service: &Service) -> CompilationUnit {
    let names = ServiceNames::new(service);
    let client_link = format!("crate::{}::{}", names.client_module, names.client);

    let endpoint = Const {
        name: "DEFAULT_ENDPOINT".to_string(),
        doc: Some(format!("The host [`{}`]({client_link}) talks to by default.", names.client)),
        visibility: Visibility::Public,
        ty: TypeRef::str_ref(),
        value: Expr::str(service.default_host.clone().unwrap_or_default()),
    };
    let scopes = Const {
        name: "DEFAULT_SCOPES".to_string(),
        doc: Some("OAuth scopes requested by default.".to_string()),
        visibility: Visibility::Public,
        ty: TypeRef::reference(TypeRef::Slice(Box::new(TypeRef::str_ref()))),
        value: Expr::Array(service.oauth_scopes.iter().map(Expr::str).collect()).by_ref(),
    };

    let mut fields = vec![
        FieldDecl::new("endpoint", TypeRef::string())
            .doc("The service host, with an optional port."),
        FieldDecl::new("scopes", TypeRef::vec(TypeRef::string())),
    ];
    let mut defaults = vec![
        (
            "endpoint".to_string(),
            Expr::path(Symbol::local("DEFAULT_ENDPOINT")).method("to_string", Vec::new()),
        ),
        (
            "scopes".to_string(),
            Expr::path(Symbol::local("DEFAULT_SCOPES"))
                .method("iter", Vec::new())
                .method(
                    "map",
                    vec![Expr::closure(
                        vec![Pattern::ident("scope")],
                        Expr::local("scope").method("to_string", Vec::new()),
                    )],
                )
                .method("collect", Vec::new()),
        ),
    ];
    for method in &service.methods {
        let name = method_name(method);
        let doc = format!("Settings of [`{}::{name}`]({client_link}::{name}).", names.client);
        match &method.shape {
            CallShape::LongRunning(info) => {
                fields.push(FieldDecl::new(&name, gax("OperationCallSettings")).doc(doc));
                defaults.push((name, operation_settings(&method.retry, &info.polling)));
            }
            _ => {
                fields.push(FieldDecl::new(&name, gax("CallSettings")).doc(doc));
                defaults.push((name, call_settings(&method.retry)));
            }
        }
    }

    let settings = Class::new(&names.settings, ClassKind::Named(fields))
        .doc(format!(
            "Settings of [`{}`]({client_link}).\n\nEvery method's settings can be overridden \
             per call through its `_with_options` variant.",
            names.client
        ))
        .derive(Symbol::derive("Debug"))
        .derive(Symbol::derive("Clone"))
        .derive(Symbol::derive("PartialEq"));

    let default = Impl::of_trait(
        TypeRef::prelude("Default"),
        TypeRef::named(Symbol::local(&names.settings)),
    )
    .method(
        MethodDecl::new("default")
            .returns(TypeRef::SelfType)
            .body(Block::tail(Expr::struct_lit(TypeRef::SelfType, defaults))),
    );

    CompilationUnit::new(
        format!("src/{}.rs", names.settings_module),
        ["crate", names.settings_module.as_str()],
    )
    .doc(format!("Call settings of `{}`.", service.full_name))
    .item(Item::Const(endpoint))
    .item(Item::Const(scopes))
    .item(Item::Class(settings))
    .item(Item::Impl(default))
}

/// `CallSettings::no_retry(..)` for methods without a retry policy, the full
/// literal otherwise.
fn call_settings(retry: &RetrySettings) -> Expr {
    if !retry.is_retrying() {
        return Expr::assoc_call(gax("CallSettings"), "no_retry", vec![millis(retry.total_timeout)]);
    }
    let codes = retry
        .retryable_codes
        .iter()
        .map(|code| Expr::path(Symbol::new(["gapic_gax", "Code"], format!("{code:?}"))))
        .collect();
    Expr::struct_lit(
        gax("CallSettings"),
        vec![
            ("retryable_codes".to_string(), Expr::macro_call("vec", codes)),
            ("initial_retry_delay".to_string(), millis(retry.initial_retry_delay)),
            ("retry_delay_multiplier".to_string(), Expr::float(retry.retry_delay_multiplier)),
            ("max_retry_delay".to_string(), millis(retry.max_retry_delay)),
            ("initial_rpc_timeout".to_string(), millis(retry.initial_rpc_timeout)),
            ("rpc_timeout_multiplier".to_string(), Expr::float(retry.rpc_timeout_multiplier)),
            ("max_rpc_timeout".to_string(), millis(retry.max_rpc_timeout)),
            ("total_timeout".to_string(), millis(retry.total_timeout)),
        ],
    )
}

fn operation_settings(retry: &RetrySettings, polling: &PollingSettings) -> Expr {
    let polling = Expr::struct_lit(
        gax("PollingSettings"),
        vec![
            ("initial_poll_delay".to_string(), millis(polling.initial_poll_delay)),
            ("poll_delay_multiplier".to_string(), Expr::float(polling.poll_delay_multiplier)),
            ("max_poll_delay".to_string(), millis(polling.max_poll_delay)),
            ("initial_rpc_timeout".to_string(), millis(polling.initial_rpc_timeout)),
            ("rpc_timeout_multiplier".to_string(), Expr::float(polling.rpc_timeout_multiplier)),
            ("max_rpc_timeout".to_string(), millis(polling.max_rpc_timeout)),
            ("total_poll_timeout".to_string(), millis(polling.total_poll_timeout)),
        ],
    );
    Expr::struct_lit(
        gax("OperationCallSettings"),
        vec![("initial".to_string(), call_settings(retry)), ("polling".to_string(), polling)],
    )
}
