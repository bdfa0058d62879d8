#![allow(dead_code)]

use appwire_injector::{Binder, Binders, BoxError, DependencyBuilder, InjectError, Resolver, ScopeContext};
use appwire_kernel::Settings;
use appwire_kernel::factory::{AppFactory, Loaders};
use appwire_tasks::{TaskApp, TaskContext, task_context};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Settings)]
pub struct MailerConfig {
    #[setting(default = "noreply@example.com")]
    pub sender: String,
}

impl MailerConfig {
    pub fn shared(sender: &str) -> Arc<Self> {
        Arc::new(Self { sender: sender.to_owned() })
    }
}

/// One per task invocation.
#[derive(Debug)]
pub struct Outbox {
    pub serial: usize,
}

#[derive(Debug)]
pub struct Unbound;

#[derive(Debug, Deserialize)]
struct SendMail {
    to: String,
}

#[derive(Debug)]
pub struct MailerDeps {
    config: Arc<MailerConfig>,
    opened: AtomicUsize,
}

impl DependencyBuilder for MailerDeps {
    type Config = MailerConfig;

    fn new(config: Arc<MailerConfig>) -> Self {
        Self { config, opened: AtomicUsize::new(0) }
    }

    fn config(&self) -> &Arc<MailerConfig> {
        &self.config
    }

    fn binders(binders: &mut Binders<Self>) {
        binders.add("bind_outbox", bind_outbox);
    }

    fn context<'r>(&self, resolver: &Resolver<'r>) -> Result<&'r ScopeContext, InjectError> {
        task_context(resolver)
    }
}

fn bind_outbox(builder: &Arc<MailerDeps>, binder: &mut Binder) -> Result<(), InjectError> {
    binder.bind_scoped(builder, "outbox", |deps, _| {
        Ok(Outbox { serial: deps.opened.fetch_add(1, Ordering::SeqCst) })
    });
    Ok(())
}

#[derive(Debug)]
pub struct MailerFactory;

impl AppFactory for MailerFactory {
    type App = TaskApp;
    type Config = MailerConfig;
    type Builder = MailerDeps;

    fn loaders(loaders: &mut Loaders<Self>) {
        loaders.add("load_tasks", load_tasks);
    }
}

fn load_tasks(_: &MailerFactory, app: &mut TaskApp) -> Result<(), BoxError> {
    app.task("send_mail", send_mail)
        .task("outbox_twice", outbox_twice)
        .task("fail", |_, _| Err("smtp unreachable".into()))
        .task("unbound", |ctx, _| {
            ctx.resolve::<Unbound>()?;
            Ok(Value::Null)
        });
    Ok(())
}

fn send_mail(ctx: &TaskContext<'_>, payload: Value) -> Result<Value, BoxError> {
    let mail: SendMail = serde_json::from_value(payload)?;
    let config = ctx.resolve::<MailerConfig>()?;
    Ok(json!({ "task": ctx.name(), "from": config.sender, "to": mail.to }))
}

fn outbox_twice(ctx: &TaskContext<'_>, _: Value) -> Result<Value, BoxError> {
    let first = ctx.resolve::<Outbox>()?;
    let second = ctx.resolve::<Outbox>()?;
    Ok(json!({
        "serial": first.serial,
        "same": Arc::ptr_eq(&first, &second),
        "scope": ctx.scope().id(),
    }))
}
