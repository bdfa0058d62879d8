use crate::{Greeter, Job, WorkerConfig, WorkerFactory};
use appwire::prelude::*;
use appwire::tasks::{TaskApp, TaskContext};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
struct Greet {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Batch {
    items: Vec<Value>,
}

pub(crate) fn load_tasks(_: &WorkerFactory, app: &mut TaskApp) -> Result<(), BoxError> {
    app.task("echo", |_, payload| Ok(payload)).task("greet", greet).task("batch", batch);
    Ok(())
}

fn greet(ctx: &TaskContext<'_>, payload: Value) -> Result<Value, BoxError> {
    let Greet { name } = serde_json::from_value(payload)?;
    let greeter = ctx.resolve::<Greeter>()?;
    let job = ctx.resolve::<Job>()?;
    Ok(json!({ "message": greeter.greet(&name), "job": job.number }))
}

fn batch(ctx: &TaskContext<'_>, payload: Value) -> Result<Value, BoxError> {
    let Batch { items } = serde_json::from_value(payload)?;
    let config = ctx.resolve::<WorkerConfig>()?;
    if config.batch_size == 0 {
        return Err("batch_size must be greater than zero".into());
    }

    let job = ctx.resolve::<Job>()?;
    let batches: Vec<usize> = items.chunks(config.batch_size).map(<[Value]>::len).collect();
    Ok(json!({ "job": job.number, "scope": job.id, "batches": batches }))
}
