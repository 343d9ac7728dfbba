//! Load session: one model at a time, fetched in the background, polled from
//! the render loop.

use std::{
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::{Duration, Instant},
};

use anyhow::{Result, anyhow, bail};
use asset::{
    Completion, FlattenedMesh, ObjModel, ParseOptions, RequestId, ResourceKind, TextureData,
};

use crate::fetch::Fetcher;

/// What a worker thread is loading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    Model,
    Resource(RequestId, ResourceKind),
}

#[derive(Debug)]
enum Fetched {
    Text(String),
    Image(TextureData),
    Missing,
    Failed(anyhow::Error),
}

/// Message from a worker back to the session.
#[derive(Debug)]
struct LoadEvent {
    generation: u64,
    target: Target,
    fetched: Fetched,
}

#[derive(Debug)]
enum Stage {
    Idle,
    Fetching,
    Loading(ObjModel),
    Delivered(ObjModel),
    Failed(String),
}

/// Coarse session status for UIs and loops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    /// Waiting for the OBJ text.
    Fetching,
    /// Parsed; material libraries or textures still loading.
    Loading,
    /// Mesh handed out.
    Delivered,
    Failed,
}

pub struct Session<F: Fetcher> {
    fetcher: Arc<F>,
    options: ParseOptions,
    source: String,
    /// Bumped by every `open`; events from older generations are dropped.
    generation: u64,
    tx: Sender<LoadEvent>,
    rx: Receiver<LoadEvent>,
    stage: Stage,
}

impl<F: Fetcher> Session<F> {
    pub fn new(fetcher: F, options: ParseOptions) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            fetcher: Arc::new(fetcher),
            options,
            source: String::new(),
            generation: 0,
            tx,
            rx,
            stage: Stage::Idle,
        }
    }

    /// Start loading `source`, abandoning whatever was loading or loaded before.
    pub fn open(&mut self, source: &str) {
        self.generation = self.generation.wrapping_add(1);
        self.source = source.to_owned();
        self.stage = Stage::Fetching;
        log::info!("Opening '{}' (generation {})", source, self.generation);
        self.spawn(Target::Model, source.to_owned());
    }

    pub fn status(&self) -> Status {
        match self.stage {
            Stage::Idle => Status::Idle,
            Stage::Fetching => Status::Fetching,
            Stage::Loading(_) => Status::Loading,
            Stage::Delivered(_) => Status::Delivered,
            Stage::Failed(_) => Status::Failed,
        }
    }

    pub fn model(&self) -> Option<&ObjModel> {
        match &self.stage {
            Stage::Loading(m) | Stage::Delivered(m) => Some(m),
            _ => None,
        }
    }

    /// Model parsed and every material library and texture settled.
    pub fn is_ready(&self) -> bool {
        self.model().is_some_and(ObjModel::is_ready)
    }

    pub fn vertex_count(&self) -> Option<usize> {
        self.model().map(ObjModel::vertex_count)
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.stage {
            Stage::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Apply finished loads without blocking. Returns the flattened mesh the
    /// first time the model is found ready, `None` otherwise.
    pub fn poll(&mut self) -> Option<FlattenedMesh> {
        while let Ok(event) = self.rx.try_recv() {
            if event.generation != self.generation {
                log::debug!(
                    "Dropping stale {:?} result from generation {}",
                    event.target,
                    event.generation
                );
                continue;
            }
            self.apply(event);
        }

        match std::mem::replace(&mut self.stage, Stage::Idle) {
            Stage::Loading(model) if model.is_ready() => {
                let mesh = model.flatten();
                self.stage = Stage::Delivered(model);
                Some(mesh)
            }
            other => {
                self.stage = other;
                None
            }
        }
    }

    /// Poll until the mesh is delivered, the load fails, or `timeout` passes.
    pub fn wait(&mut self, timeout: Duration) -> Result<FlattenedMesh> {
        let start = Instant::now();
        loop {
            if let Some(mesh) = self.poll() {
                return Ok(mesh);
            }
            match &self.stage {
                Stage::Failed(reason) => bail!("Loading '{}' failed: {}", self.source, reason),
                Stage::Idle => bail!("Nothing to wait for; call open() first"),
                Stage::Delivered(_) => bail!("Mesh for '{}' was already delivered", self.source),
                Stage::Fetching | Stage::Loading(_) => {}
            }
            if start.elapsed() >= timeout {
                return Err(anyhow!(
                    "Timed out after {:?} waiting for '{}' ({} load(s) pending)",
                    timeout,
                    self.source,
                    self.model().map_or(0, |m| m.resources().pending())
                ));
            }
            thread::sleep(Duration::from_millis(1));
        }
    }

    fn apply(&mut self, event: LoadEvent) {
        match event.target {
            Target::Model => self.apply_model(event.fetched),
            Target::Resource(id, _) => {
                let Stage::Loading(model) = &mut self.stage else {
                    log::debug!("Resource {:?} finished outside of loading; ignored", id);
                    return;
                };
                let completion = match event.fetched {
                    Fetched::Text(text) => Completion::Text(text),
                    Fetched::Image(texture) => Completion::Image(texture),
                    Fetched::Missing => Completion::Missing,
                    Fetched::Failed(err) => {
                        log::warn!("Load {:?} failed: {:#}", id, err);
                        Completion::Missing
                    }
                };
                if let Err(err) = model.complete(id, completion) {
                    log::warn!("{}", err);
                }
                let requests = model.take_requests();
                for req in requests {
                    self.spawn(Target::Resource(req.id, req.kind), req.url);
                }
            }
        }
    }

    fn apply_model(&mut self, fetched: Fetched) {
        let text = match fetched {
            Fetched::Text(text) => text,
            Fetched::Missing => return self.fail(format!("'{}' not found", self.source)),
            Fetched::Failed(err) => return self.fail(format!("{err:#}")),
            Fetched::Image(_) => return self.fail("unexpected image payload".to_owned()),
        };

        match ObjModel::parse(&self.source, &text, self.options) {
            Ok(mut model) => {
                for req in model.take_requests() {
                    self.spawn(Target::Resource(req.id, req.kind), req.url);
                }
                self.stage = Stage::Loading(model);
            }
            Err(err) => self.fail(err.to_string()),
        }
    }

    fn fail(&mut self, reason: String) {
        log::error!("OBJ load failed: {}", reason);
        self.stage = Stage::Failed(reason);
    }

    fn spawn(&self, target: Target, url: String) {
        let tx = self.tx.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let generation = self.generation;

        let spawned = thread::Builder::new()
            .name(format!("objwire-load-{generation}"))
            .spawn(move || {
                let fetched = fetch(&*fetcher, target, &url);
                // the session may be gone already
                let _ = tx.send(LoadEvent {
                    generation,
                    target,
                    fetched,
                });
            });

        if let Err(err) = spawned {
            let _ = self.tx.send(LoadEvent {
                generation,
                target,
                fetched: Fetched::Failed(anyhow::Error::new(err).context("spawn loader thread")),
            });
        }
    }
}

/// Runs on a worker: fetch, then decode according to what is being loaded.
fn fetch<F: Fetcher>(fetcher: &F, target: Target, url: &str) -> Fetched {
    log::debug!("Fetching {:?} '{}'", target, url);
    let bytes = match fetcher.fetch(url) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            log::warn!("'{}' not found", url);
            return Fetched::Missing;
        }
        Err(err) => return Fetched::Failed(err),
    };

    match target {
        Target::Model | Target::Resource(_, ResourceKind::MaterialLibrary) => {
            Fetched::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
        Target::Resource(_, ResourceKind::Texture) => match TextureData::decode(&bytes) {
            Ok(texture) => Fetched::Image(texture),
            Err(err) => Fetched::Failed(err.context(format!("texture '{url}'"))),
        },
    }
}
