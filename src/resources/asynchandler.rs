//! Asynchronous graphic file requests.
//!
//! Sprites never block on disk. They ask the [`AsyncHandler`] for a file,
//! bind themselves to the request and start it:
//!
//! ```ignore
//! let mut request = handler.request_file(FileCategory::CharSet, "hero");
//! request.set_graphic_file(true);
//! let binding = request.bind(ReadyHandler::CharSprite, sprite_entity);
//! handler.start(request);
//! character_sprite.binding = Some(binding);
//! ```
//!
//! File resolution happens on a background thread (or, in
//! [`LoadMode::Deferred`], whenever the owner calls
//! [`AsyncHandler::resolve_next`]). Finished requests are collected by
//! [`AsyncHandler::poll`] and dispatched by
//! [`dispatch_file_requests`](crate::systems::asyncload::dispatch_file_requests).
//!
//! Every request gets a new, strictly increasing id. A binding carries that
//! id, and a sprite only accepts a completion whose binding equals the one
//! it currently holds, so a superseded request can never overwrite newer
//! state.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use bevy_ecs::prelude::{Entity, Resource};
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, warn};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Extensions probed, in order, for graphic files.
const GRAPHIC_EXTENSIONS: [&str; 2] = ["png", "bmp"];

/// Asset folder a file is looked up in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileCategory {
    CharSet,
    ChipSet,
    Monster,
}

impl FileCategory {
    pub fn dir_name(&self) -> &'static str {
        match self {
            FileCategory::CharSet => "CharSet",
            FileCategory::ChipSet => "ChipSet",
            FileCategory::Monster => "Monster",
        }
    }
}

/// Which sprite routine consumes a finished request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyHandler {
    CharSprite,
    TileSprite,
    MonsterSprite,
}

/// Link between a request and the sprite waiting for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileRequestBinding {
    /// Id of the request; ids grow monotonically and act as generations.
    pub request_id: u64,
    pub handler: ReadyHandler,
    pub target: Entity,
}

type Bindings = SmallVec<[FileRequestBinding; 2]>;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct FileKey {
    category: FileCategory,
    name: String,
}

/// A request being prepared. Nothing happens until it is passed to
/// [`AsyncHandler::start`].
#[derive(Debug)]
pub struct FileRequest {
    id: u64,
    key: FileKey,
    graphic: bool,
    bindings: Bindings,
}

impl FileRequest {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Graphic files are probed with image extensions.
    pub fn set_graphic_file(&mut self, graphic: bool) {
        self.graphic = graphic;
    }

    /// Attach a completion handler for `target`.
    pub fn bind(&mut self, handler: ReadyHandler, target: Entity) -> FileRequestBinding {
        let binding = FileRequestBinding {
            request_id: self.id,
            handler,
            target,
        };
        self.bindings.push(binding);
        binding
    }
}

/// Outcome of a request, delivered once per start.
#[derive(Clone, Debug)]
pub struct FileRequestResult {
    pub category: FileCategory,
    /// Logical file name as requested.
    pub file: String,
    /// Resolved path on disk, if the file was found.
    pub path: Option<PathBuf>,
    pub success: bool,
    pub bindings: SmallVec<[FileRequestBinding; 2]>,
}

/// How file resolution is driven.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadMode {
    /// A worker thread resolves requests as soon as they start.
    Background,
    /// Requests wait until [`AsyncHandler::resolve_next`] or
    /// [`AsyncHandler::resolve_file`] is called.
    Deferred,
}

enum FinderCmd {
    Find { key: FileKey, graphic: bool },
    Shutdown,
}

struct FinderReply {
    key: FileKey,
    path: Option<PathBuf>,
}

enum LoadBackend {
    Background {
        tx_cmd: Sender<FinderCmd>,
        rx_reply: Receiver<FinderReply>,
        handle: Option<std::thread::JoinHandle<()>>,
    },
    Deferred {
        queue: VecDeque<(FileKey, bool)>,
    },
}

/// ECS resource owning the file finder and every in-flight request.
#[derive(Resource)]
pub struct AsyncHandler {
    root: PathBuf,
    next_request_id: u64,
    pending: FxHashMap<FileKey, Bindings>,
    resolved: FxHashMap<FileKey, Option<PathBuf>>,
    ready: VecDeque<FileRequestResult>,
    backend: LoadBackend,
}

impl AsyncHandler {
    /// Create a handler looking up files under `root`.
    pub fn new(root: impl Into<PathBuf>, mode: LoadMode) -> Self {
        let root = root.into();
        let backend = match mode {
            LoadMode::Background => {
                let (tx_cmd, rx_cmd) = unbounded::<FinderCmd>();
                let (tx_reply, rx_reply) = unbounded::<FinderReply>();
                let thread_root = root.clone();
                let handle =
                    std::thread::spawn(move || file_finder_thread(thread_root, rx_cmd, tx_reply));
                LoadBackend::Background {
                    tx_cmd,
                    rx_reply,
                    handle: Some(handle),
                }
            }
            LoadMode::Deferred => LoadBackend::Deferred {
                queue: VecDeque::new(),
            },
        };
        Self {
            root,
            next_request_id: 1,
            pending: FxHashMap::default(),
            resolved: FxHashMap::default(),
            ready: VecDeque::new(),
            backend,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Prepare a request for `name` in `category`.
    pub fn request_file(&mut self, category: FileCategory, name: &str) -> FileRequest {
        let id = self.next_request_id;
        self.next_request_id += 1;
        FileRequest {
            id,
            key: FileKey {
                category,
                name: name.to_string(),
            },
            graphic: false,
            bindings: SmallVec::new(),
        }
    }

    /// Start a request. Never blocks.
    ///
    /// Files resolved earlier complete on the next [`poll`](Self::poll);
    /// a file already in flight gains the extra bindings instead of a second
    /// lookup.
    pub fn start(&mut self, request: FileRequest) {
        let FileRequest {
            key,
            graphic,
            bindings,
            ..
        } = request;

        if let Some(path) = self.resolved.get(&key) {
            self.ready.push_back(FileRequestResult {
                category: key.category,
                file: key.name.clone(),
                path: path.clone(),
                success: path.is_some(),
                bindings,
            });
            return;
        }

        if let Some(waiting) = self.pending.get_mut(&key) {
            waiting.extend(bindings);
            return;
        }

        self.pending.insert(key.clone(), bindings);
        match &mut self.backend {
            LoadBackend::Background { tx_cmd, .. } => {
                if tx_cmd.send(FinderCmd::Find { key, graphic }).is_err() {
                    warn!("File finder thread is gone; request will not complete");
                }
            }
            LoadBackend::Deferred { queue } => queue.push_back((key, graphic)),
        }
    }

    /// Number of files still being looked up.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    fn complete(&mut self, key: FileKey, path: Option<PathBuf>) {
        if path.is_none() {
            warn!(
                "{} '{}' not found under {}",
                key.category.dir_name(),
                key.name,
                self.root.display()
            );
        }
        let bindings = self.pending.remove(&key).unwrap_or_default();
        self.resolved.insert(key.clone(), path.clone());
        self.ready.push_back(FileRequestResult {
            category: key.category,
            file: key.name,
            success: path.is_some(),
            path,
            bindings,
        });
    }

    /// Collect every finished request, oldest first.
    pub fn poll(&mut self) -> Vec<FileRequestResult> {
        let replies: Vec<FinderReply> = match &self.backend {
            LoadBackend::Background { rx_reply, .. } => rx_reply.try_iter().collect(),
            LoadBackend::Deferred { .. } => Vec::new(),
        };
        for reply in replies {
            self.complete(reply.key, reply.path);
        }
        self.ready.drain(..).collect()
    }

    /// Deferred mode: resolve the oldest queued request. Returns false when
    /// nothing was queued.
    pub fn resolve_next(&mut self) -> bool {
        let next = match &mut self.backend {
            LoadBackend::Deferred { queue } => queue.pop_front(),
            LoadBackend::Background { .. } => None,
        };
        let Some((key, graphic)) = next else {
            return false;
        };
        let path = find_file(&self.root, &key, graphic);
        self.complete(key, path);
        true
    }

    /// Deferred mode: resolve a specific queued file out of order.
    pub fn resolve_file(&mut self, category: FileCategory, name: &str) -> bool {
        let job = match &mut self.backend {
            LoadBackend::Deferred { queue } => queue
                .iter()
                .position(|(key, _)| key.category == category && key.name == name)
                .and_then(|i| queue.remove(i)),
            LoadBackend::Background { .. } => None,
        };
        let Some((key, graphic)) = job else {
            return false;
        };
        let path = find_file(&self.root, &key, graphic);
        self.complete(key, path);
        true
    }

    /// Deferred mode: resolve everything queued.
    pub fn resolve_all(&mut self) {
        while self.resolve_next() {}
    }

    /// Block until no file is pending or `timeout` elapses. Deferred requests
    /// are resolved in place. Returns true when idle.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while !self.pending.is_empty() {
            let reply = match &self.backend {
                LoadBackend::Background { rx_reply, .. } => {
                    let left = deadline.saturating_duration_since(Instant::now());
                    match rx_reply.recv_timeout(left) {
                        Ok(reply) => Some(reply),
                        Err(_) => return false,
                    }
                }
                LoadBackend::Deferred { .. } => None,
            };
            match reply {
                Some(reply) => self.complete(reply.key, reply.path),
                None => self.resolve_all(),
            }
        }
        true
    }

    /// Stop the worker thread, if any, and wait for it.
    pub fn shutdown(&mut self) {
        if let LoadBackend::Background { tx_cmd, handle, .. } = &mut self.backend {
            let _ = tx_cmd.send(FinderCmd::Shutdown);
            if let Some(handle) = handle.take() {
                let _ = handle.join();
            }
        }
    }
}

impl Drop for AsyncHandler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Probe `<root>/<category>/<name>[.ext]`.
fn find_file(root: &Path, key: &FileKey, graphic: bool) -> Option<PathBuf> {
    let dir = root.join(key.category.dir_name());
    if !graphic {
        let path = dir.join(&key.name);
        return path.is_file().then_some(path);
    }
    GRAPHIC_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", key.name, ext)))
        .find(|path| path.is_file())
}

/// Entry point of the file finder thread.
///
/// Blocks on the command channel and answers every lookup with a reply,
/// until [`FinderCmd::Shutdown`] arrives or the handler is dropped.
fn file_finder_thread(root: PathBuf, rx_cmd: Receiver<FinderCmd>, tx_reply: Sender<FinderReply>) {
    debug!(
        "[files] finder thread starting (id={:?})",
        std::thread::current().id()
    );
    for cmd in rx_cmd.iter() {
        match cmd {
            FinderCmd::Find { key, graphic } => {
                let path = find_file(&root, &key, graphic);
                if tx_reply.send(FinderReply { key, path }).is_err() {
                    break;
                }
            }
            FinderCmd::Shutdown => break,
        }
    }
    debug!("[files] finder thread exiting");
}
