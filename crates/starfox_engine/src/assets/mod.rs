//! Asset management system
//!
//! Assets are resolved against configured search paths and parsed through the
//! [`Asset`] trait. [`AssetManager::load_in_background`] returns an
//! [`AssetSlot`] that is polled once per frame; until it resolves, callers show
//! a placeholder.

mod model;

pub use model::{MeshData, ModelAsset, ModelVertex};

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use thiserror::Error;

/// Asset trait for loadable resources
pub trait Asset: Send + Sized + 'static {
    /// Load asset from raw bytes
    fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError>;
}

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// glTF parsing failed
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    /// The model has no node with the requested name
    #[error("Model has no node named '{0}'")]
    MissingNode(String),

    /// The node exists but carries no mesh geometry
    #[error("Node '{0}' has no mesh geometry")]
    MissingGeometry(String),

    /// The background loader went away without delivering a result
    #[error("Loader for '{0}' disconnected")]
    Disconnected(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Asset loading configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AssetConfig {
    /// Directories searched, in order, for relative asset paths
    pub search_paths: Vec<PathBuf>,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            search_paths: vec![PathBuf::from("."), PathBuf::from("assets"), PathBuf::from("public")],
        }
    }
}

/// Asset management system
#[derive(Debug, Clone, Default)]
pub struct AssetManager {
    config: AssetConfig,
}

impl AssetManager {
    /// Create a new asset manager
    pub fn new(config: AssetConfig) -> Self {
        Self { config }
    }

    /// Find the file backing a relative asset path
    pub fn resolve(&self, path: &str) -> Result<PathBuf, AssetError> {
        self.config
            .search_paths
            .iter()
            .map(|dir| dir.join(path))
            .chain(std::iter::once(PathBuf::from(path)))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }

    /// Load and parse an asset on the calling thread
    pub fn load<T: Asset>(&self, path: &str) -> Result<T, AssetError> {
        let file = self.resolve(path)?;
        load_file(&file)
    }

    /// Start loading an asset on a background thread
    ///
    /// Path resolution happens on the loader thread, so a missing file shows up
    /// as a failed slot rather than an error here.
    pub fn load_in_background<T: Asset>(&self, path: &str) -> Result<AssetSlot<T>, AssetError> {
        let (sender, receiver) = mpsc::channel();
        let manager = self.clone();
        let label = path.to_string();
        let request = path.to_string();

        std::thread::Builder::new()
            .name(format!("asset-loader:{label}"))
            .spawn(move || {
                let result = manager.load::<T>(&request);
                // The slot may have been dropped mid-load; nothing to deliver to
                let _ = sender.send(result);
            })?;

        log::info!("Loading '{}' in background", label);
        Ok(AssetSlot {
            label,
            state: SlotState::Pending(receiver),
        })
    }
}

fn load_file<T: Asset>(file: &Path) -> Result<T, AssetError> {
    let bytes = std::fs::read(file)?;
    T::from_bytes(&bytes)
}

enum SlotState<T> {
    Pending(Receiver<Result<T, AssetError>>),
    Ready(T),
    Failed(AssetError),
}

/// Observed state of an [`AssetSlot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Still loading
    Pending,
    /// Loaded and available
    Ready,
    /// Loading failed; see [`AssetSlot::error`]
    Failed,
}

/// An asset that may still be loading
///
/// Dropping a pending slot abandons the load result.
pub struct AssetSlot<T> {
    label: String,
    state: SlotState<T>,
}

impl<T> AssetSlot<T> {
    /// A slot that is already resolved
    pub fn ready(label: impl Into<String>, asset: T) -> Self {
        Self {
            label: label.into(),
            state: SlotState::Ready(asset),
        }
    }

    /// A slot that already failed
    pub fn failed(label: impl Into<String>, error: AssetError) -> Self {
        Self {
            label: label.into(),
            state: SlotState::Failed(error),
        }
    }

    /// A slot fed by an external channel
    pub fn pending(label: impl Into<String>, receiver: Receiver<Result<T, AssetError>>) -> Self {
        Self {
            label: label.into(),
            state: SlotState::Pending(receiver),
        }
    }

    /// Asset path or label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Check for a finished load without blocking
    ///
    /// Returns `true` on the poll where the slot leaves the pending state.
    pub fn poll(&mut self) -> bool {
        let SlotState::Pending(receiver) = &self.state else {
            return false;
        };

        let next = match receiver.try_recv() {
            Ok(Ok(asset)) => {
                log::info!("Asset '{}' loaded", self.label);
                SlotState::Ready(asset)
            }
            Ok(Err(error)) => {
                log::error!("Asset '{}' failed to load: {}", self.label, error);
                SlotState::Failed(error)
            }
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                log::error!("Asset '{}' loader disconnected", self.label);
                SlotState::Failed(AssetError::Disconnected(self.label.clone()))
            }
        };
        self.state = next;
        true
    }

    /// Current status
    pub fn status(&self) -> SlotStatus {
        match self.state {
            SlotState::Pending(_) => SlotStatus::Pending,
            SlotState::Ready(_) => SlotStatus::Ready,
            SlotState::Failed(_) => SlotStatus::Failed,
        }
    }

    /// The loaded asset, if ready
    pub fn get(&self) -> Option<&T> {
        match &self.state {
            SlotState::Ready(asset) => Some(asset),
            _ => None,
        }
    }

    /// The load error, if failed
    pub fn error(&self) -> Option<&AssetError> {
        match &self.state {
            SlotState::Failed(error) => Some(error),
            _ => None,
        }
    }
}
