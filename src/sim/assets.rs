//! Model readiness as completion events
//!
//! The external loader receives an [`AssetSender`] and delivers a
//! [`ModelHandle`] once the model is decoded. The world owns the matching
//! [`PendingAsset`] and polls it once per tick without blocking.

use futures::channel::oneshot;
use glam::Vec3;

/// One bone of a loaded skeleton
#[derive(Debug, Clone, PartialEq)]
pub struct BoneInfo {
    pub name: String,
    /// Opaque handle the external animator uses to address the bone
    pub handle: u32,
    /// World position of the bone at load time
    pub world_position: Vec3,
    /// Length of the bone's local scale
    pub scale: f32,
}

/// Opaque root of a loaded model plus its bone table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelHandle {
    pub id: u32,
    pub bones: Vec<BoneInfo>,
}

impl ModelHandle {
    pub fn new(id: u32) -> Self {
        Self { id, bones: Vec::new() }
    }

    pub fn with_bone(self, name: &str, handle: u32, world_position: Vec3) -> Self {
        self.with_scaled_bone(name, handle, world_position, 1.0)
    }

    pub fn with_scaled_bone(
        mut self,
        name: &str,
        handle: u32,
        world_position: Vec3,
        scale: f32,
    ) -> Self {
        self.bones.push(BoneInfo {
            name: name.to_string(),
            handle,
            world_position,
            scale,
        });
        self
    }
}

/// Loader side of an asset completion event. Resolving consumes it.
#[derive(Debug)]
pub struct AssetSender<T>(oneshot::Sender<T>);

impl<T> AssetSender<T> {
    /// Deliver the loaded asset. Returns false if the world is gone.
    pub fn resolve(self, asset: T) -> bool {
        self.0.send(asset).is_ok()
    }
}

/// World side of an asset completion event
#[derive(Debug)]
pub struct PendingAsset<T> {
    /// `None` once the asset was delivered or abandoned
    rx: Option<oneshot::Receiver<T>>,
    abandoned: bool,
}

impl<T> PendingAsset<T> {
    /// Non-blocking check for a delivered asset. Yields it at most once.
    pub fn poll(&mut self) -> Option<T> {
        let rx = self.rx.as_mut()?;
        match rx.try_recv() {
            Ok(Some(asset)) => {
                self.rx = None;
                Some(asset)
            }
            Ok(None) => None,
            Err(oneshot::Canceled) => {
                log::warn!("Asset loader dropped before delivering a model");
                self.rx = None;
                self.abandoned = true;
                None
            }
        }
    }

    /// True once the loader went away without delivering
    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }
}

/// Create a loader/world pair for one asset
pub fn asset_channel<T>() -> (AssetSender<T>, PendingAsset<T>) {
    let (tx, rx) = oneshot::channel();
    (
        AssetSender(tx),
        PendingAsset {
            rx: Some(rx),
            abandoned: false,
        },
    )
}
