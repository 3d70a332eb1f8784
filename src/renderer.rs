//! The driver-facing renderer
//!
//! [`Renderer`] owns the sprite cache, the texture registry and the canvas.
//! Every operation takes `&mut self`, so registry updates and rendering can
//! never interleave.

use log::{debug, info};
use std::sync::Arc;
use thiserror::Error;

use crate::composition::{composite, Canvas, CanvasSnapshot, LayerMask, Order};
use crate::config::RenderConfig;
use crate::error::ErrorKind;
use crate::fid::{Fid, ObjectType, Orientation};
use crate::registry::{
    CacheError, Registry, RegistryError, SpriteCache, TextureHandle, TextureRegistry, Visibility,
};
use crate::resources::ResourceFetcher;
use crate::sprite::Sprite;

/// Error returned by [`Renderer`] operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error(transparent)]
    Cache(#[from] CacheError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl RenderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RenderError::Cache(e) => e.kind(),
            RenderError::Registry(e) => e.kind(),
        }
    }
}

/// Names one frame of a sprite: the frame at `frame` in the animation shown
/// for `orientation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRef {
    pub fid: Fid,
    pub orientation: Orientation,
    pub frame: usize,
}

impl FrameRef {
    pub fn new(fid: Fid, orientation: Orientation, frame: usize) -> Self {
        Self { fid, orientation, frame }
    }
}

/// Textures registered for every frame of one animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSet {
    pub fps: u16,
    pub keyframe: u16,
    /// One handle per frame, in frame order
    pub handles: Vec<TextureHandle>,
}

/// Single owner of the rendering state.
pub struct Renderer<R> {
    cache: SpriteCache<R>,
    textures: TextureRegistry,
    canvas: Canvas,
    mask: LayerMask,
    snapshot: Option<CanvasSnapshot>,
}

impl<R: ResourceFetcher> Renderer<R> {
    /// Create a renderer sized and masked from `config`.
    pub fn new(cache: SpriteCache<R>, config: &RenderConfig) -> Self {
        let mut renderer =
            Self::with_canvas(cache, Canvas::new(config.canvas.width, config.canvas.height));
        renderer.mask = config.layers;
        renderer
    }

    /// Create a renderer drawing into `canvas` with every layer enabled.
    pub fn with_canvas(cache: SpriteCache<R>, canvas: Canvas) -> Self {
        Self {
            cache,
            textures: TextureRegistry::new(),
            canvas,
            mask: LayerMask::all(),
            snapshot: None,
        }
    }

    pub fn fetch(&mut self, fid: Fid) -> Result<Arc<Sprite>, RenderError> {
        Ok(self.cache.fetch(fid)?)
    }

    pub fn fetch_prototype(
        &mut self,
        pid: u32,
        object_type: ObjectType,
    ) -> Result<Arc<Sprite>, RenderError> {
        Ok(self.cache.fetch_prototype(pid, object_type)?)
    }

    /// Register the frame named by `frame` and return its handle.
    ///
    /// A frame index past the end of the animation, or an orientation without
    /// an animation, is `InvalidInput`.
    pub fn initialize(
        &mut self,
        frame: FrameRef,
        order: Order,
        visibility: Visibility,
    ) -> Result<TextureHandle, RenderError> {
        let sprite = self.cache.fetch(frame.fid)?;
        let image = sprite
            .animation(frame.orientation)
            .and_then(|animation| animation.frame(frame.frame))
            .cloned()
            .ok_or(RegistryError::InvalidInput("frame index out of range"))?;

        Ok(self.textures.initialize(image, order, visibility))
    }

    /// Register every frame of the animation shown for `orientation`.
    ///
    /// Textures start hidden in the roof layer; the driver moves each one
    /// into place before showing it.
    pub fn initialize_set(
        &mut self,
        fid: Fid,
        orientation: Orientation,
    ) -> Result<TextureSet, RenderError> {
        let sprite = self.cache.fetch(fid)?;
        let animation = sprite
            .animation(orientation)
            .ok_or(RegistryError::InvalidInput("orientation has no animation"))?;

        let handles = animation
            .frames
            .iter()
            .map(|frame| self.textures.initialize(Arc::clone(frame), Order::Roof, Visibility::Off))
            .collect::<Vec<_>>();
        debug!("registered {} frames of {} facing {:?}", handles.len(), fid, orientation);

        Ok(TextureSet { fps: animation.fps, keyframe: animation.keyframe, handles })
    }

    pub fn invalidate_texture(&mut self, handle: &TextureHandle) -> Result<(), RenderError> {
        Ok(self.textures.invalidate(handle)?)
    }

    pub fn set_visibility_and_order(
        &mut self,
        handle: &TextureHandle,
        visibility: Visibility,
        order: Order,
    ) -> Result<(), RenderError> {
        Ok(self.textures.set_visibility_and_order(handle, visibility, order)?)
    }

    pub fn set_coordinates(
        &mut self,
        handle: &TextureHandle,
        x: i32,
        y: i32,
    ) -> Result<(), RenderError> {
        Ok(self.textures.set_coordinates(handle, x, y)?)
    }

    pub fn set_grid_indexes(
        &mut self,
        handle: &TextureHandle,
        grid_x: i32,
        grid_y: i32,
        scale: u32,
    ) -> Result<(), RenderError> {
        Ok(self.textures.set_grid_indexes(handle, grid_x, grid_y, scale)?)
    }

    pub fn is_equal(&self, lhs: &TextureHandle, rhs: &TextureHandle) -> bool {
        TextureHandle::is_equal(lhs, rhs)
    }

    /// Composite every visible texture and keep the result as the latest snapshot.
    pub fn render(&mut self) -> CanvasSnapshot {
        composite(&mut self.canvas, &self.textures, &self.mask);
        let snapshot = self.canvas.snapshot();
        self.snapshot = Some(snapshot.clone());
        snapshot
    }

    /// The most recent [`render`](Renderer::render) result.
    pub fn snapshot(&self) -> Option<&CanvasSnapshot> {
        self.snapshot.as_ref()
    }

    /// Drop every registered texture. With `fully`, the last snapshot and
    /// the sprite cache go as well.
    pub fn invalidate(&mut self, fully: bool) {
        info!("invalidating {} textures (fully: {})", self.textures.len(), fully);
        self.textures.clear();

        if fully {
            self.snapshot = None;
            self.canvas.clear();
            self.cache.invalidate();
        }
    }

    pub fn set_layer_mask(&mut self, mask: LayerMask) {
        self.mask = mask;
    }

    pub fn layer_mask(&self) -> LayerMask {
        self.mask
    }

    pub fn cache(&self) -> &SpriteCache<R> {
        &self.cache
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }
}
