//! Decoded sprite cache.

use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::error::ErrorKind;
use crate::fid::{Fid, FidLayout, ObjectType, Orientation};
use crate::palette::Palette;
use crate::resources::{RawSprite, ResourceError, ResourceFetcher};
use crate::sprite::{decode_sprite, DecodeError, Sprite};

use super::traits::Registry;

/// Error when fetching a sprite through the cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CacheError {
    /// The asset-format layer failed
    #[error(transparent)]
    Resource(#[from] ResourceError),
    /// Raw data was fetched but does not form a valid sprite
    #[error("sprite {fid} could not be decoded: {source}")]
    Decode { fid: Fid, source: DecodeError },
    /// Both the catalog entry and its redirect failed to load
    #[error("critter sprite {fid} missing for catalog entry {index} and its redirect {redirect}: {source}")]
    RecursionExhausted { fid: Fid, index: u16, redirect: u16, source: ResourceError },
}

impl CacheError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CacheError::Resource(e) => e.kind(),
            CacheError::Decode { source, .. } => source.kind(),
            CacheError::RecursionExhausted { .. } => ErrorKind::RecursionExhausted,
        }
    }
}

/// Memoizing store from fid to decoded sprite.
///
/// A sprite is decoded on first [`fetch`](SpriteCache::fetch) and kept until
/// [`invalidate`](SpriteCache::invalidate). Nothing is stored for a fetch that
/// fails.
pub struct SpriteCache<R> {
    fetcher: R,
    layout: Box<dyn FidLayout + Send + Sync>,
    palette: Arc<Palette>,
    sprites: HashMap<Fid, Arc<Sprite>>,
}

impl<R: ResourceFetcher> SpriteCache<R> {
    /// Create an empty cache decoding with `palette` unless a sprite brings its own.
    pub fn new(fetcher: R, layout: impl FidLayout + Send + Sync + 'static, palette: Arc<Palette>) -> Self {
        Self { fetcher, layout: Box::new(layout), palette, sprites: HashMap::new() }
    }

    /// Get the sprite for `fid`, decoding it on first use.
    pub fn fetch(&mut self, fid: Fid) -> Result<Arc<Sprite>, CacheError> {
        if let Some(sprite) = self.sprites.get(&fid) {
            return Ok(Arc::clone(sprite));
        }

        let object_type = self.layout.object_type(fid).ok_or_else(|| {
            ResourceError::Index(format!("fid {} names no known object type", fid))
        })?;
        let index = self.layout.index(fid);
        debug!("sprite cache miss for {} ({} #{})", fid, object_type, index);

        let raw = match object_type {
            ObjectType::Critter => self.fetch_critter(fid, index)?,
            _ => self.fetcher.raw_sprite(object_type, index)?,
        };

        let sprite = decode_sprite(&raw, &self.palette, fid, object_type, index)
            .map_err(|source| CacheError::Decode { fid, source })?;
        let sprite = Arc::new(sprite);
        self.sprites.insert(fid, Arc::clone(&sprite));

        debug!(
            "decoded {} with {} animations, {} sprites cached",
            fid,
            sprite.animations.len(),
            self.sprites.len()
        );
        Ok(sprite)
    }

    /// Get the sprite used by prototype `pid`.
    pub fn fetch_prototype(
        &mut self,
        pid: u32,
        object_type: ObjectType,
    ) -> Result<Arc<Sprite>, CacheError> {
        let prototype = self.fetcher.raw_prototype(pid, object_type)?;
        self.fetch(prototype.fid)
    }

    /// Critter art is either split into one file per orientation, or stored in
    /// one file that may be an alias for another catalog entry. The alias is
    /// followed at most once.
    fn fetch_critter(&self, fid: Fid, index: u16) -> Result<RawSprite, CacheError> {
        if self.layout.is_split(fid) {
            let parts = Orientation::ALL
                .iter()
                .map(|&orientation| self.fetcher.raw_sprite_part(fid, index, orientation))
                .collect::<Result<Vec<_>, _>>()?;

            return self.fetcher.merge(parts).map_err(|e| match e {
                ResourceError::Merge(_) => e.into(),
                other => ResourceError::Merge(other.to_string()).into(),
            });
        }

        match self.fetcher.raw_sprite_for_fid(fid, index) {
            Ok(raw) => Ok(raw),
            Err(first) => {
                let redirect = self.fetcher.catalog_entry(ObjectType::Critter, index)?.redirect;
                warn!(
                    "critter sprite {} unavailable for entry {} ({}), retrying with entry {}",
                    fid, index, first, redirect
                );

                self.fetcher.raw_sprite_for_fid(fid, redirect).map_err(|source| {
                    CacheError::RecursionExhausted { fid, index, redirect, source }
                })
            }
        }
    }

    /// Drop every cached sprite.
    pub fn invalidate(&mut self) {
        info!("invalidating sprite cache ({} sprites)", self.sprites.len());
        self.sprites.clear();
    }

    /// Palette used for sprites that do not carry their own.
    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    pub fn fetcher(&self) -> &R {
        &self.fetcher
    }
}

impl<R: ResourceFetcher> Registry<Fid, Arc<Sprite>> for SpriteCache<R> {
    fn contains(&self, key: &Fid) -> bool {
        self.sprites.contains_key(key)
    }

    fn get(&self, key: &Fid) -> Option<&Arc<Sprite>> {
        self.sprites.get(key)
    }

    fn len(&self) -> usize {
        self.sprites.len()
    }

    fn clear(&mut self) {
        self.invalidate();
    }
}
