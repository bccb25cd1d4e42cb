use std::fmt;
use std::sync::Arc;

use crate::errors::Result;

/// Platform-side id of a fetched buffer, handed back on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(pub u64);

/// Raw bytes fetched from platform storage.
#[derive(Clone, PartialEq, Eq)]
pub struct ResourceBuffer {
    pub data: Vec<u8>,
    pub id: ResourceId,
}

impl fmt::Debug for ResourceBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceBuffer")
            .field("id", &self.id)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Fetch/release pair backed by platform storage (bundle, asset manager,
/// file system).
///
/// Every successful `fetch` is matched by exactly one `release` of the same id.
pub trait ResourceLoader: Send + Sync {
    fn fetch(&self, uri: &str) -> Result<ResourceBuffer>;

    fn release(&self, id: ResourceId);
}

/// A fetched buffer that releases itself back to its loader when dropped.
pub struct FetchedResource {
    buffer: Option<ResourceBuffer>,
    loader: Arc<dyn ResourceLoader>,
}

impl FetchedResource {
    pub fn fetch(loader: Arc<dyn ResourceLoader>, uri: &str) -> Result<Self> {
        let buffer = loader.fetch(uri)?;
        Ok(Self {
            buffer: Some(buffer),
            loader,
        })
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.buffer.as_ref().map_or(&[], |b| b.data.as_slice())
    }

    #[must_use]
    pub fn id(&self) -> Option<ResourceId> {
        self.buffer.as_ref().map(|b| b.id)
    }
}

impl fmt::Debug for FetchedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchedResource")
            .field("buffer", &self.buffer)
            .finish_non_exhaustive()
    }
}

impl Drop for FetchedResource {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            log::trace!("Releasing resource {:?}", buffer.id);
            self.loader.release(buffer.id);
        }
    }
}
