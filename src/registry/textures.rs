//! The texture registry.
//!
//! Textures are stored in registration order and the position of a texture in the registry is
//! also the texture unit it gets bound to by [`TextureRegistry::bind_all`]. The shader refers to
//! a texture by that slot number.

use std::path::Path;

use image::DynamicImage;
use indexmap::IndexMap;

use crate::{
    abs::{DecodedImage, TextureDevice},
    error::TextureError,
};

/// The amount of texture units the registry hands out by default.
pub const MAX_TEXTURES: usize = 16;

/// Owns every GPU texture of a scene and maps tags to texture slots.
pub struct TextureRegistry<D: TextureDevice> {
    device: D,
    entries: IndexMap<String, D::Handle>,
    capacity: usize,
}

impl<D: TextureDevice> TextureRegistry<D> {
    /// Creates an empty registry with [`MAX_TEXTURES`] slots.
    pub fn new(device: D) -> Self {
        Self::with_capacity(device, MAX_TEXTURES)
    }

    /// Creates an empty registry with the given amount of slots.
    pub fn with_capacity(device: D, capacity: usize) -> Self {
        Self {
            device,
            entries: IndexMap::with_capacity(capacity),
            capacity,
        }
    }

    /// Loads the image at `path` and registers it under `tag`, returning its slot.
    pub fn register(&mut self, path: impl AsRef<Path>, tag: &str) -> Result<u32, TextureError> {
        let path = path.as_ref();
        self.check_insert(tag)?;
        let image = DecodedImage::open(path)?;
        log::info!(
            "Loaded image {}, width: {}, height: {}, channels: {}",
            path.display(),
            image.width,
            image.height,
            image.layout.channels()
        );
        self.insert(image, tag)
    }

    /// Registers an already decoded image under `tag`, returning its slot.
    pub fn register_image(&mut self, image: DynamicImage, tag: &str) -> Result<u32, TextureError> {
        self.check_insert(tag)?;
        self.insert(DecodedImage::from_dynamic(image)?, tag)
    }

    /// Rejects the tag before any decoding or GPU work happens.
    fn check_insert(&self, tag: &str) -> Result<(), TextureError> {
        if self.entries.contains_key(tag) {
            return Err(TextureError::DuplicateTag(tag.to_string()));
        }
        if self.entries.len() >= self.capacity {
            log::warn!(
                "Texture registry is full ({} slots), '{}' not stored",
                self.capacity,
                tag
            );
            return Err(TextureError::CapacityExceeded {
                tag: tag.to_string(),
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    fn insert(&mut self, image: DecodedImage, tag: &str) -> Result<u32, TextureError> {
        let handle = self.device.upload(&image)?;
        let (slot, _) = self.entries.insert_full(tag.to_string(), handle);
        Ok(slot as u32)
    }

    /// Binds every texture to the texture unit matching its slot.
    pub fn bind_all(&mut self) {
        for (unit, handle) in self.entries.values().enumerate() {
            self.device.bind(*handle, unit as u32);
        }
    }

    /// Returns the GPU handle of the texture registered under `tag`.
    pub fn lookup(&self, tag: &str) -> Option<D::Handle> {
        self.entries.get(tag).copied()
    }

    /// Returns the slot of the texture registered under `tag`.
    pub fn slot(&self, tag: &str) -> Option<u32> {
        self.entries.get_index_of(tag).map(|slot| slot as u32)
    }

    /// Destroys every texture and empties the registry.
    pub fn release_all(&mut self) {
        for (_, handle) in self.entries.drain(..) {
            self.device.delete(handle);
        }
    }

    /// Iterates over `(tag, slot)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries
            .keys()
            .enumerate()
            .map(|(slot, tag)| (tag.as_str(), slot as u32))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}

impl<D: TextureDevice> Drop for TextureRegistry<D> {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDevice;
    use image::{GrayAlphaImage, LumaA, Rgb, RgbImage, Rgba, RgbaImage};

    fn rgb() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])))
    }

    fn rgba() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 4])))
    }

    fn gray_alpha() -> DynamicImage {
        DynamicImage::ImageLumaA8(GrayAlphaImage::from_pixel(4, 4, LumaA([1, 2])))
    }

    fn temp_image(name: &str, image: &DynamicImage) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("campsite3d-tests-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn test_registered_tags_resolve_to_slots() {
        let mut registry = TextureRegistry::new(FakeDevice::default());
        assert_eq!(registry.register_image(rgb(), "ground").unwrap(), 0);
        assert_eq!(registry.register_image(rgba(), "sky").unwrap(), 1);

        assert_eq!(registry.slot("ground"), Some(0));
        assert_eq!(registry.slot("sky"), Some(1));
        assert!(registry.lookup("ground").is_some());
        assert_ne!(registry.lookup("ground"), registry.lookup("sky"));
        assert_eq!(registry.lookup("rock"), None);
        assert_eq!(registry.slot("rock"), None);
        assert_eq!(registry.device().uploads, vec![(4, 4, 3), (4, 4, 4)]);
    }

    #[test]
    fn test_capacity_is_enforced_without_leaking() {
        let mut registry = TextureRegistry::with_capacity(FakeDevice::default(), 2);
        registry.register_image(rgb(), "a").unwrap();
        registry.register_image(rgb(), "b").unwrap();
        let result = registry.register_image(rgb(), "c");

        assert!(matches!(
            result,
            Err(TextureError::CapacityExceeded { capacity: 2, .. })
        ));
        assert_eq!(registry.lookup("c"), None);
        assert_eq!(registry.slot("a"), Some(0));
        assert_eq!(registry.slot("b"), Some(1));
        assert_eq!(registry.device().live.len(), 2);
    }

    #[test]
    fn test_duplicate_tag_keeps_first_registration() {
        let mut registry = TextureRegistry::new(FakeDevice::default());
        registry.register_image(rgb(), "rock").unwrap();
        let first = registry.lookup("rock");
        let result = registry.register_image(rgba(), "rock");

        assert!(matches!(result, Err(TextureError::DuplicateTag(tag)) if tag == "rock"));
        assert_eq!(registry.lookup("rock"), first);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.device().uploads.len(), 1);
    }

    #[test]
    fn test_bind_all_uses_registration_order() {
        let mut registry = TextureRegistry::new(FakeDevice::default());
        registry.register_image(rgb(), "tent").unwrap();
        registry.register_image(rgb(), "ground").unwrap();
        registry.register_image(rgb(), "campfire").unwrap();
        registry.bind_all();

        let handles: Vec<_> = ["tent", "ground", "campfire"]
            .iter()
            .map(|tag| registry.lookup(tag).unwrap())
            .collect();
        assert_eq!(
            registry.device().bound,
            vec![(handles[0], 0), (handles[1], 1), (handles[2], 2)]
        );
    }

    #[test]
    fn test_release_all() {
        let mut empty = TextureRegistry::new(FakeDevice::default());
        empty.release_all();
        assert!(empty.is_empty());

        let mut registry = TextureRegistry::new(FakeDevice::default());
        registry.register_image(rgb(), "bark").unwrap();
        registry.register_image(rgba(), "metal").unwrap();
        registry.release_all();

        assert!(registry.is_empty());
        assert!(registry.device().live.is_empty());
        assert_eq!(registry.lookup("bark"), None);
        assert_eq!(registry.slot("metal"), None);
    }

    #[test]
    fn test_register_from_files() {
        let a = temp_image("a.png", &rgba());
        let b = temp_image("b.png", &gray_alpha());
        let mut registry = TextureRegistry::new(FakeDevice::default());

        assert_eq!(registry.register(&a, "A").unwrap(), 0);
        assert!(matches!(
            registry.register(&b, "B"),
            Err(TextureError::UnsupportedChannels { channels: 2 })
        ));
        assert!(matches!(
            registry.register(a.with_file_name("missing.png"), "C"),
            Err(TextureError::Decode { .. })
        ));

        assert!(registry.lookup("A").is_some());
        assert_eq!(registry.lookup("B"), None);
        assert_eq!(registry.lookup("C"), None);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.device().live.len(), 1);
    }

    #[test]
    fn test_iter_lists_tags_in_slot_order() {
        let mut registry = TextureRegistry::new(FakeDevice::default());
        registry.register_image(rgb(), "sky").unwrap();
        registry.register_image(rgb(), "rock").unwrap();
        let tags: Vec<_> = registry.iter().collect();
        assert_eq!(tags, vec![("sky", 0), ("rock", 1)]);
    }
}
