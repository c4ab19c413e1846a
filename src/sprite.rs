use crate::error::SimError;
use crate::vector::Vector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    /// Static decoration spawned from the map.
    Object,
    /// Moves every frame, removed on wall contact.
    Projectile,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub position: Vector,
    /// Tiles per second.
    pub velocity: Vector,
    pub image: u32,
    pub kind: SpriteKind,
}

impl Sprite {
    pub fn object(position: Vector, image: u32) -> Self {
        Self {
            position,
            velocity: Vector::ZERO,
            image,
            kind: SpriteKind::Object,
        }
    }

    pub fn projectile(position: Vector, velocity: Vector, image: u32) -> Self {
        Self {
            position,
            velocity,
            image,
            kind: SpriteKind::Projectile,
        }
    }
}

/// Insertion-ordered sprite storage. Indices are only stable until the next
/// `create` or `delete`.
#[derive(Debug, Default, Clone)]
pub struct SpriteRegistry {
    sprites: Vec<Sprite>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, sprite: Sprite) {
        self.sprites.push(sprite);
    }

    /// Remove the sprite at `index`, shifting later sprites down by one.
    /// Out-of-range indices are logged and leave the registry unchanged.
    pub fn delete(&mut self, index: usize) -> Result<Sprite, SimError> {
        if index >= self.sprites.len() {
            let err = SimError::InvalidSpriteIndex {
                index,
                count: self.sprites.len(),
            };
            log::warn!("sprite delete ignored: {err}");
            return Err(err);
        }
        Ok(self.sprites.remove(index))
    }

    pub fn count(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<&Sprite> {
        self.sprites.get(index)
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut Sprite> {
        self.sprites.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sprite> {
        self.sprites.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Sprite> {
        self.sprites.iter_mut()
    }
}
