use crate::grid::TILE_SIZE;
use macroquad::prelude::*;

/// Walker box width in pixels.
pub const ENTITY_WIDTH: f32 = 24.0;
/// Walker box height in pixels.
pub const ENTITY_HEIGHT: f32 = 36.0;

/// Horizontal intent of a walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveState {
    /// Standing still.
    #[default]
    Idle,
    /// Walking towards negative x.
    Left,
    /// Walking towards positive x.
    Right,
}

impl MoveState {
    /// Opposite direction; `Idle` stays `Idle`.
    pub fn reversed(self) -> Self {
        match self {
            MoveState::Idle => MoveState::Idle,
            MoveState::Left => MoveState::Right,
            MoveState::Right => MoveState::Left,
        }
    }

    /// -1, 0 or 1 along x.
    pub fn sign(self) -> f32 {
        match self {
            MoveState::Idle => 0.0,
            MoveState::Left => -1.0,
            MoveState::Right => 1.0,
        }
    }
}

/// A walker: fixed-size box whose `rect.x/rect.y` is its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// World-space box.
    pub rect: Rect,
    /// Pixels per second.
    pub velocity: Vec2,
    /// Walking direction.
    pub state: MoveState,
    /// Resting on a solid tile after the last step.
    pub on_ground: bool,
}

impl Entity {
    /// Idle walker with its top-left corner at `(x, y)`.
    pub fn new(x: f32, y: f32) -> Self {
        Entity {
            rect: Rect::new(x, y, ENTITY_WIDTH, ENTITY_HEIGHT),
            velocity: Vec2::ZERO,
            state: MoveState::Idle,
            on_ground: false,
        }
    }

    /// Spawn with the box's top-left on the top-left of tile `(tx, ty)`.
    pub fn at_tile(tx: usize, ty: usize) -> Self {
        Self::new((tx as u32 * TILE_SIZE) as f32, (ty as u32 * TILE_SIZE) as f32)
    }

    /// Top-left corner.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.rect.point()
    }

    /// Tile holding the top-left corner; negative when off the left/top edge.
    pub fn tile(&self) -> (i32, i32) {
        let ts = TILE_SIZE as f32;
        (
            (self.rect.x / ts).floor() as i32,
            (self.rect.y / ts).floor() as i32,
        )
    }
}

/// Ordered, index-addressable entity storage shared by the editor and the
/// play loop. Removal swaps the last element in, so order after a removal
/// is unspecified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityList {
    items: Vec<Entity>,
}

impl EntityList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the end.
    pub fn push(&mut self, entity: Entity) {
        self.items.push(entity);
    }

    /// Panics when `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Entity {
        assert!(
            index < self.items.len(),
            "entity index {index} out of range (len {})",
            self.items.len()
        );
        self.items.swap_remove(index)
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// No entities.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entity at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.items.get(index)
    }

    /// Mutable entity at `index`, if any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.items.get_mut(index)
    }

    /// Iterate in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.items.iter()
    }

    /// Iterate mutably in storage order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Entity> {
        self.items.iter_mut()
    }

    /// Contents as a slice.
    pub fn as_slice(&self) -> &[Entity] {
        &self.items
    }

    /// Remove every entity whose box overlaps tile `(tx, ty)`. Returns how
    /// many were removed.
    pub fn remove_at_tile(&mut self, tx: usize, ty: usize) -> usize {
        let ts = TILE_SIZE as f32;
        let cell = Rect::new(tx as f32 * ts, ty as f32 * ts, ts, ts);
        let before = self.items.len();
        let mut i = 0;
        while i < self.items.len() {
            if overlaps(&self.items[i].rect, &cell) {
                self.items.swap_remove(i);
            } else {
                i += 1;
            }
        }
        before - self.items.len()
    }
}

/// Strict box intersection: boxes that only share an edge do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

impl<'a> IntoIterator for &'a EntityList {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Entity> for EntityList {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        EntityList {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(n: usize) -> EntityList {
        (0..n).map(|i| Entity::at_tile(i, 0)).collect()
    }

    #[test]
    fn at_tile_uses_pixel_space() {
        let e = Entity::at_tile(10, 5);
        assert_eq!(e.position(), vec2(360.0, 180.0));
        assert_eq!(e.tile(), (10, 5));
        assert_eq!(e.state, MoveState::Idle);
    }

    #[test]
    fn remove_swaps_last_into_place() {
        let mut list = list_of(4);
        let removed = list.remove(1);
        assert_eq!(removed.tile(), (1, 0));
        assert_eq!(list.len(), 3);
        let tiles: Vec<_> = list.iter().map(|e| e.tile().0).collect();
        assert_eq!(tiles, vec![0, 3, 2]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn remove_from_empty_panics() {
        EntityList::new().remove(0);
    }

    #[test]
    fn remove_at_tile_only_hits_overlapping_boxes() {
        let mut list = list_of(3);
        list.push(Entity::at_tile(1, 0));
        assert_eq!(list.remove_at_tile(1, 0), 2);
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|e| e.tile() != (1, 0)));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 36.0, 36.0);
        let b = Rect::new(36.0, 0.0, 36.0, 36.0);
        assert!(!overlaps(&a, &b));
        assert!(overlaps(&a, &Rect::new(35.0, 35.0, 2.0, 2.0)));
    }

    #[test]
    fn clear_empties() {
        let mut list = list_of(2);
        list.clear();
        assert!(list.is_empty());
    }
}
