use bevy_ecs::prelude::Component;

use crate::components::actor::Facing;
use crate::geometry::Rect;

/// Hitbox expressed as insets from the actor's [`MapPosition`] rectangle.
///
/// Insets are given for a right-facing sprite; left and right swap when the
/// actor faces left so the hitbox follows the mirrored body.
///
/// [`MapPosition`]: crate::components::mapposition::MapPosition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Component)]
pub struct BoxCollider {
    pub inset_left: i32,
    pub inset_right: i32,
    pub inset_top: i32,
    pub inset_bottom: i32,
}

impl BoxCollider {
    pub fn new(inset_left: i32, inset_right: i32, inset_top: i32, inset_bottom: i32) -> Self {
        Self {
            inset_left,
            inset_right,
            inset_top,
            inset_bottom,
        }
    }

    /// Hitbox for `rect`. Never smaller than 1x1.
    pub fn hitbox(&self, rect: &Rect, facing: Facing) -> Rect {
        let (left, right) = match facing {
            Facing::Right => (self.inset_left, self.inset_right),
            Facing::Left => (self.inset_right, self.inset_left),
        };
        Rect::new(
            rect.x + left,
            rect.y + self.inset_top,
            (rect.w - left - right).max(1),
            (rect.h - self.inset_top - self.inset_bottom).max(1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_insets_match_rect() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(BoxCollider::default().hitbox(&rect, Facing::Right), rect);
    }

    #[test]
    fn test_insets_mirror_with_facing() {
        let collider = BoxCollider::new(10, 30, 5, 0);
        let rect = Rect::new(0, 0, 100, 50);
        assert_eq!(collider.hitbox(&rect, Facing::Right), Rect::new(10, 5, 60, 45));
        assert_eq!(collider.hitbox(&rect, Facing::Left), Rect::new(30, 5, 60, 45));
    }

    #[test]
    fn test_hitbox_never_degenerate() {
        let collider = BoxCollider::new(40, 40, 40, 40);
        let hb = collider.hitbox(&Rect::new(0, 0, 20, 20), Facing::Right);
        assert_eq!((hb.w, hb.h), (1, 1));
    }
}
