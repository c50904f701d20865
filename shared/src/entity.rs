/// Identity of anything that can take part in a contact.
///
/// Boxes get ids from a per-session counter starting at 1; ids are never reused.
/// `0` is reserved for the static ground. The id travels through the physics engine as
/// collider user data, so every contact can be mapped back to its participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u64);

impl EntityId {
    pub const GROUND: EntityId = EntityId(0);

    /// First id handed out to a box.
    pub const FIRST_BOX: EntityId = EntityId(1);

    #[inline]
    pub fn is_ground(self) -> bool {
        self == Self::GROUND
    }

    #[inline]
    pub fn to_user_data(self) -> u128 {
        self.0 as u128
    }

    /// Recover an id from collider user data. Values wider than 64 bits were never
    /// written by this crate and map to `None`.
    #[inline]
    pub fn from_user_data(data: u128) -> Option<Self> {
        u64::try_from(data).ok().map(EntityId)
    }

    #[inline]
    pub(crate) fn next(self) -> Self {
        EntityId(self.0 + 1)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_ground() {
            write!(f, "ground")
        } else {
            write!(f, "box#{}", self.0)
        }
    }
}
