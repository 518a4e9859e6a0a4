use bitflags::bitflags;

bitflags! {
    /// A bit mask representing collision group membership
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CollisionGroups: u32 {
        /// Default group for free-standing nodes
        const DEFAULT = 0x0001;

        /// Static scenery (locked anchors, terrain outlines)
        const STATIC = 0x0002;

        /// Dynamic gameplay objects
        const DYNAMIC = 0x0004;

        /// Debris and particles that may use simplified collision
        const DEBRIS = 0x0008;

        /// Sensor nodes that observe contacts without mattering to gameplay
        const SENSOR = 0x0010;

        /// User-defined group 6
        const GROUP6 = 0x0020;

        /// User-defined group 7
        const GROUP7 = 0x0040;

        /// User-defined group 8
        const GROUP8 = 0x0080;
    }
}

/// Group membership and mask pair refining which node pairs may collide.
///
/// Two nodes collide only if each one's mask intersects the other's
/// memberships. The default filter collides with everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionFilter {
    /// The groups this node belongs to
    pub memberships: CollisionGroups,

    /// The groups this node is allowed to collide with
    pub mask: CollisionGroups,
}

impl CollisionFilter {
    /// Creates a new filter from a membership/mask pair
    pub fn new(memberships: CollisionGroups, mask: CollisionGroups) -> Self {
        Self { memberships, mask }
    }

    /// Returns true if the two filters allow a collision between their owners
    pub fn should_collide(&self, other: &CollisionFilter) -> bool {
        self.mask.intersects(other.memberships) && other.mask.intersects(self.memberships)
    }
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            memberships: CollisionGroups::DEFAULT,
            mask: CollisionGroups::all(),
        }
    }
}
