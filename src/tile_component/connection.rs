use bitflags::bitflags;

bitflags! {
    /// Sides of a road or river tile that connect to a matching neighbour.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ConnectionMask: u8 {
        const TOP = 0b0001;
        const BOTTOM = 0b0010;
        const LEFT = 0b0100;
        const RIGHT = 0b1000;
    }
}

impl ConnectionMask {
    /// Index of the sprite variant drawn for this combination of connected sides.
    ///
    /// Straight pieces share a variant with their dead ends. `None` means no side connects and
    /// the plain sprite is used.
    pub fn variant(self) -> Option<u8> {
        let top = self.contains(Self::TOP);
        let bottom = self.contains(Self::BOTTOM);
        let left = self.contains(Self::LEFT);
        let right = self.contains(Self::RIGHT);
        match (top, bottom, left, right) {
            (false, false, false, false) => None,
            (false, false, true, false)
            | (false, false, false, true)
            | (false, false, true, true) => Some(0),
            (true, false, false, false)
            | (false, true, false, false)
            | (true, true, false, false) => Some(1),
            (true, false, true, false) => Some(2),
            (true, false, false, true) => Some(3),
            (false, true, true, false) => Some(4),
            (false, true, false, true) => Some(5),
            (true, true, false, true) => Some(6),
            (true, true, true, false) => Some(7),
            (true, false, true, true) => Some(8),
            (false, true, true, true) => Some(9),
            (true, true, true, true) => Some(10),
        }
    }
}
