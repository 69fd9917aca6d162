/// Generational handle: `(index, generation)`.
///
/// Handles are plain identifiers. They never own or dereference what they
/// name; all access goes through whoever issued them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(u32, u32);

impl Handle {
    pub fn new(index: u32, generation: u32) -> Self {
        Handle(index, generation)
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    pub fn generation(&self) -> u32 {
        self.1
    }
}

#[cfg(test)]
mod tests {
    use super::Handle;

    #[test]
    fn generation_breaks_equality() {
        let h = Handle::new(3, 0);
        let stale = Handle::new(3, 1);
        assert_eq!(stale.index(), h.index());
        assert_eq!(stale.generation(), 1);
        assert_ne!(h, stale);
    }
}
