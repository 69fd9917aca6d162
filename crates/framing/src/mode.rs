/// Which anchor list is being browsed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum BrowseMode {
    #[default]
    Attachment,
    Dock,
}

impl BrowseMode {
    pub fn label(self) -> &'static str {
        match self {
            BrowseMode::Attachment => "Attach",
            BrowseMode::Dock => "Dock",
        }
    }

    pub fn other(self) -> Self {
        match self {
            BrowseMode::Attachment => BrowseMode::Dock,
            BrowseMode::Dock => BrowseMode::Attachment,
        }
    }

    /// The mode to actually browse given live list sizes.
    ///
    /// Keeps `self` when its list is non-empty, otherwise switches to the
    /// other list. `None` when both are empty.
    pub fn effective(self, attach_count: usize, dock_count: usize) -> Option<Self> {
        let count = |mode: Self| match mode {
            BrowseMode::Attachment => attach_count,
            BrowseMode::Dock => dock_count,
        };
        if count(self) > 0 {
            Some(self)
        } else if count(self.other()) > 0 {
            Some(self.other())
        } else {
            None
        }
    }
}

/// Direction of a cycle command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CycleDirection {
    Next,
    Prev,
}

impl CycleDirection {
    pub fn step(self) -> isize {
        match self {
            CycleDirection::Next => 1,
            CycleDirection::Prev => -1,
        }
    }
}

/// Brings a stepped index back into `[0, count)`.
///
/// Stepping past the end restarts at 0 and stepping below 0 lands on the
/// last entry. An index left over from a longer list also restarts at 0.
/// `count` must be non-zero.
pub fn wrap_index(candidate: isize, count: usize) -> usize {
    debug_assert!(count > 0);
    if candidate < 0 {
        count - 1
    } else if candidate as usize >= count {
        0
    } else {
        candidate as usize
    }
}

#[cfg(test)]
mod tests {
    use super::{BrowseMode, CycleDirection, wrap_index};

    #[test]
    fn effective_mode_falls_back_to_non_empty_list() {
        assert_eq!(BrowseMode::Attachment.effective(0, 3), Some(BrowseMode::Dock));
        assert_eq!(BrowseMode::Dock.effective(2, 0), Some(BrowseMode::Attachment));
        assert_eq!(BrowseMode::Dock.effective(2, 1), Some(BrowseMode::Dock));
        assert_eq!(BrowseMode::Attachment.effective(0, 0), None);
    }

    #[test]
    fn wrap_forward_and_backward() {
        assert_eq!(wrap_index(3, 3), 0);
        assert_eq!(wrap_index(-1, 3), 2);
        assert_eq!(wrap_index(1, 3), 1);
        assert_eq!(wrap_index(7, 2), 0);
        assert_eq!(wrap_index(0, 1), 0);
    }

    #[test]
    fn cycling_count_times_returns_to_start() {
        for count in 1..6usize {
            for start in 0..count {
                let mut index = start;
                for _ in 0..count {
                    index = wrap_index(index as isize + CycleDirection::Next.step(), count);
                }
                assert_eq!(index, start, "count={count} start={start}");
            }
            assert_eq!(
                wrap_index(CycleDirection::Prev.step(), count),
                count - 1,
                "count={count}"
            );
        }
    }
}
