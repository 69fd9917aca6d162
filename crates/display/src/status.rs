use framing::{BrowseMode, TargetSelector};
use host::VesselQuery;

/// Read-only values for the overlay text.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReadout {
    pub target_name: String,
    pub mode: BrowseMode,
    pub index: usize,
    pub parent_frame: bool,
    /// Full field of view, twice the stored half angle.
    pub fov_full_deg: f64,
    pub offset_m: f64,
    /// Whether the target currently has any dock or attachment points.
    pub has_targets: bool,
}

impl StatusReadout {
    /// Reads the selector state plus the live anchor counts of its target.
    pub fn read<Q>(selector: &TargetSelector, host: &Q) -> Self
    where
        Q: VesselQuery + ?Sized,
    {
        let target = selector.target();
        let has_targets = host.dock_count(target) > 0
            || host.attachment_count(target, selector.parent_frame()) > 0;
        Self {
            target_name: host.vessel_name(target).unwrap_or_else(|| "?".to_string()),
            mode: selector.mode(),
            index: selector.index(),
            parent_frame: selector.parent_frame(),
            fov_full_deg: selector.fov().full_deg(),
            offset_m: selector.offset_m(),
            has_targets,
        }
    }

    pub fn frame_label(&self) -> &'static str {
        if self.parent_frame { "Parent" } else { "Child" }
    }

    pub fn title(&self) -> String {
        format!(
            "Viewing {} {}({})",
            self.target_name,
            self.mode.label(),
            self.index
        )
    }

    pub fn footer(&self) -> String {
        format!(
            "[{}] FOV={:.0}\u{b0} Ofs={:.2}[m]",
            self.frame_label(),
            self.fov_full_deg,
            self.offset_m
        )
    }
}

#[cfg(test)]
mod tests {
    use super::StatusReadout;
    use framing::BrowseMode;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_title_and_footer() {
        let status = StatusReadout {
            target_name: "Station".to_string(),
            mode: BrowseMode::Dock,
            index: 2,
            parent_frame: false,
            fov_full_deg: 60.0,
            offset_m: -0.3,
            has_targets: true,
        };
        assert_eq!(status.title(), "Viewing Station Dock(2)");
        assert_eq!(status.footer(), "[Child] FOV=60\u{b0} Ofs=-0.30[m]");
    }
}
