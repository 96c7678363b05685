//! Drag-and-drop container state.
//!
//! Nothing here is stored between renders. The host reports transient drag
//! signals and [`derive_dropzone_state`] turns them, together with the
//! disabled flag, into the state the container shows. Refused drops are
//! reported through the error banner, not the container.

/// Transient signals reported by the host while the user interacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragSignals {
    /// The dropzone's input has keyboard focus
    pub focused: bool,
    /// Files are being dragged over the dropzone
    pub dragging: bool,
    /// Whether every dragged item looks acceptable; `None` when the host
    /// cannot tell before the drop
    pub items_valid: Option<bool>,
}

impl DragSignals {
    /// Files hovering over an unfocused dropzone.
    pub fn hovering(items_valid: Option<bool>) -> Self {
        Self {
            focused: false,
            dragging: true,
            items_valid,
        }
    }

    /// Drag entered or moved; keyboard focus is left as it was.
    pub fn drag_over(self, items_valid: Option<bool>) -> Self {
        Self {
            dragging: true,
            items_valid,
            ..self
        }
    }

    /// Drag left without dropping; back to the pre-drag signals.
    pub fn drag_leave(self) -> Self {
        Self {
            focused: self.focused,
            ..Self::default()
        }
    }
}

/// What the dropzone container looks like right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropzoneState {
    Idle,
    /// Focused or hovered, validity unknown
    Focused,
    /// Hovering with items that all pass validation
    AcceptPreview,
    /// Hovering with at least one invalid item
    RejectPreview,
    Disabled,
}

impl DropzoneState {
    /// Class modifier appended to the base container class.
    pub fn css_class(&self) -> &'static str {
        match self {
            DropzoneState::Idle => "db-dropzone--idle",
            DropzoneState::Focused => "db-dropzone--active",
            DropzoneState::AcceptPreview => "db-dropzone--accept",
            DropzoneState::RejectPreview => "db-dropzone--reject",
            DropzoneState::Disabled => "db-dropzone--disabled",
        }
    }

    pub fn accepts_input(&self) -> bool {
        !matches!(self, DropzoneState::Disabled)
    }
}

/// Derives the container state.
///
/// `Disabled` pre-empts everything. During a drag the item validity decides
/// between the previews; otherwise focus decides between `Focused` and `Idle`.
pub fn derive_dropzone_state(signals: DragSignals, disabled: bool) -> DropzoneState {
    if disabled {
        return DropzoneState::Disabled;
    }

    if signals.dragging {
        return match signals.items_valid {
            Some(true) => DropzoneState::AcceptPreview,
            Some(false) => DropzoneState::RejectPreview,
            None => DropzoneState::Focused,
        };
    }

    if signals.focused {
        DropzoneState::Focused
    } else {
        DropzoneState::Idle
    }
}
