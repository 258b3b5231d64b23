//! Pointer event model consumed by the drag gesture machine.
//!
//! Hosts translate their native pointer events into [`PointerEvent`] values.
//! Only the vertical coordinate matters to the sheet; the rest of the event
//! describes which button was pressed and what kind of element was hit, so
//! the gesture machine can refuse drags that should not start.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Back,
    Forward,
}

/// Classification of the element under the pointer.
///
/// Interactive children (buttons, inputs, links, editable regions) must keep
/// receiving their own clicks; a pointer-down on them never starts a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetRole {
    /// Plain, non-interactive content.
    Passive,
    Button,
    TextInput,
    Link,
    Editable,
}

impl TargetRole {
    pub fn is_interactive(&self) -> bool {
        !matches!(self, TargetRole::Passive)
    }
}

/// Region of the sheet the pointer went down on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SheetRegion {
    /// The grab handle strip at the top; always draggable.
    Header,
    /// Scrollable content; draggable only with `expand_on_content_drag`.
    Content,
    Footer,
}

/// A normalized pointer event delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Vertical pointer position, in the host's client coordinates
    /// (larger values are further down the screen).
    pub client_y: f32,
    pub button: PointerButton,
    pub target: TargetRole,
    pub region: SheetRegion,
}

impl PointerEvent {
    /// Primary-button event on passive header content, the common case.
    pub fn primary(client_y: f32) -> Self {
        Self {
            client_y,
            button: PointerButton::Primary,
            target: TargetRole::Passive,
            region: SheetRegion::Header,
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_target(mut self, target: TargetRole) -> Self {
        self.target = target;
        self
    }

    pub fn with_region(mut self, region: SheetRegion) -> Self {
        self.region = region;
        self
    }
}
