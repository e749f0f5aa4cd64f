//! Display surfaces the HUD draws and items toggle.
//!
//! The HUD owns these; an item only keeps a handle. Handles are clones of
//! the same `Rc`, so a change made by the item is what the HUD draws next.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Default)]
struct TextState {
    visible: bool,
    text: String,
}

/// A line of text that can be shown or hidden.
#[derive(Debug, Clone, Default)]
pub struct TextSurface(Rc<RefCell<TextState>>);

impl TextSurface {
    pub fn new(text: impl Into<String>) -> Self {
        TextSurface(Rc::new(RefCell::new(TextState {
            visible: false,
            text: text.into(),
        })))
    }

    pub fn set_visible(&self, visible: bool) {
        self.0.borrow_mut().visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.0.borrow().visible
    }

    pub fn set_text(&self, text: &str) {
        let mut state = self.0.borrow_mut();
        state.text.clear();
        state.text.push_str(text);
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }
}

/// Something with only an on/off switch: the description panel, or the
/// inspection view drawn over the world.
#[derive(Debug, Clone, Default)]
pub struct Panel(Rc<Cell<bool>>);

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active(&self, active: bool) {
        self.0.set(active);
    }

    pub fn is_active(&self) -> bool {
        self.0.get()
    }
}
