//! Global pointer-cursor affordance.
//!
//! The cursor is page-wide state shared by every hoverable object. Each
//! hovered object holds a [`CursorLease`]; the cursor shows `Pointer` while
//! at least one lease is alive and reverts to `Auto` when the last one drops,
//! including drops caused by unmounting mid-hover.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorStyle {
    Auto,
    Pointer,
}

impl CursorStyle {
    pub fn as_css(self) -> &'static str {
        match self {
            CursorStyle::Auto => "auto",
            CursorStyle::Pointer => "pointer",
        }
    }
}

/// Applies a cursor style to whatever surface owns the cursor.
pub trait CursorSink {
    fn apply(&self, style: CursorStyle);
}

struct Shared {
    holders: Cell<u32>,
    sink: Box<dyn CursorSink>,
}

#[derive(Clone)]
pub struct PointerCursor {
    shared: Rc<Shared>,
}

impl fmt::Debug for PointerCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerCursor")
            .field("holders", &self.shared.holders.get())
            .finish()
    }
}

impl PointerCursor {
    pub fn new(sink: impl CursorSink + 'static) -> Self {
        Self {
            shared: Rc::new(Shared {
                holders: Cell::new(0),
                sink: Box::new(sink),
            }),
        }
    }

    pub fn acquire(&self) -> CursorLease {
        let n = self.shared.holders.get();
        self.shared.holders.set(n + 1);
        if n == 0 {
            self.shared.sink.apply(CursorStyle::Pointer);
        }
        CursorLease {
            shared: self.shared.clone(),
        }
    }

    pub fn holders(&self) -> u32 {
        self.shared.holders.get()
    }

    pub fn style(&self) -> CursorStyle {
        if self.holders() > 0 {
            CursorStyle::Pointer
        } else {
            CursorStyle::Auto
        }
    }
}

/// Releases its hold on the pointer cursor when dropped.
pub struct CursorLease {
    shared: Rc<Shared>,
}

impl fmt::Debug for CursorLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CursorLease")
    }
}

impl Drop for CursorLease {
    fn drop(&mut self) {
        let n = self.shared.holders.get().saturating_sub(1);
        self.shared.holders.set(n);
        if n == 0 {
            self.shared.sink.apply(CursorStyle::Auto);
        }
    }
}

/// Sink that discards updates; for scenes without a cursor owner.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCursor;

impl CursorSink for NoCursor {
    fn apply(&self, _style: CursorStyle) {}
}
