//! Card stacks.
//!
//! A stack's element is expected to contain exactly one `top`, one
//! `contents` and one `height` element. Child cards live inside `contents`;
//! after every change the stack copies the last card into `top` (when face
//! up) and writes the card count into `height` (when shown).

use std::rc::Rc;

use crate::components::{Component, ComponentId, ComponentKind, StackParts};
use crate::core::{ElementId, Result, StackConfig, TableError};

use super::{LocationHooks, Table};

impl LocationHooks {
    /// Children go through the inner `contents` element.
    pub const STACK: Self = Self {
        append_child_element: append_to_contents,
        insert_before_element: insert_into_contents,
        remove_child_element: remove_from_contents,
        post_remove: refresh_after_removal,
        ..Self::AREA
    };
}

impl Table {
    /// Create a stack over `element`.
    ///
    /// All three sub-elements are looked up before anything is changed, so a
    /// missing or ambiguous one fails construction with no side effects.
    /// Disabled options remove their sub-element from the stack.
    pub fn create_stack(
        &mut self,
        element: ElementId,
        config: StackConfig,
        behavior: impl Component + 'static,
    ) -> Result<ComponentId> {
        if !self.doc.is_live(element) {
            return Err(TableError::StaleElement(element));
        }
        let top = self.child(element, "top")?;
        let contents = self.child(element, "contents")?;
        let height = self.child(element, "height")?;

        let top = if config.face_up {
            Some(top)
        } else {
            self.doc.discard(top);
            None
        };
        if !config.inspectable {
            // Still holds the cards, just not inside the stack's element.
            self.doc.detach(contents);
        }
        let height = if config.show_height {
            Some(height)
        } else {
            self.doc.discard(height);
            None
        };

        let parts = StackParts { top, contents, height, config };
        let id = self.spawn(element, ComponentKind::Stack(parts), Rc::new(behavior));
        self.refresh_stack(id)?;
        Ok(id)
    }

    fn stack_parts(&self, stack: ComponentId) -> Result<StackParts> {
        self.kind(stack)
            .and_then(ComponentKind::stack_parts)
            .copied()
            .ok_or(TableError::UnknownComponent(stack.0))
    }

    /// The card currently on top of a stack (its last child).
    #[must_use]
    pub fn top_card(&self, stack: ComponentId) -> Option<ComponentId> {
        self.kind(stack)?.stack_parts()?;
        self.children(stack).last().copied()
    }

    /// Redraw the top-card copy and height indicator from `contents`.
    pub(crate) fn refresh_stack(&mut self, stack: ComponentId) -> Result<()> {
        let parts = self.stack_parts(stack)?;
        let last = self.doc.children(parts.contents).last().copied();

        if let Some(top) = parts.top {
            let stale: Vec<ElementId> = self.doc.children(top).to_vec();
            for old in stale {
                self.doc.discard(old);
            }
            if let Some(last) = last {
                let copy = self.doc.deep_clone(last)?;
                self.doc.append_child(top, copy)?;
            }
        }
        if let Some(height) = parts.height {
            let count = self.doc.children(parts.contents).len();
            self.doc.set_text(height, count.to_string());
        }
        Ok(())
    }
}

fn append_to_contents(table: &mut Table, stack: ComponentId, child: ElementId) -> Result<()> {
    let parts = table.stack_parts(stack)?;
    table.doc.append_child(parts.contents, child)?;
    table.refresh_stack(stack)
}

fn insert_into_contents(
    table: &mut Table,
    stack: ComponentId,
    child: ElementId,
    before: ElementId,
) -> Result<()> {
    let parts = table.stack_parts(stack)?;
    table.doc.insert_before(parts.contents, child, before)?;
    table.refresh_stack(stack)
}

fn remove_from_contents(table: &mut Table, stack: ComponentId, child: ElementId) -> Result<()> {
    let parts = table.stack_parts(stack)?;
    table.doc.remove_child(parts.contents, child)?;
    table.refresh_stack(stack)
}

fn refresh_after_removal(table: &mut Table, stack: ComponentId, _target: ComponentId) {
    if let Err(err) = table.refresh_stack(stack) {
        tracing::warn!(%stack, %err, "stack refresh failed");
    }
}
