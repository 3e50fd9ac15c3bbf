use std::cell::Cell;

use crate::shader::ProgramId;

use super::Backend;

/// Shared GPU state for one rendering context.
///
/// Owns the backend and the single "currently active program" cell. Every
/// resource created from a [`RenderContext`](crate::render::RenderContext) holds
/// an `Rc<Gpu<B>>`, so there is exactly one cell per context and it is never
/// copied.
///
/// The active cell only observes a program by id; it keeps nothing alive.
pub struct Gpu<B: Backend> {
    backend: B,
    active_program: Cell<Option<ProgramId>>,
    next_id: Cell<u64>,
}

impl<B: Backend> Gpu<B> {
    pub(crate) fn new(backend: B) -> Self {
        Self {
            backend,
            active_program: Cell::new(None),
            next_id: Cell::new(1),
        }
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Id of the program currently bound, or `None` for the built-in one.
    #[inline]
    pub fn active_program(&self) -> Option<ProgramId> {
        self.active_program.get()
    }

    #[inline]
    pub(crate) fn set_active_program(&self, id: Option<ProgramId>) {
        self.active_program.set(id);
    }

    /// Returns a fresh id. Ids are never reused within a context.
    pub(crate) fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}
