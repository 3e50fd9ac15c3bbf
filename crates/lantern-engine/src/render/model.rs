use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::coords::Transform;
use crate::device::Backend;
use crate::shader::ShaderProgram;

use super::{RenderContext, RenderError, Shape};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ModelId(u64);

impl ModelId {
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Ordered shapes drawn under one transform and one program activation.
///
/// Insertion order is paint order. Shapes are appended, never removed.
pub struct Model<B: Backend> {
    id: ModelId,
    shapes: RefCell<Vec<Rc<Shape<B>>>>,
    transform: Cell<Transform>,
    shader: Option<Rc<ShaderProgram<B>>>,
}

impl<B: Backend> Model<B> {
    pub(crate) fn new(id: u64, shader: Option<Rc<ShaderProgram<B>>>) -> Self {
        Self {
            id: ModelId(id),
            shapes: RefCell::new(Vec::new()),
            transform: Cell::new(Transform::IDENTITY),
            shader,
        }
    }

    #[inline]
    pub fn id(&self) -> ModelId {
        self.id
    }

    pub fn add_shape(&self, shape: Rc<Shape<B>>) {
        self.shapes.borrow_mut().push(shape);
    }

    /// Snapshot of the shape list, in paint order.
    pub fn shapes(&self) -> Vec<Rc<Shape<B>>> {
        self.shapes.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.shapes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform.get()
    }

    pub fn set_transform(&self, transform: Transform) {
        self.transform.set(transform);
    }

    /// Program override; `None` means the context's default.
    pub fn shader(&self) -> Option<&Rc<ShaderProgram<B>>> {
        self.shader.as_ref()
    }

    /// Draws every shape on `target`, activating the program once for the
    /// whole model.
    pub fn draw(&self, ctx: &RenderContext<B>, target: Option<&B::Texture>) -> Result<(), RenderError> {
        ctx.render_to(target, &self.transform.get())?;
        match &self.shader {
            Some(program) => ctx.use_program(Some(program), false)?,
            None => ctx.use_default_program(false)?,
        }

        let shapes = self.shapes.borrow();
        let drawn = shapes.iter().filter(|shape| shape.submit(ctx.backend())).count();
        log::trace!("model {} drew {drawn}/{} shape(s)", self.id.get(), shapes.len());
        Ok(())
    }
}
