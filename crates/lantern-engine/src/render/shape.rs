use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::coords::Transform;
use crate::device::Backend;
use crate::geometry::{IndexBuffer, Topology, VertexBuffer};

use super::{RenderContext, RenderError};

/// One draw call: vertices, optional indices, optional texture, a topology.
///
/// Buffers and texture are shared references and can be swapped after
/// creation; the previous reference is released on swap.
pub struct Shape<B: Backend> {
    topology: Cell<Topology>,
    vertices: RefCell<Rc<VertexBuffer<B>>>,
    indices: RefCell<Option<Rc<IndexBuffer<B>>>>,
    texture: RefCell<Option<Rc<B::Texture>>>,
}

impl<B: Backend> Shape<B> {
    pub fn new(
        topology: Topology,
        vertices: Rc<VertexBuffer<B>>,
        indices: Option<Rc<IndexBuffer<B>>>,
        texture: Option<Rc<B::Texture>>,
    ) -> Self {
        Self {
            topology: Cell::new(topology),
            vertices: RefCell::new(vertices),
            indices: RefCell::new(indices),
            texture: RefCell::new(texture),
        }
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology.get()
    }

    pub fn set_topology(&self, topology: Topology) {
        self.topology.set(topology);
    }

    pub fn vertices(&self) -> Rc<VertexBuffer<B>> {
        self.vertices.borrow().clone()
    }

    pub fn set_vertices(&self, vertices: Rc<VertexBuffer<B>>) {
        *self.vertices.borrow_mut() = vertices;
    }

    pub fn indices(&self) -> Option<Rc<IndexBuffer<B>>> {
        self.indices.borrow().clone()
    }

    pub fn set_indices(&self, indices: Option<Rc<IndexBuffer<B>>>) {
        *self.indices.borrow_mut() = indices;
    }

    pub fn texture(&self) -> Option<Rc<B::Texture>> {
        self.texture.borrow().clone()
    }

    pub fn set_texture(&self, texture: Option<Rc<B::Texture>>) {
        *self.texture.borrow_mut() = texture;
    }

    /// Draws this shape alone on `target` under `transform` with the default
    /// program.
    pub fn draw(
        &self,
        ctx: &RenderContext<B>,
        target: Option<&B::Texture>,
        transform: &Transform,
    ) -> Result<(), RenderError> {
        ctx.render_to(target, transform)?;
        ctx.use_default_program(false)?;
        self.submit(ctx.backend());
        Ok(())
    }

    /// Issues the draw call against whatever target and program are current.
    ///
    /// Counts come from the uploaded buffers. Returns `false` (and draws
    /// nothing) when the vertices, or attached indices, were never uploaded.
    pub(crate) fn submit(&self, backend: &B) -> bool {
        let topology = self.topology.get();
        let vertices = self.vertices.borrow();
        let indices = self.indices.borrow();
        let texture = self.texture.borrow();
        let texture = texture.as_deref();

        let drawn = vertices
            .with_uploaded(|vbuf, vlen| match indices.as_deref() {
                Some(ib) => ib
                    .with_uploaded(|ibuf, ilen| backend.draw_indexed(vbuf, ibuf, topology, ilen, texture))
                    .is_some(),
                None => {
                    backend.draw_buffer(vbuf, topology, vlen, texture);
                    true
                }
            })
            .unwrap_or(false);

        if !drawn {
            log::trace!("skipped {topology:?} shape with no uploaded geometry");
        }
        drawn
    }
}
