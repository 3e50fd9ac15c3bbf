use std::cell::RefCell;
use std::rc::Rc;

use bytemuck::Pod;

use crate::device::{Backend, BufferKind, DeviceError, Gpu};

use super::Vertex;

/// Element type storable in a [`GeometryBuffer`].
pub trait BufferElement: Pod {
    const KIND: BufferKind;
}

impl BufferElement for Vertex {
    const KIND: BufferKind = BufferKind::Vertex;
}

impl BufferElement for u16 {
    const KIND: BufferKind = BufferKind::Index;
}

pub type VertexBuffer<B> = GeometryBuffer<Vertex, B>;
pub type IndexBuffer<B> = GeometryBuffer<u16, B>;

struct Uploaded<H> {
    raw: H,
    len: usize,
}

/// Growable CPU list with an explicit GPU snapshot.
///
/// Shared between shapes as `Rc<GeometryBuffer<..>>`; mutation goes through
/// `&self`. Appends never touch the GPU; [`upload`](Self::upload) replaces the
/// GPU copy with the current CPU contents.
pub struct GeometryBuffer<T: BufferElement, B: Backend> {
    gpu: Rc<Gpu<B>>,
    data: RefCell<Vec<T>>,
    uploaded: RefCell<Option<Uploaded<B::Buffer>>>,
}

impl<T: BufferElement, B: Backend> GeometryBuffer<T, B> {
    pub(crate) fn new(gpu: Rc<Gpu<B>>) -> Self {
        Self {
            gpu,
            data: RefCell::new(Vec::new()),
            uploaded: RefCell::new(None),
        }
    }

    /// Appends one element to the CPU list.
    #[inline]
    pub fn push(&self, item: T) {
        self.data.borrow_mut().push(item);
    }

    pub fn extend<I: IntoIterator<Item = T>>(&self, items: I) {
        self.data.borrow_mut().extend(items);
    }

    /// Element at `index` in the CPU list.
    pub fn get(&self, index: usize) -> Option<T> {
        self.data.borrow().get(index).copied()
    }

    /// Empties the CPU list. The GPU copy is kept until the next upload.
    pub fn clear(&self) {
        self.data.borrow_mut().clear();
    }

    /// CPU-side element count.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element count of the GPU copy, if one exists.
    pub fn uploaded_len(&self) -> Option<usize> {
        self.uploaded.borrow().as_ref().map(|u| u.len)
    }

    #[inline]
    pub fn is_uploaded(&self) -> bool {
        self.uploaded.borrow().is_some()
    }

    /// Rebuilds the GPU copy from the current CPU list.
    ///
    /// The previous GPU copy is released first. On failure the buffer is left
    /// with no GPU copy. An empty list uploads nothing and leaves the GPU copy
    /// absent.
    pub fn upload(&self) -> Result<(), DeviceError> {
        self.uploaded.borrow_mut().take();

        let data = self.data.borrow();
        if data.is_empty() {
            log::trace!("{} buffer is empty; nothing uploaded", T::KIND);
            return Ok(());
        }

        let raw = self
            .gpu
            .backend()
            .create_buffer(T::KIND, bytemuck::cast_slice::<T, u8>(data.as_slice()), data.len())?;

        log::debug!("uploaded {} {} element(s)", data.len(), T::KIND);
        *self.uploaded.borrow_mut() = Some(Uploaded { raw, len: data.len() });
        Ok(())
    }

    /// Runs `f` with the GPU copy and its element count, if there is one.
    pub(crate) fn with_uploaded<R>(&self, f: impl FnOnce(&B::Buffer, usize) -> R) -> Option<R> {
        self.uploaded.borrow().as_ref().map(|u| f(&u.raw, u.len))
    }
}
